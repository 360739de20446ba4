mod info;
mod init;
mod pack;

pub use info::{info_modpack, InfoModpackArgs};
pub use init::{init_modpack_project, InitModpackArgs, LoaderArg};
pub use pack::{pack_modpack_project, PackModpackArgs};
