use clap::builder::{styling::AnsiColor, Styles};
use clap::ColorChoice;
use clap::{CommandFactory, FromArgMatches, Parser, Subcommand};
use commands::{
    info_modpack, init_modpack_project, pack_modpack_project, InfoModpackArgs, InitModpackArgs,
    LoaderArg, PackModpackArgs,
};
use miette::Result;
use tracing_subscriber::EnvFilter;

mod commands;
mod errors;
mod utils;

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Enable debug logging (overridden by RUST_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Create a new modpack project
    Init {
        #[arg(short, long)]
        name: Option<String>,

        /// The Minecraft version, e.g. 1.20.1
        #[arg(short, long)]
        game_version: Option<String>,

        /// The mod loader, if any
        #[arg(short, long, value_enum)]
        loader: Option<LoaderArg>,

        /// The mod loader version
        #[arg(long, requires = "loader")]
        loader_version: Option<String>,

        #[arg(short, long)]
        output_dir: Option<String>,
    },
    /// Pack a modpack project into a .mrpack file
    Pack {
        /// The path to the modpack config file
        #[arg(short, long)]
        config_path: Option<String>,

        /// The resulting file name of the modpack
        #[arg(short, long)]
        file_name: Option<String>,

        /// The directory to output the modpack to
        #[arg(short, long, default_value = "build")]
        output_dir: String,
    },
    /// Show information about a .mrpack file
    Info {
        /// The path to the modpack file
        #[arg(short, long)]
        file_path: String,
    },
}

fn parse_args() -> Args {
    // Configure colored/styled help output
    let styles = Styles::styled()
        .header(AnsiColor::Yellow.on_default().bold())
        .usage(AnsiColor::Green.on_default().bold())
        .literal(AnsiColor::Cyan.on_default())
        .placeholder(AnsiColor::Blue.on_default());

    let matches = Args::command()
        .styles(styles)
        .color(ColorChoice::Auto)
        .get_matches();

    Args::from_arg_matches(&matches).unwrap_or_else(|e| e.exit())
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    let args = parse_args();
    init_tracing(args.verbose);

    match args.command {
        Commands::Init {
            name,
            game_version,
            loader,
            loader_version,
            output_dir,
        } => init_modpack_project(InitModpackArgs {
            name,
            game_version,
            loader,
            loader_version,
            output_dir,
        }),
        Commands::Pack {
            config_path,
            file_name,
            output_dir,
        } => pack_modpack_project(PackModpackArgs {
            config_path,
            file_name,
            output_dir,
        }),
        Commands::Info { file_path } => info_modpack(InfoModpackArgs { file_path }),
    }
}
