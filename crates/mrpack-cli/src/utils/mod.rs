use mrpack::MRPACK_EXTENSION;
use mrpack_project::ModpackProject;

#[macro_export]
macro_rules! println_pad {
    ($($arg:tt)*) => {{
        let __s = format!($($arg)*);
        for __line in __s.lines() {
            println!("    {}", __line);
        }
    }};
}

/// Create the archive file name for a project.
///
/// If `custom_name` is provided, it will be used (with `.mrpack` extension added if missing).
/// Otherwise, generates `{slugified name}_{version}.mrpack`.
pub fn create_mrpack_file_name(project: &ModpackProject, custom_name: Option<String>) -> String {
    match custom_name {
        Some(name) => {
            if name.ends_with(&format!(".{}", MRPACK_EXTENSION)) {
                name
            } else {
                format!("{}.{}", name, MRPACK_EXTENSION)
            }
        }
        None => format!(
            "{}_{}.{}",
            slug::slugify(&project.name),
            project.version,
            MRPACK_EXTENSION
        ),
    }
}
