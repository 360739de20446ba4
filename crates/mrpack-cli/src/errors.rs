use miette::Diagnostic;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug, Diagnostic)]
pub enum CliError {
    #[error("Configuration file not found")]
    #[diagnostic(
        code(config::not_found),
        help("Create a mrpack.config.json or mrpack.config.toml file in your project directory, or run `mrpack init`")
    )]
    ConfigNotFound { search_path: PathBuf },

    #[error("Invalid project file entry")]
    #[diagnostic(
        code(config::invalid_entry),
        help("Each file needs either a local `source` or both `hashes` and `file_size`")
    )]
    InvalidProject {
        #[source]
        source: mrpack_project::ProjectError,
    },

    #[error("Invalid dependencies")]
    #[diagnostic(
        code(project::invalid_dependencies),
        help("A modpack needs a `minecraft` dependency and at most one loader (forge, neoforge, fabric-loader or quilt-loader)")
    )]
    InvalidDependencies {
        #[source]
        source: mrpack::ValidationError,
    },

    #[error("No files to pack")]
    #[diagnostic(
        code(project::no_files),
        help("Add at least one entry to `files` in your project file")
    )]
    NoFiles,

    #[error("Failed to build modpack")]
    #[diagnostic(code(mrpack::build_failed))]
    Build {
        #[source]
        source: mrpack::Error,
    },

    #[error("Override path is not valid UTF-8: {path}")]
    #[diagnostic(
        code(overrides::non_utf8_path),
        help("Rename the file so its path only contains UTF-8 characters")
    )]
    NonUtf8OverridePath { path: PathBuf },

    #[error("Directory creation failed")]
    #[diagnostic(
        code(fs::create_dir_failed),
        help("Check file permissions and available disk space")
    )]
    DirectoryCreationFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("IO operation failed")]
    #[diagnostic(code(io::operation_failed))]
    IoError {
        #[from]
        source: std::io::Error,
    },
}

impl CliError {
    pub fn config_not_found(search_path: PathBuf) -> Self {
        Self::ConfigNotFound { search_path }
    }

    pub fn directory_creation_failed(path: PathBuf, source: std::io::Error) -> Self {
        Self::DirectoryCreationFailed { path, source }
    }
}

impl From<mrpack_project::ProjectError> for CliError {
    fn from(source: mrpack_project::ProjectError) -> Self {
        Self::InvalidProject { source }
    }
}

impl From<mrpack::Error> for CliError {
    fn from(source: mrpack::Error) -> Self {
        match source {
            mrpack::Error::Validation(source) => Self::InvalidDependencies { source },
            mrpack::Error::State(mrpack::StateError::NoFiles) => Self::NoFiles,
            source => Self::Build { source },
        }
    }
}
