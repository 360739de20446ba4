use std::{
    io,
    path::{Path, PathBuf},
};

use colored::Colorize;
use inquire::{validator::Validation, Text};
use miette::IntoDiagnostic;
use mrpack::Loader;
use mrpack_project::{default_project, DEFAULT_OVERRIDES_DIR};

use crate::println_pad;

#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum LoaderArg {
    Forge,
    Neoforge,
    Fabric,
    Quilt,
}

impl From<LoaderArg> for Loader {
    fn from(arg: LoaderArg) -> Self {
        match arg {
            LoaderArg::Forge => Loader::Forge,
            LoaderArg::Neoforge => Loader::NeoForge,
            LoaderArg::Fabric => Loader::Fabric,
            LoaderArg::Quilt => Loader::Quilt,
        }
    }
}

#[derive(Debug, Clone)]
pub struct InitModpackArgs {
    pub name: Option<String>,
    pub game_version: Option<String>,
    pub loader: Option<LoaderArg>,
    pub loader_version: Option<String>,

    pub output_dir: Option<String>,
}

pub fn init_modpack_project(args: InitModpackArgs) -> miette::Result<()> {
    let name = match args.name {
        Some(ref name) => name.clone(),
        None => prompt_non_empty("Enter modpack name:")?,
    };
    let game_version = match args.game_version {
        Some(ref version) => version.clone(),
        None => prompt_non_empty("Enter Minecraft version:")?,
    };
    let loader = match args.loader {
        Some(loader) => {
            let loader = Loader::from(loader);
            let version = match args.loader_version {
                Some(ref version) => version.clone(),
                None => prompt_non_empty(&format!("Enter {} version:", loader))?,
            };
            Some((loader.key().to_string(), version))
        }
        None => None,
    };

    println_pad!(
        "{} {}",
        "🚀 Initializing new modpack:".bright_blue().bold(),
        name.bright_cyan().bold()
    );

    let project_dir = match args.output_dir {
        Some(ref output_dir) => PathBuf::from(output_dir).join(slug::slugify(&name)),
        None => create_project_dir_path(slug::slugify(&name)).into_diagnostic()?,
    };

    println_pad!(
        "{} {}",
        "📁 Creating modpack directory at:".bright_yellow(),
        project_dir.display().to_string().bright_white().bold()
    );
    std::fs::create_dir_all(&project_dir).into_diagnostic()?;

    create_project_file(&project_dir, &name, &game_version, loader)?;
    std::fs::create_dir_all(project_dir.join(DEFAULT_OVERRIDES_DIR)).into_diagnostic()?;

    println_pad!(
        "{}\n{} {}",
        "Modpack initialized successfully!".bright_green().bold(),
        "Location:".bright_green(),
        project_dir.display().to_string().bright_white().bold()
    );

    Ok(())
}

fn create_project_file(
    project_dir: impl AsRef<Path>,
    name: &str,
    game_version: &str,
    loader: Option<(String, String)>,
) -> miette::Result<()> {
    let project = default_project(name, game_version, loader);

    let content = toml::to_string_pretty(&project).into_diagnostic()?;
    std::fs::write(project_dir.as_ref().join("mrpack.config.toml"), content).into_diagnostic()?;

    Ok(())
}

fn create_project_dir_path(name: impl AsRef<Path>) -> io::Result<PathBuf> {
    Ok(std::env::current_dir()?.join(name))
}

fn prompt_non_empty(message: &str) -> miette::Result<String> {
    let validator = |input: &str| {
        if input.trim().is_empty() {
            Ok(Validation::Invalid("Value must not be empty".into()))
        } else {
            Ok(Validation::Valid)
        }
    };

    Text::new(message)
        .with_validator(validator)
        .prompt()
        .into_diagnostic()
}
