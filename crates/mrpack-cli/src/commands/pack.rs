use std::{
    fs::File,
    io::BufReader,
    path::{Path, PathBuf},
};

use camino::Utf8PathBuf;
use colored::Colorize;
use miette::{miette, IntoDiagnostic, Result, WrapErr};
use mrpack::{DependencySet, FileEntry, FileHashes, ModPackage, Override, OVERRIDES_FOLDER};
use mrpack_project::{
    FileIntegrity, ModpackProject, OverrideFormat, ProjectFile, ProjectOverride,
    CONFIG_FILE_NAMES,
};
use walkdir::WalkDir;

use crate::{errors::CliError, utils::create_mrpack_file_name};

#[derive(Debug)]
pub struct PackModpackArgs {
    pub config_path: Option<String>,
    pub file_name: Option<String>,
    pub output_dir: String,
}

pub fn pack_modpack_project(args: PackModpackArgs) -> Result<()> {
    let config_path = resolve_config_path(args.config_path.clone())?;
    let project = load_config(&config_path)?;
    let project_root = resolve_project_root(&config_path);

    println!(
        "{} {}",
        "📦 Packing modpack:".bright_blue().bold(),
        project.name.bright_cyan().bold()
    );

    let package = build_package(&project, &project_root)?;
    println!(
        "{} {} files, {} overrides",
        "🧾 Collected".bright_magenta(),
        package.files_len().to_string().bright_white().bold(),
        package.overrides_len().to_string().bright_white().bold()
    );

    let dependencies: DependencySet = project.dependencies.clone().into();
    let builder = package
        .into_builder(project.version.clone(), dependencies, project.summary.clone())
        .map_err(CliError::from)?;

    // Build in memory first so a failure never leaves a truncated archive behind
    let bytes = builder.build().map_err(CliError::from)?;

    let output_dir = resolve_output_dir(&args.output_dir, &project_root);
    if !output_dir.exists() {
        println!(
            "{} {}",
            "📁 Creating output directory:".bright_yellow(),
            output_dir.display().to_string().bright_white().bold()
        );
        std::fs::create_dir_all(&output_dir)
            .map_err(|e| CliError::directory_creation_failed(output_dir.clone(), e))?;
    }

    let output_path = output_dir.join(create_mrpack_file_name(&project, args.file_name));
    std::fs::write(&output_path, bytes)
        .into_diagnostic()
        .wrap_err_with(|| format!("Failed to write {}", output_path.display()))?;

    println!(
        "{}\n{} {}",
        "✅ Modpack created successfully!".bright_green().bold(),
        "📍 Path:".bright_green(),
        output_path.display().to_string().bright_white().bold()
    );

    Ok(())
}

/// Collect every file and override of a project.
pub fn build_package(project: &ModpackProject, project_root: &Path) -> Result<ModPackage> {
    let mut package = ModPackage::new(project.name.clone());

    for file in &project.files {
        package.add_file(build_file_entry(file, project_root)?);
    }

    for entry in collect_override_dir(&project_root.join(&project.overrides_dir))? {
        package.add_override(entry);
    }

    for inline in &project.overrides {
        package.add_override(build_inline_override(inline)?);
    }

    Ok(package)
}

fn build_file_entry(file: &ProjectFile, project_root: &Path) -> Result<FileEntry> {
    let mut entry = match file.integrity().map_err(CliError::from)? {
        FileIntegrity::Declared { hashes, file_size } => FileEntry::new(
            file.path.as_str(),
            FileHashes::new(hashes.sha1.as_str(), hashes.sha512.as_str()),
            file_size,
        )
        .into_diagnostic()?,
        FileIntegrity::Source(source) => {
            let source_path = project_root.join(source);
            tracing::debug!("Hashing {}", source_path.display());

            let reader = BufReader::new(
                File::open(&source_path)
                    .into_diagnostic()
                    .wrap_err_with(|| format!("Failed to open {}", source_path.display()))?,
            );
            let (hashes, file_size) = FileHashes::from_reader(reader).into_diagnostic()?;
            FileEntry::new(file.path.as_str(), hashes, file_size).into_diagnostic()?
        }
    };

    for download in &file.downloads {
        entry.add_download(download.as_str()).into_diagnostic()?;
    }

    Ok(entry)
}

/// Walk the overrides directory and turn every file into a raw override under `overrides/`.
fn collect_override_dir(overrides_dir: &Path) -> Result<Vec<Override>> {
    if !overrides_dir.exists() {
        tracing::debug!(
            "Overrides directory {} does not exist, skipping",
            overrides_dir.display()
        );
        return Ok(Vec::new());
    }

    let mut overrides = Vec::new();
    for entry in WalkDir::new(overrides_dir).sort_by_file_name() {
        let entry = entry.map_err(|e| miette!("Failed to walk directory: {}", e))?;
        let path = entry.path();
        if !path.is_file() {
            continue;
        }

        let relative_path = path.strip_prefix(overrides_dir).into_diagnostic()?;
        let relative_path = Utf8PathBuf::from_path_buf(relative_path.to_path_buf()).map_err(
            |path| CliError::NonUtf8OverridePath { path },
        )?;
        let archive_path = format!(
            "{}/{}",
            OVERRIDES_FOLDER,
            relative_path.as_str().replace('\\', "/")
        );

        let data = std::fs::read(path).into_diagnostic()?;
        tracing::debug!("Adding override {} ({} bytes)", archive_path, data.len());
        overrides.push(Override::bytes(archive_path, data).into_diagnostic()?);
    }

    Ok(overrides)
}

fn build_inline_override(inline: &ProjectOverride) -> Result<Override> {
    let path = inline.path.as_str();
    let entry = match inline.format {
        OverrideFormat::Text => Override::text(path, inline.text().map_err(CliError::from)?),
        OverrideFormat::Json => Override::json(path, inline.content.clone()),
        OverrideFormat::Toml => Override::toml(path, inline.content.clone()),
    };
    entry.into_diagnostic()
}

// Config utils

fn resolve_config_path(config_path: Option<String>) -> Result<PathBuf> {
    match config_path {
        Some(path) => Ok(PathBuf::from(path)),
        None => {
            let cwd = std::env::current_dir().into_diagnostic()?;
            resolve_correct_config_extension(&cwd)
        }
    }
}

fn resolve_correct_config_extension(project_dir: &Path) -> Result<PathBuf> {
    for file_name in CONFIG_FILE_NAMES {
        let config_path = project_dir.join(file_name);
        if config_path.exists() {
            return Ok(config_path);
        }
    }

    Err(CliError::config_not_found(project_dir.to_owned()).into())
}

pub fn load_config(config_path: &Path) -> Result<ModpackProject> {
    let config_extension = config_path.extension().unwrap_or_default();

    match config_extension.to_str() {
        Some("json") => {
            let file = File::open(config_path).into_diagnostic().with_context(|| {
                format!("Failed to open config file: {}", config_path.display())
            })?;
            serde_json::from_reader(BufReader::new(file))
                .into_diagnostic()
                .with_context(|| {
                    format!(
                        "Failed to parse JSON config file: {}",
                        config_path.display()
                    )
                })
        }
        Some("toml") => {
            let content = std::fs::read_to_string(config_path)
                .into_diagnostic()
                .with_context(|| {
                    format!("Failed to read config file: {}", config_path.display())
                })?;
            toml::from_str(&content).into_diagnostic().with_context(|| {
                format!(
                    "Failed to parse TOML config file: {}",
                    config_path.display()
                )
            })
        }
        _ => Err(miette!(
            "Invalid config file extension, expected mrpack.config.json or mrpack.config.toml"
        )),
    }
}

fn resolve_project_root(config_path: &Path) -> PathBuf {
    config_path
        .parent()
        .map(Path::to_path_buf)
        .unwrap_or_default()
}

fn resolve_output_dir(output_dir: &str, project_root: &Path) -> PathBuf {
    let output_dir = PathBuf::from(output_dir);
    match output_dir.is_absolute() {
        true => output_dir,
        false => project_root.join(output_dir),
    }
}
