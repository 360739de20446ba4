use std::fs::File;

use crate::println_pad;
use colored::Colorize;
use miette::IntoDiagnostic;
use mrpack::MrpackReader;

pub struct InfoModpackArgs {
    pub file_path: String,
}

pub fn info_modpack(args: InfoModpackArgs) -> miette::Result<()> {
    let file = File::open(&args.file_path).into_diagnostic()?;
    let mut reader = MrpackReader::new(file).into_diagnostic()?;
    let index = reader.read_index().into_diagnostic()?;

    println_pad!(
        "{} {}",
        "📦 Modpack:".bright_blue().bold(),
        index.name.bright_cyan().bold()
    );
    println_pad!(
        "{} {}",
        "🏷️ Version:".bright_green(),
        index.version.bright_white().bold()
    );
    println_pad!(
        "{} {}",
        "📝 Summary:".bright_yellow(),
        index.summary.bright_white()
    );

    println_pad!("\n{}", "🧩 Dependencies:".bright_magenta().bold());
    for (key, version) in index.dependencies.iter() {
        println_pad!(
            "   {} {} {}",
            "•".bright_cyan(),
            key.bright_cyan().bold(),
            version.bright_white()
        );
    }

    println_pad!(
        "\n{} {}",
        "📄 Files:".bright_magenta().bold(),
        format!("({})", index.files.len()).dimmed()
    );
    for file in &index.files {
        println_pad!(
            "   {} {} {}",
            "•".bright_cyan(),
            file.path.bright_white(),
            format!("({} bytes, {} mirrors)", file.file_size, file.downloads.len()).dimmed()
        );
    }

    let overrides = reader.override_names();
    println_pad!(
        "\n{} {}",
        "🗂️  Overrides:".bright_magenta().bold(),
        format!("({})", overrides.len()).dimmed()
    );
    for name in overrides {
        println_pad!("   {} {}", "•".bright_cyan(), name.bright_white());
    }

    Ok(())
}
