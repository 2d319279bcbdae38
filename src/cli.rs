//! Minimal CLI: read JSON -> infer classes -> render/write.
use std::io::Read;
use std::path::PathBuf;

use anyhow::{bail, Context};
use clap::{Args, Parser, Subcommand};
use colored::Colorize;

use crate::config::GeneratorConfig;
use crate::ident::Casing;
use crate::infer::Generator;
use crate::parse::parse_document;
use crate::render::{PhpRenderer, RenderedClass, Renderer};

// ---------------------------------- Types --------------------------------- //

/// generate data classes from a sample JSON document
#[derive(Parser, Debug)]
#[command(name = "json-dto", version)]
pub struct CommandLineInterface {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// infer classes from JSON and emit them as PHP data classes
    Generate(GenerateArgs),
}

#[derive(Args, Debug)]
struct InputSettings {
    /// inline JSON text
    #[arg(long, group = "input")]
    json: Option<String>,

    /// read the JSON from a file
    #[arg(long, value_name = "PATH", group = "input")]
    json_file: Option<PathBuf>,

    /// read the JSON from stdin
    #[arg(long, group = "input")]
    stdin: bool,
}

#[derive(Args, Debug)]
struct GenerateArgs {
    #[command(flatten)]
    input: InputSettings,

    /// namespace the classes are generated in
    #[arg(long, default_value = r"App\Data")]
    namespace: String,

    /// source name for the root class
    #[arg(long, default_value = "Root")]
    filename: String,

    /// output directory
    #[arg(short, long, default_value = ".")]
    output: PathBuf,

    /// casing for the generated property names
    #[arg(long, value_enum, default_value_t = Casing::None)]
    casing: Casing,

    /// generate getters
    #[arg(long)]
    getters: bool,

    /// generate setters
    #[arg(long)]
    setters: bool,

    /// generate getters and setters
    #[arg(long)]
    all: bool,

    /// classify YYYY-MM-DD-prefixed strings as dates
    #[arg(long)]
    dates: bool,

    /// print the generated files instead of writing them
    #[arg(long)]
    dry: bool,

    /// print the generated files as one JSON document
    #[arg(long)]
    json_output: bool,

    /// overwrite existing files
    #[arg(long)]
    force: bool,
}

// ------------------------------ Implementation ---------------------------- //

impl CommandLineInterface {
    pub fn load() -> Self {
        Self::parse()
    }

    pub fn run(&self) -> anyhow::Result<()> {
        match &self.cmd {
            Command::Generate(args) => args.run(),
        }
    }
}

impl InputSettings {
    fn read(&self) -> anyhow::Result<String> {
        if let Some(json) = &self.json {
            return Ok(json.clone());
        }
        if let Some(path) = &self.json_file {
            return std::fs::read_to_string(path)
                .with_context(|| format!("failed to read {}", path.display()));
        }
        if self.stdin {
            let mut buffer = String::new();
            std::io::stdin()
                .read_to_string(&mut buffer)
                .context("failed to read stdin")?;
            return Ok(buffer);
        }
        bail!("no input: pass --json, --json-file or --stdin");
    }
}

impl GenerateArgs {
    fn run(&self) -> anyhow::Result<()> {
        let source = self.input.read()?;
        let document = parse_document(&source)?;

        let config = GeneratorConfig::builder()
            .namespace(&self.namespace)
            .root_name(&self.filename)
            .casing(self.casing)
            .getters(self.getters || self.all)
            .setters(self.setters || self.all)
            .detect_dates(self.dates)
            .build();

        let generation = Generator::new(config)?.run(&document)?;
        for diagnostic in &generation.diagnostics {
            eprintln!("{}", format!("warning: {diagnostic}").yellow());
        }

        let rendered = PhpRenderer::new().render_all(&generation.classes);

        if self.dry {
            for class in &rendered {
                println!("{}", SEPARATOR.dimmed());
                println!("File: {}", class.path);
                println!("{}", class.source);
                println!("{}", SEPARATOR.dimmed());
            }
            return Ok(());
        }

        if self.json_output {
            println!("{}", serde_json::to_string_pretty(&rendered)?);
            return Ok(());
        }

        self.write_files(&rendered)
    }

    fn write_files(&self, rendered: &[RenderedClass]) -> anyhow::Result<()> {
        for class in rendered {
            let target = self.output.join(&class.path);
            if target.exists() && !self.force {
                eprintln!(
                    "{}",
                    format!("File already exists [{}], use --force to overwrite", class.path)
                        .yellow()
                );
                continue;
            }
            if let Some(parent) = target.parent() {
                std::fs::create_dir_all(parent)
                    .with_context(|| format!("failed to create {}", parent.display()))?;
            }
            std::fs::write(&target, &class.source)
                .with_context(|| format!("failed to write {}", target.display()))?;
            println!("{}", format!("Wrote: {}", class.path).green());
        }
        Ok(())
    }
}

const SEPARATOR: &str =
    "-------------------------------------------------------------------";

#[cfg(test)]
mod tests {
    use super::*;

    fn args(json: &str, output: PathBuf) -> GenerateArgs {
        GenerateArgs {
            input: InputSettings { json: Some(json.to_string()), json_file: None, stdin: false },
            namespace: r"App\Data".into(),
            filename: "Root".into(),
            output,
            casing: Casing::None,
            getters: false,
            setters: false,
            all: false,
            dates: false,
            dry: false,
            json_output: false,
            force: false,
        }
    }

    #[test]
    fn generate_writes_one_file_per_class() {
        let dir = tempfile::tempdir().unwrap();
        let args = args(r#"{"id": 1, "user": {"name": "x"}}"#, dir.path().to_path_buf());
        args.run().unwrap();

        assert!(dir.path().join("app/Data/RootData.php").is_file());
        assert!(dir.path().join("app/Data/UserData.php").is_file());
    }

    #[test]
    fn existing_files_are_skipped_unless_forced() {
        let dir = tempfile::tempdir().unwrap();
        let mut args = args(r#"{"id": 1}"#, dir.path().to_path_buf());
        args.run().unwrap();

        let target = dir.path().join("app/Data/RootData.php");
        std::fs::write(&target, "sentinel").unwrap();

        args.run().unwrap();
        assert_eq!(std::fs::read_to_string(&target).unwrap(), "sentinel");

        args.force = true;
        args.run().unwrap();
        assert!(std::fs::read_to_string(&target).unwrap().starts_with("<?php"));
    }

    #[test]
    fn invalid_namespace_fails_before_any_write() {
        let dir = tempfile::tempdir().unwrap();
        let mut args = args(r#"{"id": 1}"#, dir.path().to_path_buf());
        args.namespace = r"App\1Bad".into();

        assert!(args.run().is_err());
        assert!(std::fs::read_dir(dir.path()).unwrap().next().is_none());
    }

    #[test]
    fn malformed_json_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let args = args("{not json", dir.path().to_path_buf());
        assert!(args.run().is_err());
    }
}
