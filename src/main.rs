//! Slippy - code playground command line
//!
//! Usage:
//!   slippy highlight script.js > script.html
//!   slippy preview --html index.html --css styles.css --js script.js
//!   slippy files list

use anyhow::{anyhow, Context, Result};
use chrono::Utc;
use clap::{Parser, Subcommand};
use slippy_core::{
    adapters::{DirectoryExporter, FileStorage},
    config::PlaygroundConfig,
    highlight::{self, Language},
    session::{preview, SavedFile, SavedFiles},
};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, Level};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "slippy")]
#[command(about = "Code playground core: highlighting, preview and saved files")]
#[command(version)]
struct Cli {
    /// Configuration file (TOML)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, global = true, default_value = "warn")]
    log_level: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render a source file as highlighted HTML
    Highlight {
        file: PathBuf,

        /// Language tag (detected from the extension if omitted)
        #[arg(long)]
        language: Option<String>,

        /// Write to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Combine html, css and js files into one preview document
    Preview {
        #[arg(long)]
        html: Option<PathBuf>,

        #[arg(long)]
        css: Option<PathBuf>,

        #[arg(long)]
        js: Option<PathBuf>,

        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// List supported languages
    Languages,

    /// Manage the saved file collection
    Files {
        #[command(subcommand)]
        action: FilesAction,
    },
}

#[derive(Subcommand)]
enum FilesAction {
    /// List saved files
    List,

    /// Print a saved file
    Show {
        name: String,

        /// Print highlighted HTML instead of the raw content
        #[arg(long)]
        highlight: bool,
    },

    /// Write a saved file into the export directory
    Export { name: String },

    /// Add a file on disk to the collection
    Import {
        file: PathBuf,

        #[arg(long)]
        language: Option<String>,
    },
}

fn init_logging(level: &str) {
    let level = match level {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::WARN,
    };

    let filter = EnvFilter::new(format!(
        "slippy={},slippy_core={}",
        level.as_str().to_lowercase(),
        level.as_str().to_lowercase()
    ));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr) // Logs to stderr, not stdout
        .init();
}

fn resolve_language(tag: Option<&str>, path: &Path) -> Result<Language> {
    match tag {
        Some(tag) => Ok(tag.parse::<Language>()?),
        None => Language::from_path(path)
            .ok_or_else(|| anyhow!("Cannot detect language of {}; pass --language", path.display())),
    }
}

fn read_optional(path: Option<&Path>) -> Result<String> {
    match path {
        Some(path) => fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display())),
        None => Ok(String::new()),
    }
}

fn emit(output: Option<&Path>, text: &str) -> Result<()> {
    match output {
        Some(path) => {
            fs::write(path, text).with_context(|| format!("Failed to write {}", path.display()))?;
            info!("Wrote {}", path.display());
        }
        None => println!("{}", text),
    }
    Ok(())
}

fn open_storage(config: &PlaygroundConfig) -> Result<FileStorage> {
    let path = config.storage_path();
    debug!("Using storage: {}", path.display());
    FileStorage::open(&path).with_context(|| format!("Failed to open storage {}", path.display()))
}

fn find_saved(storage: &FileStorage, name: &str) -> Result<SavedFile> {
    let files = SavedFiles::load(storage)?;
    files
        .get(name)
        .cloned()
        .ok_or_else(|| anyhow!("Saved file not found: {}", name))
}

fn run_files(action: FilesAction, config: &PlaygroundConfig) -> Result<()> {
    match action {
        FilesAction::List => {
            let storage = open_storage(config)?;
            let files = SavedFiles::load(&storage)?;
            if files.is_empty() {
                println!("No saved files");
            }
            for (name, file) in files.into_inner() {
                println!(
                    "{:<24} {:<10} {:>8} bytes  {}",
                    name,
                    file.language.as_str(),
                    file.content.len(),
                    file.last_modified.format("%Y-%m-%d %H:%M:%S")
                );
            }
        }
        FilesAction::Show {
            name,
            highlight: as_html,
        } => {
            let storage = open_storage(config)?;
            let file = find_saved(&storage, &name)?;
            if as_html {
                println!("{}", highlight::highlight_language(&file.content, file.language));
            } else {
                print!("{}", file.content);
            }
        }
        FilesAction::Export { name } => {
            let storage = open_storage(config)?;
            let file = find_saved(&storage, &name)?;
            let exporter = DirectoryExporter::new(&config.export_dir);
            let path = exporter.write(&name, &file.content)?;
            println!("Exported {} to {}", name, path.display());
        }
        FilesAction::Import { file, language } => {
            let language = resolve_language(language.as_deref(), &file)?;
            let content = fs::read_to_string(&file)
                .with_context(|| format!("Failed to read {}", file.display()))?;
            let name = file
                .file_name()
                .and_then(|n| n.to_str())
                .ok_or_else(|| anyhow!("Invalid file name: {}", file.display()))?
                .to_string();

            let mut storage = open_storage(config)?;
            let mut files = SavedFiles::load(&storage)?;
            files.insert(
                name.clone(),
                SavedFile {
                    content,
                    language,
                    last_modified: Utc::now(),
                },
            );
            files.store(&mut storage)?;
            println!("Imported {} as {}", file.display(), name);
        }
    }
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(&cli.log_level);

    debug!("Slippy v{} starting...", env!("CARGO_PKG_VERSION"));

    let config = PlaygroundConfig::load(cli.config.as_deref()).context("Failed to load configuration")?;

    match cli.command {
        Commands::Highlight {
            file,
            language,
            output,
        } => {
            let source = fs::read_to_string(&file)
                .with_context(|| format!("Failed to read {}", file.display()))?;
            let language = match language {
                Some(tag) => Language::normalize(&tag),
                None => Language::from_path(&file).unwrap_or(config.default_language),
            };
            emit(output.as_deref(), &highlight::highlight_language(&source, language))?;
        }
        Commands::Preview {
            html,
            css,
            js,
            output,
        } => {
            let html = read_optional(html.as_deref())?;
            let css = read_optional(css.as_deref())?;
            let js = read_optional(js.as_deref())?;
            emit(output.as_deref(), &preview::compose(&html, &css, &js))?;
        }
        Commands::Languages => {
            for language in highlight::supported_languages() {
                println!("{:<12} .{}", language.as_str(), language.extension());
            }
        }
        Commands::Files { action } => run_files(action, &config)?,
    }

    Ok(())
}
