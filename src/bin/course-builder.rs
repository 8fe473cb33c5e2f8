#![forbid(unsafe_code)]
//! Command-line editor for lesson files

use clap::{ArgGroup, Parser, Subcommand};
use colored::*;
use coursekit::component::{ComponentData, FieldsPatch, TextPatch};
use coursekit::config::{load_config, BuilderConfig};
use coursekit::factory::ComponentFactory;
use coursekit::snapshot::Snapshot;
use coursekit::{ComponentId, ComponentPatch, ComponentType, CourseBuilder};
use std::path::PathBuf;
use tracing::warn;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Configuration file (defaults to ./course-builder.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    /// Lesson file to edit (defaults to storage.lesson_path)
    #[arg(long, global = true)]
    lesson: Option<PathBuf>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Lists the component types that can be added
    Palette,
    /// Shows the lesson's components in order
    List,
    /// Appends a component of the given type
    Add {
        /// One of: text, video, image, quiz, file-download, audio, code, divider, spacer
        kind: String,
    },
    /// Replaces the content of a text component
    UpdateText { id: String, content: String },
    /// Deletes a component
    Delete { id: String },
    /// Moves the component at FROM to position TO
    Move { from: usize, to: usize },
    /// Appends a copy of a component
    Duplicate { id: String },
    /// Selects a component, or clears the selection
    #[command(group(ArgGroup::new("target").required(true).args(["id", "clear"])))]
    Select {
        id: Option<String>,
        #[arg(long)]
        clear: bool,
    },
    /// Removes every component
    Clear,
    /// Appends an option to a quiz
    QuizAddOption { id: String },
    /// Removes the option at INDEX from a quiz
    QuizRemoveOption { id: String, index: usize },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let config = match &cli.config {
        Some(path) => BuilderConfig::load(path)?,
        None => load_config()?,
    };
    init_tracing(&config.logging.level);

    let lesson_path = cli
        .lesson
        .clone()
        .unwrap_or_else(|| PathBuf::from(&config.storage.lesson_path));
    let snapshot = Snapshot::load_or_empty(&lesson_path)?;
    let mut builder = CourseBuilder::from_snapshot(snapshot, &config)?;

    let changed = match run(&cli.command, &mut builder) {
        Ok(changed) => changed,
        Err(e) => {
            warn!(error = %e, "operation rejected");
            eprintln!("{} {}", "❌".red(), e.to_string().red().bold());
            return Err(e.into());
        }
    };

    if changed {
        builder.snapshot().save(&lesson_path)?;
        println!(
            "{} {}",
            "✅ Saved".bright_green(),
            lesson_path.display().to_string().bright_white()
        );
    }
    Ok(())
}

fn init_tracing(level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Applies one command; returns whether the lesson changed.
fn run(command: &Commands, builder: &mut CourseBuilder) -> coursekit::Result<bool> {
    match command {
        Commands::Palette => {
            print_palette();
            Ok(false)
        }
        Commands::List => {
            print_lesson(builder);
            Ok(false)
        }
        Commands::Add { kind } => {
            let kind: ComponentType = kind.parse()?;
            let id = builder.add(kind, None)?;
            println!(
                "Added {} {}",
                kind.to_string().bright_cyan(),
                id.to_string().bright_white()
            );
            Ok(true)
        }
        Commands::UpdateText { id, content } => {
            let patch = ComponentPatch::fields(FieldsPatch::Text(TextPatch {
                content: Some(content.clone()),
            }));
            builder.update(&ComponentId::from(id.as_str()), &patch)?;
            Ok(true)
        }
        Commands::Delete { id } => {
            let removed = builder.delete(&ComponentId::from(id.as_str()))?;
            println!("Deleted {} {}", removed.kind().to_string().bright_cyan(), removed.id());
            Ok(true)
        }
        Commands::Move { from, to } => {
            builder.reorder(*from, *to)?;
            Ok(true)
        }
        Commands::Duplicate { id } => {
            let new_id = builder.duplicate(&ComponentId::from(id.as_str()))?;
            println!("Duplicated as {}", new_id.to_string().bright_white());
            Ok(true)
        }
        Commands::Select { id, clear } => {
            let target = if *clear {
                None
            } else {
                id.as_deref().map(ComponentId::from)
            };
            builder.select(target.as_ref())?;
            Ok(true)
        }
        Commands::Clear => {
            builder.clear();
            Ok(true)
        }
        Commands::QuizAddOption { id } => {
            let option = builder.add_quiz_option(&ComponentId::from(id.as_str()))?;
            println!("Added option {}", option.bright_white());
            Ok(true)
        }
        Commands::QuizRemoveOption { id, index } => {
            let removed = builder.remove_quiz_option(&ComponentId::from(id.as_str()), *index)?;
            println!("Removed option {} ({})", removed.id.bright_white(), removed.text);
            Ok(true)
        }
    }
}

fn print_palette() {
    println!("{}", "Component palette".bright_cyan().bold());
    println!("{}", "-----------------".bright_cyan());
    for entry in ComponentFactory::palette() {
        println!(
            "  {:<14} {:<14} {}",
            entry.kind.to_string().bright_white(),
            entry.label.bright_green(),
            entry.description.dimmed()
        );
    }
}

fn print_lesson(builder: &CourseBuilder) {
    if builder.is_empty() {
        println!("{}", "Lesson is empty. Add a component with 'add <type>'.".yellow());
        return;
    }
    for component in builder.components() {
        let marker = if builder.selected_id() == Some(component.id()) {
            "▶".bright_yellow()
        } else {
            " ".normal()
        };
        let label = ComponentFactory::palette_entry(component.kind()).label;
        println!(
            "{} {:>3}  {:<14} {}  {}",
            marker,
            component.order(),
            label.bright_green(),
            component.id().to_string().dimmed(),
            summary(component.data())
        );
    }
}

fn summary(data: &ComponentData) -> String {
    let text = match data {
        ComponentData::Text(b) => b.content.clone(),
        ComponentData::Video(b) => b.video_url.clone(),
        ComponentData::Image(b) => b.image_url.clone(),
        ComponentData::Quiz(b) => format!("{} ({} options)", b.question, b.options.len()),
        ComponentData::FileDownload(b) => format!("{} [{}]", b.file_name, b.file_size),
        ComponentData::Audio(b) => b.title.clone(),
        ComponentData::Code(b) => format!("[{}] {}", b.language, b.code),
        ComponentData::Divider(_) | ComponentData::Spacer(_) => String::new(),
    };
    if text.chars().count() > 48 {
        format!("{}...", text.chars().take(45).collect::<String>())
    } else {
        text
    }
}
