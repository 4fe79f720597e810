//! `lightnote`: manage a LightNote database from the command line.
//!
//! Every command prints a JSON value on stdout. Note writes go through
//! [`NoteService`], so documents are sanitized exactly as the app does it.
//! Logs go to stderr; set `RUST_LOG` or pass `--verbose` to see them.

mod input;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use lightnote_core::{
    load_settings, settings_file_path, ActionResult, LightNoteError, NewNote, NotePatch,
    NoteService, Workspace,
};
use serde::Serialize;
use std::io;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "lightnote", version)]
#[command(about = "Manage LightNote notebooks and notes")]
struct Cli {
    /// SQLite database to use instead of the one in the settings file.
    #[arg(long, global = true, env = "LIGHTNOTE_DATABASE")]
    database: Option<PathBuf>,

    /// User that owns notebooks and favorites.
    #[arg(long, global = true, env = "LIGHTNOTE_USER", default_value = "local")]
    user: String,

    /// Enable DEBUG-level logs on stderr.
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create, list and delete notebooks
    #[command(subcommand)]
    Notebook(NotebookCommand),
    /// Create, read, update and delete notes
    #[command(subcommand)]
    Note(NoteCommand),
    /// Re-sanitize every stored note and rebuild its image list
    Sanitize,
    /// Mark notes as favorites
    #[command(subcommand)]
    Favorite(FavoriteCommand),
    /// Inspect application settings
    #[command(subcommand)]
    Settings(SettingsCommand),
}

#[derive(Subcommand)]
enum NotebookCommand {
    /// Create a notebook
    Create { name: String, emoji: String },
    /// List your notebooks
    List,
    /// Rename a notebook or change its emoji
    Update {
        id: String,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        emoji: Option<String>,
    },
    /// Delete a notebook and all of its notes
    Delete { id: String },
}

#[derive(Subcommand)]
enum NoteCommand {
    /// Create a note
    Create {
        /// Notebook the note belongs to
        notebook_id: String,
        title: String,
        emoji: String,
        /// JSON document file, or `-` for stdin
        #[arg(long)]
        content: Option<PathBuf>,
        /// Image URL to store instead of the ones found in the document
        #[arg(long = "image")]
        images: Vec<String>,
        /// Store an empty image list regardless of the document
        #[arg(long, conflicts_with = "images")]
        no_images: bool,
    },
    /// Show a note with sanitized content
    Show { id: String },
    /// List notes, optionally in one notebook
    List {
        #[arg(long)]
        notebook: Option<String>,
    },
    /// Update a note; omitted fields are left unchanged
    Update {
        id: String,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        emoji: Option<String>,
        /// Move the note to another notebook
        #[arg(long)]
        notebook: Option<String>,
        /// JSON document file, or `-` for stdin
        #[arg(long)]
        content: Option<PathBuf>,
        #[arg(long = "image")]
        images: Vec<String>,
        #[arg(long, conflicts_with = "images")]
        no_images: bool,
    },
    /// Delete a note
    Delete { id: String },
}

#[derive(Subcommand)]
enum FavoriteCommand {
    /// Add a note to your favorites
    Add { note_id: String },
    /// Remove a note from your favorites
    Remove { note_id: String },
    /// List your favorites, newest first
    List,
}

#[derive(Subcommand)]
enum SettingsCommand {
    /// Print the effective settings
    Show,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SettingsView {
    settings_file: String,
    database_path: String,
    placeholder_node_type: String,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_writer(io::stderr)
        .init();

    match run(cli) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

/// Runs one command. `Ok(false)` means the command printed a failure envelope.
fn run(cli: Cli) -> Result<bool> {
    let settings = load_settings();
    let database = cli
        .database
        .unwrap_or_else(|| PathBuf::from(&settings.database_path));

    if let Commands::Settings(SettingsCommand::Show) = cli.command {
        print_json(&SettingsView {
            settings_file: settings_file_path().to_string_lossy().to_string(),
            database_path: database.to_string_lossy().to_string(),
            placeholder_node_type: settings.placeholder_node_type,
        })?;
        return Ok(true);
    }

    log::debug!("using database {}", database.display());
    let workspace = input::open_workspace(&database)?;
    let mut service =
        NoteService::new(workspace).with_placeholder_type(settings.placeholder_node_type);
    let user = cli.user.as_str();

    match cli.command {
        Commands::Notebook(command) => run_notebook(service.repository_mut(), user, command),
        Commands::Note(command) => run_note(&mut service, command),
        Commands::Sanitize => print_envelope(&service.sanitize_all_notes()),
        Commands::Favorite(command) => run_favorite(service.repository_mut(), user, command),
        Commands::Settings(_) => Ok(true),
    }
}

fn run_notebook(workspace: &mut Workspace, user: &str, command: NotebookCommand) -> Result<bool> {
    match command {
        NotebookCommand::Create { name, emoji } => {
            let notebook = workspace
                .create_notebook(&name, &emoji, user)
                .context("Failed to create notebook")?;
            print_json(&notebook)?;
        }
        NotebookCommand::List => {
            print_json(&workspace.list_notebooks(user).context("Failed to list notebooks")?)?;
        }
        NotebookCommand::Update { id, name, emoji } => {
            let notebook = workspace
                .update_notebook(&id, name.as_deref(), emoji.as_deref())
                .context("Failed to update notebook")?;
            print_json(&notebook)?;
        }
        NotebookCommand::Delete { id } => {
            let removed = workspace
                .delete_notebook(&id)
                .context("Failed to delete notebook")?;
            print_json(&ActionResult::ok(format!(
                "Notebook deleted with {removed} notes"
            )))?;
        }
    }
    Ok(true)
}

fn run_note(service: &mut NoteService<Workspace>, command: NoteCommand) -> Result<bool> {
    match command {
        NoteCommand::Create {
            notebook_id,
            title,
            emoji,
            content,
            images,
            no_images,
        } => {
            let content = content.as_deref().map(input::read_document).transpose()?;
            let result = service.create_note(NewNote {
                title,
                emoji,
                notebook_id,
                content,
                images: input::explicit_images(images, no_images),
            });
            print_envelope(&result)
        }
        NoteCommand::Show { id } => {
            let lookup = service.get_note_by_id(&id);
            print_json(&lookup)?;
            Ok(lookup.success)
        }
        NoteCommand::List { notebook } => {
            let workspace = service.repository();
            let notes = match notebook {
                Some(notebook_id) => workspace.list_notes_in_notebook(&notebook_id),
                None => workspace.list_all_notes(),
            }
            .context("Failed to list notes")?;
            print_json(&notes)?;
            Ok(true)
        }
        NoteCommand::Update {
            id,
            title,
            emoji,
            notebook,
            content,
            images,
            no_images,
        } => {
            let patch = NotePatch {
                title,
                emoji,
                notebook_id: notebook,
                content: content.as_deref().map(input::read_document).transpose()?,
                images: input::explicit_images(images, no_images),
            };
            if patch.is_empty() {
                anyhow::bail!("Nothing to update; pass at least one field");
            }
            print_envelope(&service.update_note(&id, patch))
        }
        NoteCommand::Delete { id } => print_envelope(&service.delete_note(&id)),
    }
}

fn run_favorite(workspace: &mut Workspace, user: &str, command: FavoriteCommand) -> Result<bool> {
    match command {
        FavoriteCommand::Add { note_id } => {
            let result = match workspace.add_favorite(user, &note_id) {
                Ok(favorite) => ActionResult::ok("Added to favorites").with_id(favorite.id),
                Err(e @ (LightNoteError::AlreadyFavorited(_) | LightNoteError::NoteNotFound(_))) => {
                    ActionResult::failed(e.user_message())
                }
                Err(e) => return Err(e).context("Failed to add favorite"),
            };
            print_envelope(&result)
        }
        FavoriteCommand::Remove { note_id } => {
            let removed = workspace
                .remove_favorite(user, &note_id)
                .context("Failed to remove favorite")?;
            let message = if removed {
                "Removed from favorites"
            } else {
                "Not a favorite"
            };
            print_envelope(&ActionResult::ok(message))
        }
        FavoriteCommand::List => {
            print_json(&workspace.list_favorites(user).context("Failed to list favorites")?)?;
            Ok(true)
        }
    }
}

fn print_envelope(result: &ActionResult) -> Result<bool> {
    print_json(result)?;
    Ok(result.success)
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value).context("Failed to serialise output")?;
    println!("{json}");
    Ok(())
}
