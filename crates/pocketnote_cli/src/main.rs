//! Terminal host for the PocketNote shell.
//!
//! # Responsibility
//! - Compose `AppShell` with a stack navigator and terminal dialogs.
//! - Map one subcommand to one list/editor interaction, then shut down.

use clap::{Parser, Subcommand};
use log::debug;
use pocketnote_core::{
    confirmer_for, default_log_level, init_logging, open_store, AlertDialog, AppConfig, AppShell,
    ConfirmDestructiveAction, DialogPresenter, EditorOutcome, HostPlatform, ListStatus,
    PresetConfirm, SavePolicy, StackNavigator,
};
use std::error::Error;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use uuid::Uuid;

#[derive(Debug, Parser)]
#[command(name = "pocketnote", version, about = "List, search and edit notes")]
struct Cli {
    /// SQLite file to use instead of $POCKETNOTE_DB_PATH.
    #[arg(long, global = true)]
    db: Option<PathBuf>,
    /// Confirmation style to emulate: web, ios or android.
    #[arg(long, global = true)]
    platform: Option<String>,
    /// Absolute directory for rotating log files.
    #[arg(long, global = true)]
    log_dir: Option<String>,
    #[arg(long, global = true)]
    log_level: Option<String>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// List notes, optionally filtered by a search string.
    List { query: Option<String> },
    /// Create a note.
    Add {
        #[arg(long)]
        title: String,
        #[arg(long)]
        content: String,
    },
    /// Change the title and/or content of a note.
    Edit {
        id: Uuid,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        content: Option<String>,
    },
    /// Delete a note after confirmation.
    Delete {
        id: Uuid,
        /// Skip the confirmation prompt.
        #[arg(long)]
        yes: bool,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn Error>> {
    if let Some(log_dir) = cli.log_dir.as_deref() {
        let level = cli.log_level.as_deref().unwrap_or(default_log_level());
        init_logging(level, log_dir)?;
    }

    let mut config = AppConfig::from_env()?;
    if let Some(db) = cli.db {
        config.db_path = Some(db);
    }
    if let Some(platform) = cli.platform.as_deref() {
        config.platform = HostPlatform::parse(platform)?;
    }

    let confirm: Box<dyn ConfirmDestructiveAction> = match &cli.command {
        Command::Delete { yes: true, .. } => Box::new(PresetConfirm(true)),
        _ => confirmer_for(config.platform, TerminalPresenter),
    };
    let store = open_store(&config)?;
    let mut shell = AppShell::start(config, store, StackNavigator::new(), confirm)?;
    shell.tick();

    let result = dispatch(&mut shell, cli.command);
    shell.shutdown();
    result
}

fn dispatch(shell: &mut AppShell<StackNavigator>, command: Command) -> Result<(), Box<dyn Error>> {
    match command {
        Command::List { query } => {
            shell.set_query(query.unwrap_or_default());
            print_list(shell);
        }
        Command::Add { title, content } => {
            shell.open_new_note()?;
            shell.tick();
            if let Some(editor) = shell.editor_mut() {
                editor.set_title(title)?;
                editor.set_content(content)?;
            }
            finish_editing(shell)?;
            shell.tick();
            println!("Note created.");
        }
        Command::Edit { id, title, content } => {
            shell.select_note(id)?;
            if let Some(editor) = shell.editor_mut() {
                if let Some(title) = title {
                    editor.set_title(title)?;
                }
                if let Some(content) = content {
                    editor.set_content(content)?;
                }
            }
            finish_editing(shell)?;
            shell.tick();
            println!("Note updated.");
        }
        Command::Delete { id, .. } => {
            shell.select_note(id)?;
            match shell.delete_from_editor()? {
                EditorOutcome::Closed => {
                    shell.tick();
                    println!("Note deleted.");
                }
                EditorOutcome::Active => {
                    shell.go_back()?;
                    println!("Delete cancelled.");
                }
            }
        }
    }
    Ok(())
}

/// Submits buffered editors; live editors already wrote every change.
fn finish_editing(shell: &mut AppShell<StackNavigator>) -> Result<(), Box<dyn Error>> {
    if shell.config().save_policy == SavePolicy::Live {
        shell.go_back()?;
    } else {
        shell.submit_editor()?;
    }
    Ok(())
}

fn print_list(shell: &AppShell<StackNavigator>) {
    match shell.list().status() {
        ListStatus::Loading => println!("Loading..."),
        ListStatus::Unavailable(message) => println!("Notes unavailable: {message}"),
        ListStatus::Ready => {
            let entries = shell.list().entries().unwrap_or_default();
            if entries.is_empty() {
                println!("No notes.");
            }
            for entry in entries {
                println!("{}\t{}\t{}", entry.id, entry.title, entry.preview);
            }
        }
    }
}

/// Prompts on stdout and reads answers from stdin.
struct TerminalPresenter;

impl TerminalPresenter {
    fn ask(prompt: &str) -> Option<String> {
        print!("{prompt} ");
        io::stdout().flush().ok()?;
        let mut line = String::new();
        match io::stdin().lock().read_line(&mut line) {
            Ok(0) | Err(_) => None,
            Ok(_) => Some(line.trim().to_string()),
        }
    }
}

impl DialogPresenter for TerminalPresenter {
    fn show_modal(&mut self, message: &str) -> bool {
        let answer = Self::ask(&format!("{message} [ok/cancel]"));
        debug!("event=dialog module=cli style=modal answered={}", answer.is_some());
        answer.as_deref().is_some_and(modal_accepts)
    }

    fn show_alert(&mut self, alert: &AlertDialog) -> Option<usize> {
        println!("{}", alert.title);
        println!("{}", alert.message);
        for (index, action) in alert.actions.iter().enumerate() {
            println!("  {}) {}", index + 1, action.label);
        }
        let answer = Self::ask("Choose:")?;
        alert_choice(alert, &answer)
    }
}

fn modal_accepts(answer: &str) -> bool {
    matches!(answer.to_ascii_lowercase().as_str(), "ok" | "y" | "yes")
}

/// Maps a 1-based number or an action label to the chosen action index.
fn alert_choice(alert: &AlertDialog, answer: &str) -> Option<usize> {
    if let Ok(number) = answer.parse::<usize>() {
        return number
            .checked_sub(1)
            .filter(|index| *index < alert.actions.len());
    }
    alert
        .actions
        .iter()
        .position(|action| action.label.eq_ignore_ascii_case(answer))
}

#[cfg(test)]
mod tests {
    use super::{alert_choice, modal_accepts, Cli, Command};
    use clap::Parser;
    use pocketnote_core::{AlertDialog, DELETE_NOTE_MESSAGE, DELETE_NOTE_TITLE};

    #[test]
    fn parses_delete_with_yes() {
        let cli = Cli::try_parse_from([
            "pocketnote",
            "--platform",
            "web",
            "delete",
            "67e55044-10b1-426f-9247-bb680e5fe0c8",
            "--yes",
        ])
        .unwrap();
        assert_eq!(cli.platform.as_deref(), Some("web"));
        assert!(matches!(cli.command, Command::Delete { yes: true, .. }));
    }

    #[test]
    fn rejects_malformed_note_id() {
        assert!(Cli::try_parse_from(["pocketnote", "edit", "nope"]).is_err());
    }

    #[test]
    fn modal_accepts_only_affirmative_answers() {
        assert!(modal_accepts("OK"));
        assert!(modal_accepts("yes"));
        assert!(!modal_accepts("cancel"));
        assert!(!modal_accepts(""));
    }

    #[test]
    fn alert_choice_maps_numbers_and_labels() {
        let alert = AlertDialog::destructive(DELETE_NOTE_TITLE, DELETE_NOTE_MESSAGE);
        assert_eq!(alert_choice(&alert, "1"), Some(0));
        assert_eq!(alert_choice(&alert, "2"), Some(1));
        assert_eq!(alert_choice(&alert, "delete"), Some(1));
        assert_eq!(alert_choice(&alert, "Cancel"), Some(0));
        assert_eq!(alert_choice(&alert, "0"), None);
        assert_eq!(alert_choice(&alert, "3"), None);
        assert_eq!(alert_choice(&alert, "maybe"), None);
    }
}
