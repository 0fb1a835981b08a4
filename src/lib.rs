// src/lib.rs
pub mod application;
pub mod cli;
pub mod domain;
pub mod infrastructure;
pub mod ports;
pub mod util;

use anyhow::{bail, Context, Result};
use std::io::Write;
use tracing::{debug, info};

use crate::application::{CategoryRepository, NoteRepository, NotesView, Outcome, Prompter};
use crate::cli::args::{Args, CategoryCommand, Command};
use crate::domain::StatusFilter;
use crate::infrastructure::config::API_URL_ENV;
use crate::infrastructure::{Config, HttpNotesApi, TerminalPrompter};
use crate::ports::TextPresenter;

pub fn run(args: Args) -> Result<()> {
    debug!(?args, "Starting notes-client with arguments");

    // Initialize infrastructure
    let config = Config::load_or_default(args.config.as_deref())?;
    let env_url = std::env::var(API_URL_ENV).ok();
    let base_url = config.resolve_base_url(args.api_url.as_deref(), env_url.as_deref());
    info!(%base_url, "Using notes API");

    let api = HttpNotesApi::new(&base_url).context("Failed to create HTTP client")?;
    let presenter = TextPresenter::new();

    match args.command {
        Command::Shell => {
            let mut view = NotesView::new(api, TerminalPrompter::interactive());
            cli::shell::run_shell(&mut view, &presenter)
        }
        command => {
            let yes = skips_confirmation(&command);
            let mut view = NotesView::new(api, TerminalPrompter::new().assume_yes(yes));
            let outcome = execute(command, &mut view, &presenter, &mut std::io::stdout())?;
            if outcome == Outcome::Failed {
                bail!("Request to {} failed", base_url);
            }
            Ok(())
        }
    }
}

/// Whether `--yes` was given to a command that would otherwise ask for confirmation.
pub fn skips_confirmation(command: &Command) -> bool {
    matches!(
        command,
        Command::Delete { yes: true, .. }
            | Command::Categories {
                command: CategoryCommand::Delete { yes: true, .. }
            }
    )
}

/// Run one non-interactive command against a fresh view and print the result.
pub fn execute<R, P, W>(
    command: Command,
    view: &mut NotesView<R, P>,
    presenter: &TextPresenter,
    out: &mut W,
) -> Result<Outcome>
where
    R: NoteRepository + CategoryRepository,
    P: Prompter,
    W: Write,
{
    match command {
        Command::List {
            status,
            category,
            json,
        } => {
            view.refresh_categories();
            match category {
                Some(id) => view.set_category_filter(Some(id)),
                None => view.set_status_filter(status),
            }
            ensure_loaded(view)?;
            if json {
                writeln!(out, "{}", presenter.render_json(view.notes())?)?;
            } else {
                write!(out, "{}", presenter.render_notes(view))?;
            }
            Ok(Outcome::Applied)
        }
        Command::Add {
            title,
            content,
            categories,
        } => {
            view.refresh_categories();
            let form = view.form_mut();
            form.set_title(title);
            form.set_content(content);
            form.set_category_ids(categories);
            let outcome = view.submit()?;
            if let (Outcome::Applied, Some(note)) = (outcome, view.notes().last()) {
                let names = view.category_names(note);
                write!(out, "{}", presenter.render_note(note, &names))?;
            }
            Ok(outcome)
        }
        Command::Edit {
            note_id,
            title,
            content,
            categories,
            clear_categories,
        } => {
            load_all(view)?;
            if !view.start_edit(note_id) {
                bail!("Note not found: {}", note_id);
            }
            let form = view.form_mut();
            if let Some(title) = title {
                form.set_title(title);
            }
            if let Some(content) = content {
                form.set_content(content);
            }
            if clear_categories || !categories.is_empty() {
                form.set_category_ids(categories);
            }
            let outcome = view.submit()?;
            if outcome == Outcome::Applied {
                print_note(view, presenter, note_id, out)?;
            }
            Ok(outcome)
        }
        Command::Archive { note_id } => {
            load_all(view)?;
            if view.note(note_id).is_none() {
                bail!("Note not found: {}", note_id);
            }
            let outcome = view.toggle_archive(note_id);
            if outcome == Outcome::Applied {
                print_note(view, presenter, note_id, out)?;
            }
            Ok(outcome)
        }
        Command::Delete { note_id, .. } => {
            load_all(view)?;
            if view.note(note_id).is_none() {
                bail!("Note not found: {}", note_id);
            }
            let outcome = view.delete_note(note_id);
            match outcome {
                Outcome::Applied => writeln!(out, "Deleted note #{}", note_id)?,
                Outcome::Cancelled => writeln!(out, "Cancelled")?,
                Outcome::Failed => {}
            }
            Ok(outcome)
        }
        Command::Categories { command } => {
            view.open_category_manager();
            if let Some(message) = view.category_manager().and_then(|m| m.state().error()) {
                bail!("{}", message);
            }
            let outcome = match command {
                CategoryCommand::List => Outcome::Applied,
                CategoryCommand::Add { name } => view.add_category(&name)?,
                CategoryCommand::Delete { category_id, .. } => {
                    let outcome = view.delete_category(category_id);
                    if outcome == Outcome::Cancelled {
                        writeln!(out, "Cancelled")?;
                    }
                    outcome
                }
            };
            if let Some(manager) = view.category_manager() {
                write!(out, "{}", presenter.render_category_manager(manager))?;
            }
            Ok(outcome)
        }
        Command::Shell => bail!("The shell is interactive, use run() instead"),
    }
}

// Edit, archive and delete look the note up among all notes.
fn load_all<R, P>(view: &mut NotesView<R, P>) -> Result<()>
where
    R: NoteRepository + CategoryRepository,
    P: Prompter,
{
    view.refresh_categories();
    view.set_status_filter(StatusFilter::All);
    ensure_loaded(view)
}

fn ensure_loaded<R, P>(view: &NotesView<R, P>) -> Result<()>
where
    R: NoteRepository + CategoryRepository,
    P: Prompter,
{
    match view.state().error() {
        Some(message) => bail!("{}", message),
        None => Ok(()),
    }
}

fn print_note<R, P, W>(
    view: &NotesView<R, P>,
    presenter: &TextPresenter,
    note_id: domain::NoteId,
    out: &mut W,
) -> Result<()>
where
    R: NoteRepository + CategoryRepository,
    P: Prompter,
    W: Write,
{
    if let Some(note) = view.note(note_id) {
        let names = view.category_names(note);
        write!(out, "{}", presenter.render_note(note, &names))?;
    }
    Ok(())
}
