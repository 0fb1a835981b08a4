// src/cli/shell.rs
use anyhow::Result;
use std::io;
use std::str::FromStr;
use tracing::debug;

use crate::application::{CategoryRepository, NoteRepository, NotesView, Outcome, Prompter};
use crate::domain::{CategoryId, NoteId, StatusFilter};
use crate::infrastructure::terminal::read_line;
use crate::ports::TextPresenter;

pub const NOTES_HELP: &str = "\
Commands:
  active | archived | all    show notes by status
  category <id> | none       show notes of one category
  new                        create a note
  edit <id>                  edit a note
  archive <id>               archive or unarchive a note
  delete <id>                delete a note
  categories                 open the category manager
  refresh                    reload notes
  help                       show this help
  quit                       exit";

pub const CATEGORIES_HELP: &str = "\
Commands:
  add <name>                 create a category
  delete <id>                delete a category and its notes
  back                       return to notes
  help                       show this help
  quit                       exit";

/// One line typed into the shell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShellCommand {
    Status(StatusFilter),
    Category(Option<CategoryId>),
    New,
    Edit(NoteId),
    Archive(NoteId),
    Delete(NoteId),
    Refresh,
    Categories,
    AddCategory(String),
    Back,
    Help,
    Quit,
}

impl FromStr for ShellCommand {
    type Err = String;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let line = line.trim();
        let (word, rest) = match line.split_once(char::is_whitespace) {
            Some((word, rest)) => (word, rest.trim()),
            None => (line, ""),
        };

        let id = |what: &str| -> Result<i64, String> {
            rest.parse::<i64>()
                .map_err(|_| format!("usage: {} <id>", what))
        };

        match word.to_ascii_lowercase().as_str() {
            "active" | "archived" | "all" => word.parse().map(ShellCommand::Status),
            "category" => match rest {
                "" => Err("usage: category <id> | none".to_string()),
                "none" => Ok(ShellCommand::Category(None)),
                _ => id("category").map(|id| ShellCommand::Category(Some(id))),
            },
            "new" => Ok(ShellCommand::New),
            "edit" => id("edit").map(ShellCommand::Edit),
            "archive" => id("archive").map(ShellCommand::Archive),
            "delete" => id("delete").map(ShellCommand::Delete),
            "refresh" => Ok(ShellCommand::Refresh),
            "categories" => Ok(ShellCommand::Categories),
            "add" if rest.is_empty() => Err("usage: add <name>".to_string()),
            "add" => Ok(ShellCommand::AddCategory(rest.to_string())),
            "back" => Ok(ShellCommand::Back),
            "help" | "?" => Ok(ShellCommand::Help),
            "quit" | "exit" | "q" => Ok(ShellCommand::Quit),
            "" => Err(String::new()),
            other => Err(format!("unknown command '{}', type 'help'", other)),
        }
    }
}

/// Parse a comma or space separated list of category ids.
pub fn parse_ids(input: &str) -> Result<Vec<CategoryId>, String> {
    input
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|part| !part.is_empty())
        .map(|part| {
            part.parse::<CategoryId>()
                .map_err(|_| format!("not a category id: '{}'", part))
        })
        .collect()
}

/// Interactive loop: read a command, apply it to the view, print the view.
pub fn run_shell<R, P>(view: &mut NotesView<R, P>, presenter: &TextPresenter) -> Result<()>
where
    R: NoteRepository + CategoryRepository,
    P: Prompter,
{
    view.mount();
    println!("{}", presenter.render(view));
    println!("Type 'help' for commands.");

    loop {
        let prompt = if view.is_managing_categories() {
            "categories> "
        } else {
            "notes> "
        };
        let Some(line) = read_line(prompt)? else {
            break;
        };

        let command = match line.parse::<ShellCommand>() {
            Ok(command) => command,
            Err(message) => {
                if !message.is_empty() {
                    println!("{}", message);
                }
                continue;
            }
        };
        debug!(?command, "Shell command");

        if command == ShellCommand::Quit {
            break;
        }
        if command == ShellCommand::Help {
            let help = if view.is_managing_categories() {
                CATEGORIES_HELP
            } else {
                NOTES_HELP
            };
            println!("{}", help);
            continue;
        }

        let redraw = if view.is_managing_categories() {
            apply_category_command(view, command)
        } else {
            apply_notes_command(view, presenter, command, &mut read_line)?
        };
        if redraw {
            println!("{}", presenter.render(view));
        }
    }

    Ok(())
}

/// Route a command typed while the category manager is open. Returns whether to redraw.
fn apply_category_command<R, P>(view: &mut NotesView<R, P>, command: ShellCommand) -> bool
where
    R: NoteRepository + CategoryRepository,
    P: Prompter,
{
    match command {
        ShellCommand::AddCategory(name) => {
            if let Err(e) = view.add_category(&name) {
                println!("{}", e);
                return false;
            }
        }
        ShellCommand::Delete(id) => {
            view.delete_category(id);
        }
        ShellCommand::Back => view.close_category_manager(),
        _ => {
            println!("Not available in the category manager, type 'back' first");
            return false;
        }
    }
    true
}

/// Route a command typed on the notes screen. `input` answers the form prompts.
fn apply_notes_command<R, P, I>(
    view: &mut NotesView<R, P>,
    presenter: &TextPresenter,
    command: ShellCommand,
    input: &mut I,
) -> Result<bool>
where
    R: NoteRepository + CategoryRepository,
    P: Prompter,
    I: FnMut(&str) -> io::Result<Option<String>>,
{
    match command {
        ShellCommand::Status(filter) => view.set_status_filter(filter),
        ShellCommand::Category(category) => view.set_category_filter(category),
        ShellCommand::Refresh => view.reload(),
        ShellCommand::Categories => view.open_category_manager(),
        ShellCommand::New => {
            view.cancel_edit();
            return fill_and_submit(view, presenter, input);
        }
        ShellCommand::Edit(id) => {
            if !view.start_edit(id) {
                println!("No note #{} in the current list", id);
                return Ok(false);
            }
            return fill_and_submit(view, presenter, input);
        }
        ShellCommand::Archive(id) => {
            view.toggle_archive(id);
        }
        ShellCommand::Delete(id) => {
            view.delete_note(id);
        }
        _ => {
            println!("Not available here, type 'help'");
            return Ok(false);
        }
    }
    Ok(true)
}

/// Ask for each form field; an empty answer keeps the current value.
fn fill_and_submit<R, P, I>(
    view: &mut NotesView<R, P>,
    presenter: &TextPresenter,
    input: &mut I,
) -> Result<bool>
where
    R: NoteRepository + CategoryRepository,
    P: Prompter,
    I: FnMut(&str) -> io::Result<Option<String>>,
{
    print!("{}", presenter.render_form(view));

    let Some(title) = input("Title: ")? else {
        return Ok(false);
    };
    if !title.is_empty() {
        view.form_mut().set_title(title);
    }

    let Some(content) = input("Content: ")? else {
        return Ok(false);
    };
    if !content.is_empty() {
        view.form_mut().set_content(content);
    }

    let Some(ids) = input("Category ids (comma separated, '-' for none): ")? else {
        return Ok(false);
    };
    match ids.trim() {
        "" => {}
        "-" => view.form_mut().set_category_ids(Vec::new()),
        ids => match parse_ids(ids) {
            Ok(ids) => view.form_mut().set_category_ids(ids),
            Err(message) => {
                println!("{}", message);
                return Ok(false);
            }
        },
    }

    match view.submit() {
        Ok(Outcome::Applied) => Ok(true),
        Ok(_) => Ok(false),
        Err(e) => {
            println!("{}", e);
            Ok(false)
        }
    }
}
