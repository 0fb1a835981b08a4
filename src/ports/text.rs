// src/ports/text.rs
use std::fmt::Write;

use crate::application::{
    CategoryManager, CategoryRepository, LoadState, NoteRepository, NotesView, Prompter,
};
use crate::domain::{Note, StatusFilter};
use crate::util::text::indent;

/// Plain-text rendering of the views for the terminal.
#[derive(Debug, Default)]
pub struct TextPresenter;

impl TextPresenter {
    pub fn new() -> Self {
        Self
    }

    /// Render whichever screen the view is showing.
    pub fn render<R, P>(&self, view: &NotesView<R, P>) -> String
    where
        R: NoteRepository + CategoryRepository,
        P: Prompter,
    {
        match view.category_manager() {
            Some(manager) => self.render_category_manager(manager),
            None => self.render_notes(view),
        }
    }

    pub fn render_notes<R, P>(&self, view: &NotesView<R, P>) -> String
    where
        R: NoteRepository + CategoryRepository,
        P: Prompter,
    {
        let mut out = String::new();

        match view.state() {
            LoadState::Loading => return "Loading notes...\n".to_string(),
            LoadState::Error(message) => return format!("Error: {}\n", message),
            LoadState::Ready => {}
        }

        let _ = writeln!(out, "My notes");
        let _ = writeln!(out, "{}", self.status_line(view.status_filter()));

        let category = view
            .category_filter()
            .map(|id| {
                view.categories()
                    .iter()
                    .find(|c| c.id == id)
                    .map(|c| c.name.clone())
                    .unwrap_or_else(|| format!("#{}", id))
            })
            .unwrap_or_else(|| "All".to_string());
        let _ = writeln!(out, "Filter by category: {}", category);
        let _ = writeln!(out);

        if view.notes().is_empty() {
            let _ = writeln!(out, "No notes to show!!");
        } else {
            for note in view.notes() {
                let names = view.category_names(note);
                out.push_str(&self.render_note(note, &names));
            }
        }

        out
    }

    fn status_line(&self, selected: StatusFilter) -> String {
        StatusFilter::ALL
            .iter()
            .map(|filter| {
                let label = match filter {
                    StatusFilter::Active => "Active notes",
                    StatusFilter::Archived => "Archived notes",
                    StatusFilter::All => "All notes",
                };
                if *filter == selected {
                    format!("[{}]", label)
                } else {
                    format!(" {} ", label)
                }
            })
            .collect::<Vec<_>>()
            .join(" ")
    }

    pub fn render_note(&self, note: &Note, category_names: &[&str]) -> String {
        let mut out = String::new();
        let marker = if note.archived { " [archived]" } else { "" };
        let _ = writeln!(out, "#{} {}{}", note.id, note.title, marker);
        let _ = writeln!(out, "{}", indent(&note.content, "    "));
        if !category_names.is_empty() {
            let _ = writeln!(out, "    Categories: {}", category_names.join(", "));
        }
        out
    }

    /// The create/edit form with its current draft.
    pub fn render_form<R, P>(&self, view: &NotesView<R, P>) -> String
    where
        R: NoteRepository + CategoryRepository,
        P: Prompter,
    {
        let form = view.form();
        let mut out = String::new();
        match form.editing() {
            Some(id) => {
                let _ = writeln!(out, "Editing note #{}", id);
            }
            None => {
                let _ = writeln!(out, "New note");
            }
        }
        let _ = writeln!(out, "Title: {}", form.title());
        let _ = writeln!(out, "Content: {}", form.content());
        let _ = writeln!(out, "Categories:");
        for category in view.categories() {
            let mark = if form.is_selected(category.id) { "x" } else { " " };
            let _ = writeln!(out, "  [{}] {} {}", mark, category.id, category.name);
        }
        let label = if form.editing().is_some() {
            "Save Changes"
        } else {
            "Add new note"
        };
        let _ = writeln!(out, "<{}>", label);
        out
    }

    pub fn render_category_manager(&self, manager: &CategoryManager) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "Categories Manager");

        match manager.state() {
            LoadState::Loading => {
                let _ = writeln!(out, "Loading categories...");
            }
            LoadState::Error(message) => {
                let _ = writeln!(out, "Error: {}", message);
            }
            LoadState::Ready if manager.categories().is_empty() => {
                let _ = writeln!(out, "No categories found");
            }
            LoadState::Ready => {
                for category in manager.categories() {
                    let _ = writeln!(out, "  {} {}", category.id, category.name);
                }
            }
        }
        out
    }

    pub fn render_json(&self, notes: &[Note]) -> serde_json::Result<String> {
        serde_json::to_string_pretty(notes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn given_selected_filter_when_rendering_status_line_then_brackets_it() {
        let presenter = TextPresenter::new();

        let line = presenter.status_line(StatusFilter::Archived);

        assert_eq!(line, " Active notes  [Archived notes]  All notes ");
    }

    #[test]
    fn given_archived_note_with_categories_when_rendering_then_shows_marker_and_names() {
        // Arrange
        let presenter = TextPresenter::new();
        let note = Note {
            id: 3,
            title: "Trip".to_string(),
            content: "Pack bags\nBook hotel".to_string(),
            category_ids: vec![1, 2],
            archived: true,
        };

        // Act
        let text = presenter.render_note(&note, &["Travel", "Home"]);

        // Assert
        assert_eq!(
            text,
            "#3 Trip [archived]\n    Pack bags\n    Book hotel\n    Categories: Travel, Home\n"
        );
    }

    #[test]
    fn given_note_without_resolved_categories_when_rendering_then_omits_category_line() {
        let presenter = TextPresenter::new();
        let note = Note {
            id: 1,
            title: "Plain".to_string(),
            content: "Text".to_string(),
            category_ids: vec![99],
            archived: false,
        };

        let text = presenter.render_note(&note, &[]);

        assert!(!text.contains("Categories:"));
        assert!(!text.contains("[archived]"));
    }
}
