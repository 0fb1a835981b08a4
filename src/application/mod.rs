// src/application/mod.rs
pub mod category_manager;
pub mod note_form;
pub mod notes_view;
pub mod prompt;
pub mod sequence;
pub mod state;

pub use category_manager::{CategoryManager, CategoryRepository};
pub use note_form::NoteForm;
pub use notes_view::{NoteRepository, NotesView};
pub use prompt::Prompter;
pub use sequence::{LoadTicket, RequestSequence};
pub use state::{LoadState, Outcome};
