// src/domain/mod.rs
pub mod category;
pub mod error;
pub mod filter;
pub mod note;

pub use category::{Category, CategoryId};
pub use error::{DomainError, FormError};
pub use filter::{NoteQuery, StatusFilter};
pub use note::{Note, NoteDraft, NoteId};
