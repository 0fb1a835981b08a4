// src/application/note_form.rs
use crate::domain::{CategoryId, FormError, Note, NoteDraft, NoteId};

/// Create/edit form owned by the notes view.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NoteForm {
    title: String,
    content: String,
    category_ids: Vec<CategoryId>,
    editing: Option<NoteId>,
}

impl NoteForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn category_ids(&self) -> &[CategoryId] {
        &self.category_ids
    }

    pub fn editing(&self) -> Option<NoteId> {
        self.editing
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = title.into();
    }

    pub fn set_content(&mut self, content: impl Into<String>) {
        self.content = content.into();
    }

    pub fn set_category_ids(&mut self, ids: impl IntoIterator<Item = CategoryId>) {
        self.category_ids.clear();
        for id in ids {
            if !self.category_ids.contains(&id) {
                self.category_ids.push(id);
            }
        }
    }

    /// Checkbox behaviour: selects the id if absent, deselects it otherwise.
    pub fn toggle_category(&mut self, id: CategoryId) {
        if let Some(pos) = self.category_ids.iter().position(|c| *c == id) {
            self.category_ids.remove(pos);
        } else {
            self.category_ids.push(id);
        }
    }

    pub fn is_selected(&self, id: CategoryId) -> bool {
        self.category_ids.contains(&id)
    }

    /// Pre-fill from an existing note and enter edit mode.
    pub fn fill_from(&mut self, note: &Note) {
        self.title = note.title.clone();
        self.content = note.content.clone();
        self.set_category_ids(note.category_ids.iter().copied());
        self.editing = Some(note.id);
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    pub fn to_draft(&self) -> Result<NoteDraft, FormError> {
        if self.title.trim().is_empty() {
            return Err(FormError::EmptyTitle);
        }
        if self.content.trim().is_empty() {
            return Err(FormError::EmptyContent);
        }
        Ok(NoteDraft {
            title: self.title.clone(),
            content: self.content.clone(),
            category_ids: self.category_ids.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn given_blank_title_when_building_draft_then_rejects() {
        let mut form = NoteForm::new();
        form.set_title("   ");
        form.set_content("body");

        assert_eq!(form.to_draft(), Err(FormError::EmptyTitle));
    }

    #[test]
    fn given_empty_content_when_building_draft_then_rejects() {
        let mut form = NoteForm::new();
        form.set_title("title");

        assert_eq!(form.to_draft(), Err(FormError::EmptyContent));
    }

    #[test]
    fn given_category_toggled_twice_when_reading_then_deselected() {
        let mut form = NoteForm::new();

        form.toggle_category(3);
        assert!(form.is_selected(3));

        form.toggle_category(3);
        assert!(!form.is_selected(3));
        assert!(form.category_ids().is_empty());
    }

    #[test]
    fn given_note_when_filling_then_enters_edit_mode_with_its_fields() {
        // Arrange
        let note = Note {
            id: 42,
            title: "Plan".to_string(),
            content: "Write it down".to_string(),
            category_ids: vec![1, 1, 2],
            archived: false,
        };
        let mut form = NoteForm::new();

        // Act
        form.fill_from(&note);

        // Assert
        assert_eq!(form.editing(), Some(42));
        assert_eq!(form.title(), "Plan");
        assert_eq!(form.category_ids(), &[1, 2]);

        form.clear();
        assert_eq!(form, NoteForm::default());
    }
}
