// src/application/notes_view.rs
use tracing::{debug, info, instrument, warn};

use crate::application::{
    CategoryManager, CategoryRepository, LoadState, LoadTicket, NoteForm, Outcome, Prompter,
    RequestSequence,
};
use crate::domain::{
    Category, CategoryId, DomainError, FormError, Note, NoteDraft, NoteId, NoteQuery, StatusFilter,
};

pub const NOTES_LOAD_ERROR: &str = "Error fetching notes";
pub const NOTE_CREATE_ERROR: &str = "Error creating note";
pub const NOTE_UPDATE_ERROR: &str = "Error updating note";
pub const NOTE_ARCHIVE_ERROR: &str = "Error changing archive status";
pub const NOTE_DELETE_ERROR: &str = "Error when deleting note";
pub const NOTE_DELETE_PROMPT: &str = "Are you sure you want to delete this note?";

pub trait NoteRepository {
    fn list_notes(&mut self, query: NoteQuery) -> Result<Vec<Note>, DomainError>;

    fn create_note(&mut self, draft: &NoteDraft) -> Result<Note, DomainError>;

    /// Replace title, content and categories of an existing note
    fn update_note(&mut self, id: NoteId, draft: &NoteDraft) -> Result<Note, DomainError>;

    /// Flip the archived flag and return the note as the server now sees it
    fn toggle_archive(&mut self, id: NoteId) -> Result<Note, DomainError>;

    fn delete_note(&mut self, id: NoteId) -> Result<(), DomainError>;
}

/// Root view: the filtered note list, the note form, and the category
/// manager screen when it is open.
pub struct NotesView<R, P>
where
    R: NoteRepository + CategoryRepository,
    P: Prompter,
{
    repository: R,
    prompter: P,
    status: StatusFilter,
    category: Option<CategoryId>,
    notes: Vec<Note>,
    categories: Vec<Category>,
    state: LoadState,
    form: NoteForm,
    category_manager: Option<CategoryManager>,
    loads: RequestSequence,
}

impl<R, P> NotesView<R, P>
where
    R: NoteRepository + CategoryRepository,
    P: Prompter,
{
    pub fn new(repository: R, prompter: P) -> Self {
        Self {
            repository,
            prompter,
            status: StatusFilter::default(),
            category: None,
            notes: Vec::new(),
            categories: Vec::new(),
            state: LoadState::Loading,
            form: NoteForm::new(),
            category_manager: None,
            loads: RequestSequence::new(),
        }
    }

    pub fn mount(&mut self) {
        self.refresh_categories();
        self.reload();
    }

    pub fn notes(&self) -> &[Note] {
        &self.notes
    }

    pub fn note(&self, id: NoteId) -> Option<&Note> {
        self.notes.iter().find(|n| n.id == id)
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    pub fn state(&self) -> &LoadState {
        &self.state
    }

    pub fn status_filter(&self) -> StatusFilter {
        self.status
    }

    pub fn category_filter(&self) -> Option<CategoryId> {
        self.category
    }

    /// The request backing the displayed list. A category filter wins over the status filter.
    pub fn query(&self) -> NoteQuery {
        match self.category {
            Some(id) => NoteQuery::Category(id),
            None => NoteQuery::Status(self.status),
        }
    }

    pub fn form(&self) -> &NoteForm {
        &self.form
    }

    pub fn form_mut(&mut self) -> &mut NoteForm {
        &mut self.form
    }

    pub fn repository(&self) -> &R {
        &self.repository
    }

    pub fn prompter(&self) -> &P {
        &self.prompter
    }

    pub fn prompter_mut(&mut self) -> &mut P {
        &mut self.prompter
    }

    /// Names of the note's categories that are known locally, in the note's order.
    pub fn category_names(&self, note: &Note) -> Vec<&str> {
        note.category_ids
            .iter()
            .filter_map(|id| self.categories.iter().find(|c| c.id == *id))
            .map(|c| c.name.as_str())
            .collect()
    }

    pub fn set_status_filter(&mut self, filter: StatusFilter) {
        debug!(%filter, "Status filter selected");
        self.status = filter;
        self.category = None;
        self.reload();
    }

    pub fn set_category_filter(&mut self, category: Option<CategoryId>) {
        debug!(?category, "Category filter selected");
        self.category = category;
        self.reload();
    }

    /// Fetch the current query and replace the list with the response.
    pub fn reload(&mut self) {
        let ticket = self.begin_load();
        let query = self.query();
        let result = self.repository.list_notes(query);
        self.finish_load(ticket, result);
    }

    /// Start a load and hand out its ticket. `reload` pairs this with
    /// `finish_load` at once; callers that interleave loads use the two halves.
    pub fn begin_load(&mut self) -> LoadTicket {
        self.state = LoadState::Loading;
        self.loads.issue()
    }

    /// Apply a list response. Returns `false` when a newer load has been
    /// started since `ticket` was issued; the response is then dropped.
    pub fn finish_load(
        &mut self,
        ticket: LoadTicket,
        result: Result<Vec<Note>, DomainError>,
    ) -> bool {
        if !self.loads.is_current(ticket) {
            debug!(?ticket, "Discarding stale notes response");
            return false;
        }

        match result {
            Ok(notes) => {
                debug!(count = notes.len(), query = ?self.query(), "Loaded notes");
                self.notes = notes;
                self.state = LoadState::Ready;
            }
            Err(e) => {
                warn!(error = %e, "Failed to load notes");
                self.state = LoadState::Error(NOTES_LOAD_ERROR.to_string());
            }
        }
        true
    }

    pub fn refresh_categories(&mut self) {
        match self.repository.list_categories() {
            Ok(categories) => self.categories = categories,
            Err(e) => warn!(error = %e, "Failed to refresh categories, keeping previous list"),
        }
    }

    /// Load a displayed note into the form. Returns `false` if the note is not listed.
    pub fn start_edit(&mut self, id: NoteId) -> bool {
        match self.notes.iter().find(|n| n.id == id) {
            Some(note) => {
                self.form.fill_from(note);
                true
            }
            None => false,
        }
    }

    pub fn cancel_edit(&mut self) {
        self.form.clear();
    }

    /// Create or update depending on the form's edit mode.
    #[instrument(level = "debug", skip(self))]
    pub fn submit(&mut self) -> Result<Outcome, FormError> {
        let draft = self.form.to_draft()?;

        let outcome = match self.form.editing() {
            Some(id) => match self.repository.update_note(id, &draft) {
                Ok(updated) => {
                    info!(id, "Updated note");
                    for note in self.notes.iter_mut().filter(|n| n.id == id) {
                        *note = updated.clone();
                    }
                    self.form.clear();
                    Outcome::Applied
                }
                Err(e) => {
                    warn!(id, error = %e, "Failed to update note");
                    self.prompter.alert(NOTE_UPDATE_ERROR);
                    Outcome::Failed
                }
            },
            None => match self.repository.create_note(&draft) {
                Ok(created) => {
                    info!(id = created.id, "Created note");
                    self.notes.push(created);
                    self.form.clear();
                    Outcome::Applied
                }
                Err(e) => {
                    warn!(error = %e, "Failed to create note");
                    self.prompter.alert(NOTE_CREATE_ERROR);
                    Outcome::Failed
                }
            },
        };
        Ok(outcome)
    }

    #[instrument(level = "debug", skip(self))]
    pub fn toggle_archive(&mut self, id: NoteId) -> Outcome {
        match self.repository.toggle_archive(id) {
            Ok(updated) => {
                info!(id, archived = updated.archived, "Archive status changed");
                // The status filter decides even while a category filter is active.
                if self.status.admits(&updated) {
                    for note in self.notes.iter_mut().filter(|n| n.id == updated.id) {
                        *note = updated.clone();
                    }
                } else {
                    self.notes.retain(|n| n.id != updated.id);
                }
                Outcome::Applied
            }
            Err(e) => {
                warn!(id, error = %e, "Failed to toggle archive status");
                self.prompter.alert(NOTE_ARCHIVE_ERROR);
                Outcome::Failed
            }
        }
    }

    #[instrument(level = "debug", skip(self))]
    pub fn delete_note(&mut self, id: NoteId) -> Outcome {
        if !self.prompter.confirm(NOTE_DELETE_PROMPT) {
            debug!(id, "Note deletion declined");
            return Outcome::Cancelled;
        }

        match self.repository.delete_note(id) {
            Ok(()) => {
                info!(id, "Deleted note");
                self.notes.retain(|n| n.id != id);
                Outcome::Applied
            }
            Err(e) => {
                warn!(id, error = %e, "Failed to delete note");
                self.prompter.alert(NOTE_DELETE_ERROR);
                Outcome::Failed
            }
        }
    }

    pub fn is_managing_categories(&self) -> bool {
        self.category_manager.is_some()
    }

    pub fn category_manager(&self) -> Option<&CategoryManager> {
        self.category_manager.as_ref()
    }

    pub fn open_category_manager(&mut self) {
        let mut manager = CategoryManager::new();
        manager.mount(&mut self.repository);
        self.category_manager = Some(manager);
    }

    /// Add a category through the open manager. Does nothing when it is closed.
    pub fn add_category(&mut self, name: &str) -> Result<Outcome, FormError> {
        let Some(manager) = self.category_manager.as_mut() else {
            return Ok(Outcome::Cancelled);
        };
        manager.set_name_input(name);
        let outcome = manager.add(&mut self.repository, &mut self.prompter)?;
        if outcome.is_applied() {
            self.categories_changed();
        }
        Ok(outcome)
    }

    /// Delete a category through the open manager. Does nothing when it is closed.
    pub fn delete_category(&mut self, id: CategoryId) -> Outcome {
        let Some(manager) = self.category_manager.as_mut() else {
            return Outcome::Cancelled;
        };
        let outcome = manager.delete(&mut self.repository, &mut self.prompter, id);
        if outcome.is_applied() {
            if self.category == Some(id) {
                self.category = None;
            }
            self.categories_changed();
        }
        outcome
    }

    /// Return to the note list, re-fetching categories and the status filter's notes.
    pub fn close_category_manager(&mut self) {
        if self.category_manager.take().is_none() {
            return;
        }
        self.category = None;
        self.refresh_categories();
        self.reload();
    }

    // Deleting a category may have deleted notes too.
    fn categories_changed(&mut self) {
        debug!("Categories changed, refreshing notes view");
        self.refresh_categories();
        self.reload();
    }
}
