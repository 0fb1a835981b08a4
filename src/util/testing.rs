// src/util/testing.rs

use anyhow::Result;
use std::collections::{HashSet, VecDeque};
use tracing::{debug, info};
use tracing_subscriber::{
    filter::filter_fn,
    fmt::{self, format::FmtSpan},
    prelude::*,
    EnvFilter,
};

use crate::application::{CategoryRepository, NoteRepository, Prompter};
use crate::domain::{Category, CategoryId, DomainError, Note, NoteDraft, NoteId, NoteQuery};

/// Repository operations that can be configured to fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    ListNotes,
    CreateNote,
    UpdateNote,
    ToggleArchive,
    DeleteNote,
    ListCategories,
    CreateCategory,
    DeleteCategory,
}

/// One request as received by [`MockNotesApi`], in call order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    ListNotes(NoteQuery),
    CreateNote(NoteDraft),
    UpdateNote(NoteId, NoteDraft),
    ToggleArchive(NoteId),
    DeleteNote(NoteId),
    ListCategories,
    CreateCategory(String),
    DeleteCategory(CategoryId),
}

/// In-memory stand-in for the notes HTTP API.
///
/// Behaves like the real server (id assignment, status and category
/// filtering, cascading category deletes) and records every call so tests
/// can assert on the requests a view issued.
///
/// # Examples
///
/// ```
/// use notes_client::application::NoteRepository;
/// use notes_client::domain::{Note, NoteQuery, StatusFilter};
/// use notes_client::util::testing::{MockNotesApi, Operation};
///
/// let mut api = MockNotesApi::builder()
///     .with_note(Note {
///         id: 1,
///         title: "Groceries".to_string(),
///         content: "Milk".to_string(),
///         category_ids: vec![],
///         archived: false,
///     })
///     .with_failure(Operation::DeleteNote)
///     .build();
///
/// let notes = api.list_notes(NoteQuery::Status(StatusFilter::Active)).unwrap();
/// assert_eq!(notes.len(), 1);
/// assert!(api.delete_note(1).is_err());
/// ```
pub struct MockNotesApi {
    notes: Vec<Note>,
    categories: Vec<Category>,
    failures: HashSet<Operation>,
    calls: Vec<Call>,
    next_note_id: NoteId,
    next_category_id: CategoryId,
}

impl MockNotesApi {
    pub fn builder() -> MockNotesApiBuilder {
        MockNotesApiBuilder::new()
    }

    pub fn calls(&self) -> &[Call] {
        &self.calls
    }

    pub fn count_calls<F: Fn(&Call) -> bool>(&self, predicate: F) -> usize {
        self.calls.iter().filter(|c| predicate(c)).count()
    }

    pub fn stored_notes(&self) -> &[Note] {
        &self.notes
    }

    pub fn stored_categories(&self) -> &[Category] {
        &self.categories
    }

    fn check(&self, operation: Operation) -> Result<(), DomainError> {
        if self.failures.contains(&operation) {
            return Err(DomainError::Status {
                status: 500,
                path: format!("{:?}", operation),
            });
        }
        Ok(())
    }

    fn not_found(path: String) -> DomainError {
        DomainError::Status { status: 404, path }
    }
}

impl NoteRepository for MockNotesApi {
    fn list_notes(&mut self, query: NoteQuery) -> Result<Vec<Note>, DomainError> {
        self.calls.push(Call::ListNotes(query));
        self.check(Operation::ListNotes)?;

        Ok(self
            .notes
            .iter()
            .filter(|n| match query {
                NoteQuery::Status(filter) => filter.admits(n),
                NoteQuery::Category(id) => n.category_ids.contains(&id),
            })
            .cloned()
            .collect())
    }

    fn create_note(&mut self, draft: &NoteDraft) -> Result<Note, DomainError> {
        self.calls.push(Call::CreateNote(draft.clone()));
        self.check(Operation::CreateNote)?;

        let note = Note {
            id: self.next_note_id,
            title: draft.title.clone(),
            content: draft.content.clone(),
            category_ids: draft.category_ids.clone(),
            archived: false,
        };
        self.next_note_id += 1;
        self.notes.push(note.clone());
        Ok(note)
    }

    fn update_note(&mut self, id: NoteId, draft: &NoteDraft) -> Result<Note, DomainError> {
        self.calls.push(Call::UpdateNote(id, draft.clone()));
        self.check(Operation::UpdateNote)?;

        let note = self
            .notes
            .iter_mut()
            .find(|n| n.id == id)
            .ok_or_else(|| Self::not_found(format!("/api/notes/{}", id)))?;
        note.title = draft.title.clone();
        note.content = draft.content.clone();
        note.category_ids = draft.category_ids.clone();
        Ok(note.clone())
    }

    fn toggle_archive(&mut self, id: NoteId) -> Result<Note, DomainError> {
        self.calls.push(Call::ToggleArchive(id));
        self.check(Operation::ToggleArchive)?;

        let note = self
            .notes
            .iter_mut()
            .find(|n| n.id == id)
            .ok_or_else(|| Self::not_found(format!("/api/notes/{}/archive", id)))?;
        note.archived = !note.archived;
        Ok(note.clone())
    }

    fn delete_note(&mut self, id: NoteId) -> Result<(), DomainError> {
        self.calls.push(Call::DeleteNote(id));
        self.check(Operation::DeleteNote)?;

        let before = self.notes.len();
        self.notes.retain(|n| n.id != id);
        if self.notes.len() == before {
            return Err(Self::not_found(format!("/api/notes/{}", id)));
        }
        Ok(())
    }
}

impl CategoryRepository for MockNotesApi {
    fn list_categories(&mut self) -> Result<Vec<Category>, DomainError> {
        self.calls.push(Call::ListCategories);
        self.check(Operation::ListCategories)?;
        Ok(self.categories.clone())
    }

    fn create_category(&mut self, name: &str) -> Result<Category, DomainError> {
        self.calls.push(Call::CreateCategory(name.to_string()));
        self.check(Operation::CreateCategory)?;

        let category = Category {
            id: self.next_category_id,
            name: name.to_string(),
        };
        self.next_category_id += 1;
        self.categories.push(category.clone());
        Ok(category)
    }

    fn delete_category(&mut self, id: CategoryId) -> Result<(), DomainError> {
        self.calls.push(Call::DeleteCategory(id));
        self.check(Operation::DeleteCategory)?;

        let before = self.categories.len();
        self.categories.retain(|c| c.id != id);
        if self.categories.len() == before {
            return Err(Self::not_found(format!("/api/categories/{}", id)));
        }
        self.notes.retain(|n| !n.category_ids.contains(&id));
        Ok(())
    }
}

/// Builder for MockNotesApi
///
/// Provides a fluent interface for seeding server state and failures.
pub struct MockNotesApiBuilder {
    notes: Vec<Note>,
    categories: Vec<Category>,
    failures: HashSet<Operation>,
}

impl MockNotesApiBuilder {
    pub fn new() -> Self {
        Self {
            notes: Vec::new(),
            categories: Vec::new(),
            failures: HashSet::new(),
        }
    }

    /// Seed a note as if it already existed on the server
    pub fn with_note(mut self, note: Note) -> Self {
        self.notes.push(note);
        self
    }

    pub fn with_category(mut self, category: Category) -> Self {
        self.categories.push(category);
        self
    }

    /// Make every call of `operation` fail with a server error
    pub fn with_failure(mut self, operation: Operation) -> Self {
        self.failures.insert(operation);
        self
    }

    pub fn build(self) -> MockNotesApi {
        let next_note_id = self.notes.iter().map(|n| n.id).max().unwrap_or(0) + 1;
        let next_category_id = self.categories.iter().map(|c| c.id).max().unwrap_or(0) + 1;
        MockNotesApi {
            notes: self.notes,
            categories: self.categories,
            failures: self.failures,
            calls: Vec::new(),
            next_note_id,
            next_category_id,
        }
    }
}

impl Default for MockNotesApiBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Prompter that answers confirmations from a script and records everything shown.
#[derive(Debug, Default)]
pub struct ScriptedPrompter {
    answers: VecDeque<bool>,
    default_answer: bool,
    confirmations: Vec<String>,
    alerts: Vec<String>,
}

impl ScriptedPrompter {
    /// Declines every confirmation unless configured otherwise
    pub fn new() -> Self {
        Self::default()
    }

    /// Answer every confirmation without a queued answer with `answer`
    pub fn answering(mut self, answer: bool) -> Self {
        self.default_answer = answer;
        self
    }

    /// Queue answers consumed in order before falling back to the default
    pub fn with_answers(mut self, answers: impl IntoIterator<Item = bool>) -> Self {
        self.answers.extend(answers);
        self
    }

    pub fn confirmations(&self) -> &[String] {
        &self.confirmations
    }

    pub fn alerts(&self) -> &[String] {
        &self.alerts
    }
}

impl Prompter for ScriptedPrompter {
    fn confirm(&mut self, message: &str) -> bool {
        self.confirmations.push(message.to_string());
        self.answers.pop_front().unwrap_or(self.default_answer)
    }

    fn alert(&mut self, message: &str) {
        self.alerts.push(message.to_string());
    }
}

pub fn init_test_setup() -> Result<()> {
    // Set up logging first
    setup_test_logging();

    info!("Test Setup complete");
    Ok(())
}

fn setup_test_logging() {
    debug!("INIT: Attempting logger init from testing.rs");

    // Create a filter for noisy modules
    let noisy_modules = ["hyper", "reqwest", "rustls", "mio", "wiremock"];
    let module_filter = filter_fn(move |metadata| {
        !noisy_modules
            .iter()
            .any(|name| metadata.target().starts_with(name))
    });

    // Set up the subscriber with environment filter
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"));

    // Build and set the subscriber
    let subscriber = tracing_subscriber::registry().with(
        fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(true)
            .with_thread_names(false)
            .with_span_events(FmtSpan::CLOSE)
            .with_filter(module_filter)
            .with_filter(env_filter),
    );

    // Only set if we haven't already set a global subscriber
    if tracing::dispatcher::has_been_set() {
        debug!("Tracing subscriber already set");
    } else {
        subscriber.try_init().unwrap_or_else(|e| {
            eprintln!("Error: Failed to set up logging: {}", e);
        });
    }
}
