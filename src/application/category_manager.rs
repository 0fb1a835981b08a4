// src/application/category_manager.rs
use tracing::{debug, info, warn};

use crate::application::{LoadState, Outcome, Prompter};
use crate::domain::{Category, CategoryId, DomainError, FormError};

pub const CATEGORIES_LOAD_ERROR: &str = "Error fetching categories";
pub const CATEGORY_ADD_ERROR: &str = "Error adding category";
pub const CATEGORY_DELETE_ERROR: &str = "Error deleting category";
pub const CATEGORY_DELETE_PROMPT: &str =
    "Are you sure you want to delete this category? IT WILL DELETE ALL NOTES WITH THIS CATEGORY!";

pub trait CategoryRepository {
    fn list_categories(&mut self) -> Result<Vec<Category>, DomainError>;

    fn create_category(&mut self, name: &str) -> Result<Category, DomainError>;

    /// Deleting a category also deletes every note that references it (server side).
    fn delete_category(&mut self, id: CategoryId) -> Result<(), DomainError>;
}

/// Category management screen.
///
/// Holds only view state; the repository and prompter are lent by the owning
/// [`NotesView`](crate::application::NotesView) on every call. An
/// [`Outcome::Applied`] result is the change notification the owner reacts to.
#[derive(Debug)]
pub struct CategoryManager {
    categories: Vec<Category>,
    name_input: String,
    state: LoadState,
}

impl CategoryManager {
    pub fn new() -> Self {
        Self {
            categories: Vec::new(),
            name_input: String::new(),
            state: LoadState::Loading,
        }
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    pub fn state(&self) -> &LoadState {
        &self.state
    }

    pub fn name_input(&self) -> &str {
        &self.name_input
    }

    pub fn set_name_input(&mut self, name: impl Into<String>) {
        self.name_input = name.into();
    }

    pub fn mount<R: CategoryRepository>(&mut self, repository: &mut R) {
        self.state = LoadState::Loading;
        match repository.list_categories() {
            Ok(categories) => {
                debug!(count = categories.len(), "Loaded categories");
                self.categories = categories;
                self.state = LoadState::Ready;
            }
            Err(e) => {
                warn!(error = %e, "Failed to load categories");
                self.categories.clear();
                self.state = LoadState::Error(CATEGORIES_LOAD_ERROR.to_string());
            }
        }
    }

    /// Create a category from the current name input.
    pub fn add<R, P>(&mut self, repository: &mut R, prompter: &mut P) -> Result<Outcome, FormError>
    where
        R: CategoryRepository,
        P: Prompter,
    {
        let name = self.name_input.trim();
        if name.is_empty() {
            return Err(FormError::EmptyCategoryName);
        }

        match repository.create_category(name) {
            Ok(category) => {
                info!(id = category.id, name = %category.name, "Created category");
                self.categories.push(category);
                self.name_input.clear();
                Ok(Outcome::Applied)
            }
            Err(e) => {
                warn!(error = %e, "Failed to create category");
                prompter.alert(CATEGORY_ADD_ERROR);
                Ok(Outcome::Failed)
            }
        }
    }

    pub fn delete<R, P>(&mut self, repository: &mut R, prompter: &mut P, id: CategoryId) -> Outcome
    where
        R: CategoryRepository,
        P: Prompter,
    {
        if !prompter.confirm(CATEGORY_DELETE_PROMPT) {
            debug!(id, "Category deletion declined");
            return Outcome::Cancelled;
        }

        match repository.delete_category(id) {
            Ok(()) => {
                info!(id, "Deleted category");
                self.categories.retain(|c| c.id != id);
                Outcome::Applied
            }
            Err(e) => {
                warn!(id, error = %e, "Failed to delete category");
                prompter.alert(CATEGORY_DELETE_ERROR);
                Outcome::Failed
            }
        }
    }
}

impl Default for CategoryManager {
    fn default() -> Self {
        Self::new()
    }
}
