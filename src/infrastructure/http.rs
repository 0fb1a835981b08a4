// src/infrastructure/http.rs
use reqwest::blocking::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, instrument, warn};

use crate::application::{CategoryRepository, NoteRepository};
use crate::domain::{
    Category, CategoryId, DomainError, Note, NoteDraft, NoteId, NoteQuery, StatusFilter,
};

/// Blocking client for the notes HTTP API.
#[derive(Debug, Clone)]
pub struct HttpNotesApi {
    client: Client,
    base_url: String,
}

#[derive(Serialize)]
struct NewCategory<'a> {
    name: &'a str,
}

impl HttpNotesApi {
    pub fn new(base_url: &str) -> Result<Self, DomainError> {
        let client = Client::builder().build()?;
        Ok(Self::with_client(client, base_url))
    }

    pub fn with_client(client: Client, base_url: &str) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Path of the list endpoint serving `query`.
    pub fn notes_path(query: NoteQuery) -> String {
        match query {
            NoteQuery::Status(StatusFilter::Active) => "/api/notes".to_string(),
            NoteQuery::Status(StatusFilter::Archived) => "/api/notes/archived".to_string(),
            NoteQuery::Status(StatusFilter::All) => "/api/notes/all".to_string(),
            NoteQuery::Category(id) => format!("/api/notes/by-category/{}", id),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Send and reject any non-2xx status, whatever the body says.
    fn send(request: RequestBuilder, path: &str) -> Result<Response, DomainError> {
        let response = request.send()?;
        let status = response.status();
        debug!(%status, path, "Received response");
        if !status.is_success() {
            return Err(DomainError::Status {
                status: status.as_u16(),
                path: path.to_string(),
            });
        }
        Ok(response)
    }

    fn json<T: DeserializeOwned>(response: Response) -> Result<T, DomainError> {
        response.json::<T>().map_err(|e| DomainError::InvalidResponse(e.to_string()))
    }

    fn get_value(&self, path: &str) -> Result<serde_json::Value, DomainError> {
        Self::json(Self::send(self.client.get(self.url(path)), path)?)
    }
}

impl NoteRepository for HttpNotesApi {
    #[instrument(level = "debug", skip(self))]
    fn list_notes(&mut self, query: NoteQuery) -> Result<Vec<Note>, DomainError> {
        let path = Self::notes_path(query);
        let value = self.get_value(&path)?;

        if !value.is_array() {
            warn!(path, "Notes response is not an array, showing no notes");
            return Ok(Vec::new());
        }
        serde_json::from_value(value).map_err(|e| DomainError::InvalidResponse(e.to_string()))
    }

    #[instrument(level = "debug", skip(self))]
    fn create_note(&mut self, draft: &NoteDraft) -> Result<Note, DomainError> {
        let path = "/api/notes";
        Self::json(Self::send(self.client.post(self.url(path)).json(draft), path)?)
    }

    #[instrument(level = "debug", skip(self))]
    fn update_note(&mut self, id: NoteId, draft: &NoteDraft) -> Result<Note, DomainError> {
        let path = format!("/api/notes/{}", id);
        Self::json(Self::send(self.client.put(self.url(&path)).json(draft), &path)?)
    }

    #[instrument(level = "debug", skip(self))]
    fn toggle_archive(&mut self, id: NoteId) -> Result<Note, DomainError> {
        let path = format!("/api/notes/{}/archive", id);
        Self::json(Self::send(self.client.patch(self.url(&path)), &path)?)
    }

    #[instrument(level = "debug", skip(self))]
    fn delete_note(&mut self, id: NoteId) -> Result<(), DomainError> {
        let path = format!("/api/notes/{}", id);
        Self::send(self.client.delete(self.url(&path)), &path)?;
        Ok(())
    }
}

impl CategoryRepository for HttpNotesApi {
    #[instrument(level = "debug", skip(self))]
    fn list_categories(&mut self) -> Result<Vec<Category>, DomainError> {
        let path = "/api/categories";
        let value = self.get_value(path)?;

        if !value.is_array() {
            return Err(DomainError::InvalidResponse(
                "Categories is not an array".to_string(),
            ));
        }
        serde_json::from_value(value).map_err(|e| DomainError::InvalidResponse(e.to_string()))
    }

    #[instrument(level = "debug", skip(self))]
    fn create_category(&mut self, name: &str) -> Result<Category, DomainError> {
        let path = "/api/categories";
        let request = self.client.post(self.url(path)).json(&NewCategory { name });
        Self::json(Self::send(request, path)?)
    }

    #[instrument(level = "debug", skip(self))]
    fn delete_category(&mut self, id: CategoryId) -> Result<(), DomainError> {
        let path = format!("/api/categories/{}", id);
        Self::send(self.client.delete(self.url(&path)), &path)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn given_each_query_when_building_path_then_matches_api_routes() {
        assert_eq!(
            HttpNotesApi::notes_path(NoteQuery::Status(StatusFilter::Active)),
            "/api/notes"
        );
        assert_eq!(
            HttpNotesApi::notes_path(NoteQuery::Status(StatusFilter::Archived)),
            "/api/notes/archived"
        );
        assert_eq!(
            HttpNotesApi::notes_path(NoteQuery::Status(StatusFilter::All)),
            "/api/notes/all"
        );
        assert_eq!(
            HttpNotesApi::notes_path(NoteQuery::Category(12)),
            "/api/notes/by-category/12"
        );
    }

    #[test]
    fn given_trailing_slash_when_creating_client_then_base_url_is_trimmed() {
        let api = HttpNotesApi::with_client(Client::new(), "http://localhost:8080//");

        assert_eq!(api.base_url(), "http://localhost:8080");
        assert_eq!(api.url("/api/notes"), "http://localhost:8080/api/notes");
    }
}
