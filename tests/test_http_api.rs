use anyhow::Result;
use notes_client::application::{CategoryRepository, NoteRepository};
use notes_client::domain::{DomainError, NoteDraft, NoteQuery, StatusFilter};
use notes_client::infrastructure::HttpNotesApi;
use serde_json::json;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Run blocking client code off the async test runtime
async fn with_api<T, F>(server: &MockServer, f: F) -> Result<T>
where
    T: Send + 'static,
    F: FnOnce(&mut HttpNotesApi) -> T + Send + 'static,
{
    let uri = server.uri();
    let value = tokio::task::spawn_blocking(move || -> Result<T> {
        let mut api = HttpNotesApi::new(&uri)?;
        Ok(f(&mut api))
    })
    .await??;
    Ok(value)
}

fn note_json(id: i64, title: &str, archived: bool) -> serde_json::Value {
    json!({
        "id": id,
        "title": title,
        "content": format!("{} body", title),
        "categoryIds": [1],
        "archived": archived
    })
}

#[tokio::test]
async fn given_each_status_filter_when_listing_then_hits_matching_endpoint() -> Result<()> {
    // Arrange
    let server = MockServer::start().await;
    for (route, id) in [
        ("/api/notes", 1),
        ("/api/notes/archived", 2),
        ("/api/notes/all", 3),
    ] {
        Mock::given(method("GET"))
            .and(path(route))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!([note_json(id, "n", false)])),
            )
            .expect(1)
            .mount(&server)
            .await;
    }

    // Act
    let ids = with_api(&server, |api| {
        StatusFilter::ALL
            .iter()
            .map(|filter| {
                api.list_notes(NoteQuery::Status(*filter))
                    .map(|notes| notes[0].id)
            })
            .collect::<Result<Vec<_>, DomainError>>()
    })
    .await??;

    // Assert
    assert_eq!(ids, vec![1, 2, 3]);
    Ok(())
}

#[tokio::test]
async fn given_category_query_when_listing_then_uses_by_category_route() -> Result<()> {
    // Arrange
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/notes/by-category/5"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            note_json(1, "Tagged", false),
            note_json(2, "Tagged too", true)
        ])))
        .expect(1)
        .mount(&server)
        .await;

    // Act
    let notes = with_api(&server, |api| api.list_notes(NoteQuery::Category(5))).await??;

    // Assert
    assert_eq!(notes.len(), 2);
    assert!(notes[1].archived);
    assert_eq!(notes[0].category_ids, vec![1]);
    Ok(())
}

#[tokio::test]
async fn given_non_array_body_when_listing_notes_then_returns_empty_list() -> Result<()> {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/notes"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"message": "nothing"})))
        .mount(&server)
        .await;

    let notes = with_api(&server, |api| {
        api.list_notes(NoteQuery::Status(StatusFilter::Active))
    })
    .await??;

    assert!(notes.is_empty());
    Ok(())
}

#[tokio::test]
async fn given_server_error_when_listing_then_returns_status_error() -> Result<()> {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/notes/all"))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!([])))
        .mount(&server)
        .await;

    let result = with_api(&server, |api| {
        api.list_notes(NoteQuery::Status(StatusFilter::All))
    })
    .await?;

    match result {
        Err(DomainError::Status { status, path }) => {
            assert_eq!(status, 500);
            assert_eq!(path, "/api/notes/all");
        }
        other => panic!("Expected status error, got {:?}", other),
    }
    Ok(())
}

#[tokio::test]
async fn given_draft_when_creating_then_posts_camel_case_body() -> Result<()> {
    // Arrange
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/notes"))
        .and(body_json(json!({
            "title": "Plan",
            "content": "Plan body",
            "categoryIds": [1]
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(note_json(10, "Plan", false)))
        .expect(1)
        .mount(&server)
        .await;
    let draft = NoteDraft {
        title: "Plan".to_string(),
        content: "Plan body".to_string(),
        category_ids: vec![1],
    };

    // Act
    let created = with_api(&server, move |api| api.create_note(&draft)).await??;

    // Assert
    assert_eq!(created.id, 10);
    assert_eq!(created.title, "Plan");
    Ok(())
}

#[tokio::test]
async fn given_draft_when_updating_then_puts_to_note_route() -> Result<()> {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/api/notes/4"))
        .and(body_json(json!({"title": "New", "content": "New body", "categoryIds": []})))
        .respond_with(ResponseTemplate::new(200).set_body_json(note_json(4, "New", false)))
        .expect(1)
        .mount(&server)
        .await;
    let draft = NoteDraft {
        title: "New".to_string(),
        content: "New body".to_string(),
        category_ids: vec![],
    };

    let updated = with_api(&server, move |api| api.update_note(4, &draft)).await??;

    assert_eq!(updated.id, 4);
    assert_eq!(updated.title, "New");
    Ok(())
}

#[tokio::test]
async fn given_note_when_toggling_archive_then_patches_and_returns_note() -> Result<()> {
    let server = MockServer::start().await;
    Mock::given(method("PATCH"))
        .and(path("/api/notes/3/archive"))
        .respond_with(ResponseTemplate::new(200).set_body_json(note_json(3, "Done", true)))
        .expect(1)
        .mount(&server)
        .await;

    let note = with_api(&server, |api| api.toggle_archive(3)).await??;

    assert!(note.archived);
    Ok(())
}

#[tokio::test]
async fn given_empty_no_content_response_when_deleting_note_then_succeeds() -> Result<()> {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/api/notes/8"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    with_api(&server, |api| api.delete_note(8)).await??;

    Ok(())
}

#[tokio::test]
async fn given_not_found_when_deleting_note_then_returns_error_regardless_of_body() -> Result<()> {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/api/notes/8"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({"deleted": true})))
        .mount(&server)
        .await;

    let result = with_api(&server, |api| api.delete_note(8)).await?;

    assert!(matches!(result, Err(DomainError::Status { status: 404, .. })));
    Ok(())
}

#[tokio::test]
async fn given_categories_when_listing_then_parses_them() -> Result<()> {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/categories"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"id": 1, "name": "Work"},
            {"id": 2, "name": "Home"}
        ])))
        .mount(&server)
        .await;

    let categories = with_api(&server, |api| api.list_categories()).await??;

    assert_eq!(categories.len(), 2);
    assert_eq!(categories[1].name, "Home");
    Ok(())
}

#[tokio::test]
async fn given_non_array_body_when_listing_categories_then_returns_error() -> Result<()> {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/categories"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": 1})))
        .mount(&server)
        .await;

    let result = with_api(&server, |api| api.list_categories()).await?;

    assert!(matches!(result, Err(DomainError::InvalidResponse(_))));
    Ok(())
}

#[tokio::test]
async fn given_name_when_creating_category_then_posts_name() -> Result<()> {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/categories"))
        .and(body_json(json!({"name": "Ideas"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": 9, "name": "Ideas"})))
        .expect(1)
        .mount(&server)
        .await;

    let category = with_api(&server, |api| api.create_category("Ideas")).await??;

    assert_eq!(category.id, 9);
    Ok(())
}

#[tokio::test]
async fn given_category_when_deleting_then_sends_delete() -> Result<()> {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/api/categories/9"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    with_api(&server, |api| api.delete_category(9)).await??;

    Ok(())
}

#[tokio::test]
async fn given_unreachable_server_when_listing_then_returns_network_error() -> Result<()> {
    // Arrange - bind and release a port so nothing listens on it
    let port = std::net::TcpListener::bind("127.0.0.1:0")?.local_addr()?.port();
    let uri = format!("http://127.0.0.1:{}", port);

    // Act
    let result = tokio::task::spawn_blocking(move || -> Result<_> {
        let mut api = HttpNotesApi::new(&uri)?;
        Ok(api.list_categories())
    })
    .await??;

    // Assert
    assert!(matches!(result, Err(DomainError::Network(_))));
    Ok(())
}
