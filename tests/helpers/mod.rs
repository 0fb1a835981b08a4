use notes_client::domain::{Category, CategoryId, Note, NoteId};
use notes_client::util::testing::{MockNotesApi, MockNotesApiBuilder};

/// Build a note the way the server would return it
#[allow(dead_code)]
pub fn note(id: NoteId, title: &str, archived: bool, category_ids: &[CategoryId]) -> Note {
    Note {
        id,
        title: title.to_string(),
        content: format!("{} body", title),
        category_ids: category_ids.to_vec(),
        archived,
    }
}

#[allow(dead_code)]
pub fn category(id: CategoryId, name: &str) -> Category {
    Category {
        id,
        name: name.to_string(),
    }
}

/// Server state shared by the view tests
///
/// Categories: 1 Work, 2 Home
/// Notes: 1 active [Work], 2 archived [Work], 3 active [Home], 4 active []
#[allow(dead_code)]
pub fn seeded_api() -> MockNotesApiBuilder {
    MockNotesApi::builder()
        .with_category(category(1, "Work"))
        .with_category(category(2, "Home"))
        .with_note(note(1, "Standup", false, &[1]))
        .with_note(note(2, "Old report", true, &[1]))
        .with_note(note(3, "Groceries", false, &[2]))
        .with_note(note(4, "Loose thought", false, &[]))
}

/// Test note ids from the seeded dataset
#[allow(dead_code)]
pub mod test_notes {
    pub const STANDUP: i64 = 1;
    pub const OLD_REPORT: i64 = 2;
    pub const GROCERIES: i64 = 3;
    pub const LOOSE: i64 = 4;

    // For testing error cases
    pub const NONEXISTENT: i64 = 999999999;
}
