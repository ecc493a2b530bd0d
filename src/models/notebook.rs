use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The seeded notebook that always exists in a fresh store.
pub const DEFAULT_NOTEBOOK_ID: &str = "default";
pub const DEFAULT_NOTEBOOK_NAME: &str = "My Notebook";

/// A named container grouping notes.
///
/// The notebook does not carry its note-id list; ownership lives on each
/// note's `notebook_id` and the per-notebook list is derived from it, so the
/// two can never drift apart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Notebook {
    pub id: String,
    pub name: String,
    pub created_at: DateTime<Utc>,
}

impl Notebook {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name: name.into(),
            created_at: Utc::now(),
        }
    }

    /// The notebook seeded when no persisted store exists yet.
    pub fn seed_default() -> Self {
        Self {
            id: DEFAULT_NOTEBOOK_ID.to_string(),
            name: DEFAULT_NOTEBOOK_NAME.to_string(),
            created_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seed_default_uses_the_literal_default_id() {
        let notebook = Notebook::seed_default();
        assert_eq!(notebook.id, DEFAULT_NOTEBOOK_ID);
        assert_eq!(notebook.name, DEFAULT_NOTEBOOK_NAME);
    }

    #[test]
    fn new_notebooks_get_unique_ids() {
        let a = Notebook::new("Work");
        let b = Notebook::new("Work");
        assert_ne!(a.id, b.id);
    }
}
