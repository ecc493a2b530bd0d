use chrono::{DateTime, Utc};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Title given to every freshly created note.
pub const DEFAULT_NOTE_TITLE: &str = "Untitled Note";

/// Placeholder content for a freshly created note.
pub const DEFAULT_NOTE_CONTENT: &str = "Start typing your note here...";

static MD_IMAGE: Lazy<Regex> = Lazy::new(|| Regex::new(r"!\[([^\]]*)\]\([^)]*\)").unwrap());
static MD_LINK: Lazy<Regex> = Lazy::new(|| Regex::new(r"\[([^\]]*)\]\([^)]*\)").unwrap());
static MD_SYNTAX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?m)^#{1,6}\s+|^\s*[-+*]\s+|^\s*>\s?|[*_~`]").unwrap());

/// A titled rich-text (Markdown) document owned by exactly one notebook.
///
/// `linked_notes` is consumed only by the graph view and is never validated
/// for existence or reciprocity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Note {
    pub id: String,
    pub title: String,
    pub content: String,
    pub notebook_id: String,
    pub created_at: DateTime<Utc>,
    pub modified_at: DateTime<Utc>,
    pub tags: Vec<String>,
    pub linked_notes: Vec<String>,
}

impl Note {
    pub fn new(notebook_id: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4().to_string(),
            title: DEFAULT_NOTE_TITLE.to_string(),
            content: DEFAULT_NOTE_CONTENT.to_string(),
            notebook_id: notebook_id.into(),
            created_at: now,
            modified_at: now,
            tags: Vec::new(),
            linked_notes: Vec::new(),
        }
    }

    /// Overwrites title and content from the editing surface and refreshes
    /// the modification timestamp.
    pub fn update(&mut self, title: impl Into<String>, content: impl Into<String>) {
        self.title = title.into();
        self.content = content.into();
        self.modified_at = Utc::now();
    }

    pub fn add_link(&mut self, target_id: impl Into<String>) {
        let target_id = target_id.into();
        if !self.linked_notes.contains(&target_id) {
            self.linked_notes.push(target_id);
            self.modified_at = Utc::now();
        }
    }

    /// Content with Markdown syntax stripped. Used for the word count and
    /// plain-text export; search deliberately runs over the raw markup
    /// instead.
    pub fn plain_text(&self) -> String {
        let text = MD_IMAGE.replace_all(&self.content, "$1");
        let text = MD_LINK.replace_all(&text, "$1");
        MD_SYNTAX.replace_all(&text, "").into_owned()
    }

    pub fn word_count(&self) -> usize {
        self.plain_text()
            .split_whitespace()
            .filter(|w| !w.is_empty())
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_note_uses_placeholder_title_and_content() {
        let note = Note::new("default");
        assert_eq!(note.title, DEFAULT_NOTE_TITLE);
        assert_eq!(note.content, DEFAULT_NOTE_CONTENT);
        assert_eq!(note.notebook_id, "default");
        assert!(note.tags.is_empty());
        assert!(note.linked_notes.is_empty());
    }

    #[test]
    fn plain_text_strips_markup_but_keeps_link_text() {
        let mut note = Note::new("default");
        note.content = "# Heading\n\nSome **bold** text with a [link](https://example.com) \
                        and an ![image](shot.png)."
            .to_string();
        let plain = note.plain_text();
        assert!(plain.contains("Heading"));
        assert!(plain.contains("bold"));
        assert!(plain.contains("link"));
        assert!(plain.contains("image"));
        assert!(!plain.contains('#'));
        assert!(!plain.contains("**"));
        assert!(!plain.contains("https://example.com"));
    }

    #[test]
    fn word_count_ignores_markup_tokens() {
        let mut note = Note::new("default");
        note.content = "# One\n\ntwo **three** four".to_string();
        assert_eq!(note.word_count(), 4);
    }

    #[test]
    fn update_refreshes_modified_timestamp() {
        let mut note = Note::new("default");
        let before = note.modified_at;
        note.update("New title", "New content");
        assert_eq!(note.title, "New title");
        assert_eq!(note.content, "New content");
        assert!(note.modified_at >= before);
    }

    #[test]
    fn add_link_is_idempotent() {
        let mut note = Note::new("default");
        note.add_link("abc");
        note.add_link("abc");
        assert_eq!(note.linked_notes, vec!["abc".to_string()]);
    }
}
