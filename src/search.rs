use chrono::{DateTime, Utc};

use crate::models::NoteRepository;

const MAX_RECENT_SEARCHES: usize = 20;

#[derive(Debug, Clone, PartialEq)]
pub enum MatchKind {
    Title,
    Content,
}

#[derive(Debug, Clone)]
pub struct SearchResult {
    pub note_id: String,
    pub title: String,
    pub kind: MatchKind,
    pub match_context: String,
}

#[derive(Debug, Clone)]
pub struct RecentSearchEntry {
    pub query: String,
    pub timestamp: DateTime<Utc>,
    pub result_count: usize,
}

impl RecentSearchEntry {
    pub fn new(query: String, result_count: usize) -> Self {
        Self {
            query,
            timestamp: Utc::now(),
            result_count,
        }
    }
}

/// Linear scan over all notes: case-insensitive substring match against the
/// title or the raw content markup (markup syntax counts toward the match).
/// Every match is returned; there is no ranking.
pub fn search_notes(repo: &NoteRepository, query: &str) -> Vec<SearchResult> {
    let mut results = Vec::new();
    if query.trim().is_empty() {
        return results;
    }
    let query = query.to_lowercase();

    for note in repo.notes().values() {
        if note.title.to_lowercase().contains(&query) {
            results.push(SearchResult {
                note_id: note.id.clone(),
                title: note.title.clone(),
                kind: MatchKind::Title,
                match_context: format!("Title match: {}", note.title),
            });
            continue;
        }

        if note.content.to_lowercase().contains(&query) {
            // First matching line gives the context.
            let mut match_context = String::new();
            for (i, line) in note.content.lines().enumerate() {
                if line.to_lowercase().contains(&query) {
                    match_context = format!("Line {}: {}", i + 1, line.trim());
                    break;
                }
            }

            results.push(SearchResult {
                note_id: note.id.clone(),
                title: note.title.clone(),
                kind: MatchKind::Content,
                match_context,
            });
        }
    }

    results
}

/// Records a query in the recent-search history: deduplicated, most recent
/// first, bounded.
pub fn remember_search(recent: &mut Vec<RecentSearchEntry>, query: &str, result_count: usize) {
    if query.trim().is_empty() {
        return;
    }

    recent.retain(|entry| entry.query != query);
    recent.insert(0, RecentSearchEntry::new(query.to_string(), result_count));
    if recent.len() > MAX_RECENT_SEARCHES {
        recent.truncate(MAX_RECENT_SEARCHES);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn remember_search_dedups_and_bounds_history() {
        let mut recent = Vec::new();
        for i in 0..25 {
            remember_search(&mut recent, &format!("query {i}"), i);
        }
        assert_eq!(recent.len(), MAX_RECENT_SEARCHES);
        assert_eq!(recent[0].query, "query 24");

        remember_search(&mut recent, "query 24", 3);
        assert_eq!(recent.len(), MAX_RECENT_SEARCHES);
        assert_eq!(recent[0].query, "query 24");
        assert_eq!(recent[0].result_count, 3);
    }

    #[test]
    fn empty_queries_are_not_remembered() {
        let mut recent = Vec::new();
        remember_search(&mut recent, "   ", 0);
        assert!(recent.is_empty());
    }
}
