//! Individual CLI commands: show, search, export, link.

use colored::Colorize;
use std::error::Error;

use crate::models::{ExportFormat, NoteRepository, StorageManager, export_note};
use crate::search;

/// Resolves a note by id, then exact title, then partial title match.
fn resolve_note(repo: &NoteRepository, name_or_id: &str) -> Option<String> {
    if repo.note(name_or_id).is_some() {
        return Some(name_or_id.to_string());
    }

    let query = name_or_id.to_lowercase();
    if let Some(note) = repo
        .notes()
        .values()
        .find(|n| n.title.to_lowercase() == query)
    {
        return Some(note.id.clone());
    }
    repo.notes()
        .values()
        .find(|n| n.title.to_lowercase().contains(&query))
        .map(|n| n.id.clone())
}

fn print_available_notes(repo: &NoteRepository) {
    println!("{}  Available notes:", "┃".bright_magenta());
    println!("{}", "─".repeat(60).bright_magenta());
    for (idx, note) in repo.notes().values().enumerate().take(10) {
        println!(
            "{}  {}. {}",
            "┃".bright_magenta(),
            (idx + 1).to_string().yellow(),
            note.title.bright_white()
        );
    }
    if repo.notes().len() > 10 {
        println!(
            "{}  ... and {} more",
            "┃".bright_magenta(),
            repo.notes().len() - 10
        );
    }
}

/// Shows the content of a specific note by ID or title.
pub fn show_note(name_or_id: &str) -> Result<(), Box<dyn Error>> {
    let storage = StorageManager::new()?;
    let repo = NoteRepository::open(storage)?;

    let Some(note_id) = resolve_note(&repo, name_or_id) else {
        println!(
            "{}  No note found with title: {}",
            "┃".bright_magenta(),
            name_or_id
        );
        print_available_notes(&repo);
        return Ok(());
    };

    let Some(note) = repo.note(&note_id) else {
        return Ok(());
    };
    let notebook_name = repo
        .notebook(&note.notebook_id)
        .map(|nb| nb.name.as_str())
        .unwrap_or("Unknown");

    println!(
        "{}  {} {}",
        "┃".bright_magenta(),
        "NOTE".bright_green().bold(),
        note.title.bold()
    );
    println!("{}", "─".repeat(60).bright_magenta());
    println!(
        "{}  {}: {}",
        "┃".bright_magenta(),
        "Notebook".bright_blue(),
        notebook_name
    );
    println!(
        "{}  {}: {}",
        "┃".bright_magenta(),
        "Modified".bright_yellow(),
        note.modified_at.format("%Y-%m-%d %H:%M")
    );
    if !note.tags.is_empty() {
        println!(
            "{}  {}: {}",
            "┃".bright_magenta(),
            "Tags".bright_cyan(),
            note.tags.join(", ")
        );
    }
    println!(
        "{}  {}: {}",
        "┃".bright_magenta(),
        "ID".bright_black(),
        note.id
    );
    println!("{}", "─".repeat(60).bright_magenta());

    for line in note.content.lines() {
        println!("{}  {}", "┃".bright_magenta(), line);
    }

    Ok(())
}

/// Searches for notes matching a query string.
pub fn search_notes_cli(query: &str) -> Result<(), Box<dyn Error>> {
    let storage = StorageManager::new()?;
    let repo = NoteRepository::open(storage)?;

    let results = search::search_notes(&repo, query);

    println!(
        "{}  {} '{}'",
        "┃".bright_magenta(),
        "SEARCH RESULTS FOR".bold(),
        query.bright_white()
    );

    if results.is_empty() {
        println!(
            "{}  No notes found matching query: {}",
            "┃".bright_magenta(),
            query
        );
        return Ok(());
    }

    println!(
        "{}  Found {} notes matching '{}':",
        "┃".bright_magenta(),
        results.len(),
        query
    );
    println!("{}", "─".repeat(60).bright_magenta());

    for (idx, result) in results.iter().enumerate() {
        println!(
            "{}  {}. {}",
            "┃".bright_magenta(),
            (idx + 1).to_string().bright_yellow(),
            result.title.bright_white().bold()
        );
        println!(
            "{}     {}",
            "┃".bright_magenta(),
            result.match_context.bright_black()
        );
        println!(
            "{}     {}: {}",
            "┃".bright_magenta(),
            "ID".bright_black(),
            result.note_id
        );

        if idx < results.len() - 1 {
            println!(
                "{}  {}",
                "┃".bright_magenta(),
                "─".repeat(40).bright_black()
            );
        }
    }

    Ok(())
}

/// Exports a note to the exports directory in the requested format.
pub fn export_note_cli(name_or_id: &str, format_name: &str) -> Result<(), Box<dyn Error>> {
    let storage = StorageManager::new()?;
    let repo = NoteRepository::open(storage)?;

    let Some(format) = ExportFormat::from_name(format_name) else {
        println!(
            "{}  Unknown format: {} (expected md, html, txt or pdf)",
            "┃".bright_magenta(),
            format_name
        );
        return Ok(());
    };

    let Some(note_id) = resolve_note(&repo, name_or_id) else {
        println!(
            "{}  No note found with title: {}",
            "┃".bright_magenta(),
            name_or_id
        );
        print_available_notes(&repo);
        return Ok(());
    };

    let Some(note) = repo.note(&note_id) else {
        return Ok(());
    };
    match export_note(note, format, &repo.storage().exports_dir()) {
        Ok(path) => {
            println!(
                "{}  Exported {} to {}",
                "┃".bright_magenta(),
                note.title.bright_white().bold(),
                path.display().to_string().bright_green()
            );
        }
        Err(e) => {
            println!("{}  Export failed: {}", "┃".bright_magenta(), e);
        }
    }

    Ok(())
}

/// Links two notes for the graph view. Targets are stored as-is and never
/// validated against the note map.
pub fn link_notes_cli(from: &str, to: &str) -> Result<(), Box<dyn Error>> {
    let storage = StorageManager::new()?;
    let mut repo = NoteRepository::open(storage)?;

    let Some(from_id) = resolve_note(&repo, from) else {
        println!("{}  No note found with title: {}", "┃".bright_magenta(), from);
        return Ok(());
    };
    let Some(to_id) = resolve_note(&repo, to) else {
        println!("{}  No note found with title: {}", "┃".bright_magenta(), to);
        return Ok(());
    };

    repo.link_notes(&from_id, &to_id)?;
    println!(
        "{}  Linked {} → {}",
        "┃".bright_magenta(),
        from.bright_white(),
        to.bright_white()
    );
    Ok(())
}
