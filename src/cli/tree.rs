//! Tree-format listings for the CLI.

use colored::Colorize;
use std::error::Error;

use crate::models::NoteRepository;

/// Displays the store content as a tree, whole or scoped to one notebook.
pub fn display_tree(repo: &NoteRepository, root_id: Option<&str>) -> Result<(), Box<dyn Error>> {
    if repo.notebooks().is_empty() {
        println!("No notebooks found in store.");
        return Ok(());
    }

    match root_id {
        Some(id) => {
            if let Some(notebook) = repo.notebook(id) {
                println!(
                    "{}  {} {}",
                    "┃".bright_magenta(),
                    "󰠮".bright_blue(),
                    notebook.name.bold()
                );
                print_notebook_notes(repo, id, &notebook.name);
            } else {
                println!(
                    "{}  Notebook with ID {} not found",
                    "┃".bright_magenta(),
                    id
                );
            }
        }
        None => {
            for notebook in repo.notebooks_ordered() {
                println!(
                    "{}  {} {}",
                    "┃".bright_magenta(),
                    "󰠮".bright_blue(),
                    notebook.name.bold()
                );
                print_notebook_notes(repo, &notebook.id, &notebook.name);
            }
        }
    }
    Ok(())
}

fn print_notebook_notes(repo: &NoteRepository, notebook_id: &str, path: &str) {
    let note_ids = repo.notes_in(notebook_id);

    for (i, note_id) in note_ids.iter().enumerate() {
        let Some(note) = repo.note(note_id) else {
            continue;
        };
        let connector = if i == note_ids.len() - 1 {
            "└── "
        } else {
            "├── "
        };
        let full_path = format!("{}/{}", path, note.title);

        println!(
            "{}  {}{} {} [{} words] {}",
            "┃".bright_magenta(),
            connector,
            "".normal(),
            note.title.bright_white(),
            note.word_count().to_string().bright_black(),
            full_path.bright_black().italic()
        );
    }
}

/// Finds a notebook by id, then exact name, then partial name match.
pub fn find_notebook(repo: &NoteRepository, name_or_id: &str) -> Option<String> {
    if repo.notebook(name_or_id).is_some() {
        return Some(name_or_id.to_string());
    }

    let query = name_or_id.to_lowercase();
    for notebook in repo.notebooks().values() {
        if notebook.name.to_lowercase() == query {
            return Some(notebook.id.clone());
        }
    }
    for notebook in repo.notebooks().values() {
        if notebook.name.to_lowercase().contains(&query) {
            return Some(notebook.id.clone());
        }
    }
    None
}

pub fn list_all_notebooks(repo: &NoteRepository) -> Result<(), Box<dyn Error>> {
    for (idx, notebook) in repo.notebooks_ordered().iter().enumerate() {
        println!(
            "{}  {}. {} ({} notes){}",
            "┃".bright_magenta(),
            (idx + 1).to_string().bright_yellow(),
            notebook.name.bright_white().bold(),
            repo.notes_in(&notebook.id).len(),
            format!(" [{}]", notebook.id).bright_black().italic()
        );
    }
    Ok(())
}
