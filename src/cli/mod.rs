//! CLI for inspecting and exporting the note store without launching the
//! TUI.

pub mod commands;
pub mod tree;

use colored::Colorize;
use std::error::Error;

use crate::models::StorageManager;

/// Executes CLI commands based on the provided arguments.
pub fn execute_cli(args: &[String]) -> Result<(), Box<dyn Error>> {
    if args.is_empty() {
        print_help();
        return Ok(());
    }

    match args[0].as_str() {
        "list" | "ls" => {
            let storage = StorageManager::new()?;
            let repo = crate::models::NoteRepository::open(storage)?;

            if args.len() == 1 {
                tree::display_tree(&repo, None)?;
                return Ok(());
            }

            match tree::find_notebook(&repo, &args[1]) {
                Some(id) => tree::display_tree(&repo, Some(&id))?,
                None => {
                    println!(
                        "{}  No notebook found with name: {}",
                        "┃".bright_magenta(),
                        args[1]
                    );
                    tree::list_all_notebooks(&repo)?;
                }
            }
        }
        "notebooks" => {
            let storage = StorageManager::new()?;
            let repo = crate::models::NoteRepository::open(storage)?;
            tree::list_all_notebooks(&repo)?;
        }
        "show" | "view" | "cat" => {
            if args.len() < 2 {
                println!("{}  Error: Missing note title or ID", "┃".bright_magenta());
                println!(
                    "{}  Usage: filament show <NOTE_TITLE_OR_ID>",
                    "┃".bright_magenta()
                );
                return Ok(());
            }
            commands::show_note(&args[1])?;
        }
        "search" | "find" => {
            if args.len() < 2 {
                println!("{}  Error: Missing search query", "┃".bright_magenta());
                println!("{}  Usage: filament search <QUERY>", "┃".bright_magenta());
                return Ok(());
            }
            commands::search_notes_cli(&args[1])?;
        }
        "export" => {
            if args.len() < 2 {
                println!(
                    "{}  Usage: filament export <NOTE_TITLE_OR_ID> [md|html|txt|pdf]",
                    "┃".bright_magenta()
                );
                return Ok(());
            }
            let format = args.get(2).map(String::as_str).unwrap_or("md");
            commands::export_note_cli(&args[1], format)?;
        }
        "link" => {
            if args.len() < 3 {
                println!(
                    "{}  Usage: filament link <FROM_NOTE> <TO_NOTE>",
                    "┃".bright_magenta()
                );
                return Ok(());
            }
            commands::link_notes_cli(&args[1], &args[2])?;
        }
        "help" => print_help(),
        _ => {
            println!("{}  Unknown command: {}", "┃".bright_magenta(), args[0]);
            print_help();
        }
    }

    Ok(())
}

/// Prints the help message with available commands.
fn print_help() {
    println!(
        "{}  {}",
        "┃".bright_magenta(),
        "FILAMENT CLI - NOTE MANAGER".bold()
    );

    println!("{}  {}", "┃".bright_magenta(), "USAGE:".bright_yellow());
    println!("{}  filament [COMMAND] [ARGS]", "┃".bright_magenta());
    println!("{}  {}", "┃".bright_magenta(), "COMMANDS:".bright_yellow());
    let entries = [
        ("list, ls", "List all notebooks and notes in tree format"),
        ("list <NOTEBOOK>", "List notes in the specified notebook"),
        ("notebooks", "List all notebooks with their IDs"),
        ("show, view <NOTE>", "Display a note by title (partial works)"),
        ("search, find <QUERY>", "Search notes matching the query"),
        ("export <NOTE> [FMT]", "Export a note (md, html, txt, pdf)"),
        ("link <FROM> <TO>", "Link two notes for the graph view"),
        ("help", "Display this help message"),
    ];
    for (command, description) in entries {
        println!(
            "{}  {:<27} {}",
            "┃".bright_magenta(),
            command.bright_white(),
            description
        );
    }

    println!("{}  {}", "┃".bright_magenta(), "TIP:".bright_green());
    println!(
        "{}  Run with no arguments to launch the full TUI (Terminal User Interface) mode",
        "┃".bright_magenta()
    );
}
