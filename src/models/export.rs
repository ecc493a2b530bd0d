use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

use anyhow::{Context, Result, anyhow};
use chrono::Local;
use once_cell::sync::Lazy;
use regex::Regex;

use crate::models::Note;

static NON_ALNUM: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^A-Za-z0-9]").unwrap());

/// Export format options for a single note.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Markdown,
    Html,
    Text,
    Pdf,
}

impl ExportFormat {
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_lowercase().as_str() {
            "md" | "markdown" => Some(ExportFormat::Markdown),
            "html" => Some(ExportFormat::Html),
            "txt" | "text" => Some(ExportFormat::Text),
            "pdf" => Some(ExportFormat::Pdf),
            _ => None,
        }
    }

    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Markdown => "md",
            ExportFormat::Html => "html",
            ExportFormat::Text => "txt",
            ExportFormat::Pdf => "pdf",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            ExportFormat::Markdown => "Markdown",
            ExportFormat::Html => "HTML",
            ExportFormat::Text => "plain text",
            ExportFormat::Pdf => "PDF",
        }
    }
}

/// Sanitized title plus the current date, the original export naming scheme.
fn export_filename(note: &Note, format: ExportFormat) -> String {
    let stem = NON_ALNUM.replace_all(&note.title, "_");
    let date = Local::now().format("%Y-%m-%d");
    format!("{stem}_{date}.{}", format.extension())
}

fn render_html(note: &Note) -> String {
    let markdown = format!("# {}\n\n{}", note.title, note.content);
    let parser = pulldown_cmark::Parser::new(&markdown);
    let mut body = String::new();
    pulldown_cmark::html::push_html(&mut body, parser);
    format!(
        "<!DOCTYPE html>\n<html>\n<head><meta charset=\"utf-8\"><title>{}</title></head>\n\
         <body>\n{body}</body>\n</html>\n",
        note.title
    )
}

/// Exports a note into `dir` and returns the written path.
///
/// PDF export converts the HTML rendition through an external `pandoc`
/// binary; its absence is reported as an error for the caller to surface.
pub fn export_note(note: &Note, format: ExportFormat, dir: &Path) -> Result<PathBuf> {
    fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create export directory {}", dir.display()))?;
    let target = dir.join(export_filename(note, format));

    match format {
        ExportFormat::Markdown => {
            let document = format!("# {}\n\n{}\n", note.title, note.content);
            fs::write(&target, document)
                .with_context(|| format!("Failed to write {}", target.display()))?;
        }
        ExportFormat::Html => {
            fs::write(&target, render_html(note))
                .with_context(|| format!("Failed to write {}", target.display()))?;
        }
        ExportFormat::Text => {
            let document = format!("{}\n\n{}\n", note.title, note.plain_text());
            fs::write(&target, document)
                .with_context(|| format!("Failed to write {}", target.display()))?;
        }
        ExportFormat::Pdf => {
            let html_source = dir.join(export_filename(note, ExportFormat::Html));
            fs::write(&html_source, render_html(note))
                .with_context(|| format!("Failed to write {}", html_source.display()))?;
            convert_to_pdf(&html_source, &target)?;
        }
    }

    Ok(target)
}

fn convert_to_pdf(source: &Path, target: &Path) -> Result<()> {
    let output = match Command::new("pandoc")
        .arg(source)
        .arg("-o")
        .arg(target)
        .output()
    {
        Ok(output) => output,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Err(anyhow!(
                "PDF converter not found. Install pandoc to enable PDF export."
            ));
        }
        Err(e) => return Err(e).context("Failed to run the PDF converter"),
    };

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(anyhow!("PDF conversion failed: {}", stderr.trim()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_note() -> Note {
        let mut note = Note::new("default");
        note.title = "Meeting Notes: Q3!".to_string();
        note.content = "# Agenda\n\nDiscuss **roadmap**.".to_string();
        note
    }

    #[test]
    fn filename_is_sanitized_title_plus_date() {
        let name = export_filename(&sample_note(), ExportFormat::Markdown);
        assert!(name.starts_with("Meeting_Notes__Q3_"));
        assert!(name.ends_with(".md"));
        assert!(!name.contains(' '));
        assert!(!name.contains(':'));
    }

    #[test]
    fn markdown_export_writes_title_heading_and_content() {
        let dir = tempfile::tempdir().unwrap();
        let path = export_note(&sample_note(), ExportFormat::Markdown, dir.path()).unwrap();
        let written = std::fs::read_to_string(path).unwrap();
        assert!(written.starts_with("# Meeting Notes: Q3!"));
        assert!(written.contains("Discuss **roadmap**."));
    }

    #[test]
    fn html_export_renders_markup() {
        let dir = tempfile::tempdir().unwrap();
        let path = export_note(&sample_note(), ExportFormat::Html, dir.path()).unwrap();
        let written = std::fs::read_to_string(path).unwrap();
        assert!(written.contains("<strong>roadmap</strong>"));
        assert!(written.contains("<title>Meeting Notes: Q3!</title>"));
    }

    #[test]
    fn text_export_strips_markup() {
        let dir = tempfile::tempdir().unwrap();
        let path = export_note(&sample_note(), ExportFormat::Text, dir.path()).unwrap();
        let written = std::fs::read_to_string(path).unwrap();
        assert!(written.contains("Discuss roadmap."));
        assert!(!written.contains("**"));
    }

    #[test]
    fn format_names_parse_case_insensitively() {
        assert_eq!(ExportFormat::from_name("MD"), Some(ExportFormat::Markdown));
        assert_eq!(ExportFormat::from_name("pdf"), Some(ExportFormat::Pdf));
        assert_eq!(ExportFormat::from_name("docx"), None);
    }
}
