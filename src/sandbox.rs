//! Code sandbox: runs a user-supplied buffer through a local interpreter
//! and captures its output for inline display.

use std::io::Write;
use std::process::{Command, Stdio};

use anyhow::{Context, Result, anyhow};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SandboxLanguage {
    Shell,
    Python,
    JavaScript,
}

pub const SANDBOX_LANGUAGES: [SandboxLanguage; 3] = [
    SandboxLanguage::Shell,
    SandboxLanguage::Python,
    SandboxLanguage::JavaScript,
];

impl SandboxLanguage {
    pub fn display_name(&self) -> &'static str {
        match self {
            SandboxLanguage::Shell => "Shell",
            SandboxLanguage::Python => "Python",
            SandboxLanguage::JavaScript => "JavaScript",
        }
    }

    /// Tag used on fenced code blocks inserted into notes.
    pub fn fence_tag(&self) -> &'static str {
        match self {
            SandboxLanguage::Shell => "sh",
            SandboxLanguage::Python => "python",
            SandboxLanguage::JavaScript => "javascript",
        }
    }

    fn interpreter(&self) -> (&'static str, &'static [&'static str]) {
        match self {
            SandboxLanguage::Shell => ("sh", &["-s"]),
            SandboxLanguage::Python => ("python3", &["-"]),
            SandboxLanguage::JavaScript => ("node", &["-"]),
        }
    }
}

/// Outcome of a run. Failures of the user's code are data, not errors;
/// `Err` is reserved for a missing or broken interpreter.
#[derive(Debug, Clone, PartialEq)]
pub struct RunOutcome {
    pub stdout: String,
    pub stderr: String,
    pub success: bool,
}

impl RunOutcome {
    /// Single block suitable for the output pane.
    pub fn display(&self) -> String {
        let mut out = String::new();
        if !self.stdout.is_empty() {
            out.push_str(&self.stdout);
        }
        if !self.stderr.is_empty() {
            if !out.is_empty() {
                out.push('\n');
            }
            out.push_str("Error: ");
            out.push_str(self.stderr.trim_end());
        }
        if out.is_empty() {
            out.push_str(if self.success {
                "(no output)"
            } else {
                "(exited with failure)"
            });
        }
        out
    }
}

/// Pipes `code` into the interpreter for `language` and captures both
/// streams. A missing interpreter is surfaced as an error for the caller to
/// alert on.
pub fn run_code(language: SandboxLanguage, code: &str) -> Result<RunOutcome> {
    let (program, args) = language.interpreter();

    let mut child = match Command::new(program)
        .args(args)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
    {
        Ok(child) => child,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Err(anyhow!(
                "Runtime for {} not available (missing `{}`)",
                language.display_name(),
                program
            ));
        }
        Err(e) => return Err(e).with_context(|| format!("Failed to start {program}")),
    };

    child
        .stdin
        .take()
        .context("Interpreter stdin unavailable")?
        .write_all(code.as_bytes())
        .context("Failed to feed code to the interpreter")?;

    let output = child
        .wait_with_output()
        .context("Failed to collect interpreter output")?;

    Ok(RunOutcome {
        stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
        stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        success: output.status.success(),
    })
}

/// Fenced code block appended to the active note by the insert action.
pub fn fenced_block(language: SandboxLanguage, code: &str) -> String {
    format!("\n```{}\n{}\n```\n", language.fence_tag(), code.trim_end())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shell_run_captures_stdout() {
        let outcome = run_code(SandboxLanguage::Shell, "echo hello").unwrap();
        assert!(outcome.success);
        assert_eq!(outcome.stdout.trim(), "hello");
    }

    #[test]
    fn failing_code_is_reported_inline_not_as_error() {
        let outcome = run_code(SandboxLanguage::Shell, "echo oops >&2; exit 3").unwrap();
        assert!(!outcome.success);
        assert!(outcome.display().contains("Error: oops"));
    }

    #[test]
    fn fenced_block_carries_language_tag() {
        let block = fenced_block(SandboxLanguage::Python, "print(1)\n");
        assert!(block.contains("```python\n"));
        assert!(block.trim_end().ends_with("```"));
    }

    #[test]
    fn empty_output_has_a_placeholder() {
        let outcome = RunOutcome {
            stdout: String::new(),
            stderr: String::new(),
            success: true,
        };
        assert_eq!(outcome.display(), "(no output)");
    }
}
