use crate::error::{Error, Result};
use dialoguer::{Input, Password};
use std::fs;
use std::io::{self, BufRead, IsTerminal};
use std::path::PathBuf;
use tracing::debug;

/// Where the bytes to measure come from.
#[derive(Debug, Clone, PartialEq)]
pub enum Source {
    /// Raw bytes of a file.
    File(PathBuf),
    /// UTF-8 encoding of a literal string.
    Text(String),
    /// Masked interactive prompt.
    Password,
    /// Plain interactive prompt.
    Prompt,
}

impl Source {
    pub fn read(&self) -> Result<Vec<u8>> {
        let bytes = match self {
            Source::File(path) => fs::read(path).map_err(|source| Error::Io {
                path: path.clone(),
                source,
            })?,
            Source::Text(s) => s.as_bytes().to_vec(),
            Source::Password | Source::Prompt if !io::stdin().is_terminal() => {
                read_line(io::stdin().lock())?.into_bytes()
            }
            Source::Password => Password::new()
                .with_prompt("Password")
                .allow_empty_password(true)
                .interact()?
                .into_bytes(),
            Source::Prompt => Input::<String>::new()
                .with_prompt("Enter text")
                .allow_empty(true)
                .interact_text()?
                .into_bytes(),
        };
        debug!(source = %self.label(), len = bytes.len(), "read input");
        Ok(bytes)
    }

    /// Short name used in reports; never includes secret content.
    pub fn label(&self) -> String {
        match self {
            Source::File(path) => path.display().to_string(),
            Source::Text(_) => "<text>".to_string(),
            Source::Password => "<password>".to_string(),
            Source::Prompt => "<prompt>".to_string(),
        }
    }
}

/// One line from a non-interactive reader, without its line terminator.
fn read_line(mut reader: impl BufRead) -> Result<String> {
    let mut line = String::new();
    reader.read_line(&mut line).map_err(|e| Error::Prompt(e.to_string()))?;
    if line.ends_with('\n') {
        line.pop();
        if line.ends_with('\r') {
            line.pop();
        }
    }
    Ok(line)
}
