// SPDX-License-Identifier: AGPL-3.0-only
// SPDX-FileCopyrightText: 2025 Steve Clarke <stephenlclarke@mac.com> - https://xyzzy.tools

//! Vocabulary file parsing.
//!
//! A vocabulary file holds one entry per line: `sensitive_term` on its own
//! marks the term for random replacement, `sensitive_term,replacement_term`
//! fixes the replacement.  Blank lines are skipped and malformed lines are
//! warned about and dropped rather than failing the whole load, so a single
//! typo in a long vocabulary does not sink the run.

use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::warn;

/// How a sensitive term should be rewritten in the output document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Replacement {
    /// Replace with this exact string.  An empty string is a valid
    /// replacement and simply deletes the term.
    Literal(String),
    /// No fixed replacement was supplied; a value is generated at
    /// substitution time when randomised mode is requested.
    Random,
}

/// A single parsed vocabulary line: the term to find and what to do with it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VocabularyEntry {
    pub term: String,
    pub replacement: Replacement,
}

/// Errors raised while loading a vocabulary file.
#[derive(Debug, Error)]
pub enum VocabError {
    #[error("Vocabulary file not found: {}", .0.display())]
    NotFound(PathBuf),
    #[error("Error loading vocabulary file {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Ordered term-to-replacement mapping parsed from a vocabulary file.
///
/// Entries keep the order of their first appearance; a later line for the
/// same term overwrites the replacement in place without moving the entry.
#[derive(Debug, Default, Clone)]
pub struct Vocabulary {
    entries: Vec<VocabularyEntry>,
    index: HashMap<String, usize>,
}

impl Vocabulary {
    /// Insert a term, overwriting the replacement if the term is already known.
    pub fn insert(&mut self, term: String, replacement: Replacement) {
        if let Some(&slot) = self.index.get(&term) {
            self.entries[slot].replacement = replacement;
            return;
        }
        self.index.insert(term.clone(), self.entries.len());
        self.entries.push(VocabularyEntry { term, replacement });
    }

    /// Look up the replacement registered for a term.
    #[allow(dead_code)]
    pub fn get(&self, term: &str) -> Option<&Replacement> {
        self.index
            .get(term)
            .map(|&slot| &self.entries[slot].replacement)
    }

    /// Iterate entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &VocabularyEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Load and parse the vocabulary file at `path`.
///
/// The file is read in one go as UTF-8.  A missing file and any other read
/// failure surface as distinct errors so the caller can report them
/// precisely; no partial vocabulary is ever returned.
pub fn load_vocabulary(path: &Path) -> Result<Vocabulary, VocabError> {
    let contents = fs::read_to_string(path).map_err(|err| match err.kind() {
        io::ErrorKind::NotFound => VocabError::NotFound(path.to_path_buf()),
        _ => VocabError::Io {
            path: path.to_path_buf(),
            source: err,
        },
    })?;
    Ok(parse_vocabulary(&contents))
}

/// Parse vocabulary text into entries.  Kept separate from the file read so
/// unit tests can exercise the line handling directly.
fn parse_vocabulary(contents: &str) -> Vocabulary {
    let mut vocabulary = Vocabulary::default();
    for line in contents.lines() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        match parse_line(line) {
            Some((term, replacement)) => vocabulary.insert(term, replacement),
            None => warn!("Invalid line in vocabulary file: {line}. Skipping."),
        }
    }
    vocabulary
}

/// Split one non-blank line into a term and its replacement.  Lines with
/// more than two comma-separated fields, or an empty term field, are
/// malformed and yield `None`.
fn parse_line(line: &str) -> Option<(String, Replacement)> {
    let mut fields = line.split(',');
    let term = fields.next()?.trim();
    let replacement = fields.next().map(str::trim);
    if fields.next().is_some() || term.is_empty() {
        return None;
    }
    let replacement = match replacement {
        Some(text) => Replacement::Literal(text.to_string()),
        None => Replacement::Random,
    };
    Some((term.to_string(), replacement))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn two_field_lines_yield_trimmed_literals() {
        let vocab = parse_vocabulary("  John Smith ,  REDACTED  \n");
        assert_eq!(vocab.len(), 1);
        assert_eq!(
            vocab.get("John Smith"),
            Some(&Replacement::Literal("REDACTED".to_string()))
        );
    }

    #[test]
    fn single_field_lines_are_marked_random() {
        let vocab = parse_vocabulary("John Smith\n");
        assert_eq!(vocab.get("John Smith"), Some(&Replacement::Random));
    }

    #[test]
    fn empty_replacement_is_a_valid_literal() {
        let vocab = parse_vocabulary("John Smith,\n");
        assert_eq!(
            vocab.get("John Smith"),
            Some(&Replacement::Literal(String::new()))
        );
    }

    #[test]
    fn malformed_lines_are_skipped_not_fatal() {
        let vocab = parse_vocabulary("a,b,c\nJohn,Jane\n");
        assert_eq!(vocab.len(), 1);
        assert_eq!(
            vocab.get("John"),
            Some(&Replacement::Literal("Jane".to_string()))
        );
    }

    #[test]
    fn blank_lines_and_whitespace_lines_are_ignored() {
        let vocab = parse_vocabulary("\n   \nAlice,Bob\n\n");
        assert_eq!(vocab.len(), 1);
    }

    #[test]
    fn empty_term_field_is_malformed() {
        let vocab = parse_vocabulary("  ,Bob\n");
        assert!(vocab.is_empty());
    }

    #[test]
    fn duplicate_terms_overwrite_in_place() {
        let vocab = parse_vocabulary("Alice,one\nBob,two\nAlice,three\n");
        assert_eq!(vocab.len(), 2);
        assert_eq!(
            vocab.get("Alice"),
            Some(&Replacement::Literal("three".to_string()))
        );
        let order: Vec<&str> = vocab.iter().map(|e| e.term.as_str()).collect();
        assert_eq!(order, vec!["Alice", "Bob"], "overwrite must not reorder");
    }

    #[test]
    fn missing_file_is_a_distinct_error() {
        let err = load_vocabulary(Path::new("/no/such/vocabulary.txt"))
            .expect_err("load should fail");
        assert!(matches!(err, VocabError::NotFound(_)));
    }
}
