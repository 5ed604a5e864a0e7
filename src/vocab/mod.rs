// SPDX-License-Identifier: AGPL-3.0-only
// SPDX-FileCopyrightText: 2025 Steve Clarke <stephenlclarke@mac.com> - https://xyzzy.tools

pub mod loader;

pub use loader::{Replacement, VocabError, Vocabulary, VocabularyEntry, load_vocabulary};
