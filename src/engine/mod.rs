// SPDX-License-Identifier: AGPL-3.0-only
// SPDX-FileCopyrightText: 2025 Steve Clarke <stephenlclarke@mac.com> - https://xyzzy.tools

pub mod encoding;
pub mod namegen;
pub mod substitute;

pub use substitute::{EngineError, SubstitutionMode, substitute_file};
