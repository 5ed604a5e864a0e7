// SPDX-License-Identifier: AGPL-3.0-only
// SPDX-FileCopyrightText: 2025 Steve Clarke <stephenlclarke@mac.com> - https://xyzzy.tools

//! Random replacement values for randomised substitution runs.

use fake::Fake;
use fake::faker::name::en::Name;
use rand::Rng;

/// Generate one human-name-like replacement value.
///
/// The RNG is supplied by the caller so runs can be made deterministic in
/// tests; production callers hand in `rand::thread_rng()`.
pub fn random_full_name<R: Rng>(rng: &mut R) -> String {
    Name().fake_with_rng(rng)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn generated_names_are_non_empty() {
        let mut rng = StdRng::seed_from_u64(1);
        assert!(!random_full_name(&mut rng).is_empty());
    }

    #[test]
    fn same_seed_yields_same_name() {
        let mut first = StdRng::seed_from_u64(42);
        let mut second = StdRng::seed_from_u64(42);
        assert_eq!(random_full_name(&mut first), random_full_name(&mut second));
    }
}
