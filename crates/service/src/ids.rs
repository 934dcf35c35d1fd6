//! Readable identifier generation.
//!
//! Identifiers look like `USER_482910`: an uppercase prefix naming the
//! record family, an underscore, and six digits. Generation is trait-based
//! so tests can pin the sequence. Generators only produce candidates;
//! uniqueness against the ids already in circulation is enforced by
//! [`unique_id`], because only the calling service knows which ids are
//! taken.

use rand::Rng;

use crate::error::{Result, ServiceError};

/// Candidate attempts before [`unique_id`] gives up.
const MAX_ATTEMPTS: u32 = 100;

/// Source of candidate identifiers.
pub trait IdGenerator: Send {
    /// Produce one candidate of the form `<PREFIX>_<6 digits>`.
    ///
    /// Candidates may collide with ids already in use; callers retry.
    fn generate(&mut self, prefix: &str) -> String;
}

/// Six random digits per candidate.
pub struct RandomIdGenerator;

impl RandomIdGenerator {
    pub fn new() -> Self {
        Self
    }
}

impl Default for RandomIdGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl IdGenerator for RandomIdGenerator {
    fn generate(&mut self, prefix: &str) -> String {
        let number: u32 = rand::thread_rng().gen_range(0..1_000_000);
        format!("{prefix}_{number:06}")
    }
}

/// Deterministic counter-based generator for tests and tooling.
pub struct SequentialIdGenerator {
    next: u64,
}

impl SequentialIdGenerator {
    pub fn new() -> Self {
        Self::starting_at(1)
    }

    pub fn starting_at(next: u64) -> Self {
        Self { next }
    }
}

impl Default for SequentialIdGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl IdGenerator for SequentialIdGenerator {
    fn generate(&mut self, prefix: &str) -> String {
        let id = format!("{}_{:06}", prefix, self.next);
        self.next += 1;
        id
    }
}

/// Draw candidates from `ids` until one is not taken.
///
/// Bounded, so a generator stuck on taken ids fails loudly instead of
/// spinning forever.
pub(crate) fn unique_id(
    ids: &mut dyn IdGenerator,
    prefix: &str,
    mut is_taken: impl FnMut(&str) -> bool,
) -> Result<String> {
    for _ in 0..MAX_ATTEMPTS {
        let candidate = ids.generate(prefix);
        if !is_taken(&candidate) {
            return Ok(candidate);
        }
    }
    Err(ServiceError::IdExhausted {
        attempts: MAX_ATTEMPTS,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sequential_ids_are_zero_padded_and_increasing() {
        let mut ids = SequentialIdGenerator::new();
        assert_eq!(ids.generate("USER"), "USER_000001");
        assert_eq!(ids.generate("USER"), "USER_000002");
        assert_eq!(ids.generate("EQ"), "EQ_000003");
    }

    #[test]
    fn random_ids_have_prefix_and_six_digits() {
        let mut ids = RandomIdGenerator::new();
        for _ in 0..100 {
            let id = ids.generate("RES");
            let digits = id.strip_prefix("RES_").unwrap();
            assert_eq!(digits.len(), 6);
            assert!(digits.chars().all(|c| c.is_ascii_digit()));
        }
    }

    #[test]
    fn unique_id_skips_taken_candidates() {
        let mut ids = SequentialIdGenerator::new();
        let taken = ["USER_000001", "USER_000002"];

        let id = unique_id(&mut ids, "USER", |candidate| taken.contains(&candidate)).unwrap();

        assert_eq!(id, "USER_000003");
    }

    #[test]
    fn unique_id_gives_up_when_everything_is_taken() {
        let mut ids = SequentialIdGenerator::new();
        let result = unique_id(&mut ids, "USER", |_| true);
        assert!(matches!(result, Err(ServiceError::IdExhausted { .. })));
    }
}
