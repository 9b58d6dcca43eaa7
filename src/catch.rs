//! Catch odds for a thrown Pokeball.
//!
//! An attempt is drawn uniformly from `[0, base_experience)` and succeeds when
//! it does not exceed half the base experience, so weaker Pokemon are caught
//! slightly more than half the time and the odds approach 50% as experience
//! grows.

use rand::Rng;

/// Outcome of a single catch attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CatchOutcome {
    Caught,
    Escaped,
}

/// Rolls a catch attempt against `base_experience`.
///
/// A missing or zero base experience leaves nothing to draw from; those
/// Pokemon are always caught.
pub fn attempt_catch<R: Rng>(base_experience: Option<u32>, rng: &mut R) -> CatchOutcome {
    let experience = match base_experience {
        Some(experience) if experience > 0 => experience,
        _ => return CatchOutcome::Caught,
    };

    let threshold = experience / 2;
    let attempt = rng.gen_range(0..experience);

    if attempt <= threshold {
        CatchOutcome::Caught
    } else {
        CatchOutcome::Escaped
    }
}
