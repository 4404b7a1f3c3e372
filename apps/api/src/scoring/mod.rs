// Heuristic scoring infrastructure shared by the CV analysis, CV quality and
// interview scorers: injectable jitter, vocabulary tables, the compiled lexicon,
// and the response envelope that marks which path produced a result.

pub mod envelope;
pub mod jitter;
pub mod lexicon;
pub mod tables;

pub use envelope::{score_with_fallback, Normalize, Scored};
pub use jitter::{Jitter, JitterMode};
pub use lexicon::Lexicon;
pub use tables::ScoringTables;

#[cfg(test)]
pub use lexicon::DEFAULT_LEXICON;
#[cfg(test)]
pub use tables::TABLES_VERSION;

/// Upper bound of every score field.
pub const MAX_SCORE: u32 = 100;

/// Clamps an intermediate score into `[0, 100]`.
pub fn clamp_score(value: i64) -> u32 {
    value.clamp(0, MAX_SCORE as i64) as u32
}

/// Rounds (half away from zero) and clamps into `[0, 100]`.
pub fn round_score(value: f64) -> u32 {
    if value.is_nan() {
        return 0;
    }
    clamp_score(value.round() as i64)
}
