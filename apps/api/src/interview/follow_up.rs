// Follow-up question selection. Offered only for answers above the threshold,
// and then only when the coin flip lands; the question is drawn from the
// category's pool (or the general pool for unknown categories).

use crate::scoring::{Jitter, Lexicon};

/// Answers at or below this overall score never get a follow-up.
pub const FOLLOW_UP_THRESHOLD: u32 = 50;

pub fn pick_follow_up(
    category: &str,
    overall_score: u32,
    lexicon: &Lexicon,
    rng: &mut dyn Jitter,
) -> Option<String> {
    if overall_score <= FOLLOW_UP_THRESHOLD || !rng.coin_flip() {
        return None;
    }
    let pool = lexicon.follow_up_pool(category);
    if pool.is_empty() {
        return None;
    }
    let index = rng.roll(pool.len() as u32) as usize;
    pool.get(index).cloned()
}
