// CV Quality: scores a structured, block-based CV on eight axes with
// improvement suggestions. AI first; `quality::calculate_cv_scores` otherwise.

pub mod blocks;
pub mod handlers;
pub mod prompts;
pub mod quality;
