// Interview: scores a single free-text answer (relevance, depth, clarity,
// rating, optional follow-up) and summarizes a session of scored answers.
// AI first; `evaluator::evaluate_answer` otherwise.

pub mod evaluator;
pub mod follow_up;
pub mod handlers;
pub mod prompts;
pub mod summary;
