// CV Analysis: scores extracted CV text (optionally against a job description)
// on structure, technical depth, ATS-friendliness and realism.
// AI first; `fallback::analyze_fallback` when the AI path is unavailable.

pub mod extract;
pub mod fallback;
pub mod handlers;
pub mod keywords;
pub mod prompts;

