//! Calculator demo: display buffer plus a restricted arithmetic evaluator.

pub mod display;
pub mod expr;
