//! Rule-based interpretation of natal charts.

pub mod engine;
pub mod rules;

pub use engine::{interpret_chart, Interpretation, Interpreter};
pub use rules::{RuleBook, RuleEntry};
