//! The leader/follower betting game: shared protocol types and the Monte
//! Carlo simulator that scores one agent against another.

mod evaluate;
mod types;

pub use evaluate::{evaluate, evaluate_with};
pub use types::{EvaluationOptions, LeadBets, NamedAgent, RelativeReward, TrainingCycleOptions};
