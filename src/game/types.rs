use serde::{Deserialize, Serialize};

use crate::agents::AgentBox;

/// Options controlling one evaluation batch.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct EvaluationOptions {
    /// Number of simulated hands; must be positive.
    pub hands: usize,
    /// Minimum guaranteed bet/forfeit floor, in `[0, 1]`.
    pub ante: f64,
}

/// Options for one finite-difference training cycle.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct TrainingCycleOptions {
    /// Perturbation applied to each parameter when probing; must be
    /// positive and finite.
    pub derivative_step: f64,
    /// Scale applied to each derivative estimate before committing.
    pub learning_rate: f64,
    pub evaluation: EvaluationOptions,
}

/// The leader's two raw outputs for a hand. Both are raw agent outputs;
/// the simulator clamps the initial bet against the ante and raises the
/// cap to at least the initial bet.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LeadBets {
    pub initial_bet: f64,
    pub max_bet: f64,
}

/// Net result of one trainee against one named opponent over a batch of
/// simulated hands.
#[derive(Debug, Clone, PartialEq)]
pub struct RelativeReward {
    pub opponent: String,
    pub reward: f64,
}

/// An agent paired with its display name.
///
/// Name uniqueness is enforced by whoever assembles the roster (config or
/// CLI), not here.
pub struct NamedAgent {
    pub name: String,
    pub agent: AgentBox,
}
