use crate::agents::{Agent, AgentKind};
use crate::game::LeadBets;

const STRONG_HAND: f64 = 0.5;

/// Rule-based strategy keyed on a fixed strength threshold: with a strong
/// hand it leads with an uncapped raise and calls anything; otherwise it
/// just bets its strength and lets weak hands get folded.
pub struct ThresholdAgent;

impl ThresholdAgent {
    pub fn new() -> Self {
        ThresholdAgent
    }
}

impl Default for ThresholdAgent {
    fn default() -> Self {
        Self::new()
    }
}

impl Agent for ThresholdAgent {
    fn kind(&self) -> AgentKind {
        AgentKind::Threshold
    }

    fn lead(&mut self, strength: f64, _noise: f64) -> LeadBets {
        LeadBets {
            initial_bet: strength,
            max_bet: if strength > STRONG_HAND { 1.0 } else { 0.0 },
        }
    }

    fn follow(&mut self, strength: f64, initial_bet: f64, _noise: f64) -> f64 {
        if strength > STRONG_HAND {
            strength.max(initial_bet)
        } else {
            strength
        }
    }

    fn encode_floats(&self) -> Vec<f64> {
        vec![AgentKind::Threshold.tag()]
    }
}
