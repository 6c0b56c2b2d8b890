use crate::agents::{Agent, AgentKind};
use crate::game::LeadBets;

/// Bets exactly its hand strength in every role: a transparent,
/// never-bluffing baseline opponent.
pub struct MirrorAgent;

impl MirrorAgent {
    pub fn new() -> Self {
        MirrorAgent
    }
}

impl Default for MirrorAgent {
    fn default() -> Self {
        Self::new()
    }
}

impl Agent for MirrorAgent {
    fn kind(&self) -> AgentKind {
        AgentKind::Mirror
    }

    fn lead(&mut self, strength: f64, _noise: f64) -> LeadBets {
        LeadBets {
            initial_bet: strength,
            max_bet: strength,
        }
    }

    fn follow(&mut self, strength: f64, _initial_bet: f64, _noise: f64) -> f64 {
        strength
    }

    fn encode_floats(&self) -> Vec<f64> {
        vec![AgentKind::Mirror.tag()]
    }
}
