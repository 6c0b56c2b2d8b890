use crate::agents::{Agent, AgentKind};
use crate::game::LeadBets;
use crate::split::split_uniform;

/// Bets uniformly at random, ignoring its hand entirely. The single noise
/// input is split into two independent bets when leading.
pub struct RandomAgent;

impl RandomAgent {
    pub fn new() -> Self {
        RandomAgent
    }
}

impl Default for RandomAgent {
    fn default() -> Self {
        Self::new()
    }
}

impl Agent for RandomAgent {
    fn kind(&self) -> AgentKind {
        AgentKind::Random
    }

    fn lead(&mut self, _strength: f64, noise: f64) -> LeadBets {
        let (initial_bet, max_bet) = split_uniform(noise);
        LeadBets {
            initial_bet,
            max_bet,
        }
    }

    fn follow(&mut self, _strength: f64, _initial_bet: f64, noise: f64) -> f64 {
        noise
    }

    fn encode_floats(&self) -> Vec<f64> {
        vec![AgentKind::Random.tag()]
    }
}
