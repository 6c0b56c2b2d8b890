use crate::agents::{Agent, AgentKind};
use crate::game::LeadBets;
use crate::split::split_uniform;

/// Random bettor gated by a strength floor: below `min_strength` it bets
/// zero (which the simulator clamps up to the ante, i.e. it checks),
/// otherwise it bets at random like [`crate::agents::RandomAgent`].
///
/// The gate is inclusive when leading and exclusive when following.
pub struct GatedRandomAgent {
    min_strength: f64,
}

impl GatedRandomAgent {
    pub fn new(min_strength: f64) -> Self {
        GatedRandomAgent { min_strength }
    }

    pub fn min_strength(&self) -> f64 {
        self.min_strength
    }
}

impl Agent for GatedRandomAgent {
    fn kind(&self) -> AgentKind {
        AgentKind::GatedRandom
    }

    fn lead(&mut self, strength: f64, noise: f64) -> LeadBets {
        let (initial_bet, max_bet) = split_uniform(noise);
        let gate = if strength >= self.min_strength { 1.0 } else { 0.0 };
        LeadBets {
            initial_bet: initial_bet * gate,
            max_bet: max_bet * gate,
        }
    }

    fn follow(&mut self, strength: f64, _initial_bet: f64, noise: f64) -> f64 {
        if strength > self.min_strength {
            noise
        } else {
            0.0
        }
    }

    fn encode_floats(&self) -> Vec<f64> {
        vec![AgentKind::GatedRandom.tag(), self.min_strength]
    }
}
