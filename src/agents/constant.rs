use crate::agents::{Agent, AgentKind};
use crate::game::LeadBets;

/// Bets the same fixed amount in every role.
pub struct ConstantAgent {
    bet: f64,
}

impl ConstantAgent {
    pub fn new(bet: f64) -> Self {
        ConstantAgent { bet }
    }

    pub fn bet(&self) -> f64 {
        self.bet
    }
}

impl Agent for ConstantAgent {
    fn kind(&self) -> AgentKind {
        AgentKind::Constant
    }

    fn lead(&mut self, _strength: f64, _noise: f64) -> LeadBets {
        LeadBets {
            initial_bet: self.bet,
            max_bet: self.bet,
        }
    }

    fn follow(&mut self, _strength: f64, _initial_bet: f64, _noise: f64) -> f64 {
        self.bet
    }

    fn encode_floats(&self) -> Vec<f64> {
        vec![AgentKind::Constant.tag(), self.bet]
    }
}
