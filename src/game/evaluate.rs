use rand::Rng;

use crate::agents::Agent;
use crate::game::types::EvaluationOptions;

/// Estimates `a`'s expected net reward against `b` over `options.hands`
/// simulated hands.
///
/// The return value is the ledger total attributed to `a`: every hand's
/// reward is credited to one agent and debited from the other, so
/// `evaluate(b, a, ..)` is the negative of `evaluate(a, b, ..)` up to
/// sampling noise.
pub fn evaluate(a: &mut dyn Agent, b: &mut dyn Agent, options: &EvaluationOptions) -> f64 {
    evaluate_with(a, b, options, &mut rand::rng())
}

/// Same as [`evaluate`], with a caller-supplied RNG for reproducible runs.
pub fn evaluate_with<R: Rng + ?Sized>(
    a: &mut dyn Agent,
    b: &mut dyn Agent,
    options: &EvaluationOptions,
    rng: &mut R,
) -> f64 {
    let mut a_total = 0.0;
    for _ in 0..options.hands {
        // The leader role alternates at random between the two agents.
        if rng.random_bool(0.5) {
            a_total += play_hand(a, b, options.ante, rng);
        } else {
            a_total -= play_hand(b, a, options.ante, rng);
        }
    }
    a_total
}

/// Plays one hand and returns the leader's signed reward.
fn play_hand<R: Rng + ?Sized>(
    leader: &mut dyn Agent,
    follower: &mut dyn Agent,
    ante: f64,
    rng: &mut R,
) -> f64 {
    let leader_strength: f64 = rng.random();
    let leader_noise: f64 = rng.random();
    let bets = leader.lead(leader_strength, leader_noise);
    let initial_bet = ante.max(bets.initial_bet);
    // The cap is never below the initial bet, whatever the agent returned.
    let max_bet = initial_bet.max(bets.max_bet);

    let follower_strength: f64 = rng.random();
    let follower_noise: f64 = rng.random();
    let following_bet = ante.max(follower.follow(follower_strength, initial_bet, follower_noise));

    if following_bet < initial_bet {
        // Fold: the leader collects only the ante, not the full bet.
        return ante;
    }
    if following_bet > max_bet {
        // Raise past the cap; the leader will not call and forfeits the
        // initial bet.
        return -initial_bet;
    }
    if leader_strength > follower_strength {
        following_bet
    } else if leader_strength < follower_strength {
        -following_bet
    } else {
        0.0
    }
}
