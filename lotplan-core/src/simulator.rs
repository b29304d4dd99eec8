//! What-if risk/reward pairing, independent of the primary plan.

use serde::{Deserialize, Serialize};

use crate::inputs::{sim_risk_max, SIM_RISK_MIN};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Simulation {
    pub sim_risk: f64,
    pub sim_risk_to_reward: f64,
    pub sim_reward: f64,
    /// Upper bound the risk input was allowed to take for this account.
    pub sim_risk_max: f64,
}

pub fn simulate(sim_risk: f64, sim_risk_to_reward: f64, account_size: f64) -> Simulation {
    Simulation {
        sim_risk,
        sim_risk_to_reward,
        sim_reward: sim_risk * sim_risk_to_reward,
        sim_risk_max: sim_risk_max(account_size),
    }
}

/// Starting value for the simulator's risk input: the plan's own risk,
/// clamped into the simulator's range.
pub fn default_sim_risk(risk_amount: f64, account_size: f64) -> f64 {
    risk_amount.min(sim_risk_max(account_size)).max(SIM_RISK_MIN)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reward_is_risk_times_ratio() {
        let sim = simulate(50.0, 2.0, 10_000.0);
        assert_eq!(sim.sim_reward, 100.0);
        assert_eq!(sim.sim_risk_max, 1_000.0);
    }

    #[test]
    fn default_risk_is_clamped() {
        assert_eq!(default_sim_risk(200.0, 10_000.0), 200.0);
        assert_eq!(default_sim_risk(5_000.0, 10_000.0), 1_000.0);
        assert_eq!(default_sim_risk(0.01, 10.0), 1.0);
    }
}
