//! Lot Plan Core: position sizing and trade planning for retail FX traders.
//!
//! Given an account balance, a risk budget, a stop-loss distance and a
//! reward ratio, the engine derives:
//! - Pip value for the pair (fixed approximation table)
//! - Position size in lots
//! - A three-level take-profit ladder with account and goal percentages
//! - A scale-out allocation across the ladder
//! - A what-if risk/reward simulation
//! - A drawdown recovery schedule
//!
//! Everything is a pure function of one [`PlanInputs`] snapshot. Rendering
//! belongs to the caller.

pub mod advisory;
pub mod allocation;
pub mod config;
pub mod engine;
pub mod error;
pub mod inputs;
pub mod pair;
pub mod recovery;
pub mod simulator;
pub mod sizing;
pub mod take_profit;

pub use advisory::{ManagementAdvice, TradeManagement, TrailingStop, TrailingStopRequest};
pub use allocation::{CloseSplit, MultiTradePlan, TradeLeg};
pub use config::{ConfigError, PlanConfig};
pub use engine::{evaluate, TradePlanEngine, TradePlanResult};
pub use error::PlanError;
pub use inputs::{GoalType, PlanInputs, RiskMode};
pub use pair::{PairCategory, PairSymbol, PipValue};
pub use recovery::{RecoveryOutlook, RecoveryPlan, RecoverySchedule, RecoveryStep};
pub use simulator::Simulation;
pub use take_profit::{TakeProfitLadder, TakeProfitLevel};

#[cfg(test)]
mod tests {
    use super::*;

    /// Compile-time check: results can be handed to a render thread.
    #[allow(dead_code)]
    fn assert_send_sync() {
        fn require_send<T: Send>() {}
        fn require_sync<T: Sync>() {}

        require_send::<PlanInputs>();
        require_sync::<PlanInputs>();
        require_send::<TradePlanResult>();
        require_sync::<TradePlanResult>();
        require_send::<TradePlanEngine>();
        require_sync::<TradePlanEngine>();
        require_send::<PlanError>();
        require_sync::<PlanError>();
        require_send::<ConfigError>();
        require_sync::<ConfigError>();
    }

    /// Compile-time check: the engine borrows inputs and returns an owned
    /// result, so it cannot hold on to caller state between calls.
    #[allow(dead_code)]
    fn engine_signature_is_stateless(
        engine: &TradePlanEngine,
        inputs: &PlanInputs,
    ) -> Result<TradePlanResult, PlanError> {
        engine.evaluate(inputs)
    }
}
