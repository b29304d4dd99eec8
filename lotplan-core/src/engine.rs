//! Trade plan engine: composes the sub-calculations into one result.
//!
//! Order of evaluation:
//! 1. Validate inputs
//! 2. Resolve pip value for the pair
//! 3. Size the position
//! 4. Project the TP ladder
//! 5. Allocate the position across the ladder
//! 6. Run the risk/reward simulator
//! 7. Plan drawdown recovery from the simulator's reward
//!
//! Every call recomputes everything from the inputs; nothing is cached.

use serde::Serialize;
use tracing::{debug, warn};

use crate::advisory::ManagementAdvice;
use crate::allocation::{allocate, MultiTradePlan};
use crate::error::{require_positive, PlanError};
use crate::inputs::{GoalType, PlanInputs};
use crate::pair::{self, PairSymbol, PipValue};
use crate::recovery::{self, RecoveryPlan};
use crate::simulator::{simulate, Simulation};
use crate::sizing::{lot_size, stop_loss_value};
use crate::take_profit::{project, ProjectionBasis, TakeProfitLadder};

/// Fully derived plan, ready to render.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TradePlanResult {
    pub goal_type: GoalType,
    pub target_profit: f64,
    pub account_size: f64,
    pub pair: PairSymbol,
    pub pip_value: PipValue,
    pub risk_amount: f64,
    pub risk_to_reward: f64,
    pub stop_loss_pips: f64,
    /// Loss at the stop for the rounded lot size.
    pub stop_loss_value: f64,
    pub lot_size: f64,
    pub take_profits: TakeProfitLadder,
    /// TP1's value alone reaches the target.
    pub goal_met: bool,
    pub multi_trade: MultiTradePlan,
    pub simulation: Simulation,
    pub management: ManagementAdvice,
    /// `None` when there is no drawdown to recover.
    pub recovery: Option<RecoveryPlan>,
}

impl TradePlanResult {
    pub fn close_split(&self) -> [u8; 3] {
        [
            self.multi_trade.tp1.pct,
            self.multi_trade.tp2.pct,
            self.multi_trade.tp3.pct,
        ]
    }
}

/// Stateless planner. Holds no data between calls.
#[derive(Debug, Clone, Copy, Default)]
pub struct TradePlanEngine;

impl TradePlanEngine {
    pub fn new() -> Self {
        Self
    }

    pub fn evaluate(&self, inputs: &PlanInputs) -> Result<TradePlanResult, PlanError> {
        evaluate(inputs).map_err(|err| {
            warn!(%err, pair = %inputs.pair, "plan rejected");
            err
        })
    }
}

/// Evaluate one input snapshot.
pub fn evaluate(inputs: &PlanInputs) -> Result<TradePlanResult, PlanError> {
    inputs.validate()?;
    // Percent risk is derived from the account, so check it first.
    require_positive("account_size", inputs.account_size)?;

    let pip_value = pair::resolve(inputs.pair);
    let risk_amount = inputs.risk_amount();
    debug!(pair = %inputs.pair, pip_value = pip_value.get(), risk_amount, "resolved pip value");

    let lots = lot_size(risk_amount, inputs.stop_loss_pips, pip_value)?;
    debug!(lot_size = lots, stop_loss_pips = inputs.stop_loss_pips, "sized position");

    let take_profits = project(
        inputs.stop_loss_pips,
        inputs.risk_to_reward,
        pip_value,
        lots,
        ProjectionBasis {
            account_size: inputs.account_size,
            target_profit: inputs.target_profit,
        },
    )?;
    debug!(
        tp1 = take_profits.tp1.dollar_value,
        tp2 = take_profits.tp2.dollar_value,
        tp3 = take_profits.tp3.dollar_value,
        "projected take-profit ladder"
    );

    let split = inputs.close_split()?;
    let multi_trade = allocate(lots, split, &take_profits, inputs.target_profit);
    debug!(
        split = ?split.as_array(),
        total_profit = multi_trade.total_profit,
        "allocated position"
    );

    let simulation = simulate(
        inputs.sim_risk_amount,
        inputs.sim_risk_to_reward,
        inputs.account_size,
    );

    let recovery = recovery::plan(
        inputs.drawdown_amount,
        simulation.sim_risk,
        simulation.sim_risk_to_reward,
    )?;
    if let Some(r) = &recovery {
        debug!(trades_needed = r.trades_needed, per_trade = r.per_trade_profit, "planned recovery");
    }

    let management = inputs
        .management
        .resolve(take_profits.tp1.pips, inputs.stop_loss_pips);

    Ok(TradePlanResult {
        goal_type: inputs.goal_type,
        target_profit: inputs.target_profit,
        account_size: inputs.account_size,
        pair: inputs.pair,
        pip_value,
        risk_amount,
        risk_to_reward: inputs.risk_to_reward,
        stop_loss_pips: inputs.stop_loss_pips,
        stop_loss_value: stop_loss_value(inputs.stop_loss_pips, pip_value, lots),
        lot_size: lots,
        goal_met: take_profits.tp1.dollar_value >= inputs.target_profit,
        take_profits,
        multi_trade,
        simulation,
        management,
        recovery,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::advisory::{TradeManagement, TrailingStopRequest};
    use crate::inputs::tests::sample_inputs;
    use crate::inputs::RiskMode;

    #[test]
    fn sample_plan() {
        let result = TradePlanEngine::new().evaluate(&sample_inputs()).unwrap();

        assert_eq!(result.pip_value.get(), 10.0);
        assert_eq!(result.lot_size, 1.0);
        assert_eq!(result.take_profits.tp1.pips, 40.0);
        assert_eq!(result.take_profits.tp1.dollar_value, 400.0);
        assert!((result.stop_loss_value - 200.0).abs() < 1e-9);
        assert!(result.goal_met); // 400 >= 300
        assert_eq!(result.close_split(), [33, 33, 34]);
        assert_eq!(result.simulation.sim_reward, 400.0);
        assert!(result.recovery.is_none());
        assert!(result.management.is_empty());
    }

    #[test]
    fn goal_is_judged_on_tp1_alone() {
        let mut inputs = sample_inputs();
        inputs.target_profit = 500.0;
        let result = evaluate(&inputs).unwrap();
        assert!(!result.goal_met);
        // Scaling out still reaches it: 132 + 198 + 272 = 602.
        assert!(result.multi_trade.total_goal_met);
    }

    #[test]
    fn recovery_uses_simulator_not_primary_risk() {
        let mut inputs = sample_inputs();
        inputs.drawdown_amount = 500.0;
        inputs.sim_risk_amount = 50.0;
        inputs.sim_risk_to_reward = 2.0;
        let result = evaluate(&inputs).unwrap();

        let recovery = result.recovery.unwrap();
        assert_eq!(recovery.per_trade_profit, 100.0);
        assert_eq!(recovery.trades_needed, 6);
    }

    #[test]
    fn zero_stop_loss_surfaces_division_undefined() {
        let mut inputs = sample_inputs();
        inputs.stop_loss_pips = 0.0;
        let err = TradePlanEngine::new().evaluate(&inputs).unwrap_err();
        assert!(err.is_division_undefined());
    }

    #[test]
    fn zero_account_surfaces_division_undefined() {
        let mut inputs = sample_inputs();
        inputs.account_size = 0.0;
        inputs.risk = RiskMode::FixedAmount { amount: 100.0 };
        inputs.sim_risk_amount = 5.0;
        let err = evaluate(&inputs).unwrap_err();
        assert_eq!(
            err,
            PlanError::DivisionUndefined {
                denominator: "account_size",
                value: 0.0
            }
        );
    }

    #[test]
    fn negative_account_in_percent_mode_is_division_undefined() {
        let mut inputs = sample_inputs();
        inputs.account_size = -1_000.0;
        inputs.risk = RiskMode::PercentOfAccount { percent: 2.0 };
        inputs.sim_risk_amount = 5.0;
        let err = TradePlanEngine::new().evaluate(&inputs).unwrap_err();
        assert_eq!(
            err,
            PlanError::DivisionUndefined {
                denominator: "account_size",
                value: -1_000.0
            }
        );
    }

    #[test]
    fn range_violation_is_reported_before_any_math() {
        let mut inputs = sample_inputs();
        inputs.sim_risk_to_reward = 9.0;
        inputs.stop_loss_pips = 0.0;
        assert!(matches!(
            evaluate(&inputs),
            Err(PlanError::RangeViolation {
                field: "sim_risk_to_reward",
                ..
            })
        ));
    }

    #[test]
    fn management_defaults_resolve_from_plan() {
        let mut inputs = sample_inputs();
        inputs.management = TradeManagement {
            trailing_stop: Some(TrailingStopRequest::default()),
            breakeven_after_tp1: true,
        };
        let result = evaluate(&inputs).unwrap();
        let trailing = result.management.trailing_stop.unwrap();
        assert_eq!(trailing.start_after_pips, 40.0);
        assert_eq!(trailing.distance_pips, 20.0);
        assert!(result.management.breakeven_after_tp1);
    }

    #[test]
    fn evaluation_is_repeatable() {
        let mut inputs = sample_inputs();
        inputs.drawdown_amount = 730.0;
        let a = evaluate(&inputs).unwrap();
        let b = evaluate(&inputs).unwrap();
        assert_eq!(a, b);
    }
}
