//! Plan inputs: one immutable snapshot per evaluation.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::advisory::TradeManagement;
use crate::allocation::CloseSplit;
use crate::error::{require_range, PlanError};
use crate::pair::PairSymbol;

pub const RISK_PERCENT_MIN: f64 = 0.1;
pub const RISK_PERCENT_MAX: f64 = 10.0;
pub const RISK_AMOUNT_MIN: f64 = 1.0;
pub const RR_MIN: f64 = 1.0;
pub const RR_MAX: f64 = 5.0;
/// The primary R:R moves in half steps.
pub const RR_STEP: f64 = 0.5;
pub const SIM_RISK_MIN: f64 = 1.0;

/// Period the profit target refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum GoalType {
    #[default]
    Daily,
    Weekly,
    Monthly,
}

impl GoalType {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Daily => "Daily",
            Self::Weekly => "Weekly",
            Self::Monthly => "Monthly",
        }
    }
}

impl fmt::Display for GoalType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// How the per-trade risk is expressed.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum RiskMode {
    /// Percent of the account, 0.1 to 10.0.
    PercentOfAccount { percent: f64 },
    /// Fixed currency amount, at least 1.
    FixedAmount { amount: f64 },
}

impl RiskMode {
    /// Currency at risk for a single trade.
    pub fn risk_amount(&self, account_size: f64) -> f64 {
        match *self {
            Self::PercentOfAccount { percent } => percent / 100.0 * account_size,
            Self::FixedAmount { amount } => amount,
        }
    }

    fn validate(&self) -> Result<(), PlanError> {
        match *self {
            Self::PercentOfAccount { percent } => {
                require_range("risk_percent", percent, RISK_PERCENT_MIN, RISK_PERCENT_MAX)?;
            }
            Self::FixedAmount { amount } => {
                require_range("risk_amount", amount, RISK_AMOUNT_MIN, f64::INFINITY)?;
            }
        }
        Ok(())
    }
}

impl Default for RiskMode {
    fn default() -> Self {
        Self::PercentOfAccount { percent: 2.0 }
    }
}

/// Upper bound of the simulator's risk input for a given account.
pub fn sim_risk_max(account_size: f64) -> f64 {
    (account_size * 0.1).max(10.0)
}

/// Everything one evaluation needs.
///
/// Positivity of the divisors (`stop_loss_pips`, `account_size`,
/// `target_profit`) is not checked by [`PlanInputs::validate`]; the components
/// that divide by them report [`PlanError::DivisionUndefined`] instead.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanInputs {
    pub goal_type: GoalType,
    pub target_profit: f64,
    pub account_size: f64,
    pub risk: RiskMode,
    pub risk_to_reward: f64,
    pub stop_loss_pips: f64,
    pub pair: PairSymbol,
    /// Percent of the position closed at TP1.
    pub tp1_close_pct: u8,
    /// Percent closed at TP2; at most `100 - tp1_close_pct`.
    pub tp2_close_pct: u8,
    /// Zero means no drawdown to recover.
    pub drawdown_amount: f64,
    pub sim_risk_amount: f64,
    pub sim_risk_to_reward: f64,
    #[serde(default)]
    pub management: TradeManagement,
}

impl PlanInputs {
    pub fn risk_amount(&self) -> f64 {
        self.risk.risk_amount(self.account_size)
    }

    pub fn close_split(&self) -> Result<CloseSplit, PlanError> {
        CloseSplit::new(self.tp1_close_pct, self.tp2_close_pct)
    }

    /// Check every bounded field. The engine calls this before computing.
    pub fn validate(&self) -> Result<(), PlanError> {
        self.risk.validate()?;

        require_range("risk_to_reward", self.risk_to_reward, RR_MIN, RR_MAX)?;
        let steps = (self.risk_to_reward - RR_MIN) / RR_STEP;
        if (steps - steps.round()).abs() > 1e-9 {
            return Err(PlanError::RangeViolation {
                field: "risk_to_reward",
                value: self.risk_to_reward,
                min: RR_MIN,
                max: RR_MAX,
            });
        }

        self.close_split()?;

        require_range("drawdown_amount", self.drawdown_amount, 0.0, f64::INFINITY)?;
        require_range(
            "sim_risk_amount",
            self.sim_risk_amount,
            SIM_RISK_MIN,
            sim_risk_max(self.account_size),
        )?;
        require_range("sim_risk_to_reward", self.sim_risk_to_reward, RR_MIN, RR_MAX)?;

        self.management.validate()
    }
}
