//! Take-profit ladder: three targets at fixed multiples of the first.

use serde::{Deserialize, Serialize};

use crate::error::{require_positive, PlanError};
use crate::pair::PipValue;

/// TP2 sits 1.5x and TP3 2x as far as TP1.
pub const TP2_MULTIPLIER: f64 = 1.5;
pub const TP3_MULTIPLIER: f64 = 2.0;

/// One take-profit target.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TakeProfitLevel {
    pub pips: f64,
    pub dollar_value: f64,
    pub pct_of_account: f64,
    pub pct_of_goal: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TakeProfitLadder {
    pub tp1: TakeProfitLevel,
    pub tp2: TakeProfitLevel,
    pub tp3: TakeProfitLevel,
}

impl TakeProfitLadder {
    pub fn levels(&self) -> [&TakeProfitLevel; 3] {
        [&self.tp1, &self.tp2, &self.tp3]
    }
}

/// Account-level context the percentages are taken against.
#[derive(Debug, Clone, Copy)]
pub struct ProjectionBasis {
    pub account_size: f64,
    pub target_profit: f64,
}

/// Build the ladder for a sized position.
pub fn project(
    stop_loss_pips: f64,
    risk_to_reward: f64,
    pip_value: PipValue,
    lot_size: f64,
    basis: ProjectionBasis,
) -> Result<TakeProfitLadder, PlanError> {
    let account = require_positive("account_size", basis.account_size)?;
    let target = require_positive("target_profit", basis.target_profit)?;

    let tp1_pips = stop_loss_pips * risk_to_reward;
    let level = |pips: f64| {
        let dollar_value = pips * pip_value.get() * lot_size;
        TakeProfitLevel {
            pips,
            dollar_value,
            pct_of_account: dollar_value / account * 100.0,
            pct_of_goal: dollar_value / target * 100.0,
        }
    };

    Ok(TakeProfitLadder {
        tp1: level(tp1_pips),
        tp2: level(tp1_pips * TP2_MULTIPLIER),
        tp3: level(tp1_pips * TP3_MULTIPLIER),
    })
}
