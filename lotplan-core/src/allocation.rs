//! Multi-trade allocation: scale out of one position across the TP ladder.

use serde::{Deserialize, Serialize};

use crate::error::PlanError;
use crate::sizing::round_to;
use crate::take_profit::TakeProfitLadder;

/// Partial lots are quoted to four decimals, finer than the sizing step.
pub const LEG_LOT_DECIMALS: u32 = 4;

/// Close percentages per target. TP3 always takes the remainder, so the three
/// always sum to 100.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CloseSplit {
    tp1_pct: u8,
    tp2_pct: u8,
}

impl CloseSplit {
    pub fn new(tp1_pct: u8, tp2_pct: u8) -> Result<Self, PlanError> {
        if tp1_pct > 100 || tp2_pct > 100 - tp1_pct {
            return Err(PlanError::InvalidSplit { tp1_pct, tp2_pct });
        }
        Ok(Self { tp1_pct, tp2_pct })
    }

    pub fn tp1_pct(&self) -> u8 {
        self.tp1_pct
    }

    pub fn tp2_pct(&self) -> u8 {
        self.tp2_pct
    }

    pub fn tp3_pct(&self) -> u8 {
        100 - self.tp1_pct - self.tp2_pct
    }

    pub fn as_array(&self) -> [u8; 3] {
        [self.tp1_pct, self.tp2_pct, self.tp3_pct()]
    }
}

impl Default for CloseSplit {
    fn default() -> Self {
        Self {
            tp1_pct: 33,
            tp2_pct: 33,
        }
    }
}

/// Portion of the position closed at one target.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TradeLeg {
    pub pct: u8,
    pub lots: f64,
    pub profit: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MultiTradePlan {
    pub tp1: TradeLeg,
    pub tp2: TradeLeg,
    pub tp3: TradeLeg,
    pub total_profit: f64,
    pub total_goal_met: bool,
}

impl MultiTradePlan {
    pub fn legs(&self) -> [&TradeLeg; 3] {
        [&self.tp1, &self.tp2, &self.tp3]
    }
}

/// Split `lot_size` by `split` and weight each target's value by its share.
pub fn allocate(
    lot_size: f64,
    split: CloseSplit,
    ladder: &TakeProfitLadder,
    target_profit: f64,
) -> MultiTradePlan {
    let leg = |pct: u8, dollar_value: f64| {
        let share = f64::from(pct) / 100.0;
        TradeLeg {
            pct,
            lots: round_to(lot_size * share, LEG_LOT_DECIMALS),
            profit: dollar_value * share,
        }
    };

    let tp1 = leg(split.tp1_pct(), ladder.tp1.dollar_value);
    let tp2 = leg(split.tp2_pct(), ladder.tp2.dollar_value);
    let tp3 = leg(split.tp3_pct(), ladder.tp3.dollar_value);
    let total_profit = tp1.profit + tp2.profit + tp3.profit;

    MultiTradePlan {
        tp1,
        tp2,
        tp3,
        total_profit,
        total_goal_met: total_profit >= target_profit,
    }
}
