//! Drawdown recovery: how many winning trades at the simulator's reward it
//! takes to earn back a loss.
//!
//! The trade count is `floor(drawdown / per_trade) + 1`, so an exact multiple
//! still schedules one extra trade. The schedule itself is not stored: it is a
//! small descriptor that yields its steps on demand and can be walked again.

use std::iter::FusedIterator;

use serde::ser::Serializer;
use serde::Serialize;

use crate::error::{require_positive, PlanError};

/// Longest schedule a plan may carry. Past this the drawdown is out of reach
/// at the simulator's reward and every row would have to be rendered.
pub const MAX_RECOVERY_TRADES: u64 = 10_000;

/// Advisory reading of the trade count. Informational only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RecoveryOutlook {
    /// Three trades or fewer.
    NearRecovery,
    /// Four to six trades.
    SteadyProgress,
    /// More than six.
    ReconsiderRisk,
}

impl RecoveryOutlook {
    pub fn from_trades_needed(trades_needed: u64) -> Self {
        match trades_needed {
            0..=3 => Self::NearRecovery,
            4..=6 => Self::SteadyProgress,
            _ => Self::ReconsiderRisk,
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            Self::NearRecovery => "You're just a few trades away from recovery!",
            Self::SteadyProgress => "Steady trading can get you back on track.",
            Self::ReconsiderRisk => {
                "Consider lowering risk or improving win rate for safer recovery."
            }
        }
    }
}

/// One row of the recovery table.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RecoveryStep {
    /// 1-based.
    pub trade_index: u64,
    pub cumulative_profit: f64,
    /// Never negative.
    pub remaining_drawdown: f64,
}

/// Lazily produced, finite, restartable recovery schedule.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RecoverySchedule {
    drawdown_amount: f64,
    per_trade_profit: f64,
    trades_needed: u64,
}

impl RecoverySchedule {
    pub fn len(&self) -> u64 {
        self.trades_needed
    }

    pub fn is_empty(&self) -> bool {
        self.trades_needed == 0
    }

    /// Step `trade_index` (1-based), or `None` past the end.
    pub fn step(&self, trade_index: u64) -> Option<RecoveryStep> {
        if trade_index == 0 || trade_index > self.trades_needed {
            return None;
        }
        let cumulative_profit = self.per_trade_profit * trade_index as f64;
        Some(RecoveryStep {
            trade_index,
            cumulative_profit,
            remaining_drawdown: (self.drawdown_amount - cumulative_profit).max(0.0),
        })
    }

    pub fn iter(&self) -> RecoveryIter {
        RecoveryIter {
            schedule: *self,
            next: 1,
        }
    }
}

impl IntoIterator for RecoverySchedule {
    type Item = RecoveryStep;
    type IntoIter = RecoveryIter;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl IntoIterator for &RecoverySchedule {
    type Item = RecoveryStep;
    type IntoIter = RecoveryIter;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl Serialize for RecoverySchedule {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.iter())
    }
}

#[derive(Debug, Clone)]
pub struct RecoveryIter {
    schedule: RecoverySchedule,
    next: u64,
}

impl Iterator for RecoveryIter {
    type Item = RecoveryStep;

    fn next(&mut self) -> Option<Self::Item> {
        let step = self.schedule.step(self.next)?;
        self.next += 1;
        Some(step)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = (self.schedule.trades_needed + 1).saturating_sub(self.next);
        let remaining = usize::try_from(remaining).unwrap_or(usize::MAX);
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for RecoveryIter {}

impl FusedIterator for RecoveryIter {}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RecoveryPlan {
    pub drawdown_amount: f64,
    pub per_trade_profit: f64,
    pub trades_needed: u64,
    pub outlook: RecoveryOutlook,
    pub schedule: RecoverySchedule,
}

/// Plan the recovery of `drawdown_amount` at `sim_risk * sim_risk_to_reward`
/// per winning trade.
///
/// Returns `Ok(None)` when there is no drawdown to recover, and a
/// [`PlanError::RangeViolation`] on `trades_needed` when the schedule would
/// exceed [`MAX_RECOVERY_TRADES`].
pub fn plan(
    drawdown_amount: f64,
    sim_risk: f64,
    sim_risk_to_reward: f64,
) -> Result<Option<RecoveryPlan>, PlanError> {
    if drawdown_amount.is_nan() || drawdown_amount <= 0.0 {
        return Ok(None);
    }

    let per_trade_profit = require_positive("per_trade_profit", sim_risk * sim_risk_to_reward)?;
    let quotient = (drawdown_amount / per_trade_profit).floor();
    if !quotient.is_finite() || quotient >= MAX_RECOVERY_TRADES as f64 {
        return Err(PlanError::RangeViolation {
            field: "trades_needed",
            value: quotient + 1.0,
            min: 1.0,
            max: MAX_RECOVERY_TRADES as f64,
        });
    }
    let trades_needed = quotient as u64 + 1;

    Ok(Some(RecoveryPlan {
        drawdown_amount,
        per_trade_profit,
        trades_needed,
        outlook: RecoveryOutlook::from_trades_needed(trades_needed),
        schedule: RecoverySchedule {
            drawdown_amount,
            per_trade_profit,
            trades_needed,
        },
    }))
}
