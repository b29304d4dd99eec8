//! Trade-management advisory: trailing stop and breakeven.
//!
//! Nothing here is enforced. The planner only resolves the numbers so they can
//! be printed next to the plan; placing and moving the stop is up to the
//! trader or the broker platform.

use serde::{Deserialize, Serialize};

use crate::error::{require_range, PlanError};

/// Minimum trailing start/distance in pips.
pub const TRAILING_MIN_PIPS: f64 = 1.0;

pub const EXECUTION_DISCLAIMER: &str =
    "Platform execution of SL/BE must be handled by your broker or manually.";

/// Trailing stop request. Unset fields fall back to the plan's own distances.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct TrailingStopRequest {
    /// Defaults to the TP1 distance.
    #[serde(default)]
    pub start_after_pips: Option<f64>,
    /// Defaults to the stop-loss distance.
    #[serde(default)]
    pub distance_pips: Option<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct TradeManagement {
    #[serde(default)]
    pub trailing_stop: Option<TrailingStopRequest>,
    #[serde(default)]
    pub breakeven_after_tp1: bool,
}

impl TradeManagement {
    pub(crate) fn validate(&self) -> Result<(), PlanError> {
        if let Some(trailing) = &self.trailing_stop {
            if let Some(start) = trailing.start_after_pips {
                require_range("trailing_start_pips", start, TRAILING_MIN_PIPS, f64::INFINITY)?;
            }
            if let Some(distance) = trailing.distance_pips {
                require_range("trailing_distance_pips", distance, TRAILING_MIN_PIPS, f64::INFINITY)?;
            }
        }
        Ok(())
    }

    /// Fill in defaults from the computed plan.
    pub fn resolve(&self, tp1_pips: f64, stop_loss_pips: f64) -> ManagementAdvice {
        ManagementAdvice {
            trailing_stop: self.trailing_stop.map(|t| TrailingStop {
                start_after_pips: t.start_after_pips.unwrap_or(tp1_pips),
                distance_pips: t.distance_pips.unwrap_or(stop_loss_pips),
            }),
            breakeven_after_tp1: self.breakeven_after_tp1,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrailingStop {
    pub start_after_pips: f64,
    pub distance_pips: f64,
}

/// Resolved advisory attached to a plan result.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ManagementAdvice {
    pub trailing_stop: Option<TrailingStop>,
    pub breakeven_after_tp1: bool,
}

impl ManagementAdvice {
    pub fn is_empty(&self) -> bool {
        self.trailing_stop.is_none() && !self.breakeven_after_tp1
    }

    /// One line per enabled rule.
    pub fn notes(&self) -> Vec<String> {
        let mut notes = Vec::new();
        if let Some(t) = &self.trailing_stop {
            notes.push(format!(
                "Trailing starts after {} pips, trailing {} pips.",
                t.start_after_pips, t.distance_pips
            ));
        }
        if self.breakeven_after_tp1 {
            notes.push("SL moves to entry price after TP1 is hit.".to_string());
        }
        notes
    }
}
