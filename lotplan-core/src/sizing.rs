//! Position sizing: risk budget and stop distance to lots.
//!
//! # Formula
//! ```text
//! lot_size = round(risk_amount / (stop_loss_pips * pip_value), 2)
//! ```
//!
//! # Example
//! - Risk: 2% of $10,000 = $200
//! - Stop: 20 pips on EURUSD (pip value 10.0)
//! - Lots: 200 / (20 * 10) = 1.00

use crate::error::{require_positive, require_range, PlanError};
use crate::pair::PipValue;

/// Lot sizes are quoted to the micro-lot (0.01).
pub const LOT_DECIMALS: u32 = 2;

/// Round half away from zero to `decimals` places.
pub fn round_to(value: f64, decimals: u32) -> f64 {
    let scale = 10f64.powi(decimals as i32);
    (value * scale).round() / scale
}

/// Lots that lose exactly `risk_amount` if the stop is hit, rounded to 0.01.
pub fn lot_size(risk_amount: f64, stop_loss_pips: f64, pip_value: PipValue) -> Result<f64, PlanError> {
    require_range("risk_amount", risk_amount, 0.0, f64::INFINITY)?;
    let stop = require_positive("stop_loss_pips", stop_loss_pips)?;
    let pip = require_positive("pip_value", pip_value.get())?;

    Ok(round_to(risk_amount / (stop * pip), LOT_DECIMALS))
}

/// Currency lost at the stop for an already-rounded lot size.
pub fn stop_loss_value(stop_loss_pips: f64, pip_value: PipValue, lot_size: f64) -> f64 {
    stop_loss_pips * pip_value.get() * lot_size
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pair::PairSymbol;

    #[test]
    fn eurusd_two_percent_of_ten_thousand() {
        let lots = lot_size(200.0, 20.0, PairSymbol::EurUsd.pip_value()).unwrap();
        assert_eq!(lots, 1.0);
    }

    #[test]
    fn usdjpy_rounds_to_micro_lots() {
        // 200 / (20 * 9.1) = 1.0989...
        let lots = lot_size(200.0, 20.0, PairSymbol::UsdJpy.pip_value()).unwrap();
        assert!((lots - 1.10).abs() < 1e-12);
    }

    #[test]
    fn gold_has_large_lots() {
        // 100 / (50 * 1.0) = 2.0
        let lots = lot_size(100.0, 50.0, PairSymbol::XauUsd.pip_value()).unwrap();
        assert_eq!(lots, 2.0);
    }

    #[test]
    fn tiny_risk_rounds_to_zero() {
        let lots = lot_size(0.01, 100.0, PairSymbol::EurUsd.pip_value()).unwrap();
        assert_eq!(lots, 0.0);
    }

    #[test]
    fn zero_stop_is_division_undefined() {
        let err = lot_size(200.0, 0.0, PairSymbol::EurUsd.pip_value()).unwrap_err();
        assert_eq!(
            err,
            PlanError::DivisionUndefined {
                denominator: "stop_loss_pips",
                value: 0.0
            }
        );
    }

    #[test]
    fn negative_risk_is_rejected() {
        assert!(matches!(
            lot_size(-5.0, 20.0, PairSymbol::EurUsd.pip_value()),
            Err(PlanError::RangeViolation { field: "risk_amount", .. })
        ));
    }

    #[test]
    fn round_half_away_from_zero() {
        assert_eq!(round_to(0.125, 2), 0.13);
        assert_eq!(round_to(-0.125, 2), -0.13);
        assert_eq!(round_to(1.23456, 4), 1.2346);
    }

    #[test]
    fn stop_loss_value_matches_risk_at_exact_size() {
        let value = stop_loss_value(20.0, PairSymbol::EurUsd.pip_value(), 1.0);
        assert_eq!(value, 200.0);
    }
}
