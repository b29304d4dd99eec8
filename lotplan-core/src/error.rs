//! Error taxonomy for plan evaluation.

use thiserror::Error;

/// Errors surfaced by the planning engine.
///
/// Nothing here is transient: every variant describes an input that can never
/// produce a plan, so callers should report it rather than retry.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PlanError {
    /// A required denominator is zero, negative or not finite.
    #[error("{denominator} must be > 0 to compute a plan (got {value})")]
    DivisionUndefined {
        denominator: &'static str,
        value: f64,
    },

    /// A bounded input falls outside its domain. An open upper end is
    /// `f64::INFINITY`.
    #[error("{field} = {value} is outside [{min}, {}]", upper_bound(.max))]
    RangeViolation {
        field: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },

    /// Close percentages at TP1 and TP2 leave nothing coherent for TP3.
    ///
    /// A range violation on `tp2_close_pct` (at most `100 - tp1_pct`), kept
    /// separate so the message can name both percentages.
    #[error("close split {tp1_pct}% + {tp2_pct}% exceeds 100%")]
    InvalidSplit { tp1_pct: u8, tp2_pct: u8 },

    /// Symbol outside the supported pair set. A range violation over the
    /// symbol domain, raised only when parsing text.
    #[error("unknown pair symbol '{0}'")]
    UnknownPair(String),
}

impl PlanError {
    /// True for the failures a renderer should show as an inline warning
    /// instead of a hard error.
    pub fn is_division_undefined(&self) -> bool {
        matches!(self, Self::DivisionUndefined { .. })
    }

    /// True for an input outside its allowed domain, including the split and
    /// pair refinements.
    pub fn is_range_violation(&self) -> bool {
        matches!(
            self,
            Self::RangeViolation { .. } | Self::InvalidSplit { .. } | Self::UnknownPair(_)
        )
    }
}

fn upper_bound(max: &f64) -> String {
    if max.is_infinite() {
        "∞".to_string()
    } else {
        max.to_string()
    }
}

/// Fail with [`PlanError::DivisionUndefined`] unless `value` is a usable denominator.
pub(crate) fn require_positive(denominator: &'static str, value: f64) -> Result<f64, PlanError> {
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(PlanError::DivisionUndefined { denominator, value })
    }
}

/// Fail with [`PlanError::RangeViolation`] unless `min <= value <= max`.
pub(crate) fn require_range(
    field: &'static str,
    value: f64,
    min: f64,
    max: f64,
) -> Result<f64, PlanError> {
    if value.is_finite() && value >= min && value <= max {
        Ok(value)
    } else {
        Err(PlanError::RangeViolation {
            field,
            value,
            min,
            max,
        })
    }
}
