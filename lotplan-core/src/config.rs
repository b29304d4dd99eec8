//! TOML plan configuration.
//!
//! Every field is optional in the file so that command-line flags can fill or
//! override it; [`PlanConfig::into_inputs`] applies the defaults and reports
//! anything still missing.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::advisory::{TradeManagement, TrailingStopRequest};
use crate::error::PlanError;
use crate::inputs::{GoalType, PlanInputs, RiskMode};
use crate::pair::PairSymbol;
use crate::simulator::default_sim_risk;

pub const DEFAULT_RISK_PERCENT: f64 = 2.0;
pub const DEFAULT_RISK_TO_REWARD: f64 = 2.0;
pub const DEFAULT_TP1_PCT: u8 = 33;
pub const DEFAULT_TP2_PCT: u8 = 33;

/// Commented starting point written by `lotplan init`.
pub const SAMPLE_CONFIG: &str = r#"# Lot size planner configuration.

goal_type = "daily"        # daily | weekly | monthly
target_profit = 300.0
account_size = 10000.0
pair = "EURUSD"
stop_loss_pips = 20.0
risk_to_reward = 2.0       # 1.0 to 5.0 in steps of 0.5

[risk]
mode = "percent"           # percent | fixed
percent = 2.0              # 0.1 to 10.0, used by mode = "percent"
# amount = 50.0            # at least 1, used by mode = "fixed"

[split]
tp1_pct = 33
tp2_pct = 33               # TP3 closes the rest

[simulator]
# risk_amount = 200.0      # defaults to the plan's risk
# risk_to_reward = 2.0     # defaults to the plan's R:R

[recovery]
drawdown_amount = 0.0

[management]
trailing_stop = false
# trailing_start_pips = 40.0
# trailing_distance_pips = 20.0
breakeven_after_tp1 = false
"#;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("parse config TOML: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("serialize config TOML: {0}")]
    Serialize(#[from] toml::ser::Error),
    #[error("missing required setting '{0}'")]
    Missing(&'static str),
    #[error(transparent)]
    Plan(#[from] PlanError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskModeKind {
    Percent,
    Fixed,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RiskSection {
    pub mode: Option<RiskModeKind>,
    pub percent: Option<f64>,
    pub amount: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SplitSection {
    pub tp1_pct: Option<u8>,
    pub tp2_pct: Option<u8>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SimulatorSection {
    pub risk_amount: Option<f64>,
    pub risk_to_reward: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RecoverySection {
    pub drawdown_amount: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ManagementSection {
    pub trailing_stop: Option<bool>,
    pub trailing_start_pips: Option<f64>,
    pub trailing_distance_pips: Option<f64>,
    pub breakeven_after_tp1: Option<bool>,
}

/// File/flag representation of [`PlanInputs`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PlanConfig {
    pub goal_type: Option<GoalType>,
    pub target_profit: Option<f64>,
    pub account_size: Option<f64>,
    pub pair: Option<String>,
    pub stop_loss_pips: Option<f64>,
    pub risk_to_reward: Option<f64>,
    #[serde(default)]
    pub risk: RiskSection,
    #[serde(default)]
    pub split: SplitSection,
    #[serde(default)]
    pub simulator: SimulatorSection,
    #[serde(default)]
    pub recovery: RecoverySection,
    #[serde(default)]
    pub management: ManagementSection,
}

impl PlanConfig {
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&content)
    }

    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Layer `overrides` on top of `self`; any value set in `overrides` wins.
    pub fn merge(self, overrides: PlanConfig) -> PlanConfig {
        PlanConfig {
            goal_type: overrides.goal_type.or(self.goal_type),
            target_profit: overrides.target_profit.or(self.target_profit),
            account_size: overrides.account_size.or(self.account_size),
            pair: overrides.pair.or(self.pair),
            stop_loss_pips: overrides.stop_loss_pips.or(self.stop_loss_pips),
            risk_to_reward: overrides.risk_to_reward.or(self.risk_to_reward),
            risk: RiskSection {
                mode: overrides.risk.mode.or(self.risk.mode),
                percent: overrides.risk.percent.or(self.risk.percent),
                amount: overrides.risk.amount.or(self.risk.amount),
            },
            split: SplitSection {
                tp1_pct: overrides.split.tp1_pct.or(self.split.tp1_pct),
                tp2_pct: overrides.split.tp2_pct.or(self.split.tp2_pct),
            },
            simulator: SimulatorSection {
                risk_amount: overrides.simulator.risk_amount.or(self.simulator.risk_amount),
                risk_to_reward: overrides
                    .simulator
                    .risk_to_reward
                    .or(self.simulator.risk_to_reward),
            },
            recovery: RecoverySection {
                drawdown_amount: overrides
                    .recovery
                    .drawdown_amount
                    .or(self.recovery.drawdown_amount),
            },
            management: ManagementSection {
                trailing_stop: overrides.management.trailing_stop.or(self.management.trailing_stop),
                trailing_start_pips: overrides
                    .management
                    .trailing_start_pips
                    .or(self.management.trailing_start_pips),
                trailing_distance_pips: overrides
                    .management
                    .trailing_distance_pips
                    .or(self.management.trailing_distance_pips),
                breakeven_after_tp1: overrides
                    .management
                    .breakeven_after_tp1
                    .or(self.management.breakeven_after_tp1),
            },
        }
    }

    fn risk_mode(&self) -> Result<RiskMode, ConfigError> {
        let kind = match self.risk.mode {
            Some(kind) => kind,
            None if self.risk.amount.is_some() && self.risk.percent.is_none() => {
                RiskModeKind::Fixed
            }
            None => RiskModeKind::Percent,
        };
        match kind {
            RiskModeKind::Percent => Ok(RiskMode::PercentOfAccount {
                percent: self.risk.percent.unwrap_or(DEFAULT_RISK_PERCENT),
            }),
            RiskModeKind::Fixed => Ok(RiskMode::FixedAmount {
                amount: self.risk.amount.ok_or(ConfigError::Missing("risk.amount"))?,
            }),
        }
    }

    fn management(&self) -> TradeManagement {
        let m = &self.management;
        // Tuning values imply the toggle only when it is left unset.
        let trailing_requested = m
            .trailing_stop
            .unwrap_or(m.trailing_start_pips.is_some() || m.trailing_distance_pips.is_some());
        TradeManagement {
            trailing_stop: trailing_requested.then_some(TrailingStopRequest {
                start_after_pips: m.trailing_start_pips,
                distance_pips: m.trailing_distance_pips,
            }),
            breakeven_after_tp1: m.breakeven_after_tp1.unwrap_or(false),
        }
    }

    /// Resolve defaults, parse the pair and validate.
    pub fn into_inputs(self) -> Result<PlanInputs, ConfigError> {
        let account_size = self.account_size.ok_or(ConfigError::Missing("account_size"))?;
        let target_profit = self.target_profit.ok_or(ConfigError::Missing("target_profit"))?;
        let stop_loss_pips = self
            .stop_loss_pips
            .ok_or(ConfigError::Missing("stop_loss_pips"))?;
        let pair = self
            .pair
            .as_deref()
            .ok_or(ConfigError::Missing("pair"))?
            .parse::<PairSymbol>()?;

        let risk = self.risk_mode()?;
        let risk_to_reward = self.risk_to_reward.unwrap_or(DEFAULT_RISK_TO_REWARD);
        let sim_risk_amount = self
            .simulator
            .risk_amount
            .unwrap_or_else(|| default_sim_risk(risk.risk_amount(account_size), account_size));

        let inputs = PlanInputs {
            goal_type: self.goal_type.unwrap_or_default(),
            target_profit,
            account_size,
            risk,
            risk_to_reward,
            stop_loss_pips,
            pair,
            tp1_close_pct: self.split.tp1_pct.unwrap_or(DEFAULT_TP1_PCT),
            tp2_close_pct: self.split.tp2_pct.unwrap_or(DEFAULT_TP2_PCT),
            drawdown_amount: self.recovery.drawdown_amount.unwrap_or(0.0),
            sim_risk_amount,
            sim_risk_to_reward: self.simulator.risk_to_reward.unwrap_or(risk_to_reward),
            management: self.management(),
        };
        inputs.validate()?;
        Ok(inputs)
    }
}
