//! Supported pair symbols and their approximate per-lot pip values.
//!
//! The pip value table is a fixed approximation quoted in account currency per
//! pip per standard lot. It does not follow live rates, lot size or account
//! currency, so treat the numbers as planning figures only:
//!
//! | Quote | Pip value |
//! |-------|-----------|
//! | JPY-quoted pairs | 9.1 |
//! | XAUUSD | 1.0 |
//! | BTCUSD | 0.1 |
//! | everything else | 10.0 |

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::PlanError;

/// Display grouping for the pair picker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PairCategory {
    Major,
    GbpCross,
    EurCross,
    JpyCross,
    OtherCross,
    MetalOrCrypto,
}

impl PairCategory {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Major => "Majors",
            Self::GbpCross => "GBP crosses",
            Self::EurCross => "EUR crosses",
            Self::JpyCross => "JPY crosses",
            Self::OtherCross => "Other crosses",
            Self::MetalOrCrypto => "Metals & crypto",
        }
    }
}

/// Every symbol the planner can size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum PairSymbol {
    // Majors
    EurUsd,
    GbpUsd,
    UsdJpy,
    UsdChf,
    UsdCad,
    AudUsd,
    NzdUsd,
    // GBP crosses
    GbpAud,
    GbpCad,
    GbpJpy,
    GbpNzd,
    GbpChf,
    GbpEur,
    // EUR crosses
    EurJpy,
    EurGbp,
    EurAud,
    EurCad,
    EurNzd,
    EurChf,
    // JPY crosses
    ChfJpy,
    CadJpy,
    AudJpy,
    NzdJpy,
    // Other crosses
    AudCad,
    AudChf,
    AudNzd,
    CadChf,
    NzdCad,
    NzdChf,
    // Metals & crypto
    XauUsd,
    BtcUsd,
}

impl PairSymbol {
    /// All supported symbols in category order.
    pub const ALL: [PairSymbol; 31] = [
        Self::EurUsd,
        Self::GbpUsd,
        Self::UsdJpy,
        Self::UsdChf,
        Self::UsdCad,
        Self::AudUsd,
        Self::NzdUsd,
        Self::GbpAud,
        Self::GbpCad,
        Self::GbpJpy,
        Self::GbpNzd,
        Self::GbpChf,
        Self::GbpEur,
        Self::EurJpy,
        Self::EurGbp,
        Self::EurAud,
        Self::EurCad,
        Self::EurNzd,
        Self::EurChf,
        Self::ChfJpy,
        Self::CadJpy,
        Self::AudJpy,
        Self::NzdJpy,
        Self::AudCad,
        Self::AudChf,
        Self::AudNzd,
        Self::CadChf,
        Self::NzdCad,
        Self::NzdChf,
        Self::XauUsd,
        Self::BtcUsd,
    ];

    /// All supported symbols sorted alphabetically, the order a picker lists them in.
    pub fn sorted() -> Vec<PairSymbol> {
        let mut pairs = Self::ALL.to_vec();
        pairs.sort_by_key(|p| p.as_str());
        pairs
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::EurUsd => "EURUSD",
            Self::GbpUsd => "GBPUSD",
            Self::UsdJpy => "USDJPY",
            Self::UsdChf => "USDCHF",
            Self::UsdCad => "USDCAD",
            Self::AudUsd => "AUDUSD",
            Self::NzdUsd => "NZDUSD",
            Self::GbpAud => "GBPAUD",
            Self::GbpCad => "GBPCAD",
            Self::GbpJpy => "GBPJPY",
            Self::GbpNzd => "GBPNZD",
            Self::GbpChf => "GBPCHF",
            Self::GbpEur => "GBPEUR",
            Self::EurJpy => "EURJPY",
            Self::EurGbp => "EURGBP",
            Self::EurAud => "EURAUD",
            Self::EurCad => "EURCAD",
            Self::EurNzd => "EURNZD",
            Self::EurChf => "EURCHF",
            Self::ChfJpy => "CHFJPY",
            Self::CadJpy => "CADJPY",
            Self::AudJpy => "AUDJPY",
            Self::NzdJpy => "NZDJPY",
            Self::AudCad => "AUDCAD",
            Self::AudChf => "AUDCHF",
            Self::AudNzd => "AUDNZD",
            Self::CadChf => "CADCHF",
            Self::NzdCad => "NZDCAD",
            Self::NzdChf => "NZDCHF",
            Self::XauUsd => "XAUUSD",
            Self::BtcUsd => "BTCUSD",
        }
    }

    pub fn category(&self) -> PairCategory {
        match self {
            Self::EurUsd
            | Self::GbpUsd
            | Self::UsdJpy
            | Self::UsdChf
            | Self::UsdCad
            | Self::AudUsd
            | Self::NzdUsd => PairCategory::Major,
            Self::GbpAud
            | Self::GbpCad
            | Self::GbpJpy
            | Self::GbpNzd
            | Self::GbpChf
            | Self::GbpEur => PairCategory::GbpCross,
            Self::EurJpy
            | Self::EurGbp
            | Self::EurAud
            | Self::EurCad
            | Self::EurNzd
            | Self::EurChf => PairCategory::EurCross,
            Self::ChfJpy | Self::CadJpy | Self::AudJpy | Self::NzdJpy => PairCategory::JpyCross,
            Self::AudCad
            | Self::AudChf
            | Self::AudNzd
            | Self::CadChf
            | Self::NzdCad
            | Self::NzdChf => PairCategory::OtherCross,
            Self::XauUsd | Self::BtcUsd => PairCategory::MetalOrCrypto,
        }
    }

    /// Quote currency: the last three letters of the symbol.
    pub fn quote(&self) -> &'static str {
        &self.as_str()[3..]
    }

    /// Resolve the approximate pip value for one standard lot.
    pub fn pip_value(&self) -> PipValue {
        match self {
            Self::XauUsd => PipValue(1.0),
            Self::BtcUsd => PipValue(0.1),
            _ if self.quote() == "JPY" => PipValue(9.1),
            _ => PipValue(10.0),
        }
    }
}

impl fmt::Display for PairSymbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PairSymbol {
    type Err = PlanError;

    /// Case-insensitive; a `/` separator (`EUR/USD`) is accepted.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .trim()
            .chars()
            .filter(|c| *c != '/')
            .collect::<String>()
            .to_ascii_uppercase();
        Self::ALL
            .iter()
            .copied()
            .find(|p| p.as_str() == normalized)
            .ok_or_else(|| PlanError::UnknownPair(s.to_string()))
    }
}

/// Currency units per pip per standard lot. Always positive.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PipValue(f64);

impl PipValue {
    pub fn get(&self) -> f64 {
        self.0
    }
}

/// Pip value lookup for `pair`.
pub fn resolve(pair: PairSymbol) -> PipValue {
    pair.pip_value()
}
