use super::super::sector::Sector;
use super::config::ScoringConfig;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Decision tier assigned to a scored applicant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Decision {
    Priority,
    Admit,
    #[serde(rename = "Reserve (Equity)")]
    ReserveEquity,
    Reserve,
}

impl Decision {
    pub const fn ordered() -> [Self; 4] {
        [Self::Priority, Self::Admit, Self::ReserveEquity, Self::Reserve]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Priority => "Priority",
            Self::Admit => "Admit",
            Self::ReserveEquity => "Reserve (Equity)",
            Self::Reserve => "Reserve",
        }
    }
}

impl fmt::Display for Decision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Walk the decision ladder. The ordinary thresholds are checked before the equity
/// carve-out, so a high enough score is `Priority` in every sector.
pub fn decide(rfs: f64, sector: Sector, config: &ScoringConfig) -> Decision {
    let thresholds = &config.thresholds;
    if rfs >= thresholds.priority {
        return Decision::Priority;
    }

    if rfs >= thresholds.admit {
        return Decision::Admit;
    }

    let equity = &config.equity;
    if equity.enabled && sector == equity.sector && (equity.lower..=equity.upper).contains(&rfs) {
        return Decision::ReserveEquity;
    }

    Decision::Reserve
}
