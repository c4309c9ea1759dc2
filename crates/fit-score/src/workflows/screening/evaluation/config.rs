use super::super::dedupe::KeepPolicy;
use super::super::sector::Sector;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub const FINANCE_OPTIMIZED: &str = "finance_optimized";
pub const BALANCED: &str = "balanced";

const PRESET_KEYS: [&str; 2] = [FINANCE_OPTIMIZED, BALANCED];

/// Rubric configuration for one scoring run. Immutable once a batch starts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoringConfig {
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub thresholds: Thresholds,
    pub equity: EquityReserve,
    pub weights: FieldWeights,
    pub min_motivation_words: usize,
    #[serde(default)]
    pub sector_uplift: BTreeMap<Sector, f64>,
    #[serde(default)]
    pub sector_cap: SectorCap,
    #[serde(default)]
    pub function_rule: FunctionRule,
    #[serde(default)]
    pub language_rule: LanguageRule,
    #[serde(default)]
    pub keep_policy: KeepPolicy,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Thresholds {
    pub admit: f64,
    pub priority: f64,
}

/// Carve-out tier for one sector inside an inclusive score band.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EquityReserve {
    pub enabled: bool,
    pub sector: Sector,
    pub lower: f64,
    pub upper: f64,
}

/// Per-field caps. Every field score lands in `[0, weight]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FieldWeights {
    pub motivation: f64,
    pub sector: f64,
    pub referee: f64,
    pub function: f64,
    pub time: f64,
    pub language: f64,
    pub alumni: f64,
}

/// Whether sector uplift is clipped to `weights.sector` or taken from the table as-is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SectorCap {
    #[default]
    Weight,
    Table,
}

/// Scoring of the function / job title answer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "strategy", rename_all = "snake_case")]
pub enum FunctionRule {
    /// Direct role keyword earns the full weight, anything else `fallback_fraction` of it.
    Flat { fallback_fraction: f64 },
    /// Adds a middle tier for supporting roles.
    Tiered {
        indirect_keywords: Vec<String>,
        indirect_fraction: f64,
        fallback_fraction: f64,
    },
}

impl Default for FunctionRule {
    fn default() -> Self {
        Self::Flat {
            fallback_fraction: 0.4,
        }
    }
}

impl FunctionRule {
    pub fn tiered() -> Self {
        Self::Tiered {
            indirect_keywords: [
                "coordinator",
                "assistant",
                "associate",
                "consultant",
                "researcher",
                "technician",
                "extension",
                "trainer",
            ]
            .iter()
            .map(|keyword| keyword.to_string())
            .collect(),
            indirect_fraction: 0.5,
            fallback_fraction: 0.0,
        }
    }
}

/// Scoring of the language comfort answer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "strategy", rename_all = "snake_case")]
pub enum LanguageRule {
    /// Keyword bands, each worth a fraction of the language weight.
    Banded {
        fluent: f64,
        working: f64,
        basic: f64,
    },
    /// Exact `basic` / `working` / `fluent` answers worth absolute points, still
    /// clipped to the language weight.
    FixedScale {
        basic: f64,
        working: f64,
        fluent: f64,
    },
}

impl Default for LanguageRule {
    fn default() -> Self {
        Self::Banded {
            fluent: 1.0,
            working: 0.6,
            basic: 0.3,
        }
    }
}

impl LanguageRule {
    pub fn fixed_scale() -> Self {
        Self::FixedScale {
            basic: 0.0,
            working: 3.0,
            fluent: 5.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("{}", .problems.join("; "))]
pub struct InvalidScoringConfig {
    pub problems: Vec<String>,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self::finance_optimized()
    }
}

impl ScoringConfig {
    pub fn preset_keys() -> &'static [&'static str] {
        &PRESET_KEYS
    }

    pub fn preset(key: &str) -> Option<Self> {
        match key.trim().to_ascii_lowercase().as_str() {
            FINANCE_OPTIMIZED => Some(Self::finance_optimized()),
            BALANCED => Some(Self::balanced()),
            _ => None,
        }
    }

    pub fn finance_optimized() -> Self {
        Self {
            name: "Finance-Optimized".to_string(),
            description: "Prioritizes function and referee signals over noisy free text."
                .to_string(),
            thresholds: Thresholds {
                admit: 50.0,
                priority: 65.0,
            },
            equity: EquityReserve {
                enabled: true,
                sector: Sector::FarmerOrg,
                lower: 40.0,
                upper: 49.0,
            },
            weights: FieldWeights {
                motivation: 15.0,
                sector: 5.0,
                referee: 28.0,
                function: 25.0,
                time: 10.0,
                language: 15.0,
                alumni: 5.0,
            },
            min_motivation_words: 30,
            sector_uplift: BTreeMap::from([
                (Sector::Finance, 8.0),
                (Sector::Private, 5.0),
                (Sector::Government, 5.0),
                (Sector::NgoCso, 5.0),
                (Sector::FarmerOrg, 2.0),
                (Sector::Other, 0.0),
            ]),
            sector_cap: SectorCap::Weight,
            function_rule: FunctionRule::default(),
            language_rule: LanguageRule::default(),
            keep_policy: KeepPolicy::KeepLast,
        }
    }

    pub fn balanced() -> Self {
        Self {
            name: "Balanced (General Cohort)".to_string(),
            description: "Standard weighting with word-count gated motivation rubric."
                .to_string(),
            thresholds: Thresholds {
                admit: 55.0,
                priority: 70.0,
            },
            equity: EquityReserve {
                enabled: true,
                sector: Sector::FarmerOrg,
                lower: 45.0,
                upper: 54.0,
            },
            weights: FieldWeights {
                motivation: 25.0,
                sector: 10.0,
                referee: 28.0,
                function: 15.0,
                time: 10.0,
                language: 20.0,
                alumni: 5.0,
            },
            min_motivation_words: 50,
            sector_uplift: BTreeMap::from([
                (Sector::NgoCso, 10.0),
                (Sector::Government, 8.0),
                (Sector::Education, 8.0),
                (Sector::Private, 5.0),
                (Sector::FarmerOrg, 5.0),
                (Sector::Other, 0.0),
            ]),
            sector_cap: SectorCap::Weight,
            function_rule: FunctionRule::default(),
            language_rule: LanguageRule::default(),
            keep_policy: KeepPolicy::KeepLast,
        }
    }

    /// Highest sector uplift any applicant can receive under this configuration.
    pub fn sector_ceiling(&self) -> f64 {
        let table_max = self
            .sector_uplift
            .values()
            .copied()
            .fold(0.0_f64, f64::max);
        match self.sector_cap {
            SectorCap::Weight => table_max.min(self.weights.sector),
            SectorCap::Table => table_max,
        }
    }

    /// Upper bound on the fit score.
    pub fn max_total(&self) -> f64 {
        let w = &self.weights;
        w.motivation + self.sector_ceiling() + w.referee + w.function + w.time + w.language + w.alumni
    }

    /// Check internal consistency, reporting every problem at once.
    pub fn validate(&self) -> Result<(), InvalidScoringConfig> {
        let mut problems = Vec::new();

        let w = &self.weights;
        for (field, value) in [
            ("motivation", w.motivation),
            ("sector", w.sector),
            ("referee", w.referee),
            ("function", w.function),
            ("time", w.time),
            ("language", w.language),
            ("alumni", w.alumni),
        ] {
            if !value.is_finite() || value < 0.0 {
                problems.push(format!("weights.{field}: must be a non-negative number"));
            }
        }

        let t = &self.thresholds;
        if !t.admit.is_finite() || !t.priority.is_finite() {
            problems.push("thresholds: must be finite".to_string());
        } else if t.admit > t.priority {
            problems.push(format!(
                "thresholds: admit {} exceeds priority {}",
                t.admit, t.priority
            ));
        }

        if !self.equity.lower.is_finite() || !self.equity.upper.is_finite() {
            problems.push("equity: bounds must be finite".to_string());
        } else if self.equity.lower > self.equity.upper {
            problems.push(format!(
                "equity: lower bound {} exceeds upper bound {}",
                self.equity.lower, self.equity.upper
            ));
        }

        for (sector, value) in &self.sector_uplift {
            if !value.is_finite() || *value < 0.0 {
                problems.push(format!("sector_uplift.{sector}: must be a non-negative number"));
            }
        }

        match &self.function_rule {
            FunctionRule::Flat { fallback_fraction } => {
                check_fraction(&mut problems, "function_rule.fallback_fraction", *fallback_fraction)
            }
            FunctionRule::Tiered {
                indirect_fraction,
                fallback_fraction,
                ..
            } => {
                check_fraction(&mut problems, "function_rule.indirect_fraction", *indirect_fraction);
                check_fraction(&mut problems, "function_rule.fallback_fraction", *fallback_fraction);
            }
        }

        match self.language_rule {
            LanguageRule::Banded {
                fluent,
                working,
                basic,
            } => {
                check_fraction(&mut problems, "language_rule.fluent", fluent);
                check_fraction(&mut problems, "language_rule.working", working);
                check_fraction(&mut problems, "language_rule.basic", basic);
            }
            LanguageRule::FixedScale {
                basic,
                working,
                fluent,
            } => {
                for (band, value) in [("basic", basic), ("working", working), ("fluent", fluent)] {
                    if !value.is_finite() || value < 0.0 {
                        problems.push(format!("language_rule.{band}: must be a non-negative number"));
                    }
                }
            }
        }

        if problems.is_empty() {
            Ok(())
        } else {
            Err(InvalidScoringConfig { problems })
        }
    }
}

fn check_fraction(problems: &mut Vec<String>, field: &str, value: f64) {
    if !(0.0..=1.0).contains(&value) {
        problems.push(format!("{field}: must be between 0 and 1"));
    }
}
