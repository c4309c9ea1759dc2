use super::super::domain::ApplicantRecord;
use super::super::normalizer::{non_blank, normalize_answer};
use super::super::sector::Sector;
use super::config::{FunctionRule, LanguageRule, ScoringConfig, SectorCap};
use super::{FieldScores, ScoreComponent, ScoreField};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;

/// Maximum of each motivation sub-score; three sub-scores make the raw total out of 30.
pub const RUBRIC_SUBSCORE_CAP: u8 = 10;
const RUBRIC_TOTAL: f64 = 30.0;
const LONG_RESPONSE_WORDS: usize = 200;

const DATA_TERMS: &[&str] = &["data", "dataset", "dashboard", "faostat", "survey"];
const FOOD_SYSTEM_TERMS: &[&str] = &["food system", "seed", "agric", "market", "value chain"];

const DIRECT_ROLE_TERMS: &[&str] = &[
    "specialist",
    "officer",
    "advisor",
    "director",
    "manager",
    "analyst",
    "lecturer",
];

const NEGATIVE_PREFIXES: &[&str] = &["no", "none", "n/a", "0"];

const FLUENT_TERMS: &[&str] = &["fluent", "native", "advanced", "excellent"];
const WORKING_TERMS: &[&str] = &["working", "intermediate", "good", "professional"];
const BASIC_TERMS: &[&str] = &["basic", "limited", "beginner"];

/// Motivation rubric before scaling. Each part is 0, 5 or 10.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RubricScores {
    pub specificity: u8,
    pub feasibility: u8,
    pub relevance: u8,
}

impl RubricScores {
    pub fn total(&self) -> u8 {
        self.specificity + self.feasibility + self.relevance
    }
}

/// Weekly time bands with their fixed point values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TimeBand {
    UnderOneHour,
    OneToTwoHours,
    TwoToThreeHours,
    ThreeHoursOrMore,
}

impl TimeBand {
    pub const fn points(self) -> f64 {
        match self {
            Self::UnderOneHour => 0.0,
            Self::OneToTwoHours => 3.0,
            Self::TwoToThreeHours => 6.0,
            Self::ThreeHoursOrMore => 10.0,
        }
    }
}

// Explicit ranges are tested before bare hour counts so "2-3h" never reads as "3h".
const TIME_RULES: &[(TimeBand, &[&str])] = &[
    (
        TimeBand::ThreeHoursOrMore,
        &[">=3", "3+", "more than 3", "at least 3", "over 3", "3 or more"],
    ),
    (TimeBand::TwoToThreeHours, &["2-3", "2 to 3", "2.5"]),
    (TimeBand::OneToTwoHours, &["1-2", "1 to 2", "1.5"]),
    (
        TimeBand::UnderOneHour,
        &["<1", "less than 1", "0.5", "30 min"],
    ),
    (TimeBand::ThreeHoursOrMore, &["3 h", "3h"]),
    (TimeBand::TwoToThreeHours, &["2 h", "2h"]),
    (TimeBand::OneToTwoHours, &["1 h", "1h"]),
];

/// Language comfort bands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LanguageBand {
    Basic,
    Working,
    Fluent,
}

pub(crate) fn score_record(
    record: &ApplicantRecord,
    sector: Sector,
    config: &ScoringConfig,
) -> (FieldScores, Vec<ScoreComponent>) {
    let components = vec![
        motivation_points(record.motivation.as_deref(), config),
        sector_points(sector, config),
        yes_no_points(
            ScoreField::Referee,
            record.referee.as_deref(),
            config.weights.referee,
        ),
        function_points(record.function.as_deref(), config),
        time_points(record.weekly_time.as_deref(), config),
        language_points(record.language.as_deref(), config),
        yes_no_points(
            ScoreField::Alumni,
            record.alumni.as_deref(),
            config.weights.alumni,
        ),
    ];

    let mut scores = FieldScores::default();
    for component in &components {
        scores.set(component.field, component.points);
    }
    (scores, components)
}

/// Keyword and length heuristics for the motivation statement. Responses shorter
/// than `min_words` score nothing whatever they say.
pub fn rubric_scores(text: Option<&str>, min_words: usize) -> RubricScores {
    let Some(text) = non_blank(text) else {
        return RubricScores::default();
    };
    let text = text.trim();
    let words = text.split_whitespace().count();
    if words < min_words {
        return RubricScores::default();
    }

    let lowered = text.to_lowercase();
    let has_data = contains_any(&lowered, DATA_TERMS);
    let has_numbers = number_pattern().is_match(text);
    let has_food_system = contains_any(&lowered, FOOD_SYSTEM_TERMS);

    let award = |met: bool| if met { RUBRIC_SUBSCORE_CAP } else { 5 };
    RubricScores {
        specificity: award(words >= LONG_RESPONSE_WORDS || has_data),
        feasibility: award(has_numbers),
        relevance: award(has_food_system),
    }
}

pub fn motivation_points(text: Option<&str>, config: &ScoringConfig) -> ScoreComponent {
    let weight = config.weights.motivation;
    let rubric = rubric_scores(text, config.min_motivation_words);
    let points = clip(f64::from(rubric.total()) / RUBRIC_TOTAL * weight, weight);
    let notes = if rubric.total() == 0 {
        format!(
            "response missing or under {} words",
            config.min_motivation_words
        )
    } else {
        format!(
            "rubric {}/{}/{} (specificity/feasibility/relevance)",
            rubric.specificity, rubric.feasibility, rubric.relevance
        )
    };
    ScoreComponent::new(ScoreField::Motivation, points, notes)
}

pub fn function_points(text: Option<&str>, config: &ScoringConfig) -> ScoreComponent {
    let weight = config.weights.function;
    let Some(text) = non_blank(text) else {
        return ScoreComponent::new(ScoreField::Function, 0.0, "no function given");
    };
    let lowered = text.to_lowercase();

    if contains_any(&lowered, DIRECT_ROLE_TERMS) {
        return ScoreComponent::new(ScoreField::Function, weight, "direct role match");
    }

    let (fraction, notes) = match &config.function_rule {
        FunctionRule::Flat { fallback_fraction } => (*fallback_fraction, "no direct role match"),
        FunctionRule::Tiered {
            indirect_keywords,
            indirect_fraction,
            fallback_fraction,
        } => {
            let indirect = indirect_keywords
                .iter()
                .any(|keyword| lowered.contains(&keyword.to_lowercase()));
            if indirect {
                (*indirect_fraction, "indirect role match")
            } else {
                (*fallback_fraction, "no role match")
            }
        }
    };
    ScoreComponent::new(ScoreField::Function, clip(weight * fraction, weight), notes)
}

/// Affirmative answers earn `cap`; blanks and anything opening with a negative token
/// earn nothing.
pub fn yes_no_points(field: ScoreField, text: Option<&str>, cap: f64) -> ScoreComponent {
    let Some(text) = non_blank(text) else {
        return ScoreComponent::new(field, 0.0, "no answer");
    };
    let lowered = text.trim().to_lowercase();
    if NEGATIVE_PREFIXES
        .iter()
        .any(|prefix| lowered.starts_with(prefix))
    {
        ScoreComponent::new(field, 0.0, "negative answer")
    } else {
        ScoreComponent::new(field, clip(cap, cap), "affirmative answer")
    }
}

pub fn language_band(text: &str) -> Option<LanguageBand> {
    let lowered = normalize_answer(text);
    if contains_any(&lowered, FLUENT_TERMS) {
        Some(LanguageBand::Fluent)
    } else if contains_any(&lowered, WORKING_TERMS) {
        Some(LanguageBand::Working)
    } else if contains_any(&lowered, BASIC_TERMS) {
        Some(LanguageBand::Basic)
    } else {
        None
    }
}

pub fn language_points(text: Option<&str>, config: &ScoringConfig) -> ScoreComponent {
    let weight = config.weights.language;
    let Some(text) = non_blank(text) else {
        return ScoreComponent::new(ScoreField::Language, 0.0, "no answer");
    };

    let (band, points) = match config.language_rule {
        LanguageRule::Banded {
            fluent,
            working,
            basic,
        } => match language_band(text) {
            Some(LanguageBand::Fluent) => (Some(LanguageBand::Fluent), weight * fluent),
            Some(LanguageBand::Working) => (Some(LanguageBand::Working), weight * working),
            Some(LanguageBand::Basic) => (Some(LanguageBand::Basic), weight * basic),
            None => (None, 0.0),
        },
        LanguageRule::FixedScale {
            basic,
            working,
            fluent,
        } => match normalize_answer(text).as_str() {
            "fluent" => (Some(LanguageBand::Fluent), fluent),
            "working" => (Some(LanguageBand::Working), working),
            "basic" => (Some(LanguageBand::Basic), basic),
            _ => (None, 0.0),
        },
    };

    let notes = match band {
        Some(band) => format!("{band:?} language comfort").to_lowercase(),
        None => "unrecognised language level".to_string(),
    };
    ScoreComponent::new(ScoreField::Language, clip(points, weight), notes)
}

pub fn time_band(text: &str) -> Option<TimeBand> {
    let normalized = normalize_answer(text);
    let compact = normalized.replace(' ', "");
    TIME_RULES
        .iter()
        .find(|(_, keywords)| {
            keywords.iter().any(|keyword| {
                normalized.contains(keyword) || compact.contains(&keyword.replace(' ', ""))
            })
        })
        .map(|(band, _)| *band)
}

pub fn time_points(text: Option<&str>, config: &ScoringConfig) -> ScoreComponent {
    let weight = config.weights.time;
    match non_blank(text).and_then(time_band) {
        Some(band) => ScoreComponent::new(
            ScoreField::Time,
            clip(band.points(), weight),
            format!("{band:?}"),
        ),
        None => ScoreComponent::new(ScoreField::Time, 0.0, "unrecognised weekly time"),
    }
}

pub fn sector_points(sector: Sector, config: &ScoringConfig) -> ScoreComponent {
    let uplift = config
        .sector_uplift
        .get(&sector)
        .copied()
        .unwrap_or(0.0)
        .max(0.0);
    let points = match config.sector_cap {
        SectorCap::Weight => clip(uplift, config.weights.sector),
        SectorCap::Table => uplift,
    };
    ScoreComponent::new(ScoreField::Sector, points, format!("{sector} uplift"))
}

fn clip(points: f64, cap: f64) -> f64 {
    points.max(0.0).min(cap.max(0.0))
}

fn contains_any(text: &str, keywords: &[&str]) -> bool {
    keywords.iter().any(|keyword| text.contains(keyword))
}

fn number_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"\b\d+\b").expect("static pattern compiles"))
}
