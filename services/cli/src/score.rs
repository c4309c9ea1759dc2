use clap::Args;
use fit_score::config::{AppConfig, ConfigError, ScoringSource};
use fit_score::error::AppError;
use fit_score::telemetry;
use fit_score::workflows::screening::{
    write_scored_csv, ColumnResolver, Decision, IdentityHasher, KeepPolicy, LogicalField,
    ScoringConfig, ScreeningOutcome, ScreeningPipeline, Table, TableError,
};
use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;
use tracing::info;

#[derive(Args, Debug)]
pub(crate) struct ScoreArgs {
    /// Raw applicant export (CSV, delimiter detected)
    #[arg(long)]
    pub(crate) input: PathBuf,
    /// Where to write the scored table
    #[arg(long, default_value = "rfs_scored.csv")]
    pub(crate) output: PathBuf,
    /// Built-in preset key (see `presets`)
    #[arg(long, conflicts_with = "scoring_config")]
    pub(crate) preset: Option<String>,
    /// JSON scoring configuration replacing the preset
    #[arg(long)]
    pub(crate) scoring_config: Option<PathBuf>,
    #[arg(long)]
    pub(crate) admit: Option<f64>,
    #[arg(long)]
    pub(crate) priority: Option<f64>,
    #[arg(long)]
    pub(crate) equity_lower: Option<f64>,
    #[arg(long)]
    pub(crate) equity_upper: Option<f64>,
    /// Disable the equity reserve tier
    #[arg(long)]
    pub(crate) no_equity: bool,
    /// Which duplicate survives when there is no timestamp column: first or last
    #[arg(long, value_parser = parse_keep)]
    pub(crate) keep: Option<KeepPolicy>,
    #[arg(long)]
    pub(crate) min_motivation_words: Option<usize>,
    #[arg(long)]
    pub(crate) email_column: Option<String>,
    #[arg(long)]
    pub(crate) motivation_column: Option<String>,
    #[arg(long)]
    pub(crate) function_column: Option<String>,
    #[arg(long)]
    pub(crate) organisation_column: Option<String>,
    #[arg(long)]
    pub(crate) referee_column: Option<String>,
    #[arg(long)]
    pub(crate) language_column: Option<String>,
    #[arg(long)]
    pub(crate) weekly_time_column: Option<String>,
    #[arg(long)]
    pub(crate) alumni_column: Option<String>,
    #[arg(long)]
    pub(crate) timestamp_column: Option<String>,
    /// Print the run summary as JSON instead of text
    #[arg(long)]
    pub(crate) json: bool,
}

fn parse_keep(value: &str) -> Result<KeepPolicy, String> {
    KeepPolicy::parse(value).ok_or_else(|| format!("expected 'first' or 'last', got '{value}'"))
}

impl ScoreArgs {
    fn apply_overrides(&self, config: &mut ScoringConfig) {
        if let Some(admit) = self.admit {
            config.thresholds.admit = admit;
        }
        if let Some(priority) = self.priority {
            config.thresholds.priority = priority;
        }
        if let Some(lower) = self.equity_lower {
            config.equity.lower = lower;
        }
        if let Some(upper) = self.equity_upper {
            config.equity.upper = upper;
        }
        if self.no_equity {
            config.equity.enabled = false;
        }
        if let Some(keep) = self.keep {
            config.keep_policy = keep;
        }
        if let Some(words) = self.min_motivation_words {
            config.min_motivation_words = words;
        }
    }

    fn column_resolver(&self) -> ColumnResolver {
        let overrides = [
            (LogicalField::Email, &self.email_column),
            (LogicalField::Motivation, &self.motivation_column),
            (LogicalField::Function, &self.function_column),
            (LogicalField::Organisation, &self.organisation_column),
            (LogicalField::Referee, &self.referee_column),
            (LogicalField::Language, &self.language_column),
            (LogicalField::WeeklyTime, &self.weekly_time_column),
            (LogicalField::Alumni, &self.alumni_column),
            (LogicalField::Timestamp, &self.timestamp_column),
        ];
        overrides
            .into_iter()
            .fold(ColumnResolver::new(), |resolver, (field, header)| match header {
                Some(header) => resolver.with_override(field, header.clone()),
                None => resolver,
            })
    }
}

pub(crate) fn run_score(args: ScoreArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;
    if let Some(path) = &args.scoring_config {
        config.scoring = ScoringSource::File(path.clone());
    } else if let Some(preset) = &args.preset {
        config.scoring = ScoringSource::Preset(preset.clone());
    }

    telemetry::init(&config.telemetry)?;

    let mut scoring = config.scoring.resolve()?;
    args.apply_overrides(&mut scoring);
    scoring.validate().map_err(ConfigError::from)?;

    let table = Table::from_path(&args.input)?;
    let mapping = args.column_resolver().resolve(&table)?;
    info!(
        rows = table.len(),
        input = %args.input.display(),
        "loaded applicant export"
    );

    let pipeline = ScreeningPipeline::new(IdentityHasher::new(config.salt), scoring);
    let outcome = pipeline.run(&table, &mapping)?;

    let writer = BufWriter::new(File::create(&args.output)?);
    write_scored_csv(writer, &outcome.applicants).map_err(TableError::from)?;

    if args.json {
        match serde_json::to_string_pretty(&outcome.summary) {
            Ok(json) => println!("{json}"),
            Err(err) => println!("Summary unavailable: {err}"),
        }
    } else {
        render_summary(pipeline.config(), &outcome, &args.output);
    }
    Ok(())
}

fn render_summary(config: &ScoringConfig, outcome: &ScreeningOutcome, output: &std::path::Path) {
    let summary = &outcome.summary;
    println!("Scored {} applicants with {}", summary.scored, config.name);
    println!("  Input rows: {}", summary.input_rows);
    if summary.dropped_without_email > 0 {
        println!("  Skipped without email: {}", summary.dropped_without_email);
    }
    println!("  Duplicates removed: {}", summary.duplicates_removed);
    println!("\nDecisions");
    for decision in Decision::ordered() {
        let count = summary.by_decision.get(&decision).copied().unwrap_or_default();
        println!("  {:<18} {}", decision.label(), count);
    }
    println!("\nWrote {}", output.display());
}
