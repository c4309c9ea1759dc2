use clap::Args;
use fit_score::config::AppConfig;
use fit_score::error::AppError;
use fit_score::telemetry;
use fit_score::workflows::join::{join, JoinOptions};
use fit_score::workflows::screening::{IdentityHasher, Table};
use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;

#[derive(Args, Debug)]
pub(crate) struct JoinArgs {
    /// Raw applicant list holding the contact details
    #[arg(long)]
    pub(crate) applications: PathBuf,
    /// Scored table produced by `score`
    #[arg(long)]
    pub(crate) scored: PathBuf,
    #[arg(long, default_value = "contact_list.csv")]
    pub(crate) output: PathBuf,
    #[arg(long, default_value = "Email")]
    pub(crate) email_column: String,
    /// Used to keep the latest application per applicant when present
    #[arg(long, default_value = "ApplicationDate")]
    pub(crate) date_column: String,
}

pub(crate) fn run_join(args: JoinArgs) -> Result<(), AppError> {
    let config = AppConfig::load()?;
    telemetry::init(&config.telemetry)?;

    let applications = Table::from_path(&args.applications)?;
    let scored = Table::from_path(&args.scored)?;
    let options = JoinOptions {
        email_column: args.email_column,
        date_column: Some(args.date_column),
    };

    let outcome = join(
        &applications,
        &scored,
        &IdentityHasher::new(config.salt),
        &options,
    )?;

    let writer = BufWriter::new(File::create(&args.output)?);
    outcome.table.write_csv(writer)?;

    println!(
        "Saved {}  |  matched: {}  unmatched: {}",
        args.output.display(),
        outcome.summary.matched,
        outcome.summary.unmatched
    );
    Ok(())
}
