mod cli;
mod join;
mod score;

use fit_score::error::AppError;

pub fn run() -> Result<(), AppError> {
    cli::run()
}
