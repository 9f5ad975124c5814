mod cli;
mod commands;

use role_evaluation::error::AppError;

pub fn run() -> Result<(), AppError> {
    cli::run()
}
