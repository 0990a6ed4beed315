mod cli;
mod commands;
mod demo;
mod render;

use case_dispatch::error::AppError;

pub fn run() -> Result<(), AppError> {
    cli::run()
}
