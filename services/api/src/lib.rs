mod cli;
mod infra;
mod report;
mod routes;
mod server;

use ib_advisor::error::AppError;

pub async fn run() -> Result<(), AppError> {
    cli::run().await
}
