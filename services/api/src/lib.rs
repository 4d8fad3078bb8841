mod cli;
mod infra;
mod offline;
mod routes;
mod server;

use its_portal::error::AppError;

pub async fn run() -> Result<(), AppError> {
    cli::run().await
}
