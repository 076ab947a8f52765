use clap::Parser as _;

mod cli;
mod config;
mod gateways;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    env_logger::init();
    cli::run(cli::Cli::parse()).await
}
