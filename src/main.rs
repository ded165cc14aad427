mod cli;
mod runner;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    runner::run_from_cli(cli::parse_cli()).await
}
