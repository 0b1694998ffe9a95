use anyhow::Result;
use clap::Parser;

mod args;
mod cmd;
mod context;
mod output;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = args::Cli::parse();
    output::init(cli.json);
    output::init_logging(&cli.log_level, cli.json);

    cmd::dispatch(cli).await
}
