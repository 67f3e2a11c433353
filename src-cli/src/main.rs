use clap::Parser;
use dorker_cli::args::Args;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dorker_cli::run(Args::parse()).await
}
