use anyhow::Result;
use clap::Parser;
use padel_cli::{run, Cli};
use padel_core::ServiceConfig;

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let config = ServiceConfig::load()?;
    run(cli, config, &mut std::io::stdout().lock())
}
