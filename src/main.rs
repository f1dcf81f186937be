use anyhow::Result;
use clap::Parser;

use userdir::bootstrap::CliArgs;

#[tokio::main]
async fn main() -> Result<()> {
    let cli_args = CliArgs::parse();

    userdir::bootstrap::init_logging(&cli_args.log_level);
    userdir::bootstrap::setup_panic_handler();

    let bootstrap_result = userdir::bootstrap::bootstrap(cli_args)?;
    userdir::bootstrap::start_server(bootstrap_result).await?;

    Ok(())
}
