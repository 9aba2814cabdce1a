use clap::Parser;
use tracing_subscriber::EnvFilter;

use tag_scan::cli;

fn main() -> anyhow::Result<()> {
    let cli = cli::Cli::parse();

    // Initialize logging based on verbosity flag
    let filter = if cli.verbose {
        EnvFilter::new("tag_scan=debug,info")
    } else {
        EnvFilter::new("tag_scan=warn")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .init();

    match cli.command {
        cli::Commands::Regions(args) => {
            cli::regions::run(args, cli.format, cli.verbose)?;
        }
        cli::Commands::Impute(args) => {
            cli::impute::run(args, cli.format, cli.verbose)?;
        }
    }

    Ok(())
}
