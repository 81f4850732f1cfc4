use anyhow::Result;
use aurcheck::cli;
use tracing_subscriber::EnvFilter;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // Parse command-line arguments first to check verbose flag
    let args = match cli::parse_args_from(std::env::args_os()) {
        Ok(args) => args,
        Err(e) => {
            eprint!("{}", e);
            std::process::exit(cli::EXIT_INVALID_OPTION);
        }
    };

    // Initialize logging based on verbose flag
    let log_level = if args.verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env()
                .add_directive(log_level.into())
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    cli::execute(args).await?;

    Ok(())
}
