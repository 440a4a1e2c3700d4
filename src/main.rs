use dalv::cli;
use dalv::config::VersionInfo;
use dalv::runner::run;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

fn main() -> anyhow::Result<()> {
    let version = VersionInfo::resolve();

    let mut stdout = std::io::stdout();
    let Some(invocation) = cli::parse_from(std::env::args_os(), &version, &mut stdout)? else {
        // Help or version was printed
        return Ok(());
    };

    // Initialize tracing based on quiet mode; RUST_LOG wins when set
    let default_filter = if invocation.quiet { "dalv=warn" } else { "dalv=info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .finish();
    let _ = tracing::subscriber::set_global_default(subscriber);

    tracing::info!("Starting {}", version);

    run(&invocation, &mut stdout)?;
    Ok(())
}
