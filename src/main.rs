//! stratmarket - drive the marketplace store from the terminal.
//!
//! Reads commands from stdin, one per line, and prints a status line after
//! every state change. Preferences persist across runs.

use stratmarket::config::LoggingConfig;
use stratmarket::events;
use stratmarket::{AppContext, Config};
use tokio::io::BufReader;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration
    let config = Config::load_or_default()?;

    // Initialize logging
    let _guard = init_logging(&config.logging)?;

    // Build the application context
    let mut ctx = AppContext::init(config)?;
    ctx.store_mut()
        .subscribe(|snapshot| println!("{}", events::status_line(snapshot)));

    println!("{}", events::status_line(ctx.store().state()));

    let stdin = BufReader::new(tokio::io::stdin());
    let result = events::run(stdin, &mut ctx, &mut std::io::stdout(), &mut std::io::stderr()).await;

    // Flush pending writes even when input failed
    ctx.teardown().await;
    result?;
    Ok(())
}

fn init_logging(config: &LoggingConfig) -> anyhow::Result<Option<WorkerGuard>> {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.filter));

    let (file_layer, guard) = if config.file {
        let dir = config.resolve_directory()?;
        std::fs::create_dir_all(&dir)?;
        let appender = tracing_appender::rolling::daily(dir, "stratmarket.log");
        let (writer, guard) = tracing_appender::non_blocking(appender);
        let layer = fmt::layer().with_writer(writer).with_ansi(false);
        (Some(layer), Some(guard))
    } else {
        (None, None)
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .with(file_layer)
        .init();

    Ok(guard)
}
