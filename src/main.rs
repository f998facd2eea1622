//! svclog demo binary.
//!
//! ```text
//! svclog-demo check
//!     load LOG_LEVEL / APP_ENV / APP_NAME and print the resolved config
//!
//! svclog-demo demo [--bridge] [--flush-timeout-ms N]
//!     install the global logger and emit sample records
//! ```

use std::error::Error;
use std::process::ExitCode;
use std::time::Duration;

use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use svclog::field;

#[derive(Parser)]
#[command(name = "svclog-demo")]
#[command(about = "Exercise the svclog logger from the environment", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Load the configuration from the environment and print it
    Check,
    /// Initialize the global logger and emit sample records
    Demo {
        /// Route `tracing` events through the logger
        #[arg(long)]
        bridge: bool,

        /// Give up flushing after this many milliseconds
        #[arg(long, default_value_t = 2000)]
        flush_timeout_ms: u64,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    match cli.command {
        Commands::Check => check(),
        Commands::Demo {
            bridge,
            flush_timeout_ms,
        } => demo(bridge, Duration::from_millis(flush_timeout_ms)).await,
    }
}

fn check() -> ExitCode {
    match svclog::from_environment() {
        Ok(config) => {
            println!("level:       {}", config.level());
            println!("environment: {}", config.environment());
            println!("service:     {}", config.service_name());
            ExitCode::SUCCESS
        }
        Err(err) => {
            print_chain(&err);
            ExitCode::FAILURE
        }
    }
}

async fn demo(bridge: bool, flush_timeout: Duration) -> ExitCode {
    if let Err(err) = svclog::init_from_environment() {
        print_chain(&err);
        return ExitCode::FAILURE;
    }

    if bridge {
        if let Err(err) = svclog::install_tracing_bridge(&svclog::get()) {
            svclog::warn("tracing bridge not installed", [field::error(&err)]);
        }
    } else {
        // the crate's own diagnostics go to a plain fmt subscriber on stderr
        let _ = tracing_subscriber::registry()
            .with(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| "svclog=info".into()),
            )
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .try_init();
    }

    svclog::info(
        "application started",
        [field::string("version", env!("CARGO_PKG_VERSION"))],
    );
    svclog::debug("debug detail", [field::int("pid", i64::from(std::process::id()))]);

    let log = svclog::with([field::string("component", "auth")]);
    log.info("authentication service started", []);
    log.info(
        "user authenticated",
        [
            field::string("user_id", "12345"),
            field::duration("elapsed", Duration::from_millis(42)),
        ],
    );

    let db = svclog::with([field::string("component", "database")]);
    db.warn("connection pool near capacity", [field::int("in_use", 18), field::int("max", 20)]);
    db.error(
        "query failed",
        [field::error(&std::io::Error::other("connection reset by peer"))],
    );

    if bridge {
        tracing::info!(port = 8080u64, "listening through the tracing bridge");
    }

    match svclog::sync_with_timeout(flush_timeout).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("failed to flush logs: {err}");
            ExitCode::FAILURE
        }
    }
}

fn print_chain(err: &(dyn Error + 'static)) {
    eprintln!("error: {err}");
    let mut source = err.source();
    while let Some(cause) = source {
        eprintln!("  caused by: {cause}");
        source = cause.source();
    }
}
