//! Runs the engine protocol loop on stdin and stdout. Logs go to stderr and are
//! configured with `RUST_LOG` (default `warn`).

use std::io;

use rowcol::strategy::StrategyConfig;
use rowcol::Engine;

fn init_tracing(level: &str) {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr))
        .with(filter)
        .init();
}

fn main() -> anyhow::Result<()> {
    init_tracing("warn");
    rowcol::print_engine_info();
    rowcol::print_binary_info();

    let mut engine = Engine::new(StrategyConfig::default());
    engine.protocol_loop(&mut io::stdin().lock(), &mut io::stdout().lock())
}
