use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use crate::error::{Error, Result};

/// Installs a stderr subscriber filtering at `level` (trace, debug, info, warn, error).
pub fn init(level: &str) -> Result<()> {
    let level: Level = level
        .trim()
        .parse()
        .map_err(|_| Error::Config(format!("unknown log level {level:?}")))?;

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .finish();

    tracing::subscriber::set_global_default(subscriber).map_err(|e| Error::Config(e.to_string()))
}
