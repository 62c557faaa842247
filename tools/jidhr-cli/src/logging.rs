use tracing::Dispatch;
use tracing_subscriber::EnvFilter;

/// Environment variable holding a filter directive that overrides the flags.
pub const LOG_ENV: &str = "JIDHR_LOG";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verbosity {
    Quiet,
    Normal,
    Verbose,
}

impl Verbosity {
    fn directive(self) -> &'static str {
        match self {
            Verbosity::Quiet => "warn",
            Verbosity::Normal => "info",
            Verbosity::Verbose => "debug",
        }
    }
}

/// Builds the stderr logger for one invocation. It is handed to the stages
/// explicitly and never installed as the global default.
pub fn dispatch(verbosity: Verbosity) -> Dispatch {
    let filter = EnvFilter::try_from_env(LOG_ENV)
        .unwrap_or_else(|_| EnvFilter::new(verbosity.directive()));

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .finish();

    Dispatch::new(subscriber)
}
