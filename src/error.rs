//! Crate error type for the fallible edges: scenario loading, export and serving.

use std::io;
use std::path::PathBuf;

use crate::config::ConfigError;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Scenario could not be loaded or a preset is unknown
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Scenario loaded but failed validation
    #[error("invalid scenario:\n{}", join_errors(.0))]
    Invalid(Vec<ConfigError>),

    #[error("cannot write \"{}\": {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("csv export failed: {0}")]
    Csv(#[from] csv::Error),

    /// Listener bind or serve failure
    #[error("server error: {0}")]
    Server(#[source] io::Error),
}

fn join_errors(errors: &[ConfigError]) -> String {
    errors
        .iter()
        .map(|e| format!("  {e}"))
        .collect::<Vec<_>>()
        .join("\n")
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_lists_every_field() {
        let err = Error::Invalid(vec![
            ConfigError {
                field: "simulation.hour".into(),
                message: "must be < 24".into(),
            },
            ConfigError {
                field: "simulation.tick_interval_secs".into(),
                message: "must be > 0".into(),
            },
        ]);
        let text = err.to_string();
        assert!(text.contains("simulation.hour"));
        assert!(text.contains("simulation.tick_interval_secs"));
    }
}
