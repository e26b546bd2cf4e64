/// Errors raised while running a plugin phase.
#[derive(Debug, thiserror::Error)]
pub enum PluginError {
    #[error("Unknown ANTHILL_PHASE: {0}")]
    UnknownPhase(String),

    #[error("failed to serialize preview plan: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("failed to write plugin output: {0}")]
    Io(#[from] std::io::Error),

    /// Failure inside the plugin's own prepare/apply logic.
    #[error("{phase} phase failed: {error:#}")]
    Failed {
        phase: crate::phase::Phase,
        error: anyhow::Error,
    },
}
