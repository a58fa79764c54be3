/// Errors produced while loading layer-alias configuration.
///
/// Resolution itself never fails; these only surface from the config loader
/// and the CLI.
#[derive(Debug, thiserror::Error)]
pub enum LayerAliasError {
    #[error("{path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    #[error("no {file_name} found in {start} or any parent directory")]
    ConfigNotFound {
        file_name: &'static str,
        start: String,
    },

    #[error("{path}: parse failed: {source}")]
    ParseFailed {
        path: String,
        source: serde_json::Error,
    },

    #[error("{path}: {message}")]
    InvalidConfig { path: String, message: String },
}
