//! Library error type.

use crate::extract::ExtractError;
use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("rendering engine '{engine}' not supported (template: {})", template.display())]
    UnsupportedEngine { engine: String, template: PathBuf },

    #[error("failed to {action} {}", path.display())]
    Io {
        action: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse comments in {}", path.display())]
    Extract {
        path: PathBuf,
        #[source]
        source: ExtractError,
    },

    #[error("{engine} render error: {message}")]
    Render { engine: String, message: String },
}

impl Error {
    pub(crate) fn io(action: &'static str, path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Error::Io {
            action,
            path: path.into(),
            source,
        }
    }

    /// Flatten an engine error and its source chain into one message.
    pub(crate) fn render(engine: &str, err: &dyn std::error::Error) -> Self {
        let mut message = err.to_string();
        let mut source = err.source();
        while let Some(inner) = source {
            let text = inner.to_string();
            if !message.contains(&text) {
                message.push_str(": ");
                message.push_str(&text);
            }
            source = inner.source();
        }
        Error::Render {
            engine: engine.to_string(),
            message,
        }
    }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
