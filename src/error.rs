use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SimError {
    #[error("invalid {name}: {value} ({reason})")]
    InvalidParameter {
        name: &'static str,
        value: f64,
        reason: &'static str,
    },

    #[error("control point {index} is not finite")]
    NonFiniteControlPoint { index: usize },

    #[error("invalid touch event {0:?}: expected X,Y@SECONDS or up@SECONDS")]
    InvalidTouch(String),

    #[error("failed to read {path:?}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed JSON")]
    Json(#[from] serde_json::Error),

    #[error("simulation session has been dropped")]
    SessionClosed,
}

impl SimError {
    pub(crate) fn invalid(name: &'static str, value: f64, reason: &'static str) -> Self {
        SimError::InvalidParameter {
            name,
            value,
            reason,
        }
    }
}
