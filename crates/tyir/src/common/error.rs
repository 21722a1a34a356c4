//! Error types for IR construction

use thiserror::Error;

/// Fatal construction error
///
/// Unlike the diagnostics accumulated on the builder, these abort the
/// current build: the caller cannot recover the half-built state and
/// continue emitting.
#[derive(Error, Debug)]
pub enum BuildError {
    #[error("element address error: {message}")]
    ElementAddr { message: String },

    #[error("call error: {message}")]
    Call { message: String },

    #[error("load error: {message}")]
    Load { message: String },

    #[error("unresolved declaration: function `{name}` was declared but never defined")]
    Unresolved { name: String },
}

impl BuildError {
    pub fn element_addr(message: impl Into<String>) -> Self {
        Self::ElementAddr {
            message: message.into(),
        }
    }

    pub fn call(message: impl Into<String>) -> Self {
        Self::Call {
            message: message.into(),
        }
    }

    pub fn load(message: impl Into<String>) -> Self {
        Self::Load {
            message: message.into(),
        }
    }

    pub fn unresolved(name: impl Into<String>) -> Self {
        Self::Unresolved { name: name.into() }
    }
}

pub type BuildResult<T> = Result<T, BuildError>;
