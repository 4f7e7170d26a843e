//! Error handling types

use thiserror::Error;

/// Result type alias for operations that can fail
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for Wirebox resolution
///
/// All errors surface synchronously to the original caller of
/// `get`/`create`/scope construction; the resolver performs no retries
/// and no partial recovery.
#[derive(Error, Debug)]
pub enum Error {
    /// Requested token has neither a registered descriptor nor an applicable override
    #[error("unresolved dependency: no provider registered for `{token}`")]
    UnresolvedDependency {
        /// The token that could not be resolved
        token: &'static str,
    },

    /// A token was requested again while still being constructed earlier in the same chain
    #[error("cyclic dependency: `{token}` is already being constructed ({chain})")]
    CyclicDependency {
        /// The token that re-entered construction
        token: &'static str,
        /// The construction chain that led back to the token
        chain: String,
    },

    /// The factory for a token failed
    #[error("construction of `{token}` failed: {source}")]
    Construction {
        /// The token whose factory failed
        token: &'static str,
        /// The underlying factory error
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Collaborator-facing configuration error
    ///
    /// Raised by collaborator layers (e.g. a component missing required
    /// metadata) and propagated through the resolver unchanged.
    #[error("configuration error: {message}")]
    Configuration {
        /// Description of the configuration error
        message: String,
        /// Optional source error
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// A typed accessor was used at a type other than the registered one
    #[error("type mismatch for `{token}`: instance is not a `{expected}`")]
    TypeMismatch {
        /// The token whose instance was accessed
        token: &'static str,
        /// The type the caller asked for
        expected: &'static str,
    },

    /// Internal resolver error
    #[error("internal error: {message}")]
    Internal {
        /// Description of the internal error
        message: String,
    },
}

impl Error {
    /// Create an unresolved dependency error
    pub fn unresolved(token: &'static str) -> Self {
        Self::UnresolvedDependency { token }
    }

    /// Create a cyclic dependency error
    pub fn cyclic<S: Into<String>>(token: &'static str, chain: S) -> Self {
        Self::CyclicDependency {
            token,
            chain: chain.into(),
        }
    }

    /// Create a construction error with the failing factory's error as source
    pub fn construction<E: std::error::Error + Send + Sync + 'static>(
        token: &'static str,
        source: E,
    ) -> Self {
        Self::Construction {
            token,
            source: Box::new(source),
        }
    }

    /// Create a configuration error (simple)
    pub fn configuration<S: Into<String>>(message: S) -> Self {
        Self::Configuration {
            message: message.into(),
            source: None,
        }
    }

    /// Create a configuration error with source
    pub fn configuration_with_source<
        S: Into<String>,
        E: std::error::Error + Send + Sync + 'static,
    >(
        message: S,
        source: E,
    ) -> Self {
        Self::Configuration {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create a type mismatch error
    pub fn type_mismatch(token: &'static str, expected: &'static str) -> Self {
        Self::TypeMismatch { token, expected }
    }

    /// Create an internal error
    pub fn internal<S: Into<String>>(message: S) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }
}
