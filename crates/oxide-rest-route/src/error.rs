//! Error types for REST routing.

use thiserror::Error;

/// Errors raised while configuring a route or matching a request.
///
/// A request that simply does not belong to a route is not an error; matching
/// and URL construction report that case with `None`.
#[derive(Debug, Error)]
pub enum RouteError {
    /// The format table is empty.
    #[error("at least one format must be configured")]
    EmptyFormats,

    /// The default format is not part of the format table.
    #[error("format '{format}' is not allowed")]
    UnknownFormat { format: String },

    /// The effective HTTP method has no corresponding action.
    #[error("method {method} is not allowed")]
    MethodNotAllowed { method: String },

    /// Reading the request body failed.
    #[error("failed to read request body: {0}")]
    Body(#[from] std::io::Error),
}

impl RouteError {
    /// Returns `true` for errors raised while building a [`RouteConfig`].
    ///
    /// [`RouteConfig`]: crate::RouteConfig
    #[must_use]
    pub const fn is_config(&self) -> bool {
        matches!(self, Self::EmptyFormats | Self::UnknownFormat { .. })
    }
}

/// Result type alias for routing operations.
pub type Result<T> = std::result::Result<T, RouteError>;
