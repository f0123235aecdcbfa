//! Application state.
//!
//! Shared state for all request handlers.

use mbridge_markup::DialectRegistry;

/// Application state shared across all handlers.
///
/// Immutable after startup; the registry and flags are read-only, so
/// handlers never need locks.
pub(crate) struct AppState {
    /// Registered markup dialect parsers.
    pub(crate) registry: DialectRegistry,
    /// Dialect applied when a request omits `lang`.
    pub(crate) default_dialect: String,
    /// Fail fast on constructs markdown cannot express.
    pub(crate) strict_render: bool,
    /// Enable verbose request logging.
    pub(crate) verbose: bool,
}
