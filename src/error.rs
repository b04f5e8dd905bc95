//! Error types.

use std::path::PathBuf;

use thiserror::Error;

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, Error>;

/// Everything that can go wrong at the correction-engine boundary.
///
/// Build problems (`FileNotFound`, `MalformedPattern`, invalid configuration)
/// abort a load and leave any previously published dictionary in place.
/// Query-time failures are limited to [`Error::NotLoaded`] and
/// [`Error::InvalidArgument`]; a correction that cannot be made with
/// confidence returns the input verbatim instead of erroring.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    /// A query ran before any dictionary was loaded.
    #[error("no dictionary loaded; call load() first")]
    NotLoaded,

    /// A caller-supplied argument the operation cannot work with.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// A dictionary or protected-terms file could not be read.
    #[error("cannot read {}: {source}", path.display())]
    FileNotFound {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A protection pattern failed to compile. Carries the offending source
    /// so multi-pattern configurations stay debuggable.
    #[error("malformed pattern `{pattern}`: {source}")]
    MalformedPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    /// A state the index construction is supposed to make impossible.
    #[error("internal invariant violated: {0}")]
    InternalInvariant(&'static str),
}
