//! Error types.
//!
//! The cache has a single failure mode: invalid configuration at
//! construction time. Every runtime operation is total. A lookup miss is
//! reported as `None`/`false`, never as an error.
//!
//! ```
//! use bounded_cache::{Cache, ConfigError};
//!
//! let err = Cache::<u64, u64>::new(0).unwrap_err();
//! assert_eq!(err, ConfigError::ZeroCapacity);
//! assert!(err.to_string().contains("capacity"));
//! ```

use thiserror::Error;

/// Error returned when cache configuration parameters are invalid.
///
/// Construction fails as a whole: no partially built cache is ever returned.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// The requested capacity was zero. A cache must hold at least one entry.
    #[error("cache capacity must be positive, got 0")]
    ZeroCapacity,
}
