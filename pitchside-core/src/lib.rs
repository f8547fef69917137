//! Pitchside Core - shared data structures, errors and logging
//!
//! Everything the web crate needs that is not tied to HTTP lives here.

pub mod error;
pub mod logging;
pub mod types;

pub use error::*;
pub use logging::*;
pub use types::*;

// Re-export commonly used external types
pub use chrono;
pub use tracing;
