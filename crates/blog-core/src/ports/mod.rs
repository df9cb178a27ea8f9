//! Ports - trait definitions for external dependencies.
//! These are the "interfaces" that infrastructure must implement.

mod clock;
mod repository;

pub use clock::{Clock, FixedClock, SystemClock};
pub use repository::{BaseRepository, PostRepository};
