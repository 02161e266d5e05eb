//! Time subsystem.
//!
//! Provides a testable repeating interval scheduler without coupling to the
//! runtime. Intended usage:
//! - one `Ticker` per event loop
//! - hand `deadline()` to the platform as the wake-up time
//! - call `poll(now)` after waking to learn whether a tick is due

mod ticker;

pub use ticker::{Tick, Ticker};
