//! Process lifecycle: startup ordering and shutdown coordination.
//!
//! Startup is strictly load-then-serve: the rule index is built and frozen
//! before the listener accepts its first connection.

pub mod shutdown;

pub use shutdown::{Shutdown, ShutdownHandle};
