//! Process lifecycle: OS signals and shutdown coordination.
//!
//! # Shutdown sequence
//! ```text
//! SIGINT/SIGTERM → stop accepting → drain in-flight requests (bounded)
//!                → stop event dispatcher (drain queue, bounded)
//!                → deadline hit: cancel worker mid-drain
//! ```

pub mod shutdown;
pub mod signals;

pub use shutdown::{Shutdown, ShutdownSignal};
