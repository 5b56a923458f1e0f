//! Fixed-order simulation loop
//!
//! One tick advances every subsystem in a deterministic order so that two
//! parks built from the same seed and command stream stay identical. Events
//! produced during a tick are returned to the caller for presentation; the
//! simulation itself never blocks on them.

pub mod tick;

pub use tick::{run_simulation_tick, SimulationEvent};
