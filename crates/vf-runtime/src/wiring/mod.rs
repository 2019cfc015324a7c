//! Wiring of the client to concrete backends.

pub mod simulated;

pub use simulated::SimulatedDeployment;
