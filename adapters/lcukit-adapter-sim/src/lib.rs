//! lcukit Local Statevector Simulator
//!
//! Exact statevector simulation of `lcukit-ir` circuits, used to check
//! synthesized circuits and to sample measurement counts.
//!
//! # Features
//!
//! - **Exact Simulation**: Full statevector representation
//! - **Controlled Gates**: Any number of controls on rotations, phases and
//!   dense unitaries
//! - **Measurement Sampling**: Shot sampling with an optional fixed seed
//!
//! # Performance
//!
//! | Qubits | Memory | Simulation Speed |
//! |--------|--------|------------------|
//! | 10 | ~16 KB | Instant |
//! | 15 | ~512 KB | Fast |
//! | 20 | ~16 MB | Moderate |
//! | 24 | ~256 MB | Slow |
//!
//! # Example
//!
//! ```rust
//! use lcukit_adapter_sim::SimulatorBackend;
//! use lcukit_ir::{Circuit, QubitId};
//!
//! let mut circuit = Circuit::with_size("flip", 1, 1);
//! circuit.x(QubitId(0)).unwrap();
//! circuit.measure_all().unwrap();
//!
//! let counts = SimulatorBackend::new().with_seed(1).run(&circuit, 100).unwrap();
//! assert_eq!(counts.get("1"), 100);
//! ```

mod counts;
mod error;
mod simulator;
mod statevector;

pub use counts::Counts;
pub use error::{SimError, SimResult};
pub use simulator::{DEFAULT_MAX_QUBITS, SimulatorBackend};
pub use statevector::Statevector;
