//! Simulator backend implementation.

use rand::SeedableRng;
use rand::rngs::StdRng;
use rustc_hash::FxHashMap;
use std::time::Instant;
use tracing::{debug, instrument};

use lcukit_ir::{Circuit, InstructionKind};

use crate::counts::Counts;
use crate::error::{SimError, SimResult};
use crate::statevector::Statevector;

/// Default qubit limit.
pub const DEFAULT_MAX_QUBITS: u32 = 20;

/// Local simulator backend.
///
/// This backend simulates quantum circuits using a statevector simulation.
/// It supports circuits up to ~20 qubits (limited by memory).
#[derive(Debug, Clone)]
pub struct SimulatorBackend {
    /// Maximum number of qubits supported.
    max_qubits: u32,
    /// Seed for shot sampling; `None` draws from OS entropy.
    seed: Option<u64>,
}

impl SimulatorBackend {
    /// Create a new simulator backend with default settings.
    pub fn new() -> Self {
        Self {
            max_qubits: DEFAULT_MAX_QUBITS,
            seed: None,
        }
    }

    /// Create a simulator with custom max qubits.
    pub fn with_max_qubits(max_qubits: u32) -> Self {
        Self {
            max_qubits,
            seed: None,
        }
    }

    /// Fix the sampling seed so `run` is reproducible.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// The configured qubit limit.
    pub fn max_qubits(&self) -> u32 {
        self.max_qubits
    }

    fn check_size(&self, circuit: &Circuit) -> SimResult<()> {
        if circuit.num_qubits() > self.max_qubits as usize {
            return Err(SimError::TooManyQubits {
                num_qubits: circuit.num_qubits(),
                max_qubits: self.max_qubits,
            });
        }
        Ok(())
    }

    /// Final state of `circuit` started from |0...0>.
    #[instrument(skip(self, circuit), fields(circuit = circuit.name(), qubits = circuit.num_qubits()))]
    pub fn statevector(&self, circuit: &Circuit) -> SimResult<Statevector> {
        self.check_size(circuit)?;
        let mut sv = Statevector::new(circuit.num_qubits());
        for inst in circuit.instructions() {
            sv.apply(inst);
        }
        Ok(sv)
    }

    /// Basis-state probabilities of the final state.
    pub fn probabilities(&self, circuit: &Circuit) -> SimResult<Vec<f64>> {
        Ok(self.statevector(circuit)?.probabilities())
    }

    /// Run `shots` shots and histogram the outcomes.
    ///
    /// With measurements, keys span all classical bits with clbit 0
    /// rightmost. Without any, every qubit is read out with qubit 0
    /// rightmost.
    #[instrument(skip(self, circuit), fields(circuit = circuit.name()))]
    pub fn run(&self, circuit: &Circuit, shots: u32) -> SimResult<Counts> {
        if shots == 0 {
            return Err(SimError::InvalidShots(shots));
        }
        let start = Instant::now();
        debug!(
            "Starting simulation: {} qubits, {} shots",
            circuit.num_qubits(),
            shots
        );

        let sv = self.statevector(circuit)?;
        let mut rng = match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        let mut tally: FxHashMap<usize, u64> = FxHashMap::default();
        for _ in 0..shots {
            *tally.entry(sv.sample(&mut rng)).or_insert(0) += 1;
        }

        let readout = Readout::from_circuit(circuit);
        let mut counts = Counts::new();
        for (outcome, n) in tally {
            counts.insert(readout.bitstring(outcome), n);
        }

        debug!("Simulation completed in {:?}", start.elapsed());
        Ok(counts)
    }
}

impl Default for SimulatorBackend {
    fn default() -> Self {
        Self::new()
    }
}

/// How a sampled basis index becomes a bitstring.
enum Readout {
    /// No measurements: every qubit, qubit 0 rightmost.
    AllQubits(usize),
    /// `(qubit, clbit)` pairs over `width` classical bits.
    Clbits {
        width: usize,
        pairs: Vec<(usize, usize)>,
    },
}

impl Readout {
    fn from_circuit(circuit: &Circuit) -> Self {
        // Later measurements into the same clbit win.
        let mut by_clbit: FxHashMap<usize, usize> = FxHashMap::default();
        for inst in circuit.instructions() {
            if let InstructionKind::Measure = inst.kind {
                for (q, c) in inst.qubits.iter().zip(&inst.clbits) {
                    by_clbit.insert(c.index(), q.index());
                }
            }
        }
        if by_clbit.is_empty() {
            return Readout::AllQubits(circuit.num_qubits());
        }
        Readout::Clbits {
            width: circuit.num_clbits(),
            pairs: by_clbit.into_iter().map(|(c, q)| (q, c)).collect(),
        }
    }

    fn bitstring(&self, outcome: usize) -> String {
        match self {
            Readout::AllQubits(n) => format!("{outcome:0width$b}", width = *n),
            Readout::Clbits { width, pairs } => {
                let mut bits = vec!['0'; *width];
                for &(q, c) in pairs {
                    if outcome & (1 << q) != 0 {
                        bits[width - 1 - c] = '1';
                    }
                }
                bits.into_iter().collect()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lcukit_ir::{ClbitId, QubitId};
    use std::f64::consts::PI;

    fn bell() -> Circuit {
        let mut c = Circuit::with_size("bell", 2, 2);
        c.ry(PI / 2.0, QubitId(0)).unwrap();
        c.cx(QubitId(0), QubitId(1)).unwrap();
        c.measure_all().unwrap();
        c
    }

    #[test]
    fn test_simulator_bell_state() {
        let backend = SimulatorBackend::new().with_seed(11);
        let counts = backend.run(&bell(), 1000).unwrap();

        assert_eq!(counts.total(), 1000);
        assert_eq!(counts.get("00") + counts.get("11"), 1000);
        assert_eq!(counts.get("01") + counts.get("10"), 0);
    }

    #[test]
    fn test_seed_reproducible() {
        let backend = SimulatorBackend::new().with_seed(42);
        let a = backend.run(&bell(), 500).unwrap();
        let b = backend.run(&bell(), 500).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_clbit_zero_rightmost() {
        let mut c = Circuit::with_size("flip", 2, 2);
        c.x(QubitId(0)).unwrap();
        c.measure(QubitId(0), ClbitId(1)).unwrap();
        c.measure(QubitId(1), ClbitId(0)).unwrap();
        let counts = SimulatorBackend::new().run(&c, 10).unwrap();
        assert_eq!(counts.get("10"), 10);
    }

    #[test]
    fn test_unmeasured_reads_all_qubits() {
        let mut c = Circuit::with_size("flip", 3, 0);
        c.x(QubitId(0)).unwrap();
        let counts = SimulatorBackend::new().run(&c, 4).unwrap();
        assert_eq!(counts.get("001"), 4);
    }

    #[test]
    fn test_simulator_too_many_qubits() {
        let backend = SimulatorBackend::with_max_qubits(5);
        let circuit = Circuit::with_size("test", 10, 0);
        assert!(matches!(
            backend.run(&circuit, 100),
            Err(SimError::TooManyQubits { num_qubits: 10, max_qubits: 5 })
        ));
    }

    #[test]
    fn test_zero_shots() {
        assert!(matches!(
            SimulatorBackend::new().run(&bell(), 0),
            Err(SimError::InvalidShots(0))
        ));
    }
}
