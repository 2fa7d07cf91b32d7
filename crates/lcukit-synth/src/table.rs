//! Pauli tables: weighted sums of Pauli strings.
//!
//! A [`PauliTable`] represents `H = sum_k c_k P_k`. Entries keep insertion
//! order (Trotter steps apply terms in that order) and every string has the
//! same width. The same string never appears twice.

use ndarray::Array2;
use num_complex::Complex64;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::error::{SynthError, SynthResult};
use crate::pauli::{PauliString, pauli_matrix};

/// One weighted Pauli string.
#[derive(Debug, Clone, PartialEq)]
pub struct PauliTerm {
    /// The Pauli string.
    pub pauli: PauliString,
    /// Its coefficient.
    pub coeff: Complex64,
}

impl PauliTerm {
    /// Create a new term.
    pub fn new(pauli: PauliString, coeff: Complex64) -> Self {
        Self { pauli, coeff }
    }
}

/// An ordered, duplicate-free map from Pauli strings to coefficients.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<TableEntry>", into = "Vec<TableEntry>")]
pub struct PauliTable {
    terms: Vec<PauliTerm>,
    index: FxHashMap<PauliString, usize>,
}

impl PauliTable {
    /// Create an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a table from terms, validating widths and uniqueness.
    pub fn from_terms(terms: impl IntoIterator<Item = PauliTerm>) -> SynthResult<Self> {
        let mut table = Self::new();
        for term in terms {
            table.insert(term.pauli, term.coeff)?;
        }
        Ok(table)
    }

    /// Build a table of real coefficients from `(string, coeff)` pairs.
    ///
    /// ```rust
    /// use lcukit_synth::PauliTable;
    ///
    /// let h = PauliTable::from_real([("ZZ", -1.0), ("XI", 0.5)]).unwrap();
    /// assert_eq!(h.len(), 2);
    /// assert_eq!(h.num_qubits(), Some(2));
    /// ```
    pub fn from_real<'a>(pairs: impl IntoIterator<Item = (&'a str, f64)>) -> SynthResult<Self> {
        let mut table = Self::new();
        for (s, c) in pairs {
            table.insert(s.parse()?, Complex64::new(c, 0.0))?;
        }
        Ok(table)
    }

    fn check(&self, pauli: &PauliString, coeff: Complex64) -> SynthResult<()> {
        if !coeff.re.is_finite() || !coeff.im.is_finite() {
            return Err(SynthError::NonFiniteCoefficient {
                pauli: pauli.to_string(),
            });
        }
        if let Some(expected) = self.num_qubits() {
            if pauli.len() != expected {
                return Err(SynthError::WidthMismatch {
                    pauli: pauli.to_string(),
                    expected,
                    got: pauli.len(),
                });
            }
        }
        Ok(())
    }

    /// Append a new term. Fails if the string is already present.
    pub fn insert(&mut self, pauli: PauliString, coeff: Complex64) -> SynthResult<()> {
        self.check(&pauli, coeff)?;
        if self.index.contains_key(&pauli) {
            return Err(SynthError::DuplicateTerm(pauli.to_string()));
        }
        self.index.insert(pauli.clone(), self.terms.len());
        self.terms.push(PauliTerm::new(pauli, coeff));
        Ok(())
    }

    /// Add `coeff` to an existing term, or append a new one.
    pub fn accumulate(&mut self, pauli: PauliString, coeff: Complex64) -> SynthResult<()> {
        self.check(&pauli, coeff)?;
        match self.index.get(&pauli) {
            Some(&i) => self.terms[i].coeff += coeff,
            None => {
                self.index.insert(pauli.clone(), self.terms.len());
                self.terms.push(PauliTerm::new(pauli, coeff));
            }
        }
        Ok(())
    }

    /// Coefficient of `pauli`, if present.
    pub fn get(&self, pauli: &PauliString) -> Option<Complex64> {
        self.index.get(pauli).map(|&i| self.terms[i].coeff)
    }

    /// Terms in insertion order.
    pub fn terms(&self) -> &[PauliTerm] {
        &self.terms
    }

    /// Iterate terms in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &PauliTerm> {
        self.terms.iter()
    }

    /// Number of terms.
    pub fn len(&self) -> usize {
        self.terms.len()
    }

    /// Whether the table has no terms.
    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// Common width of the strings; `None` when empty.
    pub fn num_qubits(&self) -> Option<usize> {
        self.terms.first().map(|t| t.pauli.len())
    }

    /// One-norm of the coefficients, `sum |c_k|`.
    pub fn lambda(&self) -> f64 {
        self.terms.iter().map(|t| t.coeff.norm()).sum()
    }

    /// Force the all-identity coefficient to exactly zero, keeping its slot.
    #[must_use]
    pub fn zero_identity(mut self) -> Self {
        for term in &mut self.terms {
            if term.pauli.is_identity() {
                term.coeff = Complex64::new(0.0, 0.0);
            }
        }
        self
    }

    /// Drop the all-identity term.
    #[must_use]
    pub fn without_identity(self) -> Self {
        let terms = self.terms.into_iter().filter(|t| !t.pauli.is_identity());
        let mut table = Self::new();
        for term in terms {
            table.index.insert(term.pauli.clone(), table.terms.len());
            table.terms.push(term);
        }
        table
    }

    /// Dense matrix `sum_k c_k P_k`.
    pub fn to_matrix(&self) -> SynthResult<Array2<Complex64>> {
        let n = self.num_qubits().ok_or(SynthError::EmptyInput { what: "Pauli table" })?;
        let dim = 1usize << n;
        let mut m = Array2::<Complex64>::zeros((dim, dim));
        for term in &self.terms {
            m.scaled_add(term.coeff, &pauli_matrix(&term.pauli));
        }
        Ok(m)
    }
}

impl<'a> IntoIterator for &'a PauliTable {
    type Item = &'a PauliTerm;
    type IntoIter = std::slice::Iter<'a, PauliTerm>;

    fn into_iter(self) -> Self::IntoIter {
        self.terms.iter()
    }
}

// ---------------------------------------------------------------------------
// Serialized form
// ---------------------------------------------------------------------------

/// A coefficient written either as a plain number or as `[re, im]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Coefficient {
    /// Real coefficient.
    Real(f64),
    /// Complex coefficient as `[re, im]`.
    Complex([f64; 2]),
}

/// One `{ pauli, coeff }` entry of a serialized table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableEntry {
    /// Pauli string, e.g. `"XZ"`.
    pub pauli: String,
    /// Coefficient.
    pub coeff: Coefficient,
}

impl TryFrom<Vec<TableEntry>> for PauliTable {
    type Error = SynthError;

    fn try_from(entries: Vec<TableEntry>) -> SynthResult<Self> {
        let mut table = PauliTable::new();
        for entry in entries {
            let coeff = match entry.coeff {
                Coefficient::Real(re) => Complex64::new(re, 0.0),
                Coefficient::Complex([re, im]) => Complex64::new(re, im),
            };
            table.insert(entry.pauli.parse()?, coeff)?;
        }
        Ok(table)
    }
}

impl From<PauliTable> for Vec<TableEntry> {
    fn from(table: PauliTable) -> Self {
        table
            .terms
            .into_iter()
            .map(|t| TableEntry {
                pauli: t.pauli.to_string(),
                coeff: if t.coeff.im == 0.0 {
                    Coefficient::Real(t.coeff.re)
                } else {
                    Coefficient::Complex([t.coeff.re, t.coeff.im])
                },
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn c(re: f64, im: f64) -> Complex64 {
        Complex64::new(re, im)
    }

    #[test]
    fn test_width_mismatch() {
        let mut t = PauliTable::from_real([("XZ", 1.0)]).unwrap();
        let err = t.insert("XZZ".parse().unwrap(), c(1.0, 0.0)).unwrap_err();
        assert!(matches!(err, SynthError::WidthMismatch { expected: 2, got: 3, .. }));
    }

    #[test]
    fn test_duplicate_rejected() {
        let err = PauliTable::from_real([("XZ", 1.0), ("XZ", 2.0)]).unwrap_err();
        assert!(matches!(err, SynthError::DuplicateTerm(ref s) if s == "XZ"));
    }

    #[test]
    fn test_accumulate_sums() {
        let mut t = PauliTable::new();
        t.accumulate("ZI".parse().unwrap(), c(0.5, 0.0)).unwrap();
        t.accumulate("IZ".parse().unwrap(), c(0.25, 0.0)).unwrap();
        t.accumulate("ZI".parse().unwrap(), c(0.5, 0.0)).unwrap();
        assert_eq!(t.len(), 2);
        assert_eq!(t.get(&"ZI".parse().unwrap()), Some(c(1.0, 0.0)));
        assert_eq!(t.terms()[0].pauli.to_string(), "ZI");
    }

    #[test]
    fn test_non_finite_rejected() {
        let err = PauliTable::from_real([("X", f64::NAN)]).unwrap_err();
        assert!(matches!(err, SynthError::NonFiniteCoefficient { .. }));
    }

    #[test]
    fn test_identity_helpers() {
        let t = PauliTable::from_real([("II", -0.8), ("ZI", 0.2), ("XX", 0.1)]).unwrap();
        let zeroed = t.clone().zero_identity();
        assert_eq!(zeroed.len(), 3);
        assert_eq!(zeroed.terms()[0].coeff, c(0.0, 0.0));

        let dropped = t.without_identity();
        assert_eq!(dropped.len(), 2);
        assert_eq!(dropped.get(&"II".parse().unwrap()), None);
        assert_eq!(dropped.get(&"XX".parse().unwrap()), Some(c(0.1, 0.0)));
    }

    #[test]
    fn test_lambda() {
        let mut t = PauliTable::from_real([("X", -0.5)]).unwrap();
        t.insert("Y".parse().unwrap(), c(0.0, 0.25)).unwrap();
        assert!((t.lambda() - 0.75).abs() < 1e-12);
    }

    #[test]
    fn test_to_matrix() {
        let t = PauliTable::from_real([("Z", 1.0), ("X", 2.0)]).unwrap();
        let m = t.to_matrix().unwrap();
        assert_eq!(m[[0, 0]], c(1.0, 0.0));
        assert_eq!(m[[1, 1]], c(-1.0, 0.0));
        assert_eq!(m[[0, 1]], c(2.0, 0.0));
        assert!(PauliTable::new().to_matrix().is_err());
    }

    #[test]
    fn test_json_round_trip_keeps_order() {
        let json = r#"[{"pauli":"ZZ","coeff":-1.0},{"pauli":"XY","coeff":[0.0,0.5]}]"#;
        let t: PauliTable = serde_json::from_str(json).unwrap();
        assert_eq!(t.terms()[0].pauli.to_string(), "ZZ");
        assert_eq!(t.terms()[1].coeff, c(0.0, 0.5));
        assert_eq!(serde_json::to_string(&t).unwrap(), json);
    }

    #[test]
    fn test_deserialize_validates() {
        let dup = r#"[{"pauli":"Z","coeff":1.0},{"pauli":"Z","coeff":2.0}]"#;
        assert!(serde_json::from_str::<PauliTable>(dup).is_err());
        let bad = r#"[{"pauli":"Q","coeff":1.0}]"#;
        assert!(serde_json::from_str::<PauliTable>(bad).is_err());
    }

    #[test]
    fn test_yaml() {
        let yaml = "- pauli: XX\n  coeff: 0.5\n- pauli: ZZ\n  coeff: [0.0, -1.0]\n";
        let t: PauliTable = serde_yaml_ng::from_str(yaml).unwrap();
        assert_eq!(t.len(), 2);
        assert_eq!(t.terms()[1].coeff, c(0.0, -1.0));
    }
}
