//! Textual Hamiltonian import.
//!
//! Reads the sum-of-products notation emitted by quantum chemistry
//! packages:
//!
//! ```text
//! (-0.2427) [I0] + (0.1777) [Z0] + (0.0452) [X0 Y1 Y2 X3]
//! ```
//!
//! Each product lists the non-identity operators with their qubit index;
//! unlisted qubits carry `I`. Coefficients are real numbers or complex
//! numbers written `a+bj`.

use std::sync::LazyLock;

use num_complex::Complex64;
use regex::Regex;
use tracing::debug;

use crate::error::{SynthError, SynthResult};
use crate::pauli::{PauliOp, PauliString};
use crate::table::PauliTable;

static TERM_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\(\s*([^()]+?)\s*\)\s*\[([^\]]*)\]").expect("term pattern is valid")
});

static OP_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([IXYZ])(\d+)$").expect("operator pattern is valid"));

/// Widest register a Hamiltonian text may describe.
pub const MAX_HAMILTONIAN_QUBITS: usize = 63;

/// One parsed product before it is widened to a dense string.
struct Product {
    offset: usize,
    coeff: Complex64,
    ops: Vec<(usize, PauliOp)>,
}

/// Parse a Hamiltonian into a [`PauliTable`].
///
/// The register width is `num_qubits` when given, otherwise one more than
/// the largest referenced qubit. Repeated products are summed. Widths
/// above [`MAX_HAMILTONIAN_QUBITS`] are rejected.
///
/// ```rust
/// use lcukit_synth::parse_hamiltonian;
///
/// let h = parse_hamiltonian("(0.5) [Z0 Z1] + (-0.25) [X1]", None).unwrap();
/// assert_eq!(h.num_qubits(), Some(2));
/// assert_eq!(h.terms()[1].pauli.to_string(), "IX");
/// ```
pub fn parse_hamiltonian(text: &str, num_qubits: Option<usize>) -> SynthResult<PauliTable> {
    let products = parse_products(text)?;

    let max_index = products
        .iter()
        .flat_map(|p| p.ops.iter().map(|&(q, _)| q))
        .max();
    let limit = num_qubits.unwrap_or(MAX_HAMILTONIAN_QUBITS);
    if limit > MAX_HAMILTONIAN_QUBITS {
        return Err(SynthError::RegisterTooWide {
            n_qubits: limit,
            max: MAX_HAMILTONIAN_QUBITS,
        });
    }
    let width = match (num_qubits, max_index) {
        (_, Some(q)) if q >= limit => {
            return Err(SynthError::QubitOutOfRange {
                qubit: q,
                n_qubits: limit,
            });
        }
        (Some(0), None) | (None, None) => {
            return Err(SynthError::EmptyInput {
                what: "Hamiltonian register",
            });
        }
        (Some(n), _) => n,
        (None, Some(q)) => q + 1,
    };

    let mut table = PauliTable::new();
    for product in products {
        let mut ops = vec![PauliOp::I; width];
        for (qubit, op) in product.ops {
            if ops[qubit] != PauliOp::I {
                return Err(SynthError::Parse {
                    offset: product.offset,
                    message: format!("qubit {qubit} appears twice in one product"),
                });
            }
            ops[qubit] = op;
        }
        table.accumulate(PauliString::new(ops)?, product.coeff)?;
    }

    debug!(n_terms = table.len(), n_qubits = width, "parsed Hamiltonian");
    Ok(table)
}

fn parse_products(text: &str) -> SynthResult<Vec<Product>> {
    let mut products = Vec::new();
    let mut cursor = 0;

    for caps in TERM_RE.captures_iter(text) {
        let (Some(whole), Some(coeff), Some(body)) = (caps.get(0), caps.get(1), caps.get(2)) else {
            continue;
        };
        check_separator(text, cursor, whole.start(), products.is_empty())?;
        cursor = whole.end();

        let ops = body
            .as_str()
            .split_whitespace()
            .map(|tok| parse_op(tok, body.start()))
            .collect::<SynthResult<Vec<_>>>()?;
        products.push(Product {
            offset: whole.start(),
            coeff: parse_coefficient(coeff.as_str(), coeff.start())?,
            ops,
        });
    }

    if products.is_empty() {
        return Err(SynthError::Parse {
            offset: 0,
            message: "no terms of the form (coeff) [ops] found".into(),
        });
    }
    let tail = &text[cursor..];
    if !tail.trim().is_empty() {
        return Err(SynthError::Parse {
            offset: cursor + (tail.len() - tail.trim_start().len()),
            message: format!("unexpected trailing input '{}'", tail.trim()),
        });
    }
    Ok(products)
}

/// Text between two terms must be a single `+`; before the first, nothing.
fn check_separator(text: &str, from: usize, to: usize, first: bool) -> SynthResult<()> {
    let gap = text[from..to].trim();
    let ok = if first { gap.is_empty() } else { gap == "+" };
    if ok {
        return Ok(());
    }
    Err(SynthError::Parse {
        offset: from,
        message: if first {
            format!("unexpected input '{gap}' before first term")
        } else {
            format!("expected '+' between terms, found '{gap}'")
        },
    })
}

fn parse_op(tok: &str, offset: usize) -> SynthResult<(usize, PauliOp)> {
    let parsed = OP_RE.captures(tok).and_then(|c| {
        let op = c.get(1)?.as_str().chars().next().and_then(PauliOp::from_char)?;
        let qubit = c.get(2)?.as_str().parse().ok()?;
        Some((qubit, op))
    });
    parsed.ok_or_else(|| SynthError::Parse {
        offset,
        message: format!("invalid operator '{tok}', expected e.g. X0 or Z12"),
    })
}

/// Parse `1.5`, `-2e-3`, `0.5j`, `1-0.5j` or `-1e-2+3j`.
fn parse_coefficient(s: &str, offset: usize) -> SynthResult<Complex64> {
    let err = || SynthError::Parse {
        offset,
        message: format!("invalid coefficient '{s}'"),
    };
    let s = s.trim();
    let value = match s.strip_suffix(['j', 'J']) {
        None => Complex64::new(s.parse().map_err(|_| err())?, 0.0),
        Some(body) => {
            // split at the last sign that is not leading and not an exponent sign
            let split = body
                .char_indices()
                .rev()
                .find(|&(i, c)| {
                    (c == '+' || c == '-')
                        && i > 0
                        && !matches!(body.as_bytes()[i - 1], b'e' | b'E')
                })
                .map(|(i, _)| i);
            let (re, im) = match split {
                Some(i) => (body[..i].trim().parse().map_err(|_| err())?, &body[i..]),
                None => (0.0, body),
            };
            let im: f64 = match im.trim() {
                "" | "+" => 1.0,
                "-" => -1.0,
                v => v.parse().map_err(|_| err())?,
            };
            Complex64::new(re, im)
        }
    };
    if !value.re.is_finite() || !value.im.is_finite() {
        return Err(err());
    }
    Ok(value)
}
