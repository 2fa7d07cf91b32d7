//! Pauli algebra, tables and trace decomposition.

use lcukit_synth::{
    Coefficient, ErrorKind, PauliOp, PauliString, PauliTable, SynthError, TableEntry, decompose,
    matrix_from_rows, pauli_matrix, phase_of,
};
use ndarray::Array2;
use num_complex::Complex64;
use proptest::prelude::*;
use std::f64::consts::{FRAC_PI_2, PI};

fn c(re: f64, im: f64) -> Complex64 {
    Complex64::new(re, im)
}

// ---------------------------------------------------------------------------
// Pauli strings and matrices
// ---------------------------------------------------------------------------

#[test]
fn string_parsing() {
    let p: PauliString = "XIZY".parse().unwrap();
    assert_eq!(p.ops(), &[PauliOp::X, PauliOp::I, PauliOp::Z, PauliOp::Y]);
    assert_eq!(p.weight(), 3);
    assert!(matches!(
        "XQ".parse::<PauliString>(),
        Err(SynthError::InvalidPauliChar { ch: 'Q', position: 1 })
    ));
    assert!("".parse::<PauliString>().is_err());
}

#[test]
fn character_zero_is_most_significant() {
    // X on the first character flips the high bit of the matrix index
    let m = pauli_matrix(&"XI".parse().unwrap());
    assert_eq!(m[[2, 0]], c(1.0, 0.0));
    assert_eq!(m[[1, 0]], c(0.0, 0.0));
}

#[test]
fn products_square_to_identity() {
    for p in PauliString::all(2) {
        let m = pauli_matrix(&p);
        let sq = m.dot(&m);
        assert_eq!(sq, Array2::<Complex64>::eye(4), "{p}");
    }
}

#[test]
fn all_strings_lexicographic() {
    let all: Vec<String> = PauliString::all(2).map(|p| p.to_string()).collect();
    assert_eq!(all.len(), 16);
    assert_eq!(&all[..5], &["II", "IX", "IY", "IZ", "XI"]);
    assert_eq!(all.last().map(String::as_str), Some("ZZ"));
}

#[test]
fn phase_classification() {
    assert_eq!(phase_of(c(2.0, 0.0)).unwrap(), 0.0);
    assert_eq!(phase_of(c(0.0, 0.0)).unwrap(), 0.0);
    assert_eq!(phase_of(c(-0.1, 0.0)).unwrap(), PI);
    assert_eq!(phase_of(c(0.0, 3.0)).unwrap(), FRAC_PI_2);
    assert_eq!(phase_of(c(0.0, -3.0)).unwrap(), -FRAC_PI_2);
    let err = phase_of(c(1.0, 1.0)).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::UnsupportedValue);
}

// ---------------------------------------------------------------------------
// Tables
// ---------------------------------------------------------------------------

#[test]
fn table_rejects_width_mismatch_and_duplicates() {
    let mut t = PauliTable::from_real([("XX", 1.0)]).unwrap();
    assert!(matches!(
        t.insert("Z".parse().unwrap(), c(1.0, 0.0)),
        Err(SynthError::WidthMismatch { expected: 2, got: 1, .. })
    ));
    assert!(matches!(
        t.insert("XX".parse().unwrap(), c(1.0, 0.0)),
        Err(SynthError::DuplicateTerm(_))
    ));
    assert!(matches!(
        t.insert("ZZ".parse().unwrap(), c(f64::NAN, 0.0)),
        Err(SynthError::NonFiniteCoefficient { .. })
    ));
}

#[test]
fn table_json_and_yaml() {
    let json = r#"[{"pauli": "XZ", "coeff": 0.5}, {"pauli": "YY", "coeff": [0.0, -1.0]}]"#;
    let t: PauliTable = serde_json::from_str(json).unwrap();
    assert_eq!(t.get(&"YY".parse().unwrap()), Some(c(0.0, -1.0)));

    let yaml = "- pauli: ZI\n  coeff: -0.25\n- pauli: IZ\n  coeff: [0.5, 0.0]\n";
    let y: PauliTable = serde_yaml_ng::from_str(yaml).unwrap();
    assert_eq!(y.len(), 2);
    assert_eq!(y.terms()[0].coeff, c(-0.25, 0.0));

    let back: Vec<TableEntry> = t.into();
    assert_eq!(back[0].coeff, Coefficient::Real(0.5));
    assert_eq!(back[1].coeff, Coefficient::Complex([0.0, -1.0]));
}

#[test]
fn table_deserialisation_validates() {
    let dup = r#"[{"pauli": "X", "coeff": 1}, {"pauli": "X", "coeff": 2}]"#;
    assert!(serde_json::from_str::<PauliTable>(dup).is_err());
    let bad = r#"[{"pauli": "XA", "coeff": 1}]"#;
    assert!(serde_json::from_str::<PauliTable>(bad).is_err());
    let width = r#"[{"pauli": "X", "coeff": 1}, {"pauli": "XX", "coeff": 1}]"#;
    assert!(serde_json::from_str::<PauliTable>(width).is_err());
}

#[test]
fn identity_helpers() {
    let t = PauliTable::from_real([("II", 2.0), ("XZ", 1.0)]).unwrap();
    let zeroed = t.clone().zero_identity();
    assert_eq!(zeroed.len(), 2);
    assert_eq!(zeroed.terms()[0].coeff, c(0.0, 0.0));
    let dropped = t.without_identity();
    assert_eq!(dropped.len(), 1);
    assert_eq!(dropped.terms()[0].pauli.to_string(), "XZ");
    assert_eq!(dropped.get(&"XZ".parse().unwrap()), Some(c(1.0, 0.0)));
}

// ---------------------------------------------------------------------------
// Decomposition
// ---------------------------------------------------------------------------

#[test]
fn decomposition_lists_every_string() {
    let m = Array2::<Complex64>::eye(8);
    let t = decompose(&m).unwrap();
    assert_eq!(t.len(), 64);
    assert_eq!(t.terms()[0].pauli.to_string(), "III");
    assert!((t.terms()[0].coeff - c(1.0, 0.0)).norm() < 1e-12);
    assert!(t.iter().skip(1).all(|term| term.coeff.norm() < 1e-12));
}

#[test]
fn decomposition_of_rows() {
    // |0><1|: (X + iY) / 2
    let m = matrix_from_rows(vec![vec![c(0.0, 0.0), c(1.0, 0.0)], vec![c(0.0, 0.0), c(0.0, 0.0)]])
        .unwrap();
    let t = decompose(&m).unwrap();
    assert!((t.get(&"X".parse().unwrap()).unwrap() - c(0.5, 0.0)).norm() < 1e-12);
    assert!((t.get(&"Y".parse().unwrap()).unwrap() - c(0.0, 0.5)).norm() < 1e-12);
}

#[test]
fn decomposition_rejects_bad_shapes() {
    let err = decompose(&Array2::<Complex64>::zeros((4, 2))).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidInput);
    assert!(decompose(&Array2::<Complex64>::zeros((6, 6))).is_err());
    assert!(decompose(&Array2::<Complex64>::zeros((1, 1))).is_err());
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn decomposition_reconstructs(entries in prop::collection::vec((-1.0f64..1.0, -1.0f64..1.0), 16)) {
        let m = Array2::from_shape_vec((4, 4), entries.into_iter().map(|(r, i)| c(r, i)).collect())
            .unwrap();
        let back = decompose(&m).unwrap().to_matrix().unwrap();
        for (a, b) in m.iter().zip(back.iter()) {
            prop_assert!((a - b).norm() < 1e-12);
        }
    }
}
