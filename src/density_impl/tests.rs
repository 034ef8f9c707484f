//! Tests for the Q / W density builder

use super::{build_densities, unordered_irreps};
use crate::error::DerivError;
use crate::symmetry_impl::Dimension;
use nalgebra::{DMatrix, DVector};

#[test]
fn test_single_orbital_gives_rank_one_projector() {
    let cao = DMatrix::from_row_slice(1, 1, &[1.0]);
    let epsilon = vec![DVector::from_vec(vec![-0.5])];

    let densities = build_densities(&cao, &epsilon, &[1], &Dimension::new(vec![1])).unwrap();
    assert_eq!(densities.q, DMatrix::from_row_slice(1, 1, &[1.0]));
    assert_eq!(densities.w, DMatrix::from_row_slice(1, 1, &[-0.5]));
}

#[test]
fn test_q_is_outer_product_of_occupied_column() {
    let cao = DMatrix::from_row_slice(2, 2, &[0.6, -0.8, 0.8, 0.6]);
    let epsilon = vec![DVector::from_vec(vec![-1.25, 0.4])];

    let densities = build_densities(&cao, &epsilon, &[1], &Dimension::new(vec![2])).unwrap();
    let c = cao.column(0);
    let expected_q = &c * c.transpose();

    assert!((&densities.q - &expected_q).abs().max() < 1e-15);
    assert!((&densities.w - &expected_q * -1.25).abs().max() < 1e-15);

    // orthonormal orbitals in an orthonormal basis: Q is idempotent
    let q_squared = &densities.q * &densities.q;
    assert!((q_squared - &densities.q).abs().max() < 1e-14);
}

#[test]
fn test_densities_are_symmetric_for_random_coefficients() {
    let cao = DMatrix::<f64>::new_random(5, 6).map(|x| x - 0.5);
    let epsilon = vec![
        DVector::from_vec(vec![-2.0, -0.7, 0.1, 0.9]),
        DVector::from_vec(vec![-0.3, 0.5]),
    ];

    let densities =
        build_densities(&cao, &epsilon, &[2, 1], &Dimension::new(vec![4, 2])).unwrap();

    for m in 0..5 {
        for n in 0..5 {
            assert!((densities.q[(m, n)] - densities.q[(n, m)]).abs() < 1e-14);
            assert!((densities.w[(m, n)] - densities.w[(n, m)]).abs() < 1e-14);
        }
    }
}

#[test]
fn test_mo_offsets_follow_irrep_blocks() {
    // irrep 0 owns columns 0..2, irrep 1 owns column 2
    let cao = DMatrix::from_row_slice(2, 3, &[1.0, 5.0, 0.0, 0.0, 7.0, 1.0]);
    let epsilon = vec![
        DVector::from_vec(vec![-1.0, 3.0]),
        DVector::from_vec(vec![-0.25]),
    ];

    let densities = build_densities(&cao, &epsilon, &[1, 1], &Dimension::new(vec![2, 1])).unwrap();

    // column 1 (virtual of irrep 0) must not contribute
    assert_eq!(densities.q, DMatrix::identity(2, 2));
    assert_eq!(densities.w, DMatrix::from_row_slice(2, 2, &[-1.0, 0.0, 0.0, -0.25]));
}

#[test]
fn test_virtual_orbitals_do_not_contribute() {
    let mut cao = DMatrix::from_row_slice(2, 2, &[0.6, -0.8, 0.8, 0.6]);
    let epsilon = vec![DVector::from_vec(vec![-1.0, 1.0])];
    let nmopi = Dimension::new(vec![2]);

    let before = build_densities(&cao, &epsilon, &[1], &nmopi).unwrap();
    cao[(0, 1)] = 42.0;
    cao[(1, 1)] = -3.0;
    let after = build_densities(&cao, &epsilon, &[1], &nmopi).unwrap();

    assert_eq!(before.q, after.q);
    assert_eq!(before.w, after.w);
}

#[test]
fn test_occupation_overflow() {
    let cao = DMatrix::identity(2, 2);
    let epsilon = vec![DVector::from_vec(vec![-1.0, 1.0])];

    match build_densities(&cao, &epsilon, &[3], &Dimension::new(vec![2])) {
        Err(DerivError::OccupationOverflow {
            irrep,
            occupied,
            available,
        }) => {
            assert_eq!(irrep, 0);
            assert_eq!(occupied, 3);
            assert_eq!(available, 2);
        }
        other => panic!("expected OccupationOverflow, got {:?}", other),
    }
}

#[test]
fn test_missing_orbital_energies_overflow() {
    let cao = DMatrix::identity(2, 2);
    let epsilon = vec![DVector::from_vec(vec![-1.0])];

    let result = build_densities(&cao, &epsilon, &[2], &Dimension::new(vec![2]));
    assert!(matches!(result, Err(DerivError::OccupationOverflow { available: 1, .. })));
}

#[test]
fn test_coefficient_columns_must_match_mo_count() {
    let cao = DMatrix::identity(2, 2);
    let epsilon = vec![DVector::from_vec(vec![-1.0, 1.0, 2.0])];

    let result = build_densities(&cao, &epsilon, &[1], &Dimension::new(vec![3]));
    assert!(matches!(result, Err(DerivError::DimensionMismatch { .. })));
}

#[test]
fn test_unordered_irreps_detection() {
    let epsilon = vec![
        DVector::from_vec(vec![-1.0, -2.0, 0.5]),
        DVector::from_vec(vec![-1.0, -0.5]),
        DVector::from_vec(vec![-1.0, 2.0, 0.5]),
    ];

    // only the occupied part is checked
    assert_eq!(unordered_irreps(&epsilon, &[2, 2, 2]), vec![0]);
    assert!(unordered_irreps(&epsilon, &[1, 2, 2]).is_empty());
}
