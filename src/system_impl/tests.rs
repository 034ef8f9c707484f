//! Tests for the molecule, basis bookkeeping and SCF reference containers

use super::{Atom, BasisSet, Molecule, ScfReference, Shell};
use crate::error::DerivError;
use crate::symmetry_impl::{BlockMatrix, Dimension};
use nalgebra::{DVector, Vector3};
use periodic_table_on_an_enum::Element;

fn water() -> Molecule {
    Molecule::new(vec![
        Atom::new(Element::Oxygen, Vector3::new(0.0, 0.0, -0.1294)),
        Atom::new(Element::Hydrogen, Vector3::new(0.0, -1.4941, 1.0274)),
        Atom::new(Element::Hydrogen, Vector3::new(0.0, 1.4941, 1.0274)),
    ])
    .unwrap()
}

#[test]
fn test_empty_molecule_is_missing_input() {
    assert!(matches!(
        Molecule::new(Vec::new()),
        Err(DerivError::MissingInput(_))
    ));
}

#[test]
fn test_nuclear_repulsion_deriv1_h2() {
    let molecule = Molecule::new(vec![
        Atom::new(Element::Hydrogen, Vector3::new(0.0, 0.0, 0.0)),
        Atom::new(Element::Hydrogen, Vector3::new(0.0, 0.0, 1.4)),
    ])
    .unwrap();

    let gradient = molecule.nuclear_repulsion_energy_deriv1();
    assert_eq!(gradient.shape(), (2, 3));

    // E = 1/R, dE/dz_2 = -1/R^2
    let expected = 1.0 / (1.4 * 1.4);
    assert!((gradient[(0, 2)] - expected).abs() < 1e-12);
    assert!((gradient[(1, 2)] + expected).abs() < 1e-12);
    assert_eq!(gradient[(0, 0)], 0.0);
    assert_eq!(gradient[(1, 1)], 0.0);
}

#[test]
fn test_nuclear_repulsion_deriv1_matches_finite_difference() {
    let molecule = water();
    let analytic = molecule.nuclear_repulsion_energy_deriv1();
    let step = 1e-5;

    for atom in 0..molecule.natom() {
        for axis in 0..3 {
            let mut plus = molecule.atoms().to_vec();
            let mut minus = molecule.atoms().to_vec();
            plus[atom].position[axis] += step;
            minus[atom].position[axis] -= step;

            let e_plus = Molecule::new(plus).unwrap().nuclear_repulsion_energy();
            let e_minus = Molecule::new(minus).unwrap().nuclear_repulsion_energy();
            let numeric = (e_plus - e_minus) / (2.0 * step);

            assert!(
                (analytic[(atom, axis)] - numeric).abs() < 1e-6,
                "atom {} axis {}: analytic {} numeric {}",
                atom,
                axis,
                analytic[(atom, axis)],
                numeric
            );
        }
    }
}

#[test]
fn test_nuclear_repulsion_deriv1_is_translation_invariant() {
    let gradient = water().nuclear_repulsion_energy_deriv1();
    for axis in 0..3 {
        assert!(gradient.column(axis).sum().abs() < 1e-12);
    }
}

#[test]
fn test_basis_set_counts() {
    // O: s, s, p, d ; H: s each
    let shells = vec![
        Shell { center: 0, l: 0, n_primitive: 6 },
        Shell { center: 0, l: 0, n_primitive: 3 },
        Shell { center: 0, l: 1, n_primitive: 3 },
        Shell { center: 0, l: 2, n_primitive: 1 },
        Shell { center: 1, l: 0, n_primitive: 3 },
        Shell { center: 2, l: 0, n_primitive: 3 },
    ];

    let cartesian = BasisSet::new("6-31G*", water(), shells.clone(), false).unwrap();
    assert_eq!(cartesian.nshell(), 6);
    assert_eq!(cartesian.nprimitive(), 19);
    assert_eq!(cartesian.nao(), 1 + 1 + 3 + 6 + 1 + 1);
    assert_eq!(cartesian.nbf(), cartesian.nao());

    let pure = BasisSet::new("6-31G*", water(), shells, true).unwrap();
    assert_eq!(pure.nao(), 13);
    assert_eq!(pure.nbf(), 12);
    assert_eq!(pure.molecule().natom(), 3);
}

#[test]
fn test_basis_set_rejects_shell_on_unknown_atom() {
    let shells = vec![Shell { center: 3, l: 0, n_primitive: 1 }];
    assert!(matches!(
        BasisSet::new("bad", water(), shells, false),
        Err(DerivError::MissingInput(_))
    ));
}

#[test]
fn test_unconverged_reference_is_missing_input() {
    let ca = BlockMatrix::identity("Ca", &Dimension::new(vec![1]));
    let result = ScfReference::new(ca, vec![DVector::from_vec(vec![-0.5])], vec![1], -1.0, false);
    assert!(matches!(result, Err(DerivError::MissingInput(_))));
}

#[test]
fn test_reference_rejects_wrong_occupation_irreps() {
    let ca = BlockMatrix::identity("Ca", &Dimension::new(vec![2, 1]));
    let epsilon = vec![DVector::from_vec(vec![-1.0, 0.5]), DVector::from_vec(vec![0.2])];
    let result = ScfReference::new(ca, epsilon, vec![1], -1.0, true);
    assert!(matches!(result, Err(DerivError::DimensionMismatch { .. })));
}

#[test]
fn test_reference_dimensions() {
    let ca = BlockMatrix::identity("Ca", &Dimension::new(vec![2, 1]));
    let epsilon = vec![DVector::from_vec(vec![-1.0, 0.5]), DVector::from_vec(vec![0.2])];
    let reference = ScfReference::new(ca, epsilon, vec![1, 0], -1.1, true).unwrap();

    assert_eq!(reference.nso(), 3);
    assert_eq!(reference.nmo(), 3);
    assert_eq!(reference.ndocc(), 1);
    assert_eq!(reference.nmopi(), &Dimension::new(vec![2, 1]));
    assert_eq!(reference.energy(), -1.1);
}
