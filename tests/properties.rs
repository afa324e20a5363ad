use std::f64::consts::{PI, TAU};

use nalgebra::Point3;
use petgraph::graph::NodeIndex;

use stereocrab::geometry::{dihedral_angle, parity_from_dihedral, rotation_direction};
use stereocrab::{is_stereo_bond, Atom, Bond, Mol, Parity, RotationDirection};

/// Small deterministic generator so failures reproduce.
struct XorShift(u64);

impl XorShift {
    fn next_f64(&mut self) -> f64 {
        self.0 ^= self.0 << 13;
        self.0 ^= self.0 >> 7;
        self.0 ^= self.0 << 17;
        (self.0 >> 11) as f64 / (1u64 << 53) as f64
    }

    fn point(&mut self) -> Point3<f64> {
        Point3::new(
            self.next_f64() * 4.0 - 2.0,
            self.next_f64() * 4.0 - 2.0,
            self.next_f64() * 4.0 - 2.0,
        )
    }
}

// ---------------------------------------------------------------------------
// Dihedral bands
// ---------------------------------------------------------------------------

#[test]
fn every_angle_falls_in_exactly_one_band() {
    let steps = 10_000;
    for step in 0..steps {
        let angle = TAU * step as f64 / steps as f64;
        let parity = parity_from_dihedral(angle);
        let odd = angle < PI * 2.0 / 5.0 || angle > PI * 8.0 / 5.0;
        let even = angle > PI * 3.0 / 5.0 && angle < PI * 7.0 / 5.0;
        let expected = match (odd, even) {
            (true, false) => Parity::Odd,
            (false, true) => Parity::Even,
            (false, false) => Parity::Unknown,
            (true, true) => panic!("bands overlap at {angle}"),
        };
        assert_eq!(parity, expected, "angle {angle}");
    }
}

#[test]
fn dihedral_angles_stay_in_range() {
    let mut rng = XorShift(0x9e37_79b9_7f4a_7c15);
    for _ in 0..1_000 {
        let (a, b, c, d) = (rng.point(), rng.point(), rng.point(), rng.point());
        if let Some(angle) = dihedral_angle(&a, &b, &c, &d) {
            assert!((0.0..TAU).contains(&angle), "angle {angle}");
            assert_ne!(parity_from_dihedral(angle), Parity::None);
        }
    }
}

#[test]
fn dihedral_is_symmetric_under_reversal() {
    let mut rng = XorShift(42);
    for _ in 0..500 {
        let (a, b, c, d) = (rng.point(), rng.point(), rng.point(), rng.point());
        let forward = dihedral_angle(&a, &b, &c, &d);
        let backward = dihedral_angle(&d, &c, &b, &a);
        if let (Some(f), Some(r)) = (forward, backward) {
            assert_eq!(parity_from_dihedral(f), parity_from_dihedral(r));
        }
    }
}

// ---------------------------------------------------------------------------
// Rotation antisymmetry
// ---------------------------------------------------------------------------

#[test]
fn swapping_last_two_points_reverses_rotation() {
    let mut rng = XorShift(7);
    let mut decided = 0;
    for _ in 0..1_000 {
        let (center, reference) = (rng.point(), rng.point());
        let (p1, p2, p3) = (rng.point(), rng.point(), rng.point());
        for behind in [false, true] {
            let forward = rotation_direction(&center, &reference, &p1, &p2, &p3, behind);
            let swapped = rotation_direction(&center, &reference, &p1, &p3, &p2, behind);
            assert_eq!(forward, swapped.reversed());
            if forward != RotationDirection::Unknown {
                decided += 1;
            }
        }
    }
    assert!(decided > 1_000);
}

#[test]
fn moving_the_viewer_reverses_rotation() {
    let mut rng = XorShift(99);
    for _ in 0..500 {
        let (center, reference) = (rng.point(), rng.point());
        let (p1, p2, p3) = (rng.point(), rng.point(), rng.point());
        let front = rotation_direction(&center, &reference, &p1, &p2, &p3, false);
        let behind = rotation_direction(&center, &reference, &p1, &p2, &p3, true);
        assert_eq!(front, behind.reversed());
    }
}

// ---------------------------------------------------------------------------
// Stereo bond eligibility
// ---------------------------------------------------------------------------

/// Carbocycle of `size` atoms with a double bond between atoms 0 and 1 and a
/// distinct substituent on each of them.
fn cycloalkene(size: usize) -> Mol<Atom, Bond> {
    let mut mol = Mol::new();
    let ring: Vec<_> = (0..size)
        .map(|i| {
            let hydrogens = if i < 2 { 0 } else { 2 };
            mol.add_atom(Atom::new(6).with_hydrogens(hydrogens))
        })
        .collect();
    for i in 0..size {
        let bond = if i == 0 { Bond::double() } else { Bond::single() };
        mol.add_bond(ring[i], ring[(i + 1) % size], bond);
    }
    let f = mol.add_atom(Atom::new(9));
    let cl = mol.add_atom(Atom::new(17));
    mol.add_bond(ring[0], f, Bond::single());
    mol.add_bond(ring[1], cl, Bond::single());
    for (i, atom) in mol.atoms().collect::<Vec<_>>().into_iter().enumerate() {
        mol.atom_mut(atom).canonical_index = Some(i);
    }
    mol
}

#[test]
fn double_bonds_in_small_rings_are_never_stereo() {
    for size in 3..=10 {
        let mol = cycloalkene(size);
        let double = mol
            .bond_between(NodeIndex::new(0), NodeIndex::new(1))
            .unwrap();
        assert!(!is_stereo_bond(&mol, double), "ring of {size}");
    }
    for size in [11, 12, 14] {
        let mol = cycloalkene(size);
        let double = mol
            .bond_between(NodeIndex::new(0), NodeIndex::new(1))
            .unwrap();
        assert!(is_stereo_bond(&mol, double), "ring of {size}");
    }
}

/// C(a)(b)=C(c)(d) with the given substituent indices.
fn tetrasubstituted(indices: [usize; 4]) -> Mol<Atom, Bond> {
    let mut mol = Mol::new();
    let left = mol.add_atom(Atom::new(6));
    let right = mol.add_atom(Atom::new(6));
    mol.add_bond(left, right, Bond::double());
    for (i, index) in indices.into_iter().enumerate() {
        let end = if i < 2 { left } else { right };
        let sub = mol.add_atom(Atom::new(6).with_hydrogens(3));
        mol.atom_mut(sub).canonical_index = Some(index);
        mol.add_bond(end, sub, Bond::single());
    }
    mol
}

#[test]
fn equal_substituent_indices_rule_out_stereo() {
    let double = petgraph::graph::EdgeIndex::new(0);
    for a in 0..3 {
        for b in 0..3 {
            for c in 0..3 {
                for d in 0..3 {
                    let mol = tetrasubstituted([a, b, c, d]);
                    let expected = a != b && c != d;
                    assert_eq!(
                        is_stereo_bond(&mol, double),
                        expected,
                        "indices {:?}",
                        [a, b, c, d]
                    );
                }
            }
        }
    }
}
