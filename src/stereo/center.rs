use std::cmp::Reverse;
use std::collections::HashSet;

use nalgebra::{Point3, Vector3};
use petgraph::graph::NodeIndex;

use super::coords::{atom_coordinate, resolve_coord_mode, sibling_coordinate, CoordSource};
use super::{CoordMode, Parity, PerceptionOptions, RotationDirection, StereoError};
use crate::bond::BondStereo;
use crate::geometry::rotation_direction;
use crate::mol::Mol;
use crate::traits::{
    HasAtomicNum, HasBondOrder, HasBondStereo, HasCanonicalIndex, HasFormalCharge,
    HasHydrogenCount, HasPosition2D, HasPosition3D,
};

/// Element-specific requirements for a tetrahedral stereocenter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChiralRule {
    /// Distinct attachments needed, implicit hydrogens included.
    pub attachments: usize,
    /// Non-single bonds tolerated on the center.
    pub max_multiple_bonds: usize,
    pub required_charge: Option<i8>,
}

impl ChiralRule {
    pub fn for_element(atomic_num: u8) -> Option<Self> {
        let rule = |attachments, required_charge| ChiralRule {
            attachments,
            max_multiple_bonds: 0,
            required_charge,
        };
        match atomic_num {
            6 | 14 => Some(rule(4, Some(0))),
            7 => Some(rule(4, None)),
            15 | 16 => Some(rule(3, None)),
            5 => Some(rule(3, Some(-1))),
            _ => None,
        }
    }
}

/// Whether `atom` can be a tetrahedral stereocenter.
///
/// Neutral carbon and silicon and any nitrogen need four attachments, sulfur,
/// phosphorus and borate three (the lone pair or a hydrogen completes the
/// tetrahedron). The center must carry only single bonds, fewer than two
/// hydrogens, and neighbors with pairwise different canonical indices.
pub fn is_chiral_node<A, B>(mol: &Mol<A, B>, atom: NodeIndex) -> bool
where
    A: HasAtomicNum + HasFormalCharge + HasHydrogenCount + HasCanonicalIndex,
    B: HasBondOrder,
{
    let Some(payload) = mol.try_atom(atom) else {
        return false;
    };
    let Some(rule) = ChiralRule::for_element(payload.atomic_num()) else {
        return false;
    };
    if rule
        .required_charge
        .is_some_and(|charge| charge != payload.formal_charge())
    {
        return false;
    }
    let multiple_bonds = mol
        .bonds_of(atom)
        .filter(|&e| mol.bond(e).bond_order().is_multiple())
        .count();
    if multiple_bonds > rule.max_multiple_bonds || mol.total_hydrogen_count(atom) >= 2 {
        return false;
    }
    let neighbors: Vec<NodeIndex> = mol.neighbors(atom).collect();
    if neighbors.len() + (payload.hydrogen_count() as usize) < rule.attachments {
        return false;
    }
    let mut seen = HashSet::with_capacity(neighbors.len());
    neighbors
        .iter()
        .all(|&nb| seen.insert(mol.canonical_index(nb).unwrap_or(0)))
}

/// Atoms around a center, ordered for a rotation-direction reading.
#[derive(Debug, Clone, Copy)]
pub struct Tetrahedron<'a> {
    pub center: NodeIndex,
    /// Sibling the viewer looks along.
    pub reference: Option<NodeIndex>,
    /// Siblings whose turning order is read, at most three.
    pub siblings: &'a [NodeIndex],
    /// An unlisted substituent (implicit hydrogen or lone pair) opposite the
    /// explicit ones. Becomes the reference when `reference` is `None`,
    /// otherwise the last rotation sibling.
    pub implicit_sibling: bool,
    /// Place the reference behind the center instead of in front of it.
    pub reference_behind: bool,
}

/// Turning direction of the siblings of a tetrahedral center.
///
/// In 2D at least one sibling must be lifted out of plane by a wedge,
/// otherwise the configuration cannot be read and the result is `Unknown`.
pub fn chiral_center_rotation_direction<A, B>(
    mol: &Mol<A, B>,
    tetrahedron: &Tetrahedron<'_>,
    source: CoordSource,
    wedge_bond_prior: bool,
) -> RotationDirection
where
    A: HasPosition2D + HasPosition3D,
    B: HasBondStereo,
{
    let total = tetrahedron.siblings.len()
        + usize::from(tetrahedron.reference.is_some())
        + usize::from(tetrahedron.implicit_sibling);
    if total < 4 {
        return RotationDirection::Unknown;
    }
    let Some(center) = atom_coordinate(mol, tetrahedron.center, source.mode, source.allow_borrow)
    else {
        return RotationDirection::Unknown;
    };
    let relative = |atom: NodeIndex| {
        sibling_coordinate(mol, atom, tetrahedron.center, &center, source, wedge_bond_prior)
            .map(|p| p - center)
    };

    let mut rotating = Vec::with_capacity(4);
    for &sibling in tetrahedron.siblings {
        match relative(sibling) {
            Some(v) => rotating.push(v),
            None => return RotationDirection::Unknown,
        }
    }
    let mut reference = match tetrahedron.reference {
        Some(atom) => match relative(atom) {
            Some(v) => Some(v),
            None => return RotationDirection::Unknown,
        },
        None => None,
    };

    let explicit = rotating.iter().chain(reference.iter());
    if source.mode == CoordMode::TwoD && explicit.clone().all(|v| v.z == 0.0) {
        return RotationDirection::Unknown;
    }

    if tetrahedron.implicit_sibling {
        let implicit = -explicit.fold(Vector3::zeros(), |sum, v| sum + v);
        match reference {
            None => reference = Some(implicit),
            Some(_) => rotating.push(implicit),
        }
    }

    match (reference, rotating.as_slice()) {
        (Some(reference), [a, b, c]) => rotation_direction(
            &Point3::origin(),
            &Point3::from(reference),
            &Point3::from(*a),
            &Point3::from(*b),
            &Point3::from(*c),
            tetrahedron.reference_behind,
        ),
        _ => RotationDirection::Unknown,
    }
}

/// More than two unmarked bonds around a 2D center put three substituents
/// in the drawing plane, which no tetrahedron can look like.
fn sibling_bonds_legal_2d<A, B: HasBondStereo>(
    mol: &Mol<A, B>,
    atom: NodeIndex,
    siblings: &[NodeIndex],
) -> bool {
    let plain = siblings
        .iter()
        .filter_map(|&nb| mol.bond_between(atom, nb))
        .filter(|&e| mol.bond(e).bond_stereo() == BondStereo::None)
        .count();
    plain <= 2
}

/// Tetrahedral parity of `atom`: clockwise is `Odd`, anticlockwise `Even`.
///
/// Neighbors are ranked by descending canonical index. With four explicit
/// neighbors and no implicit hydrogen, the lowest ranked one points away
/// from the viewer and the other three are read in rank order. Otherwise the
/// top three are read around the implicit sibling.
pub fn calc_chiral_node_parity<A, B>(
    mol: &Mol<A, B>,
    atom: NodeIndex,
    options: &PerceptionOptions,
    ignore_chiral_check: bool,
) -> Result<Parity, StereoError>
where
    A: HasAtomicNum
        + HasFormalCharge
        + HasHydrogenCount
        + HasCanonicalIndex
        + HasPosition2D
        + HasPosition3D,
    B: HasBondOrder + HasBondStereo,
{
    let payload = mol.try_atom(atom).ok_or(StereoError::MissingAtom { atom })?;
    if !ignore_chiral_check && !is_chiral_node(mol, atom) {
        return Ok(Parity::None);
    }
    let mode = resolve_coord_mode(mol, atom, options.coord_mode);
    let mut siblings: Vec<NodeIndex> = mol.neighbors(atom).collect();
    if mode == CoordMode::TwoD
        && options.strict_stereo_atom_geometry
        && !sibling_bonds_legal_2d(mol, atom, &siblings)
    {
        return Ok(Parity::Unknown);
    }

    let implicit_sibling = payload.hydrogen_count() > 0 || siblings.len() < 4;
    siblings.sort_by_key(|&nb| Reverse(mol.canonical_index(nb).unwrap_or(0)));
    let reference = if implicit_sibling {
        None
    } else {
        siblings.get(3).copied()
    };
    siblings.truncate(3);

    let tetrahedron = Tetrahedron {
        center: atom,
        reference,
        siblings: &siblings,
        implicit_sibling,
        reference_behind: true,
    };
    let source = CoordSource {
        mode,
        allow_borrow: options.allow_coord_borrow,
    };
    let direction =
        chiral_center_rotation_direction(mol, &tetrahedron, source, options.wedge_bond_prior);
    Ok(match direction {
        RotationDirection::Clockwise => Parity::Odd,
        RotationDirection::Anticlockwise => Parity::Even,
        RotationDirection::Unknown => Parity::Unknown,
    })
}
