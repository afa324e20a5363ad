use petgraph::graph::{EdgeIndex, NodeIndex};

use super::coords::{atom_coordinate, resolve_coord_mode, sibling_coordinate, CoordSource};
use super::{CoordMode, Parity, StereoError};
use crate::bond::BondOrder;
use crate::geometry::{dihedral_angle, parity_from_dihedral};
use crate::mol::Mol;
use crate::rings::smallest_bond_ring_size;
use crate::traits::{
    HasAtomicNum, HasBondOrder, HasBondStereo, HasCanonicalIndex, HasHydrogenCount,
    HasPosition2D, HasPosition3D,
};

/// Double bonds in rings up to this size have a fixed configuration.
const MAX_RIGID_RING_SIZE: usize = 10;

fn double_bond_ends<A, B: HasBondOrder>(
    mol: &Mol<A, B>,
    bond: EdgeIndex,
) -> Option<(NodeIndex, NodeIndex)> {
    if mol.try_bond(bond)?.bond_order() != BondOrder::Double {
        return None;
    }
    let (a, b) = mol.bond_endpoints(bond)?;
    (a != b).then_some((a, b))
}

fn side_neighbors<A, B>(mol: &Mol<A, B>, end: NodeIndex, other: NodeIndex) -> Vec<NodeIndex> {
    mol.neighbors(end)
        .filter(|&nb| nb != end && nb != other)
        .collect()
}

fn end_is_stereogenic<A, B>(mol: &Mol<A, B>, end: NodeIndex, other: NodeIndex) -> bool
where
    A: HasAtomicNum + HasHydrogenCount + HasCanonicalIndex,
    B: HasBondOrder,
{
    if mol.total_hydrogen_count(end) >= 2 {
        return false;
    }
    let side = side_neighbors(mol, end, other);
    let distinguishable = match side.as_slice() {
        [_] => true,
        [x, y] => matches!(
            (mol.canonical_index(*x), mol.canonical_index(*y)),
            (Some(i), Some(j)) if i != j
        ),
        _ => false,
    };
    distinguishable
        && side.iter().all(|&nb| {
            mol.bond_between(end, nb)
                .is_some_and(|e| mol.bond(e).bond_order() == BondOrder::Single)
        })
}

/// Whether `bond` is a stereogenic double bond.
///
/// Each end needs fewer than two hydrogens and one or two singly bonded
/// side substituents; with two, their canonical indices must both be set
/// and differ. Double bonds in rings of ten atoms or fewer never qualify.
pub fn is_stereo_bond<A, B>(mol: &Mol<A, B>, bond: EdgeIndex) -> bool
where
    A: HasAtomicNum + HasHydrogenCount + HasCanonicalIndex,
    B: HasBondOrder,
{
    if smallest_bond_ring_size(mol, bond).is_some_and(|size| size <= MAX_RIGID_RING_SIZE) {
        return false;
    }
    let Some((a, b)) = double_bond_ends(mol, bond) else {
        return false;
    };
    end_is_stereogenic(mol, a, b) && end_is_stereogenic(mol, b, a)
}

/// `[ref1, end1, end2, ref2]` for the dihedral of a double bond.
///
/// An end with two side substituents takes the one with the larger
/// canonical index as reference; an unset index ranks below every set one.
/// `None` when an end has no side substituent or more than two.
pub fn stereo_bond_key_nodes<A, B>(mol: &Mol<A, B>, bond: EdgeIndex) -> Option<[NodeIndex; 4]>
where
    A: HasCanonicalIndex,
{
    let (end1, end2) = mol.bond_endpoints(bond)?;
    if end1 == end2 {
        return None;
    }
    let rank = |idx: NodeIndex| mol.canonical_index(idx).map_or(-1, |i| i as i64);
    let reference = |end: NodeIndex, other: NodeIndex| {
        match side_neighbors(mol, end, other).as_slice() {
            &[only] => Some(only),
            &[x, y] => Some(if rank(y) > rank(x) { y } else { x }),
            _ => None,
        }
    };
    Some([
        reference(end1, end2)?,
        end1,
        end2,
        reference(end2, end1)?,
    ])
}

/// Parity of a double bond from the dihedral of its key nodes.
///
/// Returns [`Parity::None`] for a bond that is not stereogenic unless
/// `ignore_stereo_check` is set, in which case the bond must still be a
/// double bond between two atoms. A bond marked cis-or-trans is stereogenic
/// with an `Unknown` configuration.
pub fn calc_stereo_bond_parity<A, B>(
    mol: &Mol<A, B>,
    bond: EdgeIndex,
    coord_mode: Option<CoordMode>,
    allow_coord_borrow: bool,
    ignore_stereo_check: bool,
) -> Result<Parity, StereoError>
where
    A: HasAtomicNum + HasHydrogenCount + HasCanonicalIndex + HasPosition2D + HasPosition3D,
    B: HasBondOrder + HasBondStereo,
{
    let payload = mol.try_bond(bond).ok_or(StereoError::MissingBond { bond })?;
    if ignore_stereo_check {
        if double_bond_ends(mol, bond).is_none() {
            return Err(StereoError::NotDoubleBond { bond });
        }
    } else if !is_stereo_bond(mol, bond) {
        return Ok(Parity::None);
    }
    if payload.bond_stereo().is_cis_or_trans() {
        return Ok(Parity::Unknown);
    }
    let Some(keys) = stereo_bond_key_nodes(mol, bond) else {
        return Ok(Parity::Unknown);
    };
    let source = CoordSource {
        mode: resolve_coord_mode(mol, keys[1], coord_mode),
        allow_borrow: allow_coord_borrow,
    };
    let angle = key_node_dihedral(mol, &keys, source);
    Ok(angle.map_or(Parity::Unknown, parity_from_dihedral))
}

fn key_node_dihedral<A, B>(mol: &Mol<A, B>, keys: &[NodeIndex; 4], source: CoordSource) -> Option<f64>
where
    A: HasPosition2D + HasPosition3D,
    B: HasBondStereo,
{
    let [ref1, end1, end2, ref2] = *keys;
    let c2 = atom_coordinate(mol, end1, source.mode, source.allow_borrow)?;
    let c3 = atom_coordinate(mol, end2, source.mode, source.allow_borrow)?;
    let c1 = sibling_coordinate(mol, ref1, end1, &c2, source, false)?;
    let c4 = sibling_coordinate(mol, ref2, end2, &c3, source, false)?;
    dihedral_angle(&c1, &c2, &c3, &c4)
}
