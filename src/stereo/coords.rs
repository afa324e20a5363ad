use nalgebra::Point3;
use petgraph::graph::NodeIndex;

use super::CoordMode;
use crate::bond::BondStereo;
use crate::mol::Mol;
use crate::traits::{HasBondStereo, HasPosition2D, HasPosition3D};

/// Depth factors for `[Up, UpInverted, Down, DownInverted]`.
const WEDGE_DEPTH: [f64; 4] = [1.0, -1.0, -1.0, 1.0];
const WEDGE_DEPTH_UP_PRIOR: [f64; 4] = [2.0, -2.0, -1.0, 1.0];

/// Where geometry is read from and whether a missing coordinate set may be
/// substituted by the other one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CoordSource {
    pub mode: CoordMode,
    pub allow_borrow: bool,
}

/// Picks 3D when `key` carries a 3D coordinate and no mode was requested.
pub fn resolve_coord_mode<A: HasPosition3D, B>(
    mol: &Mol<A, B>,
    key: NodeIndex,
    requested: Option<CoordMode>,
) -> CoordMode {
    requested.unwrap_or_else(|| match mol.try_atom(key) {
        Some(atom) if atom.position_3d().is_some() => CoordMode::ThreeD,
        _ => CoordMode::TwoD,
    })
}

/// Absolute coordinate of `atom` in `mode`.
///
/// A 2D coordinate always has `z = 0`. With `allow_borrow`, an atom lacking
/// the requested set falls back to the other one (a borrowed 3D coordinate
/// is flattened onto the xy plane).
pub fn atom_coordinate<A, B>(
    mol: &Mol<A, B>,
    atom: NodeIndex,
    mode: CoordMode,
    allow_borrow: bool,
) -> Option<Point3<f64>>
where
    A: HasPosition2D + HasPosition3D,
{
    let payload = mol.try_atom(atom)?;
    let from_2d = || payload.position_2d().map(|[x, y]| Point3::new(x, y, 0.0));
    let from_3d = || payload.position_3d().map(|[x, y, z]| Point3::new(x, y, z));
    match mode {
        CoordMode::ThreeD => from_3d().or_else(|| {
            if allow_borrow {
                from_2d()
            } else {
                None
            }
        }),
        CoordMode::TwoD => from_2d().or_else(|| {
            if allow_borrow {
                from_3d().map(|p| Point3::new(p.x, p.y, 0.0))
            } else {
                None
            }
        }),
    }
}

/// Coordinate of `atom` as a neighbor of `center`.
///
/// In 3D this is the plain coordinate. In 2D the depth is read off a wedge
/// on the bond joining the two atoms: `z = ±distance(atom, center)`, signed
/// by the marker as seen from `center`. A wavy (up-or-down) marker makes the
/// position indeterminate and yields `None`, as does a missing coordinate.
pub fn sibling_coordinate<A, B>(
    mol: &Mol<A, B>,
    atom: NodeIndex,
    center: NodeIndex,
    center_coord: &Point3<f64>,
    source: CoordSource,
    wedge_bond_prior: bool,
) -> Option<Point3<f64>>
where
    A: HasPosition2D + HasPosition3D,
    B: HasBondStereo,
{
    let mut coord = atom_coordinate(mol, atom, source.mode, source.allow_borrow)?;
    if source.mode == CoordMode::ThreeD {
        return Some(coord);
    }
    let Some(bond) = mol.bond_between(atom, center) else {
        return Some(coord);
    };
    let mut stereo = mol.bond(bond).bond_stereo();
    if stereo.is_up_or_down() {
        return None;
    }
    if !stereo.is_wedge() {
        return Some(coord);
    }
    if mol.bond_endpoints(bond).is_some_and(|(first, _)| first == atom) {
        stereo = stereo.inverted();
    }
    let factors = if wedge_bond_prior {
        &WEDGE_DEPTH_UP_PRIOR
    } else {
        &WEDGE_DEPTH
    };
    let factor = match stereo {
        BondStereo::Up => factors[0],
        BondStereo::UpInverted => factors[1],
        BondStereo::Down => factors[2],
        BondStereo::DownInverted => factors[3],
        _ => 0.0,
    };
    coord.z = nalgebra::distance(&coord, center_coord) * factor;
    Some(coord)
}
