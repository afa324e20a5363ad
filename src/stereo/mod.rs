//! Stereo perception: stereogenic double bonds and tetrahedral centers.

mod bond;
mod center;
mod coords;
mod error;
mod perceive;

use petgraph::graph::{EdgeIndex, NodeIndex};
use serde::{Deserialize, Serialize};

pub use bond::{calc_stereo_bond_parity, is_stereo_bond, stereo_bond_key_nodes};
pub use center::{
    calc_chiral_node_parity, chiral_center_rotation_direction, is_chiral_node, ChiralRule,
    Tetrahedron,
};
pub use coords::{atom_coordinate, resolve_coord_mode, sibling_coordinate, CoordSource};
pub use error::StereoError;
pub use perceive::{
    find_chiral_nodes, find_stereo_bonds, perceive_chiral_nodes, perceive_stereo_connectors,
    perceive_stereos,
};

/// Discrete stereo descriptor of a bond or atom.
///
/// `None` means "not stereogenic", `Unknown` means stereogenic but not
/// determinable from the available coordinates and markers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Parity {
    #[default]
    None,
    Odd,
    Even,
    Unknown,
}

impl Parity {
    pub fn is_stereo(self) -> bool {
        self != Parity::None
    }

    /// Ordering key used when comparing atoms and bonds structurally.
    /// `None` and `Unknown` compare equal.
    pub fn compare_value(self) -> u8 {
        match self {
            Parity::None | Parity::Unknown => 0,
            Parity::Odd => 1,
            Parity::Even => 2,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RotationDirection {
    Clockwise,
    Anticlockwise,
    Unknown,
}

impl RotationDirection {
    pub fn reversed(self) -> Self {
        match self {
            RotationDirection::Clockwise => RotationDirection::Anticlockwise,
            RotationDirection::Anticlockwise => RotationDirection::Clockwise,
            RotationDirection::Unknown => RotationDirection::Unknown,
        }
    }
}

/// Which coordinate set geometry is read from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CoordMode {
    /// 2D layout, depth synthesized from wedge markers.
    TwoD,
    ThreeD,
}

/// A graph object marked stereogenic by a perception pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum StereoObject {
    Bond(EdgeIndex),
    Atom(NodeIndex),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PerceptionOptions {
    /// `None` picks 3D when the key atom has a 3D coordinate, else 2D.
    pub coord_mode: Option<CoordMode>,
    /// Fall back to the other coordinate set when the requested one is
    /// missing on an atom.
    pub allow_coord_borrow: bool,
    pub perceive_stereo_bonds: bool,
    pub perceive_chiral_nodes: bool,
    /// When false, stereogenic objects are found but parities are left as
    /// they are.
    pub calc_parity: bool,
    /// Solid wedges on chiral centers push twice as far out of plane as
    /// hashed ones.
    pub wedge_bond_prior: bool,
    /// In 2D, a center with more than two unmarked sibling bonds has no
    /// readable configuration.
    pub strict_stereo_atom_geometry: bool,
}

impl Default for PerceptionOptions {
    fn default() -> Self {
        Self {
            coord_mode: None,
            allow_coord_borrow: true,
            perceive_stereo_bonds: true,
            perceive_chiral_nodes: true,
            calc_parity: true,
            wedge_bond_prior: false,
            strict_stereo_atom_geometry: false,
        }
    }
}
