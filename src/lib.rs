pub mod atom;
pub mod bond;
pub mod canonical;
pub mod geometry;
pub mod graph_ops;
pub mod mol;
pub mod rings;
pub mod stereo;
pub mod traits;
pub mod wrappers;

pub use atom::Atom;
pub use bond::{Bond, BondOrder, BondStereo};
pub use canonical::{
    CanonicalizationOptions, CanonicalizeError, Canonicalizer, CanonicalizerRegistry,
    MorganCanonicalizer, StereoCanonicalizer,
};
pub use graph_ops::{renumber_atoms, renumber_by_canonical_index, RenumberError};
pub use mol::{ChangeSet, Mol, StructureObserver, UpdateBatch};
pub use stereo::{
    calc_chiral_node_parity, calc_stereo_bond_parity, is_chiral_node, is_stereo_bond,
    perceive_stereos, CoordMode, Parity, PerceptionOptions, RotationDirection, StereoError,
    StereoObject,
};
pub use traits::{
    HasAtomicNum, HasBondOrder, HasBondStereo, HasCanonicalIndex, HasFormalCharge,
    HasHydrogenCount, HasIsotope, HasParity, HasPosition2D, HasPosition3D, StereoAtom, StereoBond,
};
pub use wrappers::{WithPosition2D, WithPosition3D, WithStereo};
