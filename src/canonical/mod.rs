//! Canonical atom numbering: the topological Morgan pass, its stereo-aware
//! extension, and a registry to pick either by name.

mod error;
mod morgan;
mod registry;
mod stereo;

use serde::{Deserialize, Serialize};

use crate::mol::Mol;
use crate::stereo::PerceptionOptions;

pub use error::CanonicalizeError;
pub use morgan::{assign_morgan_indices, morgan_ranks, MorganCanonicalizer};
pub use registry::{CanonicalizerFactory, CanonicalizerRegistry};
pub use stereo::{atom_compare_key, bond_compare_key, AtomKey, BondKey, StereoCanonicalizer};

/// A strategy that writes canonical indices onto every atom of a structure.
pub trait Canonicalizer<A, B> {
    fn canonicalize(&self, mol: &mut Mol<A, B>) -> Result<(), CanonicalizeError>;
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CanonicalizationOptions {
    /// Upper bound on regroup/perceive rounds. `None` allows one round per
    /// atom and bond, plus one.
    pub max_iterations: Option<usize>,
    pub perception: PerceptionOptions,
}
