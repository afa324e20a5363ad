use thiserror::Error;

use crate::stereo::StereoError;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CanonicalizeError {
    #[error("no canonicalizer registered under {name:?}")]
    UnknownStrategy { name: String },
    #[error("no default canonicalizer registered")]
    NoDefaultStrategy,
    #[error("stereo refinement did not settle after {iterations} rounds")]
    NotConverged { iterations: usize },
    #[error(transparent)]
    Stereo(#[from] StereoError),
}
