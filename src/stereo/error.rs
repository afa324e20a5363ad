use petgraph::graph::{EdgeIndex, NodeIndex};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StereoError {
    #[error("bond {bond:?} is not a double bond between two distinct atoms")]
    NotDoubleBond { bond: EdgeIndex },
    #[error("bond {bond:?} is not in the structure")]
    MissingBond { bond: EdgeIndex },
    #[error("atom {atom:?} is not in the structure")]
    MissingAtom { atom: NodeIndex },
}
