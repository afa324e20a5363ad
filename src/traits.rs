use crate::bond::{BondOrder, BondStereo};
use crate::stereo::Parity;

pub trait HasAtomicNum {
    fn atomic_num(&self) -> u8;
}

pub trait HasFormalCharge {
    fn formal_charge(&self) -> i8;
}

pub trait HasIsotope {
    fn isotope(&self) -> u16;
}

/// Number of implicit (suppressed) hydrogens. Explicit hydrogen atoms are
/// graph nodes and are not included.
pub trait HasHydrogenCount {
    fn hydrogen_count(&self) -> u8;
}

pub trait HasPosition2D {
    fn position_2d(&self) -> Option<[f64; 2]>;
    fn set_position_2d(&mut self, pos: Option<[f64; 2]>);
}

pub trait HasPosition3D {
    fn position_3d(&self) -> Option<[f64; 3]>;
    fn set_position_3d(&mut self, pos: Option<[f64; 3]>);
}

pub trait HasCanonicalIndex {
    fn canonical_index(&self) -> Option<usize>;
    fn set_canonical_index(&mut self, index: Option<usize>);
}

pub trait HasParity {
    fn parity(&self) -> Parity;
    fn set_parity(&mut self, parity: Parity);
}

pub trait HasBondOrder {
    fn bond_order(&self) -> BondOrder;
}

pub trait HasBondStereo {
    fn bond_stereo(&self) -> BondStereo;
}

/// Everything stereo perception and canonical indexing read from or write to
/// an atom payload.
pub trait StereoAtom:
    HasAtomicNum
    + HasFormalCharge
    + HasIsotope
    + HasHydrogenCount
    + HasPosition2D
    + HasPosition3D
    + HasCanonicalIndex
    + HasParity
{
}

impl<T> StereoAtom for T where
    T: HasAtomicNum
        + HasFormalCharge
        + HasIsotope
        + HasHydrogenCount
        + HasPosition2D
        + HasPosition3D
        + HasCanonicalIndex
        + HasParity
{
}

/// Everything stereo perception reads from or writes to a bond payload.
pub trait StereoBond: HasBondOrder + HasBondStereo + HasParity {}

impl<T> StereoBond for T where T: HasBondOrder + HasBondStereo + HasParity {}
