use crate::stereo::Parity;
use crate::traits::*;

/// Adds the two values perception writes, a canonical index and a parity, to
/// a payload that only describes structure.
#[derive(Debug, Clone, PartialEq)]
pub struct WithStereo<T> {
    pub inner: T,
    pub canonical_index: Option<usize>,
    pub parity: Parity,
}

impl<T> WithStereo<T> {
    pub fn new(inner: T) -> Self {
        Self {
            inner,
            canonical_index: None,
            parity: Parity::None,
        }
    }
}

/// Overrides (or supplies) the 2D coordinates of a payload.
#[derive(Debug, Clone, PartialEq)]
pub struct WithPosition2D<T> {
    pub inner: T,
    pub position_2d: Option<[f64; 2]>,
}

/// Overrides (or supplies) the 3D coordinates of a payload.
#[derive(Debug, Clone, PartialEq)]
pub struct WithPosition3D<T> {
    pub inner: T,
    pub position_3d: Option<[f64; 3]>,
}

impl<T> HasCanonicalIndex for WithStereo<T> {
    fn canonical_index(&self) -> Option<usize> {
        self.canonical_index
    }
    fn set_canonical_index(&mut self, index: Option<usize>) {
        self.canonical_index = index;
    }
}

impl<T> HasParity for WithStereo<T> {
    fn parity(&self) -> Parity {
        self.parity
    }
    fn set_parity(&mut self, parity: Parity) {
        self.parity = parity;
    }
}

impl<T> HasPosition2D for WithPosition2D<T> {
    fn position_2d(&self) -> Option<[f64; 2]> {
        self.position_2d
    }
    fn set_position_2d(&mut self, pos: Option<[f64; 2]>) {
        self.position_2d = pos;
    }
}

impl<T> HasPosition3D for WithPosition3D<T> {
    fn position_3d(&self) -> Option<[f64; 3]> {
        self.position_3d
    }
    fn set_position_3d(&mut self, pos: Option<[f64; 3]>) {
        self.position_3d = pos;
    }
}

macro_rules! delegate_trait {
    ($wrapper:ident, $trait:ident, $method:ident, $ret:ty) => {
        impl<T: $trait> $trait for $wrapper<T> {
            fn $method(&self) -> $ret {
                self.inner.$method()
            }
        }
    };
}

macro_rules! delegate_mut_trait {
    ($wrapper:ident, $trait:ident, $get:ident, $set:ident, $ty:ty) => {
        impl<T: $trait> $trait for $wrapper<T> {
            fn $get(&self) -> $ty {
                self.inner.$get()
            }
            fn $set(&mut self, value: $ty) {
                self.inner.$set(value);
            }
        }
    };
}

macro_rules! delegate_common {
    ($wrapper:ident) => {
        delegate_trait!($wrapper, HasAtomicNum, atomic_num, u8);
        delegate_trait!($wrapper, HasFormalCharge, formal_charge, i8);
        delegate_trait!($wrapper, HasIsotope, isotope, u16);
        delegate_trait!($wrapper, HasHydrogenCount, hydrogen_count, u8);
        delegate_trait!($wrapper, HasBondOrder, bond_order, crate::bond::BondOrder);
        delegate_trait!($wrapper, HasBondStereo, bond_stereo, crate::bond::BondStereo);
    };
}

delegate_common!(WithStereo);
delegate_mut_trait!(WithStereo, HasPosition2D, position_2d, set_position_2d, Option<[f64; 2]>);
delegate_mut_trait!(WithStereo, HasPosition3D, position_3d, set_position_3d, Option<[f64; 3]>);

delegate_common!(WithPosition2D);
delegate_mut_trait!(WithPosition2D, HasPosition3D, position_3d, set_position_3d, Option<[f64; 3]>);
delegate_mut_trait!(WithPosition2D, HasCanonicalIndex, canonical_index, set_canonical_index, Option<usize>);
delegate_mut_trait!(WithPosition2D, HasParity, parity, set_parity, Parity);

delegate_common!(WithPosition3D);
delegate_mut_trait!(WithPosition3D, HasPosition2D, position_2d, set_position_2d, Option<[f64; 2]>);
delegate_mut_trait!(WithPosition3D, HasCanonicalIndex, canonical_index, set_canonical_index, Option<usize>);
delegate_mut_trait!(WithPosition3D, HasParity, parity, set_parity, Parity);
