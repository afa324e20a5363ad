use crate::stereo::Parity;

/// Default atom type for a molecular graph node.
///
/// Besides the intrinsic properties read off a structural formula, `Atom`
/// carries the optional 2D/3D coordinates stereo perception works from and
/// the two mutable fields perception produces: the canonical index and the
/// parity.
///
/// # Examples
///
/// ```
/// use stereocrab::{Atom, Parity};
///
/// let carbon = Atom {
///     atomic_num: 6,
///     hydrogen_count: 1,
///     position_2d: Some([0.0, 0.0]),
///     ..Atom::default()
/// };
/// assert_eq!(carbon.parity, Parity::None);
/// assert_eq!(carbon.canonical_index, None);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Atom {
    /// Atomic number (1 = H, 6 = C, 7 = N, …). Identifies the element.
    pub atomic_num: u8,
    /// Formal charge in elementary charge units.
    pub formal_charge: i8,
    /// Mass number. `0` means natural isotopic abundance.
    pub isotope: u16,
    /// Number of implicit hydrogens on this atom.
    ///
    /// Hydrogens present as graph nodes are counted separately by
    /// [`Mol::total_hydrogen_count`](crate::Mol::total_hydrogen_count).
    pub hydrogen_count: u8,
    pub position_2d: Option<[f64; 2]>,
    pub position_3d: Option<[f64; 3]>,
    /// Topological rank assigned by a canonicalizer. Atoms sharing an index
    /// are indistinguishable to the indexer that produced it.
    pub canonical_index: Option<usize>,
    /// Tetrahedral parity. [`Parity::None`] until a perception pass marks
    /// this atom as a stereocenter.
    pub parity: Parity,
}

impl Atom {
    pub fn new(atomic_num: u8) -> Self {
        Self {
            atomic_num,
            ..Self::default()
        }
    }

    pub fn at_2d(atomic_num: u8, x: f64, y: f64) -> Self {
        Self {
            atomic_num,
            position_2d: Some([x, y]),
            ..Self::default()
        }
    }

    pub fn at_3d(atomic_num: u8, x: f64, y: f64, z: f64) -> Self {
        Self {
            atomic_num,
            position_3d: Some([x, y, z]),
            ..Self::default()
        }
    }

    pub fn with_hydrogens(mut self, count: u8) -> Self {
        self.hydrogen_count = count;
        self
    }

    pub fn with_charge(mut self, charge: i8) -> Self {
        self.formal_charge = charge;
        self
    }
}

impl crate::traits::HasAtomicNum for Atom {
    fn atomic_num(&self) -> u8 {
        self.atomic_num
    }
}

impl crate::traits::HasFormalCharge for Atom {
    fn formal_charge(&self) -> i8 {
        self.formal_charge
    }
}

impl crate::traits::HasIsotope for Atom {
    fn isotope(&self) -> u16 {
        self.isotope
    }
}

impl crate::traits::HasHydrogenCount for Atom {
    fn hydrogen_count(&self) -> u8 {
        self.hydrogen_count
    }
}

impl crate::traits::HasPosition2D for Atom {
    fn position_2d(&self) -> Option<[f64; 2]> {
        self.position_2d
    }
    fn set_position_2d(&mut self, pos: Option<[f64; 2]>) {
        self.position_2d = pos;
    }
}

impl crate::traits::HasPosition3D for Atom {
    fn position_3d(&self) -> Option<[f64; 3]> {
        self.position_3d
    }
    fn set_position_3d(&mut self, pos: Option<[f64; 3]>) {
        self.position_3d = pos;
    }
}

impl crate::traits::HasCanonicalIndex for Atom {
    fn canonical_index(&self) -> Option<usize> {
        self.canonical_index
    }
    fn set_canonical_index(&mut self, index: Option<usize>) {
        self.canonical_index = index;
    }
}

impl crate::traits::HasParity for Atom {
    fn parity(&self) -> Parity {
        self.parity
    }
    fn set_parity(&mut self, parity: Parity) {
        self.parity = parity;
    }
}
