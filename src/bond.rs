use serde::{Deserialize, Serialize};

use crate::stereo::Parity;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, PartialOrd, Ord, Serialize, Deserialize)]
pub enum BondOrder {
    #[default]
    Single,
    Double,
    Triple,
    Aromatic,
}

impl BondOrder {
    pub fn is_multiple(self) -> bool {
        !matches!(self, BondOrder::Single)
    }
}

/// Stereo marker drawn on a bond.
///
/// Wedge markers are directional: they describe the bond as seen from its
/// first endpoint (the narrow end of the wedge). The `*Inverted` variants
/// put the narrow end on the second endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum BondStereo {
    #[default]
    None,
    /// Solid wedge, second endpoint toward the viewer.
    Up,
    UpInverted,
    /// Hashed wedge, second endpoint away from the viewer.
    Down,
    DownInverted,
    /// Wavy bond: configuration deliberately unspecified.
    UpOrDown,
    UpOrDownInverted,
    /// Crossed double bond: configuration deliberately unspecified.
    CisOrTrans,
    EOrZ,
    /// Configuration is whatever the coordinates say.
    EZByCoordinates,
}

impl BondStereo {
    /// Same marker seen from the other endpoint.
    pub fn inverted(self) -> Self {
        match self {
            BondStereo::Up => BondStereo::UpInverted,
            BondStereo::UpInverted => BondStereo::Up,
            BondStereo::Down => BondStereo::DownInverted,
            BondStereo::DownInverted => BondStereo::Down,
            BondStereo::UpOrDown => BondStereo::UpOrDownInverted,
            BondStereo::UpOrDownInverted => BondStereo::UpOrDown,
            other => other,
        }
    }

    pub fn is_wedge(self) -> bool {
        matches!(
            self,
            BondStereo::Up | BondStereo::UpInverted | BondStereo::Down | BondStereo::DownInverted
        )
    }

    pub fn is_up_or_down(self) -> bool {
        matches!(self, BondStereo::UpOrDown | BondStereo::UpOrDownInverted)
    }

    pub fn is_cis_or_trans(self) -> bool {
        matches!(self, BondStereo::CisOrTrans | BondStereo::EOrZ)
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Bond {
    pub order: BondOrder,
    pub stereo: BondStereo,
    /// Double-bond parity. [`Parity::None`] unless perception marked the
    /// bond as stereogenic.
    pub parity: Parity,
}

impl Bond {
    pub fn single() -> Self {
        Self::default()
    }

    pub fn double() -> Self {
        Self {
            order: BondOrder::Double,
            ..Self::default()
        }
    }

    pub fn wedge(stereo: BondStereo) -> Self {
        Self {
            stereo,
            ..Self::default()
        }
    }
}

impl crate::traits::HasBondOrder for Bond {
    fn bond_order(&self) -> BondOrder {
        self.order
    }
}

impl crate::traits::HasBondStereo for Bond {
    fn bond_stereo(&self) -> BondStereo {
        self.stereo
    }
}

impl crate::traits::HasParity for Bond {
    fn parity(&self) -> Parity {
        self.parity
    }
    fn set_parity(&mut self, parity: Parity) {
        self.parity = parity;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn inversion_is_an_involution() {
        for stereo in [
            BondStereo::None,
            BondStereo::Up,
            BondStereo::Down,
            BondStereo::UpOrDown,
            BondStereo::CisOrTrans,
        ] {
            assert_eq!(stereo.inverted().inverted(), stereo);
        }
        assert_eq!(BondStereo::Up.inverted(), BondStereo::UpInverted);
        assert_eq!(BondStereo::DownInverted.inverted(), BondStereo::Down);
    }

    #[test]
    fn marker_classes() {
        assert!(BondStereo::DownInverted.is_wedge());
        assert!(!BondStereo::UpOrDown.is_wedge());
        assert!(BondStereo::UpOrDownInverted.is_up_or_down());
        assert!(BondStereo::EOrZ.is_cis_or_trans());
        assert!(!BondStereo::EZByCoordinates.is_cis_or_trans());
    }

    #[test]
    fn aromatic_counts_as_multiple() {
        assert!(!BondOrder::Single.is_multiple());
        assert!(BondOrder::Double.is_multiple());
        assert!(BondOrder::Aromatic.is_multiple());
    }
}
