use std::collections::BTreeMap;

use petgraph::graph::NodeIndex;
use tracing::{debug, instrument, warn};

use super::{CanonicalizationOptions, CanonicalizeError, Canonicalizer, MorganCanonicalizer};
use crate::bond::BondOrder;
use crate::mol::Mol;
use crate::stereo::{perceive_stereos, Parity};
use crate::traits::{StereoAtom, StereoBond};

/// Structural comparison value of an atom. Parity takes part with `None`
/// and `Unknown` comparing equal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct AtomKey {
    pub atomic_num: u8,
    pub isotope: u16,
    pub formal_charge: i8,
    pub hydrogen_count: u8,
    pub parity: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct BondKey {
    pub order: BondOrder,
    pub parity: u8,
}

pub fn atom_compare_key<A: StereoAtom>(atom: &A) -> AtomKey {
    AtomKey {
        atomic_num: atom.atomic_num(),
        isotope: atom.isotope(),
        formal_charge: atom.formal_charge(),
        hydrogen_count: atom.hydrogen_count(),
        parity: atom.parity().compare_value(),
    }
}

pub fn bond_compare_key<B: StereoBond>(bond: &B) -> BondKey {
    BondKey {
        order: bond.bond_order(),
        parity: bond.parity().compare_value(),
    }
}

/// Atom key first, then the sorted keys of its bonds.
fn structure_key<A: StereoAtom, B: StereoBond>(
    mol: &Mol<A, B>,
    atom: NodeIndex,
) -> (AtomKey, Vec<BondKey>) {
    let mut bonds: Vec<BondKey> = mol
        .bonds_of(atom)
        .map(|e| bond_compare_key(mol.bond(e)))
        .collect();
    bonds.sort_unstable();
    (atom_compare_key(mol.atom(atom)), bonds)
}

/// Splits every tie bucket by structural key and renumbers the buckets
/// densely in their existing order. Returns the number of buckets.
///
/// Hydrogens are never split: those sharing a bucket keep one index, ahead
/// of the heavy atoms in it.
fn regroup<A: StereoAtom, B: StereoBond>(mol: &mut Mol<A, B>) -> usize {
    let mut buckets: BTreeMap<Option<usize>, Vec<NodeIndex>> = BTreeMap::new();
    for atom in mol.atoms() {
        buckets
            .entry(mol.canonical_index(atom))
            .or_default()
            .push(atom);
    }

    let mut assignments = Vec::with_capacity(mol.atom_count());
    let mut next = 0;
    for members in buckets.into_values() {
        let mut keyed: Vec<_> = members
            .into_iter()
            .map(|atom| {
                let key = (mol.atom(atom).atomic_num() != 1).then(|| structure_key(mol, atom));
                (key, atom)
            })
            .collect();
        keyed.sort_by(|x, y| x.0.cmp(&y.0));
        for (i, (_, atom)) in keyed.iter().enumerate() {
            if i > 0 && keyed[i - 1].0 != keyed[i].0 {
                next += 1;
            }
            assignments.push((*atom, next));
        }
        next += 1;
    }

    for (atom, index) in assignments {
        mol.set_canonical_index(atom, Some(index));
    }
    next
}

/// Canonical numbering that also respects perceived stereochemistry.
///
/// Runs the wrapped topological canonicalizer once, then alternates stereo
/// perception with splitting of tied index buckets until the number of
/// stereogenic objects stops changing. The whole run is one update batch.
#[derive(Debug, Clone, Default)]
pub struct StereoCanonicalizer<C> {
    base: C,
    options: CanonicalizationOptions,
}

impl<C> StereoCanonicalizer<C> {
    pub const NAME: &'static str = "morgan-stereo";

    pub fn new(base: C) -> Self {
        Self::with_options(base, CanonicalizationOptions::default())
    }

    pub fn with_options(base: C, options: CanonicalizationOptions) -> Self {
        Self { base, options }
    }

    pub fn options(&self) -> &CanonicalizationOptions {
        &self.options
    }
}

impl StereoCanonicalizer<MorganCanonicalizer> {
    pub fn morgan() -> Self {
        Self::new(MorganCanonicalizer)
    }
}

impl<A, B, C> Canonicalizer<A, B> for StereoCanonicalizer<C>
where
    A: StereoAtom,
    B: StereoBond,
    C: Canonicalizer<A, B>,
{
    #[instrument(skip_all, fields(atoms = mol.atom_count(), bonds = mol.bond_count()))]
    fn canonicalize(&self, mol: &mut Mol<A, B>) -> Result<(), CanonicalizeError> {
        let perception = &self.options.perception;
        let cap = self
            .options
            .max_iterations
            .unwrap_or(mol.atom_count() + mol.bond_count() + 1);

        let mut batch = mol.begin_update();
        for atom in batch.atoms().collect::<Vec<_>>() {
            batch.set_atom_parity(atom, Parity::None);
        }
        for bond in batch.bonds().collect::<Vec<_>>() {
            batch.set_bond_parity(bond, Parity::None);
        }

        self.base.canonicalize(&mut batch)?;
        let mut count = perceive_stereos(&mut batch, perception, true)?.len();
        debug!(stereo_objects = count, "base numbering perceived");

        for iteration in 1..=cap {
            let groups = regroup(&mut batch);
            let next = perceive_stereos(&mut batch, perception, true)?.len();
            debug!(iteration, groups, stereo_objects = next, "regrouped");
            if next == count {
                return Ok(());
            }
            count = next;
        }
        warn!(iterations = cap, "stereo numbering did not reach a fixed point");
        Err(CanonicalizeError::NotConverged { iterations: cap })
    }
}
