use std::hash::{Hash, Hasher};

use petgraph::graph::NodeIndex;
use tracing::debug;

use super::{CanonicalizeError, Canonicalizer};
use crate::bond::BondOrder;
use crate::mol::Mol;
use crate::traits::{
    HasAtomicNum, HasBondOrder, HasCanonicalIndex, HasFormalCharge, HasHydrogenCount, HasIsotope,
};

struct Fnv1aHasher(u64);

impl Fnv1aHasher {
    fn new() -> Self {
        Self(0xcbf29ce484222325)
    }
}

impl Hasher for Fnv1aHasher {
    fn finish(&self) -> u64 {
        self.0
    }

    fn write(&mut self, bytes: &[u8]) {
        for &b in bytes {
            self.0 ^= b as u64;
            self.0 = self.0.wrapping_mul(0x100000001b3);
        }
    }
}

#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
struct AtomInvariant {
    atomic_num: u8,
    degree: usize,
    hydrogen_count: u8,
    formal_charge: i8,
    isotope: u16,
    singles: u8,
    doubles: u8,
    triples: u8,
    aromatic_bonds: u8,
}

fn atom_invariant<A, B>(mol: &Mol<A, B>, idx: NodeIndex) -> AtomInvariant
where
    A: HasAtomicNum + HasHydrogenCount + HasFormalCharge + HasIsotope,
    B: HasBondOrder,
{
    let atom = mol.atom(idx);
    let mut inv = AtomInvariant {
        atomic_num: atom.atomic_num(),
        degree: mol.neighbors(idx).count(),
        hydrogen_count: atom.hydrogen_count(),
        formal_charge: atom.formal_charge(),
        isotope: atom.isotope(),
        singles: 0,
        doubles: 0,
        triples: 0,
        aromatic_bonds: 0,
    };
    for edge in mol.bonds_of(idx) {
        let slot = match mol.bond(edge).bond_order() {
            BondOrder::Single => &mut inv.singles,
            BondOrder::Double => &mut inv.doubles,
            BondOrder::Triple => &mut inv.triples,
            BondOrder::Aromatic => &mut inv.aromatic_bonds,
        };
        *slot = slot.saturating_add(1);
    }
    inv
}

fn hash_invariant(inv: &AtomInvariant) -> u64 {
    let mut h = Fnv1aHasher::new();
    inv.hash(&mut h);
    h.finish()
}

fn ranks_from_values(values: &[u64]) -> Vec<usize> {
    let n = values.len();
    let mut indices: Vec<usize> = (0..n).collect();
    indices.sort_by_key(|&i| values[i]);
    let mut ranks = vec![0usize; n];
    for i in 1..n {
        ranks[indices[i]] = if values[indices[i]] == values[indices[i - 1]] {
            ranks[indices[i - 1]]
        } else {
            i
        };
    }
    ranks
}

fn count_distinct(ranks: &[usize]) -> usize {
    let mut sorted: Vec<usize> = ranks.to_vec();
    sorted.sort_unstable();
    sorted.dedup();
    sorted.len()
}

/// Renumbers ranks to `0..groups` keeping their order.
fn densify(ranks: &[usize]) -> Vec<usize> {
    let mut distinct: Vec<usize> = ranks.to_vec();
    distinct.sort_unstable();
    distinct.dedup();
    ranks
        .iter()
        .map(|r| distinct.partition_point(|d| d < r))
        .collect()
}

fn morgan_refine<A, B>(mol: &Mol<A, B>, ranks: &mut Vec<usize>) {
    let n = mol.atom_count();
    let mut prev_distinct = count_distinct(ranks);

    loop {
        let mut new_values = vec![0u64; n];
        for node in mol.atoms() {
            let i = node.index();
            let mut neighbor_ranks: Vec<usize> =
                mol.neighbors(node).map(|nb| ranks[nb.index()]).collect();
            neighbor_ranks.sort_unstable();

            let mut h = Fnv1aHasher::new();
            ranks[i].hash(&mut h);
            neighbor_ranks.hash(&mut h);
            new_values[i] = h.finish();
        }
        let new_ranks = ranks_from_values(&new_values);
        let distinct = count_distinct(&new_ranks);
        if distinct <= prev_distinct {
            return;
        }
        *ranks = new_ranks;
        prev_distinct = distinct;
    }
}

/// Topological canonical ranks, one per atom in graph order.
///
/// Ranks are dense (`0..groups`) and equal exactly for atoms the Morgan
/// refinement cannot tell apart. They do not depend on the order atoms were
/// added in.
pub fn morgan_ranks<A, B>(mol: &Mol<A, B>) -> Vec<usize>
where
    A: HasAtomicNum + HasHydrogenCount + HasFormalCharge + HasIsotope,
    B: HasBondOrder,
{
    let initial: Vec<u64> = mol
        .atoms()
        .map(|idx| hash_invariant(&atom_invariant(mol, idx)))
        .collect();
    let mut ranks = ranks_from_values(&initial);
    morgan_refine(mol, &mut ranks);
    densify(&ranks)
}

/// Writes [`morgan_ranks`] onto the atoms as canonical indices.
pub fn assign_morgan_indices<A, B>(mol: &mut Mol<A, B>)
where
    A: HasAtomicNum + HasHydrogenCount + HasFormalCharge + HasIsotope + HasCanonicalIndex,
    B: HasBondOrder,
{
    let ranks = morgan_ranks(mol);
    let groups = count_distinct(&ranks);
    let mut batch = mol.begin_update();
    for (i, rank) in ranks.into_iter().enumerate() {
        batch.set_canonical_index(NodeIndex::new(i), Some(rank));
    }
    debug!(atoms = batch.atom_count(), groups, "morgan indices assigned");
}

/// Plain topological numbering, blind to stereo.
#[derive(Debug, Clone, Copy, Default)]
pub struct MorganCanonicalizer;

impl MorganCanonicalizer {
    pub const NAME: &'static str = "morgan";
}

impl<A, B> Canonicalizer<A, B> for MorganCanonicalizer
where
    A: HasAtomicNum + HasHydrogenCount + HasFormalCharge + HasIsotope + HasCanonicalIndex,
    B: HasBondOrder,
{
    fn canonicalize(&self, mol: &mut Mol<A, B>) -> Result<(), CanonicalizeError> {
        assign_morgan_indices(mol);
        Ok(())
    }
}
