use petgraph::graph::NodeIndex;
use thiserror::Error;

use crate::mol::Mol;
use crate::traits::HasCanonicalIndex;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RenumberError {
    #[error("new_order length {got} != atom count {expected}")]
    LengthMismatch { expected: usize, got: usize },
    #[error("new_order is not a valid permutation")]
    InvalidPermutation,
}

fn validate_permutation(new_order: &[usize], n: usize) -> Result<(), RenumberError> {
    if new_order.len() != n {
        return Err(RenumberError::LengthMismatch {
            expected: n,
            got: new_order.len(),
        });
    }
    let mut seen = vec![false; n];
    for &idx in new_order {
        if idx >= n || seen[idx] {
            return Err(RenumberError::InvalidPermutation);
        }
        seen[idx] = true;
    }
    Ok(())
}

/// Copies `mol` with its atoms reordered so that new atom `i` is old atom
/// `new_order[i]`.
///
/// Bonds keep their endpoint order, so wedge annotations still point from
/// the same narrow-end atom. Observers are not carried over.
pub fn renumber_atoms<A: Clone, B: Clone>(
    mol: &Mol<A, B>,
    new_order: &[usize],
) -> Result<Mol<A, B>, RenumberError> {
    let n = mol.atom_count();
    validate_permutation(new_order, n)?;

    let mut new_mol = Mol::new();
    for &old_idx in new_order {
        new_mol.add_atom(mol.atom(NodeIndex::new(old_idx)).clone());
    }

    // old_to_new[old_idx] = new_idx
    let mut old_to_new = vec![0usize; n];
    for (new_idx, &old_idx) in new_order.iter().enumerate() {
        old_to_new[old_idx] = new_idx;
    }

    for edge in mol.bonds() {
        let Some((a, b)) = mol.bond_endpoints(edge) else {
            continue;
        };
        new_mol.add_bond(
            NodeIndex::new(old_to_new[a.index()]),
            NodeIndex::new(old_to_new[b.index()]),
            mol.bond(edge).clone(),
        );
    }
    Ok(new_mol)
}

/// Reorders atoms by their canonical index. Atoms sharing an index, or
/// without one, keep their relative order; unnumbered atoms go last.
pub fn renumber_by_canonical_index<A, B>(mol: &Mol<A, B>) -> Mol<A, B>
where
    A: HasCanonicalIndex + Clone,
    B: Clone,
{
    let mut new_order: Vec<usize> = (0..mol.atom_count()).collect();
    new_order.sort_by_key(|&i| {
        mol.canonical_index(NodeIndex::new(i))
            .map_or((1, 0), |index| (0, index))
    });
    match renumber_atoms(mol, &new_order) {
        Ok(renumbered) => renumbered,
        // a sorted 0..n is always a permutation of 0..n
        Err(_) => mol.clone(),
    }
}
