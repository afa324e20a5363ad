use petgraph::graph::{EdgeIndex, NodeIndex};
use tracing::{debug, instrument, trace};

use super::bond::{calc_stereo_bond_parity, is_stereo_bond};
use super::center::{calc_chiral_node_parity, is_chiral_node};
use super::{Parity, PerceptionOptions, StereoError, StereoObject};
use crate::canonical::assign_morgan_indices;
use crate::mol::Mol;
use crate::traits::{StereoAtom, StereoBond};

/// Finds stereogenic bonds and centers and, unless
/// `options.calc_parity` is off, writes their parities.
///
/// Without `skip_canonicalization` the structure is first given topological
/// canonical indices, which the distinctness checks depend on. Scanned
/// objects that turn out not to be stereogenic have their parity reset to
/// [`Parity::None`]. All writes happen in one update batch, so observers
/// are notified at most once.
///
/// Returns the stereogenic bonds followed by the stereogenic atoms, in
/// graph order.
#[instrument(skip_all, fields(atoms = mol.atom_count(), bonds = mol.bond_count()))]
pub fn perceive_stereos<A, B>(
    mol: &mut Mol<A, B>,
    options: &PerceptionOptions,
    skip_canonicalization: bool,
) -> Result<Vec<StereoObject>, StereoError>
where
    A: StereoAtom,
    B: StereoBond,
{
    let mut batch = mol.begin_update();
    if !skip_canonicalization {
        assign_morgan_indices(&mut batch);
    }

    let mut found = Vec::new();
    if options.perceive_stereo_bonds {
        let bonds: Vec<EdgeIndex> = batch.bonds().collect();
        for bond in bonds {
            if is_stereo_bond(&batch, bond) {
                if options.calc_parity {
                    let parity = calc_stereo_bond_parity(
                        &batch,
                        bond,
                        options.coord_mode,
                        options.allow_coord_borrow,
                        true,
                    )?;
                    trace!(bond = bond.index(), ?parity, "stereo bond");
                    batch.set_bond_parity(bond, parity);
                }
                found.push(StereoObject::Bond(bond));
            } else if options.calc_parity {
                batch.set_bond_parity(bond, Parity::None);
            }
        }
    }
    let stereo_bonds = found.len();

    if options.perceive_chiral_nodes {
        let atoms: Vec<NodeIndex> = batch.atoms().collect();
        for atom in atoms {
            if is_chiral_node(&batch, atom) {
                if options.calc_parity {
                    let parity = calc_chiral_node_parity(&batch, atom, options, true)?;
                    trace!(atom = atom.index(), ?parity, "chiral center");
                    batch.set_atom_parity(atom, parity);
                }
                found.push(StereoObject::Atom(atom));
            } else if options.calc_parity {
                batch.set_atom_parity(atom, Parity::None);
            }
        }
    }

    debug!(
        stereo_bonds,
        chiral_nodes = found.len() - stereo_bonds,
        "stereo perception finished"
    );
    Ok(found)
}

/// Stereo perception restricted to double bonds.
pub fn perceive_stereo_connectors<A, B>(
    mol: &mut Mol<A, B>,
    options: &PerceptionOptions,
    skip_canonicalization: bool,
) -> Result<Vec<EdgeIndex>, StereoError>
where
    A: StereoAtom,
    B: StereoBond,
{
    let options = PerceptionOptions {
        perceive_stereo_bonds: true,
        perceive_chiral_nodes: false,
        ..options.clone()
    };
    let found = perceive_stereos(mol, &options, skip_canonicalization)?;
    Ok(found
        .into_iter()
        .filter_map(|obj| match obj {
            StereoObject::Bond(bond) => Some(bond),
            StereoObject::Atom(_) => None,
        })
        .collect())
}

/// Stereo perception restricted to tetrahedral centers.
pub fn perceive_chiral_nodes<A, B>(
    mol: &mut Mol<A, B>,
    options: &PerceptionOptions,
    skip_canonicalization: bool,
) -> Result<Vec<NodeIndex>, StereoError>
where
    A: StereoAtom,
    B: StereoBond,
{
    let options = PerceptionOptions {
        perceive_stereo_bonds: false,
        perceive_chiral_nodes: true,
        ..options.clone()
    };
    let found = perceive_stereos(mol, &options, skip_canonicalization)?;
    Ok(found
        .into_iter()
        .filter_map(|obj| match obj {
            StereoObject::Atom(atom) => Some(atom),
            StereoObject::Bond(_) => None,
        })
        .collect())
}

/// Stereogenic double bonds, without computing parities.
pub fn find_stereo_bonds<A, B>(mol: &mut Mol<A, B>, skip_canonicalization: bool) -> Vec<EdgeIndex>
where
    A: StereoAtom,
    B: StereoBond,
{
    if !skip_canonicalization {
        assign_morgan_indices(mol);
    }
    let mol = &*mol;
    mol.bonds()
        .filter(|&bond| is_stereo_bond(mol, bond))
        .collect()
}

/// Potential tetrahedral stereocenters, without computing parities.
pub fn find_chiral_nodes<A, B>(mol: &mut Mol<A, B>, skip_canonicalization: bool) -> Vec<NodeIndex>
where
    A: StereoAtom,
    B: StereoBond,
{
    if !skip_canonicalization {
        assign_morgan_indices(mol);
    }
    let mol = &*mol;
    mol.atoms()
        .filter(|&atom| is_chiral_node(mol, atom))
        .collect()
}
