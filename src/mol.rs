use std::collections::BTreeSet;
use std::ops::{Deref, DerefMut};
use std::rc::Rc;

use petgraph::graph::{EdgeIndex, NodeIndex, UnGraph};
use petgraph::visit::EdgeRef;

use crate::stereo::Parity;
use crate::traits::{HasAtomicNum, HasCanonicalIndex, HasHydrogenCount, HasParity};

/// Atoms and bonds whose parity or canonical index changed since the last
/// notification.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChangeSet {
    pub atoms: BTreeSet<NodeIndex>,
    pub bonds: BTreeSet<EdgeIndex>,
}

impl ChangeSet {
    pub fn is_empty(&self) -> bool {
        self.atoms.is_empty() && self.bonds.is_empty()
    }
}

/// Receives change notifications from a [`Mol`].
///
/// Writes made inside an [`UpdateBatch`] are coalesced: the observer hears
/// about them once, when the outermost batch closes.
pub trait StructureObserver {
    fn structure_changed(&self, changes: &ChangeSet);
}

pub struct Mol<A, B> {
    graph: UnGraph<A, B>,
    observers: Vec<Rc<dyn StructureObserver>>,
    update_depth: usize,
    pending: ChangeSet,
}

impl<A, B> Mol<A, B> {
    pub fn new() -> Self {
        Self {
            graph: UnGraph::default(),
            observers: Vec::new(),
            update_depth: 0,
            pending: ChangeSet::default(),
        }
    }

    pub fn graph(&self) -> &UnGraph<A, B> {
        &self.graph
    }

    pub fn atom(&self, idx: NodeIndex) -> &A {
        &self.graph[idx]
    }

    /// Raw mutable access. Writes made through this reference are not
    /// reported to observers.
    pub fn atom_mut(&mut self, idx: NodeIndex) -> &mut A {
        &mut self.graph[idx]
    }

    pub fn bond(&self, idx: EdgeIndex) -> &B {
        &self.graph[idx]
    }

    /// Raw mutable access. Writes made through this reference are not
    /// reported to observers.
    pub fn bond_mut(&mut self, idx: EdgeIndex) -> &mut B {
        &mut self.graph[idx]
    }

    pub fn try_atom(&self, idx: NodeIndex) -> Option<&A> {
        self.graph.node_weight(idx)
    }

    pub fn try_bond(&self, idx: EdgeIndex) -> Option<&B> {
        self.graph.edge_weight(idx)
    }

    pub fn add_atom(&mut self, atom: A) -> NodeIndex {
        self.graph.add_node(atom)
    }

    /// Adds a bond from `a` to `b`. Endpoint order is kept: `a` is the
    /// first endpoint that directional wedge markers refer to.
    pub fn add_bond(&mut self, a: NodeIndex, b: NodeIndex, bond: B) -> EdgeIndex {
        self.graph.add_edge(a, b, bond)
    }

    pub fn atom_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn bond_count(&self) -> usize {
        self.graph.edge_count()
    }

    pub fn neighbors(&self, idx: NodeIndex) -> impl Iterator<Item = NodeIndex> + '_ {
        self.graph.neighbors(idx)
    }

    pub fn bonds_of(&self, idx: NodeIndex) -> impl Iterator<Item = EdgeIndex> + '_ {
        self.graph.edges(idx).map(|e| e.id())
    }

    pub fn atoms(&self) -> impl Iterator<Item = NodeIndex> + '_ {
        self.graph.node_indices()
    }

    pub fn bonds(&self) -> impl Iterator<Item = EdgeIndex> + '_ {
        self.graph.edge_indices()
    }

    pub fn bond_between(&self, a: NodeIndex, b: NodeIndex) -> Option<EdgeIndex> {
        self.graph.find_edge(a, b)
    }

    pub fn bond_endpoints(&self, idx: EdgeIndex) -> Option<(NodeIndex, NodeIndex)> {
        self.graph.edge_endpoints(idx)
    }

    pub fn add_observer(&mut self, observer: Rc<dyn StructureObserver>) {
        self.observers.push(observer);
    }

    /// Opens a mutation batch. Notifications are held back until the
    /// returned guard (and every enclosing guard) is dropped, including when
    /// the drop happens during unwinding.
    pub fn begin_update(&mut self) -> UpdateBatch<'_, A, B> {
        self.update_depth += 1;
        UpdateBatch { mol: self }
    }

    pub fn is_updating(&self) -> bool {
        self.update_depth > 0
    }

    fn end_update(&mut self) {
        self.update_depth = self.update_depth.saturating_sub(1);
        if self.update_depth == 0 {
            self.flush_changes();
        }
    }

    fn record_atom_change(&mut self, idx: NodeIndex) {
        self.pending.atoms.insert(idx);
        if self.update_depth == 0 {
            self.flush_changes();
        }
    }

    fn record_bond_change(&mut self, idx: EdgeIndex) {
        self.pending.bonds.insert(idx);
        if self.update_depth == 0 {
            self.flush_changes();
        }
    }

    fn flush_changes(&mut self) {
        if self.pending.is_empty() {
            return;
        }
        let changes = std::mem::take(&mut self.pending);
        for observer in &self.observers {
            observer.structure_changed(&changes);
        }
    }
}

impl<A: HasParity, B> Mol<A, B> {
    pub fn set_atom_parity(&mut self, idx: NodeIndex, parity: Parity) {
        if self.graph[idx].parity() != parity {
            self.graph[idx].set_parity(parity);
            self.record_atom_change(idx);
        }
    }
}

impl<A, B: HasParity> Mol<A, B> {
    pub fn set_bond_parity(&mut self, idx: EdgeIndex, parity: Parity) {
        if self.graph[idx].parity() != parity {
            self.graph[idx].set_parity(parity);
            self.record_bond_change(idx);
        }
    }
}

impl<A: HasCanonicalIndex, B> Mol<A, B> {
    pub fn set_canonical_index(&mut self, idx: NodeIndex, index: Option<usize>) {
        if self.graph[idx].canonical_index() != index {
            self.graph[idx].set_canonical_index(index);
            self.record_atom_change(idx);
        }
    }

    pub fn canonical_index(&self, idx: NodeIndex) -> Option<usize> {
        self.graph[idx].canonical_index()
    }
}

impl<A: HasAtomicNum + HasHydrogenCount, B> Mol<A, B> {
    /// Implicit hydrogens plus hydrogen atoms bonded as graph nodes.
    pub fn total_hydrogen_count(&self, idx: NodeIndex) -> usize {
        let explicit = self
            .neighbors(idx)
            .filter(|&nb| self.atom(nb).atomic_num() == 1)
            .count();
        self.atom(idx).hydrogen_count() as usize + explicit
    }
}

/// Scoped mutation batch returned by [`Mol::begin_update`].
///
/// Dereferences to the molecule, so all edits made during the batch go
/// through the guard.
pub struct UpdateBatch<'a, A, B> {
    mol: &'a mut Mol<A, B>,
}

impl<A, B> Deref for UpdateBatch<'_, A, B> {
    type Target = Mol<A, B>;

    fn deref(&self) -> &Mol<A, B> {
        &*self.mol
    }
}

impl<A, B> DerefMut for UpdateBatch<'_, A, B> {
    fn deref_mut(&mut self) -> &mut Mol<A, B> {
        &mut *self.mol
    }
}

impl<A, B> Drop for UpdateBatch<'_, A, B> {
    fn drop(&mut self) {
        self.mol.end_update();
    }
}

/// Observers are not carried over to the clone.
impl<A: Clone, B: Clone> Clone for Mol<A, B> {
    fn clone(&self) -> Self {
        Self {
            graph: self.graph.clone(),
            observers: Vec::new(),
            update_depth: 0,
            pending: ChangeSet::default(),
        }
    }
}

impl<A, B> Default for Mol<A, B> {
    fn default() -> Self {
        Self::new()
    }
}

impl<A: std::fmt::Debug, B: std::fmt::Debug> std::fmt::Debug for Mol<A, B> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Mol")
            .field("atom_count", &self.atom_count())
            .field("bond_count", &self.bond_count())
            .field("observers", &self.observers.len())
            .field("update_depth", &self.update_depth)
            .finish()
    }
}
