use std::collections::VecDeque;

use petgraph::graph::{EdgeIndex, NodeIndex};
use petgraph::visit::EdgeRef;

use crate::mol::Mol;

/// Size of the smallest ring containing `bond`, or `None` for a chain bond.
///
/// The ring is the shortest path between the two endpoints that avoids the
/// bond itself, closed by the bond.
pub fn smallest_bond_ring_size<A, B>(mol: &Mol<A, B>, bond: EdgeIndex) -> Option<usize> {
    let (a, b) = mol.bond_endpoints(bond)?;
    if a == b {
        return None;
    }
    shortest_path_len_avoiding(mol, a, b, bond).map(|len| len + 1)
}

/// Number of bonds on the shortest `from` → `to` path not using `skip`.
fn shortest_path_len_avoiding<A, B>(
    mol: &Mol<A, B>,
    from: NodeIndex,
    to: NodeIndex,
    skip: EdgeIndex,
) -> Option<usize> {
    let n = mol.atom_count();
    let mut dist = vec![usize::MAX; n];
    dist[from.index()] = 0;
    let mut queue = VecDeque::new();
    queue.push_back(from);
    while let Some(current) = queue.pop_front() {
        let d = dist[current.index()];
        for edge in mol.graph().edges(current) {
            if edge.id() == skip {
                continue;
            }
            let next = if edge.source() == current {
                edge.target()
            } else {
                edge.source()
            };
            if dist[next.index()] != usize::MAX {
                continue;
            }
            dist[next.index()] = d + 1;
            if next == to {
                return Some(d + 1);
            }
            queue.push_back(next);
        }
    }
    None
}
