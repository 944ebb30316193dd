#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! A* route search over the world's grid graph.
//!
//! The search consults the live actor registry on every call: cells whose
//! occupants are neither enemies nor goals count as obstacles, so the
//! result can change from tick to tick as actors move, defenders appear,
//! or prior enemies vacate cells. The g-cost counts edge hops rather than
//! summed edge weights; on this all-ones grid the two are identical, so
//! this is not a general weighted shortest-path solver.

use grid_siege_core::Position;
use grid_siege_world::graph::Graph;
use grid_siege_world::{query, ActorRegistry};

/// Node of the search tree, stored in a call-local arena.
///
/// Parents are arena indices, so path reconstruction is a plain index
/// walk and the tree needs no shared ownership.
#[derive(Clone, Copy, Debug)]
struct SearchNode {
    vertex: usize,
    parent: Option<usize>,
    g: u32,
    f: f64,
}

/// Finds a route from `src` to `dst` across the grid graph.
///
/// Returns the vertex positions from `src` to `dst` inclusive, or an
/// empty vector when the destination is unreachable. Open-set ties on the
/// f-score resolve to the earliest-encountered node; blocked cells are
/// closed without ever being queued; queued candidates relax only on a
/// strictly lower g-cost.
///
/// # Panics
///
/// Panics when `src` or `dst` lies outside the graph; callers pass actor
/// positions that the world guarantees, so an out-of-graph endpoint is a
/// programming defect.
#[must_use]
pub fn find_path(
    src: Position,
    dst: Position,
    graph: &Graph,
    actors: &ActorRegistry,
) -> Vec<Position> {
    let src_index = graph
        .index_of(src)
        .unwrap_or_else(|| panic!("path source ({}, {}) has no vertex", src.x(), src.y()));
    assert!(
        graph.index_of(dst).is_some(),
        "path destination ({}, {}) has no vertex",
        dst.x(),
        dst.y()
    );

    let mut arena: Vec<SearchNode> = Vec::new();
    let mut open: Vec<usize> = Vec::new();
    let mut open_by_vertex: Vec<Option<usize>> = vec![None; graph.vertex_count()];
    let mut closed: Vec<bool> = vec![false; graph.vertex_count()];

    arena.push(SearchNode {
        vertex: src_index,
        parent: None,
        g: 0,
        f: src.distance(dst),
    });
    open.push(0);
    open_by_vertex[src_index] = Some(0);

    while !open.is_empty() {
        let best_slot = minimum_f_slot(&arena, &open);
        let node_index = open.remove(best_slot);
        let node_vertex = arena[node_index].vertex;
        open_by_vertex[node_vertex] = None;

        if graph.vertex(node_vertex).position() == dst {
            return reconstruct(&arena, node_index, graph);
        }

        closed[node_vertex] = true;
        let g = arena[node_index].g + 1;

        for edge in graph.vertex(node_vertex).edges() {
            let target = edge.target();
            if closed[target] {
                continue;
            }

            let position = graph.vertex(target).position();
            if !query::is_walkable(actors, position) {
                // An obstacle counts as visited so it is never retried,
                // but it is never queued for expansion.
                closed[target] = true;
                continue;
            }

            let candidate = SearchNode {
                vertex: target,
                parent: Some(node_index),
                g,
                f: f64::from(g) + position.distance(dst),
            };

            match open_by_vertex[target] {
                Some(existing) => {
                    if candidate.g < arena[existing].g {
                        arena[existing] = candidate;
                    }
                }
                None => {
                    arena.push(candidate);
                    let slot = arena.len() - 1;
                    open.push(slot);
                    open_by_vertex[target] = Some(slot);
                }
            }
        }
    }

    Vec::new()
}

/// Index into `open` of the node with the minimal f-score; ties keep the
/// earliest-encountered entry.
fn minimum_f_slot(arena: &[SearchNode], open: &[usize]) -> usize {
    let mut best_slot = 0;
    for slot in 1..open.len() {
        if arena[open[slot]].f < arena[open[best_slot]].f {
            best_slot = slot;
        }
    }
    best_slot
}

fn reconstruct(arena: &[SearchNode], tail: usize, graph: &Graph) -> Vec<Position> {
    let mut path = Vec::new();
    let mut cursor = Some(tail);
    while let Some(index) = cursor {
        let node = &arena[index];
        path.push(graph.vertex(node.vertex).position());
        cursor = node.parent;
    }
    path.reverse();
    path
}
