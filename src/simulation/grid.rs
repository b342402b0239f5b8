//! Grid topology
//!
//! Intersections sit on an N×N lattice; every pair of adjacent intersections
//! is joined by two one-way links. The links are kept in a petgraph directed
//! graph so they can be enumerated and looked up by endpoints.

use anyhow::{ensure, Result};
use petgraph::graph::{DiGraph, EdgeIndex, NodeIndex};
use petgraph::visit::EdgeRef;

use super::types::{Direction, GridPos, LinkId};

/// Directed link endpoints stored on each graph edge
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LinkEnds {
    pub from: GridPos,
    pub to: GridPos,
    /// Direction of travel along the link
    pub heading: Direction,
}

/// The intersection lattice and its directed links
#[derive(Debug, Clone)]
pub struct RoadGrid {
    size: usize,
    graph: DiGraph<GridPos, LinkEnds>,
    /// Row-major node indices
    nodes: Vec<NodeIndex>,
}

impl RoadGrid {
    /// Build an `size`×`size` grid with links between all adjacent intersections
    ///
    /// Links are added row-major by source intersection and, within one
    /// source, in North, East, South, West order. `LinkId`s follow that order.
    pub fn new(size: usize) -> Result<Self> {
        ensure!(size >= 1, "grid size must be at least 1");

        let mut graph = DiGraph::new();
        let mut nodes = Vec::with_capacity(size * size);
        for row in 0..size {
            for col in 0..size {
                nodes.push(graph.add_node(GridPos::new(row, col)));
            }
        }

        let mut grid = Self { size, graph, nodes };
        for from in grid.positions().collect::<Vec<_>>() {
            for (to, heading) in grid.outgoing(from) {
                let a = grid.node(from);
                let b = grid.node(to);
                grid.graph.add_edge(a, b, LinkEnds { from, to, heading });
            }
        }
        Ok(grid)
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn intersection_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn link_count(&self) -> usize {
        self.graph.edge_count()
    }

    fn node(&self, pos: GridPos) -> NodeIndex {
        self.nodes[pos.row * self.size + pos.col]
    }

    /// All intersections in row-major order
    pub fn positions(&self) -> impl Iterator<Item = GridPos> + '_ {
        self.nodes.iter().map(move |&n| self.graph[n])
    }

    /// All links in id order
    pub fn links(&self) -> impl Iterator<Item = (LinkId, LinkEnds)> + '_ {
        self.graph
            .edge_references()
            .map(|e| (LinkId(e.id().index()), *e.weight()))
    }

    pub fn link_ends(&self, id: LinkId) -> Option<LinkEnds> {
        self.graph.edge_weight(EdgeIndex::new(id.0)).copied()
    }

    /// The link carrying traffic from `from` to `to`, if the two are adjacent
    pub fn link_between(&self, from: GridPos, to: GridPos) -> Option<LinkId> {
        if !self.contains(from) || !self.contains(to) {
            return None;
        }
        self.graph
            .find_edge(self.node(from), self.node(to))
            .map(|e| LinkId(e.index()))
    }

    pub fn contains(&self, pos: GridPos) -> bool {
        pos.row < self.size && pos.col < self.size
    }

    /// Neighbours reachable from `node`, with the direction of departure
    pub fn outgoing(&self, node: GridPos) -> Vec<(GridPos, Direction)> {
        Direction::CLOCKWISE
            .iter()
            .filter_map(|&d| node.neighbor(d, self.size).map(|n| (n, d)))
            .collect()
    }

    /// Neighbours with a link into `node`, with the direction of travel into
    /// `node` (a car coming from the south neighbour approaches heading North)
    pub fn incoming(&self, node: GridPos) -> Vec<(GridPos, Direction)> {
        Direction::CLOCKWISE
            .iter()
            .filter_map(|&d| {
                // The upstream neighbour lies opposite to the heading
                let opposite = d.rotate_cw().rotate_cw();
                node.neighbor(opposite, self.size).map(|n| (n, d))
            })
            .collect()
    }

    /// Whether new cars may arrive on the link `from → to`
    ///
    /// True for links that leave a grid edge heading into the grid
    /// perpendicular to that edge: southbound from row 0, northbound from the
    /// last row, eastbound from column 0, westbound from the last column.
    pub fn is_boundary_incoming(&self, from: GridPos, to: GridPos) -> bool {
        let last = self.size - 1;
        (from.row == 0 && to.row == from.row + 1 && to.col == from.col)
            || (from.row == last && to.row + 1 == from.row && to.col == from.col)
            || (from.col == 0 && to.col == from.col + 1 && to.row == from.row)
            || (from.col == last && to.col + 1 == from.col && to.row == from.row)
    }

    /// Ids of every link that receives arrivals, in link order
    pub fn boundary_incoming_links(&self) -> Vec<LinkId> {
        self.links()
            .filter(|(_, ends)| self.is_boundary_incoming(ends.from, ends.to))
            .map(|(id, _)| id)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn link_count_matches_adjacency() {
        for n in 1..6 {
            let grid = RoadGrid::new(n).unwrap();
            assert_eq!(grid.intersection_count(), n * n);
            // 2 directions * 2 axes * n rows * (n - 1) gaps
            assert_eq!(grid.link_count(), 4 * n * (n - 1));
        }
    }

    #[test]
    fn rejects_empty_grid() {
        assert!(RoadGrid::new(0).is_err());
    }

    #[test]
    fn corner_outgoing_and_incoming() {
        let grid = RoadGrid::new(3).unwrap();
        let corner = GridPos::new(0, 0);
        assert_eq!(
            grid.outgoing(corner),
            vec![
                (GridPos::new(0, 1), Direction::East),
                (GridPos::new(1, 0), Direction::South),
            ]
        );
        assert_eq!(
            grid.incoming(corner),
            vec![
                (GridPos::new(1, 0), Direction::North),
                (GridPos::new(0, 1), Direction::West),
            ]
        );
    }

    #[test]
    fn incoming_order_is_south_west_north_east_neighbour() {
        let grid = RoadGrid::new(3).unwrap();
        let centre = GridPos::new(1, 1);
        assert_eq!(
            grid.incoming(centre),
            vec![
                (GridPos::new(2, 1), Direction::North),
                (GridPos::new(1, 0), Direction::East),
                (GridPos::new(0, 1), Direction::South),
                (GridPos::new(1, 2), Direction::West),
            ]
        );
    }

    #[test]
    fn outgoing_and_incoming_are_inverse() {
        let grid = RoadGrid::new(4).unwrap();
        for u in grid.positions() {
            for (v, d) in grid.outgoing(u) {
                assert!(grid.contains(v));
                assert!(grid.incoming(v).contains(&(u, d)));
            }
            for (v, d) in grid.incoming(u) {
                assert!(grid.contains(v));
                assert!(grid.outgoing(v).contains(&(u, d)));
            }
        }
    }

    #[test]
    fn every_link_joins_adjacent_intersections() {
        let grid = RoadGrid::new(4).unwrap();
        for (id, ends) in grid.links() {
            assert!(ends.from.is_adjacent(&ends.to));
            assert_eq!(ends.from.neighbor(ends.heading, 4), Some(ends.to));
            assert_eq!(grid.link_between(ends.from, ends.to), Some(id));
        }
        assert_eq!(
            grid.link_between(GridPos::new(0, 0), GridPos::new(1, 1)),
            None
        );
        assert_eq!(
            grid.link_between(GridPos::new(0, 0), GridPos::new(0, 4)),
            None
        );
    }

    #[test]
    fn links_are_ordered_by_source_then_clockwise() {
        let grid = RoadGrid::new(2).unwrap();
        let ends: Vec<(GridPos, GridPos)> = grid.links().map(|(_, e)| (e.from, e.to)).collect();
        assert_eq!(
            ends,
            vec![
                (GridPos::new(0, 0), GridPos::new(0, 1)),
                (GridPos::new(0, 0), GridPos::new(1, 0)),
                (GridPos::new(0, 1), GridPos::new(1, 1)),
                (GridPos::new(0, 1), GridPos::new(0, 0)),
                (GridPos::new(1, 0), GridPos::new(0, 0)),
                (GridPos::new(1, 0), GridPos::new(1, 1)),
                (GridPos::new(1, 1), GridPos::new(0, 1)),
                (GridPos::new(1, 1), GridPos::new(1, 0)),
            ]
        );
    }

    #[test]
    fn boundary_classification() {
        let grid = RoadGrid::new(4).unwrap();
        // Southbound from the north edge
        assert!(grid.is_boundary_incoming(GridPos::new(0, 2), GridPos::new(1, 2)));
        // Eastbound from the west edge
        assert!(grid.is_boundary_incoming(GridPos::new(2, 0), GridPos::new(2, 1)));
        // Along the north edge is not an arrival point
        assert!(!grid.is_boundary_incoming(GridPos::new(0, 1), GridPos::new(0, 2)));
        // Interior link
        assert!(!grid.is_boundary_incoming(GridPos::new(1, 1), GridPos::new(2, 1)));
        // Leaving the grid interior towards an edge
        assert!(!grid.is_boundary_incoming(GridPos::new(1, 2), GridPos::new(0, 2)));
        // One per intersection along each edge
        assert_eq!(grid.boundary_incoming_links().len(), 16);
    }

    #[test]
    fn single_intersection_has_no_links() {
        let grid = RoadGrid::new(1).unwrap();
        let only = GridPos::new(0, 0);
        assert!(grid.outgoing(only).is_empty());
        assert!(grid.incoming(only).is_empty());
        assert_eq!(grid.link_count(), 0);
        assert!(grid.boundary_incoming_links().is_empty());
    }
}
