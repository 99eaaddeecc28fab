// Dotlanth
// Copyright (C) 2025 Synerthink

// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU Affero General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.

// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU Affero General Public License for more details.

// You should have received a copy of the GNU Affero General Public License
// along with this program.  If not, see <http://www.gnu.org/licenses/>.

//! Graph export of the direct edges

use super::PartialOrderSet;
use petgraph::Directed;
use petgraph::dot::{Config, Dot};
use petgraph::graph::{Graph, NodeIndex};
use std::collections::HashMap;
use std::fmt::Display;
use std::hash::Hash;

/// Direct-edge view of a partial order
pub type OrderGraph<N> = Graph<N, (), Directed>;

impl<T: Copy + Eq + Hash + Display + Ord> PartialOrderSet<T> {
    /// Build a graph with one node per element and one edge per direct edge
    ///
    /// Nodes are added in registration order, edges from the greater node to
    /// the smaller one.
    pub fn to_graph(&self) -> OrderGraph<T> {
        self.build_graph(|x| *x, ())
    }

    /// Render the direct edges in DOT, labelling nodes with `label`
    pub fn to_dot(&self, label: impl Fn(&T) -> String) -> String {
        let graph: Graph<String, &str, Directed> = self.build_graph(label, "");
        format!("{}", Dot::with_config(&graph, &[Config::EdgeNoLabel]))
    }

    fn build_graph<N, E: Copy>(&self, weight: impl Fn(&T) -> N, edge: E) -> Graph<N, E, Directed> {
        let mut graph = Graph::new();
        let mut indices: HashMap<T, NodeIndex> = HashMap::new();

        for x in &self.order {
            indices.insert(*x, graph.add_node(weight(x)));
        }
        for x in &self.order {
            let Some(elem) = self.elements.get(x) else { continue };
            let mut targets: Vec<T> = elem.direct_greaters.iter().copied().collect();
            targets.sort();
            for y in targets {
                if let (Some(&u), Some(&v)) = (indices.get(x), indices.get(&y)) {
                    graph.add_edge(u, v, edge);
                }
            }
        }
        graph
    }
}
