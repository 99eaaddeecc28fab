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

//! Property tests for closure consistency and visibility ordering

use proptest::prelude::*;
use semmodel_core::{ModelRegistry, PartialOrderSet, SourceLocation, Visibility};
use std::collections::HashSet;

/// Edges `(i, j)` with `i < j`, so every generated graph is acyclic
fn dag_edges(max_nodes: u32) -> impl Strategy<Value = (u32, Vec<(u32, u32)>)> {
    (2..max_nodes).prop_flat_map(|n| {
        let edge = (0..n - 1).prop_flat_map(move |a| (Just(a), (a + 1)..n));
        (Just(n), prop::collection::vec(edge, 0..(n as usize * 2)))
    })
}

/// Reference closure computed from scratch by depth-first search
fn reachable(from: u32, edges: &[(u32, u32)]) -> HashSet<u32> {
    let mut seen = HashSet::new();
    let mut stack = vec![from];
    while let Some(node) = stack.pop() {
        for &(a, b) in edges {
            if a == node && seen.insert(b) {
                stack.push(b);
            }
        }
    }
    seen
}

fn visibility() -> impl Strategy<Value = Visibility> {
    prop_oneof![Just(Visibility::None), Just(Visibility::Private), Just(Visibility::Public), Just(Visibility::Intrude)]
}

proptest! {
    #[test]
    fn incremental_closure_matches_recomputation((n, edges) in dag_edges(12)) {
        let mut poset = PartialOrderSet::new("prop");
        for node in 0..n {
            poset.add_node(node);
        }
        for &(a, b) in &edges {
            poset.add_edge(a, b).unwrap();
        }

        for node in 0..n {
            let expected = reachable(node, &edges);
            prop_assert_eq!(poset.greaters(node).unwrap(), &expected);
            prop_assert!(!poset.greaters(node).unwrap().contains(&node));
            for &other in &expected {
                prop_assert!(poset.smallers(other).unwrap().contains(&node));
                prop_assert!(poset.gt(node, other));
            }
        }
    }

    #[test]
    fn direct_edges_are_recorded((n, edges) in dag_edges(10)) {
        let mut poset = PartialOrderSet::new("prop");
        for node in 0..n {
            poset.add_node(node);
        }
        for &(a, b) in &edges {
            poset.add_edge(a, b).unwrap();
            prop_assert!(poset.direct_greaters(a).unwrap().contains(&b));
            prop_assert!(poset.direct_smallers(b).unwrap().contains(&a));
        }
    }

    #[test]
    fn linearization_respects_order((n, edges) in dag_edges(10)) {
        let mut poset = PartialOrderSet::new("prop");
        for node in 0..n {
            poset.add_node(node);
        }
        for &(a, b) in &edges {
            poset.add_edge(a, b).unwrap();
        }
        let order = poset.linearize(0..n);
        for &(a, b) in &edges {
            let pa = order.iter().position(|&x| x == a).unwrap();
            let pb = order.iter().position(|&x| x == b).unwrap();
            prop_assert!(pb < pa);
        }
    }

    #[test]
    fn visibility_order_is_consistent(a in visibility(), b in visibility()) {
        prop_assert_eq!(a > b, (a as u8) > (b as u8));
        prop_assert_eq!(a >= b, a == b || a > b);
    }

    #[test]
    fn self_visibility_is_intrude(names in prop::collection::vec("[a-z]{1,6}", 1..8)) {
        let mut registry = ModelRegistry::new();
        for name in &names {
            registry.create_module(None, name.as_str(), SourceLocation::synthetic()).unwrap();
        }
        for module in registry.modules() {
            prop_assert_eq!(module.visibility_for(module.id()), Visibility::Intrude);
        }
    }
}
