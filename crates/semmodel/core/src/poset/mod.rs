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

//! Incrementally maintained partial order
//!
//! Edges are only ever added. Each insertion updates the transitive closure by
//! touching the cross product of the nodes reaching the source and the nodes
//! reachable from the target, so the whole graph is never recomputed.
//!
//! `add_edge(a, b)` declares `a` directly greater than `b`: afterwards `b` is in
//! `greaters(a)` and `a` is in `smallers(b)`.

pub mod element;
pub mod export;

pub use element::PartialOrderElement;

use crate::error::{ModelError, ModelResult};
use std::collections::{HashMap, HashSet};
use std::fmt::Display;
use std::hash::Hash;
use tracing::trace;

/// Directed acyclic reachability structure over `T`
#[derive(Debug, Clone)]
pub struct PartialOrderSet<T> {
    name: &'static str,
    check_acyclic: bool,
    elements: HashMap<T, PartialOrderElement<T>>,
    /// Registration order, for deterministic iteration
    order: Vec<T>,
}

impl<T: Copy + Eq + Hash + Display> PartialOrderSet<T> {
    /// Create an empty order; `name` only appears in diagnostics
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            check_acyclic: true,
            elements: HashMap::new(),
            order: Vec::new(),
        }
    }

    /// Enable or disable refusing edges that would close a cycle
    pub fn with_acyclic_check(mut self, enable: bool) -> Self {
        self.check_acyclic = enable;
        self
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn contains(&self, x: T) -> bool {
        self.elements.contains_key(&x)
    }

    /// Nodes in registration order
    pub fn iter(&self) -> impl Iterator<Item = &PartialOrderElement<T>> {
        self.order.iter().filter_map(|x| self.elements.get(x))
    }

    /// Register `x`; does nothing if it is already present
    pub fn add_node(&mut self, x: T) -> &PartialOrderElement<T> {
        if !self.elements.contains_key(&x) {
            self.order.push(x);
        }
        self.elements.entry(x).or_insert_with(|| PartialOrderElement::new(x))
    }

    pub fn get(&self, x: T) -> Option<&PartialOrderElement<T>> {
        self.elements.get(&x)
    }

    /// Look up a registered node
    pub fn element(&self, x: T) -> ModelResult<&PartialOrderElement<T>> {
        self.elements.get(&x).ok_or_else(|| ModelError::UnknownNode {
            order: self.name,
            node: x.to_string(),
        })
    }

    /// Declare `a` directly greater than `b` and extend the closure
    ///
    /// Both nodes must already be registered. Re-adding an existing direct edge
    /// is a no-op.
    pub fn add_edge(&mut self, a: T, b: T) -> ModelResult<()> {
        let source = self.element(a)?;
        let target = self.element(b)?;

        if source.direct_greaters.contains(&b) {
            return Ok(());
        }
        if self.check_acyclic && (a == b || target.greaters.contains(&a)) {
            return Err(ModelError::CycleDetected {
                order: self.name,
                greater: a.to_string(),
                smaller: b.to_string(),
            });
        }

        let upper: Vec<T> = std::iter::once(a).chain(source.smallers.iter().copied()).collect();
        let lower: Vec<T> = std::iter::once(b).chain(target.greaters.iter().copied()).collect();
        trace!(order = self.name, upper = upper.len(), lower = lower.len(), "extending closure");

        for g in &upper {
            if let Some(e) = self.elements.get_mut(g) {
                e.greaters.extend(lower.iter().copied());
            }
        }
        for s in &lower {
            if let Some(e) = self.elements.get_mut(s) {
                e.smallers.extend(upper.iter().copied());
            }
        }
        if let Some(e) = self.elements.get_mut(&a) {
            e.direct_greaters.insert(b);
        }
        if let Some(e) = self.elements.get_mut(&b) {
            e.direct_smallers.insert(a);
        }
        Ok(())
    }

    /// Whether `a > b` was declared directly
    pub fn has_direct_edge(&self, a: T, b: T) -> bool {
        self.get(a).is_some_and(|e| e.direct_greaters.contains(&b))
    }

    pub fn direct_greaters(&self, x: T) -> ModelResult<&HashSet<T>> {
        Ok(self.element(x)?.direct_greaters())
    }

    pub fn greaters(&self, x: T) -> ModelResult<&HashSet<T>> {
        Ok(self.element(x)?.greaters())
    }

    pub fn direct_smallers(&self, x: T) -> ModelResult<&HashSet<T>> {
        Ok(self.element(x)?.direct_smallers())
    }

    pub fn smallers(&self, x: T) -> ModelResult<&HashSet<T>> {
        Ok(self.element(x)?.smallers())
    }

    /// `x > y`; false when `x` is not registered
    pub fn gt(&self, x: T, y: T) -> bool {
        self.get(x).is_some_and(|e| e.is_greater_than(y))
    }

    /// `x >= y`
    pub fn ge(&self, x: T, y: T) -> bool {
        x == y || self.gt(x, y)
    }
}

impl<T: Copy + Eq + Hash + Display + Ord> PartialOrderSet<T> {
    /// Sort `items` so that every node comes after the nodes it is greater than
    ///
    /// A node is strictly greater than everything in its `greaters` set, so its
    /// set is strictly larger; sorting by that size is a topological order.
    pub fn linearize(&self, items: impl IntoIterator<Item = T>) -> Vec<T> {
        let mut items: Vec<T> = items.into_iter().collect();
        items.sort_by_key(|x| (self.get(*x).map_or(0, |e| e.greaters.len()), *x));
        items
    }
}

impl<T: Copy + Eq + Hash + Display> Default for PartialOrderSet<T> {
    fn default() -> Self {
        Self::new("poset")
    }
}
