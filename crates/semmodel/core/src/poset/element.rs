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

//! Per-node reachability record

use std::collections::HashSet;
use std::hash::Hash;

/// A node of a `PartialOrderSet` with its direct and transitive neighbours
///
/// `greaters` holds every node this one is known to be greater than, directly
/// or transitively, and never the node itself. `smallers` mirrors it.
#[derive(Debug, Clone)]
pub struct PartialOrderElement<T> {
    pub(super) element: T,
    pub(super) direct_greaters: HashSet<T>,
    pub(super) greaters: HashSet<T>,
    pub(super) direct_smallers: HashSet<T>,
    pub(super) smallers: HashSet<T>,
}

impl<T: Copy + Eq + Hash> PartialOrderElement<T> {
    pub(super) fn new(element: T) -> Self {
        Self {
            element,
            direct_greaters: HashSet::new(),
            greaters: HashSet::new(),
            direct_smallers: HashSet::new(),
            smallers: HashSet::new(),
        }
    }

    /// The node this record describes
    pub fn element(&self) -> T {
        self.element
    }

    pub fn direct_greaters(&self) -> &HashSet<T> {
        &self.direct_greaters
    }

    pub fn greaters(&self) -> &HashSet<T> {
        &self.greaters
    }

    pub fn direct_smallers(&self) -> &HashSet<T> {
        &self.direct_smallers
    }

    pub fn smallers(&self) -> &HashSet<T> {
        &self.smallers
    }

    /// `self > other`
    pub fn is_greater_than(&self, other: T) -> bool {
        self.greaters.contains(&other)
    }

    /// `self >= other`
    pub fn is_greater_or_equal(&self, other: T) -> bool {
        self.element == other || self.greaters.contains(&other)
    }
}
