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

//! Modules: the nodes of both hierarchies

use crate::doc::{Deprecation, ModuleDoc};
use crate::ids::{GroupId, ModuleId};
use crate::location::SourceLocation;
use crate::visibility::{Visibility, VisibilitySets};
use std::collections::BTreeSet;
use std::fmt;

/// A compilation unit registered in a `ModelRegistry`
#[derive(Debug, Clone)]
pub struct Module {
    pub(crate) id: ModuleId,
    pub(crate) name: String,
    pub(crate) full_name: String,
    pub(crate) location: SourceLocation,
    pub(crate) group: Option<GroupId>,
    pub(crate) fictive: bool,
    pub(crate) visibility: VisibilitySets,
    /// Imports whose visibility has already been propagated
    pub(crate) propagated: BTreeSet<ModuleId>,
    doc: Option<ModuleDoc>,
    deprecation: Option<Deprecation>,
}

impl Module {
    pub(crate) fn new(id: ModuleId, name: String, full_name: String, location: SourceLocation, group: Option<GroupId>) -> Self {
        Self {
            id,
            name,
            full_name,
            location,
            group,
            fictive: false,
            visibility: VisibilitySets::new(),
            propagated: BTreeSet::new(),
            doc: None,
            deprecation: None,
        }
    }

    pub fn id(&self) -> ModuleId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Name qualified by the project, unless the module is named like it
    pub fn full_name(&self) -> &str {
        &self.full_name
    }

    pub fn location(&self) -> &SourceLocation {
        &self.location
    }

    pub fn group(&self) -> Option<GroupId> {
        self.group
    }

    /// Synthetic placeholder not backed by source text
    pub fn is_fictive(&self) -> bool {
        self.fictive
    }

    pub fn set_fictive(&mut self, fictive: bool) {
        self.fictive = fictive;
    }

    pub fn doc(&self) -> Option<&ModuleDoc> {
        self.doc.as_ref()
    }

    pub fn set_doc(&mut self, doc: Option<ModuleDoc>) {
        self.doc = doc;
    }

    pub fn deprecation(&self) -> Option<&Deprecation> {
        self.deprecation.as_ref()
    }

    pub fn set_deprecation(&mut self, deprecation: Option<Deprecation>) {
        self.deprecation = deprecation;
    }

    pub fn is_deprecated(&self) -> bool {
        self.deprecation.is_some()
    }

    pub fn visibility_sets(&self) -> &VisibilitySets {
        &self.visibility
    }

    /// Modules this one sees with intrusive access
    pub fn intrude_visible(&self) -> &BTreeSet<ModuleId> {
        self.visibility.intrude()
    }

    pub fn public_visible(&self) -> &BTreeSet<ModuleId> {
        self.visibility.public()
    }

    pub fn private_visible(&self) -> &BTreeSet<ModuleId> {
        self.visibility.private()
    }

    /// Visibility this module has on `m`; a module always intrudes itself
    pub fn visibility_for(&self, m: ModuleId) -> Visibility {
        if m == self.id {
            return Visibility::Intrude;
        }
        self.visibility.level_of(m)
    }

    /// Whether an entity introduced in `intro_module` with visibility
    /// `min_required` can be seen from this module
    pub fn is_visible(&self, intro_module: ModuleId, min_required: Visibility) -> bool {
        self.visibility_for(intro_module).grants(min_required)
    }
}

impl fmt::Display for Module {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}
