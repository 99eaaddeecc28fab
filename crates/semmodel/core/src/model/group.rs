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

//! Projects and groups: the directory-like tree modules live in

use crate::ids::{GroupId, ModuleId, ProjectId};

/// A project: a named tree of groups
#[derive(Debug, Clone)]
pub struct Project {
    pub(crate) id: ProjectId,
    pub(crate) name: String,
    pub(crate) root: Option<GroupId>,
}

impl Project {
    pub fn id(&self) -> ProjectId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// First parentless group created for the project
    pub fn root(&self) -> Option<GroupId> {
        self.root
    }
}

/// A node of the group tree, holding member modules
///
/// The module named like the group is its default module and stands for the
/// whole group in the nesting hierarchy.
#[derive(Debug, Clone)]
pub struct Group {
    pub(crate) id: GroupId,
    pub(crate) name: String,
    pub(crate) project: ProjectId,
    pub(crate) parent: Option<GroupId>,
    pub(crate) children: Vec<GroupId>,
    pub(crate) modules: Vec<ModuleId>,
    pub(crate) default_module: Option<ModuleId>,
}

impl Group {
    pub(crate) fn new(id: GroupId, name: String, project: ProjectId, parent: Option<GroupId>) -> Self {
        Self {
            id,
            name,
            project,
            parent,
            children: Vec::new(),
            modules: Vec::new(),
            default_module: None,
        }
    }

    pub fn id(&self) -> GroupId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn project(&self) -> ProjectId {
        self.project
    }

    pub fn parent(&self) -> Option<GroupId> {
        self.parent
    }

    pub fn children(&self) -> &[GroupId] {
        &self.children
    }

    /// Member modules in creation order
    pub fn modules(&self) -> &[ModuleId] {
        &self.modules
    }

    pub fn default_module(&self) -> Option<ModuleId> {
        self.default_module
    }

    /// Assign the default module once
    ///
    /// Assigning the current default again is accepted. On conflict the
    /// existing default is returned and nothing changes.
    pub(crate) fn set_default_module(&mut self, m: ModuleId) -> Result<(), ModuleId> {
        match self.default_module {
            Some(existing) if existing != m => Err(existing),
            _ => {
                self.default_module = Some(m);
                Ok(())
            }
        }
    }
}
