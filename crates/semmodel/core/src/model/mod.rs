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

//! The model registry
//!
//! Owns every project, group and module together with the two module
//! hierarchies:
//!
//! - the nesting order, `owner > nested`, induced by the group tree when a
//!   module is created;
//! - the importation order, `importer > imported`, filled once per module when
//!   its import clause is known.
//!
//! Loading is single-writer: all mutation goes through `&mut ModelRegistry`.
//! Once loading is over the registry can be shared read-only.

pub mod group;
pub mod module;

pub use group::{Group, Project};
pub use module::Module;

use crate::config::ModelConfig;
use crate::error::{ModelError, ModelResult};
use crate::ids::{GroupId, ModuleId, ProjectId};
use crate::location::SourceLocation;
use crate::poset::{PartialOrderElement, PartialOrderSet};
use crate::visibility::Visibility;
use std::collections::HashMap;
use std::panic::Location;
use tracing::{debug, warn};

/// The two module hierarchies
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Hierarchy {
    Nesting,
    Importation,
}

/// Owner of the module model
#[derive(Debug, Clone)]
pub struct ModelRegistry {
    config: ModelConfig,
    projects: Vec<Project>,
    groups: Vec<Group>,
    modules: Vec<Module>,
    modules_by_name: HashMap<String, Vec<ModuleId>>,
    nesting: PartialOrderSet<ModuleId>,
    importation: PartialOrderSet<ModuleId>,
}

impl Default for ModelRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl ModelRegistry {
    /// Create an empty registry with default configuration
    pub fn new() -> Self {
        Self::with_config(ModelConfig::default())
    }

    /// Create an empty registry with custom configuration
    pub fn with_config(config: ModelConfig) -> Self {
        Self {
            nesting: PartialOrderSet::new("nesting").with_acyclic_check(config.check_acyclic),
            importation: PartialOrderSet::new("importation").with_acyclic_check(config.check_acyclic),
            config,
            projects: Vec::new(),
            groups: Vec::new(),
            modules: Vec::new(),
            modules_by_name: HashMap::new(),
        }
    }

    pub fn config(&self) -> &ModelConfig {
        &self.config
    }

    // ---- construction -------------------------------------------------

    pub fn create_project(&mut self, name: impl Into<String>) -> ModelResult<ProjectId> {
        let id = ProjectId::from_index(self.projects.len())?;
        self.projects.push(Project {
            id,
            name: name.into(),
            root: None,
        });
        Ok(id)
    }

    /// Create a group in `project`, under `parent` if given
    ///
    /// The first parentless group of a project becomes its root.
    #[track_caller]
    pub fn create_group(&mut self, project: ProjectId, parent: Option<GroupId>, name: impl Into<String>) -> ModelResult<GroupId> {
        let caller = Location::caller();
        self.create_group_inner(project, parent, name.into()).map_err(|e| e.report_at(caller))
    }

    fn create_group_inner(&mut self, project: ProjectId, parent: Option<GroupId>, name: String) -> ModelResult<GroupId> {
        self.project(project)?;
        if let Some(parent) = parent {
            self.group(parent)?;
        }

        let id = GroupId::from_index(self.groups.len())?;
        self.groups.push(Group::new(id, name, project, parent));
        match parent {
            Some(parent) => self.groups[parent.index()].children.push(id),
            None => {
                let project = &mut self.projects[project.index()];
                if project.root.is_none() {
                    project.root = Some(id);
                }
            }
        }
        Ok(id)
    }

    /// Create a module and wire it into the nesting hierarchy
    ///
    /// A module named like its group becomes the group's default module and
    /// adopts the members created before it. The direct owner is the group's
    /// default module, or failing that the default module of the nearest
    /// ancestor group that has one.
    #[track_caller]
    pub fn create_module(&mut self, group: Option<GroupId>, name: impl Into<String>, location: SourceLocation) -> ModelResult<ModuleId> {
        let caller = Location::caller();
        self.create_module_inner(group, name.into(), location).map_err(|e| e.report_at(caller))
    }

    fn create_module_inner(&mut self, group: Option<GroupId>, name: String, location: SourceLocation) -> ModelResult<ModuleId> {
        let id = ModuleId::from_index(self.modules.len())?;

        // Validate everything before the first mutation
        let mut full_name = name.clone();
        let mut becomes_default = false;
        if let Some(gid) = group {
            let g = self.group(gid)?;
            let project = self.project(g.project)?;
            if project.name != name {
                full_name = format!("{}::{}", project.name, name);
            }
            if g.name == name {
                if let Some(existing) = g.default_module {
                    return Err(self.default_conflict(gid, existing, &name));
                }
                becomes_default = true;
            }
        }

        self.register(Module::new(id, name, full_name, location, group));

        let Some(gid) = group else {
            return Ok(id);
        };
        let g = &mut self.groups[gid.index()];
        g.modules.push(id);
        if becomes_default {
            g.default_module = Some(id);
            self.adopt_members(gid, id)?;
        }

        if let Some(owner) = self.resolve_owner(gid, id) {
            self.link(Hierarchy::Nesting, owner, id)?;
            if self.config.is_debug() {
                debug!(owner = %self.modules[owner.index()], module = %self.modules[id.index()], "nested module");
            }
        }
        Ok(id)
    }

    /// Create a group-less placeholder module
    pub fn create_fictive_module(&mut self, name: impl Into<String>) -> ModelResult<ModuleId> {
        let name = name.into();
        let id = ModuleId::from_index(self.modules.len())?;
        let mut module = Module::new(id, name.clone(), name, SourceLocation::synthetic(), None);
        module.set_fictive(true);
        self.register(module);
        Ok(id)
    }

    /// Append to the module list and name index, and add to both orders
    fn register(&mut self, module: Module) {
        let id = module.id;
        self.modules_by_name.entry(module.name.clone()).or_default().push(id);
        self.nesting.add_node(id);
        self.importation.add_node(id);
        self.modules.push(module);
    }

    /// Nest every other member of `group` under its default module `default`
    fn adopt_members(&mut self, group: GroupId, default: ModuleId) -> ModelResult<()> {
        let members: Vec<ModuleId> = self.groups[group.index()].modules.iter().copied().filter(|&m| m != default).collect();
        for member in members {
            self.link(Hierarchy::Nesting, default, member)?;
            if self.config.is_debug() {
                debug!(owner = %self.modules[default.index()], module = %self.modules[member.index()], "adopted module");
            }
        }
        Ok(())
    }

    fn resolve_owner(&self, group: GroupId, module: ModuleId) -> Option<ModuleId> {
        let g = self.groups.get(group.index())?;
        if let Some(default) = g.default_module {
            if default != module {
                return Some(default);
            }
        }
        let mut next = g.parent;
        while let Some(pid) = next {
            let parent = self.groups.get(pid.index())?;
            if let Some(default) = parent.default_module {
                if default != module {
                    return Some(default);
                }
            }
            next = parent.parent;
        }
        None
    }

    /// Designate `module` as the default module of `group`
    ///
    /// `module` must be a member of `group`. Idempotent for the current
    /// default; any other module is refused. A newly designated default adopts
    /// the other members of the group.
    #[track_caller]
    pub fn set_default_module(&mut self, group: GroupId, module: ModuleId) -> ModelResult<()> {
        let caller = Location::caller();
        self.set_default_inner(group, module).map_err(|e| e.report_at(caller))
    }

    fn set_default_inner(&mut self, group: GroupId, module: ModuleId) -> ModelResult<()> {
        self.module(module)?;
        let g = self.group(group)?;
        if !g.modules.contains(&module) {
            return Err(ModelError::NotGroupMember {
                group: g.name.clone(),
                module: self.modules[module.index()].full_name.clone(),
            });
        }
        let newly_set = g.default_module.is_none();
        if let Err(existing) = self.groups[group.index()].set_default_module(module) {
            let name = self.modules[module.index()].name.clone();
            return Err(self.default_conflict(group, existing, &name));
        }
        if newly_set {
            self.adopt_members(group, module)?;
        }
        Ok(())
    }

    fn default_conflict(&self, group: GroupId, existing: ModuleId, requested: &str) -> ModelError {
        ModelError::DefaultModuleConflict {
            group: self.groups[group.index()].name.clone(),
            existing: self.modules[existing.index()].name.clone(),
            requested: requested.to_string(),
        }
    }

    // ---- importation --------------------------------------------------

    /// Declare the modules `module` imports directly, in order
    ///
    /// Must be called at most once per module: the module may not have any
    /// direct import yet.
    #[track_caller]
    pub fn set_imported_mmodules(&mut self, module: ModuleId, imports: &[ModuleId]) -> ModelResult<()> {
        let caller = Location::caller();
        self.set_imported_inner(module, imports).map_err(|e| e.report_at(caller))
    }

    fn set_imported_inner(&mut self, module: ModuleId, imports: &[ModuleId]) -> ModelResult<()> {
        self.module(module)?;
        if !self.importation.direct_greaters(module)?.is_empty() {
            return Err(ModelError::ImportsAlreadySet {
                module: self.modules[module.index()].full_name.clone(),
            });
        }
        for &imported in imports {
            self.module(imported)?;
            // refuse the whole list rather than leave it half wired
            if self.config.check_acyclic && (imported == module || self.importation.gt(imported, module)) {
                return Err(ModelError::CycleDetected {
                    order: self.importation.name(),
                    greater: self.modules[module.index()].full_name.clone(),
                    smaller: self.modules[imported.index()].full_name.clone(),
                });
            }
        }
        for &imported in imports {
            self.link(Hierarchy::Importation, module, imported)?;
        }
        if self.config.is_debug() {
            debug!(module = %self.modules[module.index()], count = imports.len(), "imports set");
        }
        Ok(())
    }

    /// Make `target` visible from `module` at level `visibility`
    ///
    /// Must run after `module`'s imports are set and after every import of
    /// `target` has been propagated, i.e. in imports-before-importers order
    /// (see `import_order`). Otherwise the sets folded in from `target` are
    /// incomplete. With `strict_ordering` both conditions are errors; without
    /// it they are logged and propagation proceeds.
    #[track_caller]
    pub fn set_visibility_for(&mut self, module: ModuleId, target: ModuleId, visibility: Visibility) -> ModelResult<()> {
        let caller = Location::caller();
        self.set_visibility_inner(module, target, visibility).map_err(|e| e.report_at(caller))
    }

    fn set_visibility_inner(&mut self, module: ModuleId, target: ModuleId, visibility: Visibility) -> ModelResult<()> {
        self.module(module)?;
        let imported = self.module(target)?.visibility.clone();

        if visibility == Visibility::None {
            return Err(ModelError::InvalidVisibility {
                module: self.modules[module.index()].full_name.clone(),
                target: self.modules[target.index()].full_name.clone(),
                visibility,
            });
        }
        if !self.importation.has_direct_edge(module, target) {
            let err = ModelError::MissingImportEdge {
                module: self.modules[module.index()].full_name.clone(),
                target: self.modules[target.index()].full_name.clone(),
            };
            if self.config.strict_ordering {
                return Err(err);
            }
            if self.config.is_verbose() {
                warn!("{}", err);
            }
        }
        if !self.is_visibility_final(target) {
            let err = ModelError::PrematurePropagation {
                module: self.modules[module.index()].full_name.clone(),
                target: self.modules[target.index()].full_name.clone(),
            };
            if self.config.strict_ordering {
                return Err(err);
            }
            if self.config.is_verbose() {
                warn!("{}", err);
            }
        }

        let debug_enabled = self.config.is_debug();
        let entry = &mut self.modules[module.index()];
        let added = entry.visibility.absorb(target, visibility, &imported);
        entry.propagated.insert(target);
        if debug_enabled {
            debug!(module = %entry, target = %target, %visibility, added, "visibility propagated");
        }
        Ok(())
    }

    /// Set the imports of `module` and propagate each declared visibility
    #[track_caller]
    pub fn declare_imports(&mut self, module: ModuleId, imports: &[(ModuleId, Visibility)]) -> ModelResult<()> {
        let caller = Location::caller();
        let targets: Vec<ModuleId> = imports.iter().map(|(m, _)| *m).collect();
        self.set_imported_inner(module, &targets).map_err(|e| e.report_at(caller))?;
        for &(target, visibility) in imports {
            self.set_visibility_inner(module, target, visibility).map_err(|e| e.report_at(caller))?;
        }
        Ok(())
    }

    /// Whether every direct import of `module` has been propagated
    pub fn is_visibility_final(&self, module: ModuleId) -> bool {
        let (Some(entry), Some(elem)) = (self.modules.get(module.index()), self.importation.get(module)) else {
            return false;
        };
        elem.direct_greaters().iter().all(|m| entry.propagated.contains(m))
    }

    fn link(&mut self, hierarchy: Hierarchy, greater: ModuleId, smaller: ModuleId) -> ModelResult<()> {
        let poset = match hierarchy {
            Hierarchy::Nesting => &mut self.nesting,
            Hierarchy::Importation => &mut self.importation,
        };
        match poset.add_edge(greater, smaller) {
            Err(ModelError::CycleDetected { order, .. }) => Err(ModelError::CycleDetected {
                order,
                greater: self.modules[greater.index()].full_name.clone(),
                smaller: self.modules[smaller.index()].full_name.clone(),
            }),
            other => other,
        }
    }

    // ---- queries ------------------------------------------------------

    pub fn module(&self, id: ModuleId) -> ModelResult<&Module> {
        self.modules.get(id.index()).ok_or(ModelError::UnknownModule(id))
    }

    /// Mutable access for attachments and flags; visibility sets stay
    /// read-only outside the registry
    pub fn module_mut(&mut self, id: ModuleId) -> ModelResult<&mut Module> {
        self.modules.get_mut(id.index()).ok_or(ModelError::UnknownModule(id))
    }

    pub fn group(&self, id: GroupId) -> ModelResult<&Group> {
        self.groups.get(id.index()).ok_or(ModelError::UnknownGroup(id))
    }

    pub fn project(&self, id: ProjectId) -> ModelResult<&Project> {
        self.projects.get(id.index()).ok_or(ModelError::UnknownProject(id))
    }

    /// Modules in creation order
    pub fn modules(&self) -> impl Iterator<Item = &Module> {
        self.modules.iter()
    }

    pub fn groups(&self) -> impl Iterator<Item = &Group> {
        self.groups.iter()
    }

    pub fn projects(&self) -> impl Iterator<Item = &Project> {
        self.projects.iter()
    }

    pub fn module_count(&self) -> usize {
        self.modules.len()
    }

    /// Every module called `name`, in creation order
    pub fn modules_by_name(&self, name: &str) -> &[ModuleId] {
        self.modules_by_name.get(name).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn nesting(&self) -> &PartialOrderSet<ModuleId> {
        &self.nesting
    }

    pub fn importation(&self) -> &PartialOrderSet<ModuleId> {
        &self.importation
    }

    pub fn in_nesting(&self, id: ModuleId) -> ModelResult<&PartialOrderElement<ModuleId>> {
        self.nesting.element(id)
    }

    pub fn in_importation(&self, id: ModuleId) -> ModelResult<&PartialOrderElement<ModuleId>> {
        self.importation.element(id)
    }

    /// The module `id` is directly nested in
    pub fn direct_owner(&self, id: ModuleId) -> ModelResult<Option<ModuleId>> {
        // an adopted module keeps its ancestor edge; the group default is the deeper owner
        let owners = self.nesting.direct_smallers(id)?;
        Ok(owners.iter().copied().max_by_key(|&o| (self.nesting.smallers(o).map_or(0, |s| s.len()), std::cmp::Reverse(o))))
    }

    /// Modules directly nested in `id`, sorted
    pub fn nested_modules(&self, id: ModuleId) -> ModelResult<Vec<ModuleId>> {
        let mut nested: Vec<ModuleId> = self.nesting.direct_greaters(id)?.iter().copied().collect();
        nested.sort();
        Ok(nested)
    }

    /// Every module `id` imports directly or transitively, sorted
    pub fn imported_modules(&self, id: ModuleId) -> ModelResult<Vec<ModuleId>> {
        let mut imported: Vec<ModuleId> = self.importation.greaters(id)?.iter().copied().collect();
        imported.sort();
        Ok(imported)
    }

    /// All modules, imports before importers
    pub fn import_order(&self) -> Vec<ModuleId> {
        self.importation.linearize(self.modules.iter().map(|m| m.id))
    }

    pub fn visibility_for(&self, module: ModuleId, target: ModuleId) -> ModelResult<Visibility> {
        Ok(self.module(module)?.visibility_for(target))
    }

    pub fn is_visible(&self, module: ModuleId, intro_module: ModuleId, min_required: Visibility) -> ModelResult<bool> {
        Ok(self.module(module)?.is_visible(intro_module, min_required))
    }
}
