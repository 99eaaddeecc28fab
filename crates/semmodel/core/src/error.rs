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

//! Error handling for the module model
//!
//! Every variant describes a broken call-ordering contract between the loader
//! and the model. None of them is caused by the compiled program itself, so the
//! loader is expected to stop as soon as one is returned.

use crate::ids::{GroupId, ModuleId, ProjectId};
use crate::visibility::Visibility;
use std::panic::Location;
use thiserror::Error;

/// Errors raised by the module model
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ModelError {
    // Lookup errors
    #[error("Node {node} is not registered in the {order} order")]
    UnknownNode { order: &'static str, node: String },

    #[error("Unknown module: {0}")]
    UnknownModule(ModuleId),

    #[error("Unknown group: {0}")]
    UnknownGroup(GroupId),

    #[error("Unknown project: {0}")]
    UnknownProject(ProjectId),

    #[error("No {kind} handle left: the registry arena is full")]
    ArenaExhausted { kind: &'static str },

    // Precondition errors
    #[error("Imports of module {module} are already set (unique invocation)")]
    ImportsAlreadySet { module: String },

    #[error("Group {group} already has default module {existing}, cannot assign {requested}")]
    DefaultModuleConflict { group: String, existing: String, requested: String },

    #[error("Module {module} is not a member of group {group} and cannot be its default module")]
    NotGroupMember { group: String, module: String },

    #[error("{module} visibility for {target} = {visibility}")]
    InvalidVisibility { module: String, target: String, visibility: Visibility },

    #[error("Edge {greater} > {smaller} would close a cycle in the {order} order")]
    CycleDetected { order: &'static str, greater: String, smaller: String },

    // Ordering errors
    #[error("Module {module} does not import {target}; set its imports before its visibility")]
    MissingImportEdge { module: String, target: String },

    #[error("Visibility of {target} is not final yet; {module} cannot propagate through it")]
    PrematurePropagation { module: String, target: String },

    // Input errors
    #[error("Unknown visibility keyword: {0}")]
    InvalidVisibilityName(String),
}

/// Result type used across the model
pub type ModelResult<T> = Result<T, ModelError>;

/// Broad classification of model errors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    /// An id or node that the model never registered
    Lookup,
    /// A write-once or value precondition was violated
    Precondition,
    /// Operations were invoked out of dependency order
    Ordering,
    /// Text handed to the model could not be interpreted
    Input,
}

impl ModelError {
    /// Get the error category
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::UnknownNode { .. } | Self::UnknownModule(_) | Self::UnknownGroup(_) | Self::UnknownProject(_) => ErrorCategory::Lookup,
            Self::ArenaExhausted { .. }
            | Self::ImportsAlreadySet { .. }
            | Self::DefaultModuleConflict { .. }
            | Self::NotGroupMember { .. }
            | Self::InvalidVisibility { .. }
            | Self::CycleDetected { .. } => ErrorCategory::Precondition,
            Self::MissingImportEdge { .. } | Self::PrematurePropagation { .. } => ErrorCategory::Ordering,
            Self::InvalidVisibilityName(_) => ErrorCategory::Input,
        }
    }

    /// Whether loading must stop on this error
    ///
    /// Only malformed keywords can be fixed by the caller; everything else means
    /// the loader broke its own contract with the model.
    pub fn is_fatal(&self) -> bool {
        !matches!(self.category(), ErrorCategory::Input)
    }

    /// Emit the diagnostic for a failed operation invoked at `caller`
    pub(crate) fn report_at(self, caller: &'static Location<'static>) -> Self {
        tracing::error!(at = %caller, category = ?self.category(), "model invariant violated: {}", self);
        self
    }
}
