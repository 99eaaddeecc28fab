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

//! Module hierarchy and visibility model for the compiler front-end
//!
//! The loader creates projects, groups and modules through a
//! [`ModelRegistry`], declares each module's imports once, and then propagates
//! visibility along every import in imports-before-importers order. Name
//! resolution and type checking afterwards query [`Module::visibility_for`],
//! [`Module::is_visible`] and the two hierarchies.
//!
//! # Example Usage
//!
//! ```rust
//! use semmodel_core::{ModelRegistry, SourceLocation, Visibility};
//!
//! let mut registry = ModelRegistry::new();
//! let kernel = registry.create_module(None, "kernel", SourceLocation::synthetic()).unwrap();
//! let array = registry.create_module(None, "array", SourceLocation::synthetic()).unwrap();
//! let app = registry.create_module(None, "app", SourceLocation::synthetic()).unwrap();
//!
//! registry.declare_imports(kernel, &[]).unwrap();
//! registry.declare_imports(array, &[(kernel, Visibility::Public)]).unwrap();
//! registry.declare_imports(app, &[(array, Visibility::Public)]).unwrap();
//!
//! assert_eq!(registry.visibility_for(app, kernel).unwrap(), Visibility::Public);
//! assert_eq!(registry.visibility_for(kernel, app).unwrap(), Visibility::None);
//! ```

pub mod config;
pub mod doc;
pub mod error;
pub mod ids;
pub mod location;
pub mod model;
pub mod poset;
pub mod visibility;

pub use config::ModelConfig;
pub use doc::{Deprecation, ModuleDoc};
pub use error::{ErrorCategory, ModelError, ModelResult};
pub use ids::{GroupId, ModuleId, ProjectId};
pub use location::SourceLocation;
pub use model::{Group, ModelRegistry, Module, Project};
pub use poset::{PartialOrderElement, PartialOrderSet};
pub use visibility::{Visibility, VisibilitySets};
