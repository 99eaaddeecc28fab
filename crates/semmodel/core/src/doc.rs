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

//! Documentation attached to model entities
//!
//! The model stores these records for the documentation tooling and never
//! looks inside them.

use crate::location::SourceLocation;
use serde::{Deserialize, Serialize};

/// Documentation comment block
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModuleDoc {
    /// Lines of the comment, without comment markers
    pub content: Vec<String>,
    pub location: SourceLocation,
}

impl ModuleDoc {
    pub fn new(content: Vec<String>, location: SourceLocation) -> Self {
        Self { content, location }
    }

    /// First line of the comment, used as a synopsis
    pub fn synopsis(&self) -> Option<&str> {
        self.content.first().map(String::as_str)
    }
}

/// Deprecation marker, optionally explained by its own comment
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Deprecation {
    pub doc: Option<ModuleDoc>,
}
