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

//! Configuration for the module model

use serde::{Deserialize, Serialize};

/// Configuration for a `ModelRegistry`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelConfig {
    /// Refuse edges that would close a cycle in either hierarchy
    pub check_acyclic: bool,
    /// Turn out-of-order visibility propagation into errors instead of warnings
    pub strict_ordering: bool,
    /// Verbosity level: 0 = quiet, 1 = normal, 2 = verbose
    pub verbosity: u8,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            check_acyclic: true,
            strict_ordering: false,
            verbosity: 1,
        }
    }
}

impl ModelConfig {
    /// Create a new configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable or disable the acyclicity check on edge insertion
    pub fn with_acyclic_check(mut self, enable: bool) -> Self {
        self.check_acyclic = enable;
        self
    }

    /// Enable or disable strict propagation ordering
    pub fn with_strict_ordering(mut self, enable: bool) -> Self {
        self.strict_ordering = enable;
        self
    }

    /// Set verbosity level
    pub fn with_verbosity(mut self, verbosity: u8) -> Self {
        self.verbosity = verbosity;
        self
    }

    /// Check if verbose logging is enabled
    pub fn is_verbose(&self) -> bool {
        self.verbosity > 0
    }

    /// Check if debug logging is enabled
    pub fn is_debug(&self) -> bool {
        self.verbosity > 1
    }
}
