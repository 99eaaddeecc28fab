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

//! Arena handles for model entities
//!
//! The registry owns every project, group and module; everything else refers
//! to them through these copyable ids.

use crate::error::{ModelError, ModelResult};
use serde::{Deserialize, Serialize};
use std::fmt;

macro_rules! define_id {
    ($(#[$meta:meta])* $name:ident, $prefix:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        pub struct $name(pub(crate) u32);

        impl $name {
            /// Position of the entity in its registry arena
            pub fn index(self) -> usize {
                self.0 as usize
            }

            /// Handle for the next arena slot; arenas hold at most `u32::MAX + 1` entries
            pub(crate) fn from_index(index: usize) -> ModelResult<Self> {
                u32::try_from(index).map(Self).map_err(|_| ModelError::ArenaExhausted { kind: $prefix })
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, concat!($prefix, "#{}"), self.0)
            }
        }
    };
}

define_id!(
    /// Handle to a module owned by a `ModelRegistry`
    ModuleId,
    "module"
);

define_id!(
    /// Handle to a group owned by a `ModelRegistry`
    GroupId,
    "group"
);

define_id!(
    /// Handle to a project owned by a `ModelRegistry`
    ProjectId,
    "project"
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_id_display() {
        assert_eq!(ModuleId(3).to_string(), "module#3");
        assert_eq!(GroupId(0).to_string(), "group#0");
        assert_eq!(ProjectId(12).to_string(), "project#12");
    }

    #[test]
    fn test_id_index() {
        let id = ModuleId::from_index(7).unwrap();
        assert_eq!(id.index(), 7);
        assert!(ModuleId(1) < ModuleId(2));
    }

    #[cfg(target_pointer_width = "64")]
    #[test]
    fn test_index_past_u32_is_refused() {
        let err = GroupId::from_index(u32::MAX as usize + 1).unwrap_err();
        assert_eq!(err, ModelError::ArenaExhausted { kind: "group" });
        assert_eq!(ProjectId::from_index(u32::MAX as usize).unwrap(), ProjectId(u32::MAX));
    }
}
