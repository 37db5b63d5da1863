//! ULID-backed entity identifiers
//!
//! Every entity of the layer model that is created at runtime (layers,
//! scenes, properties, datasets, tags, infobox fields) is addressed by a
//! sortable ULID wrapped in its own newtype so ids of different kinds can
//! never be mixed up.

use crate::IdError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use ulid::Ulid;

macro_rules! define_id {
    ($(#[$meta:meta])* $name:ident, $kind:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(Ulid);

        impl $name {
            /// Generate a fresh identifier
            #[inline]
            #[must_use]
            pub fn new() -> Self {
                Self(Ulid::new())
            }

            /// Wrap an existing ULID
            #[inline]
            #[must_use]
            pub const fn from_ulid(ulid: Ulid) -> Self {
                Self(ulid)
            }

            /// Underlying ULID
            #[inline]
            #[must_use]
            pub const fn ulid(self) -> Ulid {
                self.0
            }

            /// Kind label used in diagnostics
            #[inline]
            #[must_use]
            pub const fn kind() -> &'static str {
                $kind
            }
        }

        impl From<Ulid> for $name {
            fn from(ulid: Ulid) -> Self {
                Self(ulid)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl FromStr for $name {
            type Err = IdError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Ulid::from_string(s)
                    .map(Self)
                    .map_err(|_| IdError::InvalidUlid {
                        kind: $kind,
                        value: s.to_string(),
                    })
            }
        }
    };
}

define_id!(
    /// Identifier of a layer (group or item)
    LayerId,
    "layer"
);
define_id!(
    /// Identifier of the scene owning a layer tree
    SceneId,
    "scene"
);
define_id!(
    /// Identifier of a property object
    PropertyId,
    "property"
);
define_id!(
    /// Identifier of a dataset record
    DatasetId,
    "dataset"
);
define_id!(
    /// Identifier of a dataset schema
    DatasetSchemaId,
    "dataset schema"
);
define_id!(
    /// Identifier of a tag
    TagId,
    "tag"
);
define_id!(
    /// Identifier of a field inside an infobox
    InfoboxFieldId,
    "infobox field"
);
