//! Plugin-scoped textual identifiers
//!
//! Plugins are addressed by `name~version`, extensions by a bare name, and
//! property schemas by `plugin/extension`. A schema id is derived from a
//! plugin/extension pair without any lookup, so two layers bound to the same
//! extension always agree on the schema their property must use.

use crate::IdError;
use serde::{Deserialize, Serialize};
use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

const VERSION_SEPARATOR: char = '~';
const SCHEMA_SEPARATOR: char = '/';

fn is_valid_name(s: &str) -> bool {
    !s.is_empty()
        && s
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.'))
}

/// Plugin identifier: `name` or `name~version`
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct PluginId {
    name: String,
    version: Option<String>,
}

impl PluginId {
    /// Create a plugin id from name and optional version
    ///
    /// # Errors
    /// Returns [`IdError::InvalidPlugin`] if the name is empty or contains
    /// characters outside `[A-Za-z0-9_.-]`.
    pub fn new(name: impl Into<String>, version: Option<&str>) -> Result<Self, IdError> {
        let name = name.into();
        if !is_valid_name(&name) || version.is_some_and(|v| !is_valid_name(v)) {
            return Err(IdError::InvalidPlugin(match version {
                Some(v) => format!("{name}{VERSION_SEPARATOR}{v}"),
                None => name,
            }));
        }
        Ok(Self {
            name,
            version: version.map(str::to_string),
        })
    }

    /// Plugin name
    #[inline]
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Plugin version, if any
    #[inline]
    #[must_use]
    pub fn version(&self) -> Option<&str> {
        self.version.as_deref()
    }
}

impl Display for PluginId {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match &self.version {
            Some(v) => write!(f, "{}{VERSION_SEPARATOR}{v}", self.name),
            None => write!(f, "{}", self.name),
        }
    }
}

impl FromStr for PluginId {
    type Err = IdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.split_once(VERSION_SEPARATOR) {
            Some((name, version)) => Self::new(name, Some(version)),
            None => Self::new(s, None),
        }
    }
}

impl TryFrom<String> for PluginId {
    type Error = IdError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<PluginId> for String {
    fn from(value: PluginId) -> Self {
        value.to_string()
    }
}

/// Extension identifier, unique within its plugin
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct PluginExtensionId(String);

impl PluginExtensionId {
    /// Create an extension id
    ///
    /// # Errors
    /// Returns [`IdError::InvalidExtension`] for empty or malformed names.
    pub fn new(id: impl Into<String>) -> Result<Self, IdError> {
        let id = id.into();
        if is_valid_name(&id) {
            Ok(Self(id))
        } else {
            Err(IdError::InvalidExtension(id))
        }
    }

    /// Raw extension name
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for PluginExtensionId {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for PluginExtensionId {
    type Err = IdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<String> for PluginExtensionId {
    type Error = IdError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<PluginExtensionId> for String {
    fn from(value: PluginExtensionId) -> Self {
        value.0
    }
}

/// Property schema identifier: `plugin/id`
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct PropertySchemaId {
    plugin: PluginId,
    id: String,
}

impl PropertySchemaId {
    /// Create a schema id owned by `plugin`
    ///
    /// # Errors
    /// Returns [`IdError::InvalidSchema`] if `id` is empty or malformed.
    pub fn new(plugin: PluginId, id: impl Into<String>) -> Result<Self, IdError> {
        let id = id.into();
        if !is_valid_name(&id) {
            return Err(IdError::InvalidSchema(format!("{plugin}{SCHEMA_SEPARATOR}{id}")));
        }
        Ok(Self { plugin, id })
    }

    /// Schema of the property bound to an extension of a plugin
    ///
    /// Pure and infallible: extension ids are already validated names.
    #[must_use]
    pub fn from_extension(plugin: &PluginId, extension: &PluginExtensionId) -> Self {
        Self {
            plugin: plugin.clone(),
            id: extension.as_str().to_string(),
        }
    }

    /// Owning plugin
    #[inline]
    #[must_use]
    pub fn plugin(&self) -> &PluginId {
        &self.plugin
    }

    /// Schema name within the plugin
    #[inline]
    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }
}

impl Display for PropertySchemaId {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}{SCHEMA_SEPARATOR}{}", self.plugin, self.id)
    }
}

impl FromStr for PropertySchemaId {
    type Err = IdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (plugin, id) = s
            .rsplit_once(SCHEMA_SEPARATOR)
            .ok_or_else(|| IdError::InvalidSchema(s.to_string()))?;
        let plugin = plugin
            .parse()
            .map_err(|_| IdError::InvalidSchema(s.to_string()))?;
        Self::new(plugin, id)
    }
}

impl TryFrom<String> for PropertySchemaId {
    type Error = IdError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<PropertySchemaId> for String {
    fn from(value: PropertySchemaId) -> Self {
        value.to_string()
    }
}
