//! Property objects
//!
//! A [`Property`] is a schema-tagged bag of values owned by a scene. The
//! layer model never looks inside the values; it only cares that a property
//! exists and that its schema matches the plugin extension using it.

use crate::PropertyError;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use strata_id::{PropertyId, PropertySchemaId, SceneId};

/// Schema-tagged property object
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Property {
    id: PropertyId,
    scene: SceneId,
    schema: PropertySchemaId,
    #[serde(default)]
    fields: IndexMap<String, Value>,
}

impl Property {
    /// Start building a property
    #[inline]
    #[must_use]
    pub fn builder() -> PropertyBuilder {
        PropertyBuilder::default()
    }

    /// Property id
    #[inline]
    #[must_use]
    pub fn id(&self) -> PropertyId {
        self.id
    }

    /// Owning scene
    #[inline]
    #[must_use]
    pub fn scene(&self) -> SceneId {
        self.scene
    }

    /// Schema this property conforms to
    #[inline]
    #[must_use]
    pub fn schema(&self) -> &PropertySchemaId {
        &self.schema
    }

    /// Lookup a field value
    #[inline]
    #[must_use]
    pub fn field(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    /// Iterate over fields in insertion order
    pub fn fields(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Set a field, returning the previous value
    pub fn set_field(&mut self, key: impl Into<String>, value: Value) -> Option<Value> {
        self.fields.insert(key.into(), value)
    }

    /// Remove a field, returning its value
    pub fn remove_field(&mut self, key: &str) -> Option<Value> {
        self.fields.shift_remove(key)
    }
}

/// Builder for [`Property`]
#[derive(Debug, Clone, Default)]
pub struct PropertyBuilder {
    id: Option<PropertyId>,
    scene: Option<SceneId>,
    schema: Option<PropertySchemaId>,
    fields: IndexMap<String, Value>,
}

impl PropertyBuilder {
    /// Use an explicit id
    #[inline]
    #[must_use]
    pub fn id(mut self, id: PropertyId) -> Self {
        self.id = Some(id);
        self
    }

    /// Generate a fresh id
    #[inline]
    #[must_use]
    pub fn new_id(mut self) -> Self {
        self.id = Some(PropertyId::new());
        self
    }

    /// Owning scene
    #[inline]
    #[must_use]
    pub fn scene(mut self, scene: SceneId) -> Self {
        self.scene = Some(scene);
        self
    }

    /// Schema
    #[inline]
    #[must_use]
    pub fn schema(mut self, schema: PropertySchemaId) -> Self {
        self.schema = Some(schema);
        self
    }

    /// Add a field value
    #[inline]
    #[must_use]
    pub fn field(mut self, key: impl Into<String>, value: Value) -> Self {
        self.fields.insert(key.into(), value);
        self
    }

    /// Replace all field values
    #[inline]
    #[must_use]
    pub fn fields(mut self, fields: IndexMap<String, Value>) -> Self {
        self.fields = fields;
        self
    }

    /// Build the property
    ///
    /// # Errors
    /// Returns an error if id, scene or schema is missing.
    pub fn build(self) -> Result<Property, PropertyError> {
        Ok(Property {
            id: self.id.ok_or(PropertyError::InvalidId)?,
            scene: self.scene.ok_or(PropertyError::MissingScene)?,
            schema: self.schema.ok_or(PropertyError::MissingSchema)?,
            fields: self.fields,
        })
    }

    /// Build the property, panicking on missing parts
    ///
    /// # Panics
    /// Panics if [`build`](Self::build) fails. Only use with inputs that are
    /// known to be complete.
    #[must_use]
    pub fn must_build(self) -> Property {
        match self.build() {
            Ok(p) => p,
            Err(e) => panic!("property build failed: {e}"),
        }
    }
}
