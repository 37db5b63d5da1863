//! Declarative property initialization
//!
//! Plugin manifests describe default property values with a
//! [`PropertyInitializer`]. When no initializer is given an empty property is
//! created against the requested schema instead.

use crate::{Property, PropertyError};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use strata_id::{PropertyId, PropertySchemaId, SceneId};

/// Declarative description of a property to create
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PropertyInitializer {
    /// Explicit id; generated when absent
    pub id: Option<PropertyId>,
    /// Explicit schema; must agree with the schema the caller derives
    pub schema: Option<PropertySchemaId>,
    /// Initial field values
    pub fields: IndexMap<String, Value>,
}

impl PropertyInitializer {
    /// Instantiate the property for `scene` against `schema`
    ///
    /// # Errors
    /// Returns [`PropertyError::SchemaMismatch`] if the initializer names a
    /// schema different from `schema`.
    pub fn property(&self, scene: SceneId, schema: &PropertySchemaId) -> Result<Property, PropertyError> {
        if let Some(declared) = &self.schema {
            if declared != schema {
                return Err(PropertyError::SchemaMismatch {
                    expected: schema.clone(),
                    actual: declared.clone(),
                });
            }
        }

        Property::builder()
            .id(self.id.unwrap_or_else(PropertyId::new))
            .scene(scene)
            .schema(schema.clone())
            .fields(self.fields.clone())
            .build()
    }

    /// Instantiate `initializer`, or an empty property if there is none
    ///
    /// # Errors
    /// Propagates [`property`](Self::property) errors.
    pub fn property_including_empty(
        initializer: Option<&Self>,
        scene: SceneId,
        schema: &PropertySchemaId,
    ) -> Result<Property, PropertyError> {
        match initializer {
            Some(init) => init.property(scene, schema),
            None => Property::builder()
                .new_id()
                .scene(scene)
                .schema(schema.clone())
                .build(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn schema() -> PropertySchemaId {
        "marker~1.0.0/pin".parse().unwrap()
    }

    #[test]
    fn empty_property_without_initializer() {
        let scene = SceneId::new();
        let p = PropertyInitializer::property_including_empty(None, scene, &schema()).unwrap();

        assert_eq!(p.schema(), &schema());
        assert_eq!(p.scene(), scene);
        assert_eq!(p.fields().count(), 0);
    }

    #[test]
    fn initializer_keeps_explicit_id_and_fields() {
        let id = PropertyId::new();
        let init = PropertyInitializer {
            id: Some(id),
            schema: None,
            fields: IndexMap::from([("title".to_string(), json!("hello"))]),
        };

        let p = init.property(SceneId::new(), &schema()).unwrap();
        assert_eq!(p.id(), id);
        assert_eq!(p.field("title"), Some(&json!("hello")));
    }

    #[test]
    fn mismatched_schema_is_rejected() {
        let init = PropertyInitializer {
            schema: Some("strata/infobox".parse().unwrap()),
            ..Default::default()
        };

        let err = init.property(SceneId::new(), &schema()).unwrap_err();
        assert!(matches!(err, PropertyError::SchemaMismatch { .. }));
    }

    #[test]
    fn deserializes_from_camel_case() {
        let init: PropertyInitializer =
            serde_json::from_value(json!({ "fields": { "size": 12 } })).unwrap();
        assert!(init.id.is_none());
        assert_eq!(init.fields.get("size"), Some(&json!(12)));
    }
}
