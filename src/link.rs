//! Link resolution
//!
//! Related entities are never embedded. A link field becomes a reference
//! object `{"@id", "@type"}`, an ordered array of them, or an explicit
//! `null`.

use serde_json::{Map, Value};

use crate::config::HydraConfig;
use crate::id::{compute_id, entity_iri};
use crate::metadata::Catalog;
use crate::resource::{FieldValue, HydraResource};

/// Where a link object is being produced
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkMode {
    /// Inside a full entity document: identity and type only
    Entity,
    /// As a collection member: also inline `include_in_collection` fields
    Collection,
}

/// Resolve a link field value into its JSON reference form
///
/// A scalar where a link was declared resolves to `None` so the caller can
/// omit the field.
pub fn resolve_link(
    catalog: &Catalog,
    config: &HydraConfig,
    value: &FieldValue<'_>,
    mode: LinkMode,
) -> Option<Value> {
    match value {
        FieldValue::Link(None) => Some(Value::Null),
        FieldValue::Link(Some(resource)) => Some(link_object(catalog, config, *resource, mode)),
        FieldValue::Links(resources) => Some(Value::Array(
            resources
                .iter()
                .map(|r| link_object(catalog, config, *r, mode))
                .collect(),
        )),
        FieldValue::Scalar(_) => None,
    }
}

/// Build the reference object for one related entity
pub fn link_object(
    catalog: &Catalog,
    config: &HydraConfig,
    resource: &dyn HydraResource,
    mode: LinkMode,
) -> Value {
    let class_name = resource.class_name();
    let meta = catalog.class_metadata_or_default(class_name);

    let mut obj = Map::new();
    obj.insert(
        "@id".to_string(),
        Value::String(entity_iri(config, &meta, compute_id(resource))),
    );
    obj.insert("@type".to_string(), Value::String(meta.semantic_type.clone()));

    if mode == LinkMode::Collection {
        inline_collection_fields(catalog, config, resource, &mut obj);
    }

    Value::Object(obj)
}

/// Copy the fields flagged for collection previews into a link object
fn inline_collection_fields(
    catalog: &Catalog,
    config: &HydraConfig,
    resource: &dyn HydraResource,
    obj: &mut Map<String, Value>,
) {
    let class_name = resource.class_name();

    for field in catalog.field_metadata(class_name) {
        if !field.include_in_collection || field.excluded {
            continue;
        }

        let value = match resource.field(&field.name) {
            Some(v) => v,
            None => {
                tracing::warn!(
                    class = %class_name,
                    field = %field.name,
                    "field is unreadable, omitted from collection member"
                );
                continue;
            }
        };

        let rendered = match (&value, field.is_link()) {
            (FieldValue::Scalar(v), false) => Some(v.clone()),
            // nested links stay plain so cyclic graphs terminate
            (_, true) => resolve_link(catalog, config, &value, LinkMode::Entity),
            (_, false) => None,
        };

        match rendered {
            Some(v) => {
                obj.insert(field.name.clone(), v);
            }
            None => {
                tracing::warn!(
                    class = %class_name,
                    field = %field.name,
                    kind = value.kind(),
                    "field value does not match its declaration, omitted"
                );
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metadata::{ClassDescriptor, FieldDescriptor};
    use serde_json::json;

    struct Venue {
        id: i64,
        name: &'static str,
    }

    impl HydraResource for Venue {
        fn class_name(&self) -> &str {
            "Venue"
        }

        fn field(&self, name: &str) -> Option<FieldValue<'_>> {
            match name {
                "id" => FieldValue::scalar(&self.id),
                "name" => FieldValue::scalar(self.name),
                _ => None,
            }
        }
    }

    struct Organizer {
        id: i64,
    }

    /// Links to a venue that in turn inlines its own fields
    struct Booth {
        id: i64,
        venue: Venue,
    }

    impl HydraResource for Booth {
        fn class_name(&self) -> &str {
            "Booth"
        }

        fn field(&self, name: &str) -> Option<FieldValue<'_>> {
            match name {
                "id" => FieldValue::scalar(&self.id),
                "venue" => Some(FieldValue::link(Some(&self.venue))),
                _ => None,
            }
        }
    }

    impl HydraResource for Organizer {
        fn class_name(&self) -> &str {
            "Organizer"
        }

        fn field(&self, name: &str) -> Option<FieldValue<'_>> {
            match name {
                "id" => FieldValue::scalar(&self.id),
                _ => None,
            }
        }
    }

    fn config() -> HydraConfig {
        HydraConfig::new("http://example.org/api", "http://example.org/api/vocab").unwrap()
    }

    fn catalog() -> Catalog {
        Catalog::new().with(
            ClassDescriptor::new("Venue")
                .semantic_type("http://schema.org/Place")
                .field(FieldDescriptor::new("id"))
                .field(FieldDescriptor::new("name").in_collection()),
        )
    }

    #[test]
    fn test_null_link_is_explicit() {
        let value = FieldValue::link::<Venue>(None);
        assert_eq!(
            resolve_link(&catalog(), &config(), &value, LinkMode::Entity),
            Some(Value::Null)
        );
    }

    #[test]
    fn test_single_link() {
        let venue = Venue { id: 7, name: "Hall" };
        let value = FieldValue::link(Some(&venue));
        let link = resolve_link(&catalog(), &config(), &value, LinkMode::Entity).unwrap();
        assert_eq!(
            link,
            json!({"@id": "/api/venues/7", "@type": "http://schema.org/Place"})
        );
    }

    #[test]
    fn test_link_array_preserves_order() {
        let venues = vec![
            Venue { id: 3, name: "A" },
            Venue { id: 1, name: "B" },
            Venue { id: 2, name: "C" },
        ];
        let value = FieldValue::links(&venues);
        let links = resolve_link(&catalog(), &config(), &value, LinkMode::Entity).unwrap();
        let ids: Vec<&str> = links
            .as_array()
            .unwrap()
            .iter()
            .map(|l| l["@id"].as_str().unwrap())
            .collect();
        assert_eq!(ids, vec!["/api/venues/3", "/api/venues/1", "/api/venues/2"]);
    }

    #[test]
    fn test_collection_mode_inlines_flagged_fields() {
        let venue = Venue { id: 7, name: "Hall" };
        let link = link_object(&catalog(), &config(), &venue, LinkMode::Collection);
        assert_eq!(link["name"], json!("Hall"));

        let plain = link_object(&catalog(), &config(), &venue, LinkMode::Entity);
        assert!(plain.get("name").is_none());
    }

    #[test]
    fn test_nested_member_links_stay_plain() {
        let catalog = catalog().with(
            ClassDescriptor::new("Booth").field(
                FieldDescriptor::link("venue", "http://schema.org/location").in_collection(),
            ),
        );
        let booth = Booth {
            id: 2,
            venue: Venue { id: 7, name: "Hall" },
        };

        let link = link_object(&catalog, &config(), &booth, LinkMode::Collection);
        assert_eq!(
            link,
            json!({
                "@id": "/api/booths/2",
                "@type": "http://schema.org/Booth",
                "venue": {"@id": "/api/venues/7", "@type": "http://schema.org/Place"}
            })
        );
        // the venue's own collection field is not inlined one level down
        assert!(link["venue"].get("name").is_none());
    }

    #[test]
    fn test_undeclared_target_falls_back_to_schema_org() {
        let organizer = Organizer { id: 5 };
        let link = link_object(&catalog(), &config(), &organizer, LinkMode::Collection);
        assert_eq!(
            link,
            json!({"@id": "/api/organizers/5", "@type": "http://schema.org/Organizer"})
        );
    }

    #[test]
    fn test_scalar_in_link_field_is_rejected() {
        let value = FieldValue::Scalar(json!("not a link"));
        assert!(resolve_link(&catalog(), &config(), &value, LinkMode::Entity).is_none());
    }
}
