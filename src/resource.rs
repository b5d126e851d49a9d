//! Access to domain objects
//!
//! Builders never reflect over types; a domain type implements
//! `HydraResource` to name its class and hand out field values by name.

use serde::Serialize;
use serde_json::Value;

/// A domain object that can be rendered as a Hydra document
pub trait HydraResource {
    /// Simple class name, used as catalog key and for default IRIs
    fn class_name(&self) -> &str;

    /// Value of a declared field
    ///
    /// `None` means the field cannot be read; the builders omit it and log.
    fn field(&self, name: &str) -> Option<FieldValue<'_>>;

    /// Representation used when the class carries no hypermedia metadata
    fn plain(&self) -> String {
        self.class_name().to_string()
    }
}

/// Value of one field as seen by the builders
pub enum FieldValue<'a> {
    /// Any JSON value; used for plain fields and the identifier
    Scalar(Value),
    /// A single related entity, or none
    Link(Option<&'a dyn HydraResource>),
    /// An ordered group of related entities
    Links(Vec<&'a dyn HydraResource>),
}

impl<'a> FieldValue<'a> {
    /// Serialize a plain value; unserializable values read as missing
    pub fn scalar<T: Serialize + ?Sized>(value: &T) -> Option<Self> {
        match serde_json::to_value(value) {
            Ok(v) => Some(FieldValue::Scalar(v)),
            Err(e) => {
                tracing::warn!(error = %e, "field value is not serializable");
                None
            }
        }
    }

    pub fn link<R: HydraResource>(value: Option<&'a R>) -> Self {
        FieldValue::Link(value.map(|r| r as &dyn HydraResource))
    }

    pub fn links<R, I>(values: I) -> Self
    where
        R: HydraResource + 'a,
        I: IntoIterator<Item = &'a R>,
    {
        FieldValue::Links(
            values
                .into_iter()
                .map(|r| r as &dyn HydraResource)
                .collect(),
        )
    }

    /// Short name of the variant, for log output
    pub fn kind(&self) -> &'static str {
        match self {
            FieldValue::Scalar(_) => "scalar",
            FieldValue::Link(_) => "link",
            FieldValue::Links(_) => "links",
        }
    }
}

impl std::fmt::Debug for FieldValue<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FieldValue::Scalar(v) => f.debug_tuple("Scalar").field(v).finish(),
            FieldValue::Link(None) => f.write_str("Link(None)"),
            FieldValue::Link(Some(r)) => write!(f, "Link({})", r.class_name()),
            FieldValue::Links(rs) => f
                .debug_list()
                .entries(rs.iter().map(|r| r.class_name()))
                .finish(),
        }
    }
}
