use serde_json::Value;

/// The two record types this tool audits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, clap::ValueEnum)]
pub enum ResourceKind {
    CustomFields,
    FieldSets,
}

impl ResourceKind {
    pub fn endpoint(self) -> &'static str {
        match self {
            ResourceKind::CustomFields => "custom_fields",
            ResourceKind::FieldSets => "field_sets",
        }
    }

    pub fn report_file_name(self) -> &'static str {
        match self {
            ResourceKind::CustomFields => "clio_custom_fields_audit.csv",
            ResourceKind::FieldSets => "clio_field_sets_audit.csv",
        }
    }
}

impl std::fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ResourceKind::CustomFields => write!(f, "custom fields"),
            ResourceKind::FieldSets => write!(f, "field sets"),
        }
    }
}

/// One custom field or field set definition, kept exactly as the API sent it.
#[derive(Debug, Clone, PartialEq)]
pub struct ResourceItem {
    pub name: String,
    pub value: Value,
}

/// A validated `{"data": [...]}` envelope.
#[derive(Debug, Clone)]
pub struct ResourceCollection {
    /// The payload as received, for archival.
    pub raw: Value,
    pub items: Vec<ResourceItem>,
}

impl ResourceCollection {
    /// Checks the envelope shape and extracts item names. Anything the
    /// comparator would otherwise trip over is reported as a reason string.
    pub fn from_payload(raw: Value) -> Result<Self, String> {
        let data = raw
            .get("data")
            .ok_or_else(|| "missing \"data\" key".to_string())?
            .as_array()
            .ok_or_else(|| "\"data\" is not an array".to_string())?;

        let items = data
            .iter()
            .enumerate()
            .map(|(index, item)| {
                let object = item
                    .as_object()
                    .ok_or_else(|| format!("item {index} is not an object"))?;
                let name = object
                    .get("name")
                    .and_then(Value::as_str)
                    .ok_or_else(|| format!("item {index} has no string \"name\""))?;
                Ok(ResourceItem {
                    name: name.to_string(),
                    value: item.clone(),
                })
            })
            .collect::<Result<Vec<_>, String>>()?;

        Ok(Self { raw, items })
    }
}
