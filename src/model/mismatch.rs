use indexmap::IndexMap;
use serde::Serialize;
use serde_json::Value;

/// A name whose Manage record differs from, or is missing in, Grow.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Mismatch {
    pub manage: Value,
    /// `None` when Grow has no record with this name; serializes as `null`.
    pub grow: Option<Value>,
}

/// Mismatches keyed by name, in the order names first appear in Manage.
pub type MismatchReport = IndexMap<String, Mismatch>;
