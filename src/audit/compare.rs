use indexmap::IndexMap;
use serde_json::Value;

use crate::model::{Mismatch, MismatchReport, ResourceCollection};

/// Name to item lookup. A repeated name keeps the position of its first
/// occurrence but the value of its last.
pub fn index_by_name(collection: &ResourceCollection) -> IndexMap<&str, &Value> {
    let mut index = IndexMap::with_capacity(collection.items.len());
    for item in &collection.items {
        index.insert(item.name.as_str(), &item.value);
    }
    index
}

/// Reports every Manage name that is missing in Grow or whose record is not
/// structurally equal. The scan is anchored on the left side only: names
/// that exist solely in `grow` never appear in the result.
pub fn compare(manage: &ResourceCollection, grow: &ResourceCollection) -> MismatchReport {
    let grow_index = index_by_name(grow);

    index_by_name(manage)
        .into_iter()
        .filter_map(|(name, manage_item)| {
            let grow_item = grow_index.get(name).copied();
            if grow_item == Some(manage_item) {
                return None;
            }
            Some((
                name.to_string(),
                Mismatch {
                    manage: manage_item.clone(),
                    grow: grow_item.cloned(),
                },
            ))
        })
        .collect()
}

/// Names only `grow` has. Diagnostic only; not part of the audit result.
pub fn right_only_names<'a>(
    manage: &ResourceCollection,
    grow: &'a ResourceCollection,
) -> Vec<&'a str> {
    let manage_index = index_by_name(manage);
    index_by_name(grow)
        .into_keys()
        .filter(|name| !manage_index.contains_key(name))
        .collect()
}
