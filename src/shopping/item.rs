use serde::{Deserialize, Serialize};

use crate::sync::protocol::{ChangedRow, Row, LOCAL_SOURCE_ID};
use crate::sync::SyncError;

/// A shopping list entry as exposed to the host
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    /// Display name, capitalized
    pub name: String,
    /// Remote `OfflineId`, stable across syncs
    pub id: String,
    pub complete: bool,
    /// -1 when the row was created by this client
    pub source_id: i64,
}

impl From<Row> for Item {
    fn from(row: Row) -> Self {
        Self {
            name: capitalize(&row.product_name),
            id: row.offline_id,
            complete: row.is_striked_over,
            source_id: row.source_id,
        }
    }
}

/// Upper-case the first character and lower-case the rest
pub fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}

/// Requested change to an item. `complete` wins when both fields are set.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ItemUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub complete: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl ItemUpdate {
    pub fn complete(done: bool) -> Self {
        Self {
            complete: Some(done),
            name: None,
        }
    }

    pub fn rename(name: impl Into<String>) -> Self {
        Self {
            complete: None,
            name: Some(name.into()),
        }
    }

    /// Row change for `item_id`, or [`SyncError::InvalidUpdate`] if nothing is set
    pub fn to_change(&self, item_id: &str) -> Result<ChangedRow, SyncError> {
        if let Some(done) = self.complete {
            return Ok(ChangedRow {
                offline_id: item_id.to_string(),
                is_striked_over: Some(done),
                product_name: None,
                source_id: LOCAL_SOURCE_ID,
            });
        }

        match &self.name {
            Some(name) if !name.is_empty() => Ok(ChangedRow {
                offline_id: item_id.to_string(),
                is_striked_over: None,
                product_name: Some(name.clone()),
                source_id: LOCAL_SOURCE_ID,
            }),
            _ => Err(SyncError::InvalidUpdate),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_row_mapping() {
        let row: Row = serde_json::from_value(json!({
            "ProductName": "milk",
            "OfflineId": "abc",
            "IsStrikedOver": false,
            "SourceId": -1
        }))
        .unwrap();

        assert_eq!(
            Item::from(row),
            Item {
                name: "Milk".to_string(),
                id: "abc".to_string(),
                complete: false,
                source_id: -1,
            }
        );
    }

    #[test]
    fn test_capitalize() {
        assert_eq!(capitalize("milk"), "Milk");
        assert_eq!(capitalize("HUSHÅLLSPAPPER"), "Hushållspapper");
        assert_eq!(capitalize("ägg och mjölk"), "Ägg och mjölk");
        assert_eq!(capitalize(""), "");
    }

    #[test]
    fn test_item_serializes_camel_case() {
        let item = Item {
            name: "Kaffe".to_string(),
            id: "r1".to_string(),
            complete: true,
            source_id: -1,
        };
        assert_eq!(
            serde_json::to_value(&item).unwrap(),
            json!({"name": "Kaffe", "id": "r1", "complete": true, "sourceId": -1})
        );
    }

    #[test]
    fn test_update_branches() {
        let done = ItemUpdate::complete(false).to_change("r1").unwrap();
        assert_eq!(done.is_striked_over, Some(false));
        assert_eq!(done.product_name, None);

        let both = ItemUpdate {
            complete: Some(true),
            name: Some("Te".to_string()),
        };
        let change = both.to_change("r1").unwrap();
        assert_eq!(change.is_striked_over, Some(true));
        assert_eq!(change.product_name, None);

        let renamed = ItemUpdate::rename("Te").to_change("r1").unwrap();
        assert_eq!(renamed.product_name.as_deref(), Some("Te"));
        assert_eq!(renamed.is_striked_over, None);

        assert!(matches!(
            ItemUpdate::default().to_change("r1"),
            Err(SyncError::InvalidUpdate)
        ));
    }
}
