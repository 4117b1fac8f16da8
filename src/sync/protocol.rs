//! Wire types for the ICA offline shopping list API.
//!
//! Response envelopes are strict: a body without `Rows` (or `ShoppingLists`
//! for the list index) fails deserialization instead of reading as empty.

use serde::{Deserialize, Serialize};

/// Header carrying the session ticket, both on login responses and requests.
pub const TICKET_HEADER: &str = "AuthenticationTicket";

/// `SourceId` value marking a row that originated from this client.
pub const LOCAL_SOURCE_ID: i64 = -1;

/// Response of `GET /api/user/offlineshoppinglists`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShoppingListsEnvelope {
    #[serde(rename = "ShoppingLists")]
    pub shopping_lists: Vec<ShoppingListSummary>,
}

impl ShoppingListsEnvelope {
    /// Identifier of the list titled exactly `title`, if any
    pub fn find(&self, title: &str) -> Option<&str> {
        self.shopping_lists
            .iter()
            .find(|list| list.title == title)
            .map(|list| list.offline_id.as_str())
    }
}

/// One entry of the list index. Extra fields sent by the service are ignored.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShoppingListSummary {
    #[serde(rename = "Title")]
    pub title: String,
    #[serde(rename = "OfflineId")]
    pub offline_id: String,
}

/// Body of the list creation call
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateListRequest {
    #[serde(rename = "OfflineId")]
    pub offline_id: String,
    #[serde(rename = "Title")]
    pub title: String,
    #[serde(rename = "SortingStore")]
    pub sorting_store: i64,
}

/// Row set returned by both the list read and every sync call
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RowsEnvelope {
    #[serde(rename = "Rows")]
    pub rows: Vec<Row>,
}

/// A single item record as the service reports it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Row {
    #[serde(rename = "ProductName")]
    pub product_name: String,
    #[serde(rename = "OfflineId")]
    pub offline_id: String,
    #[serde(rename = "IsStrikedOver")]
    pub is_striked_over: bool,
    #[serde(rename = "SourceId")]
    pub source_id: i64,
}

/// Mutation submitted to `POST /api/user/offlineshoppinglists/{id}/sync`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SyncRequest {
    #[serde(rename = "CreatedRows")]
    Created(Vec<CreatedRow>),
    #[serde(rename = "ChangedRows")]
    Changed(Vec<ChangedRow>),
    #[serde(rename = "DeletedRows")]
    Deleted(Vec<String>),
}

/// A new row created locally
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreatedRow {
    #[serde(rename = "ProductName")]
    pub product_name: String,
    #[serde(rename = "IsStrikedOver")]
    pub is_striked_over: bool,
    #[serde(rename = "SourceId")]
    pub source_id: i64,
    #[serde(rename = "ArticleGroupId")]
    pub article_group_id: u32,
}

/// Change to an existing row. Only the fields being changed are sent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChangedRow {
    #[serde(rename = "OfflineId")]
    pub offline_id: String,
    #[serde(rename = "IsStrikedOver", skip_serializing_if = "Option::is_none", default)]
    pub is_striked_over: Option<bool>,
    #[serde(rename = "ProductName", skip_serializing_if = "Option::is_none", default)]
    pub product_name: Option<String>,
    #[serde(rename = "SourceId")]
    pub source_id: i64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_sync_request_wire_shape() {
        let created = SyncRequest::Created(vec![CreatedRow {
            product_name: "Kaffe".to_string(),
            is_striked_over: false,
            source_id: LOCAL_SOURCE_ID,
            article_group_id: 9,
        }]);
        assert_eq!(
            serde_json::to_value(&created).unwrap(),
            json!({"CreatedRows": [{
                "ProductName": "Kaffe",
                "IsStrikedOver": false,
                "SourceId": -1,
                "ArticleGroupId": 9
            }]})
        );

        let toggled = SyncRequest::Changed(vec![ChangedRow {
            offline_id: "abc".to_string(),
            is_striked_over: Some(true),
            product_name: None,
            source_id: LOCAL_SOURCE_ID,
        }]);
        assert_eq!(
            serde_json::to_value(&toggled).unwrap(),
            json!({"ChangedRows": [{"OfflineId": "abc", "IsStrikedOver": true, "SourceId": -1}]})
        );

        let deleted = SyncRequest::Deleted(vec!["a".to_string(), "b".to_string()]);
        assert_eq!(
            serde_json::to_value(&deleted).unwrap(),
            json!({"DeletedRows": ["a", "b"]})
        );
    }

    #[test]
    fn test_rows_envelope_requires_rows() {
        let missing = serde_json::from_value::<RowsEnvelope>(json!({"Title": "Groceries"}));
        assert!(missing.is_err());

        let empty: RowsEnvelope = serde_json::from_value(json!({"Rows": []})).unwrap();
        assert!(empty.rows.is_empty());
    }

    #[test]
    fn test_find_list_is_case_sensitive() {
        let lists: ShoppingListsEnvelope = serde_json::from_value(json!({
            "ShoppingLists": [
                {"Title": "groceries", "OfflineId": "lower", "SortingStore": 0},
                {"Title": "Groceries", "OfflineId": "exact", "SortingStore": 0}
            ]
        }))
        .unwrap();

        assert_eq!(lists.find("Groceries"), Some("exact"));
        assert_eq!(lists.find("GROCERIES"), None);
    }
}
