//! Common types used across the dashboard.
//!
//! # Categories
//!
//! - **Record Types** - the three collections as returned by the backend
//! - **UI Types** - active tab and banner message
//! - **Error Types** - API and form errors

use serde::{Deserialize, Deserializer};
use serde_json::Value;
use std::fmt;
use thiserror::Error;

// =============================================================================
// Record Types
// =============================================================================

/// Record identifier as assigned by the backend.
///
/// The backend is free to use numeric or string keys; both are kept verbatim.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Deserialize)]
#[serde(untagged)]
pub enum RecordId {
    /// Numeric identifier
    Number(i64),
    /// String identifier (e.g. a UUID or document id)
    Text(String),
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordId::Number(id) => write!(f, "{}", id),
            RecordId::Text(id) => f.write_str(id),
        }
    }
}

/// Decode a display field that may arrive as a string, number, bool or null.
fn lenient_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(text)) => text,
        Some(other) => other.to_string(),
    })
}

/// A liquor master item.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct MasterItem {
    #[serde(default)]
    pub id: Option<RecordId>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub name: String,
    #[serde(default, deserialize_with = "lenient_text")]
    pub category: String,
    /// Image URI as hosted by the backend
    #[serde(default, deserialize_with = "lenient_text")]
    pub image: String,
    #[serde(rename = "Aisle", default, deserialize_with = "lenient_text")]
    pub aisle: String,
    #[serde(rename = "Size", default, deserialize_with = "lenient_text")]
    pub size: String,
}

/// A descriptive liquor info record.
///
/// The backend answers with display keys (`"Alcohol Content"`, `"Best For"`)
/// while the create route takes underscore keys. Only the display keys are
/// read; any other key in the record is ignored.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct InfoRecord {
    #[serde(rename = "Id", default)]
    pub id: Option<RecordId>,
    #[serde(rename = "Name", default, deserialize_with = "lenient_text")]
    pub name: String,
    #[serde(rename = "Type", default, deserialize_with = "lenient_text")]
    pub kind: String,
    #[serde(rename = "Alcohol Content", default, deserialize_with = "lenient_text")]
    pub alcohol_content: String,
    #[serde(rename = "Country", default, deserialize_with = "lenient_text")]
    pub country: String,
    #[serde(rename = "Flavor", default, deserialize_with = "lenient_text")]
    pub flavor: String,
    #[serde(rename = "Age", default, deserialize_with = "lenient_text")]
    pub age: String,
    #[serde(rename = "Best For", default, deserialize_with = "lenient_text")]
    pub best_for: String,
}

/// A promotional offer.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct OfferRecord {
    #[serde(default)]
    pub id: Option<RecordId>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub category: String,
    #[serde(default, deserialize_with = "lenient_text")]
    pub size: String,
    #[serde(default, deserialize_with = "lenient_text")]
    pub brand: String,
    #[serde(default, deserialize_with = "lenient_text")]
    pub flavors: String,
}

// =============================================================================
// UI Types
// =============================================================================

/// The three mutually exclusive dashboard tabs, one per collection.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Tab {
    #[default]
    Master,
    Info,
    Offers,
}

impl Tab {
    /// All tabs in navigation order.
    pub const ALL: [Tab; 3] = [Tab::Master, Tab::Info, Tab::Offers];

    /// Navigation label.
    pub fn label(&self) -> &'static str {
        match self {
            Tab::Master => "Liquor Master",
            Tab::Info => "Liquor Info",
            Tab::Offers => "Offers",
        }
    }

    /// Record noun used in logs and failure messages.
    pub fn record_noun(&self) -> &'static str {
        match self {
            Tab::Master => "liquor master",
            Tab::Info => "liquor info",
            Tab::Offers => "offer",
        }
    }

    /// Label of the create button.
    pub fn submit_label(&self) -> &'static str {
        match self {
            Tab::Master => "Add Liquor Master",
            Tab::Info => "Add Liquor Info",
            Tab::Offers => "Add Offer",
        }
    }

    /// Banner text after a successful create.
    pub fn created_text(&self) -> String {
        match self {
            Tab::Offers => "Offer record added successfully!".to_string(),
            _ => format!("{} record added successfully!", self.label()),
        }
    }

    /// Banner text after a failed create.
    pub fn failed_text(&self) -> String {
        format!("Failed to add {} record.", self.record_noun())
    }
}

/// Banner message kind.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MessageKind {
    Success,
    Error,
}

/// Transient banner message. Replaced, never queued.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Message {
    pub kind: MessageKind,
    pub text: String,
}

impl Message {
    pub fn success(text: impl Into<String>) -> Self {
        Self { kind: MessageKind::Success, text: text.into() }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self { kind: MessageKind::Error, text: text.into() }
    }

    /// Get CSS class for styling.
    pub fn css_class(&self) -> &'static str {
        match self.kind {
            MessageKind::Success => "message success-message",
            MessageKind::Error => "message error-message",
        }
    }
}

// =============================================================================
// Error Types
// =============================================================================

/// Errors talking to the backend.
///
/// Every variant collapses into the same user-facing banner per operation;
/// the detail only reaches the console log.
#[derive(Clone, Debug, Error)]
pub enum ApiError {
    /// The request could not be built (body encoding, FormData).
    #[error("Failed to build request: {0}")]
    Request(String),

    /// Network/transport failure.
    #[error("HTTP request failed: {0}")]
    Transport(String),

    /// Non-success response status.
    #[error("Server error ({status}): {body}")]
    Status { status: u16, body: String },

    /// Response body was not the expected JSON.
    #[error("Failed to parse response: {0}")]
    Decode(String),
}

impl From<gloo_net::Error> for ApiError {
    fn from(err: gloo_net::Error) -> Self {
        ApiError::Transport(err.to_string())
    }
}

/// Result type alias for backend operations.
pub type ApiResult<T> = Result<T, ApiError>;

/// A create form that cannot be submitted yet.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum FormError {
    /// Required fields left empty, by wire key.
    #[error("Missing required fields: {}", .0.join(", "))]
    MissingFields(Vec<&'static str>),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_master_item_deserialization() {
        let json = r#"[
            {"id": 7, "name": "Glenfoo 12", "category": "Whiskey",
             "image": "https://cdn.example/glenfoo.png", "Aisle": "A3", "Size": "750ml"}
        ]"#;

        let items: Vec<MasterItem> = serde_json::from_str(json).unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].id, Some(RecordId::Number(7)));
        assert_eq!(items[0].aisle, "A3");
        assert_eq!(items[0].size, "750ml");
        assert_eq!(items[0].image, "https://cdn.example/glenfoo.png");
    }

    #[test]
    fn test_info_record_display_keys() {
        let json = r#"{
            "Id": "abc", "Name": "Glenfoo", "Type": "Single Malt",
            "Alcohol Content": 40, "Country": "Scotland", "Flavor": "Peat",
            "Age": 12, "Best For": "Neat"
        }"#;

        let record: InfoRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.id, Some(RecordId::Text("abc".into())));
        assert_eq!(record.kind, "Single Malt");
        assert_eq!(record.alcohol_content, "40");
        assert_eq!(record.age, "12");
        assert_eq!(record.best_for, "Neat");
    }

    #[test]
    fn test_info_record_with_both_key_spellings() {
        let json = r#"[{
            "Id": 1, "id": 9, "Name": "X",
            "Alcohol Content": "40%", "Alcohol_Content": "38%",
            "Best For": "Neat", "Best_For": "Cocktails"
        }]"#;

        let records: Vec<InfoRecord> = serde_json::from_str(json).unwrap();
        assert_eq!(records[0].id, Some(RecordId::Number(1)));
        assert_eq!(records[0].alcohol_content, "40%");
        assert_eq!(records[0].best_for, "Neat");
        assert_eq!(records[0].country, "");
    }

    #[test]
    fn test_info_record_ignores_submission_keys() {
        let json = r#"{"Id": 1, "Name": "X", "Alcohol_Content": "38%"}"#;

        let record: InfoRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.name, "X");
        assert_eq!(record.alcohol_content, "");
    }

    #[test]
    fn test_offer_nulls_and_missing_fields() {
        let json = r#"{"id": null, "category": "Rum", "size": null}"#;

        let offer: OfferRecord = serde_json::from_str(json).unwrap();
        assert_eq!(offer.id, None);
        assert_eq!(offer.category, "Rum");
        assert_eq!(offer.size, "");
        assert_eq!(offer.flavors, "");
    }

    #[test]
    fn test_tab_messages() {
        assert_eq!(Tab::Master.created_text(), "Liquor Master record added successfully!");
        assert_eq!(Tab::Info.failed_text(), "Failed to add liquor info record.");
        assert_eq!(Tab::Offers.created_text(), "Offer record added successfully!");
        assert_eq!(Tab::Offers.failed_text(), "Failed to add offer record.");
    }

    #[test]
    fn test_form_error_format() {
        let err = FormError::MissingFields(vec!["name", "image"]);
        assert_eq!(err.to_string(), "Missing required fields: name, image");
    }
}
