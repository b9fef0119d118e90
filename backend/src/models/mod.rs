//! Catalogue records as stored and served by the development server.
//!
//! Field names follow the production API, including its mixed casing:
//! master items use `Aisle`/`Size`, info records answer with the display
//! keys `"Alcohol Content"` and `"Best For"` while the create route takes
//! `Alcohol_Content` and `Best_For`.

use serde::{Deserialize, Serialize};

/// Liquor master item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MasterItem {
    pub id: u64,
    pub name: String,
    pub category: String,
    /// Public URL of the uploaded image
    pub image: String,
    #[serde(rename = "Aisle")]
    pub aisle: String,
    #[serde(rename = "Size")]
    pub size: String,
}

/// Liquor info record, in response shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InfoRecord {
    #[serde(rename = "Id")]
    pub id: u64,
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "Type")]
    pub kind: String,
    #[serde(rename = "Alcohol Content")]
    pub alcohol_content: String,
    #[serde(rename = "Country")]
    pub country: String,
    #[serde(rename = "Flavor")]
    pub flavor: String,
    #[serde(rename = "Age")]
    pub age: String,
    #[serde(rename = "Best For")]
    pub best_for: String,
}

/// Promotional offer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OfferRecord {
    pub id: u64,
    pub category: String,
    pub size: String,
    pub brand: String,
    pub flavors: String,
}

/// Text part of a master item upload.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NewMasterItem {
    pub name: String,
    pub category: String,
    pub aisle: String,
    pub size: String,
}

/// Body of `POST /addliquorinfo`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NewInfoRecord {
    #[serde(rename = "Name", default)]
    pub name: String,
    #[serde(rename = "Type", default)]
    pub kind: String,
    #[serde(rename = "Alcohol_Content", default)]
    pub alcohol_content: String,
    #[serde(rename = "Country", default)]
    pub country: String,
    #[serde(rename = "Flavor", default)]
    pub flavor: String,
    #[serde(rename = "Age", default)]
    pub age: String,
    #[serde(rename = "Best_For", default)]
    pub best_for: String,
}

/// Body of `POST /addoffer`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NewOfferRecord {
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub size: String,
    #[serde(default)]
    pub brand: String,
    #[serde(default)]
    pub flavors: String,
}

/// Uploaded image bytes with their content type.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageUpload {
    /// Client-side file name, used for the extension only
    pub file_name: Option<String>,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

/// Names of the fields that are empty.
pub fn missing_fields<'a>(fields: &[(&'a str, &str)]) -> Vec<&'a str> {
    fields
        .iter()
        .filter(|(_, value)| value.is_empty())
        .map(|(key, _)| *key)
        .collect()
}

impl NewMasterItem {
    pub fn missing(&self) -> Vec<&'static str> {
        missing_fields(&[
            ("name", self.name.as_str()),
            ("category", self.category.as_str()),
            ("Aisle", self.aisle.as_str()),
            ("Size", self.size.as_str()),
        ])
    }
}

impl NewInfoRecord {
    pub fn missing(&self) -> Vec<&'static str> {
        missing_fields(&[
            ("Name", self.name.as_str()),
            ("Type", self.kind.as_str()),
            ("Alcohol_Content", self.alcohol_content.as_str()),
            ("Country", self.country.as_str()),
            ("Flavor", self.flavor.as_str()),
            ("Age", self.age.as_str()),
            ("Best_For", self.best_for.as_str()),
        ])
    }
}

impl NewOfferRecord {
    pub fn missing(&self) -> Vec<&'static str> {
        missing_fields(&[
            ("category", self.category.as_str()),
            ("size", self.size.as_str()),
            ("brand", self.brand.as_str()),
            ("flavors", self.flavors.as_str()),
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_info_record_response_keys() {
        let record = InfoRecord {
            id: 1,
            name: "Glenfoo".into(),
            kind: "Single Malt".into(),
            alcohol_content: "40%".into(),
            country: "Scotland".into(),
            flavor: "Peat".into(),
            age: "12".into(),
            best_for: "Neat".into(),
        };

        let value = serde_json::to_value(&record).unwrap();
        assert_eq!(value["Id"], 1);
        assert_eq!(value["Alcohol Content"], "40%");
        assert_eq!(value["Best For"], "Neat");
        assert!(value.get("Alcohol_Content").is_none());
    }

    #[test]
    fn test_new_info_record_submission_keys() {
        let body = json!({
            "Name": "Glenfoo", "Type": "Single Malt", "Alcohol_Content": "40%",
            "Country": "Scotland", "Flavor": "Peat", "Age": "12", "Best_For": "Neat"
        });

        let record: NewInfoRecord = serde_json::from_value(body).unwrap();
        assert_eq!(record.alcohol_content, "40%");
        assert!(record.missing().is_empty());
    }

    #[test]
    fn test_missing_offer_fields() {
        let offer = NewOfferRecord { category: "Gin".into(), brand: "  ".into(), ..Default::default() };
        assert_eq!(offer.missing(), vec!["size", "flavors"]);
    }

    #[test]
    fn test_master_item_keys() {
        let item = MasterItem {
            id: 3,
            name: "Glenfoo".into(),
            category: "Whiskey".into(),
            image: "http://localhost:3000/images/a.png".into(),
            aisle: "A1".into(),
            size: "1L".into(),
        };

        let value = serde_json::to_value(&item).unwrap();
        assert_eq!(value["Aisle"], "A1");
        assert_eq!(value["Size"], "1L");
        assert_eq!(value["id"], 3);
    }
}
