//! Create-form state for the three collections.
//!
//! Each form keeps the user's in-progress input. Text fields are addressed
//! through a small field enum whose [`FormField::key`] is the wire key, which
//! doubles as the on-screen label.

use serde::Serialize;

use crate::types::FormError;

/// A text field of one of the create forms.
pub trait FormField: Copy + 'static {
    /// Wire key of the field.
    fn key(self) -> &'static str;
}

/// A form made of required text fields.
pub trait TextForm {
    type Field: FormField;

    /// Text fields in wire order.
    const FIELDS: &'static [Self::Field];

    fn value(&self, field: Self::Field) -> &str;

    fn value_mut(&mut self, field: Self::Field) -> &mut String;

    fn set(&mut self, field: Self::Field, value: String) {
        *self.value_mut(field) = value;
    }

    /// Wire keys of the text fields that are still empty.
    fn missing_text_fields(&self) -> Vec<&'static str> {
        Self::FIELDS
            .iter()
            .filter(|field| self.value(**field).is_empty())
            .map(|field| field.key())
            .collect()
    }
}

// =============================================================================
// Liquor master
// =============================================================================

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MasterField {
    Name,
    Category,
    Aisle,
    Size,
}

impl FormField for MasterField {
    fn key(self) -> &'static str {
        match self {
            MasterField::Name => "name",
            MasterField::Category => "category",
            MasterField::Aisle => "Aisle",
            MasterField::Size => "Size",
        }
    }
}

/// One input of the master form, in display order.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MasterInput {
    Text(MasterField),
    Image,
}

/// Display order of the master form: the image sits between category and aisle.
pub const MASTER_LAYOUT: [MasterInput; 5] = [
    MasterInput::Text(MasterField::Name),
    MasterInput::Text(MasterField::Category),
    MasterInput::Image,
    MasterInput::Text(MasterField::Aisle),
    MasterInput::Text(MasterField::Size),
];

/// Wire key of the image part.
pub const IMAGE_KEY: &str = "image";

/// In-progress liquor master item. `I` is the selected image file.
#[derive(Clone, Debug, PartialEq)]
pub struct MasterForm<I> {
    pub name: String,
    pub category: String,
    pub image: Option<I>,
    pub aisle: String,
    pub size: String,
}

impl<I> Default for MasterForm<I> {
    fn default() -> Self {
        Self {
            name: String::new(),
            category: String::new(),
            image: None,
            aisle: String::new(),
            size: String::new(),
        }
    }
}

impl<I> TextForm for MasterForm<I> {
    type Field = MasterField;

    const FIELDS: &'static [MasterField] = &[
        MasterField::Name,
        MasterField::Category,
        MasterField::Aisle,
        MasterField::Size,
    ];

    fn value(&self, field: MasterField) -> &str {
        match field {
            MasterField::Name => &self.name,
            MasterField::Category => &self.category,
            MasterField::Aisle => &self.aisle,
            MasterField::Size => &self.size,
        }
    }

    fn value_mut(&mut self, field: MasterField) -> &mut String {
        match field {
            MasterField::Name => &mut self.name,
            MasterField::Category => &mut self.category,
            MasterField::Aisle => &mut self.aisle,
            MasterField::Size => &mut self.size,
        }
    }
}

impl<I: Clone> MasterForm<I> {
    /// Build the multipart payload, or list what is missing in display order.
    pub fn upload(&self) -> Result<MasterUpload<I>, FormError> {
        let missing: Vec<&'static str> = MASTER_LAYOUT
            .iter()
            .filter_map(|input| match input {
                MasterInput::Text(field) if self.value(*field).is_empty() => {
                    Some(field.key())
                }
                MasterInput::Image if self.image.is_none() => Some(IMAGE_KEY),
                _ => None,
            })
            .collect();

        match &self.image {
            Some(image) if missing.is_empty() => Ok(MasterUpload {
                name: self.name.clone(),
                category: self.category.clone(),
                aisle: self.aisle.clone(),
                size: self.size.clone(),
                image: image.clone(),
            }),
            _ => Err(FormError::MissingFields(missing)),
        }
    }
}

/// A complete master item submission, image included.
#[derive(Clone, Debug, PartialEq)]
pub struct MasterUpload<I> {
    pub name: String,
    pub category: String,
    pub aisle: String,
    pub size: String,
    pub image: I,
}

// =============================================================================
// Liquor info
// =============================================================================

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InfoField {
    Name,
    Type,
    AlcoholContent,
    Country,
    Flavor,
    Age,
    BestFor,
}

impl FormField for InfoField {
    fn key(self) -> &'static str {
        match self {
            InfoField::Name => "Name",
            InfoField::Type => "Type",
            InfoField::AlcoholContent => "Alcohol_Content",
            InfoField::Country => "Country",
            InfoField::Flavor => "Flavor",
            InfoField::Age => "Age",
            InfoField::BestFor => "Best_For",
        }
    }
}

/// In-progress liquor info record, serialized as the create route's JSON body.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct InfoForm {
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "Type")]
    pub kind: String,
    #[serde(rename = "Alcohol_Content")]
    pub alcohol_content: String,
    #[serde(rename = "Country")]
    pub country: String,
    #[serde(rename = "Flavor")]
    pub flavor: String,
    #[serde(rename = "Age")]
    pub age: String,
    #[serde(rename = "Best_For")]
    pub best_for: String,
}

impl TextForm for InfoForm {
    type Field = InfoField;

    const FIELDS: &'static [InfoField] = &[
        InfoField::Name,
        InfoField::Type,
        InfoField::AlcoholContent,
        InfoField::Country,
        InfoField::Flavor,
        InfoField::Age,
        InfoField::BestFor,
    ];

    fn value(&self, field: InfoField) -> &str {
        match field {
            InfoField::Name => &self.name,
            InfoField::Type => &self.kind,
            InfoField::AlcoholContent => &self.alcohol_content,
            InfoField::Country => &self.country,
            InfoField::Flavor => &self.flavor,
            InfoField::Age => &self.age,
            InfoField::BestFor => &self.best_for,
        }
    }

    fn value_mut(&mut self, field: InfoField) -> &mut String {
        match field {
            InfoField::Name => &mut self.name,
            InfoField::Type => &mut self.kind,
            InfoField::AlcoholContent => &mut self.alcohol_content,
            InfoField::Country => &mut self.country,
            InfoField::Flavor => &mut self.flavor,
            InfoField::Age => &mut self.age,
            InfoField::BestFor => &mut self.best_for,
        }
    }
}

// =============================================================================
// Offers
// =============================================================================

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OfferField {
    Category,
    Size,
    Brand,
    Flavors,
}

impl FormField for OfferField {
    fn key(self) -> &'static str {
        match self {
            OfferField::Category => "category",
            OfferField::Size => "size",
            OfferField::Brand => "brand",
            OfferField::Flavors => "flavors",
        }
    }
}

/// In-progress offer, serialized as the create route's JSON body.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct OfferForm {
    pub category: String,
    pub size: String,
    pub brand: String,
    pub flavors: String,
}

impl TextForm for OfferForm {
    type Field = OfferField;

    const FIELDS: &'static [OfferField] = &[
        OfferField::Category,
        OfferField::Size,
        OfferField::Brand,
        OfferField::Flavors,
    ];

    fn value(&self, field: OfferField) -> &str {
        match field {
            OfferField::Category => &self.category,
            OfferField::Size => &self.size,
            OfferField::Brand => &self.brand,
            OfferField::Flavors => &self.flavors,
        }
    }

    fn value_mut(&mut self, field: OfferField) -> &mut String {
        match field {
            OfferField::Category => &mut self.category,
            OfferField::Size => &mut self.size,
            OfferField::Brand => &mut self.brand,
            OfferField::Flavors => &mut self.flavors,
        }
    }
}

/// Validate a JSON form before it is sent.
pub fn require_complete<F: TextForm + Clone>(form: &F) -> Result<F, FormError> {
    let missing = form.missing_text_fields();
    if missing.is_empty() {
        Ok(form.clone())
    } else {
        Err(FormError::MissingFields(missing))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_info_form_wire_keys() {
        let mut form = InfoForm::default();
        form.set(InfoField::Name, "Glenfoo".into());
        form.set(InfoField::AlcoholContent, "40%".into());
        form.set(InfoField::BestFor, "Neat".into());

        let body = serde_json::to_value(&form).unwrap();
        assert_eq!(
            body,
            json!({
                "Name": "Glenfoo",
                "Type": "",
                "Alcohol_Content": "40%",
                "Country": "",
                "Flavor": "",
                "Age": "",
                "Best_For": "Neat"
            })
        );
    }

    #[test]
    fn test_offer_form_wire_keys() {
        let form = OfferForm {
            category: "Whiskey".into(),
            size: "750ml".into(),
            brand: "Acme".into(),
            flavors: "Smoky".into(),
        };

        let body = serde_json::to_value(&form).unwrap();
        assert_eq!(
            body,
            json!({"category": "Whiskey", "size": "750ml", "brand": "Acme", "flavors": "Smoky"})
        );
    }

    #[test]
    fn test_only_empty_fields_are_missing() {
        let mut form = OfferForm::default();
        form.set(OfferField::Category, "Gin".into());
        form.set(OfferField::Size, "   ".into());

        assert_eq!(form.missing_text_fields(), vec!["brand", "flavors"]);
        assert_eq!(
            require_complete(&form),
            Err(FormError::MissingFields(vec!["brand", "flavors"]))
        );

        form.set(OfferField::Brand, " ".into());
        form.set(OfferField::Flavors, "\t".into());
        assert_eq!(require_complete(&form).map(|f| f.size), Ok("   ".to_string()));
    }

    #[test]
    fn test_master_upload_requires_image() {
        let form = MasterForm::<String> {
            name: "Glenfoo".into(),
            category: "Whiskey".into(),
            image: None,
            aisle: "A1".into(),
            size: "1L".into(),
        };

        assert_eq!(form.upload(), Err(FormError::MissingFields(vec!["image"])));
    }

    #[test]
    fn test_master_missing_fields_follow_layout() {
        let mut form = MasterForm::<String>::default();
        form.set(MasterField::Category, "Rum".into());

        assert_eq!(
            form.upload(),
            Err(FormError::MissingFields(vec!["name", "image", "Aisle", "Size"]))
        );
    }

    #[test]
    fn test_master_upload_complete() {
        let form = MasterForm {
            name: "Glenfoo".into(),
            category: "Whiskey".into(),
            image: Some("bottle.png".to_string()),
            aisle: "A1".into(),
            size: "1L".into(),
        };

        let upload = form.upload().unwrap();
        assert_eq!(upload.image, "bottle.png");
        assert_eq!(upload.aisle, "A1");
    }
}
