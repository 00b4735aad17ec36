//! The canonical 14-column feed row.

use serde::{Deserialize, Serialize};

use crate::error::{ModelError, Result};

/// Output column names, in output order.
pub const CANONICAL_COLUMNS: [&str; 14] = [
    "id",
    "title",
    "description",
    "link",
    "image_link",
    "availability",
    "price",
    "google_product_category",
    "brand",
    "mpn",
    "condition",
    "color",
    "age_group",
    "gender",
];

/// One item of the combined feed.
///
/// Every field is always present; an unknown value is an empty string.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CanonicalRow {
    pub id: String,
    pub title: String,
    pub description: String,
    pub link: String,
    pub image_link: String,
    pub availability: String,
    pub price: String,
    pub google_product_category: String,
    pub brand: String,
    pub mpn: String,
    pub condition: String,
    pub color: String,
    pub age_group: String,
    pub gender: String,
}

impl CanonicalRow {
    /// Field values in [`CANONICAL_COLUMNS`] order.
    pub fn fields(&self) -> [&str; 14] {
        [
            &self.id,
            &self.title,
            &self.description,
            &self.link,
            &self.image_link,
            &self.availability,
            &self.price,
            &self.google_product_category,
            &self.brand,
            &self.mpn,
            &self.condition,
            &self.color,
            &self.age_group,
            &self.gender,
        ]
    }

    /// Rebuilds a row from values in [`CANONICAL_COLUMNS`] order.
    pub fn from_fields<I, S>(values: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let values: Vec<String> = values.into_iter().map(Into::into).collect();
        let found = values.len();
        let Ok([
            id,
            title,
            description,
            link,
            image_link,
            availability,
            price,
            google_product_category,
            brand,
            mpn,
            condition,
            color,
            age_group,
            gender,
        ]) = <[String; 14]>::try_from(values)
        else {
            return Err(ModelError::FieldCount {
                expected: CANONICAL_COLUMNS.len(),
                found,
            });
        };
        Ok(Self {
            id,
            title,
            description,
            link,
            image_link,
            availability,
            price,
            google_product_category,
            brand,
            mpn,
            condition,
            color,
            age_group,
            gender,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fields_round_trip() {
        let row = CanonicalRow {
            id: "123CA".into(),
            title: "t".into(),
            price: "10.00 CAD".into(),
            mpn: "123CA".into(),
            ..CanonicalRow::default()
        };
        let rebuilt = CanonicalRow::from_fields(row.fields()).unwrap();
        assert_eq!(rebuilt, row);
    }

    #[test]
    fn from_fields_rejects_short_records() {
        let err = CanonicalRow::from_fields(["a", "b"]).unwrap_err();
        assert_eq!(err, ModelError::FieldCount { expected: 14, found: 2 });
    }

    #[test]
    fn serde_uses_column_names() {
        let json = serde_json::to_value(CanonicalRow::default()).unwrap();
        let object = json.as_object().unwrap();
        for column in CANONICAL_COLUMNS {
            assert!(object.contains_key(column), "missing {column}");
        }
    }
}
