// SPDX-License-Identifier: GPL-3.0-or-later

//! Deserialization helpers that keep one odd field from failing a whole response.

use serde::{Deserialize, Deserializer};

#[derive(Deserialize)]
#[serde(untagged)]
enum TextOrEntity {
    Text(String),
    Entity {
        #[serde(default)]
        resource: Option<String>,
        #[serde(default)]
        name: Option<String>,
    },
}

/// Accept either a plain string or an entity object such as an area
/// (`{"name": ...}`) or a url relation target (`{"resource": ...}`).
pub(crate) fn text_or_entity<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<TextOrEntity>::deserialize(deserializer)? {
        None => String::new(),
        Some(TextOrEntity::Text(text)) => text,
        Some(TextOrEntity::Entity { resource, name }) => resource.or(name).unwrap_or_default(),
    })
}

#[derive(Deserialize)]
#[serde(untagged)]
enum OneOrMany<T> {
    Many(Vec<T>),
    One(T),
}

/// Accept a single object or an array of them.
pub(crate) fn one_or_many<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(match Option::<OneOrMany<T>>::deserialize(deserializer)? {
        None => Vec::new(),
        Some(OneOrMany::Many(items)) => items,
        Some(OneOrMany::One(item)) => vec![item],
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_aux::field_attributes::deserialize_default_from_null;

    #[derive(Debug, Default, Deserialize)]
    #[serde(default)]
    struct Sample {
        #[serde(deserialize_with = "deserialize_default_from_null")]
        count: u32,
        #[serde(deserialize_with = "text_or_entity")]
        label: String,
        #[serde(deserialize_with = "one_or_many")]
        items: Vec<u8>,
    }

    fn sample(json: &str) -> Sample {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_null_and_missing_fall_back_to_default() {
        let p = sample(r#"{"count": null, "label": null, "items": null}"#);
        assert_eq!(p.count, 0);
        assert_eq!(p.label, "");
        assert!(p.items.is_empty());

        let p = sample("{}");
        assert_eq!(p.count, 0);
        assert!(p.items.is_empty());
    }

    #[test]
    fn test_label_from_string_or_object() {
        assert_eq!(sample(r#"{"label": "Oxford"}"#).label, "Oxford");
        assert_eq!(
            sample(r#"{"label": {"id": "x", "name": "United Kingdom"}}"#).label,
            "United Kingdom"
        );
        assert_eq!(
            sample(r#"{"label": {"id": "y", "resource": "https://radiohead.com/"}}"#).label,
            "https://radiohead.com/"
        );
        assert_eq!(sample(r#"{"label": {"id": "z"}}"#).label, "");
    }

    #[test]
    fn test_items_from_single_or_array() {
        assert_eq!(sample(r#"{"items": 7}"#).items, vec![7]);
        assert_eq!(sample(r#"{"items": [1, 2, 3]}"#).items, vec![1, 2, 3]);
        assert!(sample(r#"{"items": []}"#).items.is_empty());
    }

    #[test]
    fn test_wrong_shape_still_fails() {
        assert!(serde_json::from_str::<Sample>(r#"{"count": "many"}"#).is_err());
    }
}
