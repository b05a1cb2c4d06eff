//! Lenient deserializers for request parameters.
//!
//! Clients send ids either as JSON numbers or as numeric strings; both are accepted.
//! Anything else is treated as an absent value so that handlers report the
//! missing parameter instead of a body parse failure.

use serde::{Deserialize, Deserializer};

#[derive(Deserialize)]
#[serde(untagged)]
enum RawId {
    Number(i64),
    Text(String),
    Other(serde_json::Value),
}

impl RawId {
    fn into_id(self) -> Option<i32> {
        match self {
            Self::Number(n) => i32::try_from(n).ok(),
            Self::Text(s) => s.trim().parse().ok(),
            Self::Other(_) => None,
        }
    }
}

/// ## Summary
/// Deserializes an optional id from a number or a numeric string.
///
/// ## Errors
/// Never fails on malformed ids; only propagates errors from the underlying deserializer.
pub fn opt_id<'de, D>(deserializer: D) -> Result<Option<i32>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<RawId>::deserialize(deserializer)?;
    Ok(raw.and_then(RawId::into_id))
}

/// ## Summary
/// Deserializes a list of ids, dropping entries that are not ids.
///
/// ## Errors
/// Returns an error if the value is present but not a list.
pub fn id_list<'de, D>(deserializer: D) -> Result<Vec<i32>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<Vec<RawId>>::deserialize(deserializer)?;
    Ok(raw
        .unwrap_or_default()
        .into_iter()
        .filter_map(RawId::into_id)
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Deserialize)]
    struct Probe {
        #[serde(default, deserialize_with = "opt_id")]
        id: Option<i32>,
        #[serde(default, deserialize_with = "id_list")]
        uids: Vec<i32>,
    }

    fn probe(json: &str) -> Probe {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_numbers_and_strings() {
        let p = probe(r#"{"id": "12", "uids": [1, "2", " 3 "]}"#);
        assert_eq!(p.id, Some(12));
        assert_eq!(p.uids, vec![1, 2, 3]);
    }

    #[test]
    fn test_missing_and_malformed() {
        let p = probe(r#"{"uids": ["x", null, 4]}"#);
        assert_eq!(p.id, None);
        assert_eq!(p.uids, vec![4]);

        let p = probe(r#"{"id": "abc", "uids": null}"#);
        assert_eq!(p.id, None);
        assert!(p.uids.is_empty());

        let p = probe(r#"{"id": null}"#);
        assert_eq!(p.id, None);
    }
}
