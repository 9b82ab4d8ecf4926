//! Field presence for partial updates: a JSON key can be missing, `null`, or carry a value.

use serde::{Deserialize, Deserializer};

/// Use with `#[serde(default)]` so a missing key deserializes to `Absent`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Patch<T> {
    Absent,
    Null,
    Value(T),
}

impl<T> Default for Patch<T> {
    fn default() -> Self {
        Patch::Absent
    }
}

impl<T> Patch<T> {
    /// Apply to an optional field: `Absent` keeps it, `Null` clears it.
    pub fn apply_to(self, field: &mut Option<T>) {
        match self {
            Patch::Absent => {}
            Patch::Null => *field = None,
            Patch::Value(v) => *field = Some(v),
        }
    }

    /// `None` when absent, otherwise the new column value (`Some(None)` for `null`).
    pub fn as_column(&self) -> Option<Option<&T>> {
        match self {
            Patch::Absent => None,
            Patch::Null => Some(None),
            Patch::Value(v) => Some(Some(v)),
        }
    }
}

impl<'de, T> Deserialize<'de> for Patch<T>
where
    T: Deserialize<'de>,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(match Option::<T>::deserialize(deserializer)? {
            Some(v) => Patch::Value(v),
            None => Patch::Null,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Deserialize)]
    struct Body {
        #[serde(default)]
        note: Patch<String>,
    }

    #[test]
    fn distinguishes_missing_null_and_value() {
        let missing: Body = serde_json::from_str("{}").unwrap();
        let null: Body = serde_json::from_str(r#"{"note": null}"#).unwrap();
        let value: Body = serde_json::from_str(r#"{"note": "hi"}"#).unwrap();
        assert_eq!(missing.note, Patch::Absent);
        assert_eq!(null.note, Patch::Null);
        assert_eq!(value.note, Patch::Value("hi".to_string()));
    }

    #[test]
    fn apply_to_leaves_absent_untouched() {
        let mut field = Some("kept".to_string());
        Patch::Absent.apply_to(&mut field);
        assert_eq!(field.as_deref(), Some("kept"));
        Patch::Null.apply_to(&mut field);
        assert_eq!(field, None);
        Patch::Value("new".to_string()).apply_to(&mut field);
        assert_eq!(field.as_deref(), Some("new"));
    }

    #[test]
    fn as_column_maps_presence() {
        assert_eq!(Patch::<u8>::Absent.as_column(), None);
        assert_eq!(Patch::<u8>::Null.as_column(), Some(None));
        assert_eq!(Patch::Value(3u8).as_column(), Some(Some(&3)));
    }
}
