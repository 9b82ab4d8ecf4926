//! Restaurant record and its create/update schemas.
//!
//! Two column sets exist side by side: `title`/`description` and the
//! `revo_*` integration keys. Inputs also accept `name` for `title`, and
//! responses carry the title under both keys.

use crate::patch::Patch;
use serde::ser::SerializeStruct;
use serde::{Deserialize, Serialize, Serializer};
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, sqlx::FromRow, ToSchema)]
pub struct Restaurant {
    pub id: Uuid,
    pub owner_id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub revo_tenant: Option<String>,
    pub revo_client_key: Option<String>,
    pub revo_api_key: Option<String>,
}

impl Serialize for Restaurant {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut s = serializer.serialize_struct("Restaurant", 8)?;
        s.serialize_field("id", &self.id)?;
        s.serialize_field("owner_id", &self.owner_id)?;
        s.serialize_field("title", &self.title)?;
        s.serialize_field("name", &self.title)?;
        s.serialize_field("description", &self.description)?;
        s.serialize_field("revo_tenant", &self.revo_tenant)?;
        s.serialize_field("revo_client_key", &self.revo_client_key)?;
        s.serialize_field("revo_api_key", &self.revo_api_key)?;
        s.end()
    }
}

/// Body of `POST /restaurants/`. Any `owner_id` in the body is ignored.
#[derive(Clone, Debug, Deserialize, ToSchema)]
pub struct RestaurantCreate {
    #[serde(alias = "name")]
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub revo_tenant: Option<String>,
    #[serde(default)]
    pub revo_client_key: Option<String>,
    #[serde(default)]
    pub revo_api_key: Option<String>,
}

impl RestaurantCreate {
    pub fn into_restaurant(self, owner_id: Uuid) -> Restaurant {
        Restaurant {
            id: Uuid::new_v4(),
            owner_id,
            title: self.title,
            description: self.description,
            revo_tenant: self.revo_tenant,
            revo_client_key: self.revo_client_key,
            revo_api_key: self.revo_api_key,
        }
    }
}

/// Body of `PUT /restaurants/{id}`. Only keys present in the JSON are applied.
#[derive(Clone, Debug, Default, Deserialize, ToSchema)]
pub struct RestaurantUpdate {
    #[serde(default, alias = "name")]
    #[schema(value_type = Option<String>)]
    pub title: Patch<String>,
    #[serde(default)]
    #[schema(value_type = Option<String>)]
    pub description: Patch<String>,
    #[serde(default)]
    #[schema(value_type = Option<String>)]
    pub revo_tenant: Patch<String>,
    #[serde(default)]
    #[schema(value_type = Option<String>)]
    pub revo_client_key: Patch<String>,
    #[serde(default)]
    #[schema(value_type = Option<String>)]
    pub revo_api_key: Patch<String>,
}

impl RestaurantUpdate {
    /// Merge into `target`. A `null` title leaves the title as is; validation rejects it earlier.
    pub fn apply_to(&self, target: &mut Restaurant) {
        if let Patch::Value(title) = &self.title {
            target.title = title.clone();
        }
        self.description.clone().apply_to(&mut target.description);
        self.revo_tenant.clone().apply_to(&mut target.revo_tenant);
        self.revo_client_key.clone().apply_to(&mut target.revo_client_key);
        self.revo_api_key.clone().apply_to(&mut target.revo_api_key);
    }

    /// Columns present in the body with their new values, in table order.
    /// A `null` title is skipped like in `apply_to`.
    pub fn changed_columns(&self) -> Vec<(&'static str, Option<&str>)> {
        let mut columns = Vec::new();
        if let Patch::Value(title) = &self.title {
            columns.push(("title", Some(title.as_str())));
        }
        for (name, patch) in [
            ("description", &self.description),
            ("revo_tenant", &self.revo_tenant),
            ("revo_client_key", &self.revo_client_key),
            ("revo_api_key", &self.revo_api_key),
        ] {
            if let Some(value) = patch.as_column() {
                columns.push((name, value.map(String::as_str)));
            }
        }
        columns
    }
}

/// One page of restaurants plus the total visible to the caller.
#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct RestaurantsPublic {
    pub data: Vec<Restaurant>,
    pub count: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stored() -> Restaurant {
        Restaurant {
            id: Uuid::new_v4(),
            owner_id: Uuid::new_v4(),
            title: "Trattoria".into(),
            description: Some("family run".into()),
            revo_tenant: Some("trattoria".into()),
            revo_client_key: None,
            revo_api_key: None,
        }
    }

    #[test]
    fn create_accepts_legacy_name_and_ignores_owner() {
        let body = serde_json::json!({
            "name": "Foo",
            "revo_tenant": "pizzeria",
            "owner_id": Uuid::new_v4(),
        });
        let input: RestaurantCreate = serde_json::from_value(body).unwrap();
        let owner = Uuid::new_v4();
        let r = input.into_restaurant(owner);
        assert_eq!(r.title, "Foo");
        assert_eq!(r.owner_id, owner);
        assert_eq!(r.revo_tenant.as_deref(), Some("pizzeria"));
        assert_eq!(r.description, None);
    }

    #[test]
    fn update_touches_only_present_fields() {
        let mut r = stored();
        let before = r.clone();
        let patch: RestaurantUpdate =
            serde_json::from_value(serde_json::json!({ "revo_client_key": "abc", "description": null }))
                .unwrap();
        patch.apply_to(&mut r);
        assert_eq!(r.title, before.title);
        assert_eq!(r.revo_tenant, before.revo_tenant);
        assert_eq!(r.revo_client_key.as_deref(), Some("abc"));
        assert_eq!(r.description, None);
    }

    #[test]
    fn changed_columns_lists_only_sent_keys() {
        let patch: RestaurantUpdate = serde_json::from_value(
            serde_json::json!({ "name": "Bistro", "description": null, "revo_api_key": "k" }),
        )
        .unwrap();
        assert_eq!(
            patch.changed_columns(),
            vec![("title", Some("Bistro")), ("description", None), ("revo_api_key", Some("k"))]
        );
        assert!(RestaurantUpdate::default().changed_columns().is_empty());
    }

    #[test]
    fn serializes_title_under_name_too() {
        let r = stored();
        let json = serde_json::to_value(&r).unwrap();
        assert_eq!(json["title"], "Trattoria");
        assert_eq!(json["name"], "Trattoria");
        let back: Restaurant = serde_json::from_value(json).unwrap();
        assert_eq!(back, r);
    }

    #[test]
    fn reapplying_same_update_is_idempotent() {
        let body = serde_json::json!({ "title": "Osteria", "revo_api_key": "k" });
        let mut once = stored();
        serde_json::from_value::<RestaurantUpdate>(body.clone()).unwrap().apply_to(&mut once);
        let mut twice = once.clone();
        serde_json::from_value::<RestaurantUpdate>(body).unwrap().apply_to(&mut twice);
        assert_eq!(once, twice);
    }
}
