//! Shared data model for everything read out of the content store.
//!
//! List items arrive as loosely-typed JSON written by the admin panel. Every
//! field is defaulted and decoded leniently (numbers accepted where text is
//! expected, numeric strings accepted as order keys) so one odd field never
//! drops a whole list. Values that are not JSON objects at all are skipped by
//! [`crate::content::decode_items`].

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;
use std::fmt;

/// One key/value pair from `GET /api/admin/config`.
///
/// Keys are not namespaced; consumers must know the expected shape per key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConfigEntry {
    pub key: String,
    #[serde(default)]
    pub value: Value,
}

impl ConfigEntry {
    pub fn new(key: impl Into<String>, value: Value) -> Self {
        Self {
            key: key.into(),
            value,
        }
    }
}

/// Soft-delete flag carried by every list item.
///
/// Tri-state on purpose: an absent flag means *active*. Only a literal JSON
/// `false` deactivates an item; `null`, missing, `true` or any other value
/// keep it. Coercing this to a plain `bool` with `false` as the default would
/// silently hide every item the admin never touched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Activity {
    #[default]
    Unset,
    Active,
    Inactive,
}

impl Activity {
    pub fn is_active(self) -> bool {
        self != Activity::Inactive
    }
}

impl<'de> Deserialize<'de> for Activity {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(match Value::deserialize(deserializer)? {
            Value::Null => Activity::Unset,
            Value::Bool(false) => Activity::Inactive,
            _ => Activity::Active,
        })
    }
}

impl Serialize for Activity {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Activity::Unset => serializer.serialize_none(),
            Activity::Active => serializer.serialize_bool(true),
            Activity::Inactive => serializer.serialize_bool(false),
        }
    }
}

/// Item identifier; the admin backend emits both numeric and string ids.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(transparent)]
pub struct ItemId(pub String);

impl<'de> Deserialize<'de> for ItemId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(ItemId(match Value::deserialize(deserializer)? {
            Value::String(s) => s,
            Value::Number(n) => n.to_string(),
            _ => String::new(),
        }))
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ItemId {
    fn from(s: &str) -> Self {
        ItemId(s.to_string())
    }
}

/// Common view over ordered, toggleable list items.
pub trait ListItem {
    fn activity(&self) -> Activity;
    /// Sort key; absent or non-numeric orders count as `0`.
    fn order(&self) -> f64;
}

macro_rules! list_item {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl ListItem for $ty {
                fn activity(&self) -> Activity {
                    self.is_active
                }
                fn order(&self) -> f64 {
                    self.order
                }
            }
        )+
    };
}

/// Credential card on the about section (`about_credentials`).
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Credential {
    pub id: ItemId,
    #[serde(deserialize_with = "lenient::text")]
    pub title: Option<String>,
    #[serde(deserialize_with = "lenient::text")]
    pub subtitle: Option<String>,
    /// Gradient identifier picked in the admin panel, see [`crate::style::CardGradient`].
    #[serde(deserialize_with = "lenient::text")]
    pub gradient: Option<String>,
    #[serde(deserialize_with = "lenient::order")]
    pub order: f64,
    pub is_active: Activity,
}

/// Contact channel on the contact section (`contact_items`).
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ContactItem {
    pub id: ItemId,
    #[serde(deserialize_with = "lenient::text")]
    pub title: Option<String>,
    #[serde(deserialize_with = "lenient::text")]
    pub description: Option<String>,
    #[serde(deserialize_with = "lenient::text")]
    pub icon: Option<String>,
    #[serde(deserialize_with = "lenient::text")]
    pub color: Option<String>,
    #[serde(deserialize_with = "lenient::text")]
    pub link: Option<String>,
    #[serde(deserialize_with = "lenient::order")]
    pub order: f64,
    pub is_active: Activity,
}

/// Footer contact button (`contact_buttons`).
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ContactButton {
    pub id: ItemId,
    #[serde(deserialize_with = "lenient::text")]
    pub label: Option<String>,
    #[serde(deserialize_with = "lenient::text")]
    pub icon: Option<String>,
    #[serde(deserialize_with = "lenient::text")]
    pub link: Option<String>,
    #[serde(deserialize_with = "lenient::text")]
    pub gradient: Option<String>,
    #[serde(deserialize_with = "lenient::order")]
    pub order: f64,
    pub is_active: Activity,
}

/// Footer trust seal badge (`trust_seals`).
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TrustSeal {
    pub id: ItemId,
    #[serde(deserialize_with = "lenient::text")]
    pub label: Option<String>,
    #[serde(deserialize_with = "lenient::text")]
    pub gradient: Option<String>,
    #[serde(deserialize_with = "lenient::order")]
    pub order: f64,
    pub is_active: Activity,
}

/// Footer certification line (`certification_items`).
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CertificationItem {
    pub id: ItemId,
    #[serde(deserialize_with = "lenient::text")]
    pub title: Option<String>,
    #[serde(deserialize_with = "lenient::text")]
    pub description: Option<String>,
    #[serde(deserialize_with = "lenient::order")]
    pub order: f64,
    pub is_active: Activity,
}

/// One photo from `GET /api/photo-carousel`.
///
/// Created and edited in the admin panel. The carousel treats the filtered,
/// sorted list as immutable for the lifetime of one engine.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PhotoEntry {
    pub id: ItemId,
    #[serde(deserialize_with = "lenient::text_or_empty")]
    pub image_url: String,
    #[serde(deserialize_with = "lenient::text_or_empty")]
    pub title: String,
    #[serde(deserialize_with = "lenient::text")]
    pub description: Option<String>,
    /// Overlay the title/description on the slide.
    #[serde(deserialize_with = "lenient::truthy")]
    pub show_text: bool,
    #[serde(deserialize_with = "lenient::order")]
    pub order: f64,
    pub is_active: Activity,
}

list_item!(
    Credential,
    ContactItem,
    ContactButton,
    TrustSeal,
    CertificationItem,
    PhotoEntry,
);

/// Field decoders that never fail on a wrong JSON type.
mod lenient {
    use serde::{Deserialize, Deserializer};
    use serde_json::Value;

    pub fn text<'de, D: Deserializer<'de>>(d: D) -> Result<Option<String>, D::Error> {
        Ok(match Value::deserialize(d)? {
            Value::String(s) => Some(s),
            Value::Number(n) => Some(n.to_string()),
            _ => None,
        })
    }

    pub fn text_or_empty<'de, D: Deserializer<'de>>(d: D) -> Result<String, D::Error> {
        text(d).map(Option::unwrap_or_default)
    }

    pub fn order<'de, D: Deserializer<'de>>(d: D) -> Result<f64, D::Error> {
        let order = match Value::deserialize(d)? {
            Value::Number(n) => n.as_f64().unwrap_or(0.0),
            Value::String(s) => s.trim().parse::<f64>().unwrap_or(0.0),
            _ => 0.0,
        };
        Ok(if order.is_finite() { order } else { 0.0 })
    }

    pub fn truthy<'de, D: Deserializer<'de>>(d: D) -> Result<bool, D::Error> {
        Ok(match Value::deserialize(d)? {
            Value::Bool(b) => b,
            Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
            Value::String(s) => !s.is_empty(),
            Value::Array(_) | Value::Object(_) => true,
            Value::Null => false,
        })
    }
}
