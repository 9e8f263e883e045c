//! Wire DTOs for the marketplace REST API.
//!
//! DESIGN
//! ======
//! The API is owned by another service, so decoding is lenient: missing or
//! `null` fields fall back to defaults and ids may arrive as numbers or
//! strings. `User` stays an open JSON object so fields this client does not
//! know about survive persistence and partial updates.

#[cfg(test)]
#[path = "types_test.rs"]
mod types_test;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

// =============================================================================
// USER
// =============================================================================

/// Account record returned by `/api/auth/login` and `/api/auth/me`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct User(Map<String, Value>);

impl User {
    pub fn from_fields(fields: Map<String, Value>) -> Self {
        Self(fields)
    }

    pub fn fields(&self) -> &Map<String, Value> {
        &self.0
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Shallow merge: every top-level key in `partial` replaces the current value.
    pub fn merge(&mut self, partial: Map<String, Value>) {
        for (key, value) in partial {
            self.0.insert(key, value);
        }
    }

    /// User id rendered as a string, whether the API sent a number or a string.
    pub fn id(&self) -> Option<String> {
        self.get("id").or_else(|| self.get("_id")).and_then(id_from_value)
    }

    pub fn email(&self) -> Option<&str> {
        self.str_field("email")
    }

    pub fn username(&self) -> Option<&str> {
        self.str_field("username")
    }

    pub fn full_name(&self) -> Option<&str> {
        self.str_field("full_name")
    }

    /// Best human-readable label for the navbar.
    pub fn display_name(&self) -> String {
        self.full_name()
            .or_else(|| self.username())
            .or_else(|| self.email())
            .unwrap_or("Student")
            .to_owned()
    }

    pub fn balance(&self) -> Option<f64> {
        self.get("balance").and_then(Value::as_f64)
    }

    pub fn is_admin(&self) -> bool {
        self.get("is_admin").and_then(Value::as_bool).unwrap_or(false)
    }

    fn str_field(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(Value::as_str).filter(|s| !s.trim().is_empty())
    }
}

fn id_from_value(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

// =============================================================================
// AUTH PAYLOADS
// =============================================================================

/// Body of `POST /api/auth/login`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Successful response of `POST /api/auth/login`.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct LoginResponse {
    pub access_token: String,
    pub user: User,
}

/// Body of `POST /api/auth/register`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct RegisterRequest {
    pub username: String,
    pub email: String,
    pub full_name: String,
    pub university: String,
    pub password: String,
}

/// Error body shape used by the API: `{"detail": ...}` or `{"message": ...}`.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub detail: Option<Value>,
    #[serde(default)]
    pub message: Option<String>,
}

impl ErrorBody {
    /// Human-readable message, if the server supplied one.
    ///
    /// Validation failures carry `detail` as a list of `{loc, msg}` objects;
    /// the first `msg` is used in that case.
    pub fn text(&self) -> Option<String> {
        let from_detail = match &self.detail {
            Some(Value::String(s)) => Some(s.clone()),
            Some(Value::Array(items)) => items
                .iter()
                .find_map(|item| item.get("msg").and_then(Value::as_str))
                .map(str::to_owned),
            _ => None,
        };
        let non_blank = |s: &String| !s.trim().is_empty();
        from_detail
            .filter(non_blank)
            .or_else(|| self.message.clone().filter(non_blank))
    }
}

// =============================================================================
// LISTINGS
// =============================================================================

/// Marketplace item as returned by `/api/listings` endpoints.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Listing {
    #[serde(alias = "_id", deserialize_with = "deserialize_id")]
    pub id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub description: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub price: f64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub stock: u32,
    #[serde(default, deserialize_with = "null_as_default")]
    pub category: String,
    #[serde(default)]
    pub condition: Option<String>,
    #[serde(default)]
    pub pickup_location: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub images: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub tags: Vec<String>,
    #[serde(default, deserialize_with = "deserialize_opt_id")]
    pub seller_id: Option<String>,
    #[serde(default)]
    pub seller_name: Option<String>,
    #[serde(default)]
    pub seller_email: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub is_sold: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    pub is_reported: bool,
    #[serde(default)]
    pub average_rating: Option<f64>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub total_ratings: u32,
    #[serde(default, deserialize_with = "null_as_default")]
    pub views: u64,
    #[serde(default)]
    pub created_at: Option<String>,
}

/// A single review shown under a listing.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Rating {
    #[serde(alias = "_id", deserialize_with = "deserialize_id")]
    pub id: String,
    pub rating: u8,
    #[serde(default)]
    pub comment: Option<String>,
    #[serde(default, alias = "rater_name")]
    pub user_name: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
}

/// Body of `POST /api/listings/{id}/ratings`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct RatingRequest {
    pub rating: u8,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
}

/// Receipt for a completed purchase.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct PurchaseResult {
    #[serde(deserialize_with = "deserialize_id")]
    pub transaction_id: String,
    #[serde(default)]
    pub total_price: Option<f64>,
}

/// Purchase responses arrive either bare or wrapped in a `data` envelope.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum PurchaseResponse {
    Wrapped { data: PurchaseResult },
    Bare(PurchaseResult),
}

impl PurchaseResponse {
    pub fn into_result(self) -> PurchaseResult {
        match self {
            Self::Wrapped { data } | Self::Bare(data) => data,
        }
    }
}

/// Body of `POST /api/chats`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct CreateChatRequest {
    pub participant_a_id: String,
    pub participant_b_id: String,
}

/// A direct-message conversation between two users.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct Chat {
    #[serde(rename = "_id", alias = "id", deserialize_with = "deserialize_id")]
    pub id: String,
    #[serde(default, deserialize_with = "deserialize_opt_id")]
    pub participant_a_id: Option<String>,
    #[serde(default, deserialize_with = "deserialize_opt_id")]
    pub participant_b_id: Option<String>,
}

// =============================================================================
// LENIENT DECODERS
// =============================================================================

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

fn deserialize_id<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::Error as _;

    let value = Value::deserialize(deserializer)?;
    id_from_value(&value).ok_or_else(|| D::Error::custom(format!("expected string or number id, got {value}")))
}

fn deserialize_opt_id<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.as_ref().and_then(id_from_value))
}
