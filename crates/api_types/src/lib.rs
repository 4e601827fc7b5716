use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Body of every non-2xx response.
///
/// The kind of failure is carried by the HTTP status only.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorMessage {
    pub message: String,
}

impl ErrorMessage {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Largest integer an `f64` holds exactly (2^53).
const MAX_EXACT_INTEGER: f64 = 9_007_199_254_740_992.0;

/// Writes whole amounts as JSON integers (`79` instead of `79.0`).
fn serialize_amount<S>(amount: &f64, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    if amount.fract() == 0.0 && amount.abs() < MAX_EXACT_INTEGER {
        serializer.serialize_i64(*amount as i64)
    } else {
        serializer.serialize_f64(*amount)
    }
}

/// Reads `null` the same as a missing key.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

pub mod expense {
    use super::*;

    /// A stored expense, as returned by every successful expense route.
    #[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
    pub struct Expense {
        pub id: i32,
        pub title: String,
        #[serde(serialize_with = "serialize_amount")]
        pub amount: f64,
        pub note: String,
        pub tags: Vec<String>,
    }

    /// Request body of `POST /expenses` and `PUT /expenses/{id}`.
    ///
    /// `title` and `amount` are required. `note` defaults to the empty
    /// string and `tags` to an empty list, whether absent or `null`. Any
    /// `id` in the body is ignored: the server assigns it on create and
    /// takes it from the path on update.
    #[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
    pub struct ExpenseNew {
        pub title: String,
        #[serde(serialize_with = "serialize_amount")]
        pub amount: f64,
        #[serde(default, deserialize_with = "null_as_default")]
        pub note: String,
        #[serde(default, deserialize_with = "null_as_default")]
        pub tags: Vec<String>,
    }

    impl ExpenseNew {
        pub fn with_id(self, id: i32) -> Expense {
            Expense {
                id,
                title: self.title,
                amount: self.amount,
                note: self.note,
                tags: self.tags,
            }
        }
    }
}

pub mod health {
    use super::*;

    pub const OK: &str = "ok";
    pub const UNAVAILABLE: &str = "unavailable";

    #[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
    pub struct Health {
        pub database: String,
        pub api: String,
    }
}
