//! Registry entry, liveness status and category types.

use chrono::NaiveDate;
use serde::de::DeserializeOwned;
use serde::{de, ser, Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};
use std::fmt;

/// Persisted liveness of an entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryStatus {
    #[default]
    Active,
    Invalid,
}

impl fmt::Display for EntryStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntryStatus::Active => write!(f, "active"),
            EntryStatus::Invalid => write!(f, "invalid"),
        }
    }
}

/// Category tag of an entry. Not used by validation; unknown tags round-trip verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Category {
    Company,
    Individual,
    Product,
    Aggregator,
    #[default]
    Other,
    Unrecognized(String),
}

impl From<String> for Category {
    fn from(s: String) -> Self {
        match s.as_str() {
            "company" => Category::Company,
            "individual" => Category::Individual,
            "product" => Category::Product,
            "aggregator" => Category::Aggregator,
            "other" => Category::Other,
            _ => Category::Unrecognized(s),
        }
    }
}

impl From<Category> for String {
    fn from(c: Category) -> Self {
        match c {
            Category::Company => "company".to_string(),
            Category::Individual => "individual".to_string(),
            Category::Product => "product".to_string(),
            Category::Aggregator => "aggregator".to_string(),
            Category::Other => "other".to_string(),
            Category::Unrecognized(s) => s,
        }
    }
}

/// One tracked blog.
///
/// Validation only reads `url` / `last_checked_at` and writes `status` /
/// `last_checked_at`. The record is kept as read, key order and unknown keys
/// included; on write only fields whose value changed are touched. An existing
/// key is updated in place, a new key goes at the end.
#[derive(Debug, Clone, PartialEq)]
pub struct RegistryEntry {
    pub name: String,
    pub url: String,
    pub category: Category,
    pub status: EntryStatus,
    pub last_checked_at: Option<NaiveDate>,
    record: Map<String, Value>,
}

impl RegistryEntry {
    /// New entry as created by intake: active, never checked.
    pub fn new(name: impl Into<String>, url: impl Into<String>, category: Category) -> Self {
        let name = name.into();
        let url = url.into();
        let status = EntryStatus::Active;
        let mut record = Map::new();
        record.insert("name".to_string(), Value::String(name.clone()));
        record.insert("url".to_string(), Value::String(url.clone()));
        record.insert("category".to_string(), Value::String(category.clone().into()));
        record.insert("status".to_string(), Value::String(status.to_string()));
        Self {
            name,
            url,
            category,
            status,
            last_checked_at: None,
            record,
        }
    }

    fn from_record(record: Map<String, Value>) -> serde_json::Result<Self> {
        let missing = <serde_json::Error as de::Error>::missing_field;
        Ok(Self {
            name: read_field(&record, "name")?.ok_or_else(|| missing("name"))?,
            url: read_field(&record, "url")?.ok_or_else(|| missing("url"))?,
            category: read_field(&record, "category")?.unwrap_or_default(),
            status: read_field(&record, "status")?.unwrap_or_default(),
            last_checked_at: read_field::<Option<NaiveDate>>(&record, "last_checked_at")?
                .flatten(),
            record,
        })
    }

    fn to_record(&self) -> serde_json::Result<Map<String, Value>> {
        let mut out = self.record.clone();
        if self.recorded::<String>("name").as_ref() != Some(&self.name) {
            out.insert("name".to_string(), serde_json::to_value(&self.name)?);
        }
        if self.recorded::<String>("url").as_ref() != Some(&self.url) {
            out.insert("url".to_string(), serde_json::to_value(&self.url)?);
        }
        // Absent optional fields read as their defaults, so they stay absent until changed.
        if self.recorded::<Category>("category").unwrap_or_default() != self.category {
            out.insert("category".to_string(), serde_json::to_value(&self.category)?);
        }
        if self.recorded::<EntryStatus>("status").unwrap_or_default() != self.status {
            out.insert("status".to_string(), serde_json::to_value(self.status)?);
        }
        let recorded_check = self.recorded::<Option<NaiveDate>>("last_checked_at").flatten();
        if recorded_check != self.last_checked_at {
            out.insert(
                "last_checked_at".to_string(),
                serde_json::to_value(self.last_checked_at)?,
            );
        }
        Ok(out)
    }

    /// Value of `key` as recorded in the file; `None` when absent or not a `T`.
    fn recorded<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        self.record.get(key).and_then(|v| T::deserialize(v).ok())
    }
}

fn read_field<T: DeserializeOwned>(
    record: &Map<String, Value>,
    key: &str,
) -> serde_json::Result<Option<T>> {
    record
        .get(key)
        .map(|v| {
            T::deserialize(v).map_err(|e| {
                <serde_json::Error as de::Error>::custom(format_args!("field `{key}`: {e}"))
            })
        })
        .transpose()
}

impl<'de> Deserialize<'de> for RegistryEntry {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let record = Map::<String, Value>::deserialize(deserializer)?;
        Self::from_record(record).map_err(<D::Error as de::Error>::custom)
    }
}

impl Serialize for RegistryEntry {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_record()
            .map_err(<S::Error as ser::Error>::custom)?
            .serialize(serializer)
    }
}
