//! Records mirrored from the ludoteca backend
//!
//! Ids travel as JSON numbers from the backend but are held as strings here;
//! an empty id marks a record that has not been created yet and is left out
//! of request bodies.

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

// ═══════════════════════════════════════════════════════════════════════════════
// Resource kinds
// ═══════════════════════════════════════════════════════════════════════════════

/// The five resource kinds exposed by the backend. Also used as cache tags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Resource {
    Category,
    Author,
    Game,
    Client,
    Loan,
}

impl Resource {
    /// Path segment on the backend (`/category`, `/loan`, ...)
    pub fn path(&self) -> &'static str {
        match self {
            Resource::Category => "category",
            Resource::Author => "author",
            Resource::Game => "game",
            Resource::Client => "client",
            Resource::Loan => "loan",
        }
    }

    /// Singular display name, capitalized
    pub fn singular(&self) -> &'static str {
        match self {
            Resource::Category => "Categoría",
            Resource::Author => "Autor",
            Resource::Game => "Juego",
            Resource::Client => "Cliente",
            Resource::Loan => "Préstamo",
        }
    }

    /// Whether the Spanish noun is feminine (drives participle agreement)
    pub fn is_feminine(&self) -> bool {
        matches!(self, Resource::Category)
    }

    /// Article + lowercase noun ("el préstamo", "la categoría")
    pub fn with_article(&self) -> String {
        let article = if self.is_feminine() { "la" } else { "el" };
        format!("{} {}", article, self.singular().to_lowercase())
    }
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// Entities
// ═══════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    #[serde(default, deserialize_with = "deserialize_id", skip_serializing_if = "String::is_empty")]
    pub id: String,
    #[serde(default)]
    pub name: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Author {
    #[serde(default, deserialize_with = "deserialize_id", skip_serializing_if = "String::is_empty")]
    pub id: String,
    #[serde(default)]
    pub name: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Client {
    #[serde(default, deserialize_with = "deserialize_id", skip_serializing_if = "String::is_empty")]
    pub id: String,
    #[serde(default)]
    pub name: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Game {
    #[serde(default, deserialize_with = "deserialize_id", skip_serializing_if = "String::is_empty")]
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub category: Option<Category>,
    #[serde(default)]
    pub author: Option<Author>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Loan {
    #[serde(default, deserialize_with = "deserialize_id", skip_serializing_if = "String::is_empty")]
    pub id: String,
    #[serde(default)]
    pub game: Option<Game>,
    #[serde(default)]
    pub client: Option<Client>,
    #[serde(serialize_with = "serialize_date", deserialize_with = "deserialize_date")]
    pub start_date: NaiveDate,
    #[serde(serialize_with = "serialize_date", deserialize_with = "deserialize_date")]
    pub end_date: NaiveDate,
}

/// One page of a paginated list response
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    #[serde(default = "Vec::new")]
    pub content: Vec<T>,
    #[serde(default)]
    pub total_elements: u64,
}

impl<T> Default for Page<T> {
    fn default() -> Self {
        Self {
            content: Vec::new(),
            total_elements: 0,
        }
    }
}

/// Records that are displayed as a bare id + name pair
pub trait Named {
    fn id(&self) -> &str;
    fn name(&self) -> &str;
}

impl Named for Category {
    fn id(&self) -> &str {
        &self.id
    }
    fn name(&self) -> &str {
        &self.name
    }
}

impl Named for Author {
    fn id(&self) -> &str {
        &self.id
    }
    fn name(&self) -> &str {
        &self.name
    }
}

impl Named for Client {
    fn id(&self) -> &str {
        &self.id
    }
    fn name(&self) -> &str {
        &self.name
    }
}

impl Named for Game {
    fn id(&self) -> &str {
        &self.id
    }
    fn name(&self) -> &str {
        &self.title
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// Serde helpers
// ═══════════════════════════════════════════════════════════════════════════════

#[derive(Deserialize)]
#[serde(untagged)]
enum RawId {
    Text(String),
    Integer(i64),
    Float(f64),
}

fn deserialize_id<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<RawId>::deserialize(deserializer)?;
    Ok(match raw {
        Some(RawId::Text(text)) => text,
        Some(RawId::Integer(n)) => n.to_string(),
        Some(RawId::Float(n)) => n.to_string(),
        None => String::new(),
    })
}

const DATE_FORMAT: &str = "%Y-%m-%d";

fn serialize_date<S>(date: &NaiveDate, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(&date.format(DATE_FORMAT).to_string())
}

fn deserialize_date<'de, D>(deserializer: D) -> Result<NaiveDate, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_wire_date(&raw)
        .ok_or_else(|| serde::de::Error::custom(format!("invalid date: {}", raw)))
}

/// Parse a backend date, accepting a plain date or a full timestamp.
/// Timestamps keep their own calendar date.
pub fn parse_wire_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    NaiveDate::parse_from_str(raw, DATE_FORMAT)
        .ok()
        .or_else(|| DateTime::parse_from_rfc3339(raw).ok().map(|dt| dt.date_naive()))
        .or_else(|| {
            NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
                .ok()
                .map(|dt| dt.date())
        })
}
