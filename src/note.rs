//! Core data structures for the webnotes application.
//!
//! A [`Note`] is serialized with the key names the mobile app has always
//! written (`date` for the creation time, `updatedAt` for the last edit) so
//! existing blobs keep loading.
use std::{fmt, str::FromStr};

use chrono::{DateTime, SecondsFormat, SubsecRound, Utc};
use log::warn;
use serde::{Deserialize, Serialize, Serializer};

use crate::NotesError;

/// Fixed set of labels a note can be filed under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Category {
    #[default]
    #[serde(rename = "Daily Bugle")]
    DailyBugle,
    #[serde(rename = "Web Shooters")]
    WebShooters,
    #[serde(rename = "Spidey Sense")]
    SpideySense,
    #[serde(rename = "Hero Work")]
    HeroWork,
    #[serde(rename = "Personal")]
    Personal,
}

impl Category {
    /// All categories in presentation order. The first one is the default.
    pub const ALL: [Category; 5] = [
        Category::DailyBugle,
        Category::WebShooters,
        Category::SpideySense,
        Category::HeroWork,
        Category::Personal,
    ];

    /// Human readable label, identical to the serialized form.
    pub fn label(self) -> &'static str {
        match self {
            Category::DailyBugle => "Daily Bugle",
            Category::WebShooters => "Web Shooters",
            Category::SpideySense => "Spidey Sense",
            Category::HeroWork => "Hero Work",
            Category::Personal => "Personal",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Category {
    type Err = NotesError;

    /// Accepts labels in any case, with spaces, dashes or underscores
    /// between words (`hero-work`, `HERO_WORK`, `Hero Work`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = normalize_label(s);
        Category::ALL
            .into_iter()
            .find(|category| normalize_label(category.label()) == wanted)
            .ok_or_else(|| NotesError::InvalidCategory {
                value: s.to_string(),
            })
    }
}

fn normalize_label(raw: &str) -> String {
    raw.replace(['-', '_'], " ")
        .split_whitespace()
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Represents a single note in our system
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "NoteRecord")]
pub struct Note {
    /// Unique identifier for the note, never changes
    pub id: String,
    /// Trimmed, non-empty title
    pub title: String,
    /// Trimmed, non-empty body text
    pub content: String,
    /// Category the note is filed under
    pub category: Category,
    /// When the note was created
    #[serde(rename = "date", serialize_with = "serialize_timestamp")]
    pub created_at: DateTime<Utc>,
    /// Last modification time
    #[serde(rename = "updatedAt", serialize_with = "serialize_timestamp")]
    pub updated_at: DateTime<Utc>,
}

impl Note {
    /// Creates a note whose creation and update times are both `now`.
    pub fn new(
        id: String,
        title: String,
        content: String,
        category: Category,
        now: DateTime<Utc>,
    ) -> Self {
        Note {
            id,
            title,
            content,
            category,
            created_at: now,
            updated_at: now,
        }
    }

    /// Replaces the editable fields. `updated_at` never moves backwards.
    pub fn revise(&mut self, title: String, content: String, category: Category, now: DateTime<Utc>) {
        self.title = title;
        self.content = content;
        self.category = category;
        self.updated_at = now.max(self.updated_at);
    }
}

/// Current time at the precision the wire format keeps.
pub fn now_millis() -> DateTime<Utc> {
    Utc::now().trunc_subsecs(3)
}

/// Derives an id from the creation time, stepping past ids already taken.
pub fn next_id(now: DateTime<Utc>, is_taken: impl Fn(&str) -> bool) -> String {
    let mut candidate = now.timestamp_millis();
    loop {
        let id = candidate.to_string();
        if !is_taken(&id) {
            return id;
        }
        candidate += 1;
    }
}

fn serialize_timestamp<S: Serializer>(ts: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&ts.to_rfc3339_opts(SecondsFormat::Millis, true))
}

fn parse_timestamp(raw: &str) -> Result<DateTime<Utc>, String> {
    DateTime::parse_from_rfc3339(raw)
        .map(|ts| ts.with_timezone(&Utc).trunc_subsecs(3))
        .map_err(|e| format!("invalid timestamp '{}': {}", raw, e))
}

/// Shape of a note as found in storage. Older blobs may lack `updatedAt`,
/// spell the creation time `createdAt`, or carry a category label this
/// build does not know.
#[derive(Deserialize)]
struct NoteRecord {
    id: String,
    title: String,
    content: String,
    category: String,
    #[serde(rename = "date", alias = "createdAt")]
    created_at: String,
    #[serde(rename = "updatedAt", default)]
    updated_at: Option<String>,
}

impl TryFrom<NoteRecord> for Note {
    type Error = String;

    fn try_from(record: NoteRecord) -> Result<Self, Self::Error> {
        let created_at = parse_timestamp(&record.created_at)?;
        let updated_at = match record.updated_at.as_deref() {
            Some(raw) => parse_timestamp(raw)?,
            None => created_at,
        };

        let category = record.category.parse::<Category>().unwrap_or_else(|_| {
            warn!(
                "Note {} has unknown category '{}', filing it under {}",
                record.id,
                record.category,
                Category::default()
            );
            Category::default()
        });

        Ok(Note {
            id: record.id,
            title: record.title,
            content: record.content,
            category,
            created_at,
            updated_at,
        })
    }
}
