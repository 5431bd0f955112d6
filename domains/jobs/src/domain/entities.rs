//! Job domain entities
//!
//! A job is a free-form document. The fields below are the only ones the
//! server interprets; everything else is stored and returned untouched.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use solosphere_common::document::str_at;
use solosphere_common::{Document, DocumentRow, PageRequest};

/// Searchable title
pub const TITLE_FIELD: &str = "jobTitle";
/// Exact-match filter
pub const CATEGORY_FIELD: &str = "category";
/// Sort key
pub const DATELINE_FIELD: &str = "dateline";
/// Owner identity, nested under `buyer`
pub const OWNER_PATH: [&str; 2] = ["buyer", "email"];

/// Job posting
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Job {
    #[serde(rename = "_id")]
    pub id: Uuid,
    #[serde(flatten)]
    pub document: Document,
}

impl Job {
    pub fn new(id: Uuid, document: Document) -> Self {
        Self { id, document }
    }

    pub fn title(&self) -> Option<&str> {
        str_at(&self.document, &[TITLE_FIELD])
    }

    pub fn category(&self) -> Option<&str> {
        str_at(&self.document, &[CATEGORY_FIELD])
    }

    pub fn dateline(&self) -> Option<&str> {
        str_at(&self.document, &[DATELINE_FIELD])
    }

    /// Email of the buyer who posted the job
    pub fn owner_email(&self) -> Option<&str> {
        str_at(&self.document, &OWNER_PATH)
    }

    pub fn is_owned_by(&self, email: &str) -> bool {
        self.owner_email() == Some(email)
    }
}

impl From<DocumentRow> for Job {
    fn from(row: DocumentRow) -> Self {
        Job::new(row.id, row.document.0)
    }
}

/// Direction for ordering by `dateline`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    Ascending,
    Descending,
}

impl SortOrder {
    /// `asc` sorts ascending; any other non-empty value sorts descending.
    /// An empty or absent value means no ordering was requested.
    pub fn from_param(value: Option<&str>) -> Option<Self> {
        match value.map(str::trim) {
            None | Some("") => None,
            Some("asc") => Some(SortOrder::Ascending),
            Some(_) => Some(SortOrder::Descending),
        }
    }

    pub fn as_sql(&self) -> &'static str {
        match self {
            SortOrder::Ascending => "ASC",
            SortOrder::Descending => "DESC",
        }
    }
}

/// Filter shared by the paged search and its count
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct JobFilter {
    /// Case-insensitive substring of `jobTitle`; empty matches every titled job
    pub search: String,
    /// Exact `category`
    pub category: Option<String>,
}

impl JobFilter {
    pub fn new(search: Option<String>, category: Option<String>) -> Self {
        Self {
            search: search.unwrap_or_default(),
            category: category.filter(|c| !c.is_empty()),
        }
    }

    /// ILIKE pattern for the title search with LIKE metacharacters escaped
    pub fn title_pattern(&self) -> String {
        let mut pattern = String::with_capacity(self.search.len() + 2);
        pattern.push('%');
        for ch in self.search.chars() {
            if matches!(ch, '%' | '_' | '\\') {
                pattern.push('\\');
            }
            pattern.push(ch);
        }
        pattern.push('%');
        pattern
    }

    /// In-process evaluation of the same predicate the SQL store applies
    pub fn matches(&self, job: &Job) -> bool {
        let Some(title) = job.title() else {
            return false;
        };
        if !title
            .to_lowercase()
            .contains(&self.search.to_lowercase())
        {
            return false;
        }
        match &self.category {
            Some(category) => job.category() == Some(category.as_str()),
            None => true,
        }
    }
}

/// Paged search over jobs
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct JobQuery {
    pub filter: JobFilter,
    pub sort: Option<SortOrder>,
    pub page: PageRequest,
}
