//! Bid domain entities

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use solosphere_common::document::str_at;
use solosphere_common::{Document, DocumentRow};

/// Bidder identity
pub const BIDDER_FIELD: &str = "email";
/// Referenced job, not enforced
pub const JOB_ID_FIELD: &str = "jobId";
/// Job owner mirrored onto the bid
pub const JOB_OWNER_PATH: [&str; 2] = ["buyer", "email"];
pub const STATUS_FIELD: &str = "status";

/// Reported when a bidder bids twice on the same job
pub const DUPLICATE_BID_MESSAGE: &str = "You have already placed a bid on this job";

/// A bid placed on a job
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bid {
    #[serde(rename = "_id")]
    pub id: Uuid,
    #[serde(flatten)]
    pub document: Document,
}

impl Bid {
    pub fn new(id: Uuid, document: Document) -> Self {
        Self { id, document }
    }

    pub fn bidder_email(&self) -> Option<&str> {
        str_at(&self.document, &[BIDDER_FIELD])
    }

    pub fn job_id(&self) -> Option<&str> {
        str_at(&self.document, &[JOB_ID_FIELD])
    }

    pub fn job_owner_email(&self) -> Option<&str> {
        str_at(&self.document, &JOB_OWNER_PATH)
    }

    pub fn status(&self) -> Option<&str> {
        str_at(&self.document, &[STATUS_FIELD])
    }

    /// Whether `document` is a second bid by the same bidder on the same job.
    ///
    /// Both keys must be present and non-null on each side.
    pub fn duplicates(&self, document: &Document) -> bool {
        [BIDDER_FIELD, JOB_ID_FIELD].iter().all(|key| {
            match (self.document.get(*key), document.get(*key)) {
                (Some(ours), Some(theirs)) => !ours.is_null() && ours == theirs,
                _ => false,
            }
        })
    }
}

impl From<DocumentRow> for Bid {
    fn from(row: DocumentRow) -> Self {
        Bid::new(row.id, row.document.0)
    }
}
