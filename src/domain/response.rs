use crate::domain::locale::{Locale, Location};
use crate::domain::request::Reference;
use crate::domain::value::{JobId, Property};

/// Status code attached to envelopes when the HTTP call itself failed.
pub const STATUS_SERVICE_UNAVAILABLE: u16 = 503;
/// Status code attached to envelopes when a 200 body could not be parsed.
pub const STATUS_BAD_REQUEST: u16 = 400;

#[derive(Debug, Clone, PartialEq, Eq)]
/// Per-recipient outcome inside a [`FaxStatusReport`] (`recipientStatus[]`).
pub struct RecipientStatus {
    pub number: Option<String>,
    pub properties: Vec<Property>,
    pub status: Option<String>,
    pub reason: Option<String>,
    pub sent_ts: Option<String>,
    pub duration_in_secs: Option<u32>,
    pub sent_to_number: Option<String>,
    pub remote_csid: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FaxStatusReport {
    pub job_id: JobId,
    pub recipient_statuses: Vec<RecipientStatus>,
    pub pages: u32,
    pub reference: Option<Reference>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// A status report together with the location it was retrieved from.
///
/// Follow-up single-report operations use `location` to reach the physical instance that
/// holds the report.
pub struct LocatedReport {
    pub report: FaxStatusReport,
    pub location: Location,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
/// Why a report was not deleted.
///
/// Values unknown to this crate map to [`Reason::Unknown`].
pub enum Reason {
    NotFound,
    InternalError,
    Unknown,
}

impl Reason {
    pub fn from_wire(value: &str) -> Self {
        match value {
            "NOT_FOUND" => Self::NotFound,
            "INTERNAL_ERROR" => Self::InternalError,
            _ => Self::Unknown,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::NotFound => "NOT_FOUND",
            Self::InternalError => "INTERNAL_ERROR",
            Self::Unknown => "UNKNOWN",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Outcome of deleting one report.
///
/// The service sets `reason` exactly when `deleted` is false; this is not enforced here.
pub struct FaxDeletionReport {
    pub job_id: JobId,
    pub deleted: bool,
    pub reason: Option<Reason>,
}

impl FaxDeletionReport {
    pub(crate) fn not_found(job_id: JobId) -> Self {
        Self {
            job_id,
            deleted: false,
            reason: Some(Reason::NotFound),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// HTTP status plus a typed, possibly empty payload.
///
/// Used wherever a failure must be representable as data instead of an error, so that one
/// location failing does not hide the results of the others.
pub struct ApiResponse<T> {
    pub status: u16,
    pub value: T,
    /// Where the request was sent: the single location for per-location operations, the
    /// configured locale otherwise.
    pub locale: Locale,
}

impl<T> ApiResponse<T> {
    pub fn new(value: T, status: u16, locale: Locale) -> Self {
        Self {
            status,
            value,
            locale,
        }
    }

    /// `true` for 2xx statuses.
    pub fn is_success(&self) -> bool {
        (200..=299).contains(&self.status)
    }

    pub fn is_not_found(&self) -> bool {
        self.status == 404
    }
}
