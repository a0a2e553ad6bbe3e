use chrono::{DateTime, SecondsFormat, Utc};
use phonenumber::country;

use crate::domain::validation::ValidationError;

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
/// Fax number of a recipient as sent to the service (`number`).
///
/// Invariant: non-empty after trimming. No normalization is applied; parse into
/// [`PhoneNumber`] and convert if you want E.164.
pub struct FaxNumber(String);

impl FaxNumber {
    /// JSON field name used by the service (`number`).
    pub const FIELD: &'static str = "number";

    /// Create a validated (non-blank) fax number.
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::Empty { field: Self::FIELD });
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Raw (trimmed) value as sent to the service.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<PhoneNumber> for FaxNumber {
    fn from(value: PhoneNumber) -> Self {
        Self(value.e164)
    }
}

#[derive(Debug, Clone)]
/// Parsed phone number with an E.164 representation.
///
/// Equality is based on the E.164 form.
pub struct PhoneNumber {
    raw: String,
    e164: String,
}

impl PhoneNumber {
    /// Parse and normalize a phone number into E.164.
    ///
    /// `default_region` is used when the input carries no explicit country prefix.
    pub fn parse(
        default_region: Option<country::Id>,
        input: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        let input = input.into();
        let raw = input.trim().to_owned();
        if raw.is_empty() {
            return Err(ValidationError::Empty {
                field: FaxNumber::FIELD,
            });
        }

        let parsed = phonenumber::parse(default_region, &raw)
            .map_err(|_| ValidationError::InvalidPhoneNumber { input: raw.clone() })?;

        let e164 = phonenumber::format(&parsed)
            .mode(phonenumber::Mode::E164)
            .to_string();

        Ok(Self { raw, e164 })
    }

    /// Raw input after trimming.
    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// Normalized E.164 representation.
    pub fn e164(&self) -> &str {
        &self.e164
    }
}

impl PartialEq for PhoneNumber {
    fn eq(&self, other: &Self) -> bool {
        self.e164 == other.e164
    }
}

impl Eq for PhoneNumber {}

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
/// Fax job identifier issued by the service (`jobId`).
///
/// Invariant: non-empty after trimming.
pub struct JobId(String);

impl JobId {
    /// JSON field name used by the service (`jobId`).
    pub const FIELD: &'static str = "jobId";

    /// Create a validated [`JobId`].
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::Empty { field: Self::FIELD });
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Borrow the job id.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for JobId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
/// Free-form key/value pair, used for cover-page template variables.
pub struct Property {
    pub key: String,
    pub value: String,
}

impl Property {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
/// Point in time or relative offset bounding a job's validity window (`jobValid.start/end`).
///
/// Invariant: the value parses as an ISO-8601 instant (`2015-08-07T13:04:37.107Z`) or an
/// ISO-8601 duration (`PT2H`, `P1DT30M`).
pub struct JobTime(String);

impl JobTime {
    /// Validate a textual instant or duration. `field` names the value in errors.
    pub fn parse(field: &'static str, value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        if !is_iso8601_instant(&value) && !is_iso8601_duration(&value) {
            return Err(ValidationError::InvalidTimestamp {
                field,
                input: value,
            });
        }
        Ok(Self(value))
    }

    /// Format an instant the way the service expects (UTC, `Z` suffix).
    pub fn from_instant(instant: DateTime<Utc>) -> Self {
        Self(instant.to_rfc3339_opts(SecondsFormat::AutoSi, true))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

fn is_iso8601_instant(input: &str) -> bool {
    DateTime::parse_from_rfc3339(input).is_ok()
}

/// Duration text as `java.time.Duration.parse` reads it:
/// `[-+]?P(nD)?(T(nH)?(nM)?(n(.f)?S)?)?`, case-insensitive, with at least one component
/// and no empty `T` section. Each `n` may carry its own sign.
fn is_iso8601_duration(input: &str) -> bool {
    let upper = input.to_ascii_uppercase();
    let unsigned = upper
        .strip_prefix('-')
        .or_else(|| upper.strip_prefix('+'))
        .unwrap_or(&upper);
    let Some(body) = unsigned.strip_prefix('P') else {
        return false;
    };

    let (date, time) = match body.split_once('T') {
        Some((date, time)) => (date, Some(time)),
        None => (body, None),
    };

    let mut has_component = false;
    if !date.is_empty() {
        match date.strip_suffix('D') {
            Some(days) if is_signed_integer(days) => has_component = true,
            _ => return false,
        }
    }

    if let Some(mut time) = time {
        if time.is_empty() {
            return false;
        }
        for unit in ['H', 'M'] {
            if let Some(idx) = time.find(unit) {
                if !is_signed_integer(&time[..idx]) {
                    return false;
                }
                time = &time[idx + 1..];
                has_component = true;
            }
        }
        if !time.is_empty() {
            let Some(seconds) = time.strip_suffix('S') else {
                return false;
            };
            let (whole, fraction) = match seconds.split_once(['.', ',']) {
                Some((whole, fraction)) => (whole, fraction),
                None => (seconds, ""),
            };
            if !is_signed_integer(whole)
                || fraction.len() > 9
                || !fraction.bytes().all(|b| b.is_ascii_digit())
            {
                return false;
            }
            has_component = true;
        }
    }

    has_component
}

fn is_signed_integer(value: &str) -> bool {
    let digits = value
        .strip_prefix('-')
        .or_else(|| value.strip_prefix('+'))
        .unwrap_or(value);
    !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
/// Character set of a text document (`charset`).
pub enum Charset {
    UsAscii,
    #[default]
    Utf8,
    Utf16,
    Utf16Be,
    Utf16Le,
    Iso8859_1,
    Windows1252,
}

impl Charset {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::UsAscii => "US-ASCII",
            Self::Utf8 => "UTF-8",
            Self::Utf16 => "UTF-16",
            Self::Utf16Be => "UTF-16BE",
            Self::Utf16Le => "UTF-16LE",
            Self::Iso8859_1 => "ISO-8859-1",
            Self::Windows1252 => "WINDOWS-1252",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PaperFormat {
    A4,
    Letter,
}

impl PaperFormat {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::A4 => "A4",
            Self::Letter => "LETTER",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PaperResolution {
    Low,
    High,
}

impl PaperResolution {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Low => "LOW",
            Self::High => "HIGH",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
/// Pages an overlay is applied to.
pub enum OverlayMode {
    AllPages,
    NoOverlay,
    FirstPage,
    LastPage,
    AllButFirstPage,
    AllButLastPage,
    AllButFirstAndLastPage,
    FirstFile,
}

impl OverlayMode {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::AllPages => "ALL_PAGES",
            Self::NoOverlay => "NO_OVERLAY",
            Self::FirstPage => "FIRST_PAGE",
            Self::LastPage => "LAST_PAGE",
            Self::AllButFirstPage => "ALL_BUT_FIRST_PAGE",
            Self::AllButLastPage => "ALL_BUT_LAST_PAGE",
            Self::AllButFirstAndLastPage => "ALL_BUT_FIRST_AND_LAST_PAGE",
            Self::FirstFile => "FIRST_FILE",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
/// Authentication the service uses when pushing status updates to your endpoint.
pub enum AuthenticationMethod {
    #[default]
    None,
    HttpBasic,
    HttpDigest,
    OAuth,
}

impl AuthenticationMethod {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::None => "NONE",
            Self::HttpBasic => "HTTP_BASIC",
            Self::HttpDigest => "HTTP_DIGEST",
            Self::OAuth => "OAUTH",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
/// When a fax image is attached to a report mail.
pub enum FaxImageMode {
    Never,
    SuccessOnly,
    FailureOnly,
    Always,
}

impl FaxImageMode {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Never => "NEVER",
            Self::SuccessOnly => "SUCCESS_ONLY",
            Self::FailureOnly => "FAILURE_ONLY",
            Self::Always => "ALWAYS",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FaxImageFormat {
    Tiff,
    Pdf,
    PdfWithOcr,
}

impl FaxImageFormat {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Tiff => "TIFF",
            Self::Pdf => "PDF",
            Self::PdfWithOcr => "PDF_WITH_OCR",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
    Head,
    Options,
}

impl HttpMethod {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Delete => "DELETE",
            Self::Head => "HEAD",
            Self::Options => "OPTIONS",
        }
    }
}

impl std::fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
