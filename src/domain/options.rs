use chrono::{DateTime, Utc};

use crate::domain::validation::ValidationError;
use crate::domain::value::{
    AuthenticationMethod, FaxImageFormat, FaxImageMode, JobTime, OverlayMode, PaperFormat,
    PaperResolution,
};

#[derive(Debug, Clone, PartialEq, Eq, Default)]
/// Delivery options (`transportOptions`).
pub struct TransportOptions {
    csid: Option<String>,
    is_express: bool,
    is_blacklist_enabled: bool,
}

impl TransportOptions {
    /// JSON field name used by the service (`csid`).
    pub const CSID_FIELD: &'static str = "csid";
    pub const MAX_CSID_LEN: usize = 20;

    pub fn builder() -> TransportOptionsBuilder {
        TransportOptionsBuilder::default()
    }

    /// Sender identification shown on the receiving fax machine.
    pub fn csid(&self) -> Option<&str> {
        self.csid.as_deref()
    }

    pub fn is_express(&self) -> bool {
        self.is_express
    }

    /// Whether the service checks recipients against the deny list.
    pub fn is_blacklist_enabled(&self) -> bool {
        self.is_blacklist_enabled
    }
}

#[derive(Debug, Clone, Default)]
pub struct TransportOptionsBuilder {
    inner: TransportOptions,
}

impl TransportOptionsBuilder {
    /// Invariant: at most 20 characters.
    pub fn csid(mut self, csid: impl Into<String>) -> Result<Self, ValidationError> {
        let csid = csid.into();
        let len = csid.chars().count();
        if len > TransportOptions::MAX_CSID_LEN {
            return Err(ValidationError::TooLong {
                field: TransportOptions::CSID_FIELD,
                max: TransportOptions::MAX_CSID_LEN,
                actual: len,
            });
        }
        self.inner.csid = Some(csid);
        Ok(self)
    }

    pub fn is_express(mut self, is_express: bool) -> Self {
        self.inner.is_express = is_express;
        self
    }

    pub fn is_blacklist_enabled(mut self, enabled: bool) -> Self {
        self.inner.is_blacklist_enabled = enabled;
        self
    }

    pub fn build(self) -> TransportOptions {
        self.inner
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Overlay {
    pub name: String,
    pub mode: OverlayMode,
}

impl Overlay {
    pub fn new(name: impl Into<String>, mode: OverlayMode) -> Self {
        Self {
            name: name.into(),
            mode,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
/// Page layout options (`renderingOptions`).
pub struct RenderingOptions {
    pub paper_format: Option<PaperFormat>,
    pub resolution: Option<PaperResolution>,
    pub coverpage_template: Option<String>,
    pub overlay: Option<Overlay>,
    /// Header line template, e.g. `%tz=CEST Testfax: CSID: %C`.
    pub header: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
/// E-mail delivery of status reports (`reportMail`).
pub struct ReportMail {
    pub success_address: Option<String>,
    pub failure_address: Option<String>,
    pub attached_fax_image_mode: Option<FaxImageMode>,
    pub attached_fax_image_format: Option<FaxImageFormat>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// HTTP push of status reports to a caller endpoint (`httpStatusPush`).
pub struct StatusPush {
    url: String,
    principal: Option<String>,
    credentials: Option<String>,
    auth_method: AuthenticationMethod,
}

impl StatusPush {
    /// JSON field name used by the service (`targetUrl`).
    pub const URL_FIELD: &'static str = "targetUrl";

    pub fn builder() -> StatusPushBuilder {
        StatusPushBuilder::default()
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn principal(&self) -> Option<&str> {
        self.principal.as_deref()
    }

    pub fn credentials(&self) -> Option<&str> {
        self.credentials.as_deref()
    }

    pub fn auth_method(&self) -> AuthenticationMethod {
        self.auth_method
    }
}

#[derive(Debug, Clone, Default)]
pub struct StatusPushBuilder {
    url: Option<String>,
    principal: Option<String>,
    credentials: Option<String>,
    auth_method: Option<AuthenticationMethod>,
}

impl StatusPushBuilder {
    pub fn url(mut self, url: impl Into<String>) -> Result<Self, ValidationError> {
        let url = url.into();
        if url.trim().is_empty() {
            return Err(ValidationError::Empty {
                field: StatusPush::URL_FIELD,
            });
        }
        self.url = Some(url);
        Ok(self)
    }

    pub fn principal(mut self, principal: impl Into<String>) -> Self {
        self.principal = Some(principal.into());
        self
    }

    pub fn credentials(mut self, credentials: impl Into<String>) -> Self {
        self.credentials = Some(credentials.into());
        self
    }

    pub fn auth_method(mut self, method: AuthenticationMethod) -> Self {
        self.auth_method = Some(method);
        self
    }

    /// Authentication defaults to [`AuthenticationMethod::None`].
    pub fn build(self) -> Result<StatusPush, ValidationError> {
        let url = self.url.ok_or(ValidationError::Empty {
            field: StatusPush::URL_FIELD,
        })?;
        Ok(StatusPush {
            url,
            principal: self.principal,
            credentials: self.credentials,
            auth_method: self.auth_method.unwrap_or_default(),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
/// Where status reports are delivered (`statusReportOptions`).
pub struct StatusReportOptions {
    pub report_mail: Option<ReportMail>,
    pub status_push: Option<StatusPush>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
/// Validity window of a job (`jobValid`).
pub struct JobValidation {
    start: Option<JobTime>,
    end: Option<JobTime>,
}

impl JobValidation {
    pub fn builder() -> JobValidationBuilder {
        JobValidationBuilder::default()
    }

    pub fn start(&self) -> Option<&JobTime> {
        self.start.as_ref()
    }

    pub fn end(&self) -> Option<&JobTime> {
        self.end.as_ref()
    }
}

#[derive(Debug, Clone, Default)]
pub struct JobValidationBuilder {
    inner: JobValidation,
}

impl JobValidationBuilder {
    /// ISO-8601 instant or duration.
    pub fn start_time(mut self, start: impl Into<String>) -> Result<Self, ValidationError> {
        self.inner.start = Some(JobTime::parse("start", start)?);
        Ok(self)
    }

    /// ISO-8601 instant or duration.
    pub fn expiry_time(mut self, end: impl Into<String>) -> Result<Self, ValidationError> {
        self.inner.end = Some(JobTime::parse("end", end)?);
        Ok(self)
    }

    pub fn start_instant(mut self, start: DateTime<Utc>) -> Self {
        self.inner.start = Some(JobTime::from_instant(start));
        self
    }

    pub fn expiry_instant(mut self, end: DateTime<Utc>) -> Self {
        self.inner.end = Some(JobTime::from_instant(end));
        self
    }

    pub fn build(self) -> JobValidation {
        self.inner
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Job metadata (`meta`).
pub struct Metadata {
    customer_reference: String,
    job_validation: Option<JobValidation>,
}

impl Metadata {
    /// JSON field name used by the service (`customerReference`).
    pub const CUSTOMER_REFERENCE_FIELD: &'static str = "customerReference";

    pub fn builder() -> MetadataBuilder {
        MetadataBuilder::default()
    }

    pub fn customer_reference(&self) -> &str {
        &self.customer_reference
    }

    pub fn job_validation(&self) -> Option<&JobValidation> {
        self.job_validation.as_ref()
    }
}

#[derive(Debug, Clone, Default)]
pub struct MetadataBuilder {
    customer_reference: Option<String>,
    job_validation: Option<JobValidation>,
}

impl MetadataBuilder {
    pub fn customer_reference(mut self, value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        if value.trim().is_empty() {
            return Err(ValidationError::Empty {
                field: Metadata::CUSTOMER_REFERENCE_FIELD,
            });
        }
        self.customer_reference = Some(value);
        Ok(self)
    }

    pub fn job_validation(mut self, job_validation: JobValidation) -> Self {
        self.job_validation = Some(job_validation);
        self
    }

    pub fn build(self) -> Result<Metadata, ValidationError> {
        let customer_reference = self.customer_reference.ok_or(ValidationError::Empty {
            field: Metadata::CUSTOMER_REFERENCE_FIELD,
        })?;
        Ok(Metadata {
            customer_reference,
            job_validation: self.job_validation,
        })
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    #[test]
    fn csid_boundary_checks_incoming_value() {
        let options = TransportOptions::builder()
            .csid("c".repeat(20))
            .unwrap()
            .is_express(true)
            .build();
        assert_eq!(options.csid(), Some("cccccccccccccccccccc"));
        assert!(options.is_express());
        assert!(!options.is_blacklist_enabled());

        let err = TransportOptions::builder().csid("c".repeat(21)).unwrap_err();
        assert!(matches!(
            err,
            ValidationError::TooLong {
                field: "csid",
                max: 20,
                actual: 21
            }
        ));
    }

    #[test]
    fn status_push_requires_url_and_defaults_auth() {
        assert!(StatusPush::builder().url("  ").is_err());
        assert!(matches!(
            StatusPush::builder().build(),
            Err(ValidationError::Empty { field: "targetUrl" })
        ));

        let push = StatusPush::builder()
            .url("https://example.invalid/push")
            .unwrap()
            .build()
            .unwrap();
        assert_eq!(push.auth_method(), AuthenticationMethod::None);
        assert_eq!(push.principal(), None);

        let push = StatusPush::builder()
            .url("https://example.invalid/push")
            .unwrap()
            .principal("user")
            .credentials("secret")
            .auth_method(AuthenticationMethod::HttpBasic)
            .build()
            .unwrap();
        assert_eq!(push.auth_method(), AuthenticationMethod::HttpBasic);
        assert_eq!(push.credentials(), Some("secret"));
    }

    #[test]
    fn job_validation_validates_on_assignment() {
        let err = JobValidation::builder().start_time("next week").unwrap_err();
        assert!(matches!(
            err,
            ValidationError::InvalidTimestamp { field: "start", .. }
        ));

        let validation = JobValidation::builder()
            .start_time("2015-08-07T13:04:37.107Z")
            .unwrap()
            .expiry_time("PT2H")
            .unwrap()
            .build();
        assert_eq!(
            validation.start().map(JobTime::as_str),
            Some("2015-08-07T13:04:37.107Z")
        );
        assert_eq!(validation.end().map(JobTime::as_str), Some("PT2H"));
    }

    #[test]
    fn job_validation_accepts_instants() {
        let start = Utc.with_ymd_and_hms(2024, 1, 2, 3, 4, 5).unwrap();
        let validation = JobValidation::builder().start_instant(start).build();
        assert_eq!(
            validation.start().map(JobTime::as_str),
            Some("2024-01-02T03:04:05Z")
        );
        assert!(validation.end().is_none());
    }

    #[test]
    fn metadata_requires_customer_reference() {
        assert!(Metadata::builder().customer_reference(" ").is_err());
        assert!(matches!(
            Metadata::builder().build(),
            Err(ValidationError::Empty {
                field: "customerReference"
            })
        ));

        let meta = Metadata::builder()
            .customer_reference("12345")
            .unwrap()
            .build()
            .unwrap();
        assert_eq!(meta.customer_reference(), "12345");
        assert!(meta.job_validation().is_none());
    }
}
