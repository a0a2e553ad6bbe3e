use std::path::Path;
use std::sync::Arc;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;

use crate::domain::options::{Metadata, RenderingOptions, StatusReportOptions, TransportOptions};
use crate::domain::validation::ValidationError;
use crate::domain::value::{Charset, FaxNumber, HttpMethod, JobId, PhoneNumber, Property};

#[derive(Debug, Clone, PartialEq, Eq)]
/// A document to be faxed, either inline (base64 `data`) or fetched by the service from
/// `reference_url`. When both are present the service uses the reference.
pub struct Document {
    filename: String,
    charset: Option<Charset>,
    reference_url: Option<String>,
    data: Option<String>,
}

impl Document {
    /// JSON field name used by the service for the filename (`name`).
    pub const FIELD: &'static str = "name";
    pub const MAX_FILENAME_LEN: usize = 32;

    pub fn builder() -> DocumentBuilder {
        DocumentBuilder::default()
    }

    pub fn filename(&self) -> &str {
        &self.filename
    }

    pub fn charset(&self) -> Option<Charset> {
        self.charset
    }

    pub fn reference_url(&self) -> Option<&str> {
        self.reference_url.as_deref()
    }

    /// Base64-encoded file content.
    pub fn data(&self) -> Option<&str> {
        self.data.as_deref()
    }
}

#[derive(Debug, Clone, Default)]
pub struct DocumentBuilder {
    filename: Option<String>,
    charset: Option<Charset>,
    reference_url: Option<String>,
    data: Option<String>,
}

impl DocumentBuilder {
    /// Set the filename.
    ///
    /// Invariant: at most 32 characters out of `[a-zA-Z0-9-_.]`.
    pub fn filename(mut self, filename: impl Into<String>) -> Result<Self, ValidationError> {
        let filename = filename.into();
        if filename.is_empty() {
            return Err(ValidationError::Empty {
                field: Document::FIELD,
            });
        }
        let len = filename.chars().count();
        if len > Document::MAX_FILENAME_LEN {
            return Err(ValidationError::TooLong {
                field: Document::FIELD,
                max: Document::MAX_FILENAME_LEN,
                actual: len,
            });
        }
        if !filename
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'))
        {
            return Err(ValidationError::InvalidCharacters {
                field: Document::FIELD,
                input: filename,
            });
        }
        self.filename = Some(filename);
        Ok(self)
    }

    pub fn charset(mut self, charset: Charset) -> Self {
        self.charset = Some(charset);
        self
    }

    pub fn reference_url(mut self, reference_url: impl Into<String>) -> Self {
        self.reference_url = Some(reference_url.into());
        self
    }

    /// Set already base64-encoded content.
    pub fn data(mut self, data: impl Into<String>) -> Self {
        self.data = Some(data.into());
        self
    }

    /// Read a file, base64-encode it as `data` and take the filename from its basename.
    pub fn file_path(self, path: impl AsRef<Path>) -> Result<Self, ValidationError> {
        let path = path.as_ref();
        let filename = path
            .file_name()
            .and_then(|name| name.to_str())
            .ok_or(ValidationError::Empty {
                field: Document::FIELD,
            })?;
        let builder = self.filename(filename)?;

        let content = std::fs::read(path).map_err(|source| ValidationError::Io {
            path: path.to_path_buf(),
            source: Arc::new(source),
        })?;
        Ok(builder.data(STANDARD.encode(content)))
    }

    /// Build the document.
    ///
    /// Text documents (`.txt`) without an explicit charset default to UTF-8.
    pub fn build(self) -> Result<Document, ValidationError> {
        let filename = self
            .filename
            .filter(|name| !name.trim().is_empty())
            .ok_or(ValidationError::Empty {
                field: Document::FIELD,
            })?;

        let has_data = self.data.as_deref().is_some_and(|d| !d.trim().is_empty());
        let has_reference = self
            .reference_url
            .as_deref()
            .is_some_and(|r| !r.trim().is_empty());
        if !has_data && !has_reference {
            return Err(ValidationError::MissingContent);
        }

        let charset = match self.charset {
            None if filename.ends_with(".txt") => Some(Charset::default()),
            other => other,
        };

        Ok(Document {
            filename,
            charset,
            reference_url: self.reference_url,
            data: self.data,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// A fax destination plus cover-page template variables.
///
/// Properties keep insertion order and may repeat keys.
pub struct FaxRecipient {
    number: FaxNumber,
    properties: Vec<Property>,
}

impl FaxRecipient {
    pub fn builder() -> FaxRecipientBuilder {
        FaxRecipientBuilder::default()
    }

    pub fn number(&self) -> &FaxNumber {
        &self.number
    }

    pub fn properties(&self) -> &[Property] {
        &self.properties
    }
}

#[derive(Debug, Clone, Default)]
pub struct FaxRecipientBuilder {
    number: Option<FaxNumber>,
    properties: Vec<Property>,
}

impl FaxRecipientBuilder {
    pub fn number(mut self, number: impl Into<String>) -> Result<Self, ValidationError> {
        self.number = Some(FaxNumber::new(number)?);
        Ok(self)
    }

    /// Use an already parsed number; it is sent in E.164 form.
    pub fn phone_number(mut self, number: PhoneNumber) -> Self {
        self.number = Some(number.into());
        self
    }

    /// Append a template variable. Pairs with a blank key or value are skipped.
    pub fn property(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        let property = Property::new(key, value);
        if !property.key.trim().is_empty() && !property.value.trim().is_empty() {
            self.properties.push(property);
        }
        self
    }

    pub fn properties(mut self, properties: impl IntoIterator<Item = Property>) -> Self {
        self.properties.extend(properties);
        self
    }

    pub fn build(self) -> Result<FaxRecipient, ValidationError> {
        let number = self.number.ok_or(ValidationError::Empty {
            field: FaxNumber::FIELD,
        })?;
        Ok(FaxRecipient {
            number,
            properties: self.properties,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
/// Customer-side identifiers attached to a job and echoed back in status reports.
pub struct Reference {
    customer_defined_id: Option<String>,
    billing_code: Option<String>,
    billing_info: Option<String>,
}

impl Reference {
    pub const MAX_CUSTOMER_DEFINED_ID_LEN: usize = 256;
    pub const MAX_BILLING_CODE_LEN: usize = 80;
    pub const MAX_BILLING_INFO_LEN: usize = 80;

    pub fn builder() -> ReferenceBuilder {
        ReferenceBuilder::default()
    }

    /// Assemble a reference exactly as reported by the service, without length checks.
    pub(crate) fn from_service(
        customer_defined_id: Option<String>,
        billing_code: Option<String>,
        billing_info: Option<String>,
    ) -> Self {
        Self {
            customer_defined_id,
            billing_code,
            billing_info,
        }
    }

    pub fn customer_defined_id(&self) -> Option<&str> {
        self.customer_defined_id.as_deref()
    }

    pub fn billing_code(&self) -> Option<&str> {
        self.billing_code.as_deref()
    }

    pub fn billing_info(&self) -> Option<&str> {
        self.billing_info.as_deref()
    }
}

#[derive(Debug, Clone, Default)]
/// Builder for [`Reference`].
///
/// Each setter rejects the call when the value *currently stored* for that field exceeds its
/// cap; the incoming value itself is not measured. An over-long value is therefore accepted
/// once and only surfaces as an error on the next assignment of the same field.
pub struct ReferenceBuilder {
    customer_defined_id: Option<String>,
    billing_code: Option<String>,
    billing_info: Option<String>,
}

impl ReferenceBuilder {
    pub fn customer_defined_id(mut self, value: impl Into<String>) -> Result<Self, ValidationError> {
        check_stored_len(
            "customerDefinedId",
            self.customer_defined_id.as_deref(),
            Reference::MAX_CUSTOMER_DEFINED_ID_LEN,
        )?;
        self.customer_defined_id = Some(value.into());
        Ok(self)
    }

    pub fn billing_code(mut self, value: impl Into<String>) -> Result<Self, ValidationError> {
        check_stored_len(
            "billingCode",
            self.billing_code.as_deref(),
            Reference::MAX_BILLING_CODE_LEN,
        )?;
        self.billing_code = Some(value.into());
        Ok(self)
    }

    pub fn billing_info(mut self, value: impl Into<String>) -> Result<Self, ValidationError> {
        check_stored_len(
            "billingInfo",
            self.billing_info.as_deref(),
            Reference::MAX_BILLING_INFO_LEN,
        )?;
        self.billing_info = Some(value.into());
        Ok(self)
    }

    pub fn build(self) -> Reference {
        Reference {
            customer_defined_id: self.customer_defined_id,
            billing_code: self.billing_code,
            billing_info: self.billing_info,
        }
    }
}

fn check_stored_len(
    field: &'static str,
    stored: Option<&str>,
    max: usize,
) -> Result<(), ValidationError> {
    match stored.map(|value| value.chars().count()) {
        Some(actual) if actual > max => Err(ValidationError::TooLong { field, max, actual }),
        _ => Ok(()),
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// A complete fax job: recipients, documents and optional delivery settings.
///
/// Invariant: at least one recipient.
pub struct FaxRequest {
    documents: Vec<Document>,
    recipients: Vec<FaxRecipient>,
    transport_options: Option<TransportOptions>,
    rendering_options: Option<RenderingOptions>,
    status_report_options: Option<StatusReportOptions>,
    metadata: Option<Metadata>,
    reference: Option<Reference>,
}

impl FaxRequest {
    /// JSON field name used by the service (`recipients`).
    pub const RECIPIENTS_FIELD: &'static str = "recipients";

    pub fn builder() -> FaxRequestBuilder {
        FaxRequestBuilder::default()
    }

    pub fn documents(&self) -> &[Document] {
        &self.documents
    }

    pub fn recipients(&self) -> &[FaxRecipient] {
        &self.recipients
    }

    pub fn transport_options(&self) -> Option<&TransportOptions> {
        self.transport_options.as_ref()
    }

    pub fn rendering_options(&self) -> Option<&RenderingOptions> {
        self.rendering_options.as_ref()
    }

    pub fn status_report_options(&self) -> Option<&StatusReportOptions> {
        self.status_report_options.as_ref()
    }

    pub fn metadata(&self) -> Option<&Metadata> {
        self.metadata.as_ref()
    }

    pub fn reference(&self) -> Option<&Reference> {
        self.reference.as_ref()
    }
}

#[derive(Debug, Clone, Default)]
pub struct FaxRequestBuilder {
    documents: Vec<Document>,
    recipients: Vec<FaxRecipient>,
    transport_options: Option<TransportOptions>,
    rendering_options: Option<RenderingOptions>,
    status_report_options: Option<StatusReportOptions>,
    metadata: Option<Metadata>,
    reference: Option<Reference>,
}

impl FaxRequestBuilder {
    pub fn document(mut self, document: Document) -> Self {
        self.documents.push(document);
        self
    }

    pub fn documents(mut self, documents: impl IntoIterator<Item = Document>) -> Self {
        self.documents.extend(documents);
        self
    }

    pub fn recipient(mut self, recipient: FaxRecipient) -> Self {
        self.recipients.push(recipient);
        self
    }

    pub fn recipients(mut self, recipients: impl IntoIterator<Item = FaxRecipient>) -> Self {
        self.recipients.extend(recipients);
        self
    }

    /// Shorthand for a recipient without template properties.
    pub fn recipient_number(self, number: impl Into<String>) -> Result<Self, ValidationError> {
        let recipient = FaxRecipient::builder().number(number)?.build()?;
        Ok(self.recipient(recipient))
    }

    pub fn recipient_numbers<I, S>(mut self, numbers: I) -> Result<Self, ValidationError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for number in numbers {
            self = self.recipient_number(number)?;
        }
        Ok(self)
    }

    pub fn transport_options(mut self, options: TransportOptions) -> Self {
        self.transport_options = Some(options);
        self
    }

    pub fn rendering_options(mut self, options: RenderingOptions) -> Self {
        self.rendering_options = Some(options);
        self
    }

    pub fn status_report_options(mut self, options: StatusReportOptions) -> Self {
        self.status_report_options = Some(options);
        self
    }

    pub fn metadata(mut self, metadata: Metadata) -> Self {
        self.metadata = Some(metadata);
        self
    }

    pub fn reference(mut self, reference: Reference) -> Self {
        self.reference = Some(reference);
        self
    }

    pub fn build(self) -> Result<FaxRequest, ValidationError> {
        if self.recipients.is_empty() {
            return Err(ValidationError::Empty {
                field: FaxRequest::RECIPIENTS_FIELD,
            });
        }
        Ok(FaxRequest {
            documents: self.documents,
            recipients: self.recipients,
            transport_options: self.transport_options,
            rendering_options: self.rendering_options,
            status_report_options: self.status_report_options,
            metadata: self.metadata,
            reference: self.reference,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// One batched GET or DELETE over an explicit list of job ids.
pub struct FaxBulkOperation {
    action: HttpMethod,
    job_ids: Vec<JobId>,
}

impl FaxBulkOperation {
    pub const ACTION_FIELD: &'static str = "action";

    pub fn builder() -> FaxBulkOperationBuilder {
        FaxBulkOperationBuilder::default()
    }

    pub fn action(&self) -> HttpMethod {
        self.action
    }

    pub fn job_ids(&self) -> &[JobId] {
        &self.job_ids
    }
}

#[derive(Debug, Clone, Default)]
pub struct FaxBulkOperationBuilder {
    action: Option<HttpMethod>,
    job_ids: Vec<JobId>,
}

impl FaxBulkOperationBuilder {
    /// Only [`HttpMethod::Get`] and [`HttpMethod::Delete`] are accepted.
    pub fn action(mut self, action: HttpMethod) -> Result<Self, ValidationError> {
        if !matches!(action, HttpMethod::Get | HttpMethod::Delete) {
            return Err(ValidationError::UnsupportedBulkAction {
                action: action.as_str().to_owned(),
            });
        }
        self.action = Some(action);
        Ok(self)
    }

    pub fn job_ids(mut self, job_ids: impl IntoIterator<Item = JobId>) -> Self {
        self.job_ids.extend(job_ids);
        self
    }

    pub fn build(self) -> Result<FaxBulkOperation, ValidationError> {
        let action = self.action.ok_or(ValidationError::Empty {
            field: FaxBulkOperation::ACTION_FIELD,
        })?;
        Ok(FaxBulkOperation {
            action,
            job_ids: self.job_ids,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn document_filename_boundary() {
        let ok = Document::builder()
            .filename("a".repeat(32))
            .unwrap()
            .data("SGVsbG8=")
            .build();
        assert!(ok.is_ok());

        let err = Document::builder().filename("a".repeat(33)).unwrap_err();
        assert!(matches!(
            err,
            ValidationError::TooLong {
                max: 32,
                actual: 33,
                ..
            }
        ));
    }

    #[test]
    fn document_filename_rejects_invalid_characters() {
        for bad in ["my file.pdf", "rechnung/2024.pdf", "fax#1.pdf", "straße.pdf"] {
            assert!(
                matches!(
                    Document::builder().filename(bad),
                    Err(ValidationError::InvalidCharacters { .. })
                ),
                "{bad} should be rejected"
            );
        }
        assert!(Document::builder().filename("Invoice_2024-01.v2.pdf").is_ok());
    }

    #[test]
    fn document_requires_filename_and_content() {
        let err = Document::builder().data("SGVsbG8=").build().unwrap_err();
        assert!(matches!(err, ValidationError::Empty { field: "name" }));

        let err = Document::builder()
            .filename("fax.pdf")
            .unwrap()
            .data("   ")
            .build()
            .unwrap_err();
        assert!(matches!(err, ValidationError::MissingContent));

        let doc = Document::builder()
            .filename("fax.pdf")
            .unwrap()
            .reference_url("https://example.invalid/fax.pdf")
            .build()
            .unwrap();
        assert_eq!(doc.reference_url(), Some("https://example.invalid/fax.pdf"));
        assert_eq!(doc.data(), None);
        assert_eq!(doc.charset(), None);
    }

    #[test]
    fn text_documents_default_to_utf8() {
        let doc = Document::builder()
            .filename("note.txt")
            .unwrap()
            .data("SGVsbG8=")
            .build()
            .unwrap();
        assert_eq!(doc.charset(), Some(Charset::Utf8));

        let doc = Document::builder()
            .filename("note.txt")
            .unwrap()
            .charset(Charset::Iso8859_1)
            .data("SGVsbG8=")
            .build()
            .unwrap();
        assert_eq!(doc.charset(), Some(Charset::Iso8859_1));
    }

    #[test]
    fn document_file_path_reads_and_encodes() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("hello.txt");
        std::fs::write(&path, "Hello").unwrap();

        let doc = Document::builder().file_path(&path).unwrap().build().unwrap();
        assert_eq!(doc.filename(), "hello.txt");
        assert_eq!(doc.data(), Some("SGVsbG8="));
        assert_eq!(doc.charset(), Some(Charset::Utf8));
    }

    #[test]
    fn document_file_path_wraps_io_errors() {
        let dir = tempfile::tempdir().unwrap();
        let err = Document::builder()
            .file_path(dir.path().join("missing.pdf"))
            .unwrap_err();
        match err {
            ValidationError::Io { path, source } => {
                assert!(path.ends_with("missing.pdf"));
                assert_eq!(source.kind(), std::io::ErrorKind::NotFound);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn building_twice_yields_equal_values() {
        let build = || {
            Document::builder()
                .filename("fax.pdf")
                .unwrap()
                .data("SGVsbG8=")
                .build()
                .unwrap()
        };
        assert_eq!(build(), build());

        let recipient = || {
            FaxRecipient::builder()
                .number("0049893120000")
                .unwrap()
                .property("name", "Jane")
                .build()
                .unwrap()
        };
        assert_eq!(recipient(), recipient());

        let reference = || {
            Reference::builder()
                .billing_code("bc")
                .unwrap()
                .build()
        };
        assert_eq!(reference(), reference());
    }

    #[test]
    fn recipient_requires_number_and_keeps_property_order() {
        let err = FaxRecipient::builder().build().unwrap_err();
        assert!(matches!(err, ValidationError::Empty { field: "number" }));
        assert!(FaxRecipient::builder().number("  ").is_err());

        let recipient = FaxRecipient::builder()
            .number("0049893120000")
            .unwrap()
            .property("name", "Jane")
            .property("", "skipped")
            .property("name", "Joe")
            .properties([Property::new("company", "ACME")])
            .build()
            .unwrap();
        let keys: Vec<_> = recipient
            .properties()
            .iter()
            .map(|p| (p.key.as_str(), p.value.as_str()))
            .collect();
        assert_eq!(keys, vec![("name", "Jane"), ("name", "Joe"), ("company", "ACME")]);
    }

    #[test]
    fn reference_checks_previously_stored_value() {
        let long = "x".repeat(Reference::MAX_BILLING_CODE_LEN + 1);

        // The over-long value itself is accepted...
        let builder = Reference::builder().billing_code(long.clone()).unwrap();
        // ...and only rejected on the next assignment, whatever its length.
        let err = builder.clone().billing_code("ok").unwrap_err();
        assert!(matches!(
            err,
            ValidationError::TooLong {
                field: "billingCode",
                max: 80,
                actual: 81
            }
        ));
        assert_eq!(builder.build().billing_code(), Some(long.as_str()));

        let id = "y".repeat(Reference::MAX_CUSTOMER_DEFINED_ID_LEN + 1);
        let err = Reference::builder()
            .customer_defined_id(id)
            .unwrap()
            .customer_defined_id("short")
            .unwrap_err();
        assert!(matches!(err, ValidationError::TooLong { max: 256, .. }));

        let at_cap = "z".repeat(Reference::MAX_BILLING_INFO_LEN);
        assert!(
            Reference::builder()
                .billing_info(at_cap)
                .unwrap()
                .billing_info("again")
                .is_ok()
        );
    }

    #[test]
    fn fax_request_requires_recipients() {
        let err = FaxRequest::builder().build().unwrap_err();
        assert!(matches!(err, ValidationError::Empty { field: "recipients" }));

        let request = FaxRequest::builder()
            .recipient_number("0049893120000")
            .unwrap()
            .build()
            .unwrap();
        assert_eq!(request.recipients().len(), 1);
        assert!(request.documents().is_empty());
        assert!(request.transport_options().is_none());
        assert!(request.rendering_options().is_none());
        assert!(request.status_report_options().is_none());
        assert!(request.metadata().is_none());
        assert!(request.reference().is_none());
    }

    #[test]
    fn recipient_numbers_fail_fast_on_blank_entry() {
        let err = FaxRequest::builder()
            .recipient_numbers(["0049893120000", " "])
            .unwrap_err();
        assert!(matches!(err, ValidationError::Empty { field: "number" }));
    }

    #[test]
    fn bulk_operation_accepts_only_get_and_delete() {
        for method in [HttpMethod::Get, HttpMethod::Delete] {
            assert!(FaxBulkOperation::builder().action(method).is_ok());
        }
        for method in [
            HttpMethod::Post,
            HttpMethod::Put,
            HttpMethod::Head,
            HttpMethod::Options,
        ] {
            assert!(matches!(
                FaxBulkOperation::builder().action(method),
                Err(ValidationError::UnsupportedBulkAction { .. })
            ));
        }

        let op = FaxBulkOperation::builder()
            .action(HttpMethod::Get)
            .unwrap()
            .job_ids([JobId::new("A").unwrap(), JobId::new("B").unwrap()])
            .build()
            .unwrap();
        assert_eq!(op.action(), HttpMethod::Get);
        assert_eq!(op.job_ids().len(), 2);

        assert!(FaxBulkOperation::builder().build().is_err());
    }
}
