//! Domain layer: strong types with validation and invariants (no network I/O).

mod locale;
mod options;
mod request;
mod response;
mod validation;
mod value;

pub use locale::{Locale, Location, Region};
pub use options::{
    JobValidation, JobValidationBuilder, Metadata, MetadataBuilder, Overlay, RenderingOptions,
    ReportMail, StatusPush, StatusPushBuilder, StatusReportOptions, TransportOptions,
    TransportOptionsBuilder,
};
pub use request::{
    Document, DocumentBuilder, FaxBulkOperation, FaxBulkOperationBuilder, FaxRecipient,
    FaxRecipientBuilder, FaxRequest, FaxRequestBuilder, Reference, ReferenceBuilder,
};
pub use response::{
    ApiResponse, FaxDeletionReport, FaxStatusReport, LocatedReport, Reason, RecipientStatus,
    STATUS_BAD_REQUEST, STATUS_SERVICE_UNAVAILABLE,
};
pub use validation::ValidationError;
pub use value::{
    AuthenticationMethod, Charset, FaxImageFormat, FaxImageMode, FaxNumber, HttpMethod, JobId,
    JobTime, OverlayMode, PaperFormat, PaperResolution, PhoneNumber, Property,
};
