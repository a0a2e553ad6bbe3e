//! Transport layer: URL templates and JSON wire-format details.

mod bulk;
mod deletion;
mod endpoint;
mod reports;
mod send_fax;

pub use bulk::encode_bulk_operation_json;
pub use deletion::{decode_deletion_report_json, decode_deletion_reports_json};
pub use endpoint::RequestUrl;
pub use reports::{decode_status_report_json, decode_status_reports_json};
pub use send_fax::{decode_send_fax_json_response, encode_fax_request_json};

use crate::domain::ValidationError;

#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("response contains an invalid job id: {0}")]
    InvalidJobId(#[source] ValidationError),
}
