use serde::Deserialize;

use super::TransportError;
use crate::domain::{FaxDeletionReport, JobId, Reason};

#[derive(Debug, Deserialize)]
struct DeletionReportsJsonResponse {
    #[serde(default)]
    reports: Option<Vec<DeletionReportJson>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct DeletionReportJson {
    job_id: String,
    #[serde(default)]
    deleted: bool,
    #[serde(default)]
    reason: Option<String>,
}

impl TryFrom<DeletionReportJson> for FaxDeletionReport {
    type Error = TransportError;

    fn try_from(value: DeletionReportJson) -> Result<Self, Self::Error> {
        Ok(Self {
            job_id: JobId::new(value.job_id).map_err(TransportError::InvalidJobId)?,
            deleted: value.deleted,
            reason: value.reason.as_deref().map(Reason::from_wire),
        })
    }
}

/// Decode the body of `DELETE .../fax/reports/{jobId}`.
pub fn decode_deletion_report_json(json: &str) -> Result<FaxDeletionReport, TransportError> {
    let parsed: DeletionReportJson = serde_json::from_str(json)?;
    parsed.try_into()
}

/// Decode the `{"reports": [...]}` body of a delete-all or bulk delete call.
pub fn decode_deletion_reports_json(json: &str) -> Result<Vec<FaxDeletionReport>, TransportError> {
    let parsed: DeletionReportsJsonResponse = serde_json::from_str(json)?;
    parsed
        .reports
        .unwrap_or_default()
        .into_iter()
        .map(FaxDeletionReport::try_from)
        .collect()
}
