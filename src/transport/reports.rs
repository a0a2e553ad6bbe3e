use serde::Deserialize;

use super::TransportError;
use crate::domain::{FaxStatusReport, JobId, Property, RecipientStatus, Reference};

#[derive(Debug, Deserialize)]
struct StatusReportsJsonResponse {
    #[serde(default)]
    reports: Option<Vec<StatusReportJson>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct StatusReportJson {
    job_id: String,
    #[serde(default)]
    recipient_status: Option<Vec<RecipientStatusJson>>,
    #[serde(default)]
    pages: Option<u32>,
    #[serde(default)]
    reference: Option<ReferenceJson>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RecipientStatusJson {
    #[serde(default)]
    number: Option<String>,
    #[serde(default)]
    properties: Option<Vec<PropertyJson>>,
    #[serde(default)]
    status: Option<String>,
    #[serde(default)]
    reason: Option<String>,
    #[serde(default)]
    sent_ts: Option<String>,
    #[serde(default)]
    duration_in_secs: Option<u32>,
    #[serde(default)]
    sent_to_number: Option<String>,
    #[serde(default)]
    remote_csid: Option<String>,
}

#[derive(Debug, Deserialize)]
struct PropertyJson {
    key: String,
    #[serde(default)]
    value: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ReferenceJson {
    #[serde(default)]
    customer_defined_id: Option<String>,
    #[serde(default)]
    billing_code: Option<String>,
    #[serde(default)]
    billing_info: Option<String>,
}

/// Decode one report from `GET .../fax/reports/{jobId}`.
pub fn decode_status_report_json(json: &str) -> Result<FaxStatusReport, TransportError> {
    let parsed: StatusReportJson = serde_json::from_str(json)?;
    parsed.try_into()
}

/// Decode the `{"reports": [...]}` listing. A missing or null list decodes as empty.
pub fn decode_status_reports_json(json: &str) -> Result<Vec<FaxStatusReport>, TransportError> {
    let parsed: StatusReportsJsonResponse = serde_json::from_str(json)?;
    parsed
        .reports
        .unwrap_or_default()
        .into_iter()
        .map(FaxStatusReport::try_from)
        .collect()
}

impl TryFrom<StatusReportJson> for FaxStatusReport {
    type Error = TransportError;

    fn try_from(value: StatusReportJson) -> Result<Self, Self::Error> {
        let job_id = JobId::new(value.job_id).map_err(TransportError::InvalidJobId)?;
        Ok(Self {
            job_id,
            recipient_statuses: value
                .recipient_status
                .unwrap_or_default()
                .into_iter()
                .map(RecipientStatus::from)
                .collect(),
            pages: value.pages.unwrap_or_default(),
            reference: value.reference.map(|r| {
                Reference::from_service(r.customer_defined_id, r.billing_code, r.billing_info)
            }),
        })
    }
}

impl From<RecipientStatusJson> for RecipientStatus {
    fn from(value: RecipientStatusJson) -> Self {
        Self {
            number: value.number,
            properties: value
                .properties
                .unwrap_or_default()
                .into_iter()
                .map(|p| Property::new(p.key, p.value.unwrap_or_default()))
                .collect(),
            status: value.status,
            reason: value.reason,
            sent_ts: value.sent_ts,
            duration_in_secs: value.duration_in_secs,
            sent_to_number: value.sent_to_number,
            remote_csid: value.remote_csid,
        }
    }
}
