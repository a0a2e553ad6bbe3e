use serde::{Deserialize, Serialize};

use super::TransportError;
use crate::domain::{
    Document, FaxRecipient, FaxRequest, JobId, JobTime, JobValidation, Metadata, Overlay,
    Reference, RenderingOptions, ReportMail, StatusPush, StatusReportOptions, TransportOptions,
};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct FaxRequestJson<'a> {
    reference: Option<ReferenceJson<'a>>,
    recipients: Vec<RecipientJson<'a>>,
    documents: Option<Vec<DocumentJson<'a>>>,
    transport_options: Option<TransportOptionsJson<'a>>,
    rendering_options: Option<RenderingOptionsJson<'a>>,
    status_report_options: Option<StatusReportOptionsJson<'a>>,
    meta: Option<MetaJson<'a>>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ReferenceJson<'a> {
    customer_defined_id: Option<&'a str>,
    billing_code: Option<&'a str>,
    billing_info: Option<&'a str>,
}

#[derive(Debug, Serialize)]
struct RecipientJson<'a> {
    number: &'a str,
    properties: Option<Vec<PropertyJson<'a>>>,
}

#[derive(Debug, Serialize)]
struct PropertyJson<'a> {
    key: &'a str,
    value: &'a str,
}

#[derive(Debug, Serialize)]
struct DocumentJson<'a> {
    name: &'a str,
    charset: Option<&'static str>,
    reference: Option<&'a str>,
    data: Option<&'a str>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct TransportOptionsJson<'a> {
    csid: Option<&'a str>,
    is_express: bool,
    is_blacklist_enabled: bool,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct RenderingOptionsJson<'a> {
    paper_format: Option<&'static str>,
    resolution: Option<&'static str>,
    coverpage_template: Option<&'a str>,
    overlay: Option<OverlayJson<'a>>,
    header: Option<&'a str>,
}

#[derive(Debug, Serialize)]
struct OverlayJson<'a> {
    name: &'a str,
    mode: &'static str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct StatusReportOptionsJson<'a> {
    report_mail: Option<ReportMailJson<'a>>,
    http_status_push: Option<StatusPushJson<'a>>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ReportMailJson<'a> {
    success_address: Option<&'a str>,
    failure_address: Option<&'a str>,
    attached_fax_image_mode: Option<&'static str>,
    attached_fax_image_format: Option<&'static str>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct StatusPushJson<'a> {
    target_url: &'a str,
    principal: Option<&'a str>,
    credentials: Option<&'a str>,
    auth_method: &'static str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct MetaJson<'a> {
    customer_reference: &'a str,
    job_valid: Option<JobValidJson<'a>>,
}

#[derive(Debug, Serialize)]
struct JobValidJson<'a> {
    start: Option<&'a str>,
    end: Option<&'a str>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SendFaxJsonResponse {
    #[serde(default)]
    job_id: Option<String>,
}

/// Encode the request body for `POST {sendUrl}/{custNr}/fax`.
///
/// Absent optional parts are written as `null`.
pub fn encode_fax_request_json(request: &FaxRequest) -> Result<String, TransportError> {
    let documents = request.documents();
    let body = FaxRequestJson {
        reference: request.reference().map(reference_json),
        recipients: request.recipients().iter().map(recipient_json).collect(),
        documents: (!documents.is_empty()).then(|| documents.iter().map(document_json).collect()),
        transport_options: request.transport_options().map(transport_options_json),
        rendering_options: request.rendering_options().map(rendering_options_json),
        status_report_options: request.status_report_options().map(status_report_options_json),
        meta: request.metadata().map(meta_json),
    };
    Ok(serde_json::to_string(&body)?)
}

/// Extract the job id from a successful send response. A missing or blank id yields `None`.
pub fn decode_send_fax_json_response(json: &str) -> Result<Option<JobId>, TransportError> {
    let parsed: SendFaxJsonResponse = serde_json::from_str(json)?;
    Ok(parsed.job_id.and_then(|id| JobId::new(id).ok()))
}

fn reference_json(reference: &Reference) -> ReferenceJson<'_> {
    ReferenceJson {
        customer_defined_id: reference.customer_defined_id(),
        billing_code: reference.billing_code(),
        billing_info: reference.billing_info(),
    }
}

fn recipient_json(recipient: &FaxRecipient) -> RecipientJson<'_> {
    let properties = recipient.properties();
    RecipientJson {
        number: recipient.number().as_str(),
        properties: (!properties.is_empty()).then(|| {
            properties
                .iter()
                .map(|p| PropertyJson {
                    key: &p.key,
                    value: &p.value,
                })
                .collect()
        }),
    }
}

fn document_json(document: &Document) -> DocumentJson<'_> {
    DocumentJson {
        name: document.filename(),
        charset: document.charset().map(|c| c.as_str()),
        reference: document.reference_url(),
        data: document.data(),
    }
}

fn transport_options_json(options: &TransportOptions) -> TransportOptionsJson<'_> {
    TransportOptionsJson {
        csid: options.csid(),
        is_express: options.is_express(),
        is_blacklist_enabled: options.is_blacklist_enabled(),
    }
}

fn rendering_options_json(options: &RenderingOptions) -> RenderingOptionsJson<'_> {
    RenderingOptionsJson {
        paper_format: options.paper_format.map(|f| f.as_str()),
        resolution: options.resolution.map(|r| r.as_str()),
        coverpage_template: options.coverpage_template.as_deref(),
        overlay: options.overlay.as_ref().map(overlay_json),
        header: options.header.as_deref(),
    }
}

fn overlay_json(overlay: &Overlay) -> OverlayJson<'_> {
    OverlayJson {
        name: &overlay.name,
        mode: overlay.mode.as_str(),
    }
}

fn status_report_options_json(options: &StatusReportOptions) -> StatusReportOptionsJson<'_> {
    StatusReportOptionsJson {
        report_mail: options.report_mail.as_ref().map(report_mail_json),
        http_status_push: options.status_push.as_ref().map(status_push_json),
    }
}

fn report_mail_json(mail: &ReportMail) -> ReportMailJson<'_> {
    ReportMailJson {
        success_address: mail.success_address.as_deref(),
        failure_address: mail.failure_address.as_deref(),
        attached_fax_image_mode: mail.attached_fax_image_mode.map(|m| m.as_str()),
        attached_fax_image_format: mail.attached_fax_image_format.map(|f| f.as_str()),
    }
}

fn status_push_json(push: &StatusPush) -> StatusPushJson<'_> {
    StatusPushJson {
        target_url: push.url(),
        principal: push.principal(),
        credentials: push.credentials(),
        auth_method: push.auth_method().as_str(),
    }
}

fn meta_json(meta: &Metadata) -> MetaJson<'_> {
    MetaJson {
        customer_reference: meta.customer_reference(),
        job_valid: meta.job_validation().map(job_valid_json),
    }
}

fn job_valid_json(validation: &JobValidation) -> JobValidJson<'_> {
    JobValidJson {
        start: validation.start().map(JobTime::as_str),
        end: validation.end().map(JobTime::as_str),
    }
}

#[cfg(test)]
mod tests {
    use serde_json::{Value, json};

    use super::*;
    use crate::domain::{FaxImageFormat, FaxImageMode, OverlayMode, PaperFormat, PaperResolution};

    fn full_request() -> FaxRequest {
        FaxRequest::builder()
            .reference(
                Reference::builder()
                    .customer_defined_id("cdi-testSerializesToJSON")
                    .unwrap()
                    .billing_code("bc-testSerializesToJSON")
                    .unwrap()
                    .billing_info("bi-testSerializesToJSON")
                    .unwrap()
                    .build(),
            )
            .recipients([
                FaxRecipient::builder()
                    .number("004989312000000000")
                    .unwrap()
                    .property("key123", "value123")
                    .build()
                    .unwrap(),
                FaxRecipient::builder()
                    .number("0049893120000000002")
                    .unwrap()
                    .property("key123", "value123")
                    .build()
                    .unwrap(),
            ])
            .documents([
                Document::builder()
                    .filename("test-document-withReference.txt")
                    .unwrap()
                    .reference_url("http://example.invalid/junit-test")
                    .build()
                    .unwrap(),
                Document::builder()
                    .filename("test-document-inline-byte.txt")
                    .unwrap()
                    .data("SGVsbG8sIHRoaXMgaXMgYSB0ZXN0")
                    .build()
                    .unwrap(),
            ])
            .transport_options(
                TransportOptions::builder()
                    .csid("csid-test")
                    .unwrap()
                    .is_express(true)
                    .is_blacklist_enabled(false)
                    .build(),
            )
            .rendering_options(RenderingOptions {
                paper_format: Some(PaperFormat::A4),
                resolution: Some(PaperResolution::High),
                coverpage_template: Some("coverpage-default.ftl.html".to_owned()),
                overlay: Some(Overlay::new("letterhead", OverlayMode::FirstPage)),
                header: Some("%tz=CEST Testfax: CSID: %C".to_owned()),
            })
            .status_report_options(StatusReportOptions {
                report_mail: Some(ReportMail {
                    success_address: Some("ops@example.invalid".to_owned()),
                    failure_address: Some("ops@example.invalid".to_owned()),
                    attached_fax_image_mode: Some(FaxImageMode::Always),
                    attached_fax_image_format: Some(FaxImageFormat::Pdf),
                }),
                status_push: Some(
                    StatusPush::builder()
                        .url("http://example.invalid/push")
                        .unwrap()
                        .build()
                        .unwrap(),
                ),
            })
            .metadata(
                Metadata::builder()
                    .customer_reference("12345")
                    .unwrap()
                    .job_validation(
                        JobValidation::builder()
                            .start_time("2015-08-07T13:04:37.107Z")
                            .unwrap()
                            .expiry_time("2015-08-07T14:04:37.107Z")
                            .unwrap()
                            .build(),
                    )
                    .build()
                    .unwrap(),
            )
            .build()
            .unwrap()
    }

    #[test]
    fn encode_full_request_uses_wire_field_names() {
        let encoded = encode_fax_request_json(&full_request()).unwrap();
        let value: Value = serde_json::from_str(&encoded).unwrap();

        let expected = json!({
            "reference": {
                "customerDefinedId": "cdi-testSerializesToJSON",
                "billingCode": "bc-testSerializesToJSON",
                "billingInfo": "bi-testSerializesToJSON"
            },
            "recipients": [
                {"number": "004989312000000000", "properties": [{"key": "key123", "value": "value123"}]},
                {"number": "0049893120000000002", "properties": [{"key": "key123", "value": "value123"}]}
            ],
            "documents": [
                {
                    "name": "test-document-withReference.txt",
                    "charset": "UTF-8",
                    "reference": "http://example.invalid/junit-test",
                    "data": null
                },
                {
                    "name": "test-document-inline-byte.txt",
                    "charset": "UTF-8",
                    "reference": null,
                    "data": "SGVsbG8sIHRoaXMgaXMgYSB0ZXN0"
                }
            ],
            "transportOptions": {"csid": "csid-test", "isExpress": true, "isBlacklistEnabled": false},
            "renderingOptions": {
                "paperFormat": "A4",
                "resolution": "HIGH",
                "coverpageTemplate": "coverpage-default.ftl.html",
                "overlay": {"name": "letterhead", "mode": "FIRST_PAGE"},
                "header": "%tz=CEST Testfax: CSID: %C"
            },
            "statusReportOptions": {
                "reportMail": {
                    "successAddress": "ops@example.invalid",
                    "failureAddress": "ops@example.invalid",
                    "attachedFaxImageMode": "ALWAYS",
                    "attachedFaxImageFormat": "PDF"
                },
                "httpStatusPush": {
                    "targetUrl": "http://example.invalid/push",
                    "principal": null,
                    "credentials": null,
                    "authMethod": "NONE"
                }
            },
            "meta": {
                "customerReference": "12345",
                "jobValid": {"start": "2015-08-07T13:04:37.107Z", "end": "2015-08-07T14:04:37.107Z"}
            }
        });
        assert_eq!(value, expected);
    }

    #[test]
    fn encode_minimal_request_writes_nulls() {
        let request = FaxRequest::builder()
            .recipient_number("0049893120000")
            .unwrap()
            .build()
            .unwrap();
        let value: Value = serde_json::from_str(&encode_fax_request_json(&request).unwrap()).unwrap();
        assert_eq!(
            value,
            json!({
                "reference": null,
                "recipients": [{"number": "0049893120000", "properties": null}],
                "documents": null,
                "transportOptions": null,
                "renderingOptions": null,
                "statusReportOptions": null,
                "meta": null
            })
        );
    }

    #[test]
    fn decode_send_response_extracts_job_id() {
        let job_id = decode_send_fax_json_response(r#"{"jobId":"ABC123"}"#).unwrap();
        assert_eq!(job_id.as_ref().map(JobId::as_str), Some("ABC123"));

        assert_eq!(decode_send_fax_json_response(r#"{"jobId":"  "}"#).unwrap(), None);
        assert_eq!(decode_send_fax_json_response("{}").unwrap(), None);
        assert!(decode_send_fax_json_response("not json").is_err());
    }
}
