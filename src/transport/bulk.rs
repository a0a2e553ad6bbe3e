use serde::Serialize;

use super::TransportError;
use crate::domain::{FaxBulkOperation, JobId};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct BulkOperationJson<'a> {
    action: &'static str,
    job_ids: Vec<&'a str>,
}

/// Encode the body for `POST .../fax/reports`.
pub fn encode_bulk_operation_json(operation: &FaxBulkOperation) -> Result<String, TransportError> {
    let body = BulkOperationJson {
        action: operation.action().as_str(),
        job_ids: operation.job_ids().iter().map(JobId::as_str).collect(),
    };
    Ok(serde_json::to_string(&body)?)
}

#[cfg(test)]
mod tests {
    use serde_json::{Value, json};

    use super::*;
    use crate::domain::HttpMethod;

    #[test]
    fn encode_bulk_delete() {
        let operation = FaxBulkOperation::builder()
            .action(HttpMethod::Delete)
            .unwrap()
            .job_ids([JobId::new("J1").unwrap(), JobId::new("J2").unwrap()])
            .build()
            .unwrap();
        let value: Value =
            serde_json::from_str(&encode_bulk_operation_json(&operation).unwrap()).unwrap();
        assert_eq!(value, json!({"action": "DELETE", "jobIds": ["J1", "J2"]}));
    }

    #[test]
    fn encode_bulk_get_without_ids() {
        let operation = FaxBulkOperation::builder()
            .action(HttpMethod::Get)
            .unwrap()
            .build()
            .unwrap();
        assert_eq!(
            encode_bulk_operation_json(&operation).unwrap(),
            r#"{"action":"GET","jobIds":[]}"#
        );
    }
}
