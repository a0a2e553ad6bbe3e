//! Batched GET/DELETE over an explicit list of job ids.

use super::{
    BackgroundTask, FaxClient, FaxError, STATUS_INTERNAL_SERVER_ERROR, STATUS_NOT_FOUND, STATUS_OK,
};
use crate::domain::{
    FaxBulkOperation, FaxDeletionReport, HttpMethod, JobId, LocatedReport, Location,
    STATUS_BAD_REQUEST, STATUS_SERVICE_UNAVAILABLE,
};
use crate::transport::RequestUrl;

const STATUS_UNAUTHORIZED: u16 = 401;

impl FaxClient {
    /// Fetch the reports for the given job ids in one request.
    ///
    /// The request goes to one randomly picked location of the locale; returned reports are
    /// stamped with it. A 404 yields an empty list.
    ///
    /// Errors:
    /// - [`FaxError::Auth`] on 401 or 400,
    /// - [`FaxError::Api`] on any other non-200 status or a transport failure,
    /// - [`FaxError::Parse`] when a 200 body cannot be decoded.
    pub async fn get_reports_in_bulk(
        &self,
        job_ids: impl IntoIterator<Item = JobId>,
    ) -> Result<Vec<LocatedReport>, FaxError> {
        let location = self.locale.fetch_location().clone();
        let Some(body) = self.perform_bulk(&location, HttpMethod::Get, job_ids).await? else {
            return Ok(Vec::new());
        };
        let reports = crate::transport::decode_status_reports_json(&body)
            .map_err(|err| FaxError::Parse(Box::new(err)))?;
        Ok(reports
            .into_iter()
            .map(|report| LocatedReport {
                report,
                location: location.clone(),
            })
            .collect())
    }

    /// Delete the reports for the given job ids in one request.
    ///
    /// Same routing and error rules as [`FaxClient::get_reports_in_bulk`].
    pub async fn delete_reports_in_bulk(
        &self,
        job_ids: impl IntoIterator<Item = JobId>,
    ) -> Result<Vec<FaxDeletionReport>, FaxError> {
        let location = self.locale.fetch_location().clone();
        let Some(body) = self.perform_bulk(&location, HttpMethod::Delete, job_ids).await? else {
            return Ok(Vec::new());
        };
        crate::transport::decode_deletion_reports_json(&body)
            .map_err(|err| FaxError::Parse(Box::new(err)))
    }

    pub fn spawn_get_reports_in_bulk(
        &self,
        job_ids: Vec<JobId>,
    ) -> BackgroundTask<Result<Vec<LocatedReport>, FaxError>> {
        let client = self.clone();
        self.spawn(async move { client.get_reports_in_bulk(job_ids).await })
    }

    pub fn spawn_delete_reports_in_bulk(
        &self,
        job_ids: Vec<JobId>,
    ) -> BackgroundTask<Result<Vec<FaxDeletionReport>, FaxError>> {
        let client = self.clone();
        self.spawn(async move { client.delete_reports_in_bulk(job_ids).await })
    }

    /// POST the bulk payload. `Ok(None)` means the service answered 404.
    async fn perform_bulk(
        &self,
        location: &Location,
        action: HttpMethod,
        job_ids: impl IntoIterator<Item = JobId>,
    ) -> Result<Option<String>, FaxError> {
        let operation = FaxBulkOperation::builder()
            .action(action)?
            .job_ids(job_ids)
            .build()?;
        let url = RequestUrl::BulkOperation.render(location.base_url(), &self.customer_number);
        let payload = crate::transport::encode_bulk_operation_json(&operation).map_err(|err| {
            FaxError::Api {
                message: err.to_string(),
                status: None,
                request_url: url.clone(),
                request_payload: String::new(),
                response_body: None,
                source: Some(Box::new(err)),
            }
        })?;

        let response = match self
            .execute(HttpMethod::Post, url.clone(), Some(payload.clone()))
            .await
        {
            Ok(response) => response,
            Err(err) => {
                return Err(FaxError::Api {
                    message: err.to_string(),
                    status: None,
                    request_url: url,
                    request_payload: payload,
                    response_body: None,
                    source: Some(err),
                });
            }
        };

        let message = match response.status {
            STATUS_OK => return Ok(Some(response.body)),
            STATUS_NOT_FOUND => return Ok(None),
            STATUS_UNAUTHORIZED | STATUS_BAD_REQUEST => {
                return Err(FaxError::Auth {
                    message: format!("bulk {action} rejected with status {}", response.status),
                });
            }
            STATUS_INTERNAL_SERVER_ERROR => "Internal Server Error.",
            STATUS_SERVICE_UNAVAILABLE => "Service Unavailable.",
            _ => "Cannot perform the desired bulk operation",
        };
        Err(FaxError::Api {
            message: message.to_owned(),
            status: Some(response.status),
            request_url: url,
            request_payload: payload,
            response_body: Some(response.body),
            source: None,
        })
    }
}
