//! Client layer: orchestrates transport calls and maps transport ↔ domain.

mod aggregator;
mod bulk;
mod env;
#[cfg(test)]
mod fake;
mod http;

use std::error::Error as StdError;
use std::future::Future;
use std::pin::Pin;
use std::sync::{Arc, OnceLock};
use std::task::{Context, Poll};
use std::time::Duration;

use tokio::runtime::{Handle, Runtime};
use tokio::task::{JoinError, JoinHandle};

pub use env::{ENV_CUSTOMER_NUMBER, ENV_LOCALE, ENV_PASSWORD, ENV_USERNAME};
pub use http::Credentials;

use self::http::{BoxError, HttpRequest, HttpResponse, HttpTransport, ReqwestTransport};
use crate::domain::{
    ApiResponse, FaxDeletionReport, FaxRequest, FaxStatusReport, HttpMethod, JobId,
    LocatedReport, Locale, Location, Reason, STATUS_BAD_REQUEST, STATUS_SERVICE_UNAVAILABLE,
    ValidationError,
};
use crate::transport::RequestUrl;

/// Customer number used when none is configured.
pub const DEFAULT_CUSTOMER_NUMBER: &str = "12345";

const STATUS_OK: u16 = 200;
const STATUS_CREATED: u16 = 201;
const STATUS_NOT_FOUND: u16 = 404;
const STATUS_INTERNAL_SERVER_ERROR: u16 = 500;

/// Worker pool for `spawn_*` calls made outside any Tokio runtime. Built on first use.
static SHARED_RUNTIME: OnceLock<Result<Runtime, String>> = OnceLock::new();

fn shared_runtime_handle() -> Result<Handle, String> {
    SHARED_RUNTIME
        .get_or_init(|| {
            tokio::runtime::Builder::new_multi_thread()
                .thread_name("retarus-fax-worker")
                .enable_all()
                .build()
                .map_err(|err| err.to_string())
        })
        .as_ref()
        .map(|runtime| runtime.handle().clone())
        .map_err(Clone::clone)
}

#[derive(Debug, thiserror::Error)]
/// Errors returned by [`FaxClient`].
///
/// Construction, configuration, background tasks and the bulk operations raise errors.
/// Send and the per-location fetch and delete calls report failures inside their
/// [`ApiResponse`] instead.
pub enum FaxError {
    /// One of the domain constructors rejected an invalid value.
    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Missing credentials, or the service rejected them (401/400 on a bulk call).
    #[error("authentication failed: {message}")]
    Auth { message: String },

    /// Unexpected status or I/O failure on a call that does not return an envelope.
    #[error("{message} (url: {request_url}, status: {status:?})")]
    Api {
        message: String,
        status: Option<u16>,
        request_url: String,
        request_payload: String,
        response_body: Option<String>,
        #[source]
        source: Option<BoxError>,
    },

    /// HTTP client could not be created.
    #[error("transport error: {0}")]
    Transport(#[source] Box<dyn StdError + Send + Sync>),

    /// Response body could not be parsed as the expected format.
    #[error("parse error: {0}")]
    Parse(#[source] Box<dyn StdError + Send + Sync>),

    /// A background task panicked or was cancelled.
    #[error("background task failed: {0}")]
    Join(#[from] JoinError),

    /// No runtime was available to run a background task.
    #[error("background runtime unavailable: {message}")]
    Runtime { message: String },
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
/// How region-wide operations visit their locations.
pub enum FanOut {
    /// One location after another, in declared order.
    #[default]
    Sequential,
    /// All locations at once as separate tasks. Results keep declared order.
    Concurrent,
}

#[derive(Debug)]
/// Handle to an operation running on the client's runtime.
///
/// Resolves to the same value the foreground call returns.
pub struct BackgroundTask<T> {
    inner: TaskState<T>,
}

#[derive(Debug)]
enum TaskState<T> {
    Running(JoinHandle<T>),
    Unavailable(String),
}

impl<T> Future for BackgroundTask<T> {
    type Output = Result<T, FaxError>;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        match &mut self.inner {
            TaskState::Running(handle) => {
                Pin::new(handle).poll(cx).map(|res| res.map_err(FaxError::Join))
            }
            TaskState::Unavailable(message) => Poll::Ready(Err(FaxError::Runtime {
                message: message.clone(),
            })),
        }
    }
}

#[derive(Debug, Clone)]
/// Builder for [`FaxClient`].
///
/// Use this when you need a different locale, customer number, timeout, or runtime.
pub struct FaxClientBuilder {
    credentials: Credentials,
    customer_number: String,
    locale: Locale,
    timeout: Option<Duration>,
    user_agent: Option<String>,
    runtime: Option<Handle>,
    fan_out: FanOut,
}

impl FaxClientBuilder {
    /// Create a builder targeting the EUROPE region with the default customer number.
    pub fn new(credentials: Credentials) -> Self {
        Self {
            credentials,
            customer_number: DEFAULT_CUSTOMER_NUMBER.to_owned(),
            locale: Locale::default(),
            timeout: None,
            user_agent: None,
            runtime: None,
            fan_out: FanOut::default(),
        }
    }

    /// A blank value keeps the default customer number.
    pub fn customer_number(mut self, customer_number: impl Into<String>) -> Self {
        let customer_number = customer_number.into();
        if !customer_number.trim().is_empty() {
            self.customer_number = customer_number.trim().to_owned();
        }
        self
    }

    pub fn locale(mut self, locale: impl Into<Locale>) -> Self {
        self.locale = locale.into();
        self
    }

    /// Set an HTTP client timeout applied to the entire request.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Override the HTTP `User-Agent` header.
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// Runtime for `spawn_*` calls and concurrent fan-out. Defaults to the runtime the
    /// call is made from, or a shared worker pool when called outside any runtime.
    pub fn runtime(mut self, handle: Handle) -> Self {
        self.runtime = Some(handle);
        self
    }

    pub fn fan_out(mut self, fan_out: FanOut) -> Self {
        self.fan_out = fan_out;
        self
    }

    /// Build a [`FaxClient`].
    pub fn build(self) -> Result<FaxClient, FaxError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = self.timeout {
            builder = builder.timeout(timeout);
        }
        if let Some(user_agent) = self.user_agent {
            builder = builder.user_agent(user_agent);
        }

        let client = builder
            .build()
            .map_err(|err| FaxError::Transport(Box::new(err)))?;

        Ok(FaxClient {
            credentials: self.credentials,
            customer_number: self.customer_number,
            locale: self.locale,
            runtime: self.runtime,
            fan_out: self.fan_out,
            http: Arc::new(ReqwestTransport { client }),
        })
    }
}

#[derive(Clone)]
/// High-level fax client.
///
/// Sends through the locale's send URL. Fetches and deletes go to one physical location:
/// a random one of the region for single-shot calls, every one in turn for region-wide
/// calls, or the location a report was retrieved from.
pub struct FaxClient {
    credentials: Credentials,
    customer_number: String,
    locale: Locale,
    runtime: Option<Handle>,
    fan_out: FanOut,
    http: Arc<dyn HttpTransport>,
}

impl FaxClient {
    /// Create a client for the EUROPE region with the default customer number.
    ///
    /// For more customization, use [`FaxClient::builder`].
    pub fn new(credentials: Credentials) -> Self {
        Self {
            credentials,
            customer_number: DEFAULT_CUSTOMER_NUMBER.to_owned(),
            locale: Locale::default(),
            runtime: None,
            fan_out: FanOut::default(),
            http: Arc::new(ReqwestTransport {
                client: reqwest::Client::new(),
            }),
        }
    }

    /// Start building a client with custom settings.
    pub fn builder(credentials: Credentials) -> FaxClientBuilder {
        FaxClientBuilder::new(credentials)
    }

    pub fn locale(&self) -> &Locale {
        &self.locale
    }

    pub fn customer_number(&self) -> &str {
        &self.customer_number
    }

    /// Submit a fax job through the locale's send URL.
    ///
    /// The envelope carries the job id on 200/201. A transport failure yields 503, an
    /// unreadable success body 400, and any other status is passed through with no id.
    pub async fn send_fax(&self, request: &FaxRequest) -> ApiResponse<Option<JobId>> {
        let url = RequestUrl::SendFax.render(self.locale.send_url(), &self.customer_number);
        let locale = self.locale.clone();

        let payload = match crate::transport::encode_fax_request_json(request) {
            Ok(payload) => payload,
            Err(err) => {
                tracing::warn!(error = %err, "could not encode fax request");
                return ApiResponse::new(None, STATUS_BAD_REQUEST, locale);
            }
        };

        let response = match self.execute(HttpMethod::Post, url, Some(payload)).await {
            Ok(response) => response,
            Err(_) => return ApiResponse::new(None, STATUS_SERVICE_UNAVAILABLE, locale),
        };

        if response.status != STATUS_OK && response.status != STATUS_CREATED {
            return ApiResponse::new(None, response.status, locale);
        }
        match crate::transport::decode_send_fax_json_response(&response.body) {
            Ok(job_id) => ApiResponse::new(job_id, response.status, locale),
            Err(err) => {
                tracing::warn!(error = %err, "unreadable send response");
                ApiResponse::new(None, STATUS_BAD_REQUEST, locale)
            }
        }
    }

    /// Fetch one report from a randomly picked location of the locale.
    pub async fn get_report(&self, job_id: &JobId) -> ApiResponse<Option<FaxStatusReport>> {
        let location = self.locale.fetch_location().clone();
        self.get_report_at(&location, job_id).await
    }

    /// Fetch one report from a specific location.
    pub async fn get_report_at(
        &self,
        location: &Location,
        job_id: &JobId,
    ) -> ApiResponse<Option<FaxStatusReport>> {
        let url = RequestUrl::FetchReport.render_for_job(
            location.base_url(),
            &self.customer_number,
            job_id,
        );
        let locale = Locale::Location(location.clone());

        let response = match self.execute(HttpMethod::Get, url, None).await {
            Ok(response) => response,
            Err(_) => return ApiResponse::new(None, STATUS_SERVICE_UNAVAILABLE, locale),
        };
        if response.status != STATUS_OK {
            return ApiResponse::new(None, response.status, locale);
        }
        match crate::transport::decode_status_report_json(&response.body) {
            Ok(report) => ApiResponse::new(Some(report), response.status, locale),
            Err(err) => {
                tracing::warn!(location = %location, error = %err, "unreadable report");
                ApiResponse::new(None, STATUS_BAD_REQUEST, locale)
            }
        }
    }

    /// Fetch every available report held by one location, stamped with that location.
    pub async fn get_reports_at(&self, location: &Location) -> ApiResponse<Vec<LocatedReport>> {
        let url = RequestUrl::FetchReports.render(location.base_url(), &self.customer_number);
        let locale = Locale::Location(location.clone());

        let response = match self.execute(HttpMethod::Get, url, None).await {
            Ok(response) => response,
            Err(_) => return ApiResponse::new(Vec::new(), STATUS_SERVICE_UNAVAILABLE, locale),
        };
        if response.status != STATUS_OK {
            return ApiResponse::new(Vec::new(), response.status, locale);
        }
        match crate::transport::decode_status_reports_json(&response.body) {
            Ok(reports) => {
                let located = reports
                    .into_iter()
                    .map(|report| LocatedReport {
                        report,
                        location: location.clone(),
                    })
                    .collect();
                ApiResponse::new(located, response.status, locale)
            }
            Err(err) => {
                tracing::warn!(location = %location, error = %err, "unreadable report list");
                ApiResponse::new(Vec::new(), STATUS_BAD_REQUEST, locale)
            }
        }
    }

    /// Delete the oldest reports held by one location.
    pub async fn delete_reports_at(
        &self,
        location: &Location,
    ) -> ApiResponse<Vec<FaxDeletionReport>> {
        let url = RequestUrl::DeleteReports.render(location.base_url(), &self.customer_number);
        let locale = Locale::Location(location.clone());

        let response = match self.execute(HttpMethod::Delete, url, None).await {
            Ok(response) => response,
            Err(_) => return ApiResponse::new(Vec::new(), STATUS_SERVICE_UNAVAILABLE, locale),
        };
        if response.status != STATUS_OK {
            return ApiResponse::new(Vec::new(), response.status, locale);
        }
        match crate::transport::decode_deletion_reports_json(&response.body) {
            Ok(reports) => ApiResponse::new(reports, response.status, locale),
            Err(err) => {
                tracing::warn!(location = %location, error = %err, "unreadable deletion list");
                ApiResponse::new(Vec::new(), STATUS_BAD_REQUEST, locale)
            }
        }
    }

    /// Delete one report at a randomly picked location of the locale.
    ///
    /// Prefer [`FaxClient::delete_report`] when the report came from
    /// [`FaxClient::get_reports`]: it targets the location that holds the report.
    pub async fn delete_report_by_job_id(
        &self,
        job_id: &JobId,
    ) -> ApiResponse<Option<FaxDeletionReport>> {
        let location = self.locale.fetch_location().clone();
        self.delete_report_at(&location, job_id).await
    }

    /// Delete one report at a specific location.
    ///
    /// - 200: the parsed report; a reason of `INTERNAL_ERROR` forces status 500, and an
    ///   unreadable body becomes `{deleted: false, reason: INTERNAL_ERROR}` with status 500.
    /// - 404/400: a synthesized `{deleted: false, reason: NOT_FOUND}` with the raw status.
    /// - anything else: no report, raw status. A transport failure yields 503.
    pub async fn delete_report_at(
        &self,
        location: &Location,
        job_id: &JobId,
    ) -> ApiResponse<Option<FaxDeletionReport>> {
        let url = RequestUrl::DeleteReport.render_for_job(
            location.base_url(),
            &self.customer_number,
            job_id,
        );
        let locale = Locale::Location(location.clone());

        let response = match self.execute(HttpMethod::Delete, url, None).await {
            Ok(response) => response,
            Err(_) => return ApiResponse::new(None, STATUS_SERVICE_UNAVAILABLE, locale),
        };

        match response.status {
            STATUS_OK => {
                let report = crate::transport::decode_deletion_report_json(&response.body)
                    .unwrap_or_else(|err| {
                        tracing::warn!(location = %location, error = %err, "unreadable deletion report");
                        FaxDeletionReport {
                            job_id: job_id.clone(),
                            deleted: false,
                            reason: Some(Reason::InternalError),
                        }
                    });
                let status = if report.reason == Some(Reason::InternalError) {
                    STATUS_INTERNAL_SERVER_ERROR
                } else {
                    response.status
                };
                ApiResponse::new(Some(report), status, locale)
            }
            STATUS_NOT_FOUND | STATUS_BAD_REQUEST => ApiResponse::new(
                Some(FaxDeletionReport::not_found(job_id.clone())),
                response.status,
                locale,
            ),
            other => ApiResponse::new(None, other, locale),
        }
    }

    /// Submit a fax job on the client's runtime.
    pub fn spawn_send_fax(&self, request: FaxRequest) -> BackgroundTask<ApiResponse<Option<JobId>>> {
        let client = self.clone();
        self.spawn(async move { client.send_fax(&request).await })
    }

    fn spawn<F>(&self, future: F) -> BackgroundTask<F::Output>
    where
        F: Future + Send + 'static,
        F::Output: Send + 'static,
    {
        let handle = match &self.runtime {
            Some(handle) => Ok(handle.clone()),
            None => Handle::try_current().or_else(|_| shared_runtime_handle()),
        };
        let inner = match handle {
            Ok(handle) => TaskState::Running(handle.spawn(future)),
            Err(message) => {
                tracing::warn!(%message, "no runtime for background task");
                TaskState::Unavailable(message)
            }
        };
        BackgroundTask { inner }
    }

    async fn execute(
        &self,
        method: HttpMethod,
        url: String,
        body: Option<String>,
    ) -> Result<HttpResponse, BoxError> {
        tracing::debug!(%method, %url, "sending request");
        let request = HttpRequest {
            method,
            url,
            authorization: self.credentials.basic_authorization(),
            body,
        };
        let url = request.url.clone();
        match self.http.execute(request).await {
            Ok(response) => {
                if !(200..=299).contains(&response.status) {
                    tracing::warn!(%method, %url, status = response.status, "unsuccessful response");
                } else {
                    tracing::debug!(%method, %url, status = response.status, "response received");
                }
                Ok(response)
            }
            Err(err) => {
                tracing::warn!(%method, %url, error = %err, "request failed");
                Err(err)
            }
        }
    }
}

impl std::fmt::Debug for FaxClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FaxClient")
            .field("credentials", &self.credentials)
            .field("customer_number", &self.customer_number)
            .field("locale", &self.locale)
            .field("fan_out", &self.fan_out)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
pub(crate) fn make_client(locale: impl Into<Locale>, transport: fake::FakeTransport) -> FaxClient {
    FaxClient {
        credentials: Credentials::new("user", "pass").unwrap(),
        customer_number: DEFAULT_CUSTOMER_NUMBER.to_owned(),
        locale: locale.into(),
        runtime: None,
        fan_out: FanOut::Sequential,
        http: Arc::new(transport),
    }
}
