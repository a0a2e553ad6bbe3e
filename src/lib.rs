//! Typed Rust client for the Retarus fax REST API.
//!
//! The crate has a domain layer of validated types, a transport layer for wire-format
//! details, and a client layer that talks to the service. Reports live on individual
//! physical locations, so region-wide calls visit every location and each returned report
//! remembers where it came from.
//!
//! ```rust,no_run
//! use retarus_fax::{Credentials, FaxClient, FaxRequest, Region};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), retarus_fax::FaxError> {
//!     let client = FaxClient::builder(Credentials::new("user", "secret")?)
//!         .customer_number("12345")
//!         .locale(Region::europe())
//!         .build()?;
//!
//!     let request = FaxRequest::builder()
//!         .recipient_number("+4989123456")?
//!         .build()?;
//!     let sent = client.send_fax(&request).await;
//!     println!("status {} job {:?}", sent.status, sent.value);
//!
//!     for response in client.get_reports().await {
//!         for located in &response.value {
//!             client.delete_report(located).await;
//!         }
//!     }
//!     Ok(())
//! }
//! ```
#![forbid(unsafe_code)]

pub mod client;
pub mod domain;
mod transport;

pub use client::{
    BackgroundTask, Credentials, DEFAULT_CUSTOMER_NUMBER, FanOut, FaxClient, FaxClientBuilder,
    FaxError,
};
pub use domain::{
    ApiResponse, Document, FaxBulkOperation, FaxDeletionReport, FaxRecipient, FaxRequest,
    FaxStatusReport, JobId, LocatedReport, Locale, Location, Reason, Reference, Region,
    ValidationError,
};
