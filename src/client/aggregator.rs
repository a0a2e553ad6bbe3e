//! Region-wide fetch and delete built from per-location calls.

use std::future::Future;

use super::{BackgroundTask, FanOut, FaxClient};
use crate::domain::{
    ApiResponse, FaxDeletionReport, FaxStatusReport, LocatedReport, Locale, Location,
    STATUS_SERVICE_UNAVAILABLE,
};

impl FaxClient {
    /// Fetch all available reports from every location of the locale.
    ///
    /// Returns exactly one envelope per location, in the locale's declared location order,
    /// whatever the individual outcomes. Every report is stamped with its location.
    pub async fn get_reports(&self) -> Vec<ApiResponse<Vec<LocatedReport>>> {
        self.fan_out_locations(|client, location| async move {
            client.get_reports_at(&location).await
        })
        .await
    }

    /// Delete the oldest reports at every location of the locale.
    ///
    /// One envelope per location, in declared order. Nothing is rolled back when one
    /// location fails.
    pub async fn delete_reports(&self) -> Vec<ApiResponse<Vec<FaxDeletionReport>>> {
        self.fan_out_locations(|client, location| async move {
            client.delete_reports_at(&location).await
        })
        .await
    }

    /// Delete a report at the location it was retrieved from.
    pub async fn delete_report(
        &self,
        report: &LocatedReport,
    ) -> ApiResponse<Option<FaxDeletionReport>> {
        self.delete_report_at(&report.location, &report.report.job_id)
            .await
    }

    /// Delete a report whose origin is unknown, at a randomly picked location.
    pub async fn delete_unlocated_report(
        &self,
        report: &FaxStatusReport,
    ) -> ApiResponse<Option<FaxDeletionReport>> {
        self.delete_report_by_job_id(&report.job_id).await
    }

    pub fn spawn_get_reports(&self) -> BackgroundTask<Vec<ApiResponse<Vec<LocatedReport>>>> {
        let client = self.clone();
        self.spawn(async move { client.get_reports().await })
    }

    pub fn spawn_delete_reports(
        &self,
    ) -> BackgroundTask<Vec<ApiResponse<Vec<FaxDeletionReport>>>> {
        let client = self.clone();
        self.spawn(async move { client.delete_reports().await })
    }

    pub fn spawn_delete_report(
        &self,
        report: LocatedReport,
    ) -> BackgroundTask<ApiResponse<Option<FaxDeletionReport>>> {
        let client = self.clone();
        self.spawn(async move { client.delete_report(&report).await })
    }

    async fn fan_out_locations<T, F, Fut>(&self, call: F) -> Vec<ApiResponse<Vec<T>>>
    where
        T: Send + 'static,
        F: Fn(FaxClient, Location) -> Fut,
        Fut: Future<Output = ApiResponse<Vec<T>>> + Send + 'static,
    {
        let locations = self.locale.locations().to_vec();
        match self.fan_out {
            FanOut::Sequential => {
                let mut responses = Vec::with_capacity(locations.len());
                for location in locations {
                    responses.push(call(self.clone(), location).await);
                }
                responses
            }
            FanOut::Concurrent => {
                let tasks: Vec<_> = locations
                    .into_iter()
                    .map(|location| {
                        let task = self.spawn(call(self.clone(), location.clone()));
                        (location, task)
                    })
                    .collect();

                // Slots are filled in declared order, not completion order.
                let mut responses = Vec::with_capacity(tasks.len());
                for (location, task) in tasks {
                    let response = task.await.unwrap_or_else(|err| {
                        tracing::warn!(location = %location, error = %err, "location task failed");
                        ApiResponse::new(
                            Vec::new(),
                            STATUS_SERVICE_UNAVAILABLE,
                            Locale::Location(location.clone()),
                        )
                    });
                    responses.push(response);
                }
                responses
            }
        }
    }
}
