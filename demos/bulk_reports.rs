use std::io;

use retarus_fax::{FaxClient, JobId};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let job_ids_raw = std::env::var("RETARUS_JOB_IDS").map_err(|_| {
        io::Error::new(
            io::ErrorKind::InvalidInput,
            "RETARUS_JOB_IDS environment variable is required (comma-separated ids)",
        )
    })?;
    let job_ids = job_ids_raw
        .split(',')
        .map(JobId::new)
        .collect::<Result<Vec<_>, _>>()?;

    let client = FaxClient::from_env()?;
    let reports = client.get_reports_in_bulk(job_ids).await?;
    for located in reports {
        println!(
            "{} from {}: {:?}",
            located.report.job_id, located.location, located.report.recipient_statuses
        );
    }

    Ok(())
}
