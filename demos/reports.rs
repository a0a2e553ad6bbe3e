use retarus_fax::FaxClient;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let client = FaxClient::from_env()?;
    let delete = std::env::var("RETARUS_DELETE_REPORTS").is_ok_and(|v| v == "1");

    for response in client.get_reports().await {
        println!(
            "{}: status {}, {} report(s)",
            response.locale,
            response.status,
            response.value.len()
        );
        for located in &response.value {
            println!(
                "  {} ({} pages, {} recipient(s))",
                located.report.job_id,
                located.report.pages,
                located.report.recipient_statuses.len()
            );
            if delete {
                let deleted = client.delete_report(located).await;
                println!("    deleted at {}: status {}", deleted.locale, deleted.status);
            }
        }
    }

    Ok(())
}
