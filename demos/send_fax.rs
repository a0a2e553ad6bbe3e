use std::io;

use retarus_fax::{Document, FaxClient, FaxRecipient, FaxRequest};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let number = std::env::var("RETARUS_FAX_NUMBER").map_err(|_| {
        io::Error::new(
            io::ErrorKind::InvalidInput,
            "RETARUS_FAX_NUMBER environment variable is required",
        )
    })?;
    let document_path = std::env::var("RETARUS_FAX_DOCUMENT").map_err(|_| {
        io::Error::new(
            io::ErrorKind::InvalidInput,
            "RETARUS_FAX_DOCUMENT environment variable is required (path to a PDF or text file)",
        )
    })?;

    let client = FaxClient::from_env()?;
    let request = FaxRequest::builder()
        .recipient(
            FaxRecipient::builder()
                .number(number)?
                .property("name", "Demo")
                .build()?,
        )
        .document(Document::builder().file_path(document_path)?.build()?)
        .build()?;

    let response = client.send_fax(&request).await;
    println!(
        "status: {}, locale: {}, job id: {:?}",
        response.status, response.locale, response.value
    );

    Ok(())
}
