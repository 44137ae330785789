//! Terminal version of the certificate form. Prompts for each field, submits
//! the form to the API and saves the returned PDF.

use enrollment_certificates::collector::{CertificateClient, Field, FormSession};
use enrollment_certificates::config::ClientConfig;
use std::io::Write;
use tokio::io::{AsyncBufReadExt, BufReader, Lines, Stdin};

type Input = Lines<BufReader<Stdin>>;

async fn prompt(input: &mut Input, question: &str) -> std::io::Result<Option<String>> {
    print!("{question}");
    std::io::stdout().flush()?;
    Ok(input.next_line().await?.map(|line| line.trim().to_string()))
}

/// Asks for every field, keeping the current value when the answer is empty.
/// Returns false if input ends before the form is complete.
async fn fill(session: &mut FormSession, input: &mut Input) -> std::io::Result<bool> {
    for field in Field::ALL {
        loop {
            let current = session.draft().get(field).to_string();
            let hint = match (field.is_date(), current.is_empty()) {
                (true, true) => " (YYYY-MM-DD)".to_string(),
                (_, false) => format!(" [{current}]"),
                (false, true) => String::new(),
            };
            let Some(answer) = prompt(input, &format!("{}{}: ", field.label(), hint)).await? else {
                return Ok(false);
            };

            if !answer.is_empty() {
                session.update(field, answer);
            }
            if !session.draft().get(field).is_empty() {
                break;
            }
            println!("  {} is required.", field.label());
        }
    }
    Ok(true)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "enrollment_certificates=warn".into()),
        )
        .init();

    let config = ClientConfig::from_env();
    let client = CertificateClient::new(config.api_url.as_str())?;
    let mut session = FormSession::new(&config.download_dir);
    let mut input = BufReader::new(tokio::io::stdin()).lines();

    println!("Enrollment Certificate Generator");
    println!("Submitting to {}", client.endpoint());

    loop {
        if !fill(&mut session, &mut input).await? {
            return Ok(());
        }

        println!("Generating Certificate...");
        match session.submit(&client).await {
            Ok(path) => {
                println!("Saved {}", path.display());
                return Ok(());
            }
            Err(_) => {
                let message = session.error().unwrap_or("Failed to generate PDF").to_string();
                println!("Error: {message}");
                let again = prompt(&mut input, "Submit again? [y/N] ").await?;
                if !matches!(again.as_deref(), Some("y" | "Y" | "yes")) {
                    // Returning the error unwinds the runtime and exits non-zero.
                    return Err(message.into());
                }
            }
        }
    }
}
