//! Example demonstrating how failures are classified.
//!
//! This example shows how to:
//! - Match on specific error variants
//! - Use the coarse `ErrorKind` and `is_retryable`
//! - Read the `Retry-After` hint and quota of a rate-limit error
//!
//! Run with: `cargo run --example error_handling`

use opendota::{Error, ErrorKind, OpenDota};
use std::time::Duration;

#[tokio::main]
async fn main() -> Result<(), Error> {
    tracing_subscriber::fmt()
        .with_env_filter("opendota=info,error_handling=info")
        .init();

    let api = OpenDota::from_client(
        OpenDota::builder()
            .max_retries(1)
            .retry_base_delay(Duration::from_millis(250))
            .build()?,
    );

    println!("=== Unknown match ===");
    match api.matches().get(1).await {
        Ok(m) => println!("Unexpectedly found match {}", m.data.match_id),
        Err(Error::NotFound { url }) => println!("Nothing at {}", url),
        Err(e) => println!("Other error: {}", e),
    }
    println!();

    println!("=== Unknown constants table ===");
    match api.constants().get("not_a_table").await {
        Ok(table) => println!("Got {}", table.data),
        Err(e) => describe(&e),
    }
    println!();

    println!("=== Invalid explorer query ===");
    match api.explorer().query("SELEC nonsense").await {
        Ok(result) => match result.data.err {
            Some(err) => println!("Query rejected by the database: {}", err),
            None => println!("{} rows", result.data.row_count),
        },
        Err(e) => describe(&e),
    }

    Ok(())
}

fn describe(error: &Error) {
    println!("Error: {}", error);
    println!("  kind: {:?}", error.kind());
    println!("  status: {:?}", error.status());
    println!("  retryable: {}", error.is_retryable());

    match error.kind() {
        ErrorKind::RateLimit => {
            println!("  retry after: {:?}", error.retry_after());
            if let Some(info) = error.rate_limit_info() {
                println!("  remaining today: {:?}", info.remaining_day);
            }
        }
        ErrorKind::Api => {
            if let Error::Api { body: Some(body), .. } = error {
                println!("  body: {}", body);
            }
        }
        _ => {}
    }
}
