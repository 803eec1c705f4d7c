//! Example demonstrating deadlines and caller cancellation.
//!
//! This example shows how to:
//! - Bound every call with a client-wide timeout
//! - Override the timeout for a single handle
//! - Abort in-flight calls from another task with a `CancelSource`
//!
//! Run with: `cargo run --example cancellation`

use opendota::cancel::CancelSource;
use opendota::{Error, OpenDota, RequestOptions, TimeoutReason};
use std::time::Duration;

#[tokio::main]
async fn main() -> Result<(), Error> {
    tracing_subscriber::fmt()
        .with_env_filter("opendota=debug,cancellation=info")
        .init();

    let api = OpenDota::from_client(
        OpenDota::builder()
            .timeout(Duration::from_secs(10))
            .build()?,
    );

    println!("=== Tight per-call deadline ===");
    let result = api
        .hero_stats()
        .with_options(RequestOptions::new().timeout(Duration::from_millis(1)))
        .list()
        .await;
    report(result.map(|r| r.data.len()));
    println!();

    println!("=== Cancelled from another task ===");
    let source = CancelSource::new();
    let canceller = {
        let source = source.clone();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(20)).await;
            println!("Cancelling...");
            source.cancel();
        })
    };

    let result = api
        .pro_matches()
        .with_options(RequestOptions::new().signal(source.signal()))
        .list(&Default::default())
        .await;
    let _ = canceller.await;
    report(result.map(|r| r.data.len()));

    Ok(())
}

fn report(result: Result<usize, Error>) {
    match result {
        Ok(count) => println!("Completed with {} items", count),
        Err(Error::Timeout { reason: TimeoutReason::Deadline(after), .. }) => {
            println!("Deadline of {:?} elapsed", after)
        }
        Err(Error::Timeout { reason: TimeoutReason::Cancelled, .. }) => println!("Aborted by caller"),
        Err(e) => println!("Other error: {}", e),
    }
}
