//! Basic example fetching a player, their win rate and the hero list.
//!
//! This example shows how to:
//! - Create an API handle, optionally keyed from `OPENDOTA_API_KEY`
//! - Call typed endpoints with and without filters
//! - Read quota counters and response metadata
//!
//! Run with: `cargo run --example basic_call`

use opendota::resources::PlayerQuery;
use opendota::{Error, OpenDota};

const ACCOUNT_ID: u64 = 86745912;

#[tokio::main]
async fn main() -> Result<(), Error> {
    tracing_subscriber::fmt()
        .with_env_filter("opendota=debug,basic_call=info")
        .init();

    let api = OpenDota::from_env()?;

    println!("=== Player ===");
    let player = api.players().get(ACCOUNT_ID).await?;
    match &player.data.profile {
        Some(profile) => println!(
            "{} ({})",
            profile.personaname.as_deref().unwrap_or("<anonymous>"),
            profile.account_id
        ),
        None => println!("Profile is private"),
    }
    println!("Rank tier: {:?}", player.data.rank_tier);
    println!("Request latency: {:?}", player.latency);
    println!();

    println!("=== Last 20 ranked games ===");
    let query = PlayerQuery {
        limit: Some(20),
        lobby_type: Some(7),
        ..Default::default()
    };
    let wl = api.players().win_loss(ACCOUNT_ID, &query).await?;
    let total = wl.data.win + wl.data.lose;
    if total > 0 {
        println!(
            "{}W {}L ({:.1}%)",
            wl.data.win,
            wl.data.lose,
            100.0 * f64::from(wl.data.win) / f64::from(total)
        );
    }
    println!();

    println!("=== Heroes ===");
    let heroes = api.heroes().list().await?;
    for hero in heroes.data.iter().take(5) {
        println!("{:>3} {} [{}]", hero.id, hero.localized_name, hero.roles.join(", "));
    }
    println!("... {} heroes in total", heroes.data.len());
    println!();

    println!(
        "Calls left: {:?} this minute, {:?} today",
        heroes.rate_limit.remaining_minute, heroes.rate_limit.remaining_day
    );

    Ok(())
}
