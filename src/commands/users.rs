use clap::ArgMatches;
use colored::*;

use crate::constants::{USER_IDS_RETRY_ATTEMPTS, USER_IDS_RETRY_DELAY};

pub async fn handle_users(_matches: &ArgMatches) -> Result<(), Box<dyn std::error::Error>> {
    let (store, mut loader, mut ticks) = super::build_loader();

    loader.fetch_user_ids().await;

    // The user-ids endpoint retries on server errors; wait the chain out
    // before reading the final state.
    while loader.retry_pending() {
        println!(
            "{}",
            format!(
                "Server error, retrying in {}s (attempt {} of {})...",
                USER_IDS_RETRY_DELAY.as_secs(),
                loader.retry_attempts() + 1,
                USER_IDS_RETRY_ATTEMPTS
            )
            .yellow()
        );
        if ticks.recv().await.is_none() {
            break;
        }
        loader.run_scheduled_retry().await;
    }

    let state = store.lock().unwrap().state().clone();
    if let Some(error) = state.last_error {
        return Err(error.into());
    }

    if state.user_ids.is_empty() {
        println!("No user ids found.");
    } else {
        println!("Found {} user ids:", state.user_ids.len());
        for user_id in &state.user_ids {
            println!("  {}", user_id.to_string().bright_blue());
        }
    }

    Ok(())
}
