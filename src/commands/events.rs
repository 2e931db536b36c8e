use clap::ArgMatches;
use colored::*;

use crate::store::selectors::event_key;
use crate::store::Action;

pub async fn handle_events(matches: &ArgMatches) -> Result<(), Box<dyn std::error::Error>> {
    let address_id = matches
        .get_one::<String>("address-id")
        .ok_or("Address id is required")?;

    let (store, mut loader, _ticks) = super::build_loader();

    store
        .lock()
        .unwrap()
        .dispatch(Action::RequestAddressDetails(address_id.clone()));
    loader.fetch_events(address_id).await;

    let state = store.lock().unwrap().state().clone();
    if let Some(error) = state.last_error {
        return Err(error.into());
    }

    if state.events.is_empty() {
        println!("No events found.");
    } else {
        println!("Found {} events for address {}:", state.events.len(), address_id);
        println!(
            "{:<20} {:<28} {:<40}",
            "Type".bold(),
            "Created".bold(),
            "Key".bold()
        );
        println!("{}", "-".repeat(88));
        for event in &state.events {
            println!(
                "{:<20} {:<28} {:<40}",
                event.event_type.bright_blue(),
                event.created_at,
                event_key(event).bright_black()
            );
        }
        println!(
            "\nPass two keys to {} to diff their detail payloads.",
            "evlens compare".bold()
        );
    }

    Ok(())
}
