use clap::ArgMatches;
use colored::*;

use crate::models::UserId;
use crate::store::selectors::undeleted_addresses;
use crate::store::Action;

pub async fn handle_addresses(matches: &ArgMatches) -> Result<(), Box<dyn std::error::Error>> {
    let user_id = matches
        .get_one::<String>("user-id")
        .ok_or("User id is required")?;
    let user_id = UserId::from(user_id.as_str());

    let (store, mut loader, _ticks) = super::build_loader();

    store
        .lock()
        .unwrap()
        .dispatch(Action::ChangeSelectedUser(user_id.clone()));
    loader.fetch_addresses(&user_id).await;

    let state = store.lock().unwrap().state().clone();
    if let Some(error) = state.last_error {
        return Err(error.into());
    }

    let addresses = undeleted_addresses(&state.addresses);
    if addresses.is_empty() {
        println!("No addresses found.");
    } else {
        println!("Found {} addresses for user {}:", addresses.len(), user_id);
        for address in addresses {
            println!("{} {}", address.id.bright_blue().bold(), "│".bright_black());
            println!("{}", serde_json::to_string_pretty(address)?);
        }
    }

    Ok(())
}
