use clap::ArgMatches;
use colored::*;

use crate::diff::{diff_lines, render_value};
use crate::error::EvlensError;
use crate::store::selectors::{can_compare, event_key, selected_event};
use crate::store::Action;

pub async fn handle_compare(matches: &ArgMatches) -> Result<(), Box<dyn std::error::Error>> {
    let address_id = matches
        .get_one::<String>("address-id")
        .ok_or("Address id is required")?;
    let keys: Vec<&String> = matches
        .get_many::<String>("keys")
        .map(|keys| keys.collect())
        .unwrap_or_default();
    if keys.len() != 2 {
        return Err(Box::new(EvlensError::InvalidInput(
            "Exactly two event keys are required".to_string(),
        )));
    }

    let (store, mut loader, _ticks) = super::build_loader();

    store
        .lock()
        .unwrap()
        .dispatch(Action::RequestAddressDetails(address_id.clone()));
    loader.fetch_events(address_id).await;

    {
        let mut store = store.lock().unwrap();
        let known: Vec<String> = store.state().events.iter().map(event_key).collect();
        for key in &keys {
            if !known.contains(key) {
                return Err(Box::new(EvlensError::InvalidInput(format!(
                    "No event with key '{}' at address {}",
                    key, address_id
                ))));
            }
            store.dispatch(Action::ToggleEventSelection((*key).clone()));
        }

        if !can_compare(&store.state().selected_events) {
            return Err(Box::new(EvlensError::InvalidInput(
                "Two distinct event keys are required".to_string(),
            )));
        }
    }

    loader.fetch_selected_event_details().await;
    store.lock().unwrap().dispatch(Action::CompareSelectedEvents);

    let state = store.lock().unwrap().state().clone();
    if let Some(error) = state.last_error {
        return Err(error.into());
    }

    let left = &state.comparison_json[0];
    let right = &state.comparison_json[1];

    let header = |slot: usize| -> String {
        match selected_event(&state, slot) {
            Some(event) => format!("{} @ {}", event.event_type, event.created_at),
            None => state.comparison_json[slot].event_id.clone(),
        }
    };

    println!(
        "{:<24} {:<28} {:<28}",
        "Field".bold(),
        header(0).bold(),
        header(1).bold()
    );
    println!("{}", "-".repeat(80));

    // Both passes walk the same sorted field union, so the rows zip up.
    let left_lines = diff_lines(left, right);
    let right_lines = diff_lines(right, left);

    for (l, r) in left_lines.iter().zip(right_lines.iter()) {
        let left_value = render_value(&l.value);
        let right_value = render_value(&r.value);

        if l.differs {
            println!(
                "{:<24} {:<28} {:<28}",
                l.name,
                left_value.yellow().bold(),
                right_value.yellow().bold()
            );
        } else {
            println!("{:<24} {:<28} {:<28}", l.name, left_value, right_value);
        }
    }

    Ok(())
}
