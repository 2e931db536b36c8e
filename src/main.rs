use std::process;

use clap::{Arg, Command};

use evlens::commands;
use evlens::interactive;
use evlens::logging::{init_logging, log_panic_info};

#[tokio::main]
async fn main() {
    let app = Command::new("evlens")
        .about("Browse users, their addresses, and address events; compare event payloads")
        .version("0.1.0")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(
            Command::new("config")
                .about("Configure the API base URL")
                .arg(
                    Arg::new("api-base")
                        .long("api-base")
                        .value_name("URL")
                        .help("Set the API base URL")
                        .required(false),
                )
                .arg(
                    Arg::new("show")
                        .long("show")
                        .help("Show the resolved API base URL")
                        .action(clap::ArgAction::SetTrue),
                ),
        )
        .subcommand(Command::new("users").about("List known user ids"))
        .subcommand(
            Command::new("addresses")
                .about("List a user's addresses (deleted ones are hidden)")
                .arg(
                    Arg::new("user-id")
                        .value_name("USER_ID")
                        .help("User id to look up")
                        .required(true)
                        .index(1),
                ),
        )
        .subcommand(
            Command::new("events")
                .about("List events recorded for an address")
                .arg(
                    Arg::new("address-id")
                        .value_name("ADDRESS_ID")
                        .help("Address id to look up")
                        .required(true)
                        .index(1),
                ),
        )
        .subcommand(
            Command::new("compare")
                .about("Diff the detail payloads of two events at an address")
                .arg(
                    Arg::new("address-id")
                        .value_name("ADDRESS_ID")
                        .help("Address id the events belong to")
                        .required(true)
                        .index(1),
                )
                .arg(
                    Arg::new("keys")
                        .value_name("KEY")
                        .help("Event keys as printed by 'evlens events'")
                        .required(true)
                        .num_args(2)
                        .index(2),
                ),
        )
        .subcommand(Command::new("interactive").about("Browse and compare in a full-screen UI"));

    let matches = app.get_matches();

    let result = match matches.subcommand() {
        Some(("config", sub_matches)) => commands::config::handle_config(sub_matches).await,
        Some(("users", sub_matches)) => commands::users::handle_users(sub_matches).await,
        Some(("addresses", sub_matches)) => {
            commands::addresses::handle_addresses(sub_matches).await
        }
        Some(("events", sub_matches)) => commands::events::handle_events(sub_matches).await,
        Some(("compare", sub_matches)) => commands::compare::handle_compare(sub_matches).await,
        Some(("interactive", _sub_matches)) => {
            if let Err(e) = init_logging() {
                eprintln!("Warning: failed to initialize logging: {}", e);
            }
            std::panic::set_hook(Box::new(|info| {
                log_panic_info(info);
            }));
            interactive::run_interactive_mode().await
        }
        _ => {
            eprintln!("Unknown command. Use 'evlens --help' for available commands.");
            process::exit(1);
        }
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}
