use clap::ArgMatches;

use crate::config::{get_api_base, load_config, save_config};

pub async fn handle_config(matches: &ArgMatches) -> Result<(), Box<dyn std::error::Error>> {
    if let Some(api_base) = matches.get_one::<String>("api-base") {
        let mut config = load_config();
        config.api_base = Some(api_base.clone());
        save_config(&config)?;
        println!("API base saved: {}", api_base);
    } else if matches.get_flag("show") {
        println!("API base: {}", get_api_base());
    } else {
        println!("Usage: evlens config --api-base <URL> or evlens config --show");
    }

    Ok(())
}
