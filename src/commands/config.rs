use anyhow::Result;
use duoplan_core::DuoplanConfig;
use owo_colors::OwoColorize;

use crate::context::AppContext;

pub fn run(ctx: &AppContext) -> Result<()> {
    let config_path = DuoplanConfig::config_path()?;
    let config = &ctx.config;

    let set = |value: &Option<String>| match value {
        Some(_) => "set".green().to_string(),
        None => "not set".dimmed().to_string(),
    };

    println!("{}", "Paths".bold());
    println!("  Config:     {}", config_path.display());
    println!("  Store:      {}", config.store_path().display());
    println!();
    println!("{}", "Settings".bold());
    println!("  User:       {}", ctx.user_id);
    println!("  Timezone:   {}", config.timezone()?);
    println!("  Weather:    {}", set(&config.openweather_api_key));
    println!("  Geocoding:  {}", set(&config.google_maps_api_key));
    println!("  Defaults:   {}", config.default_weather_locations.join(" | "));

    Ok(())
}
