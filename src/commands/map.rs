use anyhow::Result;
use owo_colors::OwoColorize;

use crate::context::AppContext;
use crate::render::Render;
use crate::utils::tui::create_spinner;

pub async fn run(ctx: &AppContext) -> Result<()> {
    let session = ctx.open_session().await?;

    if ctx.config.google_maps_api_key.is_none() {
        println!(
            "{}",
            "No google_maps_api_key configured, events will not be placed.".dimmed()
        );
    }

    let spinner = create_spinner("Locating events".to_string());
    let pins = session.locate_events().await;
    spinner.finish_and_clear();

    if pins.is_empty() {
        println!("{}", "No events with a location yet.".dimmed());
    }
    for pin in &pins {
        println!("{}", pin.render());
    }

    session.close();
    Ok(())
}
