use anyhow::Result;
use owo_colors::OwoColorize;

use super::{resolve_day, saved};
use crate::context::AppContext;
use crate::render::Render;
use crate::utils::tui::create_spinner;

pub async fn add(ctx: &AppContext, day: &str, location: &str) -> Result<()> {
    let session = ctx.open_session().await?;
    let day = resolve_day(&session.itinerary(), day)?;

    let spinner = create_spinner(format!("Fetching weather for {}", location));
    let added = session.add_weather_location(&day.id, location).await;
    spinner.finish_and_clear();

    if saved(added)? {
        print_weather(&session, &day.id);
    } else if day.has_weather_for(location) {
        println!("{} already has weather for {}", day.name, location);
    } else {
        println!("{}", format!("Weather unavailable for {}", location).yellow());
    }
    session.close();
    Ok(())
}

pub async fn remove(ctx: &AppContext, day: &str, location: &str) -> Result<()> {
    let session = ctx.open_session().await?;
    let day = resolve_day(&session.itinerary(), day)?;

    saved(session.remove_weather_location(&day.id, location).await)?;
    print_weather(&session, &day.id);
    session.close();
    Ok(())
}

pub async fn primary(ctx: &AppContext, day: &str, location: &str) -> Result<()> {
    let session = ctx.open_session().await?;
    let day = resolve_day(&session.itinerary(), day)?;

    if !day.has_weather_for(location) {
        anyhow::bail!("{} has no weather for {}", day.name, location);
    }

    saved(session.set_primary_weather(&day.id, location).await)?;
    print_weather(&session, &day.id);
    session.close();
    Ok(())
}

pub async fn toggle_default(ctx: &AppContext, location: &str) -> Result<()> {
    let session = ctx.open_session().await?;

    let spinner = create_spinner(format!("Updating {}", location));
    let toggled = session.toggle_default_location(location).await;
    spinner.finish_and_clear();

    if saved(toggled)? {
        println!("{} {} is now a default location", "+".green(), location);
    } else {
        println!("{} {} is no longer a default location", "-".red(), location);
    }
    session.close();
    Ok(())
}

fn print_weather(session: &duoplan_core::PlannerSession, day_id: &str) {
    let doc = session.itinerary();
    let Some(day) = doc.day(day_id) else {
        return;
    };

    println!("{}", day.name.bold());
    if day.weather_locations.is_empty() {
        println!("  {}", "weather unavailable".dimmed());
    }
    for sample in &day.weather_locations {
        println!("{}", sample.render());
    }
}
