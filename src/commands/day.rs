use anyhow::Result;
use duoplan_core::mutation::DayPosition;
use owo_colors::OwoColorize;

use super::{resolve_day, saved};
use crate::context::AppContext;
use crate::render::Render;
use crate::utils::tui::create_spinner;

pub async fn add(ctx: &AppContext, before: bool) -> Result<()> {
    let session = ctx.open_session().await?;
    let position = if before {
        DayPosition::Before
    } else {
        DayPosition::After
    };

    let spinner = create_spinner("Fetching weather".to_string());
    let added = session.add_day(position).await;
    spinner.finish_and_clear();
    let day_id = saved(added)?;

    if let Some(day) = session.itinerary().day(&day_id) {
        println!("{} {}", "+".green(), day.render());
    }
    session.close();
    Ok(())
}

pub async fn remove(ctx: &AppContext, day: &str) -> Result<()> {
    let session = ctx.open_session().await?;
    let day = resolve_day(&session.itinerary(), day)?;

    saved(session.delete_day(&day.id).await)?;

    let events = day.events.len();
    println!(
        "{} {} {}",
        "-".red(),
        day.name,
        format!("({} events removed)", events).dimmed()
    );
    session.close();
    Ok(())
}
