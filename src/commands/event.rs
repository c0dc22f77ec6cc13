use anyhow::Result;
use duoplan_core::model::{Coordinates, Event, EventKind, NewEvent};
use owo_colors::OwoColorize;

use super::{resolve_day, resolve_event, saved};
use crate::context::AppContext;
use crate::render::Render;
use crate::utils::tui::create_spinner;

/// Fields to change on an existing event; `None` keeps the current value.
pub struct EventEdit {
    pub time: Option<String>,
    pub location: Option<String>,
    pub kind: Option<EventKind>,
    pub notes: Option<String>,
}

impl EventEdit {
    fn apply(self, event: Event) -> Event {
        Event {
            time: self.time.unwrap_or(event.time),
            location: self.location.unwrap_or(event.location),
            kind: self.kind.unwrap_or(event.kind),
            notes: match self.notes {
                Some(notes) if notes.is_empty() => None,
                Some(notes) => Some(notes),
                None => event.notes,
            },
            id: event.id,
        }
    }
}

pub async fn add(
    ctx: &AppContext,
    day: &str,
    time: String,
    location: String,
    kind: EventKind,
    notes: Option<String>,
) -> Result<()> {
    let session = ctx.open_session().await?;
    let day = resolve_day(&session.itinerary(), day)?;

    let event = NewEvent {
        time,
        location,
        kind,
        notes: notes.filter(|n| !n.is_empty()),
    };
    let id = saved(session.add_event(&day.id, event).await)?;

    println!("{} {} {}", "+".green(), day.name, id.dimmed());
    session.close();
    Ok(())
}

pub async fn edit(ctx: &AppContext, day: &str, event: &str, edit: EventEdit) -> Result<()> {
    let session = ctx.open_session().await?;
    let day = resolve_day(&session.itinerary(), day)?;
    let event = resolve_event(&day, event)?;

    let updated = edit.apply(event);
    saved(session.update_event(&day.id, updated.clone()).await)?;

    println!("{} {} {}", "~".yellow(), updated, updated.kind.render());
    session.close();
    Ok(())
}

pub async fn remove(ctx: &AppContext, day: &str, event: &str) -> Result<()> {
    let session = ctx.open_session().await?;
    let day = resolve_day(&session.itinerary(), day)?;
    let event = resolve_event(&day, event)?;

    saved(session.delete_event(&day.id, &event.id).await)?;

    println!("{} {}", "-".red(), event);
    session.close();
    Ok(())
}

/// `number` is 1-based, as shown by `duoplan show`.
pub async fn move_up(ctx: &AppContext, day: &str, number: usize) -> Result<()> {
    let session = ctx.open_session().await?;
    let day = resolve_day(&session.itinerary(), day)?;
    let index = event_index(&day.name, day.events.len(), number)?;

    saved(session.move_event_up(&day.id, index).await)?;
    print_day(&session, &day.id);
    session.close();
    Ok(())
}

pub async fn move_down(ctx: &AppContext, day: &str, number: usize) -> Result<()> {
    let session = ctx.open_session().await?;
    let day = resolve_day(&session.itinerary(), day)?;
    let index = event_index(&day.name, day.events.len(), number)?;

    saved(session.move_event_down(&day.id, index).await)?;
    print_day(&session, &day.id);
    session.close();
    Ok(())
}

pub async fn at(ctx: &AppContext, day: &str, lat: f64, lng: f64) -> Result<()> {
    if ctx.config.google_maps_api_key.is_none() {
        anyhow::bail!("Adding events from a map point needs google_maps_api_key in the config");
    }

    let session = ctx.open_session().await?;
    let day = resolve_day(&session.itinerary(), day)?;
    let at = Coordinates { lat, lng };

    let spinner = create_spinner(format!("Looking up {}", at));
    let added = session.add_event_at(&day.id, at).await;
    spinner.finish_and_clear();

    match saved(added)? {
        Some(id) => {
            let doc = session.itinerary();
            if let Some(event) = doc.day(&day.id).and_then(|d| d.event(&id)) {
                println!("{} {} {}", "+".green(), day.name, event);
            }
        }
        None => println!("{}", format!("No address found at {}", at).yellow()),
    }

    session.close();
    Ok(())
}

fn event_index(day_name: &str, count: usize, number: usize) -> Result<usize> {
    if number == 0 || number > count {
        anyhow::bail!("{} has {} events, there is no event {}", day_name, count, number);
    }
    Ok(number - 1)
}

fn print_day(session: &duoplan_core::PlannerSession, day_id: &str) {
    if let Some(day) = session.itinerary().day(day_id) {
        println!("{}", day.render());
    }
}
