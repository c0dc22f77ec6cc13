//! Terminal rendering for duoplan types.
//!
//! Extension traits adding colored output to duoplan-core types using
//! owo_colors.

use duoplan_core::MapPin;
use duoplan_core::model::{CoupleSpace, Day, Event, EventKind, ItineraryDocument, WeatherSample};
use owo_colors::OwoColorize;

/// Extension trait for TUI rendering with colors.
pub trait Render {
    fn render(&self) -> String;
}

impl Render for EventKind {
    fn render(&self) -> String {
        match self {
            EventKind::Activity => "activity".green().to_string(),
            EventKind::Food => "food".yellow().to_string(),
            EventKind::Other => "other".dimmed().to_string(),
        }
    }
}

impl Render for WeatherSample {
    fn render(&self) -> String {
        let line = format!("{} {}°F {}", self.short_name(), self.temperature, self.description);
        if self.is_primary {
            format!("{} {}", "*".yellow(), line)
        } else {
            format!("  {}", line.dimmed())
        }
    }
}

impl Render for Day {
    fn render(&self) -> String {
        let header = format!("{} {}", self.name.bold(), self.date.format("%b %-d").dimmed());

        let mut lines = vec![match self.primary_weather() {
            Some(w) => format!(
                "{}  {}",
                header,
                format!("{}°F {}", w.temperature, w.description).cyan()
            ),
            None => format!("{}  {}", header, "weather unavailable".dimmed()),
        }];

        if self.events.is_empty() {
            lines.push(format!("   {}", "No events".dimmed()));
        }
        for (i, event) in self.events.iter().enumerate() {
            lines.push(format!("   {}. {}", i + 1, render_event(event)));
        }

        lines.join("\n")
    }
}

fn render_event(event: &Event) -> String {
    let mut line = format!(
        "{} {} {} {}",
        event.time.bold(),
        event.location,
        format!("[{}]", event.kind.render()),
        event.id.dimmed()
    );
    if let Some(notes) = event.notes.as_deref().filter(|n| !n.is_empty()) {
        line.push_str(&format!("\n      {}", notes.italic()));
    }
    line
}

impl Render for ItineraryDocument {
    fn render(&self) -> String {
        if self.days.is_empty() {
            return "No days planned. Add one with `duoplan day add`.".dimmed().to_string();
        }

        let mut sections: Vec<String> = self.days.iter().map(|d| d.render()).collect();

        if !self.default_weather_locations.is_empty() {
            sections.push(format!(
                "{} {}",
                "Weather defaults:".dimmed(),
                self.default_weather_locations.join(" | ")
            ));
        }

        sections.join("\n\n")
    }
}

impl Render for CoupleSpace {
    fn render(&self) -> String {
        let state = if self.is_active() {
            "active".green().to_string()
        } else {
            "waiting for partner".yellow().to_string()
        };
        format!("Space {} ({})", self.id.bold(), state)
    }
}

const PIN_COLORS: [owo_colors::AnsiColors; duoplan_core::planner::DAY_COLOR_COUNT] = [
    owo_colors::AnsiColors::Green,
    owo_colors::AnsiColors::Blue,
    owo_colors::AnsiColors::Magenta,
    owo_colors::AnsiColors::Yellow,
    owo_colors::AnsiColors::BrightRed,
    owo_colors::AnsiColors::Cyan,
    owo_colors::AnsiColors::Red,
];

impl Render for MapPin {
    fn render(&self) -> String {
        let marker = format!("{}{}", self.day_name.chars().take(3).collect::<String>(), self.number)
            .color(PIN_COLORS[self.color % PIN_COLORS.len()])
            .bold()
            .to_string();

        let place = match self.coordinates {
            Some(at) => at.to_string(),
            None => "not found".dimmed().to_string(),
        };
        format!("{} {}  {}", marker, self.title, place)
    }
}
