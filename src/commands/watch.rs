use anyhow::Result;
use owo_colors::OwoColorize;

use crate::context::AppContext;
use crate::render::Render;

pub async fn run(ctx: &AppContext) -> Result<()> {
    let mut session = ctx.open_session().await?;
    draw(&session.itinerary().render());

    loop {
        tokio::select! {
            changed = session.changed() => match changed {
                Some(doc) => draw(&doc.render()),
                None => break,
            },
            _ = tokio::signal::ctrl_c() => break,
        }
    }

    session.close();
    Ok(())
}

fn draw(itinerary: &str) {
    // Clear screen, cursor home
    print!("\x1b[2J\x1b[H");
    println!("{}\n", "Watching for changes (Ctrl-C to stop)".dimmed());
    println!("{}", itinerary);
}
