use anyhow::Result;

use crate::context::AppContext;
use crate::render::Render;

pub async fn run(ctx: &AppContext) -> Result<()> {
    let session = ctx.open_session().await?;
    println!("{}", session.itinerary().render());
    session.close();
    Ok(())
}
