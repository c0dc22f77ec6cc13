use anyhow::Result;
use chrono::Utc;
use duoplan_core::space;
use owo_colors::OwoColorize;

use crate::context::AppContext;
use crate::render::Render;

pub async fn create(ctx: &AppContext) -> Result<()> {
    let space = space::create_space(&ctx.store, &ctx.user_id, Utc::now()).await?;

    println!("{}", space.render());
    println!("Share this code with your partner:\n");
    println!("  {}\n", space.id.bold());
    println!("{}", "They can join with `duoplan space join <code>`.".dimmed());
    Ok(())
}

pub async fn join(ctx: &AppContext, code: &str) -> Result<()> {
    let space = space::join_space(&ctx.store, code.trim(), &ctx.user_id).await?;

    println!("{}", space.render());
    println!("{}", "Joined. Run `duoplan show` to see the plan.".green());
    Ok(())
}

pub async fn leave(ctx: &AppContext) -> Result<()> {
    let space = ctx.require_space().await?;
    space::leave_space(&ctx.store, &ctx.user_id).await?;

    if space.creator_id == ctx.user_id {
        println!("Left and deleted space {}", space.id.bold());
    } else {
        println!("Left space {}", space.id.bold());
    }
    Ok(())
}

pub async fn status(ctx: &AppContext) -> Result<()> {
    match ctx.current_space().await? {
        Some(space) => {
            println!("{}", space.render());
            if !space.is_active() {
                println!("Share this code with your partner: {}", space.id.bold());
            }
        }
        None => println!("{}", "Not in a couple space.".dimmed()),
    }
    Ok(())
}
