//! Journey CLI commands: start, next, position, status, and friends

use super::project_key;
use crate::context::EngineContext;
use crate::prompts;
use crate::services::journey_service;
use crate::Result;
use colored::Colorize;
use std::path::Path;

pub fn start(
    ctx: &EngineContext,
    domain: &str,
    project: Option<&Path>,
    expanded: bool,
    strict: bool,
) -> Result<()> {
    let key = project_key(project)?;
    let tracker = ctx.tracker();

    let state = if strict {
        tracker.start(domain, &key)?
    } else {
        tracker.start_or_reset(domain, &key)?
    };

    if expanded {
        println!("{}", journey_service::render_expanded(&state));
    } else {
        println!("{}", journey_service::render_started(&state));
    }
    println!();
    println!("   {} {}", "Project:".bright_black(), key);
    Ok(())
}

pub fn next(ctx: &EngineContext, project: Option<&Path>) -> Result<()> {
    let key = project_key(project)?;
    let text = journey_service::next_phase(ctx.tracker(), &key)?;
    println!("{}", text);
    Ok(())
}

pub fn position(ctx: &EngineContext, project: Option<&Path>) -> Result<()> {
    let key = project_key(project)?;
    let notation = journey_service::current_state(ctx.tracker(), &key)?;
    println!("{}", notation.cyan().bold());
    Ok(())
}

pub fn status(ctx: &EngineContext, project: Option<&Path>, json: bool) -> Result<()> {
    let key = project_key(project)?;

    if json {
        let value = journey_service::status_json(ctx.tracker(), &key)?;
        println!("{}", serde_json::to_string_pretty(&value)?);
    } else {
        println!("{}", format!("Status for: {}", key).cyan().bold());
        println!();
        println!("{}", journey_service::status(ctx.tracker(), &key)?);
    }
    Ok(())
}

pub fn instructions(ctx: &EngineContext, project: Option<&Path>) -> Result<()> {
    let key = project_key(project)?;
    println!("{}", journey_service::instructions(ctx.tracker(), &key)?);
    Ok(())
}

pub fn reset(ctx: &EngineContext, project: Option<&Path>) -> Result<()> {
    let key = project_key(project)?;
    println!("{}", journey_service::reset(ctx.tracker(), &key)?);
    Ok(())
}

pub fn complete(ctx: &EngineContext, project: Option<&Path>) -> Result<()> {
    let key = project_key(project)?;
    println!("{}", journey_service::complete(ctx.tracker(), &key)?.green());
    Ok(())
}

pub fn abandon(ctx: &EngineContext, project: Option<&Path>) -> Result<()> {
    let key = project_key(project)?;
    println!("{}", journey_service::abandon(ctx.tracker(), &key)?.yellow());
    Ok(())
}

/// Print the prompt for any pass and phase without touching journey state
pub fn prompt(pass_num: u32, phase: u32, domain: &str) -> Result<()> {
    println!("{}", prompts::lookup(pass_num, phase, domain));
    println!();
    println!("{}", prompts::phase_definition(phase).bright_black());
    Ok(())
}

pub fn phase_file(ctx: &EngineContext, project: Option<&Path>, component: Option<&str>) -> Result<()> {
    let key = project_key(project)?;
    println!("{}", journey_service::phase_file(ctx.tracker(), &key, component)?);
    Ok(())
}
