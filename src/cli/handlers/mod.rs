use std::path::Path;

use crate::cli::commands::*;
use crate::cli::output::*;
use crate::model::settings::SettingsUpdate;
use crate::ops::registry::NewTask;
use crate::ops::session::Session;

// ---------------------------------------------------------------------------
// Dispatch
// ---------------------------------------------------------------------------

/// Run one subcommand against the data files in `data_dir`
pub fn dispatch(
    command: Commands,
    data_dir: &Path,
    json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut session = Session::open(data_dir)?;

    match command {
        Commands::List => cmd_list(&mut session, json),
        Commands::Add(args) => cmd_add(&mut session, args),
        Commands::Progress(args) => cmd_progress(&mut session, args, json),
        Commands::Rm(args) => cmd_rm(&mut session, args),
        Commands::Stats => cmd_stats(&mut session, json),
        Commands::Settings(args) => cmd_settings(&mut session, args, json),
    }
}

// ---------------------------------------------------------------------------
// Read commands
// ---------------------------------------------------------------------------

/// Finished tasks left by an earlier session are listed this once, then dropped
fn cmd_list(session: &mut Session, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let pass = session.render_pass()?;
    let tasks = &pass.tasks;
    if json {
        let output: Vec<TaskJson> = tasks.iter().map(task_to_json).collect();
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    if tasks.is_empty() {
        println!("no tasks");
    }
    for task in tasks {
        println!("{}", format_task_line(task));
    }
    Ok(())
}

fn cmd_stats(session: &mut Session, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let pass = session.render_pass()?;
    let output = StatsJson {
        active: session.tasks().len(),
        completed: pass.completed_count,
    };
    if json {
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        println!("active     {}", output.active);
        println!("completed  {}", output.completed);
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Write commands
// ---------------------------------------------------------------------------

fn cmd_add(session: &mut Session, args: AddArgs) -> Result<(), Box<dyn std::error::Error>> {
    let id = session.on_add_task(NewTask {
        title: args.title,
        description: args.desc.unwrap_or_default(),
        wait_for: args.wait_for,
    })?;
    println!("{}", id);
    Ok(())
}

fn cmd_rm(session: &mut Session, args: RmArgs) -> Result<(), Box<dyn std::error::Error>> {
    let id = session.registry().resolve(&args.id)?;
    if let Some(task) = session.on_remove_task(&id)? {
        println!("removed {} {}", task.short_id(), task.title);
    }
    Ok(())
}

fn cmd_progress(
    session: &mut Session,
    args: ProgressArgs,
    json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let id = session.registry().resolve(&args.id)?;
    let outcome = session.on_progress_change(&id, args.value)?;

    // Finished tasks drop out here, and a queued celebration is shown once
    let pass = session.render_pass()?;
    let celebration = pass.celebration.as_ref();

    if json {
        let output = progress_to_json(&outcome, args.value, celebration);
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    if !outcome.change.is_changed() {
        println!("progress already at {}%", args.value);
        return Ok(());
    }
    println!("progress {}%", args.value);
    if let Some(message) = outcome.change.message() {
        println!("{}", message);
    }
    if let Some(completion) = &outcome.completion {
        println!(
            "task complete ({} completed so far)",
            completion.completed_count
        );
        println!("{}", format_surprise(&completion.surprise));
    }
    if let Some(celebration) = celebration {
        for line in format_celebration(celebration) {
            println!("{}", line);
        }
    }
    Ok(())
}

fn cmd_settings(
    session: &mut Session,
    args: SettingsArgs,
    json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    if !args.is_empty() {
        session.on_settings_change(SettingsUpdate {
            mode: args.mode,
            gif_url: args.gif,
            image_url: args.img,
            banner_text: args.banner,
            marquee_emoji: args.marquee,
        })?;
    }
    // Writes the settings document through
    let pass = session.render_pass()?;

    if json {
        println!("{}", serde_json::to_string_pretty(&pass.settings)?);
    } else {
        for line in format_settings(&pass.settings) {
            println!("{}", line);
        }
    }
    Ok(())
}
