use crate::output::{print_json, print_table, progress_label};
use anyhow::Context;
use std::path::Path;
use vidflow_core::aspect;
use vidflow_core::classifier::in_phase;
use vidflow_core::types::Phase;
use vidflow_core::video::{sort_by_schedule, Video};

// ---------------------------------------------------------------------------
// list
// ---------------------------------------------------------------------------

pub fn list(root: &Path, phase: Option<&str>, json: bool) -> anyhow::Result<()> {
    let phase: Option<Phase> = phase.map(str::parse).transpose()?;
    let store = super::open_store(root)?;
    let mut videos = Video::list(&store).context("failed to read index")?;
    if let Some(phase) = phase {
        videos = in_phase(videos, phase);
    }
    sort_by_schedule(&mut videos);

    if json {
        let list: Vec<serde_json::Value> = videos
            .iter()
            .map(|v| {
                let overall = v.progress().overall;
                serde_json::json!({
                    "name": v.name,
                    "category": v.category,
                    "date": v.date,
                    "phase": v.phase(),
                    "progress": overall,
                    "percent": overall.percent(),
                })
            })
            .collect();
        return print_json(&list);
    }

    if videos.is_empty() {
        match phase {
            Some(p) => println!("No videos in {}.", p.title()),
            None => println!("No videos."),
        }
        return Ok(());
    }

    let rows = videos
        .iter()
        .map(|v| {
            let overall = v.progress().overall;
            vec![
                v.name.clone(),
                v.category.clone(),
                v.phase().title().to_string(),
                if v.date.is_empty() { "-".to_string() } else { v.date.clone() },
                format!("{overall} ({}%)", overall.percent()),
            ]
        })
        .collect();
    print_table(&["NAME", "CATEGORY", "PHASE", "DATE", "PROGRESS"], rows);
    Ok(())
}

// ---------------------------------------------------------------------------
// create / delete
// ---------------------------------------------------------------------------

pub fn create(root: &Path, name: &str, category: &str, json: bool) -> anyhow::Result<()> {
    let store = super::open_store(root)?;
    let video = Video::create(&store, name, category)
        .with_context(|| format!("failed to create '{name}'"))?;

    if json {
        print_json(&serde_json::json!({
            "name": video.name,
            "category": video.category,
            "phase": video.phase(),
        }))?;
    } else {
        println!("Created video: {} [{}]", video.name, video.category);
    }
    Ok(())
}

pub fn delete(root: &Path, name: &str, category: &str, json: bool) -> anyhow::Result<()> {
    let store = super::open_store(root)?;
    Video::delete(&store, name, category)?;

    if json {
        print_json(&serde_json::json!({
            "name": name,
            "category": category,
            "deleted": true,
        }))?;
    } else {
        println!("Deleted video: {name} [{category}]");
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// show
// ---------------------------------------------------------------------------

pub fn show(root: &Path, name: &str, category: &str, json: bool) -> anyhow::Result<()> {
    let store = super::open_store(root)?;
    let video = Video::load(&store, name, category)?;
    let progress = video.progress();

    if json {
        return print_json(&serde_json::json!({
            "video": video,
            "phase": video.phase(),
            "progress": progress,
        }));
    }

    println!("{} [{}]", video.name, video.category);
    println!("Phase: {}", video.phase().title());
    if !video.date.is_empty() {
        println!("Date:  {}", video.date);
    }
    println!();
    for group in &progress.groups {
        let done = if group.tasks.is_done() { "  done" } else { "" };
        println!("  {}{done}", progress_label(group.title, group.tasks));
    }
    println!("\n{}", progress_label("Overall", progress.overall));
    Ok(())
}

// ---------------------------------------------------------------------------
// set
// ---------------------------------------------------------------------------

pub fn set(
    root: &Path,
    name: &str,
    category: &str,
    field_name: &str,
    raw: &str,
    json: bool,
) -> anyhow::Result<()> {
    let (owner, field) = aspect::find_field(field_name)
        .with_context(|| format!("unknown field '{field_name}' (see `vidflow fields <aspect>`)"))?;

    let store = super::open_store(root)?;
    let mut video = Video::load(&store, name, category)?;
    let value = field.parse_raw(raw)?;
    field.set_value(&mut video, value)?;
    video.save(&store).context("failed to save video")?;

    let tasks = owner.progress(&video);
    if json {
        print_json(&serde_json::json!({
            "name": video.name,
            "category": video.category,
            "field": field.field_name,
            "value": field.value(&video),
            "aspect": owner.key,
            "progress": tasks,
            "phase": video.phase(),
        }))?;
    } else {
        println!("Set {} on {} [{}]", field.field_name, video.name, video.category);
        println!("  {}", progress_label(owner.title, tasks));
        println!("  Phase: {}", video.phase().title());
    }
    Ok(())
}
