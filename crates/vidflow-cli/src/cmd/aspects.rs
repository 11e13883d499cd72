use crate::output::{print_json, print_table, progress_label};
use std::path::Path;
use vidflow_core::aspect;
use vidflow_core::progress::Tasks;
use vidflow_core::video::Video;

/// Aspect overview. With a video the counts are its completion; without one,
/// or when the video cannot be loaded, every count is zero.
pub fn overview(
    root: &Path,
    name: Option<&str>,
    category: Option<&str>,
    json: bool,
) -> anyhow::Result<()> {
    let video = match (name, category) {
        (Some(name), Some(category)) => super::open_store(root)
            .ok()
            .and_then(|store| Video::load(&store, name, category).ok()),
        _ => None,
    };
    let overview = aspect::overview(video.as_ref());

    if json {
        return print_json(&overview);
    }

    for a in &overview.aspects {
        let tasks = Tasks::new(a.completed_field_count, a.field_count);
        println!("{}. {}", a.order, progress_label(a.title, tasks));
    }
    Ok(())
}

pub fn fields(key: &str, json: bool) -> anyhow::Result<()> {
    let meta = aspect::fields_for(key)?;

    if json {
        return print_json(&meta);
    }

    println!("{} ({})", meta.title, meta.key);
    println!("{}\n", meta.description);
    let rows = meta
        .fields
        .iter()
        .map(|f| {
            vec![
                f.field_name.to_string(),
                f.name.to_string(),
                serde_json::to_value(f.kind)
                    .ok()
                    .and_then(|v| v.as_str().map(str::to_string))
                    .unwrap_or_default(),
                f.completion_criteria.to_string(),
                if f.required { "yes".into() } else { String::new() },
            ]
        })
        .collect();
    print_table(&["FIELD", "NAME", "TYPE", "COMPLETE WHEN", "REQUIRED"], rows);
    Ok(())
}
