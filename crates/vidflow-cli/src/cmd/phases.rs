use crate::output::{print_json, print_table};
use anyhow::Context;
use std::path::Path;
use vidflow_core::classifier::PhaseSummary;
use vidflow_core::video::Video;

pub fn run(root: &Path, json: bool) -> anyhow::Result<()> {
    let store = super::open_store(root)?;
    let videos = Video::list(&store).context("failed to read index")?;
    let summary = PhaseSummary::from_videos(&videos);

    if json {
        return print_json(&summary);
    }

    let rows = summary
        .phases
        .iter()
        .map(|p| vec![p.id.to_string(), p.title.to_string(), p.count.to_string()])
        .collect();
    print_table(&["ID", "PHASE", "VIDEOS"], rows);
    println!("\n{} videos total", summary.total);
    Ok(())
}
