use crate::output::print_json;
use anyhow::Context;
use std::path::Path;
use vidflow_core::{config::Config, io, paths};

pub fn run(root: &Path, json: bool) -> anyhow::Result<()> {
    let mut created = Vec::new();

    let settings = paths::settings_path(root);
    let config = if settings.exists() {
        Config::load(root).context("failed to read settings.yaml")?
    } else {
        let cfg = Config::default();
        cfg.save(root).context("failed to write settings.yaml")?;
        created.push(paths::SETTINGS_FILE.to_string());
        cfg
    };

    let data_dir = root.join(&config.data_dir);
    if !data_dir.is_dir() {
        io::ensure_dir(&data_dir)
            .with_context(|| format!("failed to create {}", data_dir.display()))?;
        created.push(format!("{}/", config.data_dir));
    }

    let index = root.join(&config.index_file);
    if io::write_if_missing(&index, b"[]\n")
        .with_context(|| format!("failed to write {}", index.display()))?
    {
        created.push(config.index_file.clone());
    }

    if json {
        print_json(&serde_json::json!({
            "root": root.display().to_string(),
            "created": created,
        }))?;
        return Ok(());
    }

    println!("Initializing vidflow in: {}", root.display());
    for name in [
        paths::SETTINGS_FILE.to_string(),
        format!("{}/", config.data_dir),
        config.index_file.clone(),
    ] {
        let verb = if created.contains(&name) { "created" } else { "exists " };
        println!("  {verb}: {name}");
    }
    println!("\nNext: vidflow create \"<name>\" --category <category>");
    Ok(())
}
