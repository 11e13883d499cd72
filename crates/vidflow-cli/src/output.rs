use serde::Serialize;
use vidflow_core::progress::Tasks;

pub fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    let json = serde_json::to_string_pretty(value)?;
    println!("{}", json);
    Ok(())
}

/// Render rows under aligned headers, two spaces between columns.
pub fn format_table(headers: &[&str], rows: &[Vec<String>]) -> String {
    let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
    for row in rows {
        for (w, cell) in widths.iter_mut().zip(row) {
            *w = (*w).max(cell.chars().count());
        }
    }

    let render = |cells: Vec<String>| -> String {
        cells
            .iter()
            .enumerate()
            .map(|(i, cell)| {
                let w = widths.get(i).copied().unwrap_or(0);
                format!("{:width$}", cell, width = w)
            })
            .collect::<Vec<_>>()
            .join("  ")
            .trim_end()
            .to_string()
    };

    let mut lines = Vec::with_capacity(rows.len() + 2);
    lines.push(render(headers.iter().map(|h| h.to_string()).collect()));
    lines.push(render(widths.iter().map(|&w| "-".repeat(w)).collect()));
    for row in rows {
        lines.push(render(row.clone()));
    }
    lines.join("\n")
}

pub fn print_table(headers: &[&str], rows: Vec<Vec<String>>) {
    println!("{}", format_table(headers, &rows));
}

/// `Title (x/y)`, the label used for every progress line.
pub fn progress_label(title: &str, tasks: Tasks) -> String {
    format!("{title} ({tasks})")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_pads_columns_to_widest_cell() {
        let out = format_table(
            &["PHASE", "COUNT"],
            &[vec!["Published".into(), "3".into()], vec!["Ideas".into(), "12".into()]],
        );
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines[0], "PHASE      COUNT");
        assert_eq!(lines[1], "---------  -----");
        assert_eq!(lines[2], "Published  3");
        assert_eq!(lines[3], "Ideas      12");
    }

    #[test]
    fn progress_label_format() {
        assert_eq!(
            progress_label("Work Progress", Tasks::new(3, 11)),
            "Work Progress (3/11)"
        );
    }
}
