//! Rendering helpers shared by the listing commands

use crate::error::{CliError, Result};
use crate::grouping::PeriodGroup;
use comfy_table::{modifiers::UTF8_ROUND_CORNERS, presets::UTF8_FULL, Table};
use serde::Serialize;
use volo_common::AssetRecord;

/// Listing formats accepted by `gallery` and `featured`
pub const LISTING_FORMATS: &[&str] = &["table", "compact", "json"];

/// Render grouped assets as `table` or `compact` text
pub fn format_groups(groups: &[PeriodGroup<&AssetRecord>], format: &str) -> Result<String> {
    match format {
        "table" => Ok(format_groups_as_table(groups)),
        "compact" => Ok(format_groups_as_compact(groups)),
        _ => Err(unknown_format(format)),
    }
}

/// Check a `--format` value before doing any work
pub fn validate_listing_format(format: &str) -> Result<()> {
    if LISTING_FORMATS.contains(&format) {
        Ok(())
    } else {
        Err(unknown_format(format))
    }
}

fn unknown_format(format: &str) -> CliError {
    CliError::config(format!(
        "Unknown format: '{}'. Use {}",
        format,
        LISTING_FORMATS.join(", ")
    ))
}

/// One table, one row per asset, period shown on the first row of each group
pub fn format_groups_as_table(groups: &[PeriodGroup<&AssetRecord>]) -> String {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_header(vec!["Period", "ID", "Title", "Category", "Captured", "Versions", "Polys"]);

    for group in groups {
        for (i, asset) in group.items.iter().enumerate() {
            let period = if i == 0 { group.label.as_str() } else { "" };
            table.add_row(vec![
                period.to_string(),
                asset.id.clone(),
                truncate_string(&asset.title, 40),
                asset.category.to_string(),
                asset.date.to_string(),
                asset.versions().len().max(1).to_string(),
                asset.poly_count.clone(),
            ]);
        }
    }

    format!("{}\n", table)
}

/// Plain text, one header line per period
pub fn format_groups_as_compact(groups: &[PeriodGroup<&AssetRecord>]) -> String {
    let mut output = String::new();

    for group in groups {
        output.push_str(&group.label);
        output.push('\n');
        for asset in &group.items {
            output.push_str(&format!(
                "  {}\t{}\t[{}]\n",
                asset.id, asset.title, asset.category
            ));
        }
    }

    output
}

/// Pretty JSON of any serializable view
pub fn format_as_json<T: Serialize + ?Sized>(value: &T) -> Result<String> {
    Ok(serde_json::to_string_pretty(value)?)
}

/// Shorten `s` to at most `max_len` characters, marking the cut with "..."
pub fn truncate_string(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}
