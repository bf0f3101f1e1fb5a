//! The disks widget: usage summary for mounted filesystems

use std::sync::Arc;

use async_trait::async_trait;
use sysinfo::Disks as SysDisks;

use crate::color::{self, Color};
use crate::config::WidgetSpec;
use crate::widget::{OptionsError, RunContext, Widget, WidgetResult, WidgetTask};

pub struct Disks;

impl Widget for Disks {
    fn name(&self) -> &'static str {
        "disks"
    }

    fn prepare(&self, _spec: &WidgetSpec) -> Result<Box<dyn WidgetTask>, OptionsError> {
        Ok(Box::new(DisksTask))
    }
}

struct DisksTask;

#[async_trait]
impl WidgetTask for DisksTask {
    async fn run(self: Box<Self>, ctx: Arc<RunContext>) -> WidgetResult {
        let disks = SysDisks::new_with_refreshed_list();

        let mut rows: Vec<(String, String)> = Vec::new();
        for disk in disks.list() {
            let total = disk.total_space();
            if total == 0 {
                continue;
            }
            let used = total - disk.available_space();
            let percent = (used as f64 / total as f64 * 100.0).round() as u64;
            let summary = format!(
                "{} / {} ({})",
                human_size(used),
                human_size(total),
                paint_percent(percent, ctx.color),
            );
            rows.push((disk.mount_point().display().to_string(), summary));
        }

        if rows.is_empty() {
            return Ok("No disk information available".to_string());
        }

        let longest = rows.iter().map(|(mount, _)| mount.len()).max().unwrap_or(0);
        let mut out = String::from("Disks:\n");
        for (mount, summary) in rows {
            out.push_str(&format!("    {:<width$}    {}\n", mount, summary, width = longest));
        }
        Ok(out)
    }
}

/// Color the usage percentage by how full the filesystem is
fn paint_percent(percent: u64, enabled: bool) -> String {
    let c = if percent >= 90 {
        Color::Red
    } else if percent >= 75 {
        Color::Yellow
    } else {
        Color::Green
    };
    color::paint(&format!("{}%", percent), c, enabled)
}

/// Render a byte count with a binary unit suffix
fn human_size(bytes: u64) -> String {
    const UNITS: [&str; 5] = ["B", "K", "M", "G", "T"];
    let mut value = bytes as f64;
    let mut unit = 0;
    while value >= 1024.0 && unit < UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }
    if unit == 0 {
        format!("{}{}", bytes, UNITS[unit])
    } else {
        format!("{:.1}{}", value, UNITS[unit])
    }
}
