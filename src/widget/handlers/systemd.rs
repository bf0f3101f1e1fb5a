//! The systemd-services widget: states for a configured set of units
//!
//! Unit states come from `systemctl list-units`; a systemd that cannot be
//! reached degrades to a placeholder line instead of failing the run.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use serde::Deserialize;
use tracing::warn;

use crate::color::{self, Color};
use crate::config::WidgetSpec;
use crate::widget::{OptionsError, RunContext, Widget, WidgetResult, WidgetTask};

#[derive(Debug, Deserialize)]
struct SystemdOptions {
    services: Vec<String>,
}

pub struct SystemdServices;

impl Widget for SystemdServices {
    fn name(&self) -> &'static str {
        "systemd-services"
    }

    fn prepare(&self, spec: &WidgetSpec) -> Result<Box<dyn WidgetTask>, OptionsError> {
        let options: SystemdOptions = spec.parse_options()?;
        Ok(Box::new(SystemdTask {
            services: options.services,
        }))
    }
}

struct SystemdTask {
    services: Vec<String>,
}

#[async_trait]
impl WidgetTask for SystemdTask {
    async fn run(self: Box<Self>, ctx: Arc<RunContext>) -> WidgetResult {
        let output = tokio::process::Command::new("systemctl")
            .args(["list-units", "--type=service", "--all", "--no-legend", "--plain"])
            .output()
            .await;

        let listing = match output {
            Ok(out) if out.status.success() => String::from_utf8_lossy(&out.stdout).into_owned(),
            Ok(out) => {
                warn!(target: "salute::systemd", "systemctl exited with {}", out.status);
                return Ok("systemd-services: cannot enumerate units".to_string());
            }
            Err(err) => {
                warn!(target: "salute::systemd", "could not run systemctl: {}", err);
                return Ok("systemd-services: could not connect".to_string());
            }
        };

        Ok(render_table(&self.services, &unit_states(&listing), ctx.color))
    }
}

/// Parse `systemctl list-units --plain` output into unit name → sub-state
fn unit_states(listing: &str) -> HashMap<String, String> {
    let mut states = HashMap::new();
    for line in listing.lines() {
        let fields: Vec<&str> = line.split_whitespace().collect();
        if fields.len() < 4 {
            continue;
        }
        let name = fields[0]
            .to_lowercase()
            .trim_end_matches(".service")
            .to_string();
        states.insert(name, fields[3].to_string());
    }
    states
}

fn render_table(services: &[String], states: &HashMap<String, String>, color_on: bool) -> String {
    let rows: Vec<(String, String)> = services
        .iter()
        .map(|service| {
            let (label, c) = match states.get(&service.to_lowercase()) {
                Some(state) => {
                    let c = match state.as_str() {
                        "running" => Color::Green,
                        "failed" => Color::Red,
                        _ => Color::White,
                    };
                    (titleize(state), c)
                }
                None => ("not found".to_string(), Color::Red),
            };
            (service.clone(), color::paint(&label, c, color_on))
        })
        .collect();

    let longest = rows.iter().map(|(name, _)| name.len()).max().unwrap_or(0);
    let mut out = String::from("Services:\n");
    for (name, state) in rows {
        let padded = format!("{}:{}", name, " ".repeat(longest - name.len()));
        out.push_str(&format!("    {}    {}\n", padded, state));
    }
    out
}

/// Capitalize the first character of a sub-state name
fn titleize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const LISTING: &str = "\
sshd.service      loaded active   running OpenSSH server daemon
nginx.service     loaded failed   failed  A high performance web server
cups.service      loaded inactive dead    CUPS Scheduler
";

    #[test]
    fn test_unit_states_parsed() {
        let states = unit_states(LISTING);
        assert_eq!(states.get("sshd").map(String::as_str), Some("running"));
        assert_eq!(states.get("nginx").map(String::as_str), Some("failed"));
        assert_eq!(states.get("cups").map(String::as_str), Some("dead"));
    }

    #[test]
    fn test_render_table_states_and_alignment() {
        let states = unit_states(LISTING);
        let services = vec!["sshd".to_string(), "postgres".to_string()];
        let table = render_table(&services, &states, false);

        assert!(table.starts_with("Services:\n"));
        assert!(table.contains("sshd:"));
        assert!(table.contains("Running"));
        assert!(table.contains("postgres:"));
        assert!(table.contains("not found"));

        // Both state columns start at the same offset
        let offsets: Vec<usize> = table
            .lines()
            .skip(1)
            .map(|l| l.rfind("    ").expect("state separator"))
            .collect();
        assert_eq!(offsets[0], offsets[1]);
    }

    #[test]
    fn test_titleize() {
        assert_eq!(titleize("running"), "Running");
        assert_eq!(titleize(""), "");
    }

    #[test]
    fn test_missing_services_option_is_a_config_error() {
        let spec = crate::config::Config::parse("[[widget]]\ntype = \"systemd-services\"")
            .expect("parses")
            .widgets
            .remove(0);
        assert!(SystemdServices.prepare(&spec).is_err());
    }
}
