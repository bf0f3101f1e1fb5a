//! The uptime widget: how long the system has been up

use std::sync::Arc;

use async_trait::async_trait;
use sysinfo::System;

use crate::config::WidgetSpec;
use crate::widget::{OptionsError, RunContext, Widget, WidgetResult, WidgetTask};

pub struct Uptime;

impl Widget for Uptime {
    fn name(&self) -> &'static str {
        "uptime"
    }

    fn prepare(&self, _spec: &WidgetSpec) -> Result<Box<dyn WidgetTask>, OptionsError> {
        Ok(Box::new(UptimeTask))
    }
}

struct UptimeTask;

#[async_trait]
impl WidgetTask for UptimeTask {
    async fn run(self: Box<Self>, _ctx: Arc<RunContext>) -> WidgetResult {
        Ok(format!("up {}", format_uptime(System::uptime())))
    }
}

/// Format seconds as the largest two relevant units
fn format_uptime(seconds: u64) -> String {
    let days = seconds / 86_400;
    let hours = (seconds % 86_400) / 3_600;
    let minutes = (seconds % 3_600) / 60;

    let unit = |value: u64, name: &str| {
        if value == 1 {
            format!("1 {}", name)
        } else {
            format!("{} {}s", value, name)
        }
    };

    if days > 0 {
        format!("{}, {}", unit(days, "day"), unit(hours, "hour"))
    } else if hours > 0 {
        format!("{}, {}", unit(hours, "hour"), unit(minutes, "minute"))
    } else {
        unit(minutes, "minute")
    }
}
