//! The load widget: a one-line load average summary

use std::sync::Arc;

use async_trait::async_trait;
use sysinfo::System;
use tracing::warn;

use crate::config::WidgetSpec;
use crate::widget::{OptionsError, RunContext, Widget, WidgetResult, WidgetTask};

pub struct Load;

impl Widget for Load {
    fn name(&self) -> &'static str {
        "load"
    }

    fn prepare(&self, _spec: &WidgetSpec) -> Result<Box<dyn WidgetTask>, OptionsError> {
        Ok(Box::new(LoadTask))
    }
}

struct LoadTask;

#[async_trait]
impl WidgetTask for LoadTask {
    async fn run(self: Box<Self>, _ctx: Arc<RunContext>) -> WidgetResult {
        let avg = System::load_average();
        if avg.one < 0.0 {
            warn!(target: "salute::load", "load averages unavailable on this system");
            return Ok("No load information available".to_string());
        }
        Ok(format!(
            "load average: {:.2}, {:.2}, {:.2}",
            avg.one, avg.five, avg.fifteen
        ))
    }
}
