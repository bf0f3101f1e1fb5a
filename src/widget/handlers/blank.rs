//! The blank widget: a single spacer line

use std::sync::Arc;

use async_trait::async_trait;

use crate::config::WidgetSpec;
use crate::widget::{OptionsError, RunContext, Widget, WidgetResult, WidgetTask};

pub struct Blank;

impl Widget for Blank {
    fn name(&self) -> &'static str {
        "blank"
    }

    fn prepare(&self, _spec: &WidgetSpec) -> Result<Box<dyn WidgetTask>, OptionsError> {
        Ok(Box::new(BlankTask))
    }
}

struct BlankTask;

#[async_trait]
impl WidgetTask for BlankTask {
    async fn run(self: Box<Self>, _ctx: Arc<RunContext>) -> WidgetResult {
        Ok(" ".to_string())
    }
}
