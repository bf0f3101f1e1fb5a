//! The print widget: echo a literal string or a command's captured output

use std::sync::Arc;

use async_trait::async_trait;

use crate::config::WidgetSpec;
use crate::widget::source::{TextSource, TextSourceOptions};
use crate::widget::{OptionsError, RunContext, Widget, WidgetResult, WidgetTask};

pub struct Print;

impl Widget for Print {
    fn name(&self) -> &'static str {
        "print"
    }

    fn prepare(&self, spec: &WidgetSpec) -> Result<Box<dyn WidgetTask>, OptionsError> {
        let options: TextSourceOptions = spec.parse_options()?;
        let source = TextSource::from_options(&options)?;
        Ok(Box::new(PrintTask { source }))
    }
}

struct PrintTask {
    source: TextSource,
}

#[async_trait]
impl WidgetTask for PrintTask {
    async fn run(self: Box<Self>, _ctx: Arc<RunContext>) -> WidgetResult {
        self.source.resolve().await
    }
}
