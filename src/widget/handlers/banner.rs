//! The banner widget: large block-letter text rendered from a FIGfont
//!
//! Composition of the whole banner pipeline: acquire the message, validate
//! the color against the closed set, resolve the font through the fallback
//! chain, lay out the glyphs at a fixed display width, paint. Failures at
//! any stage belong to this widget alone; font-fallback warnings go to the
//! diagnostics sink, never into the output.

use std::sync::Arc;

use async_trait::async_trait;
use serde::Deserialize;
use tracing::warn;

use crate::color::{self, Color};
use crate::config::WidgetSpec;
use crate::figlet;
use crate::widget::source::{TextSource, TextSourceOptions};
use crate::widget::{OptionsError, RunContext, Widget, WidgetResult, WidgetTask};

/// Fixed layout width of the banner, in columns
const DISPLAY_WIDTH: usize = 80;

/// Color used when the config names none
const DEFAULT_COLOR: &str = "magenta";

#[derive(Debug, Deserialize)]
struct BannerOptions {
    #[serde(flatten)]
    source: TextSourceOptions,
    #[serde(default)]
    font: Option<String>,
    #[serde(default)]
    color: Option<String>,
}

pub struct Banner;

impl Widget for Banner {
    fn name(&self) -> &'static str {
        "banner"
    }

    fn prepare(&self, spec: &WidgetSpec) -> Result<Box<dyn WidgetTask>, OptionsError> {
        let options: BannerOptions = spec.parse_options()?;
        let source = TextSource::from_options(&options.source)?;
        Ok(Box::new(BannerTask {
            source,
            font: options.font.unwrap_or_default(),
            color: options.color.unwrap_or_else(|| DEFAULT_COLOR.to_string()),
        }))
    }
}

struct BannerTask {
    source: TextSource,
    font: String,
    color: String,
}

#[async_trait]
impl WidgetTask for BannerTask {
    async fn run(self: Box<Self>, ctx: Arc<RunContext>) -> WidgetResult {
        let text = self.source.resolve().await?;

        // Fail fast on the color before any rendering happens.
        let banner_color: Color = self.color.parse()?;

        let resolution = figlet::resolve(&self.font)?;
        for warning in &resolution.warnings {
            warn!(target: "salute::banner", "{}", warning);
        }

        let rows = figlet::render(&text, &resolution.font, DISPLAY_WIDTH);
        let painted = color::paint(&rows.join("\n"), banner_color, ctx.color);
        Ok(painted
            .strip_suffix('\n')
            .unwrap_or(painted.as_str())
            .to_string())
    }
}
