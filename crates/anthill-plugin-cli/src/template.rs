//! The plugin body. Copy this crate and fill in `prepare` and `apply`.

use std::io::Write;

use anthill_plugin_core::{Plugin, PluginContext, PluginManifest, PreviewPlan, ReceivedPlan};
use anyhow::Result;
use async_trait::async_trait;

pub const PLUGIN_NAME: &str = "anthill-plugin";
pub const DEFAULT_EXAMPLE_PARAM: &str = "default_value";

pub struct TemplatePlugin;

#[async_trait]
impl Plugin for TemplatePlugin {
    fn manifest(&self) -> PluginManifest {
        PluginManifest::new(PLUGIN_NAME, env!("CARGO_PKG_VERSION"))
            .description(env!("CARGO_PKG_DESCRIPTION"))
            .author(env!("CARGO_PKG_AUTHORS"))
    }

    async fn prepare(&self, _ctx: &PluginContext) -> Result<PreviewPlan> {
        // Add affected items with `.target(...)` and any other preview
        // information with `.field(...)`.
        Ok(PreviewPlan::new("Preview of what will happen"))
    }

    async fn apply(&self, ctx: &PluginContext, out: &mut (dyn Write + Send)) -> Result<()> {
        let example_param = ctx
            .params
            .get_str_or("example_param", DEFAULT_EXAMPLE_PARAM);
        writeln!(out, "example_param: {example_param}")?;

        match &ctx.preview_plan {
            Some(ReceivedPlan::Parsed(plan)) => writeln!(out, "Applying preview plan: {plan}")?,
            Some(ReceivedPlan::Raw(raw)) => writeln!(out, "Preview plan (raw): {raw}")?,
            None => tracing::debug!("no preview plan forwarded"),
        }

        // Plugin logic goes here.

        Ok(())
    }
}
