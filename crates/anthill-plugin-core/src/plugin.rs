//! The `Plugin` trait -- what a plugin author implements.
//!
//! The trait is object-safe so the runner can drive `&dyn Plugin`.

use std::io::Write;

use anyhow::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::context::PluginContext;
use crate::plan::PreviewPlan;

/// Metadata the orchestrator records when a plugin is installed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PluginManifest {
    pub name: String,
    pub version: String,
    pub description: String,
    pub author: String,
    /// Executable the orchestrator should invoke.
    pub entry_point: String,
}

impl PluginManifest {
    pub fn new(name: impl Into<String>, version: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            entry_point: name.clone(),
            name,
            version: version.into(),
            description: String::new(),
            author: String::new(),
        }
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn author(mut self, author: impl Into<String>) -> Self {
        self.author = author.into();
        self
    }

    pub fn entry_point(mut self, entry_point: impl Into<String>) -> Self {
        self.entry_point = entry_point.into();
        self
    }
}

/// A plugin executable's behavior for each phase.
#[async_trait]
pub trait Plugin: Send + Sync {
    fn manifest(&self) -> PluginManifest;

    /// Compute the preview plan. Must not have side effects.
    ///
    /// The runner prints the returned plan as JSON; do not write to stdout
    /// here.
    async fn prepare(&self, ctx: &PluginContext) -> Result<PreviewPlan>;

    /// Perform the work, writing progress text to `out`.
    ///
    /// `ctx.preview_plan` carries the plan from the prepare run when the
    /// orchestrator forwarded one.
    async fn apply(&self, ctx: &PluginContext, out: &mut (dyn Write + Send)) -> Result<()>;
}

const _: () = {
    fn _assert_object_safe(_: &dyn Plugin) {}
};
