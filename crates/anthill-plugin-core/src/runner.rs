//! Phase sequencing inside the plugin process.
//!
//! stdout is the protocol channel: in prepare it carries exactly one line
//! of plan JSON, in apply it carries progress text. Errors are returned to
//! the caller, which reports them on stderr.

use std::io::Write;

use crate::context::PluginContext;
use crate::env::PluginEnv;
use crate::error::PluginError;
use crate::phase::Phase;
use crate::plugin::Plugin;

pub const APPLY_BANNER: &str = "Executing plugin...";
pub const APPLY_DONE: &str = "Plugin execution complete.";

/// Run the phase selected by `env`, writing protocol output to `out`.
///
/// Returns the phase that ran.
///
/// # Errors
///
/// - [`PluginError::UnknownPhase`] when `ANTHILL_PHASE` is not `prepare` or
///   `apply`; nothing is written to `out`.
/// - [`PluginError::Failed`] when the plugin's own logic fails.
/// - [`PluginError::Io`] / [`PluginError::Serialize`] for output failures.
pub async fn run(
    plugin: &dyn Plugin,
    env: &PluginEnv,
    out: &mut (dyn Write + Send),
) -> Result<Phase, PluginError> {
    let ctx = PluginContext::from_env_snapshot(env)?;
    let phase = ctx.phase;

    tracing::debug!(
        plugin = %plugin.manifest().name,
        %phase,
        params = ctx.params.len(),
        has_preview_plan = ctx.preview_plan.is_some(),
        "running plugin phase"
    );

    match phase {
        Phase::Prepare => {
            let mut plan = plugin
                .prepare(&ctx)
                .await
                .map_err(|error| PluginError::Failed { phase, error })?;
            if plan.phase != Phase::Prepare {
                tracing::debug!(phase = %plan.phase, "forcing preview plan phase to prepare");
                plan.phase = Phase::Prepare;
            }
            let json = plan.to_json()?;
            writeln!(out, "{json}")?;
        }
        Phase::Apply => {
            writeln!(out, "{APPLY_BANNER}")?;
            plugin
                .apply(&ctx, out)
                .await
                .map_err(|error| PluginError::Failed { phase, error })?;
            writeln!(out, "{APPLY_DONE}")?;
        }
    }

    out.flush()?;
    Ok(phase)
}

/// Run prepare then apply back to back, the way the orchestrator does.
///
/// The plan printed by prepare is echoed to `out` and forwarded to apply as
/// `ANTHILL_PREVIEW_PLAN`. Returns the captured plan JSON.
pub async fn simulate(
    plugin: &dyn Plugin,
    params: Option<String>,
    out: &mut (dyn Write + Send),
) -> Result<String, PluginError> {
    let mut captured = Vec::new();
    let prepare_env = PluginEnv::new(Some(Phase::Prepare.to_string()), params.clone(), None);
    run(plugin, &prepare_env, &mut captured).await?;

    let plan = String::from_utf8_lossy(&captured).trim_end().to_string();
    writeln!(out, "[prepare] {plan}")?;

    let apply_env = PluginEnv::new(Some(Phase::Apply.to_string()), params, Some(plan.clone()));
    run(plugin, &apply_env, out).await?;

    Ok(plan)
}
