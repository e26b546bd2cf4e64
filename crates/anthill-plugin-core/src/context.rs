use crate::env::PluginEnv;
use crate::error::PluginError;
use crate::params::PluginParams;
use crate::phase::Phase;
use crate::plan::ReceivedPlan;

/// Interpreted execution context for one plugin run.
#[derive(Debug, Clone, PartialEq)]
pub struct PluginContext {
    pub phase: Phase,
    pub params: PluginParams,
    /// Only meaningful during apply; `None` when the orchestrator sent no plan.
    pub preview_plan: Option<ReceivedPlan>,
}

impl PluginContext {
    /// Interpret a raw environment snapshot.
    ///
    /// Only the phase can fail to resolve. Parameters and the preview plan
    /// fall back to raw values instead of erroring.
    pub fn from_env_snapshot(env: &PluginEnv) -> Result<Self, PluginError> {
        let phase = Phase::resolve(env.phase.as_deref())?;
        let params = PluginParams::parse(env.params.as_deref());
        let preview_plan = ReceivedPlan::parse(env.preview_plan.as_deref());

        Ok(Self {
            phase,
            params,
            preview_plan,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn empty_env_is_apply_with_nothing() {
        let ctx = PluginContext::from_env_snapshot(&PluginEnv::default()).unwrap();
        assert_eq!(ctx.phase, Phase::Apply);
        assert!(ctx.params.is_empty());
        assert!(ctx.preview_plan.is_none());
    }

    #[test]
    fn full_env_is_interpreted() {
        let env = PluginEnv::new(
            Some("apply".to_string()),
            Some(r#"{"example_param":"v"}"#.to_string()),
            Some(r#"{"phase":"prepare","message":"m","targets":[]}"#.to_string()),
        );
        let ctx = PluginContext::from_env_snapshot(&env).unwrap();
        assert_eq!(ctx.params.get("example_param"), Some(&json!("v")));
        assert!(matches!(ctx.preview_plan, Some(ReceivedPlan::Parsed(_))));
    }

    #[test]
    fn bad_params_and_plan_do_not_fail() {
        let env = PluginEnv::new(
            Some("prepare".to_string()),
            Some("{{".to_string()),
            Some("}}".to_string()),
        );
        let ctx = PluginContext::from_env_snapshot(&env).unwrap();
        assert_eq!(ctx.phase, Phase::Prepare);
        assert_eq!(ctx.params.raw(), Some("{{"));
        assert_eq!(ctx.preview_plan, Some(ReceivedPlan::Raw("}}".to_string())));
    }

    #[test]
    fn unknown_phase_fails() {
        let env = PluginEnv::new(Some("destroy".to_string()), None, None);
        let err = PluginContext::from_env_snapshot(&env).unwrap_err();
        assert!(matches!(err, PluginError::UnknownPhase(ref v) if v == "destroy"));
    }
}
