//! Execution-context resolution for the plugin binary.
//!
//! Resolution chain: CLI flag > env var > default. The defaults themselves
//! (absent phase means `apply`, absent params means `{}`) are applied later
//! by `PluginContext`.

use anthill_plugin_core::PluginEnv;
use anthill_plugin_core::env::read_var;

/// Values given on the command line, each overriding its env var.
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub phase: Option<String>,
    pub params: Option<String>,
    pub preview_plan: Option<String>,
}

/// Fully resolved configuration, ready for use.
#[derive(Debug)]
pub struct PluginConfig {
    pub env: PluginEnv,
}

impl PluginConfig {
    /// Resolve against the process environment.
    pub fn resolve(cli: &CliOverrides) -> Self {
        Self::resolve_with(cli, read_var)
    }

    /// Resolve with an explicit env lookup (testable without env vars).
    pub fn resolve_with(cli: &CliOverrides, lookup: impl Fn(&str) -> Option<String>) -> Self {
        let from_env = PluginEnv::from_lookup(lookup);

        let env = PluginEnv::new(
            pick("phase", cli.phase.clone(), from_env.phase),
            pick("params", cli.params.clone(), from_env.params),
            pick("preview_plan", cli.preview_plan.clone(), from_env.preview_plan),
        );

        Self { env }
    }
}

fn pick(name: &str, flag: Option<String>, env: Option<String>) -> Option<String> {
    match (flag, env) {
        (Some(flag), env) => {
            tracing::debug!(name, overridden_env = env.is_some(), "using command-line value");
            Some(flag)
        }
        (None, Some(env)) => {
            tracing::debug!(name, "using environment value");
            Some(env)
        }
        (None, None) => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anthill_plugin_core::env::{PHASE, PLUGIN_PARAMS, PREVIEW_PLAN};
    use std::collections::HashMap;

    fn lookup_from(vars: HashMap<&'static str, &'static str>) -> impl Fn(&str) -> Option<String> {
        move |name: &str| vars.get(name).map(|v| v.to_string())
    }

    #[test]
    fn env_values_used_without_flags() {
        let vars = HashMap::from([(PHASE, "prepare"), (PLUGIN_PARAMS, r#"{"a":1}"#)]);
        let cfg = PluginConfig::resolve_with(&CliOverrides::default(), lookup_from(vars));

        assert_eq!(cfg.env.phase.as_deref(), Some("prepare"));
        assert_eq!(cfg.env.params.as_deref(), Some(r#"{"a":1}"#));
        assert!(cfg.env.preview_plan.is_none());
    }

    #[test]
    fn flags_override_env() {
        let vars = HashMap::from([
            (PHASE, "prepare"),
            (PLUGIN_PARAMS, r#"{"a":1}"#),
            (PREVIEW_PLAN, "{}"),
        ]);
        let cli = CliOverrides {
            phase: Some("apply".to_string()),
            params: None,
            preview_plan: Some(r#"{"targets":[]}"#.to_string()),
        };
        let cfg = PluginConfig::resolve_with(&cli, lookup_from(vars));

        assert_eq!(cfg.env.phase.as_deref(), Some("apply"));
        assert_eq!(cfg.env.params.as_deref(), Some(r#"{"a":1}"#));
        assert_eq!(cfg.env.preview_plan.as_deref(), Some(r#"{"targets":[]}"#));
    }

    #[test]
    fn nothing_set_resolves_to_absent() {
        let cfg = PluginConfig::resolve_with(&CliOverrides::default(), |_| None);
        assert_eq!(cfg.env, PluginEnv::default());
    }
}
