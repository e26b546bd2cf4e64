//! Environment variable names for the plugin execution context.
//!
//! The orchestrator launches a plugin executable with these variables set.
//! Nothing else about the process environment is part of the contract.

/// JSON-serialized user parameters. Optional.
pub const PLUGIN_PARAMS: &str = "ANTHILL_PLUGIN_PARAMS";
/// Either `prepare` (preview) or `apply` (execute). Defaults to `apply`.
pub const PHASE: &str = "ANTHILL_PHASE";
/// JSON-serialized preview plan from an earlier prepare run (apply phase only).
pub const PREVIEW_PLAN: &str = "ANTHILL_PREVIEW_PLAN";

/// Raw snapshot of the execution-context variables.
///
/// Values are kept as the orchestrator sent them; interpretation happens in
/// [`crate::context::PluginContext`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PluginEnv {
    pub phase: Option<String>,
    pub params: Option<String>,
    pub preview_plan: Option<String>,
}

impl PluginEnv {
    /// Build a snapshot from explicit values (testable without env vars).
    pub fn new(
        phase: Option<String>,
        params: Option<String>,
        preview_plan: Option<String>,
    ) -> Self {
        Self {
            phase,
            params,
            preview_plan,
        }
    }

    /// Read the three context variables from the process environment.
    ///
    /// Only an unset variable is absent. Non-UTF-8 bytes are replaced with
    /// U+FFFD, so a mangled phase is rejected instead of defaulting to apply.
    pub fn from_env() -> Self {
        Self::from_lookup(read_var)
    }

    /// Read the context variables through an arbitrary lookup function.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        Self {
            phase: lookup(PHASE),
            params: lookup(PLUGIN_PARAMS),
            preview_plan: lookup(PREVIEW_PLAN),
        }
    }
}

/// Read one variable from the process environment, lossily decoded.
pub fn read_var(name: &str) -> Option<String> {
    std::env::var_os(name).map(|value| value.to_string_lossy().into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::sync::Mutex;

    static ENV_MUTEX: Mutex<()> = Mutex::new(());

    #[test]
    fn from_lookup_reads_all_three_names() {
        let vars: HashMap<&str, &str> = HashMap::from([
            ("ANTHILL_PHASE", "prepare"),
            ("ANTHILL_PLUGIN_PARAMS", r#"{"a":1}"#),
            ("ANTHILL_PREVIEW_PLAN", "{}"),
        ]);
        let env = PluginEnv::from_lookup(|name| vars.get(name).map(|v| v.to_string()));

        assert_eq!(env.phase.as_deref(), Some("prepare"));
        assert_eq!(env.params.as_deref(), Some(r#"{"a":1}"#));
        assert_eq!(env.preview_plan.as_deref(), Some("{}"));
    }

    #[test]
    fn from_lookup_missing_values_are_none() {
        let env = PluginEnv::from_lookup(|_| None);
        assert_eq!(env, PluginEnv::default());
    }

    #[test]
    fn from_env_reads_process_environment() {
        let _lock = ENV_MUTEX.lock().unwrap();
        // SAFETY: serialized by mutex, test-only code.
        unsafe {
            std::env::set_var(PHASE, "prepare");
            std::env::set_var(PLUGIN_PARAMS, r#"{"example_param":"x"}"#);
            std::env::remove_var(PREVIEW_PLAN);
        }
        let env = PluginEnv::from_env();
        unsafe {
            std::env::remove_var(PHASE);
            std::env::remove_var(PLUGIN_PARAMS);
        }

        assert_eq!(env.phase.as_deref(), Some("prepare"));
        assert_eq!(env.params.as_deref(), Some(r#"{"example_param":"x"}"#));
        assert!(env.preview_plan.is_none());
    }

    #[cfg(unix)]
    #[test]
    fn from_env_keeps_non_utf8_values() {
        use std::ffi::OsString;
        use std::os::unix::ffi::OsStringExt;

        let _lock = ENV_MUTEX.lock().unwrap();
        // SAFETY: serialized by mutex, test-only code.
        unsafe {
            std::env::set_var(PHASE, OsString::from_vec(b"prep\xffare".to_vec()));
            std::env::remove_var(PLUGIN_PARAMS);
            std::env::remove_var(PREVIEW_PLAN);
        }
        let env = PluginEnv::from_env();
        unsafe { std::env::remove_var(PHASE) };

        assert_eq!(env.phase.as_deref(), Some("prep\u{FFFD}are"));
    }
}
