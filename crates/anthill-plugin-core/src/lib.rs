//! Plugin-side contract for the Anthill orchestrator.
//!
//! A plugin is an executable launched twice per operation:
//!
//! ```text
//! Orchestrator
//!     |
//!     |  ANTHILL_PHASE=prepare, ANTHILL_PLUGIN_PARAMS=<json>
//!     v
//! plugin --stdout--> {"phase":"prepare","message":...,"targets":[...]}
//!     |
//!     |  ANTHILL_PHASE=apply, ANTHILL_PLUGIN_PARAMS=<json>,
//!     |  ANTHILL_PREVIEW_PLAN=<plan from prepare>
//!     v
//! plugin --stdout--> progress text, exit status
//! ```
//!
//! Implement [`Plugin`] and hand it to [`runner::run`].

pub mod context;
pub mod env;
pub mod error;
pub mod params;
pub mod phase;
pub mod plan;
pub mod plugin;
pub mod runner;

pub use context::PluginContext;
pub use env::PluginEnv;
pub use error::PluginError;
pub use params::PluginParams;
pub use phase::Phase;
pub use plan::{PreviewPlan, ReceivedPlan};
pub use plugin::{Plugin, PluginManifest};
