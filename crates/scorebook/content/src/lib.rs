//! Data-driven match content and loaders.
//!
//! This crate houses the static inputs a scorer needs before the first ball
//! and provides loaders for RON/TOML data files:
//! - Match formats (catalog of presets, extendable via TOML)
//! - Team rosters (RON)
//! - Match scripts: the deliveries and selections of a recorded match (RON)
//!
//! Content feeds the innings session and never appears in innings state.

pub mod catalog;
pub mod script;

#[cfg(feature = "loaders")]
pub mod loaders;

pub use catalog::FormatCatalog;
pub use script::{InningsScript, MatchScript, OverScript, ScriptError, ScriptedSelection};

#[cfg(feature = "loaders")]
pub use loaders::{
    ContentFactory, FormatLoader, LoadedMatch, RosterLoader, RosterSpec, ScriptLoader,
};
