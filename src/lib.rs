//! `layer-alias` — resolve import aliases across a stack of layered project roots.
//!
//! A dynamic alias such as `@` or `~` resolves to the first layer on disk that
//! actually contains the requested file; every layer also gets a static
//! `~<name>` alias pointing at its root.

pub mod alias;
pub mod config;
pub mod error;
pub mod hook;
pub mod layer;
pub mod output;
pub mod resolve;
mod util;

pub use alias::{apply_aliases, expand_aliases, AliasMap, AliasRule, DYNAMIC_TOKENS};
pub use error::LayerAliasError;
pub use hook::{AliasSlot, BuildConfig, HostOptions, LayerAliasModule};
pub use layer::{Layer, LayerSnapshot};
pub use resolve::{DiskProbe, LayerResolver, Probe};
