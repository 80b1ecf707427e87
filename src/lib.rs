pub mod config;
pub mod dialog;
pub mod formats;
pub mod harness;
pub mod host;
pub mod selector;
pub mod sequence;

pub use selector::{CacheFileSelector, DialogPolicy, SelectorOutcome};
