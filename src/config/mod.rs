//! Configuration module for tempora.

mod settings;

pub use settings::{QuerySettings, ResolverSettings, Settings, SettingsError};
