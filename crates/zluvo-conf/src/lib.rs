//! # zluvo configuration
//!
//! Layered settings for the zluvo form stack. Values come from built-in
//! defaults, in-memory sources and `ZLUVO_*` environment variables, merged
//! by source priority.
//!
//! | Variable | Key | Used by |
//! |---|---|---|
//! | `ZLUVO_CSRF` | `csrf` | anti-forgery token signing |
//! | `ZLUVO_TOKEN` | `token` | failure collector authentication |
//! | `ZLUVO_COLLECTOR_URL` | `collector_url` | failure collector endpoint |
//! | `ZLUVO_PROJECT_NAME` | `project_name` | failure records |
//! | `ZLUVO_PROJECT_VERSION` | `project_version` | failure records |
//!
//! ## Example
//!
//! ```
//! use zluvo_conf::Settings;
//! use zluvo_conf::sources::MemorySource;
//!
//! let source = MemorySource::new().with_value("csrf", "s3cret");
//! let settings = Settings::from_sources(&[&source]).unwrap();
//! assert!(settings.csrf_secret().is_some());
//! assert!(settings.access_token().is_none());
//! ```

pub mod settings;
pub mod sources;

pub use secrecy::{ExposeSecret, SecretString};
pub use settings::{DEFAULT_COLLECTOR_URL, ProjectInfo, Settings, SettingsError, keys};
pub use sources::{ConfigSource, DefaultSource, EnvSource, MemorySource, SourceError};
