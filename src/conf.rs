//! Settings module.
//!
//! # Examples
//!
//! ```rust,no_run
//! use zluvo::conf::Settings;
//!
//! let settings = Settings::from_env().unwrap();
//! ```

#[cfg(feature = "conf")]
pub use zluvo_conf::*;
