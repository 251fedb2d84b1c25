//! Form fields and processing.
//!
//! # Examples
//!
//! ```rust,no_run
//! use zluvo::forms::{Form, FormData, field};
//! ```

#[cfg(feature = "forms")]
pub use zluvo_forms::*;
