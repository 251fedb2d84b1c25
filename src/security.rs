//! Anti-forgery tokens.

#[cfg(feature = "security")]
pub use zluvo_security::*;
