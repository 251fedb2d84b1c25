//! Anti-forgery tokens
//!
//! A token is `nonce.signature` where `nonce` is the base64 encoding of a
//! random UUID and `signature` is the lowercase hex HMAC-SHA256 of the nonce
//! text, keyed with `secret:<configured secret>`.

use crate::{SecurityError, SecurityResult};
use base64::{Engine as _, engine::general_purpose};
use hmac::{Hmac, Mac};
use sha2::Sha256;
use subtle::ConstantTimeEq;
use zluvo_conf::{ExposeSecret, SecretString, Settings};

type HmacSha256 = Hmac<Sha256>;

/// Separator between the nonce and the signature
pub const TOKEN_SEPARATOR: char = '.';

// Rejection reasons
pub const REASON_TOKEN_MISSING: &str = "Anti-forgery token missing.";
pub const REASON_MALFORMED_TOKEN: &str = "Anti-forgery token is malformed.";
pub const REASON_BAD_SIGNATURE: &str = "Anti-forgery token signature does not match.";

/// Issues and checks anti-forgery tokens.
///
/// Forms hold a guard behind `Arc<dyn TokenGuard>` so tests and integrators
/// can swap the signing scheme.
pub trait TokenGuard: Send + Sync {
	/// Issue a fresh token
	fn generate(&self) -> String;

	/// Check a submitted token, reporting why it was rejected
	fn check(&self, token: &str) -> SecurityResult<()>;

	/// Whether a submitted token is authentic
	fn verify(&self, token: &str) -> bool {
		self.check(token).is_ok()
	}
}

/// HMAC-SHA256 token guard
pub struct HmacTokenGuard {
	key: SecretString,
}

impl HmacTokenGuard {
	/// Create a guard signing with the given secret
	///
	/// # Examples
	///
	/// ```
	/// use zluvo_security::{HmacTokenGuard, TokenGuard};
	///
	/// let guard = HmacTokenGuard::new("s3cret").unwrap();
	/// let token = guard.generate();
	/// assert!(guard.verify(&token));
	/// ```
	pub fn new(secret: impl AsRef<str>) -> SecurityResult<Self> {
		let secret = secret.as_ref();
		if secret.is_empty() {
			return Err(SecurityError::MissingSecret);
		}
		Ok(Self {
			key: SecretString::from(format!("secret:{}", secret)),
		})
	}

	/// Create a guard from the `csrf` setting (`ZLUVO_CSRF`)
	///
	/// Fails with [`SecurityError::MissingSecret`] when no secret is configured.
	///
	/// # Examples
	///
	/// ```
	/// use zluvo_conf::Settings;
	/// use zluvo_security::{HmacTokenGuard, SecurityError};
	///
	/// let missing = HmacTokenGuard::from_settings(&Settings::default());
	/// assert!(matches!(missing, Err(SecurityError::MissingSecret)));
	///
	/// let settings = Settings::default().with_csrf_secret("s3cret");
	/// assert!(HmacTokenGuard::from_settings(&settings).is_ok());
	/// ```
	pub fn from_settings(settings: &Settings) -> SecurityResult<Self> {
		let secret = settings
			.csrf_secret()
			.ok_or(SecurityError::MissingSecret)?;
		Self::new(secret.expose_secret())
	}

	/// Lowercase hex HMAC-SHA256 of `payload`
	fn sign(&self, payload: &str) -> String {
		let mut mac = HmacSha256::new_from_slice(self.key.expose_secret().as_bytes())
			.expect("HMAC accepts any key length");
		mac.update(payload.as_bytes());
		hex::encode(mac.finalize().into_bytes())
	}
}

impl TokenGuard for HmacTokenGuard {
	fn generate(&self) -> String {
		let nonce = general_purpose::STANDARD.encode(uuid::Uuid::new_v4().to_string());
		let signature = self.sign(&nonce);
		format!("{}{}{}", nonce, TOKEN_SEPARATOR, signature)
	}

	fn check(&self, token: &str) -> SecurityResult<()> {
		if token.is_empty() {
			return Err(SecurityError::TokenRejected(REASON_TOKEN_MISSING.to_string()));
		}

		let (nonce, signature) = match token.split_once(TOKEN_SEPARATOR) {
			Some((nonce, signature)) if !nonce.is_empty() && !signature.is_empty() => {
				(nonce, signature)
			}
			_ => {
				return Err(SecurityError::TokenRejected(
					REASON_MALFORMED_TOKEN.to_string(),
				));
			}
		};

		let expected = self.sign(nonce);
		if bool::from(expected.as_bytes().ct_eq(signature.as_bytes())) {
			Ok(())
		} else {
			tracing::debug!(nonce_len = nonce.len(), "anti-forgery signature mismatch");
			Err(SecurityError::TokenRejected(REASON_BAD_SIGNATURE.to_string()))
		}
	}
}

impl std::fmt::Debug for HmacTokenGuard {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("HmacTokenGuard")
			.field("key", &"[REDACTED]")
			.finish()
	}
}
