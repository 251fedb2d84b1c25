//! Post-validation plugins
//!
//! Plugins run after a submission passes validation, one at a time in
//! registration order. The first failure stops the chain.

use crate::form::{FormError, FormResult};
use crate::result::FormValues;
use async_trait::async_trait;
use std::future::Future;
use std::sync::Arc;

#[async_trait]
pub trait Plugin: Send + Sync {
	fn name(&self) -> &str;

	/// Act on the cast values of a valid submission of `form`
	async fn run(&self, form: &str, data: &FormValues) -> anyhow::Result<()>;
}

/// Plugin backed by an async closure receiving its own copy of the values
pub struct FnPlugin<F> {
	name: String,
	run: F,
}

#[async_trait]
impl<F, Fut> Plugin for FnPlugin<F>
where
	F: Fn(FormValues) -> Fut + Send + Sync,
	Fut: Future<Output = anyhow::Result<()>> + Send,
{
	fn name(&self) -> &str {
		&self.name
	}

	async fn run(&self, _form: &str, data: &FormValues) -> anyhow::Result<()> {
		(self.run)(data.clone()).await
	}
}

/// Ordered plugin registry
#[derive(Clone, Default)]
pub struct PluginSet {
	plugins: Vec<Arc<dyn Plugin>>,
}

impl PluginSet {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn add(&mut self, plugin: impl Plugin + 'static) -> &mut Self {
		self.plugins.push(Arc::new(plugin));
		self
	}

	/// Register an async closure
	///
	/// # Examples
	///
	/// ```
	/// use zluvo_forms::PluginSet;
	///
	/// let mut plugins = PluginSet::new();
	/// plugins.add_fn("audit", |data| async move {
	///     println!("accepted {} fields", data.len());
	///     Ok(())
	/// });
	/// assert_eq!(plugins.names(), vec!["audit"]);
	/// ```
	pub fn add_fn<F, Fut>(&mut self, name: impl Into<String>, run: F) -> &mut Self
	where
		F: Fn(FormValues) -> Fut + Send + Sync + 'static,
		Fut: Future<Output = anyhow::Result<()>> + Send + 'static,
	{
		self.add(FnPlugin {
			name: name.into(),
			run,
		})
	}

	pub fn names(&self) -> Vec<&str> {
		self.plugins.iter().map(|p| p.name()).collect()
	}

	pub fn len(&self) -> usize {
		self.plugins.len()
	}

	pub fn is_empty(&self) -> bool {
		self.plugins.is_empty()
	}

	/// Run every plugin in order, stopping at the first failure
	pub async fn run(&self, form: &str, data: &FormValues) -> FormResult<()> {
		for plugin in &self.plugins {
			tracing::info!(form, plugin = plugin.name(), "running plugin");
			plugin
				.run(form, data)
				.await
				.map_err(|source| FormError::Plugin {
					plugin: plugin.name().to_string(),
					source,
				})?;
		}
		Ok(())
	}
}

impl std::fmt::Debug for PluginSet {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("PluginSet")
			.field("plugins", &self.names())
			.finish()
	}
}
