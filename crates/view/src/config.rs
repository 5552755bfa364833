//! View configuration.
//!
//! ```toml
//! editable = false
//!
//! [attributes]
//! class = "prose"
//! spellcheck = "false"
//! ```

use std::collections::BTreeMap;

use serde::Deserialize;

use crate::error::ConfigError;

/// Attributes the view sets on the mount element itself.
const RESERVED_ATTRIBUTES: &[&str] = &["contenteditable"];

/// Options applied to the mount element.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ViewConfig {
	/// Whether the mount element is content-editable and input is handled.
	pub editable: bool,
	/// Extra attributes set on the mount element.
	pub attributes: BTreeMap<String, String>,
}

impl Default for ViewConfig {
	fn default() -> Self {
		Self {
			editable: true,
			attributes: BTreeMap::new(),
		}
	}
}

impl ViewConfig {
	/// Parses a configuration from TOML.
	pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
		let config: Self = toml::from_str(source)?;
		config.validate()?;
		Ok(config)
	}

	/// Checks that no configured attribute collides with one the view owns.
	pub fn validate(&self) -> Result<(), ConfigError> {
		match self.attributes.keys().find(|name| RESERVED_ATTRIBUTES.contains(&name.as_str())) {
			Some(name) => Err(ConfigError::ReservedAttribute(name.clone())),
			None => Ok(()),
		}
	}

	/// Returns a copy with `editable` replaced.
	pub fn with_editable(mut self, editable: bool) -> Self {
		self.editable = editable;
		self
	}

	/// Returns a copy with one more attribute.
	pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
		self.attributes.insert(name.into(), value.into());
		self
	}
}
