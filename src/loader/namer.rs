/* src/loader/namer.rs */

//!
//! Scope-to-file-name conventions for directory sources.

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use heck::{ToKebabCase, ToLowerCamelCase, ToSnakeCase, ToUpperCamelCase};
use serde::{Deserialize, Serialize};

/// One of the fixed case conventions for scope file names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NamingStyle {
	/// `item_config.json`
	SnakeCase,
	/// `itemConfig.json`
	CamelCase,
	/// `ItemConfig.json`
	PascalCase,
	/// `item-config.json`
	KebabCase,
}

impl NamingStyle {
	pub fn as_str(&self) -> &'static str {
		match self {
			Self::SnakeCase => "snake_case",
			Self::CamelCase => "camel_case",
			Self::PascalCase => "pascal_case",
			Self::KebabCase => "kebab_case",
		}
	}

	/// Converts a scope name to this case.
	pub fn convert(&self, scope: &str) -> String {
		match self {
			Self::SnakeCase => scope.to_snake_case(),
			Self::CamelCase => scope.to_lower_camel_case(),
			Self::PascalCase => scope.to_upper_camel_case(),
			Self::KebabCase => scope.to_kebab_case(),
		}
	}
}

/// Error for naming style strings that match no convention.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown naming style {0:?} (expected snake_case, camel_case, pascal_case or kebab_case)")]
pub struct UnknownNamingStyle(pub String);

impl FromStr for NamingStyle {
	type Err = UnknownNamingStyle;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s {
			"snake_case" => Ok(Self::SnakeCase),
			"camel_case" => Ok(Self::CamelCase),
			"pascal_case" => Ok(Self::PascalCase),
			"kebab_case" => Ok(Self::KebabCase),
			other => Err(UnknownNamingStyle(other.to_string())),
		}
	}
}

impl fmt::Display for NamingStyle {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

/// Custom naming function: `(scope, extension) -> file name`.
pub type NamerFn = Arc<dyn Fn(&str, &str) -> String + Send + Sync>;

/// Maps a scope and an extension to the file holding that scope.
#[derive(Clone)]
pub enum Namer {
	Style(NamingStyle),
	Custom(NamerFn),
}

impl Namer {
	pub fn custom<F>(f: F) -> Self
	where
		F: Fn(&str, &str) -> String + Send + Sync + 'static,
	{
		Self::Custom(Arc::new(f))
	}

	/// Returns the file name for `scope`.
	pub fn file_name(&self, scope: &str, ext: &str) -> String {
		match self {
			Self::Style(style) => format!("{}.{ext}", style.convert(scope)),
			Self::Custom(f) => f(scope, ext),
		}
	}
}

impl From<NamingStyle> for Namer {
	fn from(style: NamingStyle) -> Self {
		Self::Style(style)
	}
}

impl fmt::Debug for Namer {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Style(style) => f.debug_tuple("Style").field(style).finish(),
			Self::Custom(_) => write!(f, "Custom(<fn>)"),
		}
	}
}
