/* src/controller/options.rs */

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::format::ContentType;
use crate::loader::NamingStyle;
use crate::scope::Scopes;

/// Default HTTP request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Options of a refresh [`Client`](super::Client), usually embedded in the
/// host's own configuration file.
///
/// ```toml
/// source = "https://cfg.example.com/game"
/// content_type = "application/toml"
/// scopes = ["item", "shop"]
/// naming = "snake_case"
/// refresh_interval = "30s"
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientOptions {
	/// Source descriptor: URL, `file://` URL or directory path.
	pub source: String,
	/// Declared content type; empty means JSON.
	pub content_type: ContentType,
	/// Scopes to load.
	pub scopes: Scopes,
	/// File naming convention for directory sources.
	pub naming: Option<NamingStyle>,
	/// Period between refreshes; zero disables periodic refresh.
	#[serde(with = "duration_str")]
	pub refresh_interval: Duration,
	/// HTTP request timeout.
	#[serde(with = "duration_str")]
	pub timeout: Duration,
}

impl Default for ClientOptions {
	fn default() -> Self {
		Self {
			source: String::new(),
			content_type: ContentType::default(),
			scopes: Scopes::new(),
			naming: None,
			refresh_interval: Duration::ZERO,
			timeout: DEFAULT_TIMEOUT,
		}
	}
}

/// Durations as Go-style strings (`"1m30s"`, `"250ms"`) or integer milliseconds.
pub(crate) mod duration_str {
	use std::fmt;
	use std::time::Duration;

	use serde::de::{self, Visitor};
	use serde::{Deserializer, Serializer};

	pub fn serialize<S: Serializer>(value: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
		serializer.serialize_str(&format(*value))
	}

	pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
		deserializer.deserialize_any(DurationVisitor)
	}

	struct DurationVisitor;

	impl Visitor<'_> for DurationVisitor {
		type Value = Duration;

		fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
			f.write_str("a duration string such as \"30s\" or integer milliseconds")
		}

		fn visit_u64<E: de::Error>(self, ms: u64) -> Result<Duration, E> {
			Ok(Duration::from_millis(ms))
		}

		fn visit_i64<E: de::Error>(self, ms: i64) -> Result<Duration, E> {
			u64::try_from(ms)
				.map(Duration::from_millis)
				.map_err(|_| E::custom("negative duration"))
		}

		fn visit_str<E: de::Error>(self, s: &str) -> Result<Duration, E> {
			parse(s).map_err(E::custom)
		}
	}

	/// Parses `"1h2m3s"`, `"1.5s"`, `"250ms"`, `"0"`.
	pub fn parse(s: &str) -> Result<Duration, String> {
		let s = s.trim();
		if s == "0" || s.is_empty() {
			return Ok(Duration::ZERO);
		}

		let mut total = Duration::ZERO;
		let mut rest = s;
		while !rest.is_empty() {
			let number_len = rest
				.find(|c: char| !(c.is_ascii_digit() || c == '.'))
				.ok_or_else(|| format!("missing unit in duration {s:?}"))?;
			if number_len == 0 {
				return Err(format!("invalid duration {s:?}"));
			}
			let (number, tail) = rest.split_at(number_len);
			let unit_len = tail
				.find(|c: char| c.is_ascii_digit() || c == '.')
				.unwrap_or(tail.len());
			let (unit, tail) = tail.split_at(unit_len);

			let unit_nanos: u64 = match unit {
				"ns" => 1,
				"us" | "µs" => 1_000,
				"ms" => 1_000_000,
				"s" => 1_000_000_000,
				"m" => 60_000_000_000,
				"h" => 3_600_000_000_000,
				other => return Err(format!("unknown unit {other:?} in duration {s:?}")),
			};
			let nanos = match number.parse::<u64>() {
				Ok(whole) => whole.checked_mul(unit_nanos),
				Err(_) => {
					let value: f64 = number
						.parse()
						.map_err(|_| format!("invalid number {number:?} in duration {s:?}"))?;
					let nanos = (value * unit_nanos as f64).round();
					(nanos.is_finite() && nanos < u64::MAX as f64).then_some(nanos as u64)
				}
			}
			.ok_or_else(|| format!("duration {s:?} out of range"))?;
			total = total
				.checked_add(Duration::from_nanos(nanos))
				.ok_or_else(|| format!("duration {s:?} out of range"))?;
			rest = tail;
		}
		Ok(total)
	}

	/// Formats as a Go-style compound string (`"1h2m3s"`, `"1s500ms"`, `"500us"`).
	///
	/// The output parses back to exactly the same duration.
	pub fn format(value: Duration) -> String {
		if value.is_zero() {
			return "0s".to_string();
		}

		let secs = value.as_secs();
		let mut out = String::new();
		for (amount, unit) in [(secs / 3600, "h"), (secs / 60 % 60, "m"), (secs % 60, "s")] {
			if amount > 0 {
				out.push_str(&format!("{amount}{unit}"));
			}
		}

		let nanos = value.subsec_nanos();
		if nanos > 0 {
			let sub = if nanos % 1_000_000 == 0 {
				format!("{}ms", nanos / 1_000_000)
			} else if nanos % 1_000 == 0 {
				format!("{}us", nanos / 1_000)
			} else {
				format!("{nanos}ns")
			};
			out.push_str(&sub);
		}
		out
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn parses_go_style_durations() {
		assert_eq!(duration_str::parse("30s").unwrap(), Duration::from_secs(30));
		assert_eq!(duration_str::parse("250ms").unwrap(), Duration::from_millis(250));
		assert_eq!(duration_str::parse("1m30s").unwrap(), Duration::from_secs(90));
		assert_eq!(duration_str::parse("2h").unwrap(), Duration::from_secs(7200));
		assert_eq!(duration_str::parse("1.5s").unwrap(), Duration::from_millis(1500));
		assert_eq!(duration_str::parse("0").unwrap(), Duration::ZERO);
	}

	#[test]
	fn rejects_malformed_durations() {
		for input in ["10", "s", "10x", "1m-2s"] {
			assert!(duration_str::parse(input).is_err(), "{input}");
		}
	}

	#[test]
	fn deserializes_options_with_defaults() {
		let options: ClientOptions = serde_json::from_str(
			r#"{
				"source": "http://localhost:8080/cfg",
				"scopes": ["shop", "item"],
				"naming": "pascal_case",
				"refresh_interval": "1m"
			}"#,
		)
		.unwrap();
		assert_eq!(options.refresh_interval, Duration::from_secs(60));
		assert_eq!(options.timeout, DEFAULT_TIMEOUT);
		assert_eq!(options.naming, Some(NamingStyle::PascalCase));
		assert!(options.content_type.is_empty());
	}

	#[test]
	fn accepts_integer_milliseconds() {
		let options: ClientOptions = serde_json::from_str(r#"{"refresh_interval": 1500}"#).unwrap();
		assert_eq!(options.refresh_interval, Duration::from_millis(1500));
	}

	#[test]
	fn rejects_unknown_naming() {
		let result = serde_json::from_str::<ClientOptions>(r#"{"naming": "upper_case"}"#);
		assert!(result.is_err());
	}

	#[test]
	fn serializes_durations_as_strings() {
		let options = ClientOptions {
			refresh_interval: Duration::from_millis(1500),
			..ClientOptions::default()
		};
		let value = serde_json::to_value(&options).unwrap();
		assert_eq!(value["refresh_interval"], "1s500ms");
		assert_eq!(value["timeout"], "30s");
	}

	#[test]
	fn formatted_durations_parse_back_exactly() {
		for d in [
			Duration::ZERO,
			Duration::from_micros(500),
			Duration::from_nanos(1),
			Duration::from_nanos(1_500_500_000),
			Duration::from_millis(90_250),
			Duration::new(3 * 3600 + 61, 7),
		] {
			let text = duration_str::format(d);
			assert_eq!(duration_str::parse(&text).unwrap(), d, "{text}");
		}
		assert_eq!(duration_str::format(Duration::from_micros(500)), "500us");
		assert_eq!(duration_str::format(Duration::new(3661, 0)), "1h1m1s");
	}

	#[test]
	fn sub_millisecond_interval_survives_serde() {
		let options = ClientOptions {
			refresh_interval: Duration::from_micros(500),
			..ClientOptions::default()
		};
		let json = serde_json::to_string(&options).unwrap();
		let back: ClientOptions = serde_json::from_str(&json).unwrap();
		assert_eq!(back.refresh_interval, Duration::from_micros(500));
		assert_eq!(back, options);
	}
}
