//! Configuration types for wire-name lookup construction.
//!
//! The only behavioral knob the lookup core exposes is the naming format
//! applied to declared member names before they are matched against incoming
//! JSON keys. Configuration is plain serde data so hosts can embed it in
//! their own config files, YAML or JSON alike.

use std::borrow::Cow;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::core::errors::{Result, WirekeyError};

/// Naming convention applied to declared member names to produce wire names.
///
/// The conversion is a pure string-to-string function; two distinct declared
/// names may legitimately converge on the same wire name under `CamelCase`
/// (e.g. `Id` and `id`). The lookup table records such collisions instead of
/// rejecting them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NamingFormat {
    /// Use declared names unchanged.
    #[serde(rename = "verbatim")]
    Verbatim,
    /// Lowercase the first character of the declared name, leave the rest.
    #[serde(rename = "camelCase")]
    CamelCase,
}

impl NamingFormat {
    /// Apply this naming format to a declared member name.
    ///
    /// Borrows the input whenever the conversion is the identity, so the
    /// verbatim path never allocates.
    pub fn apply<'a>(&self, raw: &'a str) -> Cow<'a, str> {
        match self {
            NamingFormat::Verbatim => Cow::Borrowed(raw),
            NamingFormat::CamelCase => {
                let mut chars = raw.chars();
                match chars.next() {
                    Some(first) if first.is_uppercase() => {
                        let mut out = String::with_capacity(raw.len());
                        out.extend(first.to_lowercase());
                        out.push_str(chars.as_str());
                        Cow::Owned(out)
                    }
                    _ => Cow::Borrowed(raw),
                }
            }
        }
    }
}

impl Default for NamingFormat {
    /// Verbatim matching is the default, mirroring the usual serializer
    /// behavior of matching declared names exactly.
    fn default() -> Self {
        NamingFormat::Verbatim
    }
}

impl fmt::Display for NamingFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NamingFormat::Verbatim => write!(f, "verbatim"),
            NamingFormat::CamelCase => write!(f, "camelCase"),
        }
    }
}

impl FromStr for NamingFormat {
    type Err = WirekeyError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "verbatim" => Ok(NamingFormat::Verbatim),
            "camelCase" => Ok(NamingFormat::CamelCase),
            other => Err(WirekeyError::config_field(
                format!("unknown naming format '{other}'"),
                "naming",
            )),
        }
    }
}

/// Configuration for building a wire-name lookup.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LookupConfig {
    /// Naming format applied to declared member names.
    #[serde(default)]
    pub naming: NamingFormat,
}

impl LookupConfig {
    /// Construct a configuration with the given naming format.
    pub fn with_naming(naming: NamingFormat) -> Self {
        Self { naming }
    }

    /// Load configuration from a YAML string.
    pub fn from_yaml_str(content: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(content)?;
        Ok(config)
    }

    /// Load configuration from a JSON string.
    pub fn from_json_str(content: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(content)?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verbatim_is_identity() {
        let format = NamingFormat::Verbatim;
        assert_eq!(format.apply("Id"), "Id");
        assert_eq!(format.apply("alreadyLower"), "alreadyLower");
        assert_eq!(format.apply(""), "");
    }

    #[test]
    fn test_camel_case_lowers_first_char_only() {
        let format = NamingFormat::CamelCase;
        assert_eq!(format.apply("Id"), "id");
        assert_eq!(format.apply("NamePlate"), "namePlate");
        assert_eq!(format.apply("already"), "already");
        assert_eq!(format.apply(""), "");
    }

    #[test]
    fn test_camel_case_borrows_when_unchanged() {
        let format = NamingFormat::CamelCase;
        assert!(matches!(format.apply("lower"), Cow::Borrowed(_)));
        assert!(matches!(format.apply("Upper"), Cow::Owned(_)));
    }

    #[test]
    fn test_format_round_trip_through_str() {
        for format in [NamingFormat::Verbatim, NamingFormat::CamelCase] {
            let parsed: NamingFormat = format.to_string().parse().unwrap();
            assert_eq!(parsed, format);
        }

        assert!("PascalCase".parse::<NamingFormat>().is_err());
    }

    #[test]
    fn test_config_from_yaml() {
        let config = LookupConfig::from_yaml_str("naming: camelCase").unwrap();
        assert_eq!(config.naming, NamingFormat::CamelCase);

        let config = LookupConfig::from_yaml_str("{}").unwrap();
        assert_eq!(config.naming, NamingFormat::Verbatim);
    }

    #[test]
    fn test_config_from_json() {
        let config = LookupConfig::from_json_str(r#"{"naming": "verbatim"}"#).unwrap();
        assert_eq!(config.naming, NamingFormat::Verbatim);

        assert!(LookupConfig::from_json_str(r#"{"naming": "snake"}"#).is_err());
    }
}
