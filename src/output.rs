//! Output renderers for parsed items.

use serde::Serialize;
use std::fmt;

use crate::{Error, Item, Result};

/// Supported output formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// One `type,value` pair per line
    #[default]
    Text,
    /// JSON array of `{"type", "value"}` objects
    Json,
    /// Clash rule-provider payload (classical behavior)
    Clash,
}

impl OutputFormat {
    /// Parse a format name (case-insensitive).
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "text" | "txt" => Some(OutputFormat::Text),
            "json" => Some(OutputFormat::Json),
            "clash" | "yaml" => Some(OutputFormat::Clash),
            _ => None,
        }
    }

    /// Get the canonical name.
    pub fn as_str(&self) -> &'static str {
        match self {
            OutputFormat::Text => "text",
            OutputFormat::Json => "json",
            OutputFormat::Clash => "clash",
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for OutputFormat {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        OutputFormat::parse(s).ok_or_else(|| Error::UnknownFormat(s.to_string()))
    }
}

/// Clash rule-provider file body.
#[derive(Debug, Serialize)]
struct ProviderPayload {
    payload: Vec<String>,
}

/// Render items in the given format.
pub fn render(items: &[Item], format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Text => Ok(render_text(items)),
        OutputFormat::Json => Ok(serde_json::to_string_pretty(items)?),
        OutputFormat::Clash => {
            let payload = ProviderPayload {
                payload: items.iter().map(Item::to_clash_rule).collect(),
            };
            Ok(serde_yaml::to_string(&payload)?)
        }
    }
}

fn render_text(items: &[Item]) -> String {
    let mut out = String::new();
    for item in items {
        out.push_str(&item.to_string());
        out.push('\n');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ItemType;

    fn sample() -> Vec<Item> {
        vec![
            Item::new(ItemType::DomainSuffix, "google.com"),
            Item::new(ItemType::Ip, "1.2.3.4"),
            Item::new(ItemType::DomainKeyword, "share"),
        ]
    }

    #[test]
    fn test_format_parse() {
        assert_eq!(OutputFormat::parse("TEXT"), Some(OutputFormat::Text));
        assert_eq!(OutputFormat::parse("json"), Some(OutputFormat::Json));
        assert_eq!(OutputFormat::parse("Clash"), Some(OutputFormat::Clash));
        assert_eq!(OutputFormat::parse("csv"), None);
        assert!("csv".parse::<OutputFormat>().is_err());
    }

    #[test]
    fn test_render_text() {
        let out = render(&sample(), OutputFormat::Text).unwrap();
        assert_eq!(out, "domain_suffix,google.com\nip,1.2.3.4\ndomain_keyword,share\n");
    }

    #[test]
    fn test_render_json() {
        let out = render(&sample(), OutputFormat::Json).unwrap();
        let parsed: Vec<Item> = serde_json::from_str(&out).unwrap();
        assert_eq!(parsed, sample());
        assert!(out.contains(r#""type": "domain_suffix""#));
    }

    #[test]
    fn test_render_clash() {
        let out = render(&sample(), OutputFormat::Clash).unwrap();
        let parsed: serde_yaml::Value = serde_yaml::from_str(&out).unwrap();
        let payload: Vec<&str> = parsed["payload"]
            .as_sequence()
            .unwrap()
            .iter()
            .map(|v| v.as_str().unwrap())
            .collect();
        assert_eq!(
            payload,
            vec![
                "DOMAIN-SUFFIX,google.com",
                "IP-CIDR,1.2.3.4/32",
                "DOMAIN-KEYWORD,share"
            ]
        );
    }

    #[test]
    fn test_render_empty() {
        assert_eq!(render(&[], OutputFormat::Text).unwrap(), "");
        assert_eq!(render(&[], OutputFormat::Json).unwrap(), "[]");
    }
}
