//! Item type definitions.

use std::fmt;

use serde::{Deserialize, Serialize};

/// ItemType is the matching category of a parsed filter item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemType {
    /// Literal IPv4 or IPv6 address
    Ip,
    /// Full domain (exact match). Part of the taxonomy, never produced by the classifier.
    Domain,
    /// Rightmost two labels of a domain (suffix match)
    DomainSuffix,
    /// Substring token extracted from a wildcard rule
    DomainKeyword,
}

impl ItemType {
    /// Parse an item type from its tag (case-insensitive).
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "ip" => Some(ItemType::Ip),
            "domain" => Some(ItemType::Domain),
            "domain_suffix" | "domain-suffix" => Some(ItemType::DomainSuffix),
            "domain_keyword" | "domain-keyword" => Some(ItemType::DomainKeyword),
            _ => None,
        }
    }

    /// Get the canonical tag.
    pub fn as_str(&self) -> &'static str {
        match self {
            ItemType::Ip => "ip",
            ItemType::Domain => "domain",
            ItemType::DomainSuffix => "domain_suffix",
            ItemType::DomainKeyword => "domain_keyword",
        }
    }

    /// Get the Clash rule keyword for this type.
    ///
    /// IP items are emitted as single-host CIDRs, so the caller picks
    /// between `IP-CIDR` and `IP-CIDR6` from the address itself.
    pub fn clash_name(&self) -> &'static str {
        match self {
            ItemType::Ip => "IP-CIDR",
            ItemType::Domain => "DOMAIN",
            ItemType::DomainSuffix => "DOMAIN-SUFFIX",
            ItemType::DomainKeyword => "DOMAIN-KEYWORD",
        }
    }

    /// All item types, in tag order.
    pub fn all() -> [ItemType; 4] {
        [
            ItemType::Ip,
            ItemType::Domain,
            ItemType::DomainSuffix,
            ItemType::DomainKeyword,
        ]
    }
}

impl fmt::Display for ItemType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for ItemType {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ItemType::parse(s).ok_or(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_item_type_from_str() {
        assert_eq!(ItemType::parse("ip"), Some(ItemType::Ip));
        assert_eq!(ItemType::parse("IP"), Some(ItemType::Ip));
        assert_eq!(ItemType::parse("domain"), Some(ItemType::Domain));
        assert_eq!(
            ItemType::parse("domain_suffix"),
            Some(ItemType::DomainSuffix)
        );
        assert_eq!(
            ItemType::parse("DOMAIN-KEYWORD"),
            Some(ItemType::DomainKeyword)
        );
        assert_eq!(ItemType::parse("cidr"), None);
    }

    #[test]
    fn test_item_type_tags() {
        for item_type in ItemType::all() {
            assert_eq!(ItemType::parse(item_type.as_str()), Some(item_type));
            assert_eq!(item_type.to_string(), item_type.as_str());
        }
    }

    #[test]
    fn test_serde_tag_matches_display() {
        let json = serde_json::to_string(&ItemType::DomainSuffix).unwrap();
        assert_eq!(json, "\"domain_suffix\"");
    }
}
