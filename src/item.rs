//! Parsed filter item.

use std::fmt;
use std::net::IpAddr;

use serde::{Deserialize, Serialize};

use crate::ItemType;

/// A classified filter entry.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Item {
    #[serde(rename = "type")]
    pub item_type: ItemType,
    pub value: String,
}

impl Item {
    /// Create a new item.
    pub fn new(item_type: ItemType, value: impl Into<String>) -> Self {
        Self {
            item_type,
            value: value.into(),
        }
    }

    /// Render as a Clash rule without a policy, e.g. `DOMAIN-SUFFIX,google.com`.
    pub fn to_clash_rule(&self) -> String {
        match self.item_type {
            ItemType::Ip => match self.value.parse::<IpAddr>() {
                Ok(IpAddr::V6(_)) => format!("IP-CIDR6,{}/128", self.value),
                _ => format!("IP-CIDR,{}/32", self.value),
            },
            other => format!("{},{}", other.clash_name(), self.value),
        }
    }
}

impl fmt::Display for Item {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.item_type, self.value)
    }
}
