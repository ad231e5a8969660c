//! gfwrule - AutoProxy (gfwlist) filter list parser.
//!
//! This crate turns a base64-encoded AutoProxy subscription into a flat list
//! of network-matchable items that a routing engine can load.
//!
//! # Features
//!
//! - **Envelope decoding**: base64 with the mandatory `[AutoProxy x.y.z]` header
//! - **Line classification**: Adblock-Plus style rules reduced to IPs,
//!   domain suffixes and domain keywords
//! - **Deduplication**: first occurrence of each value wins, input order kept
//! - **Sources**: local files or HTTP(S), gzip inflated transparently
//! - **Output**: plain text, JSON, or Clash rule-provider payload
//!
//! # Quick Start
//!
//! ```ignore
//! use gfwrule::{Handle, ItemType};
//!
//! let handle = Handle::open_offline("gfwlist.txt")?;
//! for item in handle.read_items()? {
//!     if item.item_type == ItemType::DomainSuffix {
//!         println!("{}", item.value);
//!     }
//! }
//! ```
//!
//! Single lines can be classified directly:
//!
//! ```
//! use gfwrule::{classify, Classification, Item, ItemType};
//!
//! let result = classify("||afreecatv.com").unwrap();
//! assert_eq!(
//!     result,
//!     Classification::Item(Item::new(ItemType::DomainSuffix, "afreecatv.com"))
//! );
//! assert_eq!(classify("@@||cn.noxinfluencer.com").unwrap(), Classification::Skip);
//! ```
//!
//! # Classification order
//!
//! 1. Header character: `@`, `!`, `~` skip the line; `||` forces a domain suffix
//! 2. Scheme, path and port are stripped from the host
//! 3. IP literals win over everything else
//! 4. Dotted hosts reduce to their last two labels
//! 5. Wildcard hosts become keywords (longest token)

mod config;
mod error;
mod handle;
mod item;
mod item_type;

pub mod classifier;
pub mod collector;
pub mod envelope;
pub mod output;

// Re-export core types
pub use error::{Error, LineError, Result};
pub use item::Item;
pub use item_type::ItemType;

// Re-export parsing API
pub use classifier::{classify, Classification};
pub use collector::{collect, collect_with_sink, ItemCollector, LineSink, LogSink, Rejection};

// Re-export sources and configuration
pub use config::{FetchConfig, DEFAULT_TIMEOUT};
pub use handle::{Handle, DEFAULT_LIST_URL};

// Re-export output
pub use output::{render, OutputFormat};
