//! Feed sources and the feed parser.
//!
//! # Submodules
//!
//! - [`xml`]: the [`XmlParser`] capability and its `quick-xml` implementation
//! - [`parser`]: RSS `item` / Atom `entry` to [`crate::models::Article`]
//! - [`catalog`]: built-in feed lists and source labels
//! - [`neutralize`]: optional loaded-language rewriting
//!
//! # Parsing Rules
//!
//! | Field | Taken from |
//! |-------|------------|
//! | title | `title` text, trimmed |
//! | link | Atom `link@href`, RSS `link` text, then `guid` / `id` |
//! | description | `description`, `summary`, then `content` |
//! | published | `pubDate`, `updated`, then `published` / `dc:date` |

pub mod catalog;
pub mod neutralize;
pub mod parser;
pub mod xml;

pub use catalog::{FeedCatalog, FeedSource, DEFAULT_CATEGORY};
pub use parser::{parse_feed, parse_feeds, ParseOptions};
pub use xml::{QuickXmlParser, XmlNode, XmlParser};
