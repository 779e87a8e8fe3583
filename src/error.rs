//! Error types for feed parsing and configuration.
//!
//! The analysis engine itself never fails: a [`FeedError`] is logged and
//! turned into an empty article list by [`crate::feeds::parse_feed`], and a
//! [`ConfigError`] can only happen before a run starts.

use thiserror::Error;

/// Errors raised while turning raw feed text into a node tree.
#[derive(Debug, Error)]
pub enum FeedError {
    /// The XML reader rejected the document.
    #[error("XML error: {0}")]
    Xml(#[from] quick_xml::Error),

    /// An attribute could not be read.
    #[error("attribute error: {0}")]
    Attribute(#[from] quick_xml::events::attributes::AttrError),

    /// The document had no root element.
    #[error("document has no root element")]
    MissingRoot,

    /// The document ended while elements were still open.
    #[error("document ended inside <{0}>")]
    UnclosedElement(String),

    /// A closing tag had no matching open element.
    #[error("unmatched closing tag </{0}>")]
    UnmatchedEnd(String),

    /// Text or a second element was found outside the root element.
    #[error("content found outside the root element")]
    OutsideRoot,
}

/// Errors raised while loading or validating configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The config file could not be read.
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),

    /// The config file is not valid YAML for [`crate::config::Config`].
    #[error("failed to parse config: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// A value is outside the range the engine accepts.
    #[error("invalid configuration: {0}")]
    Invalid(String),
}
