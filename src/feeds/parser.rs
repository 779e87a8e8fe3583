//! Mapping of RSS `item` and Atom `entry` nodes to [`Article`] records.
//!
//! A document that cannot be parsed contributes no articles. The failure is
//! logged and the run carries on with whatever other sources produced.

use crate::config::EngineConfig;
use crate::feeds::neutralize::neutralize;
use crate::feeds::xml::{XmlNode, XmlParser};
use crate::models::{Article, FeedText};
use crate::utils::truncate_for_log;
use itertools::Itertools;
use scraper::Html;
use tracing::{debug, instrument, warn};

/// Entry element names across RSS 0.9x/1.0/2.0 and Atom.
const ENTRY_NAMES: &[&str] = &["item", "entry"];
const DESCRIPTION_NAMES: &[&str] = &["description", "summary", "content"];
const PUBLISHED_NAMES: &[&str] = &["pubDate", "updated", "published"];

const ATOM_NS: &str = "http://www.w3.org/2005/Atom";
const DUBLIN_CORE_NS: &str = "http://purl.org/dc/elements/1.1/";

/// Namespaces whose elements carry the core entry fields: RSS 2.0 (none),
/// Atom, RSS 1.0 and RSS 0.90. Media RSS, iTunes and friends reuse names
/// like `title` and `content` and must not shadow these.
const CORE_NAMESPACES: &[Option<&str>] = &[
    None,
    Some(ATOM_NS),
    Some("http://purl.org/rss/1.0/"),
    Some("http://my.netscape.com/rdf/simple/0.9/"),
];

/// How entries are turned into articles.
#[derive(Debug, Clone, PartialEq)]
pub struct ParseOptions {
    /// Entries kept per document.
    pub max_items: usize,
    /// Reduce HTML in descriptions to text.
    pub strip_html: bool,
    /// Rewrite loaded wording in titles and descriptions.
    pub neutralize: bool,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self::from(&EngineConfig::default())
    }
}

impl From<&EngineConfig> for ParseOptions {
    fn from(config: &EngineConfig) -> Self {
        Self {
            max_items: config.max_items_per_feed,
            strip_html: config.strip_html,
            neutralize: config.neutralize_loaded_language,
        }
    }
}

/// Parse one syndication document into at most `options.max_items` articles.
///
/// Every article is labelled with `source_label`. Malformed input yields an
/// empty vector.
///
/// # Arguments
///
/// * `parser` - XML capability used to build the element tree
/// * `raw_xml` - Full RSS or Atom document text
/// * `source_label` - Outlet label stamped on each article
/// * `options` - Item cap plus HTML stripping and neutralizing switches
///
/// # Returns
///
/// Articles in document order. Only `item`/`entry` elements from the RSS or
/// Atom namespaces count, and their core fields ignore extension elements
/// such as `media:title`.
#[instrument(level = "debug", skip(parser, raw_xml, options), fields(bytes = raw_xml.len()))]
pub fn parse_feed<P>(
    parser: &P,
    raw_xml: &str,
    source_label: &str,
    options: &ParseOptions,
) -> Vec<Article>
where
    P: XmlParser + ?Sized,
{
    let root = match parser.parse(raw_xml) {
        Ok(root) => root,
        Err(e) => {
            warn!(
                source = %source_label,
                error = %e,
                preview = %truncate_for_log(raw_xml, 120),
                "Feed is not well-formed; skipping"
            );
            return Vec::new();
        }
    };

    let articles: Vec<Article> = root
        .find_all(ENTRY_NAMES)
        .into_iter()
        .filter(|entry| entry.in_namespace(CORE_NAMESPACES))
        .take(options.max_items)
        .map(|entry| entry_to_article(entry, source_label, options))
        .collect();

    debug!(source = %source_label, count = articles.len(), "Parsed feed entries");
    articles
}

/// Parse every feed in order and concatenate the results.
pub fn parse_feeds<P>(parser: &P, feeds: &[FeedText], options: &ParseOptions) -> Vec<Article>
where
    P: XmlParser + ?Sized,
{
    feeds
        .iter()
        .flat_map(|feed| parse_feed(parser, &feed.raw_xml, &feed.source_label, options))
        .collect()
}

fn entry_to_article(entry: &XmlNode, source_label: &str, options: &ParseOptions) -> Article {
    let mut title = core_child(entry, "title")
        .map(|node| node.text().trim().to_string())
        .unwrap_or_default();

    let mut description = first_text(entry, DESCRIPTION_NAMES)
        .map(|text| {
            if options.strip_html {
                strip_markup(&text)
            } else {
                text.trim().to_string()
            }
        })
        .unwrap_or_default();

    if options.neutralize {
        title = neutralize(&title);
        description = neutralize(&description);
    }

    Article {
        source: source_label.to_string(),
        title,
        link: entry_link(entry),
        description,
        published: first_text(entry, PUBLISHED_NAMES)
            .or_else(|| {
                entry
                    .elements()
                    .find(|node| node.name == "date" && node.in_namespace(&[Some(DUBLIN_CORE_NS)]))
                    .map(XmlNode::text)
            })
            .map(|text| text.trim().to_string())
            .unwrap_or_default(),
    }
}

/// First direct child called `name` in one of the core feed namespaces.
fn core_child<'a>(entry: &'a XmlNode, name: &str) -> Option<&'a XmlNode> {
    entry
        .elements()
        .find(|node| node.name == name && node.in_namespace(CORE_NAMESPACES))
}

/// Text of the first core child present among `names`, tried in order.
fn first_text(entry: &XmlNode, names: &[&str]) -> Option<String> {
    names
        .iter()
        .find_map(|name| core_child(entry, name))
        .map(XmlNode::text)
}

/// Atom alternate `href` first, then RSS link text, then any other `href`,
/// then `guid`/`id`.
fn entry_link(entry: &XmlNode) -> String {
    let links: Vec<&XmlNode> = entry
        .elements()
        .filter(|n| n.name == "link" && n.in_namespace(CORE_NAMESPACES))
        .collect();
    let alternate_hrefs = links
        .iter()
        .filter(|link| is_alternate(link))
        .filter_map(|link| link.attr("href"))
        .map(str::to_string);
    let link_texts = links.iter().map(|link| link.text());
    let other_hrefs = links
        .iter()
        .filter(|link| !is_alternate(link))
        .filter_map(|link| link.attr("href"))
        .map(str::to_string);
    let identifiers = ["guid", "id"]
        .iter()
        .filter_map(|name| core_child(entry, name))
        .map(XmlNode::text);

    alternate_hrefs
        .chain(link_texts)
        .chain(other_hrefs)
        .chain(identifiers)
        .map(|text| text.trim().to_string())
        .find(|text| !text.is_empty())
        .unwrap_or_default()
}

fn is_alternate(link: &XmlNode) -> bool {
    matches!(link.attr("rel"), None | Some("alternate"))
}

/// Reduce an HTML fragment to its whitespace-collapsed text.
pub fn strip_markup(html: &str) -> String {
    if !html.contains(['<', '&']) {
        return html.split_whitespace().join(" ");
    }
    let fragment = Html::parse_fragment(html);
    fragment
        .root_element()
        .text()
        .flat_map(str::split_whitespace)
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::feeds::xml::QuickXmlParser;

    const RSS: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<rss version="2.0" xmlns:atom="http://www.w3.org/2005/Atom">
  <channel>
    <title>Example News</title>
    <item>
      <title>  Flood warning issued for coastal regions  </title>
      <link>https://example.com/flood</link>
      <description><![CDATA[<p>Residents were told to <b>move inland</b> before the storm.</p>]]></description>
      <pubDate>Tue, 06 May 2025 14:30:00 GMT</pubDate>
      <guid>https://example.com/guid/1</guid>
    </item>
    <item>
      <title>Second story</title>
      <guid isPermaLink="true">https://example.com/guid/2</guid>
    </item>
  </channel>
</rss>"#;

    const ATOM: &str = r#"<?xml version="1.0" encoding="utf-8"?>
<feed xmlns="http://www.w3.org/2005/Atom">
  <title>Example Atom</title>
  <entry>
    <title>Atom headline</title>
    <link rel="self" href="https://example.com/self"/>
    <link rel="alternate" href="https://example.com/atom-story"/>
    <id>urn:uuid:1234</id>
    <updated>2025-05-06T14:30:00Z</updated>
    <summary>Short summary of the story.</summary>
    <content type="html">Longer content.</content>
  </entry>
</feed>"#;

    #[test]
    fn test_parse_rss_items() {
        let articles = parse_feed(&QuickXmlParser, RSS, "example.com", &ParseOptions::default());
        assert_eq!(articles.len(), 2);

        let first = &articles[0];
        assert_eq!(first.source, "example.com");
        assert_eq!(first.title, "Flood warning issued for coastal regions");
        assert_eq!(first.link, "https://example.com/flood");
        assert_eq!(first.description, "Residents were told to move inland before the storm.");
        assert_eq!(first.published, "Tue, 06 May 2025 14:30:00 GMT");

        let second = &articles[1];
        assert_eq!(second.link, "https://example.com/guid/2");
        assert_eq!(second.description, "");
        assert_eq!(second.published, "");
    }

    #[test]
    fn test_parse_atom_entries() {
        let articles = parse_feed(&QuickXmlParser, ATOM, "Atom", &ParseOptions::default());
        assert_eq!(articles.len(), 1);
        let entry = &articles[0];
        assert_eq!(entry.title, "Atom headline");
        assert_eq!(entry.link, "https://example.com/atom-story");
        assert_eq!(entry.description, "Short summary of the story.");
        assert_eq!(entry.published, "2025-05-06T14:30:00Z");
    }

    #[test]
    fn test_atom_entry_without_link_uses_id() {
        let xml = r#"<feed><entry><title>T</title><id>urn:uuid:9</id></entry></feed>"#;
        let articles = parse_feed(&QuickXmlParser, xml, "x", &ParseOptions::default());
        assert_eq!(articles[0].link, "urn:uuid:9");
    }

    #[test]
    fn test_missing_fields_are_empty() {
        let xml = "<rss><channel><item></item></channel></rss>";
        let articles = parse_feed(&QuickXmlParser, xml, "x", &ParseOptions::default());
        assert_eq!(articles.len(), 1);
        assert_eq!(articles[0].title, "");
        assert_eq!(articles[0].link, "");
        assert_eq!(articles[0].description, "");
    }

    #[test]
    fn test_item_cap_is_applied() {
        let items: String = (0..40)
            .map(|i| format!("<item><title>Story {}</title></item>", i))
            .collect();
        let xml = format!("<rss><channel>{}</channel></rss>", items);
        let articles = parse_feed(&QuickXmlParser, &xml, "x", &ParseOptions::default());
        assert_eq!(articles.len(), 25);
        assert_eq!(articles[24].title, "Story 24");

        let options = ParseOptions {
            max_items: 3,
            ..ParseOptions::default()
        };
        assert_eq!(parse_feed(&QuickXmlParser, &xml, "x", &options).len(), 3);
    }

    #[test]
    fn test_malformed_xml_yields_no_articles() {
        let options = ParseOptions::default();
        assert!(parse_feed(&QuickXmlParser, "<rss><channel><item>", "x", &options).is_empty());
        assert!(parse_feed(&QuickXmlParser, "<html><body></div></html>", "x", &options).is_empty());
        assert!(parse_feed(&QuickXmlParser, "", "x", &options).is_empty());
        assert!(parse_feed(&QuickXmlParser, "502 Bad Gateway", "x", &options).is_empty());
    }

    #[test]
    fn test_raw_description_kept_without_stripping() {
        let options = ParseOptions {
            strip_html: false,
            ..ParseOptions::default()
        };
        let articles = parse_feed(&QuickXmlParser, RSS, "x", &options);
        assert_eq!(
            articles[0].description,
            "<p>Residents were told to <b>move inland</b> before the storm.</p>"
        );
    }

    #[test]
    fn test_neutralize_option_rewrites_titles() {
        let xml = "<rss><channel><item><title>Senator slammed shocking plan</title></item></channel></rss>";
        let options = ParseOptions {
            neutralize: true,
            ..ParseOptions::default()
        };
        let articles = parse_feed(&QuickXmlParser, xml, "x", &options);
        assert_eq!(articles[0].title, "Senator said  plan");
    }

    #[test]
    fn test_parse_feeds_concatenates_in_order() {
        let feeds = vec![
            FeedText {
                source_label: "a".to_string(),
                raw_xml: "<rss><channel><item><title>A1</title></item></channel></rss>".to_string(),
            },
            FeedText {
                source_label: "broken".to_string(),
                raw_xml: "<rss>".to_string(),
            },
            FeedText {
                source_label: "b".to_string(),
                raw_xml: "<feed><entry><title>B1</title></entry></feed>".to_string(),
            },
        ];
        let articles = parse_feeds(&QuickXmlParser, &feeds, &ParseOptions::default());
        let labels: Vec<&str> = articles.iter().map(|a| a.source.as_str()).collect();
        assert_eq!(labels, vec!["a", "b"]);
    }

    #[test]
    fn test_media_elements_do_not_shadow_core_fields() {
        let xml = r#"<rss version="2.0"
     xmlns:media="http://search.yahoo.com/mrss/"
     xmlns:dc="http://purl.org/dc/elements/1.1/">
  <channel>
    <item>
      <media:title>Photo credit: Agency</media:title>
      <media:description>A caption for the lead image.</media:description>
      <media:content url="https://cdn.example.com/lead.jpg" medium="image"/>
      <title>Real headline</title>
      <description>Real body of the story.</description>
      <link>https://example.com/real</link>
      <dc:date>2025-05-06T09:00:00Z</dc:date>
    </item>
  </channel>
</rss>"#;
        let articles = parse_feed(&QuickXmlParser, xml, "example.com", &ParseOptions::default());
        assert_eq!(articles.len(), 1);
        let item = &articles[0];
        assert_eq!(item.title, "Real headline");
        assert_eq!(item.description, "Real body of the story.");
        assert_eq!(item.link, "https://example.com/real");
        assert_eq!(item.published, "2025-05-06T09:00:00Z");
    }

    #[test]
    fn test_media_only_item_has_empty_core_fields() {
        let xml = r#"<rss xmlns:media="http://search.yahoo.com/mrss/"><channel><item>
            <media:title>Only a caption</media:title>
            <media:content url="https://cdn.example.com/x.jpg"/>
        </item></channel></rss>"#;
        let articles = parse_feed(&QuickXmlParser, xml, "x", &ParseOptions::default());
        assert_eq!(articles.len(), 1);
        assert_eq!(articles[0].title, "");
        assert_eq!(articles[0].description, "");
    }

    #[test]
    fn test_pub_date_wins_over_dc_date() {
        let xml = r#"<rss xmlns:dc="http://purl.org/dc/elements/1.1/"><channel><item>
            <dc:date>2025-01-01T00:00:00Z</dc:date>
            <pubDate>Tue, 06 May 2025 14:30:00 GMT</pubDate>
        </item></channel></rss>"#;
        let articles = parse_feed(&QuickXmlParser, xml, "x", &ParseOptions::default());
        assert_eq!(articles[0].published, "Tue, 06 May 2025 14:30:00 GMT");
    }

    #[test]
    fn test_rss1_default_namespace_items_are_parsed() {
        let xml = r#"<rdf:RDF xmlns:rdf="http://www.w3.org/1999/02/22-rdf-syntax-ns#"
         xmlns="http://purl.org/rss/1.0/">
  <channel><title>RDF feed</title></channel>
  <item><title>RDF headline</title><link>https://example.com/rdf</link></item>
</rdf:RDF>"#;
        let articles = parse_feed(&QuickXmlParser, xml, "x", &ParseOptions::default());
        assert_eq!(articles.len(), 1);
        assert_eq!(articles[0].title, "RDF headline");
        assert_eq!(articles[0].link, "https://example.com/rdf");
    }

    #[test]
    fn test_strip_markup() {
        assert_eq!(strip_markup("<p>Hello <i>there</i></p>"), "Hello there");
        assert_eq!(strip_markup("plain   text\n here"), "plain text here");
        assert_eq!(strip_markup("Fish &amp; chips"), "Fish & chips");
    }
}
