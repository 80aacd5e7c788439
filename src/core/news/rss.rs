use roxmltree::Node;

use super::types::NewsItem;
use crate::core::error::RemoteError;

// Matched by the prefix the feed binds, not the URI: feeds disagree on the
// trailing slash of the content module namespace.
const CONTENT_PREFIX: &str = "content";
const DC_PREFIX: &str = "dc";

/// Projects every `rss/channel/item` into a [`NewsItem`]. A channel holding a
/// single item yields a one-element list.
pub fn parse_rss_items(xml: &str) -> Result<Vec<NewsItem>, RemoteError> {
    let doc = roxmltree::Document::parse(xml)?;
    let root = doc.root_element();
    if !root.has_tag_name("rss") {
        return Err(RemoteError::MissingRssChannel);
    }
    let channel = root
        .children()
        .find(|node| node.has_tag_name("channel"))
        .ok_or(RemoteError::MissingRssChannel)?;

    Ok(channel
        .children()
        .filter(|node| node.has_tag_name("item"))
        .map(item_from_xml)
        .collect())
}

fn item_from_xml(item: Node<'_, '_>) -> NewsItem {
    NewsItem {
        title: child_text(item, None, "title"),
        content: child_text(item, Some(CONTENT_PREFIX), "encoded"),
        author: child_text(item, Some(DC_PREFIX), "creator"),
        publish_date: child_text(item, None, "pubDate"),
    }
}

fn has_qualified_name(node: &Node<'_, '_>, prefix: Option<&str>, name: &str) -> bool {
    if !node.is_element() || node.tag_name().name() != name {
        return false;
    }
    match (prefix, node.tag_name().namespace()) {
        (None, namespace) => namespace.is_none(),
        (Some(prefix), Some(uri)) => node.lookup_prefix(uri) == Some(prefix),
        (Some(_), None) => false,
    }
}

fn child_text(item: Node<'_, '_>, prefix: Option<&str>, name: &str) -> String {
    item.children()
        .find(|node| has_qualified_name(node, prefix, name))
        .map(|node| {
            node.children()
                .filter(Node::is_text)
                .filter_map(|text| text.text())
                .collect()
        })
        .unwrap_or_default()
}
