//! Block-Kind Classifier
//!
//! Maps a raw content node to one symbol from the closed set of supported
//! block kinds, using the node's context tag, style tag, and attributes with
//! fixed precedence. Returns `Unknown` rather than guessing when a node is
//! ambiguous; classification is total and never panics.

use serde::Deserialize;

use crate::document::Node;

/// Closed set of supported block kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BlockKind {
    Paragraph,
    Listing,
    Literal,
    Example,
    Sidebar,
    Quote,
    Verse,
    #[serde(alias = "pass")]
    Passthrough,
    Open,
    Comment,
    Table,
    Image,
    Video,
    Audio,
    Admonition,
    #[serde(alias = "unordered-list")]
    Ulist,
    #[serde(alias = "ordered-list")]
    Olist,
    #[serde(alias = "description-list")]
    Dlist,
    #[serde(alias = "callout-list")]
    Colist,
    Unknown,
}

impl BlockKind {
    /// Every concrete kind, i.e. the closed set minus `Unknown`. The
    /// dispatch registry is validated for completeness against this list.
    pub const ALL: [BlockKind; 19] = [
        BlockKind::Paragraph,
        BlockKind::Listing,
        BlockKind::Literal,
        BlockKind::Example,
        BlockKind::Sidebar,
        BlockKind::Quote,
        BlockKind::Verse,
        BlockKind::Passthrough,
        BlockKind::Open,
        BlockKind::Comment,
        BlockKind::Table,
        BlockKind::Image,
        BlockKind::Video,
        BlockKind::Audio,
        BlockKind::Admonition,
        BlockKind::Ulist,
        BlockKind::Olist,
        BlockKind::Dlist,
        BlockKind::Colist,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            BlockKind::Paragraph => "paragraph",
            BlockKind::Listing => "listing",
            BlockKind::Literal => "literal",
            BlockKind::Example => "example",
            BlockKind::Sidebar => "sidebar",
            BlockKind::Quote => "quote",
            BlockKind::Verse => "verse",
            BlockKind::Passthrough => "passthrough",
            BlockKind::Open => "open",
            BlockKind::Comment => "comment",
            BlockKind::Table => "table",
            BlockKind::Image => "image",
            BlockKind::Video => "video",
            BlockKind::Audio => "audio",
            BlockKind::Admonition => "admonition",
            BlockKind::Ulist => "ulist",
            BlockKind::Olist => "olist",
            BlockKind::Dlist => "dlist",
            BlockKind::Colist => "colist",
            BlockKind::Unknown => "unknown",
        }
    }
}

impl std::fmt::Display for BlockKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for BlockKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let kind = match s {
            "paragraph" => BlockKind::Paragraph,
            "listing" => BlockKind::Listing,
            "literal" => BlockKind::Literal,
            "example" => BlockKind::Example,
            "sidebar" => BlockKind::Sidebar,
            "quote" => BlockKind::Quote,
            "verse" => BlockKind::Verse,
            "passthrough" | "pass" => BlockKind::Passthrough,
            "open" => BlockKind::Open,
            "comment" => BlockKind::Comment,
            "table" => BlockKind::Table,
            "image" => BlockKind::Image,
            "video" => BlockKind::Video,
            "audio" => BlockKind::Audio,
            "admonition" => BlockKind::Admonition,
            "ulist" | "unordered-list" => BlockKind::Ulist,
            "olist" | "ordered-list" => BlockKind::Olist,
            "dlist" | "description-list" => BlockKind::Dlist,
            "colist" | "callout-list" => BlockKind::Colist,
            other => return Err(format!("unknown block kind '{other}'")),
        };
        Ok(kind)
    }
}

/// Attributes whose presence marks a quote-family block as a quote (an
/// attribution or citation line in the source).
const QUOTE_ATTRIBUTES: [&str; 3] = ["attribution", "citetitle", "author"];

/// Styles an open block can masquerade as.
fn kind_for_style(style: &str) -> Option<BlockKind> {
    match style {
        "source" | "listing" => Some(BlockKind::Listing),
        "literal" => Some(BlockKind::Literal),
        "quote" => Some(BlockKind::Quote),
        "verse" => Some(BlockKind::Verse),
        "pass" => Some(BlockKind::Passthrough),
        "NOTE" | "TIP" | "IMPORTANT" | "WARNING" | "CAUTION" => Some(BlockKind::Admonition),
        _ => None,
    }
}

/// Classify a node into a block kind.
///
/// Precedence is fixed: the context tag decides directly for unambiguous
/// contexts; the quote/verse family is disambiguated through style, then
/// context, then attribution attributes; container-like open blocks fall
/// back to their style before resolving to `Open`.
pub fn classify(node: &Node) -> BlockKind {
    match node.context.as_str() {
        "paragraph" => BlockKind::Paragraph,
        "listing" => BlockKind::Listing,
        "literal" => BlockKind::Literal,
        "example" => BlockKind::Example,
        "sidebar" => BlockKind::Sidebar,
        "pass" | "passthrough" => BlockKind::Passthrough,
        "comment" => BlockKind::Comment,
        "table" => BlockKind::Table,
        "image" => BlockKind::Image,
        "video" => BlockKind::Video,
        "audio" => BlockKind::Audio,
        "admonition" => BlockKind::Admonition,
        "ulist" => BlockKind::Ulist,
        "olist" => BlockKind::Olist,
        "dlist" => BlockKind::Dlist,
        "colist" => BlockKind::Colist,
        "quote" | "verse" | "quotation" => classify_quote_family(node),
        "open" => classify_open(node),
        _ => BlockKind::Unknown,
    }
}

/// Disambiguate the quote/verse family.
///
/// Order: explicit `verse` style, then the context tag itself, then the
/// presence of attribution-like attributes. A quote-like block carrying none
/// of these signals holds other structured content; the classifier does not
/// attempt to resolve it further.
fn classify_quote_family(node: &Node) -> BlockKind {
    if node.style.as_deref() == Some("verse") {
        return BlockKind::Verse;
    }
    match node.context.as_str() {
        "verse" => BlockKind::Verse,
        "quote" => BlockKind::Quote,
        _ => {
            if QUOTE_ATTRIBUTES.iter().any(|a| node.has_attr(a)) {
                BlockKind::Quote
            } else {
                BlockKind::Unknown
            }
        }
    }
}

/// Classify a generic container-like (open) node.
///
/// An open block may masquerade as another kind through its style or a role
/// hint; a bare open block is its own kind; an unrecognized style is left
/// unresolved.
fn classify_open(node: &Node) -> BlockKind {
    if let Some(style) = node.style.as_deref() {
        if style == "open" {
            return BlockKind::Open;
        }
        return kind_for_style(style).unwrap_or(BlockKind::Unknown);
    }
    if let Some(role) = node.attr("role") {
        if let Some(kind) = kind_for_style(role) {
            return kind;
        }
    }
    BlockKind::Open
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;
    use std::collections::HashMap;

    fn node(context: &str) -> Node {
        Node {
            context: context.to_string(),
            style: None,
            id: None,
            title: None,
            attributes: HashMap::new(),
            blocks: Vec::new(),
            location: None,
        }
    }

    #[test]
    fn test_classify_direct_contexts() {
        assert_eq!(classify(&node("paragraph")), BlockKind::Paragraph);
        assert_eq!(classify(&node("listing")), BlockKind::Listing);
        assert_eq!(classify(&node("table")), BlockKind::Table);
        assert_eq!(classify(&node("admonition")), BlockKind::Admonition);
        assert_eq!(classify(&node("dlist")), BlockKind::Dlist);
    }

    #[test]
    fn test_classify_unrecognized_context() {
        assert_eq!(classify(&node("thematic_break")), BlockKind::Unknown);
        assert_eq!(classify(&node("")), BlockKind::Unknown);
    }

    #[test]
    fn test_verse_style_wins_over_quote_context() {
        let mut n = node("quote");
        n.style = Some("verse".to_string());
        assert_eq!(classify(&n), BlockKind::Verse);
    }

    #[test]
    fn test_verse_context() {
        assert_eq!(classify(&node("verse")), BlockKind::Verse);
    }

    #[test]
    fn test_quote_context() {
        assert_eq!(classify(&node("quote")), BlockKind::Quote);
    }

    #[test]
    fn test_quotation_with_attribution_is_quote() {
        let mut n = node("quotation");
        n.attributes.insert(
            "attribution".to_string(),
            Value::String("Someone".to_string()),
        );
        assert_eq!(classify(&n), BlockKind::Quote);
    }

    #[test]
    fn test_quotation_without_signals_is_unknown() {
        assert_eq!(classify(&node("quotation")), BlockKind::Unknown);
    }

    #[test]
    fn test_open_block_style_fallback() {
        let mut n = node("open");
        n.style = Some("source".to_string());
        assert_eq!(classify(&n), BlockKind::Listing);

        let mut n = node("open");
        n.style = Some("NOTE".to_string());
        assert_eq!(classify(&n), BlockKind::Admonition);

        let mut n = node("open");
        n.style = Some("mystery".to_string());
        assert_eq!(classify(&n), BlockKind::Unknown);
    }

    #[test]
    fn test_bare_open_block() {
        assert_eq!(classify(&node("open")), BlockKind::Open);
    }

    #[test]
    fn test_open_block_role_hint() {
        let mut n = node("open");
        n.attributes
            .insert("role".to_string(), Value::String("verse".to_string()));
        assert_eq!(classify(&n), BlockKind::Verse);
    }

    #[test]
    fn test_kind_round_trip() {
        for kind in BlockKind::ALL {
            assert_eq!(kind.as_str().parse::<BlockKind>().unwrap(), kind);
        }
    }
}
