//! Core types shared between the kernel and content plugins.
//!
//! Everything here crosses the JSON boundary (site data, HTTP bodies), so
//! every type is serde-serializable and uses the wire names the site data
//! file and the front end already use.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// A category of ingestible content.
///
/// The variant name doubles as the Unbody collection name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ContentType {
    GoogleDoc,
    TextDocument,
}

impl ContentType {
    /// Every supported content type, in declaration order.
    pub const ALL: [ContentType; 2] = [ContentType::GoogleDoc, ContentType::TextDocument];

    /// Collection name used by the content service.
    pub fn as_str(&self) -> &'static str {
        match self {
            ContentType::GoogleDoc => "GoogleDoc",
            ContentType::TextDocument => "TextDocument",
        }
    }
}

impl fmt::Display for ContentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown content type name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownContentType(pub String);

impl fmt::Display for UnknownContentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown content type '{}'", self.0)
    }
}

impl std::error::Error for UnknownContentType {}

impl FromStr for ContentType {
    type Err = UnknownContentType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ContentType::ALL
            .into_iter()
            .find(|t| t.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| UnknownContentType(s.to_string()))
    }
}

/// UI component role within a content type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ComponentSlot {
    List,
    Card,
    CardWithRefs,
}

impl ComponentSlot {
    /// Every slot, in declaration order.
    pub const ALL: [ComponentSlot; 3] = [
        ComponentSlot::List,
        ComponentSlot::Card,
        ComponentSlot::CardWithRefs,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ComponentSlot::List => "list",
            ComponentSlot::Card => "card",
            ComponentSlot::CardWithRefs => "card_with_refs",
        }
    }
}

impl fmt::Display for ComponentSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Kind of request the user made, as classified by the input parser.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UserInputType {
    /// Plain search: results only, no generated answer.
    SearchQuery,
    /// A question expecting a generated answer.
    Question,
    /// Free-form conversational input.
    Conversational,
}

/// Parsed representation of a user's natural-language query.
///
/// Produced by an external parser; the kernel never parses raw text itself.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StructuredUserInput {
    #[serde(rename = "type")]
    pub input_type: UserInputType,

    /// Subject or topic terms of the request.
    #[serde(default)]
    pub subject_topic: Vec<String>,

    /// Key concepts and terms extracted from the request.
    #[serde(default)]
    pub concepts_key_terms: Vec<String>,

    /// Whether the request needs a semantic search at all.
    #[serde(default)]
    pub requires_search: bool,

    /// Original text as typed by the user, when the parser keeps it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub input: Option<String>,
}

impl StructuredUserInput {
    /// Create an input of the given type with no terms.
    pub fn new(input_type: UserInputType) -> Self {
        Self {
            input_type,
            subject_topic: Vec::new(),
            concepts_key_terms: Vec::new(),
            requires_search: false,
            input: None,
        }
    }

    /// True when the user only asked for search results.
    pub fn is_search_only(&self) -> bool {
        self.input_type == UserInputType::SearchQuery
    }

    /// Terms for a semantic search: subject/topic, else key concepts.
    pub fn search_terms(&self) -> &[String] {
        if self.subject_topic.is_empty() {
            &self.concepts_key_terms
        } else {
            &self.subject_topic
        }
    }
}
