use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Character substituted for the space inside a tag name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub enum TagSpaceReplacer {
    #[default]
    Dash,
    Underscore,
}

impl TagSpaceReplacer {
    pub fn as_str(self) -> &'static str {
        match self {
            TagSpaceReplacer::Dash => "-",
            TagSpaceReplacer::Underscore => "_",
        }
    }

    /// Human-readable label shown by the settings surface.
    pub fn label(self) -> &'static str {
        match self {
            TagSpaceReplacer::Dash => "Dash (-)",
            TagSpaceReplacer::Underscore => "Underscore (_)",
        }
    }
}

impl fmt::Display for TagSpaceReplacer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseReplacerError(String);

impl fmt::Display for ParseReplacerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unsupported tag space replacer {:?} (expected \"-\" or \"_\")", self.0)
    }
}

impl std::error::Error for ParseReplacerError {}

impl FromStr for TagSpaceReplacer {
    type Err = ParseReplacerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "-" | "dash" => Ok(TagSpaceReplacer::Dash),
            "_" | "underscore" => Ok(TagSpaceReplacer::Underscore),
            other => Err(ParseReplacerError(other.to_string())),
        }
    }
}

impl From<TagSpaceReplacer> for String {
    fn from(replacer: TagSpaceReplacer) -> Self {
        replacer.as_str().to_string()
    }
}

impl TryFrom<String> for TagSpaceReplacer {
    type Error = ParseReplacerError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// User settings read by the extractor. Owned and persisted by the host.
///
/// Unknown or missing keys fall back to the defaults, so stored data from an
/// older version merges over `Settings::default()`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Settings {
    pub import_post_tags: bool,
    /// Reserved; comment import is not implemented.
    pub import_post_comments: bool,
    pub tag_space_replacer: TagSpaceReplacer,
}
