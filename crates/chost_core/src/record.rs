/// Author handle used when the page carries no `rel=author` link.
pub const AUTHOR_NOT_FOUND: &str = "not found";

/// One extracted post, built per import and consumed by the writer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostRecord {
    /// Exact URL the post was fetched from.
    pub source_url: String,
    pub author_handle: String,
    pub title: Option<String>,
    /// Frontmatter block, already terminated by `---\n`; empty when there are no tags.
    pub tag_block: String,
    pub body_markup: String,
}

impl PostRecord {
    /// Title with the empty string folded into `None`.
    pub fn non_empty_title(&self) -> Option<&str> {
        self.title.as_deref().filter(|title| !title.is_empty())
    }
}
