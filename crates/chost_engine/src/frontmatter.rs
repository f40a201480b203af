use chost_core::TagSpaceReplacer;

/// YAML frontmatter listing the post's tags, terminated so the body can follow directly.
///
/// Returns the empty string when there are no tags.
pub fn build_tag_block(raw_tags: &[String], replacer: TagSpaceReplacer) -> String {
    if raw_tags.is_empty() {
        return String::new();
    }
    let mut block = String::from("---\ntags:");
    for raw in raw_tags {
        block.push_str("\n  - ");
        block.push_str(&normalize_tag(raw, replacer));
    }
    block.push_str("\n---\n");
    block
}

/// Drops the leading `#` marker and replaces the first space only.
pub fn normalize_tag(raw: &str, replacer: TagSpaceReplacer) -> String {
    let mut chars = raw.chars();
    chars.next();
    chars.as_str().replacen(' ', replacer.as_str(), 1)
}
