use chost_core::PostRecord;

pub const SITE_ROOT: &str = "https://cohost.org/";
pub const NOTE_EXTENSION: &str = "md";

/// `"<author> - <title>.md"`, or `"<author> - <post id>.md"` for untitled posts.
pub fn note_filename(record: &PostRecord) -> String {
    let stem = match record.non_empty_title() {
        Some(title) => title.to_string(),
        None => post_id(record),
    };
    format!(
        "{author} - {stem}.{NOTE_EXTENSION}",
        author = sanitize_component(&record.author_handle),
        stem = sanitize_component(&stem),
    )
}

/// Source URL minus `https://cohost.org/<author>/post/`; the URL as-is when the prefix is absent.
pub fn post_id(record: &PostRecord) -> String {
    let prefix = format!("{SITE_ROOT}{}/post/", record.author_handle);
    record.source_url.replacen(&prefix, "", 1)
}

/// Note body: the tag block is already terminated, so nothing goes in between.
pub fn note_content(record: &PostRecord) -> String {
    format!("{}{}", record.tag_block, record.body_markup)
}

fn sanitize_component(input: &str) -> String {
    input
        .chars()
        .map(|c| if is_forbidden(c) { '_' } else { c })
        .collect()
}

fn is_forbidden(c: char) -> bool {
    matches!(c,
        '\\' | '/' | ':' | '*' | '?' | '"' | '<' | '>' | '|' | '\0'..='\u{1F}'
    )
}
