use chost_core::{PostRecord, Settings, AUTHOR_NOT_FOUND};
use chost_logging::{chost_debug, chost_trace, chost_warn};
use ego_tree::NodeId;
use scraper::{Html, Selector};

use crate::convert::{Converter, Html2MdConverter};
use crate::dom;
use crate::frontmatter::build_tag_block;

pub const POST_CONTAINER: &str = "article.co-post-box";
pub const LINKED_TITLE: &str = "a > h3";
pub const EMBEDDED_ASK: &str = "div.co-embedded-ask";
pub const LOGIN_LINK: &str = r#"a[href="https://cohost.org/rc/login"]"#;
pub const TAG_LIST: &str = "div.co-tags > div";
pub const TITLE: &str = "h3:not([class])";
pub const AUTHOR: &str = "a[rel=author]";

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ExtractError {
    #[error("no post container (article.co-post-box) in the page")]
    PostContainerMissing,
    #[error("invalid selector `{0}`")]
    Selector(&'static str),
}

/// Soft failures: extraction carries on with a fallback value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExtractWarning {
    AuthorNotFound,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Extraction {
    pub record: PostRecord,
    pub warnings: Vec<ExtractWarning>,
}

pub trait Extractor: Send + Sync {
    fn extract(
        &self,
        html: &str,
        source_url: &str,
        settings: &Settings,
    ) -> Result<Extraction, ExtractError>;
}

/// Extractor for cohost.org post pages.
///
/// The post article is cleaned up in place before conversion:
/// - a linked `<h3>` title becomes a bare `<h3>`
/// - embedded asks become `<blockquote>`s
/// - the injected login link is dropped
pub struct CohostExtractor {
    converter: Box<dyn Converter>,
}

impl Default for CohostExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl CohostExtractor {
    pub fn new() -> Self {
        Self::with_converter(Html2MdConverter)
    }

    pub fn with_converter(converter: impl Converter + 'static) -> Self {
        Self {
            converter: Box::new(converter),
        }
    }
}

struct Selectors {
    container: Selector,
    linked_title: Selector,
    ask: Selector,
    login_link: Selector,
    tag_list: Selector,
    title: Selector,
    author: Selector,
}

impl Selectors {
    fn parse() -> Result<Self, ExtractError> {
        let parse = |css: &'static str| Selector::parse(css).map_err(|_| ExtractError::Selector(css));
        Ok(Self {
            container: parse(POST_CONTAINER)?,
            linked_title: parse(LINKED_TITLE)?,
            ask: parse(EMBEDDED_ASK)?,
            login_link: parse(LOGIN_LINK)?,
            tag_list: parse(TAG_LIST)?,
            title: parse(TITLE)?,
            author: parse(AUTHOR)?,
        })
    }
}

impl Extractor for CohostExtractor {
    fn extract(
        &self,
        html: &str,
        source_url: &str,
        settings: &Settings,
    ) -> Result<Extraction, ExtractError> {
        let sel = Selectors::parse()?;
        let mut doc = Html::parse_document(html);

        let post = dom::first_in_document(&doc, &sel.container)
            .ok_or(ExtractError::PostContainerMissing)?;

        unlink_title(&mut doc, post, &sel.linked_title);
        quote_asks(&mut doc, post, &sel.ask);
        strip_login_links(&mut doc, post, &sel.login_link);

        let tag_block = if settings.import_post_tags {
            build_tag_block(&post_tags(&doc, post, &sel.tag_list), settings.tag_space_replacer)
        } else {
            String::new()
        };

        let post_html = dom::element(&doc, post)
            .map(|el| el.html())
            .unwrap_or_default();
        let body_markup = self.converter.to_markdown(&post_html);

        let title = dom::first_in_document(&doc, &sel.title).map(|id| dom::text_of(&doc, id));

        let mut warnings = Vec::new();
        let author_handle = dom::first_in_document(&doc, &sel.author)
            .map(|id| dom::text_of(&doc, id).trim().to_string())
            .filter(|author| !author.is_empty())
            .unwrap_or_else(|| {
                chost_warn!("no author link in {}", source_url);
                warnings.push(ExtractWarning::AuthorNotFound);
                AUTHOR_NOT_FOUND.to_string()
            });

        chost_debug!(
            "extracted post by {} (title: {:?}, {} markdown bytes)",
            author_handle,
            title,
            body_markup.len()
        );

        Ok(Extraction {
            record: PostRecord {
                source_url: source_url.to_string(),
                author_handle,
                title,
                tag_block,
                body_markup,
            },
            warnings,
        })
    }
}

/// Replaces the anchor around the first linked heading with a bare `<h3>`.
fn unlink_title(doc: &mut Html, post: NodeId, linked_title: &Selector) {
    let Some(heading) = dom::select_ids(doc, post, linked_title).into_iter().next() else {
        return;
    };
    let Some(anchor) = doc.tree.get(heading).and_then(|node| node.parent()).map(|p| p.id()) else {
        return;
    };
    let text = dom::text_of(doc, heading);
    chost_trace!("unlinking title {:?}", text);
    if let Some(bare) = dom::create_element(doc, "h3") {
        dom::append_text(doc, bare, &text);
        dom::replace(doc, anchor, bare);
    }
}

fn quote_asks(doc: &mut Html, post: NodeId, ask: &Selector) {
    // Outermost first; a nested ask moves into its parent's quote and is found there next pass.
    while let Some(ask_id) = dom::select_ids(doc, post, ask).into_iter().next() {
        let Some(quote) = dom::create_element(doc, "blockquote") else {
            return;
        };
        chost_trace!("quoting ask {:?}", ask_id);
        dom::move_children(doc, ask_id, quote);
        dom::replace(doc, ask_id, quote);
    }
}

fn strip_login_links(doc: &mut Html, post: NodeId, login_link: &Selector) {
    for id in dom::select_ids(doc, post, login_link) {
        chost_trace!("removing login link {:?}", id);
        dom::remove(doc, id);
    }
}

/// Raw tag texts, marker included, e.g. `#foo bar`.
fn post_tags(doc: &Html, post: NodeId, tag_list: &Selector) -> Vec<String> {
    let Some(list) = dom::select_ids(doc, post, tag_list).into_iter().next() else {
        return Vec::new();
    };
    dom::element(doc, list)
        .map(|list| {
            list.child_elements()
                .map(|tag| tag.text().collect::<String>())
                .collect()
        })
        .unwrap_or_default()
}
