//! Document sanitation and image-reference extraction.
//!
//! Three pure transforms run on every note write:
//!
//! 1. [`strip_nodes_of_type`] drops transient upload placeholders.
//! 2. [`prune_empty_paragraphs`] drops paragraph shells left behind, which
//!    would otherwise render as blank lines.
//! 3. [`extract_image_urls`] collects image sources in document order for the
//!    note's denormalized `images` column.
//!
//! None of them mutate their input; each returns a new owned tree.
//!
//! ```rust
//! use lightnote_core::{sanitize_document, DocumentNode, IMAGE_UPLOAD};
//!
//! let raw: DocumentNode = serde_json::from_str(r#"{"type":"doc","content":[
//!     {"type":"paragraph","content":[{"type":"imageUpload"}]},
//!     {"type":"paragraph","content":[{"type":"text","text":"kept"}]}
//! ]}"#).unwrap();
//!
//! let clean = sanitize_document(&raw, IMAGE_UPLOAD);
//! assert_eq!(clean.children().len(), 1);
//! ```

use crate::core::document::{DocumentNode, IMAGE, PARAGRAPH};

impl DocumentNode {
    /// Returns a copy of this tree with every descendant of type `node_type`
    /// removed. The node itself is kept even if its own type matches.
    #[must_use]
    pub fn without_nodes_of_type(&self, node_type: &str) -> DocumentNode {
        self.rebuild_children(|children| {
            children
                .iter()
                .filter(|child| !child.is_type(node_type))
                .map(|child| child.without_nodes_of_type(node_type))
                .collect()
        })
    }

    /// Returns a copy of this tree with empty paragraphs removed at every level.
    ///
    /// Children are pruned before their parent is filtered, so a paragraph
    /// that only held empty paragraphs disappears in the same pass.
    #[must_use]
    pub fn without_empty_paragraphs(&self) -> DocumentNode {
        self.rebuild_children(|children| {
            children
                .iter()
                .map(DocumentNode::without_empty_paragraphs)
                .filter(|child| !child.is_empty_paragraph())
                .collect()
        })
    }

    /// Returns the `src` of every image node in pre-order, duplicates included.
    pub fn image_urls(&self) -> Vec<String> {
        let mut urls = Vec::new();
        self.collect_image_urls(&mut urls);
        urls
    }

    fn is_empty_paragraph(&self) -> bool {
        self.is_type(PARAGRAPH) && self.content.as_ref().map_or(true, Vec::is_empty)
    }

    fn collect_image_urls(&self, urls: &mut Vec<String>) {
        if self.is_type(IMAGE) {
            if let Some(src) = self.attr_str("src") {
                urls.push(src.to_string());
            }
        }
        for child in self.children() {
            child.collect_image_urls(urls);
        }
    }

    /// Copies this node, passing its children (if it has a `content` sequence)
    /// through `f`. Leaves are copied unchanged.
    fn rebuild_children<F>(&self, f: F) -> DocumentNode
    where
        F: FnOnce(&[DocumentNode]) -> Vec<DocumentNode>,
    {
        DocumentNode {
            node_type: self.node_type.clone(),
            attrs: self.attrs.clone(),
            content: self.content.as_deref().map(f),
            extra: self.extra.clone(),
        }
    }
}

/// Removes every descendant of type `node_type`. Absent documents pass through.
pub fn strip_nodes_of_type(root: Option<&DocumentNode>, node_type: &str) -> Option<DocumentNode> {
    root.map(|node| node.without_nodes_of_type(node_type))
}

/// Removes paragraphs with no children. Absent documents pass through.
pub fn prune_empty_paragraphs(root: Option<&DocumentNode>) -> Option<DocumentNode> {
    root.map(DocumentNode::without_empty_paragraphs)
}

/// Collects image URLs in document order; an absent document has none.
pub fn extract_image_urls(root: Option<&DocumentNode>) -> Vec<String> {
    root.map(DocumentNode::image_urls).unwrap_or_default()
}

/// Strips `placeholder_type` nodes, then prunes the empty paragraphs that leaves behind.
pub fn sanitize_document(root: &DocumentNode, placeholder_type: &str) -> DocumentNode {
    root.without_nodes_of_type(placeholder_type)
        .without_empty_paragraphs()
}

/// The image list that accompanies a note write.
#[derive(Debug, Clone, PartialEq)]
pub enum ImageList {
    /// Supplied by the caller and stored verbatim.
    Explicit(Vec<String>),
    /// Extracted from the sanitized document.
    Derived(Vec<String>),
    /// Neither supplied nor derivable; the stored list is left alone.
    Unchanged,
}

impl ImageList {
    /// Explicit images take precedence over images derived from the document.
    ///
    /// Extraction only runs when the caller supplied no list. Without either,
    /// the stored list must not be touched.
    ///
    /// ```rust
    /// use lightnote_core::{DocumentNode, ImageList};
    ///
    /// let doc = DocumentNode::new("doc")
    ///     .with_content(vec![DocumentNode::new("image").with_attr("src", "y")]);
    ///
    /// let explicit = ImageList::resolve(Some(vec!["x".to_string()]), Some(&doc));
    /// assert_eq!(explicit, ImageList::Explicit(vec!["x".to_string()]));
    ///
    /// let derived = ImageList::resolve(None, Some(&doc));
    /// assert_eq!(derived, ImageList::Derived(vec!["y".to_string()]));
    ///
    /// assert_eq!(ImageList::resolve(None, None), ImageList::Unchanged);
    /// ```
    pub fn resolve(explicit: Option<Vec<String>>, sanitized: Option<&DocumentNode>) -> Self {
        match (explicit, sanitized) {
            (Some(images), _) => Self::Explicit(images),
            (None, Some(doc)) => Self::Derived(doc.image_urls()),
            (None, None) => Self::Unchanged,
        }
    }

    /// Returns the list to persist, or `None` to leave the stored list as is.
    pub fn into_images(self) -> Option<Vec<String>> {
        match self {
            Self::Explicit(images) | Self::Derived(images) => Some(images),
            Self::Unchanged => None,
        }
    }
}

/// Content and images ready to be handed to the persistence layer.
#[derive(Debug, Clone, PartialEq)]
pub struct PreparedContent {
    /// The sanitized document, or `None` if no document was supplied.
    pub content: Option<DocumentNode>,
    /// The explicit or derived image list.
    pub images: ImageList,
}

/// Runs the write-path pipeline: sanitize the document (if any), then
/// resolve the image list against the sanitized result.
pub fn prepare_content(
    content: Option<DocumentNode>,
    images: Option<Vec<String>>,
    placeholder_type: &str,
) -> PreparedContent {
    let content = content.map(|doc| sanitize_document(&doc, placeholder_type));
    let images = ImageList::resolve(images, content.as_ref());
    PreparedContent { content, images }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::document::IMAGE_UPLOAD;
    use serde_json::json;

    fn doc(value: serde_json::Value) -> DocumentNode {
        serde_json::from_value(value).unwrap()
    }

    fn image(src: &str) -> DocumentNode {
        DocumentNode::new(IMAGE).with_attr("src", src)
    }

    fn paragraph(children: Vec<DocumentNode>) -> DocumentNode {
        DocumentNode::new(PARAGRAPH).with_content(children)
    }

    fn text(s: &str) -> DocumentNode {
        doc(json!({ "type": "text", "text": s }))
    }

    #[test]
    fn test_strip_then_prune_scenario() {
        let raw = doc(json!({
            "type": "doc",
            "content": [
                { "type": "paragraph", "content": [{ "type": "imageUpload" }] },
                { "type": "paragraph", "content": [{ "type": "text" }] }
            ]
        }));

        let stripped = strip_nodes_of_type(Some(&raw), IMAGE_UPLOAD).unwrap();
        assert_eq!(
            serde_json::to_value(&stripped).unwrap(),
            json!({
                "type": "doc",
                "content": [
                    { "type": "paragraph", "content": [] },
                    { "type": "paragraph", "content": [{ "type": "text" }] }
                ]
            })
        );

        let pruned = prune_empty_paragraphs(Some(&stripped)).unwrap();
        assert_eq!(
            serde_json::to_value(&pruned).unwrap(),
            json!({
                "type": "doc",
                "content": [{ "type": "paragraph", "content": [{ "type": "text" }] }]
            })
        );
    }

    #[test]
    fn test_strip_removes_matches_at_every_depth() {
        let raw = DocumentNode::new("doc").with_content(vec![
            DocumentNode::new(IMAGE_UPLOAD),
            DocumentNode::new("bulletList").with_content(vec![DocumentNode::new("listItem")
                .with_content(vec![paragraph(vec![text("a"), DocumentNode::new(IMAGE_UPLOAD)])])]),
        ]);

        let stripped = raw.without_nodes_of_type(IMAGE_UPLOAD);

        assert_eq!(stripped.children().len(), 1);
        let inner = &stripped.children()[0].children()[0].children()[0];
        assert_eq!(inner.children(), &[text("a")]);
    }

    #[test]
    fn test_strip_keeps_matching_root() {
        let raw = DocumentNode::new(IMAGE_UPLOAD).with_content(vec![DocumentNode::new(IMAGE_UPLOAD)]);
        let stripped = raw.without_nodes_of_type(IMAGE_UPLOAD);

        assert!(stripped.is_type(IMAGE_UPLOAD));
        assert_eq!(stripped.content, Some(vec![]));
    }

    #[test]
    fn test_strip_is_idempotent() {
        let raw = DocumentNode::new("doc").with_content(vec![
            paragraph(vec![DocumentNode::new(IMAGE_UPLOAD), image("a")]),
            DocumentNode::new(IMAGE_UPLOAD),
        ]);

        let once = raw.without_nodes_of_type(IMAGE_UPLOAD);
        let twice = once.without_nodes_of_type(IMAGE_UPLOAD);
        assert_eq!(once, twice);
    }

    #[test]
    fn test_strip_does_not_touch_input() {
        let raw = DocumentNode::new("doc").with_content(vec![DocumentNode::new(IMAGE_UPLOAD)]);
        let before = raw.clone();

        let _ = sanitize_document(&raw, IMAGE_UPLOAD);
        assert_eq!(raw, before);
    }

    #[test]
    fn test_prune_keeps_empty_non_paragraphs() {
        let raw = DocumentNode::new("doc").with_content(vec![
            DocumentNode::new("bulletList").with_content(vec![]),
            DocumentNode::new("horizontalRule"),
            DocumentNode::new(PARAGRAPH),
        ]);

        let pruned = raw.without_empty_paragraphs();
        let kinds: Vec<_> = pruned
            .children()
            .iter()
            .map(|c| c.node_type.as_deref().unwrap())
            .collect();
        assert_eq!(kinds, vec!["bulletList", "horizontalRule"]);
    }

    #[test]
    fn test_prune_cascades_through_nested_paragraphs() {
        let raw = DocumentNode::new("doc").with_content(vec![
            paragraph(vec![paragraph(vec![])]),
            paragraph(vec![text("x")]),
        ]);

        let pruned = raw.without_empty_paragraphs();
        assert_eq!(pruned.children(), &[paragraph(vec![text("x")])]);
    }

    #[test]
    fn test_prune_is_idempotent() {
        let raw = DocumentNode::new("doc").with_content(vec![
            paragraph(vec![]),
            DocumentNode::new("blockquote").with_content(vec![paragraph(vec![]), paragraph(vec![text("q")])]),
        ]);

        let once = raw.without_empty_paragraphs();
        assert_eq!(once.without_empty_paragraphs(), once);
    }

    #[test]
    fn test_prune_leaf_root_is_unchanged() {
        let root = DocumentNode::new(PARAGRAPH);
        assert_eq!(root.without_empty_paragraphs(), root);
    }

    #[test]
    fn test_extract_in_document_order() {
        let raw = DocumentNode::new("doc").with_content(vec![
            paragraph(vec![image("a")]),
            DocumentNode::new("blockquote").with_content(vec![image("b")]),
            image("c"),
        ]);

        assert_eq!(extract_image_urls(Some(&raw)), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_extract_keeps_duplicates_and_skips_bad_src() {
        let raw = DocumentNode::new("doc").with_content(vec![
            image("a"),
            DocumentNode::new(IMAGE).with_attr("src", 42),
            DocumentNode::new(IMAGE),
            DocumentNode::new("figure").with_attr("src", "not-an-image"),
            image("a"),
        ]);

        assert_eq!(raw.image_urls(), vec!["a", "a"]);
    }

    #[test]
    fn test_extract_visits_image_children() {
        let raw = image("outer").with_content(vec![image("inner")]);
        assert_eq!(raw.image_urls(), vec!["outer", "inner"]);
    }

    #[test]
    fn test_absent_documents_propagate() {
        assert_eq!(strip_nodes_of_type(None, "x"), None);
        assert_eq!(prune_empty_paragraphs(None), None);
        assert!(extract_image_urls(None).is_empty());
    }

    #[test]
    fn test_stray_null_does_not_shield_siblings() {
        let raw = doc(json!({
            "type": "doc",
            "content": [
                { "type": "paragraph", "content": [{ "type": "imageUpload" }] },
                { "type": "image", "attrs": { "src": "a.png" } },
                null
            ]
        }));

        let prepared = prepare_content(Some(raw), None, IMAGE_UPLOAD);

        assert_eq!(
            serde_json::to_value(prepared.content.unwrap()).unwrap(),
            json!({ "type": "doc", "content": [{ "type": "image", "attrs": { "src": "a.png" } }] })
        );
        assert_eq!(prepared.images, ImageList::Derived(vec!["a.png".to_string()]));
    }

    #[test]
    fn test_sanitize_preserves_text_members() {
        let raw = doc(json!({
            "type": "doc",
            "content": [{
                "type": "paragraph",
                "attrs": { "textAlign": "left" },
                "content": [{ "type": "text", "text": "bold", "marks": [{ "type": "bold" }] }]
            }]
        }));

        let clean = sanitize_document(&raw, IMAGE_UPLOAD);
        assert_eq!(clean, raw);
    }

    #[test]
    fn test_prepare_content_explicit_images_win() {
        let raw = DocumentNode::new("doc").with_content(vec![image("y")]);
        let prepared = prepare_content(Some(raw), Some(vec!["x".to_string()]), IMAGE_UPLOAD);

        assert_eq!(prepared.images, ImageList::Explicit(vec!["x".to_string()]));
        assert!(prepared.content.is_some());
    }

    #[test]
    fn test_prepare_content_derives_from_sanitized_document() {
        let raw = DocumentNode::new("doc").with_content(vec![
            paragraph(vec![DocumentNode::new(IMAGE_UPLOAD)]),
            paragraph(vec![image("kept")]),
        ]);
        let prepared = prepare_content(Some(raw), None, IMAGE_UPLOAD);

        assert_eq!(prepared.images.into_images(), Some(vec!["kept".to_string()]));
        assert_eq!(prepared.content.unwrap().children().len(), 1);
    }

    #[test]
    fn test_prepare_content_without_document_leaves_images_alone() {
        let prepared = prepare_content(None, None, IMAGE_UPLOAD);
        assert_eq!(prepared.content, None);
        assert_eq!(prepared.images, ImageList::Unchanged);
        assert_eq!(prepared.images.into_images(), None);
    }

    #[test]
    fn test_custom_placeholder_type() {
        let raw = DocumentNode::new("doc").with_content(vec![
            DocumentNode::new("videoUpload"),
            DocumentNode::new(IMAGE_UPLOAD),
        ]);

        let clean = sanitize_document(&raw, "videoUpload");
        assert_eq!(clean.children(), &[DocumentNode::new(IMAGE_UPLOAD)]);
    }
}
