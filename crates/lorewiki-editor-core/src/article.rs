//! Article drafts and the submit-time finalization step.

use lorewiki_common::api::{Article, ArticlePayload};

use crate::links::normalize_links;

/// An article as the admin form holds it before submit.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ArticleDraft {
    /// Set when editing an existing article.
    pub id: Option<i64>,
    pub title: String,
    pub description: String,
    /// Raw editor content.
    pub content: String,
    pub category_id: i64,
    pub preview_image: Option<String>,
}

impl ArticleDraft {
    pub fn new(title: impl Into<String>, category_id: i64) -> Self {
        Self {
            title: title.into(),
            category_id,
            ..Default::default()
        }
    }

    pub fn is_update(&self) -> bool {
        self.id.is_some()
    }

    /// Build the request payload, running link normalization over the content.
    ///
    /// A blank preview image is sent as `null`.
    pub fn finalize(&self) -> ArticlePayload {
        let preview_image = self
            .preview_image
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string);
        ArticlePayload {
            id: self.id,
            title: self.title.clone(),
            description: self.description.clone(),
            content: normalize_links(&self.content),
            category_id: self.category_id,
            preview_image,
        }
    }
}

/// Open a stored article for editing. Null columns become empty fields and an
/// article without a category gets category 0.
impl From<Article> for ArticleDraft {
    fn from(article: Article) -> Self {
        Self {
            id: Some(article.id),
            title: article.title,
            description: article.description.unwrap_or_default(),
            content: article.content.unwrap_or_default(),
            category_id: article.category_id.unwrap_or_default(),
            preview_image: article.preview_image,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_finalize_normalizes_content_only() {
        let draft = ArticleDraft {
            id: Some(7),
            title: "Server rules".into(),
            description: r#"see href="rules.example""#.into(),
            content: r#"<a href="rules.example">rules</a> <a href="/wiki">wiki</a>"#.into(),
            category_id: 2,
            preview_image: Some("  ".into()),
        };
        let payload = draft.finalize();
        assert_eq!(
            payload.content,
            r#"<a href="https://rules.example">rules</a> <a href="/wiki">wiki</a>"#
        );
        assert_eq!(payload.description, draft.description);
        assert_eq!(payload.preview_image, None);
        assert_eq!(payload.id, Some(7));
    }

    #[test]
    fn test_new_draft_serializes_without_id() {
        let mut draft = ArticleDraft::new("Intro", 1);
        draft.content = "<p>hi</p>".into();
        draft.preview_image = Some("https://cdn.example/p.png".into());
        assert!(!draft.is_update());

        let json = serde_json::to_string(&draft.finalize()).unwrap();
        insta::assert_snapshot!(json, @r#"{"title":"Intro","description":"","content":"<p>hi</p>","category_id":1,"preview_image":"https://cdn.example/p.png"}"#);
    }

    #[test]
    fn test_stored_article_round_trips_as_update() {
        let article: Article = serde_json::from_str(
            r#"{"id":4,"title":"Rules","description":null,"content":"<a href=\"rules.example\">r</a>",
                "category_id":2,"category_name":"Server","preview_image":"https://cdn.example/r.png"}"#,
        )
        .unwrap();
        let draft = ArticleDraft::from(article);
        assert!(draft.is_update());
        assert_eq!(draft.description, "");

        let payload = draft.finalize();
        assert_eq!(payload.id, Some(4));
        assert_eq!(payload.category_id, 2);
        assert_eq!(payload.content, r#"<a href="https://rules.example">r</a>"#);
        assert_eq!(payload.preview_image.as_deref(), Some("https://cdn.example/r.png"));
    }
}
