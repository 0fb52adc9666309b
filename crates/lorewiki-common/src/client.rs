use std::sync::Arc;

use bytes::Bytes;
use reqwest::header::AUTHORIZATION;
use reqwest::{Method, RequestBuilder, Url};

use crate::api::{self, Action, Article, ArticlePayload};
use crate::config::Config;
use crate::error::{ApiError, UploadError};
use crate::session::SessionProvider;
use crate::upload::{ImageFile, ImageHost, UploadedImage};

/// HTTP client for the wiki API function.
///
/// Authenticated calls read the bearer token from the injected session
/// provider at call time, so a re-login is picked up without rebuilding the
/// client.
#[derive(Clone)]
pub struct WikiClient {
    client: reqwest::Client,
    endpoint: Url,
    session: Arc<dyn SessionProvider + Send + Sync>,
}

impl WikiClient {
    pub fn new(
        endpoint: &str,
        session: Arc<dyn SessionProvider + Send + Sync>,
    ) -> Result<Self, ApiError> {
        Self::with_client(reqwest::Client::new(), endpoint, session)
    }

    pub fn with_client(
        client: reqwest::Client,
        endpoint: &str,
        session: Arc<dyn SessionProvider + Send + Sync>,
    ) -> Result<Self, ApiError> {
        let endpoint = Url::parse(endpoint).map_err(|_| ApiError::Endpoint(endpoint.to_string()))?;
        Ok(Self {
            client,
            endpoint,
            session,
        })
    }

    /// Build a client from config, using the config's own session.
    pub fn from_config(config: &Config) -> Result<Self, ApiError> {
        let builder = reqwest::Client::builder();
        #[cfg(not(all(target_family = "wasm", target_os = "unknown")))]
        let builder =
            builder.timeout(std::time::Duration::from_secs(config.request_timeout_secs));
        let client = builder.build()?;
        Self::with_client(client, &config.endpoint, Arc::new(config.clone()))
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// Endpoint URL with `?action=` set, preserving any other query parameters.
    pub fn action_url(&self, action: Action) -> Url {
        let mut url = self.endpoint.clone();
        let others: Vec<(String, String)> = url
            .query_pairs()
            .filter(|(k, _)| k != "action")
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect();
        {
            let mut pairs = url.query_pairs_mut();
            pairs.clear();
            for (k, v) in &others {
                pairs.append_pair(k, v);
            }
            pairs.append_pair("action", action.as_str());
        }
        url
    }

    /// `?action=articles&id=<id>`, the address of a single article.
    pub fn article_url(&self, id: i64) -> Url {
        let mut url = self.action_url(Action::Articles);
        url.query_pairs_mut().append_pair("id", &id.to_string());
        url
    }

    fn bearer(&self) -> Result<String, ApiError> {
        self.session
            .session_token()
            .map(|token| token.bearer())
            .ok_or(ApiError::MissingSession)
    }

    async fn execute(&self, request: RequestBuilder) -> Result<(u16, Bytes), ApiError> {
        let response = request.send().await?;
        let status = response.status().as_u16();
        let body = response.bytes().await?;
        Ok((status, body))
    }

    /// Send an authenticated JSON request and return status + body.
    async fn send_json<T: serde::Serialize + ?Sized>(
        &self,
        method: Method,
        action: Action,
        body: &T,
    ) -> Result<(u16, Bytes), ApiError> {
        let bearer = self.bearer()?;
        let url = self.action_url(action);
        tracing::debug!(%method, %url, "sending wiki api request");

        let request = self
            .client
            .request(method, url)
            .header(AUTHORIZATION, bearer)
            .json(body);
        self.execute(request).await
    }

    /// All articles, newest first.
    ///
    /// The listing is public; the session token is attached when there is one.
    pub async fn articles(&self) -> Result<Vec<Article>, ApiError> {
        let url = self.action_url(Action::Articles);
        tracing::debug!(%url, "listing articles");

        let mut request = self.client.get(url);
        if let Some(token) = self.session.session_token() {
            request = request.header(AUTHORIZATION, token.bearer());
        }
        let (status, body) = self.execute(request).await?;
        api::interpret_articles_response(status, &body)
    }

    /// Look one article up in the listing; the API has no single-article read.
    pub async fn article(&self, id: i64) -> Result<Article, ApiError> {
        self.articles()
            .await?
            .into_iter()
            .find(|article| article.id == id)
            .ok_or(ApiError::ArticleNotFound(id))
    }

    pub async fn delete_article(&self, id: i64) -> Result<(), ApiError> {
        let bearer = self.bearer()?;
        let url = self.article_url(id);
        tracing::debug!(%url, "deleting article");

        let request = self.client.delete(url).header(AUTHORIZATION, bearer);
        let (status, body) = self.execute(request).await?;
        api::check_status(status, &body)?;
        tracing::info!(id, "article deleted");
        Ok(())
    }

    /// Create (no id) or update (with id) an article.
    pub async fn save_article(&self, article: &ArticlePayload) -> Result<(), ApiError> {
        let method = save_method(article);
        let (status, body) = self.send_json(method, Action::Articles, article).await?;
        api::check_status(status, &body)?;
        tracing::info!(id = ?article.id, title = %article.title, "article saved");
        Ok(())
    }
}

/// `POST` for new articles, `PUT` for existing ones.
pub fn save_method(article: &ArticlePayload) -> Method {
    if article.id.is_some() {
        Method::PUT
    } else {
        Method::POST
    }
}

impl ImageHost for WikiClient {
    async fn upload_image(&self, file: &ImageFile) -> Result<UploadedImage, UploadError> {
        let request = file.to_request();
        let (status, body) = self
            .send_json(Method::POST, Action::UploadImage, &request)
            .await?;
        let url = api::interpret_upload_response(status, &body)?;
        tracing::info!(filename = %file.name, %url, "image uploaded");
        Ok(UploadedImage {
            url,
            filename: file.name.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::StaticSession;

    fn client(endpoint: &str) -> WikiClient {
        WikiClient::new(endpoint, Arc::new(StaticSession::new("tok"))).unwrap()
    }

    #[test]
    fn test_action_url() {
        let c = client("https://functions.example.com/wiki-api");
        assert_eq!(
            c.action_url(Action::UploadImage).as_str(),
            "https://functions.example.com/wiki-api?action=upload_image"
        );
    }

    #[test]
    fn test_action_url_replaces_existing_action() {
        let c = client("https://functions.example.com/wiki-api?key=1&action=users");
        assert_eq!(
            c.action_url(Action::Articles).as_str(),
            "https://functions.example.com/wiki-api?key=1&action=articles"
        );
    }

    #[test]
    fn test_article_url_keeps_endpoint_params() {
        let c = client("https://functions.example.com/wiki-api?key=1");
        assert_eq!(
            c.article_url(42).as_str(),
            "https://functions.example.com/wiki-api?key=1&action=articles&id=42"
        );
    }

    #[test]
    fn test_invalid_endpoint() {
        let err = WikiClient::new("not a url", Arc::new(StaticSession::anonymous()))
            .err()
            .unwrap();
        assert!(matches!(err, ApiError::Endpoint(_)));
    }

    #[test]
    fn test_save_method() {
        let mut article = ArticlePayload {
            id: None,
            title: "t".into(),
            description: "d".into(),
            content: "c".into(),
            category_id: 1,
            preview_image: None,
        };
        assert_eq!(save_method(&article), Method::POST);
        article.id = Some(9);
        assert_eq!(save_method(&article), Method::PUT);
    }

    #[tokio::test]
    async fn test_upload_without_session_fails_before_network() {
        // Port 9 (discard) is never contacted: the session check comes first.
        let c = WikiClient::new("http://127.0.0.1:9/api", Arc::new(StaticSession::anonymous()))
            .unwrap();
        let file = ImageFile::new("a.png", b"x".to_vec());
        let err = c.upload_image(&file).await.unwrap_err();
        assert!(matches!(err, UploadError::Api(ApiError::MissingSession)));
    }

    #[tokio::test]
    async fn test_delete_without_session_fails_before_network() {
        let c = WikiClient::new("http://127.0.0.1:9/api", Arc::new(StaticSession::anonymous()))
            .unwrap();
        let err = c.delete_article(4).await.unwrap_err();
        assert!(matches!(err, ApiError::MissingSession));
    }
}
