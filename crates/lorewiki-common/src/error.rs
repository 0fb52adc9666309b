//! Error types shared by the wiki client, uploader and configuration layer.

use miette::Diagnostic;

/// Main error type for lorewiki operations outside the editor itself.
#[derive(thiserror::Error, Debug, Diagnostic)]
pub enum LorewikiError {
    /// Configuration could not be loaded or saved
    #[error(transparent)]
    #[diagnostic_source]
    Config(#[from] ConfigError),

    /// Remote API call failed
    #[error(transparent)]
    #[diagnostic_source]
    Api(#[from] ApiError),

    /// Image upload failed
    #[error(transparent)]
    #[diagnostic_source]
    Upload(#[from] UploadError),

    /// IO error
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Failure talking to the remote wiki API.
#[derive(thiserror::Error, Debug, Diagnostic)]
#[non_exhaustive]
pub enum ApiError {
    /// No bearer token could be obtained from the session provider.
    #[error("no admin session is available")]
    #[diagnostic(
        code(lorewiki::api::session),
        help("log in through the admin panel or set LOREWIKI_TOKEN")
    )]
    MissingSession,

    /// The request never produced a response (DNS, TLS, timeout, ...).
    #[error("request to the wiki api failed")]
    #[diagnostic(code(lorewiki::api::transport))]
    Transport(#[from] reqwest::Error),

    /// The API answered with a non-2xx status.
    #[error("wiki api answered {status}: {message}")]
    #[diagnostic(code(lorewiki::api::status))]
    Status { status: u16, message: String },

    /// The response body was not the JSON we expected.
    #[error("wiki api response could not be decoded")]
    #[diagnostic(code(lorewiki::api::body))]
    Body(#[source] serde_json::Error),

    /// The listing has no article with this id.
    #[error("article {0} does not exist")]
    #[diagnostic(code(lorewiki::api::not_found))]
    ArticleNotFound(i64),

    /// The configured endpoint is not a usable URL.
    #[error("invalid api endpoint `{0}`")]
    #[diagnostic(code(lorewiki::api::endpoint))]
    Endpoint(String),
}

/// Failure of the image upload round trip.
///
/// Any of these leaves the content buffer untouched; the upload is not retried.
#[derive(thiserror::Error, Debug, Diagnostic)]
#[non_exhaustive]
pub enum UploadError {
    #[error(transparent)]
    #[diagnostic_source]
    Api(#[from] ApiError),

    /// The host accepted the request but returned no `url`.
    #[error("image host response did not include a url")]
    #[diagnostic(code(lorewiki::upload::missing_url))]
    MissingUrl,

    /// The local file could not be read.
    #[error("could not read image file `{path}`")]
    #[diagnostic(code(lorewiki::upload::read))]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

impl UploadError {
    /// Message suitable for a blocking notification to the author.
    pub fn user_message(&self) -> &'static str {
        "Failed to upload the image"
    }
}

/// Configuration load/save errors.
#[derive(thiserror::Error, Debug, Diagnostic)]
#[non_exhaustive]
pub enum ConfigError {
    #[error("unsupported config format for `{0}` (expected .toml or .json)")]
    #[diagnostic(code(lorewiki::config::format))]
    UnsupportedFormat(String),

    #[error("could not access config file")]
    #[diagnostic(code(lorewiki::config::io))]
    Io(#[from] std::io::Error),

    #[error("invalid toml config")]
    #[diagnostic(code(lorewiki::config::toml))]
    TomlDe(#[from] toml::de::Error),

    #[error("could not serialize config as toml")]
    #[diagnostic(code(lorewiki::config::toml))]
    TomlSer(#[from] toml::ser::Error),

    #[error("invalid json config")]
    #[diagnostic(code(lorewiki::config::json))]
    Json(#[from] serde_json::Error),
}
