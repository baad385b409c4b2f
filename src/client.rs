//! Mailpit async client implementation.

use crate::models::{
    ChaosTriggers, Configuration, DeleteRequest, HtmlCheck, Info, LinkCheck, Message,
    MessageHeaders, MessagesSummary, ReadStatusRequest, ReleaseRequest, RenameTagRequest,
    SearchDeleteRequest, SearchRequest, SendConfirmation, SendRequest, SetTagsRequest,
    SpamAssassinCheck,
};
use crate::{Error, Result};
use reqwest::{Method, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use std::fmt;
use std::time::Duration;
use tracing::{debug, warn};

/// Message ID Mailpit resolves to the most recently received message.
pub const LATEST: &str = "latest";

/// Default page size for [`Client::list_messages`].
pub const DEFAULT_LIMIT: u64 = 50;

const USER_AGENT_VALUE: &str = concat!("mailpit-client/", env!("CARGO_PKG_VERSION"));

/// Whether a response status counts as success. Only `200 OK` does.
pub fn is_success(status: StatusCode) -> bool {
    status == StatusCode::OK
}

/// Async client for the Mailpit API.
///
/// Use [`Client::new`] for an unauthenticated client or [`Client::builder`]
/// for credentials, proxies, TLS behavior and timeouts. Cloning is cheap and
/// clones share the underlying connection pool.
#[derive(Clone)]
pub struct Client {
    http: reqwest::Client,
    base_url: String,
    credentials: Option<(String, String)>,
    proxy: Option<String>,
}

impl fmt::Debug for Client {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Client")
            .field("base_url", &self.base_url)
            .field("username", &self.credentials.as_ref().map(|(user, _)| user))
            .field("proxy", &self.proxy)
            .finish()
    }
}

impl Client {
    /// Create a builder for a Mailpit server at `base_url`.
    pub fn builder(base_url: impl Into<String>) -> ClientBuilder {
        ClientBuilder::new(base_url)
    }

    /// Create a client for the Mailpit server at `base_url` without authentication.
    ///
    /// No request is made until the first operation is called.
    ///
    /// # Examples
    /// ```no_run
    /// # use mailpit_client::Client;
    /// # #[tokio::main]
    /// # async fn main() -> Result<(), mailpit_client::Error> {
    /// let client = Client::new("http://localhost:8025")?;
    /// let info = client.get_info().await?;
    /// println!("Mailpit {} holds {} messages", info.version, info.messages);
    /// # Ok(())
    /// # }
    /// ```
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        ClientBuilder::new(base_url).build()
    }

    /// Base URL every request path is appended to, without a trailing slash.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Get the proxy URL if one was configured.
    pub fn proxy(&self) -> Option<&str> {
        self.proxy.as_deref()
    }

    /// Whether requests carry HTTP basic authentication.
    pub fn has_credentials(&self) -> bool {
        self.credentials.is_some()
    }

    /// Get server version, database and runtime statistics.
    pub async fn get_info(&self) -> Result<Info> {
        self.json(self.request(Method::GET, "/api/v1/info")).await
    }

    /// Get the web UI configuration, including relay settings.
    pub async fn get_configuration(&self) -> Result<Configuration> {
        self.json(self.request(Method::GET, "/api/v1/webui")).await
    }

    /// Fetch a message in full detail.
    ///
    /// # Arguments
    /// * `id` - The message ID, or `None` for the latest message
    ///
    /// # Examples
    /// ```no_run
    /// # use mailpit_client::Client;
    /// # #[tokio::main]
    /// # async fn main() -> Result<(), mailpit_client::Error> {
    /// let client = Client::new("http://localhost:8025")?;
    /// let message = client.get_message(None).await?;
    /// println!("{}: {}", message.id, message.subject);
    /// # Ok(())
    /// # }
    /// ```
    pub async fn get_message(&self, id: Option<&str>) -> Result<Message> {
        let path = format!("/api/v1/message/{}", id.unwrap_or(LATEST));
        self.json(self.request(Method::GET, &path)).await
    }

    /// Fetch the headers of a message, or of the latest message when `id` is `None`.
    pub async fn get_message_headers(&self, id: Option<&str>) -> Result<MessageHeaders> {
        let path = format!("/api/v1/message/{}/headers", id.unwrap_or(LATEST));
        self.json(self.request(Method::GET, &path)).await
    }

    /// Download the raw content of a message part.
    ///
    /// # Arguments
    /// * `id` - The message ID
    /// * `part_id` - The part ID from [`Attachment::part_id`](crate::Attachment::part_id)
    pub async fn get_message_attachment(&self, id: &str, part_id: &str) -> Result<Vec<u8>> {
        let path = format!("/api/v1/message/{id}/part/{part_id}");
        self.bytes(self.request(Method::GET, &path)).await
    }

    /// Fetch the raw RFC 822 source of a message.
    pub async fn get_message_source(&self, id: Option<&str>) -> Result<String> {
        let path = format!("/api/v1/message/{}/raw", id.unwrap_or(LATEST));
        self.text(self.request(Method::GET, &path)).await
    }

    /// Download a thumbnail of an image attachment.
    pub async fn get_attachment_thumbnail(&self, id: &str, part_id: &str) -> Result<Vec<u8>> {
        let path = format!("/api/v1/message/{id}/part/{part_id}/thumb");
        self.bytes(self.request(Method::GET, &path)).await
    }

    /// Relay a stored message to the given recipients through the configured SMTP relay.
    pub async fn release_message(&self, id: &str, release: &ReleaseRequest) -> Result<String> {
        let path = format!("/api/v1/message/{id}/release");
        self.text(self.request(Method::POST, &path).json(release)).await
    }

    /// Store a new message in Mailpit.
    ///
    /// # Returns
    /// The database ID of the stored message
    ///
    /// # Examples
    /// ```no_run
    /// # use mailpit_client::{Client, Contact, SendRequest};
    /// # #[tokio::main]
    /// # async fn main() -> Result<(), mailpit_client::Error> {
    /// let client = Client::new("http://localhost:8025")?;
    /// let sent = client
    ///     .send_message(&SendRequest {
    ///         from: Contact::new("sender@example.com"),
    ///         to: vec![Contact::with_name("user@example.com", "User")],
    ///         subject: "Welcome".into(),
    ///         text: "Hello!".into(),
    ///         ..SendRequest::default()
    ///     })
    ///     .await?;
    /// println!("{}", sent.id);
    /// # Ok(())
    /// # }
    /// ```
    pub async fn send_message(&self, message: &SendRequest) -> Result<SendConfirmation> {
        self.json(self.request(Method::POST, "/api/v1/send").json(message)).await
    }

    /// Check a message's HTML against popular email clients.
    pub async fn html_check(&self, id: Option<&str>) -> Result<HtmlCheck> {
        let path = format!("/api/v1/message/{}/html-check", id.unwrap_or(LATEST));
        self.json(self.request(Method::GET, &path)).await
    }

    /// Check the status of every link in a message.
    ///
    /// # Arguments
    /// * `id` - The message ID, or `None` for the latest message
    /// * `follow` - Follow redirects; defaults to `false`
    pub async fn link_check(&self, id: Option<&str>, follow: Option<bool>) -> Result<LinkCheck> {
        let path = format!("/api/v1/message/{}/link-check", id.unwrap_or(LATEST));
        let follow = follow.unwrap_or(false);
        self.json(self.request(Method::GET, &path).query(&[("follow", follow)])).await
    }

    /// Score a message with SpamAssassin. Requires SpamAssassin to be enabled on the server.
    pub async fn spam_assassin_check(&self, id: Option<&str>) -> Result<SpamAssassinCheck> {
        let path = format!("/api/v1/message/{}/sa-check", id.unwrap_or(LATEST));
        self.json(self.request(Method::GET, &path)).await
    }

    /// List messages, newest first.
    ///
    /// # Arguments
    /// * `start` - Offset of the first message; defaults to 0
    /// * `limit` - Page size; defaults to [`DEFAULT_LIMIT`]
    ///
    /// # Examples
    /// ```no_run
    /// # use mailpit_client::Client;
    /// # #[tokio::main]
    /// # async fn main() -> Result<(), mailpit_client::Error> {
    /// let client = Client::new("http://localhost:8025")?;
    /// let page = client.list_messages(None, None).await?;
    /// for msg in page.messages {
    ///     println!("{}: {}", msg.id, msg.subject);
    /// }
    /// # Ok(())
    /// # }
    /// ```
    pub async fn list_messages(
        &self,
        start: Option<u64>,
        limit: Option<u64>,
    ) -> Result<MessagesSummary> {
        let params = [
            ("start", start.unwrap_or(0)),
            ("limit", limit.unwrap_or(DEFAULT_LIMIT)),
        ];
        self.json(self.request(Method::GET, "/api/v1/messages").query(&params)).await
    }

    /// Mark messages as read or unread.
    pub async fn set_read_status(&self, status: &ReadStatusRequest) -> Result<String> {
        self.text(self.request(Method::PUT, "/api/v1/messages").json(status)).await
    }

    /// Delete messages by ID. Passing `None` sends no body, which deletes every message.
    pub async fn delete_messages(&self, delete: Option<&DeleteRequest>) -> Result<String> {
        let mut request = self.request(Method::DELETE, "/api/v1/messages");
        if let Some(delete) = delete {
            request = request.json(delete);
        }
        self.text(request).await
    }

    /// Search messages with Mailpit's search-filter syntax.
    ///
    /// See <https://mailpit.axllent.org/docs/usage/search-filters/>.
    pub async fn search_messages(&self, search: &SearchRequest) -> Result<MessagesSummary> {
        self.json(self.request(Method::GET, "/api/v1/search").query(search)).await
    }

    /// Delete every message matching a search.
    pub async fn delete_messages_by_search(&self, search: &SearchDeleteRequest) -> Result<String> {
        self.text(self.request(Method::DELETE, "/api/v1/search").query(search)).await
    }

    /// List all tags in use.
    pub async fn get_tags(&self) -> Result<Vec<String>> {
        self.json(self.request(Method::GET, "/api/v1/tags")).await
    }

    /// Replace the tags of the given messages.
    pub async fn set_tags(&self, tags: &SetTagsRequest) -> Result<String> {
        self.text(self.request(Method::PUT, "/api/v1/tags").json(tags)).await
    }

    /// Rename a tag on every message carrying it.
    pub async fn rename_tag(&self, tag: &str, new_name: &str) -> Result<String> {
        let path = format!("/api/v1/tags/{}", urlencoding::encode(tag));
        let body = RenameTagRequest { name: new_name };
        self.text(self.request(Method::PUT, &path).json(&body)).await
    }

    /// Remove a tag from every message.
    pub async fn delete_tag(&self, tag: &str) -> Result<String> {
        let path = format!("/api/v1/tags/{}", urlencoding::encode(tag));
        self.text(self.request(Method::DELETE, &path)).await
    }

    /// Render a message's HTML part as Mailpit's web UI shows it.
    pub async fn render_message_html(&self, id: Option<&str>) -> Result<String> {
        let path = format!("/view/{}.html", id.unwrap_or(LATEST));
        self.text(self.request(Method::GET, &path)).await
    }

    /// Render a message's text part.
    pub async fn render_message_text(&self, id: Option<&str>) -> Result<String> {
        let path = format!("/view/{}.txt", id.unwrap_or(LATEST));
        self.text(self.request(Method::GET, &path)).await
    }

    /// Get the current SMTP chaos triggers.
    pub async fn get_chaos_triggers(&self) -> Result<ChaosTriggers> {
        self.json(self.request(Method::GET, "/api/v1/chaos")).await
    }

    /// Replace the SMTP chaos triggers.
    ///
    /// Triggers left as `None` are disabled; passing `None` disables all of them.
    /// Chaos must be enabled on the server with `--enable-chaos`.
    pub async fn set_chaos_triggers(
        &self,
        triggers: Option<&ChaosTriggers>,
    ) -> Result<ChaosTriggers> {
        let default = ChaosTriggers::default();
        let triggers = triggers.unwrap_or(&default);
        self.json(self.request(Method::PUT, "/api/v1/chaos").json(triggers)).await
    }

    /// Start a request to `path`, carrying basic auth when configured.
    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let builder = self.http.request(method, format!("{}{}", self.base_url, path));

        match &self.credentials {
            Some((username, password)) => builder.basic_auth(username, Some(password)),
            None => builder,
        }
    }

    /// Send a request and reject every status but `200 OK`.
    async fn send(&self, request: RequestBuilder) -> Result<Response> {
        let request = request.build()?;
        let method = request.method().clone();
        let path = request.url().path().to_string();

        debug!(%method, %path, "sending Mailpit request");
        let response = self.http.execute(request).await?;
        let status = response.status();

        if is_success(status) {
            debug!(%method, %path, status = status.as_u16(), "Mailpit request succeeded");
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        warn!(%method, %path, status = status.as_u16(), "Mailpit rejected request");
        Err(Error::api(status, &body))
    }

    async fn json<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T> {
        let body = self.send(request).await?.bytes().await?;
        serde_json::from_slice(&body)
            .map_err(|e| Error::Unexpected(format!("failed to decode response body: {e}")))
    }

    async fn text(&self, request: RequestBuilder) -> Result<String> {
        Ok(self.send(request).await?.text().await?)
    }

    async fn bytes(&self, request: RequestBuilder) -> Result<Vec<u8>> {
        Ok(self.send(request).await?.bytes().await?.to_vec())
    }
}

/// Builder for configuring a Mailpit client.
///
/// Start with [`Client::builder`] to override defaults.
#[derive(Clone)]
pub struct ClientBuilder {
    base_url: String,
    username: Option<String>,
    password: Option<String>,
    proxy: Option<String>,
    danger_accept_invalid_certs: bool,
    user_agent: String,
    timeout: Option<Duration>,
}

impl fmt::Debug for ClientBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientBuilder")
            .field("base_url", &self.base_url)
            .field("username", &self.username)
            .field("password", &self.password.as_ref().map(|_| "<redacted>"))
            .field("proxy", &self.proxy)
            .field("danger_accept_invalid_certs", &self.danger_accept_invalid_certs)
            .field("user_agent", &self.user_agent)
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl ClientBuilder {
    /// Create a new builder for the server at `base_url`.
    ///
    /// Defaults:
    /// - No credentials
    /// - No proxy
    /// - `danger_accept_invalid_certs = false`
    /// - `mailpit-client/<version>` user agent
    /// - No timeout beyond reqwest's own
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            username: None,
            password: None,
            proxy: None,
            danger_accept_invalid_certs: false,
            user_agent: USER_AGENT_VALUE.to_string(),
            timeout: None,
        }
    }

    /// Set the basic-auth username. Only used together with [`password`](Self::password).
    pub fn username(mut self, username: impl Into<String>) -> Self {
        self.username = Some(username.into());
        self
    }

    /// Set the basic-auth password. Only used together with [`username`](Self::username).
    pub fn password(mut self, password: impl Into<String>) -> Self {
        self.password = Some(password.into());
        self
    }

    /// Set a proxy URL (e.g., "http://127.0.0.1:8080" or "socks5://127.0.0.1:1080").
    pub fn proxy(mut self, proxy: impl Into<String>) -> Self {
        self.proxy = Some(proxy.into());
        self
    }

    /// Control whether to accept invalid TLS certificates (default: false).
    ///
    /// Handy for Mailpit instances serving a self-signed certificate.
    pub fn danger_accept_invalid_certs(mut self, value: bool) -> Self {
        self.danger_accept_invalid_certs = value;
        self
    }

    /// Override the default user agent string.
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Set a total timeout for each request.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Build the client.
    ///
    /// Validates the base URL but makes no network request. Basic auth is only
    /// enabled when both a username and a password were given; a lone
    /// username or password is ignored.
    ///
    /// # Examples
    /// ```no_run
    /// # use mailpit_client::Client;
    /// # fn main() -> Result<(), mailpit_client::Error> {
    /// let client = Client::builder("https://mailpit.internal:8025")
    ///     .username("admin")
    ///     .password("secret")
    ///     .build()?;
    /// assert!(client.has_credentials());
    /// # Ok(())
    /// # }
    /// ```
    pub fn build(self) -> Result<Client> {
        let base_url = self.base_url.trim_end_matches('/').to_string();
        reqwest::Url::parse(&base_url)
            .map_err(|e| Error::Request(format!("invalid base URL {base_url:?}: {e}")))?;

        let mut builder = reqwest::Client::builder()
            .danger_accept_invalid_certs(self.danger_accept_invalid_certs)
            .user_agent(self.user_agent);

        if let Some(proxy_url) = &self.proxy {
            builder = builder.proxy(reqwest::Proxy::all(proxy_url)?);
        }

        if let Some(timeout) = self.timeout {
            builder = builder.timeout(timeout);
        }

        let http = builder.build()?;

        let credentials = match (self.username, self.password) {
            (Some(username), Some(password)) if !username.is_empty() && !password.is_empty() => {
                Some((username, password))
            }
            (None, None) => None,
            _ => {
                warn!("ignoring partial Mailpit credentials: both username and password are required");
                None
            }
        };

        Ok(Client {
            http,
            base_url,
            credentials,
            proxy: self.proxy,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_200_is_success() {
        assert!(is_success(StatusCode::OK));
        assert!(!is_success(StatusCode::CREATED));
        assert!(!is_success(StatusCode::NO_CONTENT));
        assert!(!is_success(StatusCode::NOT_FOUND));
        assert!(!is_success(StatusCode::INTERNAL_SERVER_ERROR));
    }

    #[test]
    fn build_strips_trailing_slash() {
        let client = Client::new("http://localhost:8025/").unwrap();
        assert_eq!(client.base_url(), "http://localhost:8025");
        assert!(!client.has_credentials());
    }

    #[test]
    fn build_rejects_invalid_base_url() {
        let err = Client::new("not a url").unwrap_err();
        assert!(matches!(err, Error::Request(_)));
    }

    #[test]
    fn partial_credentials_are_ignored() {
        let only_user = Client::builder("http://localhost:8025")
            .username("admin")
            .build()
            .unwrap();
        assert!(!only_user.has_credentials());

        let only_password = Client::builder("http://localhost:8025")
            .password("secret")
            .build()
            .unwrap();
        assert!(!only_password.has_credentials());

        let both = Client::builder("http://localhost:8025")
            .username("admin")
            .password("secret")
            .build()
            .unwrap();
        assert!(both.has_credentials());
    }

    #[test]
    fn debug_output_hides_password() {
        let builder = Client::builder("http://localhost:8025")
            .username("admin")
            .password("secret");
        assert!(!format!("{builder:?}").contains("secret"));

        let client = builder.build().unwrap();
        assert!(!format!("{client:?}").contains("secret"));
    }
}
