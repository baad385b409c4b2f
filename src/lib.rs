//! # Mailpit Client
//! Asynchronous, typed wrapper around the [Mailpit](https://mailpit.axllent.org/) email testing HTTP API, with one method per endpoint on [`Client`], configured through [`ClientBuilder`].
//!
//! ## Audience and uses
//! For Rust developers running Mailpit in integration tests or CI: send or capture mail, then inspect messages ([`Message`], [`MessagesSummary`]), search, tag, run HTML/link/spam checks, and drive SMTP chaos triggers ([`ChaosTriggers`]).
//!
//! ## Runtime requirements
//! Async-only; run inside a Tokio (v1) runtime. HTTP calls use `reqwest`. Request logs are emitted through `tracing` at `debug` level; install a subscriber to see them.
//!
//! ## Out of scope
//! No retries, caching, or rate limiting. Every call makes exactly one request and fails immediately on error. Timeouts are whatever the underlying `reqwest` client uses unless set with [`ClientBuilder::timeout`].
//!
//! ## Errors
//! Only `200 OK` counts as success. Any other status becomes [`Error::Api`] with the status and response body; a request that never got an answer becomes [`Error::NoResponse`]; a request that could not be built becomes [`Error::Request`]; anything else, such as an undecodable body, becomes [`Error::Unexpected`].
//!
//! ## Example
//! ```no_run
//! use mailpit_client::{Client, SearchRequest};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), mailpit_client::Error> {
//!     let client = Client::new("http://localhost:8025")?;
//!
//!     let page = client.search_messages(&SearchRequest::new("subject:welcome")).await?;
//!     for msg in &page.messages {
//!         println!("{}: {}", msg.id, msg.subject);
//!     }
//!
//!     let latest = client.get_message(None).await?;
//!     println!("Latest: {}", latest.subject);
//!
//!     client.delete_messages(None).await?;
//!     Ok(())
//! }
//! ```

mod client;
mod error;
mod models;

pub use client::{Client, ClientBuilder, DEFAULT_LIMIT, LATEST, is_success};
pub use error::Error;
pub use models::{
    Address, Attachment, ChaosTrigger, ChaosTriggers, Configuration, Contact, DeleteRequest,
    HtmlCheck, HtmlCheckResult, HtmlCheckScore, HtmlCheckTotal, HtmlCheckWarning, Info, Link,
    LinkCheck, Message, MessageHeaders, MessageRelay, MessageSummary, MessagesSummary,
    ReadStatusRequest, ReleaseRequest, RuntimeStats, SearchDeleteRequest, SearchRequest,
    SendAttachment, SendConfirmation, SendRequest, SetTagsRequest, SpamAssassinCheck, SpamRule,
    Support, WarningCategory,
};

/// Result type alias for Mailpit operations.
///
/// This is equivalent to `std::result::Result<T, Error>`.
pub type Result<T> = std::result::Result<T, Error>;
