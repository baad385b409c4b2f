//! Request and response shapes mirroring Mailpit's JSON schema.
//!
//! Mailpit uses PascalCase keys. Sequences are ordinary `Vec`s that may be
//! empty, and every field the server may leave out decodes to its default.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Runtime, version and statistics snapshot from `GET /api/v1/info`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct Info {
    /// Database path.
    pub database: String,
    /// Database size in bytes.
    pub database_size: u64,
    /// Latest Mailpit release, if the server checked.
    pub latest_version: String,
    /// Total number of stored messages.
    pub messages: u64,
    pub runtime_stats: RuntimeStats,
    /// Message count per tag.
    pub tags: HashMap<String, u64>,
    /// Number of unread messages.
    pub unread: u64,
    /// Running Mailpit version.
    pub version: String,
}

/// Process counters reported inside [`Info`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct RuntimeStats {
    pub memory: u64,
    pub messages_deleted: u64,
    #[serde(rename = "SMTPAccepted")]
    pub smtp_accepted: u64,
    #[serde(rename = "SMTPAcceptedSize")]
    pub smtp_accepted_size: u64,
    #[serde(rename = "SMTPIgnored")]
    pub smtp_ignored: u64,
    #[serde(rename = "SMTPRejected")]
    pub smtp_rejected: u64,
    /// Seconds since the server started.
    pub uptime: u64,
}

/// Web UI configuration from `GET /api/v1/webui`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct Configuration {
    /// Whether duplicate Message-IDs are ignored.
    pub duplicates_ignored: bool,
    /// Optional UI label.
    pub label: String,
    /// Whether SpamAssassin integration is enabled.
    pub spam_assassin: bool,
    pub message_relay: MessageRelay,
}

/// SMTP relay settings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct MessageRelay {
    /// Regular expression restricting relay recipients.
    pub allowed_recipients: String,
    pub enabled: bool,
    /// Overridden Return-Path, if any.
    pub return_path: String,
    #[serde(rename = "SMTPServer")]
    pub smtp_server: String,
}

/// A name and address pair on a received message.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct Address {
    pub address: String,
    pub name: String,
}

/// Metadata for an attachment or inline part.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct Attachment {
    #[serde(rename = "ContentID")]
    pub content_id: String,
    pub content_type: String,
    pub file_name: String,
    /// Part identifier used by the attachment and thumbnail endpoints.
    #[serde(rename = "PartID")]
    pub part_id: String,
    /// Size in bytes.
    pub size: u64,
}

/// One stored message in full detail, from `GET /api/v1/message/{id}`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct Message {
    pub attachments: Vec<Attachment>,
    pub bcc: Vec<Address>,
    pub cc: Vec<Address>,
    /// RFC 3339 timestamp of the message's Date header.
    pub date: String,
    pub from: Option<Address>,
    #[serde(rename = "HTML")]
    pub html: String,
    /// Mailpit's database ID, unique on the server.
    #[serde(rename = "ID")]
    pub id: String,
    pub inline: Vec<Attachment>,
    /// The Message-ID header.
    #[serde(rename = "MessageID")]
    pub message_id: String,
    pub reply_to: Vec<Address>,
    pub return_path: String,
    pub size: u64,
    pub subject: String,
    pub tags: Vec<String>,
    pub text: String,
    pub to: Vec<Address>,
}

/// A lightweight message entry in a listing or search page.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct MessageSummary {
    /// Number of attachments.
    pub attachments: u64,
    pub size: u64,
    pub snippet: String,
    pub subject: String,
    pub tags: Vec<String>,
    #[serde(rename = "ID")]
    pub id: String,
    #[serde(rename = "MessageID")]
    pub message_id: String,
    pub read: bool,
    /// RFC 3339 timestamp of when Mailpit received the message.
    pub created: String,
    pub bcc: Vec<Address>,
    pub cc: Vec<Address>,
    pub from: Option<Address>,
    pub reply_to: Vec<Address>,
    pub to: Vec<Address>,
}

/// One page of messages, returned by listing and search.
///
/// The server guarantees `start + messages.len() <= total`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MessagesSummary {
    pub messages: Vec<MessageSummary>,
    /// Number of messages matching the listing or search.
    pub messages_count: u64,
    /// Offset of the first message in this page.
    pub start: u64,
    /// All tags currently in use.
    pub tags: Vec<String>,
    /// Total number of stored messages.
    pub total: u64,
    pub unread: u64,
}

/// Message headers keyed by name; a header may repeat.
pub type MessageHeaders = HashMap<String, Vec<String>>;

/// A name and email pair for outgoing mail.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct Contact {
    pub email: String,
    pub name: String,
}

impl Contact {
    pub fn new(email: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            name: String::new(),
        }
    }

    pub fn with_name(email: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            name: name.into(),
        }
    }
}

/// A file attached to a [`SendRequest`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct SendAttachment {
    /// Base64-encoded file content. Encoding is up to the caller.
    pub content: String,
    pub filename: String,
}

/// Body of `POST /api/v1/send`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct SendRequest {
    pub attachments: Vec<SendAttachment>,
    /// Bare Bcc addresses.
    pub bcc: Vec<String>,
    pub cc: Vec<Contact>,
    pub from: Contact,
    #[serde(rename = "HTML")]
    pub html: String,
    pub headers: HashMap<String, String>,
    pub reply_to: Vec<Contact>,
    pub subject: String,
    pub tags: Vec<String>,
    pub text: String,
    pub to: Vec<Contact>,
}

/// Response to a successful send.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SendConfirmation {
    /// Database ID of the stored message.
    #[serde(rename = "ID")]
    pub id: String,
}

/// Body of `POST /api/v1/message/{id}/release`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ReleaseRequest {
    /// Recipients to relay the message to.
    pub to: Vec<String>,
}

/// HTML compatibility report from `GET /api/v1/message/{id}/html-check`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct HtmlCheck {
    /// Tested client versions, keyed by platform.
    pub platforms: HashMap<String, Vec<String>>,
    pub total: HtmlCheckTotal,
    pub warnings: Vec<HtmlCheckWarning>,
}

/// Aggregate totals of an [`HtmlCheck`]. Percentages are floats.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct HtmlCheckTotal {
    pub nodes: u64,
    pub partial: f64,
    pub supported: f64,
    pub tests: u64,
    pub unsupported: f64,
}

/// Category of an HTML check warning.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WarningCategory {
    Css,
    #[default]
    Html,
}

/// Support level of a feature in one email client.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Support {
    Yes,
    #[default]
    No,
    Partial,
}

/// One unsupported or partially supported feature.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct HtmlCheckWarning {
    pub category: WarningCategory,
    pub description: String,
    pub keywords: String,
    pub notes_by_number: HashMap<String, String>,
    pub results: Vec<HtmlCheckResult>,
    pub score: HtmlCheckScore,
    pub slug: String,
    pub tags: Vec<String>,
    pub title: String,
    #[serde(rename = "URL")]
    pub url: String,
}

/// Support of a feature in one client version.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct HtmlCheckResult {
    pub family: String,
    pub name: String,
    pub note_number: String,
    pub platform: String,
    pub support: Support,
    pub version: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct HtmlCheckScore {
    pub found: u64,
    pub partial: f64,
    pub supported: f64,
    pub unsupported: f64,
}

/// Link report from `GET /api/v1/message/{id}/link-check`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct LinkCheck {
    /// Number of failing links.
    pub errors: u64,
    pub links: Vec<Link>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct Link {
    pub status: String,
    pub status_code: u16,
    #[serde(rename = "URL")]
    pub url: String,
}

/// SpamAssassin report from `GET /api/v1/message/{id}/sa-check`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct SpamAssassinCheck {
    pub errors: u64,
    pub is_spam: bool,
    pub rules: Vec<SpamRule>,
    pub score: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct SpamRule {
    pub description: String,
    pub name: String,
    pub score: f64,
}

/// Body of `PUT /api/v1/messages`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ReadStatusRequest {
    #[serde(rename = "IDs")]
    pub ids: Vec<String>,
    pub read: bool,
}

/// Body of `DELETE /api/v1/messages`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeleteRequest {
    #[serde(rename = "IDs")]
    pub ids: Vec<String>,
}

/// Query string of `GET /api/v1/search`.
///
/// `query` uses Mailpit's search-filter syntax and is passed through untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchRequest {
    pub query: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u64>,
    /// Timezone name used for date filters, e.g. `Europe/Berlin`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tz: Option<String>,
}

impl SearchRequest {
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            ..Self::default()
        }
    }
}

/// Query string of `DELETE /api/v1/search`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchDeleteRequest {
    pub query: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tz: Option<String>,
}

impl SearchDeleteRequest {
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            tz: None,
        }
    }
}

/// Body of `PUT /api/v1/tags`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct SetTagsRequest {
    #[serde(rename = "IDs")]
    pub ids: Vec<String>,
    /// Replaces the messages' tags; an empty list removes them all.
    pub tags: Vec<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
pub(crate) struct RenameTagRequest<'a> {
    pub name: &'a str,
}

/// SMTP fault-injection settings. A `None` trigger is disabled.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct ChaosTriggers {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub authentication: Option<ChaosTrigger>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recipient: Option<ChaosTrigger>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sender: Option<ChaosTrigger>,
}

/// One chaos trigger: the SMTP code to answer with and how often, in percent.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ChaosTrigger {
    pub error_code: u16,
    pub probability: u8,
}
