//! Encoding registry: maps MIME content types to Thrift wire protocols.
//!
//! Three protocols are recognised, each bound to exactly one MIME type (see
//! `spec.md` §4.1). Content negotiation is driven entirely by this table;
//! nothing elsewhere in the crate knows the MIME strings.

/// A Thrift wire protocol selectable via HTTP content negotiation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum Protocol {
    /// `TBinaryProtocol`.
    Binary,
    /// `TCompactProtocol`.
    #[default]
    Compact,
    /// `TJsonProtocol`.
    Json,
}

/// Default protocol used when `Content-Type` is absent or unrecognised.
///
/// Compact is chosen (over JSON) because it is also the protocol used to
/// encode error replies for requests that never carried a usable
/// `Content-Type` at all; see `spec.md` §4.1 and §9 (Open Question a).
pub const DEFAULT_PROTOCOL: Protocol = Protocol::Compact;

const BINARY_MIME: &str = "application/vnd.apache.thrift.binary";
const COMPACT_MIME: &str = "application/vnd.apache.thrift.compact";
const JSON_MIME: &str = "application/vnd.apache.thrift.json";

impl Protocol {
    /// Look up the protocol bound to a `Content-Type` header value.
    ///
    /// Only the first `;`-delimited token participates in the lookup, so
    /// `"application/vnd.apache.thrift.compact; charset=utf-8"` resolves the
    /// same as the bare MIME type. Returns `None` for an absent, empty, or
    /// unrecognised content type; callers should fall back to
    /// [`DEFAULT_PROTOCOL`] in that case.
    #[must_use]
    pub fn for_content_type(content_type: &str) -> Option<Self> {
        let token = content_type.split(';').next()?.trim();
        match token {
            BINARY_MIME => Some(Self::Binary),
            COMPACT_MIME => Some(Self::Compact),
            JSON_MIME => Some(Self::Json),
            _ => None,
        }
    }

    /// Return the canonical MIME type for this protocol.
    #[must_use]
    pub const fn content_type(self) -> &'static str {
        match self {
            Self::Binary => BINARY_MIME,
            Self::Compact => COMPACT_MIME,
            Self::Json => JSON_MIME,
        }
    }

    /// Resolve a protocol from an optional `Content-Type` header value,
    /// defaulting to [`DEFAULT_PROTOCOL`] when absent or unrecognised.
    #[must_use]
    pub fn resolve(content_type: Option<&str>) -> Self {
        content_type
            .and_then(Self::for_content_type)
            .unwrap_or(DEFAULT_PROTOCOL)
    }
}
