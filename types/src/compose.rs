use serde::{Deserialize, Serialize};

/// How a targeted reminder is delivered (`reminder_type` on the wire).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum DeliveryMode {
    #[serde(rename = "unread")]
    MarkAsUnread,
    #[default]
    #[serde(rename = "dm")]
    DirectMessage,
}

impl DeliveryMode {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::MarkAsUnread => "unread",
            Self::DirectMessage => "dm",
        }
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::MarkAsUnread => "Mark as unread",
            Self::DirectMessage => "Direct message",
        }
    }

    #[must_use]
    pub const fn toggle(self) -> Self {
        match self {
            Self::MarkAsUnread => Self::DirectMessage,
            Self::DirectMessage => Self::MarkAsUnread,
        }
    }
}

/// Which renderer consumes the composed message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PreviewMode {
    #[default]
    Write,
    Preview,
}

impl PreviewMode {
    #[must_use]
    pub const fn toggle(self) -> Self {
        match self {
            Self::Write => Self::Preview,
            Self::Preview => Self::Write,
        }
    }

    #[must_use]
    pub const fn is_preview(self) -> bool {
        matches!(self, Self::Preview)
    }
}

/// The two composer variants.
///
/// `Classic` resolves a magnitude + unit at submit time and sends a plain DM
/// reminder. `Targeted` is minutes-only, re-resolves the fire time on every
/// edit, and lets the user pick a recipient and delivery mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ComposerVariant {
    #[default]
    Classic,
    Targeted,
}

impl ComposerVariant {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Classic => "classic",
            Self::Targeted => "targeted",
        }
    }

    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "classic" | "v1" => Some(Self::Classic),
            "targeted" | "v2" => Some(Self::Targeted),
            _ => None,
        }
    }
}
