use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Identifier of the post a reminder is attached to.
///
/// Opaque to this crate; the only guarantee is that it is not blank.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct PostId(String);

#[derive(Debug, Error, PartialEq, Eq)]
#[error("post id must not be empty")]
pub struct PostIdError;

impl PostId {
    pub fn new(value: impl Into<String>) -> Result<Self, PostIdError> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(PostIdError);
        }
        if trimmed.len() == value.len() {
            Ok(Self(value))
        } else {
            Ok(Self(trimmed.to_string()))
        }
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for PostId {
    type Error = PostIdError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl TryFrom<&str> for PostId {
    type Error = PostIdError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<PostId> for String {
    fn from(value: PostId) -> Self {
        value.0
    }
}

impl fmt::Display for PostId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Recipient selector for targeted reminders (`send_to` on the wire).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct DeliveryTarget(String);

#[derive(Debug, Error, PartialEq, Eq)]
#[error("delivery target must not be empty")]
pub struct DeliveryTargetError;

impl DeliveryTarget {
    pub fn new(value: impl Into<String>) -> Result<Self, DeliveryTargetError> {
        let value = value.into();
        if value.trim().is_empty() {
            Err(DeliveryTargetError)
        } else {
            Ok(Self(value.trim().to_string()))
        }
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for DeliveryTarget {
    type Error = DeliveryTargetError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<DeliveryTarget> for String {
    fn from(value: DeliveryTarget) -> Self {
        value.0
    }
}

impl fmt::Display for DeliveryTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
