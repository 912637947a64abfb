// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Error types shared by the fee client and the dialogs.
//!
//! The fee service reports failures as a JSON body whose `detail` field may
//! be a plain string, a list of validation entries, or an object. That shape
//! is captured once in [`ErrorDetail`] and turned into a single display line
//! by [`ErrorDetail::message`].

use serde_json::{Map, Value};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq)]
pub enum ErrorDetail {
    Text(String),
    ValidationList(Vec<Value>),
    Object(Map<String, Value>),
    Unknown,
}

impl ErrorDetail {
    /// Parse the `detail` field out of a raw response body.
    pub fn from_body(body: &str) -> Self {
        match serde_json::from_str::<Value>(body) {
            Ok(Value::Object(mut obj)) => match obj.remove("detail") {
                Some(detail) => Self::from_value(detail),
                None => Self::Unknown,
            },
            _ => Self::Unknown,
        }
    }

    pub fn from_value(detail: Value) -> Self {
        match detail {
            Value::String(s) if !s.trim().is_empty() => Self::Text(s),
            Value::Array(items) if !items.is_empty() => Self::ValidationList(items),
            Value::Object(obj) => Self::Object(obj),
            _ => Self::Unknown,
        }
    }

    /// Human readable line for this detail, `None` when nothing usable was sent.
    pub fn message(&self) -> Option<String> {
        match self {
            Self::Text(s) => Some(s.clone()),
            Self::ValidationList(items) => {
                let parts: Vec<String> = items.iter().map(validation_entry).collect();
                Some(parts.join(", "))
            }
            Self::Object(obj) => Some(
                text_field(obj, "message")
                    .or_else(|| text_field(obj, "msg"))
                    .unwrap_or_else(|| Value::Object(obj.clone()).to_string()),
            ),
            Self::Unknown => None,
        }
    }
}

fn text_field(obj: &Map<String, Value>, key: &str) -> Option<String> {
    obj.get(key)
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

fn validation_entry(item: &Value) -> String {
    match item {
        Value::String(s) => s.clone(),
        Value::Object(obj) => text_field(obj, "msg")
            .or_else(|| text_field(obj, "message"))
            .unwrap_or_else(|| item.to_string()),
        other => other.to_string(),
    }
}

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Fee service rejected the request ({status}): {}", .detail.message().unwrap_or_default())]
    Rejected { status: u16, detail: ErrorDetail },

    #[error("Request failed: {0}")]
    Transport(String),

    #[error("Failed to parse response: {0}")]
    Decode(String),
}

impl ApiError {
    /// Message to show the operator; falls back when the server sent no usable detail.
    pub fn display_message(&self, fallback: &str) -> String {
        match self {
            Self::Rejected { detail, .. } => detail.message().unwrap_or_else(|| fallback.to_string()),
            _ => fallback.to_string(),
        }
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_decode() {
            Self::Decode(e.to_string())
        } else {
            Self::Transport(e.to_string())
        }
    }
}

/// Client-side validation failures. They never reach the network.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SelectionError {
    #[error("Please select at least one month")]
    NoMonths,

    #[error("Please enter a valid amount")]
    InvalidAmount,

    #[error("Please select a payment method")]
    NoPaymentMethod,

    #[error("Transaction ID is required for {0}")]
    ReferenceRequired(String),

    #[error("Please select a reversal reason")]
    NoReason,

    #[error("Please select at least one month to reverse")]
    NoAllocations,

    #[error("All months are selected. Use Full Reversal instead")]
    AllAllocations,

    #[error("A request is already in progress")]
    Busy,

    #[error("This reversal has already been submitted")]
    AlreadySubmitted,
}
