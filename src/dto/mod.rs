//! Request payloads and response shapes for the HTTP API.

use serde_json::Value;
use thiserror::Error;

pub mod auth;
pub mod company;
pub mod employee;

#[derive(Debug, Error)]
/// Errors produced while normalizing raw request input.
pub enum PayloadError {
    #[error("max age can't be less than min age")]
    InvalidAgeRange,

    #[error("invalid identifier list")]
    InvalidIdList,

    #[error("patch document must be a JSON object")]
    InvalidPatch,
}

/// RFC 7386 JSON merge patch: object members are merged recursively and
/// `null` removes the member.
pub fn merge_patch(target: &mut Value, patch: &Value) {
    match patch {
        Value::Object(patch_map) => {
            if !target.is_object() {
                *target = Value::Object(serde_json::Map::new());
            }
            if let Value::Object(target_map) = target {
                for (key, value) in patch_map {
                    if value.is_null() {
                        target_map.remove(key);
                    } else {
                        merge_patch(
                            target_map.entry(key.clone()).or_insert(Value::Null),
                            value,
                        );
                    }
                }
            }
        }
        _ => *target = patch.clone(),
    }
}
