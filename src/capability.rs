//! External capability boundary.
//!
//! The engine invokes language models, search backends, calculators and the
//! like only through [Capability]; it is agnostic to what answers the call.
//! Producers of structured output commonly wrap it in a fenced block, so
//! decoding strips a single optional fence before JSON decoding.

use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;

/// Failure of an external capability call.
#[derive(Debug, Clone, Error)]
pub enum CapabilityError {
  #[error("capability unavailable: {0}")]
  Unavailable(String),
  #[error("capability call failed: {0}")]
  Failed(String),
}

/// An external capability invoked by node bodies.
///
/// `args` is whatever the node builds from the run state (a prompt string,
/// a structured request); the reply is the raw output. Handed to nodes at
/// construction instead of living in process-wide state, so tests can
/// substitute a fake.
#[async_trait]
pub trait Capability: Send + Sync {
  async fn call(&self, args: Value) -> Result<String, CapabilityError>;
}

/// Strips a single optional ``` fence (with or without a language tag).
pub fn strip_fence(raw: &str) -> &str {
  let trimmed = raw.trim();
  let Some(rest) = trimmed.strip_prefix("```") else {
    return trimmed;
  };
  let body = match rest.find('\n') {
    Some(idx) => &rest[idx + 1..],
    None => rest,
  };
  match body.strip_suffix("```") {
    Some(inner) => inner.trim(),
    None => body.trim(),
  }
}

/// Decodes structured output: one optional fence stripped, then JSON.
pub fn decode_structured(raw: &str) -> Result<Value, serde_json::Error> {
  serde_json::from_str(strip_fence(raw))
}
