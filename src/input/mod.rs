//! Input collection and client-side validation
//!
//! Validation is pure: it only builds the outgoing request or rejects the input.

mod patterns;
pub mod collector;

pub use patterns::{ADDRESS_PATTERN, TX_HASH_PATTERN, is_address, is_tx_hash};
pub use collector::{SubmissionForm, ValidatedInput, validate_payload, validate_scan, validate_upload};
