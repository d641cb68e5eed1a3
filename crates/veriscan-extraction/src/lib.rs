//! Document extraction against a remote vision model.
//!
//! The client submits a document image to the Fireworks chat-completions API and
//! the parser normalizes whatever text comes back into an
//! [`ExtractionResult`](veriscan_core::models::ExtractionResult). Transport and
//! API failures are errors; a malformed model reply is not - it degrades to an
//! all-absent result.

pub mod client;
pub mod parser;
pub mod testing;

pub use client::{check_api, DocumentExtractor, ExtractionError, FireworksClient};
pub use parser::parse_response;
