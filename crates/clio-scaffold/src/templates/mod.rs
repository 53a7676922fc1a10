//! Template identification and retrieval
//!
//! This module provides:
//! - `TemplateSource`, the `owner/name#branch` identifier derived from a target
//! - The `TemplateRetriever` seam used by the orchestrator
//! - `TemplateFetcher`, reading branch archives from a remote host or
//!   template folders from a local directory

pub mod fetcher;
pub mod source;

pub use fetcher::{
    extract_archive, materialize, TemplateContents, TemplateFetcher, TemplateFile,
    TemplateLocation, TemplateRetriever,
};
pub use source::TemplateSource;
