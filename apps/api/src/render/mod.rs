// Document sink: turns the builder's in-memory model into file bytes.
// The builder never sees container details; it only talks to `model`.

pub mod docx;
pub mod model;
pub mod package;

use std::io::Cursor;

use thiserror::Error;

pub use model::Document;

#[derive(Debug, Error)]
pub enum SinkError {
    #[error("zip error: {0}")]
    Zip(#[from] zip::result::ZipError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("XML formatting error")]
    Fmt(#[from] std::fmt::Error),

    #[error("duplicate package part: {0}")]
    DuplicatePart(String),
}

/// Serializes a finished document into a downloadable byte stream.
///
/// Carried in `AppState` as `Arc<dyn DocumentSink>`.
pub trait DocumentSink: Send + Sync {
    /// Media type sent as `Content-Type`.
    fn media_type(&self) -> &'static str;

    /// File extension without the dot.
    fn extension(&self) -> &'static str;

    fn serialize(&self, document: &Document) -> Result<Vec<u8>, SinkError>;
}

/// Office Open XML word-processing output (`.docx`).
#[derive(Debug, Default, Clone, Copy)]
pub struct DocxSink;

impl DocumentSink for DocxSink {
    fn media_type(&self) -> &'static str {
        docx::DOCX_MEDIA_TYPE
    }

    fn extension(&self) -> &'static str {
        "docx"
    }

    fn serialize(&self, document: &Document) -> Result<Vec<u8>, SinkError> {
        Ok(docx::write_package(document, Cursor::new(Vec::new()))?.into_inner())
    }
}
