// Domain data shapes for commissioning filings

pub mod document;
pub mod format;

pub use document::{Description, Document, Products};
pub use format::{DocumentFormat, DocumentType};
