use base64::engine::general_purpose::STANDARD;
use base64::Engine;

use crate::constants::{FIELD_DOCUMENT_FORMAT, FIELD_PRODUCT_DOCUMENT, FIELD_SIGNATURE, FIELD_TYPE};
use crate::domain::{Document, DocumentFormat, DocumentType};
use crate::error::{GatewayError, Result};

/// Wire payload for one submission, ready to be form-encoded
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedRequest {
    pub document_format: DocumentFormat,
    /// Base64 of the document's canonical JSON
    pub product_document: String,
    /// Base64 of the signature's UTF-8 bytes
    pub signature: String,
    /// Raw `doc_type`, sent as the `type` field
    pub doc_type: String,
}

impl EncodedRequest {
    /// Form fields in the order the API documents them
    pub fn form_fields(&self) -> [(&'static str, &str); 4] {
        [
            (FIELD_DOCUMENT_FORMAT, self.document_format.as_str()),
            (FIELD_PRODUCT_DOCUMENT, &self.product_document),
            (FIELD_SIGNATURE, &self.signature),
            (FIELD_TYPE, &self.doc_type),
        ]
    }

    /// `application/x-www-form-urlencoded` rendering of [`Self::form_fields`]
    pub fn to_form_body(&self) -> Result<String> {
        let fields = self.form_fields();
        Ok(serde_urlencoded::to_string(&fields[..])?)
    }
}

/// Resolve the document format from `doc_type`
pub fn document_format(document: &Document) -> Result<DocumentFormat> {
    DocumentType::lookup(&document.doc_type)
        .map(|kind| kind.format())
        .ok_or_else(|| GatewayError::UnsupportedFormat(document.doc_type.clone()))
}

pub fn encode(document: &Document, signature: &str, format: DocumentFormat) -> Result<EncodedRequest> {
    let json = serde_json::to_string(document)?;

    Ok(EncodedRequest {
        document_format: format,
        product_document: STANDARD.encode(json.as_bytes()),
        signature: STANDARD.encode(signature.as_bytes()),
        doc_type: document.doc_type.clone(),
    })
}
