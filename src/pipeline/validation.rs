use tracing::debug;

use crate::constants::{CERTIFICATE_DOCUMENT_KINDS, PRODUCTION_TYPES};
use crate::domain::Document;
use crate::error::{GatewayError, Result};

/// Structural checks a document must pass before it may use rate budget
pub trait DocumentValidator {
    fn validate(&self, document: &Document) -> Result<()>;
}

/// Rules the commissioning endpoint enforces on `LP_INTRODUCE_GOODS*` filings
#[derive(Debug, Default, Clone, Copy)]
pub struct CommissioningRules;

impl CommissioningRules {
    pub fn new() -> Self {
        Self
    }
}

impl DocumentValidator for CommissioningRules {
    fn validate(&self, document: &Document) -> Result<()> {
        if let Some(products) = &document.products {
            // Only the all-missing case is rejected; carrying both codes is accepted
            if products.uit_code.is_none() && products.uitu_code.is_none() {
                return Err(GatewayError::Validation(
                    "one of uit_code or uitu_code is required".to_string(),
                ));
            }

            if let Some(kind) = &products.certificate_document {
                if !CERTIFICATE_DOCUMENT_KINDS.contains(&kind.as_str()) {
                    return Err(GatewayError::Validation(format!(
                        "invalid mandatory certification document kind: {}",
                        kind
                    )));
                }
            }
        }

        if !PRODUCTION_TYPES.contains(&document.production_type.as_str()) {
            return Err(GatewayError::Validation(format!(
                "invalid production type: {}",
                document.production_type
            )));
        }

        debug!(doc_id = %document.doc_id, "Document passed commissioning rules");
        Ok(())
    }
}
