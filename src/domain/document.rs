use serde::{Deserialize, Serialize};

/// A goods-commissioning filing submitted to the API.
///
/// Required fields are plain `String`s so a document cannot exist without
/// them; deserializing JSON that lacks one fails. Absent optional fields are
/// serialized as `null`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Document {
    pub doc_id: String,
    pub doc_status: String,
    /// Raw type tag, e.g. `LP_INTRODUCE_GOODS`
    pub doc_type: String,
    pub owner_inn: String,
    pub participant_inn: String,
    pub producer_inn: String,
    pub production_date: String,
    /// `OWN_PRODUCTION` or `CONTRACT_PRODUCTION`
    pub production_type: String,
    #[serde(default)]
    pub description: Option<Description>,
    #[serde(default)]
    pub products: Option<Products>,
    #[serde(default, rename = "importRequest")]
    pub import_request: Option<String>,
    #[serde(default)]
    pub reg_date: Option<String>,
    #[serde(default)]
    pub reg_number: Option<String>,
}

/// Per-item commissioning data
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Products {
    pub owner_inn: String,
    pub producer_inn: String,
    pub production_date: String,
    pub tnved_code: String,
    #[serde(default)]
    pub certificate_document: Option<String>,
    #[serde(default)]
    pub certificate_document_date: Option<String>,
    #[serde(default)]
    pub certificate_document_number: Option<String>,
    #[serde(default)]
    pub uit_code: Option<String>,
    #[serde(default)]
    pub uitu_code: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Description {
    #[serde(rename = "participantInn")]
    pub participant_inn: String,
}

impl Products {
    pub fn new(
        owner_inn: impl Into<String>,
        producer_inn: impl Into<String>,
        production_date: impl Into<String>,
        tnved_code: impl Into<String>,
    ) -> Self {
        Self {
            owner_inn: owner_inn.into(),
            producer_inn: producer_inn.into(),
            production_date: production_date.into(),
            tnved_code: tnved_code.into(),
            certificate_document: None,
            certificate_document_date: None,
            certificate_document_number: None,
            uit_code: None,
            uitu_code: None,
        }
    }

    pub fn with_uit_code(mut self, uit_code: impl Into<String>) -> Self {
        self.uit_code = Some(uit_code.into());
        self
    }

    pub fn with_uitu_code(mut self, uitu_code: impl Into<String>) -> Self {
        self.uitu_code = Some(uitu_code.into());
        self
    }

    /// Attach the mandatory-certification document (kind, date, number)
    pub fn with_certificate(
        mut self,
        kind: impl Into<String>,
        date: impl Into<String>,
        number: impl Into<String>,
    ) -> Self {
        self.certificate_document = Some(kind.into());
        self.certificate_document_date = Some(date.into());
        self.certificate_document_number = Some(number.into());
        self
    }
}

impl Description {
    pub fn new(participant_inn: impl Into<String>) -> Self {
        Self { participant_inn: participant_inn.into() }
    }
}

impl Document {
    pub fn with_description(mut self, description: Description) -> Self {
        self.description = Some(description);
        self
    }

    pub fn with_products(mut self, products: Products) -> Self {
        self.products = Some(products);
        self
    }

    pub fn with_registration(mut self, reg_date: impl Into<String>, reg_number: impl Into<String>) -> Self {
        self.reg_date = Some(reg_date.into());
        self.reg_number = Some(reg_number.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};
    use std::collections::HashSet;

    fn sample_document() -> Document {
        Document {
            doc_id: "doc-1".to_string(),
            doc_status: "DRAFT".to_string(),
            doc_type: "LP_INTRODUCE_GOODS".to_string(),
            owner_inn: "7700000001".to_string(),
            participant_inn: "7700000002".to_string(),
            producer_inn: "7700000003".to_string(),
            production_date: "2024-01-15".to_string(),
            production_type: "OWN_PRODUCTION".to_string(),
            description: None,
            products: None,
            import_request: None,
            reg_date: None,
            reg_number: None,
        }
    }

    #[test]
    fn test_documents_compare_structurally() {
        let products = Products::new("1", "2", "2024-01-15", "6401").with_uit_code("uit-1");
        let a = sample_document().with_products(products.clone());
        let b = sample_document().with_products(products);
        assert_eq!(a, b);

        let mut set = HashSet::new();
        set.insert(a.clone());
        assert!(set.contains(&b));

        let c = sample_document().with_products(Products::new("1", "2", "2024-01-15", "6401").with_uitu_code("uitu-1"));
        assert_ne!(a, c);
    }

    #[test]
    fn test_json_uses_wire_field_names() {
        let doc = sample_document()
            .with_description(Description::new("7700000002"))
            .with_registration("2024-02-01", "R-17");
        let value: Value = serde_json::to_value(&doc).unwrap();

        assert_eq!(value["doc_id"], "doc-1");
        assert_eq!(value["description"], json!({ "participantInn": "7700000002" }));
        assert_eq!(value["reg_number"], "R-17");
        // Absent optionals are kept as explicit nulls
        assert!(value.get("importRequest").is_some());
        assert_eq!(value["importRequest"], Value::Null);
        assert_eq!(value["products"], Value::Null);
    }

    #[test]
    fn test_missing_required_field_is_rejected() {
        let json = r#"{
            "doc_id": "doc-1",
            "doc_status": "DRAFT",
            "doc_type": "LP_INTRODUCE_GOODS",
            "owner_inn": "1",
            "participant_inn": "2",
            "producer_inn": "3",
            "production_date": "2024-01-15"
        }"#;
        let result: Result<Document, _> = serde_json::from_str(json);
        assert!(result.is_err());
    }

    #[test]
    fn test_optional_fields_default_when_absent() {
        let json = r#"{
            "doc_id": "doc-1",
            "doc_status": "DRAFT",
            "doc_type": "LP_INTRODUCE_GOODS",
            "owner_inn": "1",
            "participant_inn": "2",
            "producer_inn": "3",
            "production_date": "2024-01-15",
            "production_type": "OWN_PRODUCTION",
            "products": { "owner_inn": "1", "producer_inn": "3", "production_date": "2024-01-15", "tnved_code": "6401", "uit_code": "u" }
        }"#;
        let doc: Document = serde_json::from_str(json).unwrap();
        assert!(doc.description.is_none());
        let products = doc.products.unwrap();
        assert_eq!(products.uit_code.as_deref(), Some("u"));
        assert!(products.certificate_document.is_none());
    }
}
