use std::fmt;

/// Document format tag sent in the `document_format` form field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DocumentFormat {
    Manual,
    Csv,
    Xml,
}

impl DocumentFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            DocumentFormat::Manual => "MANUAL",
            DocumentFormat::Csv => "CSV",
            DocumentFormat::Xml => "XML",
        }
    }
}

impl fmt::Display for DocumentFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Accepted `doc_type` values. Only used as a lookup key; the document keeps
/// the raw string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DocumentType {
    LpIntroduceGoods,
    LpIntroduceGoodsCsv,
    LpIntroduceGoodsXml,
}

const DOCUMENT_TYPES: [(&str, DocumentType); 3] = [
    ("LP_INTRODUCE_GOODS", DocumentType::LpIntroduceGoods),
    ("LP_INTRODUCE_GOODS_CSV", DocumentType::LpIntroduceGoodsCsv),
    ("LP_INTRODUCE_GOODS_XML", DocumentType::LpIntroduceGoodsXml),
];

impl DocumentType {
    /// Exact, case-sensitive match against the wire names
    pub fn lookup(doc_type: &str) -> Option<Self> {
        DOCUMENT_TYPES
            .iter()
            .find(|(name, _)| *name == doc_type)
            .map(|(_, kind)| *kind)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            DocumentType::LpIntroduceGoods => "LP_INTRODUCE_GOODS",
            DocumentType::LpIntroduceGoodsCsv => "LP_INTRODUCE_GOODS_CSV",
            DocumentType::LpIntroduceGoodsXml => "LP_INTRODUCE_GOODS_XML",
        }
    }

    pub fn format(&self) -> DocumentFormat {
        match self {
            DocumentType::LpIntroduceGoods => DocumentFormat::Manual,
            DocumentType::LpIntroduceGoodsCsv => DocumentFormat::Csv,
            DocumentType::LpIntroduceGoodsXml => DocumentFormat::Xml,
        }
    }
}
