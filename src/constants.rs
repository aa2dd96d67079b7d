/// Commissioning-document endpoint of the CRPT ("Честный знак") API
pub const DEFAULT_API_URL: &str =
    "https://ismp.crpt.ru/api/v3/lk/documents/commissioning/contract/create";

/// Placeholder credential shipped in the sample config
pub const DEFAULT_API_TOKEN: &str = "SOME_TOKEN";

pub const DEFAULT_TIMEOUT_SECONDS: u64 = 30;
pub const DEFAULT_REQUEST_LIMIT: u32 = 10;
pub const DEFAULT_CONFIG_PATH: &str = "config.toml";

// Environment overrides
pub const ENV_API_URL: &str = "CRPT_API_URL";
pub const ENV_API_TOKEN: &str = "CRPT_API_TOKEN";

// Accepted values for the commissioning rules
pub const CERTIFICATE_DOCUMENT_KINDS: [&str; 2] = ["CONFORMITY_CERTIFICATE", "CONFORMITY_DECLARATION"];
pub const PRODUCTION_TYPES: [&str; 2] = ["OWN_PRODUCTION", "CONTRACT_PRODUCTION"];

// Outbound request
pub const HTTP_METHOD_POST: &str = "POST";
pub const HEADER_CONTENT_TYPE: &str = "Content-Type";
pub const HEADER_AUTHORIZATION: &str = "Authorization";
/// Sent as-is although the body is form-encoded
pub const REQUEST_CONTENT_TYPE: &str = "application/json";

// Form field names
pub const FIELD_DOCUMENT_FORMAT: &str = "document_format";
pub const FIELD_PRODUCT_DOCUMENT: &str = "product_document";
pub const FIELD_SIGNATURE: &str = "signature";
pub const FIELD_TYPE: &str = "type";

// Generic failure payload
pub const ERROR_MESSAGE_KEY: &str = "error message";
pub const GENERIC_ERROR_MESSAGE: &str = "An unknown error occurred";
