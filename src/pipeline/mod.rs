// Submission pipeline stages: validation, rate gate, encoding, response handling

pub mod encoder;
pub mod rate_gate;
pub mod response;
pub mod validation;

pub use encoder::{document_format, encode, EncodedRequest};
pub use rate_gate::{GatePermit, GateSnapshot, RateGate, TimeUnit};
pub use response::{interpret, ApiResponse, ErrorPayload, ResponseBody};
pub use validation::{CommissioningRules, DocumentValidator};
