pub mod ports;
pub mod submit_use_case;

pub use submit_use_case::{ApiEndpoint, SubmitUseCase};
