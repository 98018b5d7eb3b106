mod reader_service;
mod validation;

pub use reader_service::ReaderService;
pub use validation::Validate;
