mod reader_error;

pub use reader_error::{ReaderResult, ReaderServerError};
