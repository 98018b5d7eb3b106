use crate::errors::ReaderServerError;

pub trait Validate {
    fn validate(&self) -> Result<(), ReaderServerError>;
}
