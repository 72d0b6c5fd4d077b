use thiserror::Error;

pub type SldResult<T> = Result<T, SldError>;

#[derive(Error, Debug)]
pub enum SldError {
    #[error("Duplicate id: {id}")]
    DuplicateId { id: String },

    #[error("Invariant violated: {what}")]
    Invariant { what: String },
}
