use crate::error::ReadmeError;

pub type ReadmeResult<T> = std::result::Result<T, ReadmeError>;
