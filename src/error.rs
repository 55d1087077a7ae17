/// Error returned by [`ChainedMap::delete`](crate::ChainedMap::delete).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum KeyError {
    #[error("key not found: {key}")]
    NotFound { key: String },
}

impl KeyError {
    pub(crate) fn not_found(key: &str) -> Self {
        KeyError::NotFound {
            key: key.to_owned(),
        }
    }
}
