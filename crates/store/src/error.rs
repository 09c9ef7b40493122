#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The store could not be reached (connectivity-class failure).
    #[error("Store unavailable: {0}")]
    Unavailable(String),

    /// The store refused the operation (quota/write-class failure).
    #[error("Store rejected operation: {0}")]
    Rejected(String),
}
