use thiserror::Error;

#[derive(Error, Debug)]
pub enum CollectionStoreError {
    #[error("Collection not found: {0}")]
    CollectionNotFound(String),
}

#[derive(Error, Debug)]
pub enum TransformerError {
    #[error("Unknown transformer: {0}")]
    UnknownTransformer(String),
    #[error("Missing required control: {0}")]
    MissingControl(String),
    #[error("Invalid value for control {control}: {reason}")]
    InvalidControl { control: String, reason: String },
    #[error("Transformer {0} requires an input collection")]
    MissingInputCollection(String),
    #[error("Failed to access collection store")]
    FailedCollectionStore(#[from] CollectionStoreError),
    #[error("Transformer failed")]
    Internal(#[from] anyhow::Error),
}

#[derive(Error, Debug)]
pub enum AggregationError {
    #[error("Aggregation requires at least one collection id")]
    EmptyCollectionList,
    #[error("Failed to access collection store")]
    FailedCollectionStore(#[from] CollectionStoreError),
}
