use thiserror::Error;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error(
        "Cast to ObjectId failed for value \"{0}\" (type string) at path \"_id\" for model \"contact_lists\""
    )]
    InvalidId(String),
    #[error("Cast to string failed for value \"{value}\" at path \"{path}\"")]
    Cast { value: String, path: &'static str },
    #[error("Parameter \"obj\" to Document() must be an object, got \"{0}\"")]
    NotAnObject(String),
    #[error("{0}")]
    Database(#[from] mongodb::error::Error),
}
