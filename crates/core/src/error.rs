use thiserror::Error;

#[derive(Error, Debug)]
pub enum OrderdeskError {
    #[error("unknown order status: {0}")]
    UnknownStatus(String),

    #[error("unknown role: {0}")]
    UnknownRole(String),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("{0}")]
    Other(String),
}
