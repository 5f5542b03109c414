use thiserror::Error;

#[derive(Error, Debug)]
pub enum EmailError {
    #[error("Invalid email address: {0}")]
    Address(#[from] lettre::address::AddressError),
    #[error("Failed to build email message: {0}")]
    Message(#[from] lettre::error::Error),
    #[error("Failed to deliver email: {0}")]
    Transport(#[from] lettre::transport::smtp::Error),
}
