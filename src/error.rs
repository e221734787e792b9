#[derive(thiserror::Error, Debug, Clone, Eq, PartialEq)]
pub enum Error {
    #[error("session not established: import the peer's public key first")]
    NotEstablished,

    #[error("session already established")]
    AlreadyEstablished,

    #[error("invalid encoding: {0}")]
    InvalidEncoding(String),

    #[error("invalid public key")]
    InvalidPublicKey,

    #[error("ciphertext too short")]
    CiphertextTooShort,

    #[error("message {0} already received or too old")]
    AlreadyReceived(u32),

    #[error("too many skipped messages: {0}")]
    TooManySkipped(u32),

    #[error("message authentication failed")]
    AuthenticationFailed,

    #[error("random number generation failed")]
    Random,

    #[error("key derivation failed")]
    Kdf,
}

impl From<aes_gcm::Error> for Error {
    fn from(_: aes_gcm::Error) -> Self {
        Self::AuthenticationFailed
    }
}
