mod aead;

mod error;
pub use error::Error;

mod kdf;

mod keys;

mod ratchet;
pub use ratchet::Ratchet;

mod session;
pub use session::{Session, SessionConfig};

mod wire;

pub mod wordlist;
