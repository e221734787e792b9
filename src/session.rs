use crate::error::Error;
use crate::keys::{self, KeyPair, PUBLIC_KEY_LEN};
use crate::ratchet::Ratchet;
use crate::wordlist;
use crate::{aead, kdf, wire};
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use zeroize::{Zeroize, ZeroizeOnDrop};

/// Tunables for a session.
#[derive(Clone, Debug)]
pub struct SessionConfig {
    /// Upper bound on the forward gap the receive chain will bridge; also
    /// bounds how many parked keys a slow receiver can accumulate.
    pub max_skipped_messages: u32,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            max_skipped_messages: 100,
        }
    }
}

// Everything derived from the handshake, committed in one piece so the
// session is either fully established or not at all.
struct Established {
    peer_public_bytes: [u8; PUBLIC_KEY_LEN],
    base_key: Box<[u8; 32]>,
    ratchet: Ratchet,
    is_initiator: bool,
}

impl Zeroize for Established {
    fn zeroize(&mut self) {
        self.base_key.zeroize();
        self.ratchet.zeroize();
    }
}

impl Drop for Established {
    fn drop(&mut self) {
        self.zeroize();
    }
}

impl ZeroizeOnDrop for Established {}

/// An end-to-end encryption session with a single peer.
///
/// A session owns one ephemeral P-256 key pair. Once the peer's public key
/// is imported, every outgoing message is sealed under its own ratchet-derived
/// key and framed as a base64 string, and every incoming frame is resolved to
/// the matching receive-side key, out of order if need be.
pub struct Session {
    key_pair: KeyPair,
    config: SessionConfig,
    established: Option<Established>,
    last_recv_msg_num: u32,
}

impl Session {
    /// Creates a session with a freshly generated key pair.
    pub fn new() -> Result<Self, Error> {
        Self::with_config(SessionConfig::default())
    }

    pub fn with_config(config: SessionConfig) -> Result<Self, Error> {
        Ok(Self {
            key_pair: KeyPair::generate()?,
            config,
            established: None,
            last_recv_msg_num: 0,
        })
    }

    /// Own public key: standard base64 of the uncompressed SEC1 point.
    pub fn public_key_base64(&self) -> String {
        BASE64.encode(self.key_pair.public_bytes())
    }

    /// Peer's public key in the same encoding, once known.
    pub fn peer_public_key_base64(&self) -> Option<String> {
        self.established
            .as_ref()
            .map(|e| BASE64.encode(e.peer_public_bytes))
    }

    /// Imports the peer's public key and derives all session state.
    ///
    /// Nothing is committed unless every derivation succeeds, and a session
    /// that is already established rejects the call outright; replacing a
    /// live ratchet would let anyone who can inject one key reset the
    /// conversation.
    pub fn set_peer_public_key(&mut self, base64_key: &str) -> Result<(), Error> {
        if self.established.is_some() {
            return Err(Error::AlreadyEstablished);
        }

        let peer_bytes = BASE64
            .decode(base64_key)
            .map_err(|err| Error::InvalidEncoding(err.to_string()))?;
        let peer_public = keys::parse_public_key(&peer_bytes)?;

        let shared_secret = self.key_pair.diffie_hellman(&peer_public);
        let base_key = kdf::derive_base_key(shared_secret.raw_secret_bytes().as_slice())?;

        // The peer with the lexicographically smaller serialized key is the
        // initiator; both sides compute this locally from the same two values
        // and land on opposite roles.
        let is_initiator = self.key_pair.public_bytes().as_slice() < peer_bytes.as_slice();
        let ratchet = Ratchet::new(
            shared_secret.raw_secret_bytes().as_slice(),
            is_initiator,
            self.config.max_skipped_messages,
        )?;

        let mut peer_public_bytes = [0u8; PUBLIC_KEY_LEN];
        peer_public_bytes.copy_from_slice(&peer_bytes);

        self.established = Some(Established {
            peer_public_bytes,
            base_key,
            ratchet,
            is_initiator,
        });

        Ok(())
    }

    /// Encrypts a message under the next sending key and frames it for the
    /// wire. The message key is wiped as soon as the AEAD is done with it.
    pub fn encrypt(&mut self, plaintext: &str) -> Result<String, Error> {
        let established = self.established.as_mut().ok_or(Error::NotEstablished)?;

        let (mut message_key, msg_num) = established.ratchet.next_send_key()?;
        let sealed = aead::seal(plaintext.as_bytes(), &message_key);
        message_key.zeroize();

        Ok(wire::encode_message(msg_num, &sealed?))
    }

    /// Decrypts a framed message.
    ///
    /// A failed authentication permanently consumes the message number: the
    /// key is wiped and never reinstated, so an attacker cannot probe one
    /// counter position with repeated forgeries.
    pub fn decrypt(&mut self, input: &str) -> Result<String, Error> {
        let established = self.established.as_mut().ok_or(Error::NotEstablished)?;

        let (msg_num, body) = wire::decode_message(input)?;

        let mut message_key = established.ratchet.recv_key(msg_num)?;
        let opened = aead::open(&body, &message_key);
        message_key.zeroize();

        let plaintext = String::from_utf8(opened?)
            .map_err(|err| Error::InvalidEncoding(err.to_string()))?;

        self.last_recv_msg_num = msg_num;
        Ok(plaintext)
    }

    /// Five words derived from the handshake; identical on both ends unless
    /// the key exchange was tampered with.
    pub fn verification_words(&self) -> Option<[&'static str; wordlist::WORD_COUNT]> {
        self.established
            .as_ref()
            .map(|e| wordlist::verification_words(&e.base_key))
    }

    /// (sent, received) message counts, or (0, 0) before the handshake.
    pub fn message_stats(&self) -> (u32, u32) {
        match &self.established {
            Some(e) => (e.ratchet.send_msg_num(), e.ratchet.recv_msg_num()),
            None => (0, 0),
        }
    }

    /// Number of the last successfully decrypted message.
    pub fn last_recv_msg_num(&self) -> u32 {
        self.last_recv_msg_num
    }

    pub fn is_established(&self) -> bool {
        self.established.is_some()
    }

    /// Whether this side holds the initiator role, once established.
    pub fn is_initiator(&self) -> Option<bool> {
        self.established.as_ref().map(|e| e.is_initiator)
    }
}
