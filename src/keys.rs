use crate::error::Error;
use p256::ecdh::{self, SharedSecret};
use p256::elliptic_curve::sec1::ToEncodedPoint;
use p256::{PublicKey, SecretKey};
use rand_core::{OsRng, RngCore};
use zeroize::Zeroize;

/// Length of an uncompressed SEC1 point encoding: 0x04 || X || Y.
pub(crate) const PUBLIC_KEY_LEN: usize = 65;

/// A NIST P-256 key pair held for the lifetime of one session.
pub(crate) struct KeyPair {
    secret: SecretKey,
    public_bytes: [u8; PUBLIC_KEY_LEN],
}

impl KeyPair {
    /// Generates a key pair from the system CSPRNG.
    pub(crate) fn generate() -> Result<Self, Error> {
        // Rejection-sample until the candidate bytes form a valid scalar.
        let mut seed = [0u8; 32];
        let secret = loop {
            OsRng.try_fill_bytes(&mut seed).map_err(|_| Error::Random)?;
            if let Ok(secret) = SecretKey::from_slice(&seed) {
                break secret;
            }
        };
        seed.zeroize();

        let point = secret.public_key().to_encoded_point(false);
        let mut public_bytes = [0u8; PUBLIC_KEY_LEN];
        public_bytes.copy_from_slice(point.as_bytes());

        Ok(Self {
            secret,
            public_bytes,
        })
    }

    pub(crate) fn public_bytes(&self) -> &[u8; PUBLIC_KEY_LEN] {
        &self.public_bytes
    }

    /// ECDH with the peer's point. The shared secret is the X coordinate of
    /// the product; the `SharedSecret` wrapper wipes itself on drop.
    pub(crate) fn diffie_hellman(&self, peer: &PublicKey) -> SharedSecret {
        ecdh::diffie_hellman(self.secret.to_nonzero_scalar(), peer.as_affine())
    }
}

/// Parses an uncompressed SEC1 public key. Every other encoding is rejected,
/// compressed points included.
pub(crate) fn parse_public_key(bytes: &[u8]) -> Result<PublicKey, Error> {
    if bytes.len() != PUBLIC_KEY_LEN || bytes[0] != 0x04 {
        return Err(Error::InvalidPublicKey);
    }

    PublicKey::from_sec1_bytes(bytes).map_err(|_| Error::InvalidPublicKey)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_public_bytes_are_uncompressed_sec1() {
        let key_pair = KeyPair::generate().unwrap();

        assert_eq!(key_pair.public_bytes().len(), PUBLIC_KEY_LEN);
        assert_eq!(key_pair.public_bytes()[0], 0x04);
    }

    #[test]
    fn test_shared_secret_agreement() {
        let alice = KeyPair::generate().unwrap();
        let bob = KeyPair::generate().unwrap();

        let alice_view = parse_public_key(bob.public_bytes()).unwrap();
        let bob_view = parse_public_key(alice.public_bytes()).unwrap();

        let alice_secret = alice.diffie_hellman(&alice_view);
        let bob_secret = bob.diffie_hellman(&bob_view);

        assert_eq!(
            alice_secret.raw_secret_bytes(),
            bob_secret.raw_secret_bytes()
        );
    }

    #[test]
    fn test_distinct_peers_distinct_secrets() {
        let alice = KeyPair::generate().unwrap();
        let bob = KeyPair::generate().unwrap();
        let carol = KeyPair::generate().unwrap();

        let with_bob = alice.diffie_hellman(&parse_public_key(bob.public_bytes()).unwrap());
        let with_carol = alice.diffie_hellman(&parse_public_key(carol.public_bytes()).unwrap());

        assert_ne!(
            with_bob.raw_secret_bytes(),
            with_carol.raw_secret_bytes()
        );
    }

    #[test]
    fn test_malformed_encodings_rejected() {
        assert_eq!(parse_public_key(b"test"), Err(Error::InvalidPublicKey));
        assert_eq!(parse_public_key(&[0u8; 65]), Err(Error::InvalidPublicKey));
        assert_eq!(parse_public_key(&[]), Err(Error::InvalidPublicKey));

        // Not a point on the curve, despite the right length and prefix
        let mut junk = [0xabu8; 65];
        junk[0] = 0x04;
        assert_eq!(parse_public_key(&junk), Err(Error::InvalidPublicKey));
    }

    #[test]
    fn test_compressed_encoding_rejected() {
        let key_pair = KeyPair::generate().unwrap();
        let compressed = key_pair
            .secret
            .public_key()
            .to_encoded_point(true);

        assert_eq!(
            parse_public_key(compressed.as_bytes()),
            Err(Error::InvalidPublicKey)
        );
    }
}
