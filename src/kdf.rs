use crate::error::Error;
use hkdf::Hkdf;
use sha2::Sha256;
use zeroize::Zeroize;

// Info labels partitioning the HKDF namespace. These are part of the wire
// contract: both peers must use identical labels or the chains diverge.
pub(crate) const BASE_KEY_INFO: &[u8] = b"e2e-message-aes-key";
pub(crate) const CHAIN_INIT_INFO: &[u8] = b"e2e-ratchet-chains";
pub(crate) const MESSAGE_KEY_INFO: &[u8] = b"e2e-msg-key";
pub(crate) const NEXT_CHAIN_INFO: &[u8] = b"e2e-chain-key";

/// HKDF-SHA256 with an empty salt.
pub(crate) fn expand(ikm: &[u8], info: &[u8], okm: &mut [u8]) -> Result<(), Error> {
    Hkdf::<Sha256>::new(None, ikm)
        .expand(info, okm)
        .map_err(|_| Error::Kdf)
}

/// Derives the base key used solely for the verification words.
pub(crate) fn derive_base_key(shared_secret: &[u8]) -> Result<Box<[u8; 32]>, Error> {
    let mut key = Box::new([0u8; 32]);
    expand(shared_secret, BASE_KEY_INFO, key.as_mut_slice())?;
    Ok(key)
}

/// Derives the two initial chain keys from the ECDH shared secret.
pub(crate) fn derive_initial_chains(
    shared_secret: &[u8],
) -> Result<(Box<[u8; 32]>, Box<[u8; 32]>), Error> {
    let mut okm = [0u8; 64];
    expand(shared_secret, CHAIN_INIT_INFO, &mut okm)?;

    let mut chain1 = Box::new([0u8; 32]);
    chain1.copy_from_slice(&okm[0..32]);
    let mut chain2 = Box::new([0u8; 32]);
    chain2.copy_from_slice(&okm[32..64]);
    okm.zeroize();

    Ok((chain1, chain2))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expansion_is_deterministic() {
        let mut first = [0u8; 32];
        let mut second = [0u8; 32];

        expand(b"some input keying material", MESSAGE_KEY_INFO, &mut first).unwrap();
        expand(b"some input keying material", MESSAGE_KEY_INFO, &mut second).unwrap();

        assert_eq!(first, second);
    }

    #[test]
    fn test_labels_partition_the_namespace() {
        let ikm = [7u8; 36];

        let mut message_key = [0u8; 32];
        let mut next_chain = [0u8; 32];
        expand(&ikm, MESSAGE_KEY_INFO, &mut message_key).unwrap();
        expand(&ikm, NEXT_CHAIN_INFO, &mut next_chain).unwrap();

        assert_ne!(message_key, next_chain);
    }

    #[test]
    fn test_initial_chains_are_distinct() {
        let (chain1, chain2) = derive_initial_chains(&[42u8; 32]).unwrap();
        assert_ne!(chain1, chain2);
    }

    #[test]
    fn test_base_key_differs_from_chains() {
        let shared_secret = [42u8; 32];

        let base_key = derive_base_key(&shared_secret).unwrap();
        let (chain1, chain2) = derive_initial_chains(&shared_secret).unwrap();

        assert_ne!(base_key, chain1);
        assert_ne!(base_key, chain2);
    }
}
