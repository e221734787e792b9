mod chain;

use crate::error::Error;
use crate::kdf;
use crate::ratchet::chain::Chain;
use std::collections::HashMap;
use zeroize::{Zeroize, ZeroizeOnDrop};

/// Symmetric key ratchet with independent sending and receiving chains.
///
/// Every message position gets its own AEAD key, derived from the chain key
/// and the position index; the chain key is replaced on each step, so a
/// captured message key reveals nothing about its neighbours. Keys for
/// positions that arrive late are derived ahead of time and parked in a
/// bounded cache.
pub struct Ratchet {
    send_chain: Chain,
    recv_chain: Chain,
    // Map<message_no: message_key> for out-of-order arrivals
    skipped_keys: HashMap<u32, Box<[u8; 32]>>,
    max_skip: u32,
}

impl Zeroize for Ratchet {
    fn zeroize(&mut self) {
        self.send_chain.zeroize();
        self.recv_chain.zeroize();
        for (_, mut key) in self.skipped_keys.drain() {
            key.zeroize();
        }
    }
}

impl Drop for Ratchet {
    fn drop(&mut self) {
        self.zeroize();
    }
}

impl ZeroizeOnDrop for Ratchet {}

impl Ratchet {
    /// Initializes both chains from the ECDH shared secret.
    ///
    /// The two peers assign the derived chains in mirror image: the
    /// initiator sends on the first chain and receives on the second, the
    /// responder the other way around.
    pub fn new(shared_secret: &[u8], is_initiator: bool, max_skip: u32) -> Result<Self, Error> {
        let (chain1, chain2) = kdf::derive_initial_chains(shared_secret)?;

        let (send_key, recv_key) = if is_initiator {
            (chain1, chain2)
        } else {
            (chain2, chain1)
        };

        Ok(Self {
            send_chain: Chain::new(send_key),
            recv_chain: Chain::new(recv_key),
            skipped_keys: HashMap::new(),
            max_skip,
        })
    }

    /// Returns the next sending message key and the number it belongs to.
    /// Numbers are emitted in strictly ascending order starting at 0.
    pub fn next_send_key(&mut self) -> Result<(Box<[u8; 32]>, u32), Error> {
        self.send_chain.step()
    }

    /// Returns the message key for a received message number, deriving and
    /// caching the keys for any gap below it.
    ///
    /// Each number is served exactly once: a second request fails, whether
    /// the first was served from the chain or from the cache. The
    /// precondition checks run before any state changes, so a rejected call
    /// leaves the ratchet untouched.
    pub fn recv_key(&mut self, msg_num: u32) -> Result<Box<[u8; 32]>, Error> {
        // Out-of-order message whose key was derived earlier
        if let Some(key) = self.skipped_keys.remove(&msg_num) {
            return Ok(key);
        }

        let next = self.recv_chain.next_index();
        if msg_num < next {
            return Err(Error::AlreadyReceived(msg_num));
        }
        if msg_num - next > self.max_skip {
            return Err(Error::TooManySkipped(msg_num - next));
        }

        // Park the keys for the gap so earlier messages stay decryptable
        while self.recv_chain.next_index() < msg_num {
            let (skip_key, n) = self.recv_chain.step()?;
            self.skipped_keys.insert(n, skip_key);
        }

        let (message_key, _) = self.recv_chain.step()?;
        Ok(message_key)
    }

    /// Number of send steps consumed so far.
    pub fn send_msg_num(&self) -> u32 {
        self.send_chain.next_index()
    }

    /// Index of the next unconsumed receive step.
    pub fn recv_msg_num(&self) -> u32 {
        self.recv_chain.next_index()
    }
}
