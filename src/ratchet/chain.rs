use crate::error::Error;
use crate::kdf;
use zeroize::{Zeroize, ZeroizeOnDrop};

/// One direction of the ratchet: a chain key plus the index of the next
/// unconsumed step.
#[derive(Zeroize, ZeroizeOnDrop)]
pub(crate) struct Chain {
    key: Box<[u8; 32]>,
    next: u32,
}

impl Chain {
    pub(crate) fn new(key: Box<[u8; 32]>) -> Self {
        Self { key, next: 0 }
    }

    /// Index of the next unconsumed step.
    pub(crate) fn next_index(&self) -> u32 {
        self.next
    }

    /// Advances the chain one step and returns the message key together with
    /// the index it was derived at. The chain key is overwritten in place by
    /// its successor, so no stale copy outlives the step.
    pub(crate) fn step(&mut self) -> Result<(Box<[u8; 32]>, u32), Error> {
        let n = self.next;

        // Bind the step index into the derivation input
        let mut input = [0u8; 36];
        input[0..32].copy_from_slice(self.key.as_slice());
        input[32..36].copy_from_slice(&n.to_be_bytes());

        let mut message_key = Box::new([0u8; 32]);
        kdf::expand(&input, kdf::MESSAGE_KEY_INFO, message_key.as_mut_slice())?;
        kdf::expand(&input, kdf::NEXT_CHAIN_INFO, self.key.as_mut_slice())?;
        input.zeroize();

        self.next = n.wrapping_add(1);

        Ok((message_key, n))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_step_indices_ascend_from_zero() {
        let mut chain = Chain::new(Box::new([1u8; 32]));

        for expected in 0..5u32 {
            let (_, n) = chain.step().unwrap();
            assert_eq!(n, expected);
        }
        assert_eq!(chain.next_index(), 5);
    }

    #[test]
    fn test_step_keys_are_unique() {
        let mut chain = Chain::new(Box::new([1u8; 32]));

        let mut seen = Vec::new();
        for _ in 0..20 {
            let (key, _) = chain.step().unwrap();
            assert!(!seen.contains(&key));
            seen.push(key);
        }
    }

    #[test]
    fn test_identical_chains_stay_in_lockstep() {
        let mut left = Chain::new(Box::new([9u8; 32]));
        let mut right = Chain::new(Box::new([9u8; 32]));

        for _ in 0..10 {
            assert_eq!(left.step().unwrap(), right.step().unwrap());
        }
    }
}
