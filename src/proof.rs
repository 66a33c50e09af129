// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! Merkle inclusion proofs.

use serde::{Deserialize, Serialize};

use crate::digest::{sha256, Digest};

/// Side of the sibling relative to the running hash.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// `current = SHA256(sibling || current)`
    Left,
    /// `current = SHA256(current || sibling)`
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProofStep {
    pub direction: Direction,
    pub sibling: Digest,
}

impl ProofStep {
    pub fn left(sibling: Digest) -> Self {
        Self { direction: Direction::Left, sibling }
    }

    pub fn right(sibling: Digest) -> Self {
        Self { direction: Direction::Right, sibling }
    }

    fn apply(&self, current: &Digest) -> Digest {
        match self.direction {
            Direction::Left => sha256(&[self.sibling.as_bytes(), current.as_bytes()]),
            Direction::Right => sha256(&[current.as_bytes(), self.sibling.as_bytes()]),
        }
    }
}

/// Folds `proof` (leaf-adjacent first) over `leaf`.
///
/// An empty proof is a one-entry tree: the leaf is the root.
pub fn fold_root(leaf: &Digest, proof: &[ProofStep]) -> Digest {
    proof.iter().fold(*leaf, |current, step| step.apply(&current))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_left_and_right_differ() {
        let leaf = Digest([7; 32]);
        let sib = Digest([9; 32]);
        assert_ne!(
            fold_root(&leaf, &[ProofStep::left(sib)]),
            fold_root(&leaf, &[ProofStep::right(sib)])
        );
    }

    #[test]
    fn test_single_right_step() {
        let leaf = Digest([7; 32]);
        let sib = Digest([9; 32]);
        let expected = sha256(&[&[7u8; 32], &[9u8; 32]]);
        assert_eq!(fold_root(&leaf, &[ProofStep::right(sib)]), expected);
    }
}
