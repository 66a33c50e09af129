// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
use proptest::prelude::*;

use crate::digest::Digest;
use crate::leaf::{build_leaf, CommitEvidence, LeafComponents};
use crate::proof::{fold_root, Direction, ProofStep};

fn arb_step() -> impl Strategy<Value = ProofStep> {
    (any::<bool>(), any::<[u8; 32]>()).prop_map(|(left, sibling)| ProofStep {
        direction: if left { Direction::Left } else { Direction::Right },
        sibling: Digest(sibling),
    })
}

fn flip(d: &Digest, bit: usize) -> Digest {
    let mut bytes = d.0;
    bytes[bit / 8] ^= 1 << (bit % 8);
    Digest(bytes)
}

proptest! {
    #[test]
    fn proptest_empty_proof_is_identity(leaf in any::<[u8; 32]>()) {
        prop_assert_eq!(fold_root(&Digest(leaf), &[]), Digest(leaf));
    }

    #[test]
    fn proptest_order_sensitivity(
        leaf in any::<[u8; 32]>(),
        steps in prop::collection::vec(arb_step(), 2..8),
    ) {
        let reversed: Vec<ProofStep> = steps.iter().rev().copied().collect();
        prop_assume!(reversed != steps);
        prop_assert_ne!(fold_root(&Digest(leaf), &steps), fold_root(&Digest(leaf), &reversed));
    }

    #[test]
    fn proptest_direction_sensitivity(
        leaf in any::<[u8; 32]>(),
        steps in prop::collection::vec(arb_step(), 1..8),
        pick in any::<prop::sample::Index>(),
    ) {
        let mut flipped = steps.clone();
        let step = &mut flipped[pick.index(steps.len())];
        step.direction = match step.direction {
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        };
        prop_assert_ne!(fold_root(&Digest(leaf), &steps), fold_root(&Digest(leaf), &flipped));
    }

    #[test]
    fn proptest_sibling_bit_flip_changes_root(
        leaf in any::<[u8; 32]>(),
        steps in prop::collection::vec(arb_step(), 1..8),
        pick in any::<prop::sample::Index>(),
        bit in 0usize..256,
    ) {
        let mut tampered = steps.clone();
        let i = pick.index(steps.len());
        tampered[i].sibling = flip(&tampered[i].sibling, bit);
        prop_assert_ne!(fold_root(&Digest(leaf), &steps), fold_root(&Digest(leaf), &tampered));
    }

    #[test]
    fn proptest_leaf_component_bit_flip_changes_leaf(
        ws in any::<[u8; 32]>(),
        cd in any::<[u8; 32]>(),
        nonce in "[0-9a-f]{64}",
        bit in 0usize..256,
    ) {
        let ce = format!("ce:2.11:{nonce}");
        let leaf = build_leaf(&Digest(ws), &ce, &Digest(cd));
        prop_assert_ne!(leaf, build_leaf(&flip(&Digest(ws), bit), &ce, &Digest(cd)));
        prop_assert_ne!(leaf, build_leaf(&Digest(ws), &ce, &flip(&Digest(cd), bit)));

        let mut ce_bytes = ce.clone().into_bytes();
        let n = ce_bytes.len();
        ce_bytes[bit % n] ^= 1;
        let tampered_ce = String::from_utf8(ce_bytes).unwrap();
        prop_assert_ne!(leaf, build_leaf(&Digest(ws), &tampered_ce, &Digest(cd)));
    }
}

#[test]
fn test_leaf_matches_components() {
    let components = LeafComponents {
        write_set_digest: Digest([1; 32]),
        commit_evidence: CommitEvidence("ce:2.11:abcdef".into()),
        claims_digest: Digest([3; 32]),
    };
    assert_eq!(
        components.leaf(),
        build_leaf(&Digest([1; 32]), "ce:2.11:abcdef", &Digest([3; 32]))
    );
}

#[test]
fn test_commit_evidence_hashed_verbatim() {
    // the `ce:` prefix is part of the preimage
    let ws = Digest([0; 32]);
    let cd = Digest([0; 32]);
    assert_ne!(build_leaf(&ws, "ce:2.11:ab", &cd), build_leaf(&ws, "2.11:ab", &cd));
}

#[test]
fn test_fold_three_left_steps_by_hand() {
    use crate::digest::sha256;

    let leaf = Digest([0xAA; 32]);
    let s: Vec<Digest> = (1u8..=3).map(|i| Digest([i; 32])).collect();
    let proof: Vec<ProofStep> = s.iter().copied().map(ProofStep::left).collect();

    let h1 = sha256(&[s[0].as_bytes(), leaf.as_bytes()]);
    let h2 = sha256(&[s[1].as_bytes(), h1.as_bytes()]);
    let h3 = sha256(&[s[2].as_bytes(), h2.as_bytes()]);
    assert_eq!(fold_root(&leaf, &proof), h3);
}
