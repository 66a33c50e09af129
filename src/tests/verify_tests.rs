// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
use serde_json::json;

use crate::claims::Operation;
use crate::digest::Digest;
use crate::error::ReceiptError;
use crate::leaf::{CommitEvidence, TxId};
use crate::receipt::Receipt;
use crate::tests::fixtures::{load, load_all, ENDORSED};
use crate::trust::ServiceEndorsement;
use crate::verify::ReceiptVerifier;
use crate::wire::parse_receipt;

fn flip_byte(d: &Digest, i: usize) -> Digest {
    let mut bytes = d.0;
    bytes[i] ^= 0x01;
    Digest(bytes)
}

fn assert_rejected(verifier: &ReceiptVerifier, receipt: &Receipt, op: &Operation, what: &str) {
    match verifier.verify(receipt, op) {
        Err(ReceiptError::SignatureInvalid) | Err(ReceiptError::ClaimsMismatch { .. }) => {}
        other => panic!("{what}: expected rejection, got {other:?}"),
    }
}

#[test]
fn test_every_fixture_verifies_without_trust_policy() {
    let verifier = ReceiptVerifier::new();
    for (name, fx) in load_all() {
        let verified = verifier
            .verify(&fx.receipt, &fx.operation)
            .unwrap_or_else(|e| panic!("{name}: {e}"));
        assert_eq!(verified.leaf, fx.expected_leaf, "{name}");
        assert_eq!(verified.root, fx.expected_root, "{name}");
        assert_eq!(verified.node_id, fx.receipt.node_id, "{name}");
    }
}

#[test]
fn test_endorsed_fixtures_verify_against_service() {
    for name in ENDORSED {
        let fx = load(name);
        let service = ServiceEndorsement::from_certificate(fx.service_cert.as_bytes()).unwrap();
        let verifier = ReceiptVerifier::with_trust(service);
        let verified = verifier.verify(&fx.receipt, &fx.operation);
        assert!(verified.is_ok(), "{name}: {verified:?}");
    }
}

#[test]
fn test_benchmark_receipt() {
    let fx = load("put_benchmark");
    assert_eq!(fx.receipt.proof.len(), 3);
    let verified = ReceiptVerifier::new().verify(&fx.receipt, &fx.operation).unwrap();
    assert_eq!(verified.tx_id, Some(TxId { term: 2, revision: 11 }));
    assert_eq!(
        fx.receipt.leaf_components.claims_digest.to_hex(),
        "1e2ce1004f14e362833d5791b3d9702468d4a276665606349e9afb58b45365bd"
    );
}

#[test]
fn test_empty_proof_root_is_leaf() {
    let fx = load("put_empty_proof");
    assert!(fx.receipt.proof.is_empty());
    let verified = ReceiptVerifier::new().verify(&fx.receipt, &fx.operation).unwrap();
    assert_eq!(verified.root, verified.leaf);
}

#[test]
fn test_rogue_node_is_untrusted() {
    let fx = load("put_rogue_node");
    let service = ServiceEndorsement::from_certificate(fx.service_cert.as_bytes()).unwrap();
    let err = ReceiptVerifier::with_trust(service)
        .verify(&fx.receipt, &fx.operation)
        .unwrap_err();
    assert_eq!(err, ReceiptError::UntrustedNode(fx.receipt.node_id.clone()));
    assert!(err.is_service_fault());
}

#[test]
fn test_closure_trust_policy() {
    let fx = load("put_p384");
    let deny_all = ReceiptVerifier::with_trust(|_: &str, _: &[u8]| false);
    assert!(matches!(
        deny_all.verify(&fx.receipt, &fx.operation),
        Err(ReceiptError::UntrustedNode(_))
    ));
}

#[test]
fn test_tampered_leaf_components_rejected() {
    let verifier = ReceiptVerifier::new();
    for name in ENDORSED {
        let fx = load(name);
        for i in [0, 13, 31] {
            let mut r = fx.receipt.clone();
            r.leaf_components.write_set_digest = flip_byte(&r.leaf_components.write_set_digest, i);
            assert_rejected(&verifier, &r, &fx.operation, &format!("{name} write set byte {i}"));

            let mut r = fx.receipt.clone();
            r.leaf_components.claims_digest = flip_byte(&r.leaf_components.claims_digest, i);
            // the root moves with the leaf, so the signature gate catches it first
            assert_eq!(verifier.verify(&r, &fx.operation), Err(ReceiptError::SignatureInvalid), "{name}");
        }

        let evidence = fx.receipt.leaf_components.commit_evidence.as_str();
        let mut tampered = evidence.to_string();
        let last = tampered.pop().unwrap();
        tampered.push(if last == '0' { '1' } else { '0' });
        let mut r = fx.receipt.clone();
        r.leaf_components.commit_evidence = CommitEvidence(tampered);
        assert_rejected(&verifier, &r, &fx.operation, &format!("{name} commit evidence"));
    }
}

#[test]
fn test_tampered_proof_rejected() {
    let verifier = ReceiptVerifier::new();
    for name in ENDORSED {
        let fx = load(name);
        for i in 0..fx.receipt.proof.len() {
            let mut r = fx.receipt.clone();
            r.proof[i].sibling = flip_byte(&r.proof[i].sibling, 7);
            assert_rejected(&verifier, &r, &fx.operation, &format!("{name} sibling {i}"));
        }
        if fx.receipt.proof.len() > 1 {
            let mut r = fx.receipt.clone();
            r.proof.reverse();
            if r.proof != fx.receipt.proof {
                assert_rejected(&verifier, &r, &fx.operation, &format!("{name} reversed proof"));
            }
        }
        if !fx.receipt.proof.is_empty() {
            let mut r = fx.receipt.clone();
            r.proof.pop();
            assert_rejected(&verifier, &r, &fx.operation, &format!("{name} truncated proof"));
        }
    }
}

#[test]
fn test_tampered_signature_rejected() {
    let verifier = ReceiptVerifier::new();
    for name in ENDORSED {
        let fx = load(name);
        for i in 0..fx.receipt.signature.len() {
            let mut r = fx.receipt.clone();
            r.signature[i] ^= 0x80;
            assert_eq!(
                verifier.verify(&r, &fx.operation),
                Err(ReceiptError::SignatureInvalid),
                "{name} signature byte {i}"
            );
        }
        let mut r = fx.receipt.clone();
        r.signature.clear();
        assert_eq!(verifier.verify(&r, &fx.operation), Err(ReceiptError::SignatureInvalid));
    }
}

#[test]
fn test_wrong_certificate_rejected() {
    let verifier = ReceiptVerifier::new();
    let fx = load("put_p384");
    for other in ["put_benchmark", "delete_range_p256"] {
        let mut r = fx.receipt.clone();
        r.cert = load(other).receipt.cert;
        assert_eq!(verifier.verify(&r, &fx.operation), Err(ReceiptError::SignatureInvalid), "{other}");
    }

    let mut r = fx.receipt.clone();
    r.cert = b"-----BEGIN CERTIFICATE-----\nAAAA\n-----END CERTIFICATE-----\n".to_vec();
    assert!(matches!(
        verifier.verify(&r, &fx.operation),
        Err(ReceiptError::CertificateParse(_))
    ));
}

#[test]
fn test_mismatched_request_is_claims_mismatch() {
    let fx = load("put_benchmark");
    let op = Operation::from_json(fx.kind, &json!({"key": "Zm9v", "value": "YmF6"}), &fx.response).unwrap();
    match ReceiptVerifier::new().verify(&fx.receipt, &op) {
        Err(ReceiptError::ClaimsMismatch { expected, computed }) => {
            assert_eq!(expected, fx.receipt.leaf_components.claims_digest);
            assert_eq!(computed, op.claims_digest());
        }
        other => panic!("expected claims mismatch, got {other:?}"),
    }
}

#[test]
fn test_substituted_receipt_is_claims_mismatch() {
    let verifier = ReceiptVerifier::new();
    let benchmark = load("put_benchmark");
    let put = load("put_p384");
    let txn = load("txn_p384");

    // valid receipts, each attesting to some other write
    for (receipt, op) in [
        (&put.receipt, &benchmark.operation),
        (&benchmark.receipt, &put.operation),
        (&txn.receipt, &put.operation),
    ] {
        let err = verifier.verify(receipt, op).unwrap_err();
        assert!(matches!(err, ReceiptError::ClaimsMismatch { .. }), "{err:?}");
        assert!(err.is_service_fault());
    }
}

#[test]
fn test_verify_json_decode_errors() {
    let verifier = ReceiptVerifier::new();
    let fx = load("put_p384");

    let mut bad_digest = fx.receipt_json.clone();
    if let Some(leaf) = bad_digest.tx_receipt.as_mut().and_then(|t| t.leaf_components.as_mut()) {
        leaf.write_set_digest = Some("zz".repeat(32));
    }
    let err = verifier.verify_json(bad_digest, &fx.operation).unwrap_err();
    assert!(matches!(err, ReceiptError::MalformedReceipt(_)), "{err:?}");
    assert!(!err.is_service_fault());

    let mut no_leaf = fx.receipt_json.clone();
    if let Some(t) = no_leaf.tx_receipt.as_mut() {
        t.leaf_components = None;
    }
    assert!(matches!(
        verifier.verify_json(no_leaf, &fx.operation),
        Err(ReceiptError::MalformedReceipt(_))
    ));

    let mut no_proof = fx.receipt_json.clone();
    if let Some(t) = no_proof.tx_receipt.as_mut() {
        t.proof = None;
    }
    assert_eq!(
        verifier.verify_json(no_proof, &fx.operation),
        Err(ReceiptError::MalformedReceipt("missing txReceipt.proof".into()))
    );

    let mut bad_signature = fx.receipt_json.clone();
    bad_signature.signature = Some("%%%".into());
    assert!(matches!(
        verifier.verify_json(bad_signature, &fx.operation),
        Err(ReceiptError::MalformedReceipt(_))
    ));

    assert!(verifier.verify_json(fx.receipt_json.clone(), &fx.operation).is_ok());
}

#[test]
fn test_unknown_proof_direction_rejected() {
    let fx = load("put_p384");
    let mut value: serde_json::Value = serde_json::from_str(&fx.receipt_text).unwrap();
    value["receipt"]["txReceipt"]["proof"][0] = json!({"up": "00".repeat(32)});
    assert!(matches!(
        parse_receipt(&value.to_string()),
        Err(ReceiptError::MalformedReceipt(_))
    ));
}

#[test]
fn test_verify_batch_keeps_order() {
    let verifier = ReceiptVerifier::new();
    let fixtures = load_all();
    let benchmark = load("put_benchmark");

    let mut items: Vec<(Receipt, Operation)> = fixtures
        .iter()
        .map(|(_, fx)| (fx.receipt.clone(), fx.operation.clone()))
        .collect();
    items.push((fixtures[1].1.receipt.clone(), benchmark.operation.clone()));

    let results = verifier.verify_batch(&items);
    assert_eq!(results.len(), items.len());
    for ((name, fx), result) in fixtures.iter().zip(&results) {
        assert_eq!(result.as_ref().map(|v| v.root), Ok(fx.expected_root), "{name}");
    }
    assert!(matches!(results.last(), Some(Err(ReceiptError::ClaimsMismatch { .. }))));
}

#[test]
fn test_verification_is_deterministic() {
    let verifier = ReceiptVerifier::new();
    let fx = load("txn_p384");
    let first = verifier.verify(&fx.receipt, &fx.operation);
    for _ in 0..5 {
        assert_eq!(verifier.verify(&fx.receipt, &fx.operation), first);
    }
}
