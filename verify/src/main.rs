// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
use clap::Parser;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use serde::Serialize;
use anyhow::{Context, Result};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use ledger_receipt::wire::parse_receipt_json;
use ledger_receipt::{
    NodeTrust, Operation, OperationKind, ReceiptError, ReceiptResult, ReceiptVerifier,
    ServiceEndorsement, VerifiedReceipt,
};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Receipt JSON (GetReceiptResponse or bare receipt)
    receipt: PathBuf,

    /// Operation the receipt should attest to: put, delete_range or txn
    #[arg(long)]
    kind: String,

    /// Request body as protobuf JSON
    #[arg(long)]
    request: PathBuf,

    /// Response body as protobuf JSON, as returned by the service
    #[arg(long)]
    response: PathBuf,

    /// Service identity certificate (PEM). Without it any signing node is accepted.
    #[arg(long)]
    service_cert: Option<PathBuf>,
}

#[derive(Serialize, Debug, PartialEq)]
#[serde(tag = "verdict", rename_all = "snake_case")]
enum Report {
    Verified(VerifiedReceipt),
    Rejected {
        error: &'static str,
        service_fault: bool,
        message: String,
    },
}

impl From<ReceiptResult<VerifiedReceipt>> for Report {
    fn from(result: ReceiptResult<VerifiedReceipt>) -> Self {
        match result {
            Ok(verified) => Report::Verified(verified),
            Err(e) => Report::Rejected {
                error: e.kind(),
                service_fault: e.is_service_fault(),
                message: e.to_string(),
            },
        }
    }
}

fn init_logging() {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "ledger_receipt=info,receipt_verify=info".into()),
        ))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn read_json(path: &Path) -> Result<serde_json::Value> {
    let text = fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("{} is not valid JSON", path.display()))
}

fn run_with<T: NodeTrust>(
    verifier: &ReceiptVerifier<T>,
    receipt: &str,
    operation: &Operation,
) -> ReceiptResult<VerifiedReceipt> {
    verifier.verify_json(parse_receipt_json(receipt)?, operation)
}

/// Everything after file I/O: decode, build the operation, verify.
fn check(
    receipt: &str,
    kind: &str,
    request: &serde_json::Value,
    response: &serde_json::Value,
    service_cert: Option<&[u8]>,
) -> ReceiptResult<VerifiedReceipt> {
    let kind: OperationKind = kind.parse()?;
    let operation = Operation::from_json(kind, request, response)?;

    match service_cert {
        Some(pem) => {
            let verifier = ReceiptVerifier::with_trust(ServiceEndorsement::from_certificate(pem)?);
            run_with(&verifier, receipt, &operation)
        }
        None => run_with(&ReceiptVerifier::new(), receipt, &operation),
    }
}

fn main() -> Result<ExitCode> {
    let args = Args::parse();
    init_logging();

    let receipt = fs::read_to_string(&args.receipt)
        .with_context(|| format!("Failed to read receipt {}", args.receipt.display()))?;
    let request = read_json(&args.request)?;
    let response = read_json(&args.response)?;
    let service_cert = args
        .service_cert
        .as_deref()
        .map(|path| fs::read(path).with_context(|| format!("Failed to read {}", path.display())))
        .transpose()?;

    if service_cert.is_none() {
        tracing::info!("No service certificate given; accepting any signing node");
    }

    let result = check(&receipt, &args.kind, &request, &response, service_cert.as_deref());
    let accepted = result.is_ok();
    if let Err(e @ ReceiptError::MalformedReceipt(_)) = &result {
        tracing::error!("Could not decode {}: {}", args.receipt.display(), e);
    }

    println!("{}", serde_json::to_string_pretty(&Report::from(result))?);

    Ok(if accepted { ExitCode::SUCCESS } else { ExitCode::FAILURE })
}
