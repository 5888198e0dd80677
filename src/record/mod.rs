//! Referral claim record: construction and JSON rendering.
//!
//! The record is the input file of the ENS renewal referral circuit. Each
//! slot `i` names a `NameRenewed` log through
//! `(block_numbers[i], tx_idxs[i], log_idxs[i])`; only the first
//! `num_claims` slots are live.

use std::io::{self, Write};

use serde::{Deserialize, Serialize};
use serde_json::ser::PrettyFormatter;
use sha2::{Digest, Sha256};
use tracing::{debug, info};

use crate::error::Result;

pub const DEFAULT_REPETITION_COUNT: usize = 10;
pub const DEFAULT_BLOCK_NUMBER: u64 = 5_147_955;
pub const DEFAULT_TX_IDX: u64 = 31;
pub const DEFAULT_LOG_IDX: u64 = 0;
pub const DEFAULT_REFERRER_ID: u64 = 1;
pub const DEFAULT_NUM_CLAIMS: u64 = 1;

const INDENT: &[u8] = b"    ";

/// Field order here is the serialized key order.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct ReferralClaimRecord {
    pub block_numbers: Vec<u64>,
    pub tx_idxs: Vec<u64>,
    pub log_idxs: Vec<u64>,
    pub referrer_id: u64,
    pub num_claims: u64,
}

impl ReferralClaimRecord {
    /// Default template repeated `count` times.
    pub fn repeated(count: usize) -> Self {
        ClaimTemplate::default().build(count)
    }

    /// Number of slots (the repetition count the record was built with).
    pub fn len(&self) -> usize {
        self.block_numbers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.block_numbers.is_empty()
    }
}

/// Per-slot constants plus the record-wide scalars.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ClaimTemplate {
    pub block_number: u64,
    pub tx_idx: u64,
    pub log_idx: u64,
    pub referrer_id: u64,
    pub num_claims: u64,
}

impl Default for ClaimTemplate {
    fn default() -> Self {
        Self {
            block_number: DEFAULT_BLOCK_NUMBER,
            tx_idx: DEFAULT_TX_IDX,
            log_idx: DEFAULT_LOG_IDX,
            referrer_id: DEFAULT_REFERRER_ID,
            num_claims: DEFAULT_NUM_CLAIMS,
        }
    }
}

impl ClaimTemplate {
    pub fn build(&self, count: usize) -> ReferralClaimRecord {
        debug!(count, block_number = self.block_number, "building claim record");
        ReferralClaimRecord {
            block_numbers: vec![self.block_number; count],
            tx_idxs: vec![self.tx_idx; count],
            log_idxs: vec![self.log_idx; count],
            referrer_id: self.referrer_id,
            num_claims: self.num_claims,
        }
    }
}

/// JSON with a 4-space indent, one array element per line.
pub fn render(record: &ReferralClaimRecord) -> Result<String> {
    let mut buf = Vec::new();
    let mut ser =
        serde_json::Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(INDENT));
    record.serialize(&mut ser)?;
    Ok(String::from_utf8(buf)?)
}

/// SHA-256 of the rendered text, hex encoded.
pub fn digest(rendered: &str) -> String {
    hex::encode(Sha256::digest(rendered.as_bytes()))
}

/// Renders `record` and writes it to `out` followed by a newline.
pub fn write_record<W: Write>(record: &ReferralClaimRecord, mut out: W) -> Result<()> {
    let text = render(record)?;
    info!(slots = record.len(), sha256 = %digest(&text), "emitting claim record");
    out.write_all(text.as_bytes())?;
    out.write_all(b"\n")?;
    out.flush()?;
    Ok(())
}

/// Builds the default record with `count` slots and prints it to stdout.
pub fn generate_and_print(count: usize) -> Result<()> {
    let stdout = io::stdout();
    write_record(&ReferralClaimRecord::repeated(count), stdout.lock())
}
