use std::fmt;

use tracing::info;

use crate::error::{InputError, Result};
use crate::record::ReferralClaimRecord;

/// Slot count of the referral circuit.
pub const MAX_CLAIMS: usize = 10;

/// Packed claim key `block * 2^128 + tx * 2^64 + log`.
///
/// Each component fits in 64 bits, so the derived lexicographic ordering is
/// the numeric ordering of the packed value.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ClaimId {
    pub block_number: u64,
    pub tx_idx: u64,
    pub log_idx: u64,
}

impl ClaimId {
    pub const ZERO: ClaimId = ClaimId {
        block_number: 0,
        tx_idx: 0,
        log_idx: 0,
    };

    pub fn new(block_number: u64, tx_idx: u64, log_idx: u64) -> Self {
        Self {
            block_number,
            tx_idx,
            log_idx,
        }
    }

    /// Big-endian 192-bit encoding.
    pub fn to_bytes(&self) -> [u8; 24] {
        let mut out = [0u8; 24];
        out[..8].copy_from_slice(&self.block_number.to_be_bytes());
        out[8..16].copy_from_slice(&self.tx_idx.to_be_bytes());
        out[16..].copy_from_slice(&self.log_idx.to_be_bytes());
        out
    }
}

impl fmt::Display for ClaimId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&hex::encode(self.to_bytes()))
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ClaimSummary {
    pub first: ClaimId,
    /// Id at slot `num_claims - 1`.
    pub last: ClaimId,
    pub live: usize,
}

pub fn claim_ids(record: &ReferralClaimRecord) -> Vec<ClaimId> {
    record
        .block_numbers
        .iter()
        .zip(&record.tx_idxs)
        .zip(&record.log_idxs)
        .map(|((&b, &t), &l)| ClaimId::new(b, t, l))
        .collect()
}

fn check_slots(field: &'static str, found: usize, expected: usize) -> Result<()> {
    if found != expected {
        return Err(InputError::SlotCount {
            field,
            expected,
            found,
        });
    }
    Ok(())
}

/// Checks `record` against the circuit input rules and summarizes its live
/// claims. Slots at or past `num_claims` are not inspected.
///
/// A live id must exceed the one before it unless it is [`ClaimId::ZERO`],
/// which the circuit cannot tell apart from a masked slot.
pub fn validate(record: &ReferralClaimRecord, max_claims: usize) -> Result<ClaimSummary> {
    let live = match usize::try_from(record.num_claims) {
        Ok(n) if n > 0 && n <= max_claims => n,
        _ => {
            return Err(InputError::ClaimCount {
                num_claims: record.num_claims,
                max_claims,
            })
        }
    };
    check_slots("block_numbers", record.block_numbers.len(), max_claims)?;
    check_slots("tx_idxs", record.tx_idxs.len(), max_claims)?;
    check_slots("log_idxs", record.log_idxs.len(), max_claims)?;

    let ids = claim_ids(record);
    let unordered = (1..live).find(|&i| ids[i] != ClaimId::ZERO && ids[i - 1] >= ids[i]);
    if let Some(index) = unordered {
        return Err(InputError::Unordered { index });
    }

    let summary = ClaimSummary {
        first: ids[0],
        last: ids[live - 1],
        live,
    };
    info!(
        live,
        first = %summary.first,
        last = %summary.last,
        referrer_id = record.referrer_id,
        "claim record valid"
    );
    Ok(summary)
}
