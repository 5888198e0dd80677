//! ENS renewal referral claim inputs.
//!
//! * [`record`] builds the claim record and renders it as 4-space indented
//!   JSON.
//! * [`claims`] packs claim ids and checks a record against the circuit
//!   input rules.

pub mod claims;
pub mod record;

mod error;

pub use error::{InputError, Result};
