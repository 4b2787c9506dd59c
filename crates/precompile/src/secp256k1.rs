//! `ecrecover` precompile.
//!
//! Depending on enabled features, it will use different implementations of `ecrecover`.
//! * [`secp256k1`](https://crates.io/crates/secp256k1) - uses the `bitcoin_secp256k1` lib, a C implementation of secp256k1 used in bitcoin core.
//!   It is faster than `k256` and enabled by default in std environments.
//! * [`k256`](https://crates.io/crates/k256) - a maintained pure rust lib, perfect for no_std environments.
//!
//! Input format:
//! [32 bytes for message hash][32 bytes for v][32 bytes for r][32 bytes for s]
//!
//! Output format:
//! [32 bytes for the recovered address, left-padded]

use crate::{utilities::right_pad, PrecompileOutput, PrecompileWithAddress};
use primitives::{Bytes, B256, B512};

cfg_if::cfg_if! {
    if #[cfg(feature = "secp256k1")] {
        mod bitcoin_secp256k1;
        pub use bitcoin_secp256k1::ecrecover;
    } else {
        mod k256;
        pub use self::k256::ecrecover;
    }
}

/// `ecrecover` precompile, containing address and function to run.
pub const ECRECOVER: PrecompileWithAddress =
    PrecompileWithAddress(crate::u64_to_address(1), ec_recover_run);

/// The cost of the operation, charged whether or not recovery succeeds.
///
/// Failure is cheap to detect but still charged at the full rate: the caller
/// cannot know in advance whether recovery would succeed without doing the work.
pub const ECRECOVER_BASE: u64 = 3_000;

/// `ecrecover` precompile function. Read more about input and output format in [this module docs](self).
pub fn ec_recover_run(input: &[u8]) -> PrecompileOutput {
    let input = right_pad::<128>(input);

    // `v` is a 32-byte big-endian integer that must fit a single byte,
    // and that byte must decode to a recovery id (27 or 28).
    if !(input[32..63].iter().all(|&b| b == 0) && matches!(input[63], 27 | 28)) {
        return PrecompileOutput::empty(ECRECOVER_BASE);
    }

    let msg = B256::from_slice(&input[0..32]);
    let recid = input[63] - 27;
    let sig = B512::from_slice(&input[64..128]);

    let out = match ecrecover(&sig, recid, &msg) {
        Ok(address_hash) => address_hash.to_vec().into(),
        Err(_) => Bytes::new(),
    };
    PrecompileOutput::new(ECRECOVER_BASE, out)
}
