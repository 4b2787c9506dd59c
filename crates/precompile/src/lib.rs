//! # eth-precompiles
//!
//! Implementations of the EVM precompiled contracts.
//!
//! Each precompile is a pure function from an input byte slice to a
//! [`PrecompileOutput`] carrying the gas to charge and the output bytes.
//! Failures never escape a precompile: a failed call reports its fixed
//! charge with empty output. Address dispatch is owned by the caller;
//! every module exposes its contract together with the canonical address
//! as a [`PrecompileWithAddress`] registration handle.
#![cfg_attr(not(test), warn(unused_crate_dependencies))]
#![cfg_attr(not(feature = "std"), no_std)]

#[macro_use]
#[cfg(not(feature = "std"))]
extern crate alloc as std;

pub mod blake2;
pub mod bn128;
pub mod hash;
pub mod identity;
pub mod interface;
pub mod modexp;
pub mod secp256k1;
pub mod utilities;

pub use interface::*;

use primitives::Address;

/// Linear gas cost over 32-byte input words: `word * ceil(len / 32) + base`.
pub fn calc_linear_cost_u32(len: usize, base: u64, word: u64) -> u64 {
    (len as u64).div_ceil(32) * word + base
}

/// A precompile function associated with its reserved address.
#[derive(Clone, Debug)]
pub struct PrecompileWithAddress(pub Address, pub PrecompileFn);

impl From<(Address, PrecompileFn)> for PrecompileWithAddress {
    fn from(value: (Address, PrecompileFn)) -> Self {
        PrecompileWithAddress(value.0, value.1)
    }
}

impl From<PrecompileWithAddress> for (Address, PrecompileFn) {
    fn from(value: PrecompileWithAddress) -> Self {
        (value.0, value.1)
    }
}

impl PrecompileWithAddress {
    /// Returns reference of address.
    #[inline]
    pub fn address(&self) -> &Address {
        &self.0
    }

    /// Returns reference of precompile.
    #[inline]
    pub fn precompile(&self) -> &PrecompileFn {
        &self.1
    }
}

/// Const function for making an address by concatenating the bytes from two given numbers.
///
/// Note that 32 + 128 = 160 = 20 bytes (the length of an address).
///
/// This function is used as a convenience for specifying the addresses of the various precompiles.
#[inline]
pub const fn u64_to_address(x: u64) -> Address {
    let x = x.to_be_bytes();
    Address::new([
        0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, x[0], x[1], x[2], x[3], x[4], x[5], x[6], x[7],
    ])
}

#[cfg(test)]
mod test {
    use super::*;
    use primitives::address;

    #[test]
    fn test_u64_to_address() {
        assert_eq!(
            u64_to_address(1),
            address!("0000000000000000000000000000000000000001")
        );
        assert_eq!(
            u64_to_address(0x0900),
            address!("0000000000000000000000000000000000000900")
        );
    }
}
