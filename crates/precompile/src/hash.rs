//! SHA2-256 and RIPEMD-160 hash precompiles.
use crate::{calc_linear_cost_u32, PrecompileOutput, PrecompileWithAddress};
use ripemd::Ripemd160;
use sha2::{Digest, Sha256};

/// SHA2-256 precompile, containing address and function to run.
pub const SHA256: PrecompileWithAddress =
    PrecompileWithAddress(crate::u64_to_address(2), sha256_run);

/// RIPEMD-160 precompile, containing address and function to run.
pub const RIPEMD160: PrecompileWithAddress =
    PrecompileWithAddress(crate::u64_to_address(3), ripemd160_run);

/// Computes the SHA2-256 hash of the input.
///
/// See: <https://ethereum.github.io/yellowpaper/paper.pdf>
/// See: <https://etherscan.io/address/0000000000000000000000000000000000000002>
pub fn sha256_run(input: &[u8]) -> PrecompileOutput {
    let gas_used = calc_linear_cost_u32(input.len(), 60, 12);
    let output = Sha256::digest(input);
    PrecompileOutput::new(gas_used, output.to_vec().into())
}

/// Computes the RIPEMD-160 hash of the input, left-padded to 32 bytes.
///
/// See: <https://ethereum.github.io/yellowpaper/paper.pdf>
/// See: <https://etherscan.io/address/0000000000000000000000000000000000000003>
pub fn ripemd160_run(input: &[u8]) -> PrecompileOutput {
    let gas_used = calc_linear_cost_u32(input.len(), 600, 120);
    let mut ret = [0u8; 32];
    ret[12..32].copy_from_slice(&Ripemd160::digest(input));
    PrecompileOutput::new(gas_used, ret.to_vec().into())
}
