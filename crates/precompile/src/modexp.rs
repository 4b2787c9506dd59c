//! ModExp precompile. Arbitrary-precision modular exponentiation over a
//! length-prefixed input encoding.
use crate::{
    utilities::{left_pad_vec, right_pad_with_offset, right_pad_with_offset_vec},
    PrecompileError, PrecompileOutput, PrecompileWithAddress,
};
use aurora_engine_modexp::modexp;
use primitives::{Bytes, U256};
use std::vec::Vec;

/// ModExp precompile, containing address and function to run.
pub const MODEXP: PrecompileWithAddress =
    PrecompileWithAddress(crate::u64_to_address(5), modexp_run);

/// Length of the length-field header: three 32-byte words.
pub const HEADER_LENGTH: usize = 96;

/// `modexp` precompile function.
///
/// Input format:
/// [32 bytes for base length][32 bytes for exponent length][32 bytes for modulus length]
/// [base][exponent][modulus]
///
/// Gas is reported as 0: the dynamic cost defined by EIP-2565 is computed by
/// the dispatch layer before execution.
pub fn modexp_run(input: &[u8]) -> PrecompileOutput {
    match run_inner(input) {
        Ok(bytes) => PrecompileOutput::new(0, bytes),
        Err(_) => PrecompileOutput::empty(0),
    }
}

fn run_inner(input: &[u8]) -> Result<Bytes, PrecompileError> {
    // The header is read through a zero-padded view. Length fields are
    // 32-byte big-endian integers, never machine words, so adversarially
    // large claims stay well-defined.
    let base_len = U256::from_be_bytes(*right_pad_with_offset::<32>(input, 0));
    let exp_len = U256::from_be_bytes(*right_pad_with_offset::<32>(input, 32));
    let mod_len = U256::from_be_bytes(*right_pad_with_offset::<32>(input, 64));

    if base_len.is_zero() && mod_len.is_zero() {
        return Ok(Bytes::new());
    }

    // A length claim that does not fit the host word size can neither address
    // real input bytes nor be allocated as output; it is malformed encoding.
    let base_len =
        usize::try_from(base_len).map_err(|_| PrecompileError::ModexpLengthOverflow)?;
    let exp_len = usize::try_from(exp_len).map_err(|_| PrecompileError::ModexpLengthOverflow)?;
    let mod_len = usize::try_from(mod_len).map_err(|_| PrecompileError::ModexpLengthOverflow)?;

    // Field offsets are computed in u128, which the usize lengths cannot overflow.
    let exp_offset = HEADER_LENGTH as u128 + base_len as u128;
    let mod_offset = exp_offset + exp_len as u128;

    let base = extract_parameter(input, HEADER_LENGTH as u128, base_len);
    let exponent = extract_parameter(input, exp_offset, exp_len);
    let modulus = extract_parameter(input, mod_offset, mod_len);

    // A zero modulus defines a zero-length result.
    if modulus.iter().all(|&b| b == 0) {
        return Ok(Bytes::new());
    }

    let output = modexp(&base, &exponent, &modulus);

    // The raw result is a minimal big-endian encoding, never longer than the
    // modulus; right-justify it into exactly `mod_len` bytes.
    Ok(left_pad_vec(&output, mod_len).into_owned().into())
}

/// Reads a big-endian parameter of `len` bytes starting at `offset`.
///
/// An offset at or beyond the real input yields zero; bytes past the real
/// input are implicitly zero.
fn extract_parameter(input: &[u8], offset: u128, len: usize) -> Vec<u8> {
    if offset >= input.len() as u128 {
        return Vec::new();
    }
    right_pad_with_offset_vec(input, offset as usize, len).into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use primitives::hex;

    #[test]
    fn eip_198_fermat_little_theorem() {
        // 3 ^ (p - 1) % p == 1 for the secp256k1 field prime.
        let input = hex!(
            "0000000000000000000000000000000000000000000000000000000000000001\
             0000000000000000000000000000000000000000000000000000000000000020\
             0000000000000000000000000000000000000000000000000000000000000020\
             03\
             fffffffffffffffffffffffffffffffffffffffffffffffffffffffefffffc2e\
             fffffffffffffffffffffffffffffffffffffffffffffffffffffffefffffc2f"
        );
        let expected =
            hex!("0000000000000000000000000000000000000000000000000000000000000001");

        let out = modexp_run(&input);
        assert_eq!(out.gas_used, 0);
        assert_eq!(out.bytes[..], expected);
    }

    #[test]
    fn eip_198_truncated_modulus_is_zero_extended() {
        // The modulus is declared as 32 bytes but only its first byte is
        // supplied; the missing bytes read as zero, so it is 2^255.
        let input = hex!(
            "0000000000000000000000000000000000000000000000000000000000000001\
             0000000000000000000000000000000000000000000000000000000000000002\
             0000000000000000000000000000000000000000000000000000000000000020\
             03\
             ffff\
             80"
        );
        let expected =
            hex!("3b01b01ac41f2d6e917c6d6a221ce793802469026d9ab7578fa2e79e4da6aaab");

        let out = modexp_run(&input);
        assert_eq!(out.bytes[..], expected);
    }

    #[test]
    fn zero_base_and_modulus_lengths() {
        let out = modexp_run(&[0u8; 96]);
        assert_eq!(out.gas_used, 0);
        assert!(out.bytes.is_empty());

        // A short all-zero header is padded to the same thing.
        let out = modexp_run(&[0u8; 5]);
        assert!(out.bytes.is_empty());
        let out = modexp_run(&[]);
        assert!(out.bytes.is_empty());
    }

    #[test]
    fn zero_to_the_zero_is_one() {
        // base_len = 0, exp_len = 0, mod_len = 1, modulus = 5.
        let mut input = [0u8; 97];
        input[95] = 1; // mod_len
        input[96] = 5; // modulus
        let out = modexp_run(&input);
        assert_eq!(out.bytes[..], [1]);

        // Same with a 32-byte modulus: the result is right-justified.
        let mut input = [0u8; 128];
        input[95] = 32;
        input[127] = 5;
        let out = modexp_run(&input);
        let mut expected = [0u8; 32];
        expected[31] = 1;
        assert_eq!(out.bytes[..], expected);
    }

    #[test]
    fn zero_modulus_yields_empty_output() {
        // base_len = exp_len = mod_len = 1, base = exp = 1, modulus = 0.
        let mut input = [0u8; 99];
        input[31] = 1;
        input[63] = 1;
        input[95] = 1;
        input[96] = 1; // base
        input[97] = 1; // exponent
        input[98] = 0; // modulus
        let out = modexp_run(&input);
        assert_eq!(out.gas_used, 0);
        assert!(out.bytes.is_empty());

        // Declared but absent modulus reads as zero as well.
        let out = modexp_run(&input[..98]);
        assert!(out.bytes.is_empty());
    }

    #[test]
    fn oversized_length_claim_is_malformed() {
        // base_len = 2^248 does not fit the host word size.
        let mut input = [0u8; 96];
        input[0] = 1;
        input[95] = 1; // mod_len = 1, but there is nothing to compute with
        let out = modexp_run(&input);
        assert_eq!(out.gas_used, 0);
        assert!(out.bytes.is_empty());
    }

    #[test]
    fn small_modexp() {
        // 3 ^ 5 % 7 == 5
        let mut input = [0u8; 99];
        input[31] = 1;
        input[63] = 1;
        input[95] = 1;
        input[96] = 3;
        input[97] = 5;
        input[98] = 7;
        let out = modexp_run(&input);
        assert_eq!(out.bytes[..], [5]);
    }
}
