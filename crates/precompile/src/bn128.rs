//! AltBN128 precompiles: point addition, scalar multiplication and pairing check.
use crate::{
    utilities::{bool_to_bytes32, right_pad},
    PrecompileError, PrecompileOutput, PrecompileWithAddress,
};
use bn::{AffineG1, AffineG2, Fq, Fq2, Group, Gt, G1, G2};
use primitives::{Address, Bytes};

/// Bn128 add precompile
pub mod add {
    use super::*;

    /// Bn128 add precompile address
    pub const ADDRESS: Address = crate::u64_to_address(6);

    /// Bn128 add precompile, containing address and function to run.
    pub const FUN: PrecompileWithAddress = PrecompileWithAddress(ADDRESS, run);

    /// Bn128 add precompile function.
    ///
    /// Gas is reported as 0: pricing is owned by the dispatch layer. A
    /// backend failure is absorbed into an empty output.
    pub fn run(input: &[u8]) -> PrecompileOutput {
        match super::run_add(input) {
            Ok(output) => PrecompileOutput::new(0, output),
            Err(_) => PrecompileOutput::empty(0),
        }
    }
}

/// Bn128 mul precompile
pub mod mul {
    use super::*;

    /// Bn128 mul precompile address
    pub const ADDRESS: Address = crate::u64_to_address(7);

    /// Bn128 mul precompile, containing address and function to run.
    pub const FUN: PrecompileWithAddress = PrecompileWithAddress(ADDRESS, run);

    /// Bn128 mul precompile function.
    ///
    /// Gas is reported as 0: pricing is owned by the dispatch layer. A
    /// backend failure is absorbed into an empty output.
    pub fn run(input: &[u8]) -> PrecompileOutput {
        match super::run_mul(input) {
            Ok(output) => PrecompileOutput::new(0, output),
            Err(_) => PrecompileOutput::empty(0),
        }
    }
}

/// Bn128 pair precompile
pub mod pair {
    use super::*;

    /// Bn128 pair precompile address
    pub const ADDRESS: Address = crate::u64_to_address(8);

    /// Bn128 pair precompile, containing address and function to run.
    pub const FUN: PrecompileWithAddress = PrecompileWithAddress(ADDRESS, run);

    /// Bn128 pair precompile function.
    ///
    /// Gas is reported as 0: pricing is owned by the dispatch layer. A
    /// backend failure is absorbed into an empty output.
    pub fn run(input: &[u8]) -> PrecompileOutput {
        match super::run_pair(input) {
            Ok(output) => PrecompileOutput::new(0, output),
            Err(_) => PrecompileOutput::empty(0),
        }
    }
}

/// Input length for the add operation.
/// `ADD` takes two uncompressed G1 points (64 bytes each).
pub const ADD_INPUT_LEN: usize = 64 + 64;

/// Input length for the multiplication operation.
/// `MUL` takes an uncompressed G1 point (64 bytes) and scalar (32 bytes).
pub const MUL_INPUT_LEN: usize = 64 + 32;

/// Pair element length.
/// `PAIR` elements are composed of an uncompressed G1 point (64 bytes) and an uncompressed G2 point
/// (128 bytes).
pub const PAIR_ELEMENT_LEN: usize = 64 + 128;

/// Reads a single `Fq` from the input slice.
///
/// # Panics
///
/// Panics if the input is not at least 32 bytes long.
#[inline]
pub fn read_fq(input: &[u8]) -> Result<Fq, PrecompileError> {
    Fq::from_slice(&input[..32]).map_err(|_| PrecompileError::Bn128FieldPointNotAMember)
}

/// Reads the `x` and `y` points from the input slice.
///
/// # Panics
///
/// Panics if the input is not at least 64 bytes long.
#[inline]
pub fn read_point(input: &[u8]) -> Result<G1, PrecompileError> {
    let px = read_fq(&input[0..32])?;
    let py = read_fq(&input[32..64])?;
    new_g1_point(px, py)
}

/// Creates a new `G1` point from the given `x` and `y` coordinates.
///
/// The all-zero point encodes the point at infinity.
pub fn new_g1_point(px: Fq, py: Fq) -> Result<G1, PrecompileError> {
    if px == Fq::zero() && py == Fq::zero() {
        Ok(G1::zero())
    } else {
        AffineG1::new(px, py)
            .map(Into::into)
            .map_err(|_| PrecompileError::Bn128AffineGFailedToCreate)
    }
}

/// Adds two G1 points.
///
/// The input window is two uncompressed G1 points: a longer input is
/// truncated to [`ADD_INPUT_LEN`] bytes, a shorter one zero-padded.
pub fn run_add(input: &[u8]) -> Result<Bytes, PrecompileError> {
    let input = right_pad::<ADD_INPUT_LEN>(input);

    let p1 = read_point(&input[..64])?;
    let p2 = read_point(&input[64..])?;

    let mut output = [0u8; 64];
    if let Some(sum) = AffineG1::from_jacobian(p1 + p2) {
        sum.x()
            .into_u256()
            .to_big_endian(&mut output[..32])
            .unwrap();
        sum.y()
            .into_u256()
            .to_big_endian(&mut output[32..])
            .unwrap();
    }

    Ok(output.into())
}

/// Multiplies a G1 point by a scalar.
///
/// The input window is an uncompressed G1 point followed by a 32-byte
/// scalar, truncated or zero-padded to [`MUL_INPUT_LEN`] bytes.
pub fn run_mul(input: &[u8]) -> Result<Bytes, PrecompileError> {
    let input = right_pad::<MUL_INPUT_LEN>(input);

    let p = read_point(&input[..64])?;

    // `Fr::from_slice` can only fail when the length is not 32.
    let fr = bn::Fr::from_slice(&input[64..96]).unwrap();

    let mut output = [0u8; 64];
    if let Some(mul) = AffineG1::from_jacobian(p * fr) {
        mul.x().into_u256().to_big_endian(&mut output[..32]).unwrap();
        mul.y().into_u256().to_big_endian(&mut output[32..]).unwrap();
    }

    Ok(output.into())
}

/// Runs the pairing-product check over the whole input.
///
/// The input is a sequence of (G1, G2) elements of [`PAIR_ELEMENT_LEN`]
/// bytes each; any other length is rejected. The output is a 32-byte
/// big-endian boolean; an empty input checks out trivially.
pub fn run_pair(input: &[u8]) -> Result<Bytes, PrecompileError> {
    if input.len() % PAIR_ELEMENT_LEN != 0 {
        return Err(PrecompileError::Bn128PairLength);
    }

    let success = if input.is_empty() {
        true
    } else {
        let elements = input.len() / PAIR_ELEMENT_LEN;

        let mut mul = Gt::one();
        for idx in 0..elements {
            let read_fq_at = |n: usize| {
                debug_assert!(n < PAIR_ELEMENT_LEN / 32);
                let start = idx * PAIR_ELEMENT_LEN + n * 32;
                // SAFETY: We're reading `6 * 32 == PAIR_ELEMENT_LEN` bytes from `input[idx..]`
                // per iteration. This is guaranteed to be in-bounds.
                let slice = unsafe { input.get_unchecked(start..start + 32) };
                Fq::from_slice(slice).map_err(|_| PrecompileError::Bn128FieldPointNotAMember)
            };
            let ax = read_fq_at(0)?;
            let ay = read_fq_at(1)?;
            let bay = read_fq_at(2)?;
            let bax = read_fq_at(3)?;
            let bby = read_fq_at(4)?;
            let bbx = read_fq_at(5)?;

            let a = new_g1_point(ax, ay)?;
            let b = {
                let ba = Fq2::new(bax, bay);
                let bb = Fq2::new(bbx, bby);
                if ba.is_zero() && bb.is_zero() {
                    G2::zero()
                } else {
                    G2::from(
                        AffineG2::new(ba, bb)
                            .map_err(|_| PrecompileError::Bn128AffineGFailedToCreate)?,
                    )
                }
            };

            mul = mul * bn::pairing(a, b);
        }

        mul == Gt::one()
    };
    Ok(bool_to_bytes32(success))
}
