//! Interface for the precompiles. It contains the precompile output type,
//! the precompile function type, and the precompile error type.
use core::fmt;
use primitives::Bytes;

/// Precompile execution output.
///
/// The gas is charged by the caller whether or not the call succeeded;
/// `bytes` is empty on any recoverable failure. A precompile never raises
/// an error to its caller: this pair is the sole channel for communicating
/// the outcome.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct PrecompileOutput {
    /// Gas to charge for the call.
    pub gas_used: u64,
    /// Output bytes.
    pub bytes: Bytes,
}

impl PrecompileOutput {
    /// Returns a new precompile output with the given gas used and output bytes.
    pub fn new(gas_used: u64, bytes: Bytes) -> Self {
        Self { gas_used, bytes }
    }

    /// Returns a failed precompile output: the given gas charge and empty bytes.
    pub fn empty(gas_used: u64) -> Self {
        Self {
            gas_used,
            bytes: Bytes::new(),
        }
    }
}

/// Precompile function type. Takes the input bytes and returns the precompile output.
pub type PrecompileFn = fn(&[u8]) -> PrecompileOutput;

/// Precompile error type.
///
/// These never cross a precompile boundary; each entry function absorbs
/// them into an empty [`PrecompileOutput`].
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum PrecompileError {
    /// The input length for blake2 is not exactly 213 bytes
    Blake2WrongLength,
    /// Blake2 wrong final indicator flag
    Blake2WrongFinalIndicatorFlag,
    /// Modexp length field does not fit the host word size
    ModexpLengthOverflow,
    /// Bn128 field coordinate is not a member of the field
    Bn128FieldPointNotAMember,
    /// Bn128 affine g failed to create
    Bn128AffineGFailedToCreate,
    /// Bn128 pairing input is not a multiple of the pair element length
    Bn128PairLength,
}

impl core::error::Error for PrecompileError {}

impl fmt::Display for PrecompileError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Blake2WrongLength => "wrong input length for blake2",
            Self::Blake2WrongFinalIndicatorFlag => "wrong final indicator flag for blake2",
            Self::ModexpLengthOverflow => "modexp length field overflow",
            Self::Bn128FieldPointNotAMember => "field point not a member of bn128 curve",
            Self::Bn128AffineGFailedToCreate => "failed to create affine g point for bn128 curve",
            Self::Bn128PairLength => "bn128 invalid pair length",
        };
        f.write_str(s)
    }
}
