//! Error definitions shared across library modules.
//! Each type models a specific failure scenario (identifier decoding,
//! candump parsing, analysis configuration).
use thiserror_no_std::Error;

//==================================================================================IDENTIFIER_ERROR
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
/// Errors raised while building, decoding or mutating a CAN identifier.
pub enum IdentifierError {
    /// Value does not fit the bit width of the targeted field or identifier.
    #[error("Value {value:#X} out of range for {field} (max {max:#X})")]
    OutOfRange {
        field: &'static str,
        value: u32,
        max: u32,
    },
    /// Extended-only accessor used on an 11-bit identifier.
    #[error("Field {field} is not available on a CBFF (11-bit) identifier")]
    WrongFormat { field: &'static str },
    /// Requested PGN cannot be represented by the identifier fields.
    #[error("Invalid PGN {requested}: fields would encode {derived}")]
    InvalidPgn { requested: u32, derived: u32 },
    /// Identifier text is not a usable hexadecimal number.
    #[error("Malformed hex identifier: {reason}")]
    MalformedHex { reason: HexFault },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Reason a hexadecimal identifier string was rejected.
pub enum HexFault {
    /// Nothing left once the optional `0x` prefix is removed.
    Empty,
    /// More than eight hexadecimal digits.
    TooLong { digits: usize },
    /// Character outside `[0-9a-fA-F]`.
    InvalidDigit { position: usize },
}

impl core::fmt::Display for HexFault {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            HexFault::Empty => f.write_str("no digits"),
            HexFault::TooLong { digits } => write!(f, "{digits} digits, at most 8 allowed"),
            HexFault::InvalidDigit { position } => {
                write!(f, "invalid hex digit at position {position}")
            }
        }
    }
}

//==================================================================================CANDUMP_ERROR
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
/// Failures while decoding a candump log line (`(ts) channel id#data`).
pub enum CandumpError {
    /// The line ended before the named field.
    #[error("Missing {field} field")]
    MissingField { field: &'static str },
    /// More whitespace separated tokens than a candump line carries.
    #[error("Unexpected trailing field")]
    UnexpectedField,
    /// Timestamp is not a floating point number of seconds.
    #[error("Invalid timestamp")]
    InvalidTimestamp,
    /// Frame token has no `#` between identifier and payload.
    #[error("Missing '#' separator between identifier and data")]
    MissingSeparator,
    /// Identifier part could not be decoded.
    #[error(transparent)]
    Identifier(#[from] IdentifierError),
}

//==================================================================================READ_ERROR
#[cfg(feature = "std")]
#[derive(Error, Debug)]
/// Failures while iterating a candump log from a reader.
pub enum ReadError {
    /// A line could not be decoded; `line` is 1-based.
    #[error("Line {line}: {error}")]
    Line { line: usize, error: CandumpError },
    /// Underlying reader failed.
    #[error("I/O error: {0}")]
    Io(std::io::Error),
}

#[cfg(feature = "std")]
impl From<std::io::Error> for ReadError {
    fn from(err: std::io::Error) -> Self {
        ReadError::Io(err)
    }
}

//==================================================================================ANALYSIS_ERROR
#[derive(Error, Debug, Clone, PartialEq, Eq)]
/// Errors raised while preparing log analysis (PGN lists, configuration).
pub enum AnalysisError {
    /// A PGN of interest is not a decimal number within 24 bits.
    #[error("Invalid PGN token: {token}")]
    InvalidPgnToken { token: alloc::string::String },
}
