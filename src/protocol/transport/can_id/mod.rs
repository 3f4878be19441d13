//! Decoding and encoding of SAE J1939 CAN arbitration identifiers.
//!
//! Two frame formats share the bus:
//!
//! - **CEFF** (29 bits), the standardized J1939 layout;
//! - **CBFF** (11 bits), classical frames whose layout is proprietary and only
//!   carries a priority and a source address.
//!
//! # Bit layout (MSB first)
//!
//! ```text
//! CEFF  | priority | EDP | DP |   PF   |   PS   |   SA   |
//! bits  |  0 - 2   |  3  |  4 | 5 - 12 | 13 - 20| 21 - 28|
//!
//! CBFF  | priority |   SA   |
//! bits  |  0 - 2   | 3 - 10 |
//! ```
//!
//! The Parameter Group Number is derived from EDP, DP, PF and PS. When PF is
//! below 240 (PDU1) the PS byte carries a destination address and does not
//! take part in the PGN; from 240 upward (PDU2) PS is a group extension and
//! the destination is implicitly global (255).
//!
//! [`StandardIdentifier`] and [`ExtendedIdentifier`] only expose the fields
//! that exist for their format. [`Identifier`] erases the format (as read from
//! a log) and reports [`IdentifierError::WrongFormat`] when an extended-only
//! field is requested on an 11-bit identifier.
use alloc::collections::BTreeMap;
use alloc::format;
use alloc::string::String;
use core::fmt;
use core::str::FromStr;

use embedded_can::{ExtendedId, Id, StandardId};

use crate::error::{HexFault, IdentifierError};
use crate::infra::codec::bits::{padded_hex_digits, word_mask, BitField};

//==================================================================================CONSTANTS
/// Width of a CBFF identifier.
pub const STANDARD_WIDTH: u8 = 11;
/// Width of a CEFF identifier.
pub const EXTENDED_WIDTH: u8 = 29;
/// Largest raw CBFF identifier.
pub const STANDARD_MAX: u32 = 0x7FF;
/// Largest raw CEFF identifier.
pub const EXTENDED_MAX: u32 = 0x1FFF_FFFF;
/// Largest value a 24-bit PGN can take.
pub const PGN_MAX: u32 = 0xFF_FFFF;
/// First PDU format value of the broadcast (PDU2) range.
pub const PDU2_PF_START: u8 = 240;
/// Global destination address.
pub const GLOBAL_ADDRESS: u8 = 0xFF;
/// ISO address claim, carrying the 64-bit NAME of a node.
pub const NAME_PGN: u32 = 60928;
/// Priority used when none is provided.
pub const DEFAULT_PRIORITY: u8 = 3;

const MAX_HEX_DIGITS: usize = 8;
// Identifier text of at most four characters, `0x` included, is a classical frame.
const MAX_STANDARD_TEXT_LEN: usize = 4;

/// Field positions inside identifier words and inside the 24-bit PGN.
mod layout {
    use crate::infra::codec::bits::BitField;

    pub const PRIORITY: BitField = BitField::new(0, 3);
    pub const EDP: BitField = BitField::new(3, 1);
    pub const DP: BitField = BitField::new(4, 1);
    pub const PF: BitField = BitField::new(5, 8);
    pub const PS: BitField = BitField::new(13, 8);
    pub const SA: BitField = BitField::new(21, 8);

    pub const STANDARD_SA: BitField = BitField::new(3, 8);

    pub const PGN_WIDTH: u8 = 24;
    pub const PGN_EDP: BitField = BitField::new(6, 1);
    pub const PGN_DP: BitField = BitField::new(7, 1);
    pub const PGN_PF: BitField = BitField::new(8, 8);
    pub const PGN_PS: BitField = BitField::new(16, 8);
}

fn out_of_range(field: &'static str, value: u32, bits: BitField) -> IdentifierError {
    IdentifierError::OutOfRange {
        field,
        value,
        max: bits.max(),
    }
}

fn check(field: &'static str, value: u8, bits: BitField) -> Result<u32, IdentifierError> {
    let value = value as u32;
    if bits.fits(value) {
        Ok(value)
    } else {
        Err(out_of_range(field, value, bits))
    }
}

/// Value of identifier text, with or without a `0x`/`0X` prefix.
fn parse_hex(text: &str) -> Result<u32, IdentifierError> {
    let digits = text
        .strip_prefix("0x")
        .or_else(|| text.strip_prefix("0X"))
        .unwrap_or(text);

    let malformed = |reason| IdentifierError::MalformedHex { reason };
    if digits.is_empty() {
        return Err(malformed(HexFault::Empty));
    }
    if let Some(position) = digits.bytes().position(|b| !b.is_ascii_hexdigit()) {
        return Err(malformed(HexFault::InvalidDigit { position }));
    }
    if digits.len() > MAX_HEX_DIGITS {
        return Err(malformed(HexFault::TooLong {
            digits: digits.len(),
        }));
    }
    // At most eight validated digits always fit a u32.
    let value = u32::from_str_radix(digits, 16)
        .map_err(|_| malformed(HexFault::InvalidDigit { position: 0 }))?;
    Ok(value)
}

//==================================================================================FRAME_FORMAT
/// Arbitration identifier format, fixed for the lifetime of an identifier.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FrameFormat {
    /// CBFF, 11-bit identifier.
    Standard,
    /// CEFF, 29-bit identifier.
    Extended,
}

impl FrameFormat {
    /// Number of identifier bits.
    pub const fn width(self) -> u8 {
        match self {
            FrameFormat::Standard => STANDARD_WIDTH,
            FrameFormat::Extended => EXTENDED_WIDTH,
        }
    }

    /// Largest raw identifier for this format.
    pub const fn max(self) -> u32 {
        match self {
            FrameFormat::Standard => STANDARD_MAX,
            FrameFormat::Extended => EXTENDED_MAX,
        }
    }

    /// Short tag used in diagnostics (`"cbff"` / `"ceff"`).
    pub const fn tag(self) -> &'static str {
        match self {
            FrameFormat::Standard => "cbff",
            FrameFormat::Extended => "ceff",
        }
    }
}

//==================================================================================PDU_TYPE
/// Addressing mode selected by the PDU format byte.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PduType {
    /// PF < 240: destination specific, PS holds the destination address.
    Pdu1,
    /// PF ≥ 240: broadcast, PS is the group extension of the PGN.
    Pdu2,
}

impl PduType {
    /// Classify a PDU format byte. `0` is a regular PDU1 value.
    pub const fn from_pf(pf: u8) -> Self {
        if pf < PDU2_PF_START {
            PduType::Pdu1
        } else {
            PduType::Pdu2
        }
    }

    /// Numeric form used by J1939 documents (1 or 2).
    pub const fn as_u8(self) -> u8 {
        match self {
            PduType::Pdu1 => 1,
            PduType::Pdu2 => 2,
        }
    }
}

//==================================================================================DESTINATION_WRITE
/// Outcome of a destination address write.
///
/// The write always succeeds. On a PDU2 identifier the destination byte is
/// the group extension, so rewriting it selects another PGN; callers
/// that repurpose the byte on purpose can ignore the [`PgnAltered`] report.
///
/// [`PgnAltered`]: DestinationWrite::PgnAltered
#[must_use]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DestinationWrite {
    /// PDU1 identifier, the destination address was updated.
    Applied,
    /// PDU2 identifier, the PS byte was rewritten and the PGN changed.
    PgnAltered { previous: u32, current: u32 },
}

impl DestinationWrite {
    /// Whether the write changed the PGN.
    pub const fn alters_pgn(&self) -> bool {
        matches!(self, DestinationWrite::PgnAltered { .. })
    }
}

//==================================================================================STANDARD_IDENTIFIER
/// CBFF (11-bit) identifier: priority and source address only.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct StandardIdentifier(u16);

impl StandardIdentifier {
    /// Build an identifier from its two fields.
    pub fn new(priority: u8, source_address: u8) -> Result<Self, IdentifierError> {
        let mut id = Self::default();
        id.set_priority(priority)?;
        id.set_sa(source_address);
        Ok(id)
    }

    /// Wrap a raw 11-bit value.
    pub fn from_raw(raw: u32) -> Result<Self, IdentifierError> {
        if raw > STANDARD_MAX {
            return Err(IdentifierError::OutOfRange {
                field: "can_id",
                value: raw,
                max: STANDARD_MAX,
            });
        }
        Ok(Self(raw as u16))
    }

    /// Raw 11-bit value.
    #[inline]
    pub const fn raw(&self) -> u16 {
        self.0
    }

    #[inline]
    fn read(&self, bits: BitField) -> u8 {
        bits.read(self.0 as u32, STANDARD_WIDTH) as u8
    }

    #[inline]
    fn write(&mut self, bits: BitField, value: u32) {
        self.0 = bits.write(self.0 as u32, STANDARD_WIDTH, value) as u16;
    }

    /// Priority (bits 0-2).
    pub fn priority(&self) -> u8 {
        self.read(layout::PRIORITY)
    }

    /// Set the priority, 0 (highest) to 7.
    pub fn set_priority(&mut self, priority: u8) -> Result<(), IdentifierError> {
        let value = check("priority", priority, layout::PRIORITY)?;
        self.write(layout::PRIORITY, value);
        Ok(())
    }

    /// Source address (bits 3-10).
    pub fn sa(&self) -> u8 {
        self.read(layout::STANDARD_SA)
    }

    pub fn set_sa(&mut self, source_address: u8) {
        self.write(layout::STANDARD_SA, source_address as u32);
    }
}

impl From<StandardId> for StandardIdentifier {
    fn from(id: StandardId) -> Self {
        Self(id.as_raw())
    }
}

impl From<StandardIdentifier> for StandardId {
    fn from(id: StandardIdentifier) -> Self {
        // SAFETY: every constructor and setter keeps the value within 11 bits.
        unsafe { StandardId::new_unchecked(id.0) }
    }
}

//==================================================================================EXTENDED_IDENTIFIER
/// CEFF (29-bit) identifier exposing every J1939 field.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ExtendedIdentifier(u32);

impl ExtendedIdentifier {
    /// Build an identifier from a priority, a PGN, a source and a destination.
    ///
    /// The destination is only written for PDU1 PGNs; PDU2 PGNs already fill
    /// the PS byte with their group extension.
    pub fn new(priority: u8, pgn: u32, sa: u8, da: u8) -> Result<Self, IdentifierError> {
        Self::builder(pgn, sa).priority(priority).destination(da).build()
    }

    /// Creates a pre-configured builder for a PGN and source address.
    pub fn builder(pgn: u32, source_address: u8) -> ExtendedIdentifierBuilder {
        ExtendedIdentifierBuilder::new(pgn, source_address)
    }

    /// Wrap a raw 29-bit value.
    pub fn from_raw(raw: u32) -> Result<Self, IdentifierError> {
        if raw > EXTENDED_MAX {
            return Err(IdentifierError::OutOfRange {
                field: "can_id",
                value: raw,
                max: EXTENDED_MAX,
            });
        }
        Ok(Self(raw))
    }

    /// Raw 29-bit value.
    #[inline]
    pub const fn raw(&self) -> u32 {
        self.0
    }

    #[inline]
    fn read(&self, bits: BitField) -> u8 {
        bits.read(self.0, EXTENDED_WIDTH) as u8
    }

    #[inline]
    fn write(&mut self, bits: BitField, value: u32) {
        self.0 = bits.write(self.0, EXTENDED_WIDTH, value);
    }

    // Getters and setters mapped on the layout table

    /// Priority (bits 0-2), 0 is the highest.
    pub fn priority(&self) -> u8 {
        self.read(layout::PRIORITY)
    }

    pub fn set_priority(&mut self, priority: u8) -> Result<(), IdentifierError> {
        let value = check("priority", priority, layout::PRIORITY)?;
        self.write(layout::PRIORITY, value);
        Ok(())
    }

    /// Extended data page (bit 3).
    pub fn edp(&self) -> u8 {
        self.read(layout::EDP)
    }

    pub fn set_edp(&mut self, edp: u8) -> Result<(), IdentifierError> {
        let value = check("edp", edp, layout::EDP)?;
        self.write(layout::EDP, value);
        Ok(())
    }

    /// Data page (bit 4).
    pub fn dp(&self) -> u8 {
        self.read(layout::DP)
    }

    pub fn set_dp(&mut self, dp: u8) -> Result<(), IdentifierError> {
        let value = check("dp", dp, layout::DP)?;
        self.write(layout::DP, value);
        Ok(())
    }

    /// PDU format (bits 5-12).
    pub fn pf(&self) -> u8 {
        self.read(layout::PF)
    }

    pub fn set_pf(&mut self, pf: u8) {
        self.write(layout::PF, pf as u32);
    }

    /// PDU specific (bits 13-20): destination address or group extension.
    pub fn ps(&self) -> u8 {
        self.read(layout::PS)
    }

    pub fn set_ps(&mut self, ps: u8) {
        self.write(layout::PS, ps as u32);
    }

    /// Source address (bits 21-28).
    pub fn sa(&self) -> u8 {
        self.read(layout::SA)
    }

    pub fn set_sa(&mut self, sa: u8) {
        self.write(layout::SA, sa as u32);
    }

    /// Addressing mode derived from the PDU format.
    pub fn pdu_type(&self) -> PduType {
        PduType::from_pf(self.pf())
    }

    /// Destination address: PS for PDU1, [`GLOBAL_ADDRESS`] for PDU2.
    pub fn da(&self) -> u8 {
        match self.pdu_type() {
            PduType::Pdu1 => self.ps(),
            PduType::Pdu2 => GLOBAL_ADDRESS,
        }
    }

    /// Write the destination address into PS.
    ///
    /// On a PDU2 identifier this rewrites the group extension, so the PGN
    /// changes; the write still happens and the change is reported.
    pub fn set_da(&mut self, da: u8) -> DestinationWrite {
        match self.pdu_type() {
            PduType::Pdu1 => {
                self.set_ps(da);
                DestinationWrite::Applied
            }
            PduType::Pdu2 => {
                let previous = self.pgn();
                self.set_ps(da);
                let current = self.pgn();
                #[cfg(feature = "defmt")]
                defmt::warn!(
                    "Destination written on a PDU2 identifier: PGN {=u32} -> {=u32}",
                    previous,
                    current
                );
                DestinationWrite::PgnAltered { previous, current }
            }
        }
    }

    /// Parameter Group Number assembled from EDP, DP, PF and, for PDU2, PS.
    pub fn pgn(&self) -> u32 {
        let ps = match self.pdu_type() {
            PduType::Pdu1 => 0,
            PduType::Pdu2 => self.ps() as u32,
        };
        let mut pgn = layout::PGN_EDP.write(0, layout::PGN_WIDTH, self.edp() as u32);
        pgn = layout::PGN_DP.write(pgn, layout::PGN_WIDTH, self.dp() as u32);
        pgn = layout::PGN_PF.write(pgn, layout::PGN_WIDTH, self.pf() as u32);
        layout::PGN_PS.write(pgn, layout::PGN_WIDTH, ps)
    }

    /// Spread a PGN over EDP, DP, PF and PS.
    ///
    /// The decomposition is applied to a copy and checked by recomputing the
    /// PGN from it. A PGN that does not survive the round trip (PDU1 with a
    /// non-zero low byte, or any of the six top bits set) is rejected with
    /// [`IdentifierError::InvalidPgn`] and `self` is left unchanged.
    pub fn set_pgn(&mut self, pgn: u32) -> Result<(), IdentifierError> {
        if pgn > PGN_MAX {
            return Err(IdentifierError::OutOfRange {
                field: "pgn",
                value: pgn,
                max: PGN_MAX,
            });
        }

        let mut scratch = *self;
        scratch.write(layout::EDP, layout::PGN_EDP.read(pgn, layout::PGN_WIDTH));
        scratch.write(layout::DP, layout::PGN_DP.read(pgn, layout::PGN_WIDTH));
        scratch.write(layout::PF, layout::PGN_PF.read(pgn, layout::PGN_WIDTH));
        scratch.write(layout::PS, layout::PGN_PS.read(pgn, layout::PGN_WIDTH));

        let derived = scratch.pgn();
        if derived != pgn {
            return Err(IdentifierError::InvalidPgn {
                requested: pgn,
                derived,
            });
        }
        *self = scratch;
        Ok(())
    }
}

impl From<ExtendedId> for ExtendedIdentifier {
    fn from(id: ExtendedId) -> Self {
        Self(id.as_raw())
    }
}

impl From<ExtendedIdentifier> for ExtendedId {
    fn from(id: ExtendedIdentifier) -> Self {
        // SAFETY: every constructor and setter keeps the value within 29 bits.
        unsafe { ExtendedId::new_unchecked(id.0) }
    }
}

//==================================================================================EXTENDED_IDENTIFIER_BUILDER
#[derive(Debug, Clone)]
/// Fluent builder for [`ExtendedIdentifier`].
///
/// Defaults: priority [`DEFAULT_PRIORITY`], destination `0`.
pub struct ExtendedIdentifierBuilder {
    pub priority: u8,
    pub pgn: u32,
    pub source_address: u8,
    pub destination: u8,
}

impl ExtendedIdentifierBuilder {
    /// Initializes the builder for a given PGN and source address.
    pub fn new(pgn: u32, source_address: u8) -> Self {
        Self {
            priority: DEFAULT_PRIORITY,
            pgn,
            source_address,
            destination: 0,
        }
    }

    /// Sets the priority (3 bits); checked in [`build`](Self::build).
    pub fn priority(mut self, priority: u8) -> Self {
        self.priority = priority;
        self
    }

    /// Destination address, only used by PDU1 PGNs.
    pub fn destination(mut self, destination: u8) -> Self {
        self.destination = destination;
        self
    }

    /// Builds the identifier:
    /// - priority must fit 3 bits,
    /// - the PGN must round-trip through the identifier fields,
    /// - PDU1 identifiers receive the destination in PS.
    pub fn build(self) -> Result<ExtendedIdentifier, IdentifierError> {
        let mut id = ExtendedIdentifier::default();
        id.set_priority(self.priority)?;
        id.set_pgn(self.pgn)?;
        id.set_sa(self.source_address);
        if id.pdu_type() == PduType::Pdu1 {
            id.set_ps(self.destination);
        }
        Ok(id)
    }
}

//==================================================================================FIELD_VALUE
/// Value of one entry of [`Identifier::as_map`].
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(untagged))]
pub enum FieldValue {
    Number(u32),
    Text(String),
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Number(value) => write!(f, "{value}"),
            FieldValue::Text(text) => f.write_str(text),
        }
    }
}

//==================================================================================IDENTIFIER
/// Arbitration identifier of either format, as found in logs and on the bus.
///
/// # Example
///
/// ```
/// use j1939_id::protocol::transport::can_id::{FrameFormat, Identifier, NAME_PGN};
///
/// let id = Identifier::from_hex("18EEFF00").unwrap();
/// assert_eq!(id.format(), FrameFormat::Extended);
/// assert_eq!(id.pgn().unwrap(), NAME_PGN);
/// assert_eq!(id.da().unwrap(), 0xFF);
///
/// let short = Identifier::from_hex("7FF").unwrap();
/// assert_eq!(short.format(), FrameFormat::Standard);
/// assert!(short.pgn().is_err());
/// ```
#[derive(Clone, Copy, Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Identifier {
    Standard(StandardIdentifier),
    Extended(ExtendedIdentifier),
}

impl Default for Identifier {
    fn default() -> Self {
        Identifier::Extended(ExtendedIdentifier::default())
    }
}

impl Identifier {
    //------------------------------------------------------------------construction
    /// Decode identifier text such as `18FEF100`, `0x18FEF100` or `7FF`.
    ///
    /// The format is chosen from the text as given: at most four characters,
    /// prefix included, with a value of at most `0x7FF` gives a CBFF
    /// identifier, anything else is CEFF. `000007FF` and `0x7FF` are both
    /// 29-bit identifiers.
    pub fn from_hex(text: &str) -> Result<Self, IdentifierError> {
        let value = parse_hex(text)?;
        if text.len() <= MAX_STANDARD_TEXT_LEN && value <= STANDARD_MAX {
            StandardIdentifier::from_raw(value).map(Identifier::Standard)
        } else {
            ExtendedIdentifier::from_raw(value).map(Identifier::Extended)
        }
    }

    /// Wrap a raw value of the given format.
    pub fn from_raw(raw: u32, format: FrameFormat) -> Result<Self, IdentifierError> {
        match format {
            FrameFormat::Standard => StandardIdentifier::from_raw(raw).map(Identifier::Standard),
            FrameFormat::Extended => ExtendedIdentifier::from_raw(raw).map(Identifier::Extended),
        }
    }

    /// CEFF identifier from its J1939 fields, see [`ExtendedIdentifier::new`].
    pub fn new_extended(priority: u8, pgn: u32, sa: u8, da: u8) -> Result<Self, IdentifierError> {
        ExtendedIdentifier::new(priority, pgn, sa, da).map(Identifier::Extended)
    }

    /// CBFF identifier from a priority and a source address.
    pub fn new_standard(priority: u8, sa: u8) -> Result<Self, IdentifierError> {
        StandardIdentifier::new(priority, sa).map(Identifier::Standard)
    }

    /// Replace every bit from identifier text, keeping the current format.
    pub fn set_can_id(&mut self, text: &str) -> Result<(), IdentifierError> {
        let value = parse_hex(text)?;
        *self = Self::from_raw(value, self.format())?;
        Ok(())
    }

    //------------------------------------------------------------------format
    pub fn format(&self) -> FrameFormat {
        match self {
            Identifier::Standard(_) => FrameFormat::Standard,
            Identifier::Extended(_) => FrameFormat::Extended,
        }
    }

    pub fn is_standard(&self) -> bool {
        matches!(self, Identifier::Standard(_))
    }

    pub fn is_extended(&self) -> bool {
        matches!(self, Identifier::Extended(_))
    }

    /// Raw identifier value, at most 11 or 29 significant bits.
    pub fn raw(&self) -> u32 {
        match self {
            Identifier::Standard(id) => id.raw() as u32,
            Identifier::Extended(id) => id.raw(),
        }
    }

    /// Borrow the CEFF view, or report which field needed it.
    pub fn as_extended(&self, field: &'static str) -> Result<&ExtendedIdentifier, IdentifierError> {
        match self {
            Identifier::Extended(id) => Ok(id),
            Identifier::Standard(_) => Err(IdentifierError::WrongFormat { field }),
        }
    }

    fn as_extended_mut(
        &mut self,
        field: &'static str,
    ) -> Result<&mut ExtendedIdentifier, IdentifierError> {
        match self {
            Identifier::Extended(id) => Ok(id),
            Identifier::Standard(_) => Err(IdentifierError::WrongFormat { field }),
        }
    }

    //------------------------------------------------------------------fields present in both formats
    pub fn priority(&self) -> u8 {
        match self {
            Identifier::Standard(id) => id.priority(),
            Identifier::Extended(id) => id.priority(),
        }
    }

    pub fn set_priority(&mut self, priority: u8) -> Result<(), IdentifierError> {
        match self {
            Identifier::Standard(id) => id.set_priority(priority),
            Identifier::Extended(id) => id.set_priority(priority),
        }
    }

    pub fn sa(&self) -> u8 {
        match self {
            Identifier::Standard(id) => id.sa(),
            Identifier::Extended(id) => id.sa(),
        }
    }

    pub fn set_sa(&mut self, sa: u8) {
        match self {
            Identifier::Standard(id) => id.set_sa(sa),
            Identifier::Extended(id) => id.set_sa(sa),
        }
    }

    //------------------------------------------------------------------CEFF-only fields
    pub fn edp(&self) -> Result<u8, IdentifierError> {
        self.as_extended("edp").map(ExtendedIdentifier::edp)
    }

    pub fn set_edp(&mut self, edp: u8) -> Result<(), IdentifierError> {
        self.as_extended_mut("edp")?.set_edp(edp)
    }

    pub fn dp(&self) -> Result<u8, IdentifierError> {
        self.as_extended("dp").map(ExtendedIdentifier::dp)
    }

    pub fn set_dp(&mut self, dp: u8) -> Result<(), IdentifierError> {
        self.as_extended_mut("dp")?.set_dp(dp)
    }

    pub fn pf(&self) -> Result<u8, IdentifierError> {
        self.as_extended("pf").map(ExtendedIdentifier::pf)
    }

    pub fn set_pf(&mut self, pf: u8) -> Result<(), IdentifierError> {
        self.as_extended_mut("pf")?.set_pf(pf);
        Ok(())
    }

    pub fn ps(&self) -> Result<u8, IdentifierError> {
        self.as_extended("ps").map(ExtendedIdentifier::ps)
    }

    pub fn set_ps(&mut self, ps: u8) -> Result<(), IdentifierError> {
        self.as_extended_mut("ps")?.set_ps(ps);
        Ok(())
    }

    pub fn pdu_type(&self) -> Result<PduType, IdentifierError> {
        self.as_extended("pdu_type").map(ExtendedIdentifier::pdu_type)
    }

    pub fn da(&self) -> Result<u8, IdentifierError> {
        self.as_extended("da").map(ExtendedIdentifier::da)
    }

    /// See [`ExtendedIdentifier::set_da`].
    pub fn set_da(&mut self, da: u8) -> Result<DestinationWrite, IdentifierError> {
        Ok(self.as_extended_mut("da")?.set_da(da))
    }

    pub fn pgn(&self) -> Result<u32, IdentifierError> {
        self.as_extended("pgn").map(ExtendedIdentifier::pgn)
    }

    /// See [`ExtendedIdentifier::set_pgn`].
    pub fn set_pgn(&mut self, pgn: u32) -> Result<(), IdentifierError> {
        self.as_extended_mut("pgn")?.set_pgn(pgn)
    }

    //------------------------------------------------------------------rendering
    /// Hex digits once the identifier is padded to whole bytes (4 or 8).
    pub fn hex_digits(&self) -> usize {
        padded_hex_digits(self.format().width())
    }

    /// Uppercase hex, zero-padded to whole bytes, without prefix
    /// (`"07FF"`, `"18EEFF00"`).
    pub fn to_hex(&self) -> String {
        format!("{self}")
    }

    /// Raw bits, MSB first, exactly 11 or 29 characters.
    pub fn to_binary_string(&self) -> String {
        let width = self.format().width() as usize;
        format!("{:0width$b}", self.raw() & word_mask(width as u8))
    }

    /// Every field applicable to the format, keyed by name.
    pub fn as_map(&self) -> BTreeMap<&'static str, FieldValue> {
        let mut map = BTreeMap::new();
        map.insert("can_id", FieldValue::Text(self.to_hex()));
        map.insert("format", FieldValue::Text(String::from(self.format().tag())));
        map.insert("priority", FieldValue::Number(self.priority() as u32));
        map.insert("sa", FieldValue::Number(self.sa() as u32));
        if let Identifier::Extended(id) = self {
            map.insert("edp", FieldValue::Number(id.edp() as u32));
            map.insert("dp", FieldValue::Number(id.dp() as u32));
            map.insert("pf", FieldValue::Number(id.pf() as u32));
            map.insert("ps", FieldValue::Number(id.ps() as u32));
            map.insert("da", FieldValue::Number(id.da() as u32));
            map.insert("pgn", FieldValue::Number(id.pgn()));
            map.insert("pdu_type", FieldValue::Number(id.pdu_type().as_u8() as u32));
        }
        map
    }

    /// One-line report form: hex, priority, PGN, source and destination.
    ///
    /// ```text
    /// 18EEFF00    06 60928 00 --> 255
    /// 07FF    07 cbff 255 --> None
    /// ```
    pub fn summary_line(&self) -> String {
        match self {
            Identifier::Extended(id) => format!(
                "{}    {:02} {:05} {:02} --> {:02}",
                self,
                id.priority(),
                id.pgn(),
                id.sa(),
                id.da()
            ),
            Identifier::Standard(id) => {
                format!("{}    {:02} cbff {:02} --> None", self, id.priority(), id.sa())
            }
        }
    }

    /// Compare the padded hex renderings of both identifiers.
    ///
    /// CBFF identifiers always render four digits and CEFF eight, so two
    /// identifiers of different formats never compare equal.
    pub fn hex_eq(&self, other: &Identifier) -> bool {
        self.hex_digits() == other.hex_digits() && self.raw() == other.raw()
    }

    /// Identifier as understood by `embedded-can` drivers.
    pub fn to_embedded_id(&self) -> Id {
        match self {
            Identifier::Standard(id) => Id::Standard((*id).into()),
            Identifier::Extended(id) => Id::Extended((*id).into()),
        }
    }
}

/// Equality is [`Identifier::hex_eq`]: identifiers are equal when their
/// padded hex renderings are.
impl PartialEq for Identifier {
    fn eq(&self, other: &Self) -> bool {
        self.hex_eq(other)
    }
}

impl Eq for Identifier {}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:0width$X}", self.raw(), width = self.hex_digits())
    }
}

impl fmt::UpperHex for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}

impl FromStr for Identifier {
    type Err = IdentifierError;

    fn from_str(text: &str) -> Result<Self, Self::Err> {
        Self::from_hex(text)
    }
}

impl From<StandardIdentifier> for Identifier {
    fn from(id: StandardIdentifier) -> Self {
        Identifier::Standard(id)
    }
}

impl From<ExtendedIdentifier> for Identifier {
    fn from(id: ExtendedIdentifier) -> Self {
        Identifier::Extended(id)
    }
}

impl From<Id> for Identifier {
    fn from(id: Id) -> Self {
        match id {
            Id::Standard(id) => Identifier::Standard(id.into()),
            Id::Extended(id) => Identifier::Extended(id.into()),
        }
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for Identifier {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serde::Serialize::serialize(&self.as_map(), serializer)
    }
}
