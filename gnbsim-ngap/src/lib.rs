//! NGAP (NG Application Protocol) message builders for a simulated gNB
//!
//! Builds the NGAP PDUs a gNB sends to the AMF and encodes them with
//! ASN.1 Aligned PER.
//!
//! # Modules
//!
//! - `codec` - Generated NGAP types and the APER encode/decode adapter
//! - `ies` - Information elements shared by several builders
//! - `transfer` - PDU session resource transfers, encoded separately and embedded as bytes
//! - `procedures` - One PDU builder per NGAP procedure

pub mod codec;
pub mod ies;
pub mod procedures;
pub mod transfer;

pub use codec::NgapCodecError;
pub use ies::UserLocation;
