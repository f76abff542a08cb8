//! NGAP ASN.1 APER codec adapter
//!
//! The Rust types are generated at build time from `tools/ngap-17.9-gnb.asn`.
//! This module forwards to the generated codec and tags every failure with the
//! message or transfer being processed.

use asn1_codecs::aper::AperCodec;
use asn1_codecs::PerCodecData;
use gnbsim_common::logging::{log_ngap_message, Direction, HexDump};
use thiserror::Error;

/// Generated NGAP types
#[allow(
    missing_docs,
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    unused,
    non_camel_case_types,
    non_snake_case
)]
pub mod generated {
    include!(concat!(env!("OUT_DIR"), "/ngap.rs"));
}

pub use generated::*;

/// NGAP codec error types
#[derive(Debug, Error)]
pub enum NgapCodecError {
    /// The codec rejected a structure while encoding it
    #[error("APER encoding of {message} failed: {reason}")]
    EncodeError {
        /// PDU or transfer being encoded
        message: &'static str,
        /// Codec failure reason
        reason: String,
    },

    /// The codec could not decode the input bytes
    #[error("APER decoding of {message} failed: {reason}")]
    DecodeError {
        /// PDU or transfer being decoded
        message: &'static str,
        /// Codec failure reason
        reason: String,
    },
}

/// Encode an NGAP PDU to bytes using APER
pub fn encode_ngap_pdu(pdu: &NGAP_PDU) -> Result<Vec<u8>, NgapCodecError> {
    let message = message_name(pdu);
    let mut data = PerCodecData::new_aper();
    pdu.aper_encode(&mut data)
        .map_err(|e| NgapCodecError::EncodeError {
            message,
            reason: format!("{e:?}"),
        })?;
    let bytes = data.into_bytes();
    log_ngap_message(Direction::Tx, message, &bytes);
    Ok(bytes)
}

/// Decode an NGAP PDU from bytes using APER
pub fn decode_ngap_pdu(bytes: &[u8]) -> Result<NGAP_PDU, NgapCodecError> {
    let mut data = PerCodecData::from_slice_aper(bytes);
    NGAP_PDU::aper_decode(&mut data).map_err(|e| NgapCodecError::DecodeError {
        message: "NGAP-PDU",
        reason: format!("{e:?}"),
    })
}

/// Encode a standalone structure, typically a `*Transfer`, for embedding as
/// an OCTET STRING inside a PDU.
///
/// Extension markers are part of the generated types, so no separate
/// extension-aware mode is needed for extensible transfers.
pub fn encode_transfer<T: AperCodec>(
    transfer: &T,
    name: &'static str,
) -> Result<Vec<u8>, NgapCodecError> {
    let mut data = PerCodecData::new_aper();
    transfer
        .aper_encode(&mut data)
        .map_err(|e| NgapCodecError::EncodeError {
            message: name,
            reason: format!("{e:?}"),
        })?;
    let bytes = data.into_bytes();
    tracing::trace!(transfer = name, len = bytes.len(), hex = %HexDump(&bytes), "encoded transfer");
    Ok(bytes)
}

/// Decode a structure previously produced by [`encode_transfer`].
pub fn decode_transfer<T: AperCodec<Output = T>>(
    bytes: &[u8],
    name: &'static str,
) -> Result<T, NgapCodecError> {
    let mut data = PerCodecData::from_slice_aper(bytes);
    T::aper_decode(&mut data).map_err(|e| NgapCodecError::DecodeError {
        message: name,
        reason: format!("{e:?}"),
    })
}

/// Message name of a PDU, as used in logs and error context.
#[allow(unreachable_patterns)]
pub fn message_name(pdu: &NGAP_PDU) -> &'static str {
    match pdu {
        NGAP_PDU::InitiatingMessage(msg) => match &msg.value {
            InitiatingMessageValue::Id_InitialContextSetup(_) => "InitialContextSetupRequest",
            InitiatingMessageValue::Id_InitialUEMessage(_) => "InitialUEMessage",
            InitiatingMessageValue::Id_NGSetup(_) => "NGSetupRequest",
            InitiatingMessageValue::Id_PDUSessionResourceModifyIndication(_) => {
                "PDUSessionResourceModifyIndication"
            }
            InitiatingMessageValue::Id_PDUSessionResourceRelease(_) => {
                "PDUSessionResourceReleaseCommand"
            }
            InitiatingMessageValue::Id_PDUSessionResourceSetup(_) => {
                "PDUSessionResourceSetupRequest"
            }
            InitiatingMessageValue::Id_UEContextRelease(_) => "UEContextReleaseCommand",
            InitiatingMessageValue::Id_UplinkNASTransport(_) => "UplinkNASTransport",
            _ => "InitiatingMessage",
        },
        NGAP_PDU::SuccessfulOutcome(msg) => match &msg.value {
            SuccessfulOutcomeValue::Id_InitialContextSetup(_) => "InitialContextSetupResponse",
            SuccessfulOutcomeValue::Id_NGSetup(_) => "NGSetupResponse",
            SuccessfulOutcomeValue::Id_PDUSessionResourceModifyIndication(_) => {
                "PDUSessionResourceModifyConfirm"
            }
            SuccessfulOutcomeValue::Id_PDUSessionResourceRelease(_) => {
                "PDUSessionResourceReleaseResponse"
            }
            SuccessfulOutcomeValue::Id_PDUSessionResourceSetup(_) => {
                "PDUSessionResourceSetupResponse"
            }
            SuccessfulOutcomeValue::Id_UEContextRelease(_) => "UEContextReleaseComplete",
            _ => "SuccessfulOutcome",
        },
        NGAP_PDU::UnsuccessfulOutcome(msg) => match &msg.value {
            UnsuccessfulOutcomeValue::Id_InitialContextSetup(_) => "InitialContextSetupFailure",
            UnsuccessfulOutcomeValue::Id_NGSetup(_) => "NGSetupFailure",
            _ => "UnsuccessfulOutcome",
        },
        _ => "NGAP-PDU",
    }
}
