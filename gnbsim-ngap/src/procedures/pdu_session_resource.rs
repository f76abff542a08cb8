//! PDU Session Resource Procedures
//!
//! Implements the gNB side of the PDU session resource procedures defined in
//! 3GPP TS 38.413 Section 8.2:
//! - PDU Session Resource Setup Response (8.2.1)
//! - PDU Session Resource Release Response (8.2.2)
//! - PDU Session Resource Modify Indication (8.2.5)
//!
//! Each list item carries a transfer as opaque bytes. The transfers are
//! serialized beforehand, see [`crate::transfer`].

use crate::codec::generated::*;
use crate::codec::{encode_ngap_pdu, NgapCodecError};
use crate::transfer::{
    encode_pdu_session_resource_modify_indication_transfer,
    encode_pdu_session_resource_setup_response_transfer,
    PduSessionResourceModifyIndicationTransferParams,
    PduSessionResourceSetupResponseTransferParams,
};
use gnbsim_common::EMPTY_RELEASE_RESPONSE_TRANSFER;

// ============================================================================
// PDU Session Resource Setup Response
// ============================================================================

/// Parameters for building a PDU Session Resource Setup Response
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PduSessionResourceSetupResponseParams {
    /// AMF UE NGAP ID
    pub amf_ue_ngap_id: u64,
    /// RAN UE NGAP ID
    pub ran_ue_ngap_id: u32,
    /// PDU Session ID (0-255)
    pub pdu_session_id: u8,
    /// Encoded PDU Session Resource Setup Response Transfer
    pub transfer: Vec<u8>,
}

impl PduSessionResourceSetupResponseParams {
    /// Encodes the setup response transfer and wraps it for session
    /// `pdu_session_id`.
    pub fn with_transfer(
        amf_ue_ngap_id: u64,
        ran_ue_ngap_id: u32,
        pdu_session_id: u8,
        transfer: &PduSessionResourceSetupResponseTransferParams,
    ) -> Result<Self, NgapCodecError> {
        Ok(Self {
            amf_ue_ngap_id,
            ran_ue_ngap_id,
            pdu_session_id,
            transfer: encode_pdu_session_resource_setup_response_transfer(transfer)?,
        })
    }
}

/// Build a PDU Session Resource Setup Response PDU with one setup item
pub fn build_pdu_session_resource_setup_response(
    params: &PduSessionResourceSetupResponseParams,
) -> NGAP_PDU {
    NGAP_PDU::SuccessfulOutcome(SuccessfulOutcome {
        procedure_code: ProcedureCode(ID_PDU_SESSION_RESOURCE_SETUP),
        criticality: Criticality(Criticality::REJECT),
        value: SuccessfulOutcomeValue::Id_PDUSessionResourceSetup(PDUSessionResourceSetupResponse {
            protocol_i_es: PDUSessionResourceSetupResponseProtocolIEs(vec![
                PDUSessionResourceSetupResponseProtocolIEs_Entry {
                    id: ProtocolIE_ID(ID_AMF_UE_NGAP_ID),
                    criticality: Criticality(Criticality::IGNORE),
                    value: PDUSessionResourceSetupResponseProtocolIEs_EntryValue::Id_AMF_UE_NGAP_ID(
                        AMF_UE_NGAP_ID(params.amf_ue_ngap_id),
                    ),
                },
                PDUSessionResourceSetupResponseProtocolIEs_Entry {
                    id: ProtocolIE_ID(ID_RAN_UE_NGAP_ID),
                    criticality: Criticality(Criticality::IGNORE),
                    value: PDUSessionResourceSetupResponseProtocolIEs_EntryValue::Id_RAN_UE_NGAP_ID(
                        RAN_UE_NGAP_ID(params.ran_ue_ngap_id),
                    ),
                },
                PDUSessionResourceSetupResponseProtocolIEs_Entry {
                    id: ProtocolIE_ID(ID_PDU_SESSION_RESOURCE_SETUP_LIST_SU_RES),
                    criticality: Criticality(Criticality::IGNORE),
                    value: PDUSessionResourceSetupResponseProtocolIEs_EntryValue::Id_PDUSessionResourceSetupListSURes(
                        PDUSessionResourceSetupListSURes(vec![PDUSessionResourceSetupItemSURes {
                            pdu_session_id: PDUSessionID(params.pdu_session_id),
                            pdu_session_resource_setup_response_transfer:
                                PDUSessionResourceSetupItemSUResPDUSessionResourceSetupResponseTransfer(
                                    params.transfer.clone(),
                                ),
                            ie_extensions: None,
                        }]),
                    ),
                },
            ]),
        }),
    })
}

// ============================================================================
// PDU Session Resource Modify Indication
// ============================================================================

/// Parameters for building a PDU Session Resource Modify Indication
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PduSessionResourceModifyIndicationParams {
    /// AMF UE NGAP ID
    pub amf_ue_ngap_id: u64,
    /// RAN UE NGAP ID
    pub ran_ue_ngap_id: u32,
    /// PDU Session ID (0-255)
    pub pdu_session_id: u8,
    /// Encoded PDU Session Resource Modify Indication Transfer
    pub transfer: Vec<u8>,
}

impl PduSessionResourceModifyIndicationParams {
    /// Encodes the modify indication transfer and wraps it for session
    /// `pdu_session_id`.
    pub fn with_transfer(
        amf_ue_ngap_id: u64,
        ran_ue_ngap_id: u32,
        pdu_session_id: u8,
        transfer: &PduSessionResourceModifyIndicationTransferParams,
    ) -> Result<Self, NgapCodecError> {
        Ok(Self {
            amf_ue_ngap_id,
            ran_ue_ngap_id,
            pdu_session_id,
            transfer: encode_pdu_session_resource_modify_indication_transfer(transfer)?,
        })
    }
}

/// Build a PDU Session Resource Modify Indication PDU with one modify item
pub fn build_pdu_session_resource_modify_indication(
    params: &PduSessionResourceModifyIndicationParams,
) -> NGAP_PDU {
    NGAP_PDU::InitiatingMessage(InitiatingMessage {
        procedure_code: ProcedureCode(ID_PDU_SESSION_RESOURCE_MODIFY_INDICATION),
        criticality: Criticality(Criticality::REJECT),
        value: InitiatingMessageValue::Id_PDUSessionResourceModifyIndication(
            PDUSessionResourceModifyIndication {
                protocol_i_es: PDUSessionResourceModifyIndicationProtocolIEs(vec![
                    PDUSessionResourceModifyIndicationProtocolIEs_Entry {
                        id: ProtocolIE_ID(ID_AMF_UE_NGAP_ID),
                        criticality: Criticality(Criticality::IGNORE),
                        value: PDUSessionResourceModifyIndicationProtocolIEs_EntryValue::Id_AMF_UE_NGAP_ID(
                            AMF_UE_NGAP_ID(params.amf_ue_ngap_id),
                        ),
                    },
                    PDUSessionResourceModifyIndicationProtocolIEs_Entry {
                        id: ProtocolIE_ID(ID_RAN_UE_NGAP_ID),
                        criticality: Criticality(Criticality::IGNORE),
                        value: PDUSessionResourceModifyIndicationProtocolIEs_EntryValue::Id_RAN_UE_NGAP_ID(
                            RAN_UE_NGAP_ID(params.ran_ue_ngap_id),
                        ),
                    },
                    PDUSessionResourceModifyIndicationProtocolIEs_Entry {
                        id: ProtocolIE_ID(ID_PDU_SESSION_RESOURCE_MODIFY_LIST_MOD_IND),
                        criticality: Criticality(Criticality::REJECT),
                        value: PDUSessionResourceModifyIndicationProtocolIEs_EntryValue::Id_PDUSessionResourceModifyListModInd(
                            PDUSessionResourceModifyListModInd(vec![PDUSessionResourceModifyItemModInd {
                                pdu_session_id: PDUSessionID(params.pdu_session_id),
                                pdu_session_resource_modify_indication_transfer:
                                    PDUSessionResourceModifyItemModIndPDUSessionResourceModifyIndicationTransfer(
                                        params.transfer.clone(),
                                    ),
                                ie_extensions: None,
                            }]),
                        ),
                    },
                ]),
            },
        ),
    })
}

// ============================================================================
// PDU Session Resource Release Response
// ============================================================================

/// Parameters for building a PDU Session Resource Release Response
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PduSessionResourceReleaseResponseParams {
    /// AMF UE NGAP ID
    pub amf_ue_ngap_id: u64,
    /// RAN UE NGAP ID
    pub ran_ue_ngap_id: u32,
    /// Released PDU sessions. Encoding an empty list fails, the released
    /// list holds 1 to 256 items.
    pub pdu_session_ids: Vec<u8>,
    /// Release Response Transfer octets placed in every item
    pub release_response_transfer: Vec<u8>,
}

impl PduSessionResourceReleaseResponseParams {
    /// Release response for `pdu_session_ids` carrying the empty release
    /// response transfer in every item.
    pub fn new(amf_ue_ngap_id: u64, ran_ue_ngap_id: u32, pdu_session_ids: Vec<u8>) -> Self {
        Self {
            amf_ue_ngap_id,
            ran_ue_ngap_id,
            pdu_session_ids,
            release_response_transfer: EMPTY_RELEASE_RESPONSE_TRANSFER.to_vec(),
        }
    }
}

/// Build a PDU Session Resource Release Response PDU, one released item per
/// session id
pub fn build_pdu_session_resource_release_response(
    params: &PduSessionResourceReleaseResponseParams,
) -> NGAP_PDU {
    NGAP_PDU::SuccessfulOutcome(SuccessfulOutcome {
        procedure_code: ProcedureCode(ID_PDU_SESSION_RESOURCE_RELEASE),
        criticality: Criticality(Criticality::REJECT),
        value: SuccessfulOutcomeValue::Id_PDUSessionResourceRelease(PDUSessionResourceReleaseResponse {
            protocol_i_es: PDUSessionResourceReleaseResponseProtocolIEs(vec![
                PDUSessionResourceReleaseResponseProtocolIEs_Entry {
                    id: ProtocolIE_ID(ID_AMF_UE_NGAP_ID),
                    criticality: Criticality(Criticality::IGNORE),
                    value: PDUSessionResourceReleaseResponseProtocolIEs_EntryValue::Id_AMF_UE_NGAP_ID(
                        AMF_UE_NGAP_ID(params.amf_ue_ngap_id),
                    ),
                },
                PDUSessionResourceReleaseResponseProtocolIEs_Entry {
                    id: ProtocolIE_ID(ID_RAN_UE_NGAP_ID),
                    criticality: Criticality(Criticality::IGNORE),
                    value: PDUSessionResourceReleaseResponseProtocolIEs_EntryValue::Id_RAN_UE_NGAP_ID(
                        RAN_UE_NGAP_ID(params.ran_ue_ngap_id),
                    ),
                },
                PDUSessionResourceReleaseResponseProtocolIEs_Entry {
                    id: ProtocolIE_ID(ID_PDU_SESSION_RESOURCE_RELEASED_LIST_REL_RES),
                    criticality: Criticality(Criticality::IGNORE),
                    value: PDUSessionResourceReleaseResponseProtocolIEs_EntryValue::Id_PDUSessionResourceReleasedListRelRes(
                        build_released_list_rel_res(&params.pdu_session_ids, &params.release_response_transfer),
                    ),
                },
            ]),
        }),
    })
}

fn build_released_list_rel_res(
    pdu_session_ids: &[u8],
    transfer: &[u8],
) -> PDUSessionResourceReleasedListRelRes {
    PDUSessionResourceReleasedListRelRes(
        pdu_session_ids
            .iter()
            .map(|&id| PDUSessionResourceReleasedItemRelRes {
                pdu_session_id: PDUSessionID(id),
                pdu_session_resource_release_response_transfer:
                    PDUSessionResourceReleasedItemRelResPDUSessionResourceReleaseResponseTransfer(
                        transfer.to_vec(),
                    ),
                ie_extensions: None,
            })
            .collect(),
    )
}

// ============================================================================
// Encode helpers and matchers
// ============================================================================

/// Build and encode a PDU Session Resource Setup Response
pub fn encode_pdu_session_resource_setup_response(
    params: &PduSessionResourceSetupResponseParams,
) -> Result<Vec<u8>, NgapCodecError> {
    encode_ngap_pdu(&build_pdu_session_resource_setup_response(params))
}

/// Build and encode a PDU Session Resource Modify Indication
pub fn encode_pdu_session_resource_modify_indication(
    params: &PduSessionResourceModifyIndicationParams,
) -> Result<Vec<u8>, NgapCodecError> {
    encode_ngap_pdu(&build_pdu_session_resource_modify_indication(params))
}

/// Build and encode a PDU Session Resource Release Response
///
/// Fails when `params.pdu_session_ids` is empty.
pub fn encode_pdu_session_resource_release_response(
    params: &PduSessionResourceReleaseResponseParams,
) -> Result<Vec<u8>, NgapCodecError> {
    if params.pdu_session_ids.is_empty() {
        return Err(NgapCodecError::EncodeError {
            message: "PDUSessionResourceReleaseResponse",
            reason: "PDU session resource released list must hold at least one item".to_string(),
        });
    }
    encode_ngap_pdu(&build_pdu_session_resource_release_response(params))
}

/// Check if an NGAP PDU is a PDU Session Resource Setup Response
pub fn is_pdu_session_resource_setup_response(pdu: &NGAP_PDU) -> bool {
    matches!(
        pdu,
        NGAP_PDU::SuccessfulOutcome(outcome)
            if matches!(outcome.value, SuccessfulOutcomeValue::Id_PDUSessionResourceSetup(_))
    )
}

/// Check if an NGAP PDU is a PDU Session Resource Modify Indication
pub fn is_pdu_session_resource_modify_indication(pdu: &NGAP_PDU) -> bool {
    matches!(
        pdu,
        NGAP_PDU::InitiatingMessage(msg)
            if matches!(msg.value, InitiatingMessageValue::Id_PDUSessionResourceModifyIndication(_))
    )
}

/// Check if an NGAP PDU is a PDU Session Resource Release Response
pub fn is_pdu_session_resource_release_response(pdu: &NGAP_PDU) -> bool {
    matches!(
        pdu,
        NGAP_PDU::SuccessfulOutcome(outcome)
            if matches!(outcome.value, SuccessfulOutcomeValue::Id_PDUSessionResourceRelease(_))
    )
}
