//! UE Context Release Procedure
//!
//! Builds the UE Context Release Complete a gNB returns once it has released
//! the UE context ordered by the AMF (3GPP TS 38.413 Section 8.3.3).

use crate::codec::generated::*;
use crate::codec::{encode_ngap_pdu, NgapCodecError};
use crate::ies::{build_user_location_information, UserLocation};

/// Parameters for building a UE Context Release Complete
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UeContextReleaseCompleteParams {
    /// AMF UE NGAP ID
    pub amf_ue_ngap_id: u64,
    /// RAN UE NGAP ID
    pub ran_ue_ngap_id: u32,
    /// Last known cell of the UE
    pub user_location: UserLocation,
    /// PDU sessions that were active when the context was released
    pub pdu_session_ids: Vec<u8>,
}

/// Build a UE Context Release Complete PDU
///
/// The PDU Session Resource List IE is present only when
/// `pdu_session_ids` is non-empty.
pub fn build_ue_context_release_complete(params: &UeContextReleaseCompleteParams) -> NGAP_PDU {
    NGAP_PDU::SuccessfulOutcome(SuccessfulOutcome {
        procedure_code: ProcedureCode(ID_UE_CONTEXT_RELEASE),
        criticality: Criticality(Criticality::REJECT),
        value: SuccessfulOutcomeValue::Id_UEContextRelease(UEContextReleaseComplete {
            protocol_i_es: UEContextReleaseCompleteProtocolIEs(
                [
                    UEContextReleaseCompleteProtocolIEs_Entry {
                        id: ProtocolIE_ID(ID_AMF_UE_NGAP_ID),
                        criticality: Criticality(Criticality::IGNORE),
                        value: UEContextReleaseCompleteProtocolIEs_EntryValue::Id_AMF_UE_NGAP_ID(
                            AMF_UE_NGAP_ID(params.amf_ue_ngap_id),
                        ),
                    },
                    UEContextReleaseCompleteProtocolIEs_Entry {
                        id: ProtocolIE_ID(ID_RAN_UE_NGAP_ID),
                        criticality: Criticality(Criticality::IGNORE),
                        value: UEContextReleaseCompleteProtocolIEs_EntryValue::Id_RAN_UE_NGAP_ID(
                            RAN_UE_NGAP_ID(params.ran_ue_ngap_id),
                        ),
                    },
                    UEContextReleaseCompleteProtocolIEs_Entry {
                        id: ProtocolIE_ID(ID_USER_LOCATION_INFORMATION),
                        criticality: Criticality(Criticality::IGNORE),
                        value:
                            UEContextReleaseCompleteProtocolIEs_EntryValue::Id_UserLocationInformation(
                                build_user_location_information(&params.user_location),
                            ),
                    },
                ]
                .into_iter()
                .chain(
                    build_pdu_session_resource_list_cxt_rel_cpl(&params.pdu_session_ids).map(
                        |list| UEContextReleaseCompleteProtocolIEs_Entry {
                            id: ProtocolIE_ID(ID_PDU_SESSION_RESOURCE_LIST_CXT_REL_CPL),
                            criticality: Criticality(Criticality::REJECT),
                            value: UEContextReleaseCompleteProtocolIEs_EntryValue::Id_PDUSessionResourceListCxtRelCpl(list),
                        },
                    ),
                )
                .collect(),
            ),
        }),
    })
}

/// One list item per session id, in input order; `None` for an empty slice.
fn build_pdu_session_resource_list_cxt_rel_cpl(
    pdu_session_ids: &[u8],
) -> Option<PDUSessionResourceListCxtRelCpl> {
    (!pdu_session_ids.is_empty()).then(|| {
        PDUSessionResourceListCxtRelCpl(
            pdu_session_ids
                .iter()
                .map(|&id| PDUSessionResourceItemCxtRelCpl {
                    pdu_session_id: PDUSessionID(id),
                    ie_extensions: None,
                })
                .collect(),
        )
    })
}

/// Build and encode a UE Context Release Complete
pub fn encode_ue_context_release_complete(
    params: &UeContextReleaseCompleteParams,
) -> Result<Vec<u8>, NgapCodecError> {
    encode_ngap_pdu(&build_ue_context_release_complete(params))
}

/// Check if an NGAP PDU is a UE Context Release Complete
pub fn is_ue_context_release_complete(pdu: &NGAP_PDU) -> bool {
    matches!(
        pdu,
        NGAP_PDU::SuccessfulOutcome(outcome)
            if matches!(outcome.value, SuccessfulOutcomeValue::Id_UEContextRelease(_))
    )
}
