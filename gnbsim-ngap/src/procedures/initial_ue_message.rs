//! Initial UE Message Procedure
//!
//! Carries the first NAS message of a UE to the AMF when no UE-associated
//! NG connection exists yet (3GPP TS 38.413 Section 8.6.1).

use crate::codec::generated::*;
use crate::codec::{encode_ngap_pdu, NgapCodecError};
use crate::ies::{build_user_location_information, UserLocation};

/// Parameters for building an Initial UE Message
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InitialUeMessageParams {
    /// RAN UE NGAP ID allocated by the gNB
    pub ran_ue_ngap_id: u32,
    /// NAS PDU, typically a Registration Request
    pub nas_pdu: Vec<u8>,
    /// Cell the UE is camped on
    pub user_location: UserLocation,
}

/// Build an Initial UE Message PDU
///
/// The RRC establishment cause is always mt-Access and a UE context is
/// always requested.
pub fn build_initial_ue_message(params: &InitialUeMessageParams) -> NGAP_PDU {
    NGAP_PDU::InitiatingMessage(InitiatingMessage {
        procedure_code: ProcedureCode(ID_INITIAL_UE_MESSAGE),
        criticality: Criticality(Criticality::IGNORE),
        value: InitiatingMessageValue::Id_InitialUEMessage(InitialUEMessage {
            protocol_i_es: InitialUEMessageProtocolIEs(vec![
                InitialUEMessageProtocolIEs_Entry {
                    id: ProtocolIE_ID(ID_RAN_UE_NGAP_ID),
                    criticality: Criticality(Criticality::REJECT),
                    value: InitialUEMessageProtocolIEs_EntryValue::Id_RAN_UE_NGAP_ID(
                        RAN_UE_NGAP_ID(params.ran_ue_ngap_id),
                    ),
                },
                InitialUEMessageProtocolIEs_Entry {
                    id: ProtocolIE_ID(ID_NAS_PDU),
                    criticality: Criticality(Criticality::REJECT),
                    value: InitialUEMessageProtocolIEs_EntryValue::Id_NAS_PDU(NAS_PDU(
                        params.nas_pdu.clone(),
                    )),
                },
                InitialUEMessageProtocolIEs_Entry {
                    id: ProtocolIE_ID(ID_USER_LOCATION_INFORMATION),
                    criticality: Criticality(Criticality::REJECT),
                    value: InitialUEMessageProtocolIEs_EntryValue::Id_UserLocationInformation(
                        build_user_location_information(&params.user_location),
                    ),
                },
                InitialUEMessageProtocolIEs_Entry {
                    id: ProtocolIE_ID(ID_RRC_ESTABLISHMENT_CAUSE),
                    criticality: Criticality(Criticality::IGNORE),
                    value: InitialUEMessageProtocolIEs_EntryValue::Id_RRCEstablishmentCause(
                        RRCEstablishmentCause(RRCEstablishmentCause::MT_ACCESS),
                    ),
                },
                InitialUEMessageProtocolIEs_Entry {
                    id: ProtocolIE_ID(ID_UE_CONTEXT_REQUEST),
                    criticality: Criticality(Criticality::IGNORE),
                    value: InitialUEMessageProtocolIEs_EntryValue::Id_UEContextRequest(
                        UEContextRequest(UEContextRequest::REQUESTED),
                    ),
                },
            ]),
        }),
    })
}

/// Build and encode an Initial UE Message
pub fn encode_initial_ue_message(
    params: &InitialUeMessageParams,
) -> Result<Vec<u8>, NgapCodecError> {
    encode_ngap_pdu(&build_initial_ue_message(params))
}

/// Check if an NGAP PDU is an Initial UE Message
pub fn is_initial_ue_message(pdu: &NGAP_PDU) -> bool {
    matches!(
        pdu,
        NGAP_PDU::InitiatingMessage(msg)
            if matches!(msg.value, InitiatingMessageValue::Id_InitialUEMessage(_))
    )
}
