//! Initial Context Setup Procedure
//!
//! Builds the Initial Context Setup Response that acknowledges the AMF's
//! request to establish the UE context (3GPP TS 38.413 Section 8.3.1).

use crate::codec::generated::*;
use crate::codec::{encode_ngap_pdu, NgapCodecError};

/// Parameters for building an Initial Context Setup Response
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InitialContextSetupResponseParams {
    /// AMF UE NGAP ID
    pub amf_ue_ngap_id: u64,
    /// RAN UE NGAP ID
    pub ran_ue_ngap_id: u32,
}

/// Build an Initial Context Setup Response PDU
pub fn build_initial_context_setup_response(
    params: &InitialContextSetupResponseParams,
) -> NGAP_PDU {
    NGAP_PDU::SuccessfulOutcome(SuccessfulOutcome {
        procedure_code: ProcedureCode(ID_INITIAL_CONTEXT_SETUP),
        criticality: Criticality(Criticality::REJECT),
        value: SuccessfulOutcomeValue::Id_InitialContextSetup(InitialContextSetupResponse {
            protocol_i_es: InitialContextSetupResponseProtocolIEs(vec![
                InitialContextSetupResponseProtocolIEs_Entry {
                    id: ProtocolIE_ID(ID_AMF_UE_NGAP_ID),
                    criticality: Criticality(Criticality::REJECT),
                    value: InitialContextSetupResponseProtocolIEs_EntryValue::Id_AMF_UE_NGAP_ID(
                        AMF_UE_NGAP_ID(params.amf_ue_ngap_id),
                    ),
                },
                InitialContextSetupResponseProtocolIEs_Entry {
                    id: ProtocolIE_ID(ID_RAN_UE_NGAP_ID),
                    criticality: Criticality(Criticality::REJECT),
                    value: InitialContextSetupResponseProtocolIEs_EntryValue::Id_RAN_UE_NGAP_ID(
                        RAN_UE_NGAP_ID(params.ran_ue_ngap_id),
                    ),
                },
            ]),
        }),
    })
}

/// Build and encode an Initial Context Setup Response
pub fn encode_initial_context_setup_response(
    params: &InitialContextSetupResponseParams,
) -> Result<Vec<u8>, NgapCodecError> {
    encode_ngap_pdu(&build_initial_context_setup_response(params))
}

/// Check if an NGAP PDU is an Initial Context Setup Response
pub fn is_initial_context_setup_response(pdu: &NGAP_PDU) -> bool {
    matches!(
        pdu,
        NGAP_PDU::SuccessfulOutcome(outcome)
            if matches!(outcome.value, SuccessfulOutcomeValue::Id_InitialContextSetup(_))
    )
}
