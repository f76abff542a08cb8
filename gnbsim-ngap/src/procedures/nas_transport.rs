//! Uplink NAS Transport Procedure
//!
//! Relays a NAS message from the UE to the AMF over an existing
//! UE-associated NG connection (3GPP TS 38.413 Section 8.6.3).

use crate::codec::generated::*;
use crate::codec::{encode_ngap_pdu, NgapCodecError};
use crate::ies::{build_user_location_information, UserLocation};

/// Parameters for building an Uplink NAS Transport
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UplinkNasTransportParams {
    /// AMF UE NGAP ID
    pub amf_ue_ngap_id: u64,
    /// RAN UE NGAP ID
    pub ran_ue_ngap_id: u32,
    /// NAS PDU
    pub nas_pdu: Vec<u8>,
    /// Cell the UE is camped on
    pub user_location: UserLocation,
}

/// Build an Uplink NAS Transport PDU
pub fn build_uplink_nas_transport(params: &UplinkNasTransportParams) -> NGAP_PDU {
    NGAP_PDU::InitiatingMessage(InitiatingMessage {
        procedure_code: ProcedureCode(ID_UPLINK_NAS_TRANSPORT),
        criticality: Criticality(Criticality::IGNORE),
        value: InitiatingMessageValue::Id_UplinkNASTransport(UplinkNASTransport {
            protocol_i_es: UplinkNASTransportProtocolIEs(vec![
                UplinkNASTransportProtocolIEs_Entry {
                    id: ProtocolIE_ID(ID_AMF_UE_NGAP_ID),
                    criticality: Criticality(Criticality::REJECT),
                    value: UplinkNASTransportProtocolIEs_EntryValue::Id_AMF_UE_NGAP_ID(
                        AMF_UE_NGAP_ID(params.amf_ue_ngap_id),
                    ),
                },
                UplinkNASTransportProtocolIEs_Entry {
                    id: ProtocolIE_ID(ID_RAN_UE_NGAP_ID),
                    criticality: Criticality(Criticality::REJECT),
                    value: UplinkNASTransportProtocolIEs_EntryValue::Id_RAN_UE_NGAP_ID(
                        RAN_UE_NGAP_ID(params.ran_ue_ngap_id),
                    ),
                },
                UplinkNASTransportProtocolIEs_Entry {
                    id: ProtocolIE_ID(ID_NAS_PDU),
                    criticality: Criticality(Criticality::REJECT),
                    value: UplinkNASTransportProtocolIEs_EntryValue::Id_NAS_PDU(NAS_PDU(
                        params.nas_pdu.clone(),
                    )),
                },
                UplinkNASTransportProtocolIEs_Entry {
                    id: ProtocolIE_ID(ID_USER_LOCATION_INFORMATION),
                    criticality: Criticality(Criticality::IGNORE),
                    value: UplinkNASTransportProtocolIEs_EntryValue::Id_UserLocationInformation(
                        build_user_location_information(&params.user_location),
                    ),
                },
            ]),
        }),
    })
}

/// Build and encode an Uplink NAS Transport
pub fn encode_uplink_nas_transport(
    params: &UplinkNasTransportParams,
) -> Result<Vec<u8>, NgapCodecError> {
    encode_ngap_pdu(&build_uplink_nas_transport(params))
}

/// Check if an NGAP PDU is an Uplink NAS Transport
pub fn is_uplink_nas_transport(pdu: &NGAP_PDU) -> bool {
    matches!(
        pdu,
        NGAP_PDU::InitiatingMessage(msg)
            if matches!(msg.value, InitiatingMessageValue::Id_UplinkNASTransport(_))
    )
}
