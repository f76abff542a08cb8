//! NG Setup Procedure
//!
//! Builds the NG Setup Request a gNB sends to bring up the NG-C interface
//! (3GPP TS 38.413 Section 8.7.1).

use crate::codec::generated::*;
use crate::codec::{encode_ngap_pdu, NgapCodecError};
use crate::ies::{build_plmn_identity, build_tai};
use bitvec::prelude::*;
use gnbsim_common::{GnbConfig, Plmn, SNssai, Tai};

/// Parameters for building an NG Setup Request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NgSetupRequestParams {
    /// gNB ID octets; the bit string length is eight times the octet count
    pub gnb_id: Vec<u8>,
    /// PLMN of the Global gNB ID
    pub plmn: Plmn,
    /// RAN Node Name
    pub ran_node_name: String,
    /// The single supported tracking area
    pub tai: Tai,
    /// Slice supported in that tracking area
    pub slice: SNssai,
}

impl NgSetupRequestParams {
    /// Parameters describing the gNB of a configuration profile.
    ///
    /// Returns `None` when the profile lists no slice or its gNB ID length
    /// is not 24 or 32.
    pub fn from_config(config: &GnbConfig) -> Option<Self> {
        Some(Self {
            gnb_id: config.gnb_id_bytes()?,
            plmn: config.plmn,
            ran_node_name: config.name.clone(),
            tai: config.tai(),
            slice: config.primary_slice()?,
        })
    }
}

/// Build an NG Setup Request PDU
///
/// # Arguments
/// * `params` - Parameters for the NG Setup Request
///
/// # Returns
/// The constructed PDU, with Default Paging DRX fixed to v128.
pub fn build_ng_setup_request(params: &NgSetupRequestParams) -> NGAP_PDU {
    NGAP_PDU::InitiatingMessage(InitiatingMessage {
        procedure_code: ProcedureCode(ID_NG_SETUP),
        criticality: Criticality(Criticality::REJECT),
        value: InitiatingMessageValue::Id_NGSetup(NGSetupRequest {
            protocol_i_es: NGSetupRequestProtocolIEs(vec![
                NGSetupRequestProtocolIEs_Entry {
                    id: ProtocolIE_ID(ID_GLOBAL_RAN_NODE_ID),
                    criticality: Criticality(Criticality::REJECT),
                    value: NGSetupRequestProtocolIEs_EntryValue::Id_GlobalRANNodeID(
                        build_global_ran_node_id(&params.plmn, &params.gnb_id),
                    ),
                },
                NGSetupRequestProtocolIEs_Entry {
                    id: ProtocolIE_ID(ID_RAN_NODE_NAME),
                    criticality: Criticality(Criticality::IGNORE),
                    value: NGSetupRequestProtocolIEs_EntryValue::Id_RANNodeName(RANNodeName(
                        params.ran_node_name.clone(),
                    )),
                },
                NGSetupRequestProtocolIEs_Entry {
                    id: ProtocolIE_ID(ID_SUPPORTED_TA_LIST),
                    criticality: Criticality(Criticality::REJECT),
                    value: NGSetupRequestProtocolIEs_EntryValue::Id_SupportedTAList(
                        build_supported_ta_list(&params.tai, &params.slice),
                    ),
                },
                NGSetupRequestProtocolIEs_Entry {
                    id: ProtocolIE_ID(ID_DEFAULT_PAGING_DRX),
                    criticality: Criticality(Criticality::IGNORE),
                    value: NGSetupRequestProtocolIEs_EntryValue::Id_DefaultPagingDRX(PagingDRX(
                        PagingDRX::V128,
                    )),
                },
            ]),
        }),
    })
}

/// Global RAN Node ID of a gNB. Every supplied octet contributes 8 bits to
/// the gNB-ID bit string.
pub fn build_global_ran_node_id(plmn: &Plmn, gnb_id: &[u8]) -> GlobalRANNodeID {
    GlobalRANNodeID::GlobalGNB_ID(GlobalGNB_ID {
        plmn_identity: build_plmn_identity(plmn),
        gnb_id: GNB_ID::GNB_ID(GNB_ID_gNB_ID(BitVec::<u8, Msb0>::from_slice(gnb_id))),
        ie_extensions: None,
    })
}

/// Supported TA list with one TAC, one broadcast PLMN and one slice.
pub fn build_supported_ta_list(tai: &Tai, slice: &SNssai) -> SupportedTAList {
    let TAI {
        plmn_identity, tac, ..
    } = build_tai(tai);

    SupportedTAList(vec![SupportedTAItem {
        tac,
        broadcast_plmn_list: BroadcastPLMNList(vec![BroadcastPLMNItem {
            plmn_identity,
            tai_slice_support_list: SliceSupportList(vec![SliceSupportItem {
                s_nssai: build_s_nssai(slice),
                ie_extensions: None,
            }]),
            ie_extensions: None,
        }]),
        ie_extensions: None,
    }])
}

fn build_s_nssai(slice: &SNssai) -> S_NSSAI {
    S_NSSAI {
        sst: SST(vec![slice.sst]),
        sd: slice.sd_bytes().map(|sd| SD(sd.to_vec())),
        ie_extensions: None,
    }
}

/// Build and encode an NG Setup Request
pub fn encode_ng_setup_request(params: &NgSetupRequestParams) -> Result<Vec<u8>, NgapCodecError> {
    encode_ngap_pdu(&build_ng_setup_request(params))
}

/// Check if an NGAP PDU is an NG Setup Request
pub fn is_ng_setup_request(pdu: &NGAP_PDU) -> bool {
    matches!(
        pdu,
        NGAP_PDU::InitiatingMessage(msg)
            if matches!(msg.value, InitiatingMessageValue::Id_NGSetup(_))
    )
}
