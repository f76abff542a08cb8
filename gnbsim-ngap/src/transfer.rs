//! PDU session resource transfers
//!
//! Transfers are standalone NGAP structures that travel inside a PDU as an
//! OCTET STRING. They are built here, serialized on their own with
//! [`encode_transfer`], and only the resulting bytes are handed to the PDU
//! builders.

use std::net::IpAddr;

use crate::codec::generated::*;
use crate::codec::{encode_transfer, NgapCodecError};
use crate::ies::{build_qos_flow_per_tnl_information, transport_layer_ip};

const SETUP_RESPONSE_TRANSFER: &str = "PDUSessionResourceSetupResponseTransfer";
const MODIFY_INDICATION_TRANSFER: &str = "PDUSessionResourceModifyIndicationTransfer";
const RELEASE_RESPONSE_TRANSFER: &str = "PDUSessionResourceReleaseResponseTransfer";

/// Parameters for building a PDU Session Resource Setup Response Transfer
#[derive(Debug, Clone)]
pub struct PduSessionResourceSetupResponseTransferParams {
    /// Downlink GTP-U TEID allocated by the gNB (4 bytes)
    pub dl_teid: [u8; 4],
    /// gNB N3 address for the downlink tunnel
    pub ran_n3_address: IpAddr,
    /// QoS flow carried by the tunnel
    pub qos_flow_identifier: u8,
    /// NR dual connectivity is in use for this session
    pub nr_dc_indicator: bool,
    /// Tunnel terminated at the secondary node, used only with NR-DC
    pub secondary: Option<QosFlowPerTNLInformationItem>,
}

/// Parameters for building a PDU Session Resource Modify Indication Transfer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PduSessionResourceModifyIndicationTransferParams {
    /// Downlink GTP-U TEID (4 bytes)
    pub dl_teid: [u8; 4],
    /// gNB N3 address for the downlink tunnel
    pub ran_n3_address: IpAddr,
    /// QoS flow carried by the tunnel
    pub qos_flow_identifier: u8,
}

/// Build a PDU Session Resource Setup Response Transfer
///
/// The additional downlink tunnel list carries the secondary item only when
/// NR-DC is indicated and the secondary item is a GTP tunnel with a TEID.
/// In every other case the list is left out.
pub fn build_pdu_session_resource_setup_response_transfer(
    params: &PduSessionResourceSetupResponseTransferParams,
) -> PDUSessionResourceSetupResponseTransfer {
    PDUSessionResourceSetupResponseTransfer {
        dl_qos_flow_per_tnl_information: build_qos_flow_per_tnl_information(
            &params.dl_teid,
            params.ran_n3_address,
            params.qos_flow_identifier,
        ),
        additional_dl_qos_flow_per_tnl_information: params
            .secondary
            .as_ref()
            .filter(|item| params.nr_dc_indicator && has_gtp_teid(item))
            .map(|item| QosFlowPerTNLInformationList(vec![item.clone()])),
        security_result: None,
        qos_flow_failed_to_setup_list: None,
        ie_extensions: None,
    }
}

fn has_gtp_teid(item: &QosFlowPerTNLInformationItem) -> bool {
    match &item.qos_flow_per_tnl_information.up_transport_layer_information {
        UPTransportLayerInformation::GTPTunnel(tunnel) => !tunnel.gtp_teid.0.is_empty(),
        // choice-Extensions: its IE set is empty, so no value of it exists.
        _ => false,
    }
}

/// Build and serialize a PDU Session Resource Setup Response Transfer.
pub fn encode_pdu_session_resource_setup_response_transfer(
    params: &PduSessionResourceSetupResponseTransferParams,
) -> Result<Vec<u8>, NgapCodecError> {
    let transfer = build_pdu_session_resource_setup_response_transfer(params);
    encode_transfer(&transfer, SETUP_RESPONSE_TRANSFER)
}

/// Build a PDU Session Resource Modify Indication Transfer
pub fn build_pdu_session_resource_modify_indication_transfer(
    params: &PduSessionResourceModifyIndicationTransferParams,
) -> PDUSessionResourceModifyIndicationTransfer {
    PDUSessionResourceModifyIndicationTransfer {
        dl_qos_flow_per_tnl_information: build_qos_flow_per_tnl_information(
            &params.dl_teid,
            params.ran_n3_address,
            params.qos_flow_identifier,
        ),
        additional_dl_qos_flow_per_tnl_information: None,
        ie_extensions: None,
    }
}

/// Build and serialize a PDU Session Resource Modify Indication Transfer.
pub fn encode_pdu_session_resource_modify_indication_transfer(
    params: &PduSessionResourceModifyIndicationTransferParams,
) -> Result<Vec<u8>, NgapCodecError> {
    let transfer = build_pdu_session_resource_modify_indication_transfer(params);
    encode_transfer(&transfer, MODIFY_INDICATION_TRANSFER)
}

/// Serialize an empty PDU Session Resource Release Response Transfer.
///
/// The result equals [`gnbsim_common::EMPTY_RELEASE_RESPONSE_TRANSFER`].
pub fn encode_release_response_transfer() -> Result<Vec<u8>, NgapCodecError> {
    encode_transfer(
        &PDUSessionResourceReleaseResponseTransfer { ie_extensions: None },
        RELEASE_RESPONSE_TRANSFER,
    )
}

/// Downlink tunnel endpoint and first QoS flow of a decoded transfer.
///
/// Returns `None` when the tunnel is not a GTP tunnel over IPv4/IPv6.
pub fn downlink_tunnel(info: &QosFlowPerTNLInformation) -> Option<([u8; 4], IpAddr, u8)> {
    let UPTransportLayerInformation::GTPTunnel(tunnel) = &info.up_transport_layer_information
    else {
        return None;
    };
    let teid = <[u8; 4]>::try_from(tunnel.gtp_teid.0.as_slice()).ok()?;
    let address = transport_layer_ip(&tunnel.transport_layer_address)?;
    let qfi = u8::try_from(info.associated_qos_flow_list.0.first()?.qos_flow_identifier.0).ok()?;
    Some((teid, address, qfi))
}
