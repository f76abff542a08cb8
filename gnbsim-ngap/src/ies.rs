//! Shared information element constructors
//!
//! Sub-structures used by more than one PDU or transfer builder: user location,
//! GTP tunnel descriptors and QoS flow associations.

use std::net::IpAddr;

use bitvec::prelude::*;
use gnbsim_common::{GnbConfig, Plmn, Tai, DEFAULT_NR_CELL_IDENTITY};

use crate::codec::generated::*;

/// Where the UE is camped, as reported in User Location Information (NR).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UserLocation {
    /// PLMN of the NR cell global identity
    pub plmn: Plmn,
    /// Tracking area of the serving cell
    pub tai: Tai,
    /// NR Cell Identity (36-bit)
    pub nr_cell_identity: u64,
}

impl UserLocation {
    /// Location in `tai` with the placeholder cell identity
    /// [`DEFAULT_NR_CELL_IDENTITY`].
    pub const fn new(plmn: Plmn, tai: Tai) -> Self {
        Self {
            plmn,
            tai,
            nr_cell_identity: DEFAULT_NR_CELL_IDENTITY,
        }
    }

    /// Replaces the cell identity.
    pub fn with_cell_identity(self, nr_cell_identity: u64) -> Self {
        Self {
            nr_cell_identity,
            ..self
        }
    }

    /// Location of the cell a gNB profile describes.
    pub fn from_config(config: &GnbConfig) -> Self {
        Self::new(config.plmn, config.tai()).with_cell_identity(config.nci)
    }
}

/// PLMN Identity IE from a PLMN value
pub fn build_plmn_identity(plmn: &Plmn) -> PLMNIdentity {
    PLMNIdentity(plmn.encode().to_vec())
}

/// Build an NR-CGI
///
/// The 36-bit cell identity is taken from the low bits of `nr_cell_identity`,
/// most significant bit first.
pub fn build_nr_cgi(plmn: &Plmn, nr_cell_identity: u64) -> NR_CGI {
    // Left-align the 36 bits in five octets, then drop the 4 padding bits
    let octets = (nr_cell_identity << 4).to_be_bytes();
    let mut bits = BitVec::<u8, Msb0>::from_slice(&octets[3..]);
    bits.truncate(36);

    NR_CGI {
        plmn_identity: build_plmn_identity(plmn),
        nr_cell_identity: NRCellIdentity(bits),
        ie_extensions: None,
    }
}

/// Build a TAI IE
pub fn build_tai(tai: &Tai) -> TAI {
    TAI {
        plmn_identity: build_plmn_identity(&tai.plmn),
        tac: TAC(tai.tac_bytes().to_vec()),
        ie_extensions: None,
    }
}

/// Build User Location Information (NR variant)
pub fn build_user_location_information(location: &UserLocation) -> UserLocationInformation {
    UserLocationInformation::UserLocationInformationNR(UserLocationInformationNR {
        nr_cgi: build_nr_cgi(&location.plmn, location.nr_cell_identity),
        tai: build_tai(&location.tai),
        time_stamp: None,
        ie_extensions: None,
    })
}

impl From<IpAddr> for TransportLayerAddress {
    fn from(ip: IpAddr) -> Self {
        TransportLayerAddress(match ip {
            IpAddr::V4(x) => BitVec::<_, Msb0>::from_slice(&x.octets()),
            IpAddr::V6(x) => BitVec::<_, Msb0>::from_slice(&x.octets()),
        })
    }
}

/// IP address carried in a transport layer address, if it is a plain IPv4 or
/// IPv6 address.
pub fn transport_layer_ip(address: &TransportLayerAddress) -> Option<IpAddr> {
    let octets = address.0.as_raw_slice();
    match address.0.len() {
        32 => <[u8; 4]>::try_from(octets).ok().map(IpAddr::from),
        128 => <[u8; 16]>::try_from(octets).ok().map(IpAddr::from),
        _ => None,
    }
}

/// Build UP Transport Layer Information for a GTP-U tunnel endpoint
pub fn build_gtp_tunnel(teid: &[u8], address: IpAddr) -> UPTransportLayerInformation {
    UPTransportLayerInformation::GTPTunnel(GTPTunnel {
        transport_layer_address: address.into(),
        gtp_teid: GTP_TEID(teid.to_vec()),
        ie_extensions: None,
    })
}

/// Build an associated QoS flow list holding a single flow
pub fn build_associated_qos_flow_list(qfi: u8) -> AssociatedQosFlowList {
    AssociatedQosFlowList(vec![AssociatedQosFlowItem {
        qos_flow_identifier: QosFlowIdentifier(qfi.into()),
        qos_flow_mapping_indication: None,
        ie_extensions: None,
    }])
}

/// Build QoS Flow per TNL Information: one tunnel and the flow it carries
pub fn build_qos_flow_per_tnl_information(
    teid: &[u8],
    address: IpAddr,
    qfi: u8,
) -> QosFlowPerTNLInformation {
    QosFlowPerTNLInformation {
        up_transport_layer_information: build_gtp_tunnel(teid, address),
        associated_qos_flow_list: build_associated_qos_flow_list(qfi),
        ie_extensions: None,
    }
}

/// Build a QoS Flow per TNL Information item, the element type of the
/// additional downlink tunnel list used with NR dual connectivity.
pub fn build_qos_flow_per_tnl_information_item(
    teid: &[u8],
    address: IpAddr,
    qfi: u8,
) -> QosFlowPerTNLInformationItem {
    QosFlowPerTNLInformationItem {
        qos_flow_per_tnl_information: build_qos_flow_per_tnl_information(teid, address, qfi),
        ie_extensions: None,
    }
}
