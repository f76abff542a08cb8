//! gNB profile
//!
//! The profile carries the identity a simulated gNB presents to the AMF
//! (node id, name, served tracking area and slice) and the N3 address it
//! advertises for user-plane tunnels. NGAP builder parameters are derived
//! from it.

use std::fs;
use std::net::IpAddr;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::Error;
use crate::logging::LogLevel;
use crate::types::{Plmn, SNssai, Tai};

/// NR Cell Identity used when the caller has no real cell to report.
pub const DEFAULT_NR_CELL_IDENTITY: u64 = 0x0_0000_0001;

/// Release response transfer sent when the gNB has nothing to report for a
/// released session. It is the APER encoding of an empty
/// `PDUSessionResourceReleaseResponseTransfer`.
pub const EMPTY_RELEASE_RESPONSE_TRANSFER: [u8; 1] = [0x00];

const NCI_BITS: u8 = 36;

/// gNB configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GnbConfig {
    /// NR Cell Identity (36-bit); the leading `gnb_id_length` bits are the gNB ID
    pub nci: u64,
    /// gNB ID length in bits; 24 or 32 so that the ID is a whole number of octets
    pub gnb_id_length: u8,
    /// RAN node name sent in NG Setup
    pub name: String,
    /// Serving PLMN
    pub plmn: Plmn,
    /// Tracking Area Code (24-bit)
    pub tac: u32,
    /// Supported slices; the first one is advertised in NG Setup
    pub nssai: Vec<SNssai>,
    /// N3 address placed in downlink GTP tunnel descriptors
    pub gtp_ip: IpAddr,
    /// Release response transfer octets, hex encoded
    #[serde(
        default = "default_release_response_transfer",
        with = "hex::serde"
    )]
    pub release_response_transfer: Vec<u8>,
    /// Default log verbosity for the simulator; `RUST_LOG` takes precedence
    #[serde(default)]
    pub log_level: LogLevel,
}

fn default_release_response_transfer() -> Vec<u8> {
    EMPTY_RELEASE_RESPONSE_TRANSFER.to_vec()
}

fn gnb_id_length_supported(bits: u8) -> bool {
    matches!(bits, 24 | 32)
}

impl GnbConfig {
    /// Parses and validates a gNB configuration from a YAML string.
    ///
    /// # Example
    /// ```
    /// use gnbsim_common::GnbConfig;
    ///
    /// let yaml = r#"
    /// nci: 0x000000010
    /// gnb_id_length: 32
    /// name: gnbsim
    /// plmn: "00101"
    /// tac: 1
    /// nssai:
    ///   - sst: 1
    ///     sd: 0x010203
    /// gtp_ip: 10.0.0.1
    /// "#;
    ///
    /// let config = GnbConfig::from_yaml(yaml).unwrap();
    /// assert_eq!(config.gnb_id(), Some(1));
    /// assert_eq!(config.release_response_transfer, vec![0x00]);
    /// ```
    pub fn from_yaml(yaml: &str) -> Result<Self, Error> {
        let config: Self = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Loads a gNB configuration from a YAML file.
    pub fn from_yaml_file<P: AsRef<Path>>(path: P) -> Result<Self, Error> {
        let contents = fs::read_to_string(path)?;
        Self::from_yaml(&contents)
    }

    /// Serializes the configuration to YAML.
    pub fn to_yaml(&self) -> Result<String, Error> {
        Ok(serde_yaml::to_string(self)?)
    }

    /// Checks the constraints NGAP places on the profile values.
    pub fn validate(&self) -> Result<(), Error> {
        if self.nci >> NCI_BITS != 0 {
            return Err(Error::Config(format!(
                "nci {:#x} does not fit in {NCI_BITS} bits",
                self.nci
            )));
        }
        if !gnb_id_length_supported(self.gnb_id_length) {
            return Err(Error::Config(format!(
                "gnb_id_length must be 24 or 32, got {}",
                self.gnb_id_length
            )));
        }
        if self.name.is_empty() || self.name.len() > 150 {
            return Err(Error::Config(format!(
                "name must be 1 to 150 characters, got {}",
                self.name.len()
            )));
        }
        if self.tac > 0xFF_FFFF {
            return Err(Error::Config(format!("tac {:#x} does not fit in 24 bits", self.tac)));
        }
        if self.nssai.is_empty() {
            return Err(Error::Config("nssai must list at least one slice".into()));
        }
        if self.release_response_transfer.is_empty() {
            return Err(Error::Config("release_response_transfer must not be empty".into()));
        }
        Ok(())
    }

    /// gNB ID: the leading `gnb_id_length` bits of the NCI.
    ///
    /// `None` unless `gnb_id_length` is 24 or 32.
    pub fn gnb_id(&self) -> Option<u32> {
        if !gnb_id_length_supported(self.gnb_id_length) {
            return None;
        }
        Some((self.nci >> (NCI_BITS - self.gnb_id_length)) as u32)
    }

    /// gNB ID as the octets of the `gNB-ID` bit string, most significant first.
    pub fn gnb_id_bytes(&self) -> Option<Vec<u8>> {
        let octets = usize::from(self.gnb_id_length / 8);
        Some(self.gnb_id()?.to_be_bytes()[4 - octets..].to_vec())
    }

    /// Tracking area this gNB serves.
    pub fn tai(&self) -> Tai {
        Tai::new(self.plmn, self.tac)
    }

    /// Slice advertised in NG Setup.
    pub fn primary_slice(&self) -> Option<SNssai> {
        self.nssai.first().copied()
    }
}
