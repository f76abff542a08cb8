//! Identifier value types shared by the NGAP builders: PLMN, TAI and S-NSSAI.
//!
//! These are plain values. They are assumed valid by the time they reach a
//! builder; parsing from text is the only place they are checked.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::Error;

/// Public Land Mobile Network identifier.
///
/// MCC is always three decimal digits, MNC is two or three. `long_mnc`
/// distinguishes "01" from "001", which encode differently on the wire.
///
/// In configuration files a PLMN is written as its digit string, e.g.
/// `"00101"` or `"310410"`.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Plmn {
    /// Mobile Country Code (0-999)
    pub mcc: u16,
    /// Mobile Network Code (0-999)
    pub mnc: u16,
    /// True if the MNC has three digits
    pub long_mnc: bool,
}

impl Plmn {
    /// Creates a PLMN from its numeric parts.
    pub const fn new(mcc: u16, mnc: u16, long_mnc: bool) -> Self {
        Self { mcc, mnc, long_mnc }
    }

    /// Encodes the PLMN as the 3-octet BCD form used by PLMNIdentity (TS 24.008 10.5.1.13).
    ///
    /// A two-digit MNC puts the filler nibble `F` in place of the third MNC digit.
    pub fn encode(&self) -> [u8; 3] {
        let [mcc1, mcc2, mcc3] = digits(self.mcc);
        let [mnc1, mnc2, mnc3] = if self.long_mnc {
            digits(self.mnc)
        } else {
            let [_, d1, d2] = digits(self.mnc);
            [d1, d2, 0x0F]
        };

        [(mcc2 << 4) | mcc1, (mnc3 << 4) | mcc3, (mnc2 << 4) | mnc1]
    }

    /// Decodes the 3-octet BCD form back into a PLMN.
    pub fn decode(octets: [u8; 3]) -> Self {
        let nibble = |octet: u8, high: bool| -> u16 {
            if high {
                u16::from(octet >> 4)
            } else {
                u16::from(octet & 0x0F)
            }
        };

        let mcc = nibble(octets[0], false) * 100
            + nibble(octets[0], true) * 10
            + nibble(octets[1], false);
        let mnc_head = nibble(octets[2], false) * 10 + nibble(octets[2], true);
        let mnc3 = nibble(octets[1], true);

        if mnc3 == 0x0F {
            Self::new(mcc, mnc_head, false)
        } else {
            Self::new(mcc, mnc_head * 10 + mnc3, true)
        }
    }
}

fn digits(value: u16) -> [u8; 3] {
    [
        ((value / 100) % 10) as u8,
        ((value / 10) % 10) as u8,
        (value % 10) as u8,
    ]
}

impl FromStr for Plmn {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if !(5..=6).contains(&s.len()) || !s.bytes().all(|b| b.is_ascii_digit()) {
            return Err(Error::InvalidValue(format!(
                "PLMN must be 5 or 6 decimal digits, got {s:?}"
            )));
        }

        let (mcc, mnc) = s.split_at(3);
        let parse = |part: &str| {
            part.parse::<u16>()
                .map_err(|e| Error::InvalidValue(format!("PLMN {s:?}: {e}")))
        };

        Ok(Self::new(parse(mcc)?, parse(mnc)?, mnc.len() == 3))
    }
}

impl TryFrom<String> for Plmn {
    type Error = Error;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Plmn> for String {
    fn from(plmn: Plmn) -> Self {
        plmn.to_string()
    }
}

impl fmt::Debug for Plmn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Plmn({self})")
    }
}

impl fmt::Display for Plmn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.long_mnc {
            write!(f, "{:03}{:03}", self.mcc, self.mnc)
        } else {
            write!(f, "{:03}{:02}", self.mcc, self.mnc)
        }
    }
}

/// Tracking Area Identity: a PLMN plus a 24-bit Tracking Area Code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Tai {
    /// PLMN the tracking area belongs to
    pub plmn: Plmn,
    /// Tracking Area Code (24-bit)
    pub tac: u32,
}

impl Tai {
    /// Creates a TAI.
    pub const fn new(plmn: Plmn, tac: u32) -> Self {
        Self { plmn, tac }
    }

    /// TAC as the three big-endian octets carried in the NGAP `TAC` IE.
    pub fn tac_bytes(&self) -> [u8; 3] {
        let [_, b1, b2, b3] = self.tac.to_be_bytes();
        [b1, b2, b3]
    }
}

impl fmt::Display for Tai {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{:06x}", self.plmn, self.tac)
    }
}

/// Single Network Slice Selection Assistance Information.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct SNssai {
    /// Slice/Service Type
    pub sst: u8,
    /// Slice Differentiator (24-bit), absent for standardized slices
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sd: Option<u32>,
}

impl SNssai {
    /// S-NSSAI with only an SST.
    pub const fn new(sst: u8) -> Self {
        Self { sst, sd: None }
    }

    /// S-NSSAI with SST and SD.
    pub const fn with_sd(sst: u8, sd: u32) -> Self {
        Self { sst, sd: Some(sd) }
    }

    /// SD as the three big-endian octets carried in the NGAP `SD` IE.
    pub fn sd_bytes(&self) -> Option<[u8; 3]> {
        self.sd.map(|sd| {
            let [_, b1, b2, b3] = sd.to_be_bytes();
            [b1, b2, b3]
        })
    }
}

impl fmt::Display for SNssai {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.sd {
            Some(sd) => write!(f, "{}-{:06x}", self.sst, sd),
            None => write!(f, "{}", self.sst),
        }
    }
}
