//! The parameter record
//!
//! Every driver call sends one 80-byte record and receives one back. The
//! driver reads fields by fixed offset, so the layout below is spelled out
//! field by field instead of trusting any compiler's struct layout. Integer
//! fields are in host byte order, as the driver sees them in memory.
//!
//! ```text
//! offset  size  field
//!      0     4  key
//!      4     6  version (major, minor, build, reserved, release:u16)
//!     12    16  power limit (version:u16, length:u16, cpu, gpu, mem:u32)
//!     28     9  key info (data_size:u32, data_type:u32, attributes:u8)
//!     38     2  padding
//!     40     1  result
//!     41     1  status
//!     42     1  data8 (selector)
//!     44     4  data32
//!     48    32  bytes
//! ```
//!
//! Offsets 10..12, 37 and 43 are alignment gaps and are always zero on the wire.

use crate::fourcc::FourCharCode;

/// Size of the record on the wire.
pub const PARAM_STRUCT_SIZE: usize = 80;

/// Size of the data payload.
pub const SMC_BYTES_LEN: usize = 32;

/// The data payload of a record.
pub type SmcBytes = [u8; SMC_BYTES_LEN];

/// Byte offsets of every field within the record.
pub mod layout {
    pub const KEY: usize = 0;
    pub const VERSION: usize = 4;
    pub const POWER_LIMIT: usize = 12;
    pub const KEY_INFO: usize = 28;
    pub const PADDING: usize = 38;
    pub const RESULT: usize = 40;
    pub const STATUS: usize = 41;
    pub const DATA8: usize = 42;
    pub const DATA32: usize = 44;
    pub const BYTES: usize = 48;
}

const _: () = assert!(layout::BYTES + SMC_BYTES_LEN == PARAM_STRUCT_SIZE);

/// Transport status codes (IOReturn) reported by the call primitive.
pub mod io_return {
    pub const SUCCESS: u32 = 0;
    pub const ERROR: u32 = 0xE000_02BC;
    pub const NOT_PRIVILEGED: u32 = 0xE000_02C1;
}

/// Operation codes. The numeric values belong to the driver.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Selector {
    /// Generic passthrough; the method index every call goes through.
    HandleEvent = 2,
    ReadKey = 5,
    WriteKey = 6,
    GetKeyFromIndex = 8,
    GetKeyInfo = 9,
}

impl Selector {
    pub const fn as_u8(self) -> u8 {
        self as u8
    }
}

impl From<Selector> for u32 {
    fn from(selector: Selector) -> Self {
        selector as u32
    }
}

impl TryFrom<u8> for Selector {
    type Error = u8;

    fn try_from(value: u8) -> Result<Self, u8> {
        match value {
            2 => Ok(Self::HandleEvent),
            5 => Ok(Self::ReadKey),
            6 => Ok(Self::WriteKey),
            8 => Ok(Self::GetKeyFromIndex),
            9 => Ok(Self::GetKeyInfo),
            other => Err(other),
        }
    }
}

/// Outcome byte the driver writes into `result`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResultCode {
    Success,
    Error,
    KeyNotFound,
    Other(u8),
}

impl ResultCode {
    pub const SUCCESS: u8 = 0x00;
    pub const ERROR: u8 = 0x01;
    pub const KEY_NOT_FOUND: u8 = 0x84;

    pub const fn as_u8(self) -> u8 {
        match self {
            Self::Success => Self::SUCCESS,
            Self::Error => Self::ERROR,
            Self::KeyNotFound => Self::KEY_NOT_FOUND,
            Self::Other(b) => b,
        }
    }
}

impl From<u8> for ResultCode {
    fn from(b: u8) -> Self {
        match b {
            Self::SUCCESS => Self::Success,
            Self::ERROR => Self::Error,
            Self::KEY_NOT_FOUND => Self::KeyNotFound,
            other => Self::Other(other),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Version {
    pub major: u8,
    pub minor: u8,
    pub build: u8,
    pub reserved: u8,
    pub release: u16,
}

/// Power limit block. No operation here reads it but the driver expects it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PowerLimit {
    pub version: u16,
    pub length: u16,
    pub cpu_plimit: u32,
    pub gpu_plimit: u32,
    pub mem_plimit: u32,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct KeyInfo {
    pub data_size: u32,
    pub data_type: FourCharCode,
    pub data_attributes: u8,
}

/// One request or response exchanged with the driver.
///
/// `Default` gives the all-zero record.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ParamStruct {
    pub key: FourCharCode,
    pub version: Version,
    pub power_limit: PowerLimit,
    pub key_info: KeyInfo,
    pub padding: u16,
    pub result: u8,
    pub status: u8,
    /// Operation selector for the request.
    pub data8: u8,
    pub data32: u32,
    pub bytes: SmcBytes,
}

impl ParamStruct {
    /// Zeroed record addressed at `key` for operation `selector`.
    pub fn request(key: FourCharCode, selector: Selector) -> Self {
        Self {
            key,
            data8: selector.as_u8(),
            ..Self::default()
        }
    }

    pub fn result_code(&self) -> ResultCode {
        ResultCode::from(self.result)
    }

    pub fn to_bytes(&self) -> [u8; PARAM_STRUCT_SIZE] {
        let mut buf = [0u8; PARAM_STRUCT_SIZE];

        put_u32(&mut buf, layout::KEY, self.key.raw());

        let v = layout::VERSION;
        buf[v] = self.version.major;
        buf[v + 1] = self.version.minor;
        buf[v + 2] = self.version.build;
        buf[v + 3] = self.version.reserved;
        put_u16(&mut buf, v + 4, self.version.release);

        let p = layout::POWER_LIMIT;
        put_u16(&mut buf, p, self.power_limit.version);
        put_u16(&mut buf, p + 2, self.power_limit.length);
        put_u32(&mut buf, p + 4, self.power_limit.cpu_plimit);
        put_u32(&mut buf, p + 8, self.power_limit.gpu_plimit);
        put_u32(&mut buf, p + 12, self.power_limit.mem_plimit);

        let k = layout::KEY_INFO;
        put_u32(&mut buf, k, self.key_info.data_size);
        put_u32(&mut buf, k + 4, self.key_info.data_type.raw());
        buf[k + 8] = self.key_info.data_attributes;

        put_u16(&mut buf, layout::PADDING, self.padding);
        buf[layout::RESULT] = self.result;
        buf[layout::STATUS] = self.status;
        buf[layout::DATA8] = self.data8;
        put_u32(&mut buf, layout::DATA32, self.data32);
        buf[layout::BYTES..].copy_from_slice(&self.bytes);

        buf
    }

    pub fn from_bytes(buf: &[u8; PARAM_STRUCT_SIZE]) -> Self {
        let v = layout::VERSION;
        let p = layout::POWER_LIMIT;
        let k = layout::KEY_INFO;

        let mut bytes = [0u8; SMC_BYTES_LEN];
        bytes.copy_from_slice(&buf[layout::BYTES..]);

        Self {
            key: FourCharCode::from_raw(get_u32(buf, layout::KEY)),
            version: Version {
                major: buf[v],
                minor: buf[v + 1],
                build: buf[v + 2],
                reserved: buf[v + 3],
                release: get_u16(buf, v + 4),
            },
            power_limit: PowerLimit {
                version: get_u16(buf, p),
                length: get_u16(buf, p + 2),
                cpu_plimit: get_u32(buf, p + 4),
                gpu_plimit: get_u32(buf, p + 8),
                mem_plimit: get_u32(buf, p + 12),
            },
            key_info: KeyInfo {
                data_size: get_u32(buf, k),
                data_type: FourCharCode::from_raw(get_u32(buf, k + 4)),
                data_attributes: buf[k + 8],
            },
            padding: get_u16(buf, layout::PADDING),
            result: buf[layout::RESULT],
            status: buf[layout::STATUS],
            data8: buf[layout::DATA8],
            data32: get_u32(buf, layout::DATA32),
            bytes,
        }
    }
}

fn put_u16(buf: &mut [u8], at: usize, value: u16) {
    buf[at..at + 2].copy_from_slice(&value.to_ne_bytes());
}

fn put_u32(buf: &mut [u8], at: usize, value: u32) {
    buf[at..at + 4].copy_from_slice(&value.to_ne_bytes());
}

fn get_u16(buf: &[u8], at: usize) -> u16 {
    let mut raw = [0u8; 2];
    raw.copy_from_slice(&buf[at..at + 2]);
    u16::from_ne_bytes(raw)
}

fn get_u32(buf: &[u8], at: usize) -> u32 {
    let mut raw = [0u8; 4];
    raw.copy_from_slice(&buf[at..at + 4]);
    u32::from_ne_bytes(raw)
}
