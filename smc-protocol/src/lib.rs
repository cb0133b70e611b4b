//! Shared wire types for the System Management Controller driver protocol.
//!
//! Everything in this crate is pure: no I/O, no driver handles. It defines
//! the 80-byte parameter record exchanged with the kernel driver, the
//! selector and result codes that label it, and the small numeric encodings
//! used inside the record's 32-byte payload.

pub mod codec;
pub mod fourcc;
pub mod record;
pub mod types;

pub use codec::{
    assemble_u32, bool_from_byte, decode_fpe2, decode_sp78, encode_fpe2, pack_four_char,
    unpack_four_char,
};
pub use fourcc::FourCharCode;
pub use record::{
    io_return, layout, KeyInfo, ParamStruct, PowerLimit, ResultCode, Selector, SmcBytes,
    Version, PARAM_STRUCT_SIZE, SMC_BYTES_LEN,
};
pub use types::{DataType, Key};
