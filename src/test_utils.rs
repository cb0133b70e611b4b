/*
 * Test utilities for smcctl
 *
 * A simulated controller that answers driver calls from an in-memory key
 * table, so the dispatch layer and every accessor above it can be exercised
 * without the real driver.
 */

use smc_protocol::{
    io_return, DataType, FourCharCode, ParamStruct, ResultCode, Selector, SmcBytes,
    PARAM_STRUCT_SIZE, SMC_BYTES_LEN,
};

use crate::transport::SmcTransport;

/// In-memory controller. Keys keep insertion order, which is also their
/// index order. `#KEY` is answered with the number of keys unless a test
/// adds it explicitly.
#[derive(Debug, Default)]
pub struct FakeController {
    keys: Vec<(FourCharCode, DataType, SmcBytes)>,
    /// Round trips served so far.
    pub calls: usize,
    /// Every write: key, payload and declared size.
    pub writes: Vec<(FourCharCode, SmcBytes, u32)>,
    /// When set, every call fails with this transport status.
    pub transport_status: Option<u32>,
}

impl FakeController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_key(mut self, code: &str, info: DataType, data: &[u8]) -> Self {
        let mut bytes = [0u8; SMC_BYTES_LEN];
        bytes[..data.len()].copy_from_slice(data);
        let code = FourCharCode::parse(code).expect("test key must be four characters");
        self.keys.push((code, info, bytes));
        self
    }

    pub fn failing_with(mut self, status: u32) -> Self {
        self.transport_status = Some(status);
        self
    }

    /// Current payload of `code`.
    pub fn value(&self, code: &str) -> Option<SmcBytes> {
        let code = FourCharCode::parse(code).ok()?;
        self.find(code).map(|i| self.keys[i].2)
    }

    fn find(&self, code: FourCharCode) -> Option<usize> {
        self.keys.iter().position(|(c, _, _)| *c == code)
    }

    fn answer(&mut self, request: &ParamStruct) -> ParamStruct {
        let mut response = *request;
        response.result = ResultCode::SUCCESS;

        let found = self.find(request.key);
        match Selector::try_from(request.data8) {
            Ok(Selector::GetKeyInfo) => match found {
                Some(i) => {
                    response.key_info.data_type = self.keys[i].1.code;
                    response.key_info.data_size = self.keys[i].1.size;
                }
                None => response.result = ResultCode::KEY_NOT_FOUND,
            },
            Ok(Selector::GetKeyFromIndex) => match self.keys.get(request.data32 as usize) {
                Some((code, _, _)) => response.key = *code,
                None => response.result = ResultCode::KEY_NOT_FOUND,
            },
            Ok(Selector::ReadKey) => match found {
                Some(i) => response.bytes = self.keys[i].2,
                None if request.key.to_string() == "#KEY" => {
                    response.bytes = [0u8; SMC_BYTES_LEN];
                    response.bytes[..4].copy_from_slice(&(self.keys.len() as u32).to_be_bytes());
                }
                None => response.result = ResultCode::KEY_NOT_FOUND,
            },
            Ok(Selector::WriteKey) => match found {
                Some(i) => {
                    self.keys[i].2 = request.bytes;
                    self.writes
                        .push((request.key, request.bytes, request.key_info.data_size));
                }
                None => response.result = ResultCode::KEY_NOT_FOUND,
            },
            _ => response.result = ResultCode::ERROR,
        }
        response
    }
}

impl SmcTransport for FakeController {
    fn call_struct_method(
        &mut self,
        selector: u32,
        input: &[u8; PARAM_STRUCT_SIZE],
        output: &mut [u8; PARAM_STRUCT_SIZE],
    ) -> u32 {
        self.calls += 1;
        if let Some(status) = self.transport_status {
            return status;
        }
        if selector != u32::from(Selector::HandleEvent) {
            return io_return::ERROR;
        }
        let request = ParamStruct::from_bytes(input);
        *output = self.answer(&request).to_bytes();
        io_return::SUCCESS
    }
}
