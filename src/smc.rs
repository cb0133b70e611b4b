/*
 * This file is part of smcctl.
 *
 * Copyright (C) 2025 smcctl contributors
 *
 * smcctl is free software: you can redistribute it and/or modify
 * it under the terms of the GNU General Public License as published by
 * the Free Software Foundation, either version 3 of the License, or
 * (at your option) any later version.
 *
 * smcctl is distributed in the hope that it will be useful,
 * but WITHOUT ANY WARRANTY; without even the implied warranty of
 * MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the
 * GNU General Public License for more details.
 *
 * You should have received a copy of the GNU General Public License
 * along with smcctl. If not, see <https://www.gnu.org/licenses/>.
 */

//! Dispatch and key-space operations
//!
//! `Smc` owns a transport and turns each operation into exactly one round
//! trip: build a request record, call the driver, classify the outcome.
//! There are no retries; a failed call is reported as is.

use tracing::{debug, trace};

use smc_error::{Result, SmcError};
use smc_protocol::{
    assemble_u32, io_return, DataType, FourCharCode, Key, ParamStruct, ResultCode, Selector,
    SmcBytes, PARAM_STRUCT_SIZE,
};

use crate::keys;
use crate::transport::SmcTransport;

/// A controller session over one driver connection.
pub struct Smc<T> {
    transport: T,
}

impl<T: SmcTransport> Smc<T> {
    pub fn new(transport: T) -> Self {
        Self { transport }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn transport_mut(&mut self) -> &mut T {
        &mut self.transport
    }

    pub fn into_inner(self) -> T {
        self.transport
    }

    /// Send `request` through method `selector` and return the response.
    ///
    /// Succeeds only when the transport reports success and the response's
    /// `result` byte is the success code.
    pub fn invoke(&mut self, request: &ParamStruct, selector: Selector) -> Result<ParamStruct> {
        let input = request.to_bytes();
        let mut output = [0u8; PARAM_STRUCT_SIZE];

        trace!(key = %request.key, data8 = request.data8, data32 = request.data32, "driver call");
        let status = self
            .transport
            .call_struct_method(selector.into(), &input, &mut output);

        match status {
            io_return::SUCCESS => {}
            io_return::NOT_PRIVILEGED => {
                debug!(key = %request.key, "driver call refused: not privileged");
                return Err(SmcError::NotPrivileged);
            }
            code => {
                debug!(key = %request.key, "driver call failed: 0x{:08x}", code);
                return Err(SmcError::Transport { code });
            }
        }

        let response = ParamStruct::from_bytes(&output);
        match response.result_code() {
            ResultCode::Success => Ok(response),
            ResultCode::KeyNotFound => {
                debug!(key = %request.key, "key not found");
                Err(SmcError::KeyNotFound(request.key.to_string()))
            }
            other => {
                debug!(key = %request.key, result = other.as_u8(), "controller error");
                Err(SmcError::UnknownProtocol {
                    transport: status,
                    result: other.as_u8(),
                })
            }
        }
    }

    /// `invoke` through the generic passthrough method.
    pub fn call(&mut self, request: &ParamStruct) -> Result<ParamStruct> {
        self.invoke(request, Selector::HandleEvent)
    }

    /// Declared type and size of `code`.
    pub fn key_info(&mut self, code: FourCharCode) -> Result<DataType> {
        let request = ParamStruct::request(code, Selector::GetKeyInfo);
        let response = self.call(&request)?;
        Ok(DataType::new(response.key_info.data_type, response.key_info.data_size))
    }

    /// Code of the key at `index`, in the driver's own ordering.
    pub fn key_at_index(&mut self, index: u32) -> Result<FourCharCode> {
        let mut request = ParamStruct::request(FourCharCode::default(), Selector::GetKeyFromIndex);
        request.data32 = index;
        Ok(self.call(&request)?.key)
    }

    /// Raw payload of `key`. Only the first `key.info.size` bytes carry data.
    pub fn read_bytes(&mut self, key: &Key) -> Result<SmcBytes> {
        let mut request = ParamStruct::request(key.code, Selector::ReadKey);
        request.key_info.data_size = key.info.size;
        Ok(self.call(&request)?.bytes)
    }

    pub fn write_bytes(&mut self, key: &Key, data: &SmcBytes) -> Result<()> {
        let mut request = ParamStruct::request(key.code, Selector::WriteKey);
        request.key_info.data_size = key.info.size;
        request.bytes = *data;
        self.call(&request)?;
        Ok(())
    }

    pub fn key_count(&mut self) -> Result<u32> {
        let b = self.read_bytes(&keys::KEY_COUNT)?;
        Ok(assemble_u32(b[0], b[1], b[2], b[3]))
    }

    /// Every key, in index order. Reads the key count up front, then costs
    /// two round trips per key as the iterator advances, so a full walk of
    /// N keys makes 1 + 2N calls including the count read.
    pub fn all_keys(&mut self) -> Result<AllKeys<'_, T>> {
        let count = self.key_count()?;
        debug!(count, "enumerating keys");
        Ok(AllKeys {
            smc: self,
            next: 0,
            count,
        })
    }

    /// Only a not-found answer means `false`; other failures propagate.
    pub fn key_exists(&mut self, code: FourCharCode) -> Result<bool> {
        match self.key_info(code) {
            Ok(_) => Ok(true),
            Err(e) if e.is_key_not_found() => Ok(false),
            Err(e) => Err(e),
        }
    }

    /// Look up `code`'s type, then read it. Returns the key and its
    /// meaningful bytes.
    pub fn read_key_value(&mut self, code: FourCharCode) -> Result<(Key, Vec<u8>)> {
        let info = self.key_info(code)?;
        let key = Key::new(code, info);
        let bytes = self.read_bytes(&key)?;
        let len = (info.size as usize).min(bytes.len());
        Ok((key, bytes[..len].to_vec()))
    }
}

/// Lazy enumeration returned by [`Smc::all_keys`].
///
/// Each item is independent: a failed lookup yields an error and iteration
/// moves on to the next index. Dropping the iterator early has no effect
/// beyond the calls already made.
pub struct AllKeys<'a, T> {
    smc: &'a mut Smc<T>,
    next: u32,
    count: u32,
}

impl<T: SmcTransport> AllKeys<'_, T> {
    pub fn count_hint(&self) -> u32 {
        self.count
    }

    fn lookup(&mut self, index: u32) -> Result<Key> {
        let code = self.smc.key_at_index(index)?;
        let info = self.smc.key_info(code)?;
        Ok(Key::new(code, info))
    }
}

impl<T: SmcTransport> Iterator for AllKeys<'_, T> {
    type Item = Result<Key>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.next >= self.count {
            return None;
        }
        let index = self.next;
        self.next += 1;
        Some(self.lookup(index))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = (self.count - self.next) as usize;
        (remaining, Some(remaining))
    }
}
