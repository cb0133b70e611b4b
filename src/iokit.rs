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

//! IOKit transport
//!
//! Connects to the `AppleSMC` service and forwards calls to
//! `IOConnectCallStructMethod`.

use std::ffi::{c_char, c_void};

use tracing::debug;

use smc_error::{Result, SmcError};
use smc_protocol::{io_return, PARAM_STRUCT_SIZE};

use crate::transport::SmcTransport;

type KernReturn = libc::c_int;
type IoObject = libc::mach_port_t;
type IoConnect = libc::mach_port_t;

const IO_MAIN_PORT_DEFAULT: libc::mach_port_t = 0;
const SERVICE_NAME: &[u8] = b"AppleSMC\0";

#[link(name = "IOKit", kind = "framework")]
extern "C" {
    fn IOServiceMatching(name: *const c_char) -> *mut c_void;
    fn IOServiceGetMatchingService(
        main_port: libc::mach_port_t,
        matching: *mut c_void,
    ) -> IoObject;
    fn IOServiceOpen(
        service: IoObject,
        owning_task: libc::mach_port_t,
        connect_type: u32,
        connect: *mut IoConnect,
    ) -> KernReturn;
    fn IOServiceClose(connect: IoConnect) -> KernReturn;
    fn IOObjectRelease(object: IoObject) -> KernReturn;
    fn IOConnectCallStructMethod(
        connection: IoConnect,
        selector: u32,
        input: *const c_void,
        input_size: usize,
        output: *mut c_void,
        output_size: *mut usize,
    ) -> KernReturn;
}

extern "C" {
    static mach_task_self_: libc::mach_port_t;
}

/// An open connection to the controller driver. Closed on drop.
pub struct IoKitTransport {
    connection: IoConnect,
}

impl IoKitTransport {
    pub fn open() -> Result<Self> {
        // SAFETY: FFI calls with a valid NUL-terminated name; the matching
        // dictionary is consumed by IOServiceGetMatchingService.
        let service = unsafe {
            let matching = IOServiceMatching(SERVICE_NAME.as_ptr().cast::<c_char>());
            if matching.is_null() {
                return Err(SmcError::NotSupported("cannot match AppleSMC service".into()));
            }
            IOServiceGetMatchingService(IO_MAIN_PORT_DEFAULT, matching)
        };
        if service == 0 {
            return Err(SmcError::NotSupported("AppleSMC service not found".into()));
        }

        let mut connection: IoConnect = 0;
        // SAFETY: `service` is a live io_object_t and `connection` is a valid
        // out pointer. The service reference is released either way.
        let status = unsafe {
            let status = IOServiceOpen(service, mach_task_self_, 0, &mut connection);
            IOObjectRelease(service);
            status as u32
        };

        match status {
            io_return::SUCCESS => {
                debug!(connection, "opened AppleSMC connection");
                Ok(Self { connection })
            }
            io_return::NOT_PRIVILEGED => Err(SmcError::NotPrivileged),
            code => Err(SmcError::Transport { code }),
        }
    }

    /// Close the connection now. Returns true if the driver accepted it.
    pub fn close(mut self) -> bool {
        self.close_connection()
    }

    fn close_connection(&mut self) -> bool {
        if self.connection == 0 {
            return true;
        }
        // SAFETY: `connection` came from IOServiceOpen and is closed once.
        let status = unsafe { IOServiceClose(self.connection) };
        self.connection = 0;
        status as u32 == io_return::SUCCESS
    }
}

impl Drop for IoKitTransport {
    fn drop(&mut self) {
        self.close_connection();
    }
}

impl SmcTransport for IoKitTransport {
    fn call_struct_method(
        &mut self,
        selector: u32,
        input: &[u8; PARAM_STRUCT_SIZE],
        output: &mut [u8; PARAM_STRUCT_SIZE],
    ) -> u32 {
        let mut output_size = PARAM_STRUCT_SIZE;
        // SAFETY: both buffers are PARAM_STRUCT_SIZE bytes and outlive the call.
        let status = unsafe {
            IOConnectCallStructMethod(
                self.connection,
                selector,
                input.as_ptr().cast(),
                PARAM_STRUCT_SIZE,
                output.as_mut_ptr().cast(),
                &mut output_size,
            )
        };
        status as u32
    }
}
