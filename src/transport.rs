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

//! The call primitive
//!
//! The driver is reached through one operation: hand it a selector and an
//! input record, get back a status and an output record. Everything above
//! this trait is platform independent.

use smc_error::Result;
use smc_protocol::PARAM_STRUCT_SIZE;

/// One structured-method call into the driver.
///
/// Implementations fill `output` and return the transport status
/// (`io_return::SUCCESS` on success). Calls take `&mut self`: a handle is
/// used by one caller at a time, and sharing one across threads needs
/// external locking.
#[cfg_attr(test, mockall::automock)]
pub trait SmcTransport {
    fn call_struct_method(
        &mut self,
        selector: u32,
        input: &[u8; PARAM_STRUCT_SIZE],
        output: &mut [u8; PARAM_STRUCT_SIZE],
    ) -> u32;
}

impl<T: SmcTransport + ?Sized> SmcTransport for &mut T {
    fn call_struct_method(
        &mut self,
        selector: u32,
        input: &[u8; PARAM_STRUCT_SIZE],
        output: &mut [u8; PARAM_STRUCT_SIZE],
    ) -> u32 {
        (**self).call_struct_method(selector, input, output)
    }
}

impl<T: SmcTransport + ?Sized> SmcTransport for Box<T> {
    fn call_struct_method(
        &mut self,
        selector: u32,
        input: &[u8; PARAM_STRUCT_SIZE],
        output: &mut [u8; PARAM_STRUCT_SIZE],
    ) -> u32 {
        (**self).call_struct_method(selector, input, output)
    }
}

/// Open the platform's driver connection.
#[cfg(target_os = "macos")]
pub fn open_default() -> Result<Box<dyn SmcTransport>> {
    Ok(Box::new(crate::iokit::IoKitTransport::open()?))
}

/// Open the platform's driver connection.
#[cfg(not(target_os = "macos"))]
pub fn open_default() -> Result<Box<dyn SmcTransport>> {
    Err(smc_error::SmcError::NotSupported(format!(
        "the AppleSMC driver is not available on {}",
        std::env::consts::OS
    )))
}

#[cfg(test)]
mod tests {
    use super::*;
    use smc_protocol::io_return;

    fn call_through<T: SmcTransport>(mut transport: T, selector: u32) -> (u32, [u8; PARAM_STRUCT_SIZE]) {
        let mut output = [0u8; PARAM_STRUCT_SIZE];
        let status = transport.call_struct_method(selector, &[0u8; PARAM_STRUCT_SIZE], &mut output);
        (status, output)
    }

    #[test]
    fn test_mut_ref_forwards() {
        let mut mock = MockSmcTransport::new();
        mock.expect_call_struct_method()
            .times(1)
            .returning(|selector, _, output| {
                output[0] = selector as u8;
                io_return::SUCCESS
            });

        let (status, output) = call_through(&mut mock, 2);
        assert_eq!(status, io_return::SUCCESS);
        assert_eq!(output[0], 2);
    }

    #[test]
    fn test_boxed_forwards() {
        let mut mock = MockSmcTransport::new();
        mock.expect_call_struct_method()
            .times(1)
            .returning(|_, _, _| io_return::NOT_PRIVILEGED);

        let boxed: Box<dyn SmcTransport> = Box::new(mock);
        let (status, _) = call_through(boxed, 2);
        assert_eq!(status, io_return::NOT_PRIVILEGED);
    }

    #[cfg(not(target_os = "macos"))]
    #[test]
    fn test_open_default_unsupported() {
        assert!(matches!(open_default(), Err(smc_error::SmcError::NotSupported(_))));
    }
}
