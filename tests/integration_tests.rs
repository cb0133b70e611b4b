/*
 * Integration tests for smcctl
 *
 * These tests drive the public API end to end through a mocked call
 * primitive, checking both the bytes that reach the driver and the values
 * decoded from its answers.
 */

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use mockall::mock;

use smc_protocol::{decode_sp78, io_return, ResultCode, PARAM_STRUCT_SIZE};
use smcctl::{DataType, FourCharCode, ParamStruct, Selector, Smc, SmcError, SmcTransport};

mock! {
    Driver {}

    impl SmcTransport for Driver {
        fn call_struct_method(
            &mut self,
            selector: u32,
            input: &[u8; PARAM_STRUCT_SIZE],
            output: &mut [u8; PARAM_STRUCT_SIZE],
        ) -> u32;
    }
}

fn code(s: &str) -> FourCharCode {
    FourCharCode::parse(s).unwrap()
}

/// Driver answering every call through `answer`, which edits the response
/// record (pre-filled as a copy of the request with result = success).
fn driver<F>(answer: F) -> MockDriver
where
    F: Fn(&ParamStruct, &mut ParamStruct) + Send + 'static,
{
    let mut mock = MockDriver::new();
    mock.expect_call_struct_method()
        .returning(move |selector, input, output| {
            assert_eq!(selector, u32::from(Selector::HandleEvent));
            let request = ParamStruct::from_bytes(input);
            let mut response = request;
            response.result = ResultCode::SUCCESS;
            answer(&request, &mut response);
            *output = response.to_bytes();
            io_return::SUCCESS
        });
    mock
}

#[test]
fn test_key_info_end_to_end() {
    let mock = driver(|request, response| {
        assert_eq!(request.data8, Selector::GetKeyInfo.as_u8());
        assert_eq!(request.key, code("TC0P"));
        response.key_info.data_type = code("sp78");
        response.key_info.data_size = 2;
    });
    let mut smc = Smc::new(mock);
    assert_eq!(
        smc.key_info(code("TC0P")).unwrap(),
        DataType::new(code("sp78"), 2)
    );
}

#[test]
fn test_sp78_payload_decodes_to_fifty() {
    let mock = driver(|request, response| {
        assert_eq!(request.data8, Selector::ReadKey.as_u8());
        assert_eq!(request.key_info.data_size, 2);
        response.bytes = [0u8; 32];
        response.bytes[0] = 0x32;
    });
    let mut smc = Smc::new(mock);

    let key = smcctl::Key::new(code("TC0P"), DataType::SP78);
    let bytes = smc.read_bytes(&key).unwrap();
    assert_eq!(decode_sp78(bytes[0], bytes[1]), 50.0);
    assert_eq!(
        smc.temperature(code("TC0P"), smcctl::TemperatureUnit::Celsius).unwrap(),
        50.0
    );
}

#[test]
fn test_key_count_then_all_keys_round_trips() {
    let names = ["TC0P", "TB0T", "FNum", "F0Ac", "BATP"];
    let calls = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&calls);

    let mock = driver(move |request, response| {
        counter.fetch_add(1, Ordering::SeqCst);
        match Selector::try_from(request.data8) {
            Ok(Selector::ReadKey) => {
                assert_eq!(request.key, code("#KEY"));
                response.bytes = [0u8; 32];
                response.bytes[3] = 5;
            }
            Ok(Selector::GetKeyFromIndex) => {
                response.key = code(names[request.data32 as usize]);
            }
            Ok(Selector::GetKeyInfo) => {
                response.key_info.data_type = code("ui8 ");
                response.key_info.data_size = 1;
            }
            other => panic!("unexpected selector {:?}", other),
        }
    });
    let mut smc = Smc::new(mock);

    assert_eq!(smc.key_count().unwrap(), 5);
    assert_eq!(calls.load(Ordering::SeqCst), 1);

    let before = calls.load(Ordering::SeqCst);
    let keys: Vec<_> = smc
        .all_keys()
        .unwrap()
        .collect::<smcctl::Result<Vec<_>>>()
        .unwrap();
    let after = calls.load(Ordering::SeqCst);

    let listed: Vec<String> = keys.iter().map(|k| k.code.to_string()).collect();
    assert_eq!(listed, names);
    // all_keys re-reads the count, then two lookups per key
    assert_eq!(after - before, 1 + 5 * 2);
}

#[test]
fn test_battery_status_byte() {
    let mock = driver(|request, response| {
        response.bytes = [0u8; 32];
        response.bytes[0] = match request.key.to_string().as_str() {
            "BNum" => 1,
            "BATP" => 0,
            "BSIn" => 0b0100_0011,
            other => panic!("unexpected key {}", other),
        };
    });
    let mut smc = Smc::new(mock);

    let info = smc.battery_info().unwrap();
    assert!(info.is_charging);
    assert!(info.is_ac_present);
    assert!(info.is_battery_ok);
    assert!(!info.is_battery_powered);
    assert_eq!(info.battery_count, 1);
}

#[test]
fn test_key_not_found_with_successful_transport() {
    let mock = driver(|_, response| {
        response.result = ResultCode::KEY_NOT_FOUND;
    });
    let mut smc = Smc::new(mock);

    match smc.key_info(code("XXXX")) {
        Err(SmcError::KeyNotFound(key)) => assert_eq!(key, "XXXX"),
        other => panic!("expected KeyNotFound, got {:?}", other),
    }
    assert!(!smc.key_exists(code("XXXX")).unwrap());
}

#[test]
fn test_not_privileged_is_reported_and_not_retried() {
    let mut mock = MockDriver::new();
    mock.expect_call_struct_method()
        .times(1)
        .returning(|_, _, _| io_return::NOT_PRIVILEGED);
    let mut smc = Smc::new(mock);

    let key = smcctl::Key::new(code("F0Mn"), DataType::FPE2);
    assert!(matches!(
        smc.write_bytes(&key, &[0u8; 32]),
        Err(SmcError::NotPrivileged)
    ));
}

#[test]
fn test_fan_min_speed_write_bytes() {
    let written = Arc::new(std::sync::Mutex::new(Vec::new()));
    let sink = Arc::clone(&written);

    let mock = driver(move |request, response| {
        match Selector::try_from(request.data8) {
            Ok(Selector::ReadKey) => {
                assert_eq!(request.key, code("F1Mx"));
                response.bytes = [0u8; 32];
                // 6000 RPM
                response.bytes[0] = 0x5D;
                response.bytes[1] = 0xC0;
            }
            Ok(Selector::WriteKey) => {
                sink.lock().unwrap().push((request.key, request.bytes));
            }
            other => panic!("unexpected selector {:?}", other),
        }
    });
    let mut smc = Smc::new(mock);

    smc.set_fan_min_speed(1, 2000, true).unwrap();
    assert!(matches!(
        smc.set_fan_min_speed(1, 6500, true),
        Err(SmcError::FanSpeedOutOfRange { max: 6000, .. })
    ));

    let written = written.lock().unwrap();
    assert_eq!(written.len(), 1);
    assert_eq!(written[0].0, code("F1Mn"));
    let mut expected = [0u8; 32];
    expected[0] = 0x1F;
    expected[1] = 0x40;
    assert_eq!(written[0].1, expected);
}
