//! In-process stand-in for the WaveForms runtime.
//!
//! The entry points below are `extern "C"` functions over thread-local state, so every test
//! thread sees its own set of simulated devices. Only the calls exercised by the integration
//! tests are provided; any other entry point reports `MissingEntryPoint`.

#![allow(dead_code)]

use std::cell::RefCell;
use std::collections::HashMap;
use std::sync::Arc;

use dwf_backend::ffi::*;
use dwf_backend::{string_to_buffer, Dwf, EntryPoints, ErrorCode, Hdwf};
use libc::{c_char, c_double, c_int, c_void};

/// Samples handed out per analog input status read while recording.
pub const RECORD_CHUNK: usize = 7;

/// Offset added to every sample of channel `n`, so channels are told apart in the data.
pub const CHANNEL_STRIDE: f64 = 1000.0;

/// Internal clock of the simulated logic analyzer.
pub const DIGITAL_IN_CLOCK: f64 = 100e6;

/// Input levels of the DIO lines that are not driven.
pub const DIGITAL_IO_PULLED_UP: u64 = 0xF000;

#[derive(Debug, Clone)]
pub struct FakeDevice {
    pub id: c_int,
    pub revision: c_int,
    pub name: &'static str,
    pub serial_number: &'static str,
    /// Opened by another process.
    pub opened_elsewhere: bool,
    pub analog_in_channels: c_int,
    pub analog_out_channels: c_int,
    pub digital_in_bits: c_int,
    pub digital_out_channels: c_int,
    /// Node count of every analog IO channel.
    pub analog_io_nodes: Vec<c_int>,
}

impl FakeDevice {
    pub fn analog_discovery2(serial_number: &'static str) -> Self {
        Self {
            id: 3,
            revision: 1,
            name: "Analog Discovery 2",
            serial_number,
            opened_elsewhere: false,
            analog_in_channels: 2,
            analog_out_channels: 2,
            digital_in_bits: 16,
            digital_out_channels: 16,
            analog_io_nodes: Vec::new(),
        }
    }

    pub fn analog_discovery3(serial_number: &'static str) -> Self {
        Self {
            id: 10,
            revision: 1,
            name: "Analog Discovery 3",
            analog_io_nodes: vec![2, 2, 8, 6],
            ..Self::analog_discovery2(serial_number)
        }
    }

    pub fn digital_discovery(serial_number: &'static str) -> Self {
        Self {
            id: 4,
            revision: 2,
            name: "Digital Discovery",
            serial_number,
            opened_elsewhere: false,
            analog_in_channels: 0,
            analog_out_channels: 0,
            digital_in_bits: 24,
            digital_out_channels: 16,
            analog_io_nodes: Vec::new(),
        }
    }

    pub fn opened_elsewhere(self) -> Self {
        Self {
            opened_elsewhere: true,
            ..self
        }
    }
}

#[derive(Debug, Default)]
struct Recording {
    running: bool,
    total: usize,
    delivered: usize,
    chunk_start: usize,
    chunk_len: usize,
}

impl Recording {
    fn start(total: usize, running: bool) -> Self {
        Self {
            running,
            total,
            ..Self::default()
        }
    }

    /// Hands out the next chunk on a data read. Returns the native state: ready, done or
    /// triggered.
    fn advance(&mut self, read_data: bool) -> u8 {
        if !self.running {
            return 0;
        }
        if read_data {
            self.chunk_start = self.delivered;
            self.chunk_len = RECORD_CHUNK.min(self.total - self.delivered);
            self.delivered += self.chunk_len;
        }
        if self.delivered >= self.total {
            self.running = false;
            2
        } else {
            3
        }
    }
}

#[derive(Debug, Default)]
struct FakeState {
    devices: Vec<FakeDevice>,
    enumerated: Vec<usize>,
    handles: HashMap<Hdwf, (usize, Option<c_int>)>,
    next_handle: Hdwf,
    last_error: c_int,
    calls: Vec<&'static str>,
    closed: Vec<Hdwf>,
    resets: usize,
    analog_out_state: HashMap<c_int, u8>,
    analog_in_frequency: f64,
    analog_in_record_length: f64,
    analog_in_disabled: Vec<c_int>,
    analog_in_impedance: HashMap<c_int, f64>,
    recording: Recording,
    analog_io_values: HashMap<(c_int, c_int), f64>,
    analog_io_status: HashMap<(c_int, c_int), f64>,
    digital_io_output_enable: u64,
    digital_io_output: u64,
    digital_io_input: u64,
    digital_in_format: c_int,
    digital_in_divider: u32,
    digital_in_position: u32,
    digital_in_prefill: u32,
    digital_recording: Recording,
}

thread_local! {
    static STATE: RefCell<FakeState> = RefCell::new(FakeState::default());
}

fn with_state<R>(f: impl FnOnce(&mut FakeState) -> R) -> R {
    STATE.with(|state| f(&mut state.borrow_mut()))
}

fn call(name: &'static str) {
    with_state(|state| {
        state.calls.push(name);
        state.last_error = ErrorCode::NoError.raw();
    });
}

fn fail(code: ErrorCode) -> c_int {
    with_state(|state| state.last_error = code.raw());
    0
}

fn device_of(hdwf: Hdwf) -> Option<FakeDevice> {
    with_state(|state| {
        state
            .handles
            .get(&hdwf)
            .map(|(index, _)| state.devices[*index].clone())
    })
}

fn enumerated(idx: c_int) -> Option<(usize, FakeDevice)> {
    with_state(|state| {
        let index = *state.enumerated.get(usize::try_from(idx).ok()?)?;
        Some((index, state.devices[index].clone()))
    })
}

fn is_opened_here(state: &FakeState, index: usize) -> bool {
    state.handles.values().any(|(open, _)| *open == index)
}

unsafe extern "C" fn get_last_error(code: *mut c_int) -> c_int {
    *code = with_state(|state| state.last_error);
    1
}

unsafe extern "C" fn get_last_error_msg(message: *mut c_char) -> c_int {
    let code = with_state(|state| state.last_error);
    let buffer = std::slice::from_raw_parts_mut(message as *mut u8, ERROR_BUFFER_SIZE);
    string_to_buffer(&format!("fake driver error {}\n", code), buffer);
    1
}

unsafe extern "C" fn get_version(version: *mut c_char) -> c_int {
    call("FDwfGetVersion");
    let buffer = std::slice::from_raw_parts_mut(version as *mut u8, NAME_BUFFER_SIZE);
    string_to_buffer("3.21.3", buffer);
    1
}

unsafe extern "C" fn enumerate(filter: c_int, count: *mut c_int) -> c_int {
    call("FDwfEnum");
    let legacy_id = filter & ENUMFILTER_TYPE == 0 && (1..=15).contains(&filter);
    *count = with_state(|state| {
        state.enumerated = state
            .devices
            .iter()
            .enumerate()
            .filter(|(_, device)| !legacy_id || device.id == filter)
            .map(|(index, _)| index)
            .collect();
        state.enumerated.len() as c_int
    });
    1
}

unsafe extern "C" fn enum_device_type(idx: c_int, id: *mut c_int, revision: *mut c_int) -> c_int {
    call("FDwfEnumDeviceType");
    match enumerated(idx) {
        Some((_, device)) => {
            *id = device.id;
            *revision = device.revision;
            1
        }
        None => fail(ErrorCode::InvalidParameter0),
    }
}

unsafe extern "C" fn enum_device_is_opened(idx: c_int, opened: *mut c_int) -> c_int {
    call("FDwfEnumDeviceIsOpened");
    match enumerated(idx) {
        Some((index, device)) => {
            let here = with_state(|state| is_opened_here(state, index));
            *opened = c_int::from(device.opened_elsewhere || here);
            1
        }
        None => fail(ErrorCode::InvalidParameter0),
    }
}

unsafe fn write_name(idx: c_int, target: *mut c_char, name: impl Fn(&FakeDevice) -> String) -> c_int {
    match enumerated(idx) {
        Some((_, device)) => {
            let buffer = std::slice::from_raw_parts_mut(target as *mut u8, NAME_BUFFER_SIZE);
            string_to_buffer(&name(&device), buffer);
            1
        }
        None => fail(ErrorCode::InvalidParameter0),
    }
}

unsafe extern "C" fn enum_device_name(idx: c_int, name: *mut c_char) -> c_int {
    call("FDwfEnumDeviceName");
    write_name(idx, name, |device| device.name.to_string())
}

unsafe extern "C" fn enum_user_name(idx: c_int, name: *mut c_char) -> c_int {
    call("FDwfEnumUserName");
    write_name(idx, name, |device| device.name.replace(' ', ""))
}

unsafe extern "C" fn enum_sn(idx: c_int, serial: *mut c_char) -> c_int {
    call("FDwfEnumSN");
    write_name(idx, serial, |device| format!("SN:{}", device.serial_number))
}

unsafe extern "C" fn enum_config(idx: c_int, count: *mut c_int) -> c_int {
    call("FDwfEnumConfig");
    match enumerated(idx) {
        Some(_) => {
            *count = 2;
            1
        }
        None => fail(ErrorCode::InvalidParameter0),
    }
}

unsafe extern "C" fn enum_config_info(idx_config: c_int, info: c_int, value: *mut c_void) -> c_int {
    call("FDwfEnumConfigInfo");
    if info == DECI_TEXT_INFO {
        let buffer = std::slice::from_raw_parts_mut(value as *mut u8, TEXT_INFO_BUFFER_SIZE);
        string_to_buffer(&format!("Configuration {}", idx_config), buffer);
    } else {
        *(value as *mut c_int) = match info {
            DECI_ANALOG_IN_BUFFER_SIZE => 8192 << idx_config,
            DECI_ANALOG_IN_CHANNEL_COUNT | DECI_ANALOG_OUT_CHANNEL_COUNT => 2,
            _ => 16,
        };
    }
    1
}

fn open(idx: c_int, config: Option<c_int>, hdwf: *mut Hdwf) -> c_int {
    let Some((index, device)) = enumerated(idx) else {
        return fail(ErrorCode::InvalidParameter0);
    };
    let handle = with_state(|state| {
        if device.opened_elsewhere || is_opened_here(state, index) {
            return None;
        }
        state.next_handle += 1;
        let handle = state.next_handle;
        state.handles.insert(handle, (index, config));
        Some(handle)
    });
    match handle {
        Some(handle) => {
            unsafe { *hdwf = handle };
            1
        }
        None => {
            unsafe { *hdwf = HDWF_NONE };
            fail(ErrorCode::AlreadyOpened)
        }
    }
}

unsafe extern "C" fn device_open(idx: c_int, hdwf: *mut Hdwf) -> c_int {
    call("FDwfDeviceOpen");
    open(idx, None, hdwf)
}

unsafe extern "C" fn device_config_open(idx: c_int, config: c_int, hdwf: *mut Hdwf) -> c_int {
    call("FDwfDeviceConfigOpen");
    open(idx, Some(config), hdwf)
}

unsafe extern "C" fn device_close(hdwf: Hdwf) -> c_int {
    call("FDwfDeviceClose");
    with_state(|state| {
        state.handles.remove(&hdwf);
        state.closed.push(hdwf);
    });
    1
}

unsafe extern "C" fn device_close_all() -> c_int {
    call("FDwfDeviceCloseAll");
    with_state(|state| {
        let mut handles: Vec<Hdwf> = state.handles.drain().map(|(handle, _)| handle).collect();
        handles.sort_unstable();
        state.closed.extend(handles);
    });
    1
}

unsafe extern "C" fn device_reset(hdwf: Hdwf) -> c_int {
    call("FDwfDeviceReset");
    if device_of(hdwf).is_none() {
        return fail(ErrorCode::InvalidParameter0);
    }
    with_state(|state| state.resets += 1);
    1
}

unsafe fn channel_count(hdwf: Hdwf, count: *mut c_int, field: impl Fn(&FakeDevice) -> c_int) -> c_int {
    match device_of(hdwf) {
        Some(device) => {
            *count = field(&device);
            1
        }
        None => fail(ErrorCode::InvalidParameter0),
    }
}

unsafe extern "C" fn analog_io_channel_count(hdwf: Hdwf, count: *mut c_int) -> c_int {
    call("FDwfAnalogIOChannelCount");
    channel_count(hdwf, count, |device| device.analog_io_nodes.len() as c_int)
}

unsafe extern "C" fn analog_in_channel_count(hdwf: Hdwf, count: *mut c_int) -> c_int {
    call("FDwfAnalogInChannelCount");
    channel_count(hdwf, count, |device| device.analog_in_channels)
}

unsafe extern "C" fn analog_out_count(hdwf: Hdwf, count: *mut c_int) -> c_int {
    call("FDwfAnalogOutCount");
    channel_count(hdwf, count, |device| device.analog_out_channels)
}

unsafe extern "C" fn digital_in_bits_info(hdwf: Hdwf, count: *mut c_int) -> c_int {
    call("FDwfDigitalInBitsInfo");
    channel_count(hdwf, count, |device| device.digital_in_bits)
}

unsafe extern "C" fn digital_out_count(hdwf: Hdwf, count: *mut c_int) -> c_int {
    call("FDwfDigitalOutCount");
    channel_count(hdwf, count, |device| device.digital_out_channels)
}

unsafe extern "C" fn analog_out_node_info(_hdwf: Hdwf, _channel: c_int, nodes: *mut c_int) -> c_int {
    call("FDwfAnalogOutNodeInfo");
    *nodes = 0b111;
    1
}

unsafe extern "C" fn analog_out_node_function_set(_hdwf: Hdwf, _channel: c_int, _node: c_int, _function: u8) -> c_int {
    call("FDwfAnalogOutNodeFunctionSet");
    1
}

unsafe extern "C" fn analog_out_node_frequency_set(_hdwf: Hdwf, _channel: c_int, _node: c_int, _value: c_double) -> c_int {
    call("FDwfAnalogOutNodeFrequencySet");
    1
}

unsafe extern "C" fn analog_out_node_amplitude_set(_hdwf: Hdwf, _channel: c_int, _node: c_int, _value: c_double) -> c_int {
    call("FDwfAnalogOutNodeAmplitudeSet");
    1
}

unsafe extern "C" fn analog_out_node_enable_set(_hdwf: Hdwf, _channel: c_int, _node: c_int, _enable: c_int) -> c_int {
    call("FDwfAnalogOutNodeEnableSet");
    1
}

unsafe extern "C" fn analog_out_configure(_hdwf: Hdwf, channel: c_int, start: c_int) -> c_int {
    call("FDwfAnalogOutConfigure");
    // Started generators without a trigger source run right away.
    let state = if start == 1 { 3 } else { 0 };
    with_state(|fake| fake.analog_out_state.insert(channel, state));
    1
}

unsafe extern "C" fn analog_out_status(_hdwf: Hdwf, channel: c_int, status: *mut u8) -> c_int {
    call("FDwfAnalogOutStatus");
    *status = with_state(|state| state.analog_out_state.get(&channel).copied().unwrap_or(0));
    1
}

unsafe extern "C" fn analog_in_acquisition_mode_set(_hdwf: Hdwf, _mode: c_int) -> c_int {
    call("FDwfAnalogInAcquisitionModeSet");
    1
}

unsafe extern "C" fn analog_in_frequency_set(_hdwf: Hdwf, frequency: c_double) -> c_int {
    call("FDwfAnalogInFrequencySet");
    with_state(|state| state.analog_in_frequency = frequency);
    1
}

unsafe extern "C" fn analog_in_frequency_get(_hdwf: Hdwf, frequency: *mut c_double) -> c_int {
    call("FDwfAnalogInFrequencyGet");
    *frequency = with_state(|state| state.analog_in_frequency);
    1
}

unsafe extern "C" fn analog_in_record_length_set(_hdwf: Hdwf, length: c_double) -> c_int {
    call("FDwfAnalogInRecordLengthSet");
    with_state(|state| state.analog_in_record_length = length);
    1
}

unsafe extern "C" fn analog_in_record_length_get(_hdwf: Hdwf, length: *mut c_double) -> c_int {
    call("FDwfAnalogInRecordLengthGet");
    *length = with_state(|state| state.analog_in_record_length);
    1
}

unsafe extern "C" fn analog_in_channel_enable_set(_hdwf: Hdwf, channel: c_int, enable: c_int) -> c_int {
    call("FDwfAnalogInChannelEnableSet");
    with_state(|state| {
        state.analog_in_disabled.retain(|disabled| *disabled != channel);
        if enable == 0 {
            state.analog_in_disabled.push(channel);
        }
    });
    1
}

unsafe extern "C" fn analog_in_channel_enable_get(_hdwf: Hdwf, channel: c_int, enabled: *mut c_int) -> c_int {
    call("FDwfAnalogInChannelEnableGet");
    *enabled = with_state(|state| c_int::from(!state.analog_in_disabled.contains(&channel)));
    1
}

unsafe extern "C" fn analog_in_channel_impedance_set(_hdwf: Hdwf, channel: c_int, ohms: c_double) -> c_int {
    call("FDwfAnalogInChannelImpedanceSet");
    with_state(|state| state.analog_in_impedance.insert(channel, ohms));
    1
}

unsafe extern "C" fn analog_in_channel_impedance_get(_hdwf: Hdwf, channel: c_int, ohms: *mut c_double) -> c_int {
    call("FDwfAnalogInChannelImpedanceGet");
    *ohms = with_state(|state| state.analog_in_impedance.get(&channel).copied().unwrap_or(1e6));
    1
}

unsafe extern "C" fn analog_in_configure(_hdwf: Hdwf, _reconfigure: c_int, start: c_int) -> c_int {
    call("FDwfAnalogInConfigure");
    with_state(|state| {
        let total = (state.analog_in_frequency * state.analog_in_record_length).round_ties_even() as usize;
        state.recording = Recording::start(total, start != 0);
    });
    1
}

unsafe extern "C" fn analog_in_status(_hdwf: Hdwf, read_data: c_int, status: *mut u8) -> c_int {
    call("FDwfAnalogInStatus");
    *status = with_state(|state| state.recording.advance(read_data != 0));
    1
}

unsafe extern "C" fn analog_in_status_record(
    _hdwf: Hdwf,
    available: *mut c_int,
    lost: *mut c_int,
    corrupted: *mut c_int,
) -> c_int {
    call("FDwfAnalogInStatusRecord");
    *available = with_state(|state| state.recording.chunk_len as c_int);
    *lost = 0;
    *corrupted = 0;
    1
}

unsafe extern "C" fn analog_in_status_samples_valid(_hdwf: Hdwf, valid: *mut c_int) -> c_int {
    call("FDwfAnalogInStatusSamplesValid");
    *valid = with_state(|state| state.recording.chunk_len as c_int);
    1
}

unsafe extern "C" fn analog_in_status_data2(
    _hdwf: Hdwf,
    channel: c_int,
    data: *mut c_double,
    first: c_int,
    count: c_int,
) -> c_int {
    call("FDwfAnalogInStatusData2");
    let start = with_state(|state| state.recording.chunk_start) + first as usize;
    let data = std::slice::from_raw_parts_mut(data, count.max(0) as usize);
    for (i, sample) in data.iter_mut().enumerate() {
        *sample = (start + i) as f64 + channel as f64 * CHANNEL_STRIDE;
    }
    1
}

unsafe extern "C" fn analog_io_status(hdwf: Hdwf) -> c_int {
    call("FDwfAnalogIOStatus");
    let Some(device) = device_of(hdwf) else {
        return fail(ErrorCode::InvalidParameter0);
    };
    with_state(|state| {
        state.analog_io_status = device
            .analog_io_nodes
            .iter()
            .enumerate()
            .flat_map(|(channel, nodes)| (0..*nodes).map(move |node| (channel as c_int, node)))
            .map(|key| (key, node_reading(state, key)))
            .collect();
    });
    1
}

// Set nodes read back their value; the others measure `10 * channel + node`.
fn node_reading(state: &FakeState, (channel, node): (c_int, c_int)) -> f64 {
    state
        .analog_io_values
        .get(&(channel, node))
        .copied()
        .unwrap_or(f64::from(10 * channel + node))
}

unsafe extern "C" fn analog_io_channel_name(hdwf: Hdwf, channel: c_int, name: *mut c_char, label: *mut c_char) -> c_int {
    call("FDwfAnalogIOChannelName");
    if device_of(hdwf).is_none() {
        return fail(ErrorCode::InvalidParameter0);
    }
    string_to_buffer(
        &format!("Channel {}", channel),
        std::slice::from_raw_parts_mut(name as *mut u8, NAME_BUFFER_SIZE),
    );
    string_to_buffer(
        &format!("io{}", channel),
        std::slice::from_raw_parts_mut(label as *mut u8, LABEL_BUFFER_SIZE),
    );
    1
}

unsafe extern "C" fn analog_io_channel_info(hdwf: Hdwf, channel: c_int, nodes: *mut c_int) -> c_int {
    call("FDwfAnalogIOChannelInfo");
    let count = device_of(hdwf).and_then(|device| {
        let channel = usize::try_from(channel).ok()?;
        device.analog_io_nodes.get(channel).copied()
    });
    match count {
        Some(count) => {
            *nodes = count;
            1
        }
        None => fail(ErrorCode::InvalidParameter1),
    }
}

unsafe extern "C" fn analog_io_channel_node_name(
    _hdwf: Hdwf,
    _channel: c_int,
    node: c_int,
    name: *mut c_char,
    units: *mut c_char,
) -> c_int {
    call("FDwfAnalogIOChannelNodeName");
    string_to_buffer(
        &format!("Node {}", node),
        std::slice::from_raw_parts_mut(name as *mut u8, NAME_BUFFER_SIZE),
    );
    string_to_buffer("V", std::slice::from_raw_parts_mut(units as *mut u8, LABEL_BUFFER_SIZE));
    1
}

unsafe extern "C" fn analog_io_channel_node_set(_hdwf: Hdwf, channel: c_int, node: c_int, value: c_double) -> c_int {
    call("FDwfAnalogIOChannelNodeSet");
    with_state(|state| state.analog_io_values.insert((channel, node), value));
    1
}

unsafe extern "C" fn analog_io_channel_node_get(_hdwf: Hdwf, channel: c_int, node: c_int, value: *mut c_double) -> c_int {
    call("FDwfAnalogIOChannelNodeGet");
    *value = with_state(|state| state.analog_io_values.get(&(channel, node)).copied().unwrap_or(0.0));
    1
}

unsafe extern "C" fn analog_io_channel_node_status(_hdwf: Hdwf, channel: c_int, node: c_int, value: *mut c_double) -> c_int {
    call("FDwfAnalogIOChannelNodeStatus");
    *value = with_state(|state| state.analog_io_status.get(&(channel, node)).copied().unwrap_or(0.0));
    1
}

fn line_mask(hdwf: Hdwf) -> u64 {
    device_of(hdwf).map_or(0, |device| (1u64 << device.digital_in_bits) - 1)
}

unsafe extern "C" fn digital_io_output_enable_info(hdwf: Hdwf, mask: *mut u64) -> c_int {
    call("FDwfDigitalIOOutputEnableInfo64");
    *mask = line_mask(hdwf);
    1
}

unsafe extern "C" fn digital_io_output_info(hdwf: Hdwf, mask: *mut u64) -> c_int {
    call("FDwfDigitalIOOutputInfo64");
    *mask = line_mask(hdwf);
    1
}

unsafe extern "C" fn digital_io_input_info(hdwf: Hdwf, mask: *mut u64) -> c_int {
    call("FDwfDigitalIOInputInfo64");
    *mask = line_mask(hdwf);
    1
}

unsafe extern "C" fn digital_io_output_enable_set(hdwf: Hdwf, enable: u64) -> c_int {
    call("FDwfDigitalIOOutputEnableSet64");
    if enable & !line_mask(hdwf) != 0 {
        return fail(ErrorCode::InvalidParameter1);
    }
    with_state(|state| state.digital_io_output_enable = enable);
    1
}

unsafe extern "C" fn digital_io_output_enable_get(_hdwf: Hdwf, enable: *mut u64) -> c_int {
    call("FDwfDigitalIOOutputEnableGet64");
    *enable = with_state(|state| state.digital_io_output_enable);
    1
}

unsafe extern "C" fn digital_io_output_set(_hdwf: Hdwf, output: u64) -> c_int {
    call("FDwfDigitalIOOutputSet64");
    with_state(|state| state.digital_io_output = output);
    1
}

unsafe extern "C" fn digital_io_output_get(_hdwf: Hdwf, output: *mut u64) -> c_int {
    call("FDwfDigitalIOOutputGet64");
    *output = with_state(|state| state.digital_io_output);
    1
}

unsafe extern "C" fn digital_io_configure(_hdwf: Hdwf) -> c_int {
    call("FDwfDigitalIOConfigure");
    1
}

// Driven lines read back their output; the others read the pull-ups.
unsafe extern "C" fn digital_io_status(_hdwf: Hdwf) -> c_int {
    call("FDwfDigitalIOStatus");
    with_state(|state| {
        let driven = state.digital_io_output_enable;
        state.digital_io_input = (state.digital_io_output & driven) | (DIGITAL_IO_PULLED_UP & !driven);
    });
    1
}

unsafe extern "C" fn digital_io_input_status(_hdwf: Hdwf, input: *mut u64) -> c_int {
    call("FDwfDigitalIOInputStatus64");
    *input = with_state(|state| state.digital_io_input);
    1
}

unsafe extern "C" fn digital_in_acquisition_mode_set(_hdwf: Hdwf, _mode: c_int) -> c_int {
    call("FDwfDigitalInAcquisitionModeSet");
    1
}

unsafe extern "C" fn digital_in_internal_clock_info(_hdwf: Hdwf, frequency: *mut c_double) -> c_int {
    call("FDwfDigitalInInternalClockInfo");
    *frequency = DIGITAL_IN_CLOCK;
    1
}

unsafe extern "C" fn digital_in_divider_set(_hdwf: Hdwf, divider: u32) -> c_int {
    call("FDwfDigitalInDividerSet");
    with_state(|state| state.digital_in_divider = divider);
    1
}

unsafe extern "C" fn digital_in_divider_get(_hdwf: Hdwf, divider: *mut u32) -> c_int {
    call("FDwfDigitalInDividerGet");
    *divider = with_state(|state| state.digital_in_divider);
    1
}

unsafe extern "C" fn digital_in_sample_format_set(_hdwf: Hdwf, bits: c_int) -> c_int {
    call("FDwfDigitalInSampleFormatSet");
    with_state(|state| state.digital_in_format = bits);
    1
}

unsafe extern "C" fn digital_in_sample_format_get(_hdwf: Hdwf, bits: *mut c_int) -> c_int {
    call("FDwfDigitalInSampleFormatGet");
    *bits = with_state(|state| state.digital_in_format);
    1
}

unsafe extern "C" fn digital_in_sample_mode_get(_hdwf: Hdwf, mode: *mut c_int) -> c_int {
    call("FDwfDigitalInSampleModeGet");
    *mode = 0;
    1
}

unsafe extern "C" fn digital_in_trigger_position_set(_hdwf: Hdwf, samples: u32) -> c_int {
    call("FDwfDigitalInTriggerPositionSet");
    with_state(|state| state.digital_in_position = samples);
    1
}

unsafe extern "C" fn digital_in_trigger_position_get(_hdwf: Hdwf, samples: *mut u32) -> c_int {
    call("FDwfDigitalInTriggerPositionGet");
    *samples = with_state(|state| state.digital_in_position);
    1
}

unsafe extern "C" fn digital_in_trigger_prefill_set(_hdwf: Hdwf, samples: u32) -> c_int {
    call("FDwfDigitalInTriggerPrefillSet");
    with_state(|state| state.digital_in_prefill = samples);
    1
}

unsafe extern "C" fn digital_in_trigger_prefill_get(_hdwf: Hdwf, samples: *mut u32) -> c_int {
    call("FDwfDigitalInTriggerPrefillGet");
    *samples = with_state(|state| state.digital_in_prefill);
    1
}

unsafe extern "C" fn digital_in_configure(_hdwf: Hdwf, _reconfigure: c_int, start: c_int) -> c_int {
    call("FDwfDigitalInConfigure");
    with_state(|state| {
        let total = (state.digital_in_prefill + state.digital_in_position) as usize;
        state.digital_recording = Recording::start(total, start != 0);
    });
    1
}

unsafe extern "C" fn digital_in_status(_hdwf: Hdwf, read_data: c_int, status: *mut u8) -> c_int {
    call("FDwfDigitalInStatus");
    *status = with_state(|state| state.digital_recording.advance(read_data != 0));
    1
}

unsafe extern "C" fn digital_in_status_record(
    _hdwf: Hdwf,
    available: *mut c_int,
    lost: *mut c_int,
    corrupted: *mut c_int,
) -> c_int {
    call("FDwfDigitalInStatusRecord");
    *available = with_state(|state| state.digital_recording.chunk_len as c_int);
    *lost = 0;
    *corrupted = 0;
    1
}

// Sample `n` of a recording is the word `n`, truncated to the sample format.
unsafe extern "C" fn digital_in_status_data2(_hdwf: Hdwf, data: *mut c_void, first: c_int, bytes: c_int) -> c_int {
    call("FDwfDigitalInStatusData2");
    let (start, format) = with_state(|state| (state.digital_recording.chunk_start, state.digital_in_format));
    let start = start + first.max(0) as usize;
    let bytes = bytes.max(0) as usize;
    match format {
        8 => fill_words(std::slice::from_raw_parts_mut(data as *mut u8, bytes), start),
        16 => fill_words(std::slice::from_raw_parts_mut(data as *mut u16, bytes / 2), start),
        _ => fill_words(std::slice::from_raw_parts_mut(data as *mut u32, bytes / 4), start),
    }
    1
}

fn fill_words<W: TryFrom<usize> + Default>(words: &mut [W], start: usize) {
    for (i, word) in words.iter_mut().enumerate() {
        *word = W::try_from(start + i).unwrap_or_default();
    }
}

/// Resets the simulated runtime of the calling thread and returns a binding to it.
pub fn install(devices: Vec<FakeDevice>) -> Arc<Dwf> {
    let _ = env_logger::builder().is_test(true).try_init();
    with_state(|state| {
        *state = FakeState {
            devices,
            digital_in_format: 16,
            digital_in_divider: 1,
            ..FakeState::default()
        }
    });

    let mut entry = EntryPoints::default();
    entry.FDwfGetLastError = Some(get_last_error);
    entry.FDwfGetLastErrorMsg = Some(get_last_error_msg);
    entry.FDwfGetVersion = Some(get_version);
    entry.FDwfEnum = Some(enumerate);
    entry.FDwfEnumDeviceType = Some(enum_device_type);
    entry.FDwfEnumDeviceIsOpened = Some(enum_device_is_opened);
    entry.FDwfEnumDeviceName = Some(enum_device_name);
    entry.FDwfEnumUserName = Some(enum_user_name);
    entry.FDwfEnumSN = Some(enum_sn);
    entry.FDwfEnumConfig = Some(enum_config);
    entry.FDwfEnumConfigInfo = Some(enum_config_info);
    entry.FDwfDeviceOpen = Some(device_open);
    entry.FDwfDeviceConfigOpen = Some(device_config_open);
    entry.FDwfDeviceClose = Some(device_close);
    entry.FDwfDeviceCloseAll = Some(device_close_all);
    entry.FDwfDeviceReset = Some(device_reset);
    entry.FDwfAnalogIOChannelCount = Some(analog_io_channel_count);
    entry.FDwfAnalogInChannelCount = Some(analog_in_channel_count);
    entry.FDwfAnalogOutCount = Some(analog_out_count);
    entry.FDwfDigitalInBitsInfo = Some(digital_in_bits_info);
    entry.FDwfDigitalOutCount = Some(digital_out_count);
    entry.FDwfAnalogOutNodeInfo = Some(analog_out_node_info);
    entry.FDwfAnalogOutNodeFunctionSet = Some(analog_out_node_function_set);
    entry.FDwfAnalogOutNodeFrequencySet = Some(analog_out_node_frequency_set);
    entry.FDwfAnalogOutNodeAmplitudeSet = Some(analog_out_node_amplitude_set);
    entry.FDwfAnalogOutNodeEnableSet = Some(analog_out_node_enable_set);
    entry.FDwfAnalogOutConfigure = Some(analog_out_configure);
    entry.FDwfAnalogOutStatus = Some(analog_out_status);
    entry.FDwfAnalogInAcquisitionModeSet = Some(analog_in_acquisition_mode_set);
    entry.FDwfAnalogInFrequencySet = Some(analog_in_frequency_set);
    entry.FDwfAnalogInFrequencyGet = Some(analog_in_frequency_get);
    entry.FDwfAnalogInRecordLengthSet = Some(analog_in_record_length_set);
    entry.FDwfAnalogInRecordLengthGet = Some(analog_in_record_length_get);
    entry.FDwfAnalogInChannelEnableSet = Some(analog_in_channel_enable_set);
    entry.FDwfAnalogInChannelEnableGet = Some(analog_in_channel_enable_get);
    entry.FDwfAnalogInChannelImpedanceSet = Some(analog_in_channel_impedance_set);
    entry.FDwfAnalogInChannelImpedanceGet = Some(analog_in_channel_impedance_get);
    entry.FDwfAnalogInConfigure = Some(analog_in_configure);
    entry.FDwfAnalogInStatus = Some(analog_in_status);
    entry.FDwfAnalogInStatusRecord = Some(analog_in_status_record);
    entry.FDwfAnalogInStatusSamplesValid = Some(analog_in_status_samples_valid);
    entry.FDwfAnalogInStatusData2 = Some(analog_in_status_data2);
    entry.FDwfAnalogIOStatus = Some(analog_io_status);
    entry.FDwfAnalogIOChannelName = Some(analog_io_channel_name);
    entry.FDwfAnalogIOChannelInfo = Some(analog_io_channel_info);
    entry.FDwfAnalogIOChannelNodeName = Some(analog_io_channel_node_name);
    entry.FDwfAnalogIOChannelNodeSet = Some(analog_io_channel_node_set);
    entry.FDwfAnalogIOChannelNodeGet = Some(analog_io_channel_node_get);
    entry.FDwfAnalogIOChannelNodeStatus = Some(analog_io_channel_node_status);
    entry.FDwfDigitalIOOutputEnableInfo64 = Some(digital_io_output_enable_info);
    entry.FDwfDigitalIOOutputInfo64 = Some(digital_io_output_info);
    entry.FDwfDigitalIOInputInfo64 = Some(digital_io_input_info);
    entry.FDwfDigitalIOOutputEnableSet64 = Some(digital_io_output_enable_set);
    entry.FDwfDigitalIOOutputEnableGet64 = Some(digital_io_output_enable_get);
    entry.FDwfDigitalIOOutputSet64 = Some(digital_io_output_set);
    entry.FDwfDigitalIOOutputGet64 = Some(digital_io_output_get);
    entry.FDwfDigitalIOConfigure = Some(digital_io_configure);
    entry.FDwfDigitalIOStatus = Some(digital_io_status);
    entry.FDwfDigitalIOInputStatus64 = Some(digital_io_input_status);
    entry.FDwfDigitalInAcquisitionModeSet = Some(digital_in_acquisition_mode_set);
    entry.FDwfDigitalInInternalClockInfo = Some(digital_in_internal_clock_info);
    entry.FDwfDigitalInDividerSet = Some(digital_in_divider_set);
    entry.FDwfDigitalInDividerGet = Some(digital_in_divider_get);
    entry.FDwfDigitalInSampleFormatSet = Some(digital_in_sample_format_set);
    entry.FDwfDigitalInSampleFormatGet = Some(digital_in_sample_format_get);
    entry.FDwfDigitalInSampleModeGet = Some(digital_in_sample_mode_get);
    entry.FDwfDigitalInTriggerPositionSet = Some(digital_in_trigger_position_set);
    entry.FDwfDigitalInTriggerPositionGet = Some(digital_in_trigger_position_get);
    entry.FDwfDigitalInTriggerPrefillSet = Some(digital_in_trigger_prefill_set);
    entry.FDwfDigitalInTriggerPrefillGet = Some(digital_in_trigger_prefill_get);
    entry.FDwfDigitalInConfigure = Some(digital_in_configure);
    entry.FDwfDigitalInStatus = Some(digital_in_status);
    entry.FDwfDigitalInStatusRecord = Some(digital_in_status_record);
    entry.FDwfDigitalInStatusData2 = Some(digital_in_status_data2);
    Arc::new(Dwf::with_entry_points(entry))
}

/// Native calls issued on this thread since [`install`], in order.
pub fn calls() -> Vec<&'static str> {
    with_state(|state| state.calls.clone())
}

/// Handles passed to `FDwfDeviceClose`/`FDwfDeviceCloseAll`, in order.
pub fn closed_handles() -> Vec<Hdwf> {
    with_state(|state| state.closed.clone())
}

pub fn reset_count() -> usize {
    with_state(|state| state.resets)
}

/// Configuration index the handle was opened with, `None` for the default configuration.
pub fn opened_configuration(hdwf: Hdwf) -> Option<Option<c_int>> {
    with_state(|state| state.handles.get(&hdwf).map(|(_, config)| *config))
}
