mod common;

use std::time::Duration;

use common::{FakeDevice, CHANNEL_STRIDE, DIGITAL_IN_CLOCK, DIGITAL_IO_PULLED_UP, RECORD_CHUNK};
use dwfctrl_backend::*;

fn open_ad2() -> Device {
    let dwf = common::install(vec![FakeDevice::analog_discovery2("210321A")]);
    Device::open_with(dwf, &DeviceFilter::default()).unwrap()
}

#[test]
fn channels_resolve_to_the_same_entry_by_index_and_label() {
    let device = open_ad2();
    let scope = device.analog_input().unwrap();
    let channels = scope.channels();
    for index in 0..channels.len() {
        let label = channels.label(index).unwrap();
        assert_eq!(scope.channel(index).unwrap().index(), index);
        assert_eq!(scope.channel(label).unwrap().index(), index);
    }

    assert!(matches!(
        scope.channel(2usize),
        Err(DwfError::Addressing(AddressingError::IndexOutOfRange { index: 2, len: 2 }))
    ));
    assert!(matches!(
        scope.channel("ch3"),
        Err(DwfError::Addressing(AddressingError::UnknownLabel(_)))
    ));
}

#[test]
fn relabeled_channels_keep_their_position() {
    let mut device = open_ad2();
    let pattern = device.digital_output_().unwrap();
    pattern.channels_().set_label(3usize, "clock").unwrap();
    assert_eq!(pattern.channel("clock").unwrap().index(), 3);
    assert!(matches!(
        pattern.channel("dio3"),
        Err(DwfError::Addressing(AddressingError::UnknownLabel(_)))
    ));
    assert_eq!(pattern.channel("dio4").unwrap().index(), 4);
}

#[test]
fn generator_setup_without_start_leaves_the_channel_ready() {
    let device = open_ad2();
    let wavegen = device.analog_output().unwrap();
    let channel = wavegen.channel("ch1").unwrap();
    channel
        .setup(&WaveformSetup {
            function: Some(Function::Sine),
            frequency: Some(1e3),
            amplitude: Some(1.5),
            configure: true,
            ..Default::default()
        })
        .unwrap();
    assert_eq!(channel.read_status().unwrap(), State::Ready);

    let calls: Vec<_> = common::calls()
        .into_iter()
        .filter(|name| name.starts_with("FDwfAnalogOut") && *name != "FDwfAnalogOutStatus")
        .skip_while(|name| *name == "FDwfAnalogOutCount" || *name == "FDwfAnalogOutNodeInfo")
        .collect();
    assert_eq!(
        calls,
        [
            "FDwfAnalogOutNodeFunctionSet",
            "FDwfAnalogOutNodeFrequencySet",
            "FDwfAnalogOutNodeAmplitudeSet",
            "FDwfAnalogOutNodeEnableSet",
            "FDwfAnalogOutConfigure",
        ]
    );
}

#[test]
fn generator_setup_with_start_runs_the_channel() {
    let device = open_ad2();
    let wavegen = device.analog_output().unwrap();
    wavegen
        .channel(1usize)
        .unwrap()
        .setup(&WaveformSetup {
            function: Some(Function::Square),
            frequency: Some(10e3),
            start: true,
            ..Default::default()
        })
        .unwrap();
    assert_eq!(wavegen.channel("ch2").unwrap().read_status().unwrap(), State::Triggered);
    assert_eq!(wavegen.channel("ch1").unwrap().read_status().unwrap(), State::Ready);
}

#[test]
fn record_returns_the_requested_samples_per_channel() {
    let device = open_ad2();
    let scope = device.analog_input().unwrap();
    let setup = RecordSetup {
        sample_rate: Some(1000.0),
        length: Some(0.05),
        configure: true,
        start: true,
        ..Default::default()
    };
    let recording = scope.record(&setup, None).unwrap().into_recording().unwrap();

    assert_eq!(recording.len(), 50);
    assert_eq!(recording.sample_rate(), 1000.0);
    assert_eq!(recording.counters().total_samples, 50);
    assert_eq!(recording.counters().lost_samples, 0);
    let ch1 = recording.channel("ch1").unwrap().unwrap();
    let ch2 = recording.channel(1usize).unwrap().unwrap();
    for i in 0..50 {
        assert_eq!(ch1[i], i as f64);
        assert_eq!(ch2[i], i as f64 + CHANNEL_STRIDE);
    }
    assert_eq!(recording.to_array().shape(), &[2, 50]);
}

#[test]
fn zero_length_record_is_empty() {
    let device = open_ad2();
    let scope = device.analog_input().unwrap();
    let setup = RecordSetup {
        sample_rate: Some(1000.0),
        length: Some(0.0),
        configure: true,
        start: true,
        ..Default::default()
    };
    let recording = scope.record(&setup, None).unwrap().into_recording().unwrap();

    assert!(recording.is_empty());
    assert_eq!(recording.channel_count(), 2);
    assert_eq!(recording.channel("ch1").unwrap().unwrap().len(), 0);
    assert!(!common::calls().contains(&"FDwfAnalogInStatus"));
}

#[test]
fn record_callback_can_stop_early() {
    let device = open_ad2();
    let scope = device.analog_input().unwrap();
    let setup = RecordSetup {
        sample_rate: Some(1000.0),
        length: Some(0.05),
        configure: true,
        start: true,
        ..Default::default()
    };
    let mut chunks = 0;
    let stop_after_one: &mut dyn FnMut(&AnalogRecorder) -> bool = &mut |_| {
        chunks += 1;
        false
    };
    let recorder = scope.record(&setup, Some(stop_after_one)).unwrap();
    assert_eq!(chunks, 1);
    assert_eq!(recorder.total_samples(), RECORD_CHUNK);
    assert_eq!(recorder.requested_samples(), 50);
}

#[test]
fn samples_require_a_status_read_with_data() {
    let device = open_ad2();
    let scope = device.analog_input().unwrap();
    let channel = scope.channel(0usize).unwrap();
    assert!(matches!(
        channel.get_data(),
        Err(DwfError::Usage(UsageError::StatusNotRead))
    ));

    scope.read_status(false).unwrap();
    assert!(matches!(
        channel.get_data(),
        Err(DwfError::Usage(UsageError::StatusNotRead))
    ));

    scope.read_status(true).unwrap();
    assert!(channel.get_data().is_ok());

    scope.configure(false, false).unwrap();
    assert!(matches!(
        channel.get_data(),
        Err(DwfError::Usage(UsageError::StatusNotRead))
    ));
}

#[test]
fn record_length_rounds_half_to_even() {
    let device = open_ad2();
    let scope = device.analog_input().unwrap();
    let setup = RecordSetup {
        sample_rate: Some(10.0),
        length: Some(0.25),
        configure: true,
        start: true,
        ..Default::default()
    };
    let recording = scope.record(&setup, None).unwrap().into_recording().unwrap();
    assert_eq!(recording.counters().requested_samples, 2);
    assert_eq!(recording.len(), 2);
}

#[test]
fn record_timeout_keeps_the_samples_received_so_far() {
    let device = open_ad2();
    let scope = device.analog_input().unwrap();
    let setup = RecordSetup {
        sample_rate: Some(1000.0),
        length: Some(0.05),
        configure: true,
        start: true,
        timeout: Some(Duration::ZERO),
        ..Default::default()
    };
    let recording = scope.record(&setup, None).unwrap().into_recording().unwrap();
    assert_eq!(recording.counters().requested_samples, 50);
    assert_eq!(recording.counters().total_samples, RECORD_CHUNK);
    assert_eq!(recording.len(), 50);
    let polls = common::calls().iter().filter(|name| **name == "FDwfAnalogInStatus").count();
    assert_eq!(polls, 1);
}

#[test]
fn disabled_channels_have_no_samples() {
    let device = open_ad2();
    let scope = device.analog_input().unwrap();
    scope.channel("ch2").unwrap().set_enabled(false).unwrap();

    for length in [0.0, 0.01] {
        let setup = RecordSetup {
            sample_rate: Some(1000.0),
            length: Some(length),
            configure: true,
            start: true,
            ..Default::default()
        };
        let recording = scope.record(&setup, None).unwrap().into_recording().unwrap();
        assert_eq!(recording.channel_count(), 2);
        assert_eq!(recording.channel("ch1").unwrap().unwrap().len(), recording.len());
        assert!(recording.channel("ch2").unwrap().is_none());
        assert_eq!(recording.to_array().shape(), &[1, recording.len()]);
    }
}

#[test]
fn channel_impedance_is_set_per_channel() {
    let device = open_ad2();
    let scope = device.analog_input().unwrap();
    scope
        .channel(0usize)
        .unwrap()
        .setup(&ChannelSetup {
            impedance: Some(50.0),
            ..Default::default()
        })
        .unwrap();
    assert_eq!(scope.channel("ch1").unwrap().impedance().unwrap(), 50.0);
    assert_eq!(scope.channel("ch2").unwrap().impedance().unwrap(), 1e6);
}

#[test]
fn digital_record_returns_prefill_plus_position_words() {
    let device = open_ad2();
    let logic = device.digital_input().unwrap();
    let setup = DigitalRecordSetup {
        sample_rate: Some(40e6),
        prefill: Some(5),
        sample_count: Some(20),
        configure: true,
        start: true,
        ..Default::default()
    };
    let recording = logic.record(&setup, None).unwrap().into_recording().unwrap();

    assert_eq!(recording.len(), 25);
    assert_eq!(recording.counters().total_samples, 25);
    // 100 MHz / 40 MHz = 2.5 rounds down to the even divider.
    assert_eq!(recording.sample_rate(), DIGITAL_IN_CLOCK / 2.0);
    assert_eq!(recording.data().width(), SampleWidth::U16);
    assert_eq!(recording.data().to_u32().to_vec(), (0..25).collect::<Vec<u32>>());
    assert!(recording.noise().is_none());
}

#[test]
fn zero_length_digital_record_is_empty() {
    let device = open_ad2();
    let logic = device.digital_input().unwrap();
    let setup = DigitalRecordSetup {
        sample_format: Some(8),
        prefill: Some(0),
        sample_count: Some(0),
        configure: true,
        start: true,
        ..Default::default()
    };
    let recording = logic.record(&setup, None).unwrap().into_recording().unwrap();

    assert!(recording.is_empty());
    assert_eq!(recording.data().width(), SampleWidth::U8);
    assert_eq!(recording.sample_rate(), DIGITAL_IN_CLOCK);
    assert!(!common::calls().contains(&"FDwfDigitalInStatus"));
}

#[test]
fn digital_record_timeout_stops_polling() {
    let device = open_ad2();
    let logic = device.digital_input().unwrap();
    let setup = DigitalRecordSetup {
        prefill: Some(0),
        sample_count: Some(100),
        configure: true,
        start: true,
        timeout: Some(Duration::ZERO),
        ..Default::default()
    };
    let recorder = logic.record(&setup, None).unwrap();
    assert_eq!(recorder.requested_samples(), 100);
    assert_eq!(recorder.total_samples(), RECORD_CHUNK);
    let polls = common::calls().iter().filter(|name| **name == "FDwfDigitalInStatus").count();
    assert_eq!(polls, 1);
}

#[test]
fn digital_io_lines_update_their_bit_of_the_mask() {
    let device = open_ad2();
    let io = device.digital_io().unwrap();
    assert_eq!(io.output_enable_mask().unwrap(), 0xFFFF);

    io.channel("dio3").unwrap().setup(Some(true), Some(true), false).unwrap();
    io.channel(0usize).unwrap().setup(Some(true), Some(false), true).unwrap();
    assert_eq!(io.output_enable().unwrap(), 0b1001);
    assert_eq!(io.output_state().unwrap(), 0b1000);
    assert!(io.channel("dio3").unwrap().output_enabled().unwrap());
    assert!(!io.channel("dio1").unwrap().output_enabled().unwrap());

    io.read_status().unwrap();
    assert_eq!(io.input_state().unwrap(), 0b1000 | DIGITAL_IO_PULLED_UP);
    assert!(io.channel("dio3").unwrap().input_state().unwrap());
    assert!(!io.channel(0usize).unwrap().input_state().unwrap());
    assert!(io.channel(15usize).unwrap().input_state().unwrap());

    io.set_output_enable(0).unwrap();
    assert!(matches!(io.set_output_enable(1 << 20), Err(DwfError::Driver { .. })));
    assert_eq!(io.output_enable().unwrap(), 0);
}
