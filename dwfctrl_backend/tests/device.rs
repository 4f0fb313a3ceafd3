mod common;

use common::FakeDevice;
use dwfctrl_backend::*;

#[test]
fn opens_the_first_device_and_discovers_its_units() {
    let dwf = common::install(vec![FakeDevice::analog_discovery2("210321A")]);
    let device = Device::open_with(dwf, &DeviceFilter::default()).unwrap();

    assert!(device.is_open());
    assert_eq!(device.name(), "Analog Discovery 2");
    assert_eq!(device.serial_number(), "210321A");
    assert_eq!(device.device_id(), Some(DeviceId::AnalogDiscovery2));
    assert_eq!(device.revision(), 'A');
    assert_eq!(device.configurations().len(), 2);
    assert_eq!(device.configuration(), None);

    assert_eq!(device.analog_input().unwrap().channels().labels(), ["ch1", "ch2"]);
    assert_eq!(device.analog_output().unwrap().channels().len(), 2);
    assert_eq!(device.digital_input().unwrap().channels().len(), 16);
    assert_eq!(device.digital_output().unwrap().channels().len(), 16);
    assert!(device.protocols().is_ok());
    assert!(matches!(device.analog_io(), Err(DwfError::Unsupported(_))));
}

#[test]
fn devices_without_analog_channels_have_no_analog_units() {
    let dwf = common::install(vec![FakeDevice::digital_discovery("210321D")]);
    let device = Device::open_with(dwf, &DeviceFilter::default()).unwrap();

    assert!(matches!(device.analog_input(), Err(DwfError::Unsupported(_))));
    assert!(matches!(device.analog_output(), Err(DwfError::Unsupported(_))));
    assert_eq!(device.digital_io().unwrap().channels().len(), 24);
}

#[test]
fn selects_by_serial_number_regardless_of_case_and_prefix() {
    let dwf = common::install(vec![
        FakeDevice::analog_discovery2("210321A"),
        FakeDevice::analog_discovery2("210321B"),
    ]);
    let filter = DeviceFilter::default().with_serial_number("sn:210321b");
    let device = Device::open_with(dwf, &filter).unwrap();
    assert_eq!(device.serial_number(), "210321B");
    assert_eq!(device.info().index, 1);
}

#[test]
fn selects_by_index() {
    let dwf = common::install(vec![
        FakeDevice::analog_discovery2("210321A"),
        FakeDevice::digital_discovery("210321D"),
    ]);
    let device = Device::open_with(dwf, &DeviceFilter::default().with_index(1)).unwrap();
    assert_eq!(device.device_id(), Some(DeviceId::DigitalDiscovery));
}

#[test]
fn prefers_devices_that_are_not_in_use() {
    let dwf = common::install(vec![
        FakeDevice::analog_discovery2("210321A").opened_elsewhere(),
        FakeDevice::analog_discovery2("210321B"),
    ]);
    let device = Device::open_with(dwf, &DeviceFilter::default()).unwrap();
    assert_eq!(device.serial_number(), "210321B");
}

#[test]
fn device_in_use_elsewhere_is_reported() {
    let dwf = common::install(vec![FakeDevice::analog_discovery2("210321A").opened_elsewhere()]);
    let err = Device::open_with(dwf, &DeviceFilter::default()).unwrap_err();
    assert!(matches!(err, DwfError::Usage(UsageError::InUse)));
    assert!(!common::calls().contains(&"FDwfDeviceOpen"));
}

#[test]
fn missing_device_is_reported() {
    let dwf = common::install(vec![]);
    let err = Device::open_with(dwf.clone(), &DeviceFilter::default()).unwrap_err();
    assert!(matches!(err, DwfError::DeviceNotFound));

    let dwf = common::install(vec![FakeDevice::analog_discovery2("210321A")]);
    let filter = DeviceFilter::default().with_serial_number("999999");
    assert!(matches!(
        Device::open_with(dwf, &filter),
        Err(DwfError::DeviceNotFound)
    ));
}

#[test]
fn product_front_ends_only_open_their_product() {
    let dwf = common::install(vec![
        FakeDevice::analog_discovery2("210321A"),
        FakeDevice::digital_discovery("210321D"),
    ]);
    let dd = DigitalDiscovery::open_with(dwf.clone(), &DeviceFilter::default()).unwrap();
    assert_eq!(dd.serial_number(), "210321D");
    assert_eq!(dd.filter().device_id, Some(DeviceId::DigitalDiscovery));

    assert!(matches!(
        AnalogDiscovery3::open_with(dwf, &DeviceFilter::default()),
        Err(DwfError::DeviceNotFound)
    ));
}

#[test]
fn named_configurations_resolve_per_device() {
    let dwf = common::install(vec![FakeDevice::analog_discovery2("210321A")]);
    let filter = DeviceFilter::default().with_configuration(ConfigName::Wavegen);
    let device = Device::open_with(dwf, &filter).unwrap();
    assert_eq!(device.configuration(), Some(2));
    assert_eq!(common::opened_configuration(device.hdwf().unwrap()), Some(Some(2)));
    assert!(common::calls().contains(&"FDwfDeviceConfigOpen"));
}

#[test]
fn configuration_errors() {
    let dwf = common::install(vec![FakeDevice::digital_discovery("210321D")]);
    let filter = DeviceFilter::default().with_configuration(ConfigName::Wavegen);
    assert!(matches!(
        Device::open_with(dwf, &filter),
        Err(DwfError::Unsupported(_))
    ));

    assert!(matches!(
        "turbo".parse::<ConfigSelect>(),
        Err(DwfError::InvalidOption { option: "configuration", .. })
    ));
    assert_eq!("3".parse::<ConfigSelect>().unwrap(), ConfigSelect::Index(3));
}

#[test]
fn closed_device_rejects_calls_without_reaching_the_driver() {
    let dwf = common::install(vec![FakeDevice::analog_discovery2("210321A")]);
    let mut device = Device::open_with(dwf, &DeviceFilter::default()).unwrap();
    let hdwf = device.hdwf().unwrap();
    let session = device.session().clone();

    device.close().unwrap();
    assert!(!device.is_open());
    assert_eq!(common::closed_handles(), vec![hdwf]);
    assert_eq!(common::reset_count(), 1);

    let calls_after_close = common::calls().len();
    assert!(matches!(device.reset(), Err(DwfError::Usage(UsageError::DeviceClosed))));
    assert!(matches!(
        device.analog_input(),
        Err(DwfError::Usage(UsageError::DeviceClosed))
    ));
    assert!(matches!(session.hdwf(), Err(DwfError::Usage(UsageError::DeviceClosed))));
    assert_eq!(common::calls().len(), calls_after_close);

    device.close().unwrap();
    assert_eq!(common::closed_handles(), vec![hdwf]);
}

#[test]
fn dropping_an_open_device_closes_it() {
    let dwf = common::install(vec![FakeDevice::analog_discovery2("210321A")]);
    let hdwf = {
        let device = Device::open_with(dwf, &DeviceFilter::default()).unwrap();
        device.hdwf().unwrap()
    };
    assert_eq!(common::closed_handles(), vec![hdwf]);
}

#[test]
fn auto_reset_can_be_disabled() {
    let dwf = common::install(vec![FakeDevice::analog_discovery2("210321A")]);
    let mut device = Device::open_with(dwf, &DeviceFilter::default()).unwrap();
    device.set_auto_reset(false);
    device.close().unwrap();
    assert_eq!(common::reset_count(), 0);
}

#[test]
fn reopen_requires_a_closed_device() {
    let dwf = common::install(vec![FakeDevice::analog_discovery2("210321A")]);
    let mut device = Device::open_with(dwf, &DeviceFilter::default()).unwrap();
    let first = device.hdwf().unwrap();
    assert!(matches!(
        device.reopen(),
        Err(DwfError::Usage(UsageError::AlreadyOpen))
    ));

    device.close().unwrap();
    device.reopen().unwrap();
    assert_ne!(device.hdwf().unwrap(), first);
    assert_eq!(device.analog_input().unwrap().channels().len(), 2);
}

#[test]
fn close_all_releases_every_handle() {
    let dwf = common::install(vec![
        FakeDevice::analog_discovery2("210321A"),
        FakeDevice::analog_discovery2("210321B"),
    ]);
    let first = Device::open_with(dwf.clone(), &DeviceFilter::default()).unwrap();
    let second = Device::open_with(dwf.clone(), &DeviceFilter::default()).unwrap();
    assert_ne!(first.serial_number(), second.serial_number());

    Device::close_all(&dwf).unwrap();
    assert_eq!(
        common::closed_handles(),
        vec![first.hdwf().unwrap(), second.hdwf().unwrap()]
    );
}

#[test]
fn enumeration_lists_every_device() {
    let dwf = common::install(vec![
        FakeDevice::analog_discovery2("210321A"),
        FakeDevice::digital_discovery("210321D").opened_elsewhere(),
    ]);
    let app = Application::new(dwf);
    assert_eq!(app.version().unwrap(), "3.21.3");

    let devices = app.enumerate(dwf_backend::ffi::ENUMFILTER_ALL).unwrap();
    assert_eq!(devices.len(), 2);
    assert_eq!(devices[0].serial_number, "210321A");
    assert_eq!(devices[0].user_name, "AnalogDiscovery2");
    assert!(!devices[0].is_open);
    assert!(devices[1].is_open);
    assert_eq!(devices[1].revision_letter(), 'B');
    assert_eq!(devices[1].configurations[1].analog_in_buffer_size, 16384);
    assert_eq!(devices[1].configurations[0].text_info, "Configuration 0");
}

#[test]
fn analog_io_nodes_report_status_after_a_read() {
    let dwf = common::install(vec![FakeDevice::analog_discovery3("210415A")]);
    let device = Device::open_with(dwf, &DeviceFilter::default()).unwrap();
    let io = device.analog_io().unwrap();
    assert_eq!(io.channels().labels(), ["io0", "io1", "io2", "io3"]);
    assert_eq!(io.channel("io2").unwrap().nodes().len(), 8);
    assert_eq!(io.channel(3usize).unwrap().name(), "Channel 3");

    let node = io.node("io0", 1usize).unwrap();
    assert_eq!(node.unit(), "V");
    node.set_value(3.3).unwrap();
    assert_eq!(node.value().unwrap(), 3.3);
    assert_eq!(node.status().unwrap(), 0.0);
    io.read_status().unwrap();
    assert_eq!(node.status().unwrap(), 3.3);
    assert!(matches!(
        io.node("io0", 2usize),
        Err(DwfError::Addressing(AddressingError::IndexOutOfRange { index: 2, len: 2 }))
    ));
}

#[test]
fn analog_discovery3_maps_supplies_and_monitors() {
    let dwf = common::install(vec![FakeDevice::analog_discovery3("210415A")]);
    let ad3 = AnalogDiscovery3::open_with(dwf, &DeviceFilter::default()).unwrap();

    let supply = ad3.positive_supply().unwrap();
    supply.setup(Some(5.0), None, true).unwrap();
    assert!(supply.enabled().unwrap());
    assert_eq!(supply.voltage().unwrap(), 5.0);
    assert!(matches!(supply.current(), Err(DwfError::Unsupported(_))));

    let monitors = ad3.monitors().unwrap();
    let names: Vec<&str> = monitors.keys().copied().collect();
    assert_eq!(
        names,
        [
            "pcb_temperature",
            "fpga_temperature",
            "usb_voltage",
            "usb_current",
            "aux_voltage",
            "aux_current",
            "usb_cc1_voltage",
            "usb_cc2_voltage",
        ]
    );
    assert_eq!(monitors["usb_voltage"], 22.0);
    assert_eq!(monitors["aux_voltage"], 34.0);
    assert_eq!(monitors["aux_current"], 35.0);
    assert_eq!(ad3.usb_cc2_voltage().unwrap(), 27.0);
}
