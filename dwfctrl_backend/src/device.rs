//! Open devices and their functional units.
//!
//! A [`Device`] is the root object of this crate: it owns the native handle of one physical
//! instrument and the functional units that were discovered when it was opened.
//!
//! ## Opening
//!
//! Devices are selected through a [`DeviceFilter`]:
//!
//! - the enumeration is narrowed to a device type (USB, network, ...) when one is given, else to
//!   the device id when one is given, else it lists every device;
//! - devices opened by another process are skipped on a first pass and only considered on a
//!   second pass, so that a free device is preferred;
//! - among the candidates, the serial number decides when given, then the device id (with a
//!   type filter), then the enumeration index; otherwise the first candidate is taken.
//!
//! Opening a device that another process holds fails with [`UsageError::InUse`].
//!
//! ## Functional units
//!
//! A unit exists only if the device reports a positive channel count for it; accessing an absent
//! unit fails with [`DwfError::Unsupported`]. The protocol engines always exist. Units are
//! reached through getter pairs: `analog_input()` for shared access and `analog_input_()` for
//! mutable access (relabeling channels, protocol setups).
//!
//! ## Closing
//!
//! [`Device::close`] resets the device first when `auto_reset` is set (the default) and then
//! releases the handle. Dropping an open device closes it. After closing, every call through the
//! device or through a unit handle fails with [`UsageError::DeviceClosed`].

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use dwf_backend::ffi::*;
use dwf_backend::*;
use libc::c_int;

use crate::analog_input::AnalogInput;
use crate::analog_io::AnalogIo;
use crate::analog_output::AnalogOutput;
use crate::device_info::{normalize_serial_number, Configuration, DeviceInfo};
use crate::digital_input::DigitalInput;
use crate::digital_io::DigitalIo;
use crate::digital_output::DigitalOutput;
use crate::protocols::Protocols;
use crate::unit::*;

/// Named device configurations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigName {
    /// The device's first configuration.
    Generic,
    /// Large analog input buffer.
    Scope,
    /// Large analog output buffer.
    Wavegen,
    /// Large digital input buffer.
    Logic,
    /// Large digital output buffer.
    Pattern,
    /// 1.8 V digital IO.
    OneV8,
    /// Large digital input buffer at 1.8 V.
    LogicOneV8,
}

impl ConfigName {
    pub const ALL: [ConfigName; 7] = [
        ConfigName::Generic,
        ConfigName::Scope,
        ConfigName::Wavegen,
        ConfigName::Logic,
        ConfigName::Pattern,
        ConfigName::OneV8,
        ConfigName::LogicOneV8,
    ];

    pub fn name(self) -> &'static str {
        match self {
            ConfigName::Generic => "generic",
            ConfigName::Scope => "scope",
            ConfigName::Wavegen => "wavegen",
            ConfigName::Logic => "logic",
            ConfigName::Pattern => "pattern",
            ConfigName::OneV8 => "1v8",
            ConfigName::LogicOneV8 => "logic-1v8",
        }
    }

    /// Configuration index implementing this name on `device_id`, if it has one.
    pub fn index_for(self, device_id: Option<DeviceId>) -> Option<usize> {
        use DeviceId::*;
        match (self, device_id?) {
            (ConfigName::Generic, _) => Some(0),
            (ConfigName::Scope, AnalogDiscovery | AnalogDiscovery2 | AnalogDiscovery3) => Some(1),
            (ConfigName::Wavegen, AnalogDiscovery | AnalogDiscovery2 | AnalogDiscovery3) => Some(2),
            (ConfigName::Logic, AnalogDiscovery | AnalogDiscovery2 | AnalogDiscovery3) => Some(3),
            (ConfigName::Logic, DigitalDiscovery) => Some(0),
            (ConfigName::Pattern, AnalogDiscovery | AnalogDiscovery2) => Some(3),
            (ConfigName::Pattern, AnalogDiscovery3) => Some(4),
            (ConfigName::Pattern, DigitalDiscovery) => Some(0),
            (ConfigName::OneV8, AnalogDiscovery | AnalogDiscovery2) => Some(4),
            (ConfigName::LogicOneV8, AnalogDiscovery2) => Some(6),
            (ConfigName::LogicOneV8, DigitalDiscovery) => Some(0),
            _ => None,
        }
    }
}

impl FromStr for ConfigName {
    type Err = DwfError;

    fn from_str(s: &str) -> Result<Self> {
        let wanted = s.trim().to_ascii_lowercase();
        ConfigName::ALL
            .into_iter()
            .find(|config| config.name() == wanted)
            .ok_or_else(|| {
                DwfError::invalid_option(
                    "configuration",
                    format!(
                        "'{}' is not one of: generic, scope, wavegen, logic, pattern, 1v8, logic-1v8",
                        s
                    ),
                )
            })
    }
}

impl fmt::Display for ConfigName {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Configuration to open a device with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigSelect {
    Index(usize),
    Named(ConfigName),
}

impl From<usize> for ConfigSelect {
    fn from(index: usize) -> Self {
        ConfigSelect::Index(index)
    }
}

impl From<ConfigName> for ConfigSelect {
    fn from(name: ConfigName) -> Self {
        ConfigSelect::Named(name)
    }
}

impl FromStr for ConfigSelect {
    type Err = DwfError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().parse::<usize>() {
            Ok(index) => Ok(ConfigSelect::Index(index)),
            Err(_) => Ok(ConfigSelect::Named(s.parse()?)),
        }
    }
}

/// Selects the device to open. The default opens the first free device with its default
/// configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeviceFilter {
    /// Compared after normalization, see [`normalize_serial_number`].
    pub serial_number: Option<String>,
    pub device_id: Option<DeviceId>,
    /// One of the `ENUMFILTER_*` connection types, e.g. [`ENUMFILTER_USB`].
    pub device_type: Option<DwfEnumFilter>,
    /// Position in the enumeration list.
    pub index: Option<usize>,
    pub configuration: Option<ConfigSelect>,
}

impl DeviceFilter {
    pub fn with_serial_number(self, serial_number: &str) -> Self {
        Self {
            serial_number: Some(serial_number.to_string()),
            ..self
        }
    }

    pub fn with_device_id(self, device_id: DeviceId) -> Self {
        Self {
            device_id: Some(device_id),
            ..self
        }
    }

    pub fn with_index(self, index: usize) -> Self {
        Self {
            index: Some(index),
            ..self
        }
    }

    pub fn with_configuration(self, configuration: impl Into<ConfigSelect>) -> Self {
        Self {
            configuration: Some(configuration.into()),
            ..self
        }
    }

    /// Enumeration filter handed to the driver.
    pub fn enum_filter(&self) -> DwfEnumFilter {
        match (self.device_type, self.device_id) {
            (Some(device_type), _) => ENUMFILTER_TYPE | device_type,
            (None, Some(device_id)) => device_id.raw(),
            (None, None) => ENUMFILTER_ALL,
        }
    }

    /// Picks a device among the `count` enumerated ones.
    fn select(&self, dwf: &Dwf, count: usize, skip_open: bool) -> Result<Option<usize>> {
        let serial_number = self.serial_number.as_deref().map(normalize_serial_number);
        for index in 0..count {
            let idx = index as c_int;
            if skip_open && from_cbool(dwf.enum_device_is_opened(idx)?) {
                continue;
            }
            let selected = if let Some(serial_number) = &serial_number {
                normalize_serial_number(&dwf.enum_sn(idx)?) == *serial_number
            } else if let (Some(_), Some(device_id)) = (self.device_type, self.device_id) {
                dwf.enum_device_type(idx)?.0.abs() == device_id.raw()
            } else if let Some(wanted) = self.index {
                index == wanted
            } else {
                true
            };
            if selected {
                return Ok(Some(index));
            }
        }
        Ok(None)
    }
}

/// An open device.
pub struct Device {
    dwf: Arc<Dwf>,
    filter: DeviceFilter,
    session: Arc<Session>,
    info: DeviceInfo,
    configuration: Option<usize>,
    auto_reset: bool,
    analog_input: Option<AnalogInput>,
    analog_output: Option<AnalogOutput>,
    analog_io: Option<AnalogIo>,
    digital_input: Option<DigitalInput>,
    digital_output: Option<DigitalOutput>,
    digital_io: Option<DigitalIo>,
    protocols: Option<Protocols>,
}

impl Device {
    /// Opens the device matching `filter` through the process-wide runtime.
    pub fn open(filter: &DeviceFilter) -> Result<Self> {
        Self::open_with(Dwf::shared()?, filter)
    }

    pub fn open_with(dwf: Arc<Dwf>, filter: &DeviceFilter) -> Result<Self> {
        let mut device = Self {
            session: Session::new(dwf.clone(), HDWF_NONE),
            dwf,
            filter: filter.clone(),
            info: DeviceInfo {
                index: 0,
                is_open: false,
                id: 0,
                revision: 0,
                name: String::new(),
                user_name: String::new(),
                serial_number: String::new(),
                configurations: Vec::new(),
            },
            configuration: None,
            auto_reset: true,
            analog_input: None,
            analog_output: None,
            analog_io: None,
            digital_input: None,
            digital_output: None,
            digital_io: None,
            protocols: None,
        };
        device.reopen()?;
        Ok(device)
    }

    /// Opens the device again with the filter it was first opened with.
    pub fn reopen(&mut self) -> Result<()> {
        if self.session.is_open() {
            return Err(UsageError::AlreadyOpen.into());
        }
        let dwf = self.dwf.clone();
        let count = dwf.enumerate(self.filter.enum_filter())?.max(0) as usize;
        log::info!("Found {} device(s)", count);
        let index = match self.filter.select(&dwf, count, true)? {
            Some(index) => index,
            None => self
                .filter
                .select(&dwf, count, false)?
                .ok_or(DwfError::DeviceNotFound)?,
        };
        let info = DeviceInfo::query(&dwf, index)?;
        if info.is_open {
            return Err(UsageError::InUse.into());
        }
        let configuration = match self.filter.configuration {
            None => None,
            Some(ConfigSelect::Index(config)) => Some(config),
            Some(ConfigSelect::Named(name)) => Some(name.index_for(info.device_id()).ok_or_else(|| {
                DwfError::Unsupported(format!("the configuration '{}' on '{}'", name, info.name))
            })?),
        };
        let hdwf = match configuration {
            None => dwf.device_open(index as c_int)?,
            Some(config) => {
                log::info!("Using configuration {}", config);
                dwf.device_config_open(index as c_int, config as c_int)?
            }
        };
        if hdwf == HDWF_NONE {
            return Err(DwfError::DeviceNotFound);
        }
        log::info!("Opened {} ({})", info.name, info.serial_number);
        self.session = Session::new(dwf.clone(), hdwf);
        self.info = info;
        self.configuration = configuration;
        self.discover_units()
    }

    fn discover_units(&mut self) -> Result<()> {
        let dwf = self.dwf.clone();
        let hdwf = self.session.hdwf()?;
        let session = &self.session;
        let count = |count: c_int| count.max(0) as usize;

        let analog_io_count = count(dwf.analog_io_channel_count(hdwf)?);
        if analog_io_count > 0 {
            self.analog_io = Some(AnalogIo::new(session.clone(), analog_io_count)?);
        }
        let analog_in_count = count(dwf.analog_in_channel_count(hdwf)?);
        if analog_in_count > 0 {
            self.analog_input = Some(AnalogInput::new(session.clone(), analog_in_count));
        }
        let analog_out_count = count(dwf.analog_out_count(hdwf)?);
        if analog_out_count > 0 {
            self.analog_output = Some(AnalogOutput::new(session.clone(), analog_out_count)?);
        }
        let digital_in_bits = count(dwf.digital_in_bits_info(hdwf)?);
        if digital_in_bits > 0 {
            self.digital_io = Some(DigitalIo::new(session.clone(), digital_in_bits));
            self.digital_input = Some(DigitalInput::new(session.clone(), digital_in_bits));
        }
        let digital_out_count = count(dwf.digital_out_count(hdwf)?);
        if digital_out_count > 0 {
            self.digital_output = Some(DigitalOutput::new(session.clone(), digital_out_count));
        }
        self.protocols = Some(Protocols::new(session.clone()));
        log::debug!(
            "Units: analog in {}, analog out {}, analog io {}, digital in {}, digital out {}",
            analog_in_count,
            analog_out_count,
            analog_io_count,
            digital_in_bits,
            digital_out_count
        );
        Ok(())
    }

    /// Resets the device if `auto_reset` is set and releases the handle. Closing a closed device
    /// does nothing.
    pub fn close(&mut self) -> Result<()> {
        if !self.session.is_open() {
            return Ok(());
        }
        let reset = if self.auto_reset { self.reset() } else { Ok(()) };
        let hdwf = self.session.release();
        self.analog_input = None;
        self.analog_output = None;
        self.analog_io = None;
        self.digital_input = None;
        self.digital_output = None;
        self.digital_io = None;
        self.protocols = None;
        log::info!("Closing {} ({})", self.info.name, self.info.serial_number);
        self.dwf.device_close(hdwf)?;
        reset
    }

    /// Closes every device handle of the process, including those of other `Device` values.
    pub fn close_all(dwf: &Dwf) -> Result<()> {
        log::info!("Closing all devices");
        dwf.device_close_all()
    }

    pub fn is_open(&self) -> bool {
        self.session.is_open()
    }

    pub fn session(&self) -> &Arc<Session> {
        &self.session
    }

    pub fn dwf(&self) -> &Arc<Dwf> {
        &self.dwf
    }

    pub fn hdwf(&self) -> Result<Hdwf> {
        self.session.hdwf()
    }

    pub fn filter(&self) -> &DeviceFilter {
        &self.filter
    }

    /// Enumeration info read when the device was opened.
    pub fn info(&self) -> &DeviceInfo {
        &self.info
    }

    pub fn device_id(&self) -> Option<DeviceId> {
        self.info.device_id()
    }

    pub fn name(&self) -> &str {
        &self.info.name
    }

    pub fn user_name(&self) -> &str {
        &self.info.user_name
    }

    pub fn serial_number(&self) -> &str {
        &self.info.serial_number
    }

    pub fn revision(&self) -> char {
        self.info.revision_letter()
    }

    pub fn configurations(&self) -> &[Configuration] {
        &self.info.configurations
    }

    /// Configuration index the device was opened with; `None` for the default.
    pub fn configuration(&self) -> Option<usize> {
        self.configuration
    }

    pub fn auto_reset(&self) -> bool {
        self.auto_reset
    }

    pub fn set_auto_reset(&mut self, auto_reset: bool) {
        self.auto_reset = auto_reset;
    }

    /// 0 off, 1 on (apply every setting immediately), 3 dynamic.
    pub fn auto_configure(&self) -> Result<c_int> {
        self.dwf.device_auto_configure_get(self.hdwf()?)
    }

    pub fn set_auto_configure(&self, mode: c_int) -> Result<()> {
        self.dwf.device_auto_configure_set(self.hdwf()?, mode)
    }

    /// Resets every instrument to its default settings.
    pub fn reset(&self) -> Result<()> {
        self.dwf.device_reset(self.hdwf()?)
    }

    pub fn set_enabled(&self, enabled: bool) -> Result<()> {
        self.dwf.device_enable_set(self.hdwf()?, to_cbool(enabled))
    }

    /// Sources that can be routed to the external trigger pins.
    pub fn trigger_info(&self) -> Result<Vec<TriggerSource>> {
        Ok(TriggerSource::from_bits(bits(self.dwf.device_trigger_info(self.hdwf()?)?)))
    }

    pub fn trigger_slope_info(&self) -> Result<Vec<TriggerSlope>> {
        Ok(TriggerSlope::from_bits(bits(
            self.dwf.device_trigger_slope_info(self.hdwf()?)?,
        )))
    }

    pub fn trigger(&self, pin: usize) -> Result<TriggerSource> {
        TriggerSource::try_from(self.dwf.device_trigger_get(self.hdwf()?, pin as c_int)?)
    }

    pub fn set_trigger(&self, pin: usize, source: TriggerSource) -> Result<()> {
        self.dwf
            .device_trigger_set(self.hdwf()?, pin as c_int, source.raw())
    }

    /// Generates one pulse on the PC trigger line.
    pub fn trigger_pc(&self) -> Result<()> {
        self.dwf.device_trigger_pc(self.hdwf()?)
    }

    pub fn parameter(&self, parameter: Parameter) -> Result<c_int> {
        self.dwf.device_param_get(self.hdwf()?, parameter.raw())
    }

    pub fn set_parameter(&self, parameter: Parameter, value: c_int) -> Result<()> {
        self.dwf
            .device_param_set(self.hdwf()?, parameter.raw(), value)
    }

    fn unit<'a, T>(&self, unit: &'a Option<T>, name: &str) -> Result<&'a T> {
        self.hdwf()?;
        unit.as_ref()
            .ok_or_else(|| DwfError::Unsupported(name.to_string()))
    }

    fn unit_<'a, T>(session: &Session, unit: &'a mut Option<T>, name: &str) -> Result<&'a mut T> {
        session.hdwf()?;
        unit.as_mut()
            .ok_or_else(|| DwfError::Unsupported(name.to_string()))
    }

    pub fn analog_input(&self) -> Result<&AnalogInput> {
        self.unit(&self.analog_input, "analog input")
    }

    pub fn analog_input_(&mut self) -> Result<&mut AnalogInput> {
        Self::unit_(&self.session, &mut self.analog_input, "analog input")
    }

    pub fn analog_output(&self) -> Result<&AnalogOutput> {
        self.unit(&self.analog_output, "analog output")
    }

    pub fn analog_output_(&mut self) -> Result<&mut AnalogOutput> {
        Self::unit_(&self.session, &mut self.analog_output, "analog output")
    }

    pub fn analog_io(&self) -> Result<&AnalogIo> {
        self.unit(&self.analog_io, "analog IO")
    }

    pub fn analog_io_(&mut self) -> Result<&mut AnalogIo> {
        Self::unit_(&self.session, &mut self.analog_io, "analog IO")
    }

    pub fn digital_input(&self) -> Result<&DigitalInput> {
        self.unit(&self.digital_input, "digital input")
    }

    pub fn digital_input_(&mut self) -> Result<&mut DigitalInput> {
        Self::unit_(&self.session, &mut self.digital_input, "digital input")
    }

    pub fn digital_output(&self) -> Result<&DigitalOutput> {
        self.unit(&self.digital_output, "digital output")
    }

    pub fn digital_output_(&mut self) -> Result<&mut DigitalOutput> {
        Self::unit_(&self.session, &mut self.digital_output, "digital output")
    }

    pub fn digital_io(&self) -> Result<&DigitalIo> {
        self.unit(&self.digital_io, "digital IO")
    }

    pub fn digital_io_(&mut self) -> Result<&mut DigitalIo> {
        Self::unit_(&self.session, &mut self.digital_io, "digital IO")
    }

    pub fn protocols(&self) -> Result<&Protocols> {
        self.unit(&self.protocols, "protocols")
    }

    pub fn protocols_(&mut self) -> Result<&mut Protocols> {
        Self::unit_(&self.session, &mut self.protocols, "protocols")
    }
}

impl Drop for Device {
    fn drop(&mut self) {
        if let Err(err) = self.close() {
            log::warn!("Failed to close {}: {}", self.info.name, err);
        }
    }
}

impl fmt::Debug for Device {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("Device")
            .field("name", &self.info.name)
            .field("serial_number", &self.info.serial_number)
            .field("configuration", &self.configuration)
            .field("is_open", &self.is_open())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_names_map_per_device() {
        use DeviceId::*;
        assert_eq!(ConfigName::Generic.index_for(Some(ElectronicsExplorer)), Some(0));
        assert_eq!(ConfigName::Scope.index_for(Some(AnalogDiscovery2)), Some(1));
        assert_eq!(ConfigName::Pattern.index_for(Some(AnalogDiscovery3)), Some(4));
        assert_eq!(ConfigName::Pattern.index_for(Some(AnalogDiscovery2)), Some(3));
        assert_eq!(ConfigName::LogicOneV8.index_for(Some(AnalogDiscovery2)), Some(6));
        assert_eq!(ConfigName::LogicOneV8.index_for(Some(DigitalDiscovery)), Some(0));
        assert_eq!(ConfigName::OneV8.index_for(Some(AnalogDiscovery3)), None);
        assert_eq!(ConfigName::Scope.index_for(Some(DigitalDiscovery)), None);
        assert_eq!(ConfigName::Generic.index_for(None), None);
    }

    #[test]
    fn parses_configuration_selectors() {
        assert_eq!("2".parse::<ConfigSelect>().unwrap(), ConfigSelect::Index(2));
        assert_eq!(
            "Logic-1V8".parse::<ConfigSelect>().unwrap(),
            ConfigSelect::Named(ConfigName::LogicOneV8)
        );
        assert!(matches!(
            "turbo".parse::<ConfigSelect>(),
            Err(DwfError::InvalidOption { option: "configuration", .. })
        ));
    }

    #[test]
    fn enum_filter_prefers_the_device_type() {
        let filter = DeviceFilter::default();
        assert_eq!(filter.enum_filter(), ENUMFILTER_ALL);

        let by_id = DeviceFilter::default().with_device_id(DeviceId::AnalogDiscovery2);
        assert_eq!(by_id.enum_filter(), 3);

        let by_type = DeviceFilter {
            device_type: Some(ENUMFILTER_USB),
            ..by_id
        };
        assert_eq!(by_type.enum_filter(), ENUMFILTER_TYPE | ENUMFILTER_USB);
    }
}
