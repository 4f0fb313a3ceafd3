//! Process-wide runtime settings and queries that do not need an open device.

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use dwf_backend::ffi::*;
use dwf_backend::*;
use libc::c_int;

use crate::device_info::{enumerate_devices, DeviceInfo};

/// What happens to a device when its handle is closed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OnClose {
    /// Keep running.
    Continue,
    /// Stop the instruments.
    Stop,
    /// Stop and shut down the device.
    Shutdown,
}

impl OnClose {
    pub fn raw(self) -> c_int {
        match self {
            OnClose::Continue => 0,
            OnClose::Stop => 1,
            OnClose::Shutdown => 2,
        }
    }
}

impl TryFrom<c_int> for OnClose {
    type Error = DwfError;

    fn try_from(value: c_int) -> Result<Self> {
        match value {
            0 => Ok(OnClose::Continue),
            1 => Ok(OnClose::Stop),
            2 => Ok(OnClose::Shutdown),
            value => Err(DwfError::InvalidValue {
                kind: "OnClose",
                value: value as i64,
            }),
        }
    }
}

impl FromStr for OnClose {
    type Err = DwfError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "continue" | "run" => Ok(OnClose::Continue),
            "stop" => Ok(OnClose::Stop),
            "shutdown" => Ok(OnClose::Shutdown),
            _ => Err(DwfError::invalid_option(
                "on_close",
                format!("'{}' is not one of: continue, stop, shutdown", s),
            )),
        }
    }
}

impl fmt::Display for OnClose {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let name = match self {
            OnClose::Continue => "continue",
            OnClose::Stop => "stop",
            OnClose::Shutdown => "shutdown",
        };
        write!(f, "{}", name)
    }
}

/// Global parameters apply to devices opened after they are set.
pub struct Application {
    dwf: Arc<Dwf>,
}

impl Application {
    pub fn new(dwf: Arc<Dwf>) -> Self {
        Self { dwf }
    }

    /// Uses the process-wide runtime instance.
    pub fn shared() -> Result<Self> {
        Ok(Self::new(Dwf::shared()?))
    }

    pub fn dwf(&self) -> &Arc<Dwf> {
        &self.dwf
    }

    pub fn version(&self) -> Result<String> {
        self.dwf.version()
    }

    /// Error code of the last failed call, or `None` when the raw code is unknown to this crate.
    pub fn last_error(&self) -> Result<Option<ErrorCode>> {
        Ok(ErrorCode::try_from(self.dwf.last_error()?).ok())
    }

    pub fn last_error_message(&self) -> Result<String> {
        self.dwf.last_error_message()
    }

    pub fn get_parameter(&self, parameter: Parameter) -> Result<c_int> {
        self.dwf.param_get(parameter.raw())
    }

    pub fn set_parameter(&self, parameter: Parameter, value: c_int) -> Result<()> {
        self.dwf.param_set(parameter.raw(), value)
    }

    /// Keep the USB supply enabled when the auxiliary supply is connected.
    pub fn usb_power_on_aux(&self) -> Result<bool> {
        Ok(self.get_parameter(Parameter::UsbPower)? != 0)
    }

    pub fn set_usb_power_on_aux(&self, value: bool) -> Result<()> {
        self.set_parameter(Parameter::UsbPower, c_int::from(value))
    }

    /// Percent, 0 to 100.
    pub fn led_brightness(&self) -> Result<c_int> {
        self.get_parameter(Parameter::LedBrightness)
    }

    pub fn set_led_brightness(&self, value: c_int) -> Result<()> {
        self.set_parameter(Parameter::LedBrightness, value)
    }

    pub fn on_close(&self) -> Result<OnClose> {
        OnClose::try_from(self.get_parameter(Parameter::OnClose)?)
    }

    pub fn set_on_close(&self, value: OnClose) -> Result<()> {
        self.set_parameter(Parameter::OnClose, value.raw())
    }

    pub fn audio_out(&self) -> Result<bool> {
        Ok(self.get_parameter(Parameter::AudioOut)? != 0)
    }

    pub fn set_audio_out(&self, value: bool) -> Result<()> {
        self.set_parameter(Parameter::AudioOut, c_int::from(value))
    }

    /// USB current limit in mA; -1 for no limit.
    pub fn usb_limit(&self) -> Result<c_int> {
        self.get_parameter(Parameter::UsbLimit)
    }

    pub fn set_usb_limit(&self, value: c_int) -> Result<()> {
        self.set_parameter(Parameter::UsbLimit, value)
    }

    pub fn analog_out(&self) -> Result<bool> {
        Ok(self.get_parameter(Parameter::AnalogOut)? != 0)
    }

    pub fn set_analog_out(&self, value: bool) -> Result<()> {
        self.set_parameter(Parameter::AnalogOut, c_int::from(value))
    }

    /// System clock frequency in Hz.
    pub fn frequency(&self) -> Result<c_int> {
        self.get_parameter(Parameter::Frequency)
    }

    pub fn set_frequency(&self, value: c_int) -> Result<()> {
        self.set_parameter(Parameter::Frequency, value)
    }

    pub fn ext_frequency(&self) -> Result<c_int> {
        self.get_parameter(Parameter::ExtFrequency)
    }

    pub fn set_ext_frequency(&self, value: c_int) -> Result<()> {
        self.set_parameter(Parameter::ExtFrequency, value)
    }

    /// 0 internal, 1 output, 2 input, 3 IO.
    pub fn clock_mode(&self) -> Result<c_int> {
        self.get_parameter(Parameter::ClockMode)
    }

    pub fn set_clock_mode(&self, value: c_int) -> Result<()> {
        self.set_parameter(Parameter::ClockMode, value)
    }

    pub fn enumerate(&self, enum_filter: DwfEnumFilter) -> Result<Vec<DeviceInfo>> {
        enumerate_devices(&self.dwf, enum_filter)
    }

    /// Closes every device this process has opened.
    pub fn close_all(&self) -> Result<()> {
        log::info!("Closing all devices");
        self.dwf.device_close_all()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn on_close_names() {
        assert_eq!("Run".parse::<OnClose>().unwrap(), OnClose::Continue);
        assert_eq!(OnClose::try_from(2).unwrap(), OnClose::Shutdown);
        assert_eq!(OnClose::Stop.to_string(), "stop");
        assert!("halt".parse::<OnClose>().is_err());
    }
}
