//! Safe wrappers over the WaveForms runtime.
//!
//! [`Dwf`] owns the loaded library together with its resolved [`EntryPoints`]. It has one method
//! per native entry point; the methods for each instrument live in their own module
//! (`analog_in`, `analog_out`, ...) as further `impl Dwf` blocks.
//!
//! ## Error handling
//!
//! Every call goes through [`Dwf::check`]: when an entry point returns false, the driver's last
//! error code is queried with `FDwfGetLastError`. A code other than `DWFERC_NO_ERC` turns into
//! [`DwfError::Driver`] carrying the message of `FDwfGetLastErrorMsg`; the runtime occasionally
//! reports false without setting an error, which is treated as success.
//!
//! ## Output parameters
//!
//! Native output pointers are returned by value: a single output as a scalar, several outputs as
//! a tuple in declaration order. String outputs are decoded from the fixed-size buffers the
//! runtime fills.
//!
//! ## Example
//!
//! ```ignore
//! # use dwf_backend::*;
//! let dwf = Dwf::load()?;
//! println!("WaveForms {}", dwf.version()?);
//! for index in 0..dwf.enumerate(ENUMFILTER_ALL)? {
//!     println!("{} {}", dwf.enum_device_name(index)?, dwf.enum_sn(index)?);
//! }
//! ```

use std::ffi::CStr;
use std::sync::Arc;

use libc::{c_char, c_int, c_void};
use libloading::Library;
use parking_lot::Mutex;

use crate::constants::ErrorCode;
use crate::error::{DwfError, Result};
use crate::ffi::*;

static SHARED: Mutex<Option<Arc<Dwf>>> = parking_lot::const_mutex(None);

pub struct Dwf {
    pub(crate) entry: EntryPoints,
    library: Option<Library>,
}

impl Dwf {
    /// Loads the runtime from `DWF_LIBRARY` or the platform default location.
    pub fn load() -> Result<Self> {
        Self::load_from(&library_path())
    }

    pub fn load_from(path: &str) -> Result<Self> {
        let (library, entry) = load_library(path)?;
        let dwf = Self {
            entry,
            library: Some(library),
        };
        match dwf.version() {
            Ok(version) => log::info!("DWF version: {}", version),
            Err(err) => log::warn!("Failed to query the DWF version: {}", err),
        }
        Ok(dwf)
    }

    /// Wraps an already populated entry point table, e.g. one made of test doubles.
    pub fn with_entry_points(entry: EntryPoints) -> Self {
        Self {
            entry,
            library: None,
        }
    }

    /// Process-wide instance, loaded on first use. A failed load is retried on the next call.
    pub fn shared() -> Result<Arc<Self>> {
        let mut shared = SHARED.lock();
        if let Some(dwf) = shared.as_ref() {
            return Ok(dwf.clone());
        }
        let dwf = Arc::new(Self::load()?);
        *shared = Some(dwf.clone());
        Ok(dwf)
    }

    pub fn entry_points(&self) -> &EntryPoints {
        &self.entry
    }

    pub fn is_loaded_from_library(&self) -> bool {
        self.library.is_some()
    }

    /// Converts the return code of `name` into a `Result`.
    pub fn check(&self, name: &'static str, result: c_int) -> Result<()> {
        log::debug!("{} = {}", name, result);
        if result != 0 {
            return Ok(());
        }
        match self.native_error() {
            Some(err) => {
                log::debug!("{} failed: {}", name, err);
                Err(err)
            }
            None => Ok(()),
        }
    }

    // Queries the error state without going through `check`, which would recurse on failure.
    fn native_error(&self) -> Option<DwfError> {
        let get_error = match self.entry.FDwfGetLastError {
            Some(function) => function,
            None => {
                return Some(DwfError::Driver {
                    code: ErrorCode::UnknownError.raw(),
                    message: "native call failed and FDwfGetLastError is unavailable".to_string(),
                })
            }
        };
        let mut code: DwfErc = ErrorCode::NoError.raw();
        unsafe { get_error(&mut code) };
        if code == ErrorCode::NoError.raw() {
            return None;
        }
        let mut buffer = [0u8; ERROR_BUFFER_SIZE];
        if let Some(get_message) = self.entry.FDwfGetLastErrorMsg {
            unsafe { get_message(buffer.as_mut_ptr() as *mut c_char) };
        }
        Some(DwfError::Driver {
            code,
            message: string_from_buffer(&buffer).trim_end_matches('\n').to_string(),
        })
    }

    /// Gets the DWF API version string.
    pub fn version(&self) -> Result<String> {
        let mut buffer = [0u8; NAME_BUFFER_SIZE];
        dwf_call!(self, FDwfGetVersion(buffer.as_mut_ptr() as *mut c_char))?;
        Ok(string_from_buffer(&buffer))
    }

    /// Gets the last error message, without the trailing newline the driver appends.
    pub fn last_error_message(&self) -> Result<String> {
        let mut buffer = [0u8; ERROR_BUFFER_SIZE];
        dwf_call!(self, FDwfGetLastErrorMsg(buffer.as_mut_ptr() as *mut c_char))?;
        Ok(string_from_buffer(&buffer).trim_end_matches('\n').to_string())
    }

    dwf_fn! {
        /// Gets the last error code.
        last_error() -> DwfErc = FDwfGetLastError;
        param_set(param: DwfParam, value: c_int) = FDwfParamSet;
        param_get(param: DwfParam) -> c_int = FDwfParamGet;

        /// Builds the internal list of detected devices and returns its length.
        enumerate(enum_filter: DwfEnumFilter) -> c_int = FDwfEnum;
        enum_device_type(idx_device: c_int) -> (device_id: DwfDevId, revision: DwfDevVer) = FDwfEnumDeviceType;
        enum_device_is_opened(idx_device: c_int) -> c_int = FDwfEnumDeviceIsOpened;
        enum_config(idx_device: c_int) -> c_int = FDwfEnumConfig;
    }

    pub fn enum_user_name(&self, idx_device: c_int) -> Result<String> {
        let mut buffer = [0u8; NAME_BUFFER_SIZE];
        dwf_call!(self, FDwfEnumUserName(idx_device, buffer.as_mut_ptr() as *mut c_char))?;
        Ok(string_from_buffer(&buffer))
    }

    pub fn enum_device_name(&self, idx_device: c_int) -> Result<String> {
        let mut buffer = [0u8; NAME_BUFFER_SIZE];
        dwf_call!(self, FDwfEnumDeviceName(idx_device, buffer.as_mut_ptr() as *mut c_char))?;
        Ok(string_from_buffer(&buffer))
    }

    pub fn enum_sn(&self, idx_device: c_int) -> Result<String> {
        let mut buffer = [0u8; NAME_BUFFER_SIZE];
        dwf_call!(self, FDwfEnumSN(idx_device, buffer.as_mut_ptr() as *mut c_char))?;
        Ok(string_from_buffer(&buffer))
    }

    /// Numeric information about configuration `idx_config` of the enumerated devices.
    pub fn enum_config_info(&self, idx_config: c_int, info: DwfDeci) -> Result<c_int> {
        let mut value: c_int = 0;
        dwf_call!(
            self,
            FDwfEnumConfigInfo(idx_config, info, &mut value as *mut c_int as *mut c_void)
        )?;
        Ok(value)
    }

    /// Text description of configuration `idx_config` (`DECI_TEXT_INFO`).
    pub fn enum_config_info_text(&self, idx_config: c_int) -> Result<String> {
        let mut buffer = [0u8; TEXT_INFO_BUFFER_SIZE];
        dwf_call!(
            self,
            FDwfEnumConfigInfo(idx_config, DECI_TEXT_INFO, buffer.as_mut_ptr() as *mut c_void)
        )?;
        Ok(string_from_buffer(&buffer))
    }

    dwf_fn! {
        /// Opens enumerated device `idx_device` and returns its handle.
        device_open(idx_device: c_int) -> Hdwf = FDwfDeviceOpen;
        device_config_open(idx_device: c_int, idx_config: c_int) -> Hdwf = FDwfDeviceConfigOpen;
        device_close(hdwf: Hdwf) = FDwfDeviceClose;
        /// Closes every device opened by this process.
        device_close_all() = FDwfDeviceCloseAll;
        device_auto_configure_set(hdwf: Hdwf, auto_configure: c_int) = FDwfDeviceAutoConfigureSet;
        device_auto_configure_get(hdwf: Hdwf) -> c_int = FDwfDeviceAutoConfigureGet;
        device_reset(hdwf: Hdwf) = FDwfDeviceReset;
        device_enable_set(hdwf: Hdwf, enable: c_int) = FDwfDeviceEnableSet;
        /// Bit field of supported trigger sources.
        device_trigger_info(hdwf: Hdwf) -> c_int = FDwfDeviceTriggerInfo;
        device_trigger_set(hdwf: Hdwf, idx_pin: c_int, trigger_source: DwfTrigSrc) = FDwfDeviceTriggerSet;
        device_trigger_get(hdwf: Hdwf, idx_pin: c_int) -> DwfTrigSrc = FDwfDeviceTriggerGet;
        device_trigger_pc(hdwf: Hdwf) = FDwfDeviceTriggerPC;
        /// Bit field of supported trigger slopes.
        device_trigger_slope_info(hdwf: Hdwf) -> c_int = FDwfDeviceTriggerSlopeInfo;
        device_param_set(hdwf: Hdwf, param: DwfParam, value: c_int) = FDwfDeviceParamSet;
        device_param_get(hdwf: Hdwf, param: DwfParam) -> c_int = FDwfDeviceParamGet;
    }
}

/// Decodes a NUL-terminated string written by the driver into `buffer`.
pub fn string_from_buffer(buffer: &[u8]) -> String {
    match CStr::from_bytes_until_nul(buffer) {
        Ok(text) => text.to_string_lossy().into_owned(),
        Err(_) => String::from_utf8_lossy(buffer).into_owned(),
    }
}

/// Copies `text` into a driver string buffer, truncating and NUL-terminating it.
pub fn string_to_buffer(text: &str, buffer: &mut [u8]) {
    if buffer.is_empty() {
        return;
    }
    let len = text.len().min(buffer.len() - 1);
    buffer[..len].copy_from_slice(&text.as_bytes()[..len]);
    buffer[len..].fill(0);
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    thread_local! {
        static LAST_ERROR: Cell<DwfErc> = Cell::new(0);
    }

    unsafe extern "C" fn get_last_error(code: *mut DwfErc) -> c_int {
        *code = LAST_ERROR.with(|e| e.get());
        1
    }

    unsafe extern "C" fn get_last_error_msg(message: *mut c_char) -> c_int {
        let buffer = std::slice::from_raw_parts_mut(message as *mut u8, ERROR_BUFFER_SIZE);
        string_to_buffer("Device already opened\n", buffer);
        1
    }

    unsafe extern "C" fn get_version(version: *mut c_char) -> c_int {
        let buffer = std::slice::from_raw_parts_mut(version as *mut u8, NAME_BUFFER_SIZE);
        string_to_buffer("3.20.1", buffer);
        1
    }

    unsafe extern "C" fn device_open(_idx: c_int, hdwf: *mut Hdwf) -> c_int {
        LAST_ERROR.with(|e| e.set(ErrorCode::AlreadyOpened.raw()));
        *hdwf = HDWF_NONE;
        0
    }

    unsafe extern "C" fn device_reset(_hdwf: Hdwf) -> c_int {
        LAST_ERROR.with(|e| e.set(ErrorCode::NoError.raw()));
        0
    }

    fn fake() -> Dwf {
        let _ = env_logger::builder().is_test(true).try_init();
        let mut entry = EntryPoints::default();
        entry.FDwfGetLastError = Some(get_last_error);
        entry.FDwfGetLastErrorMsg = Some(get_last_error_msg);
        entry.FDwfGetVersion = Some(get_version);
        entry.FDwfDeviceOpen = Some(device_open);
        entry.FDwfDeviceReset = Some(device_reset);
        Dwf::with_entry_points(entry)
    }

    #[test]
    fn returns_string_outputs() {
        assert_eq!(fake().version().unwrap(), "3.20.1");
    }

    #[test]
    fn failure_carries_code_and_trimmed_message() {
        let err = fake().device_open(0).unwrap_err();
        match err {
            DwfError::Driver { code, message } => {
                assert_eq!(code, ErrorCode::AlreadyOpened.raw());
                assert_eq!(message, "Device already opened");
            }
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn failure_without_error_code_is_success() {
        assert!(fake().device_reset(1).is_ok());
    }

    #[test]
    fn unresolved_entry_point_is_reported() {
        let err = fake().device_close(1).unwrap_err();
        assert!(matches!(err, DwfError::MissingEntryPoint("FDwfDeviceClose")));
    }

    #[test]
    fn channel_impedance_binds_its_entry_points() {
        let dwf = fake();
        assert!(matches!(
            dwf.analog_in_channel_impedance_set(1, 0, 50.0),
            Err(DwfError::MissingEntryPoint("FDwfAnalogInChannelImpedanceSet"))
        ));
        assert!(matches!(
            dwf.analog_in_channel_impedance_get(1, 0),
            Err(DwfError::MissingEntryPoint("FDwfAnalogInChannelImpedanceGet"))
        ));
    }

    #[test]
    fn buffer_helpers_round_trip_and_truncate() {
        let mut buffer = [0xffu8; 8];
        string_to_buffer("SN:210321ABCDEF", &mut buffer);
        assert_eq!(string_from_buffer(&buffer), "SN:2103");
        assert_eq!(string_from_buffer(b"no terminator"), "no terminator");
    }
}
