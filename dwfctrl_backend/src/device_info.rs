//! Information gathered during device enumeration.

use dwf_backend::ffi::*;
use dwf_backend::*;
use libc::c_int;

/// Channel counts and buffer sizes of one device configuration.
///
/// Most devices offer several configurations that trade buffer memory between instruments; the
/// configuration is picked when the device is opened (see
/// [`DeviceFilter::configuration`](crate::device::DeviceFilter::configuration)).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Configuration {
    pub index: usize,
    pub analog_in_channel_count: i32,
    pub analog_out_channel_count: i32,
    pub analog_io_channel_count: i32,
    pub digital_in_channel_count: i32,
    pub digital_out_channel_count: i32,
    pub digital_io_channel_count: i32,
    pub analog_in_buffer_size: i32,
    pub analog_out_buffer_size: i32,
    pub digital_in_buffer_size: i32,
    pub digital_out_buffer_size: i32,
    /// Free-form description; empty when the driver provides none.
    pub text_info: String,
}

impl Configuration {
    /// Reads configuration `index` of the device last passed to `FDwfEnumConfig`.
    pub fn query(dwf: &Dwf, index: usize) -> Result<Self> {
        let idx = index as c_int;
        let text_info = dwf.enum_config_info_text(idx)?;
        Ok(Self {
            index,
            analog_in_channel_count: dwf.enum_config_info(idx, DECI_ANALOG_IN_CHANNEL_COUNT)?,
            analog_out_channel_count: dwf.enum_config_info(idx, DECI_ANALOG_OUT_CHANNEL_COUNT)?,
            analog_io_channel_count: dwf.enum_config_info(idx, DECI_ANALOG_IO_CHANNEL_COUNT)?,
            digital_in_channel_count: dwf.enum_config_info(idx, DECI_DIGITAL_IN_CHANNEL_COUNT)?,
            digital_out_channel_count: dwf.enum_config_info(idx, DECI_DIGITAL_OUT_CHANNEL_COUNT)?,
            digital_io_channel_count: dwf.enum_config_info(idx, DECI_DIGITAL_IO_CHANNEL_COUNT)?,
            analog_in_buffer_size: dwf.enum_config_info(idx, DECI_ANALOG_IN_BUFFER_SIZE)?,
            analog_out_buffer_size: dwf.enum_config_info(idx, DECI_ANALOG_OUT_BUFFER_SIZE)?,
            digital_in_buffer_size: dwf.enum_config_info(idx, DECI_DIGITAL_IN_BUFFER_SIZE)?,
            digital_out_buffer_size: dwf.enum_config_info(idx, DECI_DIGITAL_OUT_BUFFER_SIZE)?,
            text_info: if text_info.len() > 1 { text_info } else { String::new() },
        })
    }
}

/// Properties of an enumerated device.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeviceInfo {
    /// Position in the enumeration list the info was read from.
    pub index: usize,
    /// The device is opened, by this or another process.
    pub is_open: bool,
    /// Raw device id; negative for devices reached through a remote or network link.
    pub id: c_int,
    pub revision: c_int,
    pub name: String,
    pub user_name: String,
    /// Normalized serial number, see [`normalize_serial_number`].
    pub serial_number: String,
    pub configurations: Vec<Configuration>,
}

impl DeviceInfo {
    /// Reads every property of enumerated device `index`.
    pub fn query(dwf: &Dwf, index: usize) -> Result<Self> {
        let idx = index as c_int;
        let is_open = dwf.enum_device_is_opened(idx)? != 0;
        let (id, revision) = dwf.enum_device_type(idx)?;
        let name = dwf.enum_device_name(idx)?;
        let user_name = dwf.enum_user_name(idx)?;
        let serial_number = normalize_serial_number(&dwf.enum_sn(idx)?);
        let configurations = (0..dwf.enum_config(idx)?.max(0) as usize)
            .map(|config| Configuration::query(dwf, config))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self {
            index,
            is_open,
            id,
            revision,
            name,
            user_name,
            serial_number,
            configurations,
        })
    }

    /// Typed device id, if this crate knows the product.
    pub fn device_id(&self) -> Option<DeviceId> {
        DeviceId::try_from(self.id.abs()).ok()
    }

    /// Hardware revision as printed on the board (1 is `A`, 2 is `B`, ...).
    pub fn revision_letter(&self) -> char {
        char::from(0x40 + (self.revision & 0xF) as u8)
    }
}

/// Upper-cases a serial number and strips the `SN:` prefix the driver reports.
pub fn normalize_serial_number(serial_number: &str) -> String {
    let upper = serial_number.trim().to_ascii_uppercase();
    match upper.strip_prefix("SN:") {
        Some(stripped) => stripped.to_string(),
        None => upper,
    }
}

/// Enumerates the devices matching `enum_filter` (one of the `ENUMFILTER_*` values, optionally
/// combined with [`ENUMFILTER_TYPE`] and a device id).
pub fn enumerate_devices(dwf: &Dwf, enum_filter: DwfEnumFilter) -> Result<Vec<DeviceInfo>> {
    let count = dwf.enumerate(enum_filter)?.max(0) as usize;
    log::info!("Found {} device(s)", count);
    (0..count).map(|index| DeviceInfo::query(dwf, index)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serial_numbers_are_normalized() {
        assert_eq!(normalize_serial_number("SN:210321abcdef"), "210321ABCDEF");
        assert_eq!(normalize_serial_number("sn:210321ABCDEF"), "210321ABCDEF");
        assert_eq!(normalize_serial_number("210321ABCDEF"), "210321ABCDEF");
    }
}
