//! Front-ends for specific products.
//!
//! Each type opens only devices of its product and maps the product's analog IO channels onto
//! named supplies, monitors and settings. They dereference to [`Device`], so every generic unit
//! stays reachable.
//!
//! Monitor readings come from the last [`AnalogIo::read_status`];
//! [`ElectronicsExplorer::monitors`] and friends read the status once and return every monitor.

use std::ops::{Deref, DerefMut};
use std::sync::Arc;

use dwf_backend::*;
use indexmap::IndexMap;

use crate::analog_io::{AnalogIo, AnalogIoNode};
use crate::device::{Device, DeviceFilter};

/// Analog IO node positions of a supply on its channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SupplyLayout {
    pub channel: usize,
    pub enable: Option<usize>,
    pub voltage: Option<usize>,
    /// Measured current, read from the node status.
    pub current: Option<usize>,
    /// Current limit, written to the node value.
    pub current_limit: Option<usize>,
}

impl SupplyLayout {
    const fn switch(channel: usize) -> Self {
        Self {
            channel,
            enable: Some(0),
            voltage: None,
            current: None,
            current_limit: None,
        }
    }

    const fn adjustable(channel: usize) -> Self {
        Self {
            voltage: Some(1),
            ..Self::switch(channel)
        }
    }

    const fn limited(channel: usize) -> Self {
        Self {
            current: Some(2),
            current_limit: Some(2),
            ..Self::adjustable(channel)
        }
    }
}

/// A power supply or voltage reference.
pub struct Supply<'a> {
    io: &'a AnalogIo,
    layout: SupplyLayout,
}

impl<'a> Supply<'a> {
    pub fn layout(&self) -> SupplyLayout {
        self.layout
    }

    fn node(&self, node: Option<usize>, what: &str) -> Result<&'a AnalogIoNode> {
        let node = node.ok_or_else(|| DwfError::Unsupported(format!("{} on this supply", what)))?;
        self.io.node(self.layout.channel, node)
    }

    pub fn enabled(&self) -> Result<bool> {
        Ok(self.node(self.layout.enable, "switching")?.value()? != 0.0)
    }

    pub fn set_enabled(&self, enabled: bool) -> Result<()> {
        self.node(self.layout.enable, "switching")?
            .set_value(if enabled { 1.0 } else { 0.0 })
    }

    pub fn voltage(&self) -> Result<f64> {
        self.node(self.layout.voltage, "voltage control")?.value()
    }

    pub fn set_voltage(&self, voltage: f64) -> Result<()> {
        self.node(self.layout.voltage, "voltage control")?.set_value(voltage)
    }

    pub fn current(&self) -> Result<f64> {
        self.node(self.layout.current, "current measurement")?.status()
    }

    pub fn current_limit(&self) -> Result<f64> {
        self.node(self.layout.current_limit, "current limit")?.value()
    }

    pub fn set_current_limit(&self, limit: f64) -> Result<()> {
        self.node(self.layout.current_limit, "current limit")?.set_value(limit)
    }

    /// Applies the given values, then the enable switch when the supply has one.
    pub fn setup(&self, voltage: Option<f64>, current_limit: Option<f64>, enabled: bool) -> Result<()> {
        if let Some(voltage) = voltage {
            self.set_voltage(voltage)?;
        }
        if let Some(limit) = current_limit {
            self.set_current_limit(limit)?;
        }
        if self.layout.enable.is_some() {
            self.set_enabled(enabled)?;
        }
        Ok(())
    }
}

macro_rules! specialized_device {
    (
        $(#[$meta:meta])*
        $name:ident = $device_id:ident;
        supplies { $($supply:ident = $layout:expr),* $(,)? }
        monitors { $($monitor:ident = ($mon_channel:expr, $mon_node:expr)),* $(,)? }
        settings { $($setting:ident = ($set_channel:expr, $set_node:expr)),* $(,)? }
    ) => {
        $(#[$meta])*
        pub struct $name {
            device: Device,
        }

        impl $name {
            pub const DEVICE_ID: DeviceId = DeviceId::$device_id;

            /// Opens the first matching device of this product.
            pub fn open(filter: &DeviceFilter) -> Result<Self> {
                Self::open_with(Dwf::shared()?, filter)
            }

            pub fn open_with(dwf: Arc<Dwf>, filter: &DeviceFilter) -> Result<Self> {
                let filter = DeviceFilter {
                    device_id: Some(Self::DEVICE_ID),
                    ..filter.clone()
                };
                Ok(Self {
                    device: Device::open_with(dwf, &filter)?,
                })
            }

            pub fn device(&self) -> &Device {
                &self.device
            }

            pub fn device_(&mut self) -> &mut Device {
                &mut self.device
            }

            pub fn into_device(self) -> Device {
                self.device
            }

            pub fn master_enable(&self) -> Result<bool> {
                self.device.analog_io()?.master_enable()
            }

            pub fn set_master_enable(&self, enabled: bool) -> Result<()> {
                self.device.analog_io()?.set_master_enable(enabled)
            }

            pub fn master_enable_status(&self) -> Result<bool> {
                self.device.analog_io()?.master_enable_status()
            }

            $(
                pub fn $supply(&self) -> Result<Supply<'_>> {
                    Ok(Supply {
                        io: self.device.analog_io()?,
                        layout: $layout,
                    })
                }
            )*

            $(
                pub fn $monitor(&self) -> Result<f64> {
                    self.device
                        .analog_io()?
                        .node($mon_channel as usize, $mon_node as usize)?
                        .status()
                }
            )*

            $(
                pub fn $setting(&self) -> Result<&AnalogIoNode> {
                    self.device
                        .analog_io()?
                        .node($set_channel as usize, $set_node as usize)
                }
            )*

            /// Reads the analog IO status and returns every monitor reading by name.
            pub fn monitors(&self) -> Result<IndexMap<&'static str, f64>> {
                let mut readings = IndexMap::new();
                let io = self.device.analog_io()?;
                io.read_status()?;
                $(
                    readings.insert(stringify!($monitor), io.node($mon_channel as usize, $mon_node as usize)?.status()?);
                )*
                Ok(readings)
            }
        }

        impl Deref for $name {
            type Target = Device;

            fn deref(&self) -> &Device {
                &self.device
            }
        }

        impl DerefMut for $name {
            fn deref_mut(&mut self) -> &mut Device {
                &mut self.device
            }
        }
    };
}

specialized_device! {
    /// Digilent Electronics Explorer.
    ElectronicsExplorer = ElectronicsExplorer;
    supplies {
        fixed_supply = SupplyLayout { current_limit: None, ..SupplyLayout::limited(0) },
        positive_supply = SupplyLayout::limited(1),
        negative_supply = SupplyLayout::limited(2),
        reference1 = SupplyLayout::adjustable(3),
        reference2 = SupplyLayout::adjustable(4),
    }
    monitors {
        voltmeter1 = (5, 0),
        voltmeter2 = (6, 0),
        voltmeter3 = (7, 0),
        voltmeter4 = (8, 0),
    }
    settings {}
}

specialized_device! {
    /// Digilent Analog Discovery.
    AnalogDiscovery = AnalogDiscovery;
    supplies {
        positive_supply = SupplyLayout::switch(0),
        negative_supply = SupplyLayout::switch(1),
    }
    monitors {
        usb_voltage = (2, 0),
        usb_current = (2, 1),
        temperature = (2, 2),
        regulator_voltage = (3, 0),
        regulator_current = (3, 1),
    }
    settings {}
}

specialized_device! {
    /// Digilent Analog Discovery 2.
    AnalogDiscovery2 = AnalogDiscovery2;
    supplies {
        positive_supply = SupplyLayout::adjustable(0),
        negative_supply = SupplyLayout::adjustable(1),
    }
    monitors {
        usb_voltage = (2, 0),
        usb_current = (2, 1),
        temperature = (2, 2),
        aux_voltage = (3, 0),
        aux_current = (3, 1),
    }
    settings {}
}

specialized_device! {
    /// Digilent Analog Discovery 3.
    AnalogDiscovery3 = AnalogDiscovery3;
    supplies {
        positive_supply = SupplyLayout::adjustable(0),
        negative_supply = SupplyLayout::adjustable(1),
    }
    monitors {
        pcb_temperature = (2, 0),
        fpga_temperature = (2, 1),
        usb_voltage = (2, 2),
        usb_current = (2, 3),
        aux_voltage = (3, 4),
        aux_current = (3, 5),
        usb_cc1_voltage = (2, 6),
        usb_cc2_voltage = (2, 7),
    }
    settings {}
}

specialized_device! {
    /// Digilent Digital Discovery.
    ///
    /// The settings nodes configure the digital front end: input pull (0 low, 0.5 middle, 1 high),
    /// DIO pull enable and direction masks, drive strength in mA (0 follows the digital voltage),
    /// slew rate and the digital clock frequency.
    DigitalDiscovery = DigitalDiscovery;
    supplies {
        digital_supply = SupplyLayout {
            enable: None,
            voltage: Some(0),
            ..SupplyLayout::switch(0)
        },
    }
    monitors {
        vio_voltage = (1, 0),
        vio_current = (1, 1),
        usb_voltage = (2, 0),
        usb_current = (2, 1),
    }
    settings {
        din_pull_up_down = (0, 1),
        dio_pull_enable = (0, 2),
        dio_pull_up_down = (0, 3),
        dio_drive_strength = (0, 4),
        dio_slew = (0, 5),
        digital_frequency = (0, 6),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn supply_layouts_build_on_each_other() {
        let limited = SupplyLayout::limited(1);
        assert_eq!(limited.channel, 1);
        assert_eq!(limited.enable, Some(0));
        assert_eq!(limited.voltage, Some(1));
        assert_eq!(limited.current, Some(2));
        assert_eq!(limited.current_limit, Some(2));

        let switch = SupplyLayout::switch(3);
        assert_eq!(switch.voltage, None);
        assert_eq!(switch.current, None);
    }

    #[test]
    fn products_pin_their_device_id() {
        assert_eq!(AnalogDiscovery2::DEVICE_ID, DeviceId::AnalogDiscovery2);
        assert_eq!(DigitalDiscovery::DEVICE_ID.raw(), 4);
    }
}
