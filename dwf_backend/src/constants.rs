//! Typed views of the enumerated values defined by the WaveForms runtime.
//!
//! Each enum converts losslessly into the raw type the native entry point expects
//! (`From<Enum> for raw`) and back (`TryFrom<raw>`), and parses from the lower-case names used
//! throughout the WaveForms documentation (`"ramp-up"`, `"rising"`, ...). Several aliases may map
//! to the same value; `Display` prints the first one.

use std::fmt;
use std::str::FromStr;

use libc::{c_int, c_uchar};

use crate::error::DwfError;

macro_rules! native_enum {
    (
        $(#[$meta:meta])*
        $name:ident: $raw:ty {
            $( $(#[$vmeta:meta])* $variant:ident = $value:expr => [$($alias:literal),+] ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum $name {
            $( $(#[$vmeta])* $variant ),+
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            pub fn raw(self) -> $raw {
                match self {
                    $( $name::$variant => $value ),+
                }
            }

            pub fn name(self) -> &'static str {
                match self {
                    $( $name::$variant => [$($alias),+][0] ),+
                }
            }

            /// Expands a driver capability bit field (bit `n` set for raw value `n`).
            pub fn from_bits(bits: u64) -> Vec<$name> {
                Self::ALL
                    .iter()
                    .copied()
                    .filter(|v| (v.raw() as u32) < 64 && bits & (1u64 << (v.raw() as u32)) != 0)
                    .collect()
            }
        }

        impl From<$name> for $raw {
            fn from(value: $name) -> $raw {
                value.raw()
            }
        }

        impl TryFrom<$raw> for $name {
            type Error = DwfError;

            fn try_from(value: $raw) -> Result<Self, Self::Error> {
                Self::ALL
                    .iter()
                    .copied()
                    .find(|v| v.raw() == value)
                    .ok_or(DwfError::InvalidValue {
                        kind: stringify!($name),
                        value: value as i64,
                    })
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
                write!(f, "{}", self.name())
            }
        }

        impl FromStr for $name {
            type Err = DwfError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let key = s.trim().to_ascii_lowercase();
                $(
                    if [$($alias),+].contains(&key.as_str()) {
                        return Ok($name::$variant);
                    }
                )+
                Err(DwfError::invalid_option(
                    stringify!($name),
                    format!("'{}' is not one of: {}", s, [$([$($alias),+][0]),+].join(", ")),
                ))
            }
        }
    };
}

native_enum! {
    /// Product family reported by device enumeration.
    DeviceId: c_int {
        ElectronicsExplorer = 1 => ["electronics-explorer", "eexplorer"],
        AnalogDiscovery = 2 => ["analog-discovery", "ad"],
        AnalogDiscovery2 = 3 => ["analog-discovery2", "ad2"],
        DigitalDiscovery = 4 => ["digital-discovery", "dd"],
        Adp3x50 = 6 => ["adp3x50"],
        Eclypse = 7 => ["eclypse"],
        Adp5250 = 8 => ["adp5250"],
        Dps3340 = 9 => ["dps3340"],
        AnalogDiscovery3 = 10 => ["analog-discovery3", "ad3"],
    }
}

native_enum! {
    /// Global and per-device parameters.
    Parameter: c_int {
        /// Keep the USB power enabled even when AUX is connected (Analog Discovery 2).
        UsbPower = 2 => ["usb-power"],
        /// LED brightness 0..100% (Digital Discovery).
        LedBrightness = 3 => ["led-brightness"],
        /// 0 continue, 1 stop, 2 shutdown.
        OnClose = 4 => ["on-close"],
        AudioOut = 5 => ["audio-out"],
        /// USB power limit in mA, -1 for no limit.
        UsbLimit = 6 => ["usb-limit"],
        AnalogOut = 7 => ["analog-out"],
        Frequency = 8 => ["frequency"],
        ExtFrequency = 9 => ["ext-frequency"],
        /// 0 internal, 1 output, 2 input, 3 IO.
        ClockMode = 10 => ["clock-mode"],
        TempLimit = 11 => ["temp-limit"],
        FreqPhase = 12 => ["freq-phase"],
        DigitalVoltage = 13 => ["digital-voltage"],
        FreqPhaseSteps = 14 => ["freq-phase-steps"],
    }
}

native_enum! {
    /// Error codes returned by `FDwfGetLastError`.
    ErrorCode: c_int {
        NoError = 0 => ["no-error"],
        UnknownError = 1 => ["unknown-error"],
        ApiLockTimeout = 2 => ["api-lock-timeout"],
        AlreadyOpened = 3 => ["already-opened"],
        NotSupported = 4 => ["not-supported"],
        InvalidParameter0 = 0x10 => ["invalid-parameter0"],
        InvalidParameter1 = 0x11 => ["invalid-parameter1"],
        InvalidParameter2 = 0x12 => ["invalid-parameter2"],
        InvalidParameter3 = 0x13 => ["invalid-parameter3"],
        InvalidParameter4 = 0x14 => ["invalid-parameter4"],
    }
}

native_enum! {
    /// Instrument state machine as reported by the status calls.
    State: c_uchar {
        Ready = 0 => ["ready"],
        Armed = 1 => ["armed"],
        Done = 2 => ["done"],
        /// Also reported as "running" by the generators.
        Triggered = 3 => ["triggered", "running"],
        Config = 4 => ["config"],
        Prefill = 5 => ["prefill"],
        Wait = 7 => ["wait"],
    }
}

native_enum! {
    TriggerSource: c_uchar {
        None = 0 => ["none"],
        Pc = 1 => ["pc"],
        DetectorAnalogIn = 2 => ["detector-analog-in"],
        DetectorDigitalIn = 3 => ["detector-digital-in"],
        AnalogIn = 4 => ["analog-in"],
        DigitalIn = 5 => ["digital-in"],
        DigitalOut = 6 => ["digital-out"],
        AnalogOut1 = 7 => ["analog-out1"],
        AnalogOut2 = 8 => ["analog-out2"],
        AnalogOut3 = 9 => ["analog-out3"],
        AnalogOut4 = 10 => ["analog-out4"],
        External1 = 11 => ["external1"],
        External2 = 12 => ["external2"],
        External3 = 13 => ["external3"],
        External4 = 14 => ["external4"],
        High = 15 => ["high"],
        Low = 16 => ["low"],
        Clock = 17 => ["clock"],
    }
}

native_enum! {
    TriggerType: c_int {
        Edge = 0 => ["edge"],
        Pulse = 1 => ["pulse"],
        Transition = 2 => ["transition"],
        Window = 3 => ["window"],
    }
}

native_enum! {
    TriggerSlope: c_int {
        Rise = 0 => ["rise", "rising", "pos", "positive", "entering"],
        Fall = 1 => ["fall", "falling", "neg", "negative", "exiting"],
        Either = 2 => ["either"],
    }
}

native_enum! {
    TriggerLengthCondition: c_int {
        Less = 0 => ["less"],
        Timeout = 1 => ["timeout"],
        More = 2 => ["more"],
    }
}

native_enum! {
    /// Waveform shape of an analog output node.
    Function: c_uchar {
        Dc = 0 => ["dc"],
        Sine = 1 => ["sine"],
        Square = 2 => ["square"],
        Triangle = 3 => ["triangle"],
        RampUp = 4 => ["ramp-up"],
        RampDown = 5 => ["ramp-down"],
        Noise = 6 => ["noise"],
        Pulse = 7 => ["pulse"],
        Trapezium = 8 => ["trapezium"],
        SinePower = 9 => ["sine-power", "sine_power"],
        CustomPattern = 28 => ["custom-pattern"],
        PlayPattern = 29 => ["play-pattern"],
        Custom = 30 => ["custom"],
        Play = 31 => ["play"],
        AnalogIn1 = 64 => ["analog-in1"],
        AnalogIn2 = 65 => ["analog-in2"],
        AnalogIn3 = 66 => ["analog-in3"],
        AnalogIn4 = 67 => ["analog-in4"],
        AnalogIn5 = 68 => ["analog-in5"],
        AnalogIn6 = 69 => ["analog-in6"],
        AnalogIn7 = 70 => ["analog-in7"],
        AnalogIn8 = 71 => ["analog-in8"],
        AnalogIn9 = 72 => ["analog-in9"],
        AnalogIn10 = 73 => ["analog-in10"],
        AnalogIn11 = 74 => ["analog-in11"],
        AnalogIn12 = 75 => ["analog-in12"],
        AnalogIn13 = 76 => ["analog-in13"],
        AnalogIn14 = 77 => ["analog-in14"],
        AnalogIn15 = 78 => ["analog-in15"],
        AnalogIn16 = 79 => ["analog-in16"],
    }
}

native_enum! {
    /// Meaning of an analog IO channel node.
    AnalogIoNodeType: c_uchar {
        Enable = 1 => ["enable"],
        Voltage = 2 => ["voltage"],
        Current = 3 => ["current"],
        Power = 4 => ["power"],
        Temperature = 5 => ["temperature"],
        Dmm = 6 => ["dmm"],
        Range = 7 => ["range"],
        Measure = 8 => ["measure"],
        Time = 9 => ["time"],
        Frequency = 10 => ["frequency"],
        Resistance = 11 => ["resistance"],
        Slew = 12 => ["slew"],
    }
}

native_enum! {
    /// Measurement mode of the digital multimeter node.
    DmmMode: c_int {
        Resistance = 1 => ["resistance"],
        Continuity = 2 => ["continuity"],
        Diode = 3 => ["diode"],
        DcVoltage = 4 => ["dc-voltage"],
        AcVoltage = 5 => ["ac-voltage"],
        DcCurrent = 6 => ["dc-current"],
        AcCurrent = 7 => ["ac-current"],
        DcLowCurrent = 8 => ["dc-low-current"],
        AcLowCurrent = 9 => ["ac-low-current"],
        Temperature = 10 => ["temperature"],
    }
}

native_enum! {
    AnalogOutNode: c_int {
        Carrier = 0 => ["carrier"],
        Fm = 1 => ["fm"],
        Am = 2 => ["am"],
    }
}

native_enum! {
    AnalogOutMode: c_int {
        Voltage = 0 => ["voltage"],
        Current = 1 => ["current"],
    }
}

native_enum! {
    AnalogOutIdle: c_int {
        Disable = 0 => ["disable"],
        Offset = 1 => ["offset"],
        Initial = 2 => ["initial"],
    }
}

native_enum! {
    AcquisitionMode: c_int {
        Single = 0 => ["single"],
        ScanShift = 1 => ["scan-shift"],
        ScanScreen = 2 => ["scan-screen"],
        Record = 3 => ["record"],
        Overs = 4 => ["overs"],
        Single1 = 5 => ["single1"],
        Record2 = 6 => ["record2"],
    }
}

native_enum! {
    FilterMode: c_int {
        Decimate = 0 => ["decimate"],
        Average = 1 => ["average"],
        MinMax = 2 => ["min-max"],
        AverageFit = 3 => ["average-fit"],
    }
}

native_enum! {
    Coupling: c_int {
        Dc = 0 => ["dc"],
        Ac = 1 => ["ac"],
    }
}

native_enum! {
    DigitalInClockSource: c_int {
        Internal = 0 => ["internal"],
        External = 1 => ["external"],
        External2 = 2 => ["external2"],
    }
}

native_enum! {
    DigitalInSampleMode: c_int {
        Simple = 0 => ["simple"],
        /// Alternates between samples and noise (glitch) information.
        Noise = 1 => ["noise"],
    }
}

native_enum! {
    /// Output driver of a digital output channel.
    DigitalOutMode: c_int {
        PushPull = 0 => ["push-pull", "pp"],
        OpenDrain = 1 => ["open-drain", "od"],
        OpenSource = 2 => ["open-source", "os"],
        ThreeState = 3 => ["three-state"],
    }
}

native_enum! {
    DigitalOutType: c_int {
        Pulse = 0 => ["pulse"],
        Custom = 1 => ["custom"],
        Random = 2 => ["random"],
        Rom = 3 => ["rom"],
        State = 4 => ["state"],
        Play = 5 => ["play"],
    }
}

native_enum! {
    DigitalOutIdle: c_int {
        Init = 0 => ["init", "initial"],
        Low = 1 => ["low"],
        High = 2 => ["high"],
        Zet = 3 => ["zet", "z"],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_aliases() {
        assert_eq!("rising".parse::<TriggerSlope>().unwrap(), TriggerSlope::Rise);
        assert_eq!("Negative".parse::<TriggerSlope>().unwrap(), TriggerSlope::Fall);
        assert_eq!("z".parse::<DigitalOutIdle>().unwrap(), DigitalOutIdle::Zet);
        assert_eq!("ramp-up".parse::<Function>().unwrap(), Function::RampUp);
        assert_eq!(Function::SinePower.to_string(), "sine-power");
    }

    #[test]
    fn rejects_unknown_names() {
        let err = "sawtooth".parse::<Function>().unwrap_err();
        assert!(matches!(err, DwfError::InvalidOption { option: "Function", .. }));
    }

    #[test]
    fn converts_raw_values() {
        assert_eq!(c_uchar::from(TriggerSource::External2), 12);
        assert_eq!(State::try_from(3).unwrap(), State::Triggered);
        assert!(matches!(
            State::try_from(6),
            Err(DwfError::InvalidValue { kind: "State", value: 6 })
        ));
    }

    #[test]
    fn expands_capability_bits() {
        let bits = (1 << Function::Dc.raw()) | (1 << Function::Sine.raw()) | (1 << Function::Custom.raw());
        assert_eq!(
            Function::from_bits(bits),
            vec![Function::Dc, Function::Sine, Function::Custom]
        );
    }
}
