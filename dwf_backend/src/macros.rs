// Helpers for declaring the safe wrappers on `Dwf`.

/// Calls a resolved entry point and routes its return code through [`Dwf::check`].
///
/// Evaluates to `Result<()>`; an unresolved entry point yields `MissingEntryPoint`.
macro_rules! dwf_call {
    ($dwf:expr, $name:ident($($arg:expr),* $(,)?)) => {{
        let function = $dwf
            .entry
            .$name
            .ok_or($crate::error::DwfError::MissingEntryPoint(stringify!($name)))?;
        $dwf.check(stringify!($name), unsafe { function($($arg),*) })
    }};
}

/// Declares safe wrappers whose native output parameters become return values.
///
/// ```ignore
/// dwf_fn! {
///     /// Resets the oscilloscope.
///     analog_in_reset(hdwf: Hdwf) = FDwfAnalogInReset;
///     analog_in_frequency_get(hdwf: Hdwf) -> c_double = FDwfAnalogInFrequencyGet;
///     analog_in_frequency_info(hdwf: Hdwf) -> (min: c_double, max: c_double) = FDwfAnalogInFrequencyInfo;
/// }
/// ```
macro_rules! dwf_fn {
    () => {};
    (
        $(#[$meta:meta])*
        $fname:ident($($arg:ident: $ty:ty),* $(,)?) = $native:ident;
        $($rest:tt)*
    ) => {
        $(#[$meta])*
        pub fn $fname(&self, $($arg: $ty),*) -> $crate::error::Result<()> {
            dwf_call!(self, $native($($arg),*))
        }
        dwf_fn! { $($rest)* }
    };
    (
        $(#[$meta:meta])*
        $fname:ident($($arg:ident: $ty:ty),* $(,)?) -> ($($out:ident: $oty:ty),+ $(,)?) = $native:ident;
        $($rest:tt)*
    ) => {
        $(#[$meta])*
        pub fn $fname(&self, $($arg: $ty),*) -> $crate::error::Result<($($oty),+)> {
            $( let mut $out = <$oty>::default(); )+
            dwf_call!(self, $native($($arg,)* $(&mut $out),+))?;
            Ok(($($out),+))
        }
        dwf_fn! { $($rest)* }
    };
    (
        $(#[$meta:meta])*
        $fname:ident($($arg:ident: $ty:ty),* $(,)?) -> $oty:ty = $native:ident;
        $($rest:tt)*
    ) => {
        $(#[$meta])*
        pub fn $fname(&self, $($arg: $ty),*) -> $crate::error::Result<$oty> {
            let mut value = <$oty>::default();
            dwf_call!(self, $native($($arg,)* &mut value))?;
            Ok(value)
        }
        dwf_fn! { $($rest)* }
    };
}
