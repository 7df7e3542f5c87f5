// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 KylinSoft Co., Ltd. <https://www.kylinos.cn/>
// See LICENSES for license details.

//! Error type shared by the remote processor hooks and their collaborators.

use core::fmt;

/// The error type for remote processor bring-up and lifecycle failures.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum RprocError {
    /// Bad internal state, e.g. a lifecycle call out of order.
    BadState,
    /// Invalid parameter/argument, e.g. an unsupported remote processor.
    InvalidInput,
    /// Input/output error reported by the hardware layer.
    Io,
    /// Not enough memory, or a device wrapper could not be allocated.
    NoMemory,
    /// No such device.
    NoSuchDevice,
    /// A hardware module record could not be found.
    NotFound,
    /// Device or resource is busy, e.g. no timer with the wanted capability.
    ResourceBusy,
}

impl RprocError {
    /// Stable error message for display/logging.
    pub const fn message(&self) -> &'static str {
        match self {
            RprocError::BadState => "Bad internal state",
            RprocError::InvalidInput => "Invalid parameter",
            RprocError::Io => "Input/output error",
            RprocError::NoMemory => "Not enough memory",
            RprocError::NoSuchDevice => "No such device",
            RprocError::NotFound => "Entity not found",
            RprocError::ResourceBusy => "Resource is busy",
        }
    }

    /// Returns the negative Linux status code of this error.
    pub const fn errno(self) -> i32 {
        match self {
            RprocError::BadState => -14, // EFAULT
            RprocError::InvalidInput => -22, // EINVAL
            RprocError::Io => -5, // EIO
            RprocError::NoMemory => -12, // ENOMEM
            RprocError::NoSuchDevice => -19, // ENODEV
            RprocError::NotFound => -2, // ENOENT
            RprocError::ResourceBusy => -16, // EBUSY
        }
    }
}

impl fmt::Display for RprocError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

/// A specialized [`Result`] type with [`RprocError`] as the error type.
pub type RprocResult<T = ()> = Result<T, RprocError>;

/// Converts a result into the status integer the remoteproc core expects,
/// `0` on success.
pub fn to_status(res: RprocResult) -> i32 {
    match res {
        Ok(()) => 0,
        Err(e) => e.errno(),
    }
}

/// Constructs an [`Err(RprocError)`] while printing a warning message.
///
/// `rproc_err!(ResourceBusy, "no free timer")` logs
/// `[ResourceBusy] no free timer` and evaluates to
/// `Err(RprocError::ResourceBusy)`.
///
/// [`Err(RprocError)`]: Err
#[macro_export]
macro_rules! rproc_err {
    ($err:ident) => {{
        let err = $crate::RprocError::$err;
        $crate::__priv::warn!("[{:?}]", err);
        Err(err)
    }};
    ($err:ident, $msg:expr) => {{
        let err = $crate::RprocError::$err;
        $crate::__priv::warn!("[{:?}] {}", err, $msg);
        Err(err)
    }};
}

/// Returns from the function with an [`RprocError`], optionally with a
/// message.
#[macro_export]
macro_rules! rproc_bail {
    ($($t:tt)*) => {
        return $crate::rproc_err!($($t)*);
    };
}

/// Ensure a condition is true. If it is not, return from the function
/// with an error.
#[macro_export]
macro_rules! ensure {
    ($predicate:expr, $context_selector:expr $(,)?) => {
        if !$predicate {
            return $context_selector;
        }
    };
}
