// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 KylinSoft Co., Ltd. <https://www.kylinos.cn/>
// See LICENSES for license details.

//! OMAP4 remote processor platform support.
//!
//! OMAP4 carries two auxiliary processors next to the Cortex-A9 host: the
//! C64x "Tesla" DSP and the dual Cortex-M3 "Ducati" imaging subsystem (IPU).
//! Before the remoteproc core can load firmware into them, the platform has
//! to:
//!
//! - carve out contiguous memory at the fixed addresses their firmware is
//!   linked against ([`omap_rproc_reserve_cma`], early in boot);
//! - wrap each processor in a platform device bound to its hwmods and its
//!   IOMMU ([`omap_rproc_init`], at device init);
//! - sequence hard resets, clock gating and the processors' private timers
//!   whenever the remoteproc core starts or stops them ([`RprocOps`]).
//!
//! The hardware itself is reached through the interfaces in [`hal`], which
//! the SoC support crate implements.
//!
//! # Cargo features
//!
//! - `dsp`: support the Tesla DSP.
//! - `ipu`: support the Ducati IPU.
//! - `legacy-timer-id`: request timers by id when there is no device tree.
//!
//! All of them are enabled by default.

#![cfg_attr(not(test), no_std)]

#[macro_use]
extern crate log;
extern crate alloc;

#[macro_use]
mod error;

mod cma;
mod device;
pub mod hal;
mod pdata;
mod reset;
mod rproc;
mod timers;


pub mod config {
    //! Remote processor memory layout.
    //!
    //! Loaded from the file named by the `RPROC_CONFIG_PATH` environment
    //! variable, or from `rprocconfig.toml` next to this crate's manifest.
    axconfig_macros::include_configs!(path_env = "RPROC_CONFIG_PATH", fallback = "rprocconfig.toml");
}

use spin::Mutex;

pub use self::{
    cma::CmaRegion,
    device::{DevArchData, Device, IommuArchData, PlatformDevice},
    error::{RprocError, RprocResult, to_status},
    pdata::{
        ENABLED_RPROCS, MAX_RPROC_TIMERS, OMAP_RPROC_PDEV_NAME, RprocKind, RprocPdata, TimerCap,
        TimerSpec,
    },
    reset::{DSP_RESET, IPU_CPU0_RESET, IPU_CPU1_RESET, device_enable, device_shutdown},
    rproc::{OMAP4_RPROC_OPS, Omap4RprocOps, Omap4Rprocs, RemoteProc, RprocOps, RprocState},
    timers::{disable_timers, enable_timers},
};

static OMAP4_RPROCS: Mutex<Omap4Rprocs> = Mutex::new(Omap4Rprocs::new());

/// Reserves the remote processors' contiguous memory.
///
/// Call once from the board's early memory setup. Nothing is allocated, so
/// this may run before the heap is up.
pub fn omap_rproc_reserve_cma() {
    OMAP4_RPROCS.lock().reserve_cma();
}

/// Registers the remote processor platform devices.
///
/// Call at device init, after [`omap_rproc_reserve_cma`]. Devices that are
/// already registered are left alone.
pub fn omap_rproc_init() -> RprocResult {
    info!("Initialize OMAP4 remote processors...");
    OMAP4_RPROCS.lock().init()
}

/// Runs `f` on the remote processor of the given kind, if it is built in.
pub fn with_rproc<R>(kind: RprocKind, f: impl FnOnce(&mut RemoteProc) -> R) -> Option<R> {
    OMAP4_RPROCS.lock().get_mut(kind).map(f)
}

#[doc(hidden)]
pub mod __priv {
    pub use log::warn;
}
