// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 KylinSoft Co., Ltd. <https://www.kylinos.cn/>
// See LICENSES for license details.

//! Interfaces this crate consumes from the rest of the OMAP platform code.
//!
//! Each collaborator is a [`crate_interface`] trait. The SoC support crate
//! implements them once with [`impl_interface`](crate_interface::impl_interface);
//! everything in this crate goes through the thin wrappers below.

use crate_interface::{call_interface, def_interface};
use memory_addr::PhysAddr;

use crate::{
    device::{Device, PlatformDevice},
    error::RprocResult,
    pdata::{RprocPdata, TimerCap},
};

/// Opaque reference to a hardware module record.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub struct HwmodHandle(usize);

/// Opaque reference to an allocated omap device wrapper.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub struct OmapDeviceHandle(usize);

/// Opaque reference to an acquired dual-mode timer.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub struct TimerHandle(usize);

macro_rules! impl_handle {
    ($($ty:ident),*) => {
        $(
            impl $ty {
                /// Wraps a raw collaborator-defined value.
                pub const fn new(raw: usize) -> Self {
                    Self(raw)
                }

                /// Returns the raw collaborator-defined value.
                pub const fn raw(self) -> usize {
                    self.0
                }
            }
        )*
    };
}

impl_handle!(HwmodHandle, OmapDeviceHandle, TimerHandle);

/// Functional clock feeding a dual-mode timer.
///
/// Remote processor timers always run from [`SysClk`](Self::SysClk); the
/// other sources are what the dmtimer driver can also be handed by the rest
/// of the platform, so its implementation has to accept them.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum TimerSource {
    /// System clock.
    SysClk,
    /// 32 kHz always-on clock.
    Clk32k,
    /// External clock input.
    ExtClk,
}

/// SoC identification and boot environment.
#[def_interface]
pub trait SocIf {
    /// Whether the running SoC belongs to the OMAP44xx family.
    fn is_omap44xx() -> bool;

    /// Whether the kernel was booted with a populated device tree.
    fn have_populated_dt() -> bool;
}

/// Hardware module database.
#[def_interface]
pub trait HwmodIf {
    fn lookup(name: &str) -> Option<HwmodHandle>;
}

/// The omap device layer: wraps platform devices around hwmods and drives
/// their power, clock and reset lines.
#[def_interface]
pub trait OmapDeviceIf {
    /// Allocates the omap device wrapper for `pdev` over `ohs`.
    fn alloc(pdev: &PlatformDevice, ohs: &[HwmodHandle]) -> Option<OmapDeviceHandle>;

    fn delete(od: OmapDeviceHandle);

    /// Attaches a copy of `pdata` as the platform data of `pdev`.
    fn add_data(pdev: &mut PlatformDevice, pdata: &RprocPdata) -> RprocResult;

    fn register(pdev: &PlatformDevice) -> RprocResult;

    fn enable(pdev: &PlatformDevice) -> RprocResult;

    fn idle(pdev: &PlatformDevice) -> RprocResult;

    fn assert_hardreset(pdev: &PlatformDevice, line: &str) -> RprocResult;

    fn deassert_hardreset(pdev: &PlatformDevice, line: &str) -> RprocResult;
}

/// The dual-mode timer driver.
#[def_interface]
pub trait DmTimerIf {
    /// Requests any free timer whose interrupt routing matches `cap`.
    fn request_by_cap(cap: TimerCap) -> Option<TimerHandle>;

    /// Requests the timer with the given legacy id.
    fn request_specific(id: u32) -> Option<TimerHandle>;

    fn free(timer: TimerHandle);

    fn set_source(timer: TimerHandle, source: TimerSource) -> RprocResult;

    fn start(timer: TimerHandle);

    fn stop(timer: TimerHandle);
}

/// The DMA contiguous memory allocator.
#[def_interface]
pub trait CmaIf {
    /// Reserves `size` bytes at `base` for DMA allocations made on behalf of
    /// `dev`. A zero `limit` means no upper bound.
    fn declare_contiguous(
        dev: &Device,
        size: usize,
        base: PhysAddr,
        limit: PhysAddr,
    ) -> RprocResult;
}

/// SoC control module register accessors.
#[def_interface]
pub trait ControlIf {
    fn write_dsp_boot_addr(addr: u32);
}

pub(crate) fn is_omap44xx() -> bool {
    call_interface!(SocIf::is_omap44xx())
}

pub(crate) fn have_populated_dt() -> bool {
    call_interface!(SocIf::have_populated_dt())
}

pub(crate) fn hwmod_lookup(name: &str) -> Option<HwmodHandle> {
    call_interface!(HwmodIf::lookup(name))
}

pub(crate) fn omap_device_alloc(
    pdev: &PlatformDevice,
    ohs: &[HwmodHandle],
) -> Option<OmapDeviceHandle> {
    call_interface!(OmapDeviceIf::alloc(pdev, ohs))
}

pub(crate) fn omap_device_delete(od: OmapDeviceHandle) {
    call_interface!(OmapDeviceIf::delete(od))
}

pub(crate) fn platform_device_add_data(
    pdev: &mut PlatformDevice,
    pdata: &RprocPdata,
) -> RprocResult {
    call_interface!(OmapDeviceIf::add_data(pdev, pdata))
}

pub(crate) fn omap_device_register(pdev: &PlatformDevice) -> RprocResult {
    call_interface!(OmapDeviceIf::register(pdev))
}

pub(crate) fn omap_device_enable(pdev: &PlatformDevice) -> RprocResult {
    call_interface!(OmapDeviceIf::enable(pdev))
}

pub(crate) fn omap_device_idle(pdev: &PlatformDevice) -> RprocResult {
    call_interface!(OmapDeviceIf::idle(pdev))
}

pub(crate) fn omap_device_assert_hardreset(pdev: &PlatformDevice, line: &str) -> RprocResult {
    call_interface!(OmapDeviceIf::assert_hardreset(pdev, line))
}

pub(crate) fn omap_device_deassert_hardreset(pdev: &PlatformDevice, line: &str) -> RprocResult {
    call_interface!(OmapDeviceIf::deassert_hardreset(pdev, line))
}

pub(crate) fn dmtimer_request_by_cap(cap: TimerCap) -> Option<TimerHandle> {
    call_interface!(DmTimerIf::request_by_cap(cap))
}

pub(crate) fn dmtimer_request_specific(id: u32) -> Option<TimerHandle> {
    call_interface!(DmTimerIf::request_specific(id))
}

pub(crate) fn dmtimer_free(timer: TimerHandle) {
    call_interface!(DmTimerIf::free(timer))
}

pub(crate) fn dmtimer_set_source(timer: TimerHandle, source: TimerSource) -> RprocResult {
    call_interface!(DmTimerIf::set_source(timer, source))
}

pub(crate) fn dmtimer_start(timer: TimerHandle) {
    call_interface!(DmTimerIf::start(timer))
}

pub(crate) fn dmtimer_stop(timer: TimerHandle) {
    call_interface!(DmTimerIf::stop(timer))
}

pub(crate) fn dma_declare_contiguous(
    dev: &Device,
    size: usize,
    base: PhysAddr,
    limit: PhysAddr,
) -> RprocResult {
    call_interface!(CmaIf::declare_contiguous(dev, size, base, limit))
}

/// Writes the DSP boot vector. Installed as the DSP's
/// [`RprocPdata::set_bootaddr`].
pub fn omap_ctrl_write_dsp_boot_addr(addr: u32) {
    call_interface!(ControlIf::write_dsp_boot_addr(addr))
}
