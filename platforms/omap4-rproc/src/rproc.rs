// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 KylinSoft Co., Ltd. <https://www.kylinos.cn/>
// See LICENSES for license details.

//! Construction of the remote processor devices and the hooks the
//! remoteproc core drives them through.

use crate::{
    cma,
    device::{IommuArchData, PlatformDevice},
    error::{RprocError, RprocResult},
    hal::{self, HwmodHandle, OmapDeviceHandle},
    pdata::{OMAP_RPROC_PDEV_NAME, RprocKind, RprocPdata},
    reset, timers,
};

/// Platform hooks the remoteproc core calls on a remote processor.
///
/// `enable_timers` runs before `device_enable` when a processor is brought
/// up; `device_shutdown` runs before `disable_timers` when it goes down.
/// The core serializes calls per device.
pub trait RprocOps: Sync {
    fn device_enable(&self, pdev: &PlatformDevice) -> RprocResult;

    fn device_shutdown(&self, pdev: &PlatformDevice) -> RprocResult;

    fn enable_timers(&self, pdev: &mut PlatformDevice, configure: bool) -> RprocResult;

    fn disable_timers(&self, pdev: &mut PlatformDevice, configure: bool) -> RprocResult;
}

/// The OMAP4 implementation of [`RprocOps`].
pub struct Omap4RprocOps;

impl RprocOps for Omap4RprocOps {
    fn device_enable(&self, pdev: &PlatformDevice) -> RprocResult {
        reset::device_enable(pdev)
    }

    fn device_shutdown(&self, pdev: &PlatformDevice) -> RprocResult {
        reset::device_shutdown(pdev)
    }

    fn enable_timers(&self, pdev: &mut PlatformDevice, configure: bool) -> RprocResult {
        timers::enable_timers(pdev, configure)
    }

    fn disable_timers(&self, pdev: &mut PlatformDevice, configure: bool) -> RprocResult {
        timers::disable_timers(pdev, configure)
    }
}

pub static OMAP4_RPROC_OPS: Omap4RprocOps = Omap4RprocOps;

/// Run state of a remote processor as seen through [`RemoteProc`].
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum RprocState {
    Offline,
    Running,
    /// Stopped with its timers still held.
    Suspended,
}

/// Everything that belongs to one remote processor: its static description,
/// its IOMMU and the platform device built from both.
#[derive(Debug)]
pub struct RemoteProc {
    pub pdata: RprocPdata,
    pub iommu: &'static IommuArchData,
    pub pdev: PlatformDevice,
    od: Option<OmapDeviceHandle>,
    state: RprocState,
}

impl RemoteProc {
    pub const fn new(kind: RprocKind) -> Self {
        Self {
            pdata: RprocPdata::for_kind(kind),
            iommu: kind.iommu(),
            pdev: PlatformDevice::new(OMAP_RPROC_PDEV_NAME, kind.pdev_id()),
            od: None,
            state: RprocState::Offline,
        }
    }

    pub fn kind(&self) -> RprocKind {
        self.pdata.kind
    }

    pub fn state(&self) -> RprocState {
        self.state
    }

    pub fn is_registered(&self) -> bool {
        self.pdev.dev.is_registered()
    }

    pub fn omap_device(&self) -> Option<OmapDeviceHandle> {
        self.od
    }

    /// Hooks installed on the registered device.
    fn ops(&self) -> RprocResult<&'static dyn RprocOps> {
        if !self.is_registered() {
            rproc_bail!(NoSuchDevice, self.pdata.name);
        }
        match self.pdev.platform_data().and_then(|pdata| pdata.ops) {
            Some(ops) => Ok(ops),
            None => rproc_err!(BadState, "no hooks installed"),
        }
    }

    /// Brings the processor out of reset with its timers running.
    pub fn start(&mut self) -> RprocResult {
        ensure!(
            self.state == RprocState::Offline,
            rproc_err!(BadState, "remote processor not offline")
        );
        let ops = self.ops()?;
        ops.enable_timers(&mut self.pdev, true)?;
        if let Err(e) = ops.device_enable(&self.pdev) {
            error!("{}: failed to enable: {:?}", self.pdev.dev_name(), e);
            ops.disable_timers(&mut self.pdev, true)?;
            return Err(e);
        }
        info!("{}: {} is up", self.pdev.dev_name(), self.pdata.name);
        self.state = RprocState::Running;
        Ok(())
    }

    /// Puts the processor back in reset and releases its timers.
    pub fn stop(&mut self) -> RprocResult {
        let ops = self.ops()?;
        match self.state {
            RprocState::Offline => {
                rproc_bail!(BadState, "remote processor already offline");
            }
            RprocState::Running => ops.device_shutdown(&self.pdev)?,
            RprocState::Suspended => {}
        }
        ops.disable_timers(&mut self.pdev, true)?;
        info!("{}: {} is down", self.pdev.dev_name(), self.pdata.name);
        self.state = RprocState::Offline;
        Ok(())
    }

    /// Like [`stop`](Self::stop), but keeps the timers for [`resume`](Self::resume).
    pub fn suspend(&mut self) -> RprocResult {
        ensure!(
            self.state == RprocState::Running,
            rproc_err!(BadState, "remote processor not running")
        );
        let ops = self.ops()?;
        ops.device_shutdown(&self.pdev)?;
        ops.disable_timers(&mut self.pdev, false)?;
        self.state = RprocState::Suspended;
        Ok(())
    }

    pub fn resume(&mut self) -> RprocResult {
        ensure!(
            self.state == RprocState::Suspended,
            rproc_err!(BadState, "remote processor not suspended")
        );
        let ops = self.ops()?;
        ops.enable_timers(&mut self.pdev, false)?;
        if let Err(e) = ops.device_enable(&self.pdev) {
            ops.disable_timers(&mut self.pdev, false)?;
            return Err(e);
        }
        self.state = RprocState::Running;
        Ok(())
    }

    /// Programs the boot vector, for processors that have a hook for it.
    /// Returns whether the hook exists.
    pub fn set_boot_address(&self, addr: u32) -> bool {
        match self.pdata.set_bootaddr {
            Some(set_bootaddr) => {
                set_bootaddr(addr);
                true
            }
            None => false,
        }
    }

    /// Builds and registers the platform device, rolling back on failure.
    fn construct(&mut self) -> RprocResult {
        let mut oh = [HwmodHandle::new(0); 2];
        let mut oh_count = 0;

        let Some(handle) = hal::hwmod_lookup(self.pdata.oh_name) else {
            error!("could not look up {}", self.pdata.oh_name);
            return Err(RprocError::NotFound);
        };
        oh[oh_count] = handle;
        oh_count += 1;

        if let Some(oh_name_opt) = self.pdata.oh_name_opt {
            let Some(handle) = hal::hwmod_lookup(oh_name_opt) else {
                error!("could not look up {}", oh_name_opt);
                return Err(RprocError::NotFound);
            };
            oh[oh_count] = handle;
            oh_count += 1;
        }

        self.pdata.ops = Some(&OMAP4_RPROC_OPS);

        let pdev = &mut self.pdev;
        pdev.dev.initialize();
        // Named before the alloc so that its diagnostics carry the name.
        pdev.dev.set_name(pdev.bus_name());

        let Some(od) = hal::omap_device_alloc(pdev, &oh[..oh_count]) else {
            error!("{}: omap_device_alloc failed", pdev.dev_name());
            pdev.dev.put();
            return Err(RprocError::NoMemory);
        };

        if let Err(e) = hal::platform_device_add_data(pdev, &self.pdata) {
            error!("{}: can't add pdata", pdev.dev_name());
            hal::omap_device_delete(od);
            pdev.dev.put();
            return Err(e);
        }

        pdev.dev.archdata.iommu = Some(self.iommu);

        if let Err(e) = hal::omap_device_register(pdev) {
            error!("{}: omap_device_register failed", pdev.dev_name());
            hal::omap_device_delete(od);
            pdev.dev.put();
            return Err(e);
        }
        pdev.dev.mark_registered();
        self.od = Some(od);
        info!(
            "{}: registered {} behind {}",
            pdev.dev_name(),
            self.pdata.name,
            self.iommu.name
        );
        Ok(())
    }
}

/// The remote processors of the board, in descriptor table order.
///
/// The table is built at compile time and holds no heap memory until
/// [`init`](Self::init) names the devices, so it can back
/// [`reserve_cma`](Self::reserve_cma) before any allocator is up.
#[derive(Debug)]
pub struct Omap4Rprocs {
    slots: [Option<RemoteProc>; RprocKind::COUNT],
}

impl Default for Omap4Rprocs {
    fn default() -> Self {
        Self::new()
    }
}

impl Omap4Rprocs {
    /// Builds the records of the remote processors enabled at build time.
    /// No hardware is touched.
    pub const fn new() -> Self {
        Self {
            slots: [
                if cfg!(feature = "dsp") {
                    Some(RemoteProc::new(RprocKind::Dsp))
                } else {
                    None
                },
                if cfg!(feature = "ipu") {
                    Some(RemoteProc::new(RprocKind::Ipu))
                } else {
                    None
                },
            ],
        }
    }

    pub fn with_kinds(kinds: &[RprocKind]) -> Self {
        let mut slots = [None, None];
        for &kind in kinds {
            slots[kind.index()] = Some(RemoteProc::new(kind));
        }
        Self { slots }
    }

    /// Reserves the contiguous memory of every remote processor.
    ///
    /// Must run once during early memory setup, before the DMA contiguous
    /// allocator comes up. A failed reservation does not stop the others.
    pub fn reserve_cma(&self) {
        for rproc in self.iter() {
            cma::reserve(rproc.kind(), &rproc.pdev.dev);
        }
    }

    /// Builds and registers a platform device for every remote processor.
    ///
    /// A failing remote processor is skipped without affecting the others.
    /// Returns the last failure recorded by device allocation, platform data
    /// or registration; hwmod lookup misses are only logged.
    pub fn init(&mut self) -> RprocResult {
        // names like ipu_cx/dsp_cx might show up on other OMAPs, too
        if !hal::is_omap44xx() {
            return Ok(());
        }

        let mut ret = Ok(());
        for rproc in self.slots.iter_mut().flatten() {
            if rproc.is_registered() {
                debug!("{}: already registered", rproc.pdev.dev_name());
                continue;
            }
            match rproc.construct() {
                Ok(()) | Err(RprocError::NotFound) => {}
                Err(e) => ret = Err(e),
            }
        }
        ret
    }

    pub fn get(&self, kind: RprocKind) -> Option<&RemoteProc> {
        self.slots[kind.index()].as_ref()
    }

    pub fn get_mut(&mut self, kind: RprocKind) -> Option<&mut RemoteProc> {
        self.slots[kind.index()].as_mut()
    }

    pub fn iter(&self) -> impl Iterator<Item = &RemoteProc> {
        self.slots.iter().flatten()
    }

    /// Remote processors whose platform device made it onto the bus.
    pub fn registered(&self) -> impl Iterator<Item = &RemoteProc> {
        self.iter().filter(|r| r.is_registered())
    }

    pub fn len(&self) -> usize {
        self.iter().count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
