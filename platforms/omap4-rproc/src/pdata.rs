// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 KylinSoft Co., Ltd. <https://www.kylinos.cn/>
// See LICENSES for license details.

//! Per remote processor platform data and the OMAP4 descriptor table.

use core::fmt;

use strum::{Display, IntoStaticStr};

use crate::{
    device::{IommuArchData, PlatformDevice},
    hal::{self, TimerHandle},
    rproc::RprocOps,
};

/// Name of the platform devices backing the remote processors.
pub const OMAP_RPROC_PDEV_NAME: &str = "omap-rproc";

/// The remote processors found on OMAP4.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, IntoStaticStr)]
#[strum(serialize_all = "lowercase")]
pub enum RprocKind {
    /// C64x "Tesla" DSP.
    Dsp,
    /// Dual Cortex-M3 "Ducati" imaging subsystem.
    Ipu,
}

static DSP_IOMMU: IommuArchData = IommuArchData { name: "mmu_dsp" };
static IPU_IOMMU: IommuArchData = IommuArchData { name: "mmu_ipu" };

impl RprocKind {
    /// Number of remote processors on the SoC.
    pub const COUNT: usize = 2;

    /// Platform device id; it is also the suffix of the device name.
    pub const fn pdev_id(self) -> i32 {
        match self {
            RprocKind::Dsp => 0,
            RprocKind::Ipu => 1,
        }
    }

    /// Identifies the remote processor behind `pdev`.
    pub fn from_pdev(pdev: &PlatformDevice) -> Option<Self> {
        if pdev.name != OMAP_RPROC_PDEV_NAME {
            return None;
        }
        match pdev.id {
            0 => Some(RprocKind::Dsp),
            1 => Some(RprocKind::Ipu),
            _ => None,
        }
    }

    /// Slot of this remote processor in the descriptor table.
    pub const fn index(self) -> usize {
        self.pdev_id() as usize
    }

    pub const fn iommu(self) -> &'static IommuArchData {
        match self {
            RprocKind::Dsp => &DSP_IOMMU,
            RprocKind::Ipu => &IPU_IOMMU,
        }
    }

    /// Short name used in log messages.
    pub fn as_str(self) -> &'static str {
        self.into()
    }
}

/// Interrupt routing a remote processor needs from its timer.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Display)]
pub enum TimerCap {
    /// The overflow interrupt is wired to the DSP.
    #[strum(to_string = "HAS_DSP_IRQ")]
    HasDspIrq,
    /// The overflow interrupt is wired to the IPU.
    #[strum(to_string = "HAS_IPU_IRQ")]
    HasIpuIrq,
}

/// Most timers a single remote processor can own.
pub const MAX_RPROC_TIMERS: usize = 2;

/// A timer a remote processor owns while it runs.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct TimerSpec {
    pub cap: TimerCap,
    /// Timer id for boots without a device tree.
    pub id: u32,
}

impl TimerSpec {
    pub const fn new(cap: TimerCap, id: u32) -> Self {
        Self { cap, id }
    }
}

const DSP_TIMERS: &[TimerSpec] = &[TimerSpec::new(TimerCap::HasDspIrq, 5)];
const IPU_TIMERS: &[TimerSpec] = &[TimerSpec::new(TimerCap::HasIpuIrq, 3)];

/// Platform data of one remote processor.
///
/// The callback slot [`ops`](Self::ops) is empty in the static table and is
/// filled in by [`Omap4Rprocs::init`](crate::Omap4Rprocs::init).
#[derive(Clone)]
pub struct RprocPdata {
    pub kind: RprocKind,
    pub name: &'static str,
    pub firmware: &'static str,
    pub mbox_name: &'static str,
    pub oh_name: &'static str,
    /// Secondary hwmod, for when both cores of a processor are driven
    /// through a single device.
    pub oh_name_opt: Option<&'static str>,
    /// Ordered by the capabilities the firmware expects. At most
    /// [`MAX_RPROC_TIMERS`] entries.
    pub timers: &'static [TimerSpec],
    /// Handle of each acquired timer, indexed like `timers`. Set between a
    /// successful acquire and the matching release.
    pub timer_handles: [Option<TimerHandle>; MAX_RPROC_TIMERS],
    pub set_bootaddr: Option<fn(u32)>,
    pub ops: Option<&'static dyn RprocOps>,
}

impl fmt::Debug for RprocPdata {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RprocPdata")
            .field("kind", &self.kind)
            .field("name", &self.name)
            .field("firmware", &self.firmware)
            .field("mbox_name", &self.mbox_name)
            .field("oh_name", &self.oh_name)
            .field("oh_name_opt", &self.oh_name_opt)
            .field("timers", &self.timers)
            .field("timer_handles", &self.timer_handles)
            .field("set_bootaddr", &self.set_bootaddr.is_some())
            .field("ops", &self.ops.is_some())
            .finish()
    }
}

impl RprocPdata {
    /// The static description of `kind`.
    pub const fn for_kind(kind: RprocKind) -> Self {
        match kind {
            RprocKind::Dsp => Self {
                kind,
                name: "dsp_c0",
                firmware: "tesla-dsp.xe64T",
                mbox_name: "mbox-dsp",
                oh_name: "dsp",
                oh_name_opt: None,
                timers: DSP_TIMERS,
                timer_handles: [None; MAX_RPROC_TIMERS],
                set_bootaddr: Some(hal::omap_ctrl_write_dsp_boot_addr),
                ops: None,
            },
            RprocKind::Ipu => Self {
                kind,
                name: "ipu_c0",
                firmware: "ducati-m3-core0.xem3",
                mbox_name: "mbox-ipu",
                oh_name: "ipu",
                oh_name_opt: None,
                timers: IPU_TIMERS,
                timer_handles: [None; MAX_RPROC_TIMERS],
                set_bootaddr: None,
                ops: None,
            },
        }
    }
}

/// Remote processors enabled at build time, in table order.
pub const ENABLED_RPROCS: &[RprocKind] = &[
    #[cfg(feature = "dsp")]
    RprocKind::Dsp,
    #[cfg(feature = "ipu")]
    RprocKind::Ipu,
];
