// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 KylinSoft Co., Ltd. <https://www.kylinos.cn/>
// See LICENSES for license details.

//! Hard reset and power sequencing of the remote processors.

use crate::{
    device::PlatformDevice,
    error::{RprocError, RprocResult},
    hal,
    pdata::RprocKind,
};

/// Hard reset line of the DSP.
pub const DSP_RESET: &str = "dsp";
/// Hard reset line of the first IPU core.
pub const IPU_CPU0_RESET: &str = "cpu0";
/// Hard reset line of the second IPU core.
pub const IPU_CPU1_RESET: &str = "cpu1";

fn rproc_kind(pdev: &PlatformDevice) -> RprocResult<RprocKind> {
    match RprocKind::from_pdev(pdev) {
        Some(kind) => Ok(kind),
        None => {
            error!("{}: unsupported remoteproc", pdev.dev_name());
            Err(RprocError::InvalidInput)
        }
    }
}

/// Releases the hard resets and ungates the device.
///
/// cpu1 leaves reset before cpu0, so cpu1 is already running by the time
/// cpu0 starts executing firmware and tries to synchronize with it.
pub fn device_enable(pdev: &PlatformDevice) -> RprocResult {
    match rproc_kind(pdev)? {
        RprocKind::Dsp => hal::omap_device_deassert_hardreset(pdev, DSP_RESET)?,
        RprocKind::Ipu => {
            hal::omap_device_deassert_hardreset(pdev, IPU_CPU1_RESET)?;
            hal::omap_device_deassert_hardreset(pdev, IPU_CPU0_RESET)?;
        }
    }
    hal::omap_device_enable(pdev)
}

/// Gates the device and puts its cores back in hard reset.
pub fn device_shutdown(pdev: &PlatformDevice) -> RprocResult {
    let kind = rproc_kind(pdev)?;
    hal::omap_device_idle(pdev)?;
    match kind {
        RprocKind::Dsp => hal::omap_device_assert_hardreset(pdev, DSP_RESET),
        RprocKind::Ipu => {
            hal::omap_device_assert_hardreset(pdev, IPU_CPU0_RESET)?;
            hal::omap_device_assert_hardreset(pdev, IPU_CPU1_RESET)
        }
    }
}
