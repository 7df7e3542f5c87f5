// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 KylinSoft Co., Ltd. <https://www.kylinos.cn/>
// See LICENSES for license details.

//! Early contiguous memory carve-outs for the remote processors.
//!
//! The bases are fixed until the remote processors' memory is handed out
//! through the IOMMU-aware DMA API.

use memory_addr::PhysAddr;

use crate::{config, device::Device, hal, pdata::RprocKind};

/// Where the carve-out of a remote processor lives.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct CmaRegion {
    pub base: PhysAddr,
    pub size: usize,
}

impl RprocKind {
    pub fn cma_region(self) -> CmaRegion {
        match self {
            RprocKind::Dsp => CmaRegion {
                base: PhysAddr::from(config::dsp::CMA_BASE),
                size: config::dsp::CMA_SIZE,
            },
            RprocKind::Ipu => CmaRegion {
                base: PhysAddr::from(config::ipu::CMA_BASE),
                size: config::ipu::CMA_SIZE,
            },
        }
    }
}

/// Declares the carve-out of `kind` on behalf of `dev`. Failures are logged
/// only; the remote processor will fail later when it is started.
pub(crate) fn reserve(kind: RprocKind, dev: &Device) {
    let region = kind.cma_region();
    debug!(
        "reserving {:#x} bytes at {:?} for {}",
        region.size,
        region.base,
        kind.as_str()
    );
    if let Err(e) =
        hal::dma_declare_contiguous(dev, region.size, region.base, PhysAddr::from(0))
    {
        error!("dma_declare_contiguous failed for {} {:?}", kind.as_str(), e);
    }
}
