// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 KylinSoft Co., Ltd. <https://www.kylinos.cn/>
// See LICENSES for license details.

//! Platform device records handed to the omap device layer.

use alloc::{format, string::String};

use crate::pdata::RprocPdata;

/// IOMMU instance a remote processor sits behind.
#[derive(Debug, Eq, PartialEq)]
pub struct IommuArchData {
    pub name: &'static str,
}

/// Architecture-specific device data.
#[derive(Debug, Default)]
pub struct DevArchData {
    /// Set before registration so the IOMMU driver can attach the device.
    pub iommu: Option<&'static IommuArchData>,
}

/// Generic device record embedded in a [`PlatformDevice`].
#[derive(Debug, Default)]
pub struct Device {
    pub(crate) name: Option<String>,
    refs: usize,
    registered: bool,
    pub platform_data: Option<RprocPdata>,
    pub archdata: DevArchData,
}

impl Device {
    /// Prepares the record for use and takes the initial reference.
    pub fn initialize(&mut self) {
        self.refs = 1;
        self.registered = false;
    }

    pub fn set_name(&mut self, name: String) {
        self.name = Some(name);
    }

    /// The device name, or an empty string before one is set.
    pub fn name(&self) -> &str {
        self.name.as_deref().unwrap_or("")
    }

    /// Drops a reference. Dropping the last reference of a device that never
    /// made it onto the bus releases its name and platform data.
    pub fn put(&mut self) {
        self.refs = self.refs.saturating_sub(1);
        if self.refs == 0 && !self.registered {
            debug!("releasing device {}", self.name());
            self.name = None;
            self.platform_data = None;
            self.archdata.iommu = None;
        }
    }

    pub fn ref_count(&self) -> usize {
        self.refs
    }

    pub fn is_registered(&self) -> bool {
        self.registered
    }

    pub(crate) fn mark_registered(&mut self) {
        self.registered = true;
    }
}

/// A device on the platform bus.
#[derive(Debug)]
pub struct PlatformDevice {
    pub name: &'static str,
    pub id: i32,
    pub dev: Device,
}

impl PlatformDevice {
    pub const fn new(name: &'static str, id: i32) -> Self {
        Self {
            name,
            id,
            dev: Device {
                name: None,
                refs: 0,
                registered: false,
                platform_data: None,
                archdata: DevArchData { iommu: None },
            },
        }
    }

    /// The bus name of the device, `<name>.<id>`.
    pub fn bus_name(&self) -> String {
        format!("{}.{}", self.name, self.id)
    }

    /// Shorthand for `self.dev.name()`.
    pub fn dev_name(&self) -> &str {
        self.dev.name()
    }

    pub fn platform_data(&self) -> Option<&RprocPdata> {
        self.dev.platform_data.as_ref()
    }
}
