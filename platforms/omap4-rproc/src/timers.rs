// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 KylinSoft Co., Ltd. <https://www.kylinos.cn/>
// See LICENSES for license details.

//! Dual-mode timers owned by the remote processors.
//!
//! A remote processor needs a timer whose overflow interrupt is routed to
//! itself rather than to the host, so timers are requested by capability.
//! The request-by-id path only exists for boots without a device tree.

use crate::{
    device::PlatformDevice,
    error::{RprocError, RprocResult},
    hal::{self, TimerHandle, TimerSource},
    pdata::{MAX_RPROC_TIMERS, TimerSpec},
};

fn request(spec: &TimerSpec) -> Option<TimerHandle> {
    if cfg!(not(feature = "legacy-timer-id")) || hal::have_populated_dt() {
        hal::dmtimer_request_by_cap(spec.cap)
    } else {
        hal::dmtimer_request_specific(spec.id)
    }
}

/// Frees every held timer in `handles`, last acquired first.
fn release_all(handles: &mut [Option<TimerHandle>]) {
    for handle in handles.iter_mut().rev() {
        if let Some(timer) = handle.take() {
            hal::dmtimer_free(timer);
        }
    }
}

/// Starts the timers of `pdev`, acquiring them first if `configure` is set.
///
/// If any acquisition fails, the timers acquired so far are released again
/// and nothing is started.
pub fn enable_timers(pdev: &mut PlatformDevice, configure: bool) -> RprocResult {
    let dev = &mut pdev.dev;
    let dev_name = dev.name.as_deref().unwrap_or("");
    let Some(pdata) = dev.platform_data.as_mut() else {
        rproc_bail!(InvalidInput, "no platform data");
    };
    let timers = pdata.timers;
    ensure!(!timers.is_empty(), rproc_err!(InvalidInput, "no timers"));
    ensure!(
        timers.len() <= MAX_RPROC_TIMERS,
        rproc_err!(InvalidInput, "too many timers")
    );
    let handles = &mut pdata.timer_handles[..timers.len()];

    if configure {
        ensure!(
            handles.iter().all(Option::is_none),
            rproc_err!(BadState, "timers already acquired")
        );
        for (i, spec) in timers.iter().enumerate() {
            let Some(timer) = request(spec) else {
                let err = RprocError::ResourceBusy;
                error!(
                    "{}: request for timer {} ({}) failed: {}",
                    dev_name, spec.id, spec.cap, err
                );
                release_all(&mut handles[..i]);
                return Err(err);
            };
            handles[i] = Some(timer);
            if let Err(e) = hal::dmtimer_set_source(timer, TimerSource::SysClk) {
                warn!(
                    "{}: timer {} keeps its clock source: {}",
                    dev_name, spec.id, e
                );
            }
        }
    } else {
        ensure!(
            handles.iter().all(Option::is_some),
            rproc_err!(BadState, "timers not acquired")
        );
    }

    for &timer in handles.iter().flatten() {
        hal::dmtimer_start(timer);
    }
    Ok(())
}

/// Stops the timers of `pdev`, releasing them as well if `configure` is set.
pub fn disable_timers(pdev: &mut PlatformDevice, configure: bool) -> RprocResult {
    let Some(pdata) = pdev.dev.platform_data.as_mut() else {
        rproc_bail!(InvalidInput, "no platform data");
    };
    for (spec, handle) in pdata.timers.iter().zip(pdata.timer_handles.iter_mut()) {
        let Some(timer) = *handle else {
            debug!("timer {} is not held", spec.id);
            continue;
        };
        hal::dmtimer_stop(timer);
        if configure {
            hal::dmtimer_free(timer);
            *handle = None;
        }
    }
    Ok(())
}
