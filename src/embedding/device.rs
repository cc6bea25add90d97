use candle_core::Device;
use tracing::{debug, info, warn};

use super::error::EmbeddingError;

type DeviceOpener = fn() -> candle_core::Result<Device>;

#[cfg(feature = "metal")]
fn open_metal() -> candle_core::Result<Device> {
    Device::new_metal(0)
}

#[cfg(feature = "cuda")]
fn open_cuda() -> candle_core::Result<Device> {
    Device::new_cuda(0)
}

/// Accelerator backends compiled into this build, in preference order.
fn compiled_backends() -> Vec<(&'static str, DeviceOpener)> {
    #[allow(unused_mut)]
    let mut backends: Vec<(&'static str, DeviceOpener)> = Vec::new();

    #[cfg(feature = "metal")]
    backends.push(("metal", open_metal as DeviceOpener));

    #[cfg(feature = "cuda")]
    backends.push(("cuda", open_cuda as DeviceOpener));

    backends
}

/// Picks the compute device for `component` (first working accelerator, else CPU).
///
/// Currently never returns `Err`; an unusable accelerator is logged and skipped.
pub fn select_device(component: &str) -> Result<Device, EmbeddingError> {
    let backends = compiled_backends();
    if backends.is_empty() {
        debug!(component, "No GPU features enabled, using CPU");
        return Ok(Device::Cpu);
    }

    let mut failures = Vec::with_capacity(backends.len());
    for (name, open) in backends {
        match open() {
            Ok(device) => {
                info!(component, backend = name, "Using GPU acceleration");
                return Ok(device);
            }
            Err(e) => {
                warn!(component, backend = name, error = %e, "GPU device unavailable");
                failures.push(format!("{name} failed: {e}"));
            }
        }
    }

    warn!(component, reason = %failures.join("; "), "Falling back to CPU device");
    Ok(Device::Cpu)
}
