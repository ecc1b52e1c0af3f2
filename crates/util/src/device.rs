use ash::{vk, Instance};
use tracing::info;

use crate::SampleError;

/// Calls `vkEnumeratePhysicalDevices` with a one-element output array on the
/// very first call, skipping the count query. Validation layers flag this
/// call sequence; the samples use it to provoke a diagnostic.
pub fn enumerate_physical_devices_without_count_query(instance: &Instance) -> vk::Result {
    let mut count = 1u32;
    let mut physical_device = vk::PhysicalDevice::null();

    unsafe {
        (instance.fp_v1_0().enumerate_physical_devices)(
            instance.handle(),
            &mut count,
            &mut physical_device,
        )
    }
}

/// Suitability score of a device, higher is better.
pub fn rate_device(props: &vk::PhysicalDeviceProperties) -> u32 {
    let mut score = 0;

    // big plus that it's a GPU
    if props.device_type == vk::PhysicalDeviceType::DISCRETE_GPU {
        score += 1000;
    }

    if props.device_type == vk::PhysicalDeviceType::INTEGRATED_GPU {
        score += 100;
    }

    score + props.limits.max_image_dimension2_d
}

pub fn select_physical_device(instance: &Instance) -> Result<vk::PhysicalDevice, SampleError> {
    let devices = unsafe { instance.enumerate_physical_devices()? };
    info!("Found {} devices with vulkan support", devices.len());

    devices
        .into_iter()
        .max_by_key(|device| rate_device(&unsafe { instance.get_physical_device_properties(*device) }))
        .ok_or(SampleError::NoPhysicalDevice)
}

/// Index of the first queue family with graphics support.
pub fn graphics_queue_family_index(families: &[vk::QueueFamilyProperties]) -> Option<u32> {
    families
        .iter()
        .position(|family| {
            family.queue_count > 0 && family.queue_flags.contains(vk::QueueFlags::GRAPHICS)
        })
        .map(|index| index as u32)
}
