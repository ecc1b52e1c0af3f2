//! Window-system-integration entry points of the loader.
//!
//! Surface and swapchain functions are only handed out once the extension
//! that owns them has been enabled; every other name is forwarded straight to
//! the Vulkan loader.

use std::ffi::{CStr, CString};

use ash::{
    extensions::khr::{Surface, Swapchain},
    prelude::VkResult,
    vk, Device, Entry, Instance,
};
use tracing::{debug, trace};

const SURFACE_ENTRY_POINTS: [&CStr; 5] = [
    c"vkDestroySurfaceKHR",
    c"vkGetPhysicalDeviceSurfaceSupportKHR",
    c"vkGetPhysicalDeviceSurfaceCapabilitiesKHR",
    c"vkGetPhysicalDeviceSurfaceFormatsKHR",
    c"vkGetPhysicalDeviceSurfacePresentModesKHR",
];

const SWAPCHAIN_ENTRY_POINTS: [&CStr; 5] = [
    c"vkCreateSwapchainKHR",
    c"vkDestroySwapchainKHR",
    c"vkGetSwapchainImagesKHR",
    c"vkAcquireNextImageKHR",
    c"vkQueuePresentKHR",
];

pub fn is_wsi_instance_entry_point(name: &CStr) -> bool {
    SURFACE_ENTRY_POINTS.iter().any(|&e| e == name)
}

pub fn is_wsi_device_entry_point(name: &CStr) -> bool {
    SWAPCHAIN_ENTRY_POINTS.iter().any(|&e| e == name)
}

/// The WSI extension providing `name`, if it is a WSI entry point at all.
pub fn wsi_extension_for(name: &CStr) -> Option<&'static CStr> {
    if is_wsi_instance_entry_point(name) {
        Some(Surface::name())
    } else if is_wsi_device_entry_point(name) {
        Some(Swapchain::name())
    } else {
        None
    }
}

pub struct WsiLoader {
    entry: Entry,
    instance: Instance,
    enabled_extensions: Vec<CString>,
}

impl WsiLoader {
    /// `enabled_extensions` lists the instance and device extensions the
    /// application enabled.
    pub fn new(entry: &Entry, instance: &Instance, enabled_extensions: &[&CStr]) -> Self {
        Self {
            entry: entry.clone(),
            instance: instance.clone(),
            enabled_extensions: enabled_extensions.iter().map(|&e| e.to_owned()).collect(),
        }
    }

    pub fn is_enabled(&self, extension: &CStr) -> bool {
        self.enabled_extensions
            .iter()
            .any(|enabled| enabled.as_c_str() == extension)
    }

    fn allows(&self, name: &CStr) -> bool {
        match wsi_extension_for(name) {
            Some(extension) if !self.is_enabled(extension) => {
                debug!(
                    "{} requested but {} is not enabled",
                    name.to_string_lossy(),
                    extension.to_string_lossy()
                );
                false
            }
            _ => true,
        }
    }

    pub fn get_instance_proc_addr(&self, name: &CStr) -> vk::PFN_vkVoidFunction {
        if !self.allows(name) {
            return None;
        }

        trace!("resolving {}", name.to_string_lossy());
        unsafe {
            self.entry
                .get_instance_proc_addr(self.instance.handle(), name.as_ptr())
        }
    }

    pub fn get_device_proc_addr(&self, device: vk::Device, name: &CStr) -> vk::PFN_vkVoidFunction {
        if !self.allows(name) {
            return None;
        }

        trace!("resolving {}", name.to_string_lossy());
        unsafe { (self.instance.fp_v1_0().get_device_proc_addr)(device, name.as_ptr()) }
    }

    /// Creates a swapchain on `device`.
    ///
    /// Fails with `VK_ERROR_EXTENSION_NOT_PRESENT` unless `VK_KHR_swapchain`
    /// was enabled.
    pub fn create_swapchain(
        &self,
        device: &Device,
        create_info: &vk::SwapchainCreateInfoKHR,
    ) -> VkResult<vk::SwapchainKHR> {
        if !self.is_enabled(Swapchain::name()) {
            return Err(vk::Result::ERROR_EXTENSION_NOT_PRESENT);
        }

        let loader = Swapchain::new(&self.instance, device);
        let swapchain = unsafe { loader.create_swapchain(create_info, None)? };
        debug!(
            min_image_count = create_info.min_image_count,
            "created swapchain"
        );

        Ok(swapchain)
    }
}
