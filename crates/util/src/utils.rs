use std::ffi::{c_char, CStr};

use ash::{vk, Entry, Instance};

use crate::SampleError;

/// Layer the samples enable to get their validation diagnostics.
pub const DEFAULT_VALIDATION_LAYER: &str = "VK_LAYER_KHRONOS_validation";

/// Converts a fixed-size, nul-terminated Vulkan name array into a `String`.
pub fn vk_to_str(raw: &[c_char]) -> String {
    let bytes: Vec<u8> = raw
        .iter()
        .take_while(|&&c| c != 0)
        .map(|&c| c as u8)
        .collect();

    String::from_utf8_lossy(&bytes).into_owned()
}

/// Resolves an instance-level entry point that is not statically linked,
/// failing with [`SampleError::MissingEntryPoint`] when the loader has no
/// address for it.
pub fn required_instance_proc_addr(
    entry: &Entry,
    instance: vk::Instance,
    name: &CStr,
) -> Result<unsafe extern "system" fn(), SampleError> {
    unsafe { entry.get_instance_proc_addr(instance, name.as_ptr()) }
        .ok_or_else(|| SampleError::MissingEntryPoint(name.to_string_lossy().into_owned()))
}

/// Device-level counterpart of [`required_instance_proc_addr`].
pub fn required_device_proc_addr(
    instance: &Instance,
    device: vk::Device,
    name: &CStr,
) -> Result<unsafe extern "system" fn(), SampleError> {
    unsafe { (instance.fp_v1_0().get_device_proc_addr)(device, name.as_ptr()) }
        .ok_or_else(|| SampleError::MissingEntryPoint(name.to_string_lossy().into_owned()))
}

#[cfg(test)]
pub(crate) fn name_array(name: &str) -> [c_char; vk::MAX_EXTENSION_NAME_SIZE] {
    let mut raw = [0 as c_char; vk::MAX_EXTENSION_NAME_SIZE];
    for (dst, src) in raw.iter_mut().zip(name.bytes()) {
        *dst = src as c_char;
    }
    raw
}
