//! An in-process stand-in for the Vulkan loader, driven through
//! `Entry::from_static_fn`. It advertises a configurable set of extensions
//! and layers, hands out a fake instance, and calls the registered debug
//! report callback when physical devices are enumerated into a caller
//! supplied array without a prior count query.

#![allow(dead_code)]

use std::{
    cell::RefCell,
    ffi::{c_char, c_void, CStr},
    mem, ptr,
};

use ash::{
    vk::{self, Handle},
    Entry,
};

pub const FAKE_INSTANCE: u64 = 0x1000;
pub const FAKE_CALLBACK: u64 = 0x2000;

pub struct FakeLoader {
    pub extensions: Vec<&'static str>,
    pub layers: Vec<&'static str>,
    /// Whether the debug report entry points resolve
    pub debug_report: bool,
    /// Whether the invalid enumeration gets reported to the callback
    pub report_misuse: bool,
    pub create_instance_result: vk::Result,

    pub create_instance_calls: u32,
    pub destroy_instance_calls: u32,
    pub created_callbacks: u32,
    pub destroyed_callbacks: u32,
    pub enabled_extensions: Vec<String>,
    pub enabled_layers: Vec<String>,

    pub(crate) callback: vk::PFN_vkDebugReportCallbackEXT,
    pub(crate) user_data: *mut c_void,
}

impl Default for FakeLoader {
    fn default() -> Self {
        Self {
            extensions: vec!["VK_KHR_surface", "VK_EXT_debug_report"],
            layers: vec!["VK_LAYER_KHRONOS_validation"],
            debug_report: true,
            report_misuse: true,
            create_instance_result: vk::Result::SUCCESS,
            create_instance_calls: 0,
            destroy_instance_calls: 0,
            created_callbacks: 0,
            destroyed_callbacks: 0,
            enabled_extensions: Vec::new(),
            enabled_layers: Vec::new(),
            callback: None,
            user_data: ptr::null_mut(),
        }
    }
}

thread_local! {
    static FAKE: RefCell<FakeLoader> = RefCell::new(FakeLoader::default());
}

/// Installs `fake` for the current thread and returns an entry backed by it.
pub fn install(fake: FakeLoader) -> Entry {
    FAKE.with(|state| *state.borrow_mut() = fake);

    unsafe {
        Entry::from_static_fn(vk::StaticFn {
            get_instance_proc_addr,
        })
    }
}

/// Reads the state recorded by the fake loader on this thread.
pub fn inspect<R>(f: impl FnOnce(&FakeLoader) -> R) -> R {
    FAKE.with(|state| f(&state.borrow()))
}

fn name_array(name: &str) -> [c_char; vk::MAX_EXTENSION_NAME_SIZE] {
    let mut raw = [0 as c_char; vk::MAX_EXTENSION_NAME_SIZE];
    for (dst, src) in raw.iter_mut().zip(name.bytes()) {
        *dst = src as c_char;
    }
    raw
}

unsafe fn names(raw: *const *const c_char, count: u32) -> Vec<String> {
    (0..count as usize)
        .map(|i| CStr::from_ptr(*raw.add(i)).to_string_lossy().into_owned())
        .collect()
}

/// Two-call enumeration: a null output reports the count, otherwise up to
/// `*count` items are copied and `VK_INCOMPLETE` signals truncation.
unsafe fn fill<T: Copy>(items: &[T], count: *mut u32, out: *mut T) -> vk::Result {
    if out.is_null() {
        *count = items.len() as u32;
        return vk::Result::SUCCESS;
    }

    let written = (*count as usize).min(items.len());
    ptr::copy_nonoverlapping(items.as_ptr(), out, written);
    *count = written as u32;

    if written < items.len() {
        vk::Result::INCOMPLETE
    } else {
        vk::Result::SUCCESS
    }
}

unsafe extern "system" fn enumerate_instance_extension_properties(
    _p_layer_name: *const c_char,
    p_property_count: *mut u32,
    p_properties: *mut vk::ExtensionProperties,
) -> vk::Result {
    let extensions: Vec<vk::ExtensionProperties> = inspect(|fake| {
        fake.extensions
            .iter()
            .map(|name| vk::ExtensionProperties {
                extension_name: name_array(name),
                spec_version: 1,
            })
            .collect()
    });

    fill(&extensions, p_property_count, p_properties)
}

unsafe extern "system" fn enumerate_instance_layer_properties(
    p_property_count: *mut u32,
    p_properties: *mut vk::LayerProperties,
) -> vk::Result {
    let layers: Vec<vk::LayerProperties> = inspect(|fake| {
        fake.layers
            .iter()
            .map(|name| vk::LayerProperties {
                layer_name: name_array(name),
                spec_version: vk::API_VERSION_1_0,
                implementation_version: 1,
                description: name_array("fake layer"),
            })
            .collect()
    });

    fill(&layers, p_property_count, p_properties)
}

unsafe extern "system" fn create_instance(
    p_create_info: *const vk::InstanceCreateInfo,
    _p_allocator: *const vk::AllocationCallbacks,
    p_instance: *mut vk::Instance,
) -> vk::Result {
    let info = &*p_create_info;
    let extensions = names(info.pp_enabled_extension_names, info.enabled_extension_count);
    let layers = names(info.pp_enabled_layer_names, info.enabled_layer_count);

    let result = FAKE.with(|state| {
        let mut fake = state.borrow_mut();
        fake.create_instance_calls += 1;
        fake.enabled_extensions = extensions;
        fake.enabled_layers = layers;
        fake.create_instance_result
    });

    if result == vk::Result::SUCCESS {
        *p_instance = vk::Instance::from_raw(FAKE_INSTANCE);
    }
    result
}

unsafe extern "system" fn destroy_instance(
    _instance: vk::Instance,
    _p_allocator: *const vk::AllocationCallbacks,
) {
    FAKE.with(|state| state.borrow_mut().destroy_instance_calls += 1);
}

unsafe extern "system" fn create_debug_report_callback(
    _instance: vk::Instance,
    p_create_info: *const vk::DebugReportCallbackCreateInfoEXT,
    _p_allocator: *const vk::AllocationCallbacks,
    p_callback: *mut vk::DebugReportCallbackEXT,
) -> vk::Result {
    let info = &*p_create_info;

    FAKE.with(|state| {
        let mut fake = state.borrow_mut();
        fake.created_callbacks += 1;
        fake.callback = info.pfn_callback;
        fake.user_data = info.p_user_data;
    });

    *p_callback = vk::DebugReportCallbackEXT::from_raw(FAKE_CALLBACK);
    vk::Result::SUCCESS
}

unsafe extern "system" fn destroy_debug_report_callback(
    _instance: vk::Instance,
    _callback: vk::DebugReportCallbackEXT,
    _p_allocator: *const vk::AllocationCallbacks,
) {
    FAKE.with(|state| {
        let mut fake = state.borrow_mut();
        fake.destroyed_callbacks += 1;
        fake.callback = None;
        fake.user_data = ptr::null_mut();
    });
}

unsafe extern "system" fn enumerate_physical_devices(
    _instance: vk::Instance,
    p_physical_device_count: *mut u32,
    p_physical_devices: *mut vk::PhysicalDevice,
) -> vk::Result {
    let (report, callback, user_data) =
        inspect(|fake| (fake.report_misuse, fake.callback, fake.user_data));

    if report && !p_physical_devices.is_null() {
        if let Some(callback) = callback {
            callback(
                vk::DebugReportFlagsEXT::ERROR,
                vk::DebugReportObjectTypeEXT::INSTANCE,
                FAKE_INSTANCE,
                0,
                2,
                c"DL".as_ptr(),
                c"Invalid call sequence to vkEnumeratePhysicalDevices()".as_ptr(),
                user_data,
            );
        }
    }

    *p_physical_device_count = 0;
    vk::Result::SUCCESS
}

macro_rules! entry_point {
    ($f:expr, $pfn:ty) => {
        Some(mem::transmute::<$pfn, unsafe extern "system" fn()>($f))
    };
}

unsafe extern "system" fn get_instance_proc_addr(
    _instance: vk::Instance,
    p_name: *const c_char,
) -> vk::PFN_vkVoidFunction {
    let debug_report = inspect(|fake| fake.debug_report);

    match CStr::from_ptr(p_name).to_bytes() {
        b"vkEnumerateInstanceExtensionProperties" => entry_point!(
            enumerate_instance_extension_properties,
            vk::PFN_vkEnumerateInstanceExtensionProperties
        ),
        b"vkEnumerateInstanceLayerProperties" => entry_point!(
            enumerate_instance_layer_properties,
            vk::PFN_vkEnumerateInstanceLayerProperties
        ),
        b"vkCreateInstance" => entry_point!(create_instance, vk::PFN_vkCreateInstance),
        b"vkDestroyInstance" => entry_point!(destroy_instance, vk::PFN_vkDestroyInstance),
        b"vkEnumeratePhysicalDevices" => entry_point!(
            enumerate_physical_devices,
            vk::PFN_vkEnumeratePhysicalDevices
        ),
        b"vkCreateDebugReportCallbackEXT" if debug_report => entry_point!(
            create_debug_report_callback,
            vk::PFN_vkCreateDebugReportCallbackEXT
        ),
        b"vkDestroyDebugReportCallbackEXT" if debug_report => entry_point!(
            destroy_debug_report_callback,
            vk::PFN_vkDestroyDebugReportCallbackEXT
        ),
        _ => None,
    }
}
