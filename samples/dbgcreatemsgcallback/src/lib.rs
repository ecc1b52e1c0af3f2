//! Create and destroy a debug report callback.
//!
//! Registers a debug report callback and then makes an invalid
//! `vkEnumeratePhysicalDevices` call so the validation layer reports an error
//! through it. The callback is quiet unless asked to be noisy.

pub mod args;
pub mod callback;

use std::ffi::{CStr, CString};

use ash::{extensions::ext::DebugReport, vk, Entry};
use tracing::debug;
use vulkan_samples::prelude::*;

use crate::{
    args::Args,
    callback::{debug_report_callback, UserData},
};

pub const APP_SHORT_NAME: &CStr = c"vulkansamples_msgcallback";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Outcome {
    pub callback_triggered: bool,
}

pub fn run(args: &Args) -> Result<Outcome, SampleError> {
    let entry = unsafe { Entry::load()? };
    run_with_entry(&entry, args)
}

pub fn run_with_entry(entry: &Entry, args: &Args) -> Result<Outcome, SampleError> {
    let extension = DebugReport::name();
    if !has_instance_extension(entry, extension)? {
        return Err(SampleError::MissingExtension(
            extension.to_string_lossy().into_owned(),
        ));
    }

    let layer = CString::new(args.layer.as_str())
        .map_err(|_| SampleError::MissingLayer(args.layer.clone()))?;
    if !has_instance_layer(entry, &layer)? {
        return Err(SampleError::MissingLayer(args.layer.clone()));
    }

    let user_data = UserData::new(args.noisy);

    let mut info = SampleInfo::default();
    info.instance_extension_names.push(extension.to_owned());
    info.instance_layer_names.push(layer);
    info.init_instance(entry, APP_SHORT_NAME)?;

    let outcome = trigger_callback(entry, &mut info, &user_data);

    info.destroy_instance();
    outcome
}

fn trigger_callback(
    entry: &Entry,
    info: &mut SampleInfo,
    user_data: &UserData,
) -> Result<Outcome, SampleError> {
    info.init_debug_report(
        entry,
        vk::DebugReportFlagsEXT::ERROR | vk::DebugReportFlagsEXT::WARNING,
        Some(debug_report_callback),
        user_data.as_raw(),
    )?;

    let instance = info
        .instance
        .as_ref()
        .ok_or(SampleError::NotInitialized("instance"))?;

    let result = enumerate_physical_devices_without_count_query(instance);
    debug!(?result, "enumerated physical devices without querying the count");

    let callback_triggered = user_data.triggered();
    debug!(callback_triggered, "done provoking the validation layer");

    Ok(Outcome { callback_triggered })
}
