use std::ffi::{c_char, CStr};

use ash::{vk, Entry, Instance};
use tracing::debug;

use crate::{utils::vk_to_str, SampleError};

fn contains_name<'a>(names: impl IntoIterator<Item = &'a [c_char]>, wanted: &CStr) -> bool {
    let wanted = wanted.to_string_lossy();
    names.into_iter().any(|raw| vk_to_str(raw) == wanted)
}

/// Whether the loader reports `name` among the global instance extensions.
pub fn has_instance_extension(entry: &Entry, name: &CStr) -> Result<bool, SampleError> {
    let extensions = entry.enumerate_instance_extension_properties(None)?;
    debug!("loader exposes {} instance extensions", extensions.len());

    Ok(contains_name(
        extensions.iter().map(|ext| &ext.extension_name[..]),
        name,
    ))
}

/// Whether the loader can find a layer called `name`.
pub fn has_instance_layer(entry: &Entry, name: &CStr) -> Result<bool, SampleError> {
    let layers = entry.enumerate_instance_layer_properties()?;

    debug!("instance available layers: ");
    for layer in &layers {
        debug!("\t {}", vk_to_str(&layer.layer_name));
    }

    Ok(contains_name(
        layers.iter().map(|layer| &layer.layer_name[..]),
        name,
    ))
}

fn engine_version() -> u32 {
    let major = env!("CARGO_PKG_VERSION_MAJOR").parse().unwrap_or(0);
    let minor = env!("CARGO_PKG_VERSION_MINOR").parse().unwrap_or(0);
    let patch = env!("CARGO_PKG_VERSION_PATCH").parse().unwrap_or(0);

    vk::make_api_version(0, major, minor, patch)
}

/// Creates an instance with exactly the given extensions and layers enabled.
///
/// `VK_ERROR_INCOMPATIBLE_DRIVER` is reported as
/// [`SampleError::IncompatibleDriver`]; any other failure as
/// [`SampleError::InstanceCreation`].
pub fn create_instance(
    entry: &Entry,
    app_name: &CStr,
    extensions: &[&CStr],
    layers: &[&CStr],
) -> Result<Instance, SampleError> {
    let app_info = vk::ApplicationInfo::builder()
        .application_name(app_name)
        .application_version(1)
        .engine_name(app_name)
        .engine_version(engine_version())
        .api_version(vk::API_VERSION_1_0);

    let extension_names: Vec<*const c_char> = extensions.iter().map(|s| s.as_ptr()).collect();
    let layer_names: Vec<*const c_char> = layers.iter().map(|s| s.as_ptr()).collect();

    let create_info = vk::InstanceCreateInfo::builder()
        .application_info(&app_info)
        .enabled_extension_names(&extension_names)
        .enabled_layer_names(&layer_names);

    match unsafe { entry.create_instance(&create_info, None) } {
        Ok(instance) => {
            debug!(
                extensions = ?extensions,
                layers = ?layers,
                "created instance for {}",
                app_name.to_string_lossy()
            );
            Ok(instance)
        }
        Err(vk::Result::ERROR_INCOMPATIBLE_DRIVER) => Err(SampleError::IncompatibleDriver),
        Err(e) => Err(SampleError::InstanceCreation(e)),
    }
}
