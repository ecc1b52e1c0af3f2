use std::{ffi::OsString, path::PathBuf};

/// Environment variable overriding where samples look for their data files.
pub const DATA_DIR_ENV: &str = "VULKAN_SAMPLES_DATA_DIR";

fn resolve_base_dir(overridden: Option<OsString>) -> PathBuf {
    match overridden {
        Some(dir) if !dir.is_empty() => PathBuf::from(dir),
        _ => PathBuf::from(concat!(env!("CARGO_MANIFEST_DIR"), "/../../data")),
    }
}

/// Directory holding shaders, textures and other sample data.
pub fn base_data_dir() -> PathBuf {
    resolve_base_dir(std::env::var_os(DATA_DIR_ENV))
}

/// Path of `filename` inside [`base_data_dir`].
pub fn data_dir(filename: &str) -> PathBuf {
    base_data_dir().join(filename)
}
