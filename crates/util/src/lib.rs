//! Helpers shared by every sample: the aggregate [`SampleInfo`] context and
//! the free functions samples reach for while filling it in.

mod data_dir;
mod device;
mod error;
mod instance;
mod layout;
mod memory;
mod sample_info;
mod utils;

pub use data_dir::{base_data_dir, data_dir, DATA_DIR_ENV};
pub use device::{
    enumerate_physical_devices_without_count_query, graphics_queue_family_index, rate_device,
    select_physical_device,
};
pub use error::SampleError;
pub use instance::{create_instance, has_instance_extension, has_instance_layer};
pub use layout::{layout_access_masks, set_image_layout};
pub use memory::memory_type_from_properties;
pub use sample_info::{
    default_mvp, DepthBuffer, LayerProperties, SampleInfo, SwapChainBuffer, TextureObject,
    UniformData, WindowInfo,
};
pub use utils::{
    required_device_proc_addr, required_instance_proc_addr, vk_to_str, DEFAULT_VALIDATION_LAYER,
};
