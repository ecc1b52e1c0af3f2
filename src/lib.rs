pub use loader;
pub use util;

pub mod prelude {
    pub use loader::WsiLoader;
    pub use util::{
        create_instance, data_dir, enumerate_physical_devices_without_count_query,
        has_instance_extension, has_instance_layer, memory_type_from_properties,
        required_instance_proc_addr, set_image_layout, SampleError, SampleInfo,
        DEFAULT_VALIDATION_LAYER,
    };
}
