mod wsi;

pub use wsi::{
    is_wsi_device_entry_point, is_wsi_instance_entry_point, wsi_extension_for, WsiLoader,
};
