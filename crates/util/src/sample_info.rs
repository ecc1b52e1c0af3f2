use std::ffi::{c_void, CStr, CString};

use ash::{
    extensions::{
        ext::DebugReport,
        khr::{Surface, Swapchain},
    },
    vk, Device, Entry, Instance,
};
use glam::{Mat4, Vec3};
use raw_window_handle::{RawDisplayHandle, RawWindowHandle};
use tracing::{debug, info};

use crate::{
    device::{graphics_queue_family_index, select_physical_device},
    instance::create_instance,
    layout,
    memory::memory_type_from_properties,
    utils::{required_instance_proc_addr, vk_to_str},
    SampleError,
};

#[derive(Debug, Default, Clone)]
pub struct WindowInfo {
    /// Name to put on the window/icon
    pub name: String,
    pub width: u32,
    pub height: u32,
    pub window: Option<RawWindowHandle>,
    pub display: Option<RawDisplayHandle>,
}

/// Everything related to a single texture.
#[derive(Debug, Default, Clone, Copy)]
pub struct TextureObject {
    pub sampler: vk::Sampler,
    pub image: vk::Image,
    pub image_layout: vk::ImageLayout,
    pub mem: vk::DeviceMemory,
    pub view: vk::ImageView,
    pub tex_width: i32,
    pub tex_height: i32,
}

/// Image, command buffer and view of one swapchain buffer.
#[derive(Debug, Default, Clone, Copy)]
pub struct SwapChainBuffer {
    pub image: vk::Image,
    pub cmd: vk::CommandBuffer,
    pub view: vk::ImageView,
}

/// A layer together with the extensions it exposes.
#[derive(Debug, Default, Clone)]
pub struct LayerProperties {
    pub properties: vk::LayerProperties,
    pub extensions: Vec<vk::ExtensionProperties>,
}

impl LayerProperties {
    pub fn name(&self) -> String {
        vk_to_str(&self.properties.layer_name)
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct DepthBuffer {
    pub format: vk::Format,
    pub image: vk::Image,
    pub mem: vk::DeviceMemory,
    pub view: vk::ImageView,
}

#[derive(Debug, Default, Clone, Copy)]
pub struct UniformData {
    pub buf: vk::Buffer,
    pub mem: vk::DeviceMemory,
    pub view: vk::BufferView,
    pub desc: vk::DescriptorBufferInfo,
    pub mvp: Mat4,
}

/// State used, created and modified by the sample helpers.
///
/// Handles start out null and get filled in the order a full rendering
/// sample needs them; most samples only touch a handful of fields.
#[derive(Default)]
pub struct SampleInfo {
    pub window: WindowInfo,
    pub prepared: bool,
    pub use_staging_buffer: bool,

    pub instance_layer_names: Vec<CString>,
    pub instance_extension_names: Vec<CString>,
    pub instance_layer_properties: Vec<LayerProperties>,
    pub instance_extension_properties: Vec<vk::ExtensionProperties>,
    pub instance: Option<Instance>,

    pub device_layer_names: Vec<CString>,
    pub device_extension_names: Vec<CString>,
    pub device_layer_properties: Vec<LayerProperties>,
    pub device_extension_properties: Vec<vk::ExtensionProperties>,
    pub gpu: vk::PhysicalDevice,
    pub device: Option<Device>,
    pub queue: vk::Queue,
    pub graphics_queue_family_index: u32,
    pub gpu_props: vk::PhysicalDeviceProperties,
    pub queue_props: Vec<vk::QueueFamilyProperties>,
    pub memory_properties: vk::PhysicalDeviceMemoryProperties,

    pub framebuffer: vk::Framebuffer,
    pub format: vk::Format,

    pub surface_loader: Option<Surface>,
    pub swapchain_loader: Option<Swapchain>,
    pub surface: vk::SurfaceKHR,
    pub swapchain_image_count: u32,
    pub swapchain: vk::SwapchainKHR,
    pub buffers: Vec<SwapChainBuffer>,

    pub cmd_pool: vk::CommandPool,

    pub depth: DepthBuffer,

    pub textures: Vec<TextureObject>,

    pub uniform_data: UniformData,

    /// Buffer for initialization commands
    pub cmd: vk::CommandBuffer,
    pub pipeline_layout: vk::PipelineLayout,
    pub desc_layout: vk::DescriptorSetLayout,
    pub pipeline_cache: vk::PipelineCache,
    pub render_pass: vk::RenderPass,
    pub pipeline: vk::Pipeline,

    pub viewport: vk::Viewport,
    pub scissor: vk::Rect2D,

    pub vert_shader_module: vk::ShaderModule,
    pub frag_shader_module: vk::ShaderModule,

    pub desc_pool: vk::DescriptorPool,
    pub desc_set: vk::DescriptorSet,

    pub framebuffers: Vec<vk::Framebuffer>,

    pub debug_report: Option<DebugReport>,
    pub msg_callbacks: Vec<vk::DebugReportCallbackEXT>,

    pub current_buffer: u32,
    pub queue_count: u32,
}

/// Model-view-projection matrix the samples start from: a camera looking at
/// the origin from (-5, 3, -10) with Vulkan's downward clip-space Y.
pub fn default_mvp(width: u32, height: u32) -> Mat4 {
    let aspect = if height == 0 {
        1.0
    } else {
        width as f32 / height as f32
    };

    let projection = Mat4::perspective_rh(45f32.to_radians(), aspect, 0.1, 100.0);
    let view = Mat4::look_at_rh(
        Vec3::new(-5.0, 3.0, -10.0),
        Vec3::ZERO,
        Vec3::new(0.0, -1.0, 0.0),
    );
    let model = Mat4::IDENTITY;

    projection * view * model
}

#[cfg(windows)]
fn platform_surface_extension() -> &'static CStr {
    ash::extensions::khr::Win32Surface::name()
}

#[cfg(target_os = "macos")]
fn platform_surface_extension() -> &'static CStr {
    ash::extensions::ext::MetalSurface::name()
}

#[cfg(target_os = "android")]
fn platform_surface_extension() -> &'static CStr {
    ash::extensions::khr::AndroidSurface::name()
}

#[cfg(not(any(windows, target_os = "macos", target_os = "android")))]
fn platform_surface_extension() -> &'static CStr {
    ash::extensions::khr::XlibSurface::name()
}

impl SampleInfo {
    pub fn new(name: impl Into<String>, width: u32, height: u32) -> Self {
        Self {
            window: WindowInfo {
                name: name.into(),
                width,
                height,
                ..Default::default()
            },
            uniform_data: UniformData {
                mvp: default_mvp(width, height),
                ..Default::default()
            },
            ..Default::default()
        }
    }

    fn instance(&self) -> Result<&Instance, SampleError> {
        self.instance
            .as_ref()
            .ok_or(SampleError::NotInitialized("instance"))
    }

    /// Enumerates the global extensions and every instance layer along with
    /// the extensions each layer provides.
    pub fn init_instance_layer_properties(&mut self, entry: &Entry) -> Result<(), SampleError> {
        self.instance_extension_properties = entry.enumerate_instance_extension_properties(None)?;

        self.instance_layer_properties = entry
            .enumerate_instance_layer_properties()?
            .into_iter()
            .map(|properties| -> Result<LayerProperties, SampleError> {
                // the loader nul-terminates layer names
                let name = unsafe { CStr::from_ptr(properties.layer_name.as_ptr()) };
                let extensions = entry.enumerate_instance_extension_properties(Some(name))?;

                Ok(LayerProperties {
                    properties,
                    extensions,
                })
            })
            .collect::<Result<Vec<_>, SampleError>>()?;

        debug!(
            layers = self.instance_layer_properties.len(),
            extensions = self.instance_extension_properties.len(),
            "enumerated instance layer properties"
        );
        Ok(())
    }

    /// Requests the surface extensions needed to present on this platform.
    pub fn init_instance_extension_names(&mut self) {
        self.instance_extension_names
            .push(Surface::name().to_owned());
        self.instance_extension_names
            .push(platform_surface_extension().to_owned());
    }

    pub fn init_instance(&mut self, entry: &Entry, app_name: &CStr) -> Result<(), SampleError> {
        let extensions: Vec<&CStr> = self
            .instance_extension_names
            .iter()
            .map(CString::as_c_str)
            .collect();
        let layers: Vec<&CStr> = self
            .instance_layer_names
            .iter()
            .map(CString::as_c_str)
            .collect();

        self.instance = Some(create_instance(entry, app_name, &extensions, &layers)?);
        Ok(())
    }

    /// Picks the best physical device and caches its properties, queue
    /// families and memory properties.
    pub fn init_enumerate_device(&mut self) -> Result<(), SampleError> {
        let instance = self.instance()?;
        let gpu = select_physical_device(instance)?;

        let (gpu_props, queue_props, memory_properties) = unsafe {
            (
                instance.get_physical_device_properties(gpu),
                instance.get_physical_device_queue_family_properties(gpu),
                instance.get_physical_device_memory_properties(gpu),
            )
        };

        let graphics_queue_family_index =
            graphics_queue_family_index(&queue_props).ok_or(SampleError::NoGraphicsQueue)?;

        info!(
            "using {} (queue family {})",
            vk_to_str(&gpu_props.device_name),
            graphics_queue_family_index
        );

        self.gpu = gpu;
        self.gpu_props = gpu_props;
        self.queue_count = queue_props.len() as u32;
        self.queue_props = queue_props;
        self.memory_properties = memory_properties;
        self.graphics_queue_family_index = graphics_queue_family_index;
        Ok(())
    }

    /// Registers a debug report callback on the current instance.
    ///
    /// The create and destroy entry points are resolved through
    /// `vkGetInstanceProcAddr` first so a missing extension is reported as
    /// [`SampleError::MissingEntryPoint`].
    pub fn init_debug_report(
        &mut self,
        entry: &Entry,
        flags: vk::DebugReportFlagsEXT,
        callback: vk::PFN_vkDebugReportCallbackEXT,
        user_data: *mut c_void,
    ) -> Result<vk::DebugReportCallbackEXT, SampleError> {
        let instance = self.instance()?;

        required_instance_proc_addr(entry, instance.handle(), c"vkCreateDebugReportCallbackEXT")?;
        required_instance_proc_addr(entry, instance.handle(), c"vkDestroyDebugReportCallbackEXT")?;

        let loader = DebugReport::new(entry, instance);
        let create_info = vk::DebugReportCallbackCreateInfoEXT::builder()
            .flags(flags)
            .pfn_callback(callback)
            .user_data(user_data);

        let msg_callback = match unsafe { loader.create_debug_report_callback(&create_info, None) }
        {
            Ok(msg_callback) => msg_callback,
            Err(vk::Result::ERROR_OUT_OF_HOST_MEMORY) => {
                return Err(SampleError::CallbackOutOfHostMemory)
            }
            Err(e) => return Err(SampleError::CallbackCreation(e)),
        };

        debug!(?flags, "registered debug report callback");
        self.msg_callbacks.push(msg_callback);
        if self.debug_report.is_none() {
            self.debug_report = Some(loader);
        }

        Ok(msg_callback)
    }

    pub fn destroy_debug_report(&mut self) {
        if let Some(loader) = self.debug_report.take() {
            for msg_callback in self.msg_callbacks.drain(..) {
                unsafe { loader.destroy_debug_report_callback(msg_callback, None) };
            }
        }
    }

    /// Destroys any registered callbacks, then the instance itself.
    pub fn destroy_instance(&mut self) {
        self.destroy_debug_report();

        if let Some(instance) = self.instance.take() {
            unsafe { instance.destroy_instance(None) };
            debug!("destroyed instance");
        }
    }

    pub fn memory_type_from_properties(
        &self,
        type_bits: u32,
        requirements: vk::MemoryPropertyFlags,
    ) -> Option<u32> {
        memory_type_from_properties(&self.memory_properties, type_bits, requirements)
    }

    /// Records a layout transition for `image` into [`SampleInfo::cmd`].
    ///
    /// # Safety
    ///
    /// `self.cmd` must be in the recording state and `image` must belong to
    /// `self.device`.
    pub unsafe fn set_image_layout(
        &self,
        image: vk::Image,
        aspect: vk::ImageAspectFlags,
        old_layout: vk::ImageLayout,
        new_layout: vk::ImageLayout,
    ) -> Result<(), SampleError> {
        let device = self
            .device
            .as_ref()
            .ok_or(SampleError::NotInitialized("device"))?;

        layout::set_image_layout(device, self.cmd, image, aspect, old_layout, new_layout);
        Ok(())
    }
}
