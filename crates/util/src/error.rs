use ash::vk;

#[derive(thiserror::Error, Debug)]
pub enum SampleError {
    #[error("cannot load the Vulkan loader: {0}")]
    Loading(#[from] ash::LoadingError),

    #[error("Something went very wrong, cannot find {0} extension")]
    MissingExtension(String),

    #[error("Something went very wrong, cannot find {0} layer")]
    MissingLayer(String),

    #[error("cannot find a compatible Vulkan ICD")]
    IncompatibleDriver,

    #[error("unknown error")]
    InstanceCreation(vk::Result),

    #[error("GetInstanceProcAddr: Unable to find {0} function.")]
    MissingEntryPoint(String),

    #[error("dbgCreateMsgCallback: out of host memory pointer")]
    CallbackOutOfHostMemory,

    #[error("dbgCreateMsgCallback: unknown failure")]
    CallbackCreation(vk::Result),

    #[error("no suitable physical device found")]
    NoPhysicalDevice,

    #[error("no queue family with graphics support")]
    NoGraphicsQueue,

    #[error("{0} used before it was initialized")]
    NotInitialized(&'static str),

    #[error("Vulkan: {0}")]
    Vk(#[from] vk::Result),
}

impl SampleError {
    /// Process exit status a sample terminates with for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            SampleError::Loading(_)
            | SampleError::IncompatibleDriver
            | SampleError::InstanceCreation(_) => -1,
            _ => 1,
        }
    }
}
