use std::{
    cell::Cell,
    ffi::{c_char, c_void, CStr},
    io::{self, Write},
};

use ash::vk::{self, DebugReportFlagsEXT};
use tracing::{debug, warn};

/// Data handed to the callback through its user-data pointer.
#[derive(Debug, Default)]
pub struct UserData {
    triggered: Cell<bool>,
    noisy: bool,
}

impl UserData {
    pub fn new(noisy: bool) -> Self {
        Self {
            triggered: Cell::new(false),
            noisy,
        }
    }

    pub fn triggered(&self) -> bool {
        self.triggered.get()
    }

    pub fn noisy(&self) -> bool {
        self.noisy
    }

    /// Pointer to pass as `pUserData` when registering
    /// [`debug_report_callback`]. Only valid while `self` is alive.
    pub fn as_raw(&self) -> *mut c_void {
        self as *const Self as *mut c_void
    }

    /// Records that a message arrived and, when noisy, writes it to `out`.
    pub fn report<W: Write>(
        &self,
        flags: DebugReportFlagsEXT,
        layer_prefix: &str,
        code: i32,
        message: &str,
        out: &mut W,
    ) -> io::Result<()> {
        self.triggered.set(true);

        let line = format_message(flags, layer_prefix, code, message);
        debug!("{line}");

        if self.noisy {
            writeln!(out, "{line}")?;
        }
        Ok(())
    }
}

pub fn severity_label(flags: DebugReportFlagsEXT) -> Option<&'static str> {
    if flags.contains(DebugReportFlagsEXT::ERROR) {
        Some("ERROR")
    } else if flags.contains(DebugReportFlagsEXT::WARNING) {
        Some("WARNING")
    } else if flags.contains(DebugReportFlagsEXT::PERFORMANCE_WARNING) {
        Some("PERFORMANCE WARNING")
    } else if flags.contains(DebugReportFlagsEXT::INFORMATION) {
        Some("INFO")
    } else if flags.contains(DebugReportFlagsEXT::DEBUG) {
        Some("DEBUG")
    } else {
        None
    }
}

pub fn format_message(
    flags: DebugReportFlagsEXT,
    layer_prefix: &str,
    code: i32,
    message: &str,
) -> String {
    let label = severity_label(flags)
        .map(|label| format!("{label}: "))
        .unwrap_or_default();

    format!("(Expected) {label}[{layer_prefix}] Code {code} : {message}")
}

unsafe fn lossy(raw: *const c_char) -> String {
    if raw.is_null() {
        String::new()
    } else {
        CStr::from_ptr(raw).to_string_lossy().into_owned()
    }
}

/// Debug report callback registered by the sample.
///
/// `p_user_data` must be null or point at a live [`UserData`]. Always
/// returns `VK_FALSE`, so the layer never bails out of the offending call.
#[allow(clippy::too_many_arguments)]
pub unsafe extern "system" fn debug_report_callback(
    flags: DebugReportFlagsEXT,
    _object_type: vk::DebugReportObjectTypeEXT,
    _object: u64,
    _location: usize,
    message_code: i32,
    p_layer_prefix: *const c_char,
    p_message: *const c_char,
    p_user_data: *mut c_void,
) -> vk::Bool32 {
    let Some(user_data) = (p_user_data as *const UserData).as_ref() else {
        return vk::FALSE;
    };

    let layer_prefix = lossy(p_layer_prefix);
    let message = lossy(p_message);

    if let Err(e) = user_data.report(
        flags,
        &layer_prefix,
        message_code,
        &message,
        &mut io::stdout().lock(),
    ) {
        warn!("could not print debug report message: {e}");
    }

    vk::FALSE
}
