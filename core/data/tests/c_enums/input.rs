use std::os::raw::c_char;

/// Result codes returned by every library call.
#[repr(C)]
pub enum StatusCode {
    Ok = 0,
    InvalidInput = 1,
    /// The underlying device went away mid call.
    DeviceLost = 2,
    OutOfMemory,
}

#[no_mangle]
pub extern "C" fn status_message(code: StatusCode) -> *const c_char {
    core::ptr::null()
}
