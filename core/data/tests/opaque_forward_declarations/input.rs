use std::os::raw::c_char;

pub struct Device {
    handle: usize,
}

/// Borrowed handle into the device table.
#[repr(C)]
pub struct DeviceRef {
    pub raw: *mut Device,
}

#[no_mangle]
pub extern "C" fn device_open(name: *const c_char) -> *mut Device {
    core::ptr::null_mut()
}

#[no_mangle]
pub extern "C" fn device_close(device: *mut Device) {}
