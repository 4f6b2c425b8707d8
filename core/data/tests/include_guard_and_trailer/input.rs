#[repr(C)]
pub struct Mixer {
    pub channels: u32,
}

#[no_mangle]
pub extern "C" fn mixer_create(channels: u32) -> *mut Mixer {
    core::ptr::null_mut()
}
