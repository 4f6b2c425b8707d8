/// Nanoseconds since the stream opened.
pub type Timestamp = u64;

pub type SampleBuffer = *mut f32;

#[repr(C)]
pub struct Frame {
    pub timestamp: Timestamp,
    pub samples: SampleBuffer,
    pub gain: [f32; 8],
}

#[no_mangle]
pub extern "C" fn frame_timestamp(frame: *const Frame) -> Timestamp {
    0
}
