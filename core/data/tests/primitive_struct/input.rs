/// Current position of the cursor.
#[repr(C)]
pub struct CursorPosition {
    pub x: i32,
    pub y: i32,
    /// Nonzero when the cursor is visible.
    pub visible: bool,
}

#[no_mangle]
pub extern "C" fn cursor_update(position: *const CursorPosition, count: usize) -> bool {
    false
}
