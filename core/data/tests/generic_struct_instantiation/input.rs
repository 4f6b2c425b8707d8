#[repr(C)]
pub struct Slice<T> {
    pub ptr: *const T,
    pub len: usize,
}

#[repr(C)]
pub struct Row {
    pub id: u64,
}

#[repr(C)]
pub struct Registry {
    pub names: Slice<u32>,
    pub rows: Slice<Row>,
}

#[no_mangle]
pub extern "C" fn registry_rows(registry: *const Registry) -> Slice<Row> {
    unimplemented!()
}
