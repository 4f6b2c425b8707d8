pub struct Foo {
    value: u64,
}

#[repr(C)]
pub struct Bar {
    pub foo: Option<Foo>,
}

#[no_mangle]
pub extern "C" fn root(f: Bar) {}
