#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnumVariant {
    pub name: String,
    /// Explicit discriminant, carried through to the output verbatim.
    pub value: Option<i64>,
    pub comments: Vec<String>,
}

/// A fieldless `#[repr(C)]` enum.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Enum {
    pub name: String,
    pub variants: Vec<EnumVariant>,
    pub comments: Vec<String>,
}
