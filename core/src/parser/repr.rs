use syn::Attribute;

/// The layout attribute of a struct or enum, as far as header generation
/// cares about it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub(crate) enum Repr {
    /// No `#[repr]` attribute; the layout is private and the type can only
    /// cross the boundary behind a pointer.
    #[default]
    None,
    C,
    Transparent,
    /// Any other repr, e.g. `repr(u8)` or `repr(packed)`.
    Other,
}

pub(crate) fn parse_repr(attrs: &[Attribute]) -> Repr {
    for attr in attrs {
        if !attr.path().is_ident("repr") {
            continue;
        }
        let mut repr = Repr::Other;
        let _ = attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("C") {
                repr = Repr::C;
            } else if meta.path.is_ident("transparent") {
                repr = Repr::Transparent;
            }
            Ok(())
        });
        return repr;
    }
    Repr::None
}

pub(crate) fn has_no_mangle(attrs: &[Attribute]) -> bool {
    attrs.iter().any(|attr| attr.path().is_ident("no_mangle"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reprs_of(source: &str) -> Repr {
        let item: syn::ItemStruct = syn::parse_str(source).unwrap();
        parse_repr(&item.attrs)
    }

    #[test]
    fn recognizes_reprs() {
        assert_eq!(reprs_of("#[repr(C)] struct A { x: u8 }"), Repr::C);
        assert_eq!(
            reprs_of("#[repr(transparent)] struct A(u8);"),
            Repr::Transparent
        );
        assert_eq!(reprs_of("#[repr(align(8))] struct A { x: u8 }"), Repr::Other);
        assert_eq!(reprs_of("struct A { x: u8 }"), Repr::None);
    }

    #[test]
    fn packed_c_still_counts_as_c() {
        assert_eq!(reprs_of("#[repr(C, packed)] struct A { x: u8 }"), Repr::C);
    }
}
