use headshare_core::ir::{Primitive, Type};
use headshare_core::parser::{parse, ParseError};

#[test]
fn transparent_structs_become_aliases() {
    let data = parse("#[repr(transparent)]\npub struct Handle(u64);").unwrap();
    assert!(data.structs.is_empty());
    assert_eq!(data.aliases.len(), 1);
    assert_eq!(data.aliases[0].name, "Handle");
    assert_eq!(data.aliases[0].ty, Type::Primitive(Primitive::U64));
}

#[test]
fn unsupported_reprs_fall_back_to_opaque() {
    let data = parse("#[repr(u8)]\npub enum Flags { A, B }").unwrap();
    assert!(data.enums.is_empty());
    assert_eq!(data.opaques.len(), 1);
    assert_eq!(data.opaques[0].name, "Flags");
}

#[test]
fn private_items_are_skipped() {
    let data = parse("struct Secret {\n    x: u8,\n}\n\nfn helper() {}").unwrap();
    assert!(data.structs.is_empty());
    assert!(data.opaques.is_empty());
    assert!(data.functions.is_empty());
}

#[test]
fn data_variants_are_rejected() {
    let error = parse("#[repr(C)]\npub enum Event { Clicked(u32) }").unwrap_err();
    assert!(matches!(
        error,
        ParseError::EnumVariantWithData { enum_ident } if enum_ident == "Event"
    ));
}

#[test]
fn functions_require_the_full_export_combination() {
    let data = parse(
        r#"
        #[no_mangle]
        pub extern "C" fn exported() {}

        pub extern "C" fn missing_no_mangle() {}

        #[no_mangle]
        pub fn rust_abi() {}
        "#,
    )
    .unwrap();
    assert_eq!(data.functions.len(), 1);
    assert_eq!(data.functions[0].name, "exported");
    assert!(data.functions[0].params.is_empty());
    assert!(data.functions[0].ret.is_none());
}

#[test]
fn doc_comments_are_captured() {
    let data = parse(
        "/// Upper doc line.\n#[repr(C)]\npub struct Sample {\n    /// Field doc.\n    pub x: u8,\n}",
    )
    .unwrap();
    assert_eq!(data.structs[0].comments, vec!["Upper doc line."]);
    assert_eq!(data.structs[0].fields[0].comments, vec!["Field doc."]);
}

#[test]
fn inline_modules_are_flattened() {
    let data = parse(
        "pub mod inner {\n    #[repr(C)]\n    pub struct Nested {\n        pub x: u8,\n    }\n}",
    )
    .unwrap();
    assert_eq!(data.structs.len(), 1);
    assert_eq!(data.structs[0].name, "Nested");
}

#[test]
fn generic_aliases_are_skipped() {
    let data = parse("pub type Pair<T> = (T, T);").unwrap();
    assert!(data.aliases.is_empty());
}
