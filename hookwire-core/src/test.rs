use quote::quote;
use test_log::test;

use super::*;

#[test]
fn test_expand_record() -> syn::Result<()> {
    let item = quote! {
        /// Payload of `PATCH /event-type/{name}`.
        #[derive(Clone, Debug, PartialEq)]
        pub struct EventTypeUpdate {
            #[record(default = false)]
            pub archived: Option<bool>,
            pub description: String,
            pub feature_flag: Nullable<String>,
        }
    };
    let ts = expand_record(RecordOptions::default(), item)?.to_string();

    for expected in [
        quote!(impl ::hookwire::Record for EventTypeUpdate),
        quote!(impl ::core::default::Default for EventTypeUpdate),
        quote!(#[derive(Clone, Debug, PartialEq)]),
        quote!(pub fn set_feature_flag_nil(&mut self)),
        quote!(pub fn has_archived(&self) -> bool),
    ] {
        let expected = expected.to_string();
        assert!(ts.contains(&expected), "missing `{expected}` in {ts}");
    }
    assert!(!ts.contains("record ("), "record attributes leaked: {ts}");
    Ok(())
}

#[test]
fn test_expand_with_crate_path() -> syn::Result<()> {
    let options = RecordOptions {
        crate_path: syn::parse_quote!(crate::wire),
        ..Default::default()
    };
    let ts = expand_record(options, quote!(struct Foo { a: Nullable<u8> }))?.to_string();
    assert!(ts.contains("\"crate::wire::__private::serde\""), "{ts}");
    assert!(ts.contains("\"crate::wire::Nullable::is_unset\""), "{ts}");
    Ok(())
}

#[test]
fn test_expand_rejects_non_structs() {
    let err = expand_record(RecordOptions::default(), quote!(enum Foo { A, B })).unwrap_err();
    assert!(err.to_string().contains("struct"), "{err}");
    let err = expand_record(RecordOptions::default(), quote!(struct Foo;)).unwrap_err();
    assert_eq!(RecordModelError::NotNamedFields.to_string(), err.to_string());
}
