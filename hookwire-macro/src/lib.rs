use proc_macro::TokenStream;

mod procmacro;

/// Turns a struct with named fields into a JSON record.
///
/// Each field is classified by its declared type: `Option<T>` fields are
/// optional, `Nullable<T>` fields are nullable and every other field is
/// required. Arguments:
///
/// * `rename_all = "camelCase" | "snake_case" | "verbatim"` (default `camelCase`)
/// * `lenient = true` decodes a missing required key to the field's
///   declared default, or its `Default` value if it has none, instead of
///   failing
/// * `crate = "path"` where the runtime crate lives, `::hookwire` by default
///
/// Fields accept `#[record(rename = "key")]` and `#[record(default = <literal>)]`.
#[proc_macro_attribute]
pub fn record(args: TokenStream, item: TokenStream) -> TokenStream {
    match procmacro::expand(args.into(), item.into()) {
        Ok(ts) => ts.into(),
        Err(e) => e.to_compile_error().into(),
    }
}
