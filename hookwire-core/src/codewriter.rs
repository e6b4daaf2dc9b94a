use hookwire_model::FieldKind;
use proc_macro2::TokenStream;
use quote::{format_ident, quote};

use crate::recordmodel::{FieldModel, RecordModel};

// useful read on working with proc_macro2, quote and syn:
// https://petanode.com/posts/rust-proc-macro/

pub(crate) fn write_record(model: &RecordModel) -> TokenStream {
    let mut ts = write_struct(model);
    ts.extend(write_record_impl(model));
    ts.extend(write_inherent_impl(model));
    ts
}

/// Renders a path as the plain string serde expects in its attributes.
fn path_string(path: &syn::Path) -> String {
    let segments = path
        .segments
        .iter()
        .map(|s| s.ident.to_string())
        .collect::<Vec<_>>()
        .join("::");
    if path.leading_colon.is_some() {
        format!("::{segments}")
    } else {
        segments
    }
}

fn write_struct(model: &RecordModel) -> TokenStream {
    let krate = &model.options.crate_path;
    let serde_crate = format!("{}::__private::serde", path_string(krate));
    let attrs = &model.attrs;
    let vis = &model.vis;
    let ident = &model.ident;

    let fields = model.fields.iter().map(|f| write_field(model, f));

    quote! {
        #(#attrs)*
        #[derive(#krate::__private::serde::Serialize, #krate::__private::serde::Deserialize)]
        #[serde(crate = #serde_crate)]
        #vis struct #ident {
            #(#fields),*
        }
    }
}

fn write_field(model: &RecordModel, f: &FieldModel) -> TokenStream {
    let attrs = &f.attrs;
    let vis = &f.vis;
    let ident = &f.ident;
    let ty = &f.ty;
    let key = &f.key;

    let serde_attr = match f.kind {
        FieldKind::Required if model.options.lenient && f.default.is_some() => {
            let default_fn = format!("{}::{}", model.ident, lenient_default_fn(f));
            quote!(#[serde(rename = #key, default = #default_fn)])
        }
        FieldKind::Required if model.options.lenient => quote!(#[serde(rename = #key, default)]),
        FieldKind::Required => quote!(#[serde(rename = #key)]),
        FieldKind::Optional => quote!(
            #[serde(rename = #key, default, skip_serializing_if = "::core::option::Option::is_none")]
        ),
        FieldKind::Nullable => {
            let skip = format!(
                "{}::Nullable::is_unset",
                path_string(&model.options.crate_path)
            );
            quote!(#[serde(rename = #key, default, skip_serializing_if = #skip)])
        }
    };

    quote! {
        #(#attrs)*
        #serde_attr
        #vis #ident: #ty
    }
}

/// Name of the function a lenient record's decoder calls for a missing
/// required field with a declared default.
fn lenient_default_fn(f: &FieldModel) -> proc_macro2::Ident {
    format_ident!("__record_default_{}", f.name)
}

fn write_record_impl(model: &RecordModel) -> TokenStream {
    let krate = &model.options.crate_path;
    let ident = &model.ident;
    let record_name = ident.to_string();

    let specs = model.fields.iter().map(|f| {
        let name = &f.name;
        let key = &f.key;
        let kind = match f.kind {
            FieldKind::Required => quote!(Required),
            FieldKind::Optional => quote!(Optional),
            FieldKind::Nullable => quote!(Nullable),
        };
        let default = match &f.default {
            Some(d) => {
                let json = d.json();
                quote!(::core::option::Option::Some(#json))
            }
            None => quote!(::core::option::Option::None),
        };
        quote! {
            #krate::FieldSpec {
                name: #name,
                key: #key,
                kind: #krate::FieldKind::#kind,
                default: #default,
            }
        }
    });

    let states = model.fields.iter().map(|f| {
        let key = &f.key;
        let field = &f.ident;
        let state = match f.kind {
            FieldKind::Required => quote!(#krate::FieldState::Value),
            FieldKind::Optional => quote!(#krate::FieldState::of_option(&self.#field)),
            FieldKind::Nullable => quote!(self.#field.state()),
        };
        quote!(#key => ::core::option::Option::Some(#state))
    });

    quote! {
        impl #krate::Record for #ident {
            const SCHEMA: #krate::RecordSchema = #krate::RecordSchema {
                name: #record_name,
                fields: &[#(#specs),*],
            };

            fn field_state(&self, key: &str) -> ::core::option::Option<#krate::FieldState> {
                match key {
                    #(#states,)*
                    _ => ::core::option::Option::None,
                }
            }

            fn with_defaults() -> Self {
                #ident::with_defaults()
            }
        }

        impl ::core::default::Default for #ident {
            fn default() -> Self {
                #ident::with_defaults()
            }
        }
    }
}

/// Initializer of a non-required field from its declared default, if any.
fn optional_init(model: &RecordModel, f: &FieldModel) -> TokenStream {
    let krate = &model.options.crate_path;
    let default = f.default.as_ref().map(|d| d.to_expr());
    match (f.kind, default) {
        (FieldKind::Optional, Some(d)) => quote!(::core::option::Option::Some(#d)),
        (FieldKind::Optional, None) => quote!(::core::option::Option::None),
        (_, Some(d)) => quote!(#krate::Nullable::new(#d)),
        (_, None) => quote!(#krate::Nullable::absent()),
    }
}

fn write_inherent_impl(model: &RecordModel) -> TokenStream {
    let vis = &model.vis;
    let ident = &model.ident;

    let mut params = Vec::new();
    let mut new_inits = Vec::new();
    let mut default_inits = Vec::new();
    let mut default_fns = Vec::new();
    for f in &model.fields {
        let field = &f.ident;
        let inner = &f.inner_ty;
        match f.kind {
            FieldKind::Required => {
                params.push(quote!(#field: impl ::core::convert::Into<#inner>));
                new_inits.push(quote!(#field: ::core::convert::Into::into(#field)));
                let default = match &f.default {
                    Some(d) => d.to_expr(),
                    None => quote!(::core::default::Default::default()),
                };
                default_inits.push(quote!(#field: #default));
                if model.options.lenient && f.default.is_some() {
                    let default_fn = lenient_default_fn(f);
                    default_fns.push(quote! {
                        #[doc(hidden)]
                        fn #default_fn() -> #inner {
                            #default
                        }
                    });
                }
            }
            FieldKind::Optional | FieldKind::Nullable => {
                let init = optional_init(model, f);
                new_inits.push(quote!(#field: #init));
                default_inits.push(quote!(#field: #init));
            }
        }
    }

    let accessors = model.fields.iter().map(|f| write_accessors(model, f));

    quote! {
        #[allow(dead_code)]
        impl #ident {
            /// Creates an instance from all required fields; optional fields
            /// take their declared defaults and are absent otherwise.
            #[allow(clippy::too_many_arguments)]
            #vis fn new(#(#params),*) -> Self {
                #ident {
                    #(#new_inits),*
                }
            }

            /// Creates an instance carrying only declared defaults. Required
            /// fields without one hold their type's `Default` value.
            #vis fn with_defaults() -> Self {
                #ident {
                    #(#default_inits),*
                }
            }

            #(#default_fns)*

            #(#accessors)*
        }
    }
}

fn write_accessors(model: &RecordModel, f: &FieldModel) -> TokenStream {
    let vis = &model.vis;
    let field = &f.ident;
    let inner = &f.inner_ty;
    let set = format_ident!("set_{}", f.name);
    let has = format_ident!("has_{}", f.name);
    let unset = format_ident!("unset_{}", f.name);

    match f.kind {
        FieldKind::Required => quote! {
            #vis fn #field(&self) -> &#inner {
                &self.#field
            }
            #vis fn #set(&mut self, value: impl ::core::convert::Into<#inner>) {
                self.#field = ::core::convert::Into::into(value);
            }
        },
        FieldKind::Optional => quote! {
            #vis fn #field(&self) -> ::core::option::Option<&#inner> {
                self.#field.as_ref()
            }
            #vis fn #has(&self) -> bool {
                self.#field.is_some()
            }
            #vis fn #set(&mut self, value: impl ::core::convert::Into<#inner>) {
                self.#field = ::core::option::Option::Some(::core::convert::Into::into(value));
            }
            #vis fn #unset(&mut self) {
                self.#field = ::core::option::Option::None;
            }
        },
        FieldKind::Nullable => {
            let set_nil = format_ident!("set_{}_nil", f.name);
            quote! {
                #vis fn #field(&self) -> ::core::option::Option<&#inner> {
                    self.#field.get()
                }
                #vis fn #has(&self) -> bool {
                    self.#field.is_set()
                }
                #vis fn #set(&mut self, value: impl ::core::convert::Into<#inner>) {
                    self.#field.set_value(::core::convert::Into::into(value));
                }
                #vis fn #set_nil(&mut self) {
                    self.#field.set_nil();
                }
                #vis fn #unset(&mut self) {
                    self.#field.unset();
                }
            }
        }
    }
}
