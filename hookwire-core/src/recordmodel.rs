use std::collections::HashSet;

use hookwire_model::FieldKind;
use proc_macro2::TokenStream;
use quote::{ToTokens, quote};
use syn::{
    Attribute, Expr, ExprLit, ExprUnary, Fields, GenericArgument, Ident, ItemStruct, Lit, LitStr,
    PathArguments, Type, TypePath, UnOp, Visibility, ext::IdentExt, spanned::Spanned,
};

use crate::translate::{self, RenameRule};

/// Record-level settings, given as arguments to `#[record(...)]`.
#[derive(Clone, Debug, PartialEq)]
pub struct RecordOptions {
    pub rename_all: RenameRule,
    /// Decode a missing required key to the field's `Default` value instead
    /// of failing.
    pub lenient: bool,
    /// Path under which the generated code finds the runtime crate.
    pub crate_path: syn::Path,
}

impl Default for RecordOptions {
    fn default() -> Self {
        RecordOptions {
            rename_all: RenameRule::default(),
            lenient: false,
            crate_path: syn::parse_quote!(::hookwire),
        }
    }
}

#[derive(thiserror::Error, Debug, PartialEq)]
pub enum RecordModelError {
    #[error("#[record] can only be applied to structs with named fields")]
    NotNamedFields,
    #[error("#[record] does not support generic structs")]
    Generics,
    #[error("JSON key '{0}' is used by more than one field")]
    DuplicateKey(String),
    #[error("'{0}' expects exactly one type argument")]
    MissingTypeArgument(String),
    #[error("unknown field option '{0}', expected 'rename' or 'default'")]
    UnknownFieldOption(String),
    #[error("'default' expects a string, number or bool literal")]
    UnsupportedDefault,
    #[error("unknown rename rule '{0}', expected one of camelCase, snake_case, verbatim")]
    UnknownRenameRule(String),
}

/// A literal default declared with `#[record(default = ...)]`.
#[derive(Debug)]
pub struct DefaultValue {
    lit: Lit,
    negative: bool,
    json: String,
}

impl DefaultValue {
    fn from_expr(expr: &Expr) -> Result<Self, RecordModelError> {
        let (lit, negative) = match expr {
            Expr::Lit(ExprLit { lit, .. }) => (lit, false),
            Expr::Unary(ExprUnary {
                op: UnOp::Neg(_),
                expr,
                ..
            }) => match &**expr {
                Expr::Lit(ExprLit {
                    lit: lit @ (Lit::Int(_) | Lit::Float(_)),
                    ..
                }) => (lit, true),
                _ => return Err(RecordModelError::UnsupportedDefault),
            },
            _ => return Err(RecordModelError::UnsupportedDefault),
        };

        let value = match lit {
            Lit::Str(s) => serde_json::Value::String(s.value()),
            Lit::Bool(b) => serde_json::Value::Bool(b.value),
            Lit::Int(i) => {
                if negative {
                    let n = i
                        .base10_parse::<i64>()
                        .map_err(|_| RecordModelError::UnsupportedDefault)?;
                    serde_json::Value::from(-n)
                } else {
                    let n = i
                        .base10_parse::<u64>()
                        .map_err(|_| RecordModelError::UnsupportedDefault)?;
                    serde_json::Value::from(n)
                }
            }
            Lit::Float(f) => {
                let n = f
                    .base10_parse::<f64>()
                    .map_err(|_| RecordModelError::UnsupportedDefault)?;
                let n = if negative { -n } else { n };
                serde_json::Number::from_f64(n)
                    .map(serde_json::Value::Number)
                    .ok_or(RecordModelError::UnsupportedDefault)?
            }
            _ => return Err(RecordModelError::UnsupportedDefault),
        };

        Ok(DefaultValue {
            lit: lit.clone(),
            negative,
            json: value.to_string(),
        })
    }

    /// The default as JSON text, the form stored in the field table.
    pub fn json(&self) -> &str {
        &self.json
    }

    /// Rust expression producing the default for a field of the inner type.
    pub fn to_expr(&self) -> TokenStream {
        let lit = &self.lit;
        match lit {
            Lit::Str(_) => quote!(::core::convert::Into::into(#lit)),
            _ if self.negative => quote!(-#lit),
            _ => lit.to_token_stream(),
        }
    }
}

#[derive(Debug)]
pub struct FieldModel {
    /// attributes other than `#[record(...)]`, passed through unchanged
    pub attrs: Vec<Attribute>,
    pub vis: Visibility,
    pub ident: Ident,
    /// `ident` without a raw-identifier prefix
    pub name: String,
    pub ty: Type,
    /// `T` for `Option<T>` and `Nullable<T>`, the declared type otherwise
    pub inner_ty: Type,
    pub kind: FieldKind,
    pub key: String,
    pub default: Option<DefaultValue>,
}

#[derive(Debug)]
pub struct RecordModel {
    pub attrs: Vec<Attribute>,
    pub vis: Visibility,
    pub ident: Ident,
    pub fields: Vec<FieldModel>,
    pub options: RecordOptions,
}

impl RecordModel {
    pub fn from_item(item: ItemStruct, options: RecordOptions) -> syn::Result<Self> {
        if !item.generics.params.is_empty() || item.generics.where_clause.is_some() {
            return Err(syn::Error::new_spanned(
                &item.generics,
                RecordModelError::Generics,
            ));
        }
        let named = match item.fields {
            Fields::Named(named) => named,
            other => {
                return Err(syn::Error::new(
                    other.span(),
                    RecordModelError::NotNamedFields,
                ));
            }
        };

        let mut keys = HashSet::new();
        let mut fields = Vec::with_capacity(named.named.len());
        for field in named.named {
            // named fields always carry an ident
            let Some(ident) = field.ident else {
                continue;
            };
            let name = ident.unraw().to_string();
            let (kind, inner_ty) = classify(&field.ty)?;

            let mut rename = None;
            let mut default = None;
            let mut attrs = Vec::with_capacity(field.attrs.len());
            for attr in field.attrs {
                if !attr.path().is_ident("record") {
                    attrs.push(attr);
                    continue;
                }
                attr.parse_nested_meta(|meta| {
                    if meta.path.is_ident("rename") {
                        let key: LitStr = meta.value()?.parse()?;
                        rename = Some(key.value());
                    } else if meta.path.is_ident("default") {
                        let expr: Expr = meta.value()?.parse()?;
                        default = Some(
                            DefaultValue::from_expr(&expr)
                                .map_err(|e| syn::Error::new_spanned(&expr, e))?,
                        );
                    } else {
                        let option = meta.path.to_token_stream().to_string();
                        return Err(meta.error(RecordModelError::UnknownFieldOption(option)));
                    }
                    Ok(())
                })?;
            }

            let key =
                rename.unwrap_or_else(|| translate::field_to_json_key(&name, options.rename_all));
            if !keys.insert(key.clone()) {
                return Err(syn::Error::new_spanned(
                    &ident,
                    RecordModelError::DuplicateKey(key),
                ));
            }

            fields.push(FieldModel {
                attrs,
                vis: field.vis,
                ident,
                name,
                ty: field.ty,
                inner_ty,
                kind,
                key,
                default,
            });
        }

        Ok(RecordModel {
            attrs: item.attrs,
            vis: item.vis,
            ident: item.ident,
            fields,
            options,
        })
    }

    #[cfg(test)]
    pub fn field(&self, name: &str) -> Option<&FieldModel> {
        self.fields.iter().find(|f| f.name == name)
    }
}

/// Classifies a field by its declared type: `Option<T>` is optional,
/// `Nullable<T>` is nullable, anything else is required.
fn classify(ty: &Type) -> syn::Result<(FieldKind, Type)> {
    let Type::Path(TypePath { qself: None, path }) = ty else {
        return Ok((FieldKind::Required, ty.clone()));
    };
    let Some(last) = path.segments.last() else {
        return Ok((FieldKind::Required, ty.clone()));
    };
    let kind = if last.ident == "Option" {
        FieldKind::Optional
    } else if last.ident == "Nullable" {
        FieldKind::Nullable
    } else {
        return Ok((FieldKind::Required, ty.clone()));
    };

    let missing = || {
        syn::Error::new_spanned(
            ty,
            RecordModelError::MissingTypeArgument(last.ident.to_string()),
        )
    };
    let PathArguments::AngleBracketed(args) = &last.arguments else {
        return Err(missing());
    };
    if args.args.len() != 1 {
        return Err(missing());
    }
    match args.args.first() {
        Some(GenericArgument::Type(inner)) => Ok((kind, inner.clone())),
        _ => Err(missing()),
    }
}
