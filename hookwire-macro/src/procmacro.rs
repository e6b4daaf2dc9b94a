use hookwire_core::{RecordOptions, RenameRule};
use proc_macro2::TokenStream;
use quote::ToTokens;
use syn::{
    Expr, ExprLit, MetaNameValue,
    parse::{Parse, ParseStream},
    punctuated::Punctuated,
    spanned::Spanned,
    token::Comma,
};

// Arguments given to `#[record(...)]`
#[derive(Default, Debug, PartialEq)]
pub struct RecordArgs {
    rename_all: Option<String>,
    lenient: bool,
    crate_path: Option<String>,
}

trait ExprInto<T> {
    fn expr_into(&self) -> Option<T>;
}

impl ExprInto<String> for Expr {
    fn expr_into(&self) -> Option<String> {
        if let Expr::Lit(ExprLit {
            attrs: _,
            lit: syn::Lit::Str(lit_str),
        }) = self
        {
            Some(lit_str.value())
        } else {
            None
        }
    }
}

impl ExprInto<bool> for Expr {
    fn expr_into(&self) -> Option<bool> {
        if let Expr::Lit(ExprLit {
            attrs: _,
            lit: syn::Lit::Bool(lit_bool),
        }) = self
        {
            Some(lit_bool.value())
        } else {
            None
        }
    }
}

impl Parse for RecordArgs {
    fn parse(input: ParseStream) -> syn::Result<Self> {
        let mut args = Self::default();

        let kv_pairs = Punctuated::<MetaNameValue, Comma>::parse_terminated(input)?;

        for name_value in kv_pairs {
            let name = name_value.path.to_token_stream().to_string();

            match name.as_str() {
                "rename_all" => {
                    args.rename_all = Some(name_value.value.expr_into().ok_or(syn::Error::new(
                        name_value.span(),
                        "'rename_all' expects a string literal as argument",
                    ))?);
                }
                "lenient" => {
                    args.lenient = name_value.value.expr_into().ok_or(syn::Error::new(
                        name_value.span(),
                        "'lenient' expects a bool as argument",
                    ))?;
                }
                "crate" => {
                    args.crate_path = Some(name_value.value.expr_into().ok_or(syn::Error::new(
                        name_value.span(),
                        "'crate' expects a string literal as argument",
                    ))?);
                }
                _ => {
                    return Err(syn::Error::new(
                        name_value.span(),
                        format!("unknown parameter: {}", name),
                    ));
                }
            }
        }

        Ok(args)
    }
}

impl RecordArgs {
    fn into_options(self) -> syn::Result<RecordOptions> {
        let mut options = RecordOptions {
            lenient: self.lenient,
            ..RecordOptions::default()
        };
        if let Some(rule) = self.rename_all {
            options.rename_all = rule
                .parse::<RenameRule>()
                .map_err(|e| syn::Error::new(proc_macro2::Span::call_site(), e))?;
        }
        if let Some(path) = self.crate_path {
            options.crate_path = syn::parse_str(&path)?;
        }
        Ok(options)
    }
}

pub(crate) fn parse_options(args: TokenStream) -> syn::Result<RecordOptions> {
    let args: RecordArgs = syn::parse2(args)?;
    args.into_options()
}

pub(crate) fn expand(args: TokenStream, item: TokenStream) -> syn::Result<TokenStream> {
    let options = parse_options(args)?;
    hookwire_core::expand_record(options, item)
}

#[test]
pub fn test_parse_options() {
    let options = parse_options(TokenStream::new()).unwrap();
    assert_eq!(RecordOptions::default(), options);

    let macro_args = quote::quote!(rename_all = "snake_case", lenient = true);
    let options = parse_options(macro_args).unwrap();
    assert_eq!(
        RecordOptions {
            rename_all: RenameRule::SnakeCase,
            lenient: true,
            ..Default::default()
        },
        options
    );

    let macro_args = quote::quote!(crate = "crate::wire");
    let options = parse_options(macro_args).unwrap();
    assert_eq!(
        syn::parse_str::<syn::Path>("crate::wire").unwrap(),
        options.crate_path
    );

    // error on unknown params and bad values
    parse_options(quote::quote!(xxx = "camelCase")).unwrap_err();
    parse_options(quote::quote!(lenient = "yes")).unwrap_err();
    parse_options(quote::quote!(rename_all = "kebab-case")).unwrap_err();
}
