use proc_macro2::TokenStream;
use syn::ItemStruct;

mod codewriter;
mod oasprobe;
mod recordmodel;
mod table;

pub mod adapters;
pub mod translate;

pub use adapters::OpenApiError;
#[cfg(feature = "oas30")]
pub use adapters::oas30::OAS30Spec;
pub use oasprobe::OasProbeError;
pub use recordmodel::{RecordModelError, RecordOptions};
pub use table::{SchemaTable, TableEntry, TableMismatch};
pub use translate::RenameRule;

/// Expands the body of a `#[record]` item: the struct itself with serde
/// attributes, its `Record` implementation and its inherent constructors
/// and accessors.
pub fn expand_record(options: RecordOptions, item: TokenStream) -> syn::Result<TokenStream> {
    let item: ItemStruct = syn::parse2(item)?;
    let model = recordmodel::RecordModel::from_item(item, options)?;
    log::debug!(
        "expanding record {} with {} fields",
        model.ident,
        model.fields.len()
    );
    Ok(codewriter::write_record(&model))
}

#[cfg(test)]
mod test;
