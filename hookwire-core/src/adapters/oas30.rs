use std::{collections::HashSet, io::Read, str::FromStr};

use hookwire_model::{FieldKind, Record};
use openapiv3::{OpenAPI, ReferenceOr, Schema, SchemaKind, Type};

use crate::{
    adapters::{OASMajorVersion, OpenApiError},
    oasprobe::probe_oas_version,
    table::{SchemaTable, TableEntry, TableMismatch},
    translate,
};

const SCHEMA_REF_PREFIX: &str = "#/components/schemas/";

/// An OpenAPI 3.0 document, used as the source of record field tables.
pub struct OAS30Spec {
    openapi: OpenAPI,
}

impl FromStr for OAS30Spec {
    type Err = OpenApiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match probe_oas_version(s)? {
            OASMajorVersion::OAS30 => (),
        }
        // YAML is a superset of JSON, so this covers both encodings
        let openapi: OpenAPI = serde_yaml::from_str(s)?;
        log::debug!(
            "loaded OpenAPI document '{}' with {} component schemas",
            openapi.info.title,
            openapi.components.as_ref().map_or(0, |c| c.schemas.len())
        );
        Ok(openapi.into())
    }
}

impl From<OpenAPI> for OAS30Spec {
    fn from(openapi: OpenAPI) -> Self {
        OAS30Spec { openapi }
    }
}

/// Properties and required keys gathered from an object schema, including
/// everything pulled in through `allOf`.
#[derive(Default)]
struct ObjectShape<'a> {
    properties: Vec<(&'a str, &'a ReferenceOr<Box<Schema>>)>,
    required: Vec<&'a str>,
}

impl OAS30Spec {
    pub fn from_reader(mut r: impl Read) -> Result<Self, OpenApiError> {
        let mut s = String::new();
        r.read_to_string(&mut s)?;
        s.parse()
    }

    pub fn schema_names(&self) -> impl Iterator<Item = &str> {
        self.openapi
            .components
            .iter()
            .flat_map(|c| c.schemas.keys())
            .map(String::as_str)
    }

    fn component(&self, name: &str) -> Option<&ReferenceOr<Schema>> {
        self.openapi
            .components
            .as_ref()
            .and_then(|c| c.schemas.get(name))
    }

    fn named_schema(&self, name: &str) -> Result<&Schema, OpenApiError> {
        let schema_ref = self
            .component(name)
            .ok_or_else(|| OpenApiError::UnknownSchema(name.to_string()))?;
        self.resolve(schema_ref)
    }

    /// Follows a chain of `$ref`s to the schema it ends in. A chain that
    /// comes back to a name it already passed is unresolvable.
    fn resolve_reference<'a>(
        &'a self,
        reference: &'a str,
    ) -> Result<&'a Schema, OpenApiError> {
        let unresolved = || OpenApiError::UnresolvedReference(reference.to_string());
        let mut seen = HashSet::new();
        let mut current = reference;
        loop {
            let name = current
                .strip_prefix(SCHEMA_REF_PREFIX)
                .ok_or_else(unresolved)?;
            if !seen.insert(name) {
                log::debug!("reference cycle through '{name}' starting at '{reference}'");
                return Err(unresolved());
            }
            match self.component(name).ok_or_else(unresolved)? {
                ReferenceOr::Item(schema) => return Ok(schema),
                ReferenceOr::Reference { reference: next } => current = next.as_str(),
            }
        }
    }

    fn resolve<'a>(
        &'a self,
        schema_ref: &'a ReferenceOr<Schema>,
    ) -> Result<&'a Schema, OpenApiError> {
        match schema_ref {
            ReferenceOr::Item(schema) => Ok(schema),
            ReferenceOr::Reference { reference } => self.resolve_reference(reference),
        }
    }

    fn resolve_boxed<'a>(
        &'a self,
        schema_ref: &'a ReferenceOr<Box<Schema>>,
    ) -> Result<&'a Schema, OpenApiError> {
        match schema_ref {
            ReferenceOr::Item(schema) => Ok(&**schema),
            ReferenceOr::Reference { reference } => self.resolve_reference(reference),
        }
    }

    /// `path` holds the names of the schemas whose `allOf` is being merged,
    /// outermost first.
    fn collect_shape<'a>(
        &'a self,
        name: &str,
        schema: &'a Schema,
        shape: &mut ObjectShape<'a>,
        path: &mut Vec<&'a str>,
    ) -> Result<(), OpenApiError> {
        match &schema.schema_kind {
            SchemaKind::Type(Type::Object(obj)) => {
                shape
                    .properties
                    .extend(obj.properties.iter().map(|(k, v)| (k.as_str(), v)));
                shape.required.extend(obj.required.iter().map(String::as_str));
            }
            SchemaKind::Any(any) if !any.properties.is_empty() => {
                shape
                    .properties
                    .extend(any.properties.iter().map(|(k, v)| (k.as_str(), v)));
                shape.required.extend(any.required.iter().map(String::as_str));
            }
            SchemaKind::AllOf { all_of } => {
                for part in all_of {
                    match part {
                        ReferenceOr::Reference { reference } => {
                            let part_name = reference
                                .strip_prefix(SCHEMA_REF_PREFIX)
                                .unwrap_or(reference.as_str());
                            if path.contains(&part_name) {
                                return Err(OpenApiError::UnresolvedReference(
                                    reference.clone(),
                                ));
                            }
                            path.push(part_name);
                            let part = self.resolve_reference(reference)?;
                            self.collect_shape(name, part, shape, path)?;
                            path.pop();
                        }
                        ReferenceOr::Item(part) => self.collect_shape(name, part, shape, path)?,
                    }
                }
            }
            _ => return Err(OpenApiError::NotAnObject(name.to_string())),
        }
        Ok(())
    }

    /// Derives the field-classification table of a component schema.
    ///
    /// A property marked `nullable` is classified nullable whether or not
    /// it is required; otherwise required properties are required and the
    /// rest optional.
    pub fn schema_table(&self, name: &str) -> Result<SchemaTable, OpenApiError> {
        let (root, _) = self
            .openapi
            .components
            .as_ref()
            .and_then(|c| c.schemas.get_key_value(name))
            .ok_or_else(|| OpenApiError::UnknownSchema(name.to_string()))?;
        let schema = self.named_schema(name)?;
        let mut shape = ObjectShape::default();
        self.collect_shape(name, schema, &mut shape, &mut vec![root.as_str()])?;

        let mut table = SchemaTable::new(name);
        for (key, property) in shape.properties {
            let property = self.resolve_boxed(property)?;
            let kind = if property.schema_data.nullable {
                FieldKind::Nullable
            } else if shape.required.contains(&key) {
                FieldKind::Required
            } else {
                FieldKind::Optional
            };
            table.insert(TableEntry {
                key: key.to_string(),
                name: translate::json_key_to_rust_fieldname(key),
                kind,
                default: property.schema_data.default.clone(),
            });
        }
        log::trace!("schema '{name}' has {} fields", table.len());
        Ok(table)
    }

    /// Compares a record's compiled field table with the component schema
    /// it was declared from.
    pub fn check_record<R: Record>(
        &self,
        schema_name: &str,
    ) -> Result<Vec<TableMismatch>, OpenApiError> {
        let mismatches = self.schema_table(schema_name)?.diff(&R::SCHEMA);
        for m in &mismatches {
            log::warn!("{} does not match schema '{schema_name}': {m}", R::SCHEMA.name);
        }
        Ok(mismatches)
    }
}
