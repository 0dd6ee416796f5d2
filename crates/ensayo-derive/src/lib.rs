//! Ensayo Derive Macros: Static Field-Descriptor Tables
//!
//! This crate provides `#[derive(Model)]`, which turns a plain struct with
//! named fields into a generatable test-data model. The macro writes the
//! model's field table at compile time, so the generator never inspects
//! types at runtime.
//!
//! # Attributes
//!
//! Struct level:
//!
//! - `#[ensayo(name = "CustomName")]` - Override the model name used in logs and errors
//! - `#[ensayo(construct = "path::to::fn")]` - Build the empty instance with a
//!   fallible `fn() -> EnsayoResult<Self>` instead of `Default::default()`
//!
//! Field level:
//!
//! - `#[ensayo(skip)]` - Never written by the generator
//! - `#[ensayo(param)]` - Takes the next positional parameter, when one is left
//! - `#[ensayo(random)]` - Filled with a random string or integer
//! - `#[ensayo(opaque)]` - Field type has no generator mapping; always left alone
//!
//! `param` and `random` may be combined: `#[ensayo(param, random)]`.
//!
//! # Example
//!
//! ```ignore
//! use ensayo::Model;
//!
//! #[derive(Debug, Clone, Default, Model)]
//! struct Role {
//!     #[ensayo(param)]
//!     role_id: Option<String>,
//!     #[ensayo(param)]
//!     scope: Option<String>,
//! }
//!
//! let role: Role = ensayo::generate_with(ensayo::params!["PROJECT_ADMIN", "p:proj1"])?;
//! ```

use proc_macro::TokenStream;
use proc_macro2::Literal;
use quote::quote;
use syn::{parse_macro_input, Attribute, Data, DeriveInput, Fields, Ident, LitStr, Type};

/// Derive macro for generatable test-data models.
///
/// Generates the `ensayo::Model` trait implementation:
/// - `TAG` - model identity (name plus runtime type) used by reuse-pool lookups
/// - `FIELDS` - ordered field descriptors in declaration order
/// - `construct()` - the empty instance the generator fills in
/// - `write_field()` - index-addressed field assignment
#[proc_macro_derive(Model, attributes(ensayo))]
pub fn derive_model(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    expand_model(&input)
        .unwrap_or_else(syn::Error::into_compile_error)
        .into()
}

fn expand_model(input: &DeriveInput) -> syn::Result<proc_macro2::TokenStream> {
    let name = &input.ident;

    if !input.generics.params.is_empty() {
        return Err(syn::Error::new_spanned(
            &input.generics,
            "Model cannot be derived for generic types",
        ));
    }

    let model_attrs = parse_model_attributes(&input.attrs)?;
    let model_name = model_attrs.name.unwrap_or_else(|| name.to_string());
    let fields = extract_fields(&input.data, name)?;

    let descriptors = fields.iter().map(|field| {
        let field_name = field.ident.to_string();
        let ty = &field.ty;
        let declared = if field.policy.skip || field.policy.opaque {
            quote! { ::ensayo::DeclaredType::Other(::core::stringify!(#ty)) }
        } else {
            quote! { <#ty as ::ensayo::FieldType>::DECLARED }
        };
        let skip = field.policy.skip;
        let param = field.policy.param;
        let random = field.policy.random;
        quote! {
            ::ensayo::FieldDescriptor::new(
                #field_name,
                #declared,
                ::ensayo::PolicyTags::new(#skip, #param, #random),
            )
        }
    });

    let write_arms = fields
        .iter()
        .enumerate()
        .filter(|(_, field)| !field.policy.skip && !field.policy.opaque)
        .map(|(index, field)| {
            let index = Literal::usize_unsuffixed(index);
            let ident = &field.ident;
            let field_name = ident.to_string();
            quote! {
                #index => ::ensayo::FieldType::assign(&mut self.#ident, value).map_err(|message| {
                    ::ensayo::EnsayoError::field_access(#model_name, #field_name, message)
                }),
            }
        });

    let construct = match model_attrs.construct {
        Some(path) => quote! { #path() },
        None => quote! { ::core::result::Result::Ok(<Self as ::core::default::Default>::default()) },
    };

    Ok(quote! {
        impl ::ensayo::Model for #name {
            const TAG: ::ensayo::ModelTag = ::ensayo::ModelTag::of::<Self>(
                #model_name,
                ::core::concat!(::core::module_path!(), "::", ::core::stringify!(#name)),
            );

            const FIELDS: &'static [::ensayo::FieldDescriptor] = &[#(#descriptors),*];

            fn construct() -> ::ensayo::EnsayoResult<Self> {
                #construct
            }

            #[allow(unused_variables)]
            fn write_field(
                &mut self,
                index: usize,
                value: ::ensayo::FieldValue,
            ) -> ::ensayo::EnsayoResult<()> {
                match index {
                    #(#write_arms)*
                    _ => ::core::result::Result::Err(::ensayo::EnsayoError::field_access(
                        #model_name,
                        "<unknown>",
                        ::std::format!("no writable field at index {}", index),
                    )),
                }
            }
        }
    })
}

// ============================================================================
// Helper Functions
// ============================================================================

/// Struct-level `#[ensayo(...)]` settings
#[derive(Default)]
struct ModelAttributes {
    name: Option<String>,
    construct: Option<syn::Path>,
}

/// Field-level policy flags from `#[ensayo(...)]`
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
struct FieldPolicy {
    skip: bool,
    param: bool,
    random: bool,
    opaque: bool,
}

struct FieldInfo {
    ident: Ident,
    ty: Type,
    policy: FieldPolicy,
}

/// Parse `#[ensayo(name = "...", construct = "...")]` on the struct
fn parse_model_attributes(attrs: &[Attribute]) -> syn::Result<ModelAttributes> {
    let mut parsed = ModelAttributes::default();

    for attr in attrs.iter().filter(|attr| attr.path().is_ident("ensayo")) {
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("name") {
                let value: LitStr = meta.value()?.parse()?;
                parsed.name = Some(value.value());
                Ok(())
            } else if meta.path.is_ident("construct") {
                let value: LitStr = meta.value()?.parse()?;
                parsed.construct = Some(value.parse()?);
                Ok(())
            } else {
                Err(meta.error("expected `name` or `construct`"))
            }
        })?;
    }

    Ok(parsed)
}

/// Parse `#[ensayo(skip | param | random | opaque)]` on a field
fn parse_field_policy(attrs: &[Attribute]) -> syn::Result<FieldPolicy> {
    let mut policy = FieldPolicy::default();

    for attr in attrs.iter().filter(|attr| attr.path().is_ident("ensayo")) {
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("skip") {
                policy.skip = true;
            } else if meta.path.is_ident("param") {
                policy.param = true;
            } else if meta.path.is_ident("random") {
                policy.random = true;
            } else if meta.path.is_ident("opaque") {
                policy.opaque = true;
            } else {
                return Err(meta.error("expected `skip`, `param`, `random` or `opaque`"));
            }
            Ok(())
        })?;
    }

    Ok(policy)
}

/// Extract named fields, in declaration order, with their policies
fn extract_fields(data: &Data, name: &Ident) -> syn::Result<Vec<FieldInfo>> {
    let Data::Struct(data_struct) = data else {
        return Err(syn::Error::new_spanned(
            name,
            "Model can only be derived for structs",
        ));
    };

    match &data_struct.fields {
        Fields::Named(fields) => fields
            .named
            .iter()
            .map(|field| {
                let ident = field
                    .ident
                    .clone()
                    .ok_or_else(|| syn::Error::new_spanned(field, "expected a named field"))?;
                Ok(FieldInfo {
                    ident,
                    ty: field.ty.clone(),
                    policy: parse_field_policy(&field.attrs)?,
                })
            })
            .collect(),
        Fields::Unit => Ok(Vec::new()),
        Fields::Unnamed(_) => Err(syn::Error::new_spanned(
            name,
            "Model requires named fields; field order and names drive generation",
        )),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn field_attrs(tokens: proc_macro2::TokenStream) -> Vec<Attribute> {
        let input: DeriveInput = syn::parse_quote! {
            struct Probe {
                #tokens
                value: Option<String>,
            }
        };
        match input.data {
            Data::Struct(data) => data
                .fields
                .into_iter()
                .next()
                .map(|field| field.attrs)
                .unwrap_or_default(),
            _ => Vec::new(),
        }
    }

    #[test]
    fn test_field_policy_flags() {
        let policy = parse_field_policy(&field_attrs(quote! { #[ensayo(param, random)] })).unwrap();
        assert!(policy.param);
        assert!(policy.random);
        assert!(!policy.skip);
        assert!(!policy.opaque);
    }

    #[test]
    fn test_field_policy_default_is_untagged() {
        let policy = parse_field_policy(&field_attrs(quote! { #[serde(default)] })).unwrap();
        assert_eq!(policy, FieldPolicy::default());
    }

    #[test]
    fn test_field_policy_rejects_unknown_flag() {
        let result = parse_field_policy(&field_attrs(quote! { #[ensayo(sometimes)] }));
        assert!(result.is_err());
    }

    #[test]
    fn test_model_attributes() {
        let input: DeriveInput = syn::parse_quote! {
            #[ensayo(name = "NewProjectDescription", construct = "Project::empty")]
            struct Project {
                id: Option<String>,
            }
        };
        let attrs = parse_model_attributes(&input.attrs).unwrap();
        assert_eq!(attrs.name.as_deref(), Some("NewProjectDescription"));
        assert!(attrs.construct.is_some());
    }

    #[test]
    fn test_extract_fields_keeps_declaration_order() {
        let input: DeriveInput = syn::parse_quote! {
            struct BuildType {
                #[ensayo(random)]
                id: Option<String>,
                #[ensayo(random)]
                name: Option<String>,
                project: Option<Rc<Project>>,
                #[ensayo(skip)]
                steps: Option<Rc<Steps>>,
            }
        };
        let fields = extract_fields(&input.data, &input.ident).unwrap();
        let names: Vec<String> = fields.iter().map(|f| f.ident.to_string()).collect();
        assert_eq!(names, ["id", "name", "project", "steps"]);
        assert!(fields[3].policy.skip);
    }

    #[test]
    fn test_tuple_structs_rejected() {
        let input: DeriveInput = syn::parse_quote! {
            struct Pair(String, String);
        };
        assert!(extract_fields(&input.data, &input.ident).is_err());
    }

    #[test]
    fn test_generic_models_rejected() {
        let input: DeriveInput = syn::parse_quote! {
            struct Wrapper<T> {
                inner: Option<T>,
            }
        };
        assert!(expand_model(&input).is_err());
    }
}
