//! Entity derive macro implementation

use crate::attrs::field_attr;
use crate::sql_ident::{ColumnSet, parse_sql_ident_with_span, upper_case_first_char};
use proc_macro2::TokenStream;
use quote::quote;
use syn::ext::IdentExt;
use syn::spanned::Spanned;
use syn::{Data, DeriveInput, Fields, Result};

struct ColumnInfo {
    field: syn::Ident,
    name: String,
    primary_key: bool,
}

pub fn expand(input: DeriveInput) -> Result<TokenStream> {
    let name = &input.ident;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    let fields = match &input.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(fields) => &fields.named,
            _ => {
                return Err(syn::Error::new_spanned(
                    &input,
                    "Entity can only be derived for structs with named fields",
                ));
            }
        },
        _ => {
            return Err(syn::Error::new_spanned(
                &input,
                "Entity can only be derived for structs",
            ));
        }
    };

    let mut columns = Vec::with_capacity(fields.len());
    let mut seen = ColumnSet::default();
    for field in fields.iter() {
        let Some(field_ident) = field.ident.clone() else {
            continue;
        };
        let attr = field_attr(field)?;
        let column = match &attr.column {
            Some(lit) => parse_sql_ident_with_span(&lit.value(), lit.span(), "column")?,
            None => field_ident.unraw().to_string(),
        };
        seen.insert(&column, field.span())?;

        columns.push(ColumnInfo {
            field: field_ident,
            name: column,
            primary_key: attr.primary_key,
        });
    }

    if !columns.iter().any(|c| c.primary_key) {
        return Err(syn::Error::new_spanned(
            &input.ident,
            "Entity requires at least one #[orm(id)] field",
        ));
    }

    let column_defs = columns.iter().map(|c| {
        let col = &c.name;
        let pk = c.primary_key;
        quote! { pgrepo::Column { name: #col, primary_key: #pk } }
    });

    let request_pushes = columns.iter().map(|c| {
        let field = &c.field;
        let col = &c.name;
        quote! {
            request.push(#col, pgrepo::ToDbValue::to_db_value(&self.#field));
        }
    });

    let field_extracts = columns.iter().map(|c| {
        let field = &c.field;
        let column = upper_case_first_char(&c.name);
        quote! { #field: row.try_get_column(#column)? }
    });

    Ok(quote! {
        impl #impl_generics pgrepo::Entity for #name #ty_generics #where_clause {
            const COLUMNS: &'static [pgrepo::Column] = &[#(#column_defs),*];

            fn to_request(&self) -> pgrepo::Request {
                let mut request = pgrepo::Request::new();
                #(#request_pushes)*
                request
            }
        }

        impl #impl_generics pgrepo::FromRow for #name #ty_generics #where_clause {
            fn from_row(row: &pgrepo::tokio_postgres::Row) -> pgrepo::RepoResult<Self> {
                use pgrepo::RowExt;
                Ok(Self {
                    #(#field_extracts),*
                })
            }
        }
    })
}
