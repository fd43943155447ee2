//! Field-level `#[orm(...)]` attribute parsing.

use syn::{Field, LitStr, Result, Token};

/// Parsed field attributes.
#[derive(Default)]
pub(crate) struct FieldAttr {
    pub primary_key: bool,
    pub column: Option<LitStr>,
}

impl syn::parse::Parse for FieldAttr {
    fn parse(input: syn::parse::ParseStream) -> Result<Self> {
        let mut attr = FieldAttr::default();

        while !input.is_empty() {
            let ident: syn::Ident = input.parse()?;
            if ident == "id" || ident == "primary_key" {
                attr.primary_key = true;
            } else if ident == "column" {
                let _: Token![=] = input.parse()?;
                attr.column = Some(input.parse()?);
            } else {
                return Err(syn::Error::new_spanned(
                    &ident,
                    format!("unknown orm attribute `{ident}` (expected id, primary_key or column)"),
                ));
            }

            if input.is_empty() {
                break;
            }
            let _: Token![,] = input.parse()?;
        }

        Ok(attr)
    }
}

/// Merge every `#[orm(...)]` on a field.
pub(crate) fn field_attr(field: &Field) -> Result<FieldAttr> {
    let mut merged = FieldAttr::default();
    for attr in &field.attrs {
        if !attr.path().is_ident("orm") {
            continue;
        }
        let parsed: FieldAttr = attr.parse_args()?;
        merged.primary_key |= parsed.primary_key;
        if parsed.column.is_some() {
            merged.column = parsed.column;
        }
    }
    Ok(merged)
}
