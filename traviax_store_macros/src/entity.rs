use proc_macro2::TokenStream;
use quote::quote;
use syn::{Data, DeriveInput, Fields, Ident, LitStr};

pub fn expand(input: &DeriveInput) -> syn::Result<TokenStream> {
    let name = &input.ident;
    let collection = collection_name(input)?;
    let id_field = id_field(input)?;

    Ok(quote! {
        impl ::traviax_store::Entity for #name {
            const COLLECTION: &'static str = #collection;

            fn id(&self) -> &str {
                &self.#id_field
            }
        }
    })
}

fn collection_name(input: &DeriveInput) -> syn::Result<String> {
    for attr in &input.attrs {
        if !attr.path().is_ident("entity") {
            continue;
        }

        let mut collection = None;
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("collection") {
                let value: LitStr = meta.value()?.parse()?;
                collection = Some(value.value());
                Ok(())
            } else {
                Err(meta.error("expected `collection = \"...\"`"))
            }
        })?;

        if let Some(collection) = collection {
            return Ok(collection);
        }
    }

    Ok(format!("{}s", to_snake_case(&input.ident.to_string())))
}

fn id_field(input: &DeriveInput) -> syn::Result<Ident> {
    let fields = match &input.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(fields) => &fields.named,
            _ => {
                return Err(syn::Error::new_spanned(
                    &input.ident,
                    "Entity derive requires a struct with named fields",
                ))
            }
        },
        _ => {
            return Err(syn::Error::new_spanned(
                &input.ident,
                "Entity derive only supports structs",
            ))
        }
    };

    for field in fields {
        for attr in field.attrs.iter().filter(|a| a.path().is_ident("entity")) {
            let mut marked = false;
            attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("id") {
                    marked = true;
                    Ok(())
                } else {
                    Err(meta.error("expected `id`"))
                }
            })?;
            if marked {
                if let Some(ident) = &field.ident {
                    return Ok(ident.clone());
                }
            }
        }
    }

    fields
        .iter()
        .filter_map(|field| field.ident.as_ref())
        .find(|ident| *ident == "id")
        .cloned()
        .ok_or_else(|| {
            syn::Error::new_spanned(
                &input.ident,
                "no field marked with #[entity(id)] and no field named `id`",
            )
        })
}

fn to_snake_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 4);
    for (i, ch) in s.chars().enumerate() {
        if ch.is_uppercase() {
            if i > 0 {
                out.push('_');
            }
            out.extend(ch.to_lowercase());
        } else {
            out.push(ch);
        }
    }
    out
}
