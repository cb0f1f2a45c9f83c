use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::quote;
use syn::ext::IdentExt;
use syn::{Data, DeriveInput, Fields, Index, LitStr, parse_macro_input};

/// One field as seen by the derive: its name, how to reach it, and its tags.
struct TaggedField {
    name: String,
    access: TokenStream2,
    tags: Vec<(String, LitStr)>,
}

pub fn record_derive_impl(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);

    match expand(&input) {
        Ok(tokens) => TokenStream::from(tokens),
        Err(err) => TokenStream::from(err.to_compile_error()),
    }
}

fn expand(input: &DeriveInput) -> syn::Result<TokenStream2> {
    let name = &input.ident;
    let name_str = name.to_string();
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    let fields = match &input.data {
        Data::Struct(data) => collect_fields(&data.fields)?,
        _ => {
            return Err(syn::Error::new_spanned(
                name,
                "Record can only be derived for structs",
            ));
        }
    };

    let entries = fields.iter().map(|field| {
        let field_name = &field.name;
        let access = &field.access;
        let keys = field.tags.iter().map(|(key, _)| key);
        let values = field.tags.iter().map(|(_, value)| value);

        // untagged fields are never inspected
        let value = if field.tags.is_empty() {
            quote! { ::fieldtag::Value::Invalid }
        } else {
            quote! { ::fieldtag::Inspect::to_value(&self.#access) }
        };

        quote! {
            ::fieldtag::Field::new(
                #field_name,
                &[#((#keys, #values)),*],
                #value,
            )
        }
    });

    Ok(quote! {
        impl #impl_generics ::fieldtag::Record for #name #ty_generics #where_clause {
            fn fields(&self) -> ::std::vec::Vec<::fieldtag::Field<'_>> {
                ::std::vec![#(#entries),*]
            }

            fn record_name(&self) -> &'static str {
                #name_str
            }
        }

        impl #impl_generics ::fieldtag::Inspect for #name #ty_generics #where_clause {
            fn to_value(&self) -> ::fieldtag::Value<'_> {
                ::fieldtag::Value::Struct(self)
            }
        }
    })
}

fn collect_fields(fields: &Fields) -> syn::Result<Vec<TaggedField>> {
    let mut collected = Vec::new();

    for (index, field) in fields.iter().enumerate() {
        let (name, access) = match &field.ident {
            // `r#type` reports as `type`
            Some(ident) => (ident.unraw().to_string(), quote! { #ident }),
            None => {
                let idx = Index::from(index);
                (index.to_string(), quote! { #idx })
            }
        };

        let mut tags: Vec<(String, LitStr)> = Vec::new();
        for attr in field.attrs.iter().filter(|a| a.path().is_ident("tag")) {
            attr.parse_nested_meta(|meta| {
                let key = meta
                    .path
                    .get_ident()
                    .map(|ident| ident.to_string())
                    .ok_or_else(|| meta.error("tag key must be a plain identifier"))?;
                let value: LitStr = meta.value()?.parse()?;

                // first occurrence of a key wins
                if !tags.iter().any(|(existing, _)| *existing == key) {
                    tags.push((key, value));
                }
                Ok(())
            })?;
        }

        collected.push(TaggedField { name, access, tags });
    }

    Ok(collected)
}
