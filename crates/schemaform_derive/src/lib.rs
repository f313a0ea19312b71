use proc_macro::TokenStream;
use proc_macro2::{Ident, Span, TokenStream as TokenStream2};
use proc_macro_crate::{FoundCrate, crate_name};
use quote::quote;
use syn::{Data, DeriveInput, Fields, LitStr, parse_macro_input};

#[derive(Default)]
struct FieldAttrs {
    title: Option<String>,
    description: Option<String>,
    required: bool,
}

#[proc_macro_derive(FormSchema, attributes(schema))]
pub fn derive_form_schema(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);

    if !input.generics.params.is_empty() {
        return syn::Error::new_spanned(
            input.ident,
            "FormSchema derive currently supports only non-generic structs",
        )
        .to_compile_error()
        .into();
    }

    let model_ident = input.ident;

    let named_fields = match input.data {
        Data::Struct(data) => match data.fields {
            Fields::Named(fields) => fields.named,
            _ => {
                return syn::Error::new(
                    Span::call_site(),
                    "FormSchema derive requires a struct with named fields",
                )
                .to_compile_error()
                .into();
            }
        },
        _ => {
            return syn::Error::new(
                Span::call_site(),
                "FormSchema derive is only supported on structs",
            )
            .to_compile_error()
            .into();
        }
    };

    let schemaform = schemaform_path();
    let mut property_entries = Vec::new();

    for field in named_fields {
        let Some(field_ident) = field.ident else {
            continue;
        };
        let field_ty = field.ty;
        let field_name = field_ident.to_string();

        let attrs = match parse_field_attrs(&field.attrs) {
            Ok(attrs) => attrs,
            Err(error) => return error.to_compile_error().into(),
        };

        let title = attrs
            .title
            .unwrap_or_else(|| humanize_field_name(&field_name));
        let mut property = quote! {
            <#field_ty as #schemaform::schema::SchemaType>::property().title(#title)
        };
        if let Some(description) = attrs.description {
            property = quote! { #property.description(#description) };
        }
        if attrs.required {
            property = quote! { #property.required(true) };
        }

        property_entries.push(quote! { (#field_name, #property) });
    }

    quote! {
        impl #schemaform::schema::HasSchema for #model_ident {
            fn schema() -> #schemaform::schema::Property {
                #schemaform::schema::Property::map([#(#property_entries),*])
            }
        }

        impl #schemaform::schema::SchemaType for #model_ident {
            fn property() -> #schemaform::schema::Property {
                <#model_ident as #schemaform::schema::HasSchema>::schema()
            }
        }
    }
    .into()
}

fn parse_field_attrs(attrs: &[syn::Attribute]) -> syn::Result<FieldAttrs> {
    let mut parsed = FieldAttrs::default();
    for attr in attrs {
        if !attr.path().is_ident("schema") {
            continue;
        }
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("title") {
                let value: LitStr = meta.value()?.parse()?;
                parsed.title = Some(value.value());
                return Ok(());
            }
            if meta.path.is_ident("description") {
                let value: LitStr = meta.value()?.parse()?;
                parsed.description = Some(value.value());
                return Ok(());
            }
            if meta.path.is_ident("required") {
                parsed.required = true;
                return Ok(());
            }
            Err(meta.error("unsupported schema attribute"))
        })?;
    }
    Ok(parsed)
}

fn schemaform_path() -> TokenStream2 {
    match crate_name("schemaform") {
        Ok(FoundCrate::Name(name)) => {
            let ident = Ident::new(&name, Span::call_site());
            quote!(::#ident)
        }
        Ok(FoundCrate::Itself) => quote!(crate),
        Err(_) => quote!(::schemaform),
    }
}

fn humanize_field_name(input: &str) -> String {
    let mut words = Vec::new();
    for segment in input.split('_') {
        if !segment.is_empty() {
            words.push(segment);
        }
    }
    let mut out = String::new();
    for (index, word) in words.iter().enumerate() {
        if index > 0 {
            out.push(' ');
        }
        if index == 0 {
            let mut chars = word.chars();
            if let Some(first) = chars.next() {
                out.push(first.to_ascii_uppercase());
                out.push_str(chars.as_str());
            }
        } else {
            out.push_str(word);
        }
    }
    out
}
