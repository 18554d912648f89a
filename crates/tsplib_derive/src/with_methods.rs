use proc_macro::TokenStream;
use quote::{format_ident, quote};
use syn::{
    Data, DeriveInput, Field, Fields, GenericArgument, Ident, PathArguments, Type,
    parse_macro_input, spanned::Spanned,
};

struct Setter<'a> {
    ident: Ident,
    ty: &'a Type,
    optional: bool,
}

fn is_skipped(field: &Field) -> syn::Result<bool> {
    let mut skip = false;

    for attr in &field.attrs {
        if !attr.path().is_ident("with") {
            continue;
        }

        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("skip") {
                skip = true;
                return Ok(());
            }
            Err(meta.error("unsupported with attribute; expected skip"))
        })?;
    }

    Ok(skip)
}

fn option_inner(ty: &Type) -> Option<&Type> {
    let Type::Path(type_path) = ty else {
        return None;
    };

    let segment = type_path.path.segments.last()?;
    if segment.ident != "Option" {
        return None;
    }

    let PathArguments::AngleBracketed(args) = &segment.arguments else {
        return None;
    };

    match args.args.first() {
        Some(GenericArgument::Type(inner)) if args.args.len() == 1 => Some(inner),
        _ => None,
    }
}

fn setter_tokens(setter: &Setter<'_>) -> proc_macro2::TokenStream {
    let field = &setter.ident;
    let method = format_ident!("with_{}", field);
    let ty = setter.ty;
    let value = if setter.optional {
        quote! { Some(#field.into()) }
    } else {
        quote! { #field.into() }
    };

    quote! {
        pub fn #method(mut self, #field: impl Into<#ty>) -> Self {
            self.#field = #value;
            self
        }
    }
}

pub fn derive_with_methods_inner(item: TokenStream) -> TokenStream {
    let input = parse_macro_input!(item as DeriveInput);
    let input_span = input.span();
    let struct_ident = input.ident.clone();
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    let Data::Struct(data_struct) = &input.data else {
        return syn::Error::new(input_span, "WithMethods can only be derived for structs")
            .to_compile_error()
            .into();
    };

    let Fields::Named(fields) = &data_struct.fields else {
        return syn::Error::new(
            struct_ident.span(),
            "WithMethods requires a struct with named fields",
        )
        .to_compile_error()
        .into();
    };

    let mut setters = Vec::new();
    for field in &fields.named {
        let Some(ident) = field.ident.clone() else {
            continue;
        };

        match is_skipped(field) {
            Ok(true) => continue,
            Ok(false) => {}
            Err(err) => return err.to_compile_error().into(),
        }

        let setter = match option_inner(&field.ty) {
            Some(inner) => Setter {
                ident,
                ty: inner,
                optional: true,
            },
            None => Setter {
                ident,
                ty: &field.ty,
                optional: false,
            },
        };
        setters.push(setter_tokens(&setter));
    }

    let expanded = quote! {
        impl #impl_generics #struct_ident #ty_generics #where_clause {
            #(#setters)*
        }
    };

    TokenStream::from(expanded)
}
