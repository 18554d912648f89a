use proc_macro::TokenStream;
use quote::quote;
use syn::{Data, DeriveInput, Fields, LitStr, parse_macro_input, spanned::Spanned};

const DEFAULT_SEPARATOR: &str = "_";

fn default_keyword_value(ident: &syn::Ident, separator: &str) -> String {
    let name = ident.to_string();
    let chars: Vec<char> = name.chars().collect();
    let mut out = String::with_capacity(chars.len() * (separator.len().max(1) + 1));

    for (idx, ch) in chars.iter().copied().enumerate() {
        if idx > 0 {
            let prev = chars[idx - 1];
            let next = chars.get(idx + 1).copied();
            let is_word_boundary = ch.is_ascii_uppercase()
                && (prev.is_ascii_lowercase()
                    || prev.is_ascii_digit()
                    || (prev.is_ascii_uppercase() && next.is_some_and(|n| n.is_ascii_lowercase())));

            if is_word_boundary {
                out.push_str(separator);
            }
        }

        out.push(ch.to_ascii_uppercase());
    }

    out
}

struct ContainerAttrs {
    keyword: Option<String>,
    separator: String,
}

fn parse_container_attrs(input: &DeriveInput) -> syn::Result<ContainerAttrs> {
    let mut attrs = ContainerAttrs {
        keyword: None,
        separator: DEFAULT_SEPARATOR.to_string(),
    };

    for attr in &input.attrs {
        if !attr.path().is_ident("tsplib") {
            continue;
        }

        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("keyword") {
                let lit: LitStr = meta.value()?.parse()?;
                attrs.keyword = Some(lit.value());
                return Ok(());
            }
            if meta.path.is_ident("separator") {
                let lit: LitStr = meta.value()?.parse()?;
                attrs.separator = lit.value();
                return Ok(());
            }

            Err(meta.error(
                "unsupported tsplib attribute on enum; expected keyword = \"...\" or separator = \"...\"",
            ))
        })?;
    }

    Ok(attrs)
}

pub fn derive_tsplib_keyword_inner(item: TokenStream) -> TokenStream {
    let input = parse_macro_input!(item as DeriveInput);
    let enum_ident = input.ident.clone();
    let attrs = match parse_container_attrs(&input) {
        Ok(value) => value,
        Err(err) => return err.to_compile_error().into(),
    };
    let keyword = attrs
        .keyword
        .unwrap_or_else(|| default_keyword_value(&enum_ident, &attrs.separator));

    let Data::Enum(data_enum) = input.data else {
        return syn::Error::new(input.span(), "TsplibKeyword can only be derived for enums")
            .to_compile_error()
            .into();
    };

    let mut display_arms = Vec::new();
    let mut parse_arms = Vec::new();
    let mut values = Vec::new();

    for variant in data_enum.variants {
        if !matches!(variant.fields, Fields::Unit) {
            return syn::Error::new(
                variant.span(),
                "TsplibKeyword only supports enums with unit variants",
            )
            .to_compile_error()
            .into();
        }

        let variant_ident = variant.ident.clone();
        let mut value: Option<LitStr> = None;

        for attr in &variant.attrs {
            if !attr.path().is_ident("tsplib") {
                continue;
            }
            match attr.parse_args::<LitStr>() {
                Ok(lit) => value = Some(lit),
                Err(_) => {
                    return syn::Error::new(attr.span(), "expected #[tsplib(\"...\")]")
                        .to_compile_error()
                        .into();
                }
            }
        }

        let value = value.unwrap_or_else(|| {
            LitStr::new(
                &default_keyword_value(&variant_ident, &attrs.separator),
                variant_ident.span(),
            )
        });

        display_arms.push(quote! {
            Self::#variant_ident => #value,
        });
        parse_arms.push(quote! {
            #value => Ok(Self::#variant_ident),
        });
        values.push(value);
    }

    let keyword_lit = LitStr::new(&keyword, enum_ident.span());

    let expanded = quote! {
        impl #enum_ident {
            /// TSPLIB95 keyword whose values this enum enumerates.
            pub const KEYWORD: &'static str = #keyword_lit;

            /// Every accepted value, in declaration order.
            pub const VALUES: &'static [&'static str] = &[#(#values),*];

            /// Parses a keyword value. Surrounding whitespace is ignored; the
            /// value itself must match exactly.
            pub fn parse(raw: &str) -> crate::TsplibResult<Self> {
                let value = raw.trim();
                match value {
                    #(#parse_arms)*
                    _ => Err(crate::TsplibError::unsupported_format(Self::KEYWORD, value)),
                }
            }
        }

        impl std::fmt::Display for #enum_ident {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                let val = match self {
                    #(#display_arms)*
                };
                write!(f, "{val}")
            }
        }
    };

    TokenStream::from(expanded)
}

#[cfg(test)]
mod tests {
    use super::default_keyword_value;
    use quote::format_ident;

    #[test]
    fn uppercases_single_word() {
        assert_eq!(
            default_keyword_value(&format_ident!("Explicit"), "_"),
            "EXPLICIT"
        );
    }

    #[test]
    fn splits_layout_names_on_word_boundaries() {
        assert_eq!(
            default_keyword_value(&format_ident!("FullMatrix"), "_"),
            "FULL_MATRIX"
        );
        assert_eq!(
            default_keyword_value(&format_ident!("LowerDiagCol"), "_"),
            "LOWER_DIAG_COL"
        );
    }

    #[test]
    fn digits_do_not_open_a_new_word() {
        assert_eq!(default_keyword_value(&format_ident!("Xray1"), "_"), "XRAY1");
    }

    #[test]
    fn keeps_acronyms_intact() {
        assert_eq!(
            default_keyword_value(&format_ident!("CVRPInstance"), "_"),
            "CVRP_INSTANCE"
        );
    }

    #[test]
    fn supports_custom_separator() {
        assert_eq!(
            default_keyword_value(&format_ident!("EdgeWeightSection"), " "),
            "EDGE WEIGHT SECTION"
        );
    }
}
