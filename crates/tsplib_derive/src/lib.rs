mod keyword;
mod with_methods;

use proc_macro::TokenStream;

/// Maps a unit-variant enum onto TSPLIB95 keyword values.
///
/// Generates `Display`, an associated `KEYWORD` constant and a
/// `parse(&str) -> crate::TsplibResult<Self>` that reports unknown values as
/// `crate::TsplibError::UnsupportedFormat`.
#[proc_macro_derive(TsplibKeyword, attributes(tsplib))]
pub fn derive_tsplib_keyword(input: TokenStream) -> TokenStream {
    keyword::derive_tsplib_keyword_inner(input)
}

#[proc_macro_derive(WithMethods, attributes(with))]
pub fn derive_with_methods(input: TokenStream) -> TokenStream {
    with_methods::derive_with_methods_inner(input)
}
