#![doc = include_str!("../README.md")]

mod fixture;
mod injectable;

use proc_macro::TokenStream;

#[proc_macro_derive(Injectable)]
pub fn derive_injectable(item: TokenStream) -> TokenStream {
    injectable::expand(item.into())
        .unwrap_or_else(|err| err.to_compile_error())
        .into()
}

#[proc_macro_derive(Fixture, attributes(subject, mock, fake))]
pub fn derive_fixture(item: TokenStream) -> TokenStream {
    fixture::expand(item.into())
        .unwrap_or_else(|err| err.to_compile_error())
        .into()
}
