// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! `FilterShape` implementation generation.
//!
//! # Generated Code
//!
//! ```rust,ignore
//! impl ::docshape_core::FilterShape for UserFilter {
//!     const NAME: &'static str = "UserFilter";
//!
//!     fn params() -> &'static [ParamSpec] {
//!         static PARAMS: [ParamSpec; 2] = [
//!             ParamSpec::new("id", 0).multi(<Vec<String> as FilterParam>::MULTI),
//!             ParamSpec::new("username", 1).op(FilterOp::Like).multi(...),
//!         ];
//!         &PARAMS
//!     }
//!
//!     fn paging_ordinal() -> Option<usize> { Some(2) }
//!
//!     fn assign(&mut self, ordinal: usize, values: &[String]) -> Result<(), ParamError> {
//!         match ordinal {
//!             0 => FilterParam::assign(&mut self.id, values),
//!             1 => FilterParam::assign(&mut self.username, values),
//!             _ => Ok(())
//!         }
//!     }
//!     // paging, paging_mut, predicate, encode
//! }
//! ```

use proc_macro2::TokenStream;
use quote::quote;

use super::parse::{FilterDef, ParamDef, ParamOp};

/// Generate the `FilterShape` implementation.
pub fn generate(filter: &FilterDef) -> TokenStream {
    let ident = &filter.ident;
    let name = ident.to_string();
    let len = filter.params.len();
    let specs = filter.params.iter().map(param_spec);
    let paging = paging_methods(filter);

    let dispatch = if filter.params.is_empty() {
        quote! {
            fn assign(
                &mut self,
                _ordinal: usize,
                _values: &[::std::string::String]
            ) -> ::std::result::Result<(), ::docshape_core::ParamError> {
                ::std::result::Result::Ok(())
            }

            fn predicate(
                &self,
                _ordinal: usize
            ) -> ::std::option::Option<::docshape_core::__private::serde_json::Value> {
                ::std::option::Option::None
            }

            fn encode(&self, _ordinal: usize) -> ::std::vec::Vec<::std::string::String> {
                ::std::vec::Vec::new()
            }
        }
    } else {
        let ordinals: Vec<usize> = filter.params.iter().map(|param| param.ordinal).collect();
        let members: Vec<&syn::Ident> = filter.params.iter().map(|param| &param.ident).collect();
        quote! {
            fn assign(
                &mut self,
                ordinal: usize,
                values: &[::std::string::String]
            ) -> ::std::result::Result<(), ::docshape_core::ParamError> {
                match ordinal {
                    #(#ordinals => ::docshape_core::FilterParam::assign(&mut self.#members, values),)*
                    _ => ::std::result::Result::Ok(())
                }
            }

            fn predicate(
                &self,
                ordinal: usize
            ) -> ::std::option::Option<::docshape_core::__private::serde_json::Value> {
                match ordinal {
                    #(#ordinals => ::docshape_core::FilterParam::predicate(&self.#members),)*
                    _ => ::std::option::Option::None
                }
            }

            fn encode(&self, ordinal: usize) -> ::std::vec::Vec<::std::string::String> {
                match ordinal {
                    #(#ordinals => ::docshape_core::FilterParam::encode(&self.#members),)*
                    _ => ::std::vec::Vec::new()
                }
            }
        }
    };

    quote! {
        impl ::docshape_core::FilterShape for #ident {
            const NAME: &'static str = #name;

            fn params() -> &'static [::docshape_core::ParamSpec] {
                static PARAMS: [::docshape_core::ParamSpec; #len] = [#(#specs),*];
                &PARAMS
            }

            #paging

            #dispatch
        }
    }
}

fn param_spec(param: &ParamDef) -> TokenStream {
    let name = &param.param;
    let ordinal = param.ordinal;
    let ty = &param.ty;
    let targets = (param.target != param.param).then(|| {
        let target = &param.target;
        quote! { .targets(#target) }
    });
    let op = (param.op != ParamOp::Eq).then(|| {
        let variant = param.op.variant();
        quote! { .op(::docshape_core::FilterOp::#variant) }
    });

    quote! {
        ::docshape_core::ParamSpec::new(#name, #ordinal)
            #targets
            #op
            .multi(<#ty as ::docshape_core::FilterParam>::MULTI)
    }
}

fn paging_methods(filter: &FilterDef) -> TokenStream {
    match &filter.paging {
        Some(paging) => {
            let member = &paging.ident;
            let ordinal = paging.ordinal;
            quote! {
                fn paging_ordinal() -> ::std::option::Option<usize> {
                    ::std::option::Option::Some(#ordinal)
                }

                fn paging(&self) -> ::std::option::Option<&::docshape_core::Paging> {
                    ::std::option::Option::Some(&self.#member)
                }

                fn paging_mut(&mut self) -> ::std::option::Option<&mut ::docshape_core::Paging> {
                    ::std::option::Option::Some(&mut self.#member)
                }
            }
        }
        None => quote! {
            fn paging_ordinal() -> ::std::option::Option<usize> {
                ::std::option::Option::None
            }

            fn paging(&self) -> ::std::option::Option<&::docshape_core::Paging> {
                ::std::option::Option::None
            }

            fn paging_mut(&mut self) -> ::std::option::Option<&mut ::docshape_core::Paging> {
                ::std::option::Option::None
            }
        }
    }
}
