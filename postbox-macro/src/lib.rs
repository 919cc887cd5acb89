/*
 * Copyright (c) 2024. Govcraft
 *
 * Licensed under either of
 *   * Apache License, Version 2.0 (the "License");
 *     you may not use this file except in compliance with the License.
 *     You may obtain a copy of the License at http://www.apache.org/licenses/LICENSE-2.0
 *   * MIT license: http://opensource.org/licenses/MIT
 *
 * Unless required by applicable law or agreed to in writing, software
 * distributed under the License is distributed on an "AS IS" BASIS,
 * WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
 * See the applicable License for the specific language governing permissions and
 * limitations under that License.
 */
#![forbid(unsafe_code)]

//! Postbox Macro Library
//!
//! Attribute macros that remove the boilerplate around postbox messages,
//! actor models and application entry points.
//!
//! ```ignore
//! #[postbox_message]
//! pub enum Command {
//!     A(i32),
//!     B(String, String),
//! }
//!
//! #[postbox_actor]
//! pub struct Printer {
//!     printed: usize,
//! }
//!
//! #[postbox_main]
//! async fn main() {
//!     // ...
//! }
//! ```

use proc_macro::TokenStream;

use quote::quote;
use syn::{parse_macro_input, DeriveInput, ItemFn};

fn has_derive(input: &DeriveInput, trait_name: &str) -> bool {
    input.attrs.iter().any(|attr| {
        if attr.path().is_ident("derive") {
            let mut found = false;
            let _ = attr.parse_nested_meta(|meta| {
                if meta.path.is_ident(trait_name) {
                    found = true;
                }
                Ok(())
            });
            found
        } else {
            false
        }
    })
}

/// Options accepted by `#[postbox_actor(...)]`.
#[derive(Default)]
struct ActorOptions {
    /// Skip deriving Default (user will implement it manually).
    no_default: bool,
}

impl ActorOptions {
    fn parse(attr: &TokenStream) -> Self {
        let mut options = Self::default();
        for part in attr.to_string().split(',') {
            if part.trim() == "no_default" {
                options.no_default = true;
            }
        }
        options
    }
}

/// Declares a type as a postbox message.
///
/// Expands to `#[derive(Clone, Debug)]` (only the traits not already derived)
/// plus a compile-time assertion that the type is `Send + 'static`, which is
/// what a mailbox needs. `Clone` lets the same message fan out through an
/// exchange to several sinks.
///
/// ```ignore
/// #[postbox_message]
/// pub struct Ping;
/// ```
#[proc_macro_attribute]
pub fn postbox_message(_attr: TokenStream, item: TokenStream) -> TokenStream {
    let input = parse_macro_input!(item as DeriveInput);

    let name = &input.ident;
    let generics = &input.generics;
    let (impl_generics, ty_generics, where_clause) = generics.split_for_impl();

    let derives = {
        let mut traits = Vec::new();
        if !has_derive(&input, "Clone") {
            traits.push(quote!(Clone));
        }
        if !has_derive(&input, "Debug") {
            traits.push(quote!(Debug));
        }
        if traits.is_empty() {
            quote!()
        } else {
            quote!(#[derive(#(#traits),*)])
        }
    };

    let assert_ident = quote::format_ident!("_AssertPostboxMessage_{}", name);

    let expanded = quote! {
        #derives
        #input

        #[doc(hidden)]
        #[allow(dead_code, non_camel_case_types, non_snake_case, clippy::needless_lifetimes)]
        const _: () = {
            fn #assert_ident #impl_generics () #where_clause {
                fn assert_bounds<T: Send + 'static>() {}
                assert_bounds::<#name #ty_generics>();
            }
        };
    };

    TokenStream::from(expanded)
}

/// Declares a type as an actor model.
///
/// Expands to `#[derive(Default, Debug)]` (only the traits not already
/// derived) plus a compile-time assertion that the type is `Send + 'static`,
/// the bound an actor task places on its model.
///
/// Pass `no_default` when the model needs a hand-written `Default`:
///
/// ```ignore
/// #[postbox_actor(no_default)]
/// struct Collector {
///     seen: Arc<Mutex<Vec<String>>>,
/// }
/// ```
#[proc_macro_attribute]
pub fn postbox_actor(attr: TokenStream, item: TokenStream) -> TokenStream {
    let options = ActorOptions::parse(&attr);
    let input = parse_macro_input!(item as DeriveInput);

    let name = &input.ident;
    let generics = &input.generics;
    let (impl_generics, ty_generics, where_clause) = generics.split_for_impl();

    let derives = {
        let mut traits = Vec::new();
        if !options.no_default && !has_derive(&input, "Default") {
            traits.push(quote!(Default));
        }
        if !has_derive(&input, "Debug") {
            traits.push(quote!(Debug));
        }
        if traits.is_empty() {
            quote!()
        } else {
            quote!(#[derive(#(#traits),*)])
        }
    };

    let assert_ident = quote::format_ident!("_AssertPostboxActor_{}", name);

    let expanded = quote! {
        #derives
        #input

        #[doc(hidden)]
        #[allow(dead_code, non_camel_case_types, non_snake_case, clippy::needless_lifetimes)]
        const _: () = {
            fn #assert_ident #impl_generics () #where_clause {
                fn assert_bounds<T: Send + 'static>() {}
                assert_bounds::<#name #ty_generics>();
            }
        };
    };

    TokenStream::from(expanded)
}

/// Entry point for postbox applications.
///
/// Builds a Tokio runtime (multi-threaded unless `flavor = "current_thread"`
/// is given, optionally with `worker_threads = N`) and blocks on the async
/// body of `main`.
#[proc_macro_attribute]
pub fn postbox_main(attr: TokenStream, item: TokenStream) -> TokenStream {
    let input = parse_macro_input!(item as ItemFn);

    let attrs = &input.attrs;
    let vis = &input.vis;
    let sig = &input.sig;
    let body = &input.block;

    if sig.asyncness.is_none() {
        return syn::Error::new_spanned(
            sig.fn_token,
            "the async keyword is missing from the function declaration",
        )
        .to_compile_error()
        .into();
    }

    if sig.ident != "main" {
        return syn::Error::new_spanned(
            &sig.ident,
            "postbox_main can only be applied to the main function",
        )
        .to_compile_error()
        .into();
    }

    let attr_string = attr.to_string();
    let use_current_thread = attr_string.contains("current_thread");
    let worker_threads: Option<usize> = attr_string
        .split(',')
        .find(|s| s.contains("worker_threads"))
        .and_then(|s| s.split('=').nth(1).and_then(|v| v.trim().parse().ok()));

    let runtime_builder = if use_current_thread {
        quote! {
            ::postbox::prelude::tokio::runtime::Builder::new_current_thread()
        }
    } else if let Some(threads) = worker_threads {
        quote! {
            ::postbox::prelude::tokio::runtime::Builder::new_multi_thread()
                .worker_threads(#threads)
        }
    } else {
        quote! {
            ::postbox::prelude::tokio::runtime::Builder::new_multi_thread()
        }
    };

    let fn_name = &sig.ident;
    let fn_inputs = &sig.inputs;
    let fn_output = &sig.output;

    let expanded = quote! {
        #(#attrs)*
        #vis fn #fn_name(#fn_inputs) #fn_output {
            #runtime_builder
                .enable_all()
                .build()
                .expect("Failed to build postbox runtime")
                .block_on(async #body)
        }
    };

    TokenStream::from(expanded)
}
