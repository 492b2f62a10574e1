//! Procedural macros for halgen
//!
//! `#[template_class]` turns an inherent `impl` block into a
//! `halgen::TemplateClass` implementation, so a Rust type can serve as the
//! template class of a generated proxy without listing its members by hand.

use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::quote;
use syn::{parse_macro_input, FnArg, ImplItem, ImplItemFn, ItemImpl, LitStr, Pat, Type, Visibility};

/// Name of the associated function treated as the constructor
const CONSTRUCTOR_FN: &str = "new";

/// Derive `halgen::TemplateClass` from an inherent `impl` block
///
/// Members are collected as follows:
/// - `pub fn` with a `self` receiver: public method, arguments by name
/// - `fn new(..)` without receiver: the constructor (`__init__`)
/// - everything else (private methods, other associated functions,
///   constants, types): skipped
///
/// The class name defaults to the last segment of the implemented type and can
/// be overridden with `#[template_class(name = "Stage")]`.
///
/// ```ignore
/// #[template_class]
/// impl Stage {
///     pub fn new(port: u16) -> Self { /* ... */ }
///     pub fn get_value(&self) -> f64 { /* ... */ }
///     pub fn set_value(&mut self, value: f64) { /* ... */ }
///     pub fn reset(&mut self) { /* ... */ }
/// }
/// ```
#[proc_macro_attribute]
pub fn template_class(attr: TokenStream, item: TokenStream) -> TokenStream {
    let mut name_override: Option<LitStr> = None;
    let attr_parser = syn::meta::parser(|meta| {
        if meta.path.is_ident("name") {
            name_override = Some(meta.value()?.parse()?);
            Ok(())
        } else {
            Err(meta.error("unsupported template_class argument, expected `name = \"...\"`"))
        }
    });
    parse_macro_input!(attr with attr_parser);

    let input = parse_macro_input!(item as ItemImpl);

    expand(&input, name_override.as_ref())
        .unwrap_or_else(syn::Error::into_compile_error)
        .into()
}

fn expand(input: &ItemImpl, name_override: Option<&LitStr>) -> syn::Result<TokenStream2> {
    if let Some((_, path, _)) = &input.trait_ {
        return Err(syn::Error::new_spanned(
            path,
            "#[template_class] must be placed on an inherent impl block",
        ));
    }

    let self_ty = &input.self_ty;
    let class_name = match name_override {
        Some(lit) => lit.value(),
        None => type_name(self_ty)?,
    };

    let members: Vec<TokenStream2> = input
        .items
        .iter()
        .filter_map(|item| match item {
            ImplItem::Fn(function) => member_tokens(function),
            _ => None,
        })
        .collect();

    let (impl_generics, _, where_clause) = input.generics.split_for_impl();

    Ok(quote! {
        #input

        impl #impl_generics ::halgen::TemplateClass for #self_ty #where_clause {
            fn class_definition() -> ::halgen::ClassDefinition {
                ::halgen::ClassDefinition::new(#class_name, ::std::vec![#(#members),*])
            }
        }
    })
}

fn type_name(ty: &Type) -> syn::Result<String> {
    match ty {
        Type::Path(type_path) => type_path
            .path
            .segments
            .last()
            .map(|segment| segment.ident.to_string())
            .ok_or_else(|| syn::Error::new_spanned(ty, "expected a named type")),
        _ => Err(syn::Error::new_spanned(
            ty,
            "#[template_class] needs a named type, or an explicit `name = \"...\"`",
        )),
    }
}

/// Signature constructor for one function, `None` when it is not a member
fn member_tokens(function: &ImplItemFn) -> Option<TokenStream2> {
    let sig = &function.sig;
    let name = sig.ident.to_string();
    let args = argument_names(function);

    if sig.receiver().is_none() {
        return (name == CONSTRUCTOR_FN).then(|| {
            quote! {{
                let args: ::std::vec::Vec<&'static str> = ::std::vec![#(#args),*];
                ::halgen::MemberSignature::constructor(args)
            }}
        });
    }

    if !matches!(function.vis, Visibility::Public(_)) {
        return None;
    }

    Some(quote! {{
        let args: ::std::vec::Vec<&'static str> = ::std::vec![#(#args),*];
        ::halgen::MemberSignature::new(#name, args)
    }})
}

fn argument_names(function: &ImplItemFn) -> Vec<String> {
    function
        .sig
        .inputs
        .iter()
        .filter_map(|input| match input {
            FnArg::Typed(typed) => Some(typed),
            FnArg::Receiver(_) => None,
        })
        .enumerate()
        .map(|(index, typed)| match typed.pat.as_ref() {
            Pat::Ident(pat) => pat.ident.to_string().trim_start_matches('_').to_string(),
            _ => format!("arg{index}"),
        })
        .collect()
}
