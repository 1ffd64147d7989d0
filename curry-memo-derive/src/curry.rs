//! Implementation of the `curry!` procedural macro.
//!
//! # Supported Input Forms
//!
//! 1. Closure form: `curry!(|a, b| body)`, arity = parameter count
//! 2. Function name + arity form: `curry!(function_name, arity)`
//!
//! # Design
//!
//! The expansion does not nest closures. It builds one adapter closure from
//! `Vec<T>` to the positional call and passes it to `curry_memo::curry`
//! together with the arity, so the runtime chain does the accumulation.

use proc_macro2::{Span, TokenStream};
use quote::{format_ident, quote};
use syn::punctuated::Punctuated;
use syn::{Expr, ExprClosure, ExprLit, ExprPath, Lit, Token, spanned::Spanned};

enum CurryInput {
    Closure(ExprClosure),
    FunctionWithArity { function: ExprPath, arity: usize },
}

impl CurryInput {
    fn arity(&self) -> usize {
        match self {
            Self::Closure(closure) => closure.inputs.len(),
            Self::FunctionWithArity { arity, .. } => *arity,
        }
    }
}

pub fn curry_impl(input: TokenStream) -> TokenStream {
    let input = match parse_curry_input(input) {
        Ok(input) => input,
        Err(error) => return error.to_compile_error(),
    };

    let arity = input.arity();
    let function_expression = match input {
        CurryInput::Closure(closure) => quote! { #closure },
        CurryInput::FunctionWithArity { function, .. } => quote! { #function },
    };
    generate_chain(arity, &function_expression)
}

fn parse_curry_input(input: TokenStream) -> syn::Result<CurryInput> {
    let parser = Punctuated::<Expr, Token![,]>::parse_terminated;
    let expressions: Punctuated<Expr, Token![,]> = syn::parse::Parser::parse2(parser, input)?;

    let mut iterator = expressions.into_iter();
    match (iterator.next(), iterator.next(), iterator.next()) {
        (Some(single), None, None) => parse_single_expression(single),
        (Some(function), Some(arity), None) => parse_function_with_arity(function, arity),
        _ => Err(syn::Error::new(
            Span::call_site(),
            "curry! requires a closure or function name with arity",
        )),
    }
}

fn parse_single_expression(expression: Expr) -> syn::Result<CurryInput> {
    match expression {
        Expr::Closure(closure) if closure.inputs.is_empty() => Err(syn::Error::new(
            closure.span(),
            "curry! requires a closure with at least 1 parameter",
        )),
        Expr::Closure(closure) => Ok(CurryInput::Closure(closure)),
        Expr::Path(path) => Err(syn::Error::new(
            path.span(),
            "curry! with function name requires arity: curry!(function_name, 2)",
        )),
        other => Err(syn::Error::new(
            other.span(),
            "curry! requires a closure or function name with arity",
        )),
    }
}

fn parse_function_with_arity(first: Expr, second: Expr) -> syn::Result<CurryInput> {
    let function = match first {
        Expr::Path(path) => path,
        other => {
            return Err(syn::Error::new(
                other.span(),
                "expected a function name or path",
            ));
        }
    };

    let arity = match second {
        Expr::Lit(ExprLit {
            lit: Lit::Int(literal_integer),
            ..
        }) => literal_integer.base10_parse::<usize>()?,
        other => {
            return Err(syn::Error::new(
                other.span(),
                "curry! expected an integer literal for arity",
            ));
        }
    };

    if arity == 0 {
        return Err(syn::Error::new(
            function.span(),
            "curry! requires a function with at least 1 argument",
        ));
    }

    Ok(CurryInput::FunctionWithArity { function, arity })
}

fn generate_chain(arity: usize, function_expression: &TokenStream) -> TokenStream {
    let argument_identifiers: Vec<_> = (0..arity)
        .map(|index| format_ident!("__curry_memo_argument_{}", index))
        .collect();
    let next_calls = argument_identifiers
        .iter()
        .map(|_| quote! { __curry_memo_arguments.next() });
    let message = format!("curry! chain completed with fewer than {arity} arguments");

    quote! {
        {
            let __curry_memo_function = #function_expression;
            ::curry_memo::curry(
                #arity,
                move |__curry_memo_arguments: ::std::vec::Vec<_>| {
                    let mut __curry_memo_arguments = __curry_memo_arguments.into_iter();
                    match (#(#next_calls,)*) {
                        (#(::std::option::Option::Some(#argument_identifiers),)*) => {
                            __curry_memo_function(#(#argument_identifiers),*)
                        }
                        _ => ::std::unreachable!(#message),
                    }
                },
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn parse(input: TokenStream) -> syn::Result<CurryInput> {
        parse_curry_input(input)
    }

    #[rstest]
    fn closure_arity_is_parameter_count() {
        let input = parse(quote! { |a: i32, b: i32, c: i32| a + b + c }).unwrap();
        assert!(matches!(input, CurryInput::Closure(_)));
        assert_eq!(input.arity(), 3);
    }

    #[rstest]
    fn single_parameter_closure_is_accepted() {
        let input = parse(quote! { |a: i32| a + 1 }).unwrap();
        assert_eq!(input.arity(), 1);
    }

    #[rstest]
    fn function_path_takes_literal_arity() {
        let input = parse(quote! { math::add, 4 }).unwrap();
        assert!(matches!(input, CurryInput::FunctionWithArity { arity: 4, .. }));
    }

    #[rstest]
    #[case(quote! { || 42 }, "at least 1 parameter")]
    #[case(quote! { add }, "requires arity")]
    #[case(quote! { add, "two" }, "integer literal")]
    #[case(quote! { add, 0 }, "at least 1 argument")]
    #[case(quote! { add, 2, 3 }, "closure or function name")]
    #[case(quote! { 1 + 2 }, "closure or function name")]
    fn invalid_input_is_rejected(#[case] input: TokenStream, #[case] expected: &str) {
        let Err(error) = parse(input) else {
            panic!("input should be rejected");
        };
        assert!(
            error.to_string().contains(expected),
            "unexpected message: {error}"
        );
    }

    #[rstest]
    fn expansion_calls_runtime_curry() {
        let expanded = curry_impl(quote! { |a: u8, b: u8| a + b }).to_string();
        assert!(expanded.contains("curry_memo"));
        assert!(expanded.contains("2usize"));
        assert!(expanded.contains("__curry_memo_argument_1"));
        assert!(!expanded.contains("__curry_memo_argument_2"));
    }

    #[rstest]
    fn invalid_input_expands_to_compile_error() {
        let expanded = curry_impl(quote! { || 42 }).to_string();
        assert!(expanded.contains("compile_error"));
    }
}
