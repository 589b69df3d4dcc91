extern crate proc_macro;

use proc_macro::TokenStream;
use quote::quote;
use syn::{parse_macro_input, FnArg, ItemFn, PatType};

/// Wraps an async method in a MongoDB transaction on its `session` argument.
///
/// The annotated body moves into a `<name>_no_tx` sibling; the generated
/// wrapper starts a transaction, delegates, and commits on `Ok` or aborts on
/// `Err`. The method must take `session: &mut Session` and return a `Result`
/// whose error type converts from `mongodb::error::Error`.
#[proc_macro_attribute]
pub fn tx(_args: TokenStream, input: TokenStream) -> TokenStream {
    let input_fn = parse_macro_input!(input as ItemFn);
    let vis = &input_fn.vis;
    let block = &input_fn.block;
    let fn_name = &input_fn.sig.ident;
    let fn_args = &input_fn.sig.inputs;
    let fn_return = &input_fn.sig.output;

    let arg_list: Vec<_> = fn_args
        .iter()
        .map(|arg| match arg {
            FnArg::Typed(PatType { pat, .. }) => quote! { #pat },
            FnArg::Receiver(_) => quote! { self },
        })
        .collect();

    let inner_fn_name = quote::format_ident!("{}_no_tx", fn_name);
    let gen = quote! {
        #vis async fn #inner_fn_name(#fn_args) #fn_return {
            #block
        }

        #vis async fn #fn_name(#fn_args) #fn_return {
            session.start_transaction().await?;
            match Self::#inner_fn_name(#(#arg_list),*).await {
                Ok(value) => {
                    session.commit_transaction().await?;
                    Ok(value)
                }
                Err(err) => {
                    if let Err(abort_err) = session.abort_transaction().await {
                        log::error!("failed to abort transaction: {}", abort_err);
                    }
                    Err(err)
                }
            }
        }
    };

    TokenStream::from(gen)
}
