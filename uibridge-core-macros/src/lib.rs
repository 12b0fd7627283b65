use proc_macro::TokenStream;
use proc_macro2::Span;
use quote::{format_ident, quote};
use syn::{parse_macro_input, Data, DataEnum, DeriveInput, Fields, Ident, LitStr};

/// Derives the opcode table and the positional wire encoding for a command enum.
///
/// Every variant becomes `[opcode, [field0, field1, ...]]`, where `opcode` is the
/// variant name with its first letter lowercased (`SetStyle` -> `"setStyle"`) and
/// the fields are emitted in declaration order. Named, tuple and unit variants are
/// all accepted.
#[proc_macro_derive(UiCommand)]
pub fn derive_ui_command(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    let name = input.ident.clone();

    let body = match input.data {
        Data::Enum(ref data) => command_impls(&input, data),
        Data::Struct(_) | Data::Union(_) => {
            return syn::Error::new_spanned(name, "UiCommand derive only supports enums")
                .to_compile_error()
                .into();
        }
    };

    body.into()
}

fn opcode_name(ident: &Ident) -> LitStr {
    let raw = ident.to_string();
    let mut chars = raw.chars();
    let opcode = match chars.next() {
        Some(first) => first.to_lowercase().chain(chars).collect::<String>(),
        None => String::new(),
    };
    LitStr::new(&opcode, Span::call_site())
}

/// Builds the match pattern for a variant plus the identifiers its fields bind to.
fn bind_fields(variant: &Ident, fields: &Fields) -> (proc_macro2::TokenStream, Vec<Ident>) {
    match fields {
        Fields::Named(named) => {
            let idents: Vec<Ident> = named
                .named
                .iter()
                .filter_map(|f| f.ident.clone())
                .collect();
            (quote! { Self::#variant { #(#idents),* } }, idents)
        }
        Fields::Unnamed(unnamed) => {
            let idents: Vec<Ident> = (0..unnamed.unnamed.len())
                .map(|i| format_ident!("__arg{}", i))
                .collect();
            (quote! { Self::#variant ( #(#idents),* ) }, idents)
        }
        Fields::Unit => (quote! { Self::#variant }, Vec::new()),
    }
}

fn command_impls(input: &DeriveInput, data: &DataEnum) -> proc_macro2::TokenStream {
    let name = &input.ident;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    let mut opcodes = Vec::new();
    let mut opcode_arms = Vec::new();
    let mut serialize_arms = Vec::new();

    for variant in &data.variants {
        let ident = &variant.ident;
        let opcode = opcode_name(ident);
        let (pattern, bindings) = bind_fields(ident, &variant.fields);

        // An empty tuple would encode as `null`; the wire wants `[]`.
        let args = if bindings.is_empty() {
            quote! { &[(); 0] }
        } else {
            quote! { &( #(#bindings,)* ) }
        };

        opcode_arms.push(quote! { Self::#ident { .. } => #opcode });
        serialize_arms.push(quote! {
            #pattern => {
                let mut command = serializer.serialize_tuple(2)?;
                command.serialize_element(#opcode)?;
                command.serialize_element(#args)?;
                command.end()
            }
        });
        opcodes.push(opcode);
    }

    quote! {
        impl #impl_generics #name #ty_generics #where_clause {
            /// Every opcode this command set can put on the wire, in declaration order.
            pub const OPCODES: &'static [&'static str] = &[#(#opcodes),*];

            /// Wire opcode of this command.
            pub fn opcode(&self) -> &'static str {
                match self {
                    #(#opcode_arms,)*
                }
            }
        }

        impl #impl_generics ::serde::Serialize for #name #ty_generics #where_clause {
            fn serialize<S>(&self, serializer: S) -> ::core::result::Result<S::Ok, S::Error>
            where
                S: ::serde::Serializer,
            {
                use ::serde::ser::SerializeTuple;
                match self {
                    #(#serialize_arms)*
                }
            }
        }
    }
}
