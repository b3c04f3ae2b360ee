use proc_macro2::TokenStream;
use syn::ext::IdentExt;
use syn::parse_quote;
use syn::spanned::Spanned;
use syn::{
    Data, DeriveInput, Fields, GenericParam, Generics, Ident, Type, Visibility, WherePredicate,
};

use crate::field::{self, BuilderField, Kind};

pub(crate) fn derive(input: &DeriveInput) -> syn::Result<TokenStream> {
    let named = match &input.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(fields) => &fields.named,
            Fields::Unnamed(_) | Fields::Unit => {
                return Err(syn::Error::new_spanned(
                    &input.ident,
                    "`Builder` can only be derived for structs with named fields",
                ))
            }
        },
        Data::Enum(data) => {
            return Err(syn::Error::new_spanned(
                data.enum_token,
                "`Builder` can only be derived for structs",
            ))
        }
        Data::Union(data) => {
            return Err(syn::Error::new_spanned(
                data.union_token,
                "`Builder` can only be derived for structs",
            ))
        }
    };

    let generics = SplitGenerics::new(&input.generics);
    let self_ty = generics.self_ty(&input.ident);
    let fields = field::parse_all(named, &self_ty)?;

    Ok(Expander::new(input, generics, &fields).expand())
}

/// The pieces of the input's generics as they need to appear in the generated code.
struct SplitGenerics {
    /// Parameters with their bounds, for `impl<..>` and the builder declaration. Defaults are
    /// removed since they aren't allowed on `impl`s.
    params: Vec<GenericParam>,
    /// Bare parameter names, for type position.
    args: Vec<TokenStream>,
    predicates: Vec<WherePredicate>,
}

impl SplitGenerics {
    fn new(generics: &Generics) -> Self {
        let params = generics
            .params
            .iter()
            .cloned()
            .map(|mut param| {
                match &mut param {
                    GenericParam::Type(p) => {
                        p.eq_token = None;
                        p.default = None;
                    }
                    GenericParam::Const(p) => {
                        p.eq_token = None;
                        p.default = None;
                    }
                    GenericParam::Lifetime(_) => {}
                }
                param
            })
            .collect();
        let args = generics
            .params
            .iter()
            .map(|param| match param {
                GenericParam::Type(p) => {
                    let ident = &p.ident;
                    quote!(#ident)
                }
                GenericParam::Lifetime(p) => {
                    let lt = &p.lifetime;
                    quote!(#lt)
                }
                GenericParam::Const(p) => {
                    let ident = &p.ident;
                    quote!(#ident)
                }
            })
            .collect();
        let predicates = generics
            .where_clause
            .iter()
            .flat_map(|clause| clause.predicates.iter().cloned())
            .collect();
        SplitGenerics {
            params,
            args,
            predicates,
        }
    }

    /// The struct's own type, which is what `Self` means in its field types.
    fn self_ty(&self, ident: &Ident) -> Type {
        let args = &self.args;
        if args.is_empty() {
            parse_quote!(#ident)
        } else {
            parse_quote!(#ident<#(#args),*>)
        }
    }
}

struct Expander<'a> {
    input: &'a DeriveInput,
    fields: &'a [BuilderField<'a>],
    generics: SplitGenerics,
    builder: Ident,
    module: Ident,
}

impl<'a> Expander<'a> {
    fn new(
        input: &'a DeriveInput,
        generics: SplitGenerics,
        fields: &'a [BuilderField<'a>],
    ) -> Self {
        let builder = format_ident!("{}Builder", input.ident);
        // Every helper type lives in a private module so that the marker types don't leak into
        // the user's namespace. Only the builder itself is re-exported.
        let module = format_ident!("{}Fields", builder);
        Expander {
            input,
            fields,
            generics,
            builder,
            module,
        }
    }

    fn expand(&self) -> TokenStream {
        let struct_name = &self.input.ident;
        let builder = &self.builder;
        let module = &self.module;
        let SplitGenerics {
            params,
            args,
            predicates,
        } = &self.generics;
        let states: Vec<_> = self.fields.iter().map(|f| &f.state).collect();
        let sets = self.fields.iter().map(|f| &f.set);
        let unsets = self.fields.iter().map(|f| &f.unset);

        // Builders of private structs still need to be reachable from the struct's own module.
        let inner_vis = match &self.input.vis {
            Visibility::Public(_) => quote!(pub),
            Visibility::Inherited => quote!(pub(super)),
            _ => quote!(pub(crate)),
        };
        let outer_vis = &self.input.vis;
        let doc = format!(
            "Type-checked builder for [`{}`]. Each field's state is tracked in a type parameter, \
             so `build()` only exists once every required field has been set.",
            struct_name
        );

        let constructor = self.constructor();
        let setters = self.fields.iter().enumerate().map(|(i, f)| self.setter(i, f));
        let build = self.build();
        let escape_hatches = self.escape_hatches();

        quote! {
            #[allow(non_snake_case, non_camel_case_types)]
            #[deny(unused_must_use)]
            mod #module {
                use super::*;

                #[doc = #doc]
                #[must_use]
                #[repr(transparent)]
                #inner_vis struct #builder<#(#params,)* #(#states,)*>
                where
                    #(#predicates,)*
                {
                    inner: ::core::mem::MaybeUninit<#struct_name<#(#args,)*>>,
                    __fields: ::core::marker::PhantomData<(#(#states,)*)>,
                }

                #(pub struct #sets;)*
                #(pub struct #unsets;)*

                #constructor
                #(#setters)*
                #build
                #escape_hatches
            }

            #[allow(unused_imports)]
            #outer_vis use self::#module::#builder;
        }
    }

    /// `Buildable` plus the inherent `builder()` on the all-unset state, which writes the initial
    /// value of every optional field.
    fn constructor(&self) -> TokenStream {
        let struct_name = &self.input.ident;
        let builder = &self.builder;
        let SplitGenerics {
            params,
            args,
            predicates,
        } = &self.generics;
        let unsets: Vec<_> = self.fields.iter().map(|f| &f.unset).collect();

        let default_bounds = self.fields.iter().filter_map(|f| match f.kind {
            Kind::Defaulted(None) => {
                let ty = &f.ty;
                Some(quote_spanned!(ty.span() => #ty: ::core::default::Default))
            }
            _ => None,
        });
        let default_bounds = quote!(#(#predicates,)* #(#default_bounds,)*);

        let initializers: Vec<_> = self
            .fields
            .iter()
            .filter_map(|f| {
                let value = f.initial_value()?;
                let ident = f.ident;
                let ty = &f.ty;
                Some(quote! {
                    {
                        let value: #ty = #value;
                        let inner = __builder.inner.as_mut_ptr();
                        unsafe {
                            ::core::ptr::addr_of_mut!((*inner).#ident).write(value);
                        }
                    }
                })
            })
            .collect();
        let mutability = if initializers.is_empty() {
            quote!()
        } else {
            quote!(mut)
        };

        quote! {
            impl<#(#params,)*> #builder<#(#args,)* #(#unsets,)*>
            where
                #default_bounds
            {
                /// Starts building with no required field set.
                #[must_use]
                pub fn builder() -> Self {
                    let #mutability __builder = #builder {
                        inner: ::core::mem::MaybeUninit::uninit(),
                        __fields: ::core::marker::PhantomData,
                    };
                    #(#initializers)*
                    __builder
                }
            }

            impl<#(#params,)*> ::kbuilder::Buildable for #struct_name<#(#args,)*>
            where
                #default_bounds
            {
                type Builder = #builder<#(#args,)* #(#unsets,)*>;

                fn builder() -> Self::Builder {
                    #builder::<#(#args,)* #(#unsets,)*>::builder()
                }
            }
        }
    }

    /// Setter for field `i`, only callable while that field is `Unset`. The returned builder has
    /// the field `Set` and every other state untouched.
    fn setter(&self, i: usize, field: &BuilderField<'_>) -> TokenStream {
        let builder = &self.builder;
        let SplitGenerics {
            params,
            args,
            predicates,
        } = &self.generics;
        let other_states = self
            .fields
            .iter()
            .enumerate()
            .filter(|(j, _)| *j != i)
            .map(|(_, f)| &f.state);
        let before = self
            .fields
            .iter()
            .enumerate()
            .map(|(j, f)| if j == i { &f.unset } else { &f.state });
        let after = self
            .fields
            .iter()
            .enumerate()
            .map(|(j, f)| if j == i { &f.set } else { &f.state });

        let ident = field.ident;
        let setter_ty = field.setter_ty();
        let (param_ty, converted) = if field.into {
            (
                quote!(impl ::core::convert::Into<#setter_ty>),
                quote!(::core::convert::Into::into(value)),
            )
        } else {
            (quote!(#setter_ty), quote!(value))
        };
        let stored = match field.kind {
            Kind::NotNull(_) | Kind::Nullable(_) => quote!(::core::option::Option::Some(#converted)),
            Kind::Required | Kind::Defaulted(_) => converted,
        };
        // Optional fields already hold their initial value, which has to be dropped.
        let store = if field.is_optional() {
            quote!(*::core::ptr::addr_of_mut!((*inner).#ident) = value;)
        } else {
            quote!(::core::ptr::addr_of_mut!((*inner).#ident).write(value);)
        };
        let doc = format!("Sets `{}`.", ident.unraw());

        quote! {
            impl<#(#params,)* #(#other_states,)*> #builder<#(#args,)* #(#before,)*>
            where
                #(#predicates,)*
            {
                #[doc = #doc]
                #[must_use]
                pub fn #ident(mut self, value: #param_ty) -> #builder<#(#args,)* #(#after,)*> {
                    let value = #stored;
                    let inner = self.inner.as_mut_ptr();
                    unsafe {
                        #store
                    }
                    #builder {
                        inner: self.inner,
                        __fields: ::core::marker::PhantomData,
                    }
                }
            }
        }
    }

    /// `build()` is implemented for the state where every required field is `Set`. Optional
    /// fields stay generic since `builder()` already wrote them.
    fn build(&self) -> TokenStream {
        let struct_name = &self.input.ident;
        let builder = &self.builder;
        let SplitGenerics {
            params,
            args,
            predicates,
        } = &self.generics;
        let optional_states = self
            .fields
            .iter()
            .filter(|f| f.is_optional())
            .map(|f| &f.state);
        let ready = self
            .fields
            .iter()
            .map(|f| if f.is_optional() { &f.state } else { &f.set });

        quote! {
            impl<#(#params,)* #(#optional_states,)*> #builder<#(#args,)* #(#ready,)*>
            where
                #(#predicates,)*
            {
                /// Finalize the builder.
                #[must_use]
                pub fn build(self) -> #struct_name<#(#args,)*> {
                    // Reaching this impl means every field of `inner` has been written.
                    unsafe { self.unsafe_build() }
                }
            }
        }
    }

    fn escape_hatches(&self) -> TokenStream {
        let struct_name = &self.input.ident;
        let builder = &self.builder;
        let SplitGenerics {
            params,
            args,
            predicates,
        } = &self.generics;
        let states: Vec<_> = self.fields.iter().map(|f| &f.state).collect();
        let pointers = self.fields.iter().map(|f| {
            let ident = f.ident;
            let ty = &f.ty;
            let method = format_ident!("ptr_{}", ident.unraw());
            quote! {
                /// Returns a mutable pointer to this field of the value being built, for
                /// initialization that the setters can't express. Call `.unsafe_build()` once
                /// every field has been written.
                ///
                /// # Safety
                ///
                /// The pointee may be uninitialized.
                #[must_use]
                pub unsafe fn #method(&mut self) -> *mut #ty {
                    let inner = self.inner.as_mut_ptr();
                    unsafe { ::core::ptr::addr_of_mut!((*inner).#ident) }
                }
            }
        });

        quote! {
            impl<#(#params,)* #(#states,)*> #builder<#(#args,)* #(#states,)*>
            where
                #(#predicates,)*
            {
                #(#pointers)*

                /// Gives up the type-level tracking and returns the raw storage.
                ///
                /// # Safety
                ///
                /// Fields not set yet are uninitialized.
                #[must_use]
                pub unsafe fn maybe_uninit(self) -> ::core::mem::MaybeUninit<#struct_name<#(#args,)*>> {
                    self.inner
                }

                /// Only call if every field without a setter call has been written through its
                /// `ptr_*` method.
                ///
                /// # Safety
                ///
                /// All fields must be initialized.
                #[must_use]
                pub unsafe fn unsafe_build(self) -> #struct_name<#(#args,)*> {
                    unsafe { self.inner.assume_init() }
                }
            }
        }
    }
}
