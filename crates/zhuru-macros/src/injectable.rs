use proc_macro2::TokenStream;
use quote::quote;
use syn::{Data, DeriveInput, Fields, Type};

pub(crate) fn expand(input: TokenStream) -> syn::Result<TokenStream> {
    let input: DeriveInput = syn::parse2(input)?;
    let ident = &input.ident;

    if !input.generics.params.is_empty() {
        return Err(syn::Error::new_spanned(
            &input.generics,
            "#[derive(Injectable)] 暂不支持泛型目标",
        ));
    }
    let Data::Struct(data) = &input.data else {
        return Err(syn::Error::new_spanned(
            ident,
            "#[derive(Injectable)] 只支持 struct",
        ));
    };
    let Fields::Named(named) = &data.fields else {
        return Err(syn::Error::new_spanned(
            ident,
            "#[derive(Injectable)] 只支持具名字段 struct",
        ));
    };

    let mut slot_entries = Vec::new();
    let mut assigns = Vec::new();
    let mut is_set_arms = Vec::new();
    let mut set_field_arms = Vec::new();

    for field in &named.named {
        let Some(field_ident) = field.ident.as_ref() else {
            continue;
        };
        let name = field_ident.to_string();

        match option_inner_type(&field.ty) {
            Some(inner) => {
                slot_entries.push(quote! {
                    ::zhuru_rt::Slot {
                        name: #name,
                        ty: ::zhuru_rt::Type::of::<#inner>(),
                        type_name: ::std::any::type_name::<#inner>(),
                    }
                });
                // 构造路径重建整个对象：缺值即回到 absent 缺省。
                assigns.push(quote! {
                    self.#field_ident = match values.next() {
                        ::std::option::Option::Some(value) => match value.downcast::<#inner>() {
                            ::std::result::Result::Ok(value) => {
                                ::std::option::Option::Some(*value)
                            }
                            ::std::result::Result::Err(_) => ::std::option::Option::None,
                        },
                        ::std::option::Option::None => ::std::option::Option::None,
                    };
                });
                is_set_arms.push(quote! {
                    #name => self.#field_ident.is_some(),
                });
                set_field_arms.push(quote! {
                    #name => match value.downcast::<#inner>() {
                        ::std::result::Result::Ok(value) => {
                            self.#field_ident = ::std::option::Option::Some(*value);
                            ::std::result::Result::Ok(())
                        }
                        ::std::result::Result::Err(value) => ::std::result::Result::Err(value),
                    },
                });
            }
            None => {
                let ty = &field.ty;
                slot_entries.push(quote! {
                    ::zhuru_rt::Slot {
                        name: #name,
                        ty: ::zhuru_rt::Type::of::<#ty>(),
                        type_name: ::std::any::type_name::<#ty>(),
                    }
                });
                assigns.push(quote! {
                    if let ::std::option::Option::Some(value) = values.next() {
                        if let ::std::result::Result::Ok(value) = value.downcast::<#ty>() {
                            self.#field_ident = *value;
                        }
                    }
                });
                // 非 Option 字段判断不了“尚未持值”，不参与字段注入。
                is_set_arms.push(quote! {
                    #name => true,
                });
                set_field_arms.push(quote! {
                    #name => ::std::result::Result::Err(value),
                });
            }
        }
    }

    Ok(quote! {
        impl ::zhuru_rt::Injectable for #ident {
            fn ctor_slots(&self) -> ::std::vec::Vec<::zhuru_rt::Slot> {
                ::std::vec![#(#slot_entries),*]
            }

            fn assign_ctor(
                &mut self,
                values: ::std::vec::Vec<::std::boxed::Box<dyn ::std::any::Any>>,
            ) {
                #[allow(unused_mut, unused_variables)]
                let mut values = values.into_iter();
                #(#assigns)*
            }

            fn field_is_set(&self, name: &str) -> bool {
                match name {
                    #(#is_set_arms)*
                    _ => true,
                }
            }

            fn set_field(
                &mut self,
                name: &str,
                value: ::std::boxed::Box<dyn ::std::any::Any>,
            ) -> ::std::result::Result<(), ::std::boxed::Box<dyn ::std::any::Any>> {
                match name {
                    #(#set_field_arms)*
                    _ => ::std::result::Result::Err(value),
                }
            }
        }
    })
}

fn option_inner_type(ty: &Type) -> Option<&Type> {
    let Type::Path(type_path) = ty else {
        return None;
    };
    let last = type_path.path.segments.last()?;
    if last.ident != "Option" {
        return None;
    }
    let syn::PathArguments::AngleBracketed(args) = &last.arguments else {
        return None;
    };
    if args.args.len() != 1 {
        return None;
    }
    let syn::GenericArgument::Type(inner) = args.args.first()? else {
        return None;
    };
    Some(inner)
}
