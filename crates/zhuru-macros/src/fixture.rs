use proc_macro2::TokenStream;
use quote::quote;
use syn::{Attribute, Data, DeriveInput, Fields, LitInt};

pub(crate) fn expand(input: TokenStream) -> syn::Result<TokenStream> {
    let input: DeriveInput = syn::parse2(input)?;
    let ident = &input.ident;

    if !input.generics.params.is_empty() {
        return Err(syn::Error::new_spanned(
            &input.generics,
            "#[derive(Fixture)] 暂不支持泛型夹具",
        ));
    }
    let Data::Struct(data) = &input.data else {
        return Err(syn::Error::new_spanned(
            ident,
            "#[derive(Fixture)] 只支持 struct",
        ));
    };
    let Fields::Named(named) = &data.fields else {
        return Err(syn::Error::new_spanned(
            ident,
            "#[derive(Fixture)] 只支持具名字段 struct",
        ));
    };

    let mut subject: Option<syn::Ident> = None;
    let mut pool_stmts = Vec::new();
    let mut fake_stmts = Vec::new();

    for field in &named.named {
        let Some(field_ident) = field.ident.as_ref() else {
            continue;
        };
        for attr in &field.attrs {
            if attr.path().is_ident("subject") {
                require_bare(attr, "#[subject] 不接受参数")?;
                if subject.is_some() {
                    return Err(syn::Error::new_spanned(
                        attr,
                        "无效的注入目标声明：一个夹具只能有一个 #[subject] 字段",
                    ));
                }
                subject = Some(field_ident.clone());
            } else if attr.path().is_ident("mock") {
                if parse_mock_nested(attr)? {
                    pool_stmts.push(quote! {
                        mocks.add_injectable(::std::rc::Rc::clone(&self.#field_ident));
                    });
                } else {
                    pool_stmts.push(quote! {
                        mocks.add(::std::clone::Clone::clone(&self.#field_ident));
                    });
                }
            } else if attr.path().is_ident("fake") {
                let pos: LitInt = attr.parse_args().map_err(|_| {
                    syn::Error::new_spanned(attr, "#[fake] 需要一个非负整数位置参数，如 #[fake(2)]")
                })?;
                let pos = pos.base10_parse::<usize>()?;
                fake_stmts.push(quote! {
                    fakes.bind(#pos, ::std::clone::Clone::clone(&self.#field_ident))?;
                });
            }
        }
    }

    // 没有 #[subject] 也合法：只建池、验配置，不注入。
    let run = match &subject {
        Some(subject) => quote! {
            ::zhuru_rt::inject_on_fields(&mut self.#subject, mocks, fakes);
        },
        None => quote! {
            let _ = (mocks, fakes);
        },
    };

    Ok(quote! {
        impl #ident {
            /// 构建本轮的 mock 池与 fake 序列并执行一轮注入。
            /// 配置错误（如 fake 位置重复）在这里立刻返回。
            pub fn inject(&mut self) -> ::zhuru_rt::anyhow::Result<()> {
                #[allow(unused_mut)]
                let mut mocks = ::zhuru_rt::MockPool::new();
                #[allow(unused_mut)]
                let mut fakes = ::zhuru_rt::FakeSeq::new();
                #(#pool_stmts)*
                #(#fake_stmts)*
                #run
                ::std::result::Result::Ok(())
            }
        }
    })
}

fn require_bare(attr: &Attribute, message: &str) -> syn::Result<()> {
    if matches!(attr.meta, syn::Meta::Path(_)) {
        Ok(())
    } else {
        Err(syn::Error::new_spanned(attr, message))
    }
}

fn parse_mock_nested(attr: &Attribute) -> syn::Result<bool> {
    match &attr.meta {
        syn::Meta::Path(_) => Ok(false),
        syn::Meta::List(_) => {
            let arg: syn::Ident = attr
                .parse_args()
                .map_err(|_| mock_form_error(attr))?;
            if arg == "inject" {
                Ok(true)
            } else {
                Err(mock_form_error(attr))
            }
        }
        syn::Meta::NameValue(_) => Err(mock_form_error(attr)),
    }
}

fn mock_form_error(attr: &Attribute) -> syn::Error {
    syn::Error::new_spanned(attr, "mock 标记只支持 #[mock] 或 #[mock(inject)]")
}
