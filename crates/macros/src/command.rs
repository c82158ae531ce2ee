use proc_macro2::Ident;
use proc_macro2::TokenStream;
use quote::format_ident;
use quote::quote;
use syn::Attribute;
use syn::FnArg;
use syn::ItemFn;
use syn::Pat;
use syn::PatType;
use syn::Type;
use syn::ext::IdentExt;
use syn::spanned::Spanned;

use crate::attrs::CommandAttrs;
use crate::attrs::CommandKind;
use crate::attrs::ParamAttrs;
use crate::attrs::doc_summary;

/// A parameter after the invocation context.
struct Param {
	ident: Ident,
	ty: Type,
	attrs: ParamAttrs,
}

impl Param {
	fn from_arg(index: usize, arg: &mut FnArg) -> syn::Result<Self> {
		let pat_type = match arg {
			FnArg::Receiver(receiver) => {
				return Err(syn::Error::new_spanned(receiver, "commands cannot take `self`"));
			}
			FnArg::Typed(pat_type) => pat_type,
		};
		let attrs = ParamAttrs::take(&mut pat_type.attrs)?.unwrap_or_default();

		let ident = match &*pat_type.pat {
			Pat::Ident(pat) if pat.subpat.is_none() => pat.ident.clone(),
			other => {
				return Err(syn::Error::new_spanned(
					other,
					format!("parameter {} must be a plain identifier, it names the option", index),
				));
			}
		};

		Ok(Self {
			ident,
			ty: (*pat_type.ty).clone(),
			attrs,
		})
	}

	fn option_name(&self) -> String {
		self.ident.unraw().to_string()
	}

	/// Compile time checks that the metadata fits the parameter type.
	fn type_checks(&self) -> TokenStream {
		let ty = &self.ty;
		let mut checks = TokenStream::new();
		if self.attrs.min_value.is_some() || self.attrs.max_value.is_some() {
			checks.extend(quote!(::halfmoon::__private::assert_numeric::<#ty>();));
		}
		if self.attrs.min_length.is_some() || self.attrs.max_length.is_some() {
			checks.extend(quote!(::halfmoon::__private::assert_text::<#ty>();));
		}
		if self.attrs.channel_types.is_some() {
			checks.extend(quote!(::halfmoon::__private::assert_channel::<#ty>();));
		}
		checks
	}

	fn builder(&self) -> TokenStream {
		let ty = &self.ty;
		let name = self.option_name();
		let attrs = &self.attrs;

		let mut metadata = Vec::new();
		if let Some(expr) = &attrs.description {
			metadata.push(quote!(::halfmoon::Description::new(#expr)));
		}
		if let Some(expr) = &attrs.name {
			metadata.push(quote!(::halfmoon::Name::new(#expr)));
		}
		if let Some(expr) = &attrs.choices {
			metadata.push(quote!(::halfmoon::Choices::from_pairs(#expr)));
		}
		if let Some(expr) = &attrs.channel_types {
			metadata.push(quote!(::halfmoon::ChannelTypes::new(#expr)));
		}
		if let Some(expr) = &attrs.min_value {
			metadata.push(quote!(::halfmoon::MinValue::new(#expr)));
		}
		if let Some(expr) = &attrs.max_value {
			metadata.push(quote!(::halfmoon::MaxValue::new(#expr)));
		}
		if let Some(expr) = &attrs.min_length {
			metadata.push(quote!(::halfmoon::MinLength::new(#expr)));
		}
		if let Some(expr) = &attrs.max_length {
			metadata.push(quote!(::halfmoon::MaxLength::new(#expr)));
		}
		if let Some(expr) = &attrs.autocomplete {
			metadata.push(quote!(::halfmoon::Autocomplete::from_fn(#expr)));
		}

		let default = attrs.default.as_ref().map(|_| quote!(.with_default()));
		let required = attrs.required.map(|_| quote!(.required()));

		quote! {
			::halfmoon::builder::OptionBuilder::new::<#ty>(#name)
				#(.meta(#metadata))*
				#default
				#required
		}
	}

	fn extractor(&self, index: usize) -> TokenStream {
		let ty = &self.ty;
		match &self.attrs.default {
			Some(default) => quote! {
				::halfmoon::__private::extract_or_else::<#ty>(&__options, &__names, #index, || #default)?
			},
			None => quote! {
				::halfmoon::__private::extract::<#ty>(&__options, &__names, #index)?
			},
		}
	}
}

fn is_doc(attr: &Attribute) -> bool {
	attr.path().is_ident("doc")
}

pub fn expand(kind: CommandKind, attrs: CommandAttrs, mut function: ItemFn) -> syn::Result<TokenStream> {
	attrs.validate()?;

	let sig = &function.sig;
	if sig.asyncness.is_none() {
		return Err(syn::Error::new_spanned(sig.fn_token, "command callbacks must be `async`"));
	}
	if !sig.generics.params.is_empty() || sig.generics.where_clause.is_some() {
		return Err(syn::Error::new_spanned(&sig.generics, "command callbacks cannot be generic"));
	}
	if let Some(variadic) = &sig.variadic {
		return Err(syn::Error::new_spanned(variadic, "command callbacks cannot be variadic"));
	}

	let vis = function.vis.clone();
	let fn_name = function.sig.ident.clone();
	let docs: Vec<Attribute> = function.attrs.iter().filter(|a| is_doc(a)).cloned().collect();
	let summary = doc_summary(&function.attrs);
	function.attrs.retain(|a| !is_doc(a));

	let mut inputs = function.sig.inputs.iter_mut();
	match inputs.next() {
		Some(FnArg::Receiver(receiver)) => {
			return Err(syn::Error::new_spanned(receiver, "commands cannot take `self`"));
		}
		Some(FnArg::Typed(ctx)) => reject_ctx_attrs(ctx)?,
		None => {
			return Err(syn::Error::new(
				function.sig.paren_token.span.join(),
				"the first parameter must be the invocation `Context`",
			));
		}
	}
	let params = inputs
		.enumerate()
		.map(|(i, arg)| Param::from_arg(i + 1, arg))
		.collect::<syn::Result<Vec<_>>>()?;

	let command_name = match &attrs.name {
		Some(expr) => quote!(#expr),
		None => {
			let name = fn_name.unraw().to_string();
			quote!(#name)
		}
	};
	let guild = attrs.guild.as_ref().map(|g| quote!(.guild(#g)));
	let permissions = attrs
		.default_member_permissions
		.as_ref()
		.map(|p| quote!(.default_member_permissions(#p)));
	let nsfw = attrs.nsfw.as_ref().map(|n| quote!(.nsfw(#n)));

	let inner = format_ident!("__{}_callback", fn_name.unraw());
	function.sig.ident = inner.clone();
	function.vis = syn::Visibility::Inherited;

	let build = match kind {
		CommandKind::Slash => {
			let description = match (&attrs.description, &summary) {
				(Some(expr), _) => Some(quote!(.description(#expr))),
				(None, Some(doc)) => Some(quote!(.description(#doc))),
				(None, None) => None,
			};
			let group = attrs.group.as_ref().map(|g| quote!(.group(#g)));
			let sub_group = attrs.sub_group.as_ref().map(|s| quote!(.sub_group(#s)));
			let checks = params.iter().map(Param::type_checks);
			let builders = params.iter().map(Param::builder);
			let idents: Vec<&Ident> = params.iter().map(|p| &p.ident).collect();
			let types = params.iter().map(|p| &p.ty);
			let extractors = params.iter().enumerate().map(|(i, p)| p.extractor(i));
			let (names, names_clone) = if params.is_empty() {
				(None, None)
			} else {
				(
					Some(quote! {
						let __names = ::std::sync::Arc::new(::halfmoon::__private::option_names(&meta));
					}),
					Some(quote! {
						let __names = ::std::sync::Arc::clone(&__names);
					}),
				)
			};

			quote! {
				#(#checks)*
				let meta = ::halfmoon::builder::CommandBuilder::slash(#command_name)
					#description
					#guild
					#permissions
					#nsfw
					#group
					#sub_group
					#(.option(#builders))*
					.build()?;
				#names
				let callback: ::halfmoon::CommandCallback = ::std::sync::Arc::new(
					move |__ctx: ::halfmoon::Context, __options: ::halfmoon::ResolvedOptions|
						-> ::halfmoon::__private::BoxFuture<'static, ::halfmoon::CommandResult<()>>
					{
						#names_clone
						::std::boxed::Box::pin(async move {
							let _ = &__options;
							#(let #idents: #types = #extractors;)*
							::halfmoon::CommandOutput::into_result(#inner(__ctx, #(#idents),*).await)
						})
					},
				);
				::std::result::Result::Ok(::halfmoon::Command::new(meta, callback))
			}
		}
		CommandKind::Message | CommandKind::User => {
			let [target] = params.as_slice() else {
				return Err(syn::Error::new_spanned(
					&function.sig.inputs,
					"context menu commands take the `Context` and exactly one target parameter",
				));
			};
			if target.attrs.has_any() {
				return Err(syn::Error::new_spanned(
					&target.ident,
					"context menu targets cannot carry `#[arg]` metadata",
				));
			}
			let constructor = match kind {
				CommandKind::Message => quote!(message),
				_ => quote!(user),
			};
			let ty = &target.ty;

			quote! {
				let meta = ::halfmoon::builder::CommandBuilder::#constructor(#command_name)
					.target::<#ty>()
					#guild
					#permissions
					#nsfw
					.build()?;
				let callback: ::halfmoon::CommandCallback = ::std::sync::Arc::new(
					move |__ctx: ::halfmoon::Context, _options: ::halfmoon::ResolvedOptions|
						-> ::halfmoon::__private::BoxFuture<'static, ::halfmoon::CommandResult<()>>
					{
						::std::boxed::Box::pin(async move {
							let __target = ::halfmoon::__private::extract_target::<#ty>(&__ctx)?;
							::halfmoon::CommandOutput::into_result(#inner(__ctx, __target).await)
						})
					},
				);
				::std::result::Result::Ok(::halfmoon::Command::new(meta, callback))
			}
		}
	};

	Ok(quote! {
		#(#docs)*
		#vis fn #fn_name() -> ::halfmoon::CommandResult<::halfmoon::Command> {
			#function

			fn build() -> ::halfmoon::CommandResult<::halfmoon::Command> {
				#build
			}

			static COMMAND: ::std::sync::OnceLock<::halfmoon::CommandResult<::halfmoon::Command>> =
				::std::sync::OnceLock::new();
			::std::clone::Clone::clone(COMMAND.get_or_init(build))
		}
	})
}

fn reject_ctx_attrs(ctx: &PatType) -> syn::Result<()> {
	match ctx.attrs.iter().find(|a| a.path().is_ident("arg")) {
		Some(attr) => Err(syn::Error::new(
			attr.span(),
			"the invocation context is not an option and takes no `#[arg]`",
		)),
		None => Ok(()),
	}
}
