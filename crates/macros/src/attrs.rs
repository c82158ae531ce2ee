use proc_macro2::Span;
use syn::Attribute;
use syn::Expr;
use syn::Lit;
use syn::Meta;
use syn::meta::ParseNestedMeta;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandKind {
	Slash,
	Message,
	User,
}

/// Arguments of `#[command(...)]`, `#[message_command(...)]` and
/// `#[user_command(...)]`.
#[derive(Default)]
pub struct CommandAttrs {
	pub name: Option<Expr>,
	pub description: Option<Expr>,
	pub guild: Option<Expr>,
	pub default_member_permissions: Option<Expr>,
	pub nsfw: Option<Expr>,
	pub group: Option<Expr>,
	pub sub_group: Option<Expr>,
}

impl CommandAttrs {
	pub fn parse(&mut self, meta: ParseNestedMeta, kind: CommandKind) -> syn::Result<()> {
		let slash_only = ["description", "group", "sub_group"];
		if kind != CommandKind::Slash && slash_only.iter().any(|key| meta.path.is_ident(key)) {
			return Err(meta.error("context menu commands only take `name`, `guild`, `default_member_permissions` and `nsfw`"));
		}

		let slot = if meta.path.is_ident("name") {
			&mut self.name
		} else if meta.path.is_ident("description") {
			&mut self.description
		} else if meta.path.is_ident("guild") {
			&mut self.guild
		} else if meta.path.is_ident("default_member_permissions") {
			&mut self.default_member_permissions
		} else if meta.path.is_ident("nsfw") {
			&mut self.nsfw
		} else if meta.path.is_ident("group") {
			&mut self.group
		} else if meta.path.is_ident("sub_group") {
			&mut self.sub_group
		} else {
			return Err(meta.error("unsupported command attribute"));
		};

		if slot.is_some() {
			return Err(meta.error("attribute given more than once"));
		}
		*slot = Some(meta.value()?.parse()?);
		Ok(())
	}

	pub fn validate(&self) -> syn::Result<()> {
		if let (Some(group), Some(_)) = (&self.group, &self.sub_group) {
			return Err(syn::Error::new_spanned(
				group,
				"`sub_group` already names its parent group, drop `group`",
			));
		}
		Ok(())
	}
}

/// Contents of `#[arg(...)]` on a parameter.
#[derive(Default)]
pub struct ParamAttrs {
	pub description: Option<Expr>,
	pub name: Option<Expr>,
	pub min_value: Option<Expr>,
	pub max_value: Option<Expr>,
	pub min_length: Option<Expr>,
	pub max_length: Option<Expr>,
	pub channel_types: Option<Expr>,
	pub choices: Option<Expr>,
	pub autocomplete: Option<Expr>,
	pub default: Option<Expr>,
	pub required: Option<Span>,
}

impl ParamAttrs {
	/// Removes every `#[arg]` from `attrs` and parses them.
	pub fn take(attrs: &mut Vec<Attribute>) -> syn::Result<Option<Self>> {
		let mut parsed = None;
		let mut result = Ok(());

		attrs.retain(|attr| {
			if !attr.path().is_ident("arg") {
				return true;
			}
			let params = parsed.get_or_insert_with(ParamAttrs::default);
			if let Err(e) = attr.parse_nested_meta(|meta| params.parse(meta)) {
				match &mut result {
					Ok(()) => result = Err(e),
					Err(existing) => existing.combine(e),
				}
			}
			false
		});

		result?;
		if let Some(params) = &parsed {
			params.validate()?;
		}
		Ok(parsed)
	}

	fn parse(&mut self, meta: ParseNestedMeta) -> syn::Result<()> {
		if meta.path.is_ident("required") {
			if self.required.is_some() {
				return Err(meta.error("attribute given more than once"));
			}
			self.required = Some(meta.input.span());
			return Ok(());
		}

		let slot = if meta.path.is_ident("description") {
			&mut self.description
		} else if meta.path.is_ident("name") {
			&mut self.name
		} else if meta.path.is_ident("min_value") {
			&mut self.min_value
		} else if meta.path.is_ident("max_value") {
			&mut self.max_value
		} else if meta.path.is_ident("min_length") {
			&mut self.min_length
		} else if meta.path.is_ident("max_length") {
			&mut self.max_length
		} else if meta.path.is_ident("channel_types") {
			&mut self.channel_types
		} else if meta.path.is_ident("choices") {
			&mut self.choices
		} else if meta.path.is_ident("autocomplete") {
			&mut self.autocomplete
		} else if meta.path.is_ident("default") {
			&mut self.default
		} else {
			return Err(meta.error("unsupported argument attribute"));
		};

		if slot.is_some() {
			return Err(meta.error("attribute given more than once"));
		}
		*slot = Some(meta.value()?.parse()?);
		Ok(())
	}

	pub fn has_any(&self) -> bool {
		self.description.is_some()
			|| self.name.is_some()
			|| self.min_value.is_some()
			|| self.max_value.is_some()
			|| self.min_length.is_some()
			|| self.max_length.is_some()
			|| self.channel_types.is_some()
			|| self.choices.is_some()
			|| self.autocomplete.is_some()
			|| self.default.is_some()
			|| self.required.is_some()
	}

	fn validate(&self) -> syn::Result<()> {
		if let (Some(default), Some(_)) = (&self.default, self.required) {
			return Err(syn::Error::new_spanned(
				default,
				"an argument with a default value cannot also be `required`",
			));
		}
		if let (Some(choices), Some(_)) = (&self.choices, &self.autocomplete) {
			return Err(syn::Error::new_spanned(
				choices,
				"`choices` and `autocomplete` cannot be combined",
			));
		}
		Ok(())
	}
}

/// First paragraph of the doc comment, joined into one line.
pub fn doc_summary(attrs: &[Attribute]) -> Option<String> {
	let mut lines = Vec::new();
	for attr in attrs {
		let Meta::NameValue(nv) = &attr.meta else {
			continue;
		};
		if !nv.path.is_ident("doc") {
			continue;
		}
		let Expr::Lit(expr) = &nv.value else {
			continue;
		};
		let Lit::Str(text) = &expr.lit else {
			continue;
		};
		let line = text.value().trim().to_string();
		if line.is_empty() {
			if lines.is_empty() {
				continue;
			}
			break;
		}
		lines.push(line);
	}

	if lines.is_empty() {
		None
	} else {
		Some(lines.join(" "))
	}
}
