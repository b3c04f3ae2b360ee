use std::collections::HashSet;

use proc_macro2::{Delimiter, TokenStream, TokenTree};
use syn::ext::IdentExt;
use syn::visit_mut::{self, VisitMut};
use syn::{Attribute, Field, GenericArgument, Ident, PathArguments, Type};

/// Names of methods emitted on every builder. A field with one of these names would shadow them.
const RESERVED: &[&str] = &["build", "builder", "unsafe_build", "maybe_uninit"];

/// How a field gets its value before `build()` can be called.
pub(crate) enum Kind {
    /// Must be set through its setter.
    Required,
    /// `#[not_null] Option<T>`: must be set, setter takes `T`.
    NotNull(Type),
    /// `Option<T>` without attributes: starts as `None`, setter takes `T`.
    Nullable(Type),
    /// `#[default]` or `#[default(expr)]`. `None` means `Default::default()`.
    Defaulted(Option<TokenStream>),
}

pub(crate) struct BuilderField<'a> {
    pub ident: &'a Ident,
    /// The declared type with `Self` spelled out, since the generated code lives in the builder's
    /// `impl`s where `Self` is the builder.
    pub ty: Type,
    pub kind: Kind,
    /// `#[into]`: the setter accepts anything convertible into the stored type.
    pub into: bool,
    /// Type parameter tracking this field's state on the builder, e.g. `FieldName`.
    pub state: Ident,
    pub set: Ident,
    pub unset: Ident,
}

/// Parses every field of the struct `self_ty`, reporting all bad fields at once, and gives each
/// one marker names no other field shares.
pub(crate) fn parse_all<'a>(
    fields: impl IntoIterator<Item = &'a Field>,
    self_ty: &Type,
) -> syn::Result<Vec<BuilderField<'a>>> {
    let mut parsed = Vec::new();
    let mut errors: Option<syn::Error> = None;
    for field in fields {
        match BuilderField::parse(field, self_ty) {
            Ok(field) => parsed.push(field),
            Err(err) => match &mut errors {
                Some(errors) => errors.combine(err),
                None => errors = Some(err),
            },
        }
    }
    if let Some(errors) = errors {
        return Err(errors);
    }
    check_pointer_methods(&parsed)?;
    assign_markers(&mut parsed);
    Ok(parsed)
}

/// Every field gets a `ptr_<field>` method, which a setter of a field named that way would clash
/// with.
fn check_pointer_methods(fields: &[BuilderField<'_>]) -> syn::Result<()> {
    let mut errors: Option<syn::Error> = None;
    for field in fields {
        let name = field.ident.unraw().to_string();
        let target = match fields
            .iter()
            .find(|other| format!("ptr_{}", other.ident.unraw()) == name)
        {
            Some(target) => target,
            None => continue,
        };
        let err = syn::Error::new_spanned(
            field.ident,
            format!(
                "field `{}` collides with the `{}()` method generated for field `{}`",
                name,
                name,
                target.ident.unraw()
            ),
        );
        match &mut errors {
            Some(errors) => errors.combine(err),
            None => errors = Some(err),
        }
    }
    errors.map_or(Ok(()), Err)
}

/// Marker names come from the upper camel case field name. Names without any letters left, and
/// names already taken by an earlier field, get `_<index>` appended. Camel names never contain
/// `_`, so the suffixed ones can't collide with them or with each other.
fn assign_markers(fields: &mut [BuilderField<'_>]) {
    let mut seen = HashSet::new();
    for (i, field) in fields.iter_mut().enumerate() {
        let mut base = upper_camel(&field.ident.unraw().to_string());
        if base.is_empty() || !seen.insert(base.clone()) {
            base = format!("{}_{}", base, i);
        }
        field.set_markers(&base);
    }
}

impl<'a> BuilderField<'a> {
    fn parse(field: &'a Field, self_ty: &Type) -> syn::Result<Self> {
        let ident = match &field.ident {
            Some(ident) => ident,
            None => {
                return Err(syn::Error::new_spanned(
                    field,
                    "`Builder` can only be derived for structs with named fields",
                ))
            }
        };
        let bare = ident.unraw().to_string();
        if RESERVED.contains(&bare.as_str()) {
            return Err(syn::Error::new_spanned(
                ident,
                format!("field `{}` collides with a method of the generated builder", bare),
            ));
        }

        let mut default = None;
        let mut not_null = None;
        let mut into = false;
        for attr in &field.attrs {
            if attr.path.is_ident("default") {
                if default.is_some() {
                    return Err(syn::Error::new_spanned(attr, "duplicate `#[default]`"));
                }
                default = Some(parse_default(attr)?);
            } else if attr.path.is_ident("not_null") {
                expect_bare(attr)?;
                not_null = Some(attr);
            } else if attr.path.is_ident("into") {
                expect_bare(attr)?;
                into = true;
            }
        }

        let mut ty = field.ty.clone();
        ReplaceSelf(self_ty).visit_type_mut(&mut ty);

        let kind = match (not_null, default, option_inner(&ty).cloned()) {
            (Some(attr), Some(_), _) => {
                return Err(syn::Error::new_spanned(
                    attr,
                    "`#[not_null]` and `#[default]` cannot be combined",
                ))
            }
            (Some(_), None, Some(inner)) => Kind::NotNull(inner),
            (Some(attr), None, None) => {
                return Err(syn::Error::new_spanned(
                    attr,
                    "`#[not_null]` only applies to `Option<_>` fields; other fields are always required",
                ))
            }
            (None, Some(default), _) => Kind::Defaulted(default),
            (None, None, Some(inner)) => Kind::Nullable(inner),
            (None, None, None) => Kind::Required,
        };

        let mut field = BuilderField {
            ident,
            ty,
            kind,
            into,
            state: format_ident!("Field"),
            set: format_ident!("Set"),
            unset: format_ident!("Unset"),
        };
        field.set_markers(&upper_camel(&bare));
        Ok(field)
    }

    fn set_markers(&mut self, base: &str) {
        self.state = format_ident!("Field{}", base);
        self.set = format_ident!("{}Set", base);
        self.unset = format_ident!("{}Unset", base);
    }

    /// Whether `build()` may be called without this field's setter having run.
    pub(crate) fn is_optional(&self) -> bool {
        matches!(self.kind, Kind::Nullable(_) | Kind::Defaulted(_))
    }

    /// The type the setter takes before any `#[into]` conversion.
    pub(crate) fn setter_ty(&self) -> &Type {
        match &self.kind {
            Kind::NotNull(inner) | Kind::Nullable(inner) => inner,
            Kind::Required | Kind::Defaulted(_) => &self.ty,
        }
    }

    /// Initial value written by `builder()`, if any.
    pub(crate) fn initial_value(&self) -> Option<TokenStream> {
        match &self.kind {
            Kind::Nullable(_) => Some(quote!(::core::option::Option::None)),
            Kind::Defaulted(Some(expr)) => Some(expr.clone()),
            Kind::Defaulted(None) => Some(quote!(::core::default::Default::default())),
            Kind::Required | Kind::NotNull(_) => None,
        }
    }
}

/// Rewrites `Self` to the struct's own type.
struct ReplaceSelf<'a>(&'a Type);

impl VisitMut for ReplaceSelf<'_> {
    fn visit_type_mut(&mut self, ty: &mut Type) {
        if let Type::Path(p) = ty {
            if p.qself.is_none() && p.path.is_ident("Self") {
                *ty = self.0.clone();
                return;
            }
        }
        visit_mut::visit_type_mut(self, ty);
    }
}

/// `#[default]` yields `None`, `#[default(expr)]` yields `expr`.
fn parse_default(attr: &Attribute) -> syn::Result<Option<TokenStream>> {
    if attr.tokens.is_empty() {
        return Ok(None);
    }
    let mut tokens = attr.tokens.clone().into_iter();
    match (tokens.next(), tokens.next()) {
        (Some(TokenTree::Group(group)), None) if group.delimiter() == Delimiter::Parenthesis => {
            if group.stream().is_empty() {
                Err(syn::Error::new(group.span(), "`#[default()]` needs an expression"))
            } else {
                Ok(Some(group.stream()))
            }
        }
        _ => Err(syn::Error::new_spanned(
            &attr.tokens,
            "expected `#[default]` or `#[default(...)]`",
        )),
    }
}

fn expect_bare(attr: &Attribute) -> syn::Result<()> {
    if attr.tokens.is_empty() {
        Ok(())
    } else {
        let name = attr.path.get_ident().map(ToString::to_string).unwrap_or_default();
        Err(syn::Error::new_spanned(
            &attr.tokens,
            format!("`#[{}]` takes no arguments", name),
        ))
    }
}

/// Returns `T` for `Option<T>`, `std::option::Option<T>` and `core::option::Option<T>`.
fn option_inner(ty: &Type) -> Option<&Type> {
    let path = match ty {
        Type::Path(p) if p.qself.is_none() => &p.path,
        _ => return None,
    };
    let segments: Vec<_> = path.segments.iter().map(|s| s.ident.to_string()).collect();
    let segments: Vec<_> = segments.iter().map(String::as_str).collect();
    if !matches!(
        segments.as_slice(),
        ["Option"] | ["std", "option", "Option"] | ["core", "option", "Option"]
    ) {
        return None;
    }
    match &path.segments.last()?.arguments {
        PathArguments::AngleBracketed(args) if args.args.len() == 1 => match args.args.first()? {
            GenericArgument::Type(inner) => Some(inner),
            _ => None,
        },
        _ => None,
    }
}

/// `pet_name` -> `PetName`. Used to derive the state marker names.
fn upper_camel(s: &str) -> String {
    s.split('_')
        .filter(|part| !part.is_empty())
        .map(|part| {
            let mut c = part.chars();
            match c.next() {
                None => String::new(),
                Some(ch) => ch.to_uppercase().collect::<String>() + c.as_str(),
            }
        })
        .collect()
}
