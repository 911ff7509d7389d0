//! Deterministic rendering of the public surface.
//!
//! Input lists are regrouped into ordered maps and sets before any line is
//! emitted, so permuting the metadata never changes the output. Enum variant
//! order is the one exception: it is part of the surface.

use crate::metadata::{ComponentMetadata, MemberKind, MemberMetadata, ModuleMetadata, TypeKind, TypeMetadata};
use approval_core::CandidateText;
use std::collections::{BTreeMap, BTreeSet};

#[derive(Default)]
struct ModuleSurface {
    types: BTreeMap<(String, TypeKind), TypeSurface>,
    functions: BTreeSet<(String, String)>,
    constants: BTreeSet<(String, String)>,
}

#[derive(Default)]
struct TypeSurface {
    generics: Vec<String>,
    alias_of: Option<String>,
    supertraits: BTreeSet<String>,
    variants: Vec<String>,
    members: BTreeSet<(MemberKind, String, String)>,
    implements: BTreeSet<String>,
}

/// Renders every publicly reachable declaration of `metadata`.
pub fn render(metadata: &ComponentMetadata) -> CandidateText {
    let mut modules: BTreeMap<String, ModuleSurface> = BTreeMap::new();
    for module in metadata.modules.iter().filter(|m| m.visibility.is_public()) {
        let surface = modules.entry(module.path.trim().to_string()).or_default();
        collect_module(surface, module);
    }

    let mut lines = Vec::new();
    for (path, module) in &modules {
        if !path.is_empty() {
            lines.push(format!("pub mod {}", path));
        }
        for ((name, kind), ty) in &module.types {
            render_type(&mut lines, &qualify(path, name), *kind, ty);
        }
        for (name, signature) in &module.functions {
            lines.push(format!("pub fn {}{}", qualify(path, name), signature));
        }
        for (name, signature) in &module.constants {
            lines.push(typed("pub const", &qualify(path, name), signature));
        }
    }
    CandidateText::from_lines(lines)
}

fn collect_module(surface: &mut ModuleSurface, module: &ModuleMetadata) {
    for ty in module.types.iter().filter(|t| t.visibility.is_public()) {
        let entry = surface
            .types
            .entry((ty.name.trim().to_string(), ty.kind))
            .or_default();
        merge_type(entry, ty);
    }
    for function in module.functions.iter().filter(|f| f.visibility.is_public()) {
        surface
            .functions
            .insert((function.name.trim().to_string(), collapse_whitespace(&function.signature)));
    }
    for constant in module.constants.iter().filter(|c| c.visibility.is_public()) {
        surface
            .constants
            .insert((constant.name.trim().to_string(), collapse_whitespace(&constant.signature)));
    }
}

// Duplicate declarations merge; where two copies disagree on an ordered list
// the greater one wins so the choice does not depend on input order.
fn merge_type(entry: &mut TypeSurface, ty: &TypeMetadata) {
    let generics: Vec<String> = ty.generics.iter().map(|g| collapse_whitespace(g)).collect();
    if generics > entry.generics {
        entry.generics = generics;
    }
    let variants: Vec<String> = ty.variants.iter().map(|v| collapse_whitespace(v)).collect();
    if variants > entry.variants {
        entry.variants = variants;
    }
    let alias_of = ty.alias_of.as_deref().map(collapse_whitespace);
    if alias_of > entry.alias_of {
        entry.alias_of = alias_of;
    }
    entry
        .supertraits
        .extend(ty.supertraits.iter().map(|s| collapse_whitespace(s)));
    entry
        .implements
        .extend(ty.implements.iter().map(|s| collapse_whitespace(s)));

    // Trait items are as visible as the trait itself.
    let members = ty
        .members
        .iter()
        .filter(|m| ty.kind == TypeKind::Trait || m.visibility.is_public());
    entry.members.extend(members.map(member_key));
}

fn member_key(member: &MemberMetadata) -> (MemberKind, String, String) {
    (
        member.kind,
        member.name.trim().to_string(),
        collapse_whitespace(&member.signature),
    )
}

fn render_type(lines: &mut Vec<String>, fqn: &str, kind: TypeKind, ty: &TypeSurface) {
    let generics = if ty.generics.is_empty() {
        String::new()
    } else {
        format!("<{}>", ty.generics.join(", "))
    };
    let mut header = format!("pub {} {}{}", kind.keyword(), fqn, generics);
    match kind {
        TypeKind::Trait if !ty.supertraits.is_empty() => {
            let supertraits: Vec<&str> = ty.supertraits.iter().map(String::as_str).collect();
            header.push_str(": ");
            header.push_str(&supertraits.join(" + "));
        }
        TypeKind::TypeAlias => {
            if let Some(target) = &ty.alias_of {
                header.push_str(" = ");
                header.push_str(target);
            }
        }
        _ => {}
    }
    lines.push(header);

    for variant in &ty.variants {
        lines.push(format!("pub {}::{}", fqn, variant));
    }
    for (member_kind, name, signature) in &ty.members {
        let member = format!("{}::{}", fqn, name);
        lines.push(match member_kind {
            MemberKind::Field => typed("pub", &member, signature),
            MemberKind::Constant => typed("pub const", &member, signature),
            MemberKind::AssociatedType if signature.is_empty() => format!("pub type {}", member),
            MemberKind::AssociatedType => format!("pub type {} = {}", member, signature),
            MemberKind::AssociatedFn | MemberKind::Method => format!("pub fn {}{}", member, signature),
        });
    }
    for implemented in &ty.implements {
        lines.push(format!("impl {} for {}", implemented, fqn));
    }
}

fn qualify(path: &str, name: &str) -> String {
    if path.is_empty() {
        name.to_string()
    } else {
        format!("{}::{}", path, name)
    }
}

fn typed(prefix: &str, item: &str, ty: &str) -> String {
    if ty.is_empty() {
        format!("{} {}", prefix, item)
    } else {
        format!("{} {}: {}", prefix, item, ty)
    }
}

fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn metadata(value: serde_json::Value) -> ComponentMetadata {
        serde_json::from_value(value).expect("valid metadata")
    }

    #[test]
    fn test_renders_public_items_only() {
        let text = render(&metadata(json!({
            "format_version": 1,
            "component": "Widget",
            "modules": [
                {
                    "path": "widgets",
                    "types": [
                        {
                            "name": "Widget",
                            "kind": "struct",
                            "visibility": "public",
                            "implements": ["Debug", "Clone"],
                            "members": [
                                { "name": "run", "visibility": "public", "signature": "(&self)" },
                                { "name": "id", "kind": "field", "visibility": "public", "signature": "u32" },
                                { "name": "secret", "kind": "field", "visibility": "crate", "signature": "u8" }
                            ]
                        },
                        { "name": "Internal", "kind": "struct", "visibility": "crate" }
                    ],
                    "functions": [
                        { "name": "make", "visibility": "public", "signature": "() -> Widget" }
                    ]
                },
                { "path": "widgets::detail", "visibility": "private",
                  "types": [{ "name": "Leak", "kind": "struct", "visibility": "public" }] }
            ]
        })));

        assert_eq!(
            text.as_str(),
            "pub mod widgets\n\
             pub struct widgets::Widget\n\
             pub widgets::Widget::id: u32\n\
             pub fn widgets::Widget::run(&self)\n\
             impl Clone for widgets::Widget\n\
             impl Debug for widgets::Widget\n\
             pub fn widgets::make() -> Widget\n"
        );
    }

    #[test]
    fn test_renders_enums_traits_and_aliases() {
        let text = render(&metadata(json!({
            "format_version": 1,
            "component": "Shapes",
            "modules": [{
                "path": "shapes",
                "types": [
                    { "name": "Shape", "kind": "trait", "visibility": "public",
                      "supertraits": ["Send", "Debug"],
                      "members": [
                          { "name": "area", "signature": "(&self) -> f64" },
                          { "name": "Unit", "kind": "associated_type" }
                      ] },
                    { "name": "Kind", "kind": "enum", "visibility": "public",
                      "variants": ["Square", "Circle(f64)"] },
                    { "name": "Area", "kind": "type_alias", "visibility": "public",
                      "generics": ["T"], "alias_of": "Option< T >" }
                ],
                "constants": [
                    { "name": "PI", "visibility": "public", "signature": "f64" }
                ]
            }]
        })));

        assert_eq!(
            text.as_str(),
            "pub mod shapes\n\
             pub type shapes::Area<T> = Option< T >\n\
             pub enum shapes::Kind\n\
             pub shapes::Kind::Square\n\
             pub shapes::Kind::Circle(f64)\n\
             pub trait shapes::Shape: Debug + Send\n\
             pub type shapes::Shape::Unit\n\
             pub fn shapes::Shape::area(&self) -> f64\n\
             pub const shapes::PI: f64\n"
        );
    }

    #[test]
    fn test_root_module_items_are_unqualified() {
        let text = render(&metadata(json!({
            "format_version": 1,
            "component": "tiny",
            "modules": [{
                "path": "",
                "functions": [{ "name": "hello", "visibility": "public", "signature": "()" }]
            }]
        })));
        assert_eq!(text.as_str(), "pub fn hello()\n");
    }

    #[test]
    fn test_empty_surface_renders_empty_text() {
        let text = render(&metadata(json!({ "format_version": 1, "component": "none" })));
        assert!(text.is_empty());
    }

    #[test]
    fn test_whitespace_in_signatures_is_collapsed() {
        let text = render(&metadata(json!({
            "format_version": 1,
            "component": "ws",
            "modules": [{
                "path": "ws",
                "functions": [{ "name": "f", "visibility": "public", "signature": "(a:  u8,\n   b: u8)   -> u8" }]
            }]
        })));
        assert_eq!(text.as_str(), "pub mod ws\npub fn ws::f(a: u8, b: u8) -> u8\n");
    }

    #[test]
    fn test_duplicate_modules_merge() {
        let text = render(&metadata(json!({
            "format_version": 1,
            "component": "dup",
            "modules": [
                { "path": "a", "functions": [{ "name": "z", "visibility": "public", "signature": "()" }] },
                { "path": "a", "functions": [{ "name": "b", "visibility": "public", "signature": "()" }] }
            ]
        })));
        assert_eq!(text.as_str(), "pub mod a\npub fn a::b()\npub fn a::z()\n");
    }
}
