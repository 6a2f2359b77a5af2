//! Naming conventions that tie accessors and storage fields to the property they implement.
//!
//! Each matcher maps a raw member identifier to the candidate property name, or `None` when
//! the identifier does not follow the convention. Qualified identifiers of explicit interface
//! implementations keep their qualifier: `Shop.ICart.get_Total` yields `Shop.ICart.Total`.

use regex::Regex;
use std::sync::OnceLock;

use crate::domain::metadata::MethodForm;

/// Maps an identifier to a candidate property name
pub type MatchFunction = fn(&str) -> Option<String>;

fn getter_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^(.*\.)?get_(.+)$").expect("getter name regex"))
}

fn setter_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^(.*\.)?set_(.+)$").expect("setter name regex"))
}

/// Compiler-generated auto-property storage, e.g. `<Total>k__BackingField`.
fn backing_field_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^<(.+)>k__BackingField$").expect("backing field regex"))
}

/// Hand-written storage, e.g. `_total` or `m_total`.
fn prefixed_field_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^(?:m_|_)([A-Za-z])(\w*)$").expect("prefixed field regex"))
}

fn strip_accessor(re: &Regex, identifier: &str) -> Option<String> {
    let caps = re.captures(identifier)?;
    let qualifier = caps.get(1).map_or("", |m| m.as_str());
    Some(format!("{}{}", qualifier, &caps[2]))
}

pub fn match_getter_property_name(identifier: &str) -> Option<String> {
    strip_accessor(getter_regex(), identifier)
}

pub fn match_setter_property_name(identifier: &str) -> Option<String> {
    strip_accessor(setter_regex(), identifier)
}

pub fn match_field_property_name(identifier: &str) -> Option<String> {
    if let Some(caps) = backing_field_regex().captures(identifier) {
        return Some(caps[1].to_string());
    }
    let caps = prefixed_field_regex().captures(identifier)?;
    Some(format!("{}{}", caps[1].to_uppercase(), &caps[2]))
}

/// Matcher for an accessor form; `None` for forms that are not accessors.
pub fn match_function_for(form: MethodForm) -> Option<MatchFunction> {
    match form {
        MethodForm::Getter => Some(match_getter_property_name),
        MethodForm::Setter => Some(match_setter_property_name),
        MethodForm::None | MethodForm::Normal | MethodForm::Constructor => None,
    }
}

pub fn field_match_function() -> MatchFunction {
    match_field_property_name
}

/// Member part of a full name: `Ns.Type::Ns.IFoo.get_Bar(System.Int32)` → `Ns.IFoo.get_Bar`.
pub fn member_tail(full_name: &str) -> &str {
    let tail = full_name
        .rsplit_once("::")
        .map_or(full_name, |(_, member)| member);
    tail.split_once('(').map_or(tail, |(name, _)| name)
}

/// `full_name` ends with `suffix` at a name boundary (`::` or `.`), ignoring any parameter list.
pub fn ends_with_segment(full_name: &str, suffix: &str) -> bool {
    if suffix.is_empty() {
        return false;
    }
    let path = full_name
        .split_once('(')
        .map_or(full_name, |(path, _)| path);
    match path.strip_suffix(suffix) {
        Some("") => true,
        Some(head) => head.ends_with('.') || head.ends_with(':'),
        None => false,
    }
}
