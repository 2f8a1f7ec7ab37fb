//! Target languages for generated action handlers
//!
//! Each language supplies its scalar map, how a record header and a field
//! line look, and the handler template. The shared rendering below turns
//! the schema's type map into type definitions:
//!
//! ```text
//! <header> {
//!   <field>
//!   <field>
//! }
//! ```

mod go;
mod rust;
mod typescript;

use super::schema::{args_type_name, FieldDef, Scalar, Schema, TypeDef, TypeKind, TypeRef};
use super::CodegenError;

pub use go::Go;
pub use rust::Rust;
pub use typescript::TypeScript;

const NEWLINE: &str = "\n";
const INDENT: &str = "  ";

/// Everything a handler template needs about one action
#[derive(Debug, Clone)]
pub struct ActionInfo {
    pub name: String,
    /// Output type, converted to the target language
    pub output_type: String,
    /// `(name, converted type)` per argument
    pub args: Vec<(String, String)>,
}

impl ActionInfo {
    pub fn args_type(&self) -> String {
        args_type_name(&self.name)
    }
}

pub trait Language {
    /// File extension of the generated handler
    fn extension(&self) -> &'static str;

    fn scalar(&self, scalar: Scalar) -> &'static str;

    /// Type used for schema-declared scalars (`scalar jsonb`)
    fn custom_scalar(&self) -> &'static str;

    /// Everything before ` {` of a record definition
    fn record_header(&self, name: &str) -> String;

    /// One field line (may span lines); `ty` is already converted
    fn field(&self, name: &str, ty: &str, type_ref: &TypeRef) -> String;

    /// Full type reference including list/nullable wrapping
    fn wrap_type(&self, ty: &str, type_ref: &TypeRef) -> String;

    fn enum_definition(&self, name: &str, values: &[String]) -> String;

    /// Handler source around the rendered type definitions
    fn action_template(&self, action: &ActionInfo, type_defs: &str) -> String;
}

/// GraphQL type name -> target language type name
pub fn convert_type(lang: &dyn Language, schema: &Schema, name: &str) -> String {
    if let Some(scalar) = Scalar::from_name(name) {
        lang.scalar(scalar).to_string()
    } else if schema.is_custom_scalar(name) {
        lang.custom_scalar().to_string()
    } else {
        name.to_string()
    }
}

fn field_line(lang: &dyn Language, schema: &Schema, field: &FieldDef) -> String {
    let ty = convert_type(lang, schema, &field.ty.name);
    indent(&lang.field(&field.name, &ty, &field.ty))
}

fn type_definition(lang: &dyn Language, schema: &Schema, def: &TypeDef) -> Option<String> {
    if def.is_record() {
        let fields: Vec<String> = def
            .fields
            .iter()
            .map(|field| field_line(lang, schema, field))
            .collect();
        let body = if fields.is_empty() {
            String::new()
        } else {
            fields.join(NEWLINE) + NEWLINE
        };
        Some(format!("{} {{{NEWLINE}{body}}}", lang.record_header(&def.name)))
    } else if def.kind == TypeKind::Enum {
        Some(lang.enum_definition(&def.name, &def.values))
    } else {
        None
    }
}

/// Render every record and enum of the type map, in map order
pub fn render_type_definitions(lang: &dyn Language, schema: &Schema) -> String {
    schema
        .types()
        .iter()
        .filter_map(|def| type_definition(lang, schema, def))
        .collect::<Vec<_>>()
        .join(NEWLINE)
}

/// Render the handler source for `action_name`
pub fn action_code(
    lang: &dyn Language,
    schema: &Schema,
    action_name: &str,
) -> Result<String, CodegenError> {
    let action = schema.find_action(action_name)?;
    let convert = |ty: &TypeRef| lang.wrap_type(&convert_type(lang, schema, &ty.name), ty);

    let info = ActionInfo {
        name: action.name.clone(),
        output_type: convert(&action.ty),
        args: action
            .args
            .iter()
            .map(|arg| (arg.name.clone(), convert(&arg.ty)))
            .collect(),
    };
    let type_defs = render_type_definitions(lang, schema);
    Ok(lang.action_template(&info, &type_defs))
}

/// Indent every line of `text`
fn indent(text: &str) -> String {
    text.lines()
        .map(|line| format!("{INDENT}{line}"))
        .collect::<Vec<_>>()
        .join(NEWLINE)
}

/// `accessToken` -> `access_token`, `userID` -> `user_id`
pub fn to_snake_case(name: &str) -> String {
    let chars: Vec<char> = name.chars().collect();
    let mut out = String::with_capacity(name.len() + 4);
    for (i, &c) in chars.iter().enumerate() {
        if c.is_ascii_uppercase() && i > 0 {
            let prev = chars[i - 1];
            let next_lower = chars.get(i + 1).is_some_and(char::is_ascii_lowercase);
            if prev.is_ascii_lowercase()
                || prev.is_ascii_digit()
                || (prev.is_ascii_uppercase() && next_lower)
            {
                out.push('_');
            }
        }
        out.push(c.to_ascii_lowercase());
    }
    out
}

/// `user_info` -> `UserInfo`, `ADMIN_USER` -> `AdminUser`, `accessToken` -> `AccessToken`
pub fn to_pascal_case(name: &str) -> String {
    name.split('_')
        .filter(|part| !part.is_empty())
        .map(|part| {
            let shouting = part.chars().all(|c| !c.is_ascii_lowercase());
            let mut chars = part.chars();
            chars.next().map_or_else(String::new, |first| {
                let rest: String = chars.collect();
                let rest = if shouting { rest.to_ascii_lowercase() } else { rest };
                format!("{}{rest}", first.to_ascii_uppercase())
            })
        })
        .collect()
}
