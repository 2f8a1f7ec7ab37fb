// Rust: module implementing this server's `Action` trait

use super::{to_pascal_case, to_snake_case, ActionInfo, Language};
use crate::codegen::schema::{Scalar, TypeRef};

pub struct Rust;

const DERIVES: &str = "#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]";

/// Strict and reserved keywords, written as raw identifiers
const KEYWORDS: &[&str] = &[
    "abstract", "as", "async", "await", "become", "box", "break", "const", "continue", "do",
    "dyn", "else", "enum", "extern", "false", "final", "fn", "for", "gen", "if", "impl", "in",
    "let", "loop", "macro", "match", "mod", "move", "mut", "override", "priv", "pub", "ref",
    "return", "static", "struct", "trait", "true", "try", "type", "typeof", "unsafe", "unsized",
    "use", "virtual", "where", "while", "yield",
];

/// Keywords that cannot be raw identifiers; these get a trailing underscore
const NON_RAW: &[&str] = &["crate", "self", "super", "_"];

fn field_ident(name: &str) -> String {
    let snake = to_snake_case(name);
    if NON_RAW.contains(&snake.as_str()) {
        format!("{snake}_")
    } else if KEYWORDS.contains(&snake.as_str()) {
        format!("r#{snake}")
    } else {
        snake
    }
}

impl Language for Rust {
    fn extension(&self) -> &'static str {
        "rs"
    }

    fn scalar(&self, scalar: Scalar) -> &'static str {
        match scalar {
            Scalar::Id | Scalar::String => "String",
            Scalar::Int => "i32",
            Scalar::Float => "f64",
            Scalar::Boolean => "bool",
        }
    }

    fn custom_scalar(&self) -> &'static str {
        "serde_json::Value"
    }

    fn record_header(&self, name: &str) -> String {
        format!("{DERIVES}\n#[serde(default)]\npub struct {name}")
    }

    fn field(&self, name: &str, ty: &str, type_ref: &TypeRef) -> String {
        let ident = field_ident(name);
        let ty = self.wrap_type(ty, type_ref);
        if ident.trim_start_matches("r#") == name {
            format!("pub {ident}: {ty},")
        } else {
            format!("#[serde(rename = \"{name}\")]\npub {ident}: {ty},")
        }
    }

    fn wrap_type(&self, ty: &str, type_ref: &TypeRef) -> String {
        let ty = if type_ref.list {
            format!("Vec<{ty}>")
        } else {
            ty.to_string()
        };
        if type_ref.required {
            ty
        } else {
            format!("Option<{ty}>")
        }
    }

    fn enum_definition(&self, name: &str, values: &[String]) -> String {
        let variants: Vec<String> = values
            .iter()
            .enumerate()
            .map(|(i, value)| {
                let default = if i == 0 { "    #[default]\n" } else { "" };
                let variant = to_pascal_case(value);
                let rename = if &variant == value {
                    String::new()
                } else {
                    format!("    #[serde(rename = \"{value}\")]\n")
                };
                format!("{default}{rename}    {variant},")
            })
            .collect();
        format!(
            "#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]\npub enum {name} {{\n{}\n}}",
            variants.join("\n")
        )
    }

    fn action_template(&self, action: &ActionInfo, type_defs: &str) -> String {
        let name = &action.name;
        let args_type = action.args_type();
        let output = &action.output_type;
        let function = to_snake_case(name);
        let arg_docs: String = action
            .args
            .iter()
            .map(|(arg, ty)| format!("/// - `{arg}`: `{ty}`\n"))
            .collect();
        format!(
            r#"// {name}: argument/result records and the business logic stub

use serde::{{Deserialize, Serialize}};

use super::Action;
use crate::error::ActionError;

{type_defs}

pub struct {name};

impl Action for {name} {{
    const NAME: &'static str = "{name}";
    type Args = {args_type};
    type Output = {output};

    fn execute(&self, args: {args_type}) -> Result<{output}, ActionError> {{
        Ok({function}(args))
    }}
}}

/// Takes the action arguments and returns the action's response type.
///
/// Arguments:
{arg_docs}pub fn {function}(_args: {args_type}) -> {output} {{
    Default::default()
}}
"#
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ty(required: bool, list: bool) -> TypeRef {
        TypeRef {
            name: "String".to_string(),
            required,
            list,
        }
    }

    #[test]
    fn test_wrap_type() {
        assert_eq!(Rust.wrap_type("String", &ty(true, false)), "String");
        assert_eq!(Rust.wrap_type("String", &ty(false, false)), "Option<String>");
        assert_eq!(Rust.wrap_type("String", &ty(true, true)), "Vec<String>");
        assert_eq!(Rust.wrap_type("String", &ty(false, true)), "Option<Vec<String>>");
    }

    #[test]
    fn test_field_renames_and_keywords() {
        assert_eq!(Rust.field("username", "String", &ty(true, false)), "pub username: String,");
        assert_eq!(
            Rust.field("accessToken", "String", &ty(true, false)),
            "#[serde(rename = \"accessToken\")]\npub access_token: String,"
        );
        assert_eq!(Rust.field("type", "String", &ty(true, false)), "pub r#type: String,");
        for keyword in ["where", "loop", "use", "let", "move", "return", "mut", "pub", "trait", "async", "await", "dyn"] {
            assert_eq!(
                Rust.field(keyword, "i32", &ty(true, false)),
                format!("pub r#{keyword}: i32,")
            );
        }
        for keyword in ["self", "super", "crate"] {
            assert_eq!(
                Rust.field(keyword, "i32", &ty(true, false)),
                format!("#[serde(rename = \"{keyword}\")]\npub {keyword}_: i32,")
            );
        }
    }

    #[test]
    fn test_enum_definition() {
        let values = vec!["ADMIN".to_string(), "Guest".to_string()];
        let def = Rust.enum_definition("Role", &values);
        assert!(def.contains("pub enum Role {\n    #[default]\n    #[serde(rename = \"ADMIN\")]\n    Admin,\n    Guest,\n}"));
    }

    #[test]
    fn test_template_implements_action() {
        let action = ActionInfo {
            name: "InsertUserAction".to_string(),
            output_type: "Option<TokenOutput>".to_string(),
            args: vec![("user_info".to_string(), "Option<UserInfo>".to_string())],
        };
        let code = Rust.action_template(&action, "");
        assert!(code.contains("impl Action for InsertUserAction {"));
        assert!(code.contains("const NAME: &'static str = \"InsertUserAction\";"));
        assert!(code.contains("type Output = Option<TokenOutput>;"));
        assert!(code.contains("/// - `user_info`: `Option<UserInfo>`\npub fn insert_user_action("));
    }
}
