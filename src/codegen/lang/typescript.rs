// TypeScript: Express request handler

use super::{ActionInfo, Language};
use crate::codegen::schema::{Scalar, TypeRef};

pub struct TypeScript;

impl Language for TypeScript {
    fn extension(&self) -> &'static str {
        "ts"
    }

    fn scalar(&self, scalar: Scalar) -> &'static str {
        match scalar {
            Scalar::Id | Scalar::Int | Scalar::Float => "number",
            Scalar::String => "string",
            Scalar::Boolean => "boolean",
        }
    }

    fn custom_scalar(&self) -> &'static str {
        "any"
    }

    fn record_header(&self, name: &str) -> String {
        format!("type {name} =")
    }

    fn field(&self, name: &str, ty: &str, type_ref: &TypeRef) -> String {
        let optional = if type_ref.required { "" } else { "?" };
        let ty = if type_ref.list { format!("{ty}[]") } else { ty.to_string() };
        format!("{name}{optional}: {ty}")
    }

    fn wrap_type(&self, ty: &str, type_ref: &TypeRef) -> String {
        if type_ref.list {
            format!("{ty}[]")
        } else {
            ty.to_string()
        }
    }

    fn enum_definition(&self, name: &str, values: &[String]) -> String {
        let members: Vec<String> = values.iter().map(|v| format!("'{v}'")).collect();
        format!("type {name} = {}", members.join(" | "))
    }

    fn action_template(&self, action: &ActionInfo, type_defs: &str) -> String {
        let name = &action.name;
        let args_type = action.args_type();
        let output = &action.output_type;
        format!(
            r"import {{ Request, Response }} from 'express';

{type_defs}

function {name}(args: {args_type}): {output} {{
  // run some business logic
  return {{}} as {output}
}}

// Request Handler
const handler = async (req: Request, res: Response) => {{
  // get request input
  const params: {args_type} = req.body.input

  const result = {name}(params)

  /*
  // In case of errors:
  return res.status(400).json({{
    message: 'error happened'
  }})
  */

  // success
  return res.json(result)
}}

module.exports = handler
"
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scalars() {
        assert_eq!(TypeScript.scalar(Scalar::Id), "number");
        assert_eq!(TypeScript.scalar(Scalar::Float), "number");
        assert_eq!(TypeScript.scalar(Scalar::Boolean), "boolean");
    }

    #[test]
    fn test_enum_definition() {
        let values = vec!["ADMIN".to_string(), "USER".to_string()];
        assert_eq!(
            TypeScript.enum_definition("Role", &values),
            "type Role = 'ADMIN' | 'USER'"
        );
    }

    #[test]
    fn test_template_reads_envelope_input() {
        let action = ActionInfo {
            name: "InsertUserAction".to_string(),
            output_type: "TokenOutput".to_string(),
            args: vec![],
        };
        let code = TypeScript.action_template(&action, "type TokenOutput = {\n}");
        assert!(code.contains("const params: InsertUserActionArgs = req.body.input"));
        assert!(code.contains("function InsertUserAction(args: InsertUserActionArgs): TokenOutput {"));
        assert!(code.contains("return {} as TokenOutput"));
    }
}
