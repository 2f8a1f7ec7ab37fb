// Go: net/http handler with its own server

use super::{to_pascal_case, ActionInfo, Language};
use crate::codegen::schema::{Scalar, TypeRef};

pub struct Go;

impl Language for Go {
    fn extension(&self) -> &'static str {
        "go"
    }

    fn scalar(&self, scalar: Scalar) -> &'static str {
        match scalar {
            Scalar::Id | Scalar::Int => "int",
            Scalar::Float => "float32",
            Scalar::String => "string",
            Scalar::Boolean => "bool",
        }
    }

    fn custom_scalar(&self) -> &'static str {
        "interface{}"
    }

    fn record_header(&self, name: &str) -> String {
        format!("type {name} struct")
    }

    /// Exported field with a json tag carrying the schema name
    fn field(&self, name: &str, ty: &str, type_ref: &TypeRef) -> String {
        format!(
            "{} {} `json:\"{name}\"`",
            to_pascal_case(name),
            self.wrap_type(ty, type_ref)
        )
    }

    fn wrap_type(&self, ty: &str, type_ref: &TypeRef) -> String {
        if type_ref.list {
            format!("[]{ty}")
        } else {
            ty.to_string()
        }
    }

    fn enum_definition(&self, name: &str, values: &[String]) -> String {
        let consts: Vec<String> = values
            .iter()
            .map(|v| format!("\t{name}{} {name} = \"{v}\"", to_pascal_case(v)))
            .collect();
        format!("type {name} string\n\nconst (\n{}\n)", consts.join("\n"))
    }

    fn action_template(&self, action: &ActionInfo, type_defs: &str) -> String {
        let name = &action.name;
        let args_type = action.args_type();
        let output = &action.output_type;
        format!(
            r#"package main

import (
	"encoding/json"
	"log"
	"net/http"
)

{type_defs}

func handler(w http.ResponseWriter, r *http.Request) {{
	// Decode the request body into the arguments struct; answer 400 with
	// the decoder's message if it is not valid
	var actionParams {args_type}
	err := json.NewDecoder(r.Body).Decode(&actionParams)
	if err != nil {{
		http.Error(w, err.Error(), http.StatusBadRequest)
		return
	}}

	result := {name}(actionParams)
	data, err := json.Marshal(result)
	if err != nil {{
		http.Error(w, err.Error(), http.StatusBadRequest)
		return
	}}

	w.Header().Set("Content-Type", "application/json")
	w.WriteHeader(http.StatusOK)
	w.Write(data)
}}

// Takes the action arguments and returns the action's response type
func {name}(args {args_type}) {output} {{
	var result {output}
	return result
}}

func main() {{
	mux := http.NewServeMux()
	mux.HandleFunc("/{name}", handler)

	err := http.ListenAndServe(":8080", mux)
	log.Fatal(err)
}}
"#
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scalars() {
        assert_eq!(Go.scalar(Scalar::Id), "int");
        assert_eq!(Go.scalar(Scalar::Float), "float32");
        assert_eq!(Go.scalar(Scalar::Boolean), "bool");
    }

    #[test]
    fn test_list_field() {
        let ty = TypeRef {
            name: "Float".to_string(),
            required: true,
            list: true,
        };
        assert_eq!(
            Go.field("something_else", "float32", &ty),
            "SomethingElse []float32 `json:\"something_else\"`"
        );
    }

    #[test]
    fn test_enum_definition() {
        let values = vec!["ADMIN".to_string()];
        assert_eq!(
            Go.enum_definition("Role", &values),
            "type Role string\n\nconst (\n\tRoleAdmin Role = \"ADMIN\"\n)"
        );
    }

    #[test]
    fn test_template_sets_header_before_status() {
        let action = ActionInfo {
            name: "InsertUserAction".to_string(),
            output_type: "TokenOutput".to_string(),
            args: vec![],
        };
        let code = Go.action_template(&action, "");
        let header = code.find("w.Header().Set(\"Content-Type\"").unwrap();
        let status = code.find("w.WriteHeader(http.StatusOK)").unwrap();
        assert!(header < status);
        assert!(code.contains("mux.HandleFunc(\"/InsertUserAction\", handler)"));
        assert!(code.contains("http.Error(w, err.Error(), http.StatusBadRequest)"));
    }
}
