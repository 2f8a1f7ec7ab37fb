// Schema type map
//
// Holds every definition in declaration order, validates type references
// and synthesizes one `<Action>Args` object per `Mutation` field.

use std::collections::HashMap;

use super::sdl::Definition;
use super::CodegenError;

/// Root type whose fields are the actions
pub const MUTATION: &str = "Mutation";

/// Operation roots are not rendered as records
const ROOT_TYPES: [&str; 3] = ["Query", "Mutation", "Subscription"];

/// Built-in GraphQL scalars
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scalar {
    Id,
    Int,
    Float,
    String,
    Boolean,
}

impl Scalar {
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "ID" => Some(Self::Id),
            "Int" => Some(Self::Int),
            "Float" => Some(Self::Float),
            "String" => Some(Self::String),
            "Boolean" => Some(Self::Boolean),
            _ => None,
        }
    }
}

/// A field's type, flattened: element nullability inside lists is dropped
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeRef {
    pub name: String,
    /// Outer type is non-null
    pub required: bool,
    pub list: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDef {
    pub name: String,
    pub ty: TypeRef,
    pub args: Vec<FieldDef>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeKind {
    Object,
    Input,
    Scalar,
    Enum,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeDef {
    pub kind: TypeKind,
    pub name: String,
    pub fields: Vec<FieldDef>,
    /// Enum values
    pub values: Vec<String>,
}

impl TypeDef {
    pub const fn new(kind: TypeKind, name: String) -> Self {
        Self {
            kind,
            name,
            fields: Vec::new(),
            values: Vec::new(),
        }
    }

    /// Rendered as a struct / object type
    pub fn is_record(&self) -> bool {
        matches!(self.kind, TypeKind::Object | TypeKind::Input)
            && !ROOT_TYPES.contains(&self.name.as_str())
    }
}

#[derive(Debug, Clone)]
pub struct Schema {
    types: Vec<TypeDef>,
    index: HashMap<String, usize>,
}

impl Schema {
    /// Build the type map from parsed definitions
    pub fn from_definitions(definitions: Vec<Definition>) -> Result<Self, CodegenError> {
        let mut schema = Self {
            types: Vec::new(),
            index: HashMap::new(),
        };

        for Definition { extend, def } in definitions {
            match (schema.index.get(&def.name).copied(), extend) {
                (Some(i), true) => {
                    let existing = &mut schema.types[i];
                    existing.fields.extend(def.fields);
                    existing.values.extend(def.values);
                }
                (Some(_), false) => return Err(CodegenError::DuplicateType(def.name)),
                (None, _) => schema.insert(def),
            }
        }

        schema.validate_references()?;
        schema.add_action_argument_types()?;
        Ok(schema)
    }

    fn insert(&mut self, def: TypeDef) {
        self.index.insert(def.name.clone(), self.types.len());
        self.types.push(def);
    }

    pub fn get(&self, name: &str) -> Option<&TypeDef> {
        self.index.get(name).map(|&i| &self.types[i])
    }

    /// All definitions, declaration order, synthesized `Args` types last
    pub fn types(&self) -> &[TypeDef] {
        &self.types
    }

    pub fn is_custom_scalar(&self, name: &str) -> bool {
        self.get(name).is_some_and(|def| def.kind == TypeKind::Scalar)
    }

    fn validate_references(&self) -> Result<(), CodegenError> {
        for def in &self.types {
            for field in &def.fields {
                for ty in std::iter::once(&field.ty).chain(field.args.iter().map(|a| &a.ty)) {
                    if Scalar::from_name(&ty.name).is_none() && self.get(&ty.name).is_none() {
                        return Err(CodegenError::UnknownType {
                            type_name: ty.name.clone(),
                            referenced_by: format!("{}.{}", def.name, field.name),
                        });
                    }
                }
            }
        }
        Ok(())
    }

    /// One `<Action>Args` object per mutation field, fields = its arguments
    fn add_action_argument_types(&mut self) -> Result<(), CodegenError> {
        let mutation = self.get(MUTATION).ok_or(CodegenError::MissingMutation)?;
        let args_types: Vec<TypeDef> = mutation
            .fields
            .iter()
            .map(|field| TypeDef {
                kind: TypeKind::Object,
                name: args_type_name(&field.name),
                fields: field.args.clone(),
                values: Vec::new(),
            })
            .collect();

        for def in args_types {
            if self.index.contains_key(&def.name) {
                return Err(CodegenError::DuplicateType(def.name));
            }
            self.insert(def);
        }
        Ok(())
    }

    /// The `Mutation` field declaring this action
    pub fn find_action(&self, name: &str) -> Result<&FieldDef, CodegenError> {
        self.get(MUTATION)
            .ok_or(CodegenError::MissingMutation)?
            .fields
            .iter()
            .find(|field| field.name == name)
            .ok_or_else(|| CodegenError::UnknownAction(name.to_string()))
    }
}

pub fn args_type_name(action: &str) -> String {
    format!("{action}Args")
}
