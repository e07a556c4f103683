//! Type, field and argument definitions

use indexmap::IndexMap;
use std::fmt;
use std::sync::Arc;

use super::registry::{FnResolver, Resolver, ResolverContext};
use crate::core::{ExecutionError, FieldValue, InputValue, ScalarKind};

/// Declared output type of a field
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeRef {
    Scalar(ScalarKind),
    Object(String),
    List(Box<TypeRef>),
}

impl TypeRef {
    pub fn scalar(kind: ScalarKind) -> Self {
        TypeRef::Scalar(kind)
    }

    pub fn object(type_name: impl Into<String>) -> Self {
        TypeRef::Object(type_name.into())
    }

    pub fn list(inner: TypeRef) -> Self {
        TypeRef::List(Box::new(inner))
    }

    pub fn is_list(&self) -> bool {
        matches!(self, TypeRef::List(_))
    }

    /// Innermost scalar kind, if any
    pub fn scalar_kind(&self) -> Option<ScalarKind> {
        match self {
            TypeRef::Scalar(kind) => Some(*kind),
            TypeRef::Object(_) => None,
            TypeRef::List(inner) => inner.scalar_kind(),
        }
    }

    /// Name of the innermost object type, if any
    pub fn object_name(&self) -> Option<&str> {
        match self {
            TypeRef::Scalar(_) => None,
            TypeRef::Object(name) => Some(name),
            TypeRef::List(inner) => inner.object_name(),
        }
    }
}

impl fmt::Display for TypeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeRef::Scalar(kind) => write!(f, "{}", kind),
            TypeRef::Object(name) => write!(f, "{}", name),
            TypeRef::List(inner) => write!(f, "[{}]", inner),
        }
    }
}

/// A field argument: scalar kind, optional default, optional requiredness
#[derive(Debug, Clone, PartialEq)]
pub struct ArgumentDefinition {
    pub name: String,
    pub kind: ScalarKind,
    pub default_value: Option<InputValue>,
    pub required: bool,
}

impl ArgumentDefinition {
    /// An optional argument
    pub fn new(name: impl Into<String>, kind: ScalarKind) -> Self {
        Self {
            name: name.into(),
            kind,
            default_value: None,
            required: false,
        }
    }

    /// A non-null argument that must be supplied
    pub fn required(name: impl Into<String>, kind: ScalarKind) -> Self {
        Self {
            required: true,
            ..Self::new(name, kind)
        }
    }

    pub fn with_default(mut self, value: InputValue) -> Self {
        self.default_value = Some(value);
        self
    }
}

/// A field on an object type
///
/// `name` is the internal attribute name used for default resolution;
/// `wire_name` is what requests select and responses carry.
#[derive(Clone)]
pub struct FieldDefinition {
    pub name: String,
    pub wire_name: String,
    pub field_type: TypeRef,
    pub description: Option<String>,
    pub arguments: IndexMap<String, ArgumentDefinition>,
    pub required_flag: Option<String>,
    pub resolver: Option<Arc<dyn Resolver>>,
}

impl FieldDefinition {
    pub fn new(name: impl Into<String>, field_type: TypeRef) -> Self {
        let name = name.into();
        Self {
            wire_name: name.clone(),
            name,
            field_type,
            description: None,
            arguments: IndexMap::new(),
            required_flag: None,
            resolver: None,
        }
    }

    /// Declare the name used on the wire (e.g. `createdAt` for `created_at`)
    pub fn wire_name(mut self, wire_name: impl Into<String>) -> Self {
        self.wire_name = wire_name.into();
        self
    }

    pub fn describe(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_argument(mut self, argument: ArgumentDefinition) -> Self {
        self.arguments.insert(argument.name.clone(), argument);
        self
    }

    /// Only resolve when the context flag is present and `true`
    pub fn requires_flag(mut self, flag: impl Into<String>) -> Self {
        self.required_flag = Some(flag.into());
        self
    }

    pub fn resolver<R: Resolver + 'static>(mut self, resolver: R) -> Self {
        self.resolver = Some(Arc::new(resolver));
        self
    }

    /// Attach a synchronous resolver closure
    pub fn resolve_with<F>(self, f: F) -> Self
    where
        F: Fn(ResolverContext<'_>) -> Result<FieldValue, ExecutionError> + Send + Sync + 'static,
    {
        self.resolver(FnResolver::new(f))
    }

    pub fn argument(&self, name: &str) -> Option<&ArgumentDefinition> {
        self.arguments.get(name)
    }

    pub fn has_resolver(&self) -> bool {
        self.resolver.is_some()
    }
}

impl fmt::Debug for FieldDefinition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldDefinition")
            .field("name", &self.name)
            .field("wire_name", &self.wire_name)
            .field("field_type", &self.field_type)
            .field("arguments", &self.arguments)
            .field("required_flag", &self.required_flag)
            .field("resolver", &self.has_resolver())
            .finish()
    }
}

/// An object type: a name and its ordered fields
#[derive(Debug, Clone)]
pub struct ObjectTypeDefinition {
    pub name: String,
    pub description: Option<String>,
    pub fields: Vec<FieldDefinition>,
}

impl ObjectTypeDefinition {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
            fields: Vec::new(),
        }
    }

    pub fn describe(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn field(mut self, field: FieldDefinition) -> Self {
        self.fields.push(field);
        self
    }
}
