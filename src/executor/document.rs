//! Document lowering
//!
//! Turns a parsed GraphQL document into an owned operation plan: the first
//! operation's selection with variables substituted, fragment spreads
//! expanded and `@skip`/`@include` applied. Everything downstream works on
//! this plan instead of the parser's AST.

use graphql_parser::query::{
    Definition, Directive, FragmentDefinition, OperationDefinition, Selection as GqlSelection,
    SelectionSet, TypeCondition, Value as GqlValue, parse_query,
};
use indexmap::IndexMap;
use serde_json::Value;
use std::collections::HashMap;

use crate::core::{ExecutionError, InputValue};

/// Variables supplied with a request
pub type Variables = HashMap<String, Value>;

/// Meta field available on every object type
pub(crate) const TYPENAME_FIELD: &str = "__typename";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum OperationKind {
    Query,
    Mutation,
}

#[derive(Debug, Clone)]
pub(crate) struct OperationPlan {
    pub kind: OperationKind,
    pub selection: Vec<Selection>,
}

#[derive(Debug, Clone)]
pub(crate) enum Selection {
    Field(SelectedField),
    Fragment {
        type_condition: Option<String>,
        selection: Vec<Selection>,
    },
}

#[derive(Debug, Clone)]
pub(crate) struct SelectedField {
    pub alias: Option<String>,
    pub name: String,
    pub arguments: IndexMap<String, InputValue>,
    pub selection: Vec<Selection>,
}

impl SelectedField {
    /// Key under which the field's value is reported
    pub fn response_key(&self) -> &str {
        self.alias.as_deref().unwrap_or(&self.name)
    }
}

/// Parse `query` and lower its first operation
///
/// Lowering stops with `InvalidOperation` once more than `max_fields`
/// selections have been produced, counting every fragment expansion.
pub(crate) fn plan(
    query: &str,
    variables: &Variables,
    max_fields: usize,
) -> Result<OperationPlan, ExecutionError> {
    let doc = parse_query::<String>(query).map_err(|e| ExecutionError::Parse {
        message: e.to_string(),
    })?;

    let fragments: HashMap<&str, &FragmentDefinition<'_, String>> = doc
        .definitions
        .iter()
        .filter_map(|def| match def {
            Definition::Fragment(fragment) => Some((fragment.name.as_str(), fragment)),
            Definition::Operation(_) => None,
        })
        .collect();

    let operation = doc
        .definitions
        .iter()
        .find_map(|def| match def {
            Definition::Operation(op) => Some(op),
            Definition::Fragment(_) => None,
        })
        .ok_or_else(|| ExecutionError::InvalidOperation {
            message: "No operation found in document".to_string(),
        })?;

    let (kind, selection_set, definitions) = match operation {
        OperationDefinition::SelectionSet(set) => (OperationKind::Query, set, &[][..]),
        OperationDefinition::Query(query) => (
            OperationKind::Query,
            &query.selection_set,
            &query.variable_definitions[..],
        ),
        OperationDefinition::Mutation(mutation) => (
            OperationKind::Mutation,
            &mutation.selection_set,
            &mutation.variable_definitions[..],
        ),
        OperationDefinition::Subscription(_) => {
            return Err(ExecutionError::InvalidOperation {
                message: "Subscriptions are not supported".to_string(),
            });
        }
    };

    let mut lowerer = Lowerer {
        fragments,
        variables: variables
            .iter()
            .map(|(name, value)| (name.clone(), InputValue::from_json(value)))
            .collect(),
        visiting: Vec::new(),
        selected: 0,
        max_fields,
    };

    // Declared defaults fill in variables the caller did not supply
    for definition in definitions {
        if lowerer.variables.contains_key(&definition.name) {
            continue;
        }
        if let Some(default) = &definition.default_value
            && let Some(value) = lowerer.lower_value(default)?
        {
            lowerer.variables.insert(definition.name.clone(), value);
        }
    }

    let selection = lowerer.lower_selection_set(selection_set)?;
    Ok(OperationPlan { kind, selection })
}

struct Lowerer<'d, 'a> {
    fragments: HashMap<&'d str, &'d FragmentDefinition<'a, String>>,
    variables: HashMap<String, InputValue>,
    visiting: Vec<String>,
    selected: usize,
    max_fields: usize,
}

impl<'d, 'a> Lowerer<'d, 'a> {
    fn lower_selection_set(
        &mut self,
        set: &SelectionSet<'a, String>,
    ) -> Result<Vec<Selection>, ExecutionError> {
        let mut lowered = Vec::new();

        for item in &set.items {
            match item {
                GqlSelection::Field(field) => {
                    if !self.should_include(&field.directives)? {
                        continue;
                    }
                    self.count_selection()?;

                    let mut arguments = IndexMap::new();
                    for (name, value) in &field.arguments {
                        // Arguments bound to undefined variables count as not supplied
                        if let Some(value) = self.lower_value(value)? {
                            arguments.insert(name.clone(), value);
                        }
                    }

                    lowered.push(Selection::Field(SelectedField {
                        alias: field.alias.clone(),
                        name: field.name.clone(),
                        arguments,
                        selection: self.lower_selection_set(&field.selection_set)?,
                    }));
                }
                GqlSelection::InlineFragment(fragment) => {
                    if !self.should_include(&fragment.directives)? {
                        continue;
                    }
                    self.count_selection()?;

                    lowered.push(Selection::Fragment {
                        type_condition: fragment
                            .type_condition
                            .as_ref()
                            .map(|TypeCondition::On(name)| name.clone()),
                        selection: self.lower_selection_set(&fragment.selection_set)?,
                    });
                }
                GqlSelection::FragmentSpread(spread) => {
                    if !self.should_include(&spread.directives)? {
                        continue;
                    }
                    self.count_selection()?;

                    let name = spread.fragment_name.as_str();
                    let fragment = *self.fragments.get(name).ok_or_else(|| {
                        ExecutionError::InvalidOperation {
                            message: format!("Unknown fragment '{}'", name),
                        }
                    })?;

                    if self.visiting.iter().any(|visiting| visiting == name) {
                        return Err(ExecutionError::InvalidOperation {
                            message: format!("Fragment '{}' spreads itself", name),
                        });
                    }

                    self.visiting.push(name.to_string());
                    let selection = self.lower_selection_set(&fragment.selection_set);
                    self.visiting.pop();

                    let TypeCondition::On(type_condition) = &fragment.type_condition;
                    lowered.push(Selection::Fragment {
                        type_condition: Some(type_condition.clone()),
                        selection: selection?,
                    });
                }
            }
        }

        Ok(lowered)
    }

    fn count_selection(&mut self) -> Result<(), ExecutionError> {
        self.selected += 1;
        if self.selected > self.max_fields {
            return Err(ExecutionError::InvalidOperation {
                message: format!(
                    "Document expands to more than {} selections",
                    self.max_fields
                ),
            });
        }
        Ok(())
    }

    /// Evaluate `@skip(if:)` and `@include(if:)`
    fn should_include(&self, directives: &[Directive<'a, String>]) -> Result<bool, ExecutionError> {
        for directive in directives {
            let skip_when = match directive.name.as_str() {
                "skip" => true,
                "include" => false,
                _ => continue,
            };

            let condition = directive
                .arguments
                .iter()
                .find(|(name, _)| name == "if")
                .map(|(_, value)| self.lower_value(value))
                .transpose()?
                .flatten();

            match condition {
                Some(InputValue::Boolean(flag)) if flag == skip_when => return Ok(false),
                Some(InputValue::Boolean(_)) => {}
                _ => {
                    return Err(ExecutionError::InvalidOperation {
                        message: format!(
                            "Directive '@{}' requires a Boolean 'if' argument",
                            directive.name
                        ),
                    });
                }
            }
        }

        Ok(true)
    }

    /// Lower a literal; `None` for a reference to an undefined variable
    fn lower_value(&self, value: &GqlValue<'a, String>) -> Result<Option<InputValue>, ExecutionError> {
        let lowered = match value {
            GqlValue::Variable(name) => return Ok(self.variables.get(name).cloned()),
            GqlValue::Null => InputValue::Null,
            GqlValue::Int(number) => {
                InputValue::Int(number.as_i64().ok_or_else(|| ExecutionError::Parse {
                    message: "Int literal out of range".to_string(),
                })?)
            }
            GqlValue::Float(f) => InputValue::Float(*f),
            GqlValue::String(s) => InputValue::String(s.clone()),
            GqlValue::Boolean(b) => InputValue::Boolean(*b),
            GqlValue::Enum(e) => InputValue::Enum(e.clone()),
            GqlValue::List(items) => {
                let mut lowered = Vec::with_capacity(items.len());
                for item in items {
                    lowered.push(self.lower_value(item)?.unwrap_or(InputValue::Null));
                }
                InputValue::List(lowered)
            }
            GqlValue::Object(fields) => {
                let mut lowered = IndexMap::new();
                for (name, item) in fields {
                    if let Some(item) = self.lower_value(item)? {
                        lowered.insert(name.clone(), item);
                    }
                }
                InputValue::Object(lowered)
            }
        };
        Ok(Some(lowered))
    }
}

/// Fields of one object keyed by response key
///
/// A key whose selections name different fields or pass different
/// arguments cannot be merged and holds the `InvalidSelection` error.
pub(crate) type CollectedFields = IndexMap<String, Result<SelectedField, ExecutionError>>;

/// Flatten a selection for an object of `type_name`
///
/// Fragments apply when they have no type condition or when it names
/// `type_name`. Fields sharing a response key are merged, keeping the
/// position of the first occurrence.
pub(crate) fn collect_fields(selection: &[Selection], type_name: &str) -> CollectedFields {
    let mut collected = IndexMap::new();
    collect_into(selection, type_name, &mut collected);
    collected
}

fn collect_into(selection: &[Selection], type_name: &str, collected: &mut CollectedFields) {
    for item in selection {
        match item {
            Selection::Field(field) => {
                let key = field.response_key();
                let conflict = match collected.get_mut(key) {
                    Some(Ok(existing))
                        if existing.name == field.name && existing.arguments == field.arguments =>
                    {
                        existing.selection.extend(field.selection.iter().cloned());
                        continue;
                    }
                    Some(Ok(existing)) => Some(format!(
                        "fields '{}' and '{}' conflict under response key '{}'",
                        existing.name, field.name, key
                    )),
                    Some(Err(_)) => continue,
                    None => None,
                };

                let entry = match conflict {
                    Some(message) => Err(ExecutionError::InvalidSelection {
                        field_name: key.to_string(),
                        message,
                    }),
                    None => Ok(field.clone()),
                };
                collected.insert(key.to_string(), entry);
            }
            Selection::Fragment {
                type_condition,
                selection,
            } => {
                if type_condition.as_deref().is_none_or(|t| t == type_name) {
                    collect_into(selection, type_name, collected);
                }
            }
        }
    }
}
