//! Conditional visibility rules.
//!
//! Schemas declare conditions as nested maps:
//!
//! ```json
//! { "visible": { "components[{i}][show_cta]": { "checked": true } } }
//! ```
//!
//! They are parsed once into a flat list of [`VisibilityRule`]s. Per
//! component the trailing `{i}` / `{index}` of the dependent name is
//! substituted, then the rules are either handed to the renderer in
//! `#states` shape ([`states_json`]) or evaluated server side against the
//! submitted values by a [`RuleEngine`].

use crate::error::ConfigurationError;
use serde::{Serialize, Serializer};
use serde_json::{Map, Value};
use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;
use vactory_util::{deep_equal, is_empty_value, replace_index_token};

/// One condition on a dependent element.
#[derive(Debug, Clone, PartialEq)]
pub struct Condition {
    /// Operator name, e.g. `checked` or `value`.
    pub operator: String,
    /// Set by a leading `!` on the operator.
    pub negate: bool,
    pub expected: Value,
}

/// `target_state` holds when `condition` holds on the element named
/// `dependent_name`.
#[derive(Debug, Clone, PartialEq)]
pub struct VisibilityRule {
    pub target_state: String,
    pub dependent_name: String,
    pub condition: Condition,
}

impl VisibilityRule {
    /// The rule with the dependent name's index placeholder resolved.
    pub fn for_index(&self, index: &str) -> VisibilityRule {
        VisibilityRule {
            target_state: self.target_state.clone(),
            dependent_name: replace_index_token(&self.dependent_name, index),
            condition: self.condition.clone(),
        }
    }

    /// Renderer selector for the dependent element.
    pub fn selector(&self) -> String {
        format!("[name=\"{}\"]", self.dependent_name)
    }
}

/// Resolves the index placeholder of every rule.
pub fn rules_for_index(rules: &[VisibilityRule], index: &str) -> Vec<VisibilityRule> {
    rules.iter().map(|r| r.for_index(index)).collect()
}

/// Parses a `state -> { dependent -> { operator -> expected } }` map.
///
/// Entries whose state or condition is not an object are ignored. A
/// condition object with several operators yields one rule per operator.
/// Operator names are checked against the default operator map.
pub fn parse_conditions(conditions: &Value) -> Result<Vec<VisibilityRule>, ConfigurationError> {
    let operators = condition_operators();
    let mut rules = Vec::new();
    let Value::Object(states) = conditions else {
        return Ok(rules);
    };
    for (state, dependents) in states {
        let Value::Object(dependents) = dependents else {
            continue;
        };
        for (dependent_name, condition) in dependents {
            let Value::Object(condition) = condition else {
                continue;
            };
            for (raw_op, expected) in condition {
                let (negate, operator) = split_negation(raw_op);
                if !operators.contains_key(operator) {
                    return Err(ConfigurationError::UnknownCondition(raw_op.clone()));
                }
                rules.push(VisibilityRule {
                    target_state: state.clone(),
                    dependent_name: dependent_name.clone(),
                    condition: Condition {
                        operator: operator.to_string(),
                        negate,
                        expected: expected.clone(),
                    },
                });
            }
        }
    }
    Ok(rules)
}

fn split_negation(name: &str) -> (bool, &str) {
    match name.strip_prefix('!') {
        Some(rest) => (true, rest),
        None => (false, name),
    }
}

/// Renders rules in the `#states` shape understood by the renderer:
/// `{ state: { "[name=\"dep\"]": { operator: expected } } }`.
pub fn states_json(rules: &[VisibilityRule]) -> Value {
    let mut states = Map::new();
    for rule in rules {
        let selectors = states
            .entry(rule.target_state.clone())
            .or_insert_with(|| Value::Object(Map::new()));
        let Value::Object(selectors) = selectors else {
            continue;
        };
        let condition = selectors
            .entry(rule.selector())
            .or_insert_with(|| Value::Object(Map::new()));
        if let Value::Object(condition) = condition {
            let op = if rule.condition.negate {
                format!("!{}", rule.condition.operator)
            } else {
                rule.condition.operator.clone()
            };
            condition.insert(op, rule.condition.expected.clone());
        }
    }
    Value::Object(states)
}

/// Serializes a rule list as its `#states` JSON.
pub fn serialize_rules<S: Serializer>(rules: &[VisibilityRule], s: S) -> Result<S::Ok, S::Error> {
    states_json(rules).serialize(s)
}

// ------------------------------------------------------------------ Engine

/// Evaluates one condition: `actual` is the dependent element's submitted
/// value (if any), `expected` the configured operand.
pub type ConditionFn = fn(actual: Option<&Value>, expected: &Value) -> bool;

pub struct ConditionOperator {
    pub name: &'static str,
    pub aliases: &'static [&'static str],
    pub eval_fn: ConditionFn,
}

/// Map of operator name/alias -> definition.
pub type ConditionOperatorMap = HashMap<String, Arc<ConditionOperator>>;

fn truthy(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => false,
        Some(Value::Bool(b)) => *b,
        Some(Value::Number(n)) => n.as_f64().is_some_and(|n| n != 0.0),
        Some(Value::String(s)) => !s.is_empty() && s != "0",
        Some(Value::Array(a)) => !a.is_empty(),
        Some(Value::Object(o)) => !o.is_empty(),
    }
}

fn expected_flag(expected: &Value) -> bool {
    expected.as_bool().unwrap_or(true)
}

fn loose_equal(actual: &Value, expected: &Value) -> bool {
    match (actual, expected) {
        (Value::Number(n), Value::String(s)) | (Value::String(s), Value::Number(n)) => {
            n.to_string() == *s
        }
        _ => deep_equal(actual, expected),
    }
}

fn value_eval(actual: Option<&Value>, expected: &Value) -> bool {
    let actual = actual.unwrap_or(&Value::Null);
    match (actual, expected) {
        (Value::Array(_), _) => loose_equal(actual, expected),
        // A list of accepted values matches any one of them.
        (_, Value::Array(candidates)) => candidates.iter().any(|c| loose_equal(actual, c)),
        _ => loose_equal(actual, expected),
    }
}

fn checked_eval(actual: Option<&Value>, expected: &Value) -> bool {
    truthy(actual) == expected_flag(expected)
}

fn unchecked_eval(actual: Option<&Value>, expected: &Value) -> bool {
    !truthy(actual) == expected_flag(expected)
}

fn empty_eval(actual: Option<&Value>, expected: &Value) -> bool {
    actual.map_or(true, is_empty_value) == expected_flag(expected)
}

fn filled_eval(actual: Option<&Value>, expected: &Value) -> bool {
    !actual.map_or(true, is_empty_value) == expected_flag(expected)
}

/// All condition operators.
pub fn all_condition_operators() -> Vec<Arc<ConditionOperator>> {
    vec![
        Arc::new(ConditionOperator {
            name: "value",
            aliases: &[],
            eval_fn: value_eval,
        }),
        Arc::new(ConditionOperator {
            name: "checked",
            aliases: &["expanded"],
            eval_fn: checked_eval,
        }),
        Arc::new(ConditionOperator {
            name: "unchecked",
            aliases: &["collapsed"],
            eval_fn: unchecked_eval,
        }),
        Arc::new(ConditionOperator {
            name: "empty",
            aliases: &[],
            eval_fn: empty_eval,
        }),
        Arc::new(ConditionOperator {
            name: "filled",
            aliases: &[],
            eval_fn: filled_eval,
        }),
    ]
}

/// Builds a [`ConditionOperatorMap`] from a list of definitions.
pub fn operators_to_map(operators: Vec<Arc<ConditionOperator>>) -> ConditionOperatorMap {
    let mut map = HashMap::new();
    for op in operators {
        map.insert(op.name.to_string(), Arc::clone(&op));
        for alias in op.aliases {
            map.insert(alias.to_string(), Arc::clone(&op));
        }
    }
    map
}

pub fn condition_operators() -> ConditionOperatorMap {
    operators_to_map(all_condition_operators())
}

/// Translates an element name such as `components[0][title]` into the
/// path `["components", "0", "title"]`.
pub fn name_to_path(name: &str) -> Vec<String> {
    let mut parts = name.split('[');
    let mut path: Vec<String> = parts
        .next()
        .filter(|head| !head.is_empty())
        .map(|head| vec![head.to_string()])
        .unwrap_or_default();
    path.extend(parts.map(|p| p.trim_end_matches(']').to_string()));
    path
}

/// Server-side evaluator for visibility rules.
#[derive(Clone)]
pub struct RuleEngine {
    operators: Arc<ConditionOperatorMap>,
}

impl Default for RuleEngine {
    fn default() -> Self {
        RuleEngine::new(Arc::new(condition_operators()))
    }
}

impl RuleEngine {
    pub fn new(operators: Arc<ConditionOperatorMap>) -> Self {
        RuleEngine { operators }
    }

    /// Evaluates a single rule against the submitted form values.
    pub fn holds(&self, rule: &VisibilityRule, values: &Value) -> Result<bool, ConfigurationError> {
        let op = self
            .operators
            .get(&rule.condition.operator)
            .ok_or_else(|| ConfigurationError::UnknownCondition(rule.condition.operator.clone()))?;
        let path = name_to_path(&rule.dependent_name);
        let actual = vactory_util::get(values, &path);
        let result = (op.eval_fn)(actual, &rule.condition.expected);
        Ok(result != rule.condition.negate)
    }

    /// Evaluates rules grouped by target state.
    ///
    /// A state is active when all of its rules hold. A `!` prefix on the
    /// state inverts it: `!visible` active means `visible` is off.
    pub fn evaluate(
        &self,
        rules: &[VisibilityRule],
        values: &Value,
    ) -> Result<BTreeMap<String, bool>, ConfigurationError> {
        let mut by_state: BTreeMap<&str, bool> = BTreeMap::new();
        for rule in rules {
            let holds = self.holds(rule, values)?;
            let slot = by_state.entry(rule.target_state.as_str()).or_insert(true);
            *slot = *slot && holds;
        }
        Ok(by_state
            .into_iter()
            .map(|(state, active)| {
                let (invert, name) = split_negation(state);
                (name.to_string(), active != invert)
            })
            .collect())
    }
}
