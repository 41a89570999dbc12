//! `@if` conditions.

use std::fmt;

use rustc_hash::FxHashMap;

/// A boolean condition attached to a top-level item with `@if(...)`.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub enum Condition {
    Literal(bool),
    Name(String),
    Not(Box<Condition>),
    And(Box<Condition>, Box<Condition>),
    Or(Box<Condition>, Box<Condition>),
}

impl Condition {
    /// Evaluate against a set of named flags. Unknown names are false.
    pub fn evaluate(&self, conditions: &Conditions) -> bool {
        match self {
            Condition::Literal(value) => *value,
            Condition::Name(name) => conditions.get(name),
            Condition::Not(inner) => !inner.evaluate(conditions),
            Condition::And(lhs, rhs) => lhs.evaluate(conditions) && rhs.evaluate(conditions),
            Condition::Or(lhs, rhs) => lhs.evaluate(conditions) || rhs.evaluate(conditions),
        }
    }

    /// `true` when `condition` is absent or evaluates to true.
    pub fn is_active(condition: Option<&Condition>, conditions: &Conditions) -> bool {
        condition.is_none_or(|c| c.evaluate(conditions))
    }
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Condition::Literal(value) => write!(f, "{value}"),
            Condition::Name(name) => f.write_str(name),
            Condition::Not(inner) => write!(f, "!{inner}"),
            Condition::And(lhs, rhs) => write!(f, "({lhs} && {rhs})"),
            Condition::Or(lhs, rhs) => write!(f, "({lhs} || {rhs})"),
        }
    }
}

/// Named condition flags supplied to a link.
#[derive(Clone, Eq, PartialEq, Debug, Default)]
pub struct Conditions {
    values: FxHashMap<String, bool>,
}

impl Conditions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder: set a flag.
    #[must_use]
    pub fn with(mut self, name: impl Into<String>, value: bool) -> Self {
        self.set(name, value);
        self
    }

    pub fn set(&mut self, name: impl Into<String>, value: bool) {
        self.values.insert(name.into(), value);
    }

    /// Value of a flag; unknown flags are false.
    pub fn get(&self, name: &str) -> bool {
        self.values.get(name).copied().unwrap_or(false)
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl<S: Into<String>> FromIterator<(S, bool)> for Conditions {
    fn from_iter<I: IntoIterator<Item = (S, bool)>>(iter: I) -> Self {
        let mut conditions = Conditions::new();
        for (name, value) in iter {
            conditions.set(name, value);
        }
        conditions
    }
}

#[cfg(test)]
mod tests;
