use std::collections::HashMap;

use crate::{
    error::{Error, Result},
    value::Value,
};

/// All variable state for one program run: one mapping per scalar kind,
/// keyed by identifier text including its sigil. A name lives in exactly one
/// mapping at a time; the most recent declaration decides which.
#[derive(Debug, Default)]
pub(crate) struct Environment {
    ints: HashMap<String, i64>,
    bools: HashMap<String, bool>,
}

impl Environment {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Freshly declared integers hold `i64::MIN`, the "uninitialized"
    /// sentinel. Re-declaring a boolean name as an integer moves it.
    pub(crate) fn declare_int(&mut self, name: &str) {
        self.bools.remove(name);
        self.ints.insert(name.to_string(), i64::MIN);
    }

    pub(crate) fn declare_bool(&mut self, name: &str) {
        self.ints.remove(name);
        self.bools.insert(name.to_string(), false);
    }

    /// Assigning to an undeclared name creates it; assigning across kinds is
    /// refused, which is what keeps a name out of both mappings at once.
    pub(crate) fn set_int(&mut self, name: &str, value: i64) -> Result<()> {
        if self.bools.contains_key(name) {
            return Err(Error::type_mismatch(name, format!("{} holds a boolean, not an integer.", name)));
        }
        self.ints.insert(name.to_string(), value);
        Ok(())
    }

    pub(crate) fn set_bool(&mut self, name: &str, value: bool) -> Result<()> {
        if self.ints.contains_key(name) {
            return Err(Error::type_mismatch(name, format!("{} holds an integer, not a boolean.", name)));
        }
        self.bools.insert(name.to_string(), value);
        Ok(())
    }

    pub(crate) fn int(&self, name: &str) -> Result<i64> {
        match self.ints.get(name) {
            Some(&n) => Ok(n),
            None if self.bools.contains_key(name) => {
                Err(Error::type_mismatch(name, format!("{} holds a boolean, not an integer.", name)))
            }
            None => Err(Error::undefined_variable(name)),
        }
    }

    /// Lookup for `print` and conditionals: integers first, then booleans.
    /// A name in neither mapping is an error, never a defaulted entry.
    pub(crate) fn value(&self, name: &str) -> Result<Value> {
        if let Some(&n) = self.ints.get(name) {
            Ok(Value::Int(n))
        } else if let Some(&b) = self.bools.get(name) {
            Ok(Value::Bool(b))
        } else {
            Err(Error::undefined_variable(name))
        }
    }
}
