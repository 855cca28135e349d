//! Lua side of the translator: class introspection over mlua values.
//!
//! A guest class is a table whose metatable has `__call`; calling it yields
//! an instance whose metatable is the class. The class carries `__name`,
//! `__base` (its direct parent) and `__annotations` (ordered
//! `{ name, Type }` pairs). Only raw fields are read, nothing is inherited.

use hexscript_sdk::{HostError, HostResult};
use mlua::{Lua, Table, Value};

use crate::prelude;
use crate::translate::ClassReflector;

/// Reflects over guest classes in one Lua state.
pub struct LuaReflector<'lua> {
    marker: Table<'lua>,
}

impl<'lua> LuaReflector<'lua> {
    /// Reflector using the marker pinned in `lua`'s registry.
    pub fn new(lua: &'lua Lua) -> mlua::Result<Self> {
        Ok(Self::with_marker(prelude::marker(lua)?))
    }

    /// Reflector using an explicit marker table.
    pub fn with_marker(marker: Table<'lua>) -> Self {
        Self { marker }
    }

    fn class_of(instance: &Value<'lua>) -> Option<Table<'lua>> {
        match instance {
            Value::Table(t) => t.get_metatable(),
            _ => None,
        }
    }

    fn call(&self, class: &Value<'lua>) -> mlua::Result<Value<'lua>> {
        match class {
            Value::Function(f) => f.call(()),
            Value::Table(t) => {
                let ctor = t
                    .get_metatable()
                    .map(|meta| meta.raw_get::<_, Value>("__call"))
                    .transpose()?;
                match ctor {
                    Some(Value::Function(f)) => f.call(t.clone()),
                    _ => Err(mlua::Error::RuntimeError(
                        "table is not callable".to_string(),
                    )),
                }
            }
            other => Err(mlua::Error::RuntimeError(format!(
                "{} is not a class",
                other.type_name()
            ))),
        }
    }
}

impl<'lua> ClassReflector for LuaReflector<'lua> {
    type Class = Value<'lua>;
    type Instance = Value<'lua>;

    fn instantiate(&self, class: &Value<'lua>) -> HostResult<Value<'lua>> {
        self.call(class)
            .map_err(|e| HostError::Argument(format!("cannot instantiate class: {}", e)))
    }

    fn extends_marker(&self, instance: &Value<'lua>) -> bool {
        let Some(class) = Self::class_of(instance) else {
            return false;
        };
        match class.raw_get::<_, Value>("__base") {
            Ok(Value::Table(base)) => base.to_pointer() == self.marker.to_pointer(),
            _ => false,
        }
    }

    fn type_name(&self, instance: &Value<'lua>) -> HostResult<String> {
        let name = Self::class_of(instance)
            .and_then(|class| class.raw_get::<_, Option<String>>("__name").ok().flatten());
        match name {
            Some(name) if !name.is_empty() => Ok(name),
            _ => Err(HostError::Argument("class has no __name".to_string())),
        }
    }

    fn members(&self, instance: &Value<'lua>) -> HostResult<Vec<(String, Value<'lua>)>> {
        let class = Self::class_of(instance)
            .ok_or_else(|| HostError::Argument("instance has no class".to_string()))?;

        let annotations = match class.raw_get::<_, Value>("__annotations") {
            Ok(Value::Table(t)) => t,
            Ok(Value::Nil) => {
                return Err(HostError::Argument(
                    "class has no member annotations".to_string(),
                ))
            }
            Ok(other) => {
                return Err(HostError::Argument(format!(
                    "__annotations must be a table, got {}",
                    other.type_name()
                )))
            }
            Err(e) => return Err(HostError::Argument(e.to_string())),
        };

        let mut members = Vec::new();
        for (index, entry) in annotations.sequence_values::<Value>().enumerate() {
            let malformed = || {
                HostError::Argument(format!(
                    "annotation #{} must be a {{ name, type }} pair",
                    index + 1
                ))
            };
            let Ok(Value::Table(pair)) = entry else {
                return Err(malformed());
            };
            let name = match pair.raw_get::<_, Value>(1) {
                Ok(Value::String(s)) => s.to_str().map_err(|_| malformed())?.to_string(),
                _ => return Err(malformed()),
            };
            let class = pair.raw_get::<_, Value>(2).map_err(|_| malformed())?;
            members.push((name, class));
        }
        Ok(members)
    }
}
