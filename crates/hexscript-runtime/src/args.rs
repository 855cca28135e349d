//! Argument parsing for host calls
//!
//! Host functions receive the raw Lua argument list and pull typed values
//! out of it here, so every malformed call surfaces as an `ArgumentError`
//! naming the operation and parameter instead of a bare conversion error.

use hexscript_sdk::{HostError, HostResult};
use mlua::{MultiValue, Value};

/// 2^64 as a float, the first value that no longer fits a u64
const U64_LIMIT: f64 = 18_446_744_073_709_551_616.0;

/// Positional arguments of one host call.
pub struct Args<'lua> {
    op: &'static str,
    values: Vec<Value<'lua>>,
}

impl<'lua> Args<'lua> {
    /// Capture the arguments passed to `op`.
    pub fn new(op: &'static str, values: MultiValue<'lua>) -> Self {
        Self {
            op,
            values: values.into_iter().collect(),
        }
    }

    /// Argument at `index`, with `nil` treated as absent.
    fn get(&self, index: usize) -> Option<&Value<'lua>> {
        match self.values.get(index) {
            None | Some(Value::Nil) => None,
            Some(value) => Some(value),
        }
    }

    fn mismatch(&self, param: &str, expected: &str, got: &Value<'lua>) -> HostError {
        HostError::argument(
            self.op,
            format!("{} must be {}, got {}", param, expected, got.type_name()),
        )
    }

    /// Required unsigned 64-bit integer.
    ///
    /// Lua integers are reinterpreted bitwise, so `0xFFFFFFFFFFFFFFFF`
    /// (which Lua reads as -1) is `u64::MAX`. Floats are accepted when they
    /// are integral and in range.
    pub fn u64(&self, index: usize, param: &str) -> HostResult<u64> {
        match self.get(index) {
            None => Err(HostError::argument(self.op, format!("missing {}", param))),
            Some(Value::Integer(i)) => Ok(*i as u64),
            Some(Value::Number(n)) if n.fract() == 0.0 && *n >= 0.0 && *n < U64_LIMIT => {
                Ok(*n as u64)
            }
            Some(other) => Err(self.mismatch(param, "an unsigned integer", other)),
        }
    }

    /// Optional byte string.
    pub fn bytes(&self, index: usize, param: &str) -> HostResult<Option<Vec<u8>>> {
        match self.get(index) {
            None => Ok(None),
            Some(Value::String(s)) => Ok(Some(s.as_bytes().to_vec())),
            Some(other) => Err(self.mismatch(param, "a byte string", other)),
        }
    }

    /// Optional UTF-8 text.
    pub fn text(&self, index: usize, param: &str) -> HostResult<Option<String>> {
        match self.get(index) {
            None => Ok(None),
            Some(Value::String(s)) => s
                .to_str()
                .map(|s| Some(s.to_string()))
                .map_err(|_| HostError::argument(self.op, format!("{} is not valid UTF-8", param))),
            Some(other) => Err(self.mismatch(param, "a string", other)),
        }
    }

    /// Required value of any type.
    pub fn value(&self, index: usize, param: &str) -> HostResult<Value<'lua>> {
        self.get(index)
            .cloned()
            .ok_or_else(|| HostError::argument(self.op, format!("missing {}", param)))
    }
}
