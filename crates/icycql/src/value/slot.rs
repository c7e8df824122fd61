use crate::value::Value;
use thiserror::Error as ThisError;

///
/// ValueSlot
///
/// Object-safe accessor over one concrete leaf field. Read mapping walks a
/// column's position path to a `&mut dyn ValueSlot` and stores the decoded
/// value in place; write mapping only calls `load`.
///
/// Implementations are strict about shape: a stored `Value` of the wrong
/// variant is rejected rather than coerced.
///

pub trait ValueSlot {
    /// Current value of the underlying field.
    fn load(&self) -> Value;

    /// Replace the underlying field with `value`.
    fn store(&mut self, value: Value) -> Result<(), SlotError>;
}

///
/// SlotError
///
/// Structured rejection detail from `ValueSlot::store`.
///

#[derive(Clone, Debug, PartialEq, Eq, ThisError)]
pub enum SlotError {
    #[error("expected {expected} value, found {found}")]
    TypeMismatch {
        expected: &'static str,
        found: &'static str,
    },

    #[error("integer value {value} out of range for {target}")]
    OutOfRange { value: i64, target: &'static str },
}

// Integer slots widen to Int on load and range-check on store.
macro_rules! int_slots {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl ValueSlot for $ty {
                fn load(&self) -> Value {
                    Value::Int(i64::from(*self))
                }

                fn store(&mut self, value: Value) -> Result<(), SlotError> {
                    match value {
                        Value::Int(n) => {
                            *self = <$ty>::try_from(n).map_err(|_| SlotError::OutOfRange {
                                value: n,
                                target: stringify!($ty),
                            })?;
                            Ok(())
                        }
                        other => Err(SlotError::TypeMismatch {
                            expected: "int",
                            found: other.tag(),
                        }),
                    }
                }
            }
        )+
    };
}

int_slots!(i8, i16, i32, i64, u8, u16, u32);

impl ValueSlot for bool {
    fn load(&self) -> Value {
        Value::Bool(*self)
    }

    fn store(&mut self, value: Value) -> Result<(), SlotError> {
        match value {
            Value::Bool(b) => {
                *self = b;
                Ok(())
            }
            other => Err(SlotError::TypeMismatch {
                expected: "bool",
                found: other.tag(),
            }),
        }
    }
}

impl ValueSlot for f64 {
    fn load(&self) -> Value {
        Value::Float(*self)
    }

    fn store(&mut self, value: Value) -> Result<(), SlotError> {
        match value {
            Value::Float(f) => {
                *self = f;
                Ok(())
            }
            other => Err(SlotError::TypeMismatch {
                expected: "float",
                found: other.tag(),
            }),
        }
    }
}

impl ValueSlot for f32 {
    fn load(&self) -> Value {
        Value::Float(f64::from(*self))
    }

    fn store(&mut self, value: Value) -> Result<(), SlotError> {
        match value {
            // Narrowing is accepted here; wire floats are f64 and the field
            // declares its own precision.
            #[allow(clippy::cast_possible_truncation)]
            Value::Float(f) => {
                *self = f as f32;
                Ok(())
            }
            other => Err(SlotError::TypeMismatch {
                expected: "float",
                found: other.tag(),
            }),
        }
    }
}

impl ValueSlot for String {
    fn load(&self) -> Value {
        Value::Text(self.clone())
    }

    fn store(&mut self, value: Value) -> Result<(), SlotError> {
        match value {
            Value::Text(s) => {
                *self = s;
                Ok(())
            }
            other => Err(SlotError::TypeMismatch {
                expected: "text",
                found: other.tag(),
            }),
        }
    }
}

impl ValueSlot for Vec<u8> {
    fn load(&self) -> Value {
        Value::Blob(self.clone())
    }

    fn store(&mut self, value: Value) -> Result<(), SlotError> {
        match value {
            Value::Blob(b) => {
                *self = b;
                Ok(())
            }
            other => Err(SlotError::TypeMismatch {
                expected: "blob",
                found: other.tag(),
            }),
        }
    }
}

// Null clears an optional field; any other value stores through to the inner
// slot, defaulting it first.
impl<T: ValueSlot + Default> ValueSlot for Option<T> {
    fn load(&self) -> Value {
        self.as_ref().map_or(Value::Null, ValueSlot::load)
    }

    fn store(&mut self, value: Value) -> Result<(), SlotError> {
        if value.is_null() {
            *self = None;
            return Ok(());
        }

        let mut inner = T::default();
        inner.store(value)?;
        *self = Some(inner);
        Ok(())
    }
}
