//! Rejects non-finite floats before a value reaches `serde_json`.
//!
//! `serde_json::to_value` turns NaN and infinities into `null`, and null
//! members are pruned from canonical bytes, so such a field would hash the
//! same as an absent one. [`check`] walks the serde data model first and
//! reports the JSON path of the offending number.

use serde::ser::{self, Serialize};
use std::fmt;

/// Failure while walking a value.
#[derive(thiserror::Error, Debug)]
pub(crate) enum FiniteError {
    /// Non-finite number at the given path.
    #[error("non-finite number detected at {0}")]
    NonFinite(String),
    /// Error raised by the value's own `Serialize` impl.
    #[error("{0}")]
    Custom(String),
}

impl ser::Error for FiniteError {
    fn custom<T: fmt::Display>(msg: T) -> Self {
        Self::Custom(msg.to_string())
    }
}

/// Helper for building JSON paths during validation.
#[derive(Debug, Clone)]
struct Path {
    segments: Vec<String>,
}

impl Path {
    fn root() -> Self {
        Self {
            segments: Vec::new(),
        }
    }

    fn push_field(&self, field: &str) -> Self {
        let mut segments = self.segments.clone();
        segments.push(field.to_string());
        Self { segments }
    }

    fn push_index(&self, index: usize) -> Self {
        let mut segments = self.segments.clone();
        segments.push(format!("[{}]", index));
        Self { segments }
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.segments.is_empty() {
            write!(f, "root")
        } else {
            write!(f, "{}", self.segments.join("."))
        }
    }
}

/// Walks `value` and fails on the first NaN or infinity.
pub(crate) fn check<T: Serialize + ?Sized>(value: &T) -> Result<(), FiniteError> {
    value.serialize(Walker { path: Path::root() })
}

struct Walker {
    path: Path,
}

impl Walker {
    fn float(self, f: f64) -> Result<(), FiniteError> {
        if f.is_finite() {
            Ok(())
        } else {
            Err(FiniteError::NonFinite(self.path.to_string()))
        }
    }

    fn compound(self) -> Compound {
        Compound {
            path: self.path,
            index: 0,
            key: None,
        }
    }
}

struct Compound {
    path: Path,
    index: usize,
    key: Option<String>,
}

impl Compound {
    fn element<T: Serialize + ?Sized>(&mut self, value: &T) -> Result<(), FiniteError> {
        let path = self.path.push_index(self.index);
        self.index += 1;
        value.serialize(Walker { path })
    }

    fn field<T: Serialize + ?Sized>(&mut self, key: &str, value: &T) -> Result<(), FiniteError> {
        value.serialize(Walker {
            path: self.path.push_field(key),
        })
    }
}

impl ser::Serializer for Walker {
    type Ok = ();
    type Error = FiniteError;
    type SerializeSeq = Compound;
    type SerializeTuple = Compound;
    type SerializeTupleStruct = Compound;
    type SerializeTupleVariant = Compound;
    type SerializeMap = Compound;
    type SerializeStruct = Compound;
    type SerializeStructVariant = Compound;

    fn serialize_bool(self, _: bool) -> Result<(), FiniteError> {
        Ok(())
    }
    fn serialize_i8(self, _: i8) -> Result<(), FiniteError> {
        Ok(())
    }
    fn serialize_i16(self, _: i16) -> Result<(), FiniteError> {
        Ok(())
    }
    fn serialize_i32(self, _: i32) -> Result<(), FiniteError> {
        Ok(())
    }
    fn serialize_i64(self, _: i64) -> Result<(), FiniteError> {
        Ok(())
    }
    fn serialize_u8(self, _: u8) -> Result<(), FiniteError> {
        Ok(())
    }
    fn serialize_u16(self, _: u16) -> Result<(), FiniteError> {
        Ok(())
    }
    fn serialize_u32(self, _: u32) -> Result<(), FiniteError> {
        Ok(())
    }
    fn serialize_u64(self, _: u64) -> Result<(), FiniteError> {
        Ok(())
    }

    fn serialize_f32(self, v: f32) -> Result<(), FiniteError> {
        self.float(f64::from(v))
    }

    fn serialize_f64(self, v: f64) -> Result<(), FiniteError> {
        self.float(v)
    }

    fn serialize_char(self, _: char) -> Result<(), FiniteError> {
        Ok(())
    }
    fn serialize_str(self, _: &str) -> Result<(), FiniteError> {
        Ok(())
    }
    fn serialize_bytes(self, _: &[u8]) -> Result<(), FiniteError> {
        Ok(())
    }
    fn serialize_none(self) -> Result<(), FiniteError> {
        Ok(())
    }

    fn serialize_some<T: Serialize + ?Sized>(self, value: &T) -> Result<(), FiniteError> {
        value.serialize(self)
    }

    fn serialize_unit(self) -> Result<(), FiniteError> {
        Ok(())
    }
    fn serialize_unit_struct(self, _: &'static str) -> Result<(), FiniteError> {
        Ok(())
    }
    fn serialize_unit_variant(
        self,
        _: &'static str,
        _: u32,
        _: &'static str,
    ) -> Result<(), FiniteError> {
        Ok(())
    }

    fn serialize_newtype_struct<T: Serialize + ?Sized>(
        self,
        _: &'static str,
        value: &T,
    ) -> Result<(), FiniteError> {
        value.serialize(self)
    }

    fn serialize_newtype_variant<T: Serialize + ?Sized>(
        self,
        _: &'static str,
        _: u32,
        variant: &'static str,
        value: &T,
    ) -> Result<(), FiniteError> {
        value.serialize(Walker {
            path: self.path.push_field(variant),
        })
    }

    fn serialize_seq(self, _: Option<usize>) -> Result<Compound, FiniteError> {
        Ok(self.compound())
    }

    fn serialize_tuple(self, _: usize) -> Result<Compound, FiniteError> {
        Ok(self.compound())
    }

    fn serialize_tuple_struct(self, _: &'static str, _: usize) -> Result<Compound, FiniteError> {
        Ok(self.compound())
    }

    fn serialize_tuple_variant(
        self,
        _: &'static str,
        _: u32,
        variant: &'static str,
        _: usize,
    ) -> Result<Compound, FiniteError> {
        let path = self.path.push_field(variant);
        Ok(Walker { path }.compound())
    }

    fn serialize_map(self, _: Option<usize>) -> Result<Compound, FiniteError> {
        Ok(self.compound())
    }

    fn serialize_struct(self, _: &'static str, _: usize) -> Result<Compound, FiniteError> {
        Ok(self.compound())
    }

    fn serialize_struct_variant(
        self,
        _: &'static str,
        _: u32,
        variant: &'static str,
        _: usize,
    ) -> Result<Compound, FiniteError> {
        let path = self.path.push_field(variant);
        Ok(Walker { path }.compound())
    }
}

impl ser::SerializeSeq for Compound {
    type Ok = ();
    type Error = FiniteError;

    fn serialize_element<T: Serialize + ?Sized>(&mut self, value: &T) -> Result<(), FiniteError> {
        self.element(value)
    }

    fn end(self) -> Result<(), FiniteError> {
        Ok(())
    }
}

impl ser::SerializeTuple for Compound {
    type Ok = ();
    type Error = FiniteError;

    fn serialize_element<T: Serialize + ?Sized>(&mut self, value: &T) -> Result<(), FiniteError> {
        self.element(value)
    }

    fn end(self) -> Result<(), FiniteError> {
        Ok(())
    }
}

impl ser::SerializeTupleStruct for Compound {
    type Ok = ();
    type Error = FiniteError;

    fn serialize_field<T: Serialize + ?Sized>(&mut self, value: &T) -> Result<(), FiniteError> {
        self.element(value)
    }

    fn end(self) -> Result<(), FiniteError> {
        Ok(())
    }
}

impl ser::SerializeTupleVariant for Compound {
    type Ok = ();
    type Error = FiniteError;

    fn serialize_field<T: Serialize + ?Sized>(&mut self, value: &T) -> Result<(), FiniteError> {
        self.element(value)
    }

    fn end(self) -> Result<(), FiniteError> {
        Ok(())
    }
}

impl ser::SerializeMap for Compound {
    type Ok = ();
    type Error = FiniteError;

    fn serialize_key<T: Serialize + ?Sized>(&mut self, key: &T) -> Result<(), FiniteError> {
        key.serialize(Walker {
            path: self.path.clone(),
        })?;
        // Keys that are not plain strings fall back to a positional segment.
        self.key = match serde_json::to_value(key) {
            Ok(serde_json::Value::String(name)) => Some(name),
            _ => None,
        };
        Ok(())
    }

    fn serialize_value<T: Serialize + ?Sized>(&mut self, value: &T) -> Result<(), FiniteError> {
        match self.key.take() {
            Some(name) => self.field(&name, value),
            None => self.element(value),
        }
    }

    fn end(self) -> Result<(), FiniteError> {
        Ok(())
    }
}

impl ser::SerializeStruct for Compound {
    type Ok = ();
    type Error = FiniteError;

    fn serialize_field<T: Serialize + ?Sized>(
        &mut self,
        key: &'static str,
        value: &T,
    ) -> Result<(), FiniteError> {
        self.field(key, value)
    }

    fn end(self) -> Result<(), FiniteError> {
        Ok(())
    }
}

impl ser::SerializeStructVariant for Compound {
    type Ok = ();
    type Error = FiniteError;

    fn serialize_field<T: Serialize + ?Sized>(
        &mut self,
        key: &'static str,
        value: &T,
    ) -> Result<(), FiniteError> {
        self.field(key, value)
    }

    fn end(self) -> Result<(), FiniteError> {
        Ok(())
    }
}
