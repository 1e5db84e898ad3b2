//! Identity text of a serializable value.
//!
//! Two values of the same type get the same fingerprint exactly when they are
//! structurally equal, with floats compared by identity: every NaN is the same
//! value, `0.0` and `-0.0` differ, and so do the two infinities. Map entries
//! are sorted, so maps with a random iteration order still compare equal.

use std::fmt::Display;

use serde::{Serialize, ser};

#[derive(Debug, thiserror::Error)]
#[error("{0}")]
pub struct FingerprintError(String);

impl ser::Error for FingerprintError {
    fn custom<T: Display>(msg: T) -> Self {
        FingerprintError(msg.to_string())
    }
}

pub fn fingerprint<T: Serialize + ?Sized>(value: &T) -> Result<String, FingerprintError> {
    value.serialize(Fingerprint)
}

struct Fingerprint;

macro_rules! plain {
    ($($method:ident: $ty:ty),* $(,)?) => {
        $(
            fn $method(self, v: $ty) -> Result<String, FingerprintError> {
                Ok(v.to_string())
            }
        )*
    };
}

impl ser::Serializer for Fingerprint {
    type Ok = String;
    type Error = FingerprintError;
    type SerializeSeq = Compound;
    type SerializeTuple = Compound;
    type SerializeTupleStruct = Compound;
    type SerializeTupleVariant = Compound;
    type SerializeMap = MapCompound;
    type SerializeStruct = Compound;
    type SerializeStructVariant = Compound;

    plain! {
        serialize_bool: bool,
        serialize_i8: i8,
        serialize_i16: i16,
        serialize_i32: i32,
        serialize_i64: i64,
        serialize_i128: i128,
        serialize_u8: u8,
        serialize_u16: u16,
        serialize_u32: u32,
        serialize_u64: u64,
        serialize_u128: u128,
    }

    fn serialize_f32(self, v: f32) -> Result<String, FingerprintError> {
        Ok(match v.is_nan() {
            true => "NaN".to_string(),
            false => format!("f32:{:08x}", v.to_bits()),
        })
    }

    fn serialize_f64(self, v: f64) -> Result<String, FingerprintError> {
        Ok(match v.is_nan() {
            true => "NaN".to_string(),
            false => format!("f64:{:016x}", v.to_bits()),
        })
    }

    fn serialize_char(self, v: char) -> Result<String, FingerprintError> {
        Ok(format!("{v:?}"))
    }

    fn serialize_str(self, v: &str) -> Result<String, FingerprintError> {
        Ok(format!("{v:?}"))
    }

    fn serialize_bytes(self, v: &[u8]) -> Result<String, FingerprintError> {
        Ok(format!("b{v:?}"))
    }

    fn serialize_none(self) -> Result<String, FingerprintError> {
        Ok("None".to_string())
    }

    fn serialize_some<T: Serialize + ?Sized>(self, value: &T) -> Result<String, FingerprintError> {
        Ok(format!("Some({})", value.serialize(Fingerprint)?))
    }

    fn serialize_unit(self) -> Result<String, FingerprintError> {
        Ok("()".to_string())
    }

    fn serialize_unit_struct(self, name: &'static str) -> Result<String, FingerprintError> {
        Ok(name.to_string())
    }

    fn serialize_unit_variant(
        self,
        name: &'static str,
        _: u32,
        variant: &'static str,
    ) -> Result<String, FingerprintError> {
        Ok(format!("{name}::{variant}"))
    }

    fn serialize_newtype_struct<T: Serialize + ?Sized>(
        self,
        name: &'static str,
        value: &T,
    ) -> Result<String, FingerprintError> {
        Ok(format!("{name}({})", value.serialize(Fingerprint)?))
    }

    fn serialize_newtype_variant<T: Serialize + ?Sized>(
        self,
        name: &'static str,
        _: u32,
        variant: &'static str,
        value: &T,
    ) -> Result<String, FingerprintError> {
        Ok(format!("{name}::{variant}({})", value.serialize(Fingerprint)?))
    }

    fn serialize_seq(self, _: Option<usize>) -> Result<Compound, FingerprintError> {
        Ok(Compound::new("[", "]"))
    }

    fn serialize_tuple(self, _: usize) -> Result<Compound, FingerprintError> {
        Ok(Compound::new("(", ")"))
    }

    fn serialize_tuple_struct(
        self,
        name: &'static str,
        _: usize,
    ) -> Result<Compound, FingerprintError> {
        Ok(Compound::new(format!("{name}("), ")"))
    }

    fn serialize_tuple_variant(
        self,
        name: &'static str,
        _: u32,
        variant: &'static str,
        _: usize,
    ) -> Result<Compound, FingerprintError> {
        Ok(Compound::new(format!("{name}::{variant}("), ")"))
    }

    fn serialize_map(self, _: Option<usize>) -> Result<MapCompound, FingerprintError> {
        Ok(MapCompound::default())
    }

    fn serialize_struct(self, name: &'static str, _: usize) -> Result<Compound, FingerprintError> {
        Ok(Compound::new(format!("{name}{{"), "}"))
    }

    fn serialize_struct_variant(
        self,
        name: &'static str,
        _: u32,
        variant: &'static str,
        _: usize,
    ) -> Result<Compound, FingerprintError> {
        Ok(Compound::new(format!("{name}::{variant}{{"), "}"))
    }
}

struct Compound {
    open: String,
    close: &'static str,
    parts: Vec<String>,
}

impl Compound {
    fn new(open: impl Into<String>, close: &'static str) -> Self {
        Self {
            open: open.into(),
            close,
            parts: Vec::new(),
        }
    }

    fn push<T: Serialize + ?Sized>(&mut self, value: &T) -> Result<(), FingerprintError> {
        self.parts.push(value.serialize(Fingerprint)?);
        Ok(())
    }

    fn push_field<T: Serialize + ?Sized>(
        &mut self,
        key: &'static str,
        value: &T,
    ) -> Result<(), FingerprintError> {
        self.parts
            .push(format!("{key}:{}", value.serialize(Fingerprint)?));
        Ok(())
    }

    fn finish(self) -> String {
        format!("{}{}{}", self.open, self.parts.join(","), self.close)
    }
}

impl ser::SerializeSeq for Compound {
    type Ok = String;
    type Error = FingerprintError;

    fn serialize_element<T: Serialize + ?Sized>(&mut self, value: &T) -> Result<(), Self::Error> {
        self.push(value)
    }

    fn end(self) -> Result<String, Self::Error> {
        Ok(self.finish())
    }
}

impl ser::SerializeTuple for Compound {
    type Ok = String;
    type Error = FingerprintError;

    fn serialize_element<T: Serialize + ?Sized>(&mut self, value: &T) -> Result<(), Self::Error> {
        self.push(value)
    }

    fn end(self) -> Result<String, Self::Error> {
        Ok(self.finish())
    }
}

impl ser::SerializeTupleStruct for Compound {
    type Ok = String;
    type Error = FingerprintError;

    fn serialize_field<T: Serialize + ?Sized>(&mut self, value: &T) -> Result<(), Self::Error> {
        self.push(value)
    }

    fn end(self) -> Result<String, Self::Error> {
        Ok(self.finish())
    }
}

impl ser::SerializeTupleVariant for Compound {
    type Ok = String;
    type Error = FingerprintError;

    fn serialize_field<T: Serialize + ?Sized>(&mut self, value: &T) -> Result<(), Self::Error> {
        self.push(value)
    }

    fn end(self) -> Result<String, Self::Error> {
        Ok(self.finish())
    }
}

impl ser::SerializeStruct for Compound {
    type Ok = String;
    type Error = FingerprintError;

    fn serialize_field<T: Serialize + ?Sized>(
        &mut self,
        key: &'static str,
        value: &T,
    ) -> Result<(), Self::Error> {
        self.push_field(key, value)
    }

    fn end(self) -> Result<String, Self::Error> {
        Ok(self.finish())
    }
}

impl ser::SerializeStructVariant for Compound {
    type Ok = String;
    type Error = FingerprintError;

    fn serialize_field<T: Serialize + ?Sized>(
        &mut self,
        key: &'static str,
        value: &T,
    ) -> Result<(), Self::Error> {
        self.push_field(key, value)
    }

    fn end(self) -> Result<String, Self::Error> {
        Ok(self.finish())
    }
}

#[derive(Default)]
struct MapCompound {
    key: Option<String>,
    entries: Vec<String>,
}

impl ser::SerializeMap for MapCompound {
    type Ok = String;
    type Error = FingerprintError;

    fn serialize_key<T: Serialize + ?Sized>(&mut self, key: &T) -> Result<(), Self::Error> {
        self.key = Some(key.serialize(Fingerprint)?);
        Ok(())
    }

    fn serialize_value<T: Serialize + ?Sized>(&mut self, value: &T) -> Result<(), Self::Error> {
        let key = self
            .key
            .take()
            .ok_or_else(|| FingerprintError("map value without a key".to_string()))?;
        self.entries
            .push(format!("{key}:{}", value.serialize(Fingerprint)?));
        Ok(())
    }

    fn end(mut self) -> Result<String, Self::Error> {
        self.entries.sort();
        Ok(format!("{{{}}}", self.entries.join(",")))
    }
}
