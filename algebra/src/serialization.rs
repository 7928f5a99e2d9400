use crate::prelude::*;

/// Helper trait to serialize objects that implement from/to bytes
pub trait QuillFromToBytes: Sized {
    /// Convert to bytes.
    fn quill_to_bytes(&self) -> Vec<u8>;
    /// Reconstruct from bytes.
    fn quill_from_bytes(bytes: &[u8]) -> Result<Self>;
}

/// Serde helpers: URL-safe base64 strings for human-readable formats, raw bytes otherwise.
pub mod obj_serde {
    use crate::prelude::*;
    use serde::de::SeqAccess;
    use serde::de::Visitor;
    use serde::Deserializer;
    use serde::Serializer;

    /// A visitor accepting bytes, sequences of bytes and base64 strings.
    pub struct BytesVisitor;

    impl<'de> Visitor<'de> for BytesVisitor {
        type Value = Vec<u8>;

        fn expecting(&self, formatter: &mut ::core::fmt::Formatter) -> core::fmt::Result {
            formatter.write_str("a valid QuillFromTo Object")
        }

        fn visit_seq<V>(self, mut seq: V) -> core::result::Result<Vec<u8>, V::Error>
        where
            V: SeqAccess<'de>,
        {
            let mut vec: Vec<u8> = vec![];
            while let Some(x) = seq.next_element()? {
                vec.push(x);
            }
            Ok(vec)
        }

        fn visit_bytes<E>(self, v: &[u8]) -> core::result::Result<Vec<u8>, E> {
            Ok(v.to_vec())
        }

        fn visit_str<E>(self, v: &str) -> core::result::Result<Vec<u8>, E>
        where
            E: serde::de::Error,
        {
            b64dec(v).map_err(serde::de::Error::custom)
        }
    }

    /// Serialize through [`QuillFromToBytes`].
    pub fn serialize<S, T>(obj: &T, serializer: S) -> core::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
        T: QuillFromToBytes,
    {
        let bytes = obj.quill_to_bytes();
        if serializer.is_human_readable() {
            serializer.serialize_str(&b64enc(&bytes))
        } else {
            serializer.serialize_bytes(&bytes[..])
        }
    }

    /// Deserialize through [`QuillFromToBytes`].
    pub fn deserialize<'de, D, T>(deserializer: D) -> core::result::Result<T, D::Error>
    where
        D: Deserializer<'de>,
        T: QuillFromToBytes,
    {
        let bytes = if deserializer.is_human_readable() {
            deserializer.deserialize_str(BytesVisitor)?
        } else {
            deserializer.deserialize_bytes(BytesVisitor)?
        };
        T::quill_from_bytes(bytes.as_slice()).map_err(serde::de::Error::custom)
    }
}

/// Implement `serde::Serialize` and `serde::Deserialize` through [`QuillFromToBytes`].
#[macro_export]
macro_rules! serialize_deserialize {
    ($t:ident) => {
        impl serde::Serialize for $t {
            fn serialize<S>(&self, serializer: S) -> core::result::Result<S::Ok, S::Error>
            where
                S: serde::Serializer,
            {
                $crate::serialization::obj_serde::serialize(self, serializer)
            }
        }

        impl<'de> serde::Deserialize<'de> for $t {
            fn deserialize<D>(deserializer: D) -> core::result::Result<Self, D::Error>
            where
                D: serde::Deserializer<'de>,
            {
                $crate::serialization::obj_serde::deserialize(deserializer)
            }
        }
    };
}

macro_rules! to_from_bytes_scalar {
    ($t:ident) => {
        impl QuillFromToBytes for $t {
            fn quill_to_bytes(&self) -> Vec<u8> {
                self.to_bytes()
            }
            fn quill_from_bytes(bytes: &[u8]) -> Result<$t> {
                $t::from_bytes(bytes)
            }
        }
        serialize_deserialize!($t);
    };
}

macro_rules! to_from_bytes_group {
    ($g:ident) => {
        impl QuillFromToBytes for $g {
            fn quill_to_bytes(&self) -> Vec<u8> {
                self.to_compressed_bytes()
            }
            fn quill_from_bytes(bytes: &[u8]) -> Result<$g> {
                $g::from_compressed_bytes(bytes)
            }
        }
        serialize_deserialize!($g);
    };
}

mod impls {
    use super::QuillFromToBytes;
    use crate::bn254::{BN254Fq, BN254Gt, BN254Scalar, BN254G1, BN254G2};
    use crate::ed_on_bn254::{BabyJubjubPoint, BabyJubjubScalar};
    use crate::prelude::*;

    to_from_bytes_scalar!(BN254Scalar);
    to_from_bytes_scalar!(BN254Fq);
    to_from_bytes_scalar!(BabyJubjubScalar);

    to_from_bytes_group!(BN254G1);
    to_from_bytes_group!(BN254G2);
    to_from_bytes_group!(BN254Gt);
    to_from_bytes_group!(BabyJubjubPoint);
}

#[cfg(test)]
mod test {
    use crate::bn254::{BN254Scalar, BN254G1, BN254G2};
    use crate::prelude::*;

    #[test]
    fn scalar_json_round_trip() {
        let mut prng = test_rng();
        let s = BN254Scalar::random(&mut prng);
        let json = serde_json::to_string(&s).unwrap();
        // base64 inside a JSON string
        assert!(json.starts_with('"'));
        let back: BN254Scalar = serde_json::from_str(&json).unwrap();
        assert_eq!(s, back);
    }

    #[test]
    fn points_json_round_trip() {
        let mut prng = test_rng();
        let p = BN254G1::random(&mut prng);
        let json = serde_json::to_string(&p).unwrap();
        let back: BN254G1 = serde_json::from_str(&json).unwrap();
        assert_eq!(p, back);

        let q = BN254G2::random(&mut prng);
        let json = serde_json::to_string(&q).unwrap();
        let back: BN254G2 = serde_json::from_str(&json).unwrap();
        assert_eq!(q, back);
    }

    #[test]
    fn corrupted_json_is_rejected() {
        let s = BN254Scalar::from(7u32);
        let mut json = serde_json::to_string(&s).unwrap();
        json.insert(2, '%');
        assert!(serde_json::from_str::<BN254Scalar>(&json).is_err());
    }
}
