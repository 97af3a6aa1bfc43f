//! Reference platform schemas
//!
//! In-process descriptions of the identity types for each model version. Hosts
//! that do not expose their own registry use these; so do the tests.
//!
//! Signatures hold the hex-decoded bytes of their textual form. The key
//! projection fingerprints each signature with BLAKE3 and fails on an empty
//! signature.

use signet_reflect::{Instance, PrimitiveKind, TypeDescriptor, TypeRef, TypeRegistry, Value};

use crate::version::{
    DetailsShape, ModelVersion, KEY_SET_TYPE, PUBLIC_KEY_TYPE, SIGNATURE_TYPE, SIGNING_INFO_TYPE,
};

/// Concrete key type produced by the key projection
pub const KEY_TYPE: &str = "sun.security.x509.X509Key";

const INT: TypeRef = TypeRef::Primitive(PrimitiveKind::Int);

/// Registry describing the identity types of `version`
pub fn reference_registry(version: ModelVersion) -> TypeRegistry {
    let mut registry = TypeRegistry::new()
        .with_type(TypeDescriptor::interface(PUBLIC_KEY_TYPE).build())
        .with_type(key_type())
        .with_type(signature_type());

    if let Some(details) = version.schema().details {
        registry.register(key_set_type());
        registry.register(details_type(details.details_type, details.shape));
        registry.register(signing_info_type(details.details_type));
    }
    registry
}

fn signatures() -> TypeRef {
    TypeRef::array_of(TypeRef::named(SIGNATURE_TYPE))
}

fn key_type() -> TypeDescriptor {
    TypeDescriptor::class(KEY_TYPE)
        .implements(PUBLIC_KEY_TYPE)
        .field("encoded", TypeRef::array_of(TypeRef::Primitive(PrimitiveKind::Byte)))
        .constructor(
            vec![TypeRef::array_of(TypeRef::Primitive(PrimitiveKind::Byte))],
            |args| Ok(Instance::new(KEY_TYPE).with_field("encoded", args[0].clone())),
        )
        .build()
}

fn signature_type() -> TypeDescriptor {
    TypeDescriptor::class(SIGNATURE_TYPE)
        .field("mSignature", TypeRef::array_of(TypeRef::Primitive(PrimitiveKind::Byte)))
        .constructor(
            vec![TypeRef::array_of(TypeRef::Primitive(PrimitiveKind::Byte))],
            |args| match &args[0] {
                Value::Bytes(bytes) => Ok(signature(bytes.clone())),
                _ => Err("signature bytes are null".to_string()),
            },
        )
        .constructor(vec![TypeRef::Str], |args| match args[0].as_str() {
            Some(text) => hex::decode(text)
                .map(signature)
                .map_err(|e| format!("invalid signature text: {}", e)),
            None => Err("signature text is null".to_string()),
        })
        .method("toCharsString", vec![], TypeRef::Str, |this, _| {
            let bytes = signature_bytes(this.as_deref())?;
            Ok(Value::Str(hex::encode(bytes)))
        })
        .method(
            "toByteArray",
            vec![],
            TypeRef::array_of(TypeRef::Primitive(PrimitiveKind::Byte)),
            |this, _| Ok(Value::Bytes(signature_bytes(this.as_deref())?.to_vec())),
        )
        .build()
}

fn signature(bytes: Vec<u8>) -> Instance {
    Instance::new(SIGNATURE_TYPE).with_field("mSignature", Value::Bytes(bytes))
}

fn signature_bytes(signature: Option<&Instance>) -> Result<&[u8], String> {
    signature
        .and_then(|s| s.field("mSignature"))
        .and_then(Value::as_bytes)
        .ok_or_else(|| "signature has no bytes".to_string())
}

fn key_set_type() -> TypeDescriptor {
    TypeDescriptor::class(KEY_SET_TYPE)
        .field("mArray", TypeRef::array_of(TypeRef::Any))
        .constructor(vec![], |_| {
            Ok(Instance::new(KEY_SET_TYPE).with_field(
                "mArray",
                Value::Array(signet_reflect::ArrayValue::new(TypeRef::Any, Vec::new())),
            ))
        })
        .method("size", vec![], INT, |this, _| {
            let size = this
                .as_deref()
                .and_then(|set| set.field("mArray"))
                .and_then(Value::as_array)
                .map_or(0, |array| array.len());
            Ok(Value::Int(size as i32))
        })
        .build()
}

/// BLAKE3 fingerprint keys for every signature in the array
fn to_signing_keys(args: &[Value]) -> Result<Value, String> {
    let array = args[0]
        .as_array()
        .ok_or_else(|| "signatures are null".to_string())?;
    if array.is_empty() {
        return Err("no signatures to project".to_string());
    }

    let mut keys = Vec::with_capacity(array.len());
    for element in array.elements() {
        let bytes = signature_bytes(element.as_instance())?;
        if bytes.is_empty() {
            return Err("empty signature".to_string());
        }
        let fingerprint = blake3::hash(bytes);
        keys.push(Value::Object(
            Instance::new(KEY_TYPE)
                .with_field("encoded", Value::Bytes(fingerprint.as_bytes().to_vec())),
        ));
    }

    let set = Instance::new(KEY_SET_TYPE).with_field(
        "mArray",
        Value::Array(signet_reflect::ArrayValue::new(
            TypeRef::named(PUBLIC_KEY_TYPE),
            keys,
        )),
    );
    Ok(Value::Object(set))
}

fn details_type(name: &'static str, shape: DetailsShape) -> TypeDescriptor {
    let builder = TypeDescriptor::class(name)
        .field("signatures", signatures())
        .field("signatureSchemeVersion", INT)
        .field("publicKeys", TypeRef::named(KEY_SET_TYPE))
        .field("pastSigningCertificates", signatures())
        .field("pastSigningCertificatesFlags", TypeRef::array_of(INT))
        // the short form comes first so that callers must rely on arity
        .constructor(vec![signatures(), INT], move |args| {
            Ok(Instance::new(name)
                .with_field("signatures", args[0].clone())
                .with_field("signatureSchemeVersion", args[1].clone()))
        })
        .constructor(vec![TypeRef::named(name)], move |args| {
            args[0]
                .as_instance()
                .cloned()
                .ok_or_else(|| "source details are null".to_string())
        });

    let mut full = vec![signatures(), INT, TypeRef::named(KEY_SET_TYPE), signatures()];
    if shape == DetailsShape::WithPastCertificateFlags {
        full.push(TypeRef::array_of(INT));
    }
    builder
        .constructor(full, move |args| {
            let mut details = Instance::new(name)
                .with_field("signatures", args[0].clone())
                .with_field("signatureSchemeVersion", args[1].clone())
                .with_field("publicKeys", args[2].clone())
                .with_field("pastSigningCertificates", args[3].clone());
            if let Some(flags) = args.get(4) {
                details.insert_field("pastSigningCertificatesFlags", flags.clone());
            }
            Ok(details)
        })
        .static_method(
            "toSigningKeys",
            vec![signatures()],
            TypeRef::named(KEY_SET_TYPE),
            to_signing_keys,
        )
        .method("getSignatures", vec![], signatures(), |this, _| {
            Ok(this
                .and_then(|details| details.field("signatures").cloned())
                .unwrap_or_default())
        })
        .build()
}

fn signing_info_type(details: &'static str) -> TypeDescriptor {
    TypeDescriptor::class(SIGNING_INFO_TYPE)
        .field("mSigningDetails", TypeRef::named(details))
        .constructor(vec![], |_| Ok(Instance::new(SIGNING_INFO_TYPE)))
        .constructor(vec![TypeRef::named(details)], |args| {
            Ok(Instance::new(SIGNING_INFO_TYPE).with_field("mSigningDetails", args[0].clone()))
        })
        .method("getApkContentsSigners", vec![], signatures(), |this, _| {
            Ok(this
                .and_then(|info| info.field("mSigningDetails"))
                .and_then(Value::as_instance)
                .and_then(|details| details.field("signatures").cloned())
                .unwrap_or_default())
        })
        .method(
            "hasMultipleSigners",
            vec![],
            TypeRef::Primitive(PrimitiveKind::Boolean),
            |this, _| {
                let count = this
                    .and_then(|info| info.field("mSigningDetails"))
                    .and_then(Value::as_instance)
                    .and_then(|details| details.field("signatures"))
                    .and_then(Value::as_array)
                    .map_or(0, |array| array.len());
                Ok(Value::Bool(count > 1))
            },
        )
        .build()
}
