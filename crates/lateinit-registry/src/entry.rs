//! Registry entries for library types, functions and properties.

use lateinit_core::{IrType, QualifiedName, TypeHash};

/// The hash a type contributes to a function signature.
///
/// Reference types contribute their class hash regardless of nullability;
/// primitives hash their display name.
pub fn type_identity(ty: IrType) -> TypeHash {
    match ty {
        IrType::Primitive(kind) => TypeHash::from_name(kind.name()),
        IrType::Reference { class, .. } => class,
        IrType::Nothing => TypeHash::from_name("Nothing"),
        IrType::Unit => TypeHash::from_name("Unit"),
    }
}

/// A library class.
#[derive(Debug, Clone, PartialEq)]
pub struct TypeEntry {
    pub name: QualifiedName,
    pub type_hash: TypeHash,
}

impl TypeEntry {
    pub fn new(name: impl Into<QualifiedName>) -> Self {
        let name = name.into();
        let type_hash = name.to_type_hash();
        Self { name, type_hash }
    }
}

/// A library function or property accessor.
#[derive(Debug, Clone, PartialEq)]
pub struct FunctionEntry {
    pub name: QualifiedName,
    pub hash: TypeHash,
    pub params: Vec<IrType>,
    pub return_type: IrType,
    /// Receiver class of extension functions and extension accessors.
    pub extension_receiver: Option<TypeHash>,
    /// The property this function is an accessor of.
    pub property: Option<TypeHash>,
}

impl FunctionEntry {
    /// A free function; the hash covers the name and parameter types.
    pub fn new(name: impl Into<QualifiedName>, params: Vec<IrType>, return_type: IrType) -> Self {
        let name = name.into();
        let param_hashes: Vec<TypeHash> = params.iter().map(|&p| type_identity(p)).collect();
        let hash = TypeHash::from_function(&name.to_string(), &param_hashes);
        Self {
            name,
            hash,
            params,
            return_type,
            extension_receiver: None,
            property: None,
        }
    }

    /// The getter of `property`, named `<get-name>` in the property's namespace.
    pub fn getter(property: &PropertyEntry) -> Self {
        let simple = property.name.simple_name();
        Self {
            name: property.name.sibling(format!("<get-{simple}>")),
            hash: TypeHash::getter_of(property.hash),
            params: Vec::new(),
            return_type: property.ty,
            extension_receiver: property.extension_receiver,
            property: Some(property.hash),
        }
    }
}

/// A library property, possibly an extension property.
#[derive(Debug, Clone, PartialEq)]
pub struct PropertyEntry {
    pub name: QualifiedName,
    pub hash: TypeHash,
    pub ty: IrType,
    pub extension_receiver: Option<TypeHash>,
    pub getter: Option<TypeHash>,
}

impl PropertyEntry {
    /// A read-only extension property on `receiver` with a getter.
    pub fn extension(name: impl Into<QualifiedName>, receiver: TypeHash, ty: IrType) -> Self {
        let name = name.into();
        let hash = TypeHash::from_property(&name.to_string(), Some(receiver));
        Self {
            name,
            hash,
            ty,
            extension_receiver: Some(receiver),
            getter: Some(TypeHash::getter_of(hash)),
        }
    }

    /// A property without receiver and without accessors.
    pub fn global(name: impl Into<QualifiedName>, ty: IrType) -> Self {
        let name = name.into();
        let hash = TypeHash::from_property(&name.to_string(), None);
        Self {
            name,
            hash,
            ty,
            extension_receiver: None,
            getter: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lateinit_core::PrimitiveKind;

    #[test]
    fn getter_matches_property() {
        let receiver = TypeHash::from_name("lang::reflect::PropertyRef0");
        let bool_ty = IrType::Primitive(PrimitiveKind::Bool);
        let property = PropertyEntry::extension("lang::isInitialized", receiver, bool_ty);
        let getter = FunctionEntry::getter(&property);

        assert_eq!(property.getter, Some(getter.hash));
        assert_eq!(getter.name.to_string(), "lang::<get-isInitialized>");
        assert_eq!(getter.extension_receiver, Some(receiver));
        assert_eq!(getter.property, Some(property.hash));
        assert_eq!(getter.return_type, bool_ty);
    }

    #[test]
    fn nullability_does_not_change_signature() {
        let a = FunctionEntry::new("f", vec![IrType::string()], IrType::Unit);
        let b = FunctionEntry::new("f", vec![IrType::string().make_nullable()], IrType::Unit);
        assert_eq!(a.hash, b.hash);
    }
}
