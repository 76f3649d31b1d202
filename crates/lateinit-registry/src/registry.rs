//! SymbolRegistry - library types, functions and properties.
//!
//! Entries are stored by [`QualifiedName`], the key passes use to resolve
//! well-known symbols. Functions and properties are grouped by name because
//! a name may have several overloads. A reverse index maps each hash back to
//! its name so IR nodes that carry only a [`TypeHash`] can be looked up.
//!
//! The registry is populated once and then only read. Lowering and
//! evaluation borrow it immutably.

use rustc_hash::FxHashMap;

use lateinit_core::{QualifiedName, RegistrationError, TypeHash};
use lateinit_ir::LibraryNames;

use crate::{FunctionEntry, PropertyEntry, TypeEntry};

#[derive(Debug, Default)]
pub struct SymbolRegistry {
    types: FxHashMap<QualifiedName, TypeEntry>,
    type_hash_to_name: FxHashMap<TypeHash, QualifiedName>,

    functions: FxHashMap<QualifiedName, Vec<FunctionEntry>>,
    func_hash_to_name: FxHashMap<TypeHash, QualifiedName>,

    properties: FxHashMap<QualifiedName, Vec<PropertyEntry>>,
    property_hash_to_name: FxHashMap<TypeHash, QualifiedName>,
}

impl SymbolRegistry {
    /// Create a new empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    // ==========================================================================
    // Lookup
    // ==========================================================================

    /// Get a type by qualified name.
    pub fn type_entry(&self, name: &QualifiedName) -> Option<&TypeEntry> {
        self.types.get(name)
    }

    /// Get a type by hash.
    pub fn type_by_hash(&self, hash: TypeHash) -> Option<&TypeEntry> {
        self.type_hash_to_name
            .get(&hash)
            .and_then(|name| self.types.get(name))
    }

    /// All overloads of a function name, in registration order.
    pub fn functions_named(&self, name: &QualifiedName) -> &[FunctionEntry] {
        self.functions.get(name).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Get a function or accessor by hash.
    pub fn function(&self, hash: TypeHash) -> Option<&FunctionEntry> {
        let name = self.func_hash_to_name.get(&hash)?;
        self.functions_named(name).iter().find(|f| f.hash == hash)
    }

    /// All properties contributed under `name`, one per receiver.
    pub fn contributed_properties(&self, name: &QualifiedName) -> &[PropertyEntry] {
        self.properties.get(name).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Get a property by hash.
    pub fn property(&self, hash: TypeHash) -> Option<&PropertyEntry> {
        let name = self.property_hash_to_name.get(&hash)?;
        self.contributed_properties(name)
            .iter()
            .find(|p| p.hash == hash)
    }

    pub fn type_count(&self) -> usize {
        self.types.len()
    }

    pub fn function_count(&self) -> usize {
        self.func_hash_to_name.len()
    }

    // ==========================================================================
    // Registration
    // ==========================================================================

    /// Register a library type.
    ///
    /// Returns an error if a type with the same name already exists.
    pub fn register_type(&mut self, entry: TypeEntry) -> Result<(), RegistrationError> {
        if self.types.contains_key(&entry.name) {
            return Err(RegistrationError::DuplicateType(entry.name.to_string()));
        }
        self.type_hash_to_name
            .insert(entry.type_hash, entry.name.clone());
        self.types.insert(entry.name.clone(), entry);
        Ok(())
    }

    /// Register a function or accessor.
    ///
    /// Returns an error if a function with the same hash already exists or if
    /// its extension receiver type is unknown.
    pub fn register_function(&mut self, entry: FunctionEntry) -> Result<(), RegistrationError> {
        // hash covers the full signature
        if self.func_hash_to_name.contains_key(&entry.hash) {
            return Err(RegistrationError::DuplicateFunction(entry.name.to_string()));
        }
        self.require_receiver(entry.extension_receiver)?;
        self.func_hash_to_name.insert(entry.hash, entry.name.clone());
        self.functions
            .entry(entry.name.clone())
            .or_default()
            .push(entry);
        Ok(())
    }

    /// Register a property. A property with a getter also registers the
    /// getter function.
    pub fn register_property(&mut self, entry: PropertyEntry) -> Result<(), RegistrationError> {
        if self.property_hash_to_name.contains_key(&entry.hash) {
            return Err(RegistrationError::DuplicateProperty(entry.name.to_string()));
        }
        self.require_receiver(entry.extension_receiver)?;
        if entry.getter.is_some() {
            self.register_function(FunctionEntry::getter(&entry))?;
        }
        self.property_hash_to_name
            .insert(entry.hash, entry.name.clone());
        self.properties
            .entry(entry.name.clone())
            .or_default()
            .push(entry);
        Ok(())
    }

    fn require_receiver(&self, receiver: Option<TypeHash>) -> Result<(), RegistrationError> {
        match receiver {
            Some(hash) if !self.type_hash_to_name.contains_key(&hash) => {
                Err(RegistrationError::TypeNotFound(hash.to_string()))
            }
            _ => Ok(()),
        }
    }
}

impl LibraryNames for SymbolRegistry {
    fn library_name(&self, hash: TypeHash) -> Option<String> {
        self.function(hash).map(|f| f.name.simple_name().to_string())
    }
}
