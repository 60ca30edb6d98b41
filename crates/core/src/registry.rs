//! Descriptor registry: numeric AI code → compiled [`Descriptor`].

use crate::descriptor::Descriptor;
use crate::field::AiCode;
use gs1_tables::{AiRegistryTable, RegistryError, builtin_registry_table};
use std::collections::HashMap;
use std::sync::OnceLock;

/// Immutable lookup from AI code to descriptor, shared by every scan.
#[derive(Debug, Clone)]
pub struct Registry {
    descriptors: HashMap<u16, Descriptor>,
    gs1_spec_version: Option<String>,
}

impl Registry {
    /// Compile every entry of `table`.
    ///
    /// # Errors
    /// Returns [`RegistryError`] if the table fails its structural checks or
    /// a pattern does not compile.
    pub fn from_table(table: &AiRegistryTable) -> Result<Self, RegistryError> {
        table.check()?;
        let descriptors = table
            .entries
            .iter()
            .map(|entry| Ok((entry.code, Descriptor::from_entry(entry)?)))
            .collect::<Result<HashMap<_, _>, RegistryError>>()?;
        Ok(Self {
            descriptors,
            gs1_spec_version: table.gs1_spec_version.clone(),
        })
    }

    /// The registry compiled from the built-in table, once per process.
    pub fn builtin() -> &'static Registry {
        static BUILTIN: OnceLock<Registry> = OnceLock::new();
        BUILTIN.get_or_init(|| {
            Registry::from_table(builtin_registry_table())
                .unwrap_or_else(|e| panic!("built-in AI registry does not compile: {e}"))
        })
    }

    /// Look up the descriptor for `code`.
    pub fn descriptor_for(&self, code: AiCode) -> Option<&Descriptor> {
        self.descriptors.get(&code.get())
    }

    /// All codes with a descriptor, ascending.
    pub fn codes(&self) -> Vec<AiCode> {
        let mut codes: Vec<AiCode> = self.descriptors.keys().copied().map(AiCode::new).collect();
        codes.sort_unstable();
        codes
    }

    /// Number of descriptors.
    pub fn len(&self) -> usize {
        self.descriptors.len()
    }

    /// Whether the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.descriptors.is_empty()
    }

    /// GS1 General Specifications version the table follows, if declared.
    pub fn gs1_spec_version(&self) -> Option<&str> {
        self.gs1_spec_version.as_deref()
    }
}
