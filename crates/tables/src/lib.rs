//! GS1 reference tables.
//!
//! Defines the AI registry data model (entries, validator kinds) and ships
//! the built-in registry, plus the static tables the validators consult:
//! GS1 prefix allocations, IBAN country structures and UN/CEFACT freight
//! unit types. The registry is deserialized from JSONC and consumed by the
//! core crate's descriptor registry.

/// UN/CEFACT freight unit type codes.
pub mod freight;
/// IBAN country structures.
pub mod iban;
/// GS1 prefix → member organisation allocation.
pub mod prefixes;
mod registry;

pub use freight::is_freight_unit_type;
pub use iban::{IbanFormat, aspirational_iban_format, iban_format};
pub use prefixes::{PrefixAllocation, country_for};
pub use registry::{
    AiEntry, AiRegistryTable, REGISTRY_FORMAT_VERSION, RegistryError, ValidatorKind,
    builtin_registry_table, load_registry_table_from_str,
};
