//! # Services
//!
//! Collaborators offered to the layers built on top of the codec.
//!
//! ## Components
//! - **Conversion**: typed property value conversion for message headers

pub mod conversion;

pub use conversion::{
    convert, ConversionContext, ConversionService, StandardConversions, Value, ValueKind,
};
