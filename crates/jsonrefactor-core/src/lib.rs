//! jsonrefactor core - declarative reshaping of JSON value trees
//!
//! This crate translates records between differing schemas by pairing
//! source locations with destination locations instead of writing
//! per-field code.
//!
//! # Main Components
//!
//! - **Paths**: dotted path expressions with array markers, resolved for
//!   reading or for writing with fabrication of missing containers
//! - **Getter / Setter**: reading source values and writing coerced or
//!   transformed copies into the target
//! - **Mapping specifications**: ordered entries plus configuration, built
//!   in code or loaded from mapping documents
//! - **Mapper**: the [`refactor`] entry point
//!
//! # Example
//!
//! ```
//! use jsonrefactor_core::{refactor, MappingSpec, Result};
//! use serde_json::json;
//!
//! fn example() -> Result<()> {
//!     let spec = MappingSpec::builder()
//!         .map("user.name", "profile.displayName")
//!         .map("user.active", "!!profile.enabled")
//!         .map("user.age", "+profile.age")
//!         .iterate("user.orders[]", "profile.orders[]", MappingSpec::builder().map("id", "orderId").build()?)
//!         .build()?;
//!
//!     let source = json!({
//!         "user": {
//!             "name": "Ada",
//!             "active": "yes",
//!             "age": "36",
//!             "orders": [{"id": 1}, {"id": 2}]
//!         }
//!     });
//!
//!     let target = refactor(&source, &spec)?;
//!     assert_eq!(target, json!({
//!         "profile": {
//!             "displayName": "Ada",
//!             "enabled": true,
//!             "age": 36,
//!             "orders": [{"orderId": 1}, {"orderId": 2}]
//!         }
//!     }));
//!     Ok(())
//! }
//! # example().unwrap();
//! ```

pub mod coercion;
pub mod error;
pub mod getter;
pub mod mapper;
pub mod path;
pub mod setter;
pub mod spec;

#[cfg(test)]
mod prop_tests;

// Re-export main types for convenience
pub use coercion::Coercion;
pub use error::{Error, Result};
pub use getter::{get, Got};
pub use mapper::{refactor, refactor_into};
pub use path::{Path, PathError};
pub use setter::set;
pub use spec::{
    Iteration, MappingDocument, MappingEntry, MappingSpec, MappingSpecBuilder, RefactorConfig, SourcePath,
    TargetDescriptor, TargetPath, Transform, Transformed,
};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
