//! trail-test: Conformance fixtures for the trail templating engine
//!
//! Loads YAML fixture documents describing a path or query configuration
//! plus expected match/build/parse outcomes, and runs them against the
//! engine. The fixture documents live in this crate's `fixtures/` directory
//! and are executed by `tests/conformance.rs`.
//!
//! # Example
//!
//! ```
//! use trail_test::fixture::Fixture;
//!
//! let yaml = r#"
//! name: exact match
//! description: a built url matches its own template exactly
//! path:
//!   template: /text/:name
//!   params:
//!     name: { type: string }
//! cases:
//!   - name: hit
//!     match: /text/bob
//!     expect:
//!       exact: true
//!       values: { name: bob }
//! "#;
//!
//! Fixture::from_yaml(yaml).unwrap().run_and_assert();
//! ```

#[cfg(feature = "fixtures")]
pub mod fixture;

/// Prelude for convenient imports.
pub mod prelude {
    #[cfg(feature = "fixtures")]
    pub use crate::fixture::Fixture;
    pub use trail::prelude::*;
}
