// crates/gb2260-core/src/lib.rs

//! # gb2260-core
//!
//! Resolve GB/T 2260 administrative division codes into [`Division`]
//! handles, navigate the province / prefecture / county hierarchy, and
//! search every historical revision by code prefix or name.
//!
//! The free [`get`] and [`search`] functions run against a small sample
//! compiled into the crate (see [`Dataset::bundled`]). Load complete revision
//! files with [`Dataset::from_sources`] and wrap them in a [`Resolver`].
//!
//! ```rust
//! let chaoyang = gb2260_core::get(110105).unwrap();
//! assert_eq!(chaoyang.to_string(), "<GB2260 110105 北京市/市辖区/朝阳区>");
//!
//! let hits = gb2260_core::search("11", Some("朝阳"));
//! assert_eq!(hits, vec![chaoyang]);
//! ```
#![cfg_attr(docsrs, feature(doc_cfg))]

pub mod api;
pub mod code;
pub mod config;
pub mod dataset;
pub mod division;
pub mod error;
pub mod loader; // The public loader
pub mod resolver;

// Re-exports
pub use crate::api::DivisionView;
pub use crate::code::{CodeLike, DivisionCode, Level};
pub use crate::config::{CacheMode, ResolverConfig};
pub use crate::dataset::{Dataset, DatasetStats};
pub use crate::division::{Division, Stack};
pub use crate::error::{GbError, Result};
pub use crate::resolver::Resolver;

use once_cell::sync::Lazy;

// Single in-process resolver over the bundled sample, built on first use.
static DEFAULT_RESOLVER: Lazy<Resolver> = Lazy::new(|| Resolver::new(Dataset::bundled()));

/// The process-wide resolver backing [`get`] and [`search`].
///
/// It only knows the sample records of [`Dataset::bundled`]; build a
/// [`Resolver`] over [`Dataset::from_sources`] for complete revisions.
pub fn default_resolver() -> &'static Resolver {
    &DEFAULT_RESOLVER
}

/// Gets a division from the bundled sample. See [`Resolver::get`].
///
/// Codes outside the sample fail with [`GbError::InvalidCode`] even when
/// they are real GB/T 2260 codes.
pub fn get(code: impl CodeLike) -> Result<Division> {
    default_resolver().get(code)
}

/// Searches the bundled sample. See [`Resolver::search`].
pub fn search(prefix: impl CodeLike, name: Option<&str>) -> Vec<Division> {
    default_resolver().search(prefix, name)
}

pub mod prelude {
    //! Common types and functions for demos and quick scripts.
    pub use crate::{
        get, search, CacheMode, CodeLike, Dataset, Division, DivisionView, GbError, Level,
        Resolver, ResolverConfig, Result,
    };
}
