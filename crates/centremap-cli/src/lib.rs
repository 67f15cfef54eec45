//! centremap-cli
//! ==============
//!
//! Command-line interface for the `centremap-core` commercial-site catalog.
//!
//! This crate primarily provides a binary (`centremap-cli`). We include a
//! small library target so that docs.rs renders a documentation page and
//! shows this overview. See the README for full usage examples.
//!
//! Quick start
//! -----------
//!
//! Install the CLI from crates.io:
//!
//! ```text
//! cargo install centremap-cli
//! ```
//!
//! Basic usage:
//!
//! ```text
//! centremap-cli --help
//! centremap-cli stats
//! centremap-cli centre "Créteil Soleil"
//! centremap-cli brand fnac
//! ```
//!
//! For programmatic access to the data structures and APIs, use the
//! [`centremap-core`] crate directly.
//!
#![cfg_attr(docsrs, feature(doc_cfg))]

// This library target intentionally exposes no API; the binary is the primary
// deliverable. The presence of this file enables a rendered page on docs.rs.
