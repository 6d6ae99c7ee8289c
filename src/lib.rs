//! nl2sql – answers plain-English questions about a relational database by
//! translating them into parameterized SQL.
//!
//! There is no language model and no parser here. A question is matched
//! against an ordered table of *recognizers*; each recognizer owns one or
//! more regular-expression *variants* (different ways of phrasing the same
//! question) and a *template* that turns the captured pieces into SQL.
//!
//! * [`rules`] – [`rules::Recognizer`] and the ordered [`rules::RuleTable`],
//!   including the built-in table for the reference company database.
//! * [`matcher`] – first-match-wins dispatch producing a
//!   [`matcher::MatchResult`].
//! * [`plan`] – captures, templates and [`plan::Plan`] (SQL text plus bound
//!   values). Captured text is always bound as a parameter.
//! * [`executor`] – runs a plan against a [`persist::Storage`].
//! * [`schema`] – reflects table and column metadata.
//! * [`engine`] – [`engine::Engine`], which sequences matching and execution
//!   into an [`engine::Outcome`].
//! * [`persist`] – the storage collaborator trait and its SQLite implementation.
//! * [`seed`] – tables and the reference dataset.
//! * [`server`] – the HTTP API.
//!
//! ## Matching
//! Input is trimmed and matched case-insensitively. Recognizers are tried in
//! table order and, inside a recognizer, variants in declared order; the
//! first hit wins. Narrow recognizers therefore come before broad ones.
//! Nothing matching is an ordinary result ([`matcher::MatchResult::NotMatched`]),
//! which the engine turns into a list of example questions.
//!
//! ## Quick Start
//! ```
//! use std::sync::Arc;
//! use nl2sql::{engine::{Engine, Outcome}, persist::SqliteStorage, seed};
//! let storage = SqliteStorage::in_memory().unwrap();
//! seed::provision(&storage).unwrap();
//! let engine = Engine::new().unwrap().with_storage(Arc::new(storage));
//! match engine.translate_and_execute("Show me all employees") {
//!     Outcome::Succeeded(t) => assert_eq!(t.row_count, 10),
//!     other => panic!("unexpected outcome: {:?}", other),
//! }
//! ```

pub mod datatype;
pub mod engine;
pub mod error;
pub mod executor;
pub mod matcher;
pub mod persist;
pub mod plan;
pub mod rules;
pub mod schema;
pub mod seed;
pub mod server;
pub mod settings;
pub mod suggestions;

pub use error::{Nl2SqlError, Result};
