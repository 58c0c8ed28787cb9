//! Derived views over a parsed index configuration.
//!
//! Everything in this crate is a pure function of the document model (plus,
//! for [`tree::flatten`], an explicit UI expand state): alias edges, display
//! diagnostics, the approximate tokenizer preview, the shard display grid
//! and the mapping-tree view-model. Derivations are recomputed wholesale
//! after every re-parse; none of them mutate the model.

pub mod alias;
pub mod diagnostics;
pub mod shards;
pub mod tokenize;
pub mod tree;

pub use alias::{resolve_aliases, AliasEdge};
pub use diagnostics::{Diagnostic, DiagnosticSeverity};
pub use shards::ShardLayout;
pub use tokenize::{tokenize, AnalyzerKind, Token};
pub use tree::{build_tree, flatten, ExpandState, FieldNode, FlatField};
