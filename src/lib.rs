//! `grep -E` style pattern matching on a backtracking automaton.
//!
//! ```
//! use backtrack_grep::Pattern;
//!
//! let pattern = Pattern::compile("(cat) and \\1").unwrap();
//! assert!(pattern.is_match("cat and cat"));
//! assert!(!pattern.is_match("cat and dog"));
//! assert_eq!(
//!     pattern.captures("my cat and cat"),
//!     Some(vec![Some("cat".to_string())])
//! );
//! ```

pub mod automaton;
mod captures;
mod compiler;
pub mod error;
mod matcher;
pub mod matchers;
pub mod parser;
pub mod pattern;
pub mod syntax;

pub use error::{CompileError, CompileErrorKind, MatchError};
pub use parser::parse_pattern;
pub use pattern::{compile, Anchor, Pattern};
