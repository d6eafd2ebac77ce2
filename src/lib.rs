//! # How a program travels from text to a value
//!
//! User's source code: `VAR total: Integer = (min + max) / 2;`

//! ## Lexing
//!
//! The lexer takes in the characters and groups them into tokens. Each token
//! keeps its exact text and the byte offset it starts at, so every later error
//! can point back into the source.
//!
//! Whitespace is skipped. Keywords are not special yet, `VAR` is lexed like any
//! other identifier. So the tokens are
//! `["VAR", "total", ":", "Integer", "=", "(", "min", "+", "max", ")", "/", "2", ";"]`.

//! ## Parsing
//!
//! The parser builds the `abstract syntax tree` by recursive descent, one
//! method per grammar rule and one method per precedence level. It stops at the
//! first grammar violation.
//!
//! ``` markdown
//! total (Global, VAR, Integer)
//! └── / (Expression::Binary)
//!     ├── (...) (Expression::Group)
//!     │   └── + (Expression::Binary)
//!     │       ├── min (Expression::Access)
//!     │       └── max (Expression::Access)
//!     └── 2 (Expression::Literal)
//! ```

//! ## Static analysis
//!
//! The analyzer resolves every name to the declaration it refers to, walking
//! the `scope` chain innermost first, and gives every expression a static type.
//! If the types don't fit, for example a `Decimal` stored in an `Integer`
//! variable, it reports a `type error` and the program never runs.
//!
//! The results are written back into the tree, so a later consumer can read a
//! fully resolved program.

//! ## Interpreting
//!
//! A tree-walk interpreter executes the analyzed tree directly. It keeps its
//! own scopes holding values instead of types, and evaluates operands left to
//! right. Integers and decimals have arbitrary precision.

pub mod analyzer;
pub mod ast;
pub mod environment;
pub mod error;
pub mod interpreter;
pub mod lexer;
pub mod parser;
mod plcer;
pub mod types;

pub use error::{
	PlcError,
	analyzer::TypeError,
	environment::EnvironmentError,
	interpreter::RuntimeError,
	lexer::{LexError, LexErrorType},
	parser::ParseError,
};
pub use interpreter::value::Value;
pub use plcer::Plcer;
