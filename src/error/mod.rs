pub mod analyzer;
pub mod environment;
pub mod interpreter;
pub mod lexer;
pub mod parser;

/// PlcError is the top-level error type of the lex/parse/analyze/run pipeline.
#[derive(thiserror::Error, Debug)]
pub enum PlcError {
	/// Failure outside the language semantics, e.g. the output sink
	#[error("CompilerInternalError: {0}")]
	InternalError(#[from] anyhow::Error),
	/// Malformed token
	#[error("Lex error: {0}")]
	LexError(#[from] lexer::LexError),
	/// Grammar violation
	#[error("Parse error: {0}")]
	ParseError(#[from] parser::ParseError),
	/// Static semantic violation
	#[error("Type error: {0}")]
	TypeError(#[from] analyzer::TypeError),
	/// Dynamic semantic violation
	#[error("Runtime error: {0}")]
	RuntimeError(#[from] interpreter::RuntimeError),
}
