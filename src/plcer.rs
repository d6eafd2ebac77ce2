use std::io::Write;

use anyhow::Context;
use log::debug;

use crate::{
	PlcError,
	analyzer::Analyzer,
	ast::Source,
	interpreter::{Interpreter, value::Value},
	lexer::Lexer,
	parser::Parser,
};

/// Plcer is the main struct for the lex, parse, analyze and run pipeline.
pub struct Plcer;

impl Plcer {
	/// Run a program, `print` writes to standard output.
	pub fn run(&self, source: &str) -> Result<Value, PlcError> {
		let stdout = std::io::stdout();
		let mut output = stdout.lock();
		self.run_with_output(source, &mut output)
	}

	/// Run a program and return the value of its `main()`.
	pub fn run_with_output(&self, source: &str, output: &mut dyn Write) -> Result<Value, PlcError> {
		let source = self.check(source)?;
		let value = Interpreter::new(output).run(&source)?;
		output.flush().context("Failed flush output")?;
		debug!("main() returned {value}");
		Ok(value)
	}

	/// Lex, parse and analyze a program without running it.
	///
	/// The returned tree carries a resolved type on every expression and a
	/// resolved binding on every declaration.
	pub fn check(&self, source: &str) -> Result<Source, PlcError> {
		let tokens = Lexer::new(source).lex()?;
		debug!("Lexed {} tokens", tokens.len());
		let mut source = Parser::new(tokens).parse_source()?;
		Analyzer::new().analyze(&mut source)?;
		Ok(source)
	}
}
