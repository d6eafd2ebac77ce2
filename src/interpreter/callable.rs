use std::io::Write;

use crate::{
	ast::Function,
	environment::ScopeId,
	error::interpreter::RuntimeError,
	interpreter::value::Value,
};

/// A built-in function; it writes to the interpreter's output sink.
pub type NativeFunction = fn(&mut dyn Write, &[Value]) -> Result<Value, RuntimeError>;

/// A function binding in the runtime environment.
#[derive(Debug, Clone, Copy)]
pub enum Callable<'a> {
	Native(NativeFunction),
	/// A `FUN` declaration and the scope it was declared in, which becomes the
	/// parent of every call's scope.
	Defined { function: &'a Function, scope: ScopeId },
}

/// `print(Any): Nil`
pub fn print(output: &mut dyn Write, arguments: &[Value]) -> Result<Value, RuntimeError> {
	for argument in arguments {
		writeln!(output, "{argument}")?;
	}
	Ok(Value::Nil)
}
