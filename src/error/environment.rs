/// Name resolution failures, shared by the analyzer and the interpreter.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum EnvironmentError {
	#[error("The variable `{0}` is not defined in this scope.")]
	UndefinedVariable(String),
	#[error("The function `{name}/{arity}` is not defined in this scope.")]
	UndefinedFunction { name: String, arity: usize },
	#[error("The variable `{0}` is already defined in this scope.")]
	VariableRedefinition(String),
	#[error("The function `{name}/{arity}` is already defined in this scope.")]
	FunctionRedefinition { name: String, arity: usize },
}
