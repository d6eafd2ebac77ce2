//! Lexical scopes.
//!
//! Scopes live in an arena and refer to their parent by index, so a child
//! never owns its parent and nothing forms a reference cycle. Scopes are
//! pushed and popped in strict stack order: popping a scope drops it and every
//! scope created after it.
//!
//! The same structure serves both phases: the analyzer binds names to types
//! and functions to signatures, the interpreter binds names to values and
//! functions to callables.

use std::collections::HashMap;

use log::trace;

use crate::error::environment::EnvironmentError;

/// Index of a scope in its `Environment`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ScopeId(usize);

/// A resolved variable binding.
#[derive(Debug, Clone, PartialEq)]
pub struct Variable<V> {
	pub name:    String,
	/// A type in the analyzer, a value in the interpreter.
	pub value:   V,
	pub mutable: bool,
}

impl<V> Variable<V> {
	pub fn new(name: impl Into<String>, value: V, mutable: bool) -> Self { Self { name: name.into(), value, mutable } }
}

#[derive(Debug, Clone)]
struct Scope<V, F> {
	parent:    Option<ScopeId>,
	variables: HashMap<String, Variable<V>>,
	/// Functions are overloaded on arity.
	functions: HashMap<(String, usize), F>,
}

impl<V, F> Scope<V, F> {
	fn new(parent: Option<ScopeId>) -> Self { Self { parent, variables: HashMap::new(), functions: HashMap::new() } }
}

#[derive(Debug, Clone)]
pub struct Environment<V, F> {
	scopes: Vec<Scope<V, F>>,
}

impl<V, F> Default for Environment<V, F> {
	fn default() -> Self { Self::new() }
}

impl<V, F> Environment<V, F> {
	/// An environment holding only the root scope.
	pub fn new() -> Self { Self { scopes: vec![Scope::new(None)] } }

	pub fn root(&self) -> ScopeId { ScopeId(0) }

	/// Open a child scope of `parent`.
	pub fn push(&mut self, parent: ScopeId) -> ScopeId {
		let id = ScopeId(self.scopes.len());
		self.scopes.push(Scope::new(Some(parent)));
		trace!("Pushed scope {} with parent {}", id.0, parent.0);
		id
	}

	/// Close `scope` together with every scope opened after it.
	pub fn pop(&mut self, scope: ScopeId) {
		trace!("Popped scope {} ({} open)", scope.0, self.scopes.len());
		self.scopes.truncate(scope.0.max(1));
	}

	/// Number of open scopes, the root included.
	pub fn depth(&self) -> usize { self.scopes.len() }

	/// Bind a name in exactly `scope`, shadowing any outer binding.
	pub fn define_variable(
		&mut self,
		scope: ScopeId,
		name: &str,
		value: V,
		mutable: bool,
	) -> Result<&Variable<V>, EnvironmentError> {
		let variables = &mut self.scopes[scope.0].variables;
		if variables.contains_key(name) {
			return Err(EnvironmentError::VariableRedefinition(name.to_string()));
		}
		Ok(variables.entry(name.to_string()).or_insert(Variable::new(name, value, mutable)))
	}

	/// Find the innermost binding of `name` visible from `scope`.
	pub fn lookup_variable(&self, scope: ScopeId, name: &str) -> Result<&Variable<V>, EnvironmentError> {
		let owner = self.resolve(scope, |scope| scope.variables.contains_key(name));
		owner
			.and_then(|owner| self.scopes[owner.0].variables.get(name))
			.ok_or_else(|| EnvironmentError::UndefinedVariable(name.to_string()))
	}

	pub fn lookup_variable_mut(&mut self, scope: ScopeId, name: &str) -> Result<&mut Variable<V>, EnvironmentError> {
		let owner = self.resolve(scope, |scope| scope.variables.contains_key(name));
		owner
			.and_then(|owner| self.scopes[owner.0].variables.get_mut(name))
			.ok_or_else(|| EnvironmentError::UndefinedVariable(name.to_string()))
	}

	/// Bind a function in exactly `scope`.
	pub fn define_function(&mut self, scope: ScopeId, name: &str, arity: usize, function: F) -> Result<(), EnvironmentError> {
		let functions = &mut self.scopes[scope.0].functions;
		let key = (name.to_string(), arity);
		if functions.contains_key(&key) {
			return Err(EnvironmentError::FunctionRedefinition { name: name.to_string(), arity });
		}
		functions.insert(key, function);
		Ok(())
	}

	/// Bind a built-in function in the root scope, replacing any previous one.
	pub fn define_native(&mut self, name: &str, arity: usize, function: F) {
		self.scopes[0].functions.insert((name.to_string(), arity), function);
	}

	pub fn lookup_function(&self, scope: ScopeId, name: &str, arity: usize) -> Result<&F, EnvironmentError> {
		let key = (name.to_string(), arity);
		self.resolve(scope, |scope| scope.functions.contains_key(&key))
			.and_then(|owner| self.scopes[owner.0].functions.get(&key))
			.ok_or_else(|| EnvironmentError::UndefinedFunction { name: name.to_string(), arity })
	}

	/// Walk the parent chain from `scope` to the first scope satisfying `found`.
	fn resolve(&self, scope: ScopeId, found: impl Fn(&Scope<V, F>) -> bool) -> Option<ScopeId> {
		let mut current = Some(scope);
		while let Some(id) = current {
			let scope = &self.scopes[id.0];
			if found(scope) {
				return Some(id);
			}
			current = scope.parent;
		}
		None
	}
}
