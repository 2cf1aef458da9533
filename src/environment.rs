use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use crate::error::RuntimeError;
use crate::object::Object;
use crate::token::Token;

/// A single scope in the scope chain.
/// Environments form a linked list through their enclosing pointer, ending
/// at the global environment which has none.
#[derive(Debug, Clone)]
pub struct Environment {
    pub enclosing: Option<Rc<RefCell<Environment>>>,
    pub variables: HashMap<String, Object>,
}

impl Environment {
    pub fn new(enclosing: Option<Rc<RefCell<Environment>>>) -> Self {
        Environment {
            enclosing,
            variables: HashMap::new(),
        }
    }

    /// Defines a variable in this scope, shadowing any enclosing binding.
    pub fn define(&mut self, name: &str, value: Object) {
        self.variables.insert(name.to_string(), value);
    }

    /// Walks exactly `distance` enclosing pointers.
    /// The resolver guarantees the environment exists at that depth.
    fn ancestor(&self, distance: usize) -> Rc<RefCell<Environment>> {
        let mut environment = Rc::clone(self.enclosing.as_ref()
            .expect("enclosing environment to exist at depth 1"));

        for depth in 1..distance {
            let enclosing = Rc::clone(environment.borrow().enclosing.as_ref()
                .unwrap_or_else(|| panic!("enclosing environment to exist at depth {}", depth + 1)));
            environment = enclosing;
        }

        environment
    }

    pub fn assign(&mut self, name: &Token, value: Object) -> Result<(), RuntimeError> {
        if self.variables.contains_key(&name.lexeme) {
            self.variables.insert(name.lexeme.clone(), value);
            return Ok(());
        }

        if let Some(enclosing) = &mut self.enclosing {
            return enclosing.borrow_mut().assign(name, value);
        }

        Err(RuntimeError {
            token: name.clone(),
            message: format!("Undefined variable '{}'.", name.lexeme),
        })
    }

    pub fn assign_at(&mut self, distance: usize, name: &Token, value: Object) {
        if distance > 0 {
            self.ancestor(distance).borrow_mut().variables.insert(name.lexeme.clone(), value);
        } else {
            self.variables.insert(name.lexeme.clone(), value);
        }
    }

    pub fn get(&self, name: &Token) -> Result<Object, RuntimeError> {
        if let Some(variable) = self.variables.get(&name.lexeme) {
            return Ok(variable.clone());
        }

        if let Some(enclosing) = &self.enclosing {
            return enclosing.borrow().get(name);
        }

        Err(RuntimeError {
            token: name.clone(),
            message: format!("Undefined variable '{}'.", name.lexeme),
        })
    }

    pub fn get_at(&self, distance: usize, name: &Token) -> Result<Object, RuntimeError> {
        let variable = if distance > 0 {
            self.ancestor(distance).borrow().variables.get(&name.lexeme).cloned()
        } else {
            self.variables.get(&name.lexeme).cloned()
        };

        variable.ok_or_else(|| RuntimeError {
            token: name.clone(),
            message: format!("Undefined variable '{}'.", name.lexeme),
        })
    }
}

impl Default for Environment {
    fn default() -> Self {
        Self::new(None)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn define_and_get() {
        let mut environment = Environment::default();
        environment.define("a", Object::from(1.0));

        assert_eq!(environment.get(&Token::from("a")).unwrap(), Object::from(1.0));
        assert!(environment.get(&Token::from("b")).is_err());
    }

    #[test]
    fn assign_walks_the_chain() {
        let global = Rc::new(RefCell::new(Environment::default()));
        global.borrow_mut().define("a", Object::from(1.0));

        let mut local = Environment::new(Some(Rc::clone(&global)));
        local.assign(&Token::from("a"), Object::from(2.0)).unwrap();

        assert_eq!(global.borrow().get(&Token::from("a")).unwrap(), Object::from(2.0));
        assert!(local.assign(&Token::from("b"), Object::from(3.0)).is_err());
    }

    #[test]
    fn get_at_reads_the_exact_depth() {
        let global = Rc::new(RefCell::new(Environment::default()));
        global.borrow_mut().define("a", Object::from("outer"));

        let middle = Rc::new(RefCell::new(Environment::new(Some(global))));
        middle.borrow_mut().define("a", Object::from("middle"));

        let mut inner = Environment::new(Some(middle));
        inner.define("a", Object::from("inner"));

        assert_eq!(inner.get_at(0, &Token::from("a")).unwrap(), Object::from("inner"));
        assert_eq!(inner.get_at(1, &Token::from("a")).unwrap(), Object::from("middle"));
        assert_eq!(inner.get_at(2, &Token::from("a")).unwrap(), Object::from("outer"));
    }
}
