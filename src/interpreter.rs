use std::cell::RefCell;
use std::cmp::Ordering;
use std::collections::HashMap;
use std::io::Write;
use std::mem;
use std::rc::Rc;

use crate::class::Class;
use crate::environment::Environment;
use crate::error::{Error, RuntimeError, Unwind};
use crate::expr::{Expr, ExprVisitor};
use crate::function::{Function, NativeFunction};
use crate::literal::Literal;
use crate::object::{Callable, Object};
use crate::stmt::{Stmt, StmtVisitor};
use crate::token::{Token, Type};

/// Builds the runtime error for a non-number operand.
fn number_operand_error(operator: &Token) -> Unwind {
    Unwind::Error(RuntimeError {
        token: operator.clone(),
        message: "Operand must be a number.".to_string(),
    })
}

/// Walks the AST and evaluates it.
/// Owns the global environment, the currently active environment and the
/// resolver's side table. Everything `print` produces goes to the injected
/// output so callers can capture it.
pub struct Interpreter<'a> {
    pub globals: Rc<RefCell<Environment>>,
    environment: Rc<RefCell<Environment>>,
    locals: HashMap<usize, usize>,
    output: &'a mut dyn Write,
}

impl<'a> Interpreter<'a> {
    pub fn new(output: &'a mut dyn Write) -> Self {
        let globals = Rc::new(RefCell::new(Environment::default()));

        for native in NativeFunction::get_globals() {
            let name = native.name.lexeme.clone();
            globals.borrow_mut().define(&name, Object::from(native));
        }

        Interpreter {
            globals: Rc::clone(&globals),
            environment: globals,
            locals: HashMap::new(),
            output,
        }
    }

    /// Executes the statements in order.
    /// The first uncaught runtime error aborts the run and is forwarded to
    /// the reporter.
    pub fn interpret(&mut self, statements: &[Stmt]) {
        for statement in statements {
            if let Err(unwind) = self.execute(statement) {
                match unwind {
                    Unwind::Error(error) => error.throw(),
                    // The resolver rejects `return` outside of a function.
                    Unwind::Return(_) => unreachable!(),
                }
                return;
            }
        }
    }

    /// Records the lexical depth of a reference expression.
    /// Called by the resolver; expressions without an entry are globals.
    pub fn resolve(&mut self, id: usize, depth: usize) {
        self.locals.insert(id, depth);
    }

    /// Drops all recorded depths.
    /// Expression ids are handed out per parse, so a fresh run's nodes would
    /// alias entries left over from a previous run, like the prompt reusing
    /// one interpreter across lines.
    pub fn reset_locals(&mut self) {
        self.locals.clear();
    }

    /// Exposes the recorded depths so tests can inspect resolution.
    #[cfg(test)]
    pub(crate) fn local_depths(&self) -> Vec<usize> {
        self.locals.values().copied().collect()
    }

    fn execute(&mut self, stmt: &Stmt) -> Result<(), Unwind> {
        stmt.accept(self)
    }

    fn evaluate(&mut self, expr: &Expr) -> Result<Object, Unwind> {
        expr.accept(self)
    }

    /// Executes the statements under the given environment and restores the
    /// previous environment on every exit, unwinding included.
    pub fn execute_block(
        &mut self,
        statements: &[Stmt],
        environment: Rc<RefCell<Environment>>,
    ) -> Result<(), Unwind> {
        let previous = mem::replace(&mut self.environment, environment);

        let result = statements.iter().try_for_each(|statement| self.execute(statement));

        self.environment = previous;
        result
    }

    /// Reads a variable at its resolved depth, or from the globals if the
    /// resolver did not record it.
    fn look_up_variable(&self, id: usize, name: &Token) -> Result<Object, RuntimeError> {
        match self.locals.get(&id) {
            Some(distance) => self.environment.borrow().get_at(*distance, name),
            None => self.globals.borrow().get(name),
        }
    }
}

impl<'a> ExprVisitor<Result<Object, Unwind>> for Interpreter<'a> {
    fn visit_literal_expr(&mut self, expr: &Expr) -> Result<Object, Unwind> {
        let Expr::Literal(literal) = expr else { unreachable!() };

        Ok(Object::from(literal.clone()))
    }

    fn visit_grouping_expr(&mut self, expr: &Expr) -> Result<Object, Unwind> {
        let Expr::Grouping(data) = expr else { unreachable!() };

        self.evaluate(&data.expr)
    }

    fn visit_unary_expr(&mut self, expr: &Expr) -> Result<Object, Unwind> {
        let Expr::Unary(data) = expr else { unreachable!() };

        let right = self.evaluate(&data.expr)?;

        match data.operator.r#type {
            Type::Minus => (-right).ok_or_else(|| number_operand_error(&data.operator)),
            Type::Bang => Ok(Object::from(!right.as_bool())),
            _ => unreachable!(),
        }
    }

    fn visit_binary_expr(&mut self, expr: &Expr) -> Result<Object, Unwind> {
        let Expr::Binary(data) = expr else { unreachable!() };

        let left = self.evaluate(&data.left)?;
        let right = self.evaluate(&data.right)?;

        match data.operator.r#type {
            Type::Greater | Type::GreaterEqual | Type::Less | Type::LessEqual => {
                let ordering = left.partial_cmp(&right)
                    .ok_or_else(|| number_operand_error(&data.operator))?;

                Ok(Object::from(match data.operator.r#type {
                    Type::Greater => ordering == Ordering::Greater,
                    Type::GreaterEqual => ordering != Ordering::Less,
                    Type::Less => ordering == Ordering::Less,
                    Type::LessEqual => ordering != Ordering::Greater,
                    _ => unreachable!(),
                }))
            },
            Type::EqualEqual => Ok(Object::from(left == right)),
            Type::BangEqual => Ok(Object::from(left != right)),
            Type::Minus => (left - right).ok_or_else(|| number_operand_error(&data.operator)),
            Type::Star => (left * right).ok_or_else(|| number_operand_error(&data.operator)),
            Type::Slash => {
                if let (Object::Literal(Literal::Number(_)), Object::Literal(Literal::Number(divisor))) = (&left, &right) {
                    if *divisor == 0.0 {
                        return Err(RuntimeError {
                            token: data.operator.clone(),
                            message: "Division by zero.".to_string(),
                        }.into());
                    }
                }

                (left / right).ok_or_else(|| number_operand_error(&data.operator))
            },
            Type::Plus => (left + right).ok_or_else(|| Unwind::from(RuntimeError {
                token: data.operator.clone(),
                message: "Operands must be two numbers or two strings.".to_string(),
            })),
            _ => unreachable!(),
        }
    }

    fn visit_logical_expr(&mut self, expr: &Expr) -> Result<Object, Unwind> {
        let Expr::Logical(data) = expr else { unreachable!() };

        let left = self.evaluate(&data.left)?;

        // Short-circuit by returning the operand itself, not a boolean.
        match data.operator.r#type {
            Type::Or if left.as_bool() => Ok(left),
            Type::And if !left.as_bool() => Ok(left),
            _ => self.evaluate(&data.right),
        }
    }

    fn visit_variable_expr(&mut self, expr: &Expr) -> Result<Object, Unwind> {
        let Expr::Variable(data) = expr else { unreachable!() };

        Ok(self.look_up_variable(data.id, &data.name)?)
    }

    fn visit_assign_expr(&mut self, expr: &Expr) -> Result<Object, Unwind> {
        let Expr::Assign(data) = expr else { unreachable!() };

        let value = self.evaluate(&data.value)?;

        match self.locals.get(&data.id) {
            Some(distance) => {
                self.environment.borrow_mut().assign_at(*distance, &data.name, value.clone());
            },
            None => {
                self.globals.borrow_mut().assign(&data.name, value.clone())?;
            },
        }

        Ok(value)
    }

    fn visit_call_expr(&mut self, expr: &Expr) -> Result<Object, Unwind> {
        let Expr::Call(data) = expr else { unreachable!() };

        let callee = self.evaluate(&data.callee)?;

        // Arguments are evaluated left to right.
        let mut arguments = Vec::with_capacity(data.arguments.len());
        for argument in &data.arguments {
            arguments.push(self.evaluate(argument)?);
        }

        let callable: &dyn Callable = match &callee {
            Object::Function(function) => function,
            Object::NativeFunction(function) => function,
            Object::Class(class) => class,
            _ => {
                return Err(RuntimeError {
                    token: data.paren.clone(),
                    message: "Can only call functions and classes.".to_string(),
                }.into());
            },
        };

        if arguments.len() != callable.arity() {
            return Err(RuntimeError {
                token: data.paren.clone(),
                message: format!(
                    "Expected {} arguments but got {}.",
                    callable.arity(),
                    arguments.len()
                ),
            }.into());
        }

        Ok(callable.call(self, arguments)?)
    }

    fn visit_get_expr(&mut self, expr: &Expr) -> Result<Object, Unwind> {
        let Expr::Get(data) = expr else { unreachable!() };

        let object = self.evaluate(&data.object)?;

        match &object {
            Object::Instance(instance) => {
                let instance = Rc::clone(instance);
                let value = instance.borrow().get(&data.name, &object)?;
                Ok(value)
            },
            _ => Err(RuntimeError {
                token: data.name.clone(),
                message: "Only instances have properties.".to_string(),
            }.into()),
        }
    }

    fn visit_set_expr(&mut self, expr: &Expr) -> Result<Object, Unwind> {
        let Expr::Set(data) = expr else { unreachable!() };

        let object = self.evaluate(&data.object)?;

        let Object::Instance(instance) = object else {
            return Err(RuntimeError {
                token: data.name.clone(),
                message: "Only instances have fields.".to_string(),
            }.into());
        };

        let value = self.evaluate(&data.value)?;
        instance.borrow_mut().set(&data.name, value.clone());

        Ok(value)
    }

    fn visit_this_expr(&mut self, expr: &Expr) -> Result<Object, Unwind> {
        let Expr::This(data) = expr else { unreachable!() };

        Ok(self.look_up_variable(data.id, &data.keyword)?)
    }

    fn visit_super_expr(&mut self, expr: &Expr) -> Result<Object, Unwind> {
        let Expr::Super(data) = expr else { unreachable!() };

        let distance = *self.locals.get(&data.id).expect("'super' to be resolved");

        let superclass = self.environment.borrow().get_at(distance, &Token::from("super"))?;
        // `this` is always bound one scope inside of `super`.
        let object = self.environment.borrow().get_at(distance - 1, &Token::from("this"))?;

        let Object::Class(superclass) = superclass else { unreachable!() };

        let method = superclass.borrow().find_method(&data.method.lexeme)
            .ok_or_else(|| RuntimeError {
                token: data.method.clone(),
                message: format!("Undefined property '{}'.", data.method.lexeme),
            })?;

        Ok(Object::from(method.bind(object)))
    }
}

impl<'a> StmtVisitor<Result<(), Unwind>> for Interpreter<'a> {
    fn visit_expression_stmt(&mut self, stmt: &Stmt) -> Result<(), Unwind> {
        let Stmt::Expression(data) = stmt else { unreachable!() };

        self.evaluate(&data.expr)?;
        Ok(())
    }

    fn visit_print_stmt(&mut self, stmt: &Stmt) -> Result<(), Unwind> {
        let Stmt::Print(data) = stmt else { unreachable!() };

        let value = self.evaluate(&data.expr)?;
        writeln!(self.output, "{value}").expect("output stream to be writable");

        Ok(())
    }

    fn visit_var_stmt(&mut self, stmt: &Stmt) -> Result<(), Unwind> {
        let Stmt::Var(data) = stmt else { unreachable!() };

        let value = match &data.initializer {
            Some(initializer) => self.evaluate(initializer)?,
            None => Object::from(Literal::Nil),
        };

        self.environment.borrow_mut().define(&data.name.lexeme, value);
        Ok(())
    }

    fn visit_block_stmt(&mut self, stmt: &Stmt) -> Result<(), Unwind> {
        let Stmt::Block(data) = stmt else { unreachable!() };

        let environment = Environment::new(Some(Rc::clone(&self.environment)));
        self.execute_block(&data.statements, Rc::new(RefCell::new(environment)))
    }

    fn visit_if_stmt(&mut self, stmt: &Stmt) -> Result<(), Unwind> {
        let Stmt::If(data) = stmt else { unreachable!() };

        if self.evaluate(&data.condition)?.as_bool() {
            self.execute(&data.then_branch)?;
        } else if let Some(else_branch) = &data.else_branch {
            self.execute(else_branch)?;
        }

        Ok(())
    }

    fn visit_while_stmt(&mut self, stmt: &Stmt) -> Result<(), Unwind> {
        let Stmt::While(data) = stmt else { unreachable!() };

        while self.evaluate(&data.condition)?.as_bool() {
            self.execute(&data.body)?;
        }

        Ok(())
    }

    fn visit_return_stmt(&mut self, stmt: &Stmt) -> Result<(), Unwind> {
        let Stmt::Return(data) = stmt else { unreachable!() };

        let value = match &data.value {
            Some(value) => self.evaluate(value)?,
            None => Object::from(Literal::Nil),
        };

        // Unwind to the nearest enclosing function call.
        Err(Unwind::Return(value))
    }

    fn visit_function_stmt(&mut self, stmt: &Stmt) -> Result<(), Unwind> {
        let Stmt::Function(data) = stmt else { unreachable!() };

        let function = Function {
            name: data.name.clone(),
            params: data.params.clone(),
            body: data.body.clone(),
            closure: Rc::clone(&self.environment),
            is_initializer: false,
        };

        self.environment.borrow_mut().define(&data.name.lexeme, Object::from(function));
        Ok(())
    }

    fn visit_class_stmt(&mut self, stmt: &Stmt) -> Result<(), Unwind> {
        let Stmt::Class(data) = stmt else { unreachable!() };

        let superclass = match &data.superclass {
            Some(expr) => {
                let Expr::Variable(variable) = expr else { unreachable!() };

                match self.evaluate(expr)? {
                    Object::Class(class) => Some(class),
                    _ => {
                        return Err(RuntimeError {
                            token: variable.name.clone(),
                            message: "Superclass must be a class.".to_string(),
                        }.into());
                    },
                }
            },
            None => None,
        };

        self.environment.borrow_mut().define(&data.name.lexeme, Object::from(Literal::Nil));

        // Methods of a subclass close over an extra environment that binds
        // `super` to the superclass.
        let enclosing = match &superclass {
            Some(class) => {
                let mut environment = Environment::new(Some(Rc::clone(&self.environment)));
                environment.define("super", Object::Class(Rc::clone(class)));
                Some(mem::replace(&mut self.environment, Rc::new(RefCell::new(environment))))
            },
            None => None,
        };

        let mut methods = HashMap::new();
        for method in &data.methods {
            let Stmt::Function(function) = method else { unreachable!() };

            methods.insert(function.name.lexeme.clone(), Function {
                name: function.name.clone(),
                params: function.params.clone(),
                body: function.body.clone(),
                closure: Rc::clone(&self.environment),
                is_initializer: function.name.lexeme == "init",
            });
        }

        let class = Class::new(data.name.lexeme.clone(), superclass, methods);

        if let Some(enclosing) = enclosing {
            self.environment = enclosing;
        }

        self.environment.borrow_mut().assign(&data.name, Object::from(class))?;
        Ok(())
    }
}
