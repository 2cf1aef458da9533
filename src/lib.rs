//! Lox is a small dynamically typed scripting language with first-class
//! functions, lexical closures and single-inheritance classes. This crate is
//! a tree-walk interpreter for it with a hand-written recursive descent
//! parser, inspired by the [Crafting Interpreters](https://craftinginterpreters.com/)
//! book by Bob Nystrom.
//!
//! ## Scanning
//! The first step in the interpreter is scanning. Scanning is the process of
//! converting a string of characters into a list of tokens. A token is a
//! single unit of the language. For example, the string `1 + 2` becomes the
//! tokens:
//! ```text
//! [Number(1), Plus, Number(2)]
//! ```
//! The scanner is implemented in the [`scanner`](scanner) module as a loop
//! over the characters of the source code, spanning one lexeme per turn. It
//! reports problems like an unterminated string literal or an unexpected
//! character as a [`ScanError`](error::ScanError) and keeps scanning, so the
//! user sees every syntax error in a single run.
//!
//! ## Parsing
//! The second step is parsing: converting the token list into an abstract
//! syntax tree. The parser is implemented in the [`parser`](parser) module
//! as a recursive descent parser. It builds [`expressions`](expr::Expr),
//! pieces of code that produce a value, and [`statements`](stmt::Stmt),
//! pieces of code that perform an action, like declaring a variable or
//! printing. For example, `print 1 + 2;` becomes:
//! ```text
//! PrintStatement {
//!     BinaryExpression {
//!         left: Number(1),
//!         operator: Plus,
//!         right: Number(2),
//!     }
//! }
//! ```
//! Parse problems are reported as [`ParseError`](error::ParseError)s. After
//! an error the parser discards tokens until the next statement boundary and
//! carries on, a technique called synchronization, again so several errors
//! surface at once.
//!
//! ## Resolving
//! The third step is resolving. Before the program runs, the
//! [`resolver`](resolver) walks the tree, binds every variable reference to
//! the scope that declares it and records how many scopes away the
//! declaration lives. The interpreter later uses those distances to read
//! exactly the binding the source text meant, which is what makes closures
//! behave. The pass also catches code that is syntactically fine but
//! semantically wrong, like `return` at the top level or `this` outside of
//! a class, reported as [`ResolveError`](error::ResolveError)s.
//!
//! ## Interpreting
//! The final step is interpreting. The [`interpreter`](interpreter) module
//! walks the resolved tree and evaluates each node against a chain of
//! [`environments`](environment::Environment), one per active scope.
//! Problems that only show up with live values, like adding a string to a
//! number or calling something that is not callable, are raised as
//! [`RuntimeError`](error::RuntimeError)s and stop the run.

use std::{fs, process};
use std::io::Write;

use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;

pub mod error;
pub mod token;
pub mod scanner;
pub mod literal;
pub mod expr;
pub mod stmt;
pub mod environment;
pub mod parser;
pub mod object;
pub mod function;
pub mod class;
pub mod resolver;
pub mod interpreter;

use parser::Parser;
use resolver::Resolver;
use scanner::Scanner;

#[allow(non_camel_case_types)]
pub struct lox<'a> {
    interpreter: interpreter::Interpreter<'a>,
}

impl<'a> lox<'a> {
    pub fn new(output: &'a mut dyn Write) -> Self {
        lox {
            interpreter: interpreter::Interpreter::new(output),
        }
    }

    /// Runs a script from a file.
    /// Exits with 65 if the script had a static error and 70 if it had a
    /// runtime error.
    pub fn run_file(&mut self, path: String) {
        let contents = fs::read_to_string(path)
            .expect("Should have been able to read the file");

        self.run(&contents);

        if error::did_static_error() {
            process::exit(65);
        }
        if error::did_runtime_error() {
            process::exit(70);
        }
    }

    /// Runs an interactive prompt.
    /// Each line is its own little script and errors do not end the session;
    /// the flags reset between lines. History persists in the home directory.
    pub fn run_prompt(&mut self) {
        let mut editor = DefaultEditor::new().expect("Should have been able to open a prompt");

        let history = home::home_dir().map(|dir| dir.join(".lox_history"));
        if let Some(history) = &history {
            let _ = editor.load_history(history);
        }

        loop {
            match editor.readline("> ") {
                Ok(line) => {
                    let _ = editor.add_history_entry(line.as_str());
                    self.run(&line);
                    error::reset_error();
                },
                Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => break,
                Err(error) => {
                    eprintln!("{error}");
                    break;
                },
            }
        }

        if let Some(history) = &history {
            let _ = editor.save_history(history);
        }
    }

    /// Runs the source through the whole pipeline.
    /// Each phase only runs if the previous ones reported no error. Returns
    /// whether a static and whether a runtime error was reported.
    pub fn run(&mut self, source: &str) -> (bool, bool) {
        let mut scanner = Scanner::new(source);
        let tokens = scanner.scan_tokens();

        if error::did_error() {
            return (error::did_static_error(), error::did_runtime_error());
        }

        let mut parser = Parser::new(tokens);
        let statements = parser.parse();

        if error::did_error() {
            return (error::did_static_error(), error::did_runtime_error());
        }

        // Ids restart at zero on every parse, so depths recorded by a
        // previous run must not survive into this one.
        self.interpreter.reset_locals();

        let mut resolver = Resolver::new(&mut self.interpreter);
        resolver.resolve(&statements);

        if error::did_error() {
            return (error::did_static_error(), error::did_runtime_error());
        }

        self.interpreter.interpret(&statements);

        (error::did_static_error(), error::did_runtime_error())
    }
}
