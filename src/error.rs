use std::sync::atomic::{AtomicBool, Ordering};

use crate::object::Object;
use crate::token::{Token, Type};

static HAD_ERROR: AtomicBool = AtomicBool::new(false);
static HAD_RUNTIME_ERROR: AtomicBool = AtomicBool::new(false);

/// Checks if an error occurred during scanning, parsing, resolving or interpreting.
pub fn did_error() -> bool {
    did_static_error() || did_runtime_error()
}

/// Checks if an error occurred before the program was run.
pub fn did_static_error() -> bool {
    HAD_ERROR.load(Ordering::Relaxed)
}

/// Checks if an error occurred during runtime.
pub fn did_runtime_error() -> bool {
    HAD_RUNTIME_ERROR.load(Ordering::Relaxed)
}

/// Resets the error flags.
/// This is used to reset the interpreter between lines when running prompts.
pub fn reset_error() {
    HAD_ERROR.store(false, Ordering::Relaxed);
    HAD_RUNTIME_ERROR.store(false, Ordering::Relaxed);
}

/// Every error type must implement this trait.
pub trait Error {
    /// Prints the error message and sets the matching error flag.
    fn throw(&self);
}

/// Represents an error that occurs during scanning.
#[derive(Debug)]
pub struct ScanError {
    pub line: usize,
    pub message: String,
}

impl Error for ScanError {
    fn throw(&self) {
        eprintln!("[line {line}] Error: {message}", line = self.line, message = self.message);

        HAD_ERROR.store(true, Ordering::Relaxed);
    }
}

/// Represents an error that occurs during parsing.
#[derive(Debug)]
pub struct ParseError {
    pub token: Token,
    pub message: String,
}

impl Error for ParseError {
    fn throw(&self) {
        if self.token.r#type == Type::EOF {
            eprintln!(
                "[line {line}] Error at end: {message}",
                line = self.token.line,
                message = self.message
            );
        } else {
            eprintln!(
                "[line {line}] Error at '{lexeme}': {message}",
                line = self.token.line,
                lexeme = self.token.lexeme,
                message = self.message
            );
        }

        HAD_ERROR.store(true, Ordering::Relaxed);
    }
}

/// Represents an error that occurs during resolution.
#[derive(Debug)]
pub struct ResolveError {
    pub token: Token,
    pub message: String,
}

impl Error for ResolveError {
    fn throw(&self) {
        eprintln!(
            "[line {line}] Error at '{lexeme}': {message}",
            line = self.token.line,
            lexeme = self.token.lexeme,
            message = self.message
        );

        HAD_ERROR.store(true, Ordering::Relaxed);
    }
}

/// Represents an error that occurs during runtime.
#[derive(Debug)]
pub struct RuntimeError {
    pub token: Token,
    pub message: String,
}

impl Error for RuntimeError {
    fn throw(&self) {
        eprintln!("{message}\n[line {line}]", message = self.message, line = self.token.line);

        HAD_RUNTIME_ERROR.store(true, Ordering::Relaxed);
    }
}

/// Unwinds the interpreter's execution stack.
/// A `return` statement is not an error. It is propagated alongside runtime
/// errors so that both travel up through `?` and the nearest function call
/// can catch the returned value while real errors keep going.
#[derive(Debug)]
pub enum Unwind {
    Error(RuntimeError),
    Return(Object),
}

impl From<RuntimeError> for Unwind {
    fn from(error: RuntimeError) -> Self {
        Unwind::Error(error)
    }
}
