use std::str::Chars;

use peekmore::{PeekMore, PeekMoreIterator};
use substring::Substring;

use crate::error::{Error, ScanError};
use crate::literal::Literal;
use crate::token::{Token, Type};

pub struct Scanner<'a> {
    source: &'a str,
    chars: PeekMoreIterator<Chars<'a>>,
    tokens: Vec<Token>,
    start: usize,
    current: usize,
    line: usize,
}

impl<'a> Scanner<'a> {
    /// Creates a new scanner.
    pub fn new(source: &'a str) -> Scanner<'a> {
        Scanner {
            source,
            chars: source.chars().peekmore(),
            tokens: vec!(),
            start: 0,
            current: 0,
            line: 1,
        }
    }

    /// Scans the source code and returns a vector of tokens.
    /// The last token is always EOF.
    pub fn scan_tokens(&mut self) -> Vec<Token> {
        while !self.is_at_end() {
            self.start = self.current;
            self.scan_token();
        }

        self.tokens.push(Token::new(Type::EOF, String::from(""), None, self.line));

        self.tokens.clone()
    }

    /// Consumes and returns the next character.
    fn advance(&mut self) -> char {
        match self.chars.next() {
            Some(char) => {
                self.current += 1;
                char
            },
            None => '\0',
        }
    }

    /// Returns the next character without consuming it.
    fn peek(&mut self) -> char {
        self.chars.reset_cursor();
        self.chars.peek().copied().unwrap_or('\0')
    }

    /// Returns the next next character without consuming it.
    fn peek_next(&mut self) -> char {
        self.chars.reset_cursor();
        let char = self.chars.peek_next().copied().unwrap_or('\0');
        self.chars.reset_cursor();
        char
    }

    /// Returns if the character after the next one is the expected character.
    fn match_next(&mut self, expected: char) -> bool {
        self.peek_next() == expected
    }

    /// Returns if the scanner has reached the end of the file.
    fn is_at_end(&mut self) -> bool {
        self.chars.reset_cursor();
        self.chars.peek().is_none()
    }

    /// Adds a new token spanning `start..current` to the list of tokens.
    fn add_token(&mut self, r#type: Type, literal: Option<Literal>) {
        let lexeme = self.source.substring(self.start, self.current).to_string();
        self.tokens.push(Token::new(r#type, lexeme, literal, self.line));
    }

    /// Adds a new single char token to the list of tokens.
    fn add_single_char_token(&mut self, r#type: Type) {
        self.advance();
        self.add_token(r#type, None);
    }

    /// Adds a new double char token to the list of tokens.
    fn add_double_char_token(&mut self, r#type: Type) {
        self.advance();
        self.advance();
        self.add_token(r#type, None);
    }

    /// Handles a string literal.
    fn string(&mut self) {
        self.advance(); // Move past the starting double quote.

        while !self.is_at_end() && self.peek() != '"' {
            // Strings can span multiple lines.
            if self.peek() == '\n' {
                self.line += 1;
            }
            self.advance();
        }

        if self.is_at_end() {
            ScanError {
                line: self.line,
                message: String::from("Unterminated string."),
            }.throw();
            return;
        }

        self.advance(); // Move past the closing double quote.

        // The literal does not include the double quotes unlike the lexeme.
        let value = self.source.substring(self.start + 1, self.current - 1).to_string();
        self.add_token(Type::String, Some(Literal::String(value)));
    }

    /// Handles a number literal.
    fn number(&mut self) {
        while self.peek().is_ascii_digit() {
            self.advance();
        }

        // A trailing dot is not part of the number.
        if self.peek() == '.' && self.peek_next().is_ascii_digit() {
            self.advance(); // Consume the dot.

            while self.peek().is_ascii_digit() {
                self.advance();
            }
        }

        let value = self.source.substring(self.start, self.current);
        let number: f64 = value.parse().expect("scanned number to be parseable");

        self.add_token(Type::Number, Some(Literal::Number(number)));
    }

    /// Handles an identifier or a keyword.
    fn identifier(&mut self) {
        while self.peek().is_ascii_alphanumeric() || self.peek() == '_' {
            self.advance();
        }

        let value = self.source.substring(self.start, self.current);
        let token_type = match value {
            "and"      => Type::And,
            "class"    => Type::Class,
            "else"     => Type::Else,
            "false"    => Type::False,
            "for"      => Type::For,
            "fun"      => Type::Fun,
            "if"       => Type::If,
            "nil"      => Type::Nil,
            "or"       => Type::Or,
            "print"    => Type::Print,
            "return"   => Type::Return,
            "super"    => Type::Super,
            "this"     => Type::This,
            "true"     => Type::True,
            "var"      => Type::Var,
            "while"    => Type::While,
            _          => Type::Identifier,
        };

        self.add_token(token_type, None);
    }

    /// Scans the next token.
    fn scan_token(&mut self) {
        let c = self.peek();
        match c {
            // One character tokens
            '(' => self.add_single_char_token(Type::LeftParen),
            ')' => self.add_single_char_token(Type::RightParen),
            '{' => self.add_single_char_token(Type::LeftBrace),
            '}' => self.add_single_char_token(Type::RightBrace),
            ',' => self.add_single_char_token(Type::Comma),
            '.' => self.add_single_char_token(Type::Dot),
            '-' => self.add_single_char_token(Type::Minus),
            '+' => self.add_single_char_token(Type::Plus),
            ';' => self.add_single_char_token(Type::Semicolon),
            '*' => self.add_single_char_token(Type::Star),

            // Two character tokens
            '!' => {
                if self.match_next('=') {
                    self.add_double_char_token(Type::BangEqual);
                } else {
                    self.add_single_char_token(Type::Bang)
                };
            },
            '=' => {
                if self.match_next('=') {
                    self.add_double_char_token(Type::EqualEqual);
                } else {
                    self.add_single_char_token(Type::Equal)
                };
            },
            '<' => {
                if self.match_next('=') {
                    self.add_double_char_token(Type::LessEqual);
                } else {
                    self.add_single_char_token(Type::Less)
                };
            },
            '>' => {
                if self.match_next('=') {
                    self.add_double_char_token(Type::GreaterEqual);
                } else {
                    self.add_single_char_token(Type::Greater)
                };
            },
            '/' => {
                if self.match_next('/') {
                    // A comment runs until the end of the line.
                    while self.peek() != '\n' && !self.is_at_end() {
                        self.advance();
                    }
                } else {
                    self.add_single_char_token(Type::Slash);
                }
            },

            // Ignore whitespace
            ' ' | '\r' | '\t' => {
                self.advance();
            },

            // Update line counter
            '\n' => {
                self.advance();
                self.line += 1;
            },

            // String
            '"' => self.string(),

            // Numbers
            c if c.is_ascii_digit() => self.number(),

            // Identifiers
            c if c.is_ascii_alphabetic() || c == '_' => self.identifier(),

            _ => {
                self.advance();

                ScanError {
                    line: self.line,
                    message: String::from("Unexpected character."),
                }.throw();
            },
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn types(source: &str) -> Vec<Type> {
        Scanner::new(source).scan_tokens().iter().map(|token| token.r#type).collect()
    }

    #[test]
    fn ends_with_eof() {
        assert_eq!(types(""), vec![Type::EOF]);
        assert_eq!(types("   \t\r\n"), vec![Type::EOF]);
    }

    #[test]
    fn single_and_double_char_tokens() {
        assert_eq!(
            types("( ) { } , . - + ; * / ! != = == < <= > >="),
            vec![
                Type::LeftParen, Type::RightParen, Type::LeftBrace, Type::RightBrace,
                Type::Comma, Type::Dot, Type::Minus, Type::Plus, Type::Semicolon,
                Type::Star, Type::Slash, Type::Bang, Type::BangEqual, Type::Equal,
                Type::EqualEqual, Type::Less, Type::LessEqual, Type::Greater,
                Type::GreaterEqual, Type::EOF,
            ]
        );
    }

    #[test]
    fn keywords_and_identifiers() {
        assert_eq!(
            types("var x = nil; fun _f1() {}"),
            vec![
                Type::Var, Type::Identifier, Type::Equal, Type::Nil, Type::Semicolon,
                Type::Fun, Type::Identifier, Type::LeftParen, Type::RightParen,
                Type::LeftBrace, Type::RightBrace, Type::EOF,
            ]
        );
    }

    #[test]
    fn number_literals() {
        let tokens = Scanner::new("12 3.5").scan_tokens();
        assert_eq!(tokens[0].literal, Some(Literal::Number(12.0)));
        assert_eq!(tokens[1].literal, Some(Literal::Number(3.5)));
    }

    #[test]
    fn trailing_dot_is_not_consumed() {
        let tokens = Scanner::new("123.").scan_tokens();
        assert_eq!(tokens[0].r#type, Type::Number);
        assert_eq!(tokens[0].lexeme, "123");
        assert_eq!(tokens[1].r#type, Type::Dot);
    }

    #[test]
    fn string_literal_trims_quotes() {
        let tokens = Scanner::new("\"hello\"").scan_tokens();
        assert_eq!(tokens[0].lexeme, "\"hello\"");
        assert_eq!(tokens[0].literal, Some(Literal::String(String::from("hello"))));
    }

    #[test]
    fn multiline_string_advances_line() {
        let tokens = Scanner::new("\"a\nb\"\nvar").scan_tokens();
        assert_eq!(tokens[0].literal, Some(Literal::String(String::from("a\nb"))));
        assert_eq!(tokens[1].line, 3);
    }

    #[test]
    fn comments_are_skipped() {
        assert_eq!(types("// nothing to see\n1"), vec![Type::Number, Type::EOF]);
        assert_eq!(types("// no newline either"), vec![Type::EOF]);
    }

    #[test]
    fn lexemes_reconstruct_source() {
        let source = "var answer=40+2;";
        let tokens = Scanner::new(source).scan_tokens();
        let reconstructed: String = tokens.iter().map(|token| token.lexeme.as_str()).collect::<Vec<_>>().join(" ");
        assert_eq!(reconstructed, "var answer = 40 + 2 ; ");
    }
}
