//! Line tokenizer for the manifest DSL.
//!
//! Splits one manifest line into tokens: bare words (`gem`, `do`,
//! `end`, `false`), quoted strings, `:symbol` atoms, `key:` option
//! heads, commas, and hash rockets. `#` starts a comment outside
//! quotes.

use thiserror::Error;

/// One lexical token of a manifest line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    /// Bare identifier or keyword (`gem`, `group`, `do`, `end`, `false`)
    Word(String),
    /// Single- or double-quoted string literal
    Str(String),
    /// `:symbol` atom
    Symbol(String),
    /// `key:` option head
    Key(String),
    Comma,
    /// `=>` in hash-rocket option syntax
    Arrow,
}

/// Tokenizer errors; these make the whole line unparseable
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LexError {
    #[error("unterminated string literal")]
    UnterminatedString,

    #[error("unexpected character '{0}'")]
    UnexpectedChar(char),
}

fn is_word_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_' || c == '-' || c == '.' || c == '/'
}

/// Tokenize one line. Comments are stripped; an empty token list means
/// the line was blank or comment-only.
pub fn lex_line(line: &str) -> Result<Vec<Token>, LexError> {
    let mut tokens = Vec::new();
    let mut chars = line.chars().peekable();

    while let Some(&c) = chars.peek() {
        match c {
            ' ' | '\t' | '\r' => {
                chars.next();
            },
            '#' => break,
            ',' => {
                chars.next();
                tokens.push(Token::Comma);
            },
            '\'' | '"' => {
                let quote = c;
                chars.next();
                let mut value = String::new();
                loop {
                    match chars.next() {
                        Some(ch) if ch == quote => break,
                        Some(ch) => value.push(ch),
                        None => return Err(LexError::UnterminatedString),
                    }
                }
                tokens.push(Token::Str(value));
            },
            ':' => {
                chars.next();
                let mut name = String::new();
                while let Some(&ch) = chars.peek() {
                    if is_word_char(ch) {
                        name.push(ch);
                        chars.next();
                    } else {
                        break;
                    }
                }
                if name.is_empty() {
                    return Err(LexError::UnexpectedChar(':'));
                }
                tokens.push(Token::Symbol(name));
            },
            '=' => {
                chars.next();
                if chars.peek() == Some(&'>') {
                    chars.next();
                    tokens.push(Token::Arrow);
                } else {
                    return Err(LexError::UnexpectedChar('='));
                }
            },
            c if is_word_char(c) => {
                let mut word = String::new();
                while let Some(&ch) = chars.peek() {
                    if is_word_char(ch) {
                        word.push(ch);
                        chars.next();
                    } else {
                        break;
                    }
                }
                // `key:` option head vs bare word
                if chars.peek() == Some(&':') {
                    chars.next();
                    tokens.push(Token::Key(word));
                } else {
                    tokens.push(Token::Word(word));
                }
            },
            other => return Err(LexError::UnexpectedChar(other)),
        }
    }

    Ok(tokens)
}
