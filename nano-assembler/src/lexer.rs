//! # Lexer and line preparation for Nano assembly
//!
//! Source is normalized one line at a time before parsing: comments are
//! dropped, commas and whitespace separate words, and everything is lowercased.
//! Blank and comment-only lines are kept as empty placeholders so that the
//! index of a prepared line is always its source line number minus one.

use logos::Logos;

/// Tokens of a single source line
#[derive(Logos, Debug, Clone, PartialEq)]
#[logos(skip r"[ \t\r\n\f]+")] // Skip whitespace
#[logos(skip r";[^\n]*")] // Skip comments
pub enum Token<'src> {
    /// Mnemonic or operand (`mov`, `reg0`, `@reg1`, `0x10`, `-5`)
    #[regex(r"[^ \t\r\n\f,;]+", |lex| lex.slice())]
    Word(&'src str),

    /// Decorative operand separator
    #[token(",")]
    Comma,
}

/// Words of a line, with comments and separators removed
pub fn words(line: &str) -> Vec<&str> {
    let mut lex = Token::lexer(line);
    let mut out = Vec::new();
    while let Some(token) = lex.next() {
        match token {
            Ok(Token::Word(word)) => out.push(word),
            Ok(Token::Comma) => {}
            // every byte is covered by a rule, keep the text if that ever changes
            Err(()) => out.push(lex.slice()),
        }
    }
    out
}

/// Normalize one source line
pub fn prepare_line(line: &str) -> String {
    words(line)
        .iter()
        .map(|w| w.to_lowercase())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Normalize a whole source file, one entry per source line
pub fn prepare_lines(source: &str) -> Vec<String> {
    source.lines().map(prepare_line).collect()
}
