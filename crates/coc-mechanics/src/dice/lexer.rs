//! Tokenizer for dice notation.

use logos::Logos;
use std::fmt;

/// A dice-notation token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Token {
    /// Non-negative integer literal.
    Number(u64),
    /// The `d` between count and sides.
    Dice,
    /// `kh` keep-highest suffix.
    KeepHighest,
    /// `kl` keep-lowest suffix.
    KeepLowest,
    /// `+`.
    Plus,
    /// `-`.
    Minus,
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Number(n) => write!(f, "{n}"),
            Token::Dice => write!(f, "d"),
            Token::KeepHighest => write!(f, "kh"),
            Token::KeepLowest => write!(f, "kl"),
            Token::Plus => write!(f, "+"),
            Token::Minus => write!(f, "-"),
        }
    }
}

#[derive(Logos, Debug)]
#[logos(skip r"[ \t\r\n]+")]
enum RawToken {
    #[regex(r"[0-9]+")]
    Number,

    #[token("d")]
    Dice,

    #[token("kh")]
    KeepHighest,

    #[token("kl")]
    KeepLowest,

    #[token("+")]
    Plus,

    #[token("-")]
    Minus,
}

/// A lexer error with source location.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LexError {
    /// Byte range of the offending input.
    pub span: std::ops::Range<usize>,
    /// Human-readable description.
    pub message: String,
}

/// Lex lower-cased dice notation into tokens.
///
/// Stops at the first unexpected character; dice notation is short and a
/// partial token stream is of no use to the caller.
pub fn lex(source: &str) -> Result<Vec<Token>, LexError> {
    let mut tokens = Vec::new();
    let mut lexer = RawToken::lexer(source);

    while let Some(result) = lexer.next() {
        let span = lexer.span();
        let token = match result {
            Ok(RawToken::Number) => {
                let raw = lexer.slice();
                let n = raw.parse::<u64>().map_err(|_| LexError {
                    span: span.clone(),
                    message: format!("number too large: {raw}"),
                })?;
                Token::Number(n)
            }
            Ok(RawToken::Dice) => Token::Dice,
            Ok(RawToken::KeepHighest) => Token::KeepHighest,
            Ok(RawToken::KeepLowest) => Token::KeepLowest,
            Ok(RawToken::Plus) => Token::Plus,
            Ok(RawToken::Minus) => Token::Minus,
            Err(()) => {
                return Err(LexError {
                    span: span.clone(),
                    message: format!("unexpected character '{}'", &source[span]),
                });
            }
        };
        tokens.push(token);
    }

    Ok(tokens)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lex_keep_lowest_with_modifier() {
        let tokens = lex("3d10kl1 - 1").unwrap();
        assert_eq!(
            tokens,
            vec![
                Token::Number(3),
                Token::Dice,
                Token::Number(10),
                Token::KeepLowest,
                Token::Number(1),
                Token::Minus,
                Token::Number(1),
            ]
        );
    }

    #[test]
    fn lex_bare_die() {
        assert_eq!(lex("d6").unwrap(), vec![Token::Dice, Token::Number(6)]);
    }

    #[test]
    fn lex_skips_whitespace() {
        assert_eq!(lex("  12 ").unwrap(), vec![Token::Number(12)]);
        assert!(lex("").unwrap().is_empty());
    }

    #[test]
    fn lex_rejects_unknown_characters() {
        let err = lex("2d6*2").unwrap_err();
        assert_eq!(err.span, 3..4);
        assert!(err.message.contains("'*'"));
        assert!(lex("for the glory").is_err());
    }

    #[test]
    fn lex_rejects_huge_numbers() {
        let err = lex("99999999999999999999999").unwrap_err();
        assert!(err.message.contains("too large"));
    }

    #[test]
    fn token_display() {
        assert_eq!(Token::KeepHighest.to_string(), "kh");
        assert_eq!(Token::Number(4).to_string(), "4");
    }
}
