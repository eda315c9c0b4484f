use lazy_static::lazy_static;
use regex::Regex;
use tracing::trace;

use crate::{config::Grammar, error::EvalError, op::Operator};

lazy_static! {
    // ASCII digits only, no sign, at most one fractional part.
    static ref SPACED_NUMBER: Regex = Regex::new(r"^[0-9]+(\.[0-9]+)?$").unwrap();
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Token<'a> {
    pub slice: &'a str,
    pub offset: usize,
    pub kind: TokenKind,
}

impl<'a> std::fmt::Display for Token<'a> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.slice)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TokenKind {
    Number(f64),
    LeftParen,
    RightParen,
    Plus,
    Minus,
    Star,
    Times,
    Slash,
    Percent,
}

impl TokenKind {
    /// The operator this token denotes, if any.
    pub fn operator(self) -> Option<Operator> {
        match self {
            TokenKind::Plus => Some(Operator::Add),
            TokenKind::Minus => Some(Operator::Subtract),
            TokenKind::Star | TokenKind::Times => Some(Operator::Multiply),
            TokenKind::Slash => Some(Operator::Divide),
            TokenKind::Percent => Some(Operator::Modulo),
            TokenKind::Number(_) | TokenKind::LeftParen | TokenKind::RightParen => None,
        }
    }
}

/// Splits an expression into tokens according to a [`Grammar`].
///
/// Input the grammar has no use for is skipped rather than rejected, the same
/// way the keypad front ends always treated it. The only lexing error is a
/// malformed number in [`Grammar::Compact`].
#[derive(Debug)]
pub struct Lexer<'a> {
    rest: &'a str,
    byte: usize,
    grammar: Grammar,
}

impl<'a> Lexer<'a> {
    pub fn new(input: &'a str, grammar: Grammar) -> Self {
        Self {
            rest: input,
            byte: 0,
            grammar,
        }
    }

    fn advance(&mut self, len: usize) {
        self.byte += len;
        self.rest = &self.rest[len..];
    }

    fn next_spaced(&mut self) -> Option<Token<'a>> {
        loop {
            let start = self.rest.find(|c: char| !c.is_whitespace())?;
            self.advance(start);

            let end = self
                .rest
                .find(char::is_whitespace)
                .unwrap_or(self.rest.len());
            let word = &self.rest[..end];
            let offset = self.byte;
            self.advance(end);

            let kind = match word {
                "+" => TokenKind::Plus,
                "-" => TokenKind::Minus,
                "*" => TokenKind::Star,
                "/" => TokenKind::Slash,
                _ if SPACED_NUMBER.is_match(word) => match word.parse::<f64>() {
                    Ok(n) => TokenKind::Number(n),
                    Err(_) => continue,
                },
                _ => {
                    trace!(word, offset, "skipping unrecognized token");
                    continue;
                }
            };

            return Some(Token {
                slice: word,
                offset,
                kind,
            });
        }
    }

    fn next_compact(&mut self) -> Option<Result<Token<'a>, EvalError>> {
        loop {
            let c = self.rest.chars().next()?;
            let offset = self.byte;
            let c_onwards = self.rest;
            let slice = &c_onwards[..c.len_utf8()];

            let make_token = |kind: TokenKind| {
                Some(Ok(Token {
                    slice,
                    offset,
                    kind,
                }))
            };

            let kind = match c {
                '(' => TokenKind::LeftParen,
                ')' => TokenKind::RightParen,
                '+' => TokenKind::Plus,
                '-' => TokenKind::Minus,
                'x' => TokenKind::Times,
                '*' => TokenKind::Star,
                '/' => TokenKind::Slash,
                '%' => TokenKind::Percent,
                '0'..='9' | '.' => {
                    let end = c_onwards
                        .find(|c: char| !matches!(c, '0'..='9' | '.'))
                        .unwrap_or(c_onwards.len());
                    let literal = &c_onwards[..end];
                    self.advance(end);

                    return match literal.parse::<f64>() {
                        Ok(n) => Some(Ok(Token {
                            slice: literal,
                            offset,
                            kind: TokenKind::Number(n),
                        })),
                        Err(_) => Some(Err(EvalError::MalformedNumber {
                            literal: literal.to_string(),
                            span: (offset, literal.len()).into(),
                        })),
                    };
                }
                c => {
                    if !c.is_whitespace() {
                        trace!(%c, offset, "skipping unrecognized character");
                    }
                    self.advance(c.len_utf8());
                    continue;
                }
            };

            self.advance(c.len_utf8());
            return make_token(kind);
        }
    }
}

impl<'a> Iterator for Lexer<'a> {
    type Item = Result<Token<'a>, EvalError>;

    fn next(&mut self) -> Option<Self::Item> {
        match self.grammar {
            Grammar::Spaced => self.next_spaced().map(Ok),
            Grammar::Compact => self.next_compact(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(input: &str, grammar: Grammar) -> Vec<TokenKind> {
        Lexer::new(input, grammar)
            .map(|token| token.unwrap().kind)
            .collect()
    }

    #[test]
    fn test_spaced_tokens() {
        let input = "3 + 4.5 * 2";
        let mut lexer = Lexer::new(input, Grammar::Spaced);

        let expected_tokens = vec![
            Token {
                slice: "3",
                offset: 0,
                kind: TokenKind::Number(3.0),
            },
            Token {
                slice: "+",
                offset: 2,
                kind: TokenKind::Plus,
            },
            Token {
                slice: "4.5",
                offset: 4,
                kind: TokenKind::Number(4.5),
            },
            Token {
                slice: "*",
                offset: 8,
                kind: TokenKind::Star,
            },
            Token {
                slice: "2",
                offset: 10,
                kind: TokenKind::Number(2.0),
            },
        ];

        for expected_token in expected_tokens.into_iter() {
            assert_eq!(lexer.next().unwrap().unwrap(), expected_token);
        }
        assert!(lexer.next().is_none());
    }

    #[test]
    fn test_spaced_skips_unrecognized_words() {
        // Signed numbers, trailing dots, `%` and parentheses are not part of
        // the spaced grammar.
        assert_eq!(
            kinds("-5 + 5. % ( 2 )", Grammar::Spaced),
            vec![TokenKind::Plus, TokenKind::Number(2.0)]
        );
    }

    #[test]
    fn test_spaced_multiple_spaces() {
        assert_eq!(
            kinds("  1   -\t2 ", Grammar::Spaced),
            vec![TokenKind::Number(1.0), TokenKind::Minus, TokenKind::Number(2.0)]
        );
    }

    #[test]
    fn test_spaced_rejects_non_ascii_digits() {
        assert!(kinds("٣ + 1", Grammar::Spaced)
            .iter()
            .all(|kind| *kind != TokenKind::Number(3.0)));
    }

    #[test]
    fn test_compact_tokens() {
        let input = "(3+4)x2";
        let mut lexer = Lexer::new(input, Grammar::Compact);

        let expected_tokens = vec![
            Token {
                slice: "(",
                offset: 0,
                kind: TokenKind::LeftParen,
            },
            Token {
                slice: "3",
                offset: 1,
                kind: TokenKind::Number(3.0),
            },
            Token {
                slice: "+",
                offset: 2,
                kind: TokenKind::Plus,
            },
            Token {
                slice: "4",
                offset: 3,
                kind: TokenKind::Number(4.0),
            },
            Token {
                slice: ")",
                offset: 4,
                kind: TokenKind::RightParen,
            },
            Token {
                slice: "x",
                offset: 5,
                kind: TokenKind::Times,
            },
            Token {
                slice: "2",
                offset: 6,
                kind: TokenKind::Number(2.0),
            },
        ];

        for expected_token in expected_tokens.into_iter() {
            assert_eq!(lexer.next().unwrap().unwrap(), expected_token);
        }
        assert!(lexer.next().is_none());
    }

    #[test]
    fn test_compact_skips_spaces_and_stray_characters() {
        assert_eq!(
            kinds("12 % 5 ^ .5", Grammar::Compact),
            vec![
                TokenKind::Number(12.0),
                TokenKind::Percent,
                TokenKind::Number(5.0),
                TokenKind::Number(0.5),
            ]
        );
    }

    #[test]
    fn test_compact_number_offsets() {
        let tokens: Vec<_> = Lexer::new("10.25/π3", Grammar::Compact)
            .map(Result::unwrap)
            .collect();

        assert_eq!(tokens[0].slice, "10.25");
        assert_eq!(tokens[1].offset, 5);
        assert_eq!(tokens[2].slice, "3");
        assert_eq!(tokens[2].offset, 6 + 'π'.len_utf8());
    }

    #[test]
    fn test_compact_malformed_number() {
        let mut lexer = Lexer::new("1+1.2.3", Grammar::Compact);
        lexer.next();
        lexer.next();

        assert_eq!(
            lexer.next(),
            Some(Err(EvalError::MalformedNumber {
                literal: "1.2.3".to_string(),
                span: (2, 5).into(),
            }))
        );
        assert!(lexer.next().is_none());
    }

    #[test]
    fn test_lone_dot_is_malformed() {
        let result: Result<Vec<_>, _> = Lexer::new(".", Grammar::Compact).collect();
        assert!(matches!(result, Err(EvalError::MalformedNumber { .. })));
    }

    #[test]
    fn test_operator_mapping() {
        assert_eq!(TokenKind::Times.operator(), Some(Operator::Multiply));
        assert_eq!(TokenKind::Star.operator(), Some(Operator::Multiply));
        assert_eq!(TokenKind::Percent.operator(), Some(Operator::Modulo));
        assert_eq!(TokenKind::LeftParen.operator(), None);
        assert_eq!(TokenKind::Number(1.0).operator(), None);
    }
}
