//! Dice-notation expressions: `NdM`, keep-highest/lowest, `+`/`-`.
//!
//! Grammar:
//!
//! ```text
//! expr := term (('+' | '-') term)*
//! term := INT | INT? 'd' INT (('kh' | 'kl') INT)?
//! ```
//!
//! Parsing and evaluating are separate steps. [`DiceExpr::parse`] is the
//! only validity check; callers that need the same draw twice keep the
//! [`DiceTotal`] instead of evaluating again.

use std::str::FromStr;

use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};

use super::lexer::{Token, lex};
use super::{DicePool, Die};
use crate::error::{MechError, MechResult};

/// Most dice a single term may roll.
pub const MAX_DICE: u32 = 100;
/// Most sides a die may have.
pub const MAX_SIDES: u32 = 1000;
/// Largest integer literal accepted as a constant term.
pub const MAX_CONSTANT: u64 = 1_000_000;

/// Which dice of a term count towards its value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Keep {
    /// Keep the `n` highest dice.
    Highest(u32),
    /// Keep the `n` lowest dice.
    Lowest(u32),
}

/// Whether a term is added or subtracted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Sign {
    Plus,
    Minus,
}

impl Sign {
    fn apply(self, value: i64) -> i64 {
        match self {
            Self::Plus => value,
            Self::Minus => -value,
        }
    }
}

/// One operand of an expression.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Term {
    /// A bare integer.
    Constant(u32),
    /// `count` dice of one type, optionally keeping a subset.
    Dice {
        count: u32,
        die: Die,
        keep: Option<Keep>,
    },
}

/// A parsed dice expression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiceExpr {
    source: String,
    terms: Vec<(Sign, Term)>,
}

/// The evaluated value of one term.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TermRoll {
    pub sign: Sign,
    /// Every die rolled, in roll order. Empty for constants.
    pub rolls: Vec<u32>,
    /// The dice that counted.
    pub kept: Vec<u32>,
    /// Unsigned value of the term.
    pub value: i64,
}

/// The outcome of evaluating a [`DiceExpr`] once.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiceTotal {
    pub total: i64,
    pub terms: Vec<TermRoll>,
}

impl DiceExpr {
    /// Parse dice notation. Case-insensitive; whitespace is ignored.
    pub fn parse(source: &str) -> MechResult<Self> {
        let invalid = || MechError::InvalidExpression(source.trim().to_string());
        let normalized = source.trim().to_lowercase();
        let tokens = lex(&normalized).map_err(|_| invalid())?;
        let terms = TokenParser::new(&tokens)
            .parse_expr()
            .ok_or_else(invalid)?;
        Ok(Self {
            source: source.trim().to_string(),
            terms,
        })
    }

    /// The signed terms of this expression.
    pub fn terms(&self) -> &[(Sign, Term)] {
        &self.terms
    }

    /// Roll every dice term and sum the result.
    pub fn evaluate(&self, rng: &mut StdRng) -> DiceTotal {
        let terms: Vec<TermRoll> = self
            .terms
            .iter()
            .map(|(sign, term)| roll_term(*sign, term, rng))
            .collect();
        let total = terms.iter().map(|t| t.sign.apply(t.value)).sum();
        DiceTotal { total, terms }
    }

    /// True when no term involves dice.
    pub fn is_constant(&self) -> bool {
        self.terms
            .iter()
            .all(|(_, term)| matches!(term, Term::Constant(_)))
    }
}

impl FromStr for DiceExpr {
    type Err = MechError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl std::fmt::Display for DiceExpr {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.source)
    }
}

impl std::fmt::Display for DiceTotal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (i, term) in self.terms.iter().enumerate() {
            match (i, term.sign) {
                (0, Sign::Plus) => {}
                (0, Sign::Minus) => write!(f, "-")?,
                (_, Sign::Plus) => write!(f, " + ")?,
                (_, Sign::Minus) => write!(f, " - ")?,
            }
            if term.rolls.is_empty() {
                write!(f, "{}", term.value)?;
            } else {
                write!(f, "[{}]", mark_dropped(&term.rolls, &term.kept).join(", "))?;
            }
        }
        write!(f, " = {}", self.total)
    }
}

/// Show rolls in order, with dice that did not count in parentheses.
fn mark_dropped(rolls: &[u32], kept: &[u32]) -> Vec<String> {
    let mut remaining = kept.to_vec();
    rolls
        .iter()
        .map(|roll| match remaining.iter().position(|k| k == roll) {
            Some(idx) => {
                remaining.swap_remove(idx);
                roll.to_string()
            }
            None => format!("({roll})"),
        })
        .collect()
}

fn roll_term(sign: Sign, term: &Term, rng: &mut StdRng) -> TermRoll {
    match *term {
        Term::Constant(n) => TermRoll {
            sign,
            rolls: Vec::new(),
            kept: Vec::new(),
            value: i64::from(n),
        },
        Term::Dice { count, die, keep } => {
            let result = DicePool::new().add(die, count).roll(rng);
            let kept = match keep {
                Some(Keep::Highest(n)) => result.keep_highest(n as usize),
                Some(Keep::Lowest(n)) => result.keep_lowest(n as usize),
                None => result.values(),
            };
            TermRoll {
                sign,
                value: kept.iter().map(|v| i64::from(*v)).sum(),
                rolls: result.values(),
                kept,
            }
        }
    }
}

/// Recursive-descent parser over the token stream.
struct TokenParser<'a> {
    tokens: &'a [Token],
    pos: usize,
}

impl<'a> TokenParser<'a> {
    fn new(tokens: &'a [Token]) -> Self {
        Self { tokens, pos: 0 }
    }

    fn peek(&self) -> Option<Token> {
        self.tokens.get(self.pos).copied()
    }

    fn next(&mut self) -> Option<Token> {
        let token = self.peek()?;
        self.pos += 1;
        Some(token)
    }

    fn parse_expr(&mut self) -> Option<Vec<(Sign, Term)>> {
        let mut terms = vec![(Sign::Plus, self.parse_term()?)];
        while let Some(token) = self.next() {
            let sign = match token {
                Token::Plus => Sign::Plus,
                Token::Minus => Sign::Minus,
                _ => return None,
            };
            terms.push((sign, self.parse_term()?));
        }
        Some(terms)
    }

    fn parse_term(&mut self) -> Option<Term> {
        match self.next()? {
            Token::Number(n) if self.peek() == Some(Token::Dice) => {
                self.next();
                self.parse_dice(n)
            }
            Token::Number(n) if n <= MAX_CONSTANT => Some(Term::Constant(n as u32)),
            Token::Dice => self.parse_dice(1),
            _ => None,
        }
    }

    /// Parse the remainder of a dice term after its `d`.
    fn parse_dice(&mut self, count: u64) -> Option<Term> {
        let sides = self.number()?;
        if !(1..=u64::from(MAX_DICE)).contains(&count) || !(1..=u64::from(MAX_SIDES)).contains(&sides)
        {
            return None;
        }
        let count = count as u32;
        let die = Die::from_sides(sides as u32)?;

        let keep = match self.peek() {
            Some(Token::KeepHighest) => {
                self.next();
                Some(Keep::Highest(self.keep_count(count)?))
            }
            Some(Token::KeepLowest) => {
                self.next();
                Some(Keep::Lowest(self.keep_count(count)?))
            }
            _ => None,
        };
        Some(Term::Dice { count, die, keep })
    }

    fn keep_count(&mut self, count: u32) -> Option<u32> {
        let n = self.number()?;
        (1..=u64::from(count)).contains(&n).then_some(n as u32)
    }

    fn number(&mut self) -> Option<u64> {
        match self.next()? {
            Token::Number(n) => Some(n),
            _ => None,
        }
    }
}

/// Parse and evaluate in one step.
pub fn evaluate_dice(expr: &str, rng: &mut StdRng) -> MechResult<i64> {
    Ok(DiceExpr::parse(expr)?.evaluate(rng).total)
}

/// Whether `expr` is valid dice notation. Never rolls.
pub fn is_valid_dice_expression(expr: &str) -> bool {
    DiceExpr::parse(expr).is_ok()
}
