//! Requests that change a resource pool.
//!
//! A request is one of:
//!
//! ```text
//! ""            show the pool
//! max           fill the pool
//! set <expr>    set the pool to a rolled or literal value
//! [+|-]<expr>   add or subtract; no sign means add
//! ```
//!
//! Every new value is clamped into `0..=maximum`, and the reported delta
//! is what was actually applied.

use coc_core::{BalanceState, Resource};
use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};

use crate::dice::{DiceExpr, DiceTotal, Sign};
use crate::error::{MechError, MechResult};

/// A parsed balance request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BalanceRequest {
    Show,
    Max,
    Set(DiceExpr),
    Delta { sign: Sign, expr: DiceExpr },
}

impl BalanceRequest {
    /// Parse a request. Unparseable amounts fail with `InvalidAmount`.
    pub fn parse(text: &str) -> MechResult<Self> {
        let text = text.trim();
        let invalid = || MechError::InvalidAmount(text.to_string());
        let expr = |s: &str| DiceExpr::parse(s).map_err(|_| invalid());

        if text.is_empty() {
            return Ok(Self::Show);
        }
        if text.eq_ignore_ascii_case("max") {
            return Ok(Self::Max);
        }
        if let Some(rest) = strip_keyword(text, "set") {
            return Ok(Self::Set(expr(rest)?));
        }
        // The sign covers the whole expression: "-1d6+1" takes 1d6+1 away.
        let (sign, rest) = if let Some(rest) = text.strip_prefix('+') {
            (Sign::Plus, rest)
        } else if let Some(rest) = text.strip_prefix('-') {
            (Sign::Minus, rest)
        } else {
            (Sign::Plus, text)
        };
        Ok(Self::Delta {
            sign,
            expr: expr(rest)?,
        })
    }
}

impl std::str::FromStr for BalanceRequest {
    type Err = MechError;

    fn from_str(s: &str) -> MechResult<Self> {
        Self::parse(s)
    }
}

fn strip_keyword<'a>(text: &'a str, keyword: &str) -> Option<&'a str> {
    let head = text.get(..keyword.len())?;
    let rest = &text[keyword.len()..];
    (head.eq_ignore_ascii_case(keyword) && rest.starts_with(char::is_whitespace))
        .then_some(rest.trim())
}

/// The result of applying a request to a pool.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BalanceChange {
    /// The pool's new value.
    pub value: u32,
    /// Signed change actually applied, after clamping.
    pub delta: i64,
    /// The dice rolled for the amount, if any.
    pub rolled: Option<DiceTotal>,
}

/// Parse `request` and apply it to a pool holding `current` out of `maximum`.
///
/// Fails with `InvalidAmount` when the amount is not a dice expression.
pub fn modify_balance(
    current: u32,
    maximum: u32,
    request: &str,
    rng: &mut StdRng,
) -> MechResult<BalanceChange> {
    let request = BalanceRequest::parse(request)?;
    Ok(apply_request(current, maximum, &request, rng))
}

/// Apply an already parsed request to a pool holding `current` out of `maximum`.
pub fn apply_request(
    current: u32,
    maximum: u32,
    request: &BalanceRequest,
    rng: &mut StdRng,
) -> BalanceChange {
    let (target, rolled) = match request {
        BalanceRequest::Show => {
            return BalanceChange {
                value: current,
                delta: 0,
                rolled: None,
            };
        }
        BalanceRequest::Max => (i64::from(maximum), None),
        BalanceRequest::Set(expr) => {
            let rolled = expr.evaluate(rng);
            (rolled.total, Some(rolled))
        }
        BalanceRequest::Delta { sign, expr } => {
            let rolled = expr.evaluate(rng);
            let amount = match sign {
                Sign::Plus => rolled.total,
                Sign::Minus => -rolled.total,
            };
            (i64::from(current).saturating_add(amount), Some(rolled))
        }
    };

    let clamped = target.clamp(0, i64::from(maximum));
    if clamped != target {
        tracing::warn!(requested = target, maximum, "balance request clamped");
    }
    let value = u32::try_from(clamped).unwrap_or(maximum);
    BalanceChange {
        value,
        delta: i64::from(value) - i64::from(current),
        rolled,
    }
}

/// Parse and apply a request to one pool of a character.
pub fn adjust_resource(
    balances: &mut BalanceState,
    resource: Resource,
    mythos: u32,
    request: &str,
    rng: &mut StdRng,
) -> MechResult<BalanceChange> {
    let maximum = balances.maximum(resource, mythos);
    let change = modify_balance(balances.get(resource), maximum, request, rng)?;
    balances.set(resource, change.value);
    tracing::debug!(%resource, value = change.value, delta = change.delta, "balance adjusted");
    Ok(change)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    fn rng() -> StdRng {
        StdRng::seed_from_u64(5)
    }

    fn apply(current: u32, maximum: u32, request: &str) -> (u32, i64) {
        let change = modify_balance(current, maximum, request, &mut rng()).unwrap();
        (change.value, change.delta)
    }

    #[test]
    fn clamped_up_and_down() {
        assert_eq!(apply(5, 10, "+100"), (10, 5));
        assert_eq!(apply(5, 10, "-100"), (0, -5));
        assert_eq!(apply(5, 10, "max"), (10, 5));
    }

    #[test]
    fn plain_deltas() {
        assert_eq!(apply(5, 10, "+2"), (7, 2));
        assert_eq!(apply(5, 10, "3"), (8, 3));
        assert_eq!(apply(5, 10, "- 4"), (1, -4));
    }

    #[test]
    fn sign_covers_whole_expression() {
        assert_eq!(apply(8, 10, "-2+3"), (3, -5));
    }

    #[test]
    fn set_is_absolute_and_clamped() {
        assert_eq!(apply(5, 10, "set 2"), (2, -3));
        assert_eq!(apply(5, 10, "SET 50"), (10, 5));
        assert_eq!(apply(5, 10, "set 1 - 9"), (0, -5));
    }

    #[test]
    fn show_changes_nothing() {
        let change = apply_request(5, 10, &BalanceRequest::Show, &mut rng());
        assert_eq!(change, BalanceChange { value: 5, delta: 0, rolled: None });
    }

    #[test]
    fn dice_amounts_are_recorded() {
        let change = modify_balance(20, 20, "-1d6", &mut rng()).unwrap();
        let rolled = change.rolled.unwrap();
        assert!((1..=6).contains(&rolled.total));
        assert_eq!(change.delta, -rolled.total);
    }

    #[test]
    fn modify_rejects_bad_amounts() {
        let err = modify_balance(5, 10, "+lots", &mut rng()).unwrap_err();
        assert!(matches!(err, MechError::InvalidAmount(ref text) if text == "+lots"));
    }

    #[test]
    fn parsed_requests_apply_the_same_way() {
        let request: BalanceRequest = "-100".parse().unwrap();
        let change = apply_request(5, 10, &request, &mut rng());
        assert_eq!((change.value, change.delta), (0, -5));
    }

    #[test]
    fn parse_forms() {
        assert_eq!(BalanceRequest::parse("  ").unwrap(), BalanceRequest::Show);
        assert_eq!(BalanceRequest::parse("MAX").unwrap(), BalanceRequest::Max);
        assert!(matches!(
            BalanceRequest::parse("-1d4").unwrap(),
            BalanceRequest::Delta { sign: Sign::Minus, .. }
        ));
        assert!(matches!(BalanceRequest::parse("set 3d6").unwrap(), BalanceRequest::Set(_)));
    }

    #[test]
    fn bad_amounts_are_rejected() {
        for text in ["lots", "set", "set lots", "+", "--2", "settle 4"] {
            let err = BalanceRequest::parse(text).unwrap_err();
            assert!(matches!(err, MechError::InvalidAmount(_)), "{text}");
        }
    }

    #[test]
    fn adjust_uses_sanity_cap() {
        let mut balances = BalanceState {
            sanity: 60,
            ..BalanceState::default()
        };
        let change = adjust_resource(&mut balances, Resource::Sanity, 45, "+10", &mut rng()).unwrap();
        assert_eq!(change.value, 54);
        assert_eq!(change.delta, -6);
        assert_eq!(balances.sanity, 54);
    }

    #[test]
    fn adjust_rejects_without_mutating() {
        let mut balances = BalanceState {
            luck: 40,
            ..BalanceState::default()
        };
        let before = balances;
        assert!(adjust_resource(&mut balances, Resource::Luck, 0, "huh", &mut rng()).is_err());
        assert_eq!(balances, before);
    }
}
