//! Dice and check resolution for the coc check assistant.
//!
//! Evaluates dice notation, splits free-text check requests into a query
//! and flags, looks up difficulty classes on a character, and rolls
//! percentile checks under the bonus/penalty dice rule. [`CheckEngine`]
//! ties these together for hosts.

pub mod balance;
pub mod check;
pub mod config;
pub mod dice;
pub mod error;
pub mod query;
pub mod resolve;
pub mod roll;
pub mod talent;

#[cfg(test)]
mod test_support;

pub use balance::{BalanceChange, BalanceRequest, adjust_resource, apply_request, modify_balance};
pub use check::{CheckEngine, CheckReport, IgnoredArg};
pub use config::EngineConfig;
pub use dice::{DiceExpr, DicePool, DiceTotal, Die, evaluate_dice, is_valid_dice_expression};
pub use error::{MechError, MechResult};
pub use query::{Flag, ParsedQuery, parse_query};
pub use resolve::{ResolvedCheck, blind_dc, resolve_check};
pub use roll::{
    Difficulty, LuckHints, PercentileRoll, RollOutcome, SuccessTier, classify, roll_check,
    roll_percentile,
};
pub use talent::{TALENT_TRIGGERS, resolve_talent_bonus};
