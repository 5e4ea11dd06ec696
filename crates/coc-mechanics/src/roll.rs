//! Percentile check resolution.
//!
//! Bonus and penalty dice cancel one for one. Whatever remains adds extra
//! tens dice: with bonus dice the best tens die is kept, with penalty dice
//! the worst. The result is classified against the check's difficulty into
//! a [`SuccessTier`], together with how much luck would buy a better tier.

use rand::Rng;
use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};

use crate::dice::{DiceExpr, DicePool, Die};

/// Degree of success of a percentile roll.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SuccessTier {
    Critical,
    Extreme,
    Hard,
    Regular,
    Fumble,
    /// A fumble only when the check needed a result below 50.
    ConditionalFumble,
    Failure,
}

impl SuccessTier {
    /// Whether the roll passed at any level.
    pub fn is_success(self) -> bool {
        matches!(
            self,
            Self::Critical | Self::Extreme | Self::Hard | Self::Regular
        )
    }
}

impl std::fmt::Display for SuccessTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let text = match self {
            Self::Critical => "Critical Success",
            Self::Extreme => "Extreme Success",
            Self::Hard => "Hard Success",
            Self::Regular => "Regular Success",
            Self::Fumble => "Fumble",
            Self::ConditionalFumble => "Fumble (if success requires a result below 50)",
            Self::Failure => "Failure",
        };
        f.write_str(text)
    }
}

/// Luck that would have to be spent to reach each better tier.
///
/// A hint is `None` when the tier is already reached or unreachable by
/// spending luck.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LuckHints {
    pub to_regular: Option<u32>,
    pub to_hard: Option<u32>,
    pub to_extreme: Option<u32>,
}

impl LuckHints {
    /// True when no hint applies.
    pub fn is_empty(&self) -> bool {
        self.to_regular.is_none() && self.to_hard.is_none() && self.to_extreme.is_none()
    }
}

/// The three target values derived from one difficulty class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Difficulty {
    pub regular: u32,
    pub hard: u32,
    pub extreme: u32,
}

impl Difficulty {
    pub fn new(dc: u32) -> Self {
        Self {
            regular: dc,
            hard: dc / 2,
            extreme: dc / 5,
        }
    }
}

impl std::fmt::Display for Difficulty {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}/{}", self.regular, self.hard, self.extreme)
    }
}

/// Classify a percentile total against a difficulty class.
///
/// Branches are checked in order, so a total of 1 is always critical and a
/// high DC can turn 96-99 into an ordinary success.
pub fn classify(total: u32, dc: u32) -> (SuccessTier, LuckHints) {
    let d = Difficulty::new(dc);
    let none = LuckHints::default();

    if total == 1 {
        (SuccessTier::Critical, none)
    } else if total <= d.extreme {
        (SuccessTier::Extreme, none)
    } else if total <= d.hard {
        let hints = LuckHints {
            to_extreme: Some(total - d.extreme),
            ..none
        };
        (SuccessTier::Hard, hints)
    } else if total <= d.regular {
        let hints = LuckHints {
            to_hard: Some(total - d.hard),
            to_extreme: Some(total - d.extreme),
            ..none
        };
        (SuccessTier::Regular, hints)
    } else if total > 99 {
        (SuccessTier::Fumble, none)
    } else if total >= 96 {
        (SuccessTier::ConditionalFumble, none)
    } else {
        let hints = LuckHints {
            to_regular: Some(total - d.regular),
            to_hard: Some(total - d.hard),
            to_extreme: Some(total - d.extreme),
        };
        (SuccessTier::Failure, hints)
    }
}

/// A single d100 roll built from tens and ones dice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PercentileRoll {
    /// Every tens die rolled, as 1-10.
    pub tens_dice: Vec<u32>,
    /// The kept tens die minus one, 0-9.
    pub tens_digit: u32,
    /// The ones die, 1-10 where 10 reads as 0.
    pub ones: u32,
    /// Combined total, 1-100.
    pub total: u32,
}

/// Roll a percentile total with `net` bonus (positive) or penalty
/// (negative) dice.
pub fn roll_percentile(net: i32, rng: &mut StdRng) -> PercentileRoll {
    if net == 0 {
        let total = DicePool::new().add(Die::D100, 1).roll(rng).total();
        let tens_digit = (total - 1) / 10;
        return PercentileRoll {
            tens_dice: vec![tens_digit + 1],
            tens_digit,
            ones: total - tens_digit * 10,
            total,
        };
    }

    let tens = DicePool::new()
        .add(Die::D10, net.unsigned_abs() + 1)
        .roll(rng);
    let kept = if net > 0 { tens.highest() } else { tens.lowest() };
    let tens_digit = kept - 1;
    let ones = rng.random_range(1..=10);
    PercentileRoll {
        tens_dice: tens.values(),
        tens_digit,
        ones,
        total: tens_digit * 10 + ones,
    }
}

/// A classified percentile roll for one check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RollOutcome {
    pub dc: u32,
    /// Total bonus dice after evaluating every bonus expression.
    pub bonus_dice: u32,
    /// Total penalty dice after evaluating every penalty expression.
    pub penalty_dice: u32,
    /// Bonus minus penalty, after capping.
    pub net: i32,
    pub roll: PercentileRoll,
    pub tier: SuccessTier,
    pub hints: LuckHints,
}

impl RollOutcome {
    pub fn total(&self) -> u32 {
        self.roll.total
    }
}

/// Evaluate bonus and penalty expressions once, roll, and classify.
///
/// Negative expression totals count as zero dice. The net is capped at
/// `max_net` either way.
pub fn roll_check(
    dc: u32,
    bonus: &[DiceExpr],
    penalty: &[DiceExpr],
    max_net: u32,
    rng: &mut StdRng,
) -> RollOutcome {
    let bonus_dice = count_dice(bonus, rng);
    let penalty_dice = count_dice(penalty, rng);
    let cap = i64::from(max_net);
    let raw = i64::from(bonus_dice) - i64::from(penalty_dice);
    let net = i32::try_from(raw.clamp(-cap, cap)).unwrap_or(0);

    let roll = roll_percentile(net, rng);
    let (tier, hints) = classify(roll.total, dc);
    RollOutcome {
        dc,
        bonus_dice,
        penalty_dice,
        net,
        roll,
        tier,
        hints,
    }
}

fn count_dice(exprs: &[DiceExpr], rng: &mut StdRng) -> u32 {
    exprs
        .iter()
        .map(|expr| u32::try_from(expr.evaluate(rng).total.max(0)).unwrap_or(u32::MAX))
        .fold(0u32, u32::saturating_add)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::SeedableRng;

    fn rng(seed: u64) -> StdRng {
        StdRng::seed_from_u64(seed)
    }

    fn exprs(sources: &[&str]) -> Vec<DiceExpr> {
        sources
            .iter()
            .map(|s| DiceExpr::parse(s).unwrap())
            .collect()
    }

    #[test]
    fn difficulty_floors() {
        let d = Difficulty::new(55);
        assert_eq!(d, Difficulty { regular: 55, hard: 27, extreme: 11 });
        assert_eq!(d.to_string(), "55/27/11");
    }

    #[test]
    fn one_is_critical_even_against_zero() {
        assert_eq!(classify(1, 0).0, SuccessTier::Critical);
        assert_eq!(classify(1, 50), (SuccessTier::Critical, LuckHints::default()));
    }

    #[test]
    fn extreme_has_no_hints() {
        assert_eq!(classify(10, 50), (SuccessTier::Extreme, LuckHints::default()));
    }

    #[test]
    fn hard_hints_extreme_only() {
        let (tier, hints) = classify(20, 50);
        assert_eq!(tier, SuccessTier::Hard);
        assert_eq!(hints, LuckHints { to_regular: None, to_hard: None, to_extreme: Some(10) });
    }

    #[test]
    fn regular_hints_hard_and_extreme() {
        let (tier, hints) = classify(40, 50);
        assert_eq!(tier, SuccessTier::Regular);
        assert_eq!(hints.to_hard, Some(15));
        assert_eq!(hints.to_extreme, Some(30));
        assert_eq!(hints.to_regular, None);
    }

    #[test]
    fn failure_hints_all_three() {
        let (tier, hints) = classify(70, 50);
        assert_eq!(tier, SuccessTier::Failure);
        assert_eq!(
            hints,
            LuckHints { to_regular: Some(20), to_hard: Some(45), to_extreme: Some(60) }
        );
    }

    #[test]
    fn high_rolls_fumble() {
        assert_eq!(classify(100, 50).0, SuccessTier::Fumble);
        assert_eq!(classify(96, 50).0, SuccessTier::ConditionalFumble);
        assert_eq!(classify(99, 50).0, SuccessTier::ConditionalFumble);
        assert_eq!(classify(95, 50).0, SuccessTier::Failure);
        assert!(classify(99, 50).1.is_empty());
    }

    #[test]
    fn high_dc_beats_conditional_fumble() {
        assert_eq!(classify(97, 98).0, SuccessTier::Regular);
    }

    #[test]
    fn tier_display() {
        assert_eq!(SuccessTier::Hard.to_string(), "Hard Success");
        assert_eq!(
            SuccessTier::ConditionalFumble.to_string(),
            "Fumble (if success requires a result below 50)"
        );
        assert!(SuccessTier::Critical.is_success());
        assert!(!SuccessTier::ConditionalFumble.is_success());
    }

    #[test]
    fn plain_roll_uses_one_tens_die() {
        let mut r = rng(7);
        for _ in 0..200 {
            let roll = roll_percentile(0, &mut r);
            assert_eq!(roll.tens_dice.len(), 1);
            assert_eq!(roll.tens_dice[0], roll.tens_digit + 1);
            assert_eq!(roll.total, roll.tens_digit * 10 + roll.ones);
            assert!((1..=10).contains(&roll.ones));
        }
    }

    #[test]
    fn bonus_keeps_highest_tens() {
        let mut r = rng(11);
        for _ in 0..100 {
            let roll = roll_percentile(2, &mut r);
            assert_eq!(roll.tens_dice.len(), 3);
            assert_eq!(roll.tens_digit + 1, *roll.tens_dice.iter().max().unwrap());
        }
    }

    #[test]
    fn penalty_keeps_lowest_tens() {
        let mut r = rng(12);
        for _ in 0..100 {
            let roll = roll_percentile(-1, &mut r);
            assert_eq!(roll.tens_dice.len(), 2);
            assert_eq!(roll.tens_digit + 1, *roll.tens_dice.iter().min().unwrap());
        }
    }

    #[test]
    fn bonus_and_penalty_cancel() {
        let outcome = roll_check(50, &exprs(&["1"]), &exprs(&["1"]), 50, &mut rng(3));
        assert_eq!(outcome.net, 0);
        assert_eq!(outcome.bonus_dice, 1);
        assert_eq!(outcome.penalty_dice, 1);
        assert_eq!(outcome.roll.tens_dice.len(), 1);
    }

    #[test]
    fn net_is_capped() {
        let outcome = roll_check(50, &exprs(&["200"]), &[], 5, &mut rng(3));
        assert_eq!(outcome.net, 5);
        assert_eq!(outcome.roll.tens_dice.len(), 6);
    }

    #[test]
    fn negative_expressions_count_as_zero() {
        let outcome = roll_check(50, &exprs(&["1 - 4"]), &exprs(&["1"]), 50, &mut rng(3));
        assert_eq!(outcome.bonus_dice, 0);
        assert_eq!(outcome.net, -1);
    }

    /// Tens-digit and ones histograms over `draws` samples.
    fn histograms(draws: usize, mut sample: impl FnMut() -> (u32, u32)) -> [[f64; 10]; 2] {
        let mut counts = [[0usize; 10]; 2];
        for _ in 0..draws {
            let (tens_digit, ones) = sample();
            counts[0][tens_digit as usize] += 1;
            counts[1][(ones - 1) as usize] += 1;
        }
        counts.map(|row| row.map(|n| n as f64 / draws as f64))
    }

    #[test]
    fn plain_roll_matches_tens_die_plus_ones_die() {
        const DRAWS: usize = 100_000;
        let mut plain_rng = rng(11);
        let plain = histograms(DRAWS, || {
            let roll = roll_percentile(0, &mut plain_rng);
            assert_eq!(roll.total, roll.tens_digit * 10 + roll.ones);
            (roll.tens_digit, roll.ones)
        });

        let mut split_rng = rng(12);
        let split = histograms(DRAWS, || {
            let tens = DicePool::new().add(Die::D10, 1).roll(&mut split_rng).highest();
            let ones = split_rng.random_range(1..=10);
            (tens - 1, ones)
        });

        for (kind, (a, b)) in ["tens", "ones"].iter().zip(plain.iter().zip(split.iter())) {
            for (face, (p, q)) in a.iter().zip(b.iter()).enumerate() {
                assert!((p - 0.1).abs() < 0.01, "{kind} {face}: {p}");
                assert!((p - q).abs() < 0.01, "{kind} {face}: {p} vs {q}");
            }
        }
    }

    #[test]
    fn same_seed_same_outcome() {
        let a = roll_check(60, &exprs(&["1d2"]), &[], 50, &mut rng(99));
        let b = roll_check(60, &exprs(&["1d2"]), &[], 50, &mut rng(99));
        assert_eq!(a, b);
    }

    fn arb_tier_inputs() -> impl Strategy<Value = (u32, u32)> {
        (1u32..=100, 1u32..=100)
    }

    proptest! {
        #[test]
        fn difficulty_is_ordered(dc in 1u32..=100) {
            let d = Difficulty::new(dc);
            prop_assert!(d.extreme <= d.hard && d.hard <= d.regular);
        }

        #[test]
        fn classification_agrees_with_thresholds((total, dc) in arb_tier_inputs()) {
            let d = Difficulty::new(dc);
            let (tier, hints) = classify(total, dc);
            prop_assert_eq!(tier.is_success(), total == 1 || total <= d.regular);
            match tier {
                SuccessTier::Extreme => prop_assert!(total <= d.extreme),
                SuccessTier::Hard => prop_assert!(total > d.extreme && total <= d.hard),
                SuccessTier::Regular => prop_assert!(total > d.hard && total <= d.regular),
                SuccessTier::Failure => prop_assert!(total > d.regular && total <= 95),
                SuccessTier::ConditionalFumble => prop_assert!((96..=99).contains(&total)),
                SuccessTier::Fumble => prop_assert_eq!(total, 100),
                SuccessTier::Critical => prop_assert_eq!(total, 1),
            }
            for hint in [hints.to_regular, hints.to_hard, hints.to_extreme].into_iter().flatten() {
                prop_assert!(hint > 0);
            }
        }

        #[test]
        fn total_equal_to_dc_is_regular(dc in 2u32..=100) {
            prop_assert_eq!(classify(dc, dc).0, SuccessTier::Regular);
        }

        #[test]
        fn percentile_total_in_range(net in -50i32..=50, seed in any::<u64>()) {
            let roll = roll_percentile(net, &mut rng(seed));
            prop_assert!((1..=100).contains(&roll.total));
            let expected = if net == 0 { 1 } else { net.unsigned_abs() as usize + 1 };
            prop_assert_eq!(roll.tens_dice.len(), expected);
        }
    }
}
