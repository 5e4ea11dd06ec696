//! End-to-end check handling: parse, resolve, roll, classify.

use coc_core::{BalanceState, CharacterRecord, Resource};
use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};

use crate::balance::{BalanceChange, adjust_resource};
use crate::config::EngineConfig;
use crate::dice::{DiceExpr, DiceTotal};
use crate::error::{MechError, MechResult};
use crate::query::{Flag, parse_query};
use crate::resolve::{blind_dc, resolve_check};
use crate::roll::{Difficulty, RollOutcome, roll_check};
use crate::talent::resolve_talent_bonus;

/// A flag argument that was dropped because it did not parse.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IgnoredArg {
    pub flag: Flag,
    pub arg: String,
}

impl std::fmt::Display for IgnoredArg {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} '{}'", self.flag, self.arg)
    }
}

/// Everything a host needs to show the result of one check request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckReport {
    /// Skill or characteristic label. `None` for a blind numeric DC.
    pub label: Option<String>,
    pub dc: u32,
    pub difficulty: Difficulty,
    /// Phrase arguments joined with spaces.
    pub phrase: Option<String>,
    /// Bonus dice granted by a talent (0 or 1).
    pub talent_bonus: u32,
    pub ignored: Vec<IgnoredArg>,
    /// One outcome per repetition.
    pub rolls: Vec<RollOutcome>,
}

impl CheckReport {
    pub fn repetitions(&self) -> usize {
        self.rolls.len()
    }
}

/// Rolls checks and dice with one RNG.
pub struct CheckEngine {
    config: EngineConfig,
    rng: StdRng,
}

impl CheckEngine {
    pub fn new(config: EngineConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        Self { config, rng }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Resolve a check request such as `spot hidden -bonus 1 -rr 2`.
    ///
    /// A purely numeric query is a blind DC and needs no character. Any
    /// other query is resolved against `character`.
    pub fn check(
        &mut self,
        text: &str,
        character: Option<(&CharacterRecord, &BalanceState)>,
    ) -> MechResult<CheckReport> {
        let parsed = parse_query(text);
        if parsed.query.is_empty() {
            return Err(MechError::EmptyQuery);
        }

        let (dc, label) = match blind_dc(&parsed.query) {
            Some(dc) => (dc, None),
            None => {
                let resolved = character
                    .and_then(|(record, balances)| {
                        resolve_check(&parsed.query, record, balances)
                    })
                    .ok_or_else(|| MechError::UnresolvedCheck(parsed.query.clone()))?;
                (resolved.dc, Some(resolved.label))
            }
        };
        tracing::debug!(query = %parsed.query, dc, ?label, "check resolved");

        let talent_bonus = match (&label, character) {
            (Some(label), Some((record, _))) => resolve_talent_bonus(&record.talents, label),
            _ => 0,
        };

        let mut ignored = Vec::new();
        let mut bonus = dice_args(Flag::Bonus, &parsed.bonus, &mut ignored);
        if talent_bonus > 0 {
            bonus.push(DiceExpr::parse("1")?);
        }
        let penalty = dice_args(Flag::Penalty, &parsed.penalty, &mut ignored);
        let repetitions = self.repetitions(&parsed.rr, &mut ignored);

        for arg in &ignored {
            tracing::warn!(%arg, "ignoring flag argument");
        }
        tracing::debug!(
            bonus = bonus.len(),
            penalty = penalty.len(),
            repetitions,
            talent_bonus,
            "rolling check"
        );

        let max_net = self.config.max_net_dice;
        let rolls = (0..repetitions)
            .map(|_| roll_check(dc, &bonus, &penalty, max_net, &mut self.rng))
            .collect();

        let phrase = (!parsed.phrase.is_empty()).then(|| parsed.phrase.join(" "));
        Ok(CheckReport {
            label,
            dc,
            difficulty: Difficulty::new(dc),
            phrase,
            talent_bonus,
            ignored,
            rolls,
        })
    }

    /// Evaluate the repeat count once from the first valid argument.
    fn repetitions(&mut self, args: &[String], ignored: &mut Vec<IgnoredArg>) -> u32 {
        let mut count = None;
        for arg in args {
            match DiceExpr::parse(arg) {
                Ok(expr) if count.is_none() => {
                    let total = expr.evaluate(&mut self.rng).total;
                    count = Some(total.clamp(1, i64::from(self.config.max_repeats)));
                }
                _ => ignored.push(IgnoredArg {
                    flag: Flag::Rr,
                    arg: arg.clone(),
                }),
            }
        }
        count.and_then(|n| u32::try_from(n).ok()).unwrap_or(1)
    }

    /// Roll a standalone dice expression.
    pub fn roll(&mut self, expr: &str) -> MechResult<DiceTotal> {
        Ok(DiceExpr::parse(expr)?.evaluate(&mut self.rng))
    }

    /// Apply a balance request to one of a character's pools.
    pub fn adjust(
        &mut self,
        balances: &mut BalanceState,
        resource: Resource,
        mythos: u32,
        request: &str,
    ) -> MechResult<BalanceChange> {
        adjust_resource(balances, resource, mythos, request, &mut self.rng)
    }
}

/// Parse bonus or penalty arguments. An empty argument means one die.
fn dice_args(flag: Flag, args: &[String], ignored: &mut Vec<IgnoredArg>) -> Vec<DiceExpr> {
    args.iter()
        .filter_map(|arg| {
            let source = if arg.is_empty() { "1" } else { arg.as_str() };
            match DiceExpr::parse(source) {
                Ok(expr) => Some(expr),
                Err(_) => {
                    ignored.push(IgnoredArg {
                        flag,
                        arg: arg.clone(),
                    });
                    None
                }
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::roll::SuccessTier;
    use crate::test_support::investigator;

    fn engine() -> CheckEngine {
        CheckEngine::new(EngineConfig::default().with_seed(42))
    }

    fn check(text: &str) -> MechResult<CheckReport> {
        let record = investigator();
        let balances = BalanceState::for_record(&record);
        engine().check(text, Some((&record, &balances)))
    }

    #[test]
    fn skill_check_with_flags() {
        let report = check(r#"brawl -bonus 1d4 -phrase "for the glory!""#).unwrap();
        assert_eq!(report.label.as_deref(), Some("Brawl"));
        assert_eq!(report.dc, 45);
        assert_eq!(report.difficulty, Difficulty { regular: 45, hard: 22, extreme: 9 });
        assert_eq!(report.phrase.as_deref(), Some("for the glory!"));
        assert_eq!(report.talent_bonus, 0);
        assert_eq!(report.repetitions(), 1);
        let outcome = &report.rolls[0];
        assert!((1..=4).contains(&outcome.bonus_dice));
        assert_eq!(outcome.net, outcome.bonus_dice as i32);
    }

    #[test]
    fn talent_adds_one_bonus_die() {
        let report = check("spot hidden").unwrap();
        assert_eq!(report.talent_bonus, 1);
        assert_eq!(report.rolls[0].bonus_dice, 1);
        assert_eq!(report.rolls[0].roll.tens_dice.len(), 2);
    }

    #[test]
    fn empty_bonus_means_one_die() {
        let report = check("dodge -bonus -penalty 2").unwrap();
        let outcome = &report.rolls[0];
        assert_eq!(outcome.bonus_dice, 1);
        assert_eq!(outcome.penalty_dice, 2);
        assert_eq!(outcome.net, -1);
    }

    #[test]
    fn invalid_arguments_are_reported() {
        let report = check("dodge -bonus lots -penalty 1").unwrap();
        assert_eq!(
            report.ignored,
            vec![IgnoredArg { flag: Flag::Bonus, arg: "lots".to_string() }]
        );
        assert_eq!(report.rolls[0].net, -1);
    }

    #[test]
    fn repetitions_use_first_valid_count() {
        let report = check("listen -rr nope -rr 3 -rr 5").unwrap();
        assert_eq!(report.repetitions(), 3);
        assert_eq!(report.ignored.len(), 2);
    }

    #[test]
    fn repetitions_are_clamped() {
        let record = investigator();
        let balances = BalanceState::for_record(&record);
        let mut engine = CheckEngine::new(EngineConfig::default().with_seed(1).with_max_repeats(4));
        let report = engine.check("listen -rr 100", Some((&record, &balances))).unwrap();
        assert_eq!(report.repetitions(), 4);

        let report = engine.check("listen -rr 1 - 5", Some((&record, &balances))).unwrap();
        assert_eq!(report.repetitions(), 1);
    }

    #[test]
    fn bonus_rerolled_per_repetition() {
        let report = check("listen -bonus 1d10 -rr 20").unwrap();
        let counts: Vec<u32> = report.rolls.iter().map(|r| r.bonus_dice).collect();
        assert_eq!(counts.len(), 20);
        assert!(counts.iter().any(|c| *c != counts[0]));
    }

    #[test]
    fn blind_dc_needs_no_character() {
        let report = engine().check("45 -penalty 1", None).unwrap();
        assert_eq!(report.label, None);
        assert_eq!(report.dc, 45);
        assert_eq!(report.rolls[0].net, -1);
    }

    #[test]
    fn unresolved_checks() {
        assert!(matches!(check("san"), Err(MechError::UnresolvedCheck(q)) if q == "san"));
        assert!(matches!(
            engine().check("spot hidden", None),
            Err(MechError::UnresolvedCheck(_))
        ));
        assert!(matches!(check("-bonus 1"), Err(MechError::EmptyQuery)));
    }

    #[test]
    fn seeded_engines_agree() {
        let a = check("library -rr 3").unwrap();
        let b = check("library -rr 3").unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn outcome_tier_matches_total() {
        let report = check("credit rating -rr 20").unwrap();
        for outcome in &report.rolls {
            let expected = crate::roll::classify(outcome.total(), report.dc).0;
            assert_eq!(outcome.tier, expected);
            if outcome.total() == 1 {
                assert_eq!(outcome.tier, SuccessTier::Critical);
            }
        }
    }

    #[test]
    fn report_serializes_for_hosts() {
        let report = check("spot -rr 2").unwrap();
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["label"], "Spot Hidden");
        assert_eq!(json["rolls"].as_array().map(Vec::len), Some(2));
        assert!(json["rolls"][0]["tier"].is_string());
    }

    #[test]
    fn standalone_roll_and_adjust() {
        let mut engine = engine();
        let total = engine.roll("3d6kh2 + 1").unwrap();
        assert!((3..=13).contains(&total.total));
        assert!(engine.roll("3x").is_err());

        let mut balances = BalanceState { health: 5, health_maximum: 11, ..BalanceState::default() };
        let change = engine.adjust(&mut balances, Resource::Health, 0, "max").unwrap();
        assert_eq!(change.delta, 6);
        assert_eq!(balances.health, 11);
    }
}
