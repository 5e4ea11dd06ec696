//! Derived combat stats: damage bonus, build, and movement rate.

use serde::Serialize;

use crate::character::Characteristics;
use crate::error::{CoreError, CoreResult};

/// Extra damage added to melee hits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum DamageBonus {
    /// A flat modifier (0 or a small penalty).
    Flat(i32),
    /// A dice expression rolled on each hit, e.g. "1d4".
    Dice(&'static str),
}

impl std::fmt::Display for DamageBonus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Flat(n) => write!(f, "{n}"),
            Self::Dice(expr) => write!(f, "{expr}"),
        }
    }
}

/// Damage bonus, build, and movement rate for a character.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DerivedStats {
    pub damage_bonus: DamageBonus,
    pub build: i32,
    pub move_rate: u32,
}

/// STR + SIZ upper bounds, ascending, with the bonus and build they grant.
const DAMAGE_BUILD_CHART: &[(u32, DamageBonus, i32)] = &[
    (64, DamageBonus::Flat(-2), -2),
    (84, DamageBonus::Flat(-1), -1),
    (124, DamageBonus::Flat(0), 0),
    (164, DamageBonus::Dice("1d4"), 1),
    (204, DamageBonus::Dice("1d6"), 2),
    (284, DamageBonus::Dice("2d6"), 3),
    (364, DamageBonus::Dice("3d6"), 4),
    (444, DamageBonus::Dice("4d6"), 5),
    (524, DamageBonus::Dice("5d6"), 6),
];

/// Compute damage bonus, build, and movement rate.
///
/// The first chart row whose bound is not exceeded by `str + siz` wins.
/// Sums above the last row are rejected rather than guessed.
pub fn damage_build_move(str: u32, dex: u32, siz: u32) -> CoreResult<DerivedStats> {
    let sum = str.saturating_add(siz);
    let (_, damage_bonus, build) = DAMAGE_BUILD_CHART
        .iter()
        .find(|(upper, _, _)| sum <= *upper)
        .copied()
        .ok_or(CoreError::DamageTableExceeded(sum))?;

    let move_rate = if str > siz && dex > siz {
        9
    } else if str < siz && dex < siz {
        7
    } else {
        8
    };

    Ok(DerivedStats {
        damage_bonus,
        build,
        move_rate,
    })
}

impl Characteristics {
    /// Derived stats for these characteristics.
    pub fn derived(&self) -> CoreResult<DerivedStats> {
        damage_build_move(self.str, self.dex, self.siz)
    }
}
