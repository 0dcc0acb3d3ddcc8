use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::FetchError;

/// The six base stats, in display order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Stat {
    Hp,
    Attack,
    Defense,
    SpecialAttack,
    SpecialDefense,
    Speed,
}

impl Stat {
    pub const ALL: [Stat; 6] = [
        Stat::Hp,
        Stat::Attack,
        Stat::Defense,
        Stat::SpecialAttack,
        Stat::SpecialDefense,
        Stat::Speed,
    ];

    /// Short label used on cards and stat bars.
    pub fn label(self) -> &'static str {
        match self {
            Stat::Hp => "HP",
            Stat::Attack => "ATK",
            Stat::Defense => "DEF",
            Stat::SpecialAttack => "SP.ATK",
            Stat::SpecialDefense => "SP.DEF",
            Stat::Speed => "SPD",
        }
    }

    /// Per-stat ceiling used to normalize values into bar percentages.
    pub fn max_value(self) -> u16 {
        match self {
            Stat::Hp => 255,
            Stat::Attack => 200,
            Stat::Defense => 250,
            Stat::SpecialAttack => 200,
            Stat::SpecialDefense => 250,
            Stat::Speed => 200,
        }
    }
}

/// Base stat block with the fixed wire keys.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BaseStats {
    pub hp: u16,
    pub attack: u16,
    pub defense: u16,
    pub special_attack: u16,
    pub special_defense: u16,
    pub speed: u16,
}

impl BaseStats {
    pub fn get(&self, stat: Stat) -> u16 {
        match stat {
            Stat::Hp => self.hp,
            Stat::Attack => self.attack,
            Stat::Defense => self.defense,
            Stat::SpecialAttack => self.special_attack,
            Stat::SpecialDefense => self.special_defense,
            Stat::Speed => self.speed,
        }
    }

    /// Normalized bar percentage for one stat, rounded and capped at 100.
    pub fn percent(&self, stat: Stat) -> u8 {
        let value = self.get(stat) as f64;
        let max = stat.max_value() as f64;
        let pct = (value / max * 100.0).min(100.0);
        pct.round() as u8
    }

    /// All six `(label, value, percent)` rows in display order.
    pub fn bars(&self) -> [(&'static str, u16, u8); 6] {
        let mut out = [("", 0, 0); 6];
        for (slot, stat) in Stat::ALL.into_iter().enumerate() {
            out[slot] = (stat.label(), self.get(stat), self.percent(stat));
        }
        out
    }
}

/// One creature record as served by the search endpoint.
///
/// Immutable once fetched; owned by the accumulating data source.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pokemon {
    pub id: u32,
    pub name: String,
    /// Type tags in slot order.
    #[serde(default)]
    pub types: Vec<String>,
    pub base_stats: BaseStats,
    /// Height in decimeters.
    pub height: u32,
    /// Weight in hectograms.
    pub weight: u32,
    /// Sprite variant name → URL, when the variant exists.
    #[serde(default)]
    pub sprites: BTreeMap<String, Option<String>>,
}

impl Pokemon {
    /// Card display string, feet-and-inches.
    pub fn display_height(&self) -> String {
        format!("{}'{}\"", self.height / 12, self.height % 12)
    }

    /// Card display string, pounds.
    pub fn display_weight(&self) -> String {
        format!("{:.0} lbs", self.weight as f64 * 0.220462)
    }

    pub fn sprite(&self, variant: &str) -> Option<&str> {
        self.sprites.get(variant).and_then(|url| url.as_deref())
    }
}

/// One batch of results plus the continuation cursor.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page {
    pub results: Vec<Pokemon>,
    /// Cursor for the next page; `None` when the result set is exhausted.
    pub next_cursor: Option<u64>,
    /// Server-side total for the current query.
    pub total_count: usize,
}

impl Page {
    /// Decodes a raw search payload.
    pub fn from_json(payload: &str) -> Result<Self, FetchError> {
        serde_json::from_str(payload).map_err(|e| FetchError::InvalidResponse(e.to_string()))
    }
}
