//! Provinces, coasts and powers of the standard map.
//!
//! The 75 provinces are enumerated alphabetically by their 3-letter
//! abbreviation. Static attributes (kind, supply center, home power, named
//! coasts) live in a table indexed by the `Province` discriminant.

use serde::Serialize;

/// Number of provinces on the standard map.
pub const PROVINCE_COUNT: usize = 75;

/// Number of supply centers on the standard map.
pub const SUPPLY_CENTER_COUNT: usize = 34;

/// Supply centers a single power must own to win outright.
pub const VICTORY_CENTERS: usize = 18;

/// A province of the standard map.
///
/// `#[repr(u8)]` with alphabetical discriminants, so `p as usize` indexes
/// every per-province array in the crate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u8)]
pub enum Province {
    Adr, // Adriatic Sea
    Aeg, // Aegean Sea
    Alb, // Albania
    Ank, // Ankara
    Apu, // Apulia
    Arm, // Armenia
    Bal, // Baltic Sea
    Bar, // Barents Sea
    Bel, // Belgium
    Ber, // Berlin
    Bla, // Black Sea
    Boh, // Bohemia
    Bot, // Gulf of Bothnia
    Bre, // Brest
    Bud, // Budapest
    Bul, // Bulgaria
    Bur, // Burgundy
    Cly, // Clyde
    Con, // Constantinople
    Den, // Denmark
    Eas, // Eastern Mediterranean
    Edi, // Edinburgh
    Eng, // English Channel
    Fin, // Finland
    Gal, // Galicia
    Gas, // Gascony
    Gol, // Gulf of Lyon
    Gre, // Greece
    Hel, // Heligoland Bight
    Hol, // Holland
    Ion, // Ionian Sea
    Iri, // Irish Sea
    Kie, // Kiel
    Lon, // London
    Lvn, // Livonia
    Lvp, // Liverpool
    Mao, // Mid-Atlantic Ocean
    Mar, // Marseilles
    Mos, // Moscow
    Mun, // Munich
    Naf, // North Africa
    Nao, // North Atlantic Ocean
    Nap, // Naples
    Nrg, // Norwegian Sea
    Nth, // North Sea
    Nwy, // Norway
    Par, // Paris
    Pic, // Picardy
    Pie, // Piedmont
    Por, // Portugal
    Pru, // Prussia
    Rom, // Rome
    Ruh, // Ruhr
    Rum, // Rumania
    Ser, // Serbia
    Sev, // Sevastopol
    Sil, // Silesia
    Ska, // Skagerrak
    Smy, // Smyrna
    Spa, // Spain
    Stp, // St. Petersburg
    Swe, // Sweden
    Syr, // Syria
    Tri, // Trieste
    Tun, // Tunisia
    Tus, // Tuscany
    Tyr, // Tyrolia
    Tys, // Tyrrhenian Sea
    Ukr, // Ukraine
    Ven, // Venice
    Vie, // Vienna
    Wal, // Wales
    War, // Warsaw
    Wes, // Western Mediterranean
    Yor, // Yorkshire
}

use Province::*;

/// All provinces in index order.
pub const ALL_PROVINCES: [Province; PROVINCE_COUNT] = [
    Adr, Aeg, Alb, Ank, Apu, Arm, Bal, Bar,
    Bel, Ber, Bla, Boh, Bot, Bre, Bud, Bul,
    Bur, Cly, Con, Den, Eas, Edi, Eng, Fin,
    Gal, Gas, Gol, Gre, Hel, Hol, Ion, Iri,
    Kie, Lon, Lvn, Lvp, Mao, Mar, Mos, Mun,
    Naf, Nao, Nap, Nrg, Nth, Nwy, Par, Pic,
    Pie, Por, Pru, Rom, Ruh, Rum, Ser, Sev,
    Sil, Ska, Smy, Spa, Stp, Swe, Syr, Tri,
    Tun, Tus, Tyr, Tys, Ukr, Ven, Vie, Wal,
    War, Wes, Yor,
];

impl Province {
    /// Converts an array index back to a province.
    pub fn from_index(idx: usize) -> Option<Province> {
        ALL_PROVINCES.get(idx).copied()
    }

    /// Looks up a province by its 3-letter abbreviation, case-insensitively.
    pub fn from_abbr(abbr: &str) -> Option<Province> {
        let lower = abbr.to_ascii_lowercase();
        PROVINCE_TABLE
            .iter()
            .position(|info| info.abbr == lower)
            .and_then(Province::from_index)
    }

    fn info(self) -> &'static ProvinceInfo {
        &PROVINCE_TABLE[self as usize]
    }

    pub fn abbr(self) -> &'static str {
        self.info().abbr
    }

    pub fn name(self) -> &'static str {
        self.info().name
    }

    pub fn kind(self) -> ProvinceKind {
        self.info().kind
    }

    pub fn is_supply_center(self) -> bool {
        self.info().supply_center
    }

    /// The power this province is a home center of, if any.
    pub fn home_power(self) -> Option<Power> {
        self.info().home
    }

    /// Named coasts of a split-coast province; empty for every other province.
    pub fn coasts(self) -> &'static [Coast] {
        self.info().coasts
    }

    pub fn has_coasts(self) -> bool {
        !self.info().coasts.is_empty()
    }
}

impl std::fmt::Display for Province {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.abbr().to_ascii_uppercase())
    }
}

/// Terrain of a province.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProvinceKind {
    Land,
    Coastal,
    Water,
}

/// Coast specifier. `None` everywhere except on split-coast provinces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub enum Coast {
    #[default]
    None,
    North,
    South,
    East,
}

impl Coast {
    /// Two-letter abbreviation, empty for `Coast::None`.
    pub const fn abbr(self) -> &'static str {
        match self {
            Coast::None => "",
            Coast::North => "nc",
            Coast::South => "sc",
            Coast::East => "ec",
        }
    }

    pub fn from_abbr(s: &str) -> Option<Coast> {
        match s.to_ascii_lowercase().as_str() {
            "" => Some(Coast::None),
            "nc" => Some(Coast::North),
            "sc" => Some(Coast::South),
            "ec" => Some(Coast::East),
            _ => Option::None,
        }
    }
}

/// One of the seven great powers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Power {
    Austria,
    England,
    France,
    Germany,
    Italy,
    Russia,
    Turkey,
}

/// All seven powers in standard order.
pub const ALL_POWERS: [Power; 7] = [
    Power::Austria,
    Power::England,
    Power::France,
    Power::Germany,
    Power::Italy,
    Power::Russia,
    Power::Turkey,
];

impl Power {
    pub const fn name(self) -> &'static str {
        match self {
            Power::Austria => "austria",
            Power::England => "england",
            Power::France => "france",
            Power::Germany => "germany",
            Power::Italy => "italy",
            Power::Russia => "russia",
            Power::Turkey => "turkey",
        }
    }

    pub fn from_name(name: &str) -> Option<Power> {
        ALL_POWERS
            .iter()
            .copied()
            .find(|p| p.name().eq_ignore_ascii_case(name))
    }

    /// Home supply centers of this power, in province order.
    pub fn home_centers(self) -> impl Iterator<Item = Province> {
        ALL_PROVINCES
            .into_iter()
            .filter(move |p| p.home_power() == Some(self))
    }
}

impl std::fmt::Display for Power {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Static attributes of a province.
pub struct ProvinceInfo {
    pub abbr: &'static str,
    pub name: &'static str,
    pub kind: ProvinceKind,
    pub supply_center: bool,
    pub home: Option<Power>,
    pub coasts: &'static [Coast],
}

const fn row(
    abbr: &'static str,
    name: &'static str,
    kind: ProvinceKind,
    supply_center: bool,
    home: Option<Power>,
    coasts: &'static [Coast],
) -> ProvinceInfo {
    ProvinceInfo { abbr, name, kind, supply_center, home, coasts }
}

use Coast::{East, North, South};
use Power::{Austria, England, France, Germany, Italy, Russia, Turkey};
use ProvinceKind::{Coastal, Land, Water};

/// Province attributes, indexed by `Province as usize`.
pub static PROVINCE_TABLE: [ProvinceInfo; PROVINCE_COUNT] = [
    row("adr", "Adriatic Sea", Water, false, None, &[]),
    row("aeg", "Aegean Sea", Water, false, None, &[]),
    row("alb", "Albania", Coastal, false, None, &[]),
    row("ank", "Ankara", Coastal, true, Some(Turkey), &[]),
    row("apu", "Apulia", Coastal, false, None, &[]),
    row("arm", "Armenia", Coastal, false, None, &[]),
    row("bal", "Baltic Sea", Water, false, None, &[]),
    row("bar", "Barents Sea", Water, false, None, &[]),
    row("bel", "Belgium", Coastal, true, None, &[]),
    row("ber", "Berlin", Coastal, true, Some(Germany), &[]),
    row("bla", "Black Sea", Water, false, None, &[]),
    row("boh", "Bohemia", Land, false, None, &[]),
    row("bot", "Gulf of Bothnia", Water, false, None, &[]),
    row("bre", "Brest", Coastal, true, Some(France), &[]),
    row("bud", "Budapest", Land, true, Some(Austria), &[]),
    row("bul", "Bulgaria", Coastal, true, None, &[East, South]),
    row("bur", "Burgundy", Land, false, None, &[]),
    row("cly", "Clyde", Coastal, false, None, &[]),
    row("con", "Constantinople", Coastal, true, Some(Turkey), &[]),
    row("den", "Denmark", Coastal, true, None, &[]),
    row("eas", "Eastern Mediterranean", Water, false, None, &[]),
    row("edi", "Edinburgh", Coastal, true, Some(England), &[]),
    row("eng", "English Channel", Water, false, None, &[]),
    row("fin", "Finland", Coastal, false, None, &[]),
    row("gal", "Galicia", Land, false, None, &[]),
    row("gas", "Gascony", Coastal, false, None, &[]),
    row("gol", "Gulf of Lyon", Water, false, None, &[]),
    row("gre", "Greece", Coastal, true, None, &[]),
    row("hel", "Heligoland Bight", Water, false, None, &[]),
    row("hol", "Holland", Coastal, true, None, &[]),
    row("ion", "Ionian Sea", Water, false, None, &[]),
    row("iri", "Irish Sea", Water, false, None, &[]),
    row("kie", "Kiel", Coastal, true, Some(Germany), &[]),
    row("lon", "London", Coastal, true, Some(England), &[]),
    row("lvn", "Livonia", Coastal, false, None, &[]),
    row("lvp", "Liverpool", Coastal, true, Some(England), &[]),
    row("mao", "Mid-Atlantic Ocean", Water, false, None, &[]),
    row("mar", "Marseilles", Coastal, true, Some(France), &[]),
    row("mos", "Moscow", Land, true, Some(Russia), &[]),
    row("mun", "Munich", Land, true, Some(Germany), &[]),
    row("naf", "North Africa", Coastal, false, None, &[]),
    row("nao", "North Atlantic Ocean", Water, false, None, &[]),
    row("nap", "Naples", Coastal, true, Some(Italy), &[]),
    row("nrg", "Norwegian Sea", Water, false, None, &[]),
    row("nth", "North Sea", Water, false, None, &[]),
    row("nwy", "Norway", Coastal, true, None, &[]),
    row("par", "Paris", Land, true, Some(France), &[]),
    row("pic", "Picardy", Coastal, false, None, &[]),
    row("pie", "Piedmont", Coastal, false, None, &[]),
    row("por", "Portugal", Coastal, true, None, &[]),
    row("pru", "Prussia", Coastal, false, None, &[]),
    row("rom", "Rome", Coastal, true, Some(Italy), &[]),
    row("ruh", "Ruhr", Land, false, None, &[]),
    row("rum", "Rumania", Coastal, true, None, &[]),
    row("ser", "Serbia", Land, true, None, &[]),
    row("sev", "Sevastopol", Coastal, true, Some(Russia), &[]),
    row("sil", "Silesia", Land, false, None, &[]),
    row("ska", "Skagerrak", Water, false, None, &[]),
    row("smy", "Smyrna", Coastal, true, Some(Turkey), &[]),
    row("spa", "Spain", Coastal, true, None, &[North, South]),
    row("stp", "St. Petersburg", Coastal, true, Some(Russia), &[North, South]),
    row("swe", "Sweden", Coastal, true, None, &[]),
    row("syr", "Syria", Coastal, false, None, &[]),
    row("tri", "Trieste", Coastal, true, Some(Austria), &[]),
    row("tun", "Tunisia", Coastal, true, None, &[]),
    row("tus", "Tuscany", Coastal, false, None, &[]),
    row("tyr", "Tyrolia", Land, false, None, &[]),
    row("tys", "Tyrrhenian Sea", Water, false, None, &[]),
    row("ukr", "Ukraine", Land, false, None, &[]),
    row("ven", "Venice", Coastal, true, Some(Italy), &[]),
    row("vie", "Vienna", Land, true, Some(Austria), &[]),
    row("wal", "Wales", Coastal, false, None, &[]),
    row("war", "Warsaw", Land, true, Some(Russia), &[]),
    row("wes", "Western Mediterranean", Water, false, None, &[]),
    row("yor", "Yorkshire", Coastal, false, None, &[]),
];
