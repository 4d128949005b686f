//! Map oracle for the standard board.
//!
//! Adjacency is stored as undirected edge lists: one for armies and one for
//! fleets, where fleet edges name the coast used at each end of a
//! split-coast province. The lists are expanded into a per-province index
//! on first use; every query after that is a slice scan over a handful of
//! neighbours.

use std::sync::LazyLock;

use super::province::{Coast, Province, ProvinceKind, PROVINCE_COUNT};
use super::unit::UnitKind;

const N: Coast = Coast::None;
const NC: Coast = Coast::North;
const SC: Coast = Coast::South;
const EC: Coast = Coast::East;

use Province::*;

/// Borders an army can cross.
static ARMY_EDGES: [(Province, Province); 111] = [
    (Alb, Gre), (Alb, Ser), (Alb, Tri), (Ank, Arm), (Ank, Con), (Ank, Smy),
    (Apu, Nap), (Apu, Rom), (Apu, Ven), (Arm, Sev), (Arm, Smy), (Arm, Syr),
    (Bel, Bur), (Bel, Hol), (Bel, Pic), (Bel, Ruh), (Ber, Kie), (Ber, Mun),
    (Ber, Pru), (Ber, Sil), (Boh, Gal), (Boh, Mun), (Boh, Sil), (Boh, Tyr),
    (Boh, Vie), (Bre, Gas), (Bre, Par), (Bre, Pic), (Bud, Gal), (Bud, Rum),
    (Bud, Ser), (Bud, Tri), (Bud, Vie), (Bul, Con), (Bul, Gre), (Bul, Rum),
    (Bul, Ser), (Bur, Gas), (Bur, Mar), (Bur, Mun), (Bur, Par), (Bur, Pic),
    (Bur, Ruh), (Cly, Edi), (Cly, Lvp), (Con, Smy), (Den, Kie), (Den, Swe),
    (Edi, Lvp), (Edi, Yor), (Fin, Nwy), (Fin, Stp), (Fin, Swe), (Gal, Rum),
    (Gal, Sil), (Gal, Ukr), (Gal, Vie), (Gal, War), (Gas, Mar), (Gas, Par),
    (Gas, Spa), (Gre, Ser), (Hol, Kie), (Hol, Ruh), (Kie, Mun), (Kie, Ruh),
    (Lon, Wal), (Lon, Yor), (Lvn, Mos), (Lvn, Pru), (Lvn, Stp), (Lvn, War),
    (Lvp, Wal), (Lvp, Yor), (Mar, Pie), (Mar, Spa), (Mos, Sev), (Mos, Stp),
    (Mos, Ukr), (Mos, War), (Mun, Ruh), (Mun, Sil), (Mun, Tyr), (Naf, Tun),
    (Nap, Rom), (Nwy, Stp), (Nwy, Swe), (Par, Pic), (Pie, Tus), (Pie, Tyr),
    (Pie, Ven), (Por, Spa), (Pru, Sil), (Pru, War), (Rom, Tus), (Rom, Ven),
    (Rum, Ser), (Rum, Sev), (Rum, Ukr), (Ser, Tri), (Sev, Ukr), (Sil, War),
    (Smy, Syr), (Tri, Tyr), (Tri, Ven), (Tri, Vie), (Tus, Ven), (Tyr, Ven),
    (Tyr, Vie), (Ukr, War), (Wal, Yor),
];

/// Borders a fleet can cross, with the coast used on each side.
static FLEET_EDGES: [(Province, Coast, Province, Coast); 141] = [
    (Adr, N, Alb, N), (Adr, N, Apu, N), (Adr, N, Ion, N), (Adr, N, Tri, N),
    (Adr, N, Ven, N), (Aeg, N, Bul, SC), (Aeg, N, Con, N), (Aeg, N, Eas, N),
    (Aeg, N, Gre, N), (Aeg, N, Ion, N), (Aeg, N, Smy, N), (Alb, N, Gre, N),
    (Alb, N, Ion, N), (Alb, N, Tri, N), (Ank, N, Arm, N), (Ank, N, Bla, N),
    (Ank, N, Con, N), (Apu, N, Ion, N), (Apu, N, Nap, N), (Apu, N, Ven, N),
    (Arm, N, Bla, N), (Arm, N, Sev, N), (Bal, N, Ber, N), (Bal, N, Bot, N),
    (Bal, N, Den, N), (Bal, N, Kie, N), (Bal, N, Lvn, N), (Bal, N, Pru, N),
    (Bal, N, Swe, N), (Bar, N, Nrg, N), (Bar, N, Nwy, N), (Bar, N, Stp, NC),
    (Bel, N, Eng, N), (Bel, N, Hol, N), (Bel, N, Nth, N), (Bel, N, Pic, N),
    (Ber, N, Kie, N), (Ber, N, Pru, N), (Bla, N, Bul, EC), (Bla, N, Con, N),
    (Bla, N, Rum, N), (Bla, N, Sev, N), (Bot, N, Fin, N), (Bot, N, Lvn, N),
    (Bot, N, Stp, SC), (Bot, N, Swe, N), (Bre, N, Eng, N), (Bre, N, Gas, N),
    (Bre, N, Mao, N), (Bre, N, Pic, N), (Bul, EC, Con, N), (Bul, EC, Rum, N),
    (Bul, SC, Con, N), (Bul, SC, Gre, N), (Cly, N, Edi, N), (Cly, N, Lvp, N),
    (Cly, N, Nao, N), (Cly, N, Nrg, N), (Con, N, Smy, N), (Den, N, Hel, N),
    (Den, N, Kie, N), (Den, N, Nth, N), (Den, N, Ska, N), (Den, N, Swe, N),
    (Eas, N, Ion, N), (Eas, N, Smy, N), (Eas, N, Syr, N), (Edi, N, Nrg, N),
    (Edi, N, Nth, N), (Edi, N, Yor, N), (Eng, N, Iri, N), (Eng, N, Lon, N),
    (Eng, N, Mao, N), (Eng, N, Nth, N), (Eng, N, Pic, N), (Eng, N, Wal, N),
    (Fin, N, Stp, SC), (Fin, N, Swe, N), (Gas, N, Mao, N), (Gas, N, Spa, NC),
    (Gol, N, Mar, N), (Gol, N, Pie, N), (Gol, N, Spa, SC), (Gol, N, Tus, N),
    (Gol, N, Tys, N), (Gol, N, Wes, N), (Gre, N, Ion, N), (Hel, N, Hol, N),
    (Hel, N, Kie, N), (Hel, N, Nth, N), (Hol, N, Kie, N), (Hol, N, Nth, N),
    (Ion, N, Nap, N), (Ion, N, Tun, N), (Ion, N, Tys, N), (Iri, N, Lvp, N),
    (Iri, N, Mao, N), (Iri, N, Nao, N), (Iri, N, Wal, N), (Lon, N, Nth, N),
    (Lon, N, Wal, N), (Lon, N, Yor, N), (Lvn, N, Pru, N), (Lvn, N, Stp, SC),
    (Lvp, N, Nao, N), (Lvp, N, Wal, N), (Mao, N, Naf, N), (Mao, N, Nao, N),
    (Mao, N, Por, N), (Mao, N, Spa, NC), (Mao, N, Spa, SC), (Mao, N, Wes, N),
    (Mar, N, Pie, N), (Mar, N, Spa, SC), (Naf, N, Tun, N), (Naf, N, Wes, N),
    (Nao, N, Nrg, N), (Nap, N, Rom, N), (Nap, N, Tys, N), (Nrg, N, Nth, N),
    (Nrg, N, Nwy, N), (Nth, N, Nwy, N), (Nth, N, Ska, N), (Nth, N, Yor, N),
    (Nwy, N, Ska, N), (Nwy, N, Stp, NC), (Nwy, N, Swe, N), (Pie, N, Tus, N),
    (Por, N, Spa, NC), (Por, N, Spa, SC), (Rom, N, Tus, N), (Rom, N, Tys, N),
    (Rum, N, Sev, N), (Ska, N, Swe, N), (Smy, N, Syr, N), (Spa, SC, Wes, N),
    (Tri, N, Ven, N), (Tun, N, Tys, N), (Tun, N, Wes, N), (Tus, N, Tys, N),
    (Tys, N, Wes, N),
];

#[derive(Debug, Clone, Copy)]
struct FleetEdge {
    from_coast: Coast,
    to: Province,
    to_coast: Coast,
}

struct MapIndex {
    army: Vec<Vec<Province>>,
    fleet: Vec<Vec<FleetEdge>>,
}

static INDEX: LazyLock<MapIndex> = LazyLock::new(|| {
    let mut army = vec![Vec::new(); PROVINCE_COUNT];
    for &(a, b) in ARMY_EDGES.iter() {
        army[a as usize].push(b);
        army[b as usize].push(a);
    }
    let mut fleet = vec![Vec::new(); PROVINCE_COUNT];
    for &(a, ac, b, bc) in FLEET_EDGES.iter() {
        fleet[a as usize].push(FleetEdge { from_coast: ac, to: b, to_coast: bc });
        fleet[b as usize].push(FleetEdge { from_coast: bc, to: a, to_coast: ac });
    }
    for list in army.iter_mut() {
        list.sort();
    }
    for list in fleet.iter_mut() {
        list.sort_by_key(|e| (e.to, e.to_coast));
    }
    MapIndex { army, fleet }
});

/// Fleet edges leaving `from`, restricted to `from_coast` when one is given.
fn fleet_edges(from: Province, from_coast: Coast) -> impl Iterator<Item = &'static FleetEdge> {
    INDEX.fleet[from as usize]
        .iter()
        .filter(move |e| from_coast == Coast::None || e.from_coast == from_coast)
}

/// Returns true if a unit of `kind` may ever stand in a province of `terrain`.
pub fn can_occupy(kind: UnitKind, terrain: ProvinceKind) -> bool {
    !matches!(
        (kind, terrain),
        (UnitKind::Army, ProvinceKind::Water) | (UnitKind::Fleet, ProvinceKind::Land)
    )
}

/// Provinces a unit may enter with a direct move, in province order.
///
/// A fleet on a split-coast province only uses the edges of its coast; with
/// `Coast::None` it uses all of them.
pub fn valid_moves(province: Province, kind: UnitKind, coast: Coast) -> Vec<Province> {
    match kind {
        UnitKind::Army => INDEX.army[province as usize].clone(),
        UnitKind::Fleet => {
            let mut out: Vec<Province> = fleet_edges(province, coast).map(|e| e.to).collect();
            out.dedup();
            out
        }
    }
}

/// Returns true if a unit of `kind` at `from` (on `from_coast`) borders `to`.
pub fn is_adjacent(from: Province, to: Province, kind: UnitKind, from_coast: Coast) -> bool {
    match kind {
        UnitKind::Army => INDEX.army[from as usize].binary_search(&to).is_ok(),
        UnitKind::Fleet => fleet_edges(from, from_coast).any(|e| e.to == to),
    }
}

/// Coasts of `to` a fleet at `from` can sail into.
///
/// For a province without named coasts this is `[Coast::None]` when the
/// provinces border by sea, and empty otherwise.
pub fn reachable_coasts(from: Province, from_coast: Coast, to: Province) -> Vec<Coast> {
    let mut coasts: Vec<Coast> = fleet_edges(from, from_coast)
        .filter(|e| e.to == to)
        .map(|e| e.to_coast)
        .collect();
    coasts.dedup();
    coasts
}

/// The coast a fleet lands on when moving into a split-coast province.
///
/// `None` when `to` has no named coasts or more than one coast is reachable.
pub fn coast_entered(from: Province, from_coast: Coast, to: Province) -> Option<Coast> {
    if !to.has_coasts() {
        return None;
    }
    match reachable_coasts(from, from_coast, to).as_slice() {
        [only] => Some(*only),
        _ => None,
    }
}

/// Returns true if an army could in principle be convoyed between the two
/// provinces: both touch the sea and they are distinct.
pub fn can_convoy_between(from: Province, to: Province) -> bool {
    from != to && from.kind() == ProvinceKind::Coastal && to.kind() == ProvinceKind::Coastal
}

/// Breadth-first distance in moves from `from` to every province, for the
/// given unit kind (coasts ignored). Unreachable provinces are `None`.
pub fn distances_from(from: Province, kind: UnitKind) -> [Option<u8>; PROVINCE_COUNT] {
    let mut dist = [None; PROVINCE_COUNT];
    dist[from as usize] = Some(0);
    let mut frontier = vec![from];
    let mut depth = 0u8;
    while !frontier.is_empty() {
        depth += 1;
        let mut next = Vec::new();
        for p in frontier {
            for q in valid_moves(p, kind, Coast::None) {
                if dist[q as usize].is_none() {
                    dist[q as usize] = Some(depth);
                    next.push(q);
                }
            }
        }
        frontier = next;
    }
    dist
}
