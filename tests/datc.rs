//! DATC (Diplomacy Adjudicator Test Cases) style tests.
//!
//! Case numbers follow the DATC where a case is taken from it directly.
//! Sections covered: 6.A (basic), 6.B (coastal), 6.C (circular),
//! 6.D (supports), 6.E (head-to-head), 6.F (convoys), 6.H (retreats).

use concordat::board::{Coast, Order, OrdersByPower, Phase, Power, Province, Season, Unit};
use concordat::board::Board;
use concordat::resolve::{apply_results, resolve, FailReason, Illegal, Resolution, Verdict};

use Power::*;
use Province::*;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn board(units: &[Unit]) -> Board {
    let mut b = Board::empty(1901, Season::Spring, Phase::Movement);
    for u in units {
        assert!(b.place_unit(*u), "cannot place {u}");
    }
    b
}

fn run(b: &Board, orders: &[(Power, Order)]) -> Resolution {
    let mut map = OrdersByPower::new();
    for (p, o) in orders {
        map.entry(*p).or_default().push(*o);
    }
    resolve(b, &map)
}

fn verdict(res: &Resolution, p: Province) -> &Verdict {
    res.verdicts
        .iter()
        .find(|v| v.unit.location == p)
        .unwrap_or_else(|| panic!("no verdict for {p}"))
}

fn succeeds(res: &Resolution, p: Province) -> bool {
    verdict(res, p).success
}

fn is_dislodged(res: &Resolution, p: Province) -> bool {
    res.dislodged.iter().any(|d| d.origin == p)
}

// ===========================================================================
// SECTION 6.A: BASIC CHECKS
// ===========================================================================

/// 6.A.1: Moving to an area that is not a neighbour.
#[test]
fn datc_6a1_move_to_non_neighbour() {
    let b = board(&[Unit::fleet(England, Nth)]);
    let res = run(&b, &[(England, Order::move_to(Nth, Pic))]);
    let v = verdict(&res, Nth);
    assert!(!v.success);
    assert_eq!(v.order, Order::hold(Nth));
    assert_eq!(v.reason, Some(FailReason::Illegal(Illegal::Unreachable(Pic))));
}

/// 6.A.2: Move army to sea.
#[test]
fn datc_6a2_army_to_sea() {
    let b = board(&[Unit::army(England, Lvp)]);
    let res = run(&b, &[(England, Order::move_to(Lvp, Iri))]);
    assert_eq!(
        verdict(&res, Lvp).reason,
        Some(FailReason::Illegal(Illegal::Unreachable(Iri)))
    );
}

/// 6.A.3: Move fleet to land.
#[test]
fn datc_6a3_fleet_to_land() {
    let b = board(&[Unit::fleet(Germany, Kie)]);
    let res = run(&b, &[(Germany, Order::move_to(Kie, Mun))]);
    assert!(!succeeds(&res, Kie));
}

/// 6.A.4: Move to own sector.
#[test]
fn datc_6a4_move_to_own_sector() {
    let b = board(&[Unit::fleet(Germany, Kie)]);
    let res = run(&b, &[(Germany, Order::move_to(Kie, Kie))]);
    assert_eq!(
        verdict(&res, Kie).reason,
        Some(FailReason::Illegal(Illegal::MoveToSelf))
    );
}

/// 6.A.7: Only armies can be convoyed.
#[test]
fn datc_6a7_only_armies_can_be_convoyed() {
    let b = board(&[Unit::fleet(England, Lon), Unit::fleet(England, Nth)]);
    let res = run(
        &b,
        &[
            (England, Order::move_to(Lon, Bel)),
            (England, Order::convoy(Nth, Lon, Bel)),
        ],
    );
    assert!(!succeeds(&res, Lon));
    assert_eq!(
        verdict(&res, Nth).reason,
        Some(FailReason::Illegal(Illegal::NotAnArmy))
    );
}

/// 6.A.8: Support to hold yourself is not possible.
#[test]
fn datc_6a8_support_to_hold_yourself() {
    let b = board(&[
        Unit::army(Italy, Ven),
        Unit::army(Italy, Tyr),
        Unit::fleet(Austria, Tri),
    ]);
    let res = run(
        &b,
        &[
            (Italy, Order::move_to(Ven, Tri)),
            (Italy, Order::support_move(Tyr, Ven, Tri)),
            (Austria, Order::support_hold(Tri, Tri)),
        ],
    );
    assert!(succeeds(&res, Ven));
    assert!(is_dislodged(&res, Tri));
}

/// 6.A.9: Fleets must follow coast if not on sea.
#[test]
fn datc_6a9_fleets_follow_coast() {
    let b = board(&[Unit::fleet(Italy, Rom)]);
    let res = run(&b, &[(Italy, Order::move_to(Rom, Ven))]);
    assert!(!succeeds(&res, Rom));
}

/// 6.A.10: Support on unreachable destination not possible.
#[test]
fn datc_6a10_support_on_unreachable_destination() {
    let b = board(&[
        Unit::army(Austria, Ven),
        Unit::fleet(Italy, Rom),
        Unit::army(Italy, Apu),
    ]);
    let res = run(
        &b,
        &[
            (Austria, Order::hold(Ven)),
            (Italy, Order::support_move(Rom, Apu, Ven)),
            (Italy, Order::move_to(Apu, Ven)),
        ],
    );
    assert_eq!(
        verdict(&res, Rom).reason,
        Some(FailReason::Illegal(Illegal::SupportUnreachable(Ven)))
    );
    assert!(!succeeds(&res, Apu));
    assert!(!is_dislodged(&res, Ven));
}

/// 6.A.11: Simple bounce.
#[test]
fn datc_6a11_simple_bounce() {
    let b = board(&[Unit::army(Austria, Vie), Unit::army(Italy, Ven)]);
    let res = run(
        &b,
        &[
            (Austria, Order::move_to(Vie, Tyr)),
            (Italy, Order::move_to(Ven, Tyr)),
        ],
    );
    assert_eq!(verdict(&res, Vie).reason, Some(FailReason::Standoff));
    assert_eq!(verdict(&res, Ven).reason, Some(FailReason::Standoff));
    assert_eq!(res.standoffs, vec![Tyr]);
}

/// 6.A.12: Bounce of three units.
#[test]
fn datc_6a12_bounce_of_three() {
    let b = board(&[
        Unit::army(Austria, Vie),
        Unit::army(Germany, Mun),
        Unit::army(Italy, Ven),
    ]);
    let res = run(
        &b,
        &[
            (Austria, Order::move_to(Vie, Tyr)),
            (Germany, Order::move_to(Mun, Tyr)),
            (Italy, Order::move_to(Ven, Tyr)),
        ],
    );
    assert!(res.verdicts.iter().all(|v| !v.success));
}

/// Holland and Kiel share a border for armies and fleets alike.
#[test]
fn kiel_and_holland_are_neighbours() {
    let b = board(&[Unit::fleet(Germany, Kie), Unit::army(France, Hol)]);
    let res = run(
        &b,
        &[
            (Germany, Order::move_to(Kie, Hol)),
            (France, Order::move_to(Hol, Kie)),
        ],
    );
    assert_eq!(verdict(&res, Kie).order, Order::move_to(Kie, Hol));
    assert_eq!(verdict(&res, Hol).order, Order::move_to(Hol, Kie));
    assert!(!succeeds(&res, Kie));
    assert!(!succeeds(&res, Hol));

    let b = board(&[Unit::fleet(Germany, Kie)]);
    let res = run(&b, &[(Germany, Order::move_to(Kie, Hol))]);
    assert!(succeeds(&res, Kie));
}

// ===========================================================================
// SECTION 6.B: COASTAL ISSUES
// ===========================================================================

/// 6.B.1: Moving with unspecified coast when coast is necessary.
#[test]
fn datc_6b1_unspecified_coast_when_necessary() {
    let b = board(&[Unit::fleet(France, Por)]);
    let res = run(&b, &[(France, Order::move_to(Por, Spa))]);
    assert_eq!(
        verdict(&res, Por).reason,
        Some(FailReason::Illegal(Illegal::AmbiguousCoast(Spa)))
    );
}

/// 6.B.2: Moving with unspecified coast when coast is not necessary.
#[test]
fn datc_6b2_unspecified_coast_inferred() {
    let b = board(&[Unit::fleet(France, Gas)]);
    let res = run(&b, &[(France, Order::move_to(Gas, Spa))]);
    let v = verdict(&res, Gas);
    assert!(v.success);
    assert_eq!(v.order, Order::move_to_coast(Gas, Spa, Coast::North));

    let after = apply_results(&b, &res.verdicts, &res.dislodged);
    assert_eq!(after.unit_at(Spa).map(|u| u.coast), Some(Coast::North));
}

/// 6.B.3: Moving with wrong coast when coast is not necessary.
#[test]
fn datc_6b3_wrong_coast() {
    let b = board(&[Unit::fleet(France, Gas)]);
    let res = run(&b, &[(France, Order::move_to_coast(Gas, Spa, Coast::South))]);
    assert!(!succeeds(&res, Gas));
}

/// 6.B.4: Support to unreachable coast allowed.
#[test]
fn datc_6b4_support_to_unreachable_coast() {
    let b = board(&[
        Unit::fleet(France, Gas),
        Unit::fleet(France, Mar),
        Unit::fleet(Italy, Wes),
    ]);
    let res = run(
        &b,
        &[
            (France, Order::move_to_coast(Gas, Spa, Coast::North)),
            (France, Order::support_move(Mar, Gas, Spa)),
            (Italy, Order::move_to_coast(Wes, Spa, Coast::South)),
        ],
    );
    assert!(succeeds(&res, Gas));
    assert_eq!(verdict(&res, Wes).reason, Some(FailReason::Outgunned));
}

/// 6.B.5: Support from unreachable coast not allowed.
#[test]
fn datc_6b5_support_from_unreachable_coast() {
    let b = board(&[
        Unit::fleet(France, Mar),
        Unit::fleet_on(France, Spa, Coast::North),
        Unit::fleet(Italy, Gol),
    ]);
    let res = run(
        &b,
        &[
            (France, Order::move_to(Mar, Gol)),
            (France, Order::support_move(Spa, Mar, Gol)),
            (Italy, Order::hold(Gol)),
        ],
    );
    assert!(!succeeds(&res, Spa));
    assert!(!succeeds(&res, Mar));
    assert!(!is_dislodged(&res, Gol));
}

/// 6.B.6: Support can be cut with other coast.
#[test]
fn datc_6b6_support_cut_from_other_coast() {
    let b = board(&[
        Unit::fleet(England, Iri),
        Unit::fleet(England, Nao),
        Unit::fleet_on(France, Spa, Coast::North),
        Unit::fleet(France, Mao),
        Unit::fleet(Italy, Gol),
    ]);
    let res = run(
        &b,
        &[
            (England, Order::support_move(Iri, Nao, Mao)),
            (England, Order::move_to(Nao, Mao)),
            (France, Order::support_hold(Spa, Mao)),
            (France, Order::hold(Mao)),
            (Italy, Order::move_to_coast(Gol, Spa, Coast::South)),
        ],
    );
    assert_eq!(verdict(&res, Spa).reason, Some(FailReason::Cut));
    assert!(succeeds(&res, Nao));
    assert!(is_dislodged(&res, Mao));
}

/// 6.B.13: Coastal crawl not allowed.
#[test]
fn datc_6b13_coastal_crawl() {
    let b = board(&[
        Unit::fleet_on(Turkey, Bul, Coast::South),
        Unit::fleet(Turkey, Con),
    ]);
    let res = run(
        &b,
        &[
            (Turkey, Order::move_to(Bul, Con)),
            (Turkey, Order::move_to_coast(Con, Bul, Coast::East)),
        ],
    );
    assert!(!succeeds(&res, Bul));
    assert!(!succeeds(&res, Con));
}

// ===========================================================================
// SECTION 6.C: CIRCULAR MOVEMENT
// ===========================================================================

fn turkish_triangle() -> Vec<Unit> {
    vec![
        Unit::fleet(Turkey, Ank),
        Unit::army(Turkey, Con),
        Unit::army(Turkey, Smy),
    ]
}

fn rotation() -> Vec<(Power, Order)> {
    vec![
        (Turkey, Order::move_to(Ank, Con)),
        (Turkey, Order::move_to(Con, Smy)),
        (Turkey, Order::move_to(Smy, Ank)),
    ]
}

/// 6.C.1: Three army circular movement.
#[test]
fn datc_6c1_three_army_circular_movement() {
    let b = board(&turkish_triangle());
    let res = run(&b, &rotation());
    assert!(res.verdicts.iter().all(|v| v.success));

    let after = apply_results(&b, &res.verdicts, &res.dislodged);
    assert!(after.unit_at(Con).is_some_and(|u| u.is_fleet()));
    assert!(after.unit_at(Ank).is_some_and(|u| !u.is_fleet()));
}

/// 6.C.2: Three army circular movement with support.
#[test]
fn datc_6c2_circular_movement_with_support() {
    let mut units = turkish_triangle();
    units.push(Unit::army(Turkey, Bul));
    let b = board(&units);
    let mut orders = rotation();
    orders.push((Turkey, Order::support_move(Bul, Ank, Con)));
    let res = run(&b, &orders);
    assert!(res.verdicts.iter().all(|v| v.success));
}

/// 6.C.3: A disrupted three army circular movement.
#[test]
fn datc_6c3_disrupted_circular_movement() {
    let mut units = turkish_triangle();
    units.push(Unit::army(Turkey, Bul));
    let b = board(&units);
    let mut orders = rotation();
    orders.push((Turkey, Order::move_to(Bul, Con)));
    let res = run(&b, &orders);
    assert!(res.verdicts.iter().all(|v| !v.success));
    assert!(res.dislodged.is_empty());
}

/// 6.C.4: A circular movement with attacked convoy.
#[test]
fn datc_6c4_circular_movement_with_attacked_convoy() {
    let b = board(&[
        Unit::army(Austria, Tri),
        Unit::army(Austria, Ser),
        Unit::army(Turkey, Bul),
        Unit::fleet(Turkey, Aeg),
        Unit::fleet(Turkey, Ion),
        Unit::fleet(Turkey, Adr),
        Unit::fleet(Italy, Nap),
    ]);
    let res = run(
        &b,
        &[
            (Austria, Order::move_to(Tri, Ser)),
            (Austria, Order::move_to(Ser, Bul)),
            (Turkey, Order::move_to(Bul, Tri)),
            (Turkey, Order::convoy(Aeg, Bul, Tri)),
            (Turkey, Order::convoy(Ion, Bul, Tri)),
            (Turkey, Order::convoy(Adr, Bul, Tri)),
            (Italy, Order::move_to(Nap, Ion)),
        ],
    );
    assert!(succeeds(&res, Tri));
    assert!(succeeds(&res, Ser));
    assert!(succeeds(&res, Bul));
    assert!(!succeeds(&res, Nap));
    assert!(res.dislodged.is_empty());
}

/// 6.C.6: Two armies with two convoys.
#[test]
fn datc_6c6_two_armies_with_two_convoys() {
    let b = board(&[
        Unit::fleet(England, Nth),
        Unit::army(England, Lon),
        Unit::fleet(France, Eng),
        Unit::army(France, Bel),
    ]);
    let res = run(
        &b,
        &[
            (England, Order::convoy(Nth, Lon, Bel)),
            (England, Order::move_to(Lon, Bel)),
            (France, Order::convoy(Eng, Bel, Lon)),
            (France, Order::move_to(Bel, Lon)),
        ],
    );
    assert!(succeeds(&res, Lon));
    assert!(succeeds(&res, Bel));
    assert!(res.dislodged.is_empty());
}

// ===========================================================================
// SECTION 6.D: SUPPORTS AND DISLODGES
// ===========================================================================

/// 6.D.1: Supported hold can prevent dislodgement.
#[test]
fn datc_6d1_supported_hold_prevents_dislodgement() {
    let b = board(&[
        Unit::fleet(Austria, Adr),
        Unit::army(Austria, Tri),
        Unit::army(Italy, Ven),
        Unit::army(Italy, Tyr),
    ]);
    let res = run(
        &b,
        &[
            (Austria, Order::support_move(Adr, Tri, Ven)),
            (Austria, Order::move_to(Tri, Ven)),
            (Italy, Order::hold(Ven)),
            (Italy, Order::support_hold(Tyr, Ven)),
        ],
    );
    assert!(!succeeds(&res, Tri));
    assert!(!is_dislodged(&res, Ven));
}

/// 6.D.2: A move cuts support on hold.
#[test]
fn datc_6d2_move_cuts_support_on_hold() {
    let b = board(&[
        Unit::fleet(Austria, Adr),
        Unit::army(Austria, Tri),
        Unit::army(Austria, Vie),
        Unit::army(Italy, Ven),
        Unit::army(Italy, Tyr),
    ]);
    let res = run(
        &b,
        &[
            (Austria, Order::support_move(Adr, Tri, Ven)),
            (Austria, Order::move_to(Tri, Ven)),
            (Austria, Order::move_to(Vie, Tyr)),
            (Italy, Order::hold(Ven)),
            (Italy, Order::support_hold(Tyr, Ven)),
        ],
    );
    assert_eq!(verdict(&res, Tyr).reason, Some(FailReason::Cut));
    assert!(succeeds(&res, Tri));
    assert!(is_dislodged(&res, Ven));
}

/// 6.D.3: A move cuts support on move.
#[test]
fn datc_6d3_move_cuts_support_on_move() {
    let b = board(&[
        Unit::fleet(Austria, Adr),
        Unit::army(Austria, Tri),
        Unit::army(Italy, Ven),
        Unit::fleet(Italy, Ion),
    ]);
    let res = run(
        &b,
        &[
            (Austria, Order::support_move(Adr, Tri, Ven)),
            (Austria, Order::move_to(Tri, Ven)),
            (Italy, Order::hold(Ven)),
            (Italy, Order::move_to(Ion, Adr)),
        ],
    );
    assert_eq!(verdict(&res, Adr).reason, Some(FailReason::Cut));
    assert!(!succeeds(&res, Tri));
}

/// 6.D.4: Support to hold on unit supporting a hold allowed.
#[test]
fn datc_6d4_support_hold_on_supporting_unit() {
    let b = board(&[
        Unit::army(Germany, Ber),
        Unit::fleet(Germany, Kie),
        Unit::fleet(Russia, Bal),
        Unit::army(Russia, Pru),
    ]);
    let res = run(
        &b,
        &[
            (Germany, Order::support_hold(Ber, Kie)),
            (Germany, Order::support_hold(Kie, Ber)),
            (Russia, Order::support_move(Bal, Pru, Ber)),
            (Russia, Order::move_to(Pru, Ber)),
        ],
    );
    assert!(!succeeds(&res, Pru));
    assert!(!is_dislodged(&res, Ber));
}

/// 6.D.5: Support to hold on unit supporting a move allowed.
#[test]
fn datc_6d5_support_hold_on_unit_supporting_move() {
    let b = board(&[
        Unit::army(Germany, Ber),
        Unit::fleet(Germany, Kie),
        Unit::army(Germany, Mun),
        Unit::fleet(Russia, Bal),
        Unit::army(Russia, Pru),
    ]);
    let res = run(
        &b,
        &[
            (Germany, Order::support_move(Ber, Mun, Sil)),
            (Germany, Order::support_hold(Kie, Ber)),
            (Germany, Order::move_to(Mun, Sil)),
            (Russia, Order::support_move(Bal, Pru, Ber)),
            (Russia, Order::move_to(Pru, Ber)),
        ],
    );
    assert!(!succeeds(&res, Pru));
    assert!(!is_dislodged(&res, Ber));
    assert!(succeeds(&res, Mun));
}

/// 6.D.7: Support to hold on moving unit not allowed.
#[test]
fn datc_6d7_support_hold_on_moving_unit() {
    let b = board(&[
        Unit::fleet(Germany, Bal),
        Unit::fleet(Germany, Pru),
        Unit::fleet(Russia, Lvn),
        Unit::fleet(Russia, Bot),
        Unit::army(Russia, Fin),
    ]);
    let res = run(
        &b,
        &[
            (Germany, Order::move_to(Bal, Swe)),
            (Germany, Order::support_hold(Pru, Bal)),
            (Russia, Order::move_to(Lvn, Bal)),
            (Russia, Order::support_move(Bot, Lvn, Bal)),
            (Russia, Order::move_to(Fin, Swe)),
        ],
    );
    assert_eq!(verdict(&res, Pru).reason, Some(FailReason::Unmatched));
    assert!(succeeds(&res, Lvn));
    assert!(is_dislodged(&res, Bal));
}

/// 6.D.9: Support to move on holding unit not allowed.
#[test]
fn datc_6d9_support_move_on_holding_unit() {
    let b = board(&[
        Unit::army(Italy, Ven),
        Unit::army(Italy, Tyr),
        Unit::army(Austria, Alb),
        Unit::army(Austria, Tri),
    ]);
    let res = run(
        &b,
        &[
            (Italy, Order::move_to(Ven, Tri)),
            (Italy, Order::support_move(Tyr, Ven, Tri)),
            (Austria, Order::support_move(Alb, Tri, Ser)),
            (Austria, Order::hold(Tri)),
        ],
    );
    assert_eq!(verdict(&res, Alb).reason, Some(FailReason::Unmatched));
    assert!(is_dislodged(&res, Tri));
}

/// 6.D.10: Self dislodgment prohibited.
#[test]
fn datc_6d10_self_dislodgment_prohibited() {
    let b = board(&[
        Unit::army(Germany, Ber),
        Unit::fleet(Germany, Kie),
        Unit::army(Germany, Mun),
    ]);
    let res = run(
        &b,
        &[
            (Germany, Order::hold(Ber)),
            (Germany, Order::move_to(Kie, Ber)),
            (Germany, Order::support_move(Mun, Kie, Ber)),
        ],
    );
    assert_eq!(verdict(&res, Kie).reason, Some(FailReason::OwnUnit));
    assert!(res.dislodged.is_empty());
}

/// 6.D.12: Supporting a foreign unit to dislodge own unit prohibited.
#[test]
fn datc_6d12_foreign_support_against_own_unit() {
    let b = board(&[
        Unit::fleet(Austria, Tri),
        Unit::army(Austria, Vie),
        Unit::army(Italy, Ven),
    ]);
    let res = run(
        &b,
        &[
            (Austria, Order::hold(Tri)),
            (Austria, Order::support_move(Vie, Ven, Tri)),
            (Italy, Order::move_to(Ven, Tri)),
        ],
    );
    assert!(!succeeds(&res, Ven));
    assert!(!is_dislodged(&res, Tri));
}

/// 6.D.15: Defender cannot cut support for attack on itself.
#[test]
fn datc_6d15_defender_cannot_cut_support() {
    let b = board(&[
        Unit::fleet(Russia, Con),
        Unit::fleet(Russia, Bla),
        Unit::fleet(Turkey, Ank),
    ]);
    let res = run(
        &b,
        &[
            (Russia, Order::support_move(Con, Bla, Ank)),
            (Russia, Order::move_to(Bla, Ank)),
            (Turkey, Order::move_to(Ank, Con)),
        ],
    );
    assert!(succeeds(&res, Con));
    assert!(succeeds(&res, Bla));
    assert!(is_dislodged(&res, Ank));
}

// ===========================================================================
// SECTION 6.E: HEAD-TO-HEAD BATTLES
// ===========================================================================

/// 6.E.1: Dislodged unit has no effect on attacker's area.
#[test]
fn datc_6e1_dislodged_unit_has_no_effect() {
    let b = board(&[
        Unit::army(Germany, Ber),
        Unit::fleet(Germany, Kie),
        Unit::army(Germany, Sil),
        Unit::army(Russia, Pru),
    ]);
    let res = run(
        &b,
        &[
            (Germany, Order::move_to(Ber, Pru)),
            (Germany, Order::move_to(Kie, Ber)),
            (Germany, Order::support_move(Sil, Ber, Pru)),
            (Russia, Order::move_to(Pru, Ber)),
        ],
    );
    assert!(succeeds(&res, Ber));
    assert!(succeeds(&res, Kie));
    let retreat = res.dislodged.iter().find(|d| d.origin == Pru).unwrap();
    assert_eq!(retreat.attacker_from, Ber);
    assert!(!retreat.legal_destinations.contains(&Ber));
}

/// 6.E.2: No self dislodgement in head-to-head battle.
#[test]
fn datc_6e2_no_self_dislodgement_head_to_head() {
    let b = board(&[
        Unit::army(Germany, Ber),
        Unit::fleet(Germany, Kie),
        Unit::army(Germany, Mun),
    ]);
    let res = run(
        &b,
        &[
            (Germany, Order::move_to(Ber, Kie)),
            (Germany, Order::move_to(Kie, Ber)),
            (Germany, Order::support_move(Mun, Ber, Kie)),
        ],
    );
    assert!(!succeeds(&res, Ber));
    assert!(!succeeds(&res, Kie));
    assert!(res.dislodged.is_empty());
}

/// 6.E.4: Non-dislodged loser has still effect. The French fleet loses
/// its head-to-head battle but is not dislodged, so it still keeps the
/// Austrian army out of Holland.
#[test]
fn datc_6e4_non_dislodged_loser_has_still_effect() {
    let b = board(&[
        Unit::fleet(Germany, Hol),
        Unit::fleet(Germany, Hel),
        Unit::fleet(Germany, Ska),
        Unit::fleet(France, Nth),
        Unit::fleet(France, Bel),
        Unit::fleet(England, Edi),
        Unit::fleet(England, Yor),
        Unit::fleet(England, Nrg),
        Unit::army(Austria, Kie),
        Unit::army(Austria, Ruh),
    ]);
    let res = run(
        &b,
        &[
            (Germany, Order::move_to(Hol, Nth)),
            (Germany, Order::support_move(Hel, Hol, Nth)),
            (Germany, Order::support_move(Ska, Hol, Nth)),
            (France, Order::move_to(Nth, Hol)),
            (France, Order::support_move(Bel, Nth, Hol)),
            (England, Order::support_move(Edi, Nrg, Nth)),
            (England, Order::support_move(Yor, Nrg, Nth)),
            (England, Order::move_to(Nrg, Nth)),
            (Austria, Order::support_move(Kie, Ruh, Hol)),
            (Austria, Order::move_to(Ruh, Hol)),
        ],
    );
    assert_eq!(verdict(&res, Kie).order, Order::support_move(Kie, Ruh, Hol));
    assert!(succeeds(&res, Kie));
    for p in [Hol, Nth, Nrg, Ruh] {
        assert!(!succeeds(&res, p), "{p} should not move");
    }
    assert!(res.dislodged.is_empty());
}

/// 6.E.15: The friendly head to head battle. Both sides of the Berlin-Kiel
/// battle are equally supported, so each still blocks the outside attack
/// on its own province.
#[test]
fn datc_6e15_friendly_head_to_head_battle() {
    let b = board(&[
        Unit::fleet(England, Hol),
        Unit::army(England, Ruh),
        Unit::fleet(France, Kie),
        Unit::army(France, Mun),
        Unit::army(France, Sil),
        Unit::fleet(Germany, Ber),
        Unit::fleet(Germany, Den),
        Unit::fleet(Germany, Hel),
        Unit::fleet(Russia, Bal),
        Unit::army(Russia, Pru),
    ]);
    let res = run(
        &b,
        &[
            (England, Order::support_move(Hol, Ruh, Kie)),
            (England, Order::move_to(Ruh, Kie)),
            (France, Order::move_to(Kie, Ber)),
            (France, Order::support_move(Mun, Kie, Ber)),
            (France, Order::support_move(Sil, Kie, Ber)),
            (Germany, Order::move_to(Ber, Kie)),
            (Germany, Order::support_move(Den, Ber, Kie)),
            (Germany, Order::support_move(Hel, Ber, Kie)),
            (Russia, Order::support_move(Bal, Pru, Ber)),
            (Russia, Order::move_to(Pru, Ber)),
        ],
    );
    assert_eq!(verdict(&res, Hol).order, Order::support_move(Hol, Ruh, Kie));
    assert!(succeeds(&res, Hol));
    for p in [Ruh, Kie, Ber, Pru] {
        assert!(!succeeds(&res, p), "{p} should not move");
    }
    assert!(res.dislodged.is_empty());
}

// ===========================================================================
// SECTION 6.F: CONVOYS
// ===========================================================================

/// 6.F.1: No convoys in coastal areas.
#[test]
fn datc_6f1_no_convoy_in_coastal_areas() {
    let b = board(&[
        Unit::army(Turkey, Gre),
        Unit::fleet(Turkey, Aeg),
        Unit::fleet(Turkey, Con),
        Unit::fleet(Turkey, Bla),
    ]);
    let res = run(
        &b,
        &[
            (Turkey, Order::move_to(Gre, Sev)),
            (Turkey, Order::convoy(Aeg, Gre, Sev)),
            (Turkey, Order::convoy(Con, Gre, Sev)),
            (Turkey, Order::convoy(Bla, Gre, Sev)),
        ],
    );
    assert_eq!(
        verdict(&res, Con).reason,
        Some(FailReason::Illegal(Illegal::NotAtSea))
    );
    assert_eq!(verdict(&res, Gre).reason, Some(FailReason::NoConvoyRoute));
}

/// 6.F.2: An army being convoyed can bounce as normal.
#[test]
fn datc_6f2_convoyed_army_bounces() {
    let b = board(&[
        Unit::fleet(England, Eng),
        Unit::army(England, Lon),
        Unit::army(France, Par),
    ]);
    let res = run(
        &b,
        &[
            (England, Order::convoy(Eng, Lon, Bre)),
            (England, Order::move_to(Lon, Bre)),
            (France, Order::move_to(Par, Bre)),
        ],
    );
    assert!(!succeeds(&res, Lon));
    assert!(!succeeds(&res, Par));
    assert_eq!(res.standoffs, vec![Bre]);
}

/// 6.F.3: An army being convoyed can receive support.
#[test]
fn datc_6f3_convoyed_army_receives_support() {
    let b = board(&[
        Unit::fleet(England, Eng),
        Unit::army(England, Lon),
        Unit::fleet(England, Mao),
        Unit::army(France, Par),
    ]);
    let res = run(
        &b,
        &[
            (England, Order::convoy(Eng, Lon, Bre)),
            (England, Order::move_to(Lon, Bre)),
            (England, Order::support_move(Mao, Lon, Bre)),
            (France, Order::move_to(Par, Bre)),
        ],
    );
    assert!(succeeds(&res, Lon));
    assert_eq!(verdict(&res, Par).reason, Some(FailReason::Outgunned));
}

/// 6.F.4: An attacked convoy is not disrupted.
#[test]
fn datc_6f4_attacked_convoy_not_disrupted() {
    let b = board(&[
        Unit::fleet(England, Nth),
        Unit::army(England, Lon),
        Unit::fleet(Germany, Ska),
    ]);
    let res = run(
        &b,
        &[
            (England, Order::convoy(Nth, Lon, Hol)),
            (England, Order::move_to(Lon, Hol)),
            (Germany, Order::move_to(Ska, Nth)),
        ],
    );
    assert!(succeeds(&res, Lon));
    assert!(succeeds(&res, Nth));
}

/// 6.F.5: A beleaguered convoy is not disrupted.
#[test]
fn datc_6f5_beleaguered_convoy() {
    let b = board(&[
        Unit::fleet(England, Nth),
        Unit::army(England, Lon),
        Unit::fleet(France, Eng),
        Unit::fleet(France, Bel),
        Unit::fleet(Germany, Ska),
        Unit::fleet(Germany, Den),
    ]);
    let res = run(
        &b,
        &[
            (England, Order::convoy(Nth, Lon, Hol)),
            (England, Order::move_to(Lon, Hol)),
            (France, Order::move_to(Eng, Nth)),
            (France, Order::support_move(Bel, Eng, Nth)),
            (Germany, Order::move_to(Ska, Nth)),
            (Germany, Order::support_move(Den, Ska, Nth)),
        ],
    );
    assert!(succeeds(&res, Lon));
    assert!(!is_dislodged(&res, Nth));
}

/// 6.F.6: Dislodged convoy does not cut support.
#[test]
fn datc_6f6_dislodged_convoy_does_not_cut_support() {
    let b = board(&[
        Unit::fleet(England, Nth),
        Unit::army(England, Lon),
        Unit::army(Germany, Hol),
        Unit::army(Germany, Bel),
        Unit::fleet(Germany, Hel),
        Unit::fleet(Germany, Ska),
        Unit::army(France, Pic),
        Unit::army(France, Bur),
    ]);
    let res = run(
        &b,
        &[
            (England, Order::convoy(Nth, Lon, Hol)),
            (England, Order::move_to(Lon, Hol)),
            (Germany, Order::support_hold(Hol, Bel)),
            (Germany, Order::support_hold(Bel, Hol)),
            (Germany, Order::support_move(Hel, Ska, Nth)),
            (Germany, Order::move_to(Ska, Nth)),
            (France, Order::move_to(Pic, Bel)),
            (France, Order::support_move(Bur, Pic, Bel)),
        ],
    );
    assert!(is_dislodged(&res, Nth));
    assert_eq!(verdict(&res, Lon).reason, Some(FailReason::NoConvoyRoute));
    assert!(succeeds(&res, Hol));
    assert!(!succeeds(&res, Pic));
    assert!(!is_dislodged(&res, Bel));
}

/// 6.F.7: Dislodged convoy does not cause contested area.
#[test]
fn datc_6f7_dislodged_convoy_leaves_no_standoff() {
    let b = board(&[
        Unit::fleet(England, Nth),
        Unit::army(England, Lon),
        Unit::fleet(Germany, Hel),
        Unit::fleet(Germany, Ska),
    ]);
    let res = run(
        &b,
        &[
            (England, Order::convoy(Nth, Lon, Hol)),
            (England, Order::move_to(Lon, Hol)),
            (Germany, Order::support_move(Hel, Ska, Nth)),
            (Germany, Order::move_to(Ska, Nth)),
        ],
    );
    let retreat = res.dislodged.iter().find(|d| d.origin == Nth).unwrap();
    assert!(retreat.legal_destinations.contains(&Hol));
    assert!(!retreat.legal_destinations.contains(&Ska));
}

/// 6.F.8: Dislodged convoy does not cause a bounce.
#[test]
fn datc_6f8_dislodged_convoy_does_not_bounce() {
    let b = board(&[
        Unit::fleet(England, Nth),
        Unit::army(England, Lon),
        Unit::fleet(Germany, Hel),
        Unit::fleet(Germany, Ska),
        Unit::army(Germany, Bel),
    ]);
    let res = run(
        &b,
        &[
            (England, Order::convoy(Nth, Lon, Hol)),
            (England, Order::move_to(Lon, Hol)),
            (Germany, Order::support_move(Hel, Ska, Nth)),
            (Germany, Order::move_to(Ska, Nth)),
            (Germany, Order::move_to(Bel, Hol)),
        ],
    );
    assert!(succeeds(&res, Bel));
    assert!(!succeeds(&res, Lon));
}

/// 6.F.14: Simple convoy paradox. The convoyed attack would cut the
/// support that dislodges the convoying fleet; the convoy fails.
#[test]
fn datc_6f14_simple_convoy_paradox() {
    let b = board(&[
        Unit::fleet(England, Lon),
        Unit::fleet(England, Wal),
        Unit::army(France, Bre),
        Unit::fleet(France, Eng),
    ]);
    let res = run(
        &b,
        &[
            (England, Order::support_move(Lon, Wal, Eng)),
            (England, Order::move_to(Wal, Eng)),
            (France, Order::move_to(Bre, Lon)),
            (France, Order::convoy(Eng, Bre, Lon)),
        ],
    );
    assert!(succeeds(&res, Lon));
    assert!(succeeds(&res, Wal));
    assert!(!succeeds(&res, Bre));
    assert!(is_dislodged(&res, Eng));
}

/// Convoy over two fleets: the route holds only while both do.
#[test]
fn convoy_chain_of_two_fleets() {
    let units = [
        Unit::army(England, Lon),
        Unit::fleet(England, Eng),
        Unit::fleet(England, Mao),
    ];
    let orders = [
        (England, Order::move_to(Lon, Por)),
        (England, Order::convoy(Eng, Lon, Por)),
        (England, Order::convoy(Mao, Lon, Por)),
    ];
    let res = run(&board(&units), &orders);
    assert!(succeeds(&res, Lon));

    let mut units = units.to_vec();
    units.push(Unit::fleet(France, Bre));
    units.push(Unit::fleet(France, Gas));
    let mut orders = orders.to_vec();
    orders.push((France, Order::move_to(Bre, Mao)));
    orders.push((France, Order::support_move(Gas, Bre, Mao)));
    let res = run(&board(&units), &orders);
    assert!(is_dislodged(&res, Mao));
    assert_eq!(verdict(&res, Lon).reason, Some(FailReason::NoConvoyRoute));
}

// ===========================================================================
// SECTION 6.H: RETREATING
// ===========================================================================

/// Retreats exclude the attacker's origin, occupied provinces and standoffs.
#[test]
fn datc_6h_retreat_destinations() {
    let b = board(&[
        Unit::army(France, Bur),
        Unit::army(France, Bre),
        Unit::army(England, Bel),
        Unit::army(Germany, Mun),
        Unit::army(Germany, Ruh),
    ]);
    let res = run(
        &b,
        &[
            (France, Order::hold(Bur)),
            (France, Order::move_to(Bre, Pic)),
            (England, Order::move_to(Bel, Pic)),
            (Germany, Order::move_to(Mun, Bur)),
            (Germany, Order::support_move(Ruh, Mun, Bur)),
        ],
    );
    assert_eq!(res.standoffs, vec![Pic]);
    let retreat = res.dislodged.iter().find(|d| d.origin == Bur).unwrap();
    assert_eq!(retreat.attacker_from, Mun);
    assert_eq!(retreat.legal_destinations, vec![Gas, Mar, Par]);
}

/// A unit with every neighbour blocked must disband.
#[test]
fn datc_6h_no_retreat_possible() {
    let b = board(&[
        Unit::fleet(England, Nwy),
        Unit::fleet(England, Nth),
        Unit::fleet(Russia, Ska),
        Unit::fleet(Russia, Nrg),
        Unit::army(Russia, Swe),
        Unit::fleet(Russia, Bar),
        Unit::army(Russia, Fin),
        Unit::army(Russia, Stp),
    ]);
    let res = run(
        &b,
        &[
            (Russia, Order::move_to(Ska, Nwy)),
            (Russia, Order::support_move(Nrg, Ska, Nwy)),
        ],
    );
    let retreat = res.dislodged.iter().find(|d| d.origin == Nwy).unwrap();
    assert!(retreat.must_disband(), "{:?}", retreat.legal_destinations);
}

/// A unit dislodged by a convoyed army cannot retreat to the army's origin.
#[test]
fn datc_6h_convoyed_attacker_origin_is_not_a_retreat() {
    let b = board(&[
        Unit::army(England, Hol),
        Unit::fleet(England, Nth),
        Unit::fleet(England, Eng),
        Unit::army(England, Lon),
        Unit::army(France, Bel),
    ]);
    let res = run(
        &b,
        &[
            (England, Order::convoy(Nth, Lon, Bel)),
            (England, Order::move_to(Lon, Bel)),
            (England, Order::support_move(Eng, Lon, Bel)),
        ],
    );
    assert!(succeeds(&res, Lon));
    let retreat = res.dislodged.iter().find(|d| d.origin == Bel).unwrap();
    assert_eq!(retreat.attacker_from, Lon);
    assert_eq!(retreat.legal_destinations, vec![Bur, Pic, Ruh]);
}
