//! Movement-phase adjudication.
//!
//! Every order is a yes/no decision: a move succeeds, a support is given, a
//! convoy holds. Decisions are resolved on demand with Kruijswijk's
//! guess-and-check scheme. Resolving one decision may ask for others; a
//! decision that is asked for while it is itself being resolved returns its
//! current guess and is recorded as a dependency. When a decision turns out
//! to depend on its own guess, both guesses are tried. Exactly one
//! consistent outcome is taken as is; none or two are settled by the backup
//! rule (circular movement succeeds, a convoy paradox fails the convoyed
//! moves involved). There is no iteration bound: every cycle is either
//! settled or broken by the backup rule.

use std::fmt;

use log::{debug, trace, warn};

use crate::board::map::{is_adjacent, valid_moves};
use crate::board::order::{Order, OrdersByPower};
use crate::board::province::{Coast, Power, Province, ProvinceKind, PROVINCE_COUNT};
use crate::board::state::Board;
use crate::board::unit::{Unit, UnitKind};

use super::validate::{validate, Illegal};

/// Why an order did not succeed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FailReason {
    /// Structurally impossible; the unit held instead.
    Illegal(Illegal),
    /// Not strong enough to enter against the unit holding the province.
    Bounced,
    /// Tied with another unit moving to the same province.
    Standoff,
    /// Beaten by a stronger unit moving to the same province.
    Outgunned,
    /// Lost or tied a battle against a unit moving the opposite way.
    HeadToHead,
    /// No unbroken chain of convoying fleets.
    NoConvoyRoute,
    /// The destination is held by a unit of the same power.
    OwnUnit,
    /// Support cut by an attack on the supporting unit.
    Cut,
    /// The supported or convoyed unit did not carry out the matching order.
    Unmatched,
    /// Driven out by the unit that came from `by`.
    Dislodged { by: Province },
}

impl fmt::Display for FailReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailReason::Illegal(cause) => write!(f, "Illegal order: {cause}"),
            FailReason::Bounced => f.write_str("Bounced"),
            FailReason::Standoff => f.write_str("Standoff"),
            FailReason::Outgunned => f.write_str("Outgunned"),
            FailReason::HeadToHead => f.write_str("Head-to-head standoff"),
            FailReason::NoConvoyRoute => f.write_str("No convoy route"),
            FailReason::OwnUnit => f.write_str("Cannot dislodge own unit"),
            FailReason::Cut => f.write_str("Support cut"),
            FailReason::Unmatched => f.write_str("Order not matched"),
            FailReason::Dislodged { by } => write!(f, "Dislodged from {by}"),
        }
    }
}

/// The outcome of one unit's order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Verdict {
    pub power: Power,
    pub unit: Unit,
    /// The order as submitted, `None` if the unit was defaulted to hold.
    pub submitted: Option<Order>,
    /// The order actually carried out: normalised, or a hold if illegal.
    pub order: Order,
    pub success: bool,
    pub reason: Option<FailReason>,
}

impl Verdict {
    /// Destination of a successful move.
    pub fn moved_to(&self) -> Option<(Province, Coast)> {
        match self.order {
            Order::Move { dest, coast, .. } if self.success => Some((dest, coast)),
            _ => None,
        }
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.success, self.reason) {
            (false, Some(reason)) => write!(f, "{} fails: {reason}", self.unit),
            _ => {
                write!(f, "{} ", self.unit)?;
                match self.order {
                    Order::Hold { .. } => f.write_str("holds")?,
                    Order::Move { dest, .. } => write!(f, "-> {dest}")?,
                    Order::Support {
                        supported,
                        dest: None,
                        ..
                    } => write!(f, "supports {supported}")?,
                    Order::Support {
                        supported,
                        dest: Some(dest),
                        ..
                    } => write!(f, "supports {supported} -> {dest}")?,
                    Order::Convoy { convoyed, dest, .. } => {
                        write!(f, "convoys {convoyed} -> {dest}")?
                    }
                }
                f.write_str(" succeeds")
            }
        }
    }
}

/// A dislodged unit and where it may retreat to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetreatOption {
    pub unit: Unit,
    pub origin: Province,
    pub attacker_from: Province,
    /// Empty when the unit has nowhere to go and will be disbanded.
    pub legal_destinations: Vec<Province>,
}

impl RetreatOption {
    pub fn must_disband(&self) -> bool {
        self.legal_destinations.is_empty()
    }
}

/// Everything a movement phase produces.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    /// One verdict per unit on the board, in province order.
    pub verdicts: Vec<Verdict>,
    pub dislodged: Vec<RetreatOption>,
    /// Provinces where two or more moves bounced off each other.
    pub standoffs: Vec<Province>,
    /// One display line per verdict.
    pub log: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SlotState {
    Unresolved,
    Guessing,
    Resolved,
}

/// Per-unit working state.
#[derive(Debug, Clone, Copy)]
struct Slot {
    power: Power,
    unit: Unit,
    submitted: Option<Order>,
    order: Order,
    illegal: Option<Illegal>,
    /// Army move to a province it does not border.
    convoyed: bool,
    /// Set by the backup rule when this move's convoy is paradoxical.
    convoy_broken: bool,
    state: SlotState,
    result: bool,
}

impl Slot {
    fn dest(&self) -> Option<Province> {
        self.order.move_dest()
    }

    fn moves_to(&self, province: Province) -> bool {
        self.dest() == Some(province)
    }
}

/// Reusable adjudicator.
///
/// Holds the slot buffer and province lookup between calls so repeated
/// adjudication (as the AI does) does not reallocate them.
pub struct Adjudicator {
    lookup: [Option<u8>; PROVINCE_COUNT],
    slots: Vec<Slot>,
    deps: Vec<usize>,
}

impl Default for Adjudicator {
    fn default() -> Self {
        Self::new()
    }
}

impl Adjudicator {
    pub fn new() -> Self {
        Adjudicator {
            lookup: [None; PROVINCE_COUNT],
            slots: Vec::with_capacity(34),
            deps: Vec::new(),
        }
    }

    /// Resolves one movement phase. `board` is left untouched.
    pub fn resolve(&mut self, board: &Board, orders: &OrdersByPower) -> Resolution {
        self.init(board, orders);
        for i in 0..self.slots.len() {
            self.resolve_slot(i);
        }
        debug_assert!(self.deps.is_empty(), "unsettled dependencies after resolution");
        debug_assert!(self.slots.iter().all(|s| s.state == SlotState::Resolved));
        self.build_resolution()
    }

    fn init(&mut self, board: &Board, orders: &OrdersByPower) {
        self.lookup.fill(None);
        self.slots.clear();
        self.deps.clear();

        for unit in board.units() {
            self.lookup[unit.location as usize] = Some(self.slots.len() as u8);
            self.slots.push(Slot {
                power: unit.owner,
                unit: *unit,
                submitted: None,
                order: Order::hold(unit.location),
                illegal: None,
                convoyed: false,
                convoy_broken: false,
                state: SlotState::Unresolved,
                result: false,
            });
        }

        for (&power, list) in orders {
            for order in list {
                let Some(i) = self.index_at(order.unit()) else {
                    debug!("{power}: ignoring order for empty province {}", order.unit());
                    continue;
                };
                let slot = &mut self.slots[i];
                if slot.power != power {
                    debug!("{power}: ignoring order for foreign unit {}", slot.unit);
                    continue;
                }
                if slot.submitted.is_some() {
                    debug!("{power}: ignoring duplicate order for {}", slot.unit);
                    continue;
                }
                slot.submitted = Some(*order);
            }
        }

        for slot in self.slots.iter_mut() {
            let Some(order) = slot.submitted else { continue };
            match validate(board, &slot.unit, &order) {
                Ok(valid) => {
                    slot.order = valid;
                    slot.convoyed = match valid {
                        Order::Move { dest, .. } => {
                            slot.unit.kind == UnitKind::Army
                                && !is_adjacent(slot.unit.location, dest, UnitKind::Army, Coast::None)
                        }
                        _ => false,
                    };
                }
                Err(cause) => {
                    debug!("{}: {} ordered illegally: {cause}", slot.power, slot.unit);
                    slot.illegal = Some(cause);
                }
            }
        }
    }

    fn index_at(&self, province: Province) -> Option<usize> {
        self.lookup[province as usize].map(usize::from)
    }

    /// Resolves decision `i`, following Kruijswijk's recursion.
    fn resolve_slot(&mut self, i: usize) -> bool {
        match self.slots[i].state {
            SlotState::Resolved => return self.slots[i].result,
            SlotState::Guessing => {
                // Recorded on every use so callers see they relied on a guess.
                self.deps.push(i);
                return self.slots[i].result;
            }
            SlotState::Unresolved => {}
        }

        let base = self.deps.len();
        self.slots[i].state = SlotState::Guessing;
        self.slots[i].result = false;
        let first = self.adjudicate(i);

        if self.deps.len() == base {
            // Independent of any guess.
            if self.slots[i].state != SlotState::Resolved {
                self.settle(i, first);
            }
            return self.slots[i].result;
        }

        if self.deps[base] != i {
            // Depends on a guess further up the stack.
            self.deps.push(i);
            self.slots[i].result = first;
            return first;
        }

        self.unwind(base);
        self.slots[i].state = SlotState::Guessing;
        self.slots[i].result = true;
        let second = self.adjudicate(i);

        if first == second {
            self.unwind(base);
            self.settle(i, first);
            return first;
        }

        self.backup_rule(base);
        self.resolve_slot(i)
    }

    fn settle(&mut self, i: usize, result: bool) {
        self.slots[i].state = SlotState::Resolved;
        self.slots[i].result = result;
    }

    /// Drops dependencies recorded since `base`, marking them unresolved.
    fn unwind(&mut self, base: usize) {
        for d in self.deps.drain(base..) {
            self.slots[d].state = SlotState::Unresolved;
        }
    }

    /// Settles a cycle that has zero or two consistent outcomes.
    fn backup_rule(&mut self, base: usize) {
        let mut cycle: Vec<usize> = self.deps.drain(base..).collect();
        cycle.sort_unstable();
        cycle.dedup();
        let mut broken = 0;
        for &d in &cycle {
            if let Order::Convoy { convoyed, dest, .. } = self.slots[d].order {
                if let Some(m) = self.index_at(convoyed) {
                    let mover = &mut self.slots[m];
                    if mover.convoyed && mover.moves_to(dest) && !mover.convoy_broken {
                        mover.convoy_broken = true;
                        broken += 1;
                    }
                }
            }
        }
        if broken > 0 {
            // Szykman: convoyed moves through the paradox fail.
            warn!("convoy paradox, {broken} convoyed moves fail");
            for &d in &cycle {
                self.slots[d].state = SlotState::Unresolved;
            }
            return;
        }

        let moves = cycle.iter().filter(|&&d| self.slots[d].order.is_move()).count();
        if moves == 0 {
            warn!("cycle of {} orders without moves, settling as failed", cycle.len());
        } else {
            debug!("circular movement of {moves} units");
        }
        for &d in &cycle {
            if self.slots[d].order.is_move() || moves == 0 {
                self.settle(d, moves > 0);
            } else {
                self.slots[d].state = SlotState::Unresolved;
            }
        }
    }

    /// Evaluates decision `i` given the current guesses.
    fn adjudicate(&mut self, i: usize) -> bool {
        match self.slots[i].order {
            Order::Hold { .. } => true,
            Order::Move { .. } => self.adjudicate_move(i),
            Order::Support { .. } => self.adjudicate_support(i),
            Order::Convoy { .. } => !self.is_dislodged(i),
        }
    }

    fn adjudicate_move(&mut self, i: usize) -> bool {
        let slot = self.slots[i];
        let Some(dest) = slot.dest() else { return false };

        if slot.convoyed && !self.convoy_path(i) {
            return false;
        }
        let attack = self.attack_strength(i);
        if attack == 0 {
            return false;
        }

        match self.head_to_head(i) {
            Some(j) => {
                if attack <= self.defend_strength(j) {
                    return false;
                }
            }
            None => {
                if attack <= self.hold_strength(dest) {
                    return false;
                }
            }
        }

        for k in 0..self.slots.len() {
            if k != i && self.slots[k].moves_to(dest) && attack <= self.prevent_strength(k) {
                return false;
            }
        }
        true
    }

    fn adjudicate_support(&mut self, i: usize) -> bool {
        if !self.support_matched(i) {
            return false;
        }
        let slot = self.slots[i];
        let Order::Support {
            supported, dest, ..
        } = slot.order
        else {
            return false;
        };
        let here = slot.unit.location;

        for k in 0..self.slots.len() {
            let attacker = self.slots[k];
            if !attacker.moves_to(here) || attacker.unit.location == supported {
                continue;
            }
            // The unit attacked by the supported move can only cut by
            // dislodging, which is checked below.
            if Some(attacker.unit.location) == dest {
                continue;
            }
            if attacker.convoyed && !self.convoy_path(k) {
                continue;
            }
            return false;
        }
        !self.is_dislodged(i)
    }

    /// Whether the supported unit carries out the order being supported.
    fn support_matched(&self, i: usize) -> bool {
        let Order::Support {
            supported, dest, ..
        } = self.slots[i].order
        else {
            return false;
        };
        let Some(j) = self.index_at(supported) else {
            return false;
        };
        match dest {
            None => !self.slots[j].order.is_move(),
            Some(dest) => self.slots[j].moves_to(dest),
        }
    }

    fn convoy_matched(&self, i: usize) -> bool {
        let Order::Convoy { convoyed, dest, .. } = self.slots[i].order else {
            return false;
        };
        self.index_at(convoyed)
            .map(|j| self.slots[j].convoyed && self.slots[j].moves_to(dest))
            .unwrap_or(false)
    }

    /// Whether some move into the unit's province succeeds.
    fn is_dislodged(&mut self, i: usize) -> bool {
        let here = self.slots[i].unit.location;
        for k in 0..self.slots.len() {
            if self.slots[k].moves_to(here) && self.resolve_slot(k) {
                return true;
            }
        }
        false
    }

    /// Index of the unit in `i`'s destination if the two swap places directly.
    fn head_to_head(&self, i: usize) -> Option<usize> {
        let slot = &self.slots[i];
        let j = self.index_at(slot.dest()?)?;
        let other = &self.slots[j];
        (other.moves_to(slot.unit.location) && !slot.convoyed && !other.convoyed).then_some(j)
    }

    /// Breadth-first search over successful convoy orders for move `i`.
    fn convoy_path(&mut self, i: usize) -> bool {
        let slot = self.slots[i];
        let Some(dest) = slot.dest() else { return false };
        if slot.convoy_broken {
            return false;
        }
        let from = slot.unit.location;

        let fleets: Vec<usize> = (0..self.slots.len())
            .filter(|&k| match self.slots[k].order {
                Order::Convoy {
                    convoyed, dest: d, ..
                } => {
                    convoyed == from
                        && d == dest
                        && self.slots[k].unit.location.kind() == ProvinceKind::Water
                }
                _ => false,
            })
            .collect();

        let mut visited = vec![false; fleets.len()];
        let mut frontier = vec![from];
        while let Some(at) = frontier.pop() {
            for (n, &k) in fleets.iter().enumerate() {
                let sea = self.slots[k].unit.location;
                if visited[n] || !is_adjacent(at, sea, UnitKind::Fleet, Coast::None) {
                    continue;
                }
                visited[n] = true;
                if !self.resolve_slot(k) {
                    continue;
                }
                if is_adjacent(sea, dest, UnitKind::Fleet, Coast::None) {
                    return true;
                }
                frontier.push(sea);
            }
        }
        false
    }

    /// Sum of successful supports for the move of `i`, skipping supporters
    /// of `exclude`.
    fn move_support(&mut self, i: usize, exclude: Option<Power>) -> u32 {
        let from = self.slots[i].unit.location;
        let Some(dest) = self.slots[i].dest() else { return 0 };
        let mut total = 0;
        for k in 0..self.slots.len() {
            let Order::Support {
                supported,
                dest: Some(d),
                ..
            } = self.slots[k].order
            else {
                continue;
            };
            if supported != from || d != dest || Some(self.slots[k].power) == exclude {
                continue;
            }
            if self.resolve_slot(k) {
                total += 1;
            }
        }
        total
    }

    fn attack_strength(&mut self, i: usize) -> u32 {
        let slot = self.slots[i];
        let Some(dest) = slot.dest() else { return 0 };
        if slot.convoyed && !self.convoy_path(i) {
            return 0;
        }

        let occupant = match self.index_at(dest) {
            None => None,
            Some(j) => {
                let leaves = self.slots[j].order.is_move()
                    && self.head_to_head(i).is_none()
                    && self.resolve_slot(j);
                (!leaves).then_some(self.slots[j].power)
            }
        };

        match occupant {
            Some(owner) if owner == slot.power => 0,
            Some(owner) => 1 + self.move_support(i, Some(owner)),
            None => 1 + self.move_support(i, None),
        }
    }

    fn hold_strength(&mut self, province: Province) -> u32 {
        let Some(j) = self.index_at(province) else { return 0 };
        if self.slots[j].order.is_move() {
            return if self.resolve_slot(j) { 0 } else { 1 };
        }
        let mut total = 1;
        for k in 0..self.slots.len() {
            let Order::Support {
                supported,
                dest: None,
                ..
            } = self.slots[k].order
            else {
                continue;
            };
            if supported == province && self.resolve_slot(k) {
                total += 1;
            }
        }
        total
    }

    fn defend_strength(&mut self, j: usize) -> u32 {
        1 + self.move_support(j, None)
    }

    fn prevent_strength(&mut self, k: usize) -> u32 {
        let slot = self.slots[k];
        if slot.convoyed && !self.convoy_path(k) {
            return 0;
        }
        if let Some(j) = self.head_to_head(k) {
            if self.resolve_slot(j) {
                return 0;
            }
        }
        1 + self.move_support(k, None)
    }

    fn build_resolution(&mut self) -> Resolution {
        let n = self.slots.len();

        let mut dislodged_by: Vec<Option<usize>> = vec![None; n];
        for i in 0..n {
            let slot = self.slots[i];
            if slot.order.is_move() && slot.result {
                continue;
            }
            let here = slot.unit.location;
            dislodged_by[i] = (0..n).find(|&k| self.slots[k].moves_to(here) && self.slots[k].result);
        }

        let mut contested = [0u8; PROVINCE_COUNT];
        let mut entered = [false; PROVINCE_COUNT];
        for slot in &self.slots {
            if let Some(dest) = slot.dest() {
                contested[dest as usize] += 1;
                if slot.result {
                    entered[dest as usize] = true;
                }
            }
        }
        let standoffs: Vec<Province> = self
            .slots
            .iter()
            .filter_map(|s| s.dest())
            .filter(|d| contested[*d as usize] >= 2 && !entered[*d as usize])
            .collect::<std::collections::BTreeSet<_>>()
            .into_iter()
            .collect();

        let mut occupied = [false; PROVINCE_COUNT];
        for (i, slot) in self.slots.iter().enumerate() {
            match slot.dest() {
                Some(dest) if slot.result => occupied[dest as usize] = true,
                _ if dislodged_by[i].is_none() => occupied[slot.unit.location as usize] = true,
                _ => {}
            }
        }

        let mut verdicts = Vec::with_capacity(n);
        let mut dislodged = Vec::new();
        for i in 0..n {
            let slot = self.slots[i];
            let by = dislodged_by[i].map(|k| self.slots[k]);
            let (success, reason) = self.diagnose(i, by.map(|b| b.unit.location));
            verdicts.push(Verdict {
                power: slot.power,
                unit: slot.unit,
                submitted: slot.submitted,
                order: slot.order,
                success,
                reason,
            });

            if let Some(attacker) = by {
                let origin = slot.unit.location;
                let legal_destinations = valid_moves(origin, slot.unit.kind, slot.unit.coast)
                    .into_iter()
                    .filter(|p| {
                        *p != attacker.unit.location
                            && !occupied[*p as usize]
                            && !standoffs.contains(p)
                    })
                    .collect();
                dislodged.push(RetreatOption {
                    unit: slot.unit,
                    origin,
                    attacker_from: attacker.unit.location,
                    legal_destinations,
                });
            }
        }

        let log: Vec<String> = verdicts.iter().map(|v| v.to_string()).collect();
        for line in &log {
            trace!("{line}");
        }

        Resolution {
            verdicts,
            dislodged,
            standoffs,
            log,
        }
    }

    /// Success flag and failure reason for a fully resolved slot.
    fn diagnose(&mut self, i: usize, dislodged_from: Option<Province>) -> (bool, Option<FailReason>) {
        let slot = self.slots[i];
        if let Some(cause) = slot.illegal {
            return (false, Some(FailReason::Illegal(cause)));
        }
        let dislodged = dislodged_from.map(|by| FailReason::Dislodged { by });

        match slot.order {
            Order::Hold { .. } => match dislodged {
                Some(reason) => (false, Some(reason)),
                None => (true, None),
            },
            Order::Convoy { .. } => {
                if !self.convoy_matched(i) {
                    (false, Some(FailReason::Unmatched))
                } else if let Some(reason) = dislodged {
                    (false, Some(reason))
                } else {
                    (true, None)
                }
            }
            Order::Support { .. } => {
                if slot.result {
                    (true, None)
                } else if !self.support_matched(i) {
                    (false, Some(FailReason::Unmatched))
                } else if let Some(reason) = dislodged {
                    (false, Some(reason))
                } else {
                    (false, Some(FailReason::Cut))
                }
            }
            Order::Move { .. } => {
                if slot.result {
                    (true, None)
                } else {
                    (false, Some(self.move_failure(i)))
                }
            }
        }
    }

    fn move_failure(&mut self, i: usize) -> FailReason {
        let slot = self.slots[i];
        let Some(dest) = slot.dest() else {
            return FailReason::Bounced;
        };
        if slot.convoyed && !self.convoy_path(i) {
            return FailReason::NoConvoyRoute;
        }
        let attack = self.attack_strength(i);
        if attack == 0 {
            return FailReason::OwnUnit;
        }
        let mut strongest = 0;
        for k in 0..self.slots.len() {
            if k != i && self.slots[k].moves_to(dest) {
                strongest = strongest.max(self.prevent_strength(k));
            }
        }
        if strongest > attack {
            FailReason::Outgunned
        } else if strongest == attack {
            FailReason::Standoff
        } else if self.head_to_head(i).is_some() {
            FailReason::HeadToHead
        } else {
            FailReason::Bounced
        }
    }
}

/// Resolves one movement phase with a fresh adjudicator.
pub fn resolve(board: &Board, orders: &OrdersByPower) -> Resolution {
    Adjudicator::new().resolve(board, orders)
}
