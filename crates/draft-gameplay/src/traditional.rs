use crate::log::PickRecord;
use crate::seat::{neg_mod, virtual_player_order, Seat};
use draft_bot::BotAgent;
use draft_cards::{CardId, Catalog};
use draft_core::{DraftError, UserId};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Preparing,
    InRound,
    BetweenRounds,
    Ended,
}

fn remove_first(cards: &mut Vec<CardId>, target: CardId) -> bool {
    if let Some(pos) = cards.iter().position(|&c| c == target) {
        cards.remove(pos);
        true
    } else {
        false
    }
}

/// The traditional rotation draft: a fixed number of virtual players
/// pass packs around the table, alternating direction every other
/// pack, until every pack is empty.
pub struct Traditional {
    phase: Phase,
    paused: bool,
    seats: Vec<Seat>,
    bot_driven: Vec<bool>,
    agents: Vec<Option<BotAgent>>,
    boosters: Vec<Vec<CardId>>,
    burned_per_round: u32,
    booster_number: u32,
    pick_number: u32,
    picked_this_round: Vec<bool>,
    collected: Vec<Vec<CardId>>,
    logs: Vec<Vec<PickRecord>>,
}

impl Traditional {
    /// `humans` must be given in frozen seating order. `boosters` is
    /// exactly `seats.len() * boosters_per_player` packs, already
    /// generated by the caller (one session-wide `generate` call).
    pub fn start(
        humans: &[UserId],
        bots: usize,
        boosters: Vec<Vec<CardId>>,
        burned_per_round: u32,
        catalog: &Catalog,
    ) -> Self {
        let seats = virtual_player_order(humans, bots);
        let v = seats.len();
        let agents = seats
            .iter()
            .enumerate()
            .map(|(i, seat)| match seat {
                Seat::Bot(_) => Some(BotAgent::new(UserId::default(), i)),
                Seat::Human(_) => None,
            })
            .collect();
        let mut draft = Self {
            phase: Phase::Preparing,
            paused: false,
            bot_driven: vec![false; v],
            agents,
            boosters,
            burned_per_round,
            booster_number: 0,
            pick_number: 0,
            picked_this_round: vec![false; v],
            collected: vec![Vec::new(); v],
            logs: vec![Vec::new(); v],
            seats,
        };
        draft.phase = Phase::InRound;
        draft.advance(catalog);
        draft
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn paused(&self) -> bool {
        self.paused
    }

    pub fn pause(&mut self) {
        self.paused = true;
    }

    pub fn resume(&mut self) {
        self.paused = false;
    }

    pub fn pick_number(&self) -> u32 {
        self.pick_number
    }

    pub fn booster_number(&self) -> u32 {
        self.booster_number
    }

    pub fn virtual_player_count(&self) -> usize {
        self.seats.len()
    }

    pub fn collected(&self, pos: usize) -> &[CardId] {
        &self.collected[pos]
    }

    pub fn logs(&self, pos: usize) -> &[PickRecord] {
        &self.logs[pos]
    }

    fn window_start(&self) -> usize {
        self.booster_number as usize * self.seats.len()
    }

    fn booster_index_for(&self, pos: usize) -> usize {
        let offset = if self.booster_number % 2 == 0 {
            -(self.pick_number as i64)
        } else {
            self.pick_number as i64
        };
        neg_mod(offset + pos as i64, self.seats.len())
    }

    fn slot_index_for(&self, pos: usize) -> usize {
        self.window_start() + self.booster_index_for(pos)
    }

    /// The pack currently assigned to virtual player `pos`.
    pub fn current_booster(&self, pos: usize) -> Option<&[CardId]> {
        self.boosters.get(self.slot_index_for(pos)).map(Vec::as_slice)
    }

    /// The seat index a human occupies in the virtual player order
    /// (interleaved with bots — not the same as their position in the
    /// session's seating list).
    pub fn position_of(&self, user: UserId) -> Option<usize> {
        self.seats.iter().position(|s| s.user() == Some(user))
    }

    /// Marks a seat as substituted by a bot, feeding it the user's
    /// prior picks so its color commitments approximate theirs.
    pub fn substitute_with_bot(&mut self, user: UserId, catalog: &Catalog) {
        if let Some(pos) = self.position_of(user) {
            self.bot_driven[pos] = true;
            let mut agent = BotAgent::new(user, pos);
            for &card in &self.collected[pos] {
                let _ = agent.pick(&[card], catalog);
            }
            self.agents[pos] = Some(agent);
        }
    }

    pub fn restore_human(&mut self, user: UserId) {
        if let Some(pos) = self.position_of(user) {
            self.bot_driven[pos] = false;
        }
    }

    /// Validates and commits a human pick; advances the round (and
    /// runs any bot picks the advance unblocks) once every virtual
    /// player has picked.
    pub fn pick_card(
        &mut self,
        user: UserId,
        selected: CardId,
        burned: Vec<CardId>,
        catalog: &Catalog,
    ) -> Result<(), DraftError> {
        if self.paused || self.phase != Phase::InRound {
            return Err(DraftError::validation("draft is not accepting picks"));
        }
        let pos = self
            .position_of(user)
            .ok_or_else(|| DraftError::validation("user is not seated in this draft"))?;
        if self.bot_driven[pos] {
            return Err(DraftError::validation("seat is currently bot-driven"));
        }
        self.commit(pos, selected, burned)?;
        self.advance(catalog);
        Ok(())
    }

    fn commit(&mut self, pos: usize, selected: CardId, burned: Vec<CardId>) -> Result<(), DraftError> {
        if self.picked_this_round[pos] {
            return Err(DraftError::validation("already picked this round"));
        }
        let slot = self.slot_index_for(pos);
        let booster = self.boosters[slot].clone();
        if !booster.contains(&selected) {
            return Err(DraftError::validation("selected card is not in the booster"));
        }
        if burned.len() as u32 > self.burned_per_round {
            return Err(DraftError::validation("burned more cards than allowed"));
        }
        if booster.len() >= (1 + self.burned_per_round) as usize && burned.len() as u32 != self.burned_per_round {
            return Err(DraftError::validation("must burn the configured number of cards"));
        }
        let mut remainder = booster.clone();
        if !remove_first(&mut remainder, selected) {
            return Err(DraftError::validation("selected card is not in the booster"));
        }
        for &card in &burned {
            if !remove_first(&mut remainder, card) {
                return Err(DraftError::validation("burned card is not in the booster"));
            }
        }
        self.boosters[slot] = remainder;
        self.collected[pos].push(selected);
        self.logs[pos].push(PickRecord {
            pick: selected,
            burn: burned,
            booster_before: booster,
        });
        self.picked_this_round[pos] = true;
        Ok(())
    }

    /// Runs every bot-driven seat's pick for the current round, then,
    /// if every seat has now picked, rolls the round forward (which may
    /// itself trigger the next round's bot picks, looping until a human
    /// seat is left waiting or the draft ends).
    fn advance(&mut self, catalog: &Catalog) {
        loop {
            self.run_bot_picks(catalog);
            if !self.picked_this_round.iter().all(|&done| done) {
                return;
            }
            self.pick_number += 1;
            self.picked_this_round.fill(false);
            let window = self.window_start();
            let window_end = (window + self.seats.len()).min(self.boosters.len());
            let window_empty = self.boosters[window..window_end].iter().all(|b| b.is_empty());
            if window_empty {
                self.booster_number += 1;
                self.pick_number = 0;
                if self.window_start() >= self.boosters.len() {
                    self.phase = Phase::Ended;
                    return;
                }
            }
        }
    }

    fn run_bot_picks(&mut self, catalog: &Catalog) {
        for pos in 0..self.seats.len() {
            if self.picked_this_round[pos] {
                continue;
            }
            let is_bot_seat = matches!(self.seats[pos], Seat::Bot(_)) || self.bot_driven[pos];
            if !is_bot_seat {
                continue;
            }
            let slot = self.slot_index_for(pos);
            let booster = self.boosters[slot].clone();
            if booster.is_empty() {
                self.picked_this_round[pos] = true;
                continue;
            }
            let Some(agent) = self.agents[pos].as_mut() else {
                continue;
            };
            let Some(selected) = agent.pick(&booster, catalog) else {
                self.picked_this_round[pos] = true;
                continue;
            };
            let mut remainder = booster.clone();
            remove_first(&mut remainder, selected);
            let burn_count = (self.burned_per_round as usize).min(remainder.len());
            let burned = agent.burn(&remainder, burn_count, catalog);
            let _ = self.commit(pos, selected, burned);
        }
    }

    /// Final per-seat card lists, for draft-log assembly.
    pub fn final_cards(&self) -> &[Vec<CardId>] {
        &self.collected
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use draft_cards::{CardFacts, Color, Rarity};

    fn catalog() -> Catalog {
        let mut builder = Catalog::builder();
        for i in 1..=20u32 {
            builder = builder.card(
                CardId(i),
                CardFacts { set: "thb", rarity: Rarity::Common, color: Color::White, in_booster: true },
            );
        }
        builder.build()
    }

    fn packs(n: usize, size: usize) -> Vec<Vec<CardId>> {
        let mut id = 1u32;
        (0..n)
            .map(|_| {
                let pack = (0..size).map(|_| { let c = CardId(id); id += 1; c }).collect();
                pack
            })
            .collect()
    }

    #[test]
    fn two_humans_no_bots_completes_after_two_packs() {
        let catalog = catalog();
        let h1 = UserId::default();
        let h2 = UserId::default();
        let mut draft = Traditional::start(&[h1, h2], 0, packs(2, 3), 0, &catalog);
        assert_eq!(draft.virtual_player_count(), 2);
        for _ in 0..6 {
            if draft.phase() == Phase::Ended {
                break;
            }
            for &user in &[h1, h2] {
                if let Some(booster) = draft.current_booster(draft.position_of(user).unwrap()) {
                    if booster.is_empty() {
                        continue;
                    }
                    let card = booster[0];
                    draft.pick_card(user, card, Vec::new(), &catalog).unwrap();
                }
            }
        }
        assert_eq!(draft.phase(), Phase::Ended);
        assert_eq!(draft.collected(0).len(), 3);
        assert_eq!(draft.collected(1).len(), 3);
    }

    #[test]
    fn bots_pick_immediately_without_external_calls() {
        let catalog = catalog();
        let h1 = UserId::default();
        let draft = Traditional::start(&[h1], 1, packs(2, 2), 0, &catalog);
        // bot seats are scheduled first by `virtual_player_order` when bots==humans
        assert_eq!(draft.collected(0).len(), 1);
    }

    #[test]
    fn rejects_a_second_pick_in_the_same_round() {
        let catalog = catalog();
        let h1 = UserId::default();
        let h2 = UserId::default();
        let mut draft = Traditional::start(&[h1, h2], 0, packs(1, 3), 0, &catalog);
        let card = draft.current_booster(0).unwrap()[0];
        draft.pick_card(h1, card, Vec::new(), &catalog).unwrap();
        let err = draft.pick_card(h1, card, Vec::new(), &catalog).unwrap_err();
        assert!(matches!(err, DraftError::Validation(_)));
    }

    #[test]
    fn rejects_a_card_not_in_the_assigned_booster() {
        let catalog = catalog();
        let h1 = UserId::default();
        let h2 = UserId::default();
        let mut draft = Traditional::start(&[h1, h2], 0, packs(1, 3), 0, &catalog);
        let err = draft.pick_card(h1, CardId(999), Vec::new(), &catalog).unwrap_err();
        assert!(matches!(err, DraftError::Validation(_)));
    }
}
