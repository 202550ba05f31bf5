use draft_cards::CardId;
use draft_core::{DraftError, UserId};
use rand::seq::SliceRandom;
use rand::Rng;

/// Two-player pile draft. Three piles start with one card each from a
/// shuffled pool; each turn the active player takes a pile (and keeps
/// its contents) or skips it (feeding it one more card from the pool
/// first).
pub struct Winston {
    players: [UserId; 2],
    round: usize,
    piles: [Vec<CardId>; 3],
    current_pile: usize,
    pool: Vec<CardId>,
    collected: [Vec<CardId>; 2],
}

impl Winston {
    pub fn start(players: [UserId; 2], mut cards: Vec<CardId>, rng: &mut impl Rng) -> Self {
        cards.shuffle(rng);
        let mut pool = cards;
        let mut piles: [Vec<CardId>; 3] = Default::default();
        for pile in piles.iter_mut() {
            if let Some(card) = pool.pop() {
                pile.push(card);
            }
        }
        Self {
            players,
            round: 0,
            piles,
            current_pile: 0,
            pool,
            collected: [Vec::new(), Vec::new()],
        }
    }

    pub fn active_player(&self) -> UserId {
        self.players[self.round % 2]
    }

    pub fn current_pile(&self) -> &[CardId] {
        &self.piles[self.current_pile]
    }

    pub fn collected(&self, player: UserId) -> &[CardId] {
        if player == self.players[0] {
            &self.collected[0]
        } else {
            &self.collected[1]
        }
    }

    /// All three piles empty at the start of a round: nothing left to offer.
    pub fn is_ended(&self) -> bool {
        self.piles.iter().all(|p| p.is_empty())
    }

    fn position_of(&self, user: UserId) -> Option<usize> {
        self.players.iter().position(|&p| p == user)
    }

    pub fn is_player(&self, user: UserId) -> bool {
        self.position_of(user).is_some()
    }

    pub fn take(&mut self, user: UserId) -> Result<(), DraftError> {
        let pos = self.require_turn(user)?;
        let pile = std::mem::take(&mut self.piles[self.current_pile]);
        self.collected[pos].extend(pile);
        if let Some(card) = self.pool.pop() {
            self.piles[self.current_pile].push(card);
        }
        self.round += 1;
        self.current_pile = 0;
        Ok(())
    }

    /// Skips the current pile, feeding it one card first (guarded so
    /// the final pile always has something to draw when reached). On
    /// the third pile, skipping hands the player the top of the pool
    /// directly instead of cycling further — the returned card is the
    /// `winstonDraftRandomCard` payload in that case, `None` otherwise.
    pub fn skip(&mut self, user: UserId) -> Result<Option<CardId>, DraftError> {
        let pos = self.require_turn(user)?;
        if self.current_pile < 2 {
            if let Some(card) = self.pool.pop() {
                self.piles[self.current_pile].push(card);
            }
            self.current_pile += 1;
            while self.current_pile < 2 && self.piles[self.current_pile].is_empty() && self.pool.is_empty() {
                self.current_pile += 1;
            }
            Ok(None)
        } else {
            Ok(self.finish_with_random_card(pos))
        }
    }

    fn finish_with_random_card(&mut self, pos: usize) -> Option<CardId> {
        let card = self.pool.pop();
        if let Some(card) = card {
            self.collected[pos].push(card);
        }
        self.round += 1;
        self.current_pile = 0;
        card
    }

    fn require_turn(&self, user: UserId) -> Result<usize, DraftError> {
        let pos = self
            .position_of(user)
            .ok_or_else(|| DraftError::validation("user is not a player in this Winston draft"))?;
        if self.active_player() != user {
            return Err(DraftError::validation("not this player's turn"));
        }
        if self.is_ended() {
            return Err(DraftError::validation("Winston draft has ended"));
        }
        Ok(pos)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    fn cards(n: u32) -> Vec<CardId> {
        (1..=n).map(CardId).collect()
    }

    #[test]
    fn take_then_skip_alternates_the_active_player() {
        let p1 = UserId::default();
        let p2 = UserId::default();
        let mut rng = SmallRng::seed_from_u64(1);
        let mut draft = Winston::start([p1, p2], cards(12), &mut rng);
        assert_eq!(draft.active_player(), p1);
        draft.take(p1).unwrap();
        assert_eq!(draft.active_player(), p2);
    }

    #[test]
    fn every_card_ends_up_with_exactly_one_player() {
        let p1 = UserId::default();
        let p2 = UserId::default();
        let mut rng = SmallRng::seed_from_u64(2);
        let total = cards(15).len();
        let mut draft = Winston::start([p1, p2], cards(15), &mut rng);
        let mut guard = 0;
        while !draft.is_ended() && guard < 200 {
            guard += 1;
            let active = draft.active_player();
            if guard % 3 == 0 {
                draft.take(active).unwrap();
            } else {
                draft.skip(active).unwrap();
            }
        }
        assert_eq!(draft.collected(p1).len() + draft.collected(p2).len(), total);
    }

    #[test]
    fn skipping_the_third_pile_hands_the_top_of_the_pool_directly() {
        let p1 = UserId::default();
        let p2 = UserId::default();
        let mut rng = SmallRng::seed_from_u64(4);
        let mut draft = Winston::start([p1, p2], cards(10), &mut rng);
        // Walk to the third pile without ever taking one.
        assert_eq!(draft.skip(p1).unwrap(), None);
        assert_eq!(draft.skip(p1).unwrap(), None);
        let random_card = draft.skip(p1).unwrap();
        assert!(random_card.is_some());
        assert_eq!(draft.collected(p1).last(), random_card.as_ref());
    }

    #[test]
    fn off_turn_player_cannot_act() {
        let p1 = UserId::default();
        let p2 = UserId::default();
        let mut rng = SmallRng::seed_from_u64(3);
        let mut draft = Winston::start([p1, p2], cards(6), &mut rng);
        assert!(draft.take(p2).is_err());
    }
}
