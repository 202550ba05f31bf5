use draft_core::UserId;

/// A position at the virtual table: a human user or a standalone bot.
/// Humans keep their id even while bot-driven (`bot_driven`, tracked by
/// the state machine) so a reconnect can hand the seat back.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Seat {
    Human(UserId),
    Bot(usize),
}

impl Seat {
    pub fn user(&self) -> Option<UserId> {
        match self {
            Seat::Human(uid) => Some(*uid),
            Seat::Bot(_) => None,
        }
    }
}

/// Interleaves humans (in seating order) and bot seats as evenly as a
/// Bresenham-style schedule allows, so bots aren't clumped together at
/// the end of the table. Seating order is the only input, so this is
/// stable across reconnects.
pub fn virtual_player_order(humans: &[UserId], bots: usize) -> Vec<Seat> {
    let total = humans.len() + bots;
    let mut seats = Vec::with_capacity(total);
    let mut human_i = 0usize;
    let mut bot_i = 0usize;
    for slot in 0..total {
        let bot_due = bots > 0 && bot_i < bots && (bot_i as u64) * (total as u64) <= (slot as u64) * (bots as u64);
        if bot_due || human_i >= humans.len() {
            seats.push(Seat::Bot(bot_i));
            bot_i += 1;
        } else {
            seats.push(Seat::Human(humans[human_i]));
            human_i += 1;
        }
    }
    seats
}

/// Euclidean modulo: always in `0..modulus`, unlike Rust's `%` which
/// keeps the sign of the dividend.
pub fn neg_mod(value: i64, modulus: usize) -> usize {
    let m = modulus as i64;
    (((value % m) + m) % m) as usize
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn interleaves_bots_evenly_rather_than_clumping() {
        let humans: Vec<UserId> = (0..3).map(|_| UserId::default()).collect();
        let seats = virtual_player_order(&humans, 3);
        assert_eq!(seats.len(), 6);
        let positions: Vec<bool> = seats.iter().map(|s| matches!(s, Seat::Bot(_))).collect();
        assert_eq!(positions, vec![true, false, true, false, true, false]);
    }

    #[test]
    fn zero_bots_keeps_pure_human_seating() {
        let humans: Vec<UserId> = (0..4).map(|_| UserId::default()).collect();
        let seats = virtual_player_order(&humans, 0);
        assert!(seats.iter().all(|s| matches!(s, Seat::Human(_))));
    }

    #[test]
    fn neg_mod_wraps_negative_values_forward() {
        assert_eq!(neg_mod(-1, 4), 3);
        assert_eq!(neg_mod(-5, 4), 3);
        assert_eq!(neg_mod(4, 4), 0);
    }
}
