use crate::events::{Effect, OutboundEvent};
use crate::participant::Participant;
use crate::session::Session;
use draft_cards::Catalog;
use draft_core::{DraftError, SessionId, UserId};
use rand::Rng;
use std::collections::HashMap;

/// Process-wide table of connected participants and live sessions.
/// Mirrors the shape of the teacher's `Casino`, minus the async/tokio
/// plumbing — this crate stays a synchronous library; `draft-hosting`
/// is the one that wraps a `Registry` behind a lock and drives it from
/// actix-ws tasks.
#[derive(Default)]
pub struct Registry {
    participants: HashMap<UserId, Participant>,
    sessions: HashMap<SessionId, Session>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn participants(&self) -> &HashMap<UserId, Participant> {
        &self.participants
    }

    pub fn participant(&self, user: UserId) -> Option<&Participant> {
        self.participants.get(&user)
    }

    pub fn participant_mut(&mut self, user: UserId) -> Option<&mut Participant> {
        self.participants.get_mut(&user)
    }

    pub fn session(&self, id: SessionId) -> Option<&Session> {
        self.sessions.get(&id)
    }

    pub fn session_mut(&mut self, id: SessionId) -> Option<&mut Session> {
        self.sessions.get_mut(&id)
    }

    pub fn session_id_of(&self, user: UserId) -> Option<SessionId> {
        self.participants.get(&user).and_then(|p| p.session_id)
    }

    fn session_for(&mut self, user: UserId) -> Result<&mut Session, DraftError> {
        let session_id = self.session_id_of(user).ok_or_else(|| DraftError::bad_input("caller is not in a session"))?;
        self.sessions.get_mut(&session_id).ok_or_else(|| DraftError::bad_input("session no longer exists"))
    }

    /// A brand new connection with no prior `UserID` of its own.
    pub fn register_participant(&mut self, user_name: impl Into<String>) -> UserId {
        let user_name = user_name.into();
        let user_id = UserId::default();
        self.participants.insert(user_id, Participant::new(user_id, user_name));
        user_id
    }

    pub fn public_sessions(&self) -> Vec<SessionId> {
        self.sessions.iter().filter(|(_, s)| s.options.is_public).map(|(&id, _)| id).collect()
    }

    pub fn broadcast_public_sessions(&self) -> Effect {
        Effect::ToAll(OutboundEvent::PublicSessions(self.public_sessions()))
    }

    /// Joins `user` to `requested`. Creates the session if it doesn't
    /// exist yet (the joiner becomes its owner); redirects to a freshly
    /// minted session if it's already drafting or full, per §3.
    pub fn join(&mut self, user: UserId, requested: SessionId) -> Vec<Effect> {
        let was_public = self.sessions.get(&requested).map(|s| s.options.is_public).unwrap_or(false);
        let target = match self.sessions.get(&requested) {
            None => {
                self.sessions.insert(requested, Session::new(requested, user));
                requested
            }
            Some(existing) if existing.is_drafting() || existing.users.len() as u32 >= existing.options.max_players => {
                let fresh = SessionId::default();
                self.sessions.insert(fresh, Session::new(fresh, user));
                fresh
            }
            Some(_) => {
                if let Some(session) = self.sessions.get_mut(&requested) {
                    let _ = session.add_user(user);
                }
                requested
            }
        };
        if let Some(participant) = self.participants.get_mut(&user) {
            participant.session_id = Some(target);
        }
        let mut effects = vec![Effect::ToUser(user, OutboundEvent::SetSession { session_id: target })];
        if target != requested || was_public {
            effects.push(self.broadcast_public_sessions());
        }
        effects
    }

    /// Non-drafting departure; destroys the session once empty and
    /// nobody is mid-draft and owed a reconnect.
    pub fn leave(&mut self, user: UserId) -> Vec<Effect> {
        let Some(session_id) = self.participants.get(&user).and_then(|p| p.session_id) else {
            return Vec::new();
        };
        let Some(session) = self.sessions.get_mut(&session_id) else {
            return Vec::new();
        };
        let was_public = session.options.is_public;
        let mut effects = session.leave(user);
        let destroy = session.should_destroy();
        if destroy {
            self.sessions.remove(&session_id);
            if was_public {
                effects.push(self.broadcast_public_sessions());
            }
        }
        if let Some(participant) = self.participants.get_mut(&user) {
            participant.session_id = None;
        }
        effects
    }

    pub fn disconnect(&mut self, user: UserId) -> Vec<Effect> {
        let Some(session_id) = self.participants.get(&user).and_then(|p| p.session_id) else {
            return Vec::new();
        };
        match self.sessions.get_mut(&session_id) {
            Some(session) => session.disconnect(user),
            None => Vec::new(),
        }
    }

    pub fn reconnect(&mut self, user: UserId, catalog: &Catalog) -> Result<Vec<Effect>, DraftError> {
        let session_id = self
            .participants
            .get(&user)
            .and_then(|p| p.session_id)
            .ok_or_else(|| DraftError::bad_input("no session to reconnect to"))?;
        let session = self
            .sessions
            .get_mut(&session_id)
            .ok_or_else(|| DraftError::bad_input("session no longer exists"))?;
        session.reconnect(user, catalog)
    }

    /// Owner-initiated removal. The removed participant is re-homed into
    /// a freshly minted session of their own (as its owner) rather than
    /// being left without one.
    pub fn remove_player(&mut self, caller: UserId, target: UserId) -> Result<Vec<Effect>, DraftError> {
        let session_id = self
            .participants
            .get(&caller)
            .and_then(|p| p.session_id)
            .ok_or_else(|| DraftError::permission("caller is not in a session"))?;
        let session = self.sessions.get_mut(&session_id).ok_or_else(|| DraftError::bad_input("session no longer exists"))?;
        let mut effects = session.remove_player(caller, target)?;
        let fresh = SessionId::default();
        self.sessions.insert(fresh, Session::new(fresh, target));
        if let Some(participant) = self.participants.get_mut(&target) {
            participant.session_id = Some(fresh);
        }
        effects.push(Effect::ToUser(target, OutboundEvent::SetSession { session_id: fresh }));
        Ok(effects)
    }

    /// `Session::set_public` only echoes the dedicated `IsPublic` event
    /// to session members; a session's public flag also feeds the
    /// process-wide `PublicSessions` list, so an actual change here
    /// means every connected participant needs that list re-sent too.
    pub fn set_public(&mut self, caller: UserId, value: bool) -> Result<Vec<Effect>, DraftError> {
        let session_id = self.session_id_of(caller).ok_or_else(|| DraftError::bad_input("caller is not in a session"))?;
        let was_public = self.sessions.get(&session_id).map(|s| s.options.is_public).unwrap_or(false);
        let mut effects = self.session_for(caller)?.set_public(caller, value)?;
        if value != was_public {
            effects.push(self.broadcast_public_sessions());
        }
        Ok(effects)
    }

    /// `Session::set_seating`, `start_draft`, `start_winston_draft`, and
    /// `distribute_sealed` all need the full participant table (player
    /// names and collections) alongside a mutable session — a clone
    /// sidesteps the borrow conflict of holding both at once through a
    /// single `&mut Registry`.
    pub fn set_seating(&mut self, caller: UserId, order: Vec<UserId>) -> Result<Vec<Effect>, DraftError> {
        let participants = self.participants.clone();
        self.session_for(caller)?.set_seating(caller, order, &participants)
    }

    pub fn randomize_seating(&mut self, caller: UserId, rng: &mut impl Rng) -> Result<Vec<Effect>, DraftError> {
        let participants = self.participants.clone();
        self.session_for(caller)?.randomize_seating(caller, rng, &participants)
    }

    pub fn start_draft(&mut self, caller: UserId, catalog: &Catalog, rng: &mut impl Rng) -> Result<Vec<Effect>, DraftError> {
        let participants = self.participants.clone();
        self.session_for(caller)?.start_draft(caller, &participants, catalog, rng)
    }

    pub fn start_winston_draft(
        &mut self,
        caller: UserId,
        boosters_per_player: u32,
        catalog: &Catalog,
        rng: &mut impl Rng,
    ) -> Result<Vec<Effect>, DraftError> {
        let participants = self.participants.clone();
        self.session_for(caller)?.start_winston_draft(caller, boosters_per_player, &participants, catalog, rng)
    }

    pub fn distribute_sealed(
        &mut self,
        caller: UserId,
        packs_per_player: u32,
        catalog: &Catalog,
        rng: &mut impl Rng,
    ) -> Result<Vec<Effect>, DraftError> {
        let participants = self.participants.clone();
        self.session_for(caller)?.distribute_sealed(caller, packs_per_player, &participants, catalog, rng)
    }

    /// Ticks every live session's pick timer once. Called from a single
    /// process-wide one-second interval in `draft-hosting` rather than a
    /// task per session, since the tick itself is cheap and sessions
    /// never block on each other.
    pub fn tick_all_timers(&mut self) -> Vec<Effect> {
        self.sessions.values_mut().filter_map(Session::tick_timer).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn joining_an_unknown_session_creates_it_with_the_joiner_as_owner() {
        let mut registry = Registry::new();
        let user = registry.register_participant("alice");
        let session_id = SessionId::default();
        registry.join(user, session_id);
        let session = registry.session(session_id).unwrap();
        assert_eq!(session.owner, user);
        assert!(session.users.contains(&user));
    }

    #[test]
    fn leaving_the_only_member_destroys_the_session() {
        let mut registry = Registry::new();
        let user = registry.register_participant("alice");
        let session_id = SessionId::default();
        registry.join(user, session_id);
        registry.leave(user);
        assert!(registry.session(session_id).is_none());
    }

    #[test]
    fn joining_a_full_session_redirects_to_a_fresh_one() {
        let mut registry = Registry::new();
        let owner = registry.register_participant("alice");
        let session_id = SessionId::default();
        registry.join(owner, session_id);
        registry.session_mut(session_id).unwrap().options.max_players = 1;
        let latecomer = registry.register_participant("bob");
        let effects = registry.join(latecomer, session_id);
        let redirected = matches!(
            effects.first(),
            Some(Effect::ToUser(_, OutboundEvent::SetSession { session_id: sid })) if *sid != session_id
        );
        assert!(redirected);
    }

    #[test]
    fn set_public_rebroadcasts_the_public_sessions_list_on_a_real_change() {
        let mut registry = Registry::new();
        let owner = registry.register_participant("alice");
        let session_id = SessionId::default();
        registry.join(owner, session_id);

        let effects = registry.set_public(owner, true).unwrap();
        assert!(effects.iter().any(|e| matches!(e, Effect::ToAll(OutboundEvent::PublicSessions(sessions)) if sessions.contains(&session_id))));

        // Setting it to the same value again is a no-op: no re-broadcast.
        let effects = registry.set_public(owner, true).unwrap();
        assert!(!effects.iter().any(|e| matches!(e, Effect::ToAll(_))));
    }

    #[test]
    fn start_draft_wrapper_resolves_session_and_participants_from_the_caller() {
        use draft_cards::{CardFacts, Color, Rarity};
        use rand::rngs::SmallRng;
        use rand::SeedableRng;

        let mut catalog = Catalog::builder();
        for i in 1..=60u32 {
            catalog = catalog.card(
                draft_cards::CardId(i),
                CardFacts { set: "thb", rarity: Rarity::Common, color: Color::White, in_booster: true },
            );
        }
        let catalog = catalog.build();

        let mut registry = Registry::new();
        let owner = registry.register_participant("alice");
        let second = registry.register_participant("bob");
        let session_id = SessionId::default();
        registry.join(owner, session_id);
        registry.join(second, session_id);
        registry.session_mut(session_id).unwrap().options = crate::options::SessionOptions {
            set_restriction: vec!["thb".into()],
            boosters_per_player: 1,
            ignore_collections: true,
            max_duplicates: HashMap::from([(Rarity::Common, 60)]),
            ..Default::default()
        };
        let mut rng = SmallRng::seed_from_u64(7);
        let effects = registry.start_draft(owner, &catalog, &mut rng).unwrap();
        assert!(effects.iter().any(|e| matches!(e, Effect::ToSession { event: OutboundEvent::StartDraft, .. })));
    }
}
