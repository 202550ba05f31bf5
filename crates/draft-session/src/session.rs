use crate::draft::ActiveDraft;
use crate::draft_log::{DraftLog, DraftLogPick, DraftLogUser};
use crate::events::{
    Effect, OutboundEvent, PickCardPayload, RejoinState, SessionOptionsDelta, UpdatedUserProps, UserInfo, WinstonSync,
};
use crate::options::{DistributionMode, DraftLogRecipients, SessionOptions};
use crate::participant::{Participant, ParticipantSnapshot};
use crate::timer::PickTimer;
use draft_booster::generate;
use draft_cards::{Catalog, SetCode};
use draft_core::{DraftError, SessionId, UserId};
use draft_gameplay::{distribute_jumpstart, distribute_sealed, Phase, Traditional, Winston};
use rand::seq::SliceRandom;
use rand::Rng;
use std::collections::HashMap;

/// One live draft. Every mutating method is synchronous and pure given
/// its inputs (`Catalog`, an injected RNG, the caller's participant
/// table) — the async actor and the timer tick live in `draft-hosting`
/// and `draft-session::registry`, never here, so the state machine
/// itself stays trivially testable.
pub struct Session {
    pub id: SessionId,
    pub owner: UserId,
    pub users: Vec<UserId>,
    pub user_order: Vec<UserId>,
    pub options: SessionOptions,
    pub disconnected: HashMap<UserId, ParticipantSnapshot>,
    pub draft: ActiveDraft,
    pub timer: Option<PickTimer>,
}

impl Session {
    pub fn new(id: SessionId, owner: UserId) -> Self {
        Self {
            id,
            owner,
            users: vec![owner],
            user_order: vec![owner],
            options: SessionOptions::default(),
            disconnected: HashMap::new(),
            draft: ActiveDraft::Idle,
            timer: None,
        }
    }

    pub fn is_drafting(&self) -> bool {
        !self.draft.is_idle()
    }

    pub fn require_owner(&self, caller: UserId) -> Result<(), DraftError> {
        if caller == self.owner {
            Ok(())
        } else {
            Err(DraftError::permission("caller is not the session owner"))
        }
    }

    /// True once every human `users` member (minus those bot-replaced)
    /// stands ready to go with zero non-owner members left: §3's
    /// "destroyed when `users` is empty and no non-playing owner is
    /// retained" — here, a disconnected owner still mid-draft is the
    /// only reason to keep an otherwise-empty session alive.
    pub fn should_destroy(&self) -> bool {
        self.users.is_empty() && self.disconnected.is_empty()
    }

    fn fanout(&self, event: OutboundEvent) -> Effect {
        Effect::ToSession { session: self.id, event, exclude: None }
    }

    fn fanout_excluding(&self, caller: UserId, event: OutboundEvent) -> Effect {
        Effect::ToSession { session: self.id, event, exclude: Some(caller) }
    }

    pub fn user_info(&self, user: UserId, participants: &HashMap<UserId, Participant>) -> UserInfo {
        UserInfo {
            user_id: user,
            user_name: participants.get(&user).map(|p| p.user_name.clone()).unwrap_or_default(),
            is_bot: false,
            is_connected: !self.disconnected.contains_key(&user),
        }
    }

    pub fn session_users(&self, participants: &HashMap<UserId, Participant>) -> Vec<UserInfo> {
        self.users.iter().map(|&u| self.user_info(u, participants)).collect()
    }

    // ---- membership ----------------------------------------------------

    /// Adds `user` to an idle session. Callers (the registry) are
    /// responsible for redirecting joins to a fresh session when this
    /// one is mid-draft — Session itself only refuses the mutation.
    pub fn add_user(&mut self, user: UserId) -> Result<(), DraftError> {
        if self.is_drafting() {
            return Err(DraftError::bad_input("session is drafting"));
        }
        if !self.users.contains(&user) {
            self.users.push(user);
            self.user_order.push(user);
        }
        Ok(())
    }

    /// Non-drafting departure. Transfers ownership to the first
    /// remaining member if the owner left.
    pub fn leave(&mut self, user: UserId) -> Vec<Effect> {
        self.users.retain(|&u| u != user);
        self.user_order.retain(|&u| u != user);
        let mut effects = Vec::new();
        if user == self.owner {
            if let Some(&next) = self.users.first() {
                self.owner = next;
                effects.push(self.fanout(OutboundEvent::SessionOwner { owner: next, user_name: None }));
            }
        }
        effects
    }

    /// Mid-draft disconnect: the seat freezes rather than vacating.
    /// The timer pauses; reconnect or `replaceDisconnectedPlayers` are
    /// the only ways forward.
    pub fn disconnect(&mut self, user: UserId) -> Vec<Effect> {
        if !self.users.contains(&user) {
            return Vec::new();
        }
        let seat = self.user_order.iter().position(|&u| u == user).unwrap_or(0);
        self.users.retain(|&u| u != user);
        self.disconnected.insert(user, ParticipantSnapshot { user_name: String::new(), seat });
        if let Some(timer) = self.timer.as_mut() {
            timer.pause();
        }
        vec![self.fanout(OutboundEvent::UserDisconnected(vec![user.to_string()]))]
    }

    /// Reconnect with the same `UserID`. Unpauses the timer and
    /// re-sends the seat's current pack so the client can resume
    /// exactly where it left off.
    pub fn reconnect(&mut self, user: UserId, catalog: &Catalog) -> Result<Vec<Effect>, DraftError> {
        if self.disconnected.remove(&user).is_none() {
            return Err(DraftError::bad_input("user was not disconnected from this session"));
        }
        if !self.users.contains(&user) {
            self.users.push(user);
        }
        if let Some(traditional) = self.draft.as_traditional_mut() {
            traditional.restore_human(user);
        }
        if let Some(timer) = self.timer.as_mut() {
            timer.resume();
        }
        let mut effects = vec![self.fanout_excluding(
            user,
            OutboundEvent::Message {
                title: "Player reconnected".into(),
                text: format!("{user} reconnected"),
                show_confirm_button: false,
                timer: Some(5),
            },
        )];
        if let Some(traditional) = self.draft.as_traditional() {
            if let Some(pos) = traditional.position_of(user) {
                if let Some(booster) = traditional.current_booster(pos) {
                    effects.push(Effect::ToUser(
                        user,
                        OutboundEvent::RejoinDraft(RejoinState {
                            booster: booster.to_vec(),
                            booster_number: traditional.booster_number(),
                            pick_number: traditional.pick_number(),
                        }),
                    ));
                }
            }
        }
        if let Some(winston) = self.draft.as_winston() {
            if winston.is_player(user) {
                effects.push(Effect::ToUser(
                    user,
                    OutboundEvent::RejoinWinstonDraft(WinstonSync {
                        piles: vec![winston.current_pile().to_vec()],
                        current_pile: 0,
                        active_player: winston.active_player(),
                    }),
                ));
            }
        }
        let _ = catalog;
        Ok(effects)
    }

    pub fn set_session_owner(&mut self, caller: UserId, new_owner: UserId) -> Result<Vec<Effect>, DraftError> {
        self.require_owner(caller)?;
        if !self.users.contains(&new_owner) || new_owner == self.owner {
            return Err(DraftError::bad_input("new owner must be a different current member"));
        }
        self.owner = new_owner;
        Ok(vec![self.fanout(OutboundEvent::SessionOwner { owner: new_owner, user_name: None })])
    }

    pub fn set_seating(
        &mut self,
        caller: UserId,
        order: Vec<UserId>,
        participants: &HashMap<UserId, Participant>,
    ) -> Result<Vec<Effect>, DraftError> {
        self.require_owner(caller)?;
        if self.is_drafting() {
            return Err(DraftError::bad_input("cannot reseat a drafting session"));
        }
        let mut sorted_order = order.clone();
        sorted_order.sort_by_key(|u| u.to_string());
        let mut sorted_users = self.users.clone();
        sorted_users.sort_by_key(|u| u.to_string());
        if sorted_order != sorted_users {
            return Err(DraftError::bad_input("seating order must be a permutation of current users"));
        }
        self.users = order.clone();
        self.user_order = order;
        Ok(vec![self.fanout(OutboundEvent::SessionUsers(self.session_users(participants)))])
    }

    pub fn randomize_seating(
        &mut self,
        caller: UserId,
        rng: &mut impl Rng,
        participants: &HashMap<UserId, Participant>,
    ) -> Result<Vec<Effect>, DraftError> {
        self.require_owner(caller)?;
        if self.is_drafting() {
            return Err(DraftError::bad_input("cannot reseat a drafting session"));
        }
        self.users.shuffle(rng);
        self.user_order = self.users.clone();
        Ok(vec![self.fanout(OutboundEvent::SessionUsers(self.session_users(participants)))])
    }

    /// Owner-only removal: the caller validates membership; re-homing
    /// the removed participant into a freshly minted session is the
    /// registry's job since it alone can allocate a `SessionId`.
    pub fn remove_player(&mut self, caller: UserId, target: UserId) -> Result<Vec<Effect>, DraftError> {
        self.require_owner(caller)?;
        if !self.users.contains(&target) {
            return Err(DraftError::bad_input("target is not a member of this session"));
        }
        Ok(self.leave(target))
    }

    // ---- option setters --------------------------------------------------

    pub fn set_public(&mut self, caller: UserId, value: bool) -> Result<Vec<Effect>, DraftError> {
        self.require_owner(caller)?;
        if self.options.is_public == value {
            return Ok(Vec::new());
        }
        self.options.is_public = value;
        Ok(vec![self.fanout_excluding(caller, OutboundEvent::IsPublic(value))])
    }

    pub fn set_ignore_collections(&mut self, caller: UserId, value: bool) -> Result<Vec<Effect>, DraftError> {
        self.require_owner(caller)?;
        if self.options.ignore_collections == value {
            return Ok(Vec::new());
        }
        self.options.ignore_collections = value;
        Ok(vec![self.fanout_excluding(caller, OutboundEvent::IgnoreCollections(value))])
    }

    pub fn set_boosters_per_player(&mut self, caller: UserId, value: u32) -> Result<Vec<Effect>, DraftError> {
        self.require_owner(caller)?;
        if value == 0 {
            return Err(DraftError::bad_input("boostersPerPlayer must be at least 1"));
        }
        if self.options.boosters_per_player == value {
            return Ok(Vec::new());
        }
        self.options.boosters_per_player = value;
        Ok(vec![self.fanout_excluding(caller, OutboundEvent::BoostersPerPlayer(value))])
    }

    pub fn set_bots(&mut self, caller: UserId, value: u32) -> Result<Vec<Effect>, DraftError> {
        self.require_owner(caller)?;
        if self.options.bots == value {
            return Ok(Vec::new());
        }
        self.options.bots = value;
        Ok(vec![self.fanout_excluding(caller, OutboundEvent::Bots(value))])
    }

    pub fn set_max_players(&mut self, caller: UserId, value: u32) -> Result<Vec<Effect>, DraftError> {
        self.require_owner(caller)?;
        if self.options.max_players == value {
            return Ok(Vec::new());
        }
        self.options.max_players = value;
        Ok(vec![self.fanout_excluding(caller, OutboundEvent::SetMaxPlayers(value))])
    }

    pub fn set_max_rarity(&mut self, caller: UserId, value: draft_cards::Rarity) -> Result<Vec<Effect>, DraftError> {
        self.require_owner(caller)?;
        if self.options.max_rarity == value {
            return Ok(Vec::new());
        }
        self.options.max_rarity = value;
        Ok(vec![self.fanout_excluding(caller, OutboundEvent::SetMaxRarity(value))])
    }

    pub fn set_restriction(&mut self, caller: UserId, value: Vec<SetCode>) -> Result<Vec<Effect>, DraftError> {
        self.require_owner(caller)?;
        if self.options.set_restriction == value {
            return Ok(Vec::new());
        }
        self.options.set_restriction = value.clone();
        Ok(vec![self.fanout_excluding(caller, OutboundEvent::SetRestriction(value))])
    }

    pub fn set_pick_timer(&mut self, caller: UserId, value: u32) -> Result<Vec<Effect>, DraftError> {
        self.require_owner(caller)?;
        if self.options.pick_timer == value {
            return Ok(Vec::new());
        }
        self.options.pick_timer = value;
        Ok(vec![self.fanout_excluding(caller, OutboundEvent::SetPickTimer(value))])
    }

    pub fn set_color_balance(&mut self, caller: UserId, value: bool) -> Result<Vec<Effect>, DraftError> {
        self.require_owner(caller)?;
        if self.options.color_balance == value {
            return Ok(Vec::new());
        }
        self.options.color_balance = value;
        Ok(vec![self.fanout_excluding(
            caller,
            OutboundEvent::SessionOptions(SessionOptionsDelta { color_balance: Some(value), ..Default::default() }),
        )])
    }

    pub fn set_foil(&mut self, caller: UserId, value: bool) -> Result<Vec<Effect>, DraftError> {
        self.require_owner(caller)?;
        if self.options.foil == value {
            return Ok(Vec::new());
        }
        self.options.foil = value;
        Ok(vec![self.fanout_excluding(
            caller,
            OutboundEvent::SessionOptions(SessionOptionsDelta { foil: Some(value), ..Default::default() }),
        )])
    }

    pub fn set_use_custom_card_list(&mut self, caller: UserId, value: bool) -> Result<Vec<Effect>, DraftError> {
        self.require_owner(caller)?;
        if self.options.use_custom_card_list == value {
            return Ok(Vec::new());
        }
        self.options.use_custom_card_list = value;
        Ok(vec![self.fanout_excluding(
            caller,
            OutboundEvent::SessionOptions(SessionOptionsDelta { use_custom_card_list: Some(value), ..Default::default() }),
        )])
    }

    pub fn set_custom_card_list(&mut self, caller: UserId, value: Option<draft_booster::CustomCardList>) -> Result<Vec<Effect>, DraftError> {
        self.require_owner(caller)?;
        self.options.custom_card_list = value;
        Ok(Vec::new())
    }

    pub fn set_burned_cards_per_round(&mut self, caller: UserId, value: u32) -> Result<Vec<Effect>, DraftError> {
        self.require_owner(caller)?;
        if self.options.burned_cards_per_round == value {
            return Ok(Vec::new());
        }
        self.options.burned_cards_per_round = value;
        Ok(vec![self.fanout_excluding(
            caller,
            OutboundEvent::SessionOptions(SessionOptionsDelta { burned_cards_per_round: Some(value), ..Default::default() }),
        )])
    }

    pub fn set_custom_boosters(&mut self, caller: UserId, value: Vec<SetCode>) -> Result<Vec<Effect>, DraftError> {
        self.require_owner(caller)?;
        if self.options.custom_boosters == value {
            return Ok(Vec::new());
        }
        self.options.custom_boosters = value.clone();
        Ok(vec![self.fanout_excluding(
            caller,
            OutboundEvent::SessionOptions(SessionOptionsDelta { custom_boosters: Some(value), ..Default::default() }),
        )])
    }

    pub fn set_distribution_mode(&mut self, caller: UserId, value: DistributionMode) -> Result<Vec<Effect>, DraftError> {
        self.require_owner(caller)?;
        if self.options.distribution_mode == value {
            return Ok(Vec::new());
        }
        self.options.distribution_mode = value;
        Ok(vec![self.fanout_excluding(
            caller,
            OutboundEvent::SessionOptions(SessionOptionsDelta { distribution_mode: Some(value), ..Default::default() }),
        )])
    }

    pub fn set_max_duplicates(&mut self, caller: UserId, value: HashMap<draft_cards::Rarity, u32>) -> Result<Vec<Effect>, DraftError> {
        self.require_owner(caller)?;
        if self.options.max_duplicates == value {
            return Ok(Vec::new());
        }
        self.options.max_duplicates = value.clone();
        Ok(vec![self.fanout_excluding(
            caller,
            OutboundEvent::SessionOptions(SessionOptionsDelta { max_duplicates: Some(value), ..Default::default() }),
        )])
    }

    // ---- draft lifecycle --------------------------------------------------

    /// Generates every round's packs up front (respecting `customBoosters`
    /// per round and the session's distribution mode), then hands them to
    /// `Traditional::start`.
    fn generate_traditional_boosters(
        &self,
        participants: &HashMap<UserId, Participant>,
        catalog: &Catalog,
        virtual_players: usize,
        rng: &mut impl Rng,
    ) -> Result<Vec<Vec<draft_cards::CardId>>, DraftError> {
        let collections: Vec<_> = self.user_order.iter().filter_map(|u| participants.get(u)).map(Participant::as_booster_collection).collect();
        let mut rounds = Vec::with_capacity(self.options.boosters_per_player as usize);
        for round in 0..self.options.boosters_per_player as usize {
            let restriction = self.options.set_restriction_for_round(round);
            let booster_options = self.options.to_booster_options(restriction);
            let packs = generate(&collections, catalog, &booster_options, virtual_players, rng)?;
            rounds.push(packs);
        }
        let mut flat: Vec<Vec<draft_cards::CardId>> = rounds.into_iter().flatten().collect();
        match self.options.distribution_mode {
            DistributionMode::Regular => {}
            DistributionMode::ShuffleBoosterPool => flat.shuffle(rng),
            DistributionMode::ShufflePlayerBoosters => {
                for pos in 0..virtual_players {
                    let indices: Vec<usize> = (0..self.options.boosters_per_player as usize).map(|r| r * virtual_players + pos).collect();
                    let mut stack: Vec<_> = indices.iter().map(|&i| flat[i].clone()).collect();
                    stack.shuffle(rng);
                    for (slot, pack) in indices.into_iter().zip(stack) {
                        flat[slot] = pack;
                    }
                }
            }
        }
        Ok(flat)
    }

    pub fn start_draft(
        &mut self,
        caller: UserId,
        participants: &HashMap<UserId, Participant>,
        catalog: &Catalog,
        rng: &mut impl Rng,
    ) -> Result<Vec<Effect>, DraftError> {
        self.require_owner(caller)?;
        if self.is_drafting() {
            return Err(DraftError::bad_input("session is already drafting"));
        }
        let virtual_players = self.user_order.len() + self.options.bots as usize;
        if virtual_players < 2 {
            return Err(DraftError::bad_input("need at least two virtual players to start a draft"));
        }
        let boosters = self.generate_traditional_boosters(participants, catalog, virtual_players, rng)?;
        let traditional = Traditional::start(&self.user_order, self.options.bots as usize, boosters, self.options.burned_cards_per_round, catalog);
        self.timer = PickTimer::start(self.options.pick_timer, 0);
        self.draft = ActiveDraft::Traditional(Box::new(traditional));
        let mut effects = vec![self.fanout(OutboundEvent::StartDraft)];
        effects.extend(self.next_booster_effects());
        Ok(effects)
    }

    fn next_booster_effects(&self) -> Vec<Effect> {
        let Some(traditional) = self.draft.as_traditional() else { return Vec::new() };
        let mut effects = Vec::new();
        for &user in &self.user_order {
            let Some(pos) = traditional.position_of(user) else { continue };
            if let Some(booster) = traditional.current_booster(pos) {
                effects.push(Effect::ToUser(
                    user,
                    OutboundEvent::NextBooster {
                        booster: booster.to_vec(),
                        booster_number: traditional.booster_number(),
                        pick_number: traditional.pick_number(),
                    },
                ));
            }
        }
        effects
    }

    pub fn pick_card(&mut self, user: UserId, payload: PickCardPayload, catalog: &Catalog) -> Result<Vec<Effect>, DraftError> {
        let (phase_ended, pick_number) = {
            let traditional = self.draft.as_traditional_mut().ok_or_else(|| DraftError::validation("no traditional draft in progress"))?;
            traditional.pick_card(user, payload.selected_card, payload.burned_cards, catalog)?;
            (traditional.phase() == Phase::Ended, traditional.pick_number())
        };
        let mut effects = vec![self.fanout(OutboundEvent::UpdateUser { user_id: user, updated: UpdatedUserProps { picked_this_round: Some(true) } })];
        if phase_ended {
            effects.push(self.fanout(OutboundEvent::EndDraft));
            if self.options.draft_log_recipients != DraftLogRecipients::None {
                effects.push(self.fanout(OutboundEvent::DraftLog(Box::new(self.assemble_draft_log()))));
            }
            self.timer = None;
        } else {
            self.timer = PickTimer::start(self.options.pick_timer, pick_number);
            effects.extend(self.next_booster_effects());
        }
        Ok(effects)
    }

    fn assemble_draft_log(&self) -> DraftLog {
        let traditional = self.draft.as_traditional().expect("draft log requested outside a traditional draft");
        let mut users = HashMap::new();
        for &seat_user in &self.user_order {
            let Some(pos) = traditional.position_of(seat_user) else { continue };
            let picks: Vec<DraftLogPick> = traditional.logs(pos).iter().map(DraftLogPick::from).collect();
            users.insert(
                seat_user.to_string(),
                DraftLogUser {
                    user_name: seat_user.to_string(),
                    user_id: Some(seat_user),
                    is_bot: false,
                    picks,
                    cards: traditional.final_cards()[pos].clone(),
                },
            );
        }
        DraftLog {
            session_id: self.id,
            set_restriction: self.options.set_restriction.clone(),
            boosters: Vec::new(),
            users,
        }
    }

    pub fn replace_disconnected_players(&mut self, caller: UserId, catalog: &Catalog) -> Result<Vec<Effect>, DraftError> {
        self.require_owner(caller)?;
        let disconnected: Vec<UserId> = self.disconnected.keys().copied().collect();
        if disconnected.is_empty() {
            return Err(DraftError::bad_input("no disconnected players to replace"));
        }
        if let Some(traditional) = self.draft.as_traditional_mut() {
            for user in &disconnected {
                traditional.substitute_with_bot(*user, catalog);
            }
        }
        self.disconnected.clear();
        if let Some(timer) = self.timer.as_mut() {
            timer.resume();
        }
        Ok(vec![self.fanout(OutboundEvent::Message {
            title: "Players replaced".into(),
            text: "Disconnected players have been replaced with bots".into(),
            show_confirm_button: false,
            timer: Some(5),
        })])
    }

    // ---- Winston ------------------------------------------------------

    pub fn start_winston_draft(
        &mut self,
        caller: UserId,
        boosters_per_player: u32,
        participants: &HashMap<UserId, Participant>,
        catalog: &Catalog,
        rng: &mut impl Rng,
    ) -> Result<Vec<Effect>, DraftError> {
        self.require_owner(caller)?;
        if self.is_drafting() {
            return Err(DraftError::bad_input("session is already drafting"));
        }
        if self.user_order.len() != 2 {
            return Err(DraftError::bad_input("Winston draft requires exactly two human players"));
        }
        let collections: Vec<_> = self.user_order.iter().filter_map(|u| participants.get(u)).map(Participant::as_booster_collection).collect();
        let restriction = self.options.set_restriction.clone();
        let booster_options = self.options.to_booster_options(restriction);
        let packs = generate(&collections, catalog, &booster_options, boosters_per_player as usize * 2, rng)?;
        let pool: Vec<_> = packs.into_iter().flatten().collect();
        let players = [self.user_order[0], self.user_order[1]];
        let winston = Winston::start(players, pool, rng);
        self.draft = ActiveDraft::Winston(Box::new(winston));
        Ok(vec![
            self.fanout(OutboundEvent::StartWinstonDraft),
            self.winston_sync_effect(),
        ])
    }

    fn winston_sync_effect(&self) -> Effect {
        let winston = self.draft.as_winston().expect("winston sync requested outside a Winston draft");
        self.fanout(OutboundEvent::WinstonDraftSync(WinstonSync {
            piles: vec![winston.current_pile().to_vec()],
            current_pile: 0,
            active_player: winston.active_player(),
        }))
    }

    pub fn winston_take(&mut self, user: UserId) -> Result<Vec<Effect>, DraftError> {
        let winston = self.draft.as_winston_mut().ok_or_else(|| DraftError::validation("no Winston draft in progress"))?;
        winston.take(user)?;
        self.after_winston_action()
    }

    pub fn winston_skip(&mut self, user: UserId) -> Result<Vec<Effect>, DraftError> {
        let winston = self.draft.as_winston_mut().ok_or_else(|| DraftError::validation("no Winston draft in progress"))?;
        let random_card = winston.skip(user)?;
        let mut effects = Vec::new();
        if let Some(card) = random_card {
            effects.push(Effect::ToUser(user, OutboundEvent::WinstonDraftRandomCard(card)));
        }
        effects.extend(self.after_winston_action()?);
        Ok(effects)
    }

    fn after_winston_action(&mut self) -> Result<Vec<Effect>, DraftError> {
        let ended = self.draft.as_winston().unwrap().is_ended();
        if ended {
            let effects = vec![self.fanout(OutboundEvent::WinstonDraftEnd)];
            self.draft = ActiveDraft::Idle;
            return Ok(effects);
        }
        Ok(vec![
            self.fanout(OutboundEvent::WinstonDraftNextRound(self.draft.as_winston().unwrap().active_player())),
            self.winston_sync_effect(),
        ])
    }

    // ---- Sealed / Jumpstart --------------------------------------------

    pub fn distribute_sealed(
        &mut self,
        caller: UserId,
        packs_per_player: u32,
        participants: &HashMap<UserId, Participant>,
        catalog: &Catalog,
        rng: &mut impl Rng,
    ) -> Result<Vec<Effect>, DraftError> {
        self.require_owner(caller)?;
        if self.is_drafting() {
            return Err(DraftError::bad_input("session is already drafting"));
        }
        let collections: Vec<_> = self.user_order.iter().filter_map(|u| participants.get(u)).map(Participant::as_booster_collection).collect();
        let restriction = self.options.set_restriction.clone();
        let booster_options = self.options.to_booster_options(restriction);
        let pools = distribute_sealed(&collections, catalog, &booster_options, self.user_order.len(), packs_per_player as usize, rng)?;
        self.draft = ActiveDraft::Idle;
        Ok(self
            .user_order
            .iter()
            .zip(pools)
            .map(|(&user, pool)| Effect::ToUser(user, OutboundEvent::SetCardSelection(pool)))
            .collect())
    }

    pub fn distribute_jumpstart(&mut self, caller: UserId, themed_packs: &[Vec<draft_cards::CardId>], rng: &mut impl Rng) -> Result<Vec<Effect>, DraftError> {
        self.require_owner(caller)?;
        if self.is_drafting() {
            return Err(DraftError::bad_input("session is already drafting"));
        }
        let selections = distribute_jumpstart(themed_packs, self.user_order.len(), rng);
        self.draft = ActiveDraft::Idle;
        Ok(self
            .user_order
            .iter()
            .zip(selections)
            .map(|(&user, selection)| Effect::ToUser(user, OutboundEvent::SetCardSelection(selection)))
            .collect())
    }

    // ---- timer ----------------------------------------------------------

    /// Called once a second by the session actor. Returns the next
    /// outbound event, or `None` once the timer is disabled, paused, or
    /// already expired (the caller stops scheduling further ticks then).
    pub fn tick_timer(&mut self) -> Option<Effect> {
        let timer = self.timer.as_mut()?;
        if !timer.tick() {
            if timer.remaining == 0 && !timer.paused {
                self.timer = None;
                return Some(self.fanout(OutboundEvent::DisableTimer));
            }
            return None;
        }
        Some(self.fanout(OutboundEvent::Timer { countdown: timer.remaining }))
    }
}
