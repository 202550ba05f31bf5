use crate::custom_list;
use crate::state::AppState;
use draft_core::{DraftError, SessionId, UserId};
use draft_session::{dispatch_all, Effect, InboundEvent, OutboundEvent, Registry, Sink};
use std::collections::HashMap;
use tokio::sync::mpsc::UnboundedSender;

/// Fans effects out over the live connection table. Built fresh for
/// every dispatch rather than stored, since it only ever borrows.
struct WsSink<'a> {
    connections: &'a HashMap<UserId, UnboundedSender<String>>,
    registry: &'a Registry,
}

fn send(connections: &HashMap<UserId, UnboundedSender<String>>, user: UserId, event: &OutboundEvent) {
    let Some(tx) = connections.get(&user) else { return };
    match serde_json::to_string(event) {
        Ok(json) => {
            let _ = tx.send(json);
        }
        Err(e) => log::error!("failed to serialize {event:?}: {e}"),
    }
}

impl Sink for WsSink<'_> {
    fn to_user(&mut self, user: UserId, event: OutboundEvent) {
        send(self.connections, user, &event);
    }

    fn to_session(&mut self, session: SessionId, event: OutboundEvent, exclude: Option<UserId>) {
        let Some(session) = self.registry.session(session) else { return };
        for &user in &session.users {
            if Some(user) == exclude {
                continue;
            }
            send(self.connections, user, &event);
        }
    }

    fn to_all(&mut self, event: OutboundEvent) {
        for &user in self.registry.participants().keys() {
            send(self.connections, user, &event);
        }
    }
}

fn dispatch(registry: &Registry, connections: &HashMap<UserId, UnboundedSender<String>>, effects: Vec<Effect>) {
    dispatch_all(effects, &mut WsSink { connections, registry });
}

/// Entry point for the timer ticker (`server::tick_timers`), which
/// already holds both locks by the time it has effects to send.
pub fn dispatch_for_tick(registry: &Registry, connections: &HashMap<UserId, UnboundedSender<String>>, effects: Vec<Effect>) {
    dispatch(registry, connections, effects);
}

/// Reports a non-silent error back to its originating connection as a
/// one-off `message` event — the only out-of-band error report any
/// client sees, since every other outcome is an ordinary event.
fn report_error(connections: &HashMap<UserId, UnboundedSender<String>>, user: UserId, err: &DraftError) {
    if err.is_silent() {
        log::debug!("dropping {user}'s request: {err}");
        return;
    }
    log::warn!("{user}: {err}");
    send(
        connections,
        user,
        &OutboundEvent::Message {
            title: "Error".into(),
            text: err.to_string(),
            show_confirm_button: true,
            timer: None,
        },
    );
}

/// Opens a connection, honoring a client-supplied `requested` identity
/// from a prior session (e.g. one the client kept in local storage
/// across a page reload) so `reconnect` has a `UserId` to resume.
///
/// Per §4.6: if `requested` is already live on another connection, the
/// claim is rejected — a fresh `UserId` is minted instead and the new
/// connection is told via `AlreadyConnected` so it can update what it
/// persists. A `requested` id that is known but not currently live
/// (e.g. truly stale, or mid-disconnect) is honored as-is.
pub fn open_connection(state: &AppState, requested: Option<UserId>, user_name: String, tx: UnboundedSender<String>) -> UserId {
    // Lock order matches `handle_event`/`drop_connection` (registry, then
    // connections) so no two call sites can deadlock against each other.
    let mut registry = state.registry.lock().unwrap();
    let mut connections = state.connections.lock().unwrap();
    if let Some(user) = requested {
        let known = registry.participant(user).is_some();
        if known && !connections.contains_key(&user) {
            connections.insert(user, tx);
            // A prior mid-draft disconnect leaves the session frozen on
            // this participant; resuming the socket resumes the draft.
            if let Ok(effects) = registry.reconnect(user, &state.catalog) {
                dispatch(&registry, &connections, effects);
            }
            return user;
        }
        let fresh = registry.register_participant(user_name);
        connections.insert(fresh, tx);
        send(&connections, fresh, &OutboundEvent::AlreadyConnected { new_user_id: fresh });
        return fresh;
    }
    let user = registry.register_participant(user_name);
    connections.insert(user, tx);
    user
}

/// Cleans up after a closed WebSocket: treats the drop as a disconnect
/// if the user was mid-draft, otherwise a plain `leave`.
pub fn drop_connection(state: &AppState, user: UserId) {
    state.connections.lock().unwrap().remove(&user);
    let mut registry = state.registry.lock().unwrap();
    let Some(session_id) = registry.session_id_of(user) else { return };
    let drafting = registry.session(session_id).map(|s| s.is_drafting()).unwrap_or(false);
    let effects = if drafting { registry.disconnect(user) } else { registry.leave(user) };
    let connections = state.connections.lock().unwrap();
    dispatch(&registry, &connections, effects);
}

/// Applies one inbound event on behalf of `user` and fans out whatever
/// effects result. Errors that aren't silent are reported back to the
/// same connection as a `message` event; silent ones are only logged.
pub fn handle_event(state: &AppState, user: UserId, event: InboundEvent) {
    let is_pick_card = matches!(&event, InboundEvent::PickCard(_));
    let mut registry = state.registry.lock().unwrap();
    let mut rng = rand::rng();
    let result: Result<Vec<Effect>, DraftError> = match event {
        InboundEvent::SetUserName(name) => {
            if let Some(p) = registry.participant_mut(user) {
                p.user_name = name;
            }
            Ok(Vec::new())
        }
        InboundEvent::SetSession(session_id) => Ok(registry.join(user, session_id)),
        InboundEvent::SetCollection(collection) => {
            if let Some(p) = registry.participant_mut(user) {
                p.collection = collection;
            }
            Ok(Vec::new())
        }
        InboundEvent::UseCollection(value) => {
            if let Some(p) = registry.participant_mut(user) {
                p.use_collection = value;
            }
            Ok(Vec::new())
        }
        InboundEvent::ChatMessage { text } => {
            let text: String = text.chars().take(255).collect();
            registry
                .session_id_of(user)
                .ok_or_else(|| DraftError::bad_input("not in a session"))
                .map(|session_id| vec![Effect::ToSession { session: session_id, event: OutboundEvent::ChatMessage { user_id: user, text }, exclude: None }])
        }
        InboundEvent::StartDraft => registry.start_draft(user, &state.catalog, &mut rng),
        InboundEvent::PickCard(payload) => with_session(&mut registry, user, |session| session.pick_card(user, payload, &state.catalog)),
        InboundEvent::SetSessionOwner(new_owner) => with_session(&mut registry, user, |s| s.set_session_owner(user, new_owner)),
        InboundEvent::RemovePlayer(target) => registry.remove_player(user, target),
        InboundEvent::SetSeating(order) => registry.set_seating(user, order),
        InboundEvent::RandomizeSeating => registry.randomize_seating(user, &mut rng),
        InboundEvent::BoostersPerPlayer(v) => with_session(&mut registry, user, |s| s.set_boosters_per_player(user, v)),
        InboundEvent::Bots(v) => with_session(&mut registry, user, |s| s.set_bots(user, v)),
        InboundEvent::SetRestriction(v) => with_session(&mut registry, user, |s| s.set_restriction(user, v)),
        InboundEvent::IgnoreCollections(v) => with_session(&mut registry, user, |s| s.set_ignore_collections(user, v)),
        InboundEvent::SetPickTimer(v) => with_session(&mut registry, user, |s| s.set_pick_timer(user, v)),
        InboundEvent::SetMaxPlayers(v) => with_session(&mut registry, user, |s| s.set_max_players(user, v)),
        InboundEvent::SetMaxRarity(v) => with_session(&mut registry, user, |s| s.set_max_rarity(user, v)),
        InboundEvent::SetColorBalance(v) => with_session(&mut registry, user, |s| s.set_color_balance(user, v)),
        InboundEvent::SetUseCustomCardList(v) => with_session(&mut registry, user, |s| s.set_use_custom_card_list(user, v)),
        InboundEvent::SetFoil(v) => with_session(&mut registry, user, |s| s.set_foil(user, v)),
        InboundEvent::SetPublic(v) => registry.set_public(user, v),
        InboundEvent::SetMaxDuplicates(v) => with_session(&mut registry, user, |s| s.set_max_duplicates(user, v)),
        InboundEvent::SetBurnedCardsPerRound(v) => with_session(&mut registry, user, |s| s.set_burned_cards_per_round(user, v)),
        InboundEvent::SetCustomBoosters(v) => with_session(&mut registry, user, |s| s.set_custom_boosters(user, v)),
        InboundEvent::SetDistributionMode(v) => with_session(&mut registry, user, |s| s.set_distribution_mode(user, v)),
        InboundEvent::ReplaceDisconnectedPlayers => with_session(&mut registry, user, |s| s.replace_disconnected_players(user, &state.catalog)),
        InboundEvent::DistributeSealed(packs) => registry.distribute_sealed(user, packs, &state.catalog, &mut rng),
        InboundEvent::DistributeJumpstart => {
            let themed = crate::themes::fixture();
            with_session(&mut registry, user, |s| s.distribute_jumpstart(user, &themed, &mut rng))
        }
        InboundEvent::StartWinstonDraft(boosters_per_player) => registry.start_winston_draft(user, boosters_per_player, &state.catalog, &mut rng),
        InboundEvent::WinstonDraftTakePile => with_session(&mut registry, user, |s| s.winston_take(user)),
        InboundEvent::WinstonDraftSkipPile => with_session(&mut registry, user, |s| s.winston_skip(user)),
        InboundEvent::ParseCustomCardList(text) => {
            custom_list::parse(&text).and_then(|list| with_session(&mut registry, user, |s| s.set_custom_card_list(user, Some(list))))
        }
        InboundEvent::LoadLocalCustomCardList(name) => {
            custom_list::load_local(&name).and_then(|list| with_session(&mut registry, user, |s| s.set_custom_card_list(user, Some(list))))
        }
    };

    let connections = state.connections.lock().unwrap();
    if is_pick_card {
        let ack = match &result {
            Ok(_) => OutboundEvent::PickCardAck { code: 0, error: None },
            Err(e) => OutboundEvent::PickCardAck { code: 1, error: Some(e.to_string()) },
        };
        send(&connections, user, &ack);
    }
    match result {
        Ok(effects) => dispatch(&registry, &connections, effects),
        Err(e) if !is_pick_card => report_error(&connections, user, &e),
        Err(e) => log::debug!("pickCard rejected for {user}: {e}"),
    }
}

fn with_session<R>(
    registry: &mut Registry,
    user: UserId,
    f: impl FnOnce(&mut draft_session::Session) -> Result<R, DraftError>,
) -> Result<R, DraftError> {
    let session_id = registry.session_id_of(user).ok_or_else(|| DraftError::bad_input("not in a session"))?;
    let session = registry.session_mut(session_id).ok_or_else(|| DraftError::bad_input("session no longer exists"))?;
    f(session)
}
