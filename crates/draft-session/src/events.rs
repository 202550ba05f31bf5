use crate::draft_log::DraftLog;
use crate::options::DistributionMode;
use draft_cards::{CardId, Rarity, SetCode};
use draft_core::{SessionId, UserId};
use std::collections::HashMap;

#[derive(Debug, Clone, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserInfo {
    pub user_id: UserId,
    pub user_name: String,
    pub is_bot: bool,
    pub is_connected: bool,
}

/// Partial update for the options that share the coalesced
/// `sessionOptions` event rather than a dedicated one of their own.
#[derive(Debug, Clone, Default, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionOptionsDelta {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color_balance: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub foil: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub use_custom_card_list: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub burned_cards_per_round: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_boosters: Option<Vec<SetCode>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub distribution_mode: Option<DistributionMode>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_duplicates: Option<HashMap<Rarity, u32>>,
}

impl SessionOptionsDelta {
    pub fn is_empty(&self) -> bool {
        self.color_balance.is_none()
            && self.foil.is_none()
            && self.use_custom_card_list.is_none()
            && self.burned_cards_per_round.is_none()
            && self.custom_boosters.is_none()
            && self.distribution_mode.is_none()
            && self.max_duplicates.is_none()
    }
}

#[derive(Debug, Clone, Default, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdatedUserProps {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub picked_this_round: Option<bool>,
}

#[derive(Debug, Clone, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RejoinState {
    pub booster: Vec<CardId>,
    pub booster_number: u32,
    pub pick_number: u32,
}

#[derive(Debug, Clone, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WinstonSync {
    pub piles: Vec<Vec<CardId>>,
    pub current_pile: usize,
    pub active_player: UserId,
}

/// Every event the session fans out to clients (§6). Tagged so the
/// wire shape is explicit without a running socket: a unit test can
/// assert on `serde_json::to_value(&event)` directly.
#[derive(Debug, Clone, serde::Serialize)]
#[serde(tag = "event", rename_all = "camelCase")]
pub enum OutboundEvent {
    PublicSessions(Vec<SessionId>),
    SessionOwner {
        owner: UserId,
        user_name: Option<String>,
    },
    SessionUsers(Vec<UserInfo>),
    SessionOptions(SessionOptionsDelta),
    Bots(u32),
    BoostersPerPlayer(u32),
    SetRestriction(Vec<SetCode>),
    IsPublic(bool),
    SetPickTimer(u32),
    SetMaxPlayers(u32),
    SetMaxRarity(Rarity),
    IgnoreCollections(bool),
    UpdateUser {
        user_id: UserId,
        updated: UpdatedUserProps,
    },
    ChatMessage {
        user_id: UserId,
        text: String,
    },
    Message {
        title: String,
        text: String,
        show_confirm_button: bool,
        timer: Option<u32>,
    },
    SetSession {
        session_id: SessionId,
    },
    /// Sent to a connection that claimed a `UserID` already live
    /// elsewhere (§4.6): the claim is rejected and a fresh identity
    /// minted in its place.
    AlreadyConnected {
        new_user_id: UserId,
    },
    SetCardSelection(Vec<CardId>),
    StartDraft,
    NextBooster {
        booster: Vec<CardId>,
        booster_number: u32,
        pick_number: u32,
    },
    EndDraft,
    DraftLog(Box<DraftLog>),
    Timer {
        countdown: u32,
    },
    DisableTimer,
    UserDisconnected(Vec<String>),
    RejoinDraft(RejoinState),
    StartWinstonDraft,
    WinstonDraftSync(WinstonSync),
    WinstonDraftNextRound(UserId),
    WinstonDraftRandomCard(CardId),
    WinstonDraftEnd,
    RejoinWinstonDraft(WinstonSync),
    /// The `pickCard` acknowledgement (§6): `code: 0` on success, `code:
    /// 1` with `error` set on a validation failure. Sent only to the
    /// picking connection, never fanned out.
    PickCardAck {
        code: u8,
        #[serde(skip_serializing_if = "Option::is_none")]
        error: Option<String>,
    },
}

/// A structured pick: the only shape this server accepts (see
/// DESIGN.md's note on the bare-integer variant the source also took).
#[derive(Debug, Clone, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PickCardPayload {
    pub selected_card: CardId,
    #[serde(default)]
    pub burned_cards: Vec<CardId>,
}

/// Inbound, client-originated events (§6, selected). Unknown or
/// malformed payloads never reach this enum — the gateway's
/// deserialization failure is itself the `BadInput` case, dropped
/// before a `DraftError` is ever constructed.
#[derive(Debug, Clone, serde::Deserialize)]
#[serde(tag = "event", content = "data", rename_all = "camelCase")]
pub enum InboundEvent {
    SetUserName(String),
    SetSession(SessionId),
    SetCollection(HashMap<CardId, u32>),
    UseCollection(bool),
    ChatMessage { text: String },
    StartDraft,
    PickCard(PickCardPayload),
    SetSessionOwner(UserId),
    RemovePlayer(UserId),
    SetSeating(Vec<UserId>),
    RandomizeSeating,
    BoostersPerPlayer(u32),
    Bots(u32),
    SetRestriction(Vec<SetCode>),
    IgnoreCollections(bool),
    SetPickTimer(u32),
    SetMaxPlayers(u32),
    SetMaxRarity(Rarity),
    SetColorBalance(bool),
    SetUseCustomCardList(bool),
    SetFoil(bool),
    SetPublic(bool),
    SetMaxDuplicates(HashMap<Rarity, u32>),
    SetBurnedCardsPerRound(u32),
    SetCustomBoosters(Vec<SetCode>),
    SetDistributionMode(DistributionMode),
    ReplaceDisconnectedPlayers,
    DistributeSealed(u32),
    DistributeJumpstart,
    StartWinstonDraft(u32),
    WinstonDraftTakePile,
    WinstonDraftSkipPile,
    ParseCustomCardList(String),
    LoadLocalCustomCardList(String),
}

/// One fan-out instruction. Session/Registry operations return a
/// `Vec<Effect>` rather than writing to a transport directly, so the
/// core stays a plain synchronous library; the gateway (or a test)
/// interprets them through a `Sink`.
#[derive(Debug, Clone)]
pub enum Effect {
    ToUser(UserId, OutboundEvent),
    /// `exclude` lets "everyone but the option's initiator" skip the
    /// echo the spec calls for on owner-driven option changes.
    ToSession {
        session: SessionId,
        event: OutboundEvent,
        exclude: Option<UserId>,
    },
    ToAll(OutboundEvent),
}

/// Transport-side fan-out sink. `draft-hosting` is the only crate that
/// implements this against a live socket; tests can implement it over
/// a `Vec<(UserId, OutboundEvent)>` to assert on what was sent.
pub trait Sink {
    fn to_user(&mut self, user: UserId, event: OutboundEvent);
    fn to_session(&mut self, session: SessionId, event: OutboundEvent, exclude: Option<UserId>);
    fn to_all(&mut self, event: OutboundEvent);
}

impl Effect {
    pub fn dispatch(self, sink: &mut impl Sink) {
        match self {
            Effect::ToUser(user, event) => sink.to_user(user, event),
            Effect::ToSession { session, event, exclude } => sink.to_session(session, event, exclude),
            Effect::ToAll(event) => sink.to_all(event),
        }
    }
}

pub fn dispatch_all(effects: Vec<Effect>, sink: &mut impl Sink) {
    for effect in effects {
        effect.dispatch(sink);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pick_card_payload_defaults_burned_cards_to_empty() {
        let json = serde_json::json!({"event": "pickCard", "data": {"selectedCard": 7}});
        let event: InboundEvent = serde_json::from_value(json).unwrap();
        match event {
            InboundEvent::PickCard(payload) => {
                assert_eq!(payload.selected_card, CardId(7));
                assert!(payload.burned_cards.is_empty());
            }
            _ => panic!("expected PickCard"),
        }
    }

    #[test]
    fn session_options_delta_empty_has_no_set_fields() {
        assert!(SessionOptionsDelta::default().is_empty());
    }
}
