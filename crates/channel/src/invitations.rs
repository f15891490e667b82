//! Outbound invitation and tournament-setup flows
//!
//! The gateway only pushes the *other* side of these flows; initiating one
//! goes through an [`InvitationService`] the embedding application
//! implements over its backend API. The functions here add the policy
//! around those calls: duplicate-invitation alerts, tournament name
//! validation, and rollback of a half-created tournament.

use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;
use tracing::warn;

use courtside_protocol::Game;

use crate::ui::NotifyUi;

pub const TOURNAMENT_NAME_MAX: usize = 20;

#[derive(Debug, Error)]
pub enum InvitationError {
    #[error("tournament name must be 1-{TOURNAMENT_NAME_MAX} letters, digits, or spaces")]
    InvalidTournamentName,

    #[error("invitation service error: {0}")]
    Service(String),

    #[error("tournament setup failed for {user}: {reason}")]
    SetupFailed { user: String, reason: String },
}

/// Backend response to an invitation call.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InvitationOutcome {
    pub ok: bool,
    pub game_key: Option<String>,
    pub invitation_token: Option<String>,
    pub tournament_id: Option<String>,
    pub message: Option<String>,
}

impl InvitationOutcome {
    /// A rejection the user should see as an alert rather than an error,
    /// e.g. inviting someone who already has a pending invitation.
    pub fn is_duplicate(&self) -> bool {
        !self.ok
            && self
                .message
                .as_deref()
                .is_some_and(|m| m.to_ascii_lowercase().contains("already"))
    }
}

/// Backend calls the flows below are built on.
#[async_trait]
pub trait InvitationService: Send + Sync {
    async fn create_match_invitation(
        &self,
        game: Game,
        user: &str,
    ) -> Result<InvitationOutcome, InvitationError>;
    async fn accept_invitation(&self, token: &str) -> Result<InvitationOutcome, InvitationError>;
    async fn decline_invitation(&self, token: &str) -> Result<InvitationOutcome, InvitationError>;
    async fn cancel_invitation(&self, token: &str) -> Result<InvitationOutcome, InvitationError>;
    async fn create_tournament(
        &self,
        name: &str,
        game: Game,
    ) -> Result<InvitationOutcome, InvitationError>;
    async fn create_tournament_invitation(
        &self,
        tournament_id: &str,
        user: &str,
    ) -> Result<InvitationOutcome, InvitationError>;
    async fn delete_tournament(&self, tournament_id: &str) -> Result<(), InvitationError>;
}

/// Tournament names are 1 to 20 ASCII letters, digits, or spaces.
pub fn validate_tournament_name(name: &str) -> Result<(), InvitationError> {
    let valid = !name.is_empty()
        && name.len() <= TOURNAMENT_NAME_MAX
        && name.chars().all(|c| c.is_ascii_alphanumeric() || c == ' ');
    if valid {
        Ok(())
    } else {
        Err(InvitationError::InvalidTournamentName)
    }
}

pub struct Invitations {
    service: Arc<dyn InvitationService>,
    notify: Arc<dyn NotifyUi>,
}

impl Invitations {
    pub fn new(service: Arc<dyn InvitationService>, notify: Arc<dyn NotifyUi>) -> Self {
        Self { service, notify }
    }

    /// Invite a friend to a match. A duplicate invitation surfaces as an
    /// alert and yields no token.
    pub async fn send_match_invitation(
        &self,
        game: Game,
        user: &str,
    ) -> Result<Option<String>, InvitationError> {
        let outcome = self.service.create_match_invitation(game, user).await?;
        if outcome.is_duplicate() {
            if let Some(message) = &outcome.message {
                self.notify.alert(message);
            }
            return Ok(None);
        }
        Ok(outcome.invitation_token)
    }

    /// Accept an invitation. Returns the game key to join, or `None` when
    /// the invitation was already resolved (alerted, not an error).
    pub async fn accept_match_invitation(
        &self,
        token: &str,
    ) -> Result<Option<String>, InvitationError> {
        let outcome = self.service.accept_invitation(token).await?;
        if outcome.is_duplicate() {
            if let Some(message) = &outcome.message {
                self.notify.alert(message);
            }
            return Ok(None);
        }
        Ok(outcome.game_key)
    }

    pub async fn decline_match_invitation(&self, token: &str) -> Result<(), InvitationError> {
        self.service.decline_invitation(token).await?;
        Ok(())
    }

    pub async fn cancel_match_invitation(&self, token: &str) -> Result<(), InvitationError> {
        self.service.cancel_invitation(token).await?;
        Ok(())
    }

    /// Create a tournament and invite every player. If any invitation
    /// fails the tournament is deleted again so no half-populated bracket
    /// is left behind, and the user sees a single alert.
    pub async fn setup_tournament(
        &self,
        name: &str,
        game: Game,
        invitees: &[String],
    ) -> Result<String, InvitationError> {
        validate_tournament_name(name)?;

        let created = self.service.create_tournament(name, game).await?;
        let tournament_id = created
            .tournament_id
            .ok_or_else(|| InvitationError::Service("tournament created without an id".into()))?;

        for user in invitees {
            let result = self.service.create_tournament_invitation(&tournament_id, user).await;
            let reason = match result {
                Ok(outcome) if outcome.ok => continue,
                Ok(outcome) => outcome.message.unwrap_or_else(|| "invitation rejected".into()),
                Err(err) => err.to_string(),
            };

            if let Err(err) = self.service.delete_tournament(&tournament_id).await {
                warn!(
                    component = "invitations",
                    event = "invitations.rollback_failed",
                    tournament_id = %tournament_id,
                    error = %err,
                    "Failed to delete half-created tournament"
                );
            }
            self.notify.alert(&format!("Could not invite {user}"));
            return Err(InvitationError::SetupFailed { user: user.clone(), reason });
        }

        Ok(tournament_id)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::VecDeque;
    use std::sync::Mutex;

    use super::*;
    use crate::testing::{RecordingUi, UiCall};

    #[test]
    fn name_validation_matches_the_form_rules() {
        assert!(validate_tournament_name("Friday Pong 3").is_ok());
        assert!(validate_tournament_name("a").is_ok());
        assert!(validate_tournament_name(&"a".repeat(20)).is_ok());

        assert!(validate_tournament_name("").is_err());
        assert!(validate_tournament_name(&"a".repeat(21)).is_err());
        assert!(validate_tournament_name("semi;final").is_err());
        assert!(validate_tournament_name("émile").is_err());
    }

    #[derive(Debug, Clone, PartialEq, Eq)]
    enum ServiceCall {
        CreateMatch { user: String },
        Accept { token: String },
        CreateTournament { name: String },
        TournamentInvite { tournament_id: String, user: String },
        DeleteTournament { tournament_id: String },
    }

    #[derive(Default)]
    struct ScriptedService {
        calls: Mutex<Vec<ServiceCall>>,
        outcomes: Mutex<VecDeque<InvitationOutcome>>,
    }

    impl ScriptedService {
        fn with(outcomes: Vec<InvitationOutcome>) -> Arc<Self> {
            Arc::new(Self {
                calls: Mutex::new(Vec::new()),
                outcomes: Mutex::new(outcomes.into()),
            })
        }

        fn calls(&self) -> Vec<ServiceCall> {
            self.calls.lock().unwrap().clone()
        }

        fn next_outcome(&self) -> Result<InvitationOutcome, InvitationError> {
            self.outcomes
                .lock()
                .unwrap()
                .pop_front()
                .ok_or_else(|| InvitationError::Service("script exhausted".into()))
        }
    }

    fn ok_outcome() -> InvitationOutcome {
        InvitationOutcome { ok: true, ..Default::default() }
    }

    #[async_trait]
    impl InvitationService for ScriptedService {
        async fn create_match_invitation(
            &self,
            _game: Game,
            user: &str,
        ) -> Result<InvitationOutcome, InvitationError> {
            self.calls.lock().unwrap().push(ServiceCall::CreateMatch { user: user.into() });
            self.next_outcome()
        }
        async fn accept_invitation(
            &self,
            token: &str,
        ) -> Result<InvitationOutcome, InvitationError> {
            self.calls.lock().unwrap().push(ServiceCall::Accept { token: token.into() });
            self.next_outcome()
        }
        async fn decline_invitation(
            &self,
            _token: &str,
        ) -> Result<InvitationOutcome, InvitationError> {
            self.next_outcome()
        }
        async fn cancel_invitation(
            &self,
            _token: &str,
        ) -> Result<InvitationOutcome, InvitationError> {
            self.next_outcome()
        }
        async fn create_tournament(
            &self,
            name: &str,
            _game: Game,
        ) -> Result<InvitationOutcome, InvitationError> {
            self.calls.lock().unwrap().push(ServiceCall::CreateTournament { name: name.into() });
            self.next_outcome()
        }
        async fn create_tournament_invitation(
            &self,
            tournament_id: &str,
            user: &str,
        ) -> Result<InvitationOutcome, InvitationError> {
            self.calls.lock().unwrap().push(ServiceCall::TournamentInvite {
                tournament_id: tournament_id.into(),
                user: user.into(),
            });
            self.next_outcome()
        }
        async fn delete_tournament(&self, tournament_id: &str) -> Result<(), InvitationError> {
            self.calls
                .lock()
                .unwrap()
                .push(ServiceCall::DeleteTournament { tournament_id: tournament_id.into() });
            Ok(())
        }
    }

    fn invitations(service: Arc<ScriptedService>) -> (Arc<RecordingUi>, Invitations) {
        let (ui, collaborators) = RecordingUi::collaborators();
        (ui, Invitations::new(service, collaborators.notify))
    }

    #[tokio::test]
    async fn accepting_a_live_invitation_yields_the_game_key() {
        let service = ScriptedService::with(vec![InvitationOutcome {
            ok: true,
            game_key: Some("g-1".into()),
            ..Default::default()
        }]);
        let (ui, invitations) = invitations(service.clone());

        let key = invitations.accept_match_invitation("inv-1").await.unwrap();
        assert_eq!(key.as_deref(), Some("g-1"));
        assert!(ui.calls().is_empty());
    }

    #[tokio::test]
    async fn accepting_a_resolved_invitation_alerts_instead() {
        let service = ScriptedService::with(vec![InvitationOutcome {
            ok: false,
            message: Some("Invitation already accepted".into()),
            ..Default::default()
        }]);
        let (ui, invitations) = invitations(service.clone());

        let key = invitations.accept_match_invitation("inv-1").await.unwrap();
        assert_eq!(key, None);
        assert_eq!(
            ui.calls(),
            vec![UiCall::Alert { text: "Invitation already accepted".into() }]
        );
    }

    #[tokio::test]
    async fn duplicate_match_invitation_alerts_without_a_token() {
        let service = ScriptedService::with(vec![InvitationOutcome {
            ok: false,
            message: Some("You already invited bob".into()),
            ..Default::default()
        }]);
        let (ui, invitations) = invitations(service.clone());

        let token = invitations.send_match_invitation(Game::Pong, "bob").await.unwrap();
        assert_eq!(token, None);
        assert_eq!(ui.calls(), vec![UiCall::Alert { text: "You already invited bob".into() }]);
    }

    #[tokio::test]
    async fn tournament_setup_invites_every_player() {
        let service = ScriptedService::with(vec![
            InvitationOutcome { ok: true, tournament_id: Some("t-1".into()), ..Default::default() },
            ok_outcome(),
            ok_outcome(),
        ]);
        let (ui, invitations) = invitations(service.clone());

        let id = invitations
            .setup_tournament("Friday Cup", Game::Pong, &["alice".into(), "bob".into()])
            .await
            .unwrap();
        assert_eq!(id, "t-1");
        assert!(ui.calls().is_empty());
        assert_eq!(
            service.calls(),
            vec![
                ServiceCall::CreateTournament { name: "Friday Cup".into() },
                ServiceCall::TournamentInvite { tournament_id: "t-1".into(), user: "alice".into() },
                ServiceCall::TournamentInvite { tournament_id: "t-1".into(), user: "bob".into() },
            ]
        );
    }

    #[tokio::test]
    async fn failed_invitation_rolls_the_tournament_back() {
        let service = ScriptedService::with(vec![
            InvitationOutcome { ok: true, tournament_id: Some("t-2".into()), ..Default::default() },
            ok_outcome(),
            InvitationOutcome { ok: false, message: Some("unknown user".into()), ..Default::default() },
        ]);
        let (ui, invitations) = invitations(service.clone());

        let err = invitations
            .setup_tournament("Cup", Game::Chess, &["alice".into(), "ghost".into(), "carol".into()])
            .await
            .unwrap_err();
        assert!(matches!(err, InvitationError::SetupFailed { ref user, .. } if user == "ghost"));

        // carol is never invited and the tournament is deleted exactly once.
        assert_eq!(
            service.calls(),
            vec![
                ServiceCall::CreateTournament { name: "Cup".into() },
                ServiceCall::TournamentInvite { tournament_id: "t-2".into(), user: "alice".into() },
                ServiceCall::TournamentInvite { tournament_id: "t-2".into(), user: "ghost".into() },
                ServiceCall::DeleteTournament { tournament_id: "t-2".into() },
            ]
        );
        assert_eq!(ui.calls(), vec![UiCall::Alert { text: "Could not invite ghost".into() }]);
    }

    #[tokio::test]
    async fn invalid_name_fails_before_any_backend_call() {
        let service = ScriptedService::with(Vec::new());
        let (ui, invitations) = invitations(service.clone());

        let err = invitations
            .setup_tournament("no/slash", Game::Pong, &["alice".into()])
            .await
            .unwrap_err();
        assert!(matches!(err, InvitationError::InvalidTournamentName));
        assert!(service.calls().is_empty());
        assert!(ui.calls().is_empty());
    }
}
