//! Favorites service: glues the API client, the durable store, and the
//! upgrade prompt into the operations a UI shell calls from its event
//! handlers.
//!
//! The service owns the guest/account duality: while no token is set it acts
//! as a guest under the durable session id, mirrors favorites into the local
//! cache for instant `is_favorited` answers, and enforces the guest cap
//! locally before spending a round trip. Once [`complete_login`] has run it
//! acts under the bearer token and the backend alone is authoritative.
//!
//! [`complete_login`]: FavoritesService::complete_login

use std::collections::HashSet;

use becometry_shared::constants::MAX_GUEST_FAVORITES;
use becometry_shared::{AuthToken, GroupedFavorites, Identity, ProfileId};
use becometry_store::{Database, StoreError};

use crate::api::{AddOutcome, FavoritesApi, FavoritesCount};
use crate::config::ClientConfig;
use crate::error::{ClientError, Result};
use crate::prompt::UpgradePrompt;

/// Result of [`FavoritesService::toggle_favorite`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Toggle {
    Added(AddOutcome),
    Removed,
}

/// Central favorites orchestrator.
pub struct FavoritesService {
    api: FavoritesApi,
    store: Database,
    prompt: UpgradePrompt,
    /// Bearer token once the user has signed in; `None` in guest mode.
    token: Option<AuthToken>,
    /// Guest cap. Starts at the built-in constant and is refreshed from the
    /// backend's `count.limit`, which is the source of truth.
    guest_limit: usize,
    /// Profile ids with an outstanding add/remove request. Single execution
    /// context; this is a double-click debounce, not a lock.
    in_flight: HashSet<ProfileId>,
}

impl FavoritesService {
    pub fn new(config: &ClientConfig, store: Database) -> Result<Self> {
        Ok(Self {
            api: FavoritesApi::new(config)?,
            store,
            prompt: UpgradePrompt::new(),
            token: None,
            guest_limit: MAX_GUEST_FAVORITES,
            in_flight: HashSet::new(),
        })
    }

    /// The durable store backing this service.
    pub fn store(&self) -> &Database {
        &self.store
    }

    /// Whether the service currently acts for a signed-in account.
    pub fn has_account(&self) -> bool {
        self.token.is_some()
    }

    /// Current guest cap (backend-derived once `count` has been called).
    pub fn guest_limit(&self) -> usize {
        self.guest_limit
    }

    /// The acting identity: the bearer token when signed in, otherwise the
    /// durable guest session id (minted on first use).
    fn identity(&self) -> Result<Identity> {
        match &self.token {
            Some(token) => Ok(Identity::Account(token.clone())),
            None => Ok(Identity::Guest(self.store.get_or_create_session_id()?)),
        }
    }

    // ------------------------------------------------------------------
    // Add / remove / toggle
    // ------------------------------------------------------------------

    /// Favorite a profile.
    ///
    /// Guest mode enforces the cap locally before any round trip; either the
    /// local rejection or a backend `needsAccount` signal shows the upgrade
    /// prompt and leaves the favorites unchanged. An already-favorited id is
    /// reported as accepted without a second write.
    pub async fn add_favorite(&mut self, profile_id: ProfileId) -> Result<AddOutcome> {
        if !self.in_flight.insert(profile_id) {
            return Err(ClientError::OperationInFlight(profile_id));
        }
        let result = self.add_favorite_inner(profile_id).await;
        self.in_flight.remove(&profile_id);
        result
    }

    async fn add_favorite_inner(&mut self, profile_id: ProfileId) -> Result<AddOutcome> {
        let identity = self.identity()?;

        if !identity.has_account() {
            if self.store.has_guest_favorite(profile_id)? {
                // AlreadyFavorited is success, not error.
                return Ok(AddOutcome {
                    accepted: true,
                    needs_account: false,
                    session_id: None,
                });
            }
            if self.store.guest_favorites_count()? >= self.guest_limit {
                tracing::debug!(%profile_id, limit = self.guest_limit, "guest cap hit locally");
                self.prompt.limit_rejected();
                return Ok(AddOutcome {
                    accepted: false,
                    needs_account: true,
                    session_id: None,
                });
            }
        }

        let outcome = self.api.add(profile_id, &identity).await?;

        if outcome.needs_account {
            // The backend is authoritative for the cap; the operation did
            // not take effect.
            self.prompt.limit_rejected();
            return Ok(outcome);
        }

        if !identity.has_account() {
            if let Some(minted) = &outcome.session_id {
                self.store.set_session_id(minted)?;
                tracing::info!(session_id = %minted, "persisted backend-minted session id");
            }

            match self.store.add_guest_favorite(profile_id, self.guest_limit) {
                Ok(()) | Err(StoreError::AlreadyFavorited(_)) => {}
                Err(StoreError::GuestLimitReached { limit }) => {
                    // Backend accepted beyond our cap; it wins, we just
                    // cannot mirror the entry locally.
                    tracing::warn!(%profile_id, limit, "backend accepted add past local cap");
                }
                Err(e) => return Err(e.into()),
            }

            let count = self.store.guest_favorites_count()?;
            self.prompt.successful_add(count, self.guest_limit);
        }

        Ok(outcome)
    }

    /// Unfavorite a profile. Idempotent end to end.
    pub async fn remove_favorite(&mut self, profile_id: ProfileId) -> Result<()> {
        if !self.in_flight.insert(profile_id) {
            return Err(ClientError::OperationInFlight(profile_id));
        }
        let result = self.remove_favorite_inner(profile_id).await;
        self.in_flight.remove(&profile_id);
        result
    }

    async fn remove_favorite_inner(&mut self, profile_id: ProfileId) -> Result<()> {
        let identity = self.identity()?;
        self.api.remove(profile_id, &identity).await?;

        if !identity.has_account() {
            self.store.remove_guest_favorite(profile_id)?;
        }
        Ok(())
    }

    /// Remove when favorited, add otherwise.
    pub async fn toggle_favorite(&mut self, profile_id: ProfileId) -> Result<Toggle> {
        if self.is_favorited(profile_id).await {
            self.remove_favorite(profile_id).await?;
            Ok(Toggle::Removed)
        } else {
            Ok(Toggle::Added(self.add_favorite(profile_id).await?))
        }
    }

    // ------------------------------------------------------------------
    // Reads
    // ------------------------------------------------------------------

    /// Whether a profile is favorited, for display purposes.
    ///
    /// Soft-fails to `false` on any error: guests are answered from the
    /// local cache without a round trip, account holders via
    /// `GET /favorites/check`.
    pub async fn is_favorited(&self, profile_id: ProfileId) -> bool {
        match &self.token {
            None => match self.store.has_guest_favorite(profile_id) {
                Ok(found) => found,
                Err(e) => {
                    tracing::warn!(%profile_id, error = %e, "guest cache check failed");
                    false
                }
            },
            Some(token) => {
                let identity = Identity::Account(token.clone());
                match self.api.check(profile_id, &identity).await {
                    Ok(found) => found,
                    Err(e) => {
                        tracing::debug!(%profile_id, error = %e, "favorite check soft-failed");
                        false
                    }
                }
            }
        }
    }

    /// All favorites, grouped by category by the backend. Errors propagate;
    /// the caller decides whether to degrade.
    pub async fn list(&self) -> Result<GroupedFavorites> {
        let identity = self.identity()?;
        self.api.list(&identity).await
    }

    /// Favorite count and cap for the acting identity. Refreshes the local
    /// guest cap from the backend's `limit`.
    pub async fn count(&mut self) -> Result<FavoritesCount> {
        let identity = self.identity()?;
        let counts = self.api.count(&identity).await?;

        if let Some(limit) = counts.limit {
            if limit > 0 {
                self.guest_limit = limit as usize;
            }
        }
        Ok(counts)
    }

    /// Flat favorite count, for badge display.
    pub async fn favorites_count(&mut self) -> Result<u32> {
        Ok(self.count().await?.count)
    }

    /// Whether another favorite can be added without hitting the cap.
    pub fn can_add_more(&self) -> Result<bool> {
        if self.token.is_some() {
            return Ok(true);
        }
        Ok(self.store.guest_favorites_count()? < self.guest_limit)
    }

    // ------------------------------------------------------------------
    // Upgrade prompt
    // ------------------------------------------------------------------

    pub fn upgrade_prompt_shown(&self) -> bool {
        self.prompt.is_shown()
    }

    pub fn dismiss_upgrade_prompt(&mut self) {
        self.prompt.dismiss();
    }

    // ------------------------------------------------------------------
    // Transfer-on-login handoff
    // ------------------------------------------------------------------

    /// Complete a login or registration: merge guest-session favorites into
    /// the account, then switch the service to account mode.
    ///
    /// The transfer runs before any subsequent favorites read. On success the
    /// guest cache and session id are cleared (ownership has moved to the
    /// account). Transfer failure is reported but does not block: the user is
    /// authenticated either way and can re-favorite manually.
    pub async fn complete_login(&mut self, token: AuthToken) -> Result<()> {
        let session = match self.store.session_id() {
            Ok(session) => session,
            Err(e) => {
                tracing::warn!(error = %e, "could not read stored session id, skipping transfer");
                None
            }
        };

        if let Some(session_id) = session {
            match self.api.transfer(&session_id, &token).await {
                Ok(()) => {
                    tracing::info!(session_id = %session_id, "guest favorites transferred to account");
                    if let Err(e) = self.store.clear_guest_favorites() {
                        tracing::warn!(error = %e, "failed to clear guest favorites after transfer");
                    }
                    if let Err(e) = self.store.clear_session_id() {
                        tracing::warn!(error = %e, "failed to clear session id after transfer");
                    }
                }
                Err(e) => {
                    tracing::warn!(session_id = %session_id, error = %e, "favorites transfer failed");
                }
            }
        }

        self.prompt.authenticated();
        self.token = Some(token);
        Ok(())
    }

    /// Drop the bearer token and return to guest mode. Guest state was
    /// cleared when the transfer ran, so this starts from a fresh guest
    /// context.
    pub fn logout(&mut self) {
        self.token = None;
    }
}
