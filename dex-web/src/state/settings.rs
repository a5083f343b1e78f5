//! Active chain, token list and theme, persisted to `localStorage`.

use alloy_primitives::Address;
use leptos::prelude::*;
use shared::chains::{Chain, ChainKey};
use shared::dto::Token;
use shared::settings::{ImportOutcome, SettingsState, Theme};
use shared::wallet::{ChainUpdate, Transition};
use shared::Notification;

use crate::config::app_config;
use crate::error::AppError;
use crate::services::storage::LocalStore;

#[derive(Clone, Copy)]
pub struct SettingsContext {
    pub settings: RwSignal<SettingsState>,
    pub theme: RwSignal<Theme>,
    /// Changes only when the chain does, not on balance refreshes
    pub active_key: Memo<Option<ChainKey>>,
    pub token_list: Memo<Vec<Token>>,
}

impl SettingsContext {
    pub fn new() -> Self {
        let store = LocalStore;
        let settings = RwSignal::new(SettingsState::restore(&store, app_config().default_chain));
        let theme = RwSignal::new(Theme::load(&store));
        let active_key = Memo::new(move |_| settings.with(|s| s.active_key()));
        let token_list = Memo::new(move |_| settings.with(|s| s.token_list.clone()));

        Self {
            settings,
            theme,
            active_key,
            token_list,
        }
    }

    pub fn active_chain(&self) -> Option<&'static Chain> {
        self.active_key.get().map(Chain::by_key)
    }

    pub fn active_chain_untracked(&self) -> Option<&'static Chain> {
        self.active_key.get_untracked().map(Chain::by_key)
    }

    /// Select a chain (or none, for an unsupported network) and persist it.
    pub fn select_chain(&self, key: Option<ChainKey>) -> Option<Notification> {
        let mut notice = None;
        self.settings.update(|s| notice = s.set_active_chain(key));
        self.persist();
        notice
    }

    /// Adopt the chain the wallet reports on page load.
    pub fn apply_detected_chain(&self, chain_id: Option<u64>) -> Option<Notification> {
        let notice = self
            .settings
            .try_update(|s| s.apply_detected_chain_id(chain_id))
            .flatten();
        self.persist();
        notice
    }

    /// Follow a wallet transition. Persists when the chain moved.
    pub fn apply_transition(&self, transition: Transition) -> Vec<Notification> {
        let moved = transition.chain != ChainUpdate::Keep;
        let mut notices = Vec::new();
        self.settings
            .update(|s| notices = s.apply_transition(transition));
        if moved {
            self.persist();
        }
        notices
    }

    fn persist(&self) {
        if let Some(Err(e)) = self.settings.try_with_untracked(|s| s.persist(&LocalStore)) {
            log::warn!("Failed to persist active chain: {}", AppError::from(e));
        }
    }

    pub fn import_token(&self, token: Token) -> ImportOutcome {
        let mut outcome = ImportOutcome::AlreadyExists;
        self.settings.update(|s| outcome = s.import_token(token));
        outcome
    }

    pub fn update_balance(&self, address: Address, balance: &str) {
        self.settings.update(|s| {
            s.update_balance(&address, balance);
        });
    }

    pub fn toggle_theme(&self) {
        let next = self.theme.get_untracked().toggled();
        self.theme.set(next);
        if let Err(e) = next.save(&LocalStore) {
            log::warn!("Failed to persist theme: {}", AppError::from(e));
        }
        apply_theme(next);
    }

    /// Push the current theme onto the document root.
    pub fn apply_theme(&self) {
        apply_theme(self.theme.get_untracked());
    }
}

fn apply_theme(theme: Theme) {
    let classes = gloo_utils::document_element().class_list();
    let _ = classes.remove_2(Theme::Dark.as_str(), Theme::Light.as_str());
    let _ = classes.add_1(theme.as_str());
}

pub fn provide_settings_context() -> SettingsContext {
    let ctx = SettingsContext::new();
    provide_context(ctx);
    ctx
}

pub fn use_settings_context() -> SettingsContext {
    expect_context::<SettingsContext>()
}
