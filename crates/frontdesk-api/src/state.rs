//! Application state wiring the service and its adapters together.
//!
//! The service is generic over store/adapter traits; AppState pins it to
//! the concrete infra implementations. Adapters are constructed exactly
//! once here, from the configuration loaded at startup — an absent
//! credential section yields a disabled adapter, so "no-op when
//! unconfigured" is decided at construction, not per call.

use std::sync::Arc;

use frontdesk_core::service::ChatService;
use frontdesk_infra::memory::MemoryChatStore;
use frontdesk_infra::push::PushRelay;
use frontdesk_infra::telegram::TelegramNotifier;
use frontdesk_types::config::Config;

/// The service generics pinned to the concrete infra implementations.
pub type ConcreteChatService = ChatService<MemoryChatStore, PushRelay, TelegramNotifier>;

/// Shared application state for the HTTP layer.
#[derive(Clone)]
pub struct AppState {
    pub chat_service: Arc<ConcreteChatService>,
    pub config: Arc<Config>,
}

impl AppState {
    /// Build state from loaded configuration.
    pub fn init(config: Config) -> Self {
        let fanout = PushRelay::from_config(config.push.clone());
        let notifier = TelegramNotifier::from_config(config.notify.clone());
        let service = ChatService::new(MemoryChatStore::new(), fanout, notifier);

        Self {
            chat_service: Arc::new(service),
            config: Arc::new(config),
        }
    }
}
