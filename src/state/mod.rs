use crate::application::events::EventGate;
use crate::application::pipeline::RenderCoordinator;
use crate::application::resolve::ContextResolver;
use crate::infra::app_config::AppConfig;
use crate::infra::git::BlameLookup;
use crate::infra::host::EditorHost;
use crate::infra::jira::IssueClient;
use crate::render::{DetailPanel, InlineAnnotation, StatusIndicator};
use parking_lot::RwLock;
use std::sync::Arc;

/// Explicit service objects, constructed once at startup and passed by
/// reference to the event wiring. No singletons, no ambient globals.
pub struct Services {
    pub host: Arc<dyn EditorHost>,
    pub config: Arc<RwLock<AppConfig>>,
    pub status: Arc<StatusIndicator>,
    pub inline: Arc<InlineAnnotation>,
    pub detail: Arc<DetailPanel>,
    pub coordinator: Arc<RenderCoordinator>,
}

impl Services {
    pub fn new(
        host: Arc<dyn EditorHost>,
        blame: Arc<dyn BlameLookup>,
        issues: Arc<dyn IssueClient>,
        config: AppConfig,
    ) -> Self {
        let config = Arc::new(RwLock::new(config));
        let status = Arc::new(StatusIndicator::new(Arc::clone(&host)));
        let inline = Arc::new(InlineAnnotation::new(Arc::clone(&host)));
        let detail = Arc::new(DetailPanel::new(Arc::clone(&host)));
        let resolver = ContextResolver::new(Arc::clone(&host), blame);
        let coordinator = Arc::new(RenderCoordinator::new(
            Arc::clone(&host),
            resolver,
            issues,
            Arc::clone(&config),
            Arc::clone(&status),
            Arc::clone(&inline),
            Arc::clone(&detail),
        ));
        Self {
            host,
            config,
            status,
            inline,
            detail,
            coordinator,
        }
    }

    pub fn event_gate(&self) -> EventGate {
        EventGate::new(Arc::clone(&self.coordinator))
    }
}
