//! Shared application state injected into every handler.

use std::sync::Arc;

use tokio::sync::mpsc;

use crate::application::services::LinkService;
use crate::domain::click_event::ClickEvent;
use crate::domain::repositories::MappingRepository;
use crate::infrastructure::cache::CacheService;
use crate::utils::code_generator::CodeGenerator;

/// Handles built once at startup and cloned into each request.
///
/// The mapping store is reached only through `link_service`; there is no
/// process-wide database handle.
#[derive(Clone)]
pub struct AppState {
    pub link_service: Arc<LinkService<dyn MappingRepository>>,
    pub cache: Arc<dyn CacheService>,
    pub click_sender: mpsc::Sender<ClickEvent>,
    /// Normalized public base URL; `None` means "use the request host".
    pub base_domain: Option<String>,
}

impl AppState {
    pub fn new(
        repository: Arc<dyn MappingRepository>,
        generator: Arc<dyn CodeGenerator>,
        generation_attempts: usize,
        cache: Arc<dyn CacheService>,
        click_sender: mpsc::Sender<ClickEvent>,
        base_domain: Option<String>,
    ) -> Self {
        Self {
            link_service: Arc::new(LinkService::new(
                repository,
                generator,
                generation_attempts,
            )),
            cache,
            click_sender,
            base_domain,
        }
    }
}
