use axum::extract::FromRef;

use crate::resolver::{CatalogMoodResolver, TextMoodResolver};
use std::sync::Arc;

use super::ServerConfig;

pub type GuardedTextResolver = Arc<TextMoodResolver>;
pub type GuardedCatalogResolver = Arc<CatalogMoodResolver>;

#[derive(Clone)]
pub struct ServerState {
    pub config: ServerConfig,
    pub text_resolver: GuardedTextResolver,
    pub catalog_resolver: GuardedCatalogResolver,
}

impl ServerState {
    pub fn new(
        config: ServerConfig,
        text_resolver: GuardedTextResolver,
        catalog_resolver: GuardedCatalogResolver,
    ) -> Self {
        Self {
            config,
            text_resolver,
            catalog_resolver,
        }
    }
}

impl FromRef<ServerState> for GuardedTextResolver {
    fn from_ref(input: &ServerState) -> Self {
        input.text_resolver.clone()
    }
}

impl FromRef<ServerState> for GuardedCatalogResolver {
    fn from_ref(input: &ServerState) -> Self {
        input.catalog_resolver.clone()
    }
}
