pub mod config;
pub mod error;
pub mod domain {
    pub mod money;
    pub mod order;
}
pub mod currency {
    pub mod converter;
    pub mod rate_source;
}
pub mod adapters;
pub mod lifecycle {
    pub mod transitions;
}
pub mod repo {
    pub mod orders_repo;
}
pub mod service {
    pub mod ingestion_service;
}
pub mod http {
    pub mod handlers {
        pub mod webhooks;
    }
}

#[derive(Clone)]
pub struct AppState {
    pub ingestion: service::ingestion_service::IngestionService,
}
