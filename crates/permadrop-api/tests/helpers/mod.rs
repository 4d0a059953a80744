//! Shared test helpers: a mock orchestrator and `TestServer` construction
//! for driving the router over real HTTP.

#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum_test::TestServer;
use uuid::Uuid;

use permadrop_api::{create_router, AppState};
use permadrop_core::models::CustomMetadata;
use permadrop_core::Config;
use permadrop_orchestrator::{
    CreatedEntity, OrchestratorError, OrchestratorResult, UploadOrchestrator, UploadRequest,
    UploadResult,
};

pub const TEST_FOLDER_ID: &str = "11111111-2222-4333-8444-555555555555";

/// One upload observed by the mock orchestrator
pub struct CapturedUpload {
    pub entity_name: String,
    pub content_type: String,
    pub size: u64,
    pub data: Vec<u8>,
    pub dest_folder_id: Uuid,
    pub metadata: Option<CustomMetadata>,
}

/// Orchestrator double: records every request and answers with
/// deterministic transaction ids, or fails every call when configured to.
pub struct MockOrchestrator {
    pub calls: AtomicUsize,
    pub fail_with: Option<String>,
    pub captured: Mutex<Vec<CapturedUpload>>,
}

impl MockOrchestrator {
    pub fn ok() -> Arc<Self> {
        Arc::new(Self {
            calls: AtomicUsize::new(0),
            fail_with: None,
            captured: Mutex::new(Vec::new()),
        })
    }

    pub fn failing(message: &str) -> Arc<Self> {
        Arc::new(Self {
            calls: AtomicUsize::new(0),
            fail_with: Some(message.to_string()),
            captured: Mutex::new(Vec::new()),
        })
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl UploadOrchestrator for MockOrchestrator {
    async fn upload(&self, entities: Vec<UploadRequest>) -> OrchestratorResult<UploadResult> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        if let Some(message) = &self.fail_with {
            return Err(OrchestratorError::UploadFailed(message.clone()));
        }

        let mut captured = self.captured.lock().expect("captured lock");
        let mut created = Vec::new();
        for (i, request) in entities.iter().enumerate() {
            let entity = &request.wrapped_entity;
            captured.push(CapturedUpload {
                entity_name: entity.base_name().to_string(),
                content_type: entity.content_type().to_string(),
                size: entity.size(),
                data: entity.data_buffer().to_vec(),
                dest_folder_id: request.dest_folder_id,
                metadata: entity.custom_metadata().cloned(),
            });
            created.push(CreatedEntity {
                entity_id: Uuid::new_v4(),
                entity_name: entity.base_name().to_string(),
                data_tx_id: format!("data-tx-{}", i),
                metadata_tx_id: format!("meta-tx-{}", i),
                size: entity.size(),
            });
        }
        Ok(UploadResult { created })
    }
}

pub fn test_folder_id() -> Uuid {
    TEST_FOLDER_ID.parse().expect("valid test folder id")
}

fn test_config() -> Config {
    Config {
        server_port: 0,
        cors_origins: vec!["*".to_string()],
        environment: "test".to_string(),
        wallet_jwk: r#"{"kty":"RSA","e":"AQAB","n":"dGVzdA"}"#.to_string(),
        dest_folder_id: test_folder_id(),
    }
}

pub fn test_server(orchestrator: Arc<MockOrchestrator>) -> TestServer {
    let state = Arc::new(AppState::new(test_config(), orchestrator));
    TestServer::new(create_router(state)).expect("test server")
}
