// Streaming dashboard service - Progressive loading with chunked JSON frames
use crate::application::dashboard_composer;
use crate::application::dashboard_service::DashboardService;
use crate::domain::dashboard::{Controls, DashboardSkeleton, Tab};
use crate::domain::filter::FilterCriteria;
use serde::Serialize;
use std::time::Instant;
use tokio::sync::mpsc;

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", content = "payload", rename_all = "snake_case")]
pub enum StreamFrame {
    /// Layout only, sent before the remote fetch starts.
    Skeleton(DashboardSkeleton),
    Controls(Controls),
    Tab(Tab),
    Complete(CompletionEvent),
    Error(String),
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CompletionEvent {
    pub total_tabs: usize,
    pub no_data: bool,
    pub duration_ms: u64,
}

#[derive(Clone)]
pub struct StreamingDashboardService {
    dashboard_service: DashboardService,
}

impl StreamingDashboardService {
    pub fn new(dashboard_service: DashboardService) -> Self {
        Self { dashboard_service }
    }

    pub async fn stream_dashboard(&self, criteria: FilterCriteria) -> mpsc::Receiver<StreamFrame> {
        let (tx, rx) = mpsc::channel(16);
        let start_time = Instant::now();

        // 1. Skeleton goes out immediately so the client can draw placeholders
        let skeleton = dashboard_composer::skeleton(self.dashboard_service.title());
        let _ = tx.send(StreamFrame::Skeleton(skeleton)).await;

        // 2. Fetch + compute, then emit one frame per tab
        let service = self.dashboard_service.clone();
        tokio::spawn(async move {
            match service.get_dashboard(&criteria).await {
                Ok(dashboard) => {
                    let total_tabs = dashboard.tabs.len();
                    let _ = tx.send(StreamFrame::Controls(dashboard.controls)).await;
                    for tab in dashboard.tabs {
                        if tx.send(StreamFrame::Tab(tab)).await.is_err() {
                            tracing::debug!("Dashboard stream receiver dropped");
                            return;
                        }
                    }

                    let complete = CompletionEvent {
                        total_tabs,
                        no_data: dashboard.no_data,
                        duration_ms: start_time.elapsed().as_millis() as u64,
                    };
                    let _ = tx.send(StreamFrame::Complete(complete)).await;
                }
                Err(e) => {
                    tracing::error!("Error streaming dashboard: {}", e);
                    let _ = tx.send(StreamFrame::Error(e.to_string())).await;
                }
            }
        });

        rx
    }
}
