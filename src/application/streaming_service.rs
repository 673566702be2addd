// Streaming dashboard service - Progressive loading over chunked frames
use std::time::Instant;

use tokio::sync::mpsc;

use crate::application::dashboard_service::{build_panels, DashboardService};
use crate::domain::dashboard::{PageRequest, PanelSkeleton, RecordPage, StreamMessage};
use crate::domain::filter::{filter_records, SelectionRequest};
use crate::domain::metrics::summarize;

const CHANNEL_CAPACITY: usize = 16;

#[derive(Clone)]
pub struct StreamingDashboardService {
    dashboards: DashboardService,
}

impl StreamingDashboardService {
    pub fn new(dashboards: DashboardService) -> Self {
        Self { dashboards }
    }

    /// Skeleton first, then metrics, one message per chart, the table page,
    /// and a completion event. A load failure yields a single error message.
    pub async fn stream_dashboard(
        &self,
        request: SelectionRequest,
        page: PageRequest,
    ) -> mpsc::Receiver<StreamMessage> {
        let (tx, rx) = mpsc::channel(CHANNEL_CAPACITY);
        let start_time = Instant::now();

        let dataset = match self.dashboards.datasets().current().await {
            Ok(dataset) => dataset,
            Err(e) => {
                let _ = tx.send(StreamMessage::Error { message: e.to_string() }).await;
                return rx;
            }
        };
        let settings = self.dashboards.settings().clone();

        tokio::spawn(async move {
            let selection = request.resolve(dataset.options());
            let view = filter_records(&dataset, &selection);
            let panels = build_panels(&view, &settings);

            let skeleton = StreamMessage::Skeleton {
                title: settings.title.clone(),
                subtitle: settings.subtitle.clone(),
                filters: dataset.options().clone(),
                selection: selection.clone(),
                panels: panels.iter().map(PanelSkeleton::from).collect(),
            };
            if tx.send(skeleton).await.is_err() {
                return;
            }

            let metrics = summarize(&view);
            let tiles = metrics.tiles();
            if tx.send(StreamMessage::Metrics { metrics, tiles }).await.is_err() {
                return;
            }

            let panel_count = panels.len();
            for panel in panels {
                if tx.send(StreamMessage::Chart { panel }).await.is_err() {
                    tracing::debug!("Dashboard stream receiver dropped");
                    return;
                }
            }

            let table = RecordPage::from_view(&view, page);
            if tx.send(StreamMessage::Table { table }).await.is_err() {
                return;
            }

            let duration_ms = u64::try_from(start_time.elapsed().as_millis()).unwrap_or(u64::MAX);
            let _ = tx
                .send(StreamMessage::Complete {
                    panels: panel_count,
                    duration_ms,
                })
                .await;
        });

        rx
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{dashboard_service, sample_records};
    use crate::domain::salary::SalaryRecord;
    use std::collections::BTreeSet;

    fn service(records: Option<Vec<SalaryRecord>>) -> StreamingDashboardService {
        StreamingDashboardService::new(dashboard_service(records))
    }

    async fn collect(mut rx: mpsc::Receiver<StreamMessage>) -> Vec<StreamMessage> {
        let mut messages = Vec::new();
        while let Some(msg) = rx.recv().await {
            messages.push(msg);
        }
        messages
    }

    fn kind(msg: &StreamMessage) -> &'static str {
        match msg {
            StreamMessage::Skeleton { .. } => "skeleton",
            StreamMessage::Metrics { .. } => "metrics",
            StreamMessage::Chart { .. } => "chart",
            StreamMessage::Table { .. } => "table",
            StreamMessage::Complete { .. } => "complete",
            StreamMessage::Error { .. } => "error",
        }
    }

    #[tokio::test]
    async fn test_stream_sends_messages_in_order() {
        let page = PageRequest { offset: 0, limit: 3 };
        let rx = service(Some(sample_records()))
            .stream_dashboard(SelectionRequest::default(), page)
            .await;
        let messages = collect(rx).await;

        let kinds: Vec<&str> = messages.iter().map(kind).collect();
        assert_eq!(
            kinds,
            vec!["skeleton", "metrics", "chart", "chart", "chart", "chart", "table", "complete"]
        );

        match &messages[6] {
            StreamMessage::Table { table } => {
                assert_eq!(table.total, 8);
                assert_eq!(table.rows.len(), 3);
            }
            other => panic!("expected table, got {other:?}"),
        }
        match messages.last() {
            Some(StreamMessage::Complete { panels, .. }) => assert_eq!(*panels, 4),
            other => panic!("expected completion, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_stream_respects_selection() {
        let request = SelectionRequest {
            years: Some(BTreeSet::from([2024])),
            ..Default::default()
        };
        let rx = service(Some(sample_records()))
            .stream_dashboard(request, PageRequest { offset: 0, limit: 10 })
            .await;
        let messages = collect(rx).await;

        match &messages[1] {
            StreamMessage::Metrics { metrics, .. } => assert_eq!(metrics.record_count, 3),
            other => panic!("expected metrics, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_stream_reports_load_failure() {
        let rx = service(None)
            .stream_dashboard(SelectionRequest::default(), PageRequest { offset: 0, limit: 10 })
            .await;
        let messages = collect(rx).await;

        assert_eq!(messages.len(), 1);
        match &messages[0] {
            StreamMessage::Error { message } => assert!(message.contains("offline")),
            other => panic!("expected error, got {other:?}"),
        }
    }
}
