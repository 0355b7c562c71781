//! 可观测性模块集成测试
//!
//! 使用本地 Prometheus recorder 验证指标名称与标签。

use booking_shared::observability::metrics::{record_booking, record_http_request};
use metrics_exporter_prometheus::PrometheusBuilder;

#[test]
fn test_booking_counter_is_labelled() {
    let recorder = PrometheusBuilder::new().build_recorder();
    let handle = recorder.handle();

    metrics::with_local_recorder(&recorder, || {
        record_booking("create", "success");
        record_booking("create", "success");
        record_booking("update", "forbidden");
    });

    let rendered = handle.render();
    assert!(rendered.contains("bookings_total"));
    assert!(rendered.contains(r#"operation="create""#));
    assert!(rendered.contains(r#"outcome="forbidden""#));
}

#[test]
fn test_http_request_metrics() {
    let recorder = PrometheusBuilder::new().build_recorder();
    let handle = recorder.handle();

    metrics::with_local_recorder(&recorder, || {
        record_http_request("GET", "/booking", 404, 0.01);
        record_http_request("POST", "/booking", 200, 0.02);
    });

    let rendered = handle.render();
    assert!(rendered.contains("http_requests_total"));
    assert!(rendered.contains("http_request_duration_seconds"));
    assert!(rendered.contains(r#"status="404""#));
}
