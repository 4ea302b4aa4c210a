// End-to-end runtime smoke test (headless)
// - Starts newsdeck::app::run in the background with NEWSDECK_TEST_HEADLESS=1.
// - The endpoint points at a mock server so the first cycle completes.
// - If the task finishes early it must return Ok(()); otherwise it is aborted
//   and the join must be a clean cancel.

use std::time::Duration;

use httpmock::{Method::GET, MockServer};
use serde_json::json;

#[tokio::test(flavor = "multi_thread")]
async fn runtime_smoke_headless_initializes_and_runs_without_panic() {
    // Bypass raw mode, the alternate screen, and the input thread
    unsafe {
        std::env::set_var("NEWSDECK_TEST_HEADLESS", "1");
    }

    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(GET).path("/api/news");
        then.status(200).json_body(json!({
            "success": true,
            "news": [{ "link": "https://news.test/1", "title": "One", "source": "Test",
                       "published": "2025-03-10 11:30:00" }],
        }));
    });
    let settings = newsdeck::theme::Settings {
        endpoint_url: server.url("/api/news"),
        ..newsdeck::theme::Settings::default()
    };

    let handle = tokio::spawn(async move { newsdeck::app::run(settings).await });

    // Long enough for startup and the immediate first cycle
    tokio::time::sleep(Duration::from_millis(300)).await;

    if handle.is_finished() {
        match handle.await {
            Ok(run_result) => {
                if let Err(e) = run_result {
                    panic!("app::run returned error early: {e:?}");
                }
                return;
            }
            Err(join_err) => panic!("app::run task panicked: {join_err}"),
        }
    }
    assert!(mock.hits() >= 1, "first cycle should fire immediately");

    handle.abort();
    match handle.await {
        Ok(run_result) => {
            if let Err(e) = run_result {
                panic!("app::run completed with error on abort race: {e:?}");
            }
        }
        Err(join_err) => {
            assert!(
                join_err.is_cancelled(),
                "app::run join error should be cancellation, got: {join_err}"
            );
        }
    }
}
