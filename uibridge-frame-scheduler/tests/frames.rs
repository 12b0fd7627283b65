use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use mock_host::RecordingTransport;
use tokio::runtime::Builder;
use uibridge_core::{BridgeConfig, FrameScheduler, UiManager};
use uibridge_frame_scheduler::{ManualFrameScheduler, TokioFrameScheduler};

#[test]
fn tokio_scheduler_flushes_after_one_frame() {
    let rt = Builder::new_current_thread()
        .enable_time()
        .build()
        .expect("runtime");

    rt.block_on(async {
        tokio::time::pause();
        let transport = Arc::new(RecordingTransport::new());
        let config = BridgeConfig::default();
        let frames = Arc::new(TokioFrameScheduler::from_config(
            tokio::runtime::Handle::current(),
            &config,
        ));
        let manager = UiManager::with_defaults(transport.clone(), frames);

        manager.create_element(1, "div");
        manager.set_property(1, "id", "root");

        // Paused clock auto-advances; stop short of the 16ms frame first.
        tokio::time::sleep(Duration::from_millis(10)).await;
        assert!(transport.sent().is_empty(), "flushed before the frame");

        tokio::time::sleep(Duration::from_millis(10)).await;
        assert_eq!(
            transport.sent(),
            vec![r#"["batchUpdate",[["createElement",[1,"div"]],["setProperty",[1,"id","root"]]]]"#]
        );
    });
}

#[test]
fn tokio_scheduler_runs_each_callback_once() {
    let rt = Builder::new_current_thread()
        .enable_time()
        .build()
        .expect("runtime");

    rt.block_on(async {
        tokio::time::pause();
        let frames =
            TokioFrameScheduler::current(Duration::from_millis(16)).expect("inside runtime");
        let ran = Arc::new(AtomicUsize::new(0));
        for _ in 0..3 {
            let ran = Arc::clone(&ran);
            frames.schedule_batch_flush(Box::new(move || {
                ran.fetch_add(1, Ordering::SeqCst);
            }));
        }

        tokio::time::sleep(Duration::from_millis(50)).await;
        assert_eq!(ran.load(Ordering::SeqCst), 3);
    });
}

#[test]
fn current_fails_outside_a_runtime() {
    assert!(TokioFrameScheduler::current(Duration::from_millis(16)).is_err());
}

#[test]
fn manual_scheduler_defers_callbacks_scheduled_mid_frame() {
    let frames = Arc::new(ManualFrameScheduler::new());
    let ran = Arc::new(AtomicUsize::new(0));

    let inner_frames = Arc::clone(&frames);
    let inner_ran = Arc::clone(&ran);
    frames.schedule_batch_flush(Box::new(move || {
        inner_ran.fetch_add(1, Ordering::SeqCst);
        let again = Arc::clone(&inner_ran);
        inner_frames.schedule_batch_flush(Box::new(move || {
            again.fetch_add(1, Ordering::SeqCst);
        }));
    }));

    assert_eq!(frames.run_frame(), 1);
    assert_eq!(ran.load(Ordering::SeqCst), 1);
    assert_eq!(frames.pending(), 1);

    assert_eq!(frames.run_frame(), 1);
    assert_eq!(ran.load(Ordering::SeqCst), 2);
    assert_eq!(frames.run_frame(), 0);
}
