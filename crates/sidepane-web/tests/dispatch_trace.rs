#![cfg(feature = "tracing")]

use std::sync::{Arc, Mutex};
use std::time::Duration;

use sidepane_core::PointerButton;
use sidepane_layout::SplitterHit;
use sidepane_runtime::{LayoutPolicy, MemoryStore, PanelStorageKeys};
use sidepane_web::WorkspaceHost;
use tracing::Subscriber;
use tracing_subscriber::layer::{Context, Layer, SubscriberExt};

#[derive(Default)]
struct DispatchTraceState {
    phases: Vec<String>,
    outcomes: Vec<String>,
}

struct DispatchTraceCapture {
    state: Arc<Mutex<DispatchTraceState>>,
}

impl<S> Layer<S> for DispatchTraceCapture
where
    S: Subscriber + for<'lookup> tracing_subscriber::registry::LookupSpan<'lookup>,
{
    fn on_event(&self, event: &tracing::Event<'_>, _ctx: Context<'_, S>) {
        if event.metadata().target() != "sidepane.web" {
            return;
        }
        struct Fields {
            phase: Option<String>,
            outcome: Option<String>,
        }
        impl tracing::field::Visit for Fields {
            fn record_debug(&mut self, field: &tracing::field::Field, value: &dyn std::fmt::Debug) {
                match field.name() {
                    "phase" => self.phase = Some(format!("{value:?}")),
                    "outcome" => self.outcome = Some(format!("{value:?}")),
                    _ => {}
                }
            }
        }
        let mut fields = Fields {
            phase: None,
            outcome: None,
        };
        event.record(&mut fields);
        let mut state = self.state.lock().expect("dispatch trace lock");
        if let Some(phase) = fields.phase {
            state.phases.push(phase);
        }
        if let Some(outcome) = fields.outcome {
            state.outcomes.push(outcome);
        }
    }
}

#[test]
fn applied_dispatches_are_traced_in_order() {
    let state = Arc::new(Mutex::new(DispatchTraceState::default()));
    let subscriber = tracing_subscriber::registry().with(DispatchTraceCapture {
        state: Arc::clone(&state),
    });
    let _guard = tracing::subscriber::set_default(subscriber);

    let mut host = WorkspaceHost::mount(
        MemoryStore::new(),
        PanelStorageKeys::default(),
        1000,
        &LayoutPolicy::default(),
    )
    .expect("default policy mounts");
    host.pointer_down(1, PointerButton::Primary, SplitterHit::Handle, 300);
    host.capture_acquired(1);
    host.pointer_move(1, 400);
    host.advance(Duration::from_millis(16));
    host.animation_frame();
    host.pointer_up(1, PointerButton::Primary);

    let snapshot = state.lock().expect("dispatch trace lock");
    assert_eq!(
        snapshot.phases,
        vec![
            "PointerDown",
            "CaptureAcquired",
            "PointerMove",
            "AnimationFrame",
            "PointerUp",
        ]
    );
    assert_eq!(snapshot.outcomes[2], "MoveQueued");
    assert_eq!(snapshot.outcomes[4], "GestureApplied");
}
