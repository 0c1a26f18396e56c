use std::sync::Mutex;

use super::*;
use crate::projection::MemoryProjection;

fn bus(dark: bool) -> (ThemeBus, Arc<MemoryProjection>) {
    let projection = Arc::new(MemoryProjection::new(dark));
    (ThemeBus::new(projection.clone()), projection)
}

type BoxedHandler = Box<dyn Fn(&ThemeChange) -> Result<(), HandlerError> + Send + Sync>;

fn recorder() -> (Arc<Mutex<Vec<String>>>, impl Fn(&str) -> BoxedHandler) {
    let log = Arc::new(Mutex::new(Vec::new()));
    let sink = log.clone();
    let make = move |name: &str| -> BoxedHandler {
        let sink = sink.clone();
        let name = name.to_owned();
        Box::new(move |change: &ThemeChange| {
            sink.lock().unwrap().push(format!("{name}:{}", change.is_dark));
            Ok(())
        })
    };
    (log, make)
}

#[test]
fn handlers_run_in_registration_order() {
    let (bus, _) = bus(false);
    let (log, make) = recorder();
    bus.subscribe(make("a"));
    bus.subscribe(make("b"));
    bus.subscribe(make("c"));

    bus.publish(true);

    assert_eq!(*log.lock().unwrap(), vec!["a:true", "b:true", "c:true"]);
}

#[test]
fn publish_returns_increasing_commit_ids() {
    let (bus, _) = bus(false);
    let first = bus.publish(true);
    let second = bus.publish(false);
    assert!(second > first);
    assert_eq!(bus.latest_commit(), second);
    assert_eq!(bus.published_count(), 2);
}

#[test]
fn unsubscribe_is_idempotent() {
    let (bus, _) = bus(false);
    let (log, make) = recorder();
    let sub = bus.subscribe(make("a"));
    assert_eq!(bus.subscriber_count(), 1);

    bus.unsubscribe(&sub);
    bus.unsubscribe(&sub);
    sub.unsubscribe();
    bus.publish(true);

    assert_eq!(bus.subscriber_count(), 0);
    assert!(log.lock().unwrap().is_empty());
}

#[test]
fn failing_subscriber_does_not_block_others() {
    let (bus, _) = bus(false);
    let (log, make) = recorder();
    bus.subscribe(make("before"));
    bus.subscribe(|change: &ThemeChange| {
        if change.is_dark { Err(HandlerError::Rejected("card unmounted mid-render".to_owned())) } else { Err(HandlerError::Detached) }
    });
    bus.subscribe(make("after"));

    bus.publish(true);
    bus.publish(false);

    assert_eq!(
        *log.lock().unwrap(),
        vec!["before:true", "after:true", "before:false", "after:false"]
    );
    assert_eq!(bus.published_count(), 2);
    assert!(!bus.last_known());
}

#[test]
fn handler_error_messages() {
    assert_eq!(
        HandlerError::Rejected("bad".to_owned()).to_string(),
        "subscriber could not apply change: bad"
    );
    assert_eq!(HandlerError::Detached.to_string(), "subscriber target is no longer available");
}

#[test]
fn panicking_subscriber_does_not_block_others() {
    let (bus, _) = bus(false);
    let (log, make) = recorder();
    bus.subscribe(make("before"));
    bus.subscribe(|_change: &ThemeChange| panic!("subscriber fault"));
    bus.subscribe(make("after"));

    bus.publish(true);
    bus.publish(false);

    assert_eq!(
        *log.lock().unwrap(),
        vec!["before:true", "after:true", "before:false", "after:false"]
    );
}

#[test]
fn unsubscribe_during_delivery_drops_pending_handler() {
    let (bus, _) = bus(false);
    let (log, make) = recorder();
    let victim: Arc<Mutex<Option<Subscription>>> = Arc::new(Mutex::new(None));

    let slot = victim.clone();
    bus.subscribe(move |_change: &ThemeChange| {
        if let Some(sub) = slot.lock().unwrap().as_ref() {
            sub.unsubscribe();
        }
        Ok(())
    });
    let sub = bus.subscribe(make("victim"));
    *victim.lock().unwrap() = Some(sub);

    bus.publish(true);

    assert!(log.lock().unwrap().is_empty());
    assert_eq!(bus.subscriber_count(), 1);
}

#[test]
fn nested_publish_is_delivered_after_current_notification() {
    let (bus, _) = bus(false);
    let (log, make) = recorder();

    let nested = bus.clone();
    bus.subscribe(move |change: &ThemeChange| {
        if change.is_dark {
            nested.publish(false);
        }
        Ok(())
    });
    bus.subscribe(make("observer"));

    bus.publish(true);

    assert_eq!(*log.lock().unwrap(), vec!["observer:true", "observer:false"]);
    assert!(!bus.last_known());
}

#[test]
fn reconcile_republishes_only_on_drift() {
    let (bus, projection) = bus(false);
    let origins = Arc::new(Mutex::new(Vec::new()));
    let sink = origins.clone();
    bus.subscribe(move |change: &ThemeChange| {
        sink.lock().unwrap().push(*change);
        Ok(())
    });

    assert!(!bus.reconcile());

    projection.set_dark(true);
    assert!(bus.reconcile());
    assert!(!bus.reconcile());

    let seen = origins.lock().unwrap().clone();
    assert_eq!(seen, vec![ThemeChange { is_dark: true, origin: ChangeOrigin::Reconcile }]);
    assert_eq!(bus.latest_commit(), CommitId::default());
}

#[test]
fn change_serializes_as_event_detail() {
    let change = ThemeChange { is_dark: true, origin: ChangeOrigin::Commit };
    assert_eq!(
        serde_json::to_value(change).unwrap(),
        serde_json::json!({ "isDark": true, "origin": "commit" })
    );
}
