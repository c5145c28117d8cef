use parlance_translation::{ArrayLoader, Lines, MessageValue, Replacements, Translator};
use std::panic::{self, AssertUnwindSafe};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

fn translator() -> Arc<Translator> {
    let loader = ArrayLoader::new();
    loader.add_messages(
        "en",
        "auth",
        Lines::from([("failed".to_string(), MessageValue::from("Nope"))]),
        None,
    );
    let translator = Translator::new(Arc::new(loader), "en").unwrap();
    translator.set_fallback("en");
    Arc::new(translator)
}

#[test]
fn test_hook_receives_lookup_context() {
    let t = translator();
    let seen = Arc::new(Mutex::new(Vec::new()));

    let log = Arc::clone(&seen);
    t.handle_missing_keys_using(move |key, replace, locale, fallback| {
        log.lock().unwrap().push((key.to_string(), replace.len(), locale.to_string(), fallback));
        None
    });

    let replace = Replacements::new().with("user", "ada");
    let line = t.get("auth.unknown :user", &replace, Some("fr"), false).unwrap();

    assert_eq!(line.to_string(), "auth.unknown ada");
    assert_eq!(
        *seen.lock().unwrap(),
        vec![("auth.unknown :user".to_string(), 1, "fr".to_string(), false)]
    );
}

#[test]
fn test_hook_result_replaces_key() {
    let t = translator();
    t.handle_missing_keys_using(|key, _, _, _| Some(format!("[missing] {}", key)));

    assert_eq!(t.get("auth.nope", &Replacements::new(), None, true).unwrap().to_string(), "[missing] auth.nope");
    assert_eq!(t.get("auth.failed", &Replacements::new(), None, true).unwrap().to_string(), "Nope");

    t.forget_missing_key_handler();
    assert_eq!(t.get("auth.nope", &Replacements::new(), None, true).unwrap().to_string(), "auth.nope");
}

#[test]
fn test_hook_never_recurses() {
    let t = translator();
    let calls = Arc::new(AtomicUsize::new(0));

    let weak = Arc::downgrade(&t);
    let counter = Arc::clone(&calls);
    t.handle_missing_keys_using(move |key, _, _, _| {
        counter.fetch_add(1, Ordering::SeqCst);
        let t = weak.upgrade()?;
        // Another miss from inside the hook
        let inner = t.get("other.missing", &Replacements::new(), None, true).ok()?;
        Some(format!("{} / {}", key, inner))
    });

    let line = t.get("auth.absent", &Replacements::new(), None, true).unwrap();
    assert_eq!(line.to_string(), "auth.absent / other.missing");
    assert_eq!(calls.load(Ordering::SeqCst), 1);

    // The guard is released afterwards
    t.get("auth.gone", &Replacements::new(), None, true).unwrap();
    assert_eq!(calls.load(Ordering::SeqCst), 2);
}

#[test]
fn test_has_does_not_trigger_hook() {
    let t = translator();
    let calls = Arc::new(AtomicUsize::new(0));

    let counter = Arc::clone(&calls);
    t.handle_missing_keys_using(move |_, _, _, _| {
        counter.fetch_add(1, Ordering::SeqCst);
        Some("replacement".to_string())
    });

    assert!(!t.has("auth.absent", None, true).unwrap());
    assert!(t.has("auth.failed", None, true).unwrap());
    assert_eq!(calls.load(Ordering::SeqCst), 0);
}

#[test]
fn test_guard_is_restored_after_panicking_hook() {
    let t = translator();
    let calls = Arc::new(AtomicUsize::new(0));

    let counter = Arc::clone(&calls);
    t.handle_missing_keys_using(move |_, _, _, _| {
        if counter.fetch_add(1, Ordering::SeqCst) == 0 {
            panic!("hook failure");
        }
        None
    });

    let result = panic::catch_unwind(AssertUnwindSafe(|| {
        let _ = t.get("auth.absent", &Replacements::new(), None, true);
    }));
    assert!(result.is_err());

    t.get("auth.absent", &Replacements::new(), None, true).unwrap();
    assert_eq!(calls.load(Ordering::SeqCst), 2);
}
