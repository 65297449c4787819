//! `PUT /emails/{id}` handler.
//!
//! Accepts a partial body `{"read"?: bool, "archived"?: bool}` and
//! answers 204 with no body.

use crate::fake_backend::io::Reply;
use crate::fake_backend::store::Store;
use serde_json::Value;
use std::sync::Mutex;

pub fn handle_update_email(id: u64, body: &str, store: &Mutex<Store>) -> Reply {
    let mut store = store.lock().unwrap();
    if store.fail_updates {
        return Reply::plain_failure(500);
    }

    let Ok(update) = serde_json::from_str::<Value>(body) else {
        return Reply::error(400, "Invalid JSON.");
    };
    let Some(email) = store.get_mut(id) else {
        return Reply::error(404, "Email not found.");
    };

    if let Some(read) = update.get("read").and_then(Value::as_bool) {
        email.read = read;
    }
    if let Some(archived) = update.get("archived").and_then(Value::as_bool) {
        email.archived = archived;
    }
    drop(store);

    Reply::no_content()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fake_backend::store::{StoreBuilder, TestEmail};

    fn store() -> Mutex<Store> {
        Mutex::new(
            StoreBuilder::new("me@example.com")
                .email(TestEmail::new(1, "a@example.com", &["me@example.com"], "Hi"))
                .build(),
        )
    }

    #[test]
    fn updates_only_given_flags() {
        let store = store();
        let reply = handle_update_email(1, r#"{"archived": true}"#, &store);
        assert_eq!(reply.status, 204);

        let guard = store.lock().unwrap();
        let email = guard.get(1).unwrap();
        assert!(email.archived);
        assert!(!email.read);
    }

    #[test]
    fn missing_email() {
        let reply = handle_update_email(9, r#"{"read": true}"#, &store());
        assert_eq!(reply.status, 404);
    }

    #[test]
    fn forced_failure_leaves_state_alone() {
        let mut inner = store().into_inner().unwrap();
        inner.fail_updates = true;
        let store = Mutex::new(inner);

        let reply = handle_update_email(1, r#"{"read": true}"#, &store);
        assert_eq!(reply.status, 500);
        assert!(reply.body.is_none());
        assert!(!store.lock().unwrap().get(1).unwrap().read);
    }
}
