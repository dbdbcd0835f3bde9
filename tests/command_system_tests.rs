mod common;

use common::{fixture, StubBackend};
use msg_cache::{create_default_registry, CommandHandler, KeyValueStore};
use serde_json::json;

fn handler(backend: StubBackend) -> (CommandHandler, common::Fixture) {
    let f = fixture(backend);
    (CommandHandler::new(f.service.clone()), f)
}

fn online() -> StubBackend {
    StubBackend::offline()
        .with_tables(json!({
            "user_error": { "EA006": "Invalid pincode", "EF003": "Passwords do not match" },
            "user_validation": { "VA002": "Required", "VA005": "Invalid email" },
            "user_information": { "IA001": "Profile saved" }
        }))
        .with_code(msg_cache::Category::Error, "EP016", "Username already exists.")
}

#[test]
fn default_registry_has_every_command() {
    let registry = create_default_registry();
    for name in [
        "resolve", "tables", "validate", "refresh", "logout", "cache", "version", "help", "exit",
    ] {
        assert!(registry.find_command(name).is_some(), "missing {}", name);
    }
    assert!(registry.find_command("q").is_some());
    assert!(registry.find_command("nope").is_none());
}

#[tokio::test]
async fn version_and_unknown() {
    let (handler, _) = handler(StubBackend::offline());

    let result = handler.handle_input("version").await;
    assert!(result.success);
    assert!(result.message.contains(env!("CARGO_PKG_VERSION")));

    let result = handler.handle_input("totally_unknown_command_xyz").await;
    assert!(!result.success);
    assert!(result.message.contains("Unknown command"));

    let result = handler.handle_input("   ").await;
    assert!(!result.success);
    assert!(result.message.is_empty());
}

#[tokio::test]
async fn exit_sets_flag() {
    let (handler, _) = handler(StubBackend::offline());

    let result = handler.handle_input("exit").await;
    assert!(result.success);
    assert!(result.should_exit);
    assert!(!result.message.starts_with("__"));
}

#[tokio::test]
async fn help_lists_commands() {
    let (handler, _) = handler(StubBackend::offline());

    let result = handler.handle_input("help").await;
    assert!(result.success);
    assert!(result.message.contains("resolve <CODE>"));
    assert!(result.message.contains("validate"));

    let result = handler.handle_input("help cache").await;
    assert!(result.message.starts_with("cache"));
}

#[tokio::test]
async fn resolve_command_uses_tables_and_fallback() {
    let (handler, f) = handler(online());

    let result = handler.handle_input("resolve ea006").await;
    assert!(result.success);
    assert_eq!(result.message, "error EA006: Invalid pincode");

    let result = handler.handle_input("resolve EP016").await;
    assert_eq!(result.message, "error EP016: Username already exists.");
    assert_eq!(f.backend.code_calls(), 1);

    // Tables are loaded once per handler.
    handler.handle_input("resolve VA002").await;
    assert_eq!(f.backend.table_calls(), 1);
}

#[tokio::test]
async fn resolve_command_reports_missing_codes() {
    let (handler, _) = handler(StubBackend::offline());

    let result = handler.handle_input("resolve XY001 information").await;
    assert!(result.success);
    assert_eq!(result.message, "information XY001: [MISSING: XY001]");

    let result = handler.handle_input("resolve XY001").await;
    assert!(!result.success);

    let result = handler.handle_input("resolve").await;
    assert!(!result.success);
}

#[tokio::test]
async fn tables_command_summarizes_and_lists() {
    let (handler, _) = handler(online());

    let result = handler.handle_input("tables").await;
    assert!(result.success);
    assert!(result.message.contains("5 codes"));

    let result = handler.handle_input("tables validation").await;
    assert!(result.message.contains("VA005"));
    assert!(result.message.contains("Invalid email"));

    let result = handler.handle_input("tables warnings").await;
    assert!(!result.success);
}

#[tokio::test]
async fn validate_command_resolves_messages() {
    let (handler, _) = handler(online());

    let result = handler
        .handle_input("validate email=anna@example.com postal_code=411001")
        .await;
    assert!(result.success, "{}", result.message);

    let result = handler
        .handle_input("validate email=nope first_name= password=secret1 confirm_password=secret2")
        .await;
    assert!(!result.success);
    assert!(result.message.contains("email: Invalid email"));
    assert!(result.message.contains("first_name: Required"));
    assert!(result.message.contains("confirm_password: Passwords do not match"));

    let result = handler.handle_input("validate shoe_size=42").await;
    assert!(!result.success);
}

#[tokio::test]
async fn cache_command_inspects_and_clears() {
    let (handler, f) = handler(online());
    handler.handle_input("tables").await;

    let result = handler.handle_input("cache").await;
    assert!(result.message.contains("user_error"));

    let result = handler.handle_input("cache get user_information").await;
    assert!(result.message.contains("IA001"));

    let result = handler.handle_input("cache clear").await;
    assert!(result.success);
    assert!(f.store.keys().unwrap().is_empty());

    let result = handler.handle_input("cache explode").await;
    assert!(!result.success);
}

#[tokio::test]
async fn logout_command_clears_credentials() {
    let (handler, f) = handler(online());
    f.store.set("access", "token").unwrap();

    let result = handler.handle_input("logout").await;

    assert!(result.success);
    assert!(result.message.contains("refreshed"));
    assert!(f.store.get("access").unwrap().is_none());
}

#[tokio::test]
async fn refresh_command_reports_failure() {
    let (handler, _) = handler(StubBackend::offline());

    let result = handler.handle_input("refresh").await;
    assert!(!result.success);
    assert!(result.message.contains("Refresh failed"));
}

#[tokio::test]
async fn overlapping_commands_share_one_table_load() {
    let (handler, f) = handler(online().yielding());

    let (a, b) = tokio::join!(
        handler.handle_input("tables"),
        handler.handle_input("resolve EA006")
    );

    assert!(a.success && b.success);
    assert_eq!(b.message, "error EA006: Invalid pincode");
    assert_eq!(f.backend.table_calls(), 1);
}
