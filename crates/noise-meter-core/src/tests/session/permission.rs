use crate::{MeterError, Permission, PermissionGate, tests::session::fake::FakeAccess};

use std::panic::Location;

use error_location::ErrorLocation;

/// WHAT: Explicit grant opens the gate
/// WHY: Only a grant may allow recording
#[test]
fn given_host_grants_when_initializing_then_permission_granted() {
    // Given: A host that grants access
    let access = FakeAccess::new(|| Ok(true));
    let mut gate = PermissionGate::new();

    // When: Initializing the gate
    let permission = gate.initialize(&access);

    // Then: Permission is granted
    assert_eq!(permission, Permission::Granted);
    assert!(gate.is_granted());
}

/// WHAT: Denial keeps the gate closed
/// WHY: Recording must be refused without explicit consent
#[test]
fn given_host_denies_when_initializing_then_permission_denied() {
    let access = FakeAccess::new(|| Ok(false));
    let mut gate = PermissionGate::new();

    assert_eq!(gate.initialize(&access), Permission::Denied);
    assert!(!gate.is_granted());
}

/// WHAT: Request failure leaves permission unknown
/// WHY: Errors are logged, never treated as a grant
#[test]
fn given_request_fails_when_initializing_then_permission_unknown() {
    // Given: A host whose request errors
    let access = FakeAccess::new(|| {
        Err(MeterError::PermissionError {
            reason: "host unavailable".to_string(),
            location: ErrorLocation::from(Location::caller()),
        })
    });
    let mut gate = PermissionGate::new();

    // When: Initializing the gate
    let permission = gate.initialize(&access);

    // Then: Permission stays unknown and falsy
    assert_eq!(permission, Permission::Unknown);
    assert!(!gate.is_granted());
}

/// WHAT: The host is asked exactly once
/// WHY: Authorization is requested once at startup
#[test]
fn given_initialized_gate_when_initializing_again_then_host_not_asked() {
    // Given: A gate initialized against a denying host
    let denying = FakeAccess::new(|| Ok(false));
    let mut gate = PermissionGate::new();
    gate.initialize(&denying);

    // When: Initializing again against a granting host
    let granting = FakeAccess::new(|| Ok(true));
    let permission = gate.initialize(&granting);

    // Then: Second host never asked, first answer kept
    assert_eq!(permission, Permission::Denied);
    assert_eq!(denying.calls.get(), 1);
    assert_eq!(granting.calls.get(), 0);
}
