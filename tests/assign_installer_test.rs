// ==========================================
// Installer assignment rules
// ==========================================


use install_orders::{AssignInstallerCmd, EngineError, InstallationStatus, Role};
use test_helpers::*;
use uuid::Uuid;

#[test]
fn capability_gate_rejects_installer_without_exact_door_label() {
    let ctx = setup();
    let company = seed_company(&ctx, "MontEx");
    let order = seed_order(&ctx, &company, "Montaż drzwi wejściowych");
    // Similar but not the exact label.
    let installer = seed_person(
        &ctx,
        "Adam",
        Role::Installer,
        Some(company.company_id),
        &["Montaż drzwi przesuwnych"],
    );

    let result = ctx.engine.assign_installer(AssignInstallerCmd {
        order_id: order.order_id,
        installer_id: installer.person_id,
        installation_date: d(2024, 1, 10),
        installation_status: None,
    });

    assert!(matches!(result, Err(EngineError::BusinessRuleViolation(_))));
}

#[test]
fn qualified_installer_is_assigned_and_status_forced_to_scheduled() {
    let ctx = setup();
    let company = seed_company(&ctx, "MontEx");
    let order = seed_order(&ctx, &company, "Montaż drzwi");
    let installer = seed_person(
        &ctx,
        "Adam",
        Role::Installer,
        Some(company.company_id),
        &["Montaż drzwi"],
    );

    let updated = ctx
        .engine
        .assign_installer(AssignInstallerCmd {
            order_id: order.order_id,
            installer_id: installer.person_id,
            installation_date: d(2024, 1, 10),
            installation_status: None,
        })
        .expect("assignment should succeed");

    assert_eq!(updated.installer_id, Some(installer.person_id));
    assert_eq!(updated.installer_name.as_deref(), Some("Adam"));
    assert_eq!(updated.installation_date, Some(d(2024, 1, 10)));
    assert_eq!(updated.installation_status, InstallationStatus::Scheduled);
    // Denormalized snapshot made it to storage too.
    let stored = ctx
        .repos
        .orders
        .find_by_id(order.order_id)
        .unwrap()
        .unwrap();
    assert_eq!(stored.installer_name.as_deref(), Some("Adam"));
}

#[test]
fn installer_from_another_company_is_rejected() {
    let ctx = setup();
    let company = seed_company(&ctx, "MontEx");
    let other = seed_company(&ctx, "DrzwiPol");
    let order = seed_order(&ctx, &company, "Montaż drzwi");
    let installer = seed_person(
        &ctx,
        "Obcy",
        Role::Installer,
        Some(other.company_id),
        &["Montaż drzwi"],
    );

    let result = ctx.engine.assign_installer(AssignInstallerCmd {
        order_id: order.order_id,
        installer_id: installer.person_id,
        installation_date: d(2024, 1, 10),
        installation_status: None,
    });

    assert!(matches!(result, Err(EngineError::BusinessRuleViolation(_))));
}

#[test]
fn non_installer_role_is_rejected() {
    let ctx = setup();
    let company = seed_company(&ctx, "MontEx");
    let order = seed_order(&ctx, &company, "Montaż drzwi");
    let worker = seed_person(
        &ctx,
        "Biurowy",
        Role::Worker,
        Some(company.company_id),
        &["Montaż drzwi"],
    );

    let result = ctx.engine.assign_installer(AssignInstallerCmd {
        order_id: order.order_id,
        installer_id: worker.person_id,
        installation_date: d(2024, 1, 10),
        installation_status: None,
    });

    assert!(matches!(result, Err(EngineError::BusinessRuleViolation(_))));
}

#[test]
fn unrecognized_service_type_skips_capability_check() {
    let ctx = setup();
    let company = seed_company(&ctx, "MontEx");
    let order = seed_order(&ctx, &company, "Serwis okien");
    let installer = seed_person(&ctx, "Adam", Role::Installer, Some(company.company_id), &[]);

    let updated = ctx
        .engine
        .assign_installer(AssignInstallerCmd {
            order_id: order.order_id,
            installer_id: installer.person_id,
            installation_date: d(2024, 1, 10),
            installation_status: None,
        })
        .expect("permissive path for unknown service types");

    assert_eq!(updated.installer_id, Some(installer.person_id));
}

#[test]
fn missing_order_and_missing_installer_are_not_found() {
    let ctx = setup();
    let company = seed_company(&ctx, "MontEx");
    let order = seed_order(&ctx, &company, "Montaż drzwi");

    let missing_order = ctx.engine.assign_installer(AssignInstallerCmd {
        order_id: Uuid::new_v4(),
        installer_id: Uuid::new_v4(),
        installation_date: d(2024, 1, 10),
        installation_status: None,
    });
    assert!(matches!(missing_order, Err(EngineError::NotFound { .. })));

    let missing_installer = ctx.engine.assign_installer(AssignInstallerCmd {
        order_id: order.order_id,
        installer_id: Uuid::new_v4(),
        installation_date: d(2024, 1, 10),
        installation_status: None,
    });
    assert!(matches!(
        missing_installer,
        Err(EngineError::NotFound { .. })
    ));
}

#[test]
fn explicit_target_status_overrides_the_scheduled_default() {
    let ctx = setup();
    let company = seed_company(&ctx, "MontEx");
    let order = seed_order(&ctx, &company, "Montaż drzwi");
    let installer = seed_person(
        &ctx,
        "Adam",
        Role::Installer,
        Some(company.company_id),
        &["Montaż drzwi"],
    );

    let updated = ctx
        .engine
        .assign_installer(AssignInstallerCmd {
            order_id: order.order_id,
            installer_id: installer.person_id,
            installation_date: d(2024, 1, 10),
            installation_status: Some("w realizacji".to_string()),
        })
        .unwrap();

    assert_eq!(updated.installation_status, InstallationStatus::InProgress);
}
