// ==========================================
// Company assignment and one-person-company auto-assignment
// ==========================================


use install_orders::{
    AssignCompanyCmd, EngineError, InstallationStatus, OperatorKind, Role, TransportStatus,
};
use test_helpers::*;
use uuid::Uuid;

#[test]
fn sole_operator_with_both_capabilities_takes_both_roles() {
    let ctx = setup();
    let company = seed_company(&ctx, "JednoosobowaCo");
    let operator = seed_person(
        &ctx,
        "Piotr",
        Role::Installer,
        Some(company.company_id),
        &["Montaż drzwi", "Transport"],
    );
    let order = seed_transport_order(&ctx, &company, "Montaż drzwi", None);

    let updated = ctx
        .engine
        .assign_company(AssignCompanyCmd {
            order_id: order.order_id,
            company_id: company.company_id,
        })
        .expect("assignment should succeed");

    assert_eq!(updated.company_id, company.company_id);
    assert_eq!(updated.installer_id, Some(operator.person_id));
    assert_eq!(updated.transporter_id, Some(operator.person_id));
    assert_eq!(updated.installation_status, InstallationStatus::Scheduled);
    // Installation defaulted to today + 2, transport one day before
    // (door family), both without further caller input.
    assert_eq!(updated.installation_date, Some(d(2024, 1, 4)));
    assert_eq!(updated.transport_date, Some(d(2024, 1, 3)));
    assert_eq!(updated.transport_status, Some(TransportStatus::Scheduled));
}

#[test]
fn tagged_sole_operator_resolves_without_scanning() {
    let ctx = setup();
    let operator_id = {
        // Tag points at the person seeded below.
        let company = seed_company_kind(
            &ctx,
            "Tagged",
            OperatorKind::Standard, // replaced after seeding the person
        );
        let operator = seed_person(
            &ctx,
            "Piotr",
            Role::Installer,
            Some(company.company_id),
            &["Montaż podłogi"],
        );
        // Second installer would defeat the scan fallback; the tag
        // must still win.
        seed_person(
            &ctx,
            "Drugi",
            Role::Installer,
            Some(company.company_id),
            &["Montaż drzwi"],
        );
        ctx.repos
            .companies
            .set_operator_kind(
                company.company_id,
                &OperatorKind::SoleOperator(operator.person_id),
            )
            .unwrap();

        let order = seed_order(&ctx, &company, "Montaż podłogi");
        let updated = ctx
            .engine
            .assign_company(AssignCompanyCmd {
                order_id: order.order_id,
                company_id: company.company_id,
            })
            .unwrap();
        assert_eq!(updated.installer_id, Some(operator.person_id));
        operator.person_id
    };
    assert_ne!(operator_id, Uuid::nil());
}

#[test]
fn transport_only_sole_operator_is_not_made_installer() {
    let ctx = setup();
    let company = seed_company(&ctx, "TransportCo");
    let driver = seed_person(
        &ctx,
        "Kierowca",
        Role::Installer,
        Some(company.company_id),
        &["Transport"],
    );
    let order = seed_transport_order(&ctx, &company, "Montaż drzwi", Some(d(2024, 1, 10)));

    let updated = ctx
        .engine
        .assign_company(AssignCompanyCmd {
            order_id: order.order_id,
            company_id: company.company_id,
        })
        .unwrap();

    // Best effort: transporter slot filled, installer slot left open.
    assert_eq!(updated.installer_id, None);
    assert_eq!(updated.transporter_id, Some(driver.person_id));
    assert_eq!(updated.transport_date, Some(d(2024, 1, 9)));
}

#[test]
fn multi_installer_company_falls_back_to_first_member() {
    let ctx = setup();
    let company = seed_company(&ctx, "DużaFirma");
    let first = seed_person(
        &ctx,
        "Pierwszy",
        Role::Installer,
        Some(company.company_id),
        // Deliberately unrelated capability: fallback skips the check.
        &["Montaż podłogi"],
    );
    seed_person(
        &ctx,
        "Drugi",
        Role::Installer,
        Some(company.company_id),
        &["Montaż drzwi"],
    );
    let order = seed_order(&ctx, &company, "Montaż drzwi");

    let updated = ctx
        .engine
        .assign_company(AssignCompanyCmd {
            order_id: order.order_id,
            company_id: company.company_id,
        })
        .unwrap();

    assert_eq!(updated.installer_id, Some(first.person_id));
    // Fallback is assignment only: no status or date side effects.
    assert_eq!(updated.installation_status, InstallationStatus::New);
    assert_eq!(updated.installation_date, None);
}

#[test]
fn fallback_does_not_replace_an_existing_installer() {
    let ctx = setup();
    let company = seed_company(&ctx, "DużaFirma");
    seed_person(
        &ctx,
        "Pierwszy",
        Role::Installer,
        Some(company.company_id),
        &["Montaż drzwi"],
    );
    seed_person(
        &ctx,
        "Drugi",
        Role::Installer,
        Some(company.company_id),
        &["Montaż drzwi"],
    );
    let existing = seed_person(
        &ctx,
        "Już przypisany",
        Role::Installer,
        Some(company.company_id),
        &["Montaż drzwi"],
    );
    let mut order = seed_order(&ctx, &company, "Montaż drzwi");
    order.installer_id = Some(existing.person_id);
    order.installer_name = Some(existing.name.clone());
    order.revision = ctx.repos.orders.update(&order).unwrap();

    let updated = ctx
        .engine
        .assign_company(AssignCompanyCmd {
            order_id: order.order_id,
            company_id: company.company_id,
        })
        .unwrap();

    assert_eq!(updated.installer_id, Some(existing.person_id));
}

#[test]
fn company_without_members_assigns_company_only() {
    let ctx = setup();
    let company = seed_company(&ctx, "PustaFirma");
    let order = seed_order(&ctx, &company, "Montaż drzwi");

    let updated = ctx
        .engine
        .assign_company(AssignCompanyCmd {
            order_id: order.order_id,
            company_id: company.company_id,
        })
        .unwrap();

    assert_eq!(updated.company_name, "PustaFirma");
    assert_eq!(updated.installer_id, None);
    assert_eq!(updated.transporter_id, None);
}

#[test]
fn missing_company_is_not_found() {
    let ctx = setup();
    let company = seed_company(&ctx, "MontEx");
    let order = seed_order(&ctx, &company, "Montaż drzwi");

    let result = ctx.engine.assign_company(AssignCompanyCmd {
        order_id: order.order_id,
        company_id: Uuid::new_v4(),
    });
    assert!(matches!(result, Err(EngineError::NotFound { .. })));
}
