use mechtrack_lib::engine::config::Config;
use mechtrack_lib::engine::guard::{GuardOutcome, RouteRule, RouteTable};
use mechtrack_lib::engine::rbac::{
    can_write, has_access, has_access_raw, is_read_only, resolve_equivalent, AccessPolicy,
    Equivalent, Position, Role, Subject,
};

fn users(position: Position) -> Subject {
    Subject::new(Role::Users, position)
}

#[test]
fn test_unmapped_positions_are_identity() {
    for position in [Position::Mekanik, Position::GroupLeaderMekanik, Position::Planner] {
        assert_eq!(resolve_equivalent(position), Equivalent::Position(position));
    }
    assert_eq!(resolve_equivalent(Position::Tyreman), Equivalent::Position(Position::Mekanik));
    assert_eq!(resolve_equivalent(Position::DeptHead), Equivalent::Role(Role::Superadmin));
}

#[test]
fn test_unrestricted_admits_any_strings() {
    for (role, posisi) in [("", ""), ("USERS", "MEKANIK"), ("nobody", "JANITOR"), ("ADMIN", "")] {
        assert!(has_access_raw(role, posisi, None, None), "{role}/{posisi}");
    }
}

#[test]
fn test_reference_decisions() {
    assert!(has_access_raw("USERS", "ELECTRICIAN", None, Some(&["MEKANIK"])));
    assert!(has_access_raw("USERS", "SUPERVISOR", None, Some(&["PLANNER"])));
    assert!(has_access_raw("USERS", "MANAGEMENT", Some(&["SUPERADMIN"]), None));
    assert!(!has_access_raw("USERS", "MEKANIK", Some(&["ADMIN", "SUPERADMIN"]), Some(&["PLANNER"])));
}

#[test]
fn test_equivalents_cross_allow_list_axes() {
    assert!(has_access_raw("USERS", "MANAGEMENT", None, Some(&["SUPERADMIN"])));
    assert!(has_access_raw("USERS", "SUPERVISOR", Some(&["PLANNER"]), None));
    assert!(!has_access_raw("USERS", "MEKANIK", Some(&["PLANNER"]), Some(&["SUPERADMIN"])));
}

#[test]
fn test_typed_and_raw_entry_points_agree() {
    let policies = [
        AccessPolicy::default().with_roles([Role::Superadmin]),
        AccessPolicy::default().with_positions([Position::Mekanik, Position::Planner]),
        AccessPolicy::default()
            .with_roles([Role::Admin])
            .with_positions([Position::GroupLeaderMekanik]),
    ];

    for policy in &policies {
        let roles: Vec<String> = policy.allowed_roles.iter().flatten().map(|t| t.to_string()).collect();
        let positions: Vec<String> = policy.allowed_positions.iter().flatten().map(|t| t.to_string()).collect();
        let roles: Vec<&str> = roles.iter().map(String::as_str).collect();
        let positions: Vec<&str> = positions.iter().map(String::as_str).collect();
        let roles = policy.allowed_roles.as_ref().map(|_| roles.as_slice());
        let positions = policy.allowed_positions.as_ref().map(|_| positions.as_slice());

        for role in Role::ALL {
            for position in Position::ALL {
                assert_eq!(
                    has_access(&Subject::new(role, position), policy),
                    has_access_raw(role.as_str(), position.as_str(), roles, positions),
                    "{role}/{position} against {policy:?}"
                );
            }
        }
    }
}

#[test]
fn test_read_only_designation() {
    assert!(is_read_only(&users(Position::DeptHead)));
    assert!(!is_read_only(&Subject::new(Role::Admin, Position::DeptHead)));
    assert!(!is_read_only(&users(Position::Planner)));

    for role in Role::ALL {
        for position in Position::ALL {
            let subject = Subject::new(role, position);
            assert_eq!(can_write(&subject), !is_read_only(&subject));
        }
    }
}

#[test]
fn test_decisions_are_idempotent() {
    let policy = AccessPolicy::default()
        .with_roles([Role::Superadmin])
        .with_positions([Position::Mekanik]);

    for position in Position::ALL {
        let subject = users(position);
        let first = has_access(&subject, &policy);
        assert_eq!(first, has_access(&subject, &policy));
    }
}

#[test]
fn test_project_guard_from_disk() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempfile::tempdir()?;

    let mut config = Config::default_for_project("workshop");
    config.guard.landing_page = Some("/home".to_string());
    config.save(dir.path())?;

    let mut table = RouteTable::default();
    table.routes.push(
        RouteRule::new(
            "/tyres/*",
            AccessPolicy::default().with_positions([Position::GroupLeaderMekanik]),
        )
        .writing(),
    );
    table.save(&config.routes_path(dir.path()))?;

    let guard = mechtrack_lib::load_guard(dir.path())?;
    assert_eq!(guard.table().landing_page, "/home");

    assert_eq!(guard.check("/tyres/rotation", &users(Position::GroupLeaderTyre)), GuardOutcome::Admit);
    assert_eq!(
        guard.check("/tyres/rotation", &users(Position::Tyreman)),
        GuardOutcome::Redirect { to: "/home".to_string() }
    );
    assert_eq!(guard.check("/activities/new", &users(Position::Tyreman)), GuardOutcome::Admit);

    Ok(())
}

#[test]
fn test_project_without_files_uses_defaults() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempfile::tempdir()?;
    let guard = mechtrack_lib::load_guard(dir.path())?;

    assert_eq!(guard.table(), &RouteTable::default_table());
    assert_eq!(
        guard.check("/users/1", &users(Position::Management)),
        GuardOutcome::Redirect { to: "/dashboard".to_string() }
    );
    Ok(())
}
