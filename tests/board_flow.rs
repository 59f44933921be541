use chrono::{NaiveDate, TimeZone, Utc};

use civicsync_triage::models::{Location, Report, ReportStatus, StatusCounts, UNASSIGNED};
use civicsync_triage::services::analytics_service::aggregate;
use civicsync_triage::services::board_service::{partition, Board, MoveOutcome};

fn report(id: &str, department: Option<&str>) -> Report {
    Report {
        id: id.to_string(),
        category: "Roads".to_string(),
        address: "12 MG Road".to_string(),
        location: None,
        status: ReportStatus::Pending,
        severity: None,
        assigned_department: department.map(|d| d.to_string()),
        created_at: Some(Utc.with_ymd_and_hms(2026, 8, 1, 9, 0, 0).unwrap()),
        priority: None,
    }
}

fn departments() -> Vec<String> {
    vec![UNASSIGNED.to_string(), "Public Works".to_string()]
}

#[test]
fn drag_move_then_failed_persist_round_trips_to_server_state() {
    let server_state = vec![
        report("report1", Some("Public Works")),
        report("report2", Some("Public Works")),
        report("report3", None),
    ];

    // Initial partition: order preserved, null assignment lands in the
    // sentinel column.
    let mut board = Board::default();
    board.replace(&server_state, &departments());
    let initial = board.columns().to_vec();
    assert_eq!(initial[0].department, UNASSIGNED);
    assert_eq!(
        initial[0]
            .reports
            .iter()
            .map(|r| r.id.as_str())
            .collect::<Vec<_>>(),
        vec!["report3"]
    );
    assert_eq!(
        initial[1]
            .reports
            .iter()
            .map(|r| r.id.as_str())
            .collect::<Vec<_>>(),
        vec!["report1", "report2"]
    );

    // Drop report3 onto a card in the Public Works column.
    let target = board
        .resolve_drop_target("report2", &departments())
        .unwrap();
    assert_eq!(target, "Public Works");
    let from = board.column_of("report3").unwrap().to_string();
    let ticket = board.move_report("report3", &from, &target).unwrap().unwrap();

    let columns = board.columns();
    assert!(columns[0].reports.is_empty());
    assert_eq!(
        columns[1]
            .reports
            .iter()
            .map(|r| r.id.as_str())
            .collect::<Vec<_>>(),
        vec!["report1", "report2", "report3"]
    );
    assert_eq!(
        columns[1].reports[2].assigned_department.as_deref(),
        Some("Public Works")
    );

    // Persist fails: refetch returns the unchanged server state and the
    // partition reproduces the original layout exactly.
    assert_eq!(board.complete_move(&ticket, false), MoveOutcome::NeedsResync);
    board.replace(&server_state, &departments());
    assert_eq!(board.columns(), &initial[..]);
    assert_eq!(
        board.columns(),
        &partition(&server_state, &departments())[..]
    );
}

#[test]
fn rapid_successive_moves_keep_only_the_latest_result() {
    let mut board = Board::default();
    board.replace(&[report("report1", None)], &departments());

    let first = board
        .move_report("report1", UNASSIGNED, "Public Works")
        .unwrap()
        .unwrap();
    let second = board
        .move_report("report1", "Public Works", UNASSIGNED)
        .unwrap()
        .unwrap();

    // The first persist call lands late; its success must not override the
    // later local move.
    assert_eq!(board.complete_move(&first, true), MoveOutcome::Superseded);
    assert_eq!(board.column_of("report1"), Some(UNASSIGNED));
    assert_eq!(board.complete_move(&second, true), MoveOutcome::Applied);
}

#[test]
fn analytics_of_empty_list_is_well_defined() {
    let today = NaiveDate::from_ymd_opt(2026, 8, 6).unwrap();
    let snapshot = aggregate(&[], today);

    assert_eq!(snapshot.total_reports, 0);
    assert!(snapshot.category_distribution.is_empty());
    assert!(snapshot.monthly_trend.is_empty());
    assert_eq!(snapshot.weekly_trend.len(), 7);
    assert!(snapshot.weekly_trend.iter().all(|d| d.count == 0));
    assert_eq!(snapshot.status_distribution, StatusCounts::default());
    assert!(snapshot.severity_histogram.is_empty());
    assert!(snapshot.hotspots.is_empty());
    assert_eq!(snapshot.resolution_rate, 0);
    assert_eq!(snapshot.average_per_day, 0);
}

#[test]
fn analytics_matches_dashboard_figures() {
    let today = NaiveDate::from_ymd_opt(2026, 8, 6).unwrap();
    let mut reports: Vec<Report> = (0..10)
        .map(|i| report(&format!("r{i}"), None))
        .collect();
    for r in reports.iter_mut().take(4) {
        r.status = ReportStatus::Resolved;
    }

    let snapshot = aggregate(&reports, today);
    assert_eq!(snapshot.category_distribution.len(), 1);
    assert_eq!(snapshot.category_distribution[0].name, "Roads");
    assert_eq!(snapshot.category_distribution[0].value, 10);
    assert_eq!(snapshot.category_distribution[0].percentage, 100);
    assert_eq!(snapshot.resolution_rate, 40);
}

#[test]
fn nearby_reports_fold_into_one_hotspot() {
    let today = NaiveDate::from_ymd_opt(2026, 8, 6).unwrap();
    let mut a = report("r1", None);
    a.location = Some(Location {
        coordinates: vec![77.5946001, 12.9716001],
    });
    let mut b = report("r2", None);
    b.location = Some(Location {
        coordinates: vec![77.5946999, 12.9716999],
    });

    let snapshot = aggregate(&[a, b], today);
    assert_eq!(snapshot.hotspots.len(), 1);
    assert_eq!(snapshot.hotspots[0].count, 2);
}
