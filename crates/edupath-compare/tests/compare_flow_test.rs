//! End-to-end comparison flow against an embedded database: select,
//! share a link, resolve, unlock through the lead gate, and read the
//! projected table.

use edupath_compare::{
    CompareError, CompareParams, ComparisonSelection, GateState, LeadGate, RegistrationInput,
    resolve,
};
use edupath_core::models::course::{CourseLevel, CourseMode, CreateCourse};
use edupath_core::models::institute::CreateInstitute;
use edupath_core::repository::{CourseRepository, InstituteRepository};
use edupath_db::repository::{
    SurrealCourseRepository, SurrealInstituteRepository, SurrealRegistrationRepository,
};
use edupath_db::run_migrations;
use surrealdb::Surreal;
use surrealdb::engine::local::{Db, Mem};
use uuid::Uuid;

async fn setup_db() -> Surreal<Db> {
    let db = Surreal::new::<Mem>(()).await.unwrap();
    db.use_ns("edupath").use_db("catalog_test").await.unwrap();
    run_migrations(&db).await.unwrap();
    db
}

fn institute(name: &str, slug: &str) -> CreateInstitute {
    CreateInstitute {
        name: name.into(),
        slug: slug.into(),
        location: Some("Delhi NCR".into()),
        description: None,
        logo_url: None,
        website_url: None,
        established_year: Some(2003),
        rating: Some(4.3),
        approvals: vec!["UGC".into()],
    }
}

fn course(name: &str, slug: &str, institute_id: Uuid) -> CreateCourse {
    CreateCourse {
        institute_id,
        name: name.into(),
        slug: slug.into(),
        description: None,
        duration: "2 years".into(),
        level: CourseLevel::Pg,
        mode: CourseMode::Online,
        fee_min: Some(150_000),
        fee_max: Some(350_000),
        eligibility: Some("Any graduate".into()),
        specializations: vec!["Finance".into(), "Marketing".into()],
        accreditation: vec!["NAAC A+".into()],
        rating: Some(4.1),
    }
}

/// Seed three institutes all offering "MBA" plus one unrelated course.
async fn seed(db: &Surreal<Db>) {
    let institutes = SurrealInstituteRepository::new(db.clone());
    let courses = SurrealCourseRepository::new(db.clone());

    let a = institutes.create(institute("Amity University", "amity")).await.unwrap();
    let b = institutes.create(institute("NMIMS", "nmims")).await.unwrap();
    let c = institutes.create(institute("LPU", "lpu")).await.unwrap();

    courses.create(course("MBA", "mba-amity", a.id)).await.unwrap();
    courses.create(course("MBA", "mba-nmims", b.id)).await.unwrap();
    courses.create(course("MBA", "mba-lpu", c.id)).await.unwrap();
    courses.create(course("BBA", "bba-amity", a.id)).await.unwrap();
}

fn valid_registration() -> RegistrationInput {
    RegistrationInput {
        name: "Rahul Verma".into(),
        email: "rahul@example.com".into(),
        phone: "9876543210".into(),
        city: Some("Jaipur".into()),
    }
}

#[tokio::test]
async fn full_flow_from_selection_to_unlocked_table() {
    let db = setup_db().await;
    seed(&db).await;
    let courses = SurrealCourseRepository::new(db.clone());
    let registrations = SurrealRegistrationRepository::new(db.clone());

    // Build the selection the way the widget does and share the link.
    let mut selection = ComparisonSelection::new();
    selection.choose_course("MBA");
    selection.pick_institute("amity");
    selection.pick_institute("nmims");
    let link = selection.build().unwrap();

    // Resolve the link on arrival.
    let params = CompareParams::from_query(&link.to_query()).unwrap();
    let comparison = resolve(&courses, &params).await.unwrap();
    assert_eq!(comparison.rows.len(), 2);
    assert_eq!(comparison.course_name, "MBA");
    for row in &comparison.rows {
        assert_eq!(row.course.name, "MBA");
        assert!(["amity", "nmims"].contains(&row.institute.slug.as_str()));
    }

    // Table is withheld until the gate unlocks.
    let mut gate = LeadGate::new();
    assert_eq!(gate.state(), GateState::Locked);
    assert!(gate.table_for(&comparison).is_none());

    let created = gate
        .submit(&registrations, &valid_registration(), comparison.course_ids())
        .await
        .unwrap();
    assert_eq!(created.compared_courses, comparison.course_ids());

    let table = gate.table_for(&comparison).expect("unlocked table");
    assert_eq!(table.columns.len(), 2);
    assert_eq!(table.rows.len(), 8);
    let fee_row = table.rows.iter().find(|r| r.label == "Fee Range").unwrap();
    assert!(fee_row.values.iter().all(|v| v == "₹150000 - ₹350000"));
}

#[tokio::test]
async fn unknown_slugs_shrink_the_result_without_error() {
    let db = setup_db().await;
    seed(&db).await;
    let courses = SurrealCourseRepository::new(db.clone());

    let params = CompareParams::from_query_parts(Some("MBA"), Some("amity,closed-down")).unwrap();
    let comparison = resolve(&courses, &params).await.unwrap();

    assert_eq!(comparison.rows.len(), 1);
    assert_eq!(comparison.rows[0].institute.slug, "amity");
}

#[tokio::test]
async fn comparison_never_mixes_course_names() {
    let db = setup_db().await;
    seed(&db).await;
    let courses = SurrealCourseRepository::new(db.clone());

    // Amity offers both MBA and BBA; only MBA rows come back.
    let params = CompareParams::from_query_parts(Some("MBA"), Some("amity,lpu")).unwrap();
    let comparison = resolve(&courses, &params).await.unwrap();

    assert_eq!(comparison.rows.len(), 2);
    assert!(comparison.rows.iter().all(|r| r.course.name == "MBA"));
}

#[tokio::test]
async fn tampered_link_with_one_institute_is_rejected_before_querying() {
    let db = setup_db().await;
    seed(&db).await;
    let courses = SurrealCourseRepository::new(db.clone());

    let params = CompareParams {
        course_name: "MBA".into(),
        institute_slugs: vec!["amity".into()],
    };
    let err = resolve(&courses, &params).await.unwrap_err();
    assert!(matches!(err, CompareError::InvalidSelection));
}

#[tokio::test]
async fn validation_failure_leaves_no_registration_behind() {
    let db = setup_db().await;
    let registrations = SurrealRegistrationRepository::new(db.clone());

    let mut gate = LeadGate::new();
    let bad = RegistrationInput {
        name: "X".into(),
        email: "nope".into(),
        phone: "123".into(),
        city: None,
    };
    let err = gate.submit(&registrations, &bad, vec![]).await.unwrap_err();
    assert!(matches!(err, CompareError::Validation(_)));
    assert!(gate.table_for(&edupath_compare::ResolvedComparison {
        course_name: "MBA".into(),
        rows: vec![],
    })
    .is_none());

    let mut result = db
        .query("SELECT count() FROM comparison_registration GROUP ALL")
        .await
        .unwrap();
    let count: Option<i64> = result.take((0, "count")).unwrap();
    assert_eq!(count.unwrap_or(0), 0);
}
