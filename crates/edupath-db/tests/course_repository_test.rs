//! Integration tests for the course repository against an embedded
//! database.

use edupath_core::error::EdupathError;
use edupath_core::models::course::{CourseLevel, CourseMode, CreateCourse, UpdateCourse};
use edupath_core::models::institute::CreateInstitute;
use edupath_core::repository::{CourseRepository, InstituteRepository, Pagination};
use edupath_db::repository::{SurrealCourseRepository, SurrealInstituteRepository};
use surrealdb::Surreal;
use surrealdb::engine::local::{Db, Mem};
use uuid::Uuid;

async fn setup() -> (
    SurrealInstituteRepository<Db>,
    SurrealCourseRepository<Db>,
) {
    let db = Surreal::new::<Mem>(()).await.unwrap();
    db.use_ns("test").use_db("test").await.unwrap();
    edupath_db::run_migrations(&db).await.unwrap();
    (
        SurrealInstituteRepository::new(db.clone()),
        SurrealCourseRepository::new(db),
    )
}

async fn seed_institute(
    repo: &SurrealInstituteRepository<Db>,
    name: &str,
    slug: &str,
) -> Uuid {
    repo.create(CreateInstitute {
        name: name.into(),
        slug: slug.into(),
        location: Some("Delhi".into()),
        description: None,
        logo_url: None,
        website_url: None,
        established_year: Some(1995),
        rating: Some(4.0),
        approvals: vec!["UGC".into()],
    })
    .await
    .unwrap()
    .id
}

fn course_input(name: &str, slug: &str, institute_id: Uuid) -> CreateCourse {
    CreateCourse {
        institute_id,
        name: name.into(),
        slug: slug.into(),
        description: None,
        duration: "3 years".into(),
        level: CourseLevel::Ug,
        mode: CourseMode::Online,
        fee_min: Some(90_000),
        fee_max: Some(120_000),
        eligibility: Some("10+2".into()),
        specializations: vec!["General".into()],
        accreditation: vec![],
        rating: Some(3.9),
    }
}

#[tokio::test]
async fn create_round_trips_fields() {
    let (institutes, courses) = setup().await;
    let iid = seed_institute(&institutes, "Amity", "amity").await;

    let created = courses.create(course_input("BCA", "bca-amity", iid)).await.unwrap();
    assert_eq!(created.institute_id, iid);
    assert_eq!(created.level, CourseLevel::Ug);
    assert_eq!(created.mode, CourseMode::Online);
    assert_eq!(created.fee_min, Some(90_000));

    let fetched = courses.get_by_id(created.id).await.unwrap();
    assert_eq!(fetched.slug, "bca-amity");
    assert_eq!(fetched.specializations, vec!["General"]);
}

#[tokio::test]
async fn create_rejects_unknown_institute() {
    let (_institutes, courses) = setup().await;

    let err = courses
        .create(course_input("BCA", "bca-nowhere", Uuid::new_v4()))
        .await
        .unwrap_err();
    assert!(matches!(err, EdupathError::InvalidReference { .. }));
}

#[tokio::test]
async fn duplicate_course_slug_is_rejected() {
    let (institutes, courses) = setup().await;
    let iid = seed_institute(&institutes, "Amity", "amity").await;
    courses.create(course_input("BCA", "bca-amity", iid)).await.unwrap();

    let err = courses
        .create(course_input("BCA Evening", "bca-amity", iid))
        .await
        .unwrap_err();
    assert!(matches!(err, EdupathError::AlreadyExists { .. }));
}

#[tokio::test]
async fn get_by_slug_nests_the_institute() {
    let (institutes, courses) = setup().await;
    let iid = seed_institute(&institutes, "Amity", "amity").await;
    let created = courses.create(course_input("BCA", "bca-amity", iid)).await.unwrap();

    let with_institute = courses.get_by_slug("bca-amity").await.unwrap();
    assert_eq!(with_institute.course.id, created.id);
    assert_eq!(with_institute.institute.id, iid);
    assert_eq!(with_institute.institute.slug, "amity");
    assert_eq!(with_institute.institute.approvals, vec!["UGC"]);
}

#[tokio::test]
async fn update_can_move_course_to_another_institute() {
    let (institutes, courses) = setup().await;
    let first = seed_institute(&institutes, "Amity", "amity").await;
    let second = seed_institute(&institutes, "LPU", "lpu").await;
    let created = courses.create(course_input("BCA", "bca", first)).await.unwrap();

    let updated = courses
        .update(
            created.id,
            UpdateCourse {
                institute_id: Some(second),
                fee_max: Some(150_000),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    assert_eq!(updated.institute_id, second);
    assert_eq!(updated.fee_max, Some(150_000));
    assert_eq!(updated.name, "BCA");
}

#[tokio::test]
async fn delete_then_get_is_not_found() {
    let (institutes, courses) = setup().await;
    let iid = seed_institute(&institutes, "Amity", "amity").await;
    let created = courses.create(course_input("BCA", "bca", iid)).await.unwrap();

    courses.delete(created.id).await.unwrap();
    let err = courses.get_by_id(created.id).await.unwrap_err();
    assert!(matches!(err, EdupathError::NotFound { .. }));
}

#[tokio::test]
async fn list_joins_institutes_and_orders_by_name() {
    let (institutes, courses) = setup().await;
    let a = seed_institute(&institutes, "Amity", "amity").await;
    let b = seed_institute(&institutes, "LPU", "lpu").await;
    courses.create(course_input("MCA", "mca-amity", a)).await.unwrap();
    courses.create(course_input("BCA", "bca-lpu", b)).await.unwrap();

    let page = courses.list(Pagination::default()).await.unwrap();
    assert_eq!(page.total, 2);
    assert_eq!(page.items[0].course.name, "BCA");
    assert_eq!(page.items[0].institute.slug, "lpu");
    assert_eq!(page.items[1].course.name, "MCA");
    assert_eq!(page.items[1].institute.slug, "amity");
}

#[tokio::test]
async fn list_by_institute_filters_to_its_courses() {
    let (institutes, courses) = setup().await;
    let a = seed_institute(&institutes, "Amity", "amity").await;
    let b = seed_institute(&institutes, "LPU", "lpu").await;
    courses.create(course_input("BCA", "bca-amity", a)).await.unwrap();
    courses.create(course_input("MCA", "mca-amity", a)).await.unwrap();
    courses.create(course_input("BCA", "bca-lpu", b)).await.unwrap();

    let amity_courses = courses.list_by_institute(a).await.unwrap();
    let names: Vec<&str> = amity_courses.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, ["BCA", "MCA"]);
}

#[tokio::test]
async fn list_names_dedupes_shared_names() {
    let (institutes, courses) = setup().await;
    let a = seed_institute(&institutes, "Amity", "amity").await;
    let b = seed_institute(&institutes, "LPU", "lpu").await;
    courses.create(course_input("MBA", "mba-amity", a)).await.unwrap();
    courses.create(course_input("MBA", "mba-lpu", b)).await.unwrap();
    courses.create(course_input("BCA", "bca-lpu", b)).await.unwrap();

    let names = courses.list_names().await.unwrap();
    assert_eq!(names, ["BCA", "MBA"]);
}

#[tokio::test]
async fn list_offerings_returns_one_entry_per_institute() {
    let (institutes, courses) = setup().await;
    let a = seed_institute(&institutes, "Amity", "amity").await;
    let b = seed_institute(&institutes, "LPU", "lpu").await;
    courses.create(course_input("MBA", "mba-amity", a)).await.unwrap();
    courses.create(course_input("MBA", "mba-lpu", b)).await.unwrap();
    courses.create(course_input("BCA", "bca-lpu", b)).await.unwrap();

    let offerings = courses.list_offerings("MBA").await.unwrap();
    assert_eq!(offerings.len(), 2);
    let mut slugs: Vec<&str> = offerings.iter().map(|o| o.institute.slug.as_str()).collect();
    slugs.sort();
    assert_eq!(slugs, ["amity", "lpu"]);

    assert!(courses.list_offerings("LLB").await.unwrap().is_empty());
}

#[tokio::test]
async fn inverted_fee_range_is_rejected_on_create() {
    let (institutes, courses) = setup().await;
    let iid = seed_institute(&institutes, "Amity", "amity").await;

    let mut input = course_input("MBA", "mba-amity", iid);
    input.fee_min = Some(500_000);
    input.fee_max = Some(100_000);

    let err = courses.create(input).await.unwrap_err();
    assert!(matches!(err, EdupathError::Validation { .. }));

    // Nothing was stored.
    let page = courses.list(Pagination::default()).await.unwrap();
    assert_eq!(page.total, 0);
}

#[tokio::test]
async fn partial_fee_update_cannot_invert_stored_range() {
    let (institutes, courses) = setup().await;
    let iid = seed_institute(&institutes, "Amity", "amity").await;
    let created = courses.create(course_input("MBA", "mba-amity", iid)).await.unwrap();

    // Stored range is 90_000..=120_000; raising only the floor past
    // the stored ceiling must fail.
    let err = courses
        .update(
            created.id,
            UpdateCourse {
                fee_min: Some(500_000),
                ..Default::default()
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, EdupathError::Validation { .. }));

    // Sending both bounds inverted fails too.
    let err = courses
        .update(
            created.id,
            UpdateCourse {
                fee_min: Some(500_000),
                fee_max: Some(100_000),
                ..Default::default()
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, EdupathError::Validation { .. }));

    // The stored row is untouched and raising both bounds together works.
    let current = courses.get_by_id(created.id).await.unwrap();
    assert_eq!(current.fee_min, Some(90_000));
    assert_eq!(current.fee_max, Some(120_000));

    let updated = courses
        .update(
            created.id,
            UpdateCourse {
                fee_min: Some(500_000),
                fee_max: Some(700_000),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(updated.fee_min, Some(500_000));
    assert_eq!(updated.fee_max, Some(700_000));
}

#[tokio::test]
async fn update_rejects_missing_institute_reference() {
    let (institutes, courses) = setup().await;
    let iid = seed_institute(&institutes, "Amity", "amity").await;
    let created = courses.create(course_input("MBA", "mba-amity", iid)).await.unwrap();

    let err = courses
        .update(
            created.id,
            UpdateCourse {
                institute_id: Some(Uuid::new_v4()),
                ..Default::default()
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, EdupathError::InvalidReference { .. }));

    // The course still points at its real institute, so public
    // listings keep working.
    let page = courses.list(Pagination::default()).await.unwrap();
    assert_eq!(page.total, 1);
    assert_eq!(page.items[0].institute.slug, "amity");
}

#[tokio::test]
async fn institute_delete_is_blocked_while_courses_reference_it() {
    let (institutes, courses) = setup().await;
    let iid = seed_institute(&institutes, "Amity", "amity").await;
    let course = courses.create(course_input("MBA", "mba-amity", iid)).await.unwrap();

    let err = institutes.delete(iid).await.unwrap_err();
    assert!(matches!(err, EdupathError::Conflict { .. }));

    // The refusal leaves the catalog fully intact.
    let page = courses.list(Pagination::default()).await.unwrap();
    assert_eq!(page.total, 1);

    // Once the last course is gone the institute can be deleted.
    courses.delete(course.id).await.unwrap();
    institutes.delete(iid).await.unwrap();
    let err = institutes.get_by_id(iid).await.unwrap_err();
    assert!(matches!(err, EdupathError::NotFound { .. }));
}
