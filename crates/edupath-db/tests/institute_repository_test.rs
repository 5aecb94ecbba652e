//! Integration tests for the institute repository against an
//! embedded database.

use edupath_core::error::EdupathError;
use edupath_core::models::institute::{CreateInstitute, UpdateInstitute};
use edupath_core::repository::{InstituteRepository, Pagination};
use edupath_db::repository::SurrealInstituteRepository;
use surrealdb::Surreal;
use surrealdb::engine::local::{Db, Mem};
use uuid::Uuid;

async fn setup() -> SurrealInstituteRepository<Db> {
    let db = Surreal::new::<Mem>(()).await.unwrap();
    db.use_ns("test").use_db("test").await.unwrap();
    edupath_db::run_migrations(&db).await.unwrap();
    SurrealInstituteRepository::new(db)
}

fn create_input(name: &str, slug: &str) -> CreateInstitute {
    CreateInstitute {
        name: name.into(),
        slug: slug.into(),
        location: Some("Mumbai".into()),
        description: Some("Deemed university".into()),
        logo_url: None,
        website_url: Some("https://example.edu".into()),
        established_year: Some(1981),
        rating: Some(4.4),
        approvals: vec!["UGC".into(), "NAAC".into()],
    }
}

#[tokio::test]
async fn create_and_get_by_id() {
    let repo = setup().await;

    let created = repo.create(create_input("NMIMS", "nmims")).await.unwrap();
    assert_eq!(created.name, "NMIMS");
    assert_eq!(created.slug, "nmims");
    assert_eq!(created.approvals, vec!["UGC", "NAAC"]);

    let fetched = repo.get_by_id(created.id).await.unwrap();
    assert_eq!(fetched.id, created.id);
    assert_eq!(fetched.location.as_deref(), Some("Mumbai"));
    assert_eq!(fetched.established_year, Some(1981));
}

#[tokio::test]
async fn get_by_slug_finds_the_record() {
    let repo = setup().await;
    let created = repo.create(create_input("NMIMS", "nmims")).await.unwrap();

    let fetched = repo.get_by_slug("nmims").await.unwrap();
    assert_eq!(fetched.id, created.id);
}

#[tokio::test]
async fn duplicate_slug_is_rejected() {
    let repo = setup().await;
    repo.create(create_input("NMIMS", "nmims")).await.unwrap();

    let err = repo
        .create(create_input("NMIMS Clone", "nmims"))
        .await
        .unwrap_err();
    assert!(matches!(err, EdupathError::AlreadyExists { .. }));
}

#[tokio::test]
async fn unknown_id_and_slug_return_not_found() {
    let repo = setup().await;

    let by_id = repo.get_by_id(Uuid::new_v4()).await.unwrap_err();
    assert!(matches!(by_id, EdupathError::NotFound { .. }));

    let by_slug = repo.get_by_slug("nowhere").await.unwrap_err();
    assert!(matches!(by_slug, EdupathError::NotFound { .. }));
}

#[tokio::test]
async fn partial_update_leaves_other_fields_alone() {
    let repo = setup().await;
    let created = repo.create(create_input("NMIMS", "nmims")).await.unwrap();

    let updated = repo
        .update(
            created.id,
            UpdateInstitute {
                rating: Some(4.8),
                location: Some("Navi Mumbai".into()),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    assert_eq!(updated.rating, Some(4.8));
    assert_eq!(updated.location.as_deref(), Some("Navi Mumbai"));
    assert_eq!(updated.name, "NMIMS");
    assert_eq!(updated.slug, "nmims");
    assert_eq!(updated.approvals, created.approvals);
}

#[tokio::test]
async fn update_unknown_id_is_not_found() {
    let repo = setup().await;
    let err = repo
        .update(
            Uuid::new_v4(),
            UpdateInstitute {
                name: Some("Ghost".into()),
                ..Default::default()
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, EdupathError::NotFound { .. }));
}

#[tokio::test]
async fn delete_removes_the_record() {
    let repo = setup().await;
    let created = repo.create(create_input("NMIMS", "nmims")).await.unwrap();

    repo.delete(created.id).await.unwrap();

    let err = repo.get_by_id(created.id).await.unwrap_err();
    assert!(matches!(err, EdupathError::NotFound { .. }));
}

#[tokio::test]
async fn list_orders_by_name_and_paginates() {
    let repo = setup().await;
    for (name, slug) in [
        ("Chandigarh University", "cu"),
        ("Amity University", "amity"),
        ("NMIMS", "nmims"),
    ] {
        repo.create(create_input(name, slug)).await.unwrap();
    }

    let page = repo
        .list(Pagination {
            offset: 0,
            limit: 2,
        })
        .await
        .unwrap();
    assert_eq!(page.total, 3);
    let names: Vec<&str> = page.items.iter().map(|i| i.name.as_str()).collect();
    assert_eq!(names, ["Amity University", "Chandigarh University"]);

    let rest = repo
        .list(Pagination {
            offset: 2,
            limit: 2,
        })
        .await
        .unwrap();
    assert_eq!(rest.items.len(), 1);
    assert_eq!(rest.items[0].name, "NMIMS");
}
