//! PostgreSQL class room repository tests.
//!
//! These need a running database and are ignored by default:
//!
//! ```text
//! CLASSROOM_TEST_DATABASE_URL=postgres://localhost/classroom_test \
//!     cargo test --test postgres_class_room_repository -- --ignored
//! ```

use classroom_phases::adapters::{postgres, PostgresClassRoomRepository, PostgresCourseRepository};
use classroom_phases::app::demo_course;
use classroom_phases::config::{DatabaseConfig, StorageBackend};
use classroom_phases::domain::class_room::ClassRoom;
use classroom_phases::domain::course::Course;
use classroom_phases::domain::foundation::{ErrorCode, Timestamp, UserId};
use classroom_phases::ports::{ClassRoomRepository, CourseRepository};

async fn repositories() -> (PostgresCourseRepository, PostgresClassRoomRepository) {
    let url = std::env::var("CLASSROOM_TEST_DATABASE_URL")
        .expect("CLASSROOM_TEST_DATABASE_URL must be set");
    let config = DatabaseConfig {
        backend: StorageBackend::Postgres,
        url,
        ..Default::default()
    };
    let pool = postgres::connect(&config).await.unwrap();
    postgres::migrate(&pool).await.unwrap();
    (
        PostgresCourseRepository::new(pool.clone()),
        PostgresClassRoomRepository::new(pool),
    )
}

async fn saved_course(courses: &PostgresCourseRepository) -> Course {
    let course = demo_course().unwrap();
    courses.save(&course).await.unwrap();
    course
}

fn user(id: &str) -> UserId {
    UserId::new(id).unwrap()
}

fn at(secs: i64) -> Timestamp {
    Timestamp::from_unix_secs(1_700_000_000 + secs)
}

#[tokio::test]
#[ignore]
async fn snapshot_attendance_matches_event_log() {
    let (courses, class_rooms) = repositories().await;
    let course = saved_course(&courses).await;

    let created = ClassRoom::kick_off(&course, user("alice"), at(0));
    class_rooms.create(&created).await.unwrap();
    let joined = created.class_room.join(user("bob"), at(1));
    class_rooms.append(&joined).await.unwrap();

    let found = class_rooms
        .find_by_id(&created.class_room.id())
        .await
        .unwrap()
        .unwrap();

    assert_eq!(found.version(), 3);
    assert_eq!(found.attending(), &[user("alice"), user("bob")][..]);
}

#[tokio::test]
#[ignore]
async fn write_from_an_older_snapshot_cannot_drop_a_concurrent_join() {
    let (courses, class_rooms) = repositories().await;
    let course = saved_course(&courses).await;

    let created = ClassRoom::kick_off(&course, user("alice"), at(0));
    class_rooms.create(&created).await.unwrap();
    let id = created.class_room.id();

    let stale = class_rooms.find_by_id(&id).await.unwrap().unwrap();
    let fresh = class_rooms.find_by_id(&id).await.unwrap().unwrap();
    class_rooms.append(&fresh.join(user("bob"), at(1))).await.unwrap();

    let err = class_rooms
        .append(&stale.leave(user("carol"), at(2)))
        .await
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::ConcurrentModification);

    let found = class_rooms.find_by_id(&id).await.unwrap().unwrap();
    assert!(found.is_attending(&user("bob")));
    assert_eq!(found.version(), 3);
}

#[tokio::test]
#[ignore]
async fn append_to_missing_class_room_reports_not_found() {
    let (courses, class_rooms) = repositories().await;
    let course = saved_course(&courses).await;

    let never_created = ClassRoom::kick_off(&course, user("alice"), at(0));
    let err = class_rooms
        .append(&never_created.class_room.join(user("bob"), at(1)))
        .await
        .unwrap_err();

    assert_eq!(err.code, ErrorCode::ClassRoomNotFound);
}
