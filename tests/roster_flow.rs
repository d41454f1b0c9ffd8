//! Roster operations end to end against a mock backend.

use std::time::Duration;

use mockito::{Matcher, Server, ServerGuard};

use rostro_client::telemetry::InMemoryAttemptObserver;
use rostro_client::{
    AttemptOutcome, Error, NewStudent, Photo, RosterPage, RostroClient, StudentUpdate,
};

const ANA_BODY: &str = r#"{
    "id": 7,
    "nombre": "Ana María",
    "apellidos": "Quispe Rojas",
    "codigo": "A20230456",
    "correo": "ana.quispe@uni.edu",
    "requisitoriado": false,
    "imagen_path": "uploads/students/A20230456.jpg",
    "created_at": "2026-03-14T09:21:33"
}"#;

// Enrolled before the backend validated addresses; correo is stored as null.
const LEGACY_BODY: &str = r#"{
    "id": 3,
    "nombre": "Jorge",
    "apellidos": "Mamani Cruz",
    "codigo": "B20190011",
    "correo": null,
    "requisitoriado": true
}"#;

fn client_for(server: &ServerGuard) -> RostroClient {
    RostroClient::builder()
        .base_url(server.url())
        .backoff(Duration::from_millis(10), Duration::from_millis(10))
        .build()
        .expect("client")
}

#[tokio::test]
async fn health_reports_backend_state() {
    let mut server = Server::new_async().await;
    let probe = server
        .mock("GET", "/health")
        .with_status(200)
        .with_body(
            r#"{"status":"healthy","database":"connected","students_loaded":12,"version":"1.0.0"}"#,
        )
        .expect(1)
        .create_async()
        .await;

    let client = client_for(&server);
    let health = client.health().await.expect("health");
    assert!(health.is_healthy());
    assert_eq!(health.database.as_deref(), Some("connected"));
    assert_eq!(health.students_loaded, Some(12));
    probe.assert_async().await;
}

#[tokio::test]
async fn create_then_fetch_returns_the_same_record() {
    let mut server = Server::new_async().await;
    let created = server
        .mock("POST", "/api/students")
        .match_header("content-type", Matcher::Regex("^multipart/form-data".into()))
        .match_body(Matcher::Regex(
            r#"name="codigo"\r\n\r\nA20230456"#.into(),
        ))
        .with_status(201)
        .with_body(ANA_BODY)
        .expect(1)
        .create_async()
        .await;
    let fetched = server
        .mock("GET", "/api/students/7")
        .with_status(200)
        .with_body(ANA_BODY)
        .expect(1)
        .create_async()
        .await;

    let client = client_for(&server);
    // Lowercase code on input; the wire carries it uppercased.
    let enrollment = NewStudent::new("Ana María", "Quispe Rojas", "a20230456", "ana.quispe@uni.edu");
    let photo = Photo::jpeg(&b"fake-jpeg-bytes"[..]);

    let stored = client
        .create_student(&enrollment, photo)
        .await
        .expect("enrollment");
    assert_eq!(stored.id, 7);
    assert_eq!(stored.given_name, "Ana María");
    assert_eq!(stored.family_name, "Quispe Rojas");
    assert_eq!(stored.code, "A20230456");
    assert_eq!(stored.email.as_deref(), Some("ana.quispe@uni.edu"));
    assert!(!stored.flagged);
    assert_eq!(stored.full_name(), "Ana María Quispe Rojas");

    let reread = client.student(7).await.expect("lookup");
    assert_eq!(reread, stored);

    created.assert_async().await;
    fetched.assert_async().await;
}

#[tokio::test]
async fn lookup_by_code_normalizes_before_dispatch() {
    let mut server = Server::new_async().await;
    let by_code = server
        .mock("GET", "/api/students/codigo/A20230456")
        .with_status(200)
        .with_body(ANA_BODY)
        .expect(1)
        .create_async()
        .await;

    let client = client_for(&server);
    let record = client
        .student_by_code("  a20230456 ")
        .await
        .expect("lookup by code");
    assert_eq!(record.code, "A20230456");
    by_code.assert_async().await;
}

#[tokio::test]
async fn listing_sends_the_pagination_window() {
    let mut server = Server::new_async().await;
    let page_mock = server
        .mock("GET", "/api/students")
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("skip".into(), "30".into()),
            Matcher::UrlEncoded("limit".into(), "15".into()),
        ]))
        .with_status(200)
        .with_body(format!("[{ANA_BODY}]"))
        .expect(1)
        .create_async()
        .await;

    let client = client_for(&server);
    let students = client
        .list_students(&RosterPage::new(30, 15))
        .await
        .expect("page");
    assert_eq!(students.len(), 1);
    assert_eq!(students[0].code, "A20230456");
    page_mock.assert_async().await;
}

#[tokio::test]
async fn listing_survives_a_record_without_email() {
    let mut server = Server::new_async().await;
    let page_mock = server
        .mock("GET", "/api/students")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body(format!("[{ANA_BODY},{LEGACY_BODY}]"))
        .expect(1)
        .create_async()
        .await;

    let client = client_for(&server);
    let students = client
        .list_students(&RosterPage::default())
        .await
        .expect("roster with a legacy record");
    assert_eq!(students.len(), 2);
    assert_eq!(students[0].email.as_deref(), Some("ana.quispe@uni.edu"));
    assert_eq!(students[1].email, None);
    assert!(students[1].flagged);
    page_mock.assert_async().await;
}

#[tokio::test]
async fn deleting_twice_is_a_clean_not_found() {
    let mut server = Server::new_async().await;
    let first = server
        .mock("DELETE", "/api/students/7")
        .with_status(200)
        .with_body(r#"{"message":"Estudiante eliminado correctamente"}"#)
        .expect(1)
        .create_async()
        .await;

    let observer = InMemoryAttemptObserver::new();
    let client = RostroClient::builder()
        .base_url(server.url())
        .backoff(Duration::from_millis(10), Duration::from_millis(10))
        .attempt_observer(observer.clone())
        .build()
        .expect("client");

    client.delete_student(7).await.expect("first delete");
    first.assert_async().await;
    first.remove_async().await;

    let second = server
        .mock("DELETE", "/api/students/7")
        .with_status(404)
        .with_body(r#"{"detail":"Estudiante no encontrado"}"#)
        .expect(1)
        .create_async()
        .await;

    let err = client
        .delete_student(7)
        .await
        .expect_err("second delete is gone");
    assert!(matches!(err, Error::Api { status: 404, .. }));
    second.assert_async().await;

    // The 404 must not have been retried.
    let records = observer.records();
    assert_eq!(records.len(), 2);
    assert_eq!(records[1].outcome, AttemptOutcome::Rejected { status: 404 });
}

#[tokio::test]
async fn partial_update_travels_as_form_fields() {
    let mut server = Server::new_async().await;
    let updated_body = ANA_BODY.replace("ana.quispe@uni.edu", "ana.quispe@alumni.edu");
    let updated = server
        .mock("PUT", "/api/students/7")
        .match_header("content-type", Matcher::Regex("^multipart/form-data".into()))
        .match_body(Matcher::AllOf(vec![
            Matcher::Regex(r#"name="correo"\r\n\r\nana\.quispe@alumni\.edu"#.into()),
            Matcher::Regex(r#"name="requisitoriado"\r\n\r\ntrue"#.into()),
        ]))
        .with_status(200)
        .with_body(updated_body)
        .expect(1)
        .create_async()
        .await;

    let client = client_for(&server);
    let change = StudentUpdate::new()
        .email("ana.quispe@alumni.edu")
        .flagged(true);
    let record = client
        .update_student(7, &change, None)
        .await
        .expect("update");
    assert_eq!(record.email.as_deref(), Some("ana.quispe@alumni.edu"));
    updated.assert_async().await;
}

#[tokio::test]
async fn empty_update_is_rejected_before_any_request() {
    let mut server = Server::new_async().await;
    let untouched = server
        .mock("PUT", Matcher::Any)
        .expect(0)
        .create_async()
        .await;

    let client = client_for(&server);
    let err = client
        .update_student(7, &StudentUpdate::new(), None)
        .await
        .expect_err("nothing to change");
    assert!(matches!(err, Error::Validation { .. }));
    untouched.assert_async().await;
}

#[tokio::test]
async fn enrollment_requires_a_non_empty_photo() {
    let mut server = Server::new_async().await;
    let untouched = server
        .mock("POST", Matcher::Any)
        .expect(0)
        .create_async()
        .await;

    let client = client_for(&server);
    let enrollment = NewStudent::new("Ana", "Quispe", "A1", "ana@uni.edu");
    let err = client
        .create_student(&enrollment, Photo::jpeg(Vec::new()))
        .await
        .expect_err("empty photo");
    assert!(matches!(err, Error::Validation { .. }));
    untouched.assert_async().await;
}

#[tokio::test]
async fn unsupported_photo_format_never_reaches_the_wire() {
    let mut server = Server::new_async().await;
    let untouched = server
        .mock("POST", Matcher::Any)
        .expect(0)
        .create_async()
        .await;

    let client = client_for(&server);
    let enrollment = NewStudent::new("Ana", "Quispe", "A1", "ana@uni.edu");
    let photo = Photo::new(&b"fake-jpeg-bytes"[..], "photo.bin", "not a mime");
    let err = client
        .create_student(&enrollment, photo)
        .await
        .expect_err("unsupported format");
    assert!(matches!(err, Error::Validation { .. }));
    // A locally rejected photo must not be retried.
    assert!(!err.is_retryable());
    untouched.assert_async().await;
}

#[tokio::test]
async fn duplicate_code_rejection_carries_backend_detail() {
    let mut server = Server::new_async().await;
    let conflict = server
        .mock("POST", "/api/students")
        .with_status(400)
        .with_body(r#"{"detail":"El código ya está registrado"}"#)
        .expect(1)
        .create_async()
        .await;

    let client = client_for(&server);
    let enrollment = NewStudent::new("Ana", "Quispe", "A20230456", "ana@uni.edu");
    let err = client
        .create_student(&enrollment, Photo::jpeg(&b"fake-jpeg-bytes"[..]))
        .await
        .expect_err("duplicate code");
    match err {
        Error::Api { status, detail } => {
            assert_eq!(status, 400);
            assert_eq!(detail, "El código ya está registrado");
        }
        other => panic!("expected Api error, got {other:?}"),
    }
    conflict.assert_async().await;
}

#[tokio::test]
async fn one_client_serves_concurrent_calls() {
    let mut server = Server::new_async().await;
    let roster = server
        .mock("GET", "/api/students")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body(format!("[{ANA_BODY}]"))
        .expect(4)
        .create_async()
        .await;

    let client = client_for(&server);
    let calls = (0..4).map(|_| {
        let client = client.clone();
        async move { client.list_students(&RosterPage::default()).await }
    });
    let results = futures::future::join_all(calls).await;
    for result in results {
        assert_eq!(result.expect("page").len(), 1);
    }
    roster.assert_async().await;
}
