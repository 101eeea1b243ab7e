//! Integration tests for the JSON API: routing, state changes, error mapping.

use actix_web::http::StatusCode;
use actix_web::{test, App};
use club_match_scheduler::http::{configure, new_state};
use serde_json::{json, Value};

fn match_numbers(event: &Value) -> Vec<u64> {
    event["matches"]
        .as_array()
        .unwrap()
        .iter()
        .map(|m| m["match_number"].as_u64().unwrap())
        .collect()
}

#[actix_web::test]
async fn schedule_lifecycle_through_the_api() {
    let app = test::init_service(App::new().app_data(new_state()).configure(configure)).await;

    let req = test::TestRequest::post()
        .uri("/api/events")
        .set_json(json!({ "roster": ["A", "B", "C", "D", "E", "F", "G", "H"] }))
        .to_request();
    let event: Value = test::call_and_read_body_json(&app, req).await;
    let id = event["id"].as_str().unwrap().to_string();

    let req = test::TestRequest::post()
        .uri(&format!("/api/events/{id}/matches/generate"))
        .to_request();
    let event: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(match_numbers(&event), vec![1, 2, 3, 4]);

    let req = test::TestRequest::put()
        .uri(&format!("/api/events/{id}/matches/1/result"))
        .set_json(json!({ "score": "21-10", "winning_team": 1 }))
        .to_request();
    let event: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(event["matches"][0]["status"], "completed");
    assert_eq!(event["matches"][0]["winning_team"], 1);

    let req = test::TestRequest::put()
        .uri(&format!("/api/events/{id}/matches/3/result"))
        .set_json(json!({ "score": "21-10", "winning_team": 2 }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CONFLICT);

    let req = test::TestRequest::post()
        .uri(&format!("/api/events/{id}/matches/regenerate"))
        .to_request();
    let event: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(match_numbers(&event), vec![1, 2, 3, 4]);

    let played: Vec<&str> = event["matches"][0]["players"]
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p.as_str().unwrap())
        .collect();
    let absent = ["A", "B", "C", "D", "E", "F", "G", "H"]
        .into_iter()
        .find(|p| !played.contains(p))
        .unwrap();

    let req = test::TestRequest::delete()
        .uri(&format!("/api/events/{id}/participants/{absent}"))
        .to_request();
    let event: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(event["roster"].as_array().unwrap().len(), 7);
    assert_eq!(match_numbers(&event), vec![1, 2, 3]);
}

#[actix_web::test]
async fn errors_map_to_status_codes() {
    let app = test::init_service(App::new().app_data(new_state()).configure(configure)).await;

    let req = test::TestRequest::get()
        .uri("/api/events/00000000-0000-0000-0000-000000000000")
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::NOT_FOUND);

    let req = test::TestRequest::post()
        .uri("/api/events")
        .set_json(json!({ "roster": ["A", "B", "C", "D"] }))
        .to_request();
    let event: Value = test::call_and_read_body_json(&app, req).await;
    let id = event["id"].as_str().unwrap().to_string();

    let req = test::TestRequest::post()
        .uri(&format!("/api/events/{id}/matches/generate"))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);

    let req = test::TestRequest::put()
        .uri(&format!("/api/events/{id}/matches/9/start"))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::NOT_FOUND);

    let req = test::TestRequest::put()
        .uri(&format!("/api/events/{id}/matches/1/result"))
        .set_json(json!({ "score": "21-10", "winning_team": 3 }))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::BAD_REQUEST);

    let req = test::TestRequest::delete()
        .uri(&format!("/api/events/{id}/participants/A"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert!(body["error"].as_str().unwrap().contains("only 3 participants"));
}

#[actix_web::test]
async fn roster_upload_accepts_csv() {
    let app = test::init_service(App::new().app_data(new_state()).configure(configure)).await;
    let req = test::TestRequest::post().uri("/api/events").to_request();
    let event: Value = test::call_and_read_body_json(&app, req).await;
    let id = event["id"].as_str().unwrap().to_string();

    let req = test::TestRequest::post()
        .uri(&format!("/api/events/{id}/roster/csv"))
        .insert_header(("content-type", "text/csv"))
        .set_payload("participant\nA\nB\nC\nD\nE\n")
        .to_request();
    let event: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(event["roster"], json!(["A", "B", "C", "D", "E"]));

    let req = test::TestRequest::post()
        .uri(&format!("/api/events/{id}/roster/csv"))
        .set_payload("A\nA\n")
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::BAD_REQUEST);
}
