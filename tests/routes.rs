use actix_web::{App, http::StatusCode, test, web};
use chrono::Utc;
use serde_json::{Value, json};
use uuid::Uuid;

use company_registry::auth::create_token;
use company_registry::domain::user::User;
use company_registry::models::config::ServerConfig;
use company_registry::repository::DieselRepository;
use company_registry::routes::auth::{login, register};
use company_registry::routes::company::{
    create_company, create_company_collection, delete_company, get_company,
    get_company_collection, list_companies, patch_company, update_company,
};
use company_registry::routes::employee::{
    PAGINATION_HEADER, create_employee, delete_employee, get_employee, list_employees,
    patch_employee, update_employee,
};

mod common;

const TEST_SECRET: &str = "routes-test-secret";

fn test_config() -> ServerConfig {
    ServerConfig {
        address: "127.0.0.1".to_string(),
        port: 0,
        database_url: String::new(),
        secret: TEST_SECRET.to_string(),
        token_ttl: 3600,
    }
}

fn token_with_roles(roles: &[&str]) -> String {
    let user = User {
        id: Uuid::new_v4(),
        username: "tester".to_string(),
        password_hash: String::new(),
        roles: roles.iter().map(|r| r.to_string()).collect(),
        created_at: Utc::now().naive_utc(),
    };
    create_token(&user, TEST_SECRET, 3600).unwrap()
}

macro_rules! test_app {
    ($repo:expr) => {
        test::init_service(
            App::new()
                .app_data(web::Data::new($repo.clone()))
                .app_data(web::Data::new(test_config()))
                .service(
                    web::scope("/api/v1")
                        .service(register)
                        .service(login)
                        .service(get_company_collection)
                        .service(create_company_collection)
                        .service(list_companies)
                        .service(get_company)
                        .service(create_company)
                        .service(update_company)
                        .service(patch_company)
                        .service(delete_company)
                        .service(list_employees)
                        .service(get_employee)
                        .service(create_employee)
                        .service(update_employee)
                        .service(patch_employee)
                        .service(delete_employee),
                ),
        )
        .await
    };
}

#[actix_web::test]
async fn company_routes_require_a_bearer_token() {
    let test_db = common::TestDb::new("routes_auth_required.db");
    let repo = DieselRepository::new(test_db.pool().clone());
    let app = test_app!(repo);

    let req = test::TestRequest::get().uri("/api/v1/companies").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    let req = test::TestRequest::get()
        .uri("/api/v1/companies")
        .insert_header(("Authorization", "Bearer not-a-token"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[actix_web::test]
async fn listing_companies_requires_admin_role() {
    let test_db = common::TestDb::new("routes_admin_only.db");
    let repo = DieselRepository::new(test_db.pool().clone());
    let app = test_app!(repo);

    let token = token_with_roles(&[]);
    let req = test::TestRequest::get()
        .uri("/api/v1/companies")
        .insert_header(("Authorization", format!("Bearer {token}")))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    let token = token_with_roles(&["admin"]);
    let req = test::TestRequest::get()
        .uri("/api/v1/companies")
        .insert_header(("Authorization", format!("Bearer {token}")))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
}

#[actix_web::test]
async fn company_crud_round_trip() {
    let test_db = common::TestDb::new("routes_company_crud.db");
    let repo = DieselRepository::new(test_db.pool().clone());
    let app = test_app!(repo);
    let token = token_with_roles(&["admin"]);
    let auth = ("Authorization", format!("Bearer {token}"));

    // Create.
    let req = test::TestRequest::post()
        .uri("/api/v1/companies")
        .insert_header(auth.clone())
        .set_json(json!({"name": "Acme", "address": "1 Main St", "country": "USA"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let location = resp
        .headers()
        .get("Location")
        .and_then(|v| v.to_str().ok())
        .unwrap()
        .to_string();
    let created: Value = test::read_body_json(resp).await;
    assert_eq!(created["name"], "Acme");
    assert_eq!(created["full_address"], "1 Main St USA");
    assert_eq!(created["version"], 1);
    let id = created["id"].as_str().unwrap().to_string();
    assert_eq!(location, format!("/api/v1/companies/{id}"));

    // Fetch round-trips the created representation.
    let req = test::TestRequest::get()
        .uri(&location)
        .insert_header(auth.clone())
        .to_request();
    let fetched: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(fetched, created);

    // PUT with the current version succeeds.
    let req = test::TestRequest::put()
        .uri(&location)
        .insert_header(auth.clone())
        .set_json(json!({
            "name": "Acme Corp", "address": "1 Main St", "country": "USA", "version": 1
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);

    // PUT with the stale version is rejected.
    let req = test::TestRequest::put()
        .uri(&location)
        .insert_header(auth.clone())
        .set_json(json!({
            "name": "Acme Late", "address": "1 Main St", "country": "USA", "version": 1
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CONFLICT);

    // Merge patch keeps unnamed fields and bumps the version again.
    let req = test::TestRequest::patch()
        .uri(&location)
        .insert_header(auth.clone())
        .set_json(json!({"country": "Canada", "version": 2}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);

    let req = test::TestRequest::get()
        .uri(&location)
        .insert_header(auth.clone())
        .to_request();
    let patched: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(patched["name"], "Acme Corp");
    assert_eq!(patched["country"], "Canada");
    assert_eq!(patched["version"], 3);

    // Validation failures are 422.
    let req = test::TestRequest::post()
        .uri("/api/v1/companies")
        .insert_header(auth.clone())
        .set_json(json!({"name": "", "address": "1 Main St", "country": "USA"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);

    // Delete, then the resource is gone.
    let req = test::TestRequest::delete()
        .uri(&location)
        .insert_header(auth.clone())
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);

    let req = test::TestRequest::get()
        .uri(&location)
        .insert_header(auth.clone())
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn company_collection_routes() {
    let test_db = common::TestDb::new("routes_company_collection.db");
    let repo = DieselRepository::new(test_db.pool().clone());
    let app = test_app!(repo);
    let token = token_with_roles(&[]);
    let auth = ("Authorization", format!("Bearer {token}"));

    let req = test::TestRequest::post()
        .uri("/api/v1/companies/collection")
        .insert_header(auth.clone())
        .set_json(json!([
            {"name": "Acme", "address": "1 Main St", "country": "USA"},
            {"name": "Globex", "address": "2 Side St", "country": "USA"}
        ]))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let created: Value = test::read_body_json(resp).await;
    let ids: Vec<&str> = created
        .as_array()
        .unwrap()
        .iter()
        .map(|c| c["id"].as_str().unwrap())
        .collect();
    assert_eq!(ids.len(), 2);

    let req = test::TestRequest::get()
        .uri(&format!("/api/v1/companies/collection/{}", ids.join(",")))
        .insert_header(auth.clone())
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let fetched: Value = test::read_body_json(resp).await;
    assert_eq!(fetched.as_array().unwrap().len(), 2);

    // A missing id fails the whole collection lookup.
    let req = test::TestRequest::get()
        .uri(&format!(
            "/api/v1/companies/collection/{},{}",
            ids[0],
            Uuid::new_v4()
        ))
        .insert_header(auth.clone())
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    // Malformed id lists are a client error.
    let req = test::TestRequest::get()
        .uri("/api/v1/companies/collection/not-a-uuid")
        .insert_header(auth.clone())
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

macro_rules! seed_company {
    ($app:expr, $auth:expr) => {{
        let req = test::TestRequest::post()
            .uri("/api/v1/companies")
            .insert_header($auth.clone())
            .set_json(json!({"name": "Acme", "address": "1 Main St", "country": "USA"}))
            .to_request();
        let created: Value = test::call_and_read_body_json(&$app, req).await;
        created["id"].as_str().unwrap().to_string()
    }};
}

#[actix_web::test]
async fn employee_listing_pages_filters_and_shapes() {
    let test_db = common::TestDb::new("routes_employee_listing.db");
    let repo = DieselRepository::new(test_db.pool().clone());
    let app = test_app!(repo);
    let token = token_with_roles(&[]);
    let auth = ("Authorization", format!("Bearer {token}"));

    let company_id = seed_company!(app, auth);

    for i in 0..25 {
        let req = test::TestRequest::post()
            .uri(&format!("/api/v1/companies/{company_id}/employees"))
            .insert_header(auth.clone())
            .set_json(json!({
                "name": format!("Employee {i:02}"),
                "age": 20 + i,
                "position": "Engineer"
            }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::CREATED);
    }

    // Default paging emits X-Pagination with three pages of ten.
    let req = test::TestRequest::get()
        .uri(&format!("/api/v1/companies/{company_id}/employees"))
        .insert_header(auth.clone())
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let metadata: Value = serde_json::from_str(
        resp.headers()
            .get(PAGINATION_HEADER)
            .and_then(|v| v.to_str().ok())
            .unwrap(),
    )
    .unwrap();
    assert_eq!(metadata["currentPage"], 1);
    assert_eq!(metadata["pageSize"], 10);
    assert_eq!(metadata["totalCount"], 25);
    assert_eq!(metadata["totalPages"], 3);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body.as_array().unwrap().len(), 10);

    // Age filter bounds every returned employee.
    let req = test::TestRequest::get()
        .uri(&format!(
            "/api/v1/companies/{company_id}/employees?minAge=25&maxAge=30&pageSize=50"
        ))
        .insert_header(auth.clone())
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    let ages: Vec<i64> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["age"].as_i64().unwrap())
        .collect();
    assert_eq!(ages.len(), 6);
    assert!(ages.iter().all(|age| (25..=30).contains(age)));

    // Inverted age range is a client error.
    let req = test::TestRequest::get()
        .uri(&format!(
            "/api/v1/companies/{company_id}/employees?minAge=40&maxAge=20"
        ))
        .insert_header(auth.clone())
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    // Shaping keeps the id plus the requested fields, ignoring unknowns.
    let req = test::TestRequest::get()
        .uri(&format!(
            "/api/v1/companies/{company_id}/employees?fields=name,salary"
        ))
        .insert_header(auth.clone())
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    for employee in body.as_array().unwrap() {
        let keys: Vec<&String> = employee.as_object().unwrap().keys().collect();
        assert_eq!(keys, ["id", "name"]);
    }

    // Sorting by age descending.
    let req = test::TestRequest::get()
        .uri(&format!(
            "/api/v1/companies/{company_id}/employees?orderBy=age%20desc&pageSize=5"
        ))
        .insert_header(auth.clone())
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body[0]["age"], 44);

    // Listing for an unknown company is 404, never a partial list.
    let req = test::TestRequest::get()
        .uri(&format!("/api/v1/companies/{}/employees", Uuid::new_v4()))
        .insert_header(auth.clone())
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn employee_crud_round_trip() {
    let test_db = common::TestDb::new("routes_employee_crud.db");
    let repo = DieselRepository::new(test_db.pool().clone());
    let app = test_app!(repo);
    let token = token_with_roles(&[]);
    let auth = ("Authorization", format!("Bearer {token}"));

    let company_id = seed_company!(app, auth);

    let req = test::TestRequest::post()
        .uri(&format!("/api/v1/companies/{company_id}/employees"))
        .insert_header(auth.clone())
        .set_json(json!({"name": "Sam", "age": 30, "position": "Engineer"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let created: Value = test::read_body_json(resp).await;
    let employee_id = created["id"].as_str().unwrap().to_string();
    let uri = format!("/api/v1/companies/{company_id}/employees/{employee_id}");

    let req = test::TestRequest::get()
        .uri(&uri)
        .insert_header(auth.clone())
        .to_request();
    let fetched: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(fetched, created);

    // The same employee is invisible under a different company.
    let req = test::TestRequest::get()
        .uri(&format!(
            "/api/v1/companies/{}/employees/{employee_id}",
            Uuid::new_v4()
        ))
        .insert_header(auth.clone())
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    // PUT replaces the mutable fields.
    let req = test::TestRequest::put()
        .uri(&uri)
        .insert_header(auth.clone())
        .set_json(json!({"name": "Sam", "age": 31, "position": "Senior Engineer"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);

    // Merge patch touches only the named field.
    let req = test::TestRequest::patch()
        .uri(&uri)
        .insert_header(auth.clone())
        .set_json(json!({"position": "Staff Engineer"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);

    let req = test::TestRequest::get()
        .uri(&uri)
        .insert_header(auth.clone())
        .to_request();
    let patched: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(patched["age"], 31);
    assert_eq!(patched["position"], "Staff Engineer");

    // A patch producing an invalid document is 422.
    let req = test::TestRequest::patch()
        .uri(&uri)
        .insert_header(auth.clone())
        .set_json(json!({"age": -5}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let req = test::TestRequest::delete()
        .uri(&uri)
        .insert_header(auth.clone())
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);

    let req = test::TestRequest::get()
        .uri(&uri)
        .insert_header(auth.clone())
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn registration_and_login_issue_usable_tokens() {
    let test_db = common::TestDb::new("routes_authentication.db");
    let repo = DieselRepository::new(test_db.pool().clone());
    let app = test_app!(repo);

    let req = test::TestRequest::post()
        .uri("/api/v1/authentication")
        .set_json(json!({
            "username": "alice",
            "password": "correct-horse",
            "roles": ["admin"]
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);

    // Duplicate registration conflicts.
    let req = test::TestRequest::post()
        .uri("/api/v1/authentication")
        .set_json(json!({"username": "alice", "password": "correct-horse"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CONFLICT);

    // Wrong password is 401.
    let req = test::TestRequest::post()
        .uri("/api/v1/authentication/login")
        .set_json(json!({"username": "alice", "password": "wrong"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    // Valid credentials yield a token that opens protected routes.
    let req = test::TestRequest::post()
        .uri("/api/v1/authentication/login")
        .set_json(json!({"username": "alice", "password": "correct-horse"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    let token = body["token"].as_str().unwrap();

    let req = test::TestRequest::get()
        .uri("/api/v1/companies")
        .insert_header(("Authorization", format!("Bearer {token}")))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
}
