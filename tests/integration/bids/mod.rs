//! Bids domain integration tests

use axum::http::{Method, StatusCode};
use serde_json::{json, Value};
use uuid::Uuid;

use crate::common::{authed_request, bid_fixture, job_fixture, unauthed_request, TestApp};

fn field(body: &Value, key: &str) -> Vec<String> {
    body.as_array()
        .unwrap()
        .iter()
        .map(|bid| bid[key].as_str().unwrap_or_default().to_string())
        .collect()
}

// ============================================================================
// Placement and duplicate guard
// ============================================================================
mod test_bid_placement {
    use super::*;

    #[tokio::test]
    async fn test_first_bid_is_accepted() {
        let app = TestApp::new();
        let job_id = app
            .create_job(job_fixture("Logo Design", "Design", "a@x.com"))
            .await;

        let (status, body) = app.place_bid(bid_fixture("b@x.com", &job_id, "a@x.com")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["acknowledged"], true);
        assert!(body["insertedId"].is_string());
    }

    #[tokio::test]
    async fn test_second_bid_on_same_job_is_rejected() {
        let app = TestApp::new();
        let job_id = app
            .create_job(job_fixture("Logo Design", "Design", "a@x.com"))
            .await;

        let (status, _) = app.place_bid(bid_fixture("b@x.com", &job_id, "a@x.com")).await;
        assert_eq!(status, StatusCode::OK);

        let mut retry = bid_fixture("b@x.com", &job_id, "a@x.com");
        retry["price"] = json!(999);
        let (status, body) = app.place_bid(retry).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["message"], "You have already placed a bid on this job");

        let cookie = app.session_cookie("b@x.com");
        let (_, body) = app
            .send(authed_request(Method::GET, "/myBid/b@x.com", &cookie, None))
            .await;
        assert_eq!(body.as_array().unwrap().len(), 1);
        assert_eq!(body[0]["price"], 250);
    }

    #[tokio::test]
    async fn test_concurrent_duplicates_leave_one_bid() {
        use tower::ServiceExt;

        let app = TestApp::new();
        let bid = bid_fixture("b@x.com", "job-1", "a@x.com");

        let mut set = tokio::task::JoinSet::new();
        for _ in 0..10 {
            let router = app.router.clone();
            let request = unauthed_request(Method::POST, "/bid", Some(bid.clone()));
            set.spawn(async move { router.oneshot(request).await.unwrap().status() });
        }

        let mut statuses = Vec::new();
        while let Some(status) = set.join_next().await {
            statuses.push(status.unwrap());
        }

        let accepted = statuses.iter().filter(|s| **s == StatusCode::OK).count();
        assert_eq!(accepted, 1);
        assert!(statuses
            .iter()
            .all(|s| *s == StatusCode::OK || *s == StatusCode::BAD_REQUEST));

        let cookie = app.session_cookie("a@x.com");
        let (_, body) = app
            .send(authed_request(Method::GET, "/bidRequests/a@x.com", &cookie, None))
            .await;
        assert_eq!(body.as_array().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_same_bidder_may_bid_on_other_jobs() {
        let app = TestApp::new();
        let (status, _) = app.place_bid(bid_fixture("b@x.com", "job-1", "a@x.com")).await;
        assert_eq!(status, StatusCode::OK);
        let (status, _) = app.place_bid(bid_fixture("b@x.com", "job-2", "a@x.com")).await;
        assert_eq!(status, StatusCode::OK);
        let (status, _) = app.place_bid(bid_fixture("c@x.com", "job-1", "a@x.com")).await;
        assert_eq!(status, StatusCode::OK);
    }

    #[tokio::test]
    async fn test_non_object_bid_is_rejected() {
        let app = TestApp::new();
        let (status, _) = app.place_bid(json!("bid")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }
}

// ============================================================================
// Listings
// ============================================================================
mod test_bid_listings {
    use super::*;

    async fn seeded() -> TestApp {
        let app = TestApp::new();
        app.place_bid(bid_fixture("b@x.com", "job-1", "a@x.com")).await;
        app.place_bid(bid_fixture("c@x.com", "job-1", "a@x.com")).await;
        app.place_bid(bid_fixture("b@x.com", "job-2", "d@x.com")).await;
        app
    }

    #[tokio::test]
    async fn test_my_bids_lists_bids_by_bidder() {
        let app = seeded().await;
        let cookie = app.session_cookie("b@x.com");

        let (status, body) = app
            .send(authed_request(Method::GET, "/myBid/b@x.com", &cookie, None))
            .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(field(&body, "jobId"), vec!["job-1", "job-2"]);
    }

    #[tokio::test]
    async fn test_my_bids_requires_session() {
        let app = seeded().await;
        let (status, _) = app
            .send(unauthed_request(Method::GET, "/myBid/b@x.com", None))
            .await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_my_bids_for_other_bidder_allowed_by_default() {
        let app = seeded().await;
        let cookie = app.session_cookie("c@x.com");

        let (status, body) = app
            .send(authed_request(Method::GET, "/myBid/b@x.com", &cookie, None))
            .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body.as_array().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_strict_my_bids_requires_same_identity() {
        let app = TestApp::strict();
        app.place_bid(bid_fixture("b@x.com", "job-1", "a@x.com")).await;

        let cookie = app.session_cookie("c@x.com");
        let (status, body) = app
            .send(authed_request(Method::GET, "/myBid/b@x.com", &cookie, None))
            .await;
        assert_eq!(status, StatusCode::FORBIDDEN);
        assert_eq!(body["message"], "forbidden access");

        let cookie = app.session_cookie("b@x.com");
        let (status, _) = app
            .send(authed_request(Method::GET, "/myBid/b@x.com", &cookie, None))
            .await;
        assert_eq!(status, StatusCode::OK);
    }

    #[tokio::test]
    async fn test_bid_requests_lists_bids_on_owned_jobs() {
        let app = seeded().await;
        let cookie = app.session_cookie("a@x.com");

        let (status, body) = app
            .send(authed_request(Method::GET, "/bidRequests/a@x.com", &cookie, None))
            .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(field(&body, "email"), vec!["b@x.com", "c@x.com"]);
    }

    #[tokio::test]
    async fn test_bid_requests_for_other_owner_forbidden() {
        let app = seeded().await;
        let cookie = app.session_cookie("b@x.com");

        let (status, _) = app
            .send(authed_request(Method::GET, "/bidRequests/a@x.com", &cookie, None))
            .await;
        assert_eq!(status, StatusCode::FORBIDDEN);
    }
}

// ============================================================================
// Status changes
// ============================================================================
mod test_bid_patch {
    use super::*;

    async fn bid_id(app: &TestApp) -> String {
        let (status, body) = app.place_bid(bid_fixture("b@x.com", "job-1", "a@x.com")).await;
        assert_eq!(status, StatusCode::OK);
        body["insertedId"].as_str().unwrap().to_string()
    }

    #[tokio::test]
    async fn test_patch_updates_status() {
        let app = TestApp::new();
        let id = bid_id(&app).await;

        let (status, body) = app
            .send(unauthed_request(
                Method::PATCH,
                &format!("/bid/{id}"),
                Some(json!({"status": "In Progress"})),
            ))
            .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["matchedCount"], 1);
        assert_eq!(body["modifiedCount"], 1);

        let cookie = app.session_cookie("b@x.com");
        let (_, body) = app
            .send(authed_request(Method::GET, "/myBid/b@x.com", &cookie, None))
            .await;
        assert_eq!(body[0]["status"], "In Progress");
        assert_eq!(body[0]["price"], 250);
    }

    #[tokio::test]
    async fn test_patch_with_same_value_reports_no_modification() {
        let app = TestApp::new();
        let id = bid_id(&app).await;

        let (status, body) = app
            .send(unauthed_request(
                Method::PATCH,
                &format!("/bid/{id}"),
                Some(json!({"status": "Pending"})),
            ))
            .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["matchedCount"], 1);
        assert_eq!(body["modifiedCount"], 0);
    }

    #[tokio::test]
    async fn test_patch_unknown_bid_matches_nothing() {
        let app = TestApp::new();

        let (status, body) = app
            .send(unauthed_request(
                Method::PATCH,
                &format!("/bid/{}", Uuid::new_v4()),
                Some(json!({"status": "Rejected"})),
            ))
            .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["matchedCount"], 0);
        assert_eq!(body["modifiedCount"], 0);
    }

    #[tokio::test]
    async fn test_strict_patch_requires_party_to_bid() {
        let app = TestApp::strict();
        let id = bid_id(&app).await;
        let uri = format!("/bid/{id}");
        let patch = json!({"status": "Complete"});

        let (status, _) = app
            .send(unauthed_request(Method::PATCH, &uri, Some(patch.clone())))
            .await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);

        let stranger = app.session_cookie("z@x.com");
        let (status, _) = app
            .send(authed_request(Method::PATCH, &uri, &stranger, Some(patch.clone())))
            .await;
        assert_eq!(status, StatusCode::FORBIDDEN);

        let bidder = app.session_cookie("b@x.com");
        let (status, _) = app
            .send(authed_request(Method::PATCH, &uri, &bidder, Some(patch.clone())))
            .await;
        assert_eq!(status, StatusCode::OK);

        let owner = app.session_cookie("a@x.com");
        let (status, body) = app
            .send(authed_request(
                Method::PATCH,
                &uri,
                &owner,
                Some(json!({"status": "Rejected"})),
            ))
            .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["modifiedCount"], 1);
    }
}
