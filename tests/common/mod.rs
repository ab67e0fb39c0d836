//! Shared helpers for the integration tests.
//!
//! `MisfitMock` stands up a `wiremock` server that behaves like the Misfit
//! cloud API for a single registered application and user.

#![allow(dead_code)]

use misfit_client::MisfitClient;
use serde_json::{json, Value};
use wiremock::matchers::{method, path, path_regex, query_param};
use wiremock::{Mock, MockServer, Request, Respond, ResponseTemplate};

pub const CLIENT_ID: &str = "e1wj83r9dan4qcqn";
pub const CLIENT_SECRET: &str = "ghacfcx1jko4o4iw3nnysn12x1xzn4sa";
pub const AUTH_CODE: &str = "8f673z9qpn58hm4f";
pub const EXPIRED_CODE: &str = "8f673z9qpn58hm4g";
pub const ACCESS_TOKEN: &str = "lwwz08i9qj36d1rflsu4a44vsld51qpddr2jpay5zs13zioqgplgjvih61tyi811p9q4aefzw682unih29nbuvz7nivbw22r1i1hm6npilhiepp653op4dmx1nynf64neba77nmff9nz43wzcqfm9rq0lutqr3jb4k81d0myff4aoqz664jl2zbdja9g3zidpw483wd8178g3ysf81qg6rzw7f204a3zddx6zg46d3s67bb5ircfoh1lmtrgak5";

/// Mock Misfit API.
pub struct MisfitMock {
    pub server: MockServer,
}

impl MisfitMock {
    /// Starts a server with the token endpoint and every resource mounted.
    pub async fn start() -> Self {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/auth/tokens/exchange"))
            .respond_with(TokenExchange)
            .mount(&server)
            .await;

        mount_resource(&server, r"/profile$", profile_fixture()).await;
        mount_resource(&server, r"/device$", device_fixture()).await;
        mount_resource(&server, r"/activity/goals$", goals_fixture()).await;
        mount_resource(&server, r"/activity/sessions$", sessions_fixture()).await;
        mount_resource(&server, r"/activity/sleeps$", sleeps_fixture()).await;

        Mock::given(method("GET"))
            .and(path_regex(r"^/move/resource/v1/user/[^/]+/activity/summary$"))
            .and(query_param("detail", "true"))
            .respond_with(Resource(summary_detail_fixture()))
            .with_priority(1)
            .mount(&server)
            .await;
        mount_resource(&server, r"/activity/summary$", summary_fixture()).await;

        Self { server }
    }

    /// Base URL of the server.
    pub fn uri(&self) -> String {
        self.server.uri()
    }

    /// Client for the registered application.
    pub fn client(&self) -> MisfitClient {
        self.client_with(CLIENT_ID, CLIENT_SECRET)
    }

    /// Client with arbitrary credentials.
    pub fn client_with(&self, client_id: &str, client_secret: &str) -> MisfitClient {
        MisfitClient::builder()
            .client_id(client_id)
            .client_secret(client_secret)
            .redirect_uri("http://localhost/callback")
            .base_url(self.uri())
            .build()
            .expect("client should build")
    }
}

async fn mount_resource(server: &MockServer, suffix: &str, body: Value) {
    let pattern = format!(r"^/move/resource/v1/user/[^/]+{}", suffix);
    Mock::given(method("GET"))
        .and(path_regex(pattern))
        .respond_with(Resource(body))
        .mount(&server)
        .await;
}

/// Token exchange: client credentials first, then the code.
struct TokenExchange;

impl Respond for TokenExchange {
    fn respond(&self, request: &Request) -> ResponseTemplate {
        let body: Value = serde_json::from_slice(&request.body).unwrap_or(Value::Null);

        if body["client_id"] != CLIENT_ID || body["client_secret"] != CLIENT_SECRET {
            return ResponseTemplate::new(401);
        }

        if body["code"] == EXPIRED_CODE {
            return ResponseTemplate::new(403).set_body_json(json!({
                "error": "invalid_grant",
                "error_description": "Authorization code expired"
            }));
        }

        if body["code"] != AUTH_CODE {
            return ResponseTemplate::new(403).set_body_json(json!({
                "error": "invalid_grant",
                "error_description": "App Id or redirect_uri does not match authorization code"
            }));
        }

        ResponseTemplate::new(200).set_body_json(json!({
            "access_token": ACCESS_TOKEN,
            "token_type": "bearer"
        }))
    }
}

/// Resource endpoint: bearer check, then user check, then the fixture.
struct Resource(Value);

impl Respond for Resource {
    fn respond(&self, request: &Request) -> ResponseTemplate {
        let expected = format!("Bearer {}", ACCESS_TOKEN);
        let authorized = request
            .headers
            .get("authorization")
            .and_then(|v| v.to_str().ok())
            .map_or(true, |v| v == expected);

        if !authorized {
            return ResponseTemplate::new(401).set_body_json(json!({
                "code": 401,
                "message": "Invalid Access Token"
            }));
        }

        let user_id = request.url.path().split('/').nth(5).unwrap_or_default();
        if user_id != "me" {
            return ResponseTemplate::new(403).set_body_json(json!({
                "code": 403,
                "message": "Forbidden"
            }));
        }

        ResponseTemplate::new(200).set_body_json(self.0.clone())
    }
}

pub fn profile_fixture() -> Value {
    json!({
        "userId": "51a4189acf12e53f79000001",
        "name": "Misfit",
        "birthday": "1955-07-06",
        "gender": "female",
        "email": "help@misfit.com"
    })
}

pub fn device_fixture() -> Value {
    json!({
        "id": "51a4189acf12e53f80000001",
        "deviceType": "shine",
        "serialNumber": " XXXXXV0011",
        "firmwareVersion": "0.0.50r",
        "batteryLevel": 40
    })
}

pub fn goals_fixture() -> Value {
    json!({
        "goals": [
            {"id": "51a4189acf12e53f81000001", "date": "2013-10-05",
             "points": 500, "targetPoints": 1000},
            {"id": "51a4189acf12e53f81000002", "date": "2013-10-06",
             "points": 506, "targetPoints": 1000}
        ]
    })
}

pub fn summary_fixture() -> Value {
    json!({
        "points": 96.4,
        "steps": 888,
        "calories": 3132.3888,
        "activityCalories": 547.1241,
        "distance": 0.2821
    })
}

pub fn summary_detail_fixture() -> Value {
    json!({
        "summary": [
            {"date": "2013-11-05", "points": 394.4, "steps": 3650, "calories": 1687.4735,
             "activityCalories": 412.3124, "distance": 1.18},
            {"date": "2013-11-06", "points": 459.6, "steps": 4330, "calories": 1707.8484,
             "activityCalories": 412.3124, "distance": 1.3982},
            {"date": "2013-11-07", "points": 430.4, "steps": 4022, "calories": 1698.7234,
             "activityCalories": 412.3124, "distance": 1.2988},
            {"date": "2013-11-08", "points": 376, "steps": 3514, "calories": 1681.7235,
             "activityCalories": 412.3124, "distance": 1.1429}
        ]
    })
}

pub fn sessions_fixture() -> Value {
    json!({
        "sessions": [
            {"id": "51a4189acf12e53f82000001", "activityType": "Cycling",
             "startTime": "2013-11-05T10:26:54-04:00", "duration": 900, "points": 210.8,
             "steps": 1406, "calories": 25.7325, "distance": 0.5125},
            {"id": "51a4189acf12e53f82000002", "activityType": "Cycling",
             "startTime": "2013-11-06T10:26:54-04:00", "duration": 901, "points": 210.9,
             "steps": 1407, "calories": 25.7326, "distance": 0.5126}
        ]
    })
}

pub fn sleeps_fixture() -> Value {
    json!({
        "sleeps": [{
            "id": "54bbb383c00ae7002434af92",
            "autoDetected": true,
            "startTime": "2015-01-18T00:04:49-06:00",
            "duration": 25260,
            "sleepDetails": [
                {"datetime": "2015-01-18T00:04:49-06:00", "value": 2},
                {"datetime": "2015-01-18T00:11:49-06:00", "value": 3},
                {"datetime": "2015-01-18T00:43:49-06:00", "value": 2},
                {"datetime": "2015-01-18T01:36:49-06:00", "value": 3},
                {"datetime": "2015-01-18T06:02:49-06:00", "value": 1},
                {"datetime": "2015-01-18T06:42:49-06:00", "value": 2}
            ]
        }]
    })
}
