use std::time::Duration;

use serde_json::json;
use teams_service::error::GatewayError;
use teams_service::services::players_gateway::{HttpPlayersGateway, PlayersGateway};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn roster() -> serde_json::Value {
    json!([
        {
            "id": 1,
            "name": "LeBron James",
            "position": "Forward",
            "number": 23,
            "nationality": "USA",
            "teamName": "Lakers",
            "email": "lebron@example.com",
            "age": 40
        },
        {
            "id": 2,
            "name": "Luka Doncic",
            "position": "Guard",
            "number": 77,
            "nationality": "Slovenia",
            "teamName": "Lakers"
        }
    ])
}

async fn gateway_for(server: &MockServer) -> HttpPlayersGateway {
    HttpPlayersGateway::new(&format!("{}/api", server.uri())).unwrap()
}

#[tokio::test]
async fn fetches_players_by_team_id() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/players/team/3"))
        .respond_with(ResponseTemplate::new(200).set_body_json(roster()))
        .expect(1)
        .mount(&server)
        .await;

    let players = gateway_for(&server).await.players_by_team_id(3).await.unwrap();

    assert_eq!(players.len(), 2);
    assert_eq!(players[0].name, "LeBron James");
    assert_eq!(players[0].number, Some(23));
    assert_eq!(players[0].email.as_deref(), Some("lebron@example.com"));
    assert_eq!(players[1].nationality.as_deref(), Some("Slovenia"));
    assert_eq!(players[1].age, None);
}

#[tokio::test]
async fn fetches_players_by_encoded_team_name() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/players/team-name/LA%20Lakers"))
        .respond_with(ResponseTemplate::new(200).set_body_json(roster()))
        .expect(1)
        .mount(&server)
        .await;

    let players = gateway_for(&server)
        .await
        .players_by_team_name("LA Lakers")
        .await
        .unwrap();
    assert_eq!(players.len(), 2);
}

#[tokio::test]
async fn empty_array_is_an_empty_roster() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/players/team/9"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&server)
        .await;

    let players = gateway_for(&server).await.players_by_team_id(9).await.unwrap();
    assert!(players.is_empty());
}

#[tokio::test]
async fn non_success_status_is_reported() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/players/team/3"))
        .respond_with(ResponseTemplate::new(503))
        .expect(1)
        .mount(&server)
        .await;

    let err = gateway_for(&server).await.players_by_team_id(3).await.unwrap_err();
    assert!(matches!(err, GatewayError::Status(503)));
}

#[tokio::test]
async fn not_found_is_not_an_empty_roster() {
    let server = MockServer::start().await;

    let err = gateway_for(&server).await.players_by_team_name("Ghosts").await.unwrap_err();
    assert!(matches!(err, GatewayError::Status(404)));
}

#[tokio::test]
async fn undecodable_body_is_reported() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/players/team/3"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "items": [], "totalCount": 0 })))
        .mount(&server)
        .await;

    let err = gateway_for(&server).await.players_by_team_id(3).await.unwrap_err();
    assert!(matches!(err, GatewayError::Decode(_)));
}

#[tokio::test]
async fn slow_upstream_times_out() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/players/team/3"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(roster())
                .set_delay(Duration::from_secs(3)),
        )
        .mount(&server)
        .await;

    let gateway =
        HttpPlayersGateway::with_timeout(&format!("{}/api", server.uri()), Duration::from_millis(200)).unwrap();

    let started = std::time::Instant::now();
    let err = gateway.players_by_team_id(3).await.unwrap_err();

    assert!(matches!(err, GatewayError::Timeout(_)));
    assert!(started.elapsed() < Duration::from_secs(2));
}

#[tokio::test]
async fn unreachable_upstream_is_a_transport_error() {
    let gateway = HttpPlayersGateway::new("http://127.0.0.1:9/api").unwrap();
    let err = gateway.players_by_team_id(1).await.unwrap_err();
    assert!(matches!(err, GatewayError::Transport(_) | GatewayError::Timeout(_)));
}
