use anyhow::Result;
use httpmock::prelude::*;
use moop::config::toml_config::ApiConfig;
use moop::{HttpMoopRepository, MoopConfig, MoopError, MoopRepository, Provider, SearchViewModel};
use std::sync::Arc;
use std::time::Duration;

fn config_for(server: &MockServer) -> MoopConfig {
    MoopConfig {
        api: ApiConfig {
            endpoint: server.base_url(),
            timeout_seconds: Some(5),
        },
        ..MoopConfig::default()
    }
}

#[tokio::test]
async fn test_search_movie_decodes_array_body() -> Result<()> {
    let server = MockServer::start();
    let search_mock = server.mock(|when, then| {
        when.method(GET).path("/search").query_param("query", "up");
        then.status(200)
            .header("Content-Type", "application/json")
            .json_body(serde_json::json!([
                {"id": "20090555", "title": "Up", "openDate": "2009.07.29", "age": 0, "isNow": false},
                {"id": "20180123", "title": "Upgrade", "posterUrl": "http://img/upgrade.jpg"}
            ]));
    });

    let repository = HttpMoopRepository::new(&config_for(&server))?;
    let movies = repository.search_movie("up").await?;

    search_mock.assert();
    assert_eq!(movies.len(), 2);
    assert_eq!(movies[0].title, "Up");
    assert!(movies[0].release_date().is_some());
    assert_eq!(movies[1].poster_url.as_deref(), Some("http://img/upgrade.jpg"));
    Ok(())
}

#[tokio::test]
async fn test_search_movie_decodes_wrapped_body() -> Result<()> {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/search");
        then.status(200)
            .json_body(serde_json::json!({"list": [{"id": "1", "title": "Coco"}]}));
    });

    let repository = HttpMoopRepository::new(&config_for(&server))?;
    let movies = repository.search_movie("coco").await?;

    assert_eq!(movies.len(), 1);
    assert_eq!(movies[0].id, "1");
    Ok(())
}

#[tokio::test]
async fn test_error_status_is_reported() -> Result<()> {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/search");
        then.status(503);
    });

    let repository = HttpMoopRepository::new(&config_for(&server))?;
    let result = repository.search_movie("anything").await;

    match result {
        Err(MoopError::HttpStatus { status, url }) => {
            assert_eq!(status, 503);
            assert!(url.ends_with("/search"));
        }
        other => panic!("expected HttpStatus error, got {:?}", other),
    }
    Ok(())
}

#[tokio::test]
async fn test_malformed_body_is_serialization_error() -> Result<()> {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/codes");
        then.status(200).body("{\"cgv\": ");
    });

    let repository = HttpMoopRepository::new(&config_for(&server))?;
    let result = repository.get_code_list().await;

    assert!(matches!(result, Err(MoopError::SerializationError(_))));
    Ok(())
}

#[tokio::test]
async fn test_code_list_merges_in_provider_order() -> Result<()> {
    let server = MockServer::start();
    let codes_mock = server.mock(|when, then| {
        when.method(GET).path("/codes");
        then.status(200).json_body(serde_json::json!({
            "cgv": {"list": [
                {"area": {"code": "01", "name": "Seoul"}, "theaterList": [
                    {"type": "C", "code": "0056", "name": "CGV Gangnam", "lng": 127.026, "lat": 37.501},
                    {"type": "C", "code": "0001", "name": "CGV Gangbyeon", "lng": 127.095, "lat": 37.536}
                ]}
            ]},
            "lotte": {"list": []},
            "megabox": {"list": [
                {"area": {"code": "10", "name": "Seoul"}, "theaterList": []}
            ]}
        }));
    });

    let repository = HttpMoopRepository::new(&config_for(&server))?;
    let response = repository.get_code_list().await?;

    codes_mock.assert();
    let areas = response.to_area_group_list();
    assert_eq!(areas.len(), 2);
    assert_eq!(areas[0].area.code, "01");
    assert_eq!(areas[1].area.code, "10");

    let theaters = response.to_theater_list();
    assert_eq!(theaters.len(), 2);
    assert!(theaters.iter().all(|t| t.provider() == Some(Provider::Cgv)));
    Ok(())
}

#[tokio::test]
async fn test_search_view_model_over_http() -> Result<()> {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/search").query_param("query", "xyz");
        then.status(200).json_body(serde_json::json!([]));
    });

    let repository = Arc::new(HttpMoopRepository::new(&config_for(&server))?);
    let view_model = SearchViewModel::new(repository);
    let mut ui_model = view_model.ui_model();

    view_model.search_for("xyz");
    tokio::time::timeout(Duration::from_secs(5), ui_model.changed()).await??;

    let snapshot = ui_model.borrow().clone().expect("snapshot published");
    assert!(snapshot.has_no_item);
    Ok(())
}

#[test]
fn test_invalid_endpoint_is_rejected() {
    let config = MoopConfig {
        api: ApiConfig {
            endpoint: "not a url".to_string(),
            timeout_seconds: None,
        },
        ..MoopConfig::default()
    };

    assert!(matches!(
        HttpMoopRepository::new(&config),
        Err(MoopError::InvalidConfigValueError { .. })
    ));
}
