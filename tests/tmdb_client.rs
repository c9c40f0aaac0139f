use cinematch_rs::config::ClientConfig;
use cinematch_rs::fetch::FetchError;
use cinematch_rs::tmdb::{DiscoverQuery, MetadataApi, TmdbClient};
use chrono::NaiveDate;
use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn client(server: &MockServer) -> TmdbClient {
    let config = ClientConfig::new("test-key").with_metadata_base_url(format!("{}/3", server.uri()));
    TmdbClient::new(&config).unwrap()
}

#[tokio::test]
async fn test_search_sends_key_and_query() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/3/search/movie"))
        .and(query_param("api_key", "test-key"))
        .and(query_param("query", "The Dark Knight"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "page": 1,
            "results": [
                {"id": 155, "title": "The Dark Knight", "original_title": "The Dark Knight",
                 "genre_ids": [18, 28, 80], "vote_average": 8.5, "poster_path": "/qJ2tW6WMUDux911r6m7haRef0WH.jpg"},
                {"id": 1, "title": "Other"}
            ]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let movie = client(&server).await.first_match("The Dark Knight").await.unwrap();
    assert_eq!(movie.id, 155);
    assert_eq!(movie.genre_ids, vec![18, 28, 80]);
}

#[tokio::test]
async fn test_empty_search_is_no_match() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/3/search/movie"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"results": []})))
        .mount(&server)
        .await;

    let err = client(&server).await.first_match("zzz").await.unwrap_err();
    assert!(err.is_no_match());
}

#[tokio::test]
async fn test_status_and_shape_errors() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/3/genre/movie/list"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/3/movie/1/credits"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&server)
        .await;

    let tmdb = client(&server).await;
    assert!(matches!(
        tmdb.genres().await,
        Err(FetchError::Status { status: 401, .. })
    ));
    assert!(matches!(tmdb.credits(1).await, Err(FetchError::Shape { .. })));
}

#[tokio::test]
async fn test_details_with_videos() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/3/movie/155"))
        .and(query_param("append_to_response", "videos"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": 155,
            "title": "The Dark Knight",
            "videos": {"results": [
                {"key": "abc", "name": "Teaser", "site": "YouTube"},
                {"key": "def", "name": "Official Trailer", "site": "YouTube"}
            ]}
        })))
        .mount(&server)
        .await;

    let details = client(&server).await.details_with_videos(155).await.unwrap();
    assert_eq!(details.videos.unwrap().results.len(), 2);
}

#[tokio::test]
async fn test_discover_or_filter() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/3/discover/movie"))
        .and(query_param("sort_by", "popularity.desc"))
        .and(query_param("with_genres", "28|12"))
        .and(query_param("release_date.lte", "2019-12-12"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "results": [{"id": 299534, "title": "Avengers: Endgame", "original_title": "Avengers: Endgame"}]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let query = DiscoverQuery {
        genres: vec![28, 12],
        release_date_lte: NaiveDate::from_ymd_opt(2019, 12, 12),
    };
    let movies = client(&server).await.discover(&query).await.unwrap();
    assert_eq!(movies.len(), 1);
    assert!(movies[0].is_renderable());
}
